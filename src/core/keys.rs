#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Snap the camera home and cancel the transition.
    Reset,
    /// Start the fly-through.
    Confirm,
}

#[inline]
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    match key {
        "p" => Some(KeyAction::Reset),
        "Enter" => Some(KeyAction::Confirm),
        _ => None,
    }
}
