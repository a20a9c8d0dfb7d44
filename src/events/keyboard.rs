use crate::constants::{RED_OVERLAY_ID, RESET_HOOK};
use crate::core::keys::{action_for_key, KeyAction};
use crate::core::scene::SceneState;
use crate::core::signal::TransitionSignal;
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keypress(
    ev: &web::KeyboardEvent,
    scene: &Rc<RefCell<SceneState>>,
    signal: &TransitionSignal,
    document: &web::Document,
) {
    let Some(action) = action_for_key(&ev.key()) else {
        return;
    };
    let was_idle = scene.borrow().sequence.is_idle();
    let accepted = scene.borrow_mut().handle_key(action, signal);
    match action {
        KeyAction::Reset => {
            dom::set_opacity(document, RED_OVERLAY_ID, 0.0);
            log::info!("[keys] reset view");
            // the page hook may re-enter wasm, so no borrow is held here
            dom::call_page_hook(RESET_HOOK);
        }
        KeyAction::Confirm => {
            if !accepted {
                log::info!("[keys] transition already revealed, confirm ignored");
            } else if was_idle {
                log::info!("[keys] fly-through started");
            } else {
                log::info!("[keys] fly-through restarted from current position");
            }
        }
    }
}

pub fn wire_global_keypress(
    scene: Rc<RefCell<SceneState>>,
    signal: TransitionSignal,
    document: web::Document,
) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keypress(&ev, &scene, &signal, &document);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keypress", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
