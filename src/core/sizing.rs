// Viewport sizing shared by the scene renderer and the overlay canvas.

/// Device pixel ratio capped at `max`; unusable readings fall back to 1.
#[inline]
pub fn capped_pixel_ratio(dpr: f64, max: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 {
        dpr.min(max)
    } else {
        1.0
    }
}

/// Backing-store size in device pixels for a CSS-pixel viewport.
#[inline]
pub fn backing_size(css_width: f64, css_height: f64, dpr: f64, max_dpr: f64) -> (u32, u32) {
    let ratio = capped_pixel_ratio(dpr, max_dpr);
    let w = (css_width.max(0.0) * ratio).floor() as u32;
    let h = (css_height.max(0.0) * ratio).floor() as u32;
    (w.max(1), h.max(1))
}

#[inline]
pub fn aspect(width: f64, height: f64) -> f32 {
    (width / height.max(1.0)) as f32
}
