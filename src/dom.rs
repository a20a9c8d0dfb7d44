use crate::constants::MAX_PIXEL_RATIO;
use crate::core::sizing;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Viewport size in CSS pixels and the raw device pixel ratio.
pub fn viewport() -> Option<(f64, f64, f64)> {
    let w = web::window()?;
    let width = w.inner_width().ok()?.as_f64()?;
    let height = w.inner_height().ok()?.as_f64()?;
    Some((width, height, w.device_pixel_ratio()))
}

/// Size the backing store to the viewport at the capped pixel ratio and pin
/// the CSS size to the viewport. Returns the new backing size.
pub fn sync_canvas_to_viewport(canvas: &web::HtmlCanvasElement) -> Option<(u32, u32)> {
    let (css_w, css_h, dpr) = viewport()?;
    let (w_px, h_px) = sizing::backing_size(css_w, css_h, dpr, MAX_PIXEL_RATIO);
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    let style = canvas.style();
    _ = style.set_property("width", &format!("{}px", css_w));
    _ = style.set_property("height", &format!("{}px", css_h));
    Some((w_px, h_px))
}

pub fn set_opacity(document: &web::Document, element_id: &str, opacity: f32) {
    if let Some(el) = html_element(document, element_id) {
        _ = el.style().set_property("opacity", &opacity.to_string());
    }
}

pub fn hide(document: &web::Document, element_id: &str) {
    if let Some(el) = html_element(document, element_id) {
        _ = el.style().set_property("display", "none");
    }
}

#[inline]
fn html_element(document: &web::Document, element_id: &str) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(element_id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

/// Text of an embedded `<script type="x-shader/...">` block.
pub fn script_text(document: &web::Document, element_id: &str) -> Option<String> {
    document
        .get_element_by_id(element_id)
        .and_then(|el| el.text_content())
}

pub fn navigate(url: &str) {
    if let Some(w) = web::window() {
        if let Err(e) = w.location().set_href(url) {
            log::error!("[nav] navigation to {} failed: {:?}", url, e);
        }
    }
}

/// Call a function the host page may have installed on `window`.
pub fn call_page_hook(name: &str) {
    let Some(w) = web::window() else {
        return;
    };
    let hook = js_sys::Reflect::get(&w, &JsValue::from_str(name)).ok();
    match hook.and_then(|h| h.dyn_into::<js_sys::Function>().ok()) {
        Some(f) => {
            if let Err(e) = f.call0(&JsValue::NULL) {
                log::error!("[hook] {} threw: {:?}", name, e);
            }
        }
        None => log::debug!("[hook] window.{} not installed", name),
    }
}

/// Best-effort fullscreen; browsers reject this outside a user gesture.
pub fn request_fullscreen(document: &web::Document) {
    if let Some(root) = document.document_element() {
        if let Err(e) = root.request_fullscreen() {
            log::debug!("[dom] fullscreen request refused: {:?}", e);
        }
    }
}
