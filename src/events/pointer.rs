use crate::core::orbit::{drag_mode_for_button, DragMode};
use crate::core::scene::SceneState;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Default, Clone, Copy)]
pub struct DragState {
    pub mode: Option<DragMode>,
    pub pointer_id: i32,
    pub last_x: f32,
    pub last_y: f32,
}

#[derive(Clone)]
pub struct OrbitWiring {
    pub canvas: web::HtmlCanvasElement,
    pub scene: Rc<RefCell<SceneState>>,
    pub drag: Rc<RefCell<DragState>>,
}

pub fn wire_orbit_handlers(w: OrbitWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
    wire_wheel(&w);
    wire_contextmenu(&w);
}

fn add_listener<E: FromWasmAbi + 'static>(
    target: &web::EventTarget,
    kind: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    _ = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerdown(w: &OrbitWiring) {
    let w2 = w.clone();
    add_listener(&w.canvas, "pointerdown", move |ev: web::PointerEvent| {
        let pan_modifier = ev.shift_key() || ev.ctrl_key() || ev.meta_key();
        let Some(mode) = drag_mode_for_button(ev.button(), pan_modifier) else {
            return;
        };
        *w2.drag.borrow_mut() = DragState {
            mode: Some(mode),
            pointer_id: ev.pointer_id(),
            last_x: ev.client_x() as f32,
            last_y: ev.client_y() as f32,
        };
        _ = w2.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    });
}

fn wire_pointermove(w: &OrbitWiring) {
    let w2 = w.clone();
    add_listener(&w.canvas, "pointermove", move |ev: web::PointerEvent| {
        let (mode, dx, dy) = {
            let mut drag = w2.drag.borrow_mut();
            let Some(mode) = drag.mode else {
                return;
            };
            if drag.pointer_id != ev.pointer_id() {
                return;
            }
            let (x, y) = (ev.client_x() as f32, ev.client_y() as f32);
            let (dx, dy) = (x - drag.last_x, y - drag.last_y);
            drag.last_x = x;
            drag.last_y = y;
            (mode, dx, dy)
        };
        let client_height = w2.canvas.client_height() as f32;
        let scene = &mut *w2.scene.borrow_mut();
        match mode {
            DragMode::Rotate => scene.controls.rotate_by_pixels(dx, dy, client_height),
            DragMode::Dolly => scene.controls.dolly_by_pixels(dy),
            DragMode::Pan => scene
                .controls
                .pan_by_pixels(dx, dy, client_height, &scene.camera),
        }
    });
}

fn wire_pointerup(w: &OrbitWiring) {
    for kind in ["pointerup", "pointercancel"] {
        let w2 = w.clone();
        add_listener(&w.canvas, kind, move |ev: web::PointerEvent| {
            let mut drag = w2.drag.borrow_mut();
            if drag.mode.is_some() && drag.pointer_id == ev.pointer_id() {
                drag.mode = None;
                _ = w2.canvas.release_pointer_capture(ev.pointer_id());
            }
        });
    }
}

fn wire_wheel(w: &OrbitWiring) {
    let w2 = w.clone();
    add_listener(&w.canvas, "wheel", move |ev: web::WheelEvent| {
        w2.scene
            .borrow_mut()
            .controls
            .zoom_by_wheel(ev.delta_y() as f32);
        ev.prevent_default();
    });
}

fn wire_contextmenu(w: &OrbitWiring) {
    add_listener(&w.canvas, "contextmenu", move |ev: web::Event| {
        ev.prevent_default();
    });
}
