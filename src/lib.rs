#![cfg(target_arch = "wasm32")]
use crate::constants::{OVERLAY_CANVAS_ID, SCENE_CANVAS_SELECTOR};
use crate::core::scene::SceneState;
use crate::core::signal::TransitionSignal;
use crate::core::sizing;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;

fn on_window_resize(mut handler: impl FnMut() + 'static) {
    let resize_closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("room-portal starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    // The only link between the two components
    let signal = TransitionSignal::new();

    init_overlay(&document, signal.clone());
    init_scene(document, signal).await
}

fn init_overlay(document: &web::Document, signal: TransitionSignal) {
    let Some(el) = document.get_element_by_id(OVERLAY_CANVAS_ID) else {
        log::info!("[overlay] no #{} on this page", OVERLAY_CANVAS_ID);
        return;
    };
    let canvas = match el.dyn_into::<web::HtmlCanvasElement>() {
        Ok(c) => c,
        Err(_) => {
            log::error!("[overlay] #{} is not a canvas", OVERLAY_CANVAS_ID);
            return;
        }
    };
    let overlay = match overlay::ShaderOverlay::new(document, canvas, signal) {
        Ok(o) => Rc::new(RefCell::new(o)),
        Err(e) => {
            log::error!("[overlay] init error: {:?}", e);
            return;
        }
    };

    let overlay_resize = overlay.clone();
    let doc_resize = document.clone();
    on_window_resize(move || overlay_resize.borrow_mut().resize(&doc_resize));

    frame::start_loop(move |now_ms| {
        overlay.borrow_mut().frame(now_ms);
    });
}

async fn init_scene(document: web::Document, signal: TransitionSignal) -> anyhow::Result<()> {
    let Some(el) = document
        .query_selector(SCENE_CANVAS_SELECTOR)
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
    else {
        log::info!("no {} canvas on this page", SCENE_CANVAS_SELECTOR);
        return Ok(());
    };
    let canvas: web::HtmlCanvasElement = el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Backing store must be sized before the surface is created
    dom::sync_canvas_to_viewport(&canvas);
    let aspect = dom::viewport()
        .map(|(w, h, _)| sizing::aspect(w, h))
        .unwrap_or(1.0);
    let scene = Rc::new(RefCell::new(SceneState::new(aspect)));

    events::wire_global_keypress(scene.clone(), signal.clone(), document.clone());
    events::wire_orbit_handlers(events::OrbitWiring {
        canvas: canvas.clone(),
        scene: scene.clone(),
        drag: Rc::new(RefCell::new(events::pointer::DragState::default())),
    });

    // Assets stream in while the GPU comes up; the frame loop picks them up
    let pending_assets = Rc::new(RefCell::new(None));
    {
        let pending = pending_assets.clone();
        spawn_local(async move {
            match assets::load_scene_assets().await {
                Ok(a) => *pending.borrow_mut() = Some(a),
                Err(e) => log::error!("[assets] {}", e),
            }
        });
    }

    let gpu = frame::init_gpu(&canvas).await;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene,
        signal,
        document,
        canvas,
        gpu,
        pending_assets,
    }));

    let frame_resize = frame_ctx.clone();
    on_window_resize(move || frame_resize.borrow_mut().resize());

    frame::start_loop(move |now_ms| frame_ctx.borrow_mut().frame(now_ms));
    Ok(())
}
