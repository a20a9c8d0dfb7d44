use crate::assets::SceneAssets;
use crate::constants::{LOADER_ID, NAVIGATE_URL, RED_OVERLAY_ID, SCENE_OFFSET};
use crate::core::scene::SceneState;
use crate::core::sequence::SequenceEvent;
use crate::core::signal::TransitionSignal;
use crate::dom;
use crate::render;
use glam::Mat4;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub scene: Rc<RefCell<SceneState>>,
    pub signal: TransitionSignal,
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState>,
    /// Filled by the asset task, drained by the next frame.
    pub pending_assets: Rc<RefCell<Option<SceneAssets>>>,
}

impl FrameContext {
    pub fn frame(&mut self, now_ms: f64) {
        let arrived = self.pending_assets.borrow_mut().take();
        if let Some(assets) = arrived {
            self.reveal_model(assets);
        }

        let (event, view_proj) = {
            let mut scene = self.scene.borrow_mut();
            let event = scene.advance(now_ms, &self.signal);
            (event, scene.camera.view_projection())
        };
        match event {
            Some(SequenceEvent::Reveal) => {
                log::info!("[sequence] dolly complete, transition on");
                dom::set_opacity(&self.document, RED_OVERLAY_ID, 1.0);
            }
            Some(SequenceEvent::Navigate) => {
                log::info!("[sequence] leaving for {}", NAVIGATE_URL);
                dom::navigate(NAVIGATE_URL);
            }
            None => {}
        }

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            match g.render(view_proj) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => g.reconfigure(),
                Err(e) => log::error!("render error: {:?}", e),
            }
        }
    }

    /// Viewport changed: new aspect, new backing store, new swapchain.
    pub fn resize(&mut self) {
        let Some((w_px, h_px)) = dom::sync_canvas_to_viewport(&self.canvas) else {
            return;
        };
        if let Some((css_w, css_h, _)) = dom::viewport() {
            self.scene
                .borrow_mut()
                .resize(css_w as f32, css_h as f32);
        }
        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(w_px, h_px);
        }
    }

    fn reveal_model(&mut self, assets: SceneAssets) {
        let Some(g) = &mut self.gpu else {
            log::warn!("[gpu] model loaded but no renderer is available");
            return;
        };
        g.upload_model(
            &assets.mesh,
            &assets.texture,
            Mat4::from_translation(SCENE_OFFSET),
        );
        dom::hide(&self.document, LOADER_ID);
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState> {
    match render::GpuState::new(canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Drive `on_frame` from `requestAnimationFrame` for the page lifetime.
pub fn start_loop(mut on_frame: impl FnMut(f64) + 'static) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |now_ms: f64| {
        on_frame(now_ms);
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
