//! Full-screen WebGL transition overlay.
//!
//! Runs its own animation loop. Each frame it asks the [`OverlayClock`]
//! whether the transition signal is on; only then are the uniforms uploaded
//! and the quad drawn. A shader that fails to build leaves `program` empty and
//! every frame becomes a no-op.

use crate::constants::{FRAGMENT_SHADER_ID, VERTEX_SHADER_ID};
use crate::core::signal::{OverlayClock, TransitionSignal};
use crate::dom;
use wasm_bindgen::JsCast;
use web_sys as web;
use web_sys::WebGl2RenderingContext as GL;

// Triangle strip covering clip space
const QUAD: [f32; 8] = [-1.0, -1.0, 1.0, -1.0, -1.0, 1.0, 1.0, 1.0];

/// WebGL2 when available, WebGL1 otherwise. Both expose the calls used here
/// with identical signatures and enum values.
#[derive(Clone)]
enum Gl {
    V2(web::WebGl2RenderingContext),
    V1(web::WebGlRenderingContext),
}

macro_rules! gl {
    ($gl:expr, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $gl {
            Gl::V2(g) => g.$method($($arg),*),
            Gl::V1(g) => g.$method($($arg),*),
        }
    };
}

fn acquire_context(canvas: &web::HtmlCanvasElement) -> Option<Gl> {
    if let Some(ctx) = canvas.get_context("webgl2").ok().flatten() {
        if let Ok(g) = ctx.dyn_into::<web::WebGl2RenderingContext>() {
            return Some(Gl::V2(g));
        }
    }
    let ctx = canvas.get_context("webgl").ok().flatten()?;
    ctx.dyn_into::<web::WebGlRenderingContext>().ok().map(Gl::V1)
}

fn compile_shader(gl: &Gl, kind: u32, source: &str) -> Result<web::WebGlShader, String> {
    let shader = gl!(gl, create_shader(kind)).ok_or("could not create shader")?;
    gl!(gl, shader_source(&shader, source));
    gl!(gl, compile_shader(&shader));
    let ok = gl!(gl, get_shader_parameter(&shader, GL::COMPILE_STATUS))
        .as_bool()
        .unwrap_or(false);
    if ok {
        Ok(shader)
    } else {
        let info = gl!(gl, get_shader_info_log(&shader)).unwrap_or_default();
        gl!(gl, delete_shader(Some(&shader)));
        Err(format!("compiling shader failed: {}", info))
    }
}

fn link_program(gl: &Gl, vert_src: &str, frag_src: &str) -> Result<web::WebGlProgram, String> {
    let vert = compile_shader(gl, GL::VERTEX_SHADER, vert_src)?;
    let frag = compile_shader(gl, GL::FRAGMENT_SHADER, frag_src)?;
    let prog = gl!(gl, create_program()).ok_or("could not create program")?;
    gl!(gl, attach_shader(&prog, &vert));
    gl!(gl, attach_shader(&prog, &frag));
    gl!(gl, link_program(&prog));
    let ok = gl!(gl, get_program_parameter(&prog, GL::LINK_STATUS))
        .as_bool()
        .unwrap_or(false);
    if ok {
        Ok(prog)
    } else {
        let info = gl!(gl, get_program_info_log(&prog)).unwrap_or_default();
        Err(format!("unable to initialize the shader program: {}", info))
    }
}

pub struct ShaderOverlay {
    canvas: web::HtmlCanvasElement,
    gl: Gl,
    program: Option<web::WebGlProgram>,
    resolution_loc: Option<web::WebGlUniformLocation>,
    time_loc: Option<web::WebGlUniformLocation>,
    clock: OverlayClock,
    signal: TransitionSignal,
}

impl ShaderOverlay {
    pub fn new(
        document: &web::Document,
        canvas: web::HtmlCanvasElement,
        signal: TransitionSignal,
    ) -> anyhow::Result<Self> {
        let gl = acquire_context(&canvas).ok_or_else(|| anyhow::anyhow!("no WebGL context"))?;

        let program = match (
            dom::script_text(document, VERTEX_SHADER_ID),
            dom::script_text(document, FRAGMENT_SHADER_ID),
        ) {
            (Some(vs), Some(fs)) => link_program(&gl, &vs, &fs),
            _ => Err(format!(
                "missing #{} or #{} shader source",
                VERTEX_SHADER_ID, FRAGMENT_SHADER_ID
            )),
        };
        let program = match program {
            Ok(p) => Some(p),
            Err(e) => {
                log::error!("[overlay] {}", e);
                None
            }
        };

        let buffer = gl!(&gl, create_buffer());
        gl!(&gl, bind_buffer(GL::ARRAY_BUFFER, buffer.as_ref()));
        let quad = js_sys::Float32Array::from(&QUAD[..]);
        gl!(
            &gl,
            buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &quad, GL::STATIC_DRAW)
        );

        let (mut resolution_loc, mut time_loc) = (None, None);
        if let Some(p) = &program {
            let loc = gl!(&gl, get_attrib_location(p, "a_position"));
            if loc >= 0 {
                gl!(&gl, enable_vertex_attrib_array(loc as u32));
                gl!(
                    &gl,
                    vertex_attrib_pointer_with_i32(loc as u32, 2, GL::FLOAT, false, 0, 0)
                );
            }
            gl!(&gl, use_program(Some(p)));
            resolution_loc = gl!(&gl, get_uniform_location(p, "u_resolution"));
            time_loc = gl!(&gl, get_uniform_location(p, "u_time"));
        }

        gl!(&gl, clear_color(0.0, 0.0, 0.0, 1.0));
        gl!(&gl, clear(GL::COLOR_BUFFER_BIT));

        let mut overlay = Self {
            canvas,
            gl,
            program,
            resolution_loc,
            time_loc,
            clock: OverlayClock::default(),
            signal,
        };
        overlay.resize(document);
        Ok(overlay)
    }

    pub fn resize(&mut self, document: &web::Document) {
        if let Some((w, h)) = dom::sync_canvas_to_viewport(&self.canvas) {
            gl!(&self.gl, viewport(0, 0, w as i32, h as i32));
        }
        dom::request_fullscreen(document);
    }

    /// Draw one frame if the transition is active. Returns whether a draw
    /// was issued.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        let Some(elapsed) =
            self.clock
                .draw_time(self.signal.is_active(), self.program.is_some(), now_ms)
        else {
            return false;
        };
        let (w, h) = (self.canvas.width() as f32, self.canvas.height() as f32);
        gl!(&self.gl, uniform2f(self.resolution_loc.as_ref(), w, h));
        gl!(&self.gl, uniform1f(self.time_loc.as_ref(), elapsed));
        gl!(&self.gl, clear(GL::COLOR_BUFFER_BIT));
        gl!(&self.gl, draw_arrays(GL::TRIANGLE_STRIP, 0, 4));
        true
    }
}
