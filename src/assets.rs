use crate::constants::{BAKED_TEXTURE_URL, MODEL_URL};
use crate::core::error::AssetError;
use crate::core::mesh::{self, MeshData, TextureData};
use instant::Instant;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

pub struct SceneAssets {
    pub mesh: MeshData,
    pub texture: TextureData,
}

fn network_err(url: &str, e: JsValue) -> AssetError {
    AssetError::Network {
        url: url.to_string(),
        reason: format!("{:?}", e),
    }
}

fn body_err(url: &str, e: JsValue) -> AssetError {
    AssetError::Body {
        url: url.to_string(),
        reason: format!("{:?}", e),
    }
}

/// Issue the request right away; the returned future resolves to the response.
fn start_fetch(url: &str) -> Result<JsFuture, AssetError> {
    let window = web::window().ok_or_else(|| network_err(url, JsValue::from_str("no window")))?;
    Ok(JsFuture::from(window.fetch_with_str(url)))
}

/// Await a response and collect its body, logging download progress when
/// `log_progress` is set and the server sent a length.
async fn read_body(url: &str, pending: JsFuture, log_progress: bool) -> Result<Vec<u8>, AssetError> {
    let resp: web::Response = pending
        .await
        .map_err(|e| network_err(url, e))?
        .dyn_into()
        .map_err(|e| network_err(url, e))?;
    if !resp.ok() {
        return Err(AssetError::Status {
            url: url.to_string(),
            status: resp.status(),
        });
    }
    let total = resp
        .headers()
        .get("content-length")
        .ok()
        .flatten()
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|t| *t > 0.0);

    let Some(stream) = resp.body() else {
        let promise = resp.array_buffer().map_err(|e| body_err(url, e))?;
        let buf = JsFuture::from(promise).await.map_err(|e| body_err(url, e))?;
        return Ok(js_sys::Uint8Array::new(&buf).to_vec());
    };
    let reader: web::ReadableStreamDefaultReader = stream
        .get_reader()
        .dyn_into()
        .map_err(|e| body_err(url, e.into()))?;

    let mut bytes: Vec<u8> = Vec::with_capacity(total.unwrap_or(0.0) as usize);
    let mut last_band = -1i32;
    loop {
        let chunk = JsFuture::from(reader.read())
            .await
            .map_err(|e| body_err(url, e))?;
        let done = js_sys::Reflect::get(&chunk, &JsValue::from_str("done"))
            .map_err(|e| body_err(url, e))?
            .as_bool()
            .unwrap_or(true);
        if done {
            break;
        }
        let value: js_sys::Uint8Array = js_sys::Reflect::get(&chunk, &JsValue::from_str("value"))
            .map_err(|e| body_err(url, e))?
            .dyn_into()
            .map_err(|e| body_err(url, e))?;
        let start = bytes.len();
        bytes.resize(start + value.length() as usize, 0);
        value.copy_to(&mut bytes[start..]);

        if let (true, Some(total)) = (log_progress, total) {
            let pct = bytes.len() as f64 / total * 100.0;
            // one line per 10% band keeps the console readable
            let band = (pct / 10.0).floor() as i32;
            if band != last_band {
                last_band = band;
                log::info!("[assets] {:.0}% loaded", pct);
            }
        }
    }
    Ok(bytes)
}

/// Fetch and decode the baked texture and the room model. Both requests are
/// in flight together; decoding happens once each body is complete.
pub async fn load_scene_assets() -> Result<SceneAssets, AssetError> {
    let started = Instant::now();
    let texture_req = start_fetch(BAKED_TEXTURE_URL)?;
    let model_req = start_fetch(MODEL_URL)?;

    let texture_bytes = read_body(BAKED_TEXTURE_URL, texture_req, false).await?;
    let model_bytes = read_body(MODEL_URL, model_req, true).await?;
    log::info!(
        "[assets] downloaded texture={}B model={}B in {:?}",
        texture_bytes.len(),
        model_bytes.len(),
        started.elapsed()
    );

    let texture = mesh::decode_texture(&texture_bytes)?;
    let mesh = mesh::flatten_gltf(&model_bytes)?;
    Ok(SceneAssets { mesh, texture })
}
