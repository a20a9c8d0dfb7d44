use thiserror::Error;

/// Why the scene assets could not be brought up.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("request to {url} failed: {reason}")]
    Network { url: String, reason: String },
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("reading body of {url} failed: {reason}")]
    Body { url: String, reason: String },
    #[error("texture decode failed: {0}")]
    Texture(#[from] image::ImageError),
    #[error("model decode failed: {0}")]
    Model(#[from] gltf::Error),
    #[error("model contains no triangles")]
    EmptyModel,
}
