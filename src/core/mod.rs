pub mod camera;
pub mod error;
pub mod keys;
pub mod mesh;
pub mod orbit;
pub mod scene;
pub mod sequence;
pub mod signal;
pub mod sizing;
pub mod tween;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../../shaders/scene.wgsl");
