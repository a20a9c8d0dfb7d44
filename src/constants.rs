// Scene, controller and transition tuning constants.
//
// These constants express intended behavior (camera framing, clamp limits,
// sequence timings) and keep magic numbers out of the code.
use glam::Vec3;

// Camera
pub const CAMERA_FOV_Y_DEG: f32 = 10.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 500.0;
pub const CAMERA_HOME: Vec3 = Vec3::new(8.0, 4.0, 20.0); // position after load and on reset

// Orbit controller
pub const ORBIT_DAMPING_FACTOR: f32 = 0.05;
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_SPEED: f32 = 1.0;
pub const ORBIT_PAN_SPEED: f32 = 1.0;
pub const ORBIT_MIN_DISTANCE: f32 = 3.0;
pub const ORBIT_MAX_DISTANCE: f32 = 50.0;
pub const ORBIT_MIN_POLAR: f32 = std::f32::consts::PI / 5.0;
pub const ORBIT_MAX_POLAR: f32 = std::f32::consts::PI / 2.0;
pub const ORBIT_WHEEL_STEP: f32 = 0.95; // dolly scale per wheel notch

// Pan target box
pub const PAN_MIN: Vec3 = Vec3::new(-5.0, -2.0, -5.0);
pub const PAN_MAX: Vec3 = Vec3::new(5.0, 2.0, 5.0);

// Scripted fly-through
pub const APPROACH_TARGET: Vec3 = Vec3::new(0.0, 3.0, 20.0);
pub const APPROACH_DURATION_MS: f64 = 1000.0;
pub const DOLLY_DURATION_MS: f64 = 3000.0;
pub const DOLLY_END_Z: f32 = 0.0;
pub const HOLD_BEFORE_NAVIGATE_MS: f64 = 4000.0;
pub const NAVIGATE_URL: &str = "/website.html";

// Scene layout
pub const SCENE_OFFSET: Vec3 = Vec3::new(0.0, 0.2, 0.0); // applied once the model is in
pub const AXES_LENGTH: f32 = 5.0;

// Outline pass
pub const OUTLINE_THICKNESS: f32 = 0.003;
pub const OUTLINE_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

// Display
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Assets
pub const BAKED_TEXTURE_URL: &str = "https://rawcdn.githack.com/ricardoolivaalonso/ThreeJS-Room13/f6d2eeb487a3d1bcd9944e23621c21f60055b280/static/baked-alt.jpg";
pub const MODEL_URL: &str = "https://rawcdn.githack.com/ricardoolivaalonso/ThreeJS-Room13/47b05e2db4e49eec33d63729e920894a906cb693/static/model.glb";

// DOM contract
pub const SCENE_CANVAS_SELECTOR: &str = ".webgl";
pub const OVERLAY_CANVAS_ID: &str = "glcanvas";
pub const LOADER_ID: &str = "loader";
pub const RED_OVERLAY_ID: &str = "redOverlay";
pub const VERTEX_SHADER_ID: &str = "vertex-shader";
pub const FRAGMENT_SHADER_ID: &str = "fragment-shader";
pub const RESET_HOOK: &str = "website_reset"; // optional page-supplied function
