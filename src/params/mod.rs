//! Parameter definitions with physical units and documented semantics.
//!
//! Every compiled-in constant of the demo lives here with:
//! - Physical units (meters, seconds, degrees, radians)
//! - Documented ranges and meanings
//! - `Default` impls holding the tuned values

mod camera;
mod motion;
mod render;
mod scene;
mod water;

// Re-export all types
pub use camera::{CameraPreset, OrbitConfig, PresetPose};
pub use motion::{CircuitMotion, GalleryMotion, MotionVariant};
pub use render::{RecordingConfig, RenderConfig};
pub use scene::SceneLayout;
pub use water::WaveParameters;
