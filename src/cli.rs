//! Command-line argument parsing.

use clap::Parser;

use crate::params::{CameraPreset, MotionVariant, RecordingConfig};
use crate::scene::{ObjectMode, SceneState};
use crate::water::WaterMode;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "Sideshow")]
#[command(about = "Carnival shooting-gallery demo", long_about = None)]
pub struct Args {
    /// Motion variant: gallery (default) or circuit
    #[arg(long, value_name = "VARIANT", default_value = "gallery")]
    pub variant: String,

    /// Starting camera preset: front (default) or perspective
    #[arg(long, value_name = "PRESET", default_value = "front")]
    pub camera_preset: String,

    /// Start with a still water surface
    #[arg(long)]
    pub flat_water: bool,

    /// Ride the bare target instead of the duck
    #[arg(long)]
    pub target_only: bool,

    /// Record the demo to PNG frames (duration in seconds)
    #[arg(long, value_name = "SECONDS")]
    pub record: Option<f32>,
}

impl Args {
    /// Parse the motion variant from command-line arguments
    pub fn parse_variant(&self) -> MotionVariant {
        match self.variant.to_lowercase().as_str() {
            "gallery" => MotionVariant::Gallery,
            "circuit" => MotionVariant::Circuit,
            other => {
                log::warn!("unknown motion variant '{other}', using gallery");
                MotionVariant::Gallery
            }
        }
    }

    /// Parse the camera preset from command-line arguments
    pub fn parse_camera_preset(&self) -> CameraPreset {
        match self.camera_preset.to_lowercase().as_str() {
            "front" => CameraPreset::Front,
            "perspective" => CameraPreset::Perspective,
            other => {
                log::warn!("unknown camera preset '{other}', using front");
                CameraPreset::Front
            }
        }
    }

    /// Scene flags selected at startup
    pub fn initial_scene(&self) -> SceneState {
        SceneState {
            water: if self.flat_water {
                WaterMode::Flat
            } else {
                WaterMode::Wavy
            },
            object: if self.target_only {
                ObjectMode::TargetOnly
            } else {
                ObjectMode::Duck
            },
            camera_preset: self.parse_camera_preset(),
        }
    }

    /// Create recording configuration if recording mode is enabled
    pub fn create_recording_config(&self) -> Option<RecordingConfig> {
        self.record.map(|duration| {
            let config = RecordingConfig::new(duration);

            std::fs::create_dir_all(config.frames_dir())
                .expect("Failed to create frames directory");

            config
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(variant: &str, preset: &str) -> Args {
        Args {
            variant: variant.to_string(),
            camera_preset: preset.to_string(),
            flat_water: false,
            target_only: false,
            record: None,
        }
    }

    #[test]
    fn variant_names_parse_case_insensitively() {
        assert_eq!(args("Circuit", "front").parse_variant(), MotionVariant::Circuit);
        assert_eq!(args("GALLERY", "front").parse_variant(), MotionVariant::Gallery);
        assert_eq!(args("bogus", "front").parse_variant(), MotionVariant::Gallery);
    }

    #[test]
    fn scene_flags_follow_the_switches() {
        let mut a = args("gallery", "perspective");
        a.flat_water = true;
        a.target_only = true;

        let scene = a.initial_scene();
        assert_eq!(scene.water, WaterMode::Flat);
        assert_eq!(scene.object, ObjectMode::TargetOnly);
        assert_eq!(scene.camera_preset, CameraPreset::Perspective);
    }
}
