//! Orbit camera limits, sensitivities and viewpoint presets.

/// Named camera viewpoints selectable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraPreset {
    /// Head-on view of the booth opening
    Front,

    /// Raised three-quarter view from stage left
    Perspective,
}

impl CameraPreset {
    /// The other preset (the demo cycles between two viewpoints).
    pub fn next(self) -> Self {
        match self {
            CameraPreset::Front => CameraPreset::Perspective,
            CameraPreset::Perspective => CameraPreset::Front,
        }
    }

    /// Snap pose for this preset.
    pub fn pose(self) -> PresetPose {
        match self {
            CameraPreset::Front => PresetPose {
                azimuth_deg: 0.0,
                elevation_deg: 18.0,
                radius_m: 34.0,
            },
            CameraPreset::Perspective => PresetPose {
                azimuth_deg: -32.0,
                elevation_deg: 24.0,
                radius_m: 36.0,
            },
        }
    }
}

/// Fixed orbit pose a preset snaps to.
#[derive(Debug, Clone, Copy)]
pub struct PresetPose {
    pub azimuth_deg: f32,
    pub elevation_deg: f32,
    pub radius_m: f32,
}

/// Orbit camera ranges and input sensitivities.
#[derive(Debug, Clone)]
pub struct OrbitConfig {
    /// Closest allowed orbit radius (meters)
    pub min_radius_m: f32,

    /// Farthest allowed orbit radius (meters)
    pub max_radius_m: f32,

    /// Lowest allowed elevation (degrees above the horizon)
    pub min_elevation_deg: f32,

    /// Highest allowed elevation (degrees)
    pub max_elevation_deg: f32,

    /// Azimuth clamp, symmetric about the front view (degrees).
    /// Keeps the camera from orbiting behind the booth.
    pub max_azimuth_deg: f32,

    /// Horizontal drag to azimuth (degrees per pixel)
    pub orbit_sensitivity: f32,

    /// Vertical drag to elevation (degrees per pixel)
    pub elevation_sensitivity: f32,

    /// Vertical drag to target radius (meters per pixel)
    pub zoom_sensitivity: f32,

    /// Exponential smoothing rate pulling radius toward its target (1/s)
    pub smoothing_rate_per_s: f32,

    /// Fixed look-at point (meters)
    pub look_at: [f32; 3],
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            min_radius_m: 20.0,
            max_radius_m: 46.0,
            min_elevation_deg: 10.0,
            max_elevation_deg: 55.0,
            max_azimuth_deg: 70.0,
            orbit_sensitivity: 0.25,
            elevation_sensitivity: 0.2,
            zoom_sensitivity: 0.2,
            smoothing_rate_per_s: 5.0,
            look_at: [0.0, 4.5, 0.0],
        }
    }
}
