//! Motion parameters for the two animation variants.

/// Which animation driver runs the moving object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionVariant {
    /// Float across the water, drop off the far end, pause, restart
    Gallery,

    /// Loop around the front/back target tracks on a fixed rail
    Circuit,
}

/// Gallery variant: traverse, fall, ground pause.
#[derive(Debug, Clone)]
pub struct GalleryMotion {
    /// Left end of the traverse path (meters).
    /// Inset 0.6 m from the water edge so the object never clips the tank.
    pub path_left_x: f32,

    /// Right end of the traverse path (meters)
    pub path_right_x: f32,

    /// Path lane (meters, Z), down the water tank centerline
    pub path_z: f32,

    /// Object height above the sampled water surface while floating (meters)
    pub float_offset_m: f32,

    /// Elevation at which a falling object comes to rest (meters)
    pub ground_rest_y: f32,

    /// Traverse speed (meters per second)
    pub move_speed_m_per_s: f32,

    /// Downward acceleration during the fall (meters per second squared)
    pub gravity_m_per_s2: f32,

    /// Dwell on the ground before restarting (seconds)
    pub ground_pause_s: f32,
}

impl Default for GalleryMotion {
    fn default() -> Self {
        Self {
            path_left_x: -6.4,
            path_right_x: 6.4,
            path_z: 1.5,
            float_offset_m: 1.0,
            ground_rest_y: 1.1,
            move_speed_m_per_s: 4.6,
            gravity_m_per_s2: 28.0,
            ground_pause_s: 1.6,
        }
    }
}

/// Circuit variant: front track, turn, back track, turn.
///
/// The turns swing the object through a horizontal semicircle joining the
/// two track ends; the turn radius is half the track gap.
#[derive(Debug, Clone)]
pub struct CircuitMotion {
    /// Left end of both tracks (meters)
    pub path_left_x: f32,

    /// Right end of both tracks (meters)
    pub path_right_x: f32,

    /// Front track lane (meters, Z)
    pub front_z: f32,

    /// Back track lane (meters, Z)
    pub back_z: f32,

    /// Rail elevation the object rides at (meters)
    pub track_y: f32,

    /// Speed along the straight tracks (meters per second)
    pub move_speed_m_per_s: f32,

    /// Time to swing through each end turn (seconds)
    pub turn_duration_s: f32,
}

impl Default for CircuitMotion {
    fn default() -> Self {
        Self {
            path_left_x: -6.4,
            path_right_x: 6.4,
            front_z: 2.1,
            back_z: 0.9,
            track_y: 6.8,
            move_speed_m_per_s: 4.6,
            turn_duration_s: 0.9,
        }
    }
}

impl CircuitMotion {
    /// Turn radius (meters): half the front/back track gap.
    pub fn turn_radius(&self) -> f32 {
        (self.front_z - self.back_z) * 0.5
    }

    /// Z midpoint between the tracks (meters).
    pub fn track_center_z(&self) -> f32 {
        (self.front_z + self.back_z) * 0.5
    }
}
