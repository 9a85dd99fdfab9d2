//! Finite-state animation drivers for the moving target.
//!
//! Two drivers cover the two booth mechanisms: the gallery run (float
//! across the water, drop off the far end, pause, restart) and the rail
//! circuit (loop around the front/back tracks, swinging through the end
//! turns). Every phase transition clamps the position exactly to the
//! boundary value on the frame the threshold is crossed.

use std::f32::consts::PI;

use glam::Vec3;

use crate::params::{CircuitMotion, GalleryMotion};
use crate::water::{WaterMode, WaterSurface};

/// World-space pose handed to the renderer each frame.
#[derive(Debug, Clone, Copy)]
pub struct ObjectPose {
    pub position: Vec3,
    /// Rotation about the X axis (radians); nonzero only on the circuit
    pub pitch_rad: f32,
}

/// Discrete stage of the gallery run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GalleryPhase {
    /// Floating left to right across the water
    MoveAcross,
    /// Dropping off the right end under gravity
    Falling { velocity: f32 },
    /// Resting on the ground before the next run
    GroundPause { timer: f32 },
}

/// Gallery mechanism: traverse, fall, pause, restart.
pub struct GalleryDriver {
    params: GalleryMotion,
    phase: GalleryPhase,
    position: Vec3,
}

impl GalleryDriver {
    pub fn new(params: GalleryMotion, water: &WaterSurface, mode: WaterMode) -> Self {
        let mut driver = Self {
            phase: GalleryPhase::MoveAcross,
            position: Vec3::ZERO,
            params,
        };
        driver.reset(water, mode);
        driver
    }

    /// Return to the start of the run from any phase.
    pub fn reset(&mut self, water: &WaterSurface, mode: WaterMode) {
        self.phase = GalleryPhase::MoveAcross;
        self.position = Vec3::new(
            self.params.path_left_x,
            water.height_at(mode, self.params.path_left_x, self.params.path_z)
                + self.params.float_offset_m,
            self.params.path_z,
        );
    }

    /// Re-slave the float height after a water-mode flip mid-traverse.
    pub fn refloat(&mut self, water: &WaterSurface, mode: WaterMode) {
        if self.phase == GalleryPhase::MoveAcross {
            self.position.y =
                water.height_at(mode, self.position.x, self.params.path_z)
                    + self.params.float_offset_m;
        }
    }

    pub fn update(&mut self, dt: f32, water: &WaterSurface, mode: WaterMode) {
        match self.phase {
            GalleryPhase::MoveAcross => {
                self.position.x += self.params.move_speed_m_per_s * dt;
                if self.position.x >= self.params.path_right_x {
                    self.position.x = self.params.path_right_x;
                    self.phase = GalleryPhase::Falling { velocity: 0.0 };
                }
                self.position.y =
                    water.height_at(mode, self.position.x, self.params.path_z)
                        + self.params.float_offset_m;
            }
            GalleryPhase::Falling { mut velocity } => {
                velocity += self.params.gravity_m_per_s2 * dt;
                self.position.y -= velocity * dt;
                if self.position.y <= self.params.ground_rest_y {
                    self.position.y = self.params.ground_rest_y;
                    self.phase = GalleryPhase::GroundPause { timer: 0.0 };
                } else {
                    self.phase = GalleryPhase::Falling { velocity };
                }
            }
            GalleryPhase::GroundPause { mut timer } => {
                timer += dt;
                if timer >= self.params.ground_pause_s {
                    self.reset(water, mode);
                } else {
                    self.phase = GalleryPhase::GroundPause { timer };
                }
            }
        }
    }

    pub fn phase(&self) -> GalleryPhase {
        self.phase
    }

    pub fn pose(&self) -> ObjectPose {
        ObjectPose {
            position: self.position,
            pitch_rad: 0.0,
        }
    }
}

/// Discrete stage of the rail circuit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CircuitPhase {
    /// Left to right along the front track
    MoveFront,
    /// Swinging down and under to the back track at the right end
    RotateDown { progress: f32 },
    /// Right to left along the back track, folded over
    MoveBack,
    /// Swinging up to the front track at the left end
    RotateUp { progress: f32 },
}

/// Rail circuit mechanism: the target rides a continuous chain loop,
/// tipping through a semicircle at each end like a paddle wheel.
pub struct CircuitDriver {
    params: CircuitMotion,
    phase: CircuitPhase,
    position: Vec3,
    pitch_rad: f32,
}

impl CircuitDriver {
    pub fn new(params: CircuitMotion) -> Self {
        let mut driver = Self {
            phase: CircuitPhase::MoveFront,
            position: Vec3::ZERO,
            pitch_rad: 0.0,
            params,
        };
        driver.reset();
        driver
    }

    /// Return to the start of the front track from any phase.
    pub fn reset(&mut self) {
        self.phase = CircuitPhase::MoveFront;
        self.position = Vec3::new(
            self.params.path_left_x,
            self.params.track_y,
            self.params.front_z,
        );
        self.pitch_rad = 0.0;
    }

    pub fn update(&mut self, dt: f32) {
        let p = &self.params;
        let radius = p.turn_radius();
        let center_z = p.track_center_z();

        match self.phase {
            CircuitPhase::MoveFront => {
                self.position.x += p.move_speed_m_per_s * dt;
                if self.position.x >= p.path_right_x {
                    self.position.x = p.path_right_x;
                    self.phase = CircuitPhase::RotateDown { progress: 0.0 };
                }
            }
            CircuitPhase::RotateDown { mut progress } => {
                progress += dt / p.turn_duration_s;
                if progress >= 1.0 {
                    progress = 1.0;
                }
                let angle = PI * progress;
                self.position = Vec3::new(
                    p.path_right_x,
                    p.track_y - radius * angle.sin(),
                    center_z + radius * angle.cos(),
                );
                self.pitch_rad = angle;
                if progress >= 1.0 {
                    self.position = Vec3::new(p.path_right_x, p.track_y, p.back_z);
                    self.phase = CircuitPhase::MoveBack;
                } else {
                    self.phase = CircuitPhase::RotateDown { progress };
                }
            }
            CircuitPhase::MoveBack => {
                self.position.x -= p.move_speed_m_per_s * dt;
                if self.position.x <= p.path_left_x {
                    self.position.x = p.path_left_x;
                    self.phase = CircuitPhase::RotateUp { progress: 0.0 };
                }
            }
            CircuitPhase::RotateUp { mut progress } => {
                progress += dt / p.turn_duration_s;
                if progress >= 1.0 {
                    progress = 1.0;
                }
                let angle = PI * progress;
                self.position = Vec3::new(
                    p.path_left_x,
                    p.track_y - radius * angle.sin(),
                    center_z - radius * angle.cos(),
                );
                self.pitch_rad = PI + angle;
                if progress >= 1.0 {
                    self.position = Vec3::new(p.path_left_x, p.track_y, p.front_z);
                    self.pitch_rad = 0.0;
                    self.phase = CircuitPhase::MoveFront;
                } else {
                    self.phase = CircuitPhase::RotateUp { progress };
                }
            }
        }
    }

    pub fn phase(&self) -> CircuitPhase {
        self.phase
    }

    pub fn pose(&self) -> ObjectPose {
        ObjectPose {
            position: self.position,
            pitch_rad: self.pitch_rad,
        }
    }
}

/// The driver selected at startup.
pub enum MotionDriver {
    Gallery(GalleryDriver),
    Circuit(CircuitDriver),
}

impl MotionDriver {
    pub fn update(&mut self, dt: f32, water: &WaterSurface, mode: WaterMode) {
        match self {
            MotionDriver::Gallery(driver) => driver.update(dt, water, mode),
            MotionDriver::Circuit(driver) => driver.update(dt),
        }
    }

    pub fn reset(&mut self, water: &WaterSurface, mode: WaterMode) {
        match self {
            MotionDriver::Gallery(driver) => driver.reset(water, mode),
            MotionDriver::Circuit(driver) => driver.reset(),
        }
    }

    /// Hook for water-mode toggles; only the gallery run floats.
    pub fn refloat(&mut self, water: &WaterSurface, mode: WaterMode) {
        if let MotionDriver::Gallery(driver) = self {
            driver.refloat(water, mode);
        }
    }

    pub fn pose(&self) -> ObjectPose {
        match self {
            MotionDriver::Gallery(driver) => driver.pose(),
            MotionDriver::Circuit(driver) => driver.pose(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{SceneLayout, WaveParameters};

    const DT: f32 = 1.0 / 60.0;

    fn water() -> WaterSurface {
        WaterSurface::new(WaveParameters::default(), &SceneLayout::default())
    }

    fn gallery(water: &WaterSurface) -> GalleryDriver {
        GalleryDriver::new(GalleryMotion::default(), water, WaterMode::Flat)
    }

    #[test]
    fn traverse_clamps_to_right_bound_and_starts_falling() {
        let water = water();
        let mut driver = gallery(&water);
        let right = GalleryMotion::default().path_right_x;

        for _ in 0..20_000 {
            driver.update(DT, &water, WaterMode::Flat);
            assert!(driver.pose().position.x <= right + f32::EPSILON);
            if let GalleryPhase::Falling { velocity } = driver.phase() {
                assert_eq!(driver.pose().position.x, right);
                assert_eq!(velocity, 0.0);
                return;
            }
        }
        panic!("never reached the right bound");
    }

    #[test]
    fn fall_matches_analytic_drop() {
        let water = water();
        let params = GalleryMotion::default();
        let mut driver = gallery(&water);

        // run to the start of the fall
        while driver.phase() == GalleryPhase::MoveAcross {
            driver.update(DT, &water, WaterMode::Flat);
        }
        let y0 = driver.pose().position.y;

        let steps = 12;
        for _ in 0..steps {
            driver.update(DT, &water, WaterMode::Flat);
        }
        assert!(matches!(driver.phase(), GalleryPhase::Falling { .. }));

        let tau = steps as f32 * DT;
        let analytic = 0.5 * params.gravity_m_per_s2 * tau * tau;
        let dropped = y0 - driver.pose().position.y;
        // explicit-Euler integration overshoots the analytic integral by
        // at most g*tau*dt
        let tolerance = params.gravity_m_per_s2 * tau * DT;
        assert!(
            (dropped - analytic).abs() <= tolerance,
            "dropped {dropped}, analytic {analytic}"
        );
    }

    #[test]
    fn fall_clamps_to_ground_and_pauses() {
        let water = water();
        let params = GalleryMotion::default();
        let mut driver = gallery(&water);

        for _ in 0..20_000 {
            driver.update(DT, &water, WaterMode::Flat);
            if matches!(driver.phase(), GalleryPhase::GroundPause { .. }) {
                assert_eq!(driver.pose().position.y, params.ground_rest_y);
                return;
            }
            assert!(driver.pose().position.y >= params.ground_rest_y);
        }
        panic!("never landed");
    }

    #[test]
    fn ground_pause_restarts_the_run() {
        let water = water();
        let params = GalleryMotion::default();
        let mut driver = gallery(&water);

        let mut saw_pause = false;
        for _ in 0..40_000 {
            driver.update(DT, &water, WaterMode::Flat);
            match driver.phase() {
                GalleryPhase::GroundPause { .. } => saw_pause = true,
                GalleryPhase::MoveAcross if saw_pause => {
                    assert_eq!(driver.pose().position.x, params.path_left_x);
                    return;
                }
                _ => {}
            }
        }
        panic!("never cycled back to the start");
    }

    #[test]
    fn reset_mid_fall_restores_initial_state() {
        let water = water();
        let params = GalleryMotion::default();
        let mut driver = gallery(&water);
        let initial = driver.pose().position;

        // get into the fall with nonzero velocity
        while driver.phase() == GalleryPhase::MoveAcross {
            driver.update(DT, &water, WaterMode::Flat);
        }
        for _ in 0..5 {
            driver.update(DT, &water, WaterMode::Flat);
        }
        assert!(matches!(
            driver.phase(),
            GalleryPhase::Falling { velocity } if velocity > 0.0
        ));

        driver.reset(&water, WaterMode::Flat);
        assert_eq!(driver.phase(), GalleryPhase::MoveAcross);
        assert_eq!(driver.pose().position, initial);
        assert_eq!(driver.pose().position.x, params.path_left_x);
    }

    #[test]
    fn refloat_tracks_mode_change_mid_traverse() {
        let mut water = water();
        water.advance(0.9);
        let mut driver = GalleryDriver::new(GalleryMotion::default(), &water, WaterMode::Wavy);
        let params = GalleryMotion::default();

        for _ in 0..30 {
            driver.update(DT, &water, WaterMode::Wavy);
        }

        driver.refloat(&water, WaterMode::Flat);
        assert_eq!(
            driver.pose().position.y,
            water.rest_height() + params.float_offset_m
        );
    }

    #[test]
    fn circuit_turns_clamp_to_track_endpoints() {
        let params = CircuitMotion::default();
        let mut driver = CircuitDriver::new(params.clone());

        for _ in 0..60_000 {
            driver.update(DT);
            let pos = driver.pose().position;
            assert!(pos.x >= params.path_left_x - f32::EPSILON);
            assert!(pos.x <= params.path_right_x + f32::EPSILON);
            if driver.phase() == CircuitPhase::MoveBack {
                assert_eq!(pos.y, params.track_y);
                assert_eq!(pos.z, params.back_z);
                return;
            }
        }
        panic!("never reached the back track");
    }

    #[test]
    fn circuit_cycle_returns_to_front_start() {
        let params = CircuitMotion::default();
        let mut driver = CircuitDriver::new(params.clone());

        let mut saw_back = false;
        for _ in 0..120_000 {
            driver.update(DT);
            match driver.phase() {
                CircuitPhase::MoveBack => saw_back = true,
                CircuitPhase::MoveFront if saw_back => {
                    let pose = driver.pose();
                    assert_eq!(pose.position.z, params.front_z);
                    assert_eq!(pose.position.y, params.track_y);
                    assert_eq!(pose.pitch_rad, 0.0);
                    return;
                }
                _ => {}
            }
        }
        panic!("never completed a lap");
    }

    #[test]
    fn circuit_turn_dips_below_track_height() {
        let params = CircuitMotion::default();
        let mut driver = CircuitDriver::new(params.clone());

        let mut min_y = params.track_y;
        for _ in 0..60_000 {
            driver.update(DT);
            min_y = min_y.min(driver.pose().position.y);
            if driver.phase() == CircuitPhase::MoveBack {
                break;
            }
        }
        let expected = params.track_y - params.turn_radius();
        assert!((min_y - expected).abs() < 0.05);
    }
}
