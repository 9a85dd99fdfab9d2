//! Scene flags and the simulation root that owns all per-frame state.

use crate::camera::OrbitCamera;
use crate::motion::{CircuitDriver, GalleryDriver, MotionDriver, ObjectPose};
use crate::params::{
    CameraPreset, CircuitMotion, GalleryMotion, MotionVariant, OrbitConfig, SceneLayout,
    WaveParameters,
};
use crate::water::{WaterMode, WaterSurface};

/// Which actor rides the mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectMode {
    /// The duck with a target on its chest
    Duck,
    /// The bare ringed target
    TargetOnly,
}

impl ObjectMode {
    pub fn toggled(self) -> Self {
        match self {
            ObjectMode::Duck => ObjectMode::TargetOnly,
            ObjectMode::TargetOnly => ObjectMode::Duck,
        }
    }
}

/// Discrete scene flags, mutated only by input events.
#[derive(Debug, Clone, Copy)]
pub struct SceneState {
    pub water: WaterMode,
    pub object: ObjectMode,
    pub camera_preset: CameraPreset,
}

impl Default for SceneState {
    fn default() -> Self {
        Self {
            water: WaterMode::Wavy,
            object: ObjectMode::Duck,
            camera_preset: CameraPreset::Front,
        }
    }
}

/// The single owner of all mutable simulation state.
///
/// One writer context (the event loop) calls `tick` exactly once per
/// frame; the draw that follows only reads.
pub struct SimulationState {
    pub scene: SceneState,
    pub layout: SceneLayout,
    pub water: WaterSurface,
    pub driver: MotionDriver,
    pub camera: OrbitCamera,
}

impl SimulationState {
    pub fn new(variant: MotionVariant, scene: SceneState) -> Self {
        let layout = SceneLayout::default();
        let water = WaterSurface::new(WaveParameters::default(), &layout);

        let driver = match variant {
            MotionVariant::Gallery => MotionDriver::Gallery(GalleryDriver::new(
                GalleryMotion::default(),
                &water,
                scene.water,
            )),
            MotionVariant::Circuit => {
                MotionDriver::Circuit(CircuitDriver::new(CircuitMotion::default()))
            }
        };

        let camera = OrbitCamera::new(OrbitConfig::default(), scene.camera_preset);

        Self {
            scene,
            layout,
            water,
            driver,
            camera,
        }
    }

    /// Advance one frame: wave phase, camera easing, then the object.
    pub fn tick(&mut self, dt: f32) {
        self.water.advance(dt);
        self.camera.update(dt);
        self.driver.update(dt, &self.water, self.scene.water);
    }

    /// Toggle the water between wavy and flat, keeping a floating object
    /// on the new surface.
    pub fn toggle_water(&mut self) {
        self.scene.water = self.scene.water.toggled();
        self.driver.refloat(&self.water, self.scene.water);
    }

    pub fn toggle_object(&mut self) {
        self.scene.object = self.scene.object.toggled();
    }

    /// Cycle to the next camera viewpoint and snap to it.
    pub fn cycle_camera(&mut self) {
        self.scene.camera_preset = self.scene.camera_preset.next();
        self.camera.apply_preset(self.scene.camera_preset);
    }

    /// One-shot reset back to the start of the run.
    pub fn reset_object(&mut self) {
        self.driver.reset(&self.water, self.scene.water);
    }

    pub fn object_pose(&self) -> ObjectPose {
        self.driver.pose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::GalleryPhase;

    const DT: f32 = 1.0 / 60.0;

    fn sim() -> SimulationState {
        SimulationState::new(MotionVariant::Gallery, SceneState::default())
    }

    #[test]
    fn sixty_hz_run_lands_on_the_analytic_path() {
        let params = GalleryMotion::default();

        for seconds in [1.0_f32, 2.5] {
            let mut sim = sim();
            assert!(matches!(
                match &sim.driver {
                    MotionDriver::Gallery(driver) => driver.phase(),
                    MotionDriver::Circuit(_) => unreachable!(),
                },
                GalleryPhase::MoveAcross
            ));

            let ticks = (seconds / DT).round() as usize;
            for _ in 0..ticks {
                sim.tick(DT);
            }

            let expected_x = (params.path_left_x + params.move_speed_m_per_s * seconds)
                .min(params.path_right_x);
            let pose = sim.object_pose();
            assert!(
                (pose.position.x - expected_x).abs() < 1e-3,
                "x = {}, expected {}",
                pose.position.x,
                expected_x
            );

            let expected_y = sim
                .water
                .height_at(WaterMode::Wavy, pose.position.x, params.path_z)
                + params.float_offset_m;
            assert!((pose.position.y - expected_y).abs() < 1e-4);

            let expected_phase = seconds * sim.water.params().phase_speed_rad_per_s;
            assert!((sim.water.phase() - expected_phase).abs() < 1e-3);
        }
    }

    #[test]
    fn water_toggle_reseats_a_floating_object() {
        let mut sim = sim();
        let params = GalleryMotion::default();
        for _ in 0..30 {
            sim.tick(DT);
        }

        sim.toggle_water();
        assert_eq!(sim.scene.water, WaterMode::Flat);
        assert_eq!(
            sim.object_pose().position.y,
            sim.water.rest_height() + params.float_offset_m
        );

        sim.toggle_water();
        assert_eq!(sim.scene.water, WaterMode::Wavy);
    }

    #[test]
    fn camera_cycle_snaps_to_the_next_preset() {
        let mut sim = sim();
        sim.cycle_camera();
        assert_eq!(sim.scene.camera_preset, CameraPreset::Perspective);
        let pose = CameraPreset::Perspective.pose();
        assert_eq!(sim.camera.radius(), pose.radius_m);

        sim.cycle_camera();
        assert_eq!(sim.scene.camera_preset, CameraPreset::Front);
    }

    #[test]
    fn reset_returns_the_object_to_the_left_bound() {
        let mut sim = sim();
        let params = GalleryMotion::default();
        for _ in 0..200 {
            sim.tick(DT);
        }
        sim.reset_object();
        assert_eq!(sim.object_pose().position.x, params.path_left_x);
    }

    #[test]
    fn zero_dt_tick_moves_nothing() {
        // the event loop clamps dt to >= 0; a zero tick must not move anything
        let mut sim = sim();
        let before = sim.object_pose().position;
        sim.tick(0.0);
        let after = sim.object_pose().position;
        assert_eq!(before.x, after.x);
        assert_eq!(before.z, after.z);
    }
}
