//! Orbit camera with damped zoom and snap presets.
//!
//! Azimuth and elevation come straight from pointer drags; zoom writes a
//! target radius and the current radius eases toward it each frame.

use glam::{Mat4, Vec3};

use crate::params::{CameraPreset, OrbitConfig, RenderConfig};

pub struct OrbitCamera {
    config: OrbitConfig,
    azimuth_deg: f32,
    elevation_deg: f32,
    radius_m: f32,
    target_radius_m: f32,
}

impl OrbitCamera {
    pub fn new(config: OrbitConfig, preset: CameraPreset) -> Self {
        let mut camera = Self {
            config,
            azimuth_deg: 0.0,
            elevation_deg: 0.0,
            radius_m: 0.0,
            target_radius_m: 0.0,
        };
        camera.apply_preset(preset);
        camera
    }

    /// Snap to a named viewpoint. Current radius snaps too; only drag
    /// zoom goes through the smoothing.
    pub fn apply_preset(&mut self, preset: CameraPreset) {
        let pose = preset.pose();
        self.azimuth_deg = pose.azimuth_deg;
        self.elevation_deg = pose.elevation_deg;
        self.radius_m = pose.radius_m;
        self.target_radius_m = pose.radius_m;
    }

    /// Left-drag: orbit. Deltas in pixels.
    pub fn drag_orbit(&mut self, dx_px: f32, dy_px: f32) {
        let c = &self.config;
        self.azimuth_deg = (self.azimuth_deg + dx_px * c.orbit_sensitivity)
            .clamp(-c.max_azimuth_deg, c.max_azimuth_deg);
        self.elevation_deg = (self.elevation_deg - dy_px * c.elevation_sensitivity)
            .clamp(c.min_elevation_deg, c.max_elevation_deg);
    }

    /// Right-drag: zoom. Writes the target radius only.
    pub fn drag_zoom(&mut self, dy_px: f32) {
        let c = &self.config;
        self.target_radius_m =
            (self.target_radius_m + dy_px * c.zoom_sensitivity).clamp(c.min_radius_m, c.max_radius_m);
    }

    /// Ease the current radius toward its target.
    pub fn update(&mut self, dt: f32) {
        let blend = (dt * self.config.smoothing_rate_per_s).min(1.0);
        self.radius_m += (self.target_radius_m - self.radius_m) * blend;
    }

    pub fn radius(&self) -> f32 {
        self.radius_m
    }

    pub fn target_radius(&self) -> f32 {
        self.target_radius_m
    }

    pub fn azimuth_deg(&self) -> f32 {
        self.azimuth_deg
    }

    pub fn elevation_deg(&self) -> f32 {
        self.elevation_deg
    }

    /// Eye position from the spherical orbit coordinates.
    pub fn eye(&self) -> Vec3 {
        let azimuth = self.azimuth_deg.to_radians();
        let elevation = self.elevation_deg.to_radians();
        let cos_el = elevation.cos();
        Vec3::new(
            self.radius_m * azimuth.sin() * cos_el,
            self.radius_m * elevation.sin(),
            self.radius_m * azimuth.cos() * cos_el,
        )
    }

    pub fn look_at(&self) -> Vec3 {
        Vec3::from_array(self.config.look_at)
    }

    /// Create view-projection matrix for rendering
    ///
    /// # Returns
    /// Tuple of (view_proj_matrix, eye_position)
    pub fn create_view_proj_matrix(&self, render_config: &RenderConfig) -> (Mat4, Vec3) {
        let eye = self.eye();

        let view = Mat4::look_at_rh(eye, self.look_at(), Vec3::Y);
        let proj = Mat4::perspective_rh(
            render_config.fov_degrees.to_radians(),
            render_config.aspect_ratio(),
            render_config.near_plane_m,
            render_config.far_plane_m,
        );

        (proj * view, eye)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn camera() -> OrbitCamera {
        OrbitCamera::new(OrbitConfig::default(), CameraPreset::Front)
    }

    #[test]
    fn preset_snaps_both_radii() {
        let mut cam = camera();
        cam.apply_preset(CameraPreset::Perspective);
        let pose = CameraPreset::Perspective.pose();
        assert_eq!(cam.azimuth_deg(), pose.azimuth_deg);
        assert_eq!(cam.elevation_deg(), pose.elevation_deg);
        assert_eq!(cam.radius(), pose.radius_m);
        assert_eq!(cam.target_radius(), pose.radius_m);
    }

    #[test]
    fn zoom_smoothing_is_monotone_and_never_overshoots() {
        let mut cam = camera();
        let start = cam.radius();
        cam.drag_zoom(40.0); // target jumps out by 8 m
        let target = cam.target_radius();
        assert!(target > start);

        let mut previous = cam.radius();
        for _ in 0..600 {
            cam.update(DT);
            let r = cam.radius();
            assert!(r >= previous - f32::EPSILON, "radius reversed direction");
            assert!(r <= target + 1e-4, "radius overshot its target");
            previous = r;
        }
        assert!((cam.radius() - target).abs() < 1e-3, "did not converge");
    }

    #[test]
    fn zoom_target_respects_radius_limits() {
        let config = OrbitConfig::default();
        let mut cam = camera();
        cam.drag_zoom(10_000.0);
        assert_eq!(cam.target_radius(), config.max_radius_m);
        cam.drag_zoom(-100_000.0);
        assert_eq!(cam.target_radius(), config.min_radius_m);
    }

    #[test]
    fn orbit_respects_angle_limits() {
        let config = OrbitConfig::default();
        let mut cam = camera();

        cam.drag_orbit(100_000.0, 0.0);
        assert_eq!(cam.azimuth_deg(), config.max_azimuth_deg);
        cam.drag_orbit(-1_000_000.0, 0.0);
        assert_eq!(cam.azimuth_deg(), -config.max_azimuth_deg);

        cam.drag_orbit(0.0, -100_000.0);
        assert_eq!(cam.elevation_deg(), config.max_elevation_deg);
        cam.drag_orbit(0.0, 1_000_000.0);
        assert_eq!(cam.elevation_deg(), config.min_elevation_deg);
    }

    #[test]
    fn eye_sits_at_the_orbit_radius() {
        let cam = camera();
        assert!((cam.eye().length() - cam.radius()).abs() < 1e-4);
    }

    #[test]
    fn view_proj_matrix_is_finite_and_nontrivial() {
        let cam = camera();
        let (view_proj, eye) = cam.create_view_proj_matrix(&RenderConfig::default());

        assert_ne!(view_proj, Mat4::IDENTITY);
        assert_ne!(view_proj, Mat4::ZERO);
        assert!(eye.x.is_finite());
        assert!(eye.y.is_finite());
        assert!(eye.z.is_finite());
    }
}
