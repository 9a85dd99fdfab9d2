//! Animated water surface: analytic height field, normals and mesh.
//!
//! The surface is a weighted blend of two traveling sine waves over the
//! tank rectangle. Height and normal are pure functions of (x, z), the
//! accumulated phase and the mode flag, so buoyancy queries and the
//! rendered mesh always agree within a frame.

use glam::Vec3;

use crate::mesh::{MeshBuffer, Vertex};
use crate::params::{SceneLayout, WaveParameters};

/// Water surface shape selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaterMode {
    /// Two-sine traveling waves
    Wavy,
    /// Still surface at the resting elevation
    Flat,
}

impl WaterMode {
    pub fn toggled(self) -> Self {
        match self {
            WaterMode::Wavy => WaterMode::Flat,
            WaterMode::Flat => WaterMode::Wavy,
        }
    }
}

/// The water height field over the tank rectangle.
pub struct WaterSurface {
    params: WaveParameters,
    left_x: f32,
    right_x: f32,
    back_z: f32,
    front_z: f32,
    surface_y: f32,
    /// Accumulated wave phase (radians), wrapped at the combined period
    phase: f32,
}

impl WaterSurface {
    pub fn new(params: WaveParameters, layout: &SceneLayout) -> Self {
        Self {
            left_x: layout.water_left_x(),
            right_x: layout.water_right_x(),
            back_z: layout.water_back_z(),
            front_z: layout.water_front_z(),
            surface_y: layout.water_surface_y,
            phase: 0.0,
            params,
        }
    }

    /// Advance the wave phase by elapsed real time.
    ///
    /// The wrap point is a whole number of cycles for both waves, so
    /// wrapping never moves the surface.
    pub fn advance(&mut self, dt: f32) {
        self.phase += dt * self.params.phase_speed_rad_per_s;
        if self.phase >= self.params.phase_period_rad {
            self.phase %= self.params.phase_period_rad;
        }
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn params(&self) -> &WaveParameters {
        &self.params
    }

    /// Resting surface elevation (meters).
    pub fn rest_height(&self) -> f32 {
        self.surface_y
    }

    /// Surface elevation at (x, z) for the given mode.
    pub fn height_at(&self, mode: WaterMode, x: f32, z: f32) -> f32 {
        let mut height = self.surface_y;
        if mode == WaterMode::Wavy {
            let p = &self.params;
            let nx = (x - self.left_x) / (self.right_x - self.left_x);
            let nz = (z - self.back_z) / (self.front_z - self.back_z);

            let primary = (p.primary_frequency_rad * nx + self.phase).sin();
            let secondary =
                (p.secondary_frequency_rad * nz + self.phase * p.secondary_phase_factor).sin();

            height += p.amplitude_m * (p.primary_weight * primary + p.secondary_weight * secondary);
        }
        height
    }

    /// Unit surface normal at (x, z), estimated by central differencing.
    ///
    /// Falls back to +Y if the cross product degenerates.
    pub fn normal_at(&self, mode: WaterMode, x: f32, z: f32) -> Vec3 {
        if mode == WaterMode::Flat {
            return Vec3::Y;
        }

        let eps = self.params.normal_epsilon_m;
        let h_left = self.height_at(mode, x - eps, z);
        let h_right = self.height_at(mode, x + eps, z);
        let h_back = self.height_at(mode, x, z - eps);
        let h_front = self.height_at(mode, x, z + eps);

        let tangent_x = Vec3::new(2.0 * eps, h_right - h_left, 0.0);
        let tangent_z = Vec3::new(0.0, h_front - h_back, 2.0 * eps);

        tangent_z.cross(tangent_x).try_normalize().unwrap_or(Vec3::Y)
    }
}

/// Color of the animated surface sheet.
const SURFACE_COLOR: [f32; 3] = [0.2, 0.45, 0.8];

/// Renderable mesh over the water rectangle, resampled every frame.
pub struct WaterGrid {
    pub mesh: MeshBuffer,
}

impl WaterGrid {
    /// Build the grid topology; `update` fills in heights and normals.
    pub fn new(surface: &WaterSurface) -> Self {
        let cols = surface.params.surface_segments_x;
        let rows = surface.params.surface_segments_z;

        let mut mesh = MeshBuffer::new();
        for row in 0..=rows {
            let z = surface.back_z
                + (surface.front_z - surface.back_z) * row as f32 / rows as f32;
            for col in 0..=cols {
                let x = surface.left_x
                    + (surface.right_x - surface.left_x) * col as f32 / cols as f32;
                mesh.vertices.push(Vertex {
                    position: [x, surface.surface_y, z],
                    normal: [0.0, 1.0, 0.0],
                    color: SURFACE_COLOR,
                });
            }
        }

        let stride = (cols + 1) as u32;
        for row in 0..rows as u32 {
            for col in 0..cols as u32 {
                let top_left = row * stride + col;
                let bottom_left = top_left + stride;
                mesh.indices.extend_from_slice(&[
                    top_left,
                    bottom_left,
                    top_left + 1,
                    top_left + 1,
                    bottom_left,
                    bottom_left + 1,
                ]);
            }
        }

        Self { mesh }
    }

    /// Resample heights and normals from the field for the current frame.
    pub fn update(&mut self, surface: &WaterSurface, mode: WaterMode) {
        for vertex in &mut self.mesh.vertices {
            let [x, _, z] = vertex.position;
            vertex.position[1] = surface.height_at(mode, x, z);
            vertex.normal = surface.normal_at(mode, x, z).to_array();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SceneLayout;

    fn surface() -> WaterSurface {
        WaterSurface::new(WaveParameters::default(), &SceneLayout::default())
    }

    #[test]
    fn flat_mode_is_constant_with_up_normal() {
        let mut water = surface();
        for _ in 0..10 {
            water.advance(0.37);
            for (x, z) in [(-6.0, 0.0), (0.0, 1.5), (5.5, 3.0)] {
                assert_eq!(water.height_at(WaterMode::Flat, x, z), water.rest_height());
                assert_eq!(water.normal_at(WaterMode::Flat, x, z), Vec3::Y);
            }
        }
    }

    #[test]
    fn wavy_height_stays_within_amplitude_bounds() {
        let mut water = surface();
        let amplitude = water.params().amplitude_m;
        let base = water.rest_height();

        for _ in 0..200 {
            water.advance(0.05);
            for xi in 0..=20 {
                for zi in 0..=10 {
                    let x = -7.0 + 14.0 * xi as f32 / 20.0;
                    let z = -0.5 + 4.0 * zi as f32 / 10.0;
                    let h = water.height_at(WaterMode::Wavy, x, z);
                    assert!(h >= base - amplitude - 1e-5);
                    assert!(h <= base + amplitude + 1e-5);
                }
            }
        }
    }

    #[test]
    fn heights_repeat_after_one_full_period() {
        let mut water = surface();
        water.advance(0.83); // arbitrary offset into the cycle

        let samples: Vec<(f32, f32)> = vec![(-6.4, 1.5), (-1.3, 0.2), (0.0, 1.5), (4.2, 2.9)];
        let before: Vec<f32> = samples
            .iter()
            .map(|&(x, z)| water.height_at(WaterMode::Wavy, x, z))
            .collect();

        let period_s = water.params().phase_period_rad / water.params().phase_speed_rad_per_s;
        // advance in several steps so the wrap path is exercised
        for _ in 0..4 {
            water.advance(period_s / 4.0);
        }

        for (&(x, z), &h0) in samples.iter().zip(&before) {
            let h1 = water.height_at(WaterMode::Wavy, x, z);
            assert!((h1 - h0).abs() < 1e-3, "height drifted across wrap: {h0} vs {h1}");
        }
    }

    #[test]
    fn wavy_normal_is_unit_length_and_upward() {
        let mut water = surface();
        water.advance(1.0);
        for xi in 0..10 {
            let x = -6.0 + 12.0 * xi as f32 / 10.0;
            let n = water.normal_at(WaterMode::Wavy, x, 1.5);
            assert!((n.length() - 1.0).abs() < 1e-5);
            assert!(n.y > 0.0);
        }
    }

    #[test]
    fn degenerate_differencing_falls_back_to_up() {
        let params = WaveParameters {
            normal_epsilon_m: 0.0,
            ..WaveParameters::default()
        };
        let water = WaterSurface::new(params, &SceneLayout::default());
        assert_eq!(water.normal_at(WaterMode::Wavy, 0.0, 1.5), Vec3::Y);
    }

    #[test]
    fn grid_counts_match_segments() {
        let water = surface();
        let grid = WaterGrid::new(&water);
        let (cols, rows) = (
            water.params().surface_segments_x,
            water.params().surface_segments_z,
        );
        assert_eq!(grid.mesh.vertices.len(), (cols + 1) * (rows + 1));
        assert_eq!(grid.mesh.indices.len(), cols * rows * 6);
    }

    #[test]
    fn grid_update_tracks_the_field() {
        let mut water = surface();
        water.advance(2.0);
        let mut grid = WaterGrid::new(&water);
        grid.update(&water, WaterMode::Wavy);

        for vertex in &grid.mesh.vertices {
            let [x, y, z] = vertex.position;
            assert!((y - water.height_at(WaterMode::Wavy, x, z)).abs() < 1e-6);
        }
    }
}
