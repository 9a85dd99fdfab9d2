//! Water surface wave parameters.

use std::f32::consts::PI;

/// Traveling-wave parameters for the animated water surface.
///
/// The surface blends two sine waves: a primary wave running across the
/// tank (X) and a secondary wave running front-to-back (Z) at a slower
/// phase rate, weighted so the summed excursion never exceeds the
/// amplitude.
#[derive(Debug, Clone)]
pub struct WaveParameters {
    /// Peak wave excursion around the resting surface (meters)
    pub amplitude_m: f32,

    /// Phase advance rate (radians per second)
    pub phase_speed_rad_per_s: f32,

    /// Primary spatial frequency across the normalized tank width (radians)
    pub primary_frequency_rad: f32,

    /// Secondary spatial frequency across the normalized tank depth (radians)
    pub secondary_frequency_rad: f32,

    /// Primary wave weight; weights sum to 1
    pub primary_weight: f32,

    /// Secondary wave weight; weights sum to 1
    pub secondary_weight: f32,

    /// Secondary phase rate as a fraction of the primary phase
    pub secondary_phase_factor: f32,

    /// Phase value at which the accumulator wraps (radians).
    /// Must be a whole number of cycles for *both* waves: at 0.6x the
    /// primary rate, the two realign every 10 pi of primary phase.
    pub phase_period_rad: f32,

    /// Central-differencing step for normal estimation (meters)
    pub normal_epsilon_m: f32,

    /// Surface mesh columns (across the tank, X)
    pub surface_segments_x: usize,

    /// Surface mesh rows (front-to-back, Z)
    pub surface_segments_z: usize,
}

impl Default for WaveParameters {
    fn default() -> Self {
        Self {
            amplitude_m: 0.65,
            phase_speed_rad_per_s: 1.3,
            primary_frequency_rad: 2.0 * PI,
            secondary_frequency_rad: 1.1 * PI,
            primary_weight: 0.7,
            secondary_weight: 0.3,
            secondary_phase_factor: 0.6,
            phase_period_rad: 10.0 * PI,
            normal_epsilon_m: 0.1,
            surface_segments_x: 48,
            surface_segments_z: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_point_is_whole_cycles_for_both_waves() {
        let p = WaveParameters::default();
        let two_pi = 2.0 * PI;

        let primary_cycles = p.phase_period_rad / two_pi;
        let secondary_cycles = p.phase_period_rad * p.secondary_phase_factor / two_pi;

        assert!((primary_cycles - primary_cycles.round()).abs() < 1e-5);
        assert!((secondary_cycles - secondary_cycles.round()).abs() < 1e-5);
    }

    #[test]
    fn weights_sum_to_one() {
        let p = WaveParameters::default();
        assert!((p.primary_weight + p.secondary_weight - 1.0).abs() < 1e-6);
    }
}
