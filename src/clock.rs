//! Wall-clock-driven animation values.

use std::time::Instant;

use crate::math::deg_to_rad;

/// Per-frame animation outputs derived from seconds since program start.
#[derive(Clone, Copy, Debug)]
pub struct AnimationFrame {
    /// Y-axis model rotation in radians (25 degrees per second).
    pub model_rotation_y: f32,
    /// Wrapped angle in [0, 2pi), in millisecond steps.
    pub current_angle: f32,
    /// Oscillating wind direction in radians around the configured base.
    pub wind_dir: f32,
    /// Oscillating wind speed scalar.
    pub wind_speed: f32,
}

/// Samples animation values from elapsed wall time.
pub struct AnimationClock {
    start: Instant,
    base_dir: f32,
}

impl AnimationClock {
    pub fn new(base_dir: f32) -> Self {
        Self {
            start: Instant::now(),
            base_dir,
        }
    }

    /// Samples at the current wall time.
    pub fn sample(&self) -> AnimationFrame {
        self.sample_at(self.start.elapsed().as_secs_f32())
    }

    /// Samples at an explicit time in seconds since start.
    pub fn sample_at(&self, time: f32) -> AnimationFrame {
        AnimationFrame {
            model_rotation_y: deg_to_rad(time * 25.0),
            current_angle: ((time * 1000.0) as i64 % 6283) as f32 / 1000.0,
            wind_dir: (time * 3.81 + 0.2).sin() * 0.1 + self.base_dir,
            wind_speed: (time / 27.2).cos() * 20.0 + 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn values_at_start() {
        let clock = AnimationClock::new(0.0);
        let frame = clock.sample_at(0.0);
        assert_eq!(frame.model_rotation_y, 0.0);
        assert_eq!(frame.current_angle, 0.0);
        assert!((frame.wind_dir - 0.2f32.sin() * 0.1).abs() < EPS);
        assert!((frame.wind_speed - 30.0).abs() < EPS);
    }

    #[test]
    fn values_after_one_second() {
        let clock = AnimationClock::new(0.0);
        let frame = clock.sample_at(1.0);
        assert!((frame.current_angle - 1.0).abs() < EPS);
        assert!((frame.model_rotation_y - deg_to_rad(25.0)).abs() < EPS);
    }

    #[test]
    fn current_angle_wraps_past_two_pi() {
        let clock = AnimationClock::new(0.0);
        let frame = clock.sample_at(6.284);
        assert!(frame.current_angle < 2e-3);
        // Always within [0, 2pi).
        for t in [0.5, 10.0, 100.0, 12345.6] {
            let angle = clock.sample_at(t).current_angle;
            assert!((0.0..6.283).contains(&angle));
        }
    }

    #[test]
    fn base_direction_offsets_wind() {
        let clock = AnimationClock::new(std::f32::consts::FRAC_PI_2);
        let frame = clock.sample_at(0.0);
        // sin(0.2)*0.1 + pi/2
        assert!((frame.wind_dir - 1.5906).abs() < 1e-3);
    }
}
