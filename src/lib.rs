//! Archimedes π - polygons converging to a circle, a circle revolving into a sphere
//!
//! Core modules:
//! - `geometry`: Pure builders (polygon, reference circle, revolution rings, grid, gradients)
//! - `sim`: Simulation state and the per-frame phase state machine
//! - `scene`: Geometry owned by the driver, plus the camera rig
//! - `driver`: Applies ticks to the state and regenerates the scene
//! - `renderer`: WebGPU line rendering
//! - `ui`: HUD model and keyboard mapping
//! - `settings`: Viewer preferences read at startup

pub mod driver;
pub mod geometry;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;
pub mod ui;

pub use driver::Driver;
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Animation configuration constants
pub mod consts {
    use glam::Vec3;

    /// Polygon side count bounds
    pub const MIN_SIDES: u32 = 3;
    pub const MAX_SIDES: u32 = 256;
    /// Side count after start-up and reset (a square)
    pub const INITIAL_SIDES: f32 = 4.0;

    /// Shared polygon/circle radius
    pub const DEFAULT_RADIUS: f32 = 1.2;
    pub const MIN_RADIUS: f32 = 0.5;
    pub const MAX_RADIUS: f32 = 2.5;

    /// Auto-play speed multiplier
    pub const DEFAULT_SPEED: f32 = 0.5;
    pub const MIN_SPEED: f32 = 0.1;
    pub const MAX_SPEED: f32 = 3.0;

    /// Number of full rings in a complete revolution
    pub const MAX_REVOLUTION_STEPS: u32 = 45;
    /// Progress right after entering the revolution phase (first ring visible at once)
    pub const REVOLUTION_SEED_PROGRESS: f32 = 0.5;
    /// Manual up/down step for revolution progress
    pub const REVOLUTION_STEP: f32 = 0.5;

    /// Auto-play rate factors (per second, before the speed multiplier)
    pub const SIDES_RATE: f32 = 4.0;
    pub const REVOLUTION_RATE: f32 = 6.0;
    /// Below this side count growth is a flat step
    pub const EARLY_GROWTH_LIMIT: u32 = 30;
    pub const EARLY_GROWTH_STEP: u32 = 3;

    /// Longest frame delta fed into the simulation (backgrounded tabs)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Tessellation
    pub const CIRCLE_SEGMENTS: u32 = 128;
    pub const RING_SEGMENTS: u32 = 64;
    pub const MERIDIAN_COUNT: u32 = 12;

    /// Cosmetic animation rates
    pub const BREATHING_RATE: f32 = 2.0;
    pub const BREATHING_AMPLITUDE: f32 = 0.008;
    pub const COLOR_CYCLE_RATE: f32 = 0.15;
    pub const REVOLUTION_SPIN_RATE: f32 = 0.15;
    pub const REVOLUTION_COLOR_RATE: f32 = 0.2;

    /// Camera framing per phase
    pub const CAMERA_POLYGON: Vec3 = Vec3::new(0.0, 0.0, 6.0);
    pub const CAMERA_REVOLUTION: Vec3 = Vec3::new(4.0, 2.0, 4.0);
    pub const CAMERA_FINAL: Vec3 = Vec3::new(3.0, 1.5, 3.0);
    /// Fraction of the remaining distance covered per second
    pub const CAMERA_EASE_RATE: f32 = 2.0;
    /// Orbit speed once the animation completes
    pub const AUTO_ROTATE_SPEED: f32 = 0.5;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Ease-out quadratic: fast start, slow finish
#[inline]
pub fn ease_out_quad(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_polar_to_cartesian_up() {
        let p = polar_to_cartesian(2.0, FRAC_PI_2);
        assert!(p.x.abs() < 1e-6);
        assert!((p.y - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_ease_out_quad_endpoints() {
        assert_eq!(ease_out_quad(0.0), 0.0);
        assert_eq!(ease_out_quad(1.0), 1.0);
        // Fast start: halfway in time is three quarters of the way there
        assert!((ease_out_quad(0.5) - 0.75).abs() < 1e-6);
    }
}
