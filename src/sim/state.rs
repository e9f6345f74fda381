//! Simulation state for one animation session
//!
//! Every mutation goes through the setters below, which clamp to the valid
//! ranges. The π approximation is derived and refreshed whenever the side
//! count or radius changes.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::geometry::approximate_pi;

/// Top-level stage of the demonstration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Archimedes' polygons converging to the circle
    #[default]
    Polygon,
    /// The circle sweeping around the Y axis into a sphere
    Revolution,
    /// Sweep finished, final message shown
    Complete,
}

impl Phase {
    /// 1-based number shown in the HUD
    pub fn number(&self) -> u8 {
        match self {
            Phase::Polygon => 1,
            Phase::Revolution | Phase::Complete => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationState {
    phase: Phase,
    /// Continuous during auto-play; rounded when geometry is built
    sides: f32,
    radius: f32,
    pi_approximation: f64,
    auto_play: bool,
    speed: f32,
    revolution_progress: f32,
    max_revolution_steps: u32,
    show_axis: bool,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Polygon,
            sides: INITIAL_SIDES,
            radius: DEFAULT_RADIUS,
            pi_approximation: approximate_pi(INITIAL_SIDES as u32, DEFAULT_RADIUS),
            auto_play: false,
            speed: DEFAULT_SPEED,
            revolution_progress: 0.0,
            max_revolution_steps: MAX_REVOLUTION_STEPS,
            show_axis: false,
        }
    }

    /// Start a session with user-chosen radius, speed and axis visibility
    pub fn with_preferences(radius: f32, speed: f32, show_axis: bool) -> Self {
        let mut state = Self::new();
        state.set_radius(radius);
        state.set_speed(speed);
        state.set_show_axis(show_axis);
        state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn sides(&self) -> f32 {
        self.sides
    }

    /// Side count as consumed by the geometry builders
    pub fn rounded_sides(&self) -> u32 {
        (self.sides.round() as u32).clamp(MIN_SIDES, MAX_SIDES)
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn pi_approximation(&self) -> f64 {
        self.pi_approximation
    }

    pub fn auto_play(&self) -> bool {
        self.auto_play
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn revolution_progress(&self) -> f32 {
        self.revolution_progress
    }

    pub fn max_revolution_steps(&self) -> u32 {
        self.max_revolution_steps
    }

    pub fn show_axis(&self) -> bool {
        self.show_axis
    }

    /// Revolution has swept the full circle
    pub fn revolution_complete(&self) -> bool {
        self.revolution_progress >= self.max_revolution_steps as f32
    }

    /// Swept angle in whole degrees
    pub fn revolution_degrees(&self) -> u32 {
        (self.revolution_progress / self.max_revolution_steps as f32 * 360.0).round() as u32
    }

    /// Set the side count, clamped to `[MIN_SIDES, MAX_SIDES]`
    ///
    /// Returns true if the rounded side count changed (the polygon needs
    /// rebuilding). Non-finite input is ignored.
    pub fn set_sides(&mut self, sides: f32) -> bool {
        if !sides.is_finite() {
            return false;
        }
        let before = self.rounded_sides();
        self.sides = sides.clamp(MIN_SIDES as f32, MAX_SIDES as f32);
        self.refresh_pi();
        before != self.rounded_sides()
    }

    /// Set the radius, clamped to `[MIN_RADIUS, MAX_RADIUS]`; returns true on change
    pub fn set_radius(&mut self, radius: f32) -> bool {
        if !radius.is_finite() {
            return false;
        }
        let radius = radius.clamp(MIN_RADIUS, MAX_RADIUS);
        let changed = radius != self.radius;
        self.radius = radius;
        self.refresh_pi();
        changed
    }

    pub fn set_speed(&mut self, speed: f32) {
        if speed.is_finite() {
            self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
        }
    }

    /// Set revolution progress, clamped to `[0, max_revolution_steps]`; returns true on change
    pub fn set_revolution_progress(&mut self, progress: f32) -> bool {
        if !progress.is_finite() {
            return false;
        }
        let progress = progress.clamp(0.0, self.max_revolution_steps as f32);
        let changed = progress != self.revolution_progress;
        self.revolution_progress = progress;
        changed
    }

    pub fn set_auto_play(&mut self, auto_play: bool) {
        self.auto_play = auto_play;
    }

    pub fn set_show_axis(&mut self, show_axis: bool) {
        self.show_axis = show_axis;
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Back to the first phase with a square; radius, speed and axis preference survive
    pub fn reset(&mut self) {
        self.phase = Phase::Polygon;
        self.auto_play = false;
        self.revolution_progress = 0.0;
        self.set_sides(INITIAL_SIDES);
    }

    fn refresh_pi(&mut self) {
        self.pi_approximation = approximate_pi(self.rounded_sides(), self.radius);
    }
}
