//! Simulation module
//!
//! The π animation's state machine. Pure and single-threaded:
//! - All mutation goes through clamped setters on `SimulationState`
//! - Time only enters through `TickInput::dt`
//! - No rendering or platform dependencies

pub mod state;
pub mod tick;

pub use state::{Phase, SimulationState};
pub use tick::{
    Command, FIBONACCI, SimEvent, TickInput, advance_phase, apply_command, auto_play_step,
    fibonacci_increment, growth_step, reset, tick,
};
