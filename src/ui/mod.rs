//! Info panel model and keyboard mapping

pub mod hud;
pub mod input;

pub use hud::{Accuracy, HudModel};
pub use input::command_for_key;
