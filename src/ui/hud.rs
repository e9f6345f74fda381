//! Info panel contents derived from the simulation state
//!
//! Pure formatting; the DOM side in `main.rs` only copies these strings into
//! the page.

use std::f64::consts::PI;

use serde::Serialize;

use crate::sim::{Phase, SimulationState};

pub const FINAL_MESSAGE: &str = "π: the constant that connects the finite with the infinite";

/// Relative error of an approximation, in percent
pub fn error_percent(approximation: f64) -> f64 {
    ((approximation - PI) / PI * 100.0).abs()
}

/// Error with precision that grows as the approximation improves
pub fn format_error(error: f64) -> String {
    if error < 0.0001 {
        "< 0.0001%".to_string()
    } else if error < 0.01 {
        format!("{:.4}%", error)
    } else if error < 1.0 {
        format!("{:.2}%", error)
    } else {
        format!("{:.1}%", error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Accuracy {
    Good,
    Fair,
    Poor,
}

impl Accuracy {
    pub fn from_error(error: f64) -> Self {
        if error < 0.01 {
            Accuracy::Good
        } else if error < 1.0 {
            Accuracy::Fair
        } else {
            Accuracy::Poor
        }
    }

    /// Text color for the error readout
    pub fn css_color(&self) -> &'static str {
        match self {
            Accuracy::Good => "rgba(100, 220, 100, 0.9)",
            Accuracy::Fair => "rgba(255, 200, 100, 0.9)",
            Accuracy::Poor => "rgba(255, 120, 120, 0.8)",
        }
    }
}

pub fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Polygon => "PHASE 1 · Polygons",
        Phase::Revolution | Phase::Complete => "PHASE 2 · Revolution",
    }
}

/// Plain-text formulas shown under the readouts
pub fn formulas(phase: Phase) -> &'static [&'static str] {
    match phase {
        Phase::Polygon => &["P = n · 2r · sin(π/n)", "π ≈ P / 2r"],
        Phase::Revolution | Phase::Complete => &["A = 4πr²", "V = (4/3)πr³"],
    }
}

/// Everything the info panel displays for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudModel {
    pub phase_label: &'static str,
    pub pi_value: String,
    pub sides: u32,
    pub error: String,
    pub accuracy: Accuracy,
    /// Present once the sweep has started
    pub rotation: Option<String>,
    pub formulas: &'static [&'static str],
    pub auto_play: bool,
    pub final_message: Option<&'static str>,
}

impl HudModel {
    pub fn from_state(state: &SimulationState, final_message_visible: bool) -> Self {
        let error = error_percent(state.pi_approximation());
        let rotation = match state.phase() {
            Phase::Polygon => None,
            Phase::Revolution | Phase::Complete => Some(format!("{}°", state.revolution_degrees())),
        };

        Self {
            phase_label: phase_label(state.phase()),
            pi_value: format!("{:.6}", state.pi_approximation()),
            sides: state.rounded_sides(),
            error: format_error(error),
            accuracy: Accuracy::from_error(error),
            rotation,
            formulas: formulas(state.phase()),
            auto_play: state.auto_play(),
            final_message: final_message_visible.then_some(FINAL_MESSAGE),
        }
    }
}
