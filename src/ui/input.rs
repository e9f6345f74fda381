//! Keyboard shortcuts

use crate::sim::Command;

/// Map a `KeyboardEvent.key` value to a command
pub fn command_for_key(key: &str) -> Option<Command> {
    match key {
        " " => Some(Command::TogglePlay),
        "ArrowRight" => Some(Command::Advance),
        "r" | "R" => Some(Command::Reset),
        "ArrowUp" => Some(Command::StepUp),
        "ArrowDown" => Some(Command::StepDown),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(command_for_key(" "), Some(Command::TogglePlay));
        assert_eq!(command_for_key("ArrowRight"), Some(Command::Advance));
        assert_eq!(command_for_key("R"), Some(Command::Reset));
        assert_eq!(command_for_key("r"), Some(Command::Reset));
        assert_eq!(command_for_key("ArrowUp"), Some(Command::StepUp));
        assert_eq!(command_for_key("ArrowDown"), Some(Command::StepDown));
        assert_eq!(command_for_key("ArrowLeft"), None);
        assert_eq!(command_for_key("Enter"), None);
    }
}
