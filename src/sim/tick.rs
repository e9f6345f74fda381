//! Per-frame simulation update
//!
//! Applies queued commands, then advances the state from the frame delta when
//! auto-play is on. Returns the events the driver needs to rebuild geometry.

use super::state::{Phase, SimulationState};
use crate::consts::*;

/// Precomputed Fibonacci numbers used as growth increments
pub const FIBONACCI: [u32; 13] = [1, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144, 233];

/// Discrete user commands (keyboard, buttons, control panel)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    TogglePlay,
    /// Double the sides, or add half a revolution step
    StepUp,
    /// Halve the sides, or remove half a revolution step
    StepDown,
    Advance,
    Reset,
    SetSides(f32),
    SetRadius(f32),
    SetSpeed(f32),
    SetAutoPlay(bool),
    SetRevolutionProgress(f32),
    ToggleAxis(bool),
    /// Scene-only: no simulation state behind it
    ToggleGrid(bool),
    /// Scene-only: camera orbit
    SetAutoRotate(bool),
}

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Seconds since the previous frame
    pub dt: f32,
    /// Seconds since the session started
    pub elapsed: f32,
    /// Commands received since the previous frame, in arrival order
    pub commands: Vec<Command>,
}

/// What changed during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    /// Rounded side count changed
    SidesChanged,
    RadiusChanged,
    RevolutionChanged,
    PhaseChanged { from: Phase, to: Phase },
    Reset,
    AxisToggled(bool),
    AutoPlayChanged(bool),
}

/// Growth increment for the current side count (before time scaling)
///
/// Flat steps for small polygons, then increasingly large Fibonacci jumps.
pub fn growth_step(current_sides: u32) -> u32 {
    if current_sides <= EARLY_GROWTH_LIMIT {
        EARLY_GROWTH_STEP
    } else {
        fibonacci_increment(current_sides)
    }
}

/// Fibonacci jump by side-count threshold
pub fn fibonacci_increment(current_sides: u32) -> u32 {
    match current_sides {
        0..=40 => FIBONACCI[2],
        41..=50 => FIBONACCI[3],
        51..=60 => FIBONACCI[4],
        61..=80 => FIBONACCI[5],
        81..=100 => FIBONACCI[6],
        101..=130 => FIBONACCI[7],
        131..=170 => FIBONACCI[8],
        _ => FIBONACCI[9],
    }
}

/// Advance the simulation by one frame
pub fn tick(state: &mut SimulationState, input: &TickInput) -> Vec<SimEvent> {
    let mut events = Vec::new();

    for command in &input.commands {
        apply_command(state, *command, &mut events);
    }
    auto_play_step(state, input.dt, &mut events);

    events
}

/// Grow the sides or the sweep by one frame of auto-play
///
/// Does nothing while paused. `dt` is capped at `MAX_FRAME_DT`.
pub fn auto_play_step(state: &mut SimulationState, dt: f32, events: &mut Vec<SimEvent>) {
    let dt = dt.clamp(0.0, MAX_FRAME_DT);
    if !state.auto_play() {
        return;
    }

    match state.phase() {
        Phase::Polygon => {
            if state.sides() < MAX_SIDES as f32 {
                let step = growth_step(state.rounded_sides()) as f32;
                let next = state.sides() + step * dt * state.speed() * SIDES_RATE;
                if state.set_sides(next) {
                    events.push(SimEvent::SidesChanged);
                }
            } else {
                advance_phase(state, events);
            }
        }
        Phase::Revolution => {
            if !state.revolution_complete() {
                let next = state.revolution_progress() + dt * state.speed() * REVOLUTION_RATE;
                if state.set_revolution_progress(next) {
                    events.push(SimEvent::RevolutionChanged);
                }
            } else {
                advance_phase(state, events);
            }
        }
        Phase::Complete => {}
    }
}

/// Apply one discrete command; safe in any phase
pub fn apply_command(state: &mut SimulationState, command: Command, events: &mut Vec<SimEvent>) {
    log::debug!("command: {:?}", command);

    match command {
        Command::TogglePlay => {
            state.set_auto_play(!state.auto_play());
            events.push(SimEvent::AutoPlayChanged(state.auto_play()));
        }
        Command::SetAutoPlay(on) => {
            if state.auto_play() != on {
                state.set_auto_play(on);
                events.push(SimEvent::AutoPlayChanged(on));
            }
        }
        Command::StepUp => match state.phase() {
            Phase::Polygon => {
                let doubled = (state.sides() * 2.0).min(MAX_SIDES as f32);
                if state.set_sides(doubled) {
                    events.push(SimEvent::SidesChanged);
                }
            }
            _ => step_revolution(state, REVOLUTION_STEP, events),
        },
        Command::StepDown => match state.phase() {
            Phase::Polygon => {
                let halved = (state.sides() / 2.0).floor().max(MIN_SIDES as f32);
                if state.set_sides(halved) {
                    events.push(SimEvent::SidesChanged);
                }
            }
            _ => step_revolution(state, -REVOLUTION_STEP, events),
        },
        Command::Advance => advance_phase(state, events),
        Command::Reset => reset(state, events),
        Command::SetSides(sides) => {
            if state.set_sides(sides) {
                events.push(SimEvent::SidesChanged);
            }
        }
        Command::SetRadius(radius) => {
            if state.set_radius(radius) {
                events.push(SimEvent::RadiusChanged);
            }
        }
        Command::SetSpeed(speed) => state.set_speed(speed),
        Command::SetRevolutionProgress(progress) => {
            if state.phase() != Phase::Complete && state.set_revolution_progress(progress) {
                events.push(SimEvent::RevolutionChanged);
            }
        }
        Command::ToggleAxis(show) => {
            state.set_show_axis(show);
            events.push(SimEvent::AxisToggled(show));
        }
        Command::ToggleGrid(_) | Command::SetAutoRotate(_) => {}
    }
}

/// Sweep progress is frozen once the phase is Complete
fn step_revolution(state: &mut SimulationState, delta: f32, events: &mut Vec<SimEvent>) {
    if state.phase() == Phase::Complete {
        return;
    }
    if state.set_revolution_progress(state.revolution_progress() + delta) {
        events.push(SimEvent::RevolutionChanged);
    }
}

/// Move to the next phase if the current one allows it
///
/// Polygon always advances; Revolution only once the sweep is complete;
/// Complete is terminal.
pub fn advance_phase(state: &mut SimulationState, events: &mut Vec<SimEvent>) {
    match state.phase() {
        Phase::Polygon => {
            state.set_phase(Phase::Revolution);
            if state.set_sides(MAX_SIDES as f32) {
                events.push(SimEvent::SidesChanged);
            }
            state.set_revolution_progress(REVOLUTION_SEED_PROGRESS);
            events.push(SimEvent::PhaseChanged {
                from: Phase::Polygon,
                to: Phase::Revolution,
            });
            events.push(SimEvent::RevolutionChanged);
            log::info!("Phase 2: revolution");
        }
        Phase::Revolution if state.revolution_complete() => {
            state.set_phase(Phase::Complete);
            if state.auto_play() {
                state.set_auto_play(false);
                events.push(SimEvent::AutoPlayChanged(false));
            }
            events.push(SimEvent::PhaseChanged {
                from: Phase::Revolution,
                to: Phase::Complete,
            });
            log::info!("Revolution complete");
        }
        Phase::Revolution | Phase::Complete => {}
    }
}

/// Return to the initial polygon phase
pub fn reset(state: &mut SimulationState, events: &mut Vec<SimEvent>) {
    state.reset();
    events.push(SimEvent::Reset);
    log::info!("Animation reset");
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    fn frame(commands: Vec<Command>) -> TickInput {
        TickInput {
            dt: FRAME,
            elapsed: 0.0,
            commands,
        }
    }

    #[test]
    fn test_fibonacci_ladder() {
        let cases = [
            (35, 2),
            (45, 3),
            (55, 5),
            (70, 8),
            (90, 13),
            (120, 21),
            (150, 34),
            (200, 55),
        ];
        for (sides, expected) in cases {
            assert_eq!(fibonacci_increment(sides), expected, "sides = {sides}");
        }
    }

    #[test]
    fn test_growth_step_is_flat_for_small_polygons() {
        assert_eq!(growth_step(3), 3);
        assert_eq!(growth_step(30), 3);
        assert_eq!(growth_step(31), 2);
        assert_eq!(growth_step(256), 55);
    }

    #[test]
    fn test_paused_tick_changes_nothing() {
        let mut state = SimulationState::new();
        let events = tick(&mut state, &frame(vec![]));
        assert!(events.is_empty());
        assert_eq!(state, SimulationState::new());
    }

    #[test]
    fn test_auto_play_grows_sides() {
        let mut state = SimulationState::new();
        state.set_auto_play(true);
        let before = state.sides();
        tick(&mut state, &frame(vec![]));
        // 3 * dt * 0.5 * 4
        let expected = before + 3.0 * FRAME * 0.5 * 4.0;
        assert!((state.sides() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_auto_play_uses_fibonacci_step_past_thirty() {
        for (sides, step) in [(90.0, 13.0), (200.0, 55.0)] {
            let mut state = SimulationState::new();
            state.set_sides(sides);
            state.set_auto_play(true);
            tick(&mut state, &frame(vec![]));
            let expected = sides + step * FRAME * DEFAULT_SPEED * SIDES_RATE;
            assert!((state.sides() - expected).abs() < 1e-4, "from {sides}: {}", state.sides());
        }
    }

    #[test]
    fn test_auto_play_sweeps_revolution() {
        let mut state = SimulationState::new();
        tick(&mut state, &frame(vec![Command::Advance, Command::TogglePlay]));
        // Advance seeds 0.5, then the same tick sweeps once
        let expected = 0.5 + FRAME * 0.5 * 6.0;
        assert!((state.revolution_progress() - expected).abs() < 1e-6);

        let before = state.revolution_progress();
        let mut events = Vec::new();
        auto_play_step(&mut state, FRAME, &mut events);
        assert!((state.revolution_progress() - (before + FRAME * 0.5 * 6.0)).abs() < 1e-6);
        assert_eq!(events, vec![SimEvent::RevolutionChanged]);
    }

    #[test]
    fn test_progress_frozen_once_complete() {
        let mut state = SimulationState::new();
        tick(&mut state, &frame(vec![Command::Advance, Command::SetRevolutionProgress(45.0)]));
        tick(&mut state, &frame(vec![Command::Advance]));
        assert_eq!(state.phase(), Phase::Complete);

        let events = tick(
            &mut state,
            &frame(vec![Command::StepDown, Command::SetRevolutionProgress(10.0), Command::StepUp]),
        );
        assert!(events.is_empty());
        assert_eq!(state.revolution_progress(), 45.0);

        // Reset still leaves Complete
        tick(&mut state, &frame(vec![Command::Reset]));
        assert_eq!(state.phase(), Phase::Polygon);
    }

    #[test]
    fn test_large_frame_delta_is_capped() {
        let mut state = SimulationState::new();
        state.set_auto_play(true);
        let input = TickInput {
            dt: 5.0,
            ..Default::default()
        };
        tick(&mut state, &input);
        let expected = 4.0 + 3.0 * MAX_FRAME_DT * 0.5 * 4.0;
        assert!((state.sides() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_advance_from_polygon() {
        for sides in [3.0, 4.0, 77.0, 256.0] {
            let mut state = SimulationState::new();
            state.set_sides(sides);
            state.set_revolution_progress(12.0);
            let events = tick(&mut state, &frame(vec![Command::Advance]));

            assert_eq!(state.phase(), Phase::Revolution);
            assert_eq!(state.sides(), 256.0);
            assert_eq!(state.revolution_progress(), 0.5);
            assert!(events.contains(&SimEvent::PhaseChanged {
                from: Phase::Polygon,
                to: Phase::Revolution
            }));
        }
    }

    #[test]
    fn test_advance_from_revolution_requires_full_sweep() {
        let mut state = SimulationState::new();
        tick(&mut state, &frame(vec![Command::Advance]));
        state.set_auto_play(true);
        state.set_revolution_progress(44.9);

        let mut events = Vec::new();
        advance_phase(&mut state, &mut events);
        assert_eq!(state.phase(), Phase::Revolution);
        assert!(events.is_empty());
        assert!(state.auto_play());

        state.set_revolution_progress(45.0);
        advance_phase(&mut state, &mut events);
        assert_eq!(state.phase(), Phase::Complete);
        assert!(!state.auto_play());

        // Terminal
        let snapshot = state.clone();
        let events = tick(&mut state, &frame(vec![Command::Advance]));
        assert!(events.is_empty());
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut state = SimulationState::new();
        tick(
            &mut state,
            &frame(vec![Command::Advance, Command::SetRevolutionProgress(30.0), Command::TogglePlay]),
        );

        tick(&mut state, &frame(vec![Command::Reset]));
        let once = state.clone();
        tick(&mut state, &frame(vec![Command::Reset]));
        assert_eq!(state, once);

        assert_eq!(state.phase(), Phase::Polygon);
        assert_eq!(state.sides(), 4.0);
        assert_eq!(state.revolution_progress(), 0.0);
        assert!(!state.auto_play());
    }

    #[test]
    fn test_step_commands_in_polygon_phase() {
        let mut state = SimulationState::new();
        tick(&mut state, &frame(vec![Command::StepUp]));
        assert_eq!(state.sides(), 8.0);
        tick(&mut state, &frame(vec![Command::StepUp; 10]));
        assert_eq!(state.sides(), 256.0);

        tick(&mut state, &frame(vec![Command::StepDown]));
        assert_eq!(state.sides(), 128.0);
        tick(&mut state, &frame(vec![Command::StepDown; 10]));
        assert_eq!(state.sides(), 3.0);
    }

    #[test]
    fn test_step_commands_in_revolution_phase() {
        let mut state = SimulationState::new();
        tick(&mut state, &frame(vec![Command::Advance, Command::StepUp]));
        assert_eq!(state.revolution_progress(), 1.0);
        tick(&mut state, &frame(vec![Command::StepDown; 5]));
        assert_eq!(state.revolution_progress(), 0.0);
        tick(&mut state, &frame(vec![Command::StepUp; 200]));
        assert_eq!(state.revolution_progress(), 45.0);
    }

    #[test]
    fn test_full_auto_play_run_completes() {
        let mut state = SimulationState::new();
        state.set_speed(3.0);
        tick(&mut state, &frame(vec![Command::TogglePlay]));

        let mut phases = vec![state.phase()];
        for _ in 0..20_000 {
            let events = tick(&mut state, &frame(vec![]));
            for event in events {
                if let SimEvent::PhaseChanged { to, .. } = event {
                    phases.push(to);
                }
            }
            if state.phase() == Phase::Complete {
                break;
            }
        }

        assert_eq!(phases, vec![Phase::Polygon, Phase::Revolution, Phase::Complete]);
        assert!(!state.auto_play());
        assert_eq!(state.revolution_progress(), 45.0);
    }

    #[test]
    fn test_scene_only_commands_leave_state_alone() {
        let mut state = SimulationState::new();
        let events = tick(
            &mut state,
            &frame(vec![Command::ToggleGrid(false), Command::SetAutoRotate(true)]),
        );
        assert!(events.is_empty());
        assert_eq!(state, SimulationState::new());
    }
}
