//! Fixed timestep simulation tick
//!
//! One call = one display refresh worth of simulation.

use rand::Rng;

use super::collision::first_collision;
use super::physics;
use super::state::{GameState, SessionState};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Flap requested since the previous tick
    pub flap: bool,
}

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The bird survived; the frame counter moved on
    Advanced,
    /// The bird hit the pipe at this index; the session is now Over
    Collided { index: usize },
    /// The session was already Over, nothing changed
    Halted,
}

/// Advance the game state by one tick: bird, then pipes, then collisions
pub fn tick<R: Rng>(state: &mut GameState<R>, input: &TickInput) -> TickOutcome {
    if state.session == SessionState::Over {
        return TickOutcome::Halted;
    }

    if input.flap {
        physics::flap(&mut state.avatar);
    }
    physics::integrate(&mut state.avatar, state.surface.height, 1.0);

    state.field.tick(&state.config, state.surface, state.frame);

    if let Some(index) = first_collision(&state.avatar, state.field.iter(), state.surface.height) {
        state.session = SessionState::Over;
        return TickOutcome::Collided { index };
    }

    state.frame += 1;
    TickOutcome::Advanced
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::state::Surface;

    fn new_state(seed: u64) -> GameState {
        GameState::new(GameConfig::default(), Surface::new(800.0, 600.0), seed)
    }

    #[test]
    fn test_first_tick() {
        let mut state = new_state(1);
        assert_eq!(tick(&mut state, &TickInput::default()), TickOutcome::Advanced);

        assert_eq!(state.frame, 1);
        assert!((state.avatar.pos.y - 300.8).abs() < 0.0001);
        assert_eq!(state.field.len(), 1);
        assert_eq!(state.field.obstacles()[0].x, 794.0);
    }

    #[test]
    fn test_flap_applied_before_gravity() {
        let mut state = new_state(1);
        tick(&mut state, &TickInput { flap: true });
        assert!((state.avatar.velocity + 11.2).abs() < 0.0001);
        assert!((state.avatar.pos.y - 288.8).abs() < 0.0001);
    }

    #[test]
    fn test_falling_bird_eventually_hits_a_pipe() {
        let mut state = new_state(7);
        let input = TickInput::default();

        let mut outcome = TickOutcome::Advanced;
        for _ in 0..1000 {
            outcome = tick(&mut state, &input);
            if outcome != TickOutcome::Advanced {
                break;
            }
        }
        // Resting on the ground is always below the gap
        assert_eq!(outcome, TickOutcome::Collided { index: 0 });
        assert_eq!(state.session, SessionState::Over);
        assert_eq!(state.avatar.pos.y, 570.0);
    }

    #[test]
    fn test_over_is_terminal() {
        let mut state = new_state(7);
        state.session = SessionState::Over;
        let before = (state.avatar.clone(), state.frame, state.field.len());

        assert_eq!(tick(&mut state, &TickInput { flap: true }), TickOutcome::Halted);
        assert_eq!((state.avatar.clone(), state.frame, state.field.len()), before);
    }

    #[test]
    fn test_frame_not_counted_on_collision() {
        let mut state = new_state(3);
        let input = TickInput::default();
        let mut frames = 0;
        while tick(&mut state, &input) == TickOutcome::Advanced {
            frames += 1;
        }
        assert_eq!(state.frame, frames);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = new_state(99999);
        let mut state2 = new_state(99999);

        for i in 0..300 {
            let input = TickInput { flap: i % 9 == 0 };
            let a = tick(&mut state1, &input);
            let b = tick(&mut state2, &input);
            assert_eq!(a, b);
        }

        assert_eq!(state1.frame, state2.frame);
        assert_eq!(state1.avatar, state2.avatar);
        assert_eq!(state1.field.obstacles(), state2.field.obstacles());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let fresh = new_state(5);
        let mut state = new_state(5);
        while tick(&mut state, &TickInput::default()) == TickOutcome::Advanced {}

        state.reset();
        assert_eq!(state.avatar, fresh.avatar);
        assert!(state.field.is_empty());
        assert_eq!(state.frame, 0);
        assert_eq!(state.session, SessionState::Running);

        state.reset();
        assert_eq!(state.avatar, fresh.avatar);
    }
}
