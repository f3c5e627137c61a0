//! Frame-driven game loop
//!
//! `GameClock` owns one session and sequences it tick by tick:
//! flap flag → physics → pipes → collisions → render → schedule next.
//! Input never runs mid-tick; it only sets flags read at the next tick.
//!
//! Ticks are requested from a [`TickScheduler`] and delivered back through
//! [`GameClock::on_frame`]. Only the single pending handle is honoured, and
//! it is invalidated before every state transition, so a stopped loop can
//! never run another tick even if the platform still fires one.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::config::{ConfigError, GameConfig};
use crate::platform::{TickHandle, TickScheduler};
use crate::sim::{GameState, Snapshot, Surface, TickInput, TickOutcome, tick};

/// Loop lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    /// Created or shut down; no session in play
    Idle,
    Running,
    /// Session ended by a collision; waiting for a reset
    Over,
}

type FrameCallback = Box<dyn FnMut(&Snapshot<'_>)>;

/// One game session plus the machinery that drives it
pub struct GameClock<S, R = Pcg32> {
    game: GameState<R>,
    scheduler: S,
    state: ClockState,
    /// The only tick handle `on_frame` will accept
    pending: Option<TickHandle>,
    /// Flap received since the last tick
    flap_requested: bool,
    on_render: Option<FrameCallback>,
    on_game_over: Option<FrameCallback>,
}

impl<S: TickScheduler> GameClock<S, Pcg32> {
    /// Create an idle clock with a seeded pipe generator
    pub fn new(
        config: GameConfig,
        surface: Surface,
        seed: u64,
        scheduler: S,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_game(
            GameState::new(config, surface, seed),
            scheduler,
        ))
    }
}

impl<S: TickScheduler, R: Rng> GameClock<S, R> {
    /// Create an idle clock drawing pipe heights from `rng`
    pub fn with_rng(
        config: GameConfig,
        surface: Surface,
        rng: R,
        scheduler: S,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_game(
            GameState::with_rng(config, surface, rng),
            scheduler,
        ))
    }

    fn from_game(game: GameState<R>, scheduler: S) -> Self {
        Self {
            game,
            scheduler,
            state: ClockState::Idle,
            pending: None,
            flap_requested: false,
            on_render: None,
            on_game_over: None,
        }
    }

    /// Called with the current snapshot after every tick the bird survives
    pub fn set_render_callback(&mut self, callback: impl FnMut(&Snapshot<'_>) + 'static) {
        self.on_render = Some(Box::new(callback));
    }

    /// Called once each time a session ends
    pub fn set_game_over_callback(&mut self, callback: impl FnMut(&Snapshot<'_>) + 'static) {
        self.on_game_over = Some(Box::new(callback));
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn game(&self) -> &GameState<R> {
        &self.game
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        self.game.snapshot()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Handle of the tick currently awaited, if any
    pub fn pending_tick(&self) -> Option<TickHandle> {
        self.pending
    }

    /// Begin a fresh session from Idle or Over. Ignored while Running.
    pub fn start(&mut self) {
        if self.state == ClockState::Running {
            log::debug!("start ignored: session already running");
            return;
        }

        self.cancel_pending();
        if let Err(e) = self.game.config.check_surface(self.game.surface.height) {
            log::warn!("{}", e);
        }
        self.game.reset();
        self.flap_requested = false;
        self.state = ClockState::Running;
        log::info!(
            "Session started on {}x{} surface",
            self.game.surface.width,
            self.game.surface.height
        );

        self.schedule_next();
    }

    /// Retry after a game over
    pub fn on_reset(&mut self) {
        self.start();
    }

    /// Queue a flap for the next tick (only while Running)
    pub fn on_flap(&mut self) {
        if self.state == ClockState::Running {
            self.flap_requested = true;
        }
    }

    /// The drawing surface changed size.
    ///
    /// Takes effect from the next tick. The bird and live pipes keep their
    /// coordinates; nothing is rescaled or reset.
    pub fn on_resize(&mut self, width: f32, height: f32) {
        self.game.surface = Surface::new(width, height);
        log::debug!("Surface resized to {}x{}", width, height);
        if let Err(e) = self.game.config.check_surface(height) {
            log::warn!("{}", e);
        }
    }

    /// Run one tick if `handle` is the one we are waiting for.
    ///
    /// Returns whether a tick ran.
    pub fn on_frame(&mut self, handle: TickHandle) -> bool {
        if self.pending != Some(handle) {
            log::warn!("Dropping stale tick #{}", handle.id());
            return false;
        }
        self.pending = None;
        if self.state != ClockState::Running {
            return false;
        }

        let input = TickInput {
            flap: std::mem::take(&mut self.flap_requested),
        };
        match tick(&mut self.game, &input) {
            TickOutcome::Advanced => {
                if let Some(render) = self.on_render.as_mut() {
                    render(&self.game.snapshot());
                }
                self.schedule_next();
            }
            TickOutcome::Collided { index } => {
                log::info!(
                    "Game over: hit pipe {} after {} ticks",
                    index,
                    self.game.frame
                );
                self.end_session();
            }
            TickOutcome::Halted => self.end_session(),
        }
        true
    }

    /// Teardown: stop scheduling and forget any queued input
    pub fn shutdown(&mut self) {
        self.cancel_pending();
        self.flap_requested = false;
        self.state = ClockState::Idle;
        log::info!("Game loop stopped");
    }

    fn end_session(&mut self) {
        self.cancel_pending();
        self.flap_requested = false;
        self.state = ClockState::Over;
        if let Some(notify) = self.on_game_over.as_mut() {
            notify(&self.game.snapshot());
        }
    }

    fn schedule_next(&mut self) {
        match self.scheduler.request() {
            Ok(handle) => self.pending = Some(handle),
            Err(e) => {
                // Nothing will fire; drop back so start() can try again
                log::error!("Could not schedule next tick: {}", e);
                self.flap_requested = false;
                self.state = ClockState::Idle;
            }
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::platform::ManualScheduler;
    use crate::sim::SessionState;

    fn new_clock(seed: u64) -> GameClock<ManualScheduler> {
        GameClock::new(
            GameConfig::default(),
            Surface::new(800.0, 600.0),
            seed,
            ManualScheduler::new(),
        )
        .unwrap()
    }

    /// Fire due ticks until none remain; returns how many ran
    fn run(clock: &mut GameClock<ManualScheduler>, limit: usize) -> usize {
        let mut ran = 0;
        while ran < limit {
            let Some(handle) = clock.scheduler_mut().next_due() else {
                break;
            };
            if clock.on_frame(handle) {
                ran += 1;
            }
        }
        ran
    }

    /// Refuses its first `fail_first` requests, then behaves like `ManualScheduler`
    struct FlakyScheduler {
        fail_first: usize,
        inner: ManualScheduler,
    }

    impl TickScheduler for FlakyScheduler {
        fn request(&mut self) -> Result<TickHandle, crate::platform::ScheduleError> {
            if self.fail_first > 0 {
                self.fail_first -= 1;
                return Err(crate::platform::ScheduleError::Request("busy".into()));
            }
            self.inner.request()
        }

        fn cancel(&mut self, handle: TickHandle) {
            self.inner.cancel(handle);
        }
    }

    #[test]
    fn test_failed_request_leaves_loop_restartable() {
        let scheduler = FlakyScheduler {
            fail_first: 1,
            inner: ManualScheduler::new(),
        };
        let mut clock =
            GameClock::new(GameConfig::default(), Surface::new(800.0, 600.0), 1, scheduler)
                .unwrap();

        clock.start();
        assert_eq!(clock.state(), ClockState::Idle);
        assert_eq!(clock.pending_tick(), None);

        clock.on_reset();
        assert_eq!(clock.state(), ClockState::Running);
        let handle = clock.pending_tick().unwrap();
        assert_eq!(clock.scheduler_mut().inner.next_due(), Some(handle));
        assert!(clock.on_frame(handle));
        assert_eq!(clock.game().frame, 1);
    }

    #[test]
    fn test_with_rng_matches_seeded_constructor() {
        use rand::SeedableRng;

        let mut seeded = new_clock(5);
        let mut injected = GameClock::with_rng(
            GameConfig::default(),
            Surface::new(800.0, 600.0),
            Pcg32::seed_from_u64(5),
            ManualScheduler::new(),
        )
        .unwrap();

        seeded.start();
        injected.start();
        run(&mut seeded, 120);
        run(&mut injected, 120);
        assert_eq!(seeded.game().frame, injected.game().frame);
        assert_eq!(seeded.game().field.obstacles(), injected.game().field.obstacles());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = GameConfig {
            pipe_speed: 0.0,
            ..Default::default()
        };
        let result = GameClock::new(config, Surface::new(800.0, 600.0), 1, ManualScheduler::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_idle_until_started() {
        let mut clock = new_clock(1);
        assert_eq!(clock.state(), ClockState::Idle);
        assert_eq!(clock.scheduler().pending(), 0);

        clock.start();
        assert_eq!(clock.state(), ClockState::Running);
        assert_eq!(clock.scheduler().pending(), 1);
        assert!(clock.pending_tick().is_some());
    }

    #[test]
    fn test_tick_renders_and_reschedules() {
        let mut clock = new_clock(1);
        let frames = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&frames);
        clock.set_render_callback(move |snap| {
            sink.borrow_mut()
                .push((snap.frame, snap.avatar.pos.y, snap.obstacles.len()));
        });

        clock.start();
        assert_eq!(run(&mut clock, 1), 1);

        let frames = frames.borrow();
        assert_eq!(frames.len(), 1);
        let (frame, y, pipes) = frames[0];
        assert_eq!(frame, 1);
        assert!((y - 300.8).abs() < 0.0001);
        assert_eq!(pipes, 1);
        assert_eq!(clock.scheduler().pending(), 1);
    }

    #[test]
    fn test_flap_consumed_at_next_tick() {
        let mut clock = new_clock(1);
        clock.start();

        clock.on_flap();
        clock.on_flap();
        // Not applied until the tick runs
        assert_eq!(clock.game().avatar.velocity, 0.0);

        run(&mut clock, 1);
        assert!((clock.game().avatar.velocity + 11.2).abs() < 0.0001);

        run(&mut clock, 1);
        assert!((clock.game().avatar.velocity + 10.4).abs() < 0.0001);
    }

    #[test]
    fn test_flap_ignored_when_idle() {
        let mut clock = new_clock(1);
        clock.on_flap();
        clock.start();
        run(&mut clock, 1);
        assert!((clock.game().avatar.velocity - 0.8).abs() < 0.0001);
    }

    #[test]
    fn test_game_over_fires_once_and_stops() {
        let mut clock = new_clock(11);
        let overs = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&overs);
        clock.set_game_over_callback(move |snap| sink.borrow_mut().push(snap.session));

        clock.start();
        let ran = run(&mut clock, 10_000);
        assert!(ran < 10_000);

        assert_eq!(clock.state(), ClockState::Over);
        assert_eq!(*overs.borrow(), vec![SessionState::Over]);
        assert_eq!(clock.pending_tick(), None);
        assert_eq!(clock.scheduler().pending(), 0);

        // Late input does nothing
        let before = clock.game().avatar.clone();
        clock.on_flap();
        assert_eq!(run(&mut clock, 10), 0);
        assert_eq!(clock.game().avatar, before);
        assert_eq!(overs.borrow().len(), 1);
    }

    #[test]
    fn test_stale_handle_never_runs() {
        let mut clock = new_clock(1);
        clock.start();
        let first = clock.pending_tick().unwrap();
        clock.shutdown();

        assert!(clock.scheduler().was_cancelled(first));
        // Delivered anyway (platform race)
        assert!(!clock.on_frame(first));
        assert_eq!(clock.game().frame, 0);
        assert_eq!(clock.state(), ClockState::Idle);
    }

    #[test]
    fn test_reset_restores_initial_session() {
        let mut clock = new_clock(21);
        let initial = clock.game().avatar.clone();

        clock.start();
        for _ in 0..40 {
            clock.on_flap();
            run(&mut clock, 7);
        }
        run(&mut clock, 10_000);
        assert_eq!(clock.state(), ClockState::Over);

        clock.on_reset();
        assert_eq!(clock.state(), ClockState::Running);
        assert_eq!(clock.game().avatar, initial);
        assert!(clock.game().field.is_empty());
        assert_eq!(clock.game().frame, 0);
        assert_eq!(clock.game().session, SessionState::Running);
        assert_eq!(clock.scheduler().pending(), 1);

        // A second session runs and ends the same way
        run(&mut clock, 10_000);
        assert_eq!(clock.state(), ClockState::Over);
        clock.on_reset();
        assert_eq!(clock.game().avatar, initial);
        assert!(clock.game().field.is_empty());
    }

    #[test]
    fn test_start_while_running_is_ignored() {
        let mut clock = new_clock(1);
        clock.start();
        run(&mut clock, 5);
        let handle = clock.pending_tick();

        clock.start();
        assert_eq!(clock.game().frame, 5);
        assert_eq!(clock.pending_tick(), handle);
        assert_eq!(clock.scheduler().pending(), 1);
    }

    #[test]
    fn test_resize_keeps_simulation_going() {
        let mut clock = new_clock(1);
        clock.start();
        run(&mut clock, 10);
        let y = clock.game().avatar.pos.y;
        let pipes = clock.game().field.obstacles().clone();

        clock.on_resize(1024.0, 700.0);
        assert_eq!(clock.state(), ClockState::Running);
        assert_eq!(clock.game().avatar.pos.y, y);
        assert_eq!(clock.game().field.obstacles(), &pipes);
        assert_eq!(clock.snapshot().surface, Surface::new(1024.0, 700.0));

        // Next spawn (frame 50) uses the new width
        run(&mut clock, 41);
        let newest = clock.game().field.obstacles().back().unwrap();
        assert_eq!(newest.x, 1024.0 - 6.0);
    }
}
