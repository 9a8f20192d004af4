use std::time::{Duration, Instant};

use clap::Parser;
use serpent::config::{self, BoundaryPolicy, GridSize, Settings, THEME_CLASSIC};
use serpent::engine::{GameState, GameStatus, TickResult};
use serpent::error::Error;
use serpent::input::{self, Direction, GameInput};
use serpent::renderer::{self, HudInfo};
use serpent::score;
use serpent::terminal_runtime::TerminalSession;

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(name = "serpent", version, about = "Terminal snake with power-ups")]
struct Cli {
    /// Grid width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells.
    #[arg(long)]
    height: Option<u16>,

    /// Wrap around the edges instead of ending the game at the wall.
    #[arg(long)]
    wrap: bool,

    /// Disable power-up spawning.
    #[arg(long = "no-powerups")]
    no_powerups: bool,

    /// Milliseconds between simulation ticks.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Seed the RNG for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    /// Overlays CLI flags on top of the loaded settings file.
    ///
    /// The merged grid is validated afterwards, so a too-small `--width`
    /// is rejected the same way a hand-edited settings file is.
    fn apply_to(&self, settings: &mut Settings) {
        if let Some(width) = self.width {
            settings.grid.width = width;
        }
        if let Some(height) = self.height {
            settings.grid.height = height;
        }
        if self.wrap {
            settings.boundary = BoundaryPolicy::Wrapping;
        }
        if self.no_powerups {
            settings.power_ups = false;
        }
        if let Some(tick_ms) = self.tick_ms {
            settings.tick_interval_ms = tick_ms.max(20);
        }
    }
}

fn main() -> Result<(), Error> {
    let cli = Cli::parse();

    let mut settings = config::load_settings()?;
    cli.apply_to(&mut settings);
    config::validate_grid(settings.grid)?;

    // Read the score log before entering raw mode, so a warning is still
    // visible on a normal terminal.
    let high_score = match score::high_score() {
        Ok(value) => value,
        Err(error) => {
            eprintln!("Failed to read score log: {error}");
            0
        }
    };

    let session = TerminalSession::enter()?;
    run(session, &settings, cli.seed, high_score)
}

fn run(
    mut session: TerminalSession,
    settings: &Settings,
    seed: Option<u64>,
    mut high_score: u32,
) -> Result<(), Error> {
    let mut state = new_game(settings, seed);
    let mut pending_direction: Option<Direction> = None;

    let tick_interval = Duration::from_millis(settings.tick_interval_ms);
    let mut clock = TickClock::new(Instant::now());

    loop {
        session.terminal_mut().draw(|frame| {
            renderer::render(
                frame,
                &state,
                HudInfo {
                    high_score,
                    paused: clock.paused,
                    theme: &THEME_CLASSIC,
                },
            )
        })?;

        // The poll timeout doubles as the frame delay; the simulation
        // itself only advances at the configured tick interval below.
        if let Some(game_input) = input::poll_input(INPUT_POLL_INTERVAL)? {
            match game_input {
                GameInput::Quit => break,
                GameInput::Pause => clock.toggle_pause(Instant::now()),
                GameInput::Direction(direction) => pending_direction = Some(direction),
                GameInput::Restart => {
                    if matches!(state.status, GameStatus::Over(_)) {
                        state = new_game(settings, seed);
                        pending_direction = None;
                        clock.reset(Instant::now());
                    }
                }
            }
        }

        let running = state.status == GameStatus::Running;
        if running && clock.should_tick(Instant::now(), tick_interval) {
            if let TickResult::GameOver(_) = state.tick(pending_direction.take()) {
                if state.score > high_score {
                    high_score = state.score;
                }
                if let Err(error) = score::append_score(state.score) {
                    eprintln!("Failed to record score: {error}");
                }
            }
        }
    }

    Ok(())
}

/// Host-side pacing state: the tick timestamp and the pause flag.
///
/// Kept together so that leaving pause restarts the interval instead of
/// firing an immediate tick off the stale pre-pause timestamp.
struct TickClock {
    last_tick: Instant,
    paused: bool,
}

impl TickClock {
    fn new(now: Instant) -> Self {
        Self {
            last_tick: now,
            paused: false,
        }
    }

    fn toggle_pause(&mut self, now: Instant) {
        self.paused = !self.paused;
        if !self.paused {
            self.last_tick = now;
        }
    }

    fn reset(&mut self, now: Instant) {
        self.last_tick = now;
        self.paused = false;
    }

    /// Returns true when a full interval has elapsed while unpaused, and
    /// rearms the clock for the next tick.
    fn should_tick(&mut self, now: Instant, interval: Duration) -> bool {
        if self.paused || now.duration_since(self.last_tick) < interval {
            return false;
        }
        self.last_tick = now;
        true
    }
}

fn new_game(settings: &Settings, seed: Option<u64>) -> GameState {
    let size = GridSize {
        width: settings.grid.width,
        height: settings.grid.height,
    };

    match seed {
        Some(seed) => GameState::new_with_seed(size, settings.boundary, settings.power_ups, seed),
        None => GameState::new(size, settings.boundary, settings.power_ups),
    }
}
