//! Game-state simulation engine for a terminal snake game.
//!
//! The engine is synchronous and turn-based: the host loop polls input,
//! calls [`engine::GameState::tick`] once per step, and renders from the
//! resulting state. Rendering, input polling, and pacing live at the
//! edges (`renderer`, `input`, `main`); the simulation itself never
//! touches the terminal.

pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod input;
pub mod renderer;
pub mod score;
pub mod snake;
pub mod spawner;
pub mod terminal_runtime;
