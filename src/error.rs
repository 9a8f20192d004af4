use std::io;

use thiserror::Error;

/// Fatal setup and I/O failures.
///
/// Terminal game conditions (wall collision, self collision, board full)
/// are not errors; they are ordinary [`crate::engine::TickResult`] values.
/// Broken simulation invariants (an empty snake body, a fresh board with
/// no free cell) panic instead of surfacing here, since continuing would
/// corrupt the game.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid settings file {path}: {source}")]
    Settings {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "grid {width}x{height} is too small; minimum is {}x{}",
        crate::config::MIN_GRID_WIDTH,
        crate::config::MIN_GRID_HEIGHT
    )]
    GridTooSmall { width: u16, height: u16 },

    #[error(transparent)]
    Io(#[from] io::Error),
}
