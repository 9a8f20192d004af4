use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "serpent";
const SCORE_FILE_NAME: &str = "scores.log";
const SCORE_LINE_PREFIX: &str = "Score: ";

/// Returns the platform-correct score log path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

/// Appends one finished game's score to the log.
///
/// The log is append-only plain text, one `Score: <integer>` line per
/// game. A write failure here is non-fatal; the caller reports it and the
/// game-over flow proceeds regardless.
pub fn append_score(score: u32) -> io::Result<()> {
    append_score_to_path(&scores_path(), score)
}

/// Returns the highest score recorded so far, or 0 on first run.
pub fn high_score() -> io::Result<u32> {
    high_score_from_path(&scores_path())
}

fn append_score_to_path(path: &Path, score: u32) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{SCORE_LINE_PREFIX}{score}")
}

fn high_score_from_path(path: &Path) -> io::Result<u32> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e),
    };

    // Lines that don't parse are skipped rather than failing the read;
    // a partially corrupt log should not block a new game.
    Ok(raw
        .lines()
        .filter_map(|line| line.strip_prefix(SCORE_LINE_PREFIX))
        .filter_map(|value| value.trim().parse::<u32>().ok())
        .max()
        .unwrap_or(0))
}
