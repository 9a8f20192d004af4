use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::error::Error;

const APP_DIR_NAME: &str = "serpent";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// How the edge of the grid behaves.
///
/// `Blocking` surrounds the playable interior with a wall ring that ends
/// the game on contact. `Wrapping` has no walls; coordinates continue
/// toroidally on the opposite edge.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    Blocking,
    Wrapping,
}

/// Smallest playable grid width.
///
/// The starting snake is built head-at-center extending left, so a
/// blocking grid must leave [`INITIAL_SNAKE_LENGTH`] cells between the
/// center column and the wall ring.
pub const MIN_GRID_WIDTH: u16 = 6;

/// Smallest playable grid height.
pub const MIN_GRID_HEIGHT: u16 = 4;

/// Default grid width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 30;

/// Default grid height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 15;

/// Segments the snake starts with.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 200;

/// Points granted for eating regular food.
pub const FOOD_POINTS: u32 = 1;

/// Points granted by a score-bonus power-up.
pub const SCORE_BONUS_POINTS: u32 = 2;

/// Invincibility duration in ticks when the power-up is picked up.
pub const INVINCIBILITY_DURATION_TICKS: u32 = 5;

/// A power-up spawns with probability 1-in-this per tick while none is active.
pub const POWER_UP_SPAWN_ONE_IN: u32 = 10;

/// Persistent user settings, overridden field-by-field by CLI flags.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub grid: GridSize,
    pub boundary: BoundaryPolicy,
    pub power_ups: bool,
    pub tick_interval_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: GridSize {
                width: DEFAULT_GRID_WIDTH,
                height: DEFAULT_GRID_HEIGHT,
            },
            boundary: BoundaryPolicy::Blocking,
            power_ups: true,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

/// Returns the platform-correct settings file path.
#[must_use]
pub fn settings_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    base
}

/// Loads settings from disk.
///
/// Returns defaults when the settings file does not yet exist. Returns
/// `Err` when the file exists but cannot be read or parsed, so the caller
/// can surface the problem before entering raw terminal mode.
pub fn load_settings() -> Result<Settings, Error> {
    load_settings_from_path(&settings_path())
}

fn load_settings_from_path(path: &Path) -> Result<Settings, Error> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(e) => return Err(e.into()),
    };

    let settings: Settings = serde_json::from_str(&raw).map_err(|source| Error::Settings {
        path: path.display().to_string(),
        source,
    })?;

    validate_grid(settings.grid)?;
    Ok(settings)
}

/// Checks that a grid is large enough to play on.
///
/// A grid below the minimum is a user-configuration error, surfaced as
/// [`Error::GridTooSmall`] rather than tripping engine invariants later.
pub fn validate_grid(size: GridSize) -> Result<(), Error> {
    if size.width < MIN_GRID_WIDTH || size.height < MIN_GRID_HEIGHT {
        return Err(Error::GridTooSmall {
            width: size.width,
            height: size.height,
        });
    }
    Ok(())
}

/// A color theme applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub name: &'static str,
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    pub food: Color,
    pub power_up: Color,
    pub border_fg: Color,
    pub hud_fg: Color,
    pub overlay_fg: Color,
}

/// Classic green snake on dark theme.
pub const THEME_CLASSIC: Theme = Theme {
    name: "Classic",
    snake_head: Color::White,
    snake_body: Color::Green,
    snake_tail: Color::DarkGray,
    food: Color::Red,
    power_up: Color::Magenta,
    border_fg: Color::White,
    hud_fg: Color::White,
    overlay_fg: Color::Yellow,
};

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use crate::error::Error;

    use super::{
        load_settings_from_path, validate_grid, BoundaryPolicy, GridSize, Settings,
        MIN_GRID_HEIGHT, MIN_GRID_WIDTH,
    };

    #[test]
    fn grid_size_total_cells() {
        let size = GridSize {
            width: 30,
            height: 15,
        };
        assert_eq!(size.total_cells(), 450);
    }

    #[test]
    fn missing_settings_file_returns_defaults() {
        let path = unique_test_path("missing");
        let settings = load_settings_from_path(&path).expect("missing file should yield defaults");

        assert_eq!(settings.grid.width, 30);
        assert_eq!(settings.boundary, BoundaryPolicy::Blocking);
        assert!(settings.power_ups);
    }

    #[test]
    fn partial_settings_file_fills_defaults() {
        let path = unique_test_path("partial");
        write_test_file(&path, r#"{"boundary": "wrapping"}"#);

        let settings = load_settings_from_path(&path).expect("partial file should parse");

        assert_eq!(settings.boundary, BoundaryPolicy::Wrapping);
        assert_eq!(settings.tick_interval_ms, 200);

        cleanup_test_path(&path);
    }

    #[test]
    fn malformed_settings_file_returns_error() {
        let path = unique_test_path("malformed");
        write_test_file(&path, "not-json");

        assert!(load_settings_from_path(&path).is_err());

        cleanup_test_path(&path);
    }

    #[test]
    fn degenerate_grid_in_settings_file_is_rejected() {
        let path = unique_test_path("tiny-grid");
        write_test_file(&path, r#"{"grid": {"width": 1, "height": 1}}"#);

        let result = load_settings_from_path(&path);
        assert!(matches!(
            result,
            Err(Error::GridTooSmall {
                width: 1,
                height: 1
            })
        ));

        cleanup_test_path(&path);
    }

    #[test]
    fn grid_validation_enforces_both_axes() {
        assert!(validate_grid(GridSize {
            width: MIN_GRID_WIDTH - 1,
            height: 10,
        })
        .is_err());
        assert!(validate_grid(GridSize {
            width: 10,
            height: MIN_GRID_HEIGHT - 1,
        })
        .is_err());
        assert!(validate_grid(GridSize {
            width: MIN_GRID_WIDTH,
            height: MIN_GRID_HEIGHT,
        })
        .is_ok());
    }

    #[test]
    fn settings_round_trip() {
        let settings = Settings {
            grid: GridSize {
                width: 20,
                height: 10,
            },
            boundary: BoundaryPolicy::Wrapping,
            power_ups: false,
            tick_interval_ms: 120,
        };

        let json = serde_json::to_string(&settings).expect("settings should serialize");
        let parsed: Settings = serde_json::from_str(&json).expect("settings should parse back");

        assert_eq!(parsed.grid, settings.grid);
        assert_eq!(parsed.boundary, settings.boundary);
        assert_eq!(parsed.power_ups, settings.power_ups);
        assert_eq!(parsed.tick_interval_ms, settings.tick_interval_ms);
    }

    fn write_test_file(path: &PathBuf, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(path, contents).expect("test file write should succeed");
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("serpent-settings-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
