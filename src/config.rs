use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ratatui::style::Color;
use serde::Deserialize;
use thiserror::Error;

const APP_DIR_NAME: &str = "console-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
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

    /// Widens the area to at least `MIN_PLAY_SIDE` columns and one row, the
    /// smallest board the horizontal starting snake fits inside.
    #[must_use]
    pub fn fit_for_seed(self) -> Self {
        Self {
            width: self.width.max(MIN_PLAY_SIDE),
            height: self.height.max(1),
        }
    }
}

/// Default play-area width (walls excluded).
pub const DEFAULT_PLAY_WIDTH: u16 = 20;

/// Default play-area height (walls excluded).
pub const DEFAULT_PLAY_HEIGHT: u16 = 20;

/// Smallest play-area side that fits the seeded snake plus one cell of travel.
pub const MIN_PLAY_SIDE: u16 = 4;

/// Largest accepted play-area side.
pub const MAX_PLAY_SIDE: u16 = 200;

/// Initial tick delay in milliseconds.
pub const DEFAULT_SPEED_MS: u64 = 120;

/// The tick delay never drops below this.
pub const MIN_SPEED_MS: u64 = 30;

/// Slowest accepted initial tick delay.
pub const MAX_SPEED_MS: u64 = 2_000;

/// Tick delay removed at each speed threshold.
pub const SPEED_STEP_MS: u64 = 10;

/// Points granted per food.
pub const POINTS_PER_FOOD: u32 = 10;

/// Every multiple of this score speeds the game up once.
pub const POINTS_PER_SPEED_UP: u32 = 50;

/// A color theme applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub name: &'static str,
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    pub food: Color,
    pub wall_fg: Color,
    pub wall_bg: Color,
    pub play_bg: Color,
    pub hud_score: Color,
    pub hud_speed: Color,
    pub hud_help: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

/// Green snake, red food, white walls.
pub const THEME_CLASSIC: Theme = Theme {
    name: "Classic",
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    snake_tail: Color::Green,
    food: Color::LightRed,
    wall_fg: Color::Gray,
    wall_bg: Color::Black,
    play_bg: Color::Black,
    hud_score: Color::LightGreen,
    hud_speed: Color::LightBlue,
    hud_help: Color::LightYellow,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
};

/// Ocean cyan theme.
pub const THEME_OCEAN: Theme = Theme {
    name: "Ocean",
    snake_head: Color::White,
    snake_body: Color::Cyan,
    snake_tail: Color::DarkGray,
    food: Color::Yellow,
    wall_fg: Color::Cyan,
    wall_bg: Color::DarkGray,
    play_bg: Color::Black,
    hud_score: Color::Cyan,
    hud_speed: Color::White,
    hud_help: Color::DarkGray,
    menu_title: Color::Cyan,
    menu_footer: Color::DarkGray,
};

/// Neon magenta/yellow theme.
pub const THEME_NEON: Theme = Theme {
    name: "Neon",
    snake_head: Color::White,
    snake_body: Color::Magenta,
    snake_tail: Color::DarkGray,
    food: Color::Yellow,
    wall_fg: Color::Magenta,
    wall_bg: Color::Black,
    play_bg: Color::Black,
    hud_score: Color::Magenta,
    hud_speed: Color::Yellow,
    hud_help: Color::DarkGray,
    menu_title: Color::Magenta,
    menu_footer: Color::DarkGray,
};

/// All available themes in cycle order.
pub const THEMES: &[Theme] = &[THEME_CLASSIC, THEME_OCEAN, THEME_NEON];

/// Looks up a theme by case-insensitive name.
#[must_use]
pub fn theme_by_name(name: &str) -> Option<&'static Theme> {
    THEMES
        .iter()
        .find(|theme| theme.name.eq_ignore_ascii_case(name))
}

/// Failures while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("play area {width}x{height} is outside {min}..={max} on some side")]
    PlayAreaOutOfRange {
        width: u16,
        height: u16,
        min: u16,
        max: u16,
    },
    #[error("initial speed {speed_ms}ms must be between {min}ms and {max}ms")]
    SpeedOutOfRange { speed_ms: u64, min: u64, max: u64 },
    #[error("unknown theme {0:?}")]
    UnknownTheme(String),
}

/// Optional settings read from the JSON config file.
#[derive(Debug, Clone, Default, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub speed_ms: Option<u64>,
    pub seed: Option<u64>,
    pub theme: Option<String>,
}

/// Command-line overrides; `None` keeps the file or built-in value.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Overrides {
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub speed_ms: Option<u64>,
    pub seed: Option<u64>,
    pub theme: Option<String>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, Copy)]
pub struct GameConfig {
    pub play_area: GridSize,
    pub speed_ms: u64,
    pub seed: Option<u64>,
    pub theme: &'static Theme,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            play_area: GridSize {
                width: DEFAULT_PLAY_WIDTH,
                height: DEFAULT_PLAY_HEIGHT,
            },
            speed_ms: DEFAULT_SPEED_MS,
            seed: None,
            theme: &THEME_CLASSIC,
        }
    }
}

impl GameConfig {
    /// Layers built-in defaults, then `file`, then `overrides`, and validates.
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let width = overrides
            .width
            .or(file.width)
            .unwrap_or(defaults.play_area.width);
        let height = overrides
            .height
            .or(file.height)
            .unwrap_or(defaults.play_area.height);
        let speed_ms = overrides
            .speed_ms
            .or(file.speed_ms)
            .unwrap_or(defaults.speed_ms);
        let theme = match overrides.theme.or(file.theme) {
            Some(name) => theme_by_name(&name).ok_or(ConfigError::UnknownTheme(name))?,
            None => defaults.theme,
        };

        let side_ok = |side: u16| (MIN_PLAY_SIDE..=MAX_PLAY_SIDE).contains(&side);
        if !side_ok(width) || !side_ok(height) {
            return Err(ConfigError::PlayAreaOutOfRange {
                width,
                height,
                min: MIN_PLAY_SIDE,
                max: MAX_PLAY_SIDE,
            });
        }

        if !(MIN_SPEED_MS..=MAX_SPEED_MS).contains(&speed_ms) {
            return Err(ConfigError::SpeedOutOfRange {
                speed_ms,
                min: MIN_SPEED_MS,
                max: MAX_SPEED_MS,
            });
        }

        Ok(Self {
            play_area: GridSize { width, height },
            speed_ms,
            seed: overrides.seed.or(file.seed),
            theme,
        })
    }
}

/// Returns the platform-correct default config file path.
#[must_use]
pub fn default_config_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    base
}

/// Loads the config file at `path`, or the default location when `None`.
///
/// A missing default file yields `FileConfig::default()`; a missing explicit
/// file is an error.
pub fn load_file_config(path: Option<&Path>) -> Result<FileConfig, ConfigError> {
    match path {
        Some(path) => read_file_config(path),
        None => {
            let path = default_config_path();
            match read_file_config(&path) {
                Err(ConfigError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                    Ok(FileConfig::default())
                }
                other => other,
            }
        }
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
