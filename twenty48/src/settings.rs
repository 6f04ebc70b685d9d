use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

pub const MAX_BOARD_SIDE: usize = 16;
pub const MAX_TICK_RATE: u32 = 240;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardSettings {
    pub rows: usize,
    pub cols: usize,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self { rows: 3, cols: 3 }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerSettings {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub board: BoardSettings,
    #[serde(default)]
    pub window: WindowSettings,
    #[serde(default = "default_tick_rate")]
    pub tick_rate: u32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            board: BoardSettings::default(),
            window: WindowSettings::default(),
            tick_rate: default_tick_rate(),
        }
    }
}

impl PlayerSettings {
    pub fn sanitized(mut self) -> Self {
        self.version = default_version();
        self.board.rows = self.board.rows.clamp(1, MAX_BOARD_SIDE);
        self.board.cols = self.board.cols.clamp(1, MAX_BOARD_SIDE);
        self.window.width = self.window.width.max(1);
        self.window.height = self.window.height.max(1);
        self.tick_rate = self.tick_rate.clamp(1, MAX_TICK_RATE);
        self
    }
}

fn default_version() -> u32 {
    1
}

fn default_tick_rate() -> u32 {
    engine::app::DEFAULT_TICK_RATE
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_env() -> Self {
        if let Some(explicit) = std::env::var_os("TWENTY48_SETTINGS_PATH") {
            return Self::new(explicit);
        }

        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME").map(|home| {
                    let mut p = PathBuf::from(home);
                    p.push(".config");
                    p
                })
            })
            .unwrap_or_else(|| PathBuf::from("."));

        let mut path = base;
        path.push("twenty48");
        path.push("settings.json");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads settings, falling back to defaults when the file is missing or unreadable.
    pub fn load(&self) -> PlayerSettings {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return PlayerSettings::default();
            }
            Err(err) => {
                warn!("could not read {}: {err}; using defaults", self.path.display());
                return PlayerSettings::default();
            }
        };
        match serde_json::from_slice::<PlayerSettings>(&bytes) {
            Ok(settings) => settings.sanitized(),
            Err(err) => {
                warn!("invalid settings in {}: {err}; using defaults", self.path.display());
                PlayerSettings::default()
            }
        }
    }

    pub fn save(&self, settings: &PlayerSettings) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(settings)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, text)
    }
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    fn unique_temp_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        std::env::temp_dir()
            .join(format!("twenty48_settings_{name}_{nanos}"))
            .join("settings.json")
    }

    #[test]
    fn sanitized_clamps_board_and_tick_rate() {
        let settings = PlayerSettings {
            version: 99,
            board: BoardSettings { rows: 0, cols: 100 },
            window: WindowSettings {
                width: 0,
                height: 300,
                vsync: false,
            },
            tick_rate: 0,
        }
        .sanitized();

        assert_eq!(settings.version, 1);
        assert_eq!(settings.board, BoardSettings { rows: 1, cols: MAX_BOARD_SIDE });
        assert_eq!(settings.window.width, 1);
        assert_eq!(settings.window.height, 300);
        assert_eq!(settings.tick_rate, 1);
    }

    #[test]
    fn serde_defaults_fill_missing_fields() {
        let parsed: PlayerSettings = serde_json::from_str(r#"{"board":{"rows":4,"cols":4}}"#)
            .expect("settings JSON should parse");
        assert_eq!(parsed.board, BoardSettings { rows: 4, cols: 4 });
        assert_eq!(parsed.window, WindowSettings::default());
        assert_eq!(parsed.tick_rate, 15);
        assert_eq!(parsed.version, 1);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let store = SettingsStore::new(unique_temp_path("missing"));
        assert_eq!(store.load(), PlayerSettings::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let path = unique_temp_path("round_trip");
        let store = SettingsStore::new(&path);
        let settings = PlayerSettings {
            board: BoardSettings { rows: 4, cols: 5 },
            tick_rate: 30,
            ..PlayerSettings::default()
        };

        store.save(&settings).expect("save settings");
        assert_eq!(store.load(), settings);

        let _ = fs::remove_dir_all(path.parent().expect("temp path has a parent"));
    }

    #[test]
    fn invalid_json_falls_back_to_defaults() {
        let path = unique_temp_path("invalid");
        fs::create_dir_all(path.parent().expect("temp path has a parent")).expect("create dir");
        fs::write(&path, "not json").expect("write file");

        assert_eq!(SettingsStore::new(&path).load(), PlayerSettings::default());

        let _ = fs::remove_dir_all(path.parent().expect("temp path has a parent"));
    }
}
