//! Chart window settings
//!
//! Optional JSON file, looked up through `RK4_PLOT_CONFIG` and then
//! `rk4_plot.json` in the working directory. Missing or unreadable files fall
//! back to the defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming a settings file
pub const CONFIG_ENV: &str = "RK4_PLOT_CONFIG";

/// Settings file looked up in the working directory
pub const CONFIG_FILE: &str = "rk4_plot.json";

pub const DEFAULT_WIDTH: u32 = 1024;
pub const DEFAULT_HEIGHT: u32 = 768;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    /// Window and chart width [px]
    pub width: u32,
    /// Window and chart height [px]
    pub height: u32,
    /// Also write the rendered SVG here
    pub save_svg: Option<PathBuf>,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            save_svg: None,
        }
    }
}

impl ViewerSettings {
    /// Load settings from the environment or the working directory
    pub fn load() -> Self {
        let mut config_paths = Vec::new();
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            config_paths.push(PathBuf::from(path));
        }
        config_paths.push(PathBuf::from(CONFIG_FILE));

        Self::from_paths(&config_paths)
    }

    /// First readable file wins; a file that fails to parse is skipped
    pub fn from_paths<P: AsRef<Path>>(config_paths: &[P]) -> Self {
        for path in config_paths {
            let path = path.as_ref();
            if let Ok(content) = fs::read_to_string(path) {
                match serde_json::from_str::<ViewerSettings>(&content) {
                    Ok(settings) => {
                        log::info!("[config] loaded viewer settings from {}", path.display());
                        return settings.sanitized();
                    }
                    Err(e) => {
                        log::warn!("[config] ignoring {}: {}", path.display(), e);
                    }
                }
            }
        }

        Self::default()
    }

    fn sanitized(mut self) -> Self {
        if self.width == 0 {
            self.width = DEFAULT_WIDTH;
        }
        if self.height == 0 {
            self.height = DEFAULT_HEIGHT;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_when_no_file() {
        let dir = tempdir().unwrap();
        let settings = ViewerSettings::from_paths(&[dir.path().join("missing.json")]);
        assert_eq!(settings, ViewerSettings::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{ "width": 1600 }"#).unwrap();

        let settings = ViewerSettings::from_paths(&[path]);
        assert_eq!(settings.width, 1600);
        assert_eq!(settings.height, DEFAULT_HEIGHT);
        assert!(settings.save_svg.is_none());
    }

    #[test]
    fn test_bad_file_falls_through() {
        let dir = tempdir().unwrap();
        let bad = dir.path().join("bad.json");
        let good = dir.path().join("good.json");
        fs::write(&bad, "{ width: ").unwrap();
        fs::write(&good, r#"{ "height": 500, "save_svg": "out.svg" }"#).unwrap();

        let settings = ViewerSettings::from_paths(&[bad, good]);
        assert_eq!(settings.height, 500);
        assert_eq!(settings.save_svg, Some(PathBuf::from("out.svg")));
    }

    #[test]
    fn test_zero_size_is_replaced() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("zero.json");
        fs::write(&path, r#"{ "width": 0, "height": 0 }"#).unwrap();

        let settings = ViewerSettings::from_paths(&[path]);
        assert_eq!((settings.width, settings.height), (DEFAULT_WIDTH, DEFAULT_HEIGHT));
    }
}
