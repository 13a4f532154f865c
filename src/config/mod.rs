use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::FillMode;
use crate::editor::Palette;

fn default_width() -> usize {
    800
}
fn default_height() -> usize {
    600
}
fn default_fill_mode() -> FillMode {
    FillMode::SeedFill
}
fn default_verbose() -> bool {
    false
}

#[derive(Debug, Deserialize)]
pub struct FileConfig {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default)]
    pub palette: Palette,
    /// Fill mode of newly finished polygons
    #[serde(default = "default_fill_mode")]
    pub fill_mode: FillMode,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            palette: Palette::default(),
            fill_mode: default_fill_mode(),
            verbose: default_verbose(),
            output: None,
        }
    }
}

impl FileConfig {
    /// First parseable config file on the search path
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => {
                        tracing::debug!(path = %path.display(), "loaded config");
                        return Some(config);
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "failed to parse config file");
                    }
                }
            }
        }
        None
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("polytrace.toml"));
    paths.push(PathBuf::from(".polytrace.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("polytrace").join("config.toml"));
        paths.push(config_dir.join("polytrace.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".polytrace.toml"));
    }

    paths
}
