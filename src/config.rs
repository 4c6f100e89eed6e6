use anyhow::{Context, Result};
use facemash_vision::Canvas;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub static CONFIG_PATH: Lazy<&'static Path> =
    Lazy::new(|| Path::new(option_env!("FACEMASH_CONFIG_PATH").unwrap_or("facemash.toml")));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding `images/`, `collages/` and the keypoint file
    pub root: PathBuf,
    pub keypoints_file: String,
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
    /// Background color offered when the prompt is left empty
    pub default_color: String,
}

impl Default for Config {
    fn default() -> Self {
        let canvas = Canvas::default();
        Self {
            root: PathBuf::from("."),
            keypoints_file: "face_keypoints.json".to_string(),
            canvas_width: canvas.width,
            canvas_height: canvas.height,
            seed: None,
            default_color: "black".to_string(),
        }
    }
}

impl Config {
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.canvas_width, self.canvas_height)
    }
}

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = path.unwrap_or(&CONFIG_PATH);
    if !path.exists() {
        return Ok(Config::default());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config at {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
}

pub fn save_config(cfg: &Config, path: Option<&Path>) -> Result<()> {
    let path = path.unwrap_or(&CONFIG_PATH);
    let data = toml::to_string_pretty(cfg)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, data)?;
    Ok(())
}
