//! Bot configuration loaded from `config.toml`.
//!
//! Everything operational lives here: where photos and the font come from,
//! where finished posts go, the post canvas, and the fitting search bounds.
//! All keys are optional — defaults below — and unknown keys are rejected to
//! catch typos early.
//!
//! ```toml
//! photo_dir = "photos"        # Background photo pool
//! font_path = "fonts/thai.ttf"
//! out_dir = "out"             # Where DirPublisher drops finished posts
//! watermark = "@arunsawat"    # Fixed watermark string ("" disables it)
//!
//! [canvas]
//! width = 1200                # Post canvas, photo is fill-cropped to this
//! height = 675
//!
//! [fitting]
//! start_size = 80             # First font size tried, points
//! step = 2                    # Shrink per attempt
//! floor = 8                   # Smallest size; below this the run aborts
//!
//! [search]
//! max_attempts = 5            # Image-query resamples before giving up
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fitting::SizeSearch;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("config validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct BotConfig {
    pub photo_dir: PathBuf,
    pub font_path: PathBuf,
    pub out_dir: PathBuf,
    pub watermark: String,
    pub canvas: CanvasConfig,
    pub fitting: FittingConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct FittingConfig {
    pub start_size: u32,
    pub step: u32,
    pub floor: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SearchConfig {
    pub max_attempts: u32,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            photo_dir: PathBuf::from("photos"),
            font_path: PathBuf::from("fonts/thai.ttf"),
            out_dir: PathBuf::from("out"),
            watermark: "@arunsawat".to_string(),
            canvas: CanvasConfig::default(),
            fitting: FittingConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self { width: 1200, height: 675 }
    }
}

impl Default for FittingConfig {
    fn default() -> Self {
        let s = SizeSearch::default();
        Self { start_size: s.start, step: s.step, floor: s.floor }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_attempts: 5 }
    }
}

impl BotConfig {
    /// Load and validate a config file. A missing file is fine — defaults
    /// apply — but a present-and-broken one is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas.width < 200 || self.canvas.height < 200 {
            return Err(ConfigError::Validation(format!(
                "canvas must be at least 200x200, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }
        if self.fitting.floor == 0 || self.fitting.step == 0 {
            return Err(ConfigError::Validation(
                "fitting floor and step must be positive".to_string(),
            ));
        }
        if self.fitting.start_size < self.fitting.floor {
            return Err(ConfigError::Validation(format!(
                "fitting start_size {} is below floor {}",
                self.fitting.start_size, self.fitting.floor
            )));
        }
        if self.search.max_attempts == 0 {
            return Err(ConfigError::Validation(
                "search max_attempts must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn size_search(&self) -> SizeSearch {
        SizeSearch {
            start: self.fitting.start_size,
            step: self.fitting.step,
            floor: self.fitting.floor,
        }
    }
}

/// The documented stock config, printable via `arunsawat gen-config`.
pub fn stock_config_toml() -> String {
    let doc = r#"# arunsawat configuration. All keys optional; defaults shown.

# Background photo pool (jpg/png/webp, picked per run)
photo_dir = "photos"

# Font covering the Thai script
font_path = "fonts/thai.ttf"

# Where finished posts are written (image + caption + receipt)
out_dir = "out"

# Fixed watermark string, bottom-right. Empty string disables it.
watermark = "@arunsawat"

[canvas]
width = 1200    # Post canvas; the photo is fill-resized then center-cropped
height = 675

[fitting]
start_size = 80 # First font size tried, in points
step = 2        # Shrink per attempt
floor = 8       # Smallest size ever used; an unfit floor aborts the run

[search]
max_attempts = 5 # Image-query resamples before the run fails
"#;
    doc.to_string()
}
