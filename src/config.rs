//! Application configuration, read from `covid_story.json` when present.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

pub const CONFIG_FILE: &str = "covid_story.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryConfig {
    pub dataset_path: PathBuf,
    pub window_width: f32,
    pub window_height: f32,
    /// Scene fade duration in seconds.
    pub transition_secs: f32,
    pub export_width: u32,
    pub export_height: u32,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("data/new-york-data.csv"),
            window_width: 1400.0,
            window_height: 800.0,
            transition_secs: 0.5,
            export_width: 1200,
            export_height: 600,
        }
    }
}

impl StoryConfig {
    /// Load `covid_story.json` from the working directory, or defaults when absent.
    pub fn load() -> Result<Self> {
        let path = Path::new(CONFIG_FILE);
        if path.is_file() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_json(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.export_width >= 200 && self.export_height >= 100,
            "export size {}x{} is too small",
            self.export_width,
            self.export_height
        );
        anyhow::ensure!(
            self.transition_secs >= 0.0,
            "transition_secs must not be negative"
        );
        Ok(())
    }
}
