use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::observation::{DEFAULT_SECTIONS, SamplingPlan, SectionStrategy};
use crate::render::CanvasSize;
use crate::sampling::{DEFAULT_MAX_ATTEMPTS, DEFAULT_MIN_SEPARATION_M, SectionSampler};

fn default_sections() -> usize {
    DEFAULT_SECTIONS
}
fn default_strategy() -> SectionStrategy {
    SectionStrategy::Wedge
}
fn default_min_separation_m() -> f64 {
    DEFAULT_MIN_SEPARATION_M
}
fn default_max_attempts() -> usize {
    DEFAULT_MAX_ATTEMPTS
}
fn default_canvas_width() -> f64 {
    CanvasSize::default().max_width
}
fn default_canvas_max_height() -> f64 {
    CanvasSize::default().max_height
}
fn default_verbose() -> bool {
    false
}

#[derive(Debug, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub boundary: Option<PathBuf>,
    #[serde(default = "default_sections")]
    pub sections: usize,
    #[serde(default = "default_strategy")]
    pub strategy: SectionStrategy,
    #[serde(default = "default_min_separation_m")]
    pub min_separation_m: f64,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_canvas_width")]
    pub canvas_width: f64,
    #[serde(default = "default_canvas_max_height")]
    pub canvas_max_height: f64,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub svg: Option<PathBuf>,
    #[serde(default)]
    pub store_dir: Option<PathBuf>,
    #[serde(default)]
    pub farm_id: Option<u64>,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            boundary: None,
            sections: default_sections(),
            strategy: default_strategy(),
            min_separation_m: default_min_separation_m(),
            max_attempts: default_max_attempts(),
            seed: None,
            canvas_width: default_canvas_width(),
            canvas_max_height: default_canvas_max_height(),
            output: None,
            svg: None,
            store_dir: None,
            farm_id: None,
            verbose: default_verbose(),
        }
    }
}

impl FileConfig {
    /// First parseable config among the well-known locations
    pub fn load() -> Option<Self> {
        for path in get_config_paths() {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "failed to parse config file"
                        );
                    }
                }
            }
        }
        None
    }

    /// Read an explicitly requested config file
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents).context("Failed to parse config file")
    }

    pub fn plan(&self) -> SamplingPlan {
        SamplingPlan {
            strategy: self.strategy,
            sections: self.sections,
            sampler: SectionSampler::new(self.min_separation_m, self.max_attempts),
        }
    }

    pub fn canvas(&self) -> CanvasSize {
        CanvasSize {
            max_width: self.canvas_width,
            max_height: self.canvas_max_height,
        }
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("harvestmap.toml"));
    paths.push(PathBuf::from(".harvestmap.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("harvestmap").join("config.toml"));
        paths.push(config_dir.join("harvestmap.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".harvestmap.toml"));
        paths.push(home.join(".config").join("harvestmap").join("config.toml"));
    }

    paths
}
