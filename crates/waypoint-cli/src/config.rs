//! Simulation configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use waypoint_nav::{FollowerConfig, SearchFilter};

/// Simulation settings, loaded from .waypoint/config.yaml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Travel speed in units per second
    #[serde(default = "default_speed")]
    pub speed: f32,

    /// Seconds per simulation tick
    #[serde(default = "default_dt")]
    pub dt: f32,

    /// Stop a simulation after this many ticks
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u32,

    /// Waypoint categories usable by route queries
    #[serde(default)]
    pub filter: SearchFilter,

    /// Seed for wandering and spawn selection
    #[serde(default)]
    pub seed: u64,

    /// Follower tuning
    #[serde(default)]
    pub follower: FollowerConfig,
}

fn default_speed() -> f32 {
    1.0
}
fn default_dt() -> f32 {
    1.0 / 30.0
}
fn default_max_ticks() -> u32 {
    10_000
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            dt: default_dt(),
            max_ticks: default_max_ticks(),
            filter: SearchFilter::default(),
            seed: 0,
            follower: FollowerConfig::default(),
        }
    }
}

impl SimConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        Ok(config)
    }

    /// Load from project root (looks for .waypoint/config.yaml)
    pub fn load_from_project(project_root: &Path) -> Result<Self> {
        let config_path = Self::project_path(project_root);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn project_path(project_root: &Path) -> PathBuf {
        project_root.join(".waypoint/config.yaml")
    }
}
