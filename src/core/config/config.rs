use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

use crate::progression::DEFAULT_UNLOCK_THRESHOLD;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            title: "Regicide".into(),
            auto_close: 0.0,
        }
    }
}

/// Scene sets the progression machine swaps between: the home screens
/// shown at boot, and the board screens active during play.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SceneFlowConfig {
    pub home: Vec<String>,
    pub board: Vec<String>,
}

impl Default for SceneFlowConfig {
    fn default() -> Self {
        Self {
            home: vec!["scenes/home.scn.ron".into()],
            board: vec!["scenes/board.scn.ron".into()],
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ProgressionConfig {
    /// Total stars required before the queen can be challenged.
    pub unlock_threshold: u32,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            unlock_threshold: DEFAULT_UNLOCK_THRESHOLD,
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq, Default)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub scenes: SceneFlowConfig,
    pub progression: ProgressionConfig,
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
}
