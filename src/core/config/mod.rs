pub mod config;

pub use config::{GameConfig, ProgressionConfig, SceneFlowConfig, WindowConfig};
