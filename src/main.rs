use bevy::prelude::*;

use regicide::{GameConfig, GamePlugin};

fn main() {
    // Load configuration (fall back to defaults if missing or malformed)
    let (cfg, err) = GameConfig::load_or_default("assets/config/game.ron");
    if let Some(e) = err {
        eprintln!("config: {e}; using defaults");
    }
    App::new()
        .insert_resource(cfg.clone())
        .add_plugins(
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: cfg.window.title.clone(),
                    resolution: (cfg.window.width, cfg.window.height).into(),
                    resizable: true,
                    ..default()
                }),
                ..default()
            }),
        )
        .add_plugins(GamePlugin)
        .run();
}
