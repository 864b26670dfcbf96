pub mod app;
pub mod core;
pub mod debug;
pub mod progression;
pub mod scenes;
pub mod ui;

// Curated re-exports
pub use crate::app::game::GamePlugin;
pub use crate::core::config::{GameConfig, WindowConfig};
pub use crate::core::events::{
    BusEvent, EventBus, EventBusAppExt, EventBusPlugin, EventFlowSet, EventHandler, EventResult,
    EventSink, GameEvent, HandlerRegistry, JournalEntry, TickCounter, MAX_DISPATCH_DEPTH,
};
pub use crate::progression::{
    dismiss_score_screen, submit_enemy_choice, Enemy, Phase, Progression, ProgressionPlugin,
    ScoreKind, ScoreResult, SCENE_SETTLE_TICKS,
};
pub use crate::scenes::{SceneFlowPlugin, SceneTransitions};
