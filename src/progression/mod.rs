pub mod controller;
pub mod enemy;
pub mod phase;
pub mod score;

pub use controller::{
    dismiss_score_screen, submit_enemy_choice, PendingPlay, Progression, ProgressionHandler,
    ProgressionPlugin, SCENE_SETTLE_TICKS,
};
pub use enemy::Enemy;
pub use phase::Phase;
pub use score::{ScoreKind, ScoreResult, ScoreTracker, DEFAULT_UNLOCK_THRESHOLD, MAX_STARS};
