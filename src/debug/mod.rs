//! Debug module: feature gated board gizmos + progression logging.
//! Built only when compiled with the `debug` feature (default on).

#[cfg(feature = "debug")]
mod board_gizmos;
#[cfg(feature = "debug")]
mod logging;

#[cfg(feature = "debug")]
pub use board_gizmos::BOARD_SIZE;

#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
pub struct DebugPlugin;

#[cfg(feature = "debug")]
impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<logging::ProgressionLog>().add_systems(
            Update,
            (
                board_gizmos::draw_board_grid,
                logging::progression_log_system,
            ),
        );
    }
}

#[cfg(not(feature = "debug"))]
pub struct DebugPlugin;

#[cfg(not(feature = "debug"))]
impl bevy::prelude::Plugin for DebugPlugin {
    fn build(&self, _app: &mut bevy::prelude::App) {}
}
