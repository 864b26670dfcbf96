use bevy::prelude::*;

use crate::core::events::EventBusPlugin;
use crate::debug::DebugPlugin;
use crate::progression::ProgressionPlugin;
use crate::scenes::SceneFlowPlugin;
use crate::ui::HudPlugin;

use super::auto_close::AutoClosePlugin;

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            // Bus first so the handler registry exists before registration.
            EventBusPlugin::default(),
            SceneFlowPlugin,
            ProgressionPlugin,
            HudPlugin,
            DebugPlugin,
            AutoClosePlugin,
        ));
    }
}
