use bevy::prelude::*;

use crate::core::config::GameConfig;

/// Counts down `window.autoClose` seconds, then requests exit. Armed only
/// when the config asks for it; headless smoke runs use this to terminate.
#[derive(Resource, Deref, DerefMut)]
struct SessionTimer(Timer);

pub struct AutoClosePlugin;

impl Plugin for AutoClosePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, arm_session_timer)
            .add_systems(Update, expire_session);
    }
}

fn arm_session_timer(mut commands: Commands, cfg: Option<Res<GameConfig>>) {
    let secs = cfg.map(|c| c.window.auto_close).unwrap_or(0.0);
    if secs <= 0.0 {
        return;
    }
    info!(target: "session", "auto close armed: {secs}s");
    commands.insert_resource(SessionTimer(Timer::from_seconds(secs, TimerMode::Once)));
}

fn expire_session(
    time: Res<Time>,
    timer: Option<ResMut<SessionTimer>>,
    mut ev_exit: EventWriter<AppExit>,
) {
    let Some(mut timer) = timer else { return };
    if timer.tick(time.delta()).just_finished() {
        info!(target: "session", "auto close expired after {:.1}s; exiting", timer.elapsed_secs());
        ev_exit.write(AppExit::Success);
    }
}
