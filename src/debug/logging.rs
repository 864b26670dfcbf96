use bevy::prelude::*;

use crate::progression::{Enemy, Progression};

#[derive(Resource)]
pub(super) struct ProgressionLog {
    pub interval: f32,
    pub accum: f32,
}

impl Default for ProgressionLog {
    fn default() -> Self {
        Self {
            interval: 1.0,
            accum: 0.0,
        }
    }
}

pub(super) fn progression_log_system(
    time: Res<Time>,
    mut log: ResMut<ProgressionLog>,
    st: Option<Res<Progression>>,
) {
    log.accum += time.delta_secs();
    if log.accum < log.interval {
        return;
    }
    log.accum = 0.0;
    let Some(st) = st else { return };
    let per_enemy: Vec<String> = Enemy::ROSTER
        .iter()
        .filter(|e| !e.is_tutorial())
        .map(|e| format!("{}={}", e.label(), st.star_count(*e)))
        .collect();
    info!(
        "PROG phase={:?} stars={} [{}] tutorial_done={}",
        st.phase(),
        st.total_stars(),
        per_enemy.join(" "),
        st.tutorial_success()
    );
}
