use bevy::prelude::*;

use crate::core::events::{EventBus, GameEvent};
use crate::progression::{dismiss_score_screen, submit_enemy_choice, Enemy, Phase, Progression};

/// Maps raw keys to progression commands depending on the current phase.
/// Space/Enter advances from the start screen or dismisses the score
/// screen; digits pick an enemy while choosing. No progression logic here.
pub(super) fn hud_key_input(
    keys: Res<ButtonInput<KeyCode>>,
    st: Option<Res<Progression>>,
    bus: Option<ResMut<EventBus>>,
) {
    let (Some(st), Some(mut bus)) = (st, bus) else {
        return;
    };
    let confirm = keys.just_pressed(KeyCode::Space) || keys.just_pressed(KeyCode::Enter);
    match st.phase() {
        Phase::Start => {
            if confirm {
                bus.publish(GameEvent::AdvanceRequested);
            }
        }
        Phase::ShowScore => {
            if confirm {
                dismiss_score_screen(&mut bus);
            }
        }
        Phase::ChooseEnemy => {
            for (i, enemy) in Enemy::ROSTER.iter().enumerate() {
                if enemy.is_tutorial() {
                    continue;
                }
                let keycode = match i {
                    1 => KeyCode::Digit1,
                    2 => KeyCode::Digit2,
                    3 => KeyCode::Digit3,
                    4 => KeyCode::Digit4,
                    _ => continue,
                };
                if !keys.just_pressed(keycode) {
                    continue;
                }
                if *enemy == Enemy::FINAL && !st.final_enemy_unlocked() {
                    info!(
                        target: "hud",
                        "the queen is locked ({}/{} stars)",
                        st.total_stars(),
                        st.unlock_threshold()
                    );
                    break;
                }
                info!(target: "hud", "player chose the {}", enemy.label());
                submit_enemy_choice(&mut bus, *enemy);
                break;
            }
        }
        _ => {}
    }
}
