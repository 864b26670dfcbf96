use bevy::prelude::*;
use bevy::ui::{AlignItems, FlexDirection, JustifyContent, Node};

use crate::core::events::{BusEvent, EventFlowSet, GameEvent};
use crate::progression::{Enemy, Phase, Progression, ScoreKind};

use super::input::hud_key_input;

/// Visibility-only HUD: panels react to bus events and progression queries,
/// never the other way around.
pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hud).add_systems(
            Update,
            (
                hud_key_input,
                react_to_bus,
                sync_tutorial_panel,
                refresh_choose_text,
                refresh_score_text,
            )
                .in_set(EventFlowSet::Present),
        );
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Tutorial,
    ChooseEnemy,
    Score,
    Victory,
}

#[derive(Component)]
struct ChooseText;

#[derive(Component)]
struct ScoreText;

fn panel_root(kind: Panel) -> (Panel, Node, BackgroundColor, Visibility) {
    (
        kind,
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            row_gap: Val::Px(8.0),
            ..default()
        },
        BackgroundColor(Color::srgba(0.02, 0.02, 0.05, 0.85)),
        Visibility::Hidden,
    )
}

fn spawn_hud(mut commands: Commands) {
    commands.spawn(panel_root(Panel::Tutorial)).with_children(|p| {
        p.spawn(Text::new(
            "TUTORIAL\nDefeat the pawn to unlock the roster.",
        ));
    });
    commands
        .spawn(panel_root(Panel::ChooseEnemy))
        .with_children(|p| {
            p.spawn((ChooseText, Text::new("")));
        });
    commands.spawn(panel_root(Panel::Score)).with_children(|p| {
        p.spawn((ScoreText, Text::new("")));
    });
    commands.spawn(panel_root(Panel::Victory)).with_children(|p| {
        p.spawn(Text::new("VICTORY\nThe queen has fallen."));
    });
}

fn set_only(panels: &mut Query<(&Panel, &mut Visibility)>, shown: Option<Panel>) {
    for (kind, mut vis) in panels.iter_mut() {
        // The tutorial banner tracks the phase, not events.
        if *kind == Panel::Tutorial {
            continue;
        }
        let next = if Some(*kind) == shown {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        vis.set_if_neq(next);
    }
}

fn react_to_bus(
    mut events: EventReader<BusEvent>,
    mut panels: Query<(&Panel, &mut Visibility)>,
) {
    for BusEvent(ev) in events.read() {
        match ev {
            GameEvent::ShowChooseEnemyScreen => set_only(&mut panels, Some(Panel::ChooseEnemy)),
            GameEvent::ShowScoreScreen => set_only(&mut panels, Some(Panel::Score)),
            GameEvent::VictoryReached => set_only(&mut panels, Some(Panel::Victory)),
            GameEvent::BeginPlay(_) => set_only(&mut panels, None),
            _ => {}
        }
    }
}

fn sync_tutorial_panel(
    st: Option<Res<Progression>>,
    mut panels: Query<(&Panel, &mut Visibility)>,
) {
    let in_tutorial = st.map(|s| s.phase() == Phase::Tutorial).unwrap_or(false);
    for (kind, mut vis) in panels.iter_mut() {
        if *kind == Panel::Tutorial {
            vis.set_if_neq(if in_tutorial {
                Visibility::Visible
            } else {
                Visibility::Hidden
            });
        }
    }
}

fn refresh_choose_text(
    st: Option<Res<Progression>>,
    mut q_text: Query<&mut Text, With<ChooseText>>,
) {
    let Some(st) = st else { return };
    let Ok(mut text) = q_text.single_mut() else { return };
    let mut s = String::from("CHOOSE YOUR ENEMY\n");
    for (i, enemy) in Enemy::ROSTER.iter().enumerate() {
        if enemy.is_tutorial() {
            continue;
        }
        let lock = if *enemy == Enemy::FINAL && !st.final_enemy_unlocked() {
            " [locked]"
        } else {
            ""
        };
        s.push_str(&format!(
            "  {}: {} ({}/3){}\n",
            i,
            enemy.label(),
            st.star_count(*enemy),
            lock
        ));
    }
    s.push_str(&format!("total stars: {}\n", st.total_stars()));
    if text.as_str() != s {
        *text = Text::new(s);
    }
}

fn refresh_score_text(
    st: Option<Res<Progression>>,
    mut q_text: Query<&mut Text, With<ScoreText>>,
) {
    let Some(st) = st else { return };
    let Ok(mut text) = q_text.single_mut() else { return };
    let result = st.last_score();
    let headline = match result.kind {
        ScoreKind::Fail => "FAILED",
        ScoreKind::Bronze => "BRONZE",
        ScoreKind::Silver => "SILVER",
        ScoreKind::Gold => "GOLD",
        ScoreKind::Perfect => "PERFECT",
    };
    let s = format!(
        "{headline}\nstars: {}/3\ntotal: {}",
        result.stars,
        st.total_stars()
    );
    if text.as_str() != s {
        *text = Text::new(s);
    }
}
