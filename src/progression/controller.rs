//! The progression state machine: the one place where order-of-events
//! matters and where persisted score state must survive scene swaps.
//! Everything here reacts to exactly one bus event per transition; the only
//! polling exception is the bootstrap out of `Unknown`, because nothing else
//! triggers the very first scene load.

use bevy::prelude::*;

use crate::core::config::GameConfig;
use crate::core::events::{
    EventBus, EventBusAppExt, EventFlowSet, EventHandler, EventResult, EventSink, GameEvent,
    TickCounter,
};
use crate::scenes::{SceneFlowSet, SceneTransitions};

use super::enemy::Enemy;
use super::phase::Phase;
use super::score::{ScoreResult, ScoreTracker, DEFAULT_UNLOCK_THRESHOLD};

/// Ticks to let a freshly loaded scene settle before play begins. The scene
/// service reports "handles spawned", not "entities initialized", so the
/// machine waits out two scheduler ticks on top of that signal. Inherited
/// heuristic; there is no readiness callback to replace it with.
pub const SCENE_SETTLE_TICKS: u64 = 2;

/// The machine's persisted aggregate. Exclusively mutated by the handler
/// and the bootstrap system in this module; collaborators read the query
/// methods or watch the bus.
#[derive(Resource, Debug)]
pub struct Progression {
    phase: Phase,
    current_enemy: Enemy,
    last_score: ScoreResult,
    scores: ScoreTracker,
}

impl Default for Progression {
    fn default() -> Self {
        Self::new(DEFAULT_UNLOCK_THRESHOLD)
    }
}

impl Progression {
    pub fn new(unlock_threshold: u32) -> Self {
        Self {
            phase: Phase::Unknown,
            current_enemy: Enemy::Pawn,
            last_score: ScoreResult::FAIL,
            scores: ScoreTracker::new(unlock_threshold),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_enemy(&self) -> Enemy {
        self.current_enemy
    }

    pub fn last_score(&self) -> ScoreResult {
        self.last_score
    }

    pub fn tutorial_success(&self) -> bool {
        self.scores.tutorial_success()
    }

    pub fn total_stars(&self) -> u32 {
        self.scores.total_stars()
    }

    pub fn star_count(&self, enemy: Enemy) -> u8 {
        self.scores.star_count(enemy)
    }

    pub fn final_enemy_unlocked(&self) -> bool {
        self.scores.is_unlocked()
    }

    pub fn final_enemy_defeated(&self) -> bool {
        self.scores.is_final_enemy_defeated()
    }

    pub fn unlock_threshold(&self) -> u32 {
        self.scores.unlock_threshold()
    }
}

/// A `BeginPlay` waiting out the scene settle delay.
#[derive(Resource, Debug)]
pub struct PendingPlay {
    pub ready_tick: u64,
    pub enemy: Enemy,
}

/// UI command: the player picked an enemy on the choose screen.
pub fn submit_enemy_choice(bus: &mut EventBus, enemy: Enemy) {
    bus.publish(GameEvent::EnemySelected(enemy));
}

/// UI command: the player dismissed the score screen.
pub fn dismiss_score_screen(bus: &mut EventBus) {
    bus.publish(GameEvent::ScoreScreenDismissed);
}

pub struct ProgressionHandler;

impl EventHandler for ProgressionHandler {
    fn name(&self) -> &'static str {
        "progression"
    }

    fn handle(&mut self, ev: &GameEvent, world: &mut World, out: &mut EventSink) -> EventResult {
        // Victory is terminal: later events are ignored, never a crash.
        if world.resource::<Progression>().phase == Phase::Victory {
            debug!(target: "progression", "victory reached; ignoring {ev:?}");
            return EventResult::Ignored;
        }
        match *ev {
            GameEvent::AdvanceRequested => advance(world),
            GameEvent::SceneTransitionFinished => schedule_play(world),
            GameEvent::ScoreAnimationFinished => show_score(world, out),
            GameEvent::EnemySelected(enemy) => select_enemy(world, out, enemy),
            GameEvent::LevelLost => level_lost(world),
            GameEvent::LevelWon(result) => level_won(world, result),
            GameEvent::ScoreScreenDismissed => dismiss_score(world, out),
            // Produced by this machine; nothing to consume.
            GameEvent::BeginPlay(_)
            | GameEvent::ShowChooseEnemyScreen
            | GameEvent::ShowScoreScreen
            | GameEvent::VictoryReached => EventResult::Ignored,
        }
    }
}

fn ignored(phase: Phase, what: &str) -> EventResult {
    debug!(target: "progression", "{what} ignored in {phase:?}");
    EventResult::Ignored
}

fn scene_sets(world: &World) -> (Vec<String>, Vec<String>) {
    let cfg = world
        .get_resource::<GameConfig>()
        .cloned()
        .unwrap_or_default();
    (cfg.scenes.home, cfg.scenes.board)
}

/// Start -> Tutorial: swap home scenes for the board and face the pawn.
fn advance(world: &mut World) -> EventResult {
    {
        let st = world.resource::<Progression>();
        if st.phase != Phase::Start {
            return ignored(st.phase, "AdvanceRequested");
        }
    }
    let (home, board) = scene_sets(world);
    {
        let mut st = world.resource_mut::<Progression>();
        st.phase = Phase::Tutorial;
        st.current_enemy = Enemy::Pawn;
    }
    info!(target: "progression", "tutorial starting");
    if let Some(mut scenes) = world.get_resource_mut::<SceneTransitions>() {
        scenes.start_transition(&home, &board);
    } else {
        warn!(target: "progression", "no scene service; tutorial scenes not loaded");
    }
    EventResult::Handled
}

fn schedule_play(world: &mut World) -> EventResult {
    let tick = world.resource::<TickCounter>().0;
    let (phase, enemy) = {
        let st = world.resource::<Progression>();
        (st.phase, st.current_enemy)
    };
    if phase != Phase::Tutorial {
        return ignored(phase, "SceneTransitionFinished");
    }
    let ready_tick = tick + SCENE_SETTLE_TICKS;
    debug!(target: "progression", "scene swap done; play begins at tick {ready_tick}");
    world.insert_resource(PendingPlay { ready_tick, enemy });
    EventResult::Handled
}

fn show_score(world: &mut World, out: &mut EventSink) -> EventResult {
    let mut st = world.resource_mut::<Progression>();
    // Also accepted in ChooseEnemy: the score animation can outlast the
    // choose screen, and the late signal still lands on the score view.
    if !matches!(st.phase, Phase::Tutorial | Phase::Play | Phase::ChooseEnemy) {
        return ignored(st.phase, "ScoreAnimationFinished");
    }
    st.phase = Phase::ShowScore;
    out.emit(GameEvent::ShowScoreScreen);
    EventResult::Handled
}

fn select_enemy(world: &mut World, out: &mut EventSink, enemy: Enemy) -> EventResult {
    let mut st = world.resource_mut::<Progression>();
    if st.phase != Phase::ChooseEnemy {
        return ignored(st.phase, "EnemySelected");
    }
    st.phase = Phase::Play;
    st.current_enemy = enemy;
    info!(target: "progression", "playing against the {}", enemy.label());
    out.emit(GameEvent::BeginPlay(enemy));
    EventResult::Handled
}

fn level_lost(world: &mut World) -> EventResult {
    let mut st = world.resource_mut::<Progression>();
    if !matches!(st.phase, Phase::Tutorial | Phase::Play) {
        return ignored(st.phase, "LevelLost");
    }
    st.last_score = ScoreResult::FAIL;
    // Losing resets ALL accumulated stars, not just the current enemy.
    st.scores.clear_all();
    info!(target: "progression", "level lost; star total wiped");
    EventResult::Handled
}

fn level_won(world: &mut World, result: ScoreResult) -> EventResult {
    let mut st = world.resource_mut::<Progression>();
    if !matches!(st.phase, Phase::Tutorial | Phase::Play) {
        return ignored(st.phase, "LevelWon");
    }
    st.last_score = result;
    let enemy = st.current_enemy;
    st.scores.record_win(enemy, result);
    info!(
        target: "progression",
        "{} beaten ({:?}, {} stars); total stars {}",
        enemy.label(),
        result.kind,
        result.stars,
        st.scores.total_stars()
    );
    EventResult::Handled
}

fn dismiss_score(world: &mut World, out: &mut EventSink) -> EventResult {
    let mut st = world.resource_mut::<Progression>();
    if st.phase != Phase::ShowScore {
        return ignored(st.phase, "ScoreScreenDismissed");
    }
    if st.scores.is_final_enemy_defeated() {
        st.phase = Phase::Victory;
        info!(target: "progression", "the queen is dead; victory");
        out.emit(GameEvent::VictoryReached);
    } else if st.scores.tutorial_success() {
        st.phase = Phase::ChooseEnemy;
        out.emit(GameEvent::ShowChooseEnemyScreen);
    } else {
        // Tutorial not cleared yet; replay the pawn.
        st.phase = Phase::Tutorial;
        st.current_enemy = Enemy::Pawn;
        out.emit(GameEvent::BeginPlay(Enemy::Pawn));
    }
    EventResult::Handled
}

/// One-shot bootstrap out of `Unknown`: request the initial scene set if
/// nothing is loaded yet.
fn bootstrap_progression(
    mut st: ResMut<Progression>,
    scenes: Option<ResMut<SceneTransitions>>,
    cfg: Option<Res<GameConfig>>,
) {
    if st.phase != Phase::Unknown {
        return;
    }
    st.phase = Phase::Start;
    info!(target: "progression", "boot");
    let Some(mut scenes) = scenes else {
        warn!(target: "progression", "no scene service; start screen not loaded");
        return;
    };
    if !scenes.any_loaded() {
        let home = cfg
            .map(|c| c.scenes.home.clone())
            .unwrap_or_else(|| GameConfig::default().scenes.home);
        scenes.start_transition(&[], &home);
    }
}

/// Fires the deferred `BeginPlay` once the settle delay has elapsed.
fn pending_play_system(
    mut commands: Commands,
    tick: Res<TickCounter>,
    pending: Option<Res<PendingPlay>>,
    bus: Option<ResMut<EventBus>>,
) {
    let Some(pending) = pending else {
        return;
    };
    if tick.0 < pending.ready_tick {
        return;
    }
    let enemy = pending.enemy;
    commands.remove_resource::<PendingPlay>();
    if let Some(mut bus) = bus {
        bus.publish(GameEvent::BeginPlay(enemy));
    }
}

pub struct ProgressionPlugin;

impl Plugin for ProgressionPlugin {
    fn build(&self, app: &mut App) {
        let unlock_threshold = app
            .world()
            .get_resource::<GameConfig>()
            .map(|c| c.progression.unlock_threshold)
            .unwrap_or(DEFAULT_UNLOCK_THRESHOLD);
        app.insert_resource(Progression::new(unlock_threshold))
            .register_handler(ProgressionHandler)
            .add_systems(
                Update,
                (bootstrap_progression, pending_play_system)
                    .chain()
                    .in_set(EventFlowSet::Drive)
                    // Requests queued this tick are applied this tick, so the
                    // settle countdown starts from a deterministic point.
                    .before(SceneFlowSet),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::events::{EventBusPlugin, JournalEntry};
    use crate::progression::score::ScoreKind;
    use crate::scenes::SceneFlowPlugin;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(EventBusPlugin::default());
        app.add_plugins(SceneFlowPlugin);
        app.add_plugins(ProgressionPlugin);
        app
    }

    fn publish(app: &mut App, ev: GameEvent) {
        app.world_mut().resource_mut::<EventBus>().publish(ev);
    }

    fn phase(app: &App) -> Phase {
        app.world().resource::<Progression>().phase()
    }

    fn journaled(app: &App, ev: GameEvent) -> bool {
        app.world()
            .resource::<EventBus>()
            .journal()
            .any(|e: &JournalEntry| e.event == ev)
    }

    #[test]
    fn bootstrap_requests_home_scenes_once() {
        let mut app = test_app();
        assert_eq!(phase(&app), Phase::Unknown);
        app.update();
        assert_eq!(phase(&app), Phase::Start);
        // Home set tracked after the transition applied.
        app.update();
        let scenes = app.world().resource::<SceneTransitions>();
        assert!(scenes.any_loaded());
    }

    #[test]
    fn advance_only_accepted_in_start() {
        let mut app = test_app();
        // Pumped while still Unknown (bootstrap runs after the pump): ignored.
        publish(&mut app, GameEvent::AdvanceRequested);
        app.update();
        assert_eq!(phase(&app), Phase::Start);
        // From Start the same event must land in Tutorial.
        publish(&mut app, GameEvent::AdvanceRequested);
        app.update();
        assert_eq!(phase(&app), Phase::Tutorial);
        // And a third one is ignored outright.
        publish(&mut app, GameEvent::AdvanceRequested);
        app.update();
        assert_eq!(phase(&app), Phase::Tutorial);
    }

    #[test]
    fn settle_delay_holds_begin_play_for_two_ticks() {
        let mut app = test_app();
        app.update();
        publish(&mut app, GameEvent::AdvanceRequested);
        app.update();
        assert_eq!(phase(&app), Phase::Tutorial);
        publish(&mut app, GameEvent::SceneTransitionFinished);
        app.update(); // handled; PendingPlay armed at tick + 2
        assert!(app.world().contains_resource::<PendingPlay>());
        assert!(!journaled(&app, GameEvent::BeginPlay(Enemy::Pawn)));
        app.update(); // settle tick 1
        assert!(!journaled(&app, GameEvent::BeginPlay(Enemy::Pawn)));
        app.update(); // settle tick 2: BeginPlay published
        assert!(!app.world().contains_resource::<PendingPlay>());
        app.update(); // pumped and journaled
        assert!(journaled(&app, GameEvent::BeginPlay(Enemy::Pawn)));
    }

    #[test]
    fn scene_finished_ignored_outside_tutorial() {
        let mut app = test_app();
        app.update();
        publish(&mut app, GameEvent::SceneTransitionFinished);
        app.update();
        assert!(!app.world().contains_resource::<PendingPlay>());
    }

    #[test]
    fn enemy_selection_is_noop_before_choose_phase() {
        let mut app = test_app();
        app.update();
        publish(&mut app, GameEvent::EnemySelected(Enemy::Rook));
        app.update();
        assert_eq!(phase(&app), Phase::Start);
        assert!(!journaled(&app, GameEvent::BeginPlay(Enemy::Rook)));
    }

    #[test]
    fn tutorial_win_sets_flag_without_stars() {
        let mut app = test_app();
        app.update();
        publish(&mut app, GameEvent::AdvanceRequested);
        app.update();
        publish(
            &mut app,
            GameEvent::LevelWon(ScoreResult::graded(ScoreKind::Gold)),
        );
        app.update();
        let st = app.world().resource::<Progression>();
        assert!(st.tutorial_success());
        assert_eq!(st.total_stars(), 0);
    }

    #[test]
    fn score_animation_from_choose_screen_opens_score_view() {
        let mut app = test_app();
        app.update();
        publish(&mut app, GameEvent::AdvanceRequested);
        app.update();
        publish(
            &mut app,
            GameEvent::LevelWon(ScoreResult::graded(ScoreKind::Gold)),
        );
        app.update();
        publish(&mut app, GameEvent::ScoreAnimationFinished);
        app.update();
        publish(&mut app, GameEvent::ScoreScreenDismissed);
        app.update();
        assert_eq!(phase(&app), Phase::ChooseEnemy);
        // A score animation that outlives the choose screen still lands.
        publish(&mut app, GameEvent::ScoreAnimationFinished);
        app.update();
        assert_eq!(phase(&app), Phase::ShowScore);
        let shown = app
            .world()
            .resource::<EventBus>()
            .journal()
            .filter(|e| e.event == GameEvent::ShowScoreScreen)
            .count();
        assert_eq!(shown, 2);
    }

    #[test]
    fn score_screen_dismissal_replays_tutorial_until_cleared() {
        let mut app = test_app();
        app.update();
        publish(&mut app, GameEvent::AdvanceRequested);
        app.update();
        publish(&mut app, GameEvent::LevelLost);
        app.update();
        publish(&mut app, GameEvent::ScoreAnimationFinished);
        app.update();
        assert_eq!(phase(&app), Phase::ShowScore);
        publish(&mut app, GameEvent::ScoreScreenDismissed);
        app.update();
        // Tutorial was never won, so the pawn is replayed.
        assert_eq!(phase(&app), Phase::Tutorial);
        assert!(journaled(&app, GameEvent::BeginPlay(Enemy::Pawn)));
    }
}
