use bevy::prelude::*;

use regicide::{
    EventBus, EventBusAppExt, EventBusPlugin, EventHandler, EventResult, EventSink, GameEvent,
    MAX_DISPATCH_DEPTH,
};

#[derive(Resource, Default)]
struct Seen(Vec<(&'static str, GameEvent)>);

/// Records every delivery under its registered name.
struct Recorder(&'static str);

impl EventHandler for Recorder {
    fn name(&self) -> &'static str {
        self.0
    }
    fn handle(&mut self, ev: &GameEvent, world: &mut World, _out: &mut EventSink) -> EventResult {
        world.resource_mut::<Seen>().0.push((self.0, *ev));
        EventResult::Handled
    }
}

/// Emits a follow-up the first time it sees `LevelLost`.
struct Chainer {
    fired: bool,
}

impl EventHandler for Chainer {
    fn name(&self) -> &'static str {
        "chainer"
    }
    fn handle(&mut self, ev: &GameEvent, _world: &mut World, out: &mut EventSink) -> EventResult {
        if *ev == GameEvent::LevelLost && !self.fired {
            self.fired = true;
            out.emit(GameEvent::ShowScoreScreen);
            return EventResult::Handled;
        }
        EventResult::Ignored
    }
}

/// Re-emits whatever it receives; only the depth guard stops it.
struct Echo;

impl EventHandler for Echo {
    fn name(&self) -> &'static str {
        "echo"
    }
    fn handle(&mut self, ev: &GameEvent, _world: &mut World, out: &mut EventSink) -> EventResult {
        out.emit(*ev);
        EventResult::Handled
    }
}

fn bus_app(journal_capacity: usize) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(EventBusPlugin { journal_capacity });
    app.init_resource::<Seen>();
    app
}

#[test]
fn handlers_run_in_registration_order() {
    let mut app = bus_app(64);
    app.register_handler(Recorder("first"));
    app.register_handler(Recorder("second"));
    app.world_mut()
        .resource_mut::<EventBus>()
        .publish(GameEvent::LevelLost);
    app.update();
    let seen = app.world().resource::<Seen>();
    assert_eq!(
        seen.0,
        vec![
            ("first", GameEvent::LevelLost),
            ("second", GameEvent::LevelLost)
        ]
    );
}

#[test]
fn follow_ups_are_depth_first() {
    let mut app = bus_app(64);
    app.register_handler(Chainer { fired: false });
    app.register_handler(Recorder("rec"));
    {
        let mut bus = app.world_mut().resource_mut::<EventBus>();
        bus.publish(GameEvent::LevelLost);
        bus.publish(GameEvent::AdvanceRequested);
    }
    app.update();
    // The chained ShowScoreScreen lands before the second drained event.
    let seen = app.world().resource::<Seen>();
    assert_eq!(
        seen.0,
        vec![
            ("rec", GameEvent::LevelLost),
            ("rec", GameEvent::ShowScoreScreen),
            ("rec", GameEvent::AdvanceRequested),
        ]
    );
}

#[test]
fn runaway_recursion_is_cut_off() {
    let mut app = bus_app(64);
    app.register_handler(Echo);
    app.world_mut()
        .resource_mut::<EventBus>()
        .publish(GameEvent::AdvanceRequested);
    app.update();
    let bus = app.world().resource::<EventBus>();
    let delivered = bus
        .journal()
        .filter(|e| e.event == GameEvent::AdvanceRequested)
        .count();
    assert_eq!(delivered, MAX_DISPATCH_DEPTH);
}

#[test]
fn journal_is_bounded() {
    let mut app = bus_app(4);
    {
        let mut bus = app.world_mut().resource_mut::<EventBus>();
        for _ in 0..10 {
            bus.publish(GameEvent::ScoreScreenDismissed);
        }
    }
    app.update();
    let bus = app.world().resource::<EventBus>();
    assert_eq!(bus.journal().count(), 4);
}

#[test]
fn no_handlers_means_ignored_not_crashed() {
    let mut app = bus_app(8);
    app.world_mut()
        .resource_mut::<EventBus>()
        .publish(GameEvent::VictoryReached);
    app.update();
    let bus = app.world().resource::<EventBus>();
    let entry = bus.journal().next_back().expect("journaled");
    assert_eq!(entry.result, EventResult::Ignored);
}
