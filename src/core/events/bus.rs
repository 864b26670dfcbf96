use std::collections::VecDeque;

use bevy::prelude::*;

use super::event::{BusEvent, EventHandler, EventResult, EventSink, GameEvent, HandlerRegistry};

/// Scheduler tick clock, incremented once per frame in `PreUpdate`. The
/// scene settle delay counts against this.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct TickCounter(pub u64);

fn advance_tick(mut tick: ResMut<TickCounter>) {
    tick.0 += 1;
}

/// Per-tick flow: pump the bus, drive progression, then present.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum EventFlowSet {
    Pump,
    Drive,
    Present,
}

/// Upper bound on synchronous follow-up recursion. The transition table has
/// no cycle that re-fires the same event without a guard change, so hitting
/// this means a handler bug; the offending event is dropped and logged.
pub const MAX_DISPATCH_DEPTH: usize = 8;

const DEFAULT_JOURNAL_CAPACITY: usize = 512;

#[derive(Debug, Clone, PartialEq)]
pub struct JournalEntry {
    pub event: GameEvent,
    pub result: EventResult,
    pub tick: u64,
}

/// Process-wide publish/subscribe channel. `publish` enqueues; the pump
/// system drains once per tick and delivers each event synchronously, in
/// registration order, with handler follow-ups processed depth-first.
/// Every delivered event lands in a bounded journal ring.
#[derive(Resource)]
pub struct EventBus {
    pending: VecDeque<GameEvent>,
    journal: VecDeque<JournalEntry>,
    journal_capacity: usize,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_JOURNAL_CAPACITY)
    }
}

impl EventBus {
    pub fn with_capacity(journal_capacity: usize) -> Self {
        Self {
            pending: VecDeque::new(),
            journal: VecDeque::new(),
            journal_capacity,
        }
    }

    pub fn publish(&mut self, ev: GameEvent) {
        debug!(target: "bus", "publish {ev:?}");
        self.pending.push_back(ev);
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn journal(&self) -> impl DoubleEndedIterator<Item = &JournalEntry> {
        self.journal.iter()
    }

    fn drain(&mut self) -> Vec<GameEvent> {
        self.pending.drain(..).collect()
    }

    fn push_journal(&mut self, entry: JournalEntry) {
        if self.journal.len() == self.journal_capacity {
            self.journal.pop_front();
        }
        self.journal.push_back(entry);
    }
}

/// Exclusive system: drains the pending queue and delivers each event.
pub fn pump_events(world: &mut World) {
    let drained = world.resource_mut::<EventBus>().drain();
    for ev in drained {
        deliver(world, ev, 0);
    }
}

fn deliver(world: &mut World, ev: GameEvent, depth: usize) {
    if depth >= MAX_DISPATCH_DEPTH {
        warn!(target: "bus", "dispatch depth {MAX_DISPATCH_DEPTH} exceeded; dropping {ev:?}");
        return;
    }
    let tick = world.resource::<TickCounter>().0;
    let mut sink = EventSink::default();
    let mut result = EventResult::Ignored;
    if world.contains_resource::<HandlerRegistry>() {
        world.resource_scope(|world, mut registry: Mut<HandlerRegistry>| {
            result = registry.dispatch(&ev, world, &mut sink);
        });
    }
    let _ = world.send_event(BusEvent(ev));
    world
        .resource_mut::<EventBus>()
        .push_journal(JournalEntry { event: ev, result, tick });
    // Depth-first: follow-ups fully processed before the next drained event.
    for follow in sink.into_events() {
        deliver(world, follow, depth + 1);
    }
}

pub struct EventBusPlugin {
    pub journal_capacity: usize,
}

impl Default for EventBusPlugin {
    fn default() -> Self {
        Self {
            journal_capacity: DEFAULT_JOURNAL_CAPACITY,
        }
    }
}

impl Plugin for EventBusPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TickCounter>()
            .insert_resource(EventBus::with_capacity(self.journal_capacity))
            .init_resource::<HandlerRegistry>()
            .add_event::<BusEvent>()
            .configure_sets(
                Update,
                (EventFlowSet::Pump, EventFlowSet::Drive, EventFlowSet::Present).chain(),
            )
            .add_systems(PreUpdate, advance_tick)
            .add_systems(Update, pump_events.in_set(EventFlowSet::Pump));
    }
}

pub trait EventBusAppExt {
    fn register_handler<H: EventHandler + Send + Sync + 'static>(&mut self, handler: H)
        -> &mut Self;
}

impl EventBusAppExt for App {
    fn register_handler<H: EventHandler + Send + Sync + 'static>(
        &mut self,
        handler: H,
    ) -> &mut Self {
        self.init_resource::<HandlerRegistry>();
        self.world_mut()
            .resource_mut::<HandlerRegistry>()
            .register(handler);
        self
    }
}
