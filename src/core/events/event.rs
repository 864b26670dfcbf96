use bevy::prelude::*;
use smallvec::SmallVec;

use crate::progression::{Enemy, ScoreResult};

/// Every signal the progression machine consumes or produces, one variant
/// per event, payloads carried in the variant. Collaborators never see a
/// partially-typed param slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    // Consumed by the progression machine
    AdvanceRequested,
    SceneTransitionFinished,
    ScoreAnimationFinished,
    EnemySelected(Enemy),
    LevelLost,
    LevelWon(ScoreResult),
    ScoreScreenDismissed,
    // Produced by the progression machine
    BeginPlay(Enemy),
    ShowChooseEnemyScreen,
    ShowScoreScreen,
    VictoryReached,
}

/// Bevy-event mirror of every delivered bus event. Presentation systems
/// observe the flow through an `EventReader<BusEvent>` instead of being
/// registered handlers.
#[derive(Event, Debug, Clone, Copy)]
pub struct BusEvent(pub GameEvent);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Handled,
    Ignored,
}

/// Buffer for follow-up events a handler wants delivered before the outer
/// dispatch returns.
#[derive(Default)]
pub struct EventSink(SmallVec<[GameEvent; 4]>);

impl EventSink {
    pub fn emit(&mut self, ev: GameEvent) {
        self.0.push(ev);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn into_events(self) -> SmallVec<[GameEvent; 4]> {
        self.0
    }
}

pub trait EventHandler: Send + Sync {
    /// React to one event. Follow-ups go through `out`; they are delivered
    /// depth-first before the triggering dispatch returns.
    fn handle(&mut self, ev: &GameEvent, world: &mut World, out: &mut EventSink) -> EventResult;
    fn name(&self) -> &'static str;
}

/// Registry storing boxed handler trait objects. Delivery order is
/// registration order.
#[derive(Resource, Default)]
pub struct HandlerRegistry {
    handlers: Vec<Box<dyn EventHandler>>,
}

impl HandlerRegistry {
    pub fn register<H: EventHandler + 'static>(&mut self, handler: H) {
        debug!(target: "bus", "handler '{}' registered", handler.name());
        self.handlers.push(Box::new(handler));
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn dispatch(
        &mut self,
        ev: &GameEvent,
        world: &mut World,
        out: &mut EventSink,
    ) -> EventResult {
        let mut any = false;
        for h in self.handlers.iter_mut() {
            if h.handle(ev, world, out) == EventResult::Handled {
                any = true;
            }
        }
        if any {
            EventResult::Handled
        } else {
            EventResult::Ignored
        }
    }
}
