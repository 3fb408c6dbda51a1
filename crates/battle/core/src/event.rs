//! Observable events emitted while collapsing deltas.
//!
//! The sink is an explicit parameter threaded through the replay call;
//! there is no registered global hook. Presentation and logging layers
//! implement [`EventSink`]; gameplay logic never reads events back.

use crate::state::{Card, Modifier, PlayerId, Position, Source, UnitId};

/// Something a presentation or logging layer may want to react to.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    UnitSpawned {
        unit: UnitId,
        position: Position,
    },
    HealthChanged {
        unit: UnitId,
        amount: i32,
        source: Source,
    },
    UnitDied {
        unit: UnitId,
    },
    ModifierApplied {
        unit: UnitId,
        modifier: Modifier,
    },
    CardDrawn {
        player: PlayerId,
        card: Card,
    },
    GoldChanged {
        player: PlayerId,
        amount: i32,
    },
}

/// Receiver for observable events during replay.
pub trait EventSink {
    fn receive_event(&mut self, event: BattleEvent);
}

/// Discards every event. The default for headless replay.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn receive_event(&mut self, _event: BattleEvent) {}
}

/// Collects events in order; used by tests and by presentation layers
/// that drain after each catch-up pass.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<BattleEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for RecordingSink {
    fn receive_event(&mut self, event: BattleEvent) {
        self.events.push(event);
    }
}
