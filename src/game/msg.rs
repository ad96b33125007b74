use crate::entity::{FallSide, PackageId, PlayerId, Stage};

use serde::{Deserialize, Serialize};

/// Everything a front end needs to know to update sprites, counters and sounds.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    PackageCreated(PackageId),
    StageChanged(PackageId, Stage),
    PackagePicked { package: PackageId, player: PlayerId },
    PackageHandedOff { package: PackageId, player: PlayerId },
    PackageLoaded(PackageId),
    /// A package dropped off a belt and a life is gone.
    PackageMissed { package: PackageId, side: Option<FallSide> },
    PackageLanded(PackageId),
    PlayerMoved { player: PlayerId, floor: usize },
    TruckDelivered { packages: usize },
    TruckReturned,
    BreakStarted,
    BreakEnded,
    ExtraLife,
    BossEntered,
    BossLeft,
    GameOver,
}

#[derive(Serialize, Deserialize, Default, Debug)]
pub struct Log {
    pub events: Vec<Event>,
}

impl Log {
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Hand all events recorded so far to the caller and start over.
    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

/// The event log records game events in the order they happened.
pub trait MessageLog {
    fn add(&mut self, event: Event);
}

impl MessageLog for Log {
    fn add(&mut self, event: Event) {
        trace!("event: {:?}", event);
        self.events.push(event);
    }
}
