//! Door disturbance state machine
//!
//! The door has two states. Opening it re-arms a one-shot temperature drop
//! that the plant consumes on its next step; while it stays open the plant
//! applies a continuous loss every tick. Closing it only stops the
//! continuous loss: the lost heat is not restored.

/// Door position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DoorState {
    #[default]
    Closed,
    Open,
}

/// Result of a door command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DoorTransition {
    /// Closed -> Open; the one-shot drop is armed
    Opened,
    /// Open -> Closed
    Closed,
    /// Door already in the requested position; nothing re-armed
    Unchanged,
}

impl DoorState {
    /// Process a door command and return the next state with the edge taken
    pub fn transition(self, open: bool) -> (Self, DoorTransition) {
        use DoorState::*;

        match (self, open) {
            (Closed, true) => (Open, DoorTransition::Opened),
            (Open, false) => (Closed, DoorTransition::Closed),
            (state, _) => (state, DoorTransition::Unchanged),
        }
    }
}

/// Disturbance bookkeeping shared with the plant model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisturbanceState {
    door: DoorState,
    initial_drop_applied: bool,
}

impl DisturbanceState {
    /// Door closed, nothing pending
    pub const fn closed() -> Self {
        Self {
            door: DoorState::Closed,
            initial_drop_applied: false,
        }
    }

    /// Door open with the one-shot drop still pending
    pub const fn just_opened() -> Self {
        Self {
            door: DoorState::Open,
            initial_drop_applied: false,
        }
    }

    /// Current door position
    pub fn door(&self) -> DoorState {
        self.door
    }

    /// Check if the door is open
    pub fn door_open(&self) -> bool {
        self.door == DoorState::Open
    }

    /// Check if the one-shot drop for the current opening has been consumed
    pub fn initial_drop_applied(&self) -> bool {
        self.initial_drop_applied
    }

    /// Open or close the door
    ///
    /// Only a closed-to-open edge clears `initial_drop_applied`; repeating
    /// "open" while already open does not re-arm the drop.
    pub fn set_door(&mut self, open: bool) -> DoorTransition {
        let (next, edge) = self.door.transition(open);
        self.door = next;
        if edge == DoorTransition::Opened {
            self.initial_drop_applied = false;
        }
        edge
    }

    /// Consume the pending one-shot drop
    ///
    /// Returns `true` exactly once per opening, on the first call while
    /// the door is open.
    pub fn take_initial_drop(&mut self) -> bool {
        if self.door_open() && !self.initial_drop_applied {
            self.initial_drop_applied = true;
            true
        } else {
            false
        }
    }
}
