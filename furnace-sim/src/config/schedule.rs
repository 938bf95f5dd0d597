//! Scripted commands
//!
//! Lets a configuration file replay an operator session, e.g. opening the
//! door at minute 30 and changing the setpoint at minute 60.

use serde::Deserialize;

use furnace_core::error::ConfigField;
use furnace_core::state::Command;
use furnace_core::SimError;

/// A command applied at the start of the tick producing `at_minute`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduledCommand {
    pub at_minute: u32,
    pub command: Command,
}

/// Scripted commands in minute order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    entries: Vec<ScheduledCommand>,
    /// Index of the first entry not yet taken
    next: usize,
}

impl Schedule {
    /// Order entries by minute; entries sharing a minute keep file order
    pub fn new(mut entries: Vec<ScheduledCommand>) -> Self {
        entries.sort_by_key(|entry| entry.at_minute);
        Self { entries, next: 0 }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reject entries the driver would refuse at runtime
    ///
    /// On failure, also returns the minute of the first bad entry.
    pub fn validate(&self) -> Result<(), (u32, SimError)> {
        for entry in &self.entries {
            if let Command::SetSetpoint(setpoint) = entry.command {
                if !setpoint.is_finite() {
                    return Err((
                        entry.at_minute,
                        SimError::InvalidConfiguration(ConfigField::ScheduledSetpoint),
                    ));
                }
            }
        }
        Ok(())
    }

    /// All entries, taken or not
    pub fn entries(&self) -> &[ScheduledCommand] {
        &self.entries
    }

    /// Take every command due at or before `minute`
    pub fn take_due(&mut self, minute: u32) -> impl Iterator<Item = Command> + '_ {
        let start = self.next;
        let due = self.entries[start..]
            .iter()
            .take_while(|entry| entry.at_minute <= minute)
            .count();
        self.next = start + due;
        self.entries[start..self.next].iter().map(|entry| entry.command)
    }
}
