//! Bounded tick history
//!
//! A fixed-capacity ring of the most recent ticks. Once full, every new
//! record evicts the oldest one, so memory stays constant over long runs.

use heapless::HistoryBuffer;

use super::TickRecord;
use crate::config::{OUTPUT_MAX, OUTPUT_MIN};

/// Number of ticks kept for display (two simulated hours)
pub const HISTORY_LEN: usize = 120;

/// Statistics over the retained window
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RunSummary {
    /// Ticks executed since start (not limited to the window)
    pub ticks: u32,
    /// Records in the window
    pub window: usize,
    /// Highest post-update temperature in the window (°C)
    pub peak_temperature: f64,
    /// Temperature after the latest tick (°C)
    pub final_temperature: f64,
    /// Mean of |error| over the window (°C)
    pub mean_abs_error: f64,
    /// Ticks in the window with saturated (0% or 100%) output
    pub saturated_ticks: usize,
}

/// FIFO window over the most recent [`HISTORY_LEN`] ticks
pub struct History {
    buffer: HistoryBuffer<TickRecord, HISTORY_LEN>,
    total: u32,
}

impl core::fmt::Debug for History {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("History")
            .field("len", &self.len())
            .field("total", &self.total)
            .finish()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Create an empty history
    pub const fn new() -> Self {
        Self {
            buffer: HistoryBuffer::new(),
            total: 0,
        }
    }

    /// Append a record, evicting the oldest when full
    pub fn push(&mut self, record: TickRecord) {
        self.buffer.write(record);
        self.total = self.total.saturating_add(1);
    }

    /// Records currently retained
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.buffer.len() == 0
    }

    /// Ticks recorded since start, including evicted ones
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Most recent record
    pub fn latest(&self) -> Option<&TickRecord> {
        self.buffer.recent()
    }

    /// Oldest retained record
    pub fn oldest(&self) -> Option<&TickRecord> {
        self.iter().next()
    }

    /// Retained records, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &TickRecord> + '_ {
        self.buffer.oldest_ordered()
    }

    /// Summarize the retained window
    ///
    /// Returns `None` before the first tick.
    pub fn summary(&self) -> Option<RunSummary> {
        let latest = self.latest()?;

        let mut peak = latest.temperature;
        let mut error_sum = 0.0;
        let mut saturated = 0;
        for record in self.iter() {
            if record.temperature > peak {
                peak = record.temperature;
            }
            error_sum += if record.error < 0.0 {
                -record.error
            } else {
                record.error
            };
            if record.power <= OUTPUT_MIN || record.power >= OUTPUT_MAX {
                saturated += 1;
            }
        }

        let window = self.len();
        Some(RunSummary {
            ticks: self.total,
            window,
            peak_temperature: peak,
            final_temperature: latest.temperature,
            mean_abs_error: error_sum / window as f64,
            saturated_ticks: saturated,
        })
    }
}
