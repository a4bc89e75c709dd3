//! Historical mint tapes
//!
//! A tape is read from CSV exports with one row per block that saw mints:
//! `block_number`, optional `timestamp`, and `num_minted_in_block`. The clock
//! column is picked by the auction's axis.

use crate::errors::ReplayError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use stepped_auction::{Clock, ClockAxis, Quantity};
use tracing::{debug, warn};

const BLOCK_COLUMN: &str = "block_number";
const TIMESTAMP_COLUMN: &str = "timestamp";

/// One replayed mint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintEvent {
    pub clock: Clock,
    pub quantity: Quantity,
}

#[derive(Debug, Deserialize)]
struct TapeRow {
    #[serde(default)]
    block_number: Option<Clock>,
    #[serde(default, alias = "block_timestamp")]
    timestamp: Option<Clock>,
    num_minted_in_block: Quantity,
}

impl TapeRow {
    fn clock(&self, axis: ClockAxis) -> Option<Clock> {
        match axis {
            ClockAxis::Block => self.block_number,
            ClockAxis::Timestamp => self.timestamp,
        }
    }
}

/// Ordered sequence of mint events
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tape {
    events: Vec<MintEvent>,
}

impl Tape {
    pub fn new(events: Vec<MintEvent>) -> Self {
        Self { events }
    }

    pub fn from_reader<R: Read>(reader: R, axis: ClockAxis) -> Result<Self, ReplayError> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let column = match axis {
            ClockAxis::Block => BLOCK_COLUMN,
            ClockAxis::Timestamp => TIMESTAMP_COLUMN,
        };
        let headers = rdr.headers()?;
        let has_clock = headers
            .iter()
            .any(|h| h == column || (axis == ClockAxis::Timestamp && h == "block_timestamp"));
        if !has_clock {
            return Err(ReplayError::MissingColumn(column));
        }

        let mut events = Vec::new();
        for (line, row) in rdr.deserialize::<TapeRow>().enumerate() {
            let row = row?;
            match row.clock(axis) {
                Some(clock) => events.push(MintEvent {
                    clock,
                    quantity: row.num_minted_in_block,
                }),
                None => warn!(row = line, column, "tape row without clock value skipped"),
            }
        }

        debug!(events = events.len(), %axis, "tape loaded");
        Ok(Self { events })
    }

    pub fn from_path(path: impl AsRef<Path>, axis: ClockAxis) -> Result<Self, ReplayError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(file, axis)
    }

    /// Keep only events at or after `start_clock`
    pub fn since(self, start_clock: Clock) -> Self {
        let events = self
            .events
            .into_iter()
            .filter(|e| e.clock >= start_clock)
            .collect();
        Self { events }
    }

    /// Stable sort by clock value, for tapes exported out of order
    pub fn sort_by_clock(&mut self) {
        self.events.sort_by_key(|e| e.clock);
    }

    pub fn is_sorted(&self) -> bool {
        self.events.windows(2).all(|w| w[0].clock <= w[1].clock)
    }

    pub fn events(&self) -> &[MintEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Sum of quantities of events with `clock <= end_clock`
    pub fn quantity_until(&self, end_clock: Clock) -> u128 {
        self.events
            .iter()
            .filter(|e| e.clock <= end_clock)
            .map(|e| u128::from(e.quantity))
            .sum()
    }
}
