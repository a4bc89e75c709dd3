//! Core types for the stepped auction engine

use crate::errors::{AuctionError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Raw clock value: block number (CRA) or unix timestamp (GDA)
pub type Clock = u64;

/// 1-based step identifier
pub type StepIndex = u64;

/// Token quantity minted
pub type Quantity = u64;

/// Per-unit price in the currency's smallest unit (e.g. wei)
pub type Price = Decimal;

/// Time axis an auction is indexed by.
///
/// Both variants run the same pricing algorithm; the axis only labels what a
/// [`Clock`] value means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClockAxis {
    /// Continuous Rate Auction: clock values are block numbers
    #[default]
    Block,
    /// Gradual Dutch Auction: clock values are unix timestamps
    Timestamp,
}

impl ClockAxis {
    /// Name of one clock unit, for logs and reports
    pub fn unit(&self) -> &'static str {
        match self {
            ClockAxis::Block => "block",
            ClockAxis::Timestamp => "second",
        }
    }

    /// Short auction variant label
    pub fn variant(&self) -> &'static str {
        match self {
            ClockAxis::Block => "CRA",
            ClockAxis::Timestamp => "GDA",
        }
    }
}

impl std::fmt::Display for ClockAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClockAxis::Block => f.write_str("block"),
            ClockAxis::Timestamp => f.write_str("timestamp"),
        }
    }
}

impl std::str::FromStr for ClockAxis {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "block" | "cra" => Ok(ClockAxis::Block),
            "timestamp" | "time" | "gda" => Ok(ClockAxis::Timestamp),
            other => Err(format!("unknown clock axis: {other}")),
        }
    }
}

/// Immutable auction parameters supplied at construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionConfig {
    /// Clock value at which the auction begins
    pub start_clock: Clock,
    /// Total number of clock units the auction runs
    pub duration: u64,
    /// Clock units per step (>= 1)
    pub step_duration: u64,
    /// Price in effect at step 1
    pub start_price: Price,
    /// Minimum price, never undercut
    pub floor_price: Price,
    /// Amount the price moves per step
    pub price_delta: Price,
    /// Mint count separating "raise price" from "lower price"
    pub expected_step_mint_rate: Quantity,
}

impl AuctionConfig {
    /// Last clock value inside the auction window
    pub fn end_clock(&self) -> Clock {
        self.start_clock.saturating_add(self.duration)
    }

    /// Whether a clock value falls past the auction window
    pub fn is_closed_at(&self, clock: Clock) -> bool {
        clock > self.end_clock()
    }

    /// Step index of the final clock value in the window
    pub fn last_step(&self) -> StepIndex {
        crate::step::step_for(self, self.end_clock())
    }

    /// Reject parameters that would make propagation meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.step_duration == 0 {
            return Err(AuctionError::InvalidConfiguration(
                "step_duration must be at least 1",
            ));
        }
        if self.duration == 0 {
            return Err(AuctionError::InvalidConfiguration(
                "duration must be positive",
            ));
        }
        if self.start_price < Decimal::ZERO {
            return Err(AuctionError::InvalidConfiguration(
                "start_price must be non-negative",
            ));
        }
        if self.floor_price < Decimal::ZERO {
            return Err(AuctionError::InvalidConfiguration(
                "floor_price must be non-negative",
            ));
        }
        if self.price_delta <= Decimal::ZERO {
            return Err(AuctionError::InvalidConfiguration(
                "price_delta must be positive",
            ));
        }
        if self.floor_price > self.start_price {
            return Err(AuctionError::InvalidConfiguration(
                "floor_price must not exceed start_price",
            ));
        }
        Ok(())
    }
}

/// Expected mints per step for a collection sold evenly over the auction.
///
/// Matches the on-chain derivation `collection_size / (duration / step_duration)`
/// with integer division at both stages.
pub fn expected_rate_for(
    collection_size: Quantity,
    duration: u64,
    step_duration: u64,
) -> Result<Quantity> {
    if step_duration == 0 {
        return Err(AuctionError::InvalidConfiguration(
            "step_duration must be at least 1",
        ));
    }
    let steps = duration / step_duration;
    if steps == 0 {
        return Err(AuctionError::InvalidConfiguration(
            "duration must span at least one step",
        ));
    }
    Ok(collection_size / steps)
}

/// Per-step ledger entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Quantity minted while this step was current
    pub minted: Quantity,
    /// Price in effect; `None` until the engine enters the step
    pub price: Option<Price>,
}

/// Flattened `{step_index, minted, price}` record handed to collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSnapshot {
    pub step_index: StepIndex,
    pub minted: Quantity,
    pub price: Option<Price>,
}

/// Result of feeding one mint event to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MintOutcome {
    /// Mint recorded at `step`, paying `price`
    Recorded { step: StepIndex, price: Price },
    /// Clock value past the auction window; nothing changed
    AuctionClosed,
}

impl MintOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, MintOutcome::Recorded { .. })
    }
}

#[cfg(test)]
pub(crate) fn sample_config() -> AuctionConfig {
    AuctionConfig {
        start_clock: 0,
        duration: 10,
        step_duration: 3,
        start_price: Decimal::from(10),
        floor_price: Decimal::ZERO,
        price_delta: Decimal::ONE,
        expected_step_mint_rate: 5,
    }
}
