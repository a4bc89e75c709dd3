//! Rate-based price adjustment and multi-step propagation

use crate::errors::{AuctionError, Result};
use crate::types::{AuctionConfig, Price, Quantity, StepIndex};
use serde::{Deserialize, Serialize};

/// How a step's demand moves the next step's price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceDirection {
    /// Minted more than the expected rate
    Up,
    /// Minted less than the expected rate
    Down,
    /// Minted exactly the expected rate
    Hold,
}

impl PriceDirection {
    pub fn symbol(&self) -> &'static str {
        match self {
            PriceDirection::Up => "+",
            PriceDirection::Down => "-",
            PriceDirection::Hold => "=",
        }
    }
}

/// Classify a step's mint count against the expected rate.
pub fn direction_for(config: &AuctionConfig, minted: Quantity) -> PriceDirection {
    use std::cmp::Ordering;

    match minted.cmp(&config.expected_step_mint_rate) {
        Ordering::Greater => PriceDirection::Up,
        Ordering::Less => PriceDirection::Down,
        Ordering::Equal => PriceDirection::Hold,
    }
}

/// Apply `step`'s adjustment to `price`.
///
/// Decreases that would cross the floor land exactly on `floor_price`.
pub fn adjust_price(
    config: &AuctionConfig,
    step: StepIndex,
    price: Price,
    minted: Quantity,
) -> Result<Price> {
    match direction_for(config, minted) {
        PriceDirection::Up => price
            .checked_add(config.price_delta)
            .ok_or(AuctionError::PriceOverflow { step }),
        PriceDirection::Down => {
            let lowered = price
                .checked_sub(config.price_delta)
                .ok_or(AuctionError::PriceOverflow { step })?;
            Ok(lowered.max(config.floor_price))
        }
        PriceDirection::Hold => Ok(price),
    }
}

/// Compute the price in effect at `target_step` given the price recorded at
/// `from_step`.
///
/// Every step in `from_step..target_step` contributes one sequential
/// adjustment using its own mint count from `minted`, so N skipped empty steps
/// apply N clamped decrements. Returns `price_at_prev` when
/// `target_step <= from_step`.
pub fn propagate<F>(
    config: &AuctionConfig,
    price_at_prev: Price,
    target_step: StepIndex,
    from_step: StepIndex,
    minted: F,
) -> Result<Price>
where
    F: Fn(StepIndex) -> Quantity,
{
    (from_step..target_step).try_fold(price_at_prev, |price, step| {
        adjust_price(config, step, price, minted(step))
    })
}
