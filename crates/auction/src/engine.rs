//! Stepped auction engine
//!
//! Drives the ledger from a monotonic feed of mint events. The engine owns its
//! ledger exclusively; every simulation run builds its own instance.

use crate::errors::{AuctionError, Result};
use crate::ledger::Ledger;
use crate::pricing::propagate;
use crate::step::step_for;
use crate::types::{AuctionConfig, Clock, ClockAxis, MintOutcome, Price, Quantity, StepIndex};
use tracing::{debug, trace};

/// Step-indexed pricing state machine shared by CRA and GDA auctions
#[derive(Debug, Clone)]
pub struct SteppedAuction {
    axis: ClockAxis,
    config: AuctionConfig,
    ledger: Ledger,
    current_step: StepIndex,
}

impl SteppedAuction {
    /// Create an engine with step 1 priced at `start_price`.
    pub fn new(axis: ClockAxis, config: AuctionConfig) -> Result<Self> {
        config.validate()?;

        let mut ledger = Ledger::new();
        ledger.set_price(1, config.start_price);

        debug!(
            variant = axis.variant(),
            start_clock = config.start_clock,
            duration = config.duration,
            step_duration = config.step_duration,
            "auction engine initialized"
        );

        Ok(Self {
            axis,
            config,
            ledger,
            current_step: 1,
        })
    }

    /// Continuous Rate Auction: clock values are block numbers
    pub fn cra(config: AuctionConfig) -> Result<Self> {
        Self::new(ClockAxis::Block, config)
    }

    /// Gradual Dutch Auction: clock values are timestamps
    pub fn gda(config: AuctionConfig) -> Result<Self> {
        Self::new(ClockAxis::Timestamp, config)
    }

    pub fn axis(&self) -> ClockAxis {
        self.axis
    }

    pub fn config(&self) -> &AuctionConfig {
        &self.config
    }

    /// Highest step the engine has advanced into
    pub fn current_step(&self) -> StepIndex {
        self.current_step
    }

    /// Price recorded at the current step
    pub fn current_price(&self) -> Price {
        self.ledger
            .price(self.current_step)
            .unwrap_or(self.config.start_price)
    }

    pub fn step_for(&self, clock: Clock) -> StepIndex {
        step_for(&self.config, clock)
    }

    /// Price that would hold at `target` if the engine advanced there now.
    pub fn price_at_step(&self, target: StepIndex) -> Result<Price> {
        if target < self.current_step {
            return Err(AuctionError::StepBehindCurrent {
                step: target,
                current_step: self.current_step,
            });
        }
        propagate(
            &self.config,
            self.current_price(),
            target,
            self.current_step,
            |s| self.ledger.minted(s),
        )
    }

    /// Step and price a mint at `clock` would land on, without recording it.
    ///
    /// Returns `None` once the auction window has closed.
    pub fn quote(&self, clock: Clock) -> Result<Option<(StepIndex, Price)>> {
        if self.config.is_closed_at(clock) {
            return Ok(None);
        }
        let step = self.checked_step(clock)?;
        let price = self.price_at_step(step)?;
        Ok(Some((step, price)))
    }

    /// Apply one mint event.
    ///
    /// Events past the auction window are ignored. An event whose step lies
    /// behind the current step is rejected without touching state.
    pub fn record_mint(&mut self, clock: Clock, quantity: Quantity) -> Result<MintOutcome> {
        if self.config.is_closed_at(clock) {
            trace!(clock, quantity, "mint after auction end ignored");
            return Ok(MintOutcome::AuctionClosed);
        }

        let step = self.checked_step(clock)?;
        if step > self.current_step {
            let price = self.price_at_step(step)?;
            debug!(
                from = self.current_step,
                to = step,
                %price,
                "advancing auction step"
            );
            self.ledger.set_price(step, price);
            self.current_step = step;
        }

        self.ledger.add_minted(step, quantity)?;
        Ok(MintOutcome::Recorded {
            step,
            price: self.current_price(),
        })
    }

    /// Read-only view of every step recorded so far
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn total_minted(&self) -> u128 {
        self.ledger.total_minted()
    }

    fn checked_step(&self, clock: Clock) -> Result<StepIndex> {
        let step = self.step_for(clock);
        if step < self.current_step {
            return Err(AuctionError::OutOfOrderEvent {
                clock,
                step,
                current_step: self.current_step,
            });
        }
        Ok(step)
    }
}
