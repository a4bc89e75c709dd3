use crate::types::{Clock, StepIndex};
use thiserror::Error;

/// Errors raised by the stepped auction engine.
///
/// A closed auction is not an error: mints past the end of the window are
/// reported as [`crate::MintOutcome::AuctionClosed`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuctionError {
    #[error("invalid auction configuration: {0}")]
    InvalidConfiguration(&'static str),

    #[error("event at clock {clock} maps to step {step}, behind current step {current_step}")]
    OutOfOrderEvent {
        clock: Clock,
        step: StepIndex,
        current_step: StepIndex,
    },

    #[error("step {step} is behind current step {current_step}")]
    StepBehindCurrent {
        step: StepIndex,
        current_step: StepIndex,
    },

    #[error("price overflowed while adjusting step {step}")]
    PriceOverflow { step: StepIndex },

    #[error("minted quantity overflowed at step {step}")]
    MintOverflow { step: StepIndex },
}

pub type Result<T> = std::result::Result<T, AuctionError>;
