use stepped_auction::{AuctionError, StepIndex};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("tape event #{index} rejected: {source}")]
    Event {
        index: usize,
        #[source]
        source: AuctionError,
    },
    #[error("auction error: {0}")]
    Auction(#[from] AuctionError),
    #[error("proceeds overflowed at step {step}")]
    ProceedsOverflow { step: StepIndex },
    #[error("unknown project: {0}")]
    UnknownProject(String),
    #[error("tape is missing the {0} column")]
    MissingColumn(&'static str),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
