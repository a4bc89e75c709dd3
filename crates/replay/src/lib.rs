//! Replay driver for stepped auction simulations
//!
//! Loads per-project auction constants and a CSV tape of historical mints,
//! feeds the tape through a [`stepped_auction::SteppedAuction`], and renders
//! the resulting step ledger as a table, JSON, or CSV.

pub mod config;
pub mod errors;
pub mod replay;
pub mod report;
pub mod tape;

pub use config::{builtin_projects, ProjectAuction, ProjectConfig, ProjectTable, SimulationSettings};
pub use errors::ReplayError;
pub use replay::{replay, run_project, ReplayStats};
pub use report::{AuctionReport, ReportFormat, StepRow};
pub use tape::{MintEvent, Tape};
