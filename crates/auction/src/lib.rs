//! Stepped Auction Engine
//!
//! Replays historical mint events through the pricing rule shared by the
//! Continuous Rate Auction (block clock) and the Gradual Dutch Auction
//! (timestamp clock):
//! - Clock values map to 1-based steps of fixed width
//! - Each step's mints move the next step's price by a fixed delta
//! - Skipped steps are propagated lazily and clamped at the floor price
//! - A sparse per-engine ledger records `{minted, price}` per step

pub mod engine;
pub mod errors;
pub mod ledger;
pub mod pricing;
pub mod step;
pub mod types;

pub use engine::*;
pub use errors::*;
pub use ledger::*;
pub use pricing::*;
pub use step::*;
pub use types::*;
