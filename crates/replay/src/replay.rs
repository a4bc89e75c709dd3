//! Feeding tapes through the auction engine

use crate::config::{ProjectConfig, SimulationSettings};
use crate::errors::ReplayError;
use crate::tape::Tape;
use serde::Serialize;
use stepped_auction::{ClockAxis, MintOutcome, SteppedAuction};
use tracing::{debug, info, warn};

/// Counters collected while replaying a tape
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplayStats {
    /// Events recorded by the engine
    pub applied: usize,
    /// Events past the auction window
    pub ignored_after_close: usize,
}

/// Replay every event of `tape` in order.
///
/// Stops at the first rejected event; the engine keeps the prefix applied so
/// far and the error carries the offending event's index.
pub fn replay(auction: &mut SteppedAuction, tape: &Tape) -> Result<ReplayStats, ReplayError> {
    let mut stats = ReplayStats::default();

    for (index, event) in tape.events().iter().enumerate() {
        match auction.record_mint(event.clock, event.quantity) {
            Ok(MintOutcome::Recorded { .. }) => stats.applied += 1,
            Ok(MintOutcome::AuctionClosed) => stats.ignored_after_close += 1,
            Err(source) => {
                warn!(index, clock = event.clock, error = %source, "tape replay aborted");
                return Err(ReplayError::Event { index, source });
            }
        }
    }

    info!(
        variant = auction.axis().variant(),
        applied = stats.applied,
        ignored = stats.ignored_after_close,
        final_step = auction.current_step(),
        "tape replayed"
    );
    debug!(
        tape_quantity = %tape.quantity_until(auction.config().end_clock()),
        recorded = %auction.total_minted(),
        "minted totals after replay"
    );
    Ok(stats)
}

/// Load a project's tape, build its engine, and replay.
pub fn run_project(
    project: &ProjectConfig,
    settings: &SimulationSettings,
    axis: ClockAxis,
    sort: bool,
) -> Result<(SteppedAuction, ReplayStats), ReplayError> {
    let config = project.auction.to_auction_config(axis);
    let mut tape = Tape::from_path(settings.tape_path(project), axis)?.since(config.start_clock);
    if sort {
        tape.sort_by_clock();
    } else if !tape.is_sorted() {
        warn!(
            events = tape.len(),
            "tape is not ordered by clock; replay stops at the first step regression"
        );
    }

    let mut auction = SteppedAuction::new(axis, config)?;
    let stats = replay(&mut auction, &tape)?;
    Ok((auction, stats))
}
