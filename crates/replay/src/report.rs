//! Reporting view over a replayed auction ledger

use crate::errors::ReplayError;
use crate::replay::ReplayStats;
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;
use stepped_auction::{
    direction_for, ClockAxis, Price, PriceDirection, Quantity, StepIndex, SteppedAuction,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    /// Aligned text table
    #[default]
    Table,
    /// Pretty-printed JSON document
    Json,
    /// One CSV row per priced step
    Csv,
}

/// One priced step of the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRow {
    pub step_index: StepIndex,
    pub minted: Quantity,
    pub price: Price,
    /// Effect of this step's mints on the next step's price
    pub direction: PriceDirection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuctionReport {
    pub project: String,
    pub variant: String,
    pub axis: ClockAxis,
    pub total_minted: u128,
    pub collection_size: Option<Quantity>,
    pub sold_out: bool,
    pub final_step: StepIndex,
    pub final_price: Price,
    /// Sum of `minted * price` over priced steps
    pub proceeds: Price,
    pub stats: ReplayStats,
    pub steps: Vec<StepRow>,
}

impl AuctionReport {
    pub fn build(
        project: impl Into<String>,
        auction: &SteppedAuction,
        stats: ReplayStats,
        collection_size: Option<Quantity>,
    ) -> Result<Self, ReplayError> {
        let config = auction.config();
        let steps: Vec<StepRow> = auction
            .ledger()
            .priced_snapshots()
            .into_iter()
            .filter_map(|snapshot| {
                snapshot.price.map(|price| StepRow {
                    step_index: snapshot.step_index,
                    minted: snapshot.minted,
                    price,
                    direction: direction_for(config, snapshot.minted),
                })
            })
            .collect();

        let proceeds = steps.iter().try_fold(Price::ZERO, |acc, row| {
            row.price
                .checked_mul(Price::from(row.minted))
                .and_then(|paid| acc.checked_add(paid))
                .ok_or(ReplayError::ProceedsOverflow {
                    step: row.step_index,
                })
        })?;
        let total_minted = auction.total_minted();

        Ok(Self {
            project: project.into(),
            variant: auction.axis().variant().to_string(),
            axis: auction.axis(),
            total_minted,
            collection_size,
            sold_out: collection_size.is_some_and(|size| total_minted >= u128::from(size)),
            final_step: auction.current_step(),
            final_price: auction.current_price(),
            proceeds,
            stats,
            steps,
        })
    }

    pub fn render(&self, format: ReportFormat) -> Result<String, ReplayError> {
        match format {
            ReportFormat::Table => Ok(self.render_table()),
            ReportFormat::Json => self.to_json(),
            ReportFormat::Csv => {
                let mut buf = Vec::new();
                self.write_csv(&mut buf)?;
                Ok(String::from_utf8_lossy(&buf).into_owned())
            }
        }
    }

    pub fn render_table(&self) -> String {
        let mut out = format!(
            "{} ({}, {} axis): {} steps priced\n",
            self.project,
            self.variant,
            self.axis,
            self.steps.len()
        );
        out.push_str(&format!(
            "{:>8}  {:>10}  {:>28}  dir\n",
            "step", "minted", "price"
        ));
        for row in &self.steps {
            out.push_str(&format!(
                "{:>8}  {:>10}  {:>28}  {}\n",
                row.step_index,
                row.minted,
                row.price,
                row.direction.symbol()
            ));
        }
        out.push_str(&format!(
            "final step: {} at {}\n",
            self.final_step, self.final_price
        ));
        out.push_str(&format!("proceeds: {}\n", self.proceeds));
        if let Some(size) = self.collection_size {
            out.push_str(&format!(
                "collection: {}/{}{}\n",
                self.total_minted,
                size,
                if self.sold_out { " (sold out)" } else { "" }
            ));
        }
        out.push_str(&format!(
            "events: {} applied, {} after close\n",
            self.stats.applied, self.stats.ignored_after_close
        ));
        out
    }

    pub fn to_json(&self) -> Result<String, ReplayError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Step rows as CSV with a header line
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), ReplayError> {
        let mut wtr = csv::Writer::from_writer(writer);
        for row in &self.steps {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}
