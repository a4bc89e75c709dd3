//! Sparse step-indexed ledger
//!
//! Entries are created only by the engine's mint path. Reads of unknown steps
//! report zero mints and no price without inserting anything.

use crate::errors::{AuctionError, Result};
use crate::types::{Price, Quantity, StepIndex, StepRecord, StepSnapshot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Step index -> `{minted, price}` record, owned by a single engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    records: BTreeMap<StepIndex, StepRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, step: StepIndex) -> Option<&StepRecord> {
        self.records.get(&step)
    }

    /// Quantity minted at `step`, 0 when the step has no record
    pub fn minted(&self, step: StepIndex) -> Quantity {
        self.records.get(&step).map_or(0, |r| r.minted)
    }

    /// Price recorded at `step`, if the engine ever entered it
    pub fn price(&self, step: StepIndex) -> Option<Price> {
        self.records.get(&step).and_then(|r| r.price)
    }

    pub(crate) fn set_price(&mut self, step: StepIndex, price: Price) {
        self.records.entry(step).or_default().price = Some(price);
    }

    pub(crate) fn add_minted(&mut self, step: StepIndex, quantity: Quantity) -> Result<()> {
        let record = self.records.entry(step).or_default();
        record.minted = record
            .minted
            .checked_add(quantity)
            .ok_or(AuctionError::MintOverflow { step })?;
        Ok(())
    }

    /// Records in ascending step order
    pub fn iter(&self) -> impl Iterator<Item = (StepIndex, &StepRecord)> + '_ {
        self.records.iter().map(|(step, record)| (*step, record))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of `minted` across every record
    pub fn total_minted(&self) -> u128 {
        self.records.values().map(|r| u128::from(r.minted)).sum()
    }

    /// Every record, flattened
    pub fn snapshots(&self) -> Vec<StepSnapshot> {
        self.iter()
            .map(|(step_index, record)| StepSnapshot {
                step_index,
                minted: record.minted,
                price: record.price,
            })
            .collect()
    }

    /// Reporting view: only steps that carry a price
    pub fn priced_snapshots(&self) -> Vec<StepSnapshot> {
        self.snapshots()
            .into_iter()
            .filter(|s| s.price.is_some())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_reads_do_not_create_entries() {
        let ledger = Ledger::new();
        assert_eq!(ledger.minted(7), 0);
        assert_eq!(ledger.price(7), None);
        assert!(ledger.get(7).is_none());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_add_minted_accumulates() {
        let mut ledger = Ledger::new();
        ledger.add_minted(2, 3).unwrap();
        ledger.add_minted(2, 4).unwrap();
        assert_eq!(ledger.minted(2), 7);
        assert_eq!(ledger.price(2), None);
        assert_eq!(ledger.total_minted(), 7);
    }

    #[test]
    fn test_add_minted_overflow() {
        let mut ledger = Ledger::new();
        ledger.add_minted(1, u64::MAX).unwrap();
        assert_eq!(
            ledger.add_minted(1, 1),
            Err(AuctionError::MintOverflow { step: 1 })
        );
        assert_eq!(ledger.minted(1), u64::MAX);
    }

    #[test]
    fn test_priced_snapshots_skip_unpriced_steps() {
        let mut ledger = Ledger::new();
        ledger.set_price(1, Decimal::from(10));
        ledger.add_minted(1, 2).unwrap();
        ledger.add_minted(3, 1).unwrap();
        ledger.set_price(4, Decimal::from(9));

        assert_eq!(ledger.snapshots().len(), 3);
        let priced: Vec<StepIndex> = ledger
            .priced_snapshots()
            .iter()
            .map(|s| s.step_index)
            .collect();
        assert_eq!(priced, vec![1, 4]);
    }
}
