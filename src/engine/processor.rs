//! Generic family processor - classify, store, aggregate
//!
//! The four family processors are structurally identical; this module
//! holds the one generic implementation. A `Family` supplies the column
//! deltas, compiled identifier patterns, and the classification rule;
//! `Processor` owns the resolved schema, the category store, and a side
//! tally of rejections for one ingestion pass.

use std::collections::BTreeMap;
use std::fmt;

use crate::engine::error::EngineError;
use crate::engine::schema::{ColumnSchema, Row};
use crate::engine::store::CategoryStore;

/// Outcome of classifying one row.
#[derive(Debug, Clone)]
pub enum Classification<C, R> {
    Accepted {
        category: C,
        /// Category key: the identifier field the record is stored under.
        key: String,
        record: R,
        /// Counter contribution: 1 for families that count boards, the
        /// parsed good-unit quantity for CCM rolls.
        quantity: u64,
    },
    Rejected(RejectReason),
}

/// Why a row was skipped. Rejection is not an error: it is the mechanism
/// that tolerates header rows, blank rows, and unrelated rows in the
/// source. Rejected rows are not stored and not counted anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RejectReason {
    /// Identifier field matched none of the family's patterns.
    UnmatchedIdentifier,
    /// Row has fewer fields than the family schema requires.
    ShortRow,
    /// CCM quantity field was blank; the roll was never counted in.
    MissingQuantity,
    /// CCM quantity field was present but not an unsigned integer.
    BadQuantity,
    /// Backplane type field was neither "True" nor "Mirror".
    UnknownType,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::UnmatchedIdentifier => write!(f, "unmatched identifier"),
            RejectReason::ShortRow => write!(f, "short row"),
            RejectReason::MissingQuantity => write!(f, "missing quantity"),
            RejectReason::BadQuantity => write!(f, "bad quantity"),
            RejectReason::UnknownType => write!(f, "unknown type"),
        }
    }
}

/// Per-family configuration of the generic engine.
pub trait Family: Sized {
    const NAME: &'static str;
    /// Column index of the family's anchor attribute in the source export.
    const DEFAULT_ANCHOR: usize;

    type Category: Copy + Ord + fmt::Display + 'static;
    type Record: Clone;

    /// Compile the family's identifier patterns.
    fn new() -> Result<Self, EngineError>;

    /// Attribute deltas relative to the anchor column.
    fn deltas() -> &'static [(&'static str, i32)];

    /// All categories, in reporting order.
    fn categories() -> &'static [Self::Category];

    /// Acceptance test plus category assignment for one row.
    fn classify<R: Row>(
        &self,
        schema: &ColumnSchema,
        row: &R,
    ) -> Result<Classification<Self::Category, Self::Record>, EngineError>;
}

/// One family's state for a single ingestion pass.
pub struct Processor<F: Family> {
    family: F,
    schema: ColumnSchema,
    store: CategoryStore<F::Category, F::Record>,
    rejected: BTreeMap<RejectReason, u64>,
}

impl<F: Family> Processor<F> {
    pub fn new() -> Result<Self, EngineError> {
        Self::with_anchor(F::DEFAULT_ANCHOR)
    }

    /// Build a processor with a re-based anchor column.
    pub fn with_anchor(anchor: usize) -> Result<Self, EngineError> {
        Ok(Self {
            family: F::new()?,
            schema: ColumnSchema::resolve(F::NAME, F::deltas(), anchor)?,
            store: CategoryStore::new(F::categories()),
            rejected: BTreeMap::new(),
        })
    }

    /// Classify one row and fold it into the store.
    ///
    /// Returns the assigned category, or `None` for a rejected row.
    /// Rejections never abort the pass; only schema configuration errors
    /// propagate.
    pub fn ingest_row<R: Row>(&mut self, row: &R) -> Result<Option<F::Category>, EngineError> {
        match self.family.classify(&self.schema, row)? {
            Classification::Accepted {
                category,
                key,
                record,
                quantity,
            } => {
                self.store.insert(category, key, record, quantity);
                Ok(Some(category))
            }
            Classification::Rejected(reason) => {
                *self.rejected.entry(reason).or_insert(0) += 1;
                Ok(None)
            }
        }
    }

    /// Run the full ingestion pass over a row source.
    pub fn ingest<R, I>(&mut self, rows: I) -> Result<(), EngineError>
    where
        R: Row,
        I: IntoIterator<Item = R>,
    {
        for row in rows {
            self.ingest_row(&row)?;
        }
        Ok(())
    }

    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    pub fn store(&self) -> &CategoryStore<F::Category, F::Record> {
        &self.store
    }

    /// Rejection tally by reason, for diagnostics only. Rejected rows do
    /// not appear in any category counter or the family total.
    pub fn rejected(&self) -> &BTreeMap<RejectReason, u64> {
        &self.rejected
    }

    pub fn rejected_total(&self) -> u64 {
        self.rejected.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::families::dcb::{Dcb, DcbCategory};

    fn dcb_row(serial: &str, assembled: &str) -> Vec<String> {
        let mut row: Vec<String> = vec![String::new(); 12];
        row[0] = serial.to_string();
        row[1] = format!("ID-{serial}");
        row[2] = "Shelf 1".to_string();
        row[3] = assembled.to_string();
        row
    }

    #[test]
    fn ingest_partitions_accepted_rows() {
        let mut processor = Processor::<Dcb>::new().unwrap();
        processor
            .ingest(vec![
                dcb_row("WVJCE-001", "Yes"),
                dcb_row("WVJCE-002", ""),
                dcb_row("WVJCE-003", "broken"),
                dcb_row("not-a-board", "Yes"),
            ])
            .unwrap();

        let store = processor.store();
        assert_eq!(store.count(DcbCategory::Assembled), 1);
        assert_eq!(store.count(DcbCategory::Unassembled), 1);
        assert_eq!(store.count(DcbCategory::Other), 1);
        assert_eq!(store.total(), 3);
        assert_eq!(processor.rejected_total(), 1);
        assert_eq!(
            processor.rejected().get(&RejectReason::UnmatchedIdentifier),
            Some(&1)
        );
    }

    #[test]
    fn reingesting_the_same_rows_in_a_fresh_processor_is_idempotent() {
        let rows = vec![
            dcb_row("WVJCE-001", "Yes"),
            dcb_row("WVJCE-002", ""),
            dcb_row("WVJCE-002", ""),
        ];

        let mut first = Processor::<Dcb>::new().unwrap();
        first.ingest(rows.clone()).unwrap();
        let mut second = Processor::<Dcb>::new().unwrap();
        second.ingest(rows).unwrap();

        for &category in Dcb::categories() {
            assert_eq!(
                first.store().count(category),
                second.store().count(category)
            );
            assert_eq!(
                first.store().stored(category),
                second.store().stored(category)
            );
        }
        assert_eq!(first.store().total(), second.store().total());
    }

    #[test]
    fn rejected_rows_do_not_touch_the_total() {
        let mut processor = Processor::<Dcb>::new().unwrap();
        processor.ingest_row(&vec!["Serial".to_string()]).unwrap();
        processor.ingest_row(&Vec::<String>::new()).unwrap();
        assert_eq!(processor.store().total(), 0);
        assert_eq!(processor.rejected_total(), 2);
    }
}
