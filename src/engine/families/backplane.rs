//! Backplane family: true and mirror variants
//!
//! Backplanes carry no serial pattern; the acceptance test is the `Type`
//! column itself. Exactly "True" or "Mirror" admits a row, anything else
//! is skipped, so header and blank rows fall out for free.

use serde::Serialize;
use std::fmt;

use super::{affirmative, field};
use crate::engine::error::EngineError;
use crate::engine::processor::{Classification, Family, RejectReason};
use crate::engine::schema::{ColumnSchema, Row};
use crate::engine::store::CategoryStore;

const DELTAS: &[(&str, i32)] = &[
    ("Type", 0),
    ("Variant", 1),
    ("SN", 2),
    ("ID", 3),
    ("Location", 4),
    ("Visual_Inspection", 5),
    ("Burn_In", 6),
    ("QA", 7),
    ("Assembly", 8),
    ("Note", 9),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackplaneCategory {
    True,
    Mirror,
}

impl fmt::Display for BackplaneCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackplaneCategory::True => write!(f, "true"),
            BackplaneCategory::Mirror => write!(f, "mirror"),
        }
    }
}

/// One backplane row, decoded once through the column schema.
#[derive(Debug, Clone, Serialize)]
pub struct BackplaneRecord {
    pub backplane_type: String,
    pub variant: String,
    pub sn: String,
    pub id: String,
    pub location: String,
    pub visual_inspection: String,
    pub burn_in: String,
    pub qa: String,
    pub assembly: String,
    pub note: String,
}

pub struct Backplane;

impl Family for Backplane {
    const NAME: &'static str = "Backplane";
    const DEFAULT_ANCHOR: usize = 0;

    type Category = BackplaneCategory;
    type Record = BackplaneRecord;

    fn new() -> Result<Self, EngineError> {
        Ok(Self)
    }

    fn deltas() -> &'static [(&'static str, i32)] {
        DELTAS
    }

    fn categories() -> &'static [BackplaneCategory] {
        &[BackplaneCategory::True, BackplaneCategory::Mirror]
    }

    fn classify<R: Row>(
        &self,
        schema: &ColumnSchema,
        row: &R,
    ) -> Result<Classification<BackplaneCategory, BackplaneRecord>, EngineError> {
        let backplane_type = match schema.field(row, "Type")? {
            Some(backplane_type) => backplane_type,
            None => return Ok(Classification::Rejected(RejectReason::ShortRow)),
        };
        // Exact case required: the type column is a category field, not a
        // yes/no answer.
        let category = match backplane_type {
            "True" => BackplaneCategory::True,
            "Mirror" => BackplaneCategory::Mirror,
            _ => return Ok(Classification::Rejected(RejectReason::UnknownType)),
        };

        let record = match decode(schema, row)? {
            Some(record) => record,
            None => return Ok(Classification::Rejected(RejectReason::ShortRow)),
        };

        Ok(Classification::Accepted {
            category,
            key: record.id.clone(),
            record,
            quantity: 1,
        })
    }
}

fn decode<R: Row>(schema: &ColumnSchema, row: &R) -> Result<Option<BackplaneRecord>, EngineError> {
    Ok(Some(BackplaneRecord {
        backplane_type: field!(schema, row, "Type"),
        variant: field!(schema, row, "Variant"),
        sn: field!(schema, row, "SN"),
        id: field!(schema, row, "ID"),
        location: field!(schema, row, "Location"),
        visual_inspection: field!(schema, row, "Visual_Inspection"),
        burn_in: field!(schema, row, "Burn_In"),
        qa: field!(schema, row, "QA"),
        assembly: field!(schema, row, "Assembly"),
        note: field!(schema, row, "Note"),
    }))
}

/// QA pass/fail counts for each backplane variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QaReport {
    pub true_passed: u64,
    pub true_failed: u64,
    pub mirror_passed: u64,
    pub mirror_failed: u64,
}

pub fn qa_report(store: &CategoryStore<BackplaneCategory, BackplaneRecord>) -> QaReport {
    let passed = |category: BackplaneCategory| {
        store
            .records(category)
            .filter(|(_, record)| affirmative(&record.qa))
            .count() as u64
    };
    let true_passed = passed(BackplaneCategory::True);
    let mirror_passed = passed(BackplaneCategory::Mirror);
    QaReport {
        true_passed,
        true_failed: store.count(BackplaneCategory::True) - true_passed,
        mirror_passed,
        mirror_failed: store.count(BackplaneCategory::Mirror) - mirror_passed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::processor::Processor;

    fn row(backplane_type: &str, id: &str, qa: &str) -> Vec<String> {
        vec![
            backplane_type.to_string(),
            "alpha".to_string(),
            format!("SN-{id}"),
            id.to_string(),
            "Bay 2".to_string(),
            "yes".to_string(),
            "yes".to_string(),
            qa.to_string(),
            String::new(),
            String::new(),
        ]
    }

    #[test]
    fn variants_are_stored_disjointly() {
        let mut processor = Processor::<Backplane>::new().unwrap();
        processor
            .ingest(vec![row("True", "B1", "yes"), row("Mirror", "B2", "yes")])
            .unwrap();

        let store = processor.store();
        assert!(store.get(BackplaneCategory::True, "B1").is_some());
        assert!(store.get(BackplaneCategory::Mirror, "B1").is_none());
        assert!(store.get(BackplaneCategory::Mirror, "B2").is_some());
        assert!(store.get(BackplaneCategory::True, "B2").is_none());
    }

    #[test]
    fn any_other_type_is_stored_in_neither_bucket() {
        let mut processor = Processor::<Backplane>::new().unwrap();
        for value in ["true", "MIRROR", "Type", "", "prototype"] {
            processor.ingest_row(&row(value, "B9", "yes")).unwrap();
        }
        assert_eq!(processor.store().total(), 0);
        assert_eq!(
            processor.rejected().get(&RejectReason::UnknownType),
            Some(&5)
        );
    }

    #[test]
    fn mirror_qa_counts_do_not_leak_into_true_tallies() {
        let mut processor = Processor::<Backplane>::new().unwrap();
        processor
            .ingest(vec![
                row("Mirror", "B1", "yes"),
                row("Mirror", "B2", ""),
                row("True", "B3", "Yes"),
            ])
            .unwrap();

        let qa = qa_report(processor.store());
        assert_eq!(qa.mirror_passed, 1);
        assert_eq!(qa.mirror_failed, 1);
        assert_eq!(qa.true_passed, 1);
        assert_eq!(qa.true_failed, 0);
    }
}
