//! DCB family: assembly-state classification and initial QA
//!
//! DCBs are keyed by serial number (`WVJCE-` prefix) and split three ways
//! on the `Assembled` column: affirmative, blank, or anything else.

use regex::Regex;
use serde::Serialize;
use std::fmt;

use super::{affirmative, compile, field};
use crate::engine::error::EngineError;
use crate::engine::processor::{Classification, Family, RejectReason};
use crate::engine::schema::{ColumnSchema, Row};
use crate::engine::store::CategoryStore;

/// DCB serial numbers: WVJCE- prefix plus a three-digit sequence number.
const SERIAL_PATTERN: &str = r"^WVJCE-\d{3}";

const DELTAS: &[(&str, i32)] = &[
    ("Serial", 0),
    ("ID", 1),
    ("Location", 2),
    ("Assembled", 3),
    ("Fused", 4),
    ("PRBS", 5),
    ("1.5V", 6),
    ("2.5V", 7),
    ("Burned_In", 8),
    ("Stave_Test_JD10", 9),
    ("Stave_Test_JD11", 10),
    ("Comments", 11),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DcbCategory {
    /// Serial number present, "yes" recorded in the Assembled column.
    Assembled,
    /// Serial number present, blank Assembled column.
    Unassembled,
    /// Assembled column filled with anything else: special condition or typo.
    Other,
}

impl fmt::Display for DcbCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DcbCategory::Assembled => write!(f, "assembled"),
            DcbCategory::Unassembled => write!(f, "unassembled"),
            DcbCategory::Other => write!(f, "other"),
        }
    }
}

/// One DCB row, decoded once through the column schema.
#[derive(Debug, Clone, Serialize)]
pub struct DcbRecord {
    pub serial: String,
    pub id: String,
    pub location: String,
    pub assembled: String,
    pub fused: String,
    pub prbs: String,
    pub volt_1v5: String,
    pub volt_2v5: String,
    pub burned_in: String,
    pub stave_test_jd10: String,
    pub stave_test_jd11: String,
    pub comments: String,
}

pub struct Dcb {
    serial: Regex,
}

impl Family for Dcb {
    const NAME: &'static str = "DCB";
    const DEFAULT_ANCHOR: usize = 0;

    type Category = DcbCategory;
    type Record = DcbRecord;

    fn new() -> Result<Self, EngineError> {
        Ok(Self {
            serial: compile(Self::NAME, SERIAL_PATTERN)?,
        })
    }

    fn deltas() -> &'static [(&'static str, i32)] {
        DELTAS
    }

    fn categories() -> &'static [DcbCategory] {
        &[
            DcbCategory::Assembled,
            DcbCategory::Unassembled,
            DcbCategory::Other,
        ]
    }

    fn classify<R: Row>(
        &self,
        schema: &ColumnSchema,
        row: &R,
    ) -> Result<Classification<DcbCategory, DcbRecord>, EngineError> {
        let serial = match schema.field(row, "Serial")? {
            Some(serial) => serial,
            None => return Ok(Classification::Rejected(RejectReason::ShortRow)),
        };
        if !self.serial.is_match(serial) {
            return Ok(Classification::Rejected(RejectReason::UnmatchedIdentifier));
        }

        let record = match decode(schema, row)? {
            Some(record) => record,
            None => return Ok(Classification::Rejected(RejectReason::ShortRow)),
        };

        let category = if affirmative(&record.assembled) {
            DcbCategory::Assembled
        } else if record.assembled.is_empty() {
            DcbCategory::Unassembled
        } else {
            DcbCategory::Other
        };

        Ok(Classification::Accepted {
            category,
            key: record.serial.clone(),
            record,
            quantity: 1,
        })
    }
}

fn decode<R: Row>(schema: &ColumnSchema, row: &R) -> Result<Option<DcbRecord>, EngineError> {
    Ok(Some(DcbRecord {
        serial: field!(schema, row, "Serial"),
        id: field!(schema, row, "ID"),
        location: field!(schema, row, "Location"),
        assembled: field!(schema, row, "Assembled"),
        fused: field!(schema, row, "Fused"),
        prbs: field!(schema, row, "PRBS"),
        volt_1v5: field!(schema, row, "1.5V"),
        volt_2v5: field!(schema, row, "2.5V"),
        burned_in: field!(schema, row, "Burned_In"),
        stave_test_jd10: field!(schema, row, "Stave_Test_JD10"),
        stave_test_jd11: field!(schema, row, "Stave_Test_JD11"),
        comments: field!(schema, row, "Comments"),
    }))
}

/// [fused, unfused] split over assembled boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FusedSplit {
    pub fused: u64,
    pub unfused: u64,
}

pub fn fused_split(store: &CategoryStore<DcbCategory, DcbRecord>) -> FusedSplit {
    let fused = store
        .records(DcbCategory::Assembled)
        .filter(|(_, record)| affirmative(&record.fused))
        .count() as u64;
    FusedSplit {
        fused,
        unfused: store.count(DcbCategory::Assembled) - fused,
    }
}

/// [passed, failed] split of assembled boards through initial QA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QaSplit {
    pub passed: u64,
    pub failed: u64,
}

/// Initial QA: fused, PRBS passed, and both voltage tests recorded.
pub fn initial_qa(store: &CategoryStore<DcbCategory, DcbRecord>) -> QaSplit {
    let passed = store
        .records(DcbCategory::Assembled)
        .filter(|(_, record)| {
            affirmative(&record.fused)
                && affirmative(&record.prbs)
                && !record.volt_1v5.is_empty()
                && !record.volt_2v5.is_empty()
        })
        .count() as u64;
    QaSplit {
        passed,
        failed: store.count(DcbCategory::Assembled) - passed,
    }
}
