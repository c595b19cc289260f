//! CCM family: six roll types, counted by good units
//!
//! CCM rolls diverge from the board families: the per-type counters
//! accumulate the `Good_Count` quantity of each roll rather than adding 1,
//! while the family total still counts rolls. A roll enters the database
//! only once its good count is filled in, so a blank quantity rejects the
//! row before the identifier is even looked at.

use regex::Regex;
use serde::Serialize;
use std::fmt;

use super::{compile, field};
use crate::engine::error::EngineError;
use crate::engine::processor::{Classification, Family, RejectReason};
use crate::engine::schema::{ColumnSchema, Row};

/// Roll identifier prefixes, one per type, checked in this order.
const ROLL_PATTERNS: &[(&str, CcmCategory)] = &[
    (r"^12A\d", CcmCategory::A12),
    (r"^12M\d", CcmCategory::M12),
    (r"^12S\d", CcmCategory::S12),
    (r"^15M\d", CcmCategory::M15),
    (r"^15S\d", CcmCategory::S15),
    (r"^25A\d", CcmCategory::A25),
];

const DELTAS: &[(&str, i32)] = &[
    ("Roll_ID", 0),
    ("Location", 1),
    ("CCM_Type", 2),
    ("Master_or_Slave", 3),
    ("Original_Count", 4),
    ("Good_Count", 5),
    ("Usage", 6),
    ("Comment", 7),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum CcmCategory {
    #[serde(rename = "12A")]
    A12,
    #[serde(rename = "12M")]
    M12,
    #[serde(rename = "12S")]
    S12,
    #[serde(rename = "15M")]
    M15,
    #[serde(rename = "15S")]
    S15,
    #[serde(rename = "25A")]
    A25,
}

impl fmt::Display for CcmCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CcmCategory::A12 => write!(f, "12A"),
            CcmCategory::M12 => write!(f, "12M"),
            CcmCategory::S12 => write!(f, "12S"),
            CcmCategory::M15 => write!(f, "15M"),
            CcmCategory::S15 => write!(f, "15S"),
            CcmCategory::A25 => write!(f, "25A"),
        }
    }
}

/// One CCM roll, decoded once through the column schema.
#[derive(Debug, Clone, Serialize)]
pub struct CcmRecord {
    pub roll_id: String,
    pub location: String,
    pub ccm_type: String,
    pub master_or_slave: String,
    pub original_count: String,
    pub good_count: String,
    pub usage: String,
    pub comment: String,
}

pub struct Ccm {
    rolls: Vec<(Regex, CcmCategory)>,
}

impl Family for Ccm {
    const NAME: &'static str = "CCM";
    const DEFAULT_ANCHOR: usize = 0;

    type Category = CcmCategory;
    type Record = CcmRecord;

    fn new() -> Result<Self, EngineError> {
        let rolls = ROLL_PATTERNS
            .iter()
            .map(|(pattern, category)| Ok((compile(Self::NAME, pattern)?, *category)))
            .collect::<Result<Vec<_>, EngineError>>()?;
        Ok(Self { rolls })
    }

    fn deltas() -> &'static [(&'static str, i32)] {
        DELTAS
    }

    fn categories() -> &'static [CcmCategory] {
        &[
            CcmCategory::A12,
            CcmCategory::M12,
            CcmCategory::S12,
            CcmCategory::M15,
            CcmCategory::S15,
            CcmCategory::A25,
        ]
    }

    fn classify<R: Row>(
        &self,
        schema: &ColumnSchema,
        row: &R,
    ) -> Result<Classification<CcmCategory, CcmRecord>, EngineError> {
        // A roll is in the database if and only if its good count is
        // filled out; blank means the row is not a roll at all.
        let good_count = match schema.field(row, "Good_Count")? {
            Some(good_count) => good_count,
            None => return Ok(Classification::Rejected(RejectReason::ShortRow)),
        };
        if good_count.is_empty() {
            return Ok(Classification::Rejected(RejectReason::MissingQuantity));
        }

        let roll_id = match schema.field(row, "Roll_ID")? {
            Some(roll_id) => roll_id,
            None => return Ok(Classification::Rejected(RejectReason::ShortRow)),
        };
        let category = match self
            .rolls
            .iter()
            .find(|(pattern, _)| pattern.is_match(roll_id))
        {
            Some((_, category)) => *category,
            None => return Ok(Classification::Rejected(RejectReason::UnmatchedIdentifier)),
        };

        let quantity = match good_count.parse::<u64>() {
            Ok(quantity) => quantity,
            Err(_) => return Ok(Classification::Rejected(RejectReason::BadQuantity)),
        };

        let record = match decode(schema, row)? {
            Some(record) => record,
            None => return Ok(Classification::Rejected(RejectReason::ShortRow)),
        };

        Ok(Classification::Accepted {
            category,
            key: record.roll_id.clone(),
            record,
            quantity,
        })
    }
}

fn decode<R: Row>(schema: &ColumnSchema, row: &R) -> Result<Option<CcmRecord>, EngineError> {
    Ok(Some(CcmRecord {
        roll_id: field!(schema, row, "Roll_ID"),
        location: field!(schema, row, "Location"),
        ccm_type: field!(schema, row, "CCM_Type"),
        master_or_slave: field!(schema, row, "Master_or_Slave"),
        original_count: field!(schema, row, "Original_Count"),
        good_count: field!(schema, row, "Good_Count"),
        usage: field!(schema, row, "Usage"),
        comment: field!(schema, row, "Comment"),
    }))
}
