//! LVR family: subtype classification and eight-field initial QA
//!
//! Acceptance and subtype are orthogonal here: any of four serial prefixes
//! (CZ/EN/ER/ES variants) admits a row into the family, while the subtype
//! bucket comes from the `LVR_Type` column by exact match.

use regex::Regex;
use serde::Serialize;
use std::fmt;

use super::{affirmative, compile, field};
use crate::engine::error::EngineError;
use crate::engine::processor::{Classification, Family, RejectReason};
use crate::engine::schema::{ColumnSchema, Row};
use crate::engine::store::CategoryStore;

/// The four accepted serial-number variants.
const SERIAL_PATTERNS: &[&str] = &[
    r"^WVJCZ-\d{3}",
    r"^WVJEN-\d{3}",
    r"^WVJER-\d{3}",
    r"^WVJES-\d{3}",
];

/// The LVR block sits mid-export: ID and Location are left of the serial
/// anchor, everything else right of it.
const DELTAS: &[(&str, i32)] = &[
    ("ID", -2),
    ("Location", -1),
    ("Serial", 0),
    ("CCM", 1),
    ("LVR_Type", 2),
    ("Voltage_Check", 3),
    ("FPGA", 4),
    ("Undervolt_Overtemp_Config", 5),
    ("Undervolt_Test", 6),
    ("Overtemp_Test", 7),
    ("Output_Config", 8),
    ("Sense_Line_Test", 9),
    ("SPI_Test", 10),
    ("Assembled", 11),
    ("SBC_Crate", 12),
    ("Start_Time", 13),
    ("End_Time", 14),
    ("Final_QA", 15),
    ("Subtype", 16),
    ("Comment", 17),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum LvrCategory {
    #[serde(rename = "12A")]
    A12,
    #[serde(rename = "25A")]
    A25,
    #[serde(rename = "15MS")]
    Ms15,
    /// New subtype or a typo in the database.
    #[serde(rename = "other")]
    Other,
}

impl fmt::Display for LvrCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LvrCategory::A12 => write!(f, "12A"),
            LvrCategory::A25 => write!(f, "25A"),
            LvrCategory::Ms15 => write!(f, "15MS"),
            LvrCategory::Other => write!(f, "other"),
        }
    }
}

/// One LVR row, decoded once through the column schema.
#[derive(Debug, Clone, Serialize)]
pub struct LvrRecord {
    pub id: String,
    pub location: String,
    pub serial: String,
    pub ccm: String,
    pub lvr_type: String,
    pub voltage_check: String,
    pub fpga: String,
    pub undervolt_overtemp_config: String,
    pub undervolt_test: String,
    pub overtemp_test: String,
    pub output_config: String,
    pub sense_line_test: String,
    pub spi_test: String,
    pub assembled: String,
    pub sbc_crate: String,
    pub start_time: String,
    pub end_time: String,
    pub final_qa: String,
    pub subtype: String,
    pub comment: String,
}

pub struct Lvr {
    serials: Vec<Regex>,
}

impl Family for Lvr {
    const NAME: &'static str = "LVR";
    const DEFAULT_ANCHOR: usize = 6;

    type Category = LvrCategory;
    type Record = LvrRecord;

    fn new() -> Result<Self, EngineError> {
        let serials = SERIAL_PATTERNS
            .iter()
            .map(|pattern| compile(Self::NAME, pattern))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { serials })
    }

    fn deltas() -> &'static [(&'static str, i32)] {
        DELTAS
    }

    fn categories() -> &'static [LvrCategory] {
        &[
            LvrCategory::A12,
            LvrCategory::A25,
            LvrCategory::Ms15,
            LvrCategory::Other,
        ]
    }

    fn classify<R: Row>(
        &self,
        schema: &ColumnSchema,
        row: &R,
    ) -> Result<Classification<LvrCategory, LvrRecord>, EngineError> {
        let serial = match schema.field(row, "Serial")? {
            Some(serial) => serial,
            None => return Ok(Classification::Rejected(RejectReason::ShortRow)),
        };
        if !self.serials.iter().any(|pattern| pattern.is_match(serial)) {
            return Ok(Classification::Rejected(RejectReason::UnmatchedIdentifier));
        }

        let record = match decode(schema, row)? {
            Some(record) => record,
            None => return Ok(Classification::Rejected(RejectReason::ShortRow)),
        };

        let category = match record.lvr_type.as_str() {
            "12A" => LvrCategory::A12,
            "25A" => LvrCategory::A25,
            "15MS" => LvrCategory::Ms15,
            _ => LvrCategory::Other,
        };

        Ok(Classification::Accepted {
            category,
            key: record.id.clone(),
            record,
            quantity: 1,
        })
    }
}

fn decode<R: Row>(schema: &ColumnSchema, row: &R) -> Result<Option<LvrRecord>, EngineError> {
    Ok(Some(LvrRecord {
        id: field!(schema, row, "ID"),
        location: field!(schema, row, "Location"),
        serial: field!(schema, row, "Serial"),
        ccm: field!(schema, row, "CCM"),
        lvr_type: field!(schema, row, "LVR_Type"),
        voltage_check: field!(schema, row, "Voltage_Check"),
        fpga: field!(schema, row, "FPGA"),
        undervolt_overtemp_config: field!(schema, row, "Undervolt_Overtemp_Config"),
        undervolt_test: field!(schema, row, "Undervolt_Test"),
        overtemp_test: field!(schema, row, "Overtemp_Test"),
        output_config: field!(schema, row, "Output_Config"),
        sense_line_test: field!(schema, row, "Sense_Line_Test"),
        spi_test: field!(schema, row, "SPI_Test"),
        assembled: field!(schema, row, "Assembled"),
        sbc_crate: field!(schema, row, "SBC_Crate"),
        start_time: field!(schema, row, "Start_Time"),
        end_time: field!(schema, row, "End_Time"),
        final_qa: field!(schema, row, "Final_QA"),
        subtype: field!(schema, row, "Subtype"),
        comment: field!(schema, row, "Comment"),
    }))
}

/// All eight bench tests must be affirmative to pass initial QA.
fn passes_initial_qa(record: &LvrRecord) -> bool {
    [
        &record.voltage_check,
        &record.fpga,
        &record.undervolt_overtemp_config,
        &record.undervolt_test,
        &record.overtemp_test,
        &record.output_config,
        &record.sense_line_test,
        &record.spi_test,
    ]
    .into_iter()
    .all(|value| affirmative(value))
}

/// Initial QA pass/fail counts per subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InitialQaReport {
    pub passed_12a: u64,
    pub passed_25a: u64,
    pub passed_15ms: u64,
    pub failed_12a: u64,
    pub failed_25a: u64,
    pub failed_15ms: u64,
}

pub fn initial_qa(store: &CategoryStore<LvrCategory, LvrRecord>) -> InitialQaReport {
    let passed = |category: LvrCategory| {
        store
            .records(category)
            .filter(|(_, record)| passes_initial_qa(record))
            .count() as u64
    };
    let passed_12a = passed(LvrCategory::A12);
    let passed_25a = passed(LvrCategory::A25);
    let passed_15ms = passed(LvrCategory::Ms15);
    InitialQaReport {
        passed_12a,
        passed_25a,
        passed_15ms,
        failed_12a: store.count(LvrCategory::A12) - passed_12a,
        failed_25a: store.count(LvrCategory::A25) - passed_25a,
        failed_15ms: store.count(LvrCategory::Ms15) - passed_15ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::processor::Processor;

    /// Build a full-width row with the LVR block at the default anchor
    /// (serial in column 6). `qa` fills all eight bench-test fields.
    fn row(id: &str, serial: &str, lvr_type: &str, qa: &str) -> Vec<String> {
        let mut row: Vec<String> = vec![String::new(); 24];
        row[4] = id.to_string();
        row[5] = "Rack 3".to_string();
        row[6] = serial.to_string();
        row[7] = "CCM-17".to_string();
        row[8] = lvr_type.to_string();
        for idx in 9..=16 {
            row[idx] = qa.to_string();
        }
        row
    }

    #[test]
    fn each_serial_variant_is_accepted() {
        let mut processor = Processor::<Lvr>::new().unwrap();
        for (idx, serial) in ["WVJCZ-001", "WVJEN-002", "WVJER-003", "WVJES-004"]
            .iter()
            .enumerate()
        {
            let assigned = processor
                .ingest_row(&row(&format!("L{idx}"), serial, "12A", "yes"))
                .unwrap();
            assert_eq!(assigned, Some(LvrCategory::A12));
        }
        assert_eq!(processor.store().total(), 4);
    }

    #[test]
    fn unmatched_serial_is_neither_stored_nor_counted() {
        let mut processor = Processor::<Lvr>::new().unwrap();
        processor
            .ingest_row(&row("L1", "WVJCE-001", "12A", "yes"))
            .unwrap();
        assert_eq!(processor.store().total(), 0);
        for &category in Lvr::categories() {
            assert_eq!(processor.store().stored(category), 0);
        }
        assert_eq!(processor.rejected_total(), 1);
    }

    #[test]
    fn subtype_comes_from_the_type_column_alone() {
        let mut processor = Processor::<Lvr>::new().unwrap();
        processor
            .ingest(vec![
                row("L1", "WVJCZ-001", "12A", "yes"),
                row("L2", "WVJCZ-002", "25A", "yes"),
                row("L3", "WVJCZ-003", "15MS", "yes"),
                row("L4", "WVJCZ-004", "15ms", "yes"), // exact case required
            ])
            .unwrap();

        let store = processor.store();
        assert_eq!(store.count(LvrCategory::A12), 1);
        assert_eq!(store.count(LvrCategory::A25), 1);
        assert_eq!(store.count(LvrCategory::Ms15), 1);
        assert_eq!(store.count(LvrCategory::Other), 1);
    }

    #[test]
    fn accepted_records_land_in_exactly_one_bucket() {
        let mut processor = Processor::<Lvr>::new().unwrap();
        processor
            .ingest_row(&row("L9", "WVJES-009", "25A", "yes"))
            .unwrap();

        let store = processor.store();
        let homes: usize = Lvr::categories()
            .iter()
            .filter(|&&category| store.get(category, "L9").is_some())
            .count();
        assert_eq!(homes, 1);
    }

    #[test]
    fn initial_qa_requires_all_eight_fields() {
        let mut processor = Processor::<Lvr>::new().unwrap();
        let mut seven_of_eight = row("L2", "WVJCZ-002", "12A", "Yes");
        seven_of_eight[16] = String::new(); // SPI test never recorded
        processor
            .ingest(vec![row("L1", "WVJCZ-001", "12A", "Yes"), seven_of_eight])
            .unwrap();

        let qa = initial_qa(processor.store());
        assert_eq!(qa.passed_12a, 1);
        assert_eq!(qa.failed_12a, 1);
        assert_eq!(qa.passed_25a + qa.failed_25a, 0);
        assert_eq!(qa.passed_15ms + qa.failed_15ms, 0);
    }

    #[test]
    fn rebased_anchor_reads_the_same_block() {
        let mut processor = Processor::<Lvr>::with_anchor(2).unwrap();
        let mut shifted: Vec<String> = vec![String::new(); 20];
        shifted[0] = "L1".to_string();
        shifted[1] = "Rack 3".to_string();
        shifted[2] = "WVJEN-010".to_string();
        shifted[3] = "CCM-2".to_string();
        shifted[4] = "15MS".to_string();
        for idx in 5..=12 {
            shifted[idx] = "yes".to_string();
        }
        processor.ingest_row(&shifted).unwrap();
        assert_eq!(processor.store().count(LvrCategory::Ms15), 1);
    }
}
