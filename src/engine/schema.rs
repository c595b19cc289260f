//! Column schema - positional field resolution
//!
//! Source exports are positional: each family's attributes occupy
//! consecutive columns at fixed deltas from one anchor column. Re-basing
//! the anchor re-bases every attribute, so a schema is resolved once per
//! run and immutable afterward. Rows are read through the schema only.

use crate::engine::error::EngineError;

/// One row of source data: an ordered sequence of text fields.
///
/// The engine receives already-parsed rows and never opens the source
/// itself. Implemented for `csv::StringRecord` (the CLI row source) and
/// `Vec<String>` (tests and embedding callers).
pub trait Row {
    fn field(&self, index: usize) -> Option<&str>;
}

impl Row for csv::StringRecord {
    fn field(&self, index: usize) -> Option<&str> {
        self.get(index)
    }
}

impl Row for Vec<String> {
    fn field(&self, index: usize) -> Option<&str> {
        self.get(index).map(String::as_str)
    }
}

/// Immutable attribute-name-to-column mapping for one board family.
#[derive(Debug, Clone)]
pub struct ColumnSchema {
    family: &'static str,
    anchor: usize,
    deltas: &'static [(&'static str, i32)],
}

impl ColumnSchema {
    /// Resolve a family's fixed delta table against an anchor offset.
    ///
    /// Fails if any attribute would land before column 0 (the LVR table
    /// has attributes left of its anchor, so small anchors are invalid).
    pub fn resolve(
        family: &'static str,
        deltas: &'static [(&'static str, i32)],
        anchor: usize,
    ) -> Result<Self, EngineError> {
        for (attribute, delta) in deltas {
            if anchor as i64 + (*delta as i64) < 0 {
                return Err(EngineError::AnchorUnderflow {
                    family,
                    attribute,
                    anchor,
                });
            }
        }
        Ok(Self {
            family,
            anchor,
            deltas,
        })
    }

    pub fn family(&self) -> &'static str {
        self.family
    }

    pub fn anchor(&self) -> usize {
        self.anchor
    }

    /// Absolute column offset of an attribute.
    ///
    /// An unrecognized attribute name is a fatal configuration error, not
    /// a silent default.
    pub fn offset(&self, attribute: &str) -> Result<usize, EngineError> {
        let delta = self
            .deltas
            .iter()
            .find(|(name, _)| *name == attribute)
            .map(|(_, delta)| *delta)
            .ok_or_else(|| EngineError::UnknownAttribute {
                family: self.family,
                attribute: attribute.to_string(),
            })?;
        Ok((self.anchor as i64 + delta as i64) as usize)
    }

    /// Read an attribute from a row.
    ///
    /// `Ok(None)` means the row is shorter than the schema requires, which
    /// callers turn into an explicit `ShortRow` rejection.
    pub fn field<'r, R: Row>(
        &self,
        row: &'r R,
        attribute: &str,
    ) -> Result<Option<&'r str>, EngineError> {
        Ok(row.field(self.offset(attribute)?))
    }
}
