//! Engine error taxonomy
//!
//! Configuration errors are unconditionally fatal: they indicate a broken
//! column mapping or pattern table, not bad input data. Bad input rows are
//! never errors; they surface as `RejectReason` variants instead.

use miette::Diagnostic;
use thiserror::Error;

/// Fatal configuration errors raised by the classification engine
#[derive(Debug, Error, Diagnostic)]
pub enum EngineError {
    /// An attribute name was queried that is not in the family's column
    /// table. A caller bug, not recoverable input.
    #[error("unknown attribute '{attribute}' in the {family} column schema")]
    #[diagnostic(
        code(bpt::schema::unknown_attribute),
        help("attribute names are fixed per board family; check the caller against the family's column table")
    )]
    UnknownAttribute {
        family: &'static str,
        attribute: String,
    },

    /// The requested anchor offset would place an attribute before column 0.
    #[error("anchor offset {anchor} places attribute '{attribute}' before column 0 in the {family} column schema")]
    #[diagnostic(
        code(bpt::schema::anchor_underflow),
        help("the {family} schema has attributes left of its anchor column; pass a larger --anchor")
    )]
    AnchorUnderflow {
        family: &'static str,
        attribute: &'static str,
        anchor: usize,
    },

    /// An identifier pattern in a family's table failed to compile.
    #[error("invalid identifier pattern for the {family} family")]
    #[diagnostic(code(bpt::classify::pattern))]
    Pattern {
        family: &'static str,
        #[source]
        source: regex::Error,
    },
}
