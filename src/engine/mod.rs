//! Record classification and aggregation engine
//!
//! Four board families (DCB, LVR, CCM, Backplane) share one generic
//! classify/store/aggregate pipeline, parameterized by a per-family
//! configuration: the column schema deltas, the identifier patterns,
//! the category rule, and the QA field list.
//!
//! Each family is processed as one synchronous pass over a row source:
//! read row, classify, insert, increment counter. Processors own their
//! schema, stores, and counters exclusively; there is no state shared
//! across families or across runs.

pub mod error;
pub mod families;
pub mod processor;
pub mod schema;
pub mod store;

pub use error::EngineError;
pub use processor::{Classification, Family, Processor, RejectReason};
pub use schema::{ColumnSchema, Row};
pub use store::CategoryStore;
