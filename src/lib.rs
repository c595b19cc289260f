//! BPT: Board Production Tracker
//!
//! A CLI for classifying board production records from CSV database
//! exports and deriving per-category counts and QA statistics.

pub mod cli;
pub mod engine;
