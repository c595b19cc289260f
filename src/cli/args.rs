//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{chart::ChartArgs, ingest::IngestArgs, report::ReportCommands};

#[derive(Parser)]
#[command(name = "bpt")]
#[command(author, version, about = "Board production tracking toolkit")]
#[command(
    long_about = "Classifies board production records from CSV database exports and reports per-category counts and QA statistics for the DCB, LVR, CCM and backplane families."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ingest a CSV export and print category tallies
    Ingest(IngestArgs),

    /// Generate production reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Emit chart-ready QA tuples as JSON
    Chart(ChartArgs),
}

/// Board family selector shared by the ingest and chart commands.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FamilyKind {
    Dcb,
    Lvr,
    Ccm,
    Backplane,
}
