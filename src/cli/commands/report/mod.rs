//! `bpt report` command - per-family production reports

mod backplane;
mod ccm;
mod dcb;
mod lvr;

use clap::Subcommand;
use miette::Result;
use std::path::PathBuf;

use crate::cli::GlobalOpts;

#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// DCB assembly status and initial QA summary
    Dcb(ReportArgs),

    /// LVR subtype breakdown and initial QA summary
    Lvr(ReportArgs),

    /// CCM good-unit tallies by roll type
    Ccm(ReportArgs),

    /// Backplane QA summary for true and mirror variants
    Backplane(ReportArgs),
}

pub fn run(cmd: ReportCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ReportCommands::Dcb(args) => dcb::run(args, global),
        ReportCommands::Lvr(args) => lvr::run(args, global),
        ReportCommands::Ccm(args) => ccm::run(args, global),
        ReportCommands::Backplane(args) => backplane::run(args, global),
    }
}

/// Arguments shared by every family report.
#[derive(clap::Args, Debug)]
pub struct ReportArgs {
    /// CSV export to read
    pub file: PathBuf,

    /// Re-base the family's anchor column
    #[arg(long)]
    pub anchor: Option<usize>,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}
