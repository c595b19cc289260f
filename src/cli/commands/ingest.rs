//! `bpt ingest` command - classify a CSV export and print tallies

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::args::FamilyKind;
use crate::cli::GlobalOpts;
use crate::engine::families::backplane::Backplane;
use crate::engine::families::ccm::Ccm;
use crate::engine::families::dcb::Dcb;
use crate::engine::families::lvr::Lvr;
use crate::engine::Family;

use super::load_processor;

#[derive(clap::Args, Debug)]
pub struct IngestArgs {
    /// Board family to ingest
    #[arg(value_enum)]
    pub family: FamilyKind,

    /// CSV export to read
    pub file: PathBuf,

    /// Re-base the family's anchor column (default: the export's layout)
    #[arg(long)]
    pub anchor: Option<usize>,

    /// Show a breakdown of rejected rows
    #[arg(long)]
    pub show_rejected: bool,
}

pub fn run(args: IngestArgs, global: &GlobalOpts) -> Result<()> {
    match args.family {
        FamilyKind::Dcb => ingest_family::<Dcb>(&args, global),
        FamilyKind::Lvr => ingest_family::<Lvr>(&args, global),
        FamilyKind::Ccm => ingest_family::<Ccm>(&args, global),
        FamilyKind::Backplane => ingest_family::<Backplane>(&args, global),
    }
}

fn ingest_family<F: Family>(args: &IngestArgs, global: &GlobalOpts) -> Result<()> {
    let processor = load_processor::<F>(&args.file, args.anchor)?;
    let store = processor.store();

    if !global.quiet {
        println!(
            "{} Ingested {} records from {}",
            style("→").blue(),
            style(F::NAME).cyan(),
            style(args.file.display()).yellow()
        );
        println!();
    }

    for &category in F::categories() {
        println!(
            "  {:<14} {}",
            category.to_string(),
            style(store.count(category)).cyan()
        );
    }
    println!("  {:<14} {}", "total", style(store.total()).cyan().bold());

    if args.show_rejected {
        println!();
        println!(
            "  {:<14} {}",
            "rejected",
            style(processor.rejected_total()).dim()
        );
        for (reason, count) in processor.rejected() {
            println!("    {:<22} {}", reason.to_string(), style(count).dim());
        }
    }

    Ok(())
}
