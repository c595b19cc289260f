//! `bpt chart` command - emit chart-ready QA tuples as JSON
//!
//! The engine exposes numeric tuples only; rendering is left to whatever
//! plotting tool consumes the JSON.

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::args::FamilyKind;
use crate::cli::GlobalOpts;
use crate::engine::families::backplane::{self, Backplane};
use crate::engine::families::ccm::Ccm;
use crate::engine::families::dcb::{self, Dcb, DcbCategory};
use crate::engine::families::lvr::{self, Lvr, LvrCategory};
use crate::engine::Family;

use super::{load_processor, write_output};

#[derive(clap::Args, Debug)]
pub struct ChartArgs {
    /// Board family to chart
    #[arg(value_enum)]
    pub family: FamilyKind,

    /// CSV export to read
    pub file: PathBuf,

    /// Re-base the family's anchor column
    #[arg(long)]
    pub anchor: Option<usize>,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Serialize)]
struct DcbChart {
    family: &'static str,
    total: u64,
    /// [assembled, unassembled, other]
    categories: [u64; 3],
    /// [assembled, everything else]
    assembly: [u64; 2],
    /// [fused, unfused] over assembled boards
    fused: [u64; 2],
    /// [passed, failed] over assembled boards
    initial_qa: [u64; 2],
}

#[derive(Serialize)]
struct LvrChart {
    family: &'static str,
    total: u64,
    /// [12A, 25A, 15MS, other]
    subtypes: [u64; 4],
    /// [passed 12A, passed 25A, passed 15MS, failed 12A, failed 25A, failed 15MS]
    initial_qa: [u64; 6],
}

#[derive(Serialize)]
struct CcmChart {
    family: &'static str,
    rolls: u64,
    /// Good units per type: [12A, 12M, 12S, 15M, 15S, 25A]
    good_units: [u64; 6],
}

#[derive(Serialize)]
struct BackplaneChart {
    family: &'static str,
    total: u64,
    /// [true passed, true failed, mirror passed, mirror failed]
    qa: [u64; 4],
}

pub fn run(args: ChartArgs, _global: &GlobalOpts) -> Result<()> {
    let json = match args.family {
        FamilyKind::Dcb => {
            let processor = load_processor::<Dcb>(&args.file, args.anchor)?;
            let store = processor.store();
            let fused = dcb::fused_split(store);
            let qa = dcb::initial_qa(store);
            let assembled = store.count(DcbCategory::Assembled);
            to_json(&DcbChart {
                family: Dcb::NAME,
                total: store.total(),
                categories: [
                    assembled,
                    store.count(DcbCategory::Unassembled),
                    store.count(DcbCategory::Other),
                ],
                assembly: [assembled, store.total() - assembled],
                fused: [fused.fused, fused.unfused],
                initial_qa: [qa.passed, qa.failed],
            })?
        }
        FamilyKind::Lvr => {
            let processor = load_processor::<Lvr>(&args.file, args.anchor)?;
            let store = processor.store();
            let qa = lvr::initial_qa(store);
            to_json(&LvrChart {
                family: Lvr::NAME,
                total: store.total(),
                subtypes: [
                    store.count(LvrCategory::A12),
                    store.count(LvrCategory::A25),
                    store.count(LvrCategory::Ms15),
                    store.count(LvrCategory::Other),
                ],
                initial_qa: [
                    qa.passed_12a,
                    qa.passed_25a,
                    qa.passed_15ms,
                    qa.failed_12a,
                    qa.failed_25a,
                    qa.failed_15ms,
                ],
            })?
        }
        FamilyKind::Ccm => {
            let processor = load_processor::<Ccm>(&args.file, args.anchor)?;
            let store = processor.store();
            let mut good_units = [0u64; 6];
            for (idx, &category) in Ccm::categories().iter().enumerate() {
                good_units[idx] = store.count(category);
            }
            to_json(&CcmChart {
                family: Ccm::NAME,
                rolls: store.total(),
                good_units,
            })?
        }
        FamilyKind::Backplane => {
            let processor = load_processor::<Backplane>(&args.file, args.anchor)?;
            let store = processor.store();
            let qa = backplane::qa_report(store);
            to_json(&BackplaneChart {
                family: Backplane::NAME,
                total: store.total(),
                qa: [
                    qa.true_passed,
                    qa.true_failed,
                    qa.mirror_passed,
                    qa.mirror_failed,
                ],
            })?
        }
    };

    write_output(&json, args.output)
}

fn to_json<T: Serialize>(chart: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(chart).into_diagnostic()?;
    json.push('\n');
    Ok(json)
}
