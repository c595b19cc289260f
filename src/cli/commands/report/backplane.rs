//! Backplane production report

use miette::Result;
use tabled::{builder::Builder, settings::Style};

use crate::cli::commands::{load_processor, write_output};
use crate::cli::helpers::{or_na, or_no_comment, truncate_str};
use crate::cli::GlobalOpts;
use crate::engine::families::backplane::{self, Backplane, BackplaneCategory};
use crate::engine::Family;

use super::ReportArgs;

pub fn run(args: ReportArgs, _global: &GlobalOpts) -> Result<()> {
    let processor = load_processor::<Backplane>(&args.file, args.anchor)?;
    let store = processor.store();

    let qa = backplane::qa_report(store);

    let mut output = String::new();
    output.push_str("# Backplane Production Report\n\n");

    output.push_str("## QA Summary\n\n");
    let mut summary = Builder::default();
    summary.push_record(["Variant", "Boards", "QA passed", "QA failed"]);
    summary.push_record([
        "true".to_string(),
        store.count(BackplaneCategory::True).to_string(),
        qa.true_passed.to_string(),
        qa.true_failed.to_string(),
    ]);
    summary.push_record([
        "mirror".to_string(),
        store.count(BackplaneCategory::Mirror).to_string(),
        qa.mirror_passed.to_string(),
        qa.mirror_failed.to_string(),
    ]);
    summary.push_record([
        "total".to_string(),
        store.total().to_string(),
        (qa.true_passed + qa.mirror_passed).to_string(),
        (qa.true_failed + qa.mirror_failed).to_string(),
    ]);
    output.push_str(&summary.build().with(Style::markdown()).to_string());
    output.push('\n');

    for &category in Backplane::categories() {
        if store.stored(category) == 0 {
            continue;
        }
        output.push_str(&format!("\n## {category} Backplanes\n\n"));
        let mut boards = Builder::default();
        boards.push_record(["ID", "SN", "Variant", "Location", "Visual", "Burn-in", "QA", "Note"]);
        for (_, record) in store.records(category) {
            let note = truncate_str(or_no_comment(&record.note), 60);
            boards.push_record([
                record.id.as_str(),
                record.sn.as_str(),
                record.variant.as_str(),
                record.location.as_str(),
                or_na(&record.visual_inspection),
                or_na(&record.burn_in),
                or_na(&record.qa),
                note.as_str(),
            ]);
        }
        output.push_str(&boards.build().with(Style::markdown()).to_string());
        output.push('\n');
    }

    write_output(&output, args.output)?;
    Ok(())
}
