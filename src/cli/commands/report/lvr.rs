//! LVR production report

use miette::Result;
use tabled::{builder::Builder, settings::Style};

use crate::cli::commands::{load_processor, write_output};
use crate::cli::helpers::{or_no_comment, truncate_str};
use crate::cli::GlobalOpts;
use crate::engine::families::lvr::{self, Lvr, LvrCategory};
use crate::engine::Family;

use super::ReportArgs;

pub fn run(args: ReportArgs, _global: &GlobalOpts) -> Result<()> {
    let processor = load_processor::<Lvr>(&args.file, args.anchor)?;
    let store = processor.store();

    let qa = lvr::initial_qa(store);

    let mut output = String::new();
    output.push_str("# LVR Production Report\n\n");

    output.push_str("## Summary\n\n");
    let mut summary = Builder::default();
    summary.push_record(["Subtype", "Boards", "Initial QA passed", "Initial QA failed"]);
    for (category, passed, failed) in [
        (LvrCategory::A12, qa.passed_12a, qa.failed_12a),
        (LvrCategory::A25, qa.passed_25a, qa.failed_25a),
        (LvrCategory::Ms15, qa.passed_15ms, qa.failed_15ms),
    ] {
        summary.push_record([
            category.to_string(),
            store.count(category).to_string(),
            passed.to_string(),
            failed.to_string(),
        ]);
    }
    summary.push_record([
        LvrCategory::Other.to_string(),
        store.count(LvrCategory::Other).to_string(),
        "-".to_string(),
        "-".to_string(),
    ]);
    summary.push_record([
        "total".to_string(),
        store.total().to_string(),
        String::new(),
        String::new(),
    ]);
    output.push_str(&summary.build().with(Style::markdown()).to_string());
    output.push('\n');

    output.push_str(
        "\nInitial QA requires an affirmative result in all eight bench tests: voltage \
         check, FPGA, undervolt/overtemp config, undervolt test, overtemp test, output \
         config, sense line test, and SPI test.\n",
    );

    for &category in Lvr::categories() {
        if store.stored(category) == 0 {
            continue;
        }
        output.push_str(&format!("\n## {category} Boards\n\n"));
        let mut boards = Builder::default();
        boards.push_record(["ID", "Serial", "CCM", "Location", "Comment"]);
        for (_, record) in store.records(category) {
            let comment = truncate_str(or_no_comment(&record.comment), 60);
            boards.push_record([
                record.id.as_str(),
                record.serial.as_str(),
                record.ccm.as_str(),
                record.location.as_str(),
                comment.as_str(),
            ]);
        }
        output.push_str(&boards.build().with(Style::markdown()).to_string());
        output.push('\n');
    }

    write_output(&output, args.output)?;
    Ok(())
}
