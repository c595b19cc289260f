//! DCB production report

use miette::Result;
use tabled::{builder::Builder, settings::Style};

use crate::cli::commands::{load_processor, write_output};
use crate::cli::helpers::{or_na, or_no_comment, truncate_str};
use crate::cli::GlobalOpts;
use crate::engine::families::dcb::{self, Dcb, DcbCategory};

use super::ReportArgs;

pub fn run(args: ReportArgs, _global: &GlobalOpts) -> Result<()> {
    let processor = load_processor::<Dcb>(&args.file, args.anchor)?;
    let store = processor.store();

    let fused = dcb::fused_split(store);
    let qa = dcb::initial_qa(store);

    let mut output = String::new();
    output.push_str("# DCB Production Report\n\n");

    output.push_str("## Summary\n\n");
    let mut summary = Builder::default();
    summary.push_record(["Metric", "Count"]);
    summary.push_record(["Total boards", &store.total().to_string()]);
    summary.push_record([
        "Assembled",
        &store.count(DcbCategory::Assembled).to_string(),
    ]);
    summary.push_record([
        "Unassembled",
        &store.count(DcbCategory::Unassembled).to_string(),
    ]);
    summary.push_record(["Other", &store.count(DcbCategory::Other).to_string()]);
    summary.push_record(["Fused (of assembled)", &fused.fused.to_string()]);
    summary.push_record(["Initial QA passed", &qa.passed.to_string()]);
    summary.push_record(["Initial QA failed", &qa.failed.to_string()]);
    output.push_str(&summary.build().with(Style::markdown()).to_string());
    output.push('\n');

    output.push_str("\n## Definitions\n\n");
    output.push_str(
        "- Assembled: has a serial number and \"yes\" recorded in the Assembled column.\n",
    );
    output.push_str("- Unassembled: has a serial number and a blank Assembled column.\n");
    output.push_str(
        "- Other: Assembled column holds anything else; either a special condition or a typo.\n",
    );

    if store.stored(DcbCategory::Assembled) > 0 {
        output.push_str("\n## Assembled Boards\n\n");
        let mut boards = Builder::default();
        boards.push_record(["ID", "Location", "Fused", "PRBS", "1.5V", "2.5V", "Comment"]);
        for (_, record) in store.records(DcbCategory::Assembled) {
            let comment = truncate_str(or_no_comment(&record.comments), 60);
            boards.push_record([
                record.id.as_str(),
                record.location.as_str(),
                record.fused.as_str(),
                record.prbs.as_str(),
                or_na(&record.volt_1v5),
                or_na(&record.volt_2v5),
                comment.as_str(),
            ]);
        }
        output.push_str(&boards.build().with(Style::markdown()).to_string());
        output.push('\n');
    }

    if store.stored(DcbCategory::Unassembled) > 0 {
        output.push_str("\n## Unassembled Boards\n\n");
        let mut boards = Builder::default();
        boards.push_record(["ID", "Location", "Comment"]);
        for (_, record) in store.records(DcbCategory::Unassembled) {
            let comment = truncate_str(or_no_comment(&record.comments), 60);
            boards.push_record([
                record.id.as_str(),
                record.location.as_str(),
                comment.as_str(),
            ]);
        }
        output.push_str(&boards.build().with(Style::markdown()).to_string());
        output.push('\n');
    }

    if store.stored(DcbCategory::Other) > 0 {
        output.push_str("\n## Other Boards\n\n");
        let mut boards = Builder::default();
        boards.push_record(["ID", "Status", "Location", "Fused", "PRBS", "1.5V", "2.5V", "Comment"]);
        for (_, record) in store.records(DcbCategory::Other) {
            let comment = truncate_str(or_no_comment(&record.comments), 60);
            boards.push_record([
                record.id.as_str(),
                record.assembled.as_str(),
                record.location.as_str(),
                record.fused.as_str(),
                record.prbs.as_str(),
                or_na(&record.volt_1v5),
                or_na(&record.volt_2v5),
                comment.as_str(),
            ]);
        }
        output.push_str(&boards.build().with(Style::markdown()).to_string());
        output.push('\n');
    }

    write_output(&output, args.output)?;
    Ok(())
}
