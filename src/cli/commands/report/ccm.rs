//! CCM production report

use miette::Result;
use tabled::{builder::Builder, settings::Style};

use crate::cli::commands::{load_processor, write_output};
use crate::cli::helpers::{or_no_comment, truncate_str};
use crate::cli::GlobalOpts;
use crate::engine::families::ccm::Ccm;
use crate::engine::Family;

use super::ReportArgs;

pub fn run(args: ReportArgs, _global: &GlobalOpts) -> Result<()> {
    let processor = load_processor::<Ccm>(&args.file, args.anchor)?;
    let store = processor.store();

    let mut output = String::new();
    output.push_str("# CCM Production Report\n\n");

    output.push_str("## Good Units by Roll Type\n\n");
    let mut summary = Builder::default();
    summary.push_record(["Type", "Good units", "Rolls"]);
    let mut good_units = 0u64;
    for &category in Ccm::categories() {
        good_units += store.count(category);
        summary.push_record([
            category.to_string(),
            store.count(category).to_string(),
            store.stored(category).to_string(),
        ]);
    }
    summary.push_record([
        "total".to_string(),
        good_units.to_string(),
        store.total().to_string(),
    ]);
    output.push_str(&summary.build().with(Style::markdown()).to_string());
    output.push('\n');

    output.push_str(
        "\nGood units sum the recorded good count of every roll; the roll column \
         counts rolls themselves.\n",
    );

    let mut rolls = Builder::default();
    rolls.push_record(["Roll", "Type", "Location", "Original", "Good", "Comment"]);
    let mut any = false;
    for &category in Ccm::categories() {
        for (_, record) in store.records(category) {
            any = true;
            let comment = truncate_str(or_no_comment(&record.comment), 60);
            rolls.push_record([
                record.roll_id.as_str(),
                record.ccm_type.as_str(),
                record.location.as_str(),
                record.original_count.as_str(),
                record.good_count.as_str(),
                comment.as_str(),
            ]);
        }
    }
    if any {
        output.push_str("\n## Rolls\n\n");
        output.push_str(&rolls.build().with(Style::markdown()).to_string());
        output.push('\n');
    }

    write_output(&output, args.output)?;
    Ok(())
}
