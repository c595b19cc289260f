//! Command implementations

pub mod chart;
pub mod ingest;
pub mod report;

use console::style;
use csv::ReaderBuilder;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::engine::{Family, Processor};

/// Open a CSV export and run one family's ingestion pass over it.
///
/// The source is read without a header row; the acceptance test is what
/// filters out headers, blanks, and unrelated rows. Rows the CSV reader
/// itself cannot parse are reported to stderr and skipped, so one bad row
/// never aborts the pass.
pub(crate) fn load_processor<F: Family>(
    path: &Path,
    anchor: Option<usize>,
) -> Result<Processor<F>> {
    if !path.exists() {
        return Err(miette::miette!("File not found: {}", path.display()));
    }

    let mut processor = match anchor {
        Some(anchor) => Processor::with_anchor(anchor)?,
        None => Processor::new()?,
    };

    let file = File::open(path).into_diagnostic()?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    for (row_idx, result) in rdr.records().enumerate() {
        match result {
            Ok(record) => {
                processor.ingest_row(&record)?;
            }
            Err(e) => {
                eprintln!(
                    "{} Row {}: CSV parse error: {}",
                    style("✗").red(),
                    row_idx + 1,
                    e
                );
            }
        }
    }

    Ok(processor)
}

/// Write rendered output to a file, or to stdout when no path is given.
pub(crate) fn write_output(content: &str, output_path: Option<PathBuf>) -> Result<()> {
    match output_path {
        Some(path) => {
            let file = File::create(&path).into_diagnostic()?;
            let mut writer = BufWriter::new(file);
            writer.write_all(content.as_bytes()).into_diagnostic()?;
            println!("Report written to: {}", path.display());
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
