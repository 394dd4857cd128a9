use clap::Parser;
use color_eyre::Result;
use std::path::{Path, PathBuf};

use ifc_tabulator::export::{write_json_report, write_validated_xlsx};
use ifc_tabulator::extract::PropertyFilter;
use ifc_tabulator::model::CCI_COLUMNS;
use ifc_tabulator::pipeline::{
    consolidate, process_directory, validate, ProgressSink, ValidationReport,
};

#[derive(Parser, Debug)]
#[command(name = "ifc-tabulator")]
#[command(about = "IFC Tabulator - flatten IFC properties to CSV and a validated spreadsheet")]
#[command(version)]
struct Args {
    /// Directory tree containing IFC files
    input_dir: PathBuf,

    /// Directory receiving per-file CSVs and the validation workbook
    output_dir: PathBuf,

    /// Newline-delimited list of property names to retain
    #[arg(long, value_name = "FILE")]
    properties: Option<PathBuf>,

    /// Also export the consolidated table and flags as JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,
}

struct ConsoleProgress;

impl ProgressSink for ConsoleProgress {
    fn file_started(&mut self, index: usize, total: usize, name: &str) {
        println!("Processing file {index} of {total}: {name}");
    }

    fn file_failed(&mut self, path: &Path, reason: &str) {
        eprintln!("Error processing {}: {reason}", path.display());
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let filter = match &args.properties {
        Some(path) => {
            let filter = PropertyFilter::load(path)?;
            println!(
                "Loaded {} properties from {}",
                filter.names().len(),
                path.display()
            );
            filter
        }
        None => PropertyFilter::retain_all(),
    };

    let mut progress = ConsoleProgress;
    let outcome = process_directory(&args.input_dir, &args.output_dir, &filter, &mut progress)?;

    if outcome.total_files == 0 {
        println!("No IFC files found.");
        return Ok(());
    }

    let consolidated = consolidate(&outcome.tables, &filter, &CCI_COLUMNS);

    // A schema without the CCI columns still gets a workbook, just without
    // highlighting.
    let report = match validate(&consolidated) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("{err}");
            ValidationReport::default()
        }
    };

    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let workbook_path = args
        .output_dir
        .join(format!("validation_output_{stamp}.xlsx"));
    write_validated_xlsx(&consolidated, &report, &workbook_path)?;
    println!("Validation file created at: {}", workbook_path.display());

    if let Some(json_path) = &args.json {
        write_json_report(&consolidated, &report, json_path)?;
        println!("Exported JSON report: {}", json_path.display());
    }

    if !report.is_clean() {
        println!("{} cell(s) flagged invalid.", report.flags.len());
    }
    if !outcome.failures.is_empty() {
        println!("{} file(s) could not be processed:", outcome.failures.len());
        for failure in &outcome.failures {
            println!("  {}: {}", failure.path.display(), failure.reason);
        }
    }

    Ok(())
}
