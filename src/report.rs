use log::{debug, info, warn};

use contest_ranking::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use calamine::{open_workbook, DataType, Reader, Xlsx};

use text_diff::print_diff;

use crate::args::Args;
use crate::report::config_reader::*;
use crate::report::io_standings::ContestData;

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_output;
mod io_standings;
mod io_xlsx;

#[derive(Debug, Snafu)]
pub enum ReportError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Worksheet {name} not found in {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display("The roster {path} does not contain any row"))]
    EmptyRoster { path: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Could not understand the index {value}"))]
    ParsingJsonNumber { value: String },
    #[snafu(display("The contest API answered {status}: {comment}"))]
    ContestApi { status: String, comment: String },
    #[snafu(display("The standings row with rank {rank} has no party member"))]
    MissingHandle { rank: u32 },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of the CSV file"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Error writing the CSV report"))]
    CsvWrite { source: csv::Error },
    #[snafu(display("Error writing {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Either a configuration file or both the standings and the roster files must be provided"))]
    MissingInput {},
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},
    #[snafu(display("Cannot build the report"))]
    Standings { source: StandingsErrors },
    #[snafu(display("Error opening the reference report {path}"))]
    OpeningReference {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("The report differs from the reference {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type ReportResult<T> = Result<T, ReportError>;
pub type BReportResult<T> = Result<T, Box<ReportError>>;

fn read_roster(source: &RosterSource) -> BReportResult<Vec<RosterRecord>> {
    info!("Attempting to read roster file {:?}", source.file_path);
    let records = match source.provider()? {
        RosterProvider::Xlsx => io_xlsx::read_xlsx_roster(&source.file_path, source),
        RosterProvider::Csv => io_csv::read_csv_roster(&source.file_path, source),
    }?;
    debug!(
        "read_roster: {:?} records in {:?}",
        records.len(),
        source.file_path
    );
    Ok(records)
}

fn resolve_config(args: &Args) -> BReportResult<(ReportConfig, PathBuf)> {
    match (&args.config, &args.input, &args.roster) {
        (Some(config_path), _, _) => {
            let mut config = read_config(config_path)?;
            let root = Path::new(config_path.as_str())
                .parent()
                .context(MissingParentDirSnafu {})?
                .to_path_buf();
            config.resolve_paths(&root);
            Ok((config, root))
        }
        (None, Some(input), Some(roster)) => {
            let source = RosterSource::from_path(roster, args.excel_worksheet_name.clone());
            Ok((ReportConfig::simple(input, source), PathBuf::from(".")))
        }
        _ => Err(Box::new(ReportError::MissingInput {})),
    }
}

// Command line arguments take precedence over the configuration file.
fn apply_overrides(config: &mut ReportConfig, args: &Args) {
    if let Some(input) = &args.input {
        config.contest.standings_file = input.clone();
    }
    if args.config.is_some() {
        if let Some(roster) = &args.roster {
            config.roster_sources = vec![RosterSource::from_path(
                roster,
                args.excel_worksheet_name.clone(),
            )];
        }
    }
    if let Some(table_name) = &args.table_name {
        let mut output = config.output_settings.clone().unwrap_or(OutputSettings {
            output_directory: None,
            table_name: None,
            labels: None,
        });
        output.table_name = Some(table_name.clone());
        config.output_settings = Some(output);
    }
}

pub fn run_report(args: &Args) -> BReportResult<()> {
    let (mut config, root) = resolve_config(args)?;
    apply_overrides(&mut config, args);
    info!("config: {:?}", config);

    let mut rules = config.ranking_rules();
    rules.excluded_logins.extend(args.exclude.iter().cloned());

    let contest: ContestData = io_standings::read_standings(&config.contest.standings_file)?;
    info!(
        "Contest {:?}: {:?} problems, {:?} standing rows",
        config.contest.contest_id,
        contest.problems.len(),
        contest.standings.len()
    );

    let mut roster: Vec<RosterRecord> = Vec::new();
    for source in config.roster_sources.iter() {
        let mut records = read_roster(source)?;
        roster.append(&mut records);
    }
    info!("Roster: {:?} records", roster.len());

    let report = run_standings(&contest.standings, &roster, &contest.problems, &rules)
        .context(StandingsSnafu {})?;

    let report_csv = io_output::report_to_csv(&report)?;

    let out_path = output_path(args, &config, &root);
    io_output::write_output(&report_csv, &out_path)?;

    // The reference report, if provided for comparison
    if let Some(reference_path) = &args.reference {
        check_reference(&report_csv, reference_path)?;
    }

    Ok(())
}

// An empty --out keeps the location of the configuration.
fn output_path(args: &Args, config: &ReportConfig, root: &Path) -> String {
    match args.out.as_deref() {
        Some(out) if !out.is_empty() => out.to_string(),
        _ => config.output_path(root),
    }
}

fn check_reference(report_csv: &str, reference_path: &str) -> BReportResult<()> {
    let reference = fs::read_to_string(reference_path).context(OpeningReferenceSnafu {
        path: reference_path,
    })?;
    let reference = reference.replace("\r\n", "\n");
    if reference.trim_end() != report_csv.trim_end() {
        warn!("Found differences with the reference report");
        print_diff(reference.as_str(), report_csv, "\n");
        return Err(Box::new(ReportError::ReferenceMismatch {
            path: reference_path.to_string(),
        }));
    }
    info!("The report matches the reference {:?}", reference_path);
    Ok(())
}
