use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use weighted_choice::*;

use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;
use text_diff::print_diff;

pub mod access;
pub mod commands;
pub mod config_reader;
mod io_common;
mod io_csv;
mod io_excel;

use crate::bot::access::Invocation;
use crate::bot::config_reader::*;

#[derive(Debug, Snafu)]
pub enum BotError {
    #[snafu(display("Error opening config file {path}"))]
    OpeningConfig {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing config file {path}"))]
    ParsingConfig {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Unknown spreadsheet provider {provider}, expected csv or xlsx"))]
    UnknownProvider { provider: String },
    #[snafu(display("Unknown layout {name}, expected A or B"))]
    UnknownLayout { name: String },
    #[snafu(display("Unknown weighting mode {mode}, expected continuous or bucketed"))]
    UnknownWeighting { mode: String },
    #[snafu(display("The bucket threshold must be positive, got {threshold}"))]
    InvalidThreshold { threshold: f64 },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of {path}"))]
    CsvLineParse {
        source: csv::Error,
        path: String,
        lineno: usize,
    },
    #[snafu(display("Error opening Excel file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Missing worksheet {name} in {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display("The spreadsheet does not match the configured layout: {source}"))]
    Sheet { source: ChoiceError },
    #[snafu(display("Error reading reference file {path}"))]
    OpeningReference {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("The reply differs from the reference in {path}"))]
    ReferenceMismatch { path: String },
}

pub type BotResult<T> = Result<T, BotError>;

/// One command sent to the bot, as received from the command line.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct BotRequest {
    pub config_path: String,
    pub invocation: Invocation,
    pub seed: Option<u64>,
    pub reference_path: Option<String>,
}

/// Reads the grid pointed to by the configuration.
///
/// Relative file paths are resolved from `root_path`, the directory of the
/// configuration file.
pub fn read_grid(root_path: &Path, config: &BotConfig) -> BotResult<Vec<Vec<String>>> {
    let source = &config.spreadsheet;
    let p: PathBuf = root_path.join(&source.file_path);
    let path = p.as_path().display().to_string();
    info!("Attempting to read spreadsheet {:?}", path);
    let grid = match source.provider.as_str() {
        "csv" => io_csv::read_csv_grid(&path)?,
        "xlsx" => io_excel::read_excel_grid(
            &path,
            &source.worksheet_name(),
            &NumberFormat::from_locale(source.locale()),
        )?,
        x => {
            return UnknownProviderSnafu {
                provider: x.to_string(),
            }
            .fail()
        }
    };
    let clipped = io_common::clip_grid(grid, source.max_rows(), source.max_columns());
    debug!("read_grid: {} rows", clipped.len());
    Ok(clipped)
}

/// Reads and parses the spreadsheet.
pub fn load_sheet(root_path: &Path, config: &BotConfig) -> BotResult<SheetData> {
    let grid = read_grid(root_path, config)?;
    parse_sheet(&grid, &config.layout()?, config.spreadsheet.locale()).context(SheetSnafu {})
}

/// Runs one command and returns the reply the bot would send, if any.
pub fn run_bot(request: &BotRequest) -> BotResult<Option<String>> {
    let config = read_config(&request.config_path)?;
    info!("config: {:?}", config);
    let root_p: PathBuf = Path::new(request.config_path.as_str())
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_default();

    let mut rng: StdRng = match request.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let loader = || load_sheet(&root_p, &config);
    let reply = commands::dispatch(&config, &request.invocation, &loader, &mut rng)?;

    if let (Some(reference_path), Some(text)) = (&request.reference_path, &reply) {
        check_reference(reference_path, text)?;
    }
    Ok(reply)
}

/// Compares a reply with the content of a reference file.
///
/// The differences are printed before failing.
pub fn check_reference(reference_path: &str, reply: &str) -> BotResult<()> {
    let reference = fs::read_to_string(reference_path).context(OpeningReferenceSnafu {
        path: reference_path.to_string(),
    })?;
    let reference = reference.trim_end();
    if reference != reply.trim_end() {
        warn!("Found differences with the reference {:?}", reference_path);
        print_diff(reference, reply.trim_end(), "\n");
        return ReferenceMismatchSnafu {
            path: reference_path.to_string(),
        }
        .fail();
    }
    Ok(())
}
