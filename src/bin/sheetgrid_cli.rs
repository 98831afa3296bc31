//! CLI tool for sheetgrid - loads an XHTML table and runs grid operations on it
//!
//! Usage:
//!   sheetgrid_cli table.xhtml grid                      # JSON dump of the matrices
//!   sheetgrid_cli table.xhtml copy --range B2:C4        # TSV of a range
//!   sheetgrid_cli table.xhtml sort --col 1 --desc       # TSV after sorting
//!   sheetgrid_cli table.xhtml filter --col 0 --equals x # TSV after filtering
//!   sheetgrid_cli table.xhtml sum --range B2:B9         # grouped sum
//!
//! Set `RUST_LOG=debug` for library diagnostics on stderr.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use sheetgrid::cell_ref::parse_cell_range;
use sheetgrid::config::SessionConfig;
use sheetgrid::error::{Result, SheetGridError};
use sheetgrid::grid::LogicalMatrix;
use sheetgrid::sum::format_sum;
use sheetgrid::types::{CellId, CellRange, FilterPredicate};
use sheetgrid::viewer::TableSession;

#[derive(Parser)]
#[command(name = "sheetgrid_cli")]
#[command(about = "Inspect, copy, sort, filter and sum an XHTML table")]
#[command(version)]
struct Cli {
    /// XHTML file containing a <table>
    input: PathBuf,

    /// JSON session options
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the head, body and foot matrices as cell text (JSON)
    Grid,

    /// Print a range, or the whole table, as TSV
    Copy {
        /// A1-style range of the combined matrix
        #[arg(long)]
        range: Option<String>,
    },

    /// Sort body rows by a column and print the table as TSV
    Sort {
        /// 0-based column index
        #[arg(long)]
        col: usize,

        /// Descending order
        #[arg(long)]
        desc: bool,
    },

    /// Filter body rows on a column and print the visible table as TSV
    Filter {
        /// 0-based column index
        #[arg(long)]
        col: usize,

        #[command(flatten)]
        predicate: PredicateArgs,
    },

    /// Print the sum of the numbers in a range
    Sum {
        /// A1-style range of the combined matrix
        #[arg(long)]
        range: String,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct PredicateArgs {
    /// Keep rows whose text equals this value
    #[arg(long)]
    equals: Option<String>,

    /// Keep rows whose text differs from this value
    #[arg(long)]
    not_equals: Option<String>,

    /// Keep rows whose text contains this value
    #[arg(long)]
    contains: Option<String>,
}

impl PredicateArgs {
    fn into_predicate(self) -> Option<FilterPredicate> {
        self.equals
            .map(FilterPredicate::Equals)
            .or(self.not_equals.map(FilterPredicate::NotEquals))
            .or(self.contains.map(FilterPredicate::Contains))
    }
}

#[derive(Serialize)]
struct GridDump {
    head: Vec<Vec<String>>,
    body: Vec<Vec<String>>,
    foot: Vec<Vec<String>>,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => SessionConfig::from_json(&fs::read_to_string(path)?)?,
        None => SessionConfig::default(),
    };
    let xhtml = fs::read_to_string(&cli.input)?;
    let mut session = TableSession::from_html(&xhtml, config)?;

    match cli.command {
        Command::Grid => {
            let grid = session.grid();
            let dump = GridDump {
                head: texts(&session, &grid.head),
                body: texts(&session, &grid.body),
                foot: texts(&session, &grid.foot),
            };
            println!("{}", serde_json::to_string_pretty(&dump)?);
        }
        Command::Copy { range } => {
            let tsv = match range {
                Some(r) => session.range_tsv(&parse_range(&r)?),
                None => session.copy_all(),
            };
            println!("{tsv}");
        }
        Command::Sort { col, desc } => {
            open_column_menu(&mut session, col)?;
            session.sort(!desc);
            println!("{}", session.copy_all());
        }
        Command::Filter { col, predicate } => {
            let predicate = predicate
                .into_predicate()
                .ok_or_else(|| SheetGridError::Parse("missing filter value".to_string()))?;
            open_column_menu(&mut session, col)?;
            if !session.filter(&predicate) {
                return Err(SheetGridError::Parse(
                    "filters need a table with a header row and a non-empty value".to_string(),
                ));
            }
            eprintln!("{} visible rows", session.visible_row_count());
            println!("{}", session.copy_all());
        }
        Command::Sum { range } => {
            let range = parse_range(&range)?;
            println!("{}", format_sum(session.range_sum(&range)));
        }
    }
    Ok(())
}

fn parse_range(a1: &str) -> Result<CellRange> {
    parse_cell_range(a1).ok_or_else(|| SheetGridError::Parse(format!("invalid range: {a1}")))
}

fn texts(session: &TableSession, matrix: &LogicalMatrix) -> Vec<Vec<String>> {
    matrix
        .rows()
        .iter()
        .map(|row| row.cells.iter().map(|id| session.cell_text(*id)).collect())
        .collect()
}

/// Open the context menu that sort and filter act on: the column header when
/// the table has one, otherwise the first body cell of the column.
fn open_column_menu(session: &mut TableSession, col: usize) -> Result<()> {
    let header: Option<CellId> = session
        .grid()
        .head
        .rows()
        .last()
        .and_then(|r| r.cells.get(col).copied());
    if let Some(h) = header {
        if session.context_header(h).is_some() {
            return Ok(());
        }
    }
    let body = session.grid().body.get(0, col);
    match body.and_then(|b| session.context_body(b, false)) {
        Some(_) => Ok(()),
        None => Err(SheetGridError::Parse(format!("column {col} is outside the table"))),
    }
}
