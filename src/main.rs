// ctsl-report - main.rs
//
// CLI adapter around the formatting and export pipeline. Handles:
// 1. CLI argument parsing
// 2. Logging initialisation (debug mode support)
// 3. Reading the matching service's JSON response (file or stdin)
// 4. Printing the report and writing timestamped export files
//
// All classification, escaping, and serialisation logic lives in the
// library; this binary only moves bytes in and out.

use clap::Parser;
use ctsl_report::app::pipeline::{render_and_export, PipelineOutput};
use ctsl_report::core::export::export_filename;
use ctsl_report::core::model::ResultSet;
use ctsl_report::core::report::{render_html, render_text};
use ctsl_report::util::error::{CtslError, InputError, Result};
use ctsl_report::util::{constants, logging};
use std::io::Read;
use std::path::{Path, PathBuf};

/// ctsl-report - Format and export CTS-Lite identifier match results.
///
/// Reads a CTS-Lite matching response (a JSON array of query results)
/// and renders a classified report, with optional CSV and raw-JSON
/// export files.
#[derive(Parser, Debug)]
#[command(name = constants::APP_NAME, version, about)]
struct Cli {
    /// Result JSON file to read ("-" or omitted reads stdin).
    input: Option<PathBuf>,

    /// Directory for export files.
    #[arg(short = 'o', long = "out-dir", default_value = ".")]
    out_dir: PathBuf,

    /// Write a CSV export file (ctsl_<timestamp>.csv).
    #[arg(long)]
    csv: bool,

    /// Write a raw JSON export file (ctsl_<timestamp>.json).
    #[arg(long)]
    json: bool,

    /// Print the raw JSON view instead of the formatted report.
    #[arg(long)]
    raw: bool,

    /// Render the report as an HTML fragment instead of plain text.
    #[arg(long)]
    html: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.debug);

    tracing::info!(
        version = constants::APP_VERSION,
        debug = cli.debug,
        "ctsl-report starting"
    );

    if let Err(e) = run(&cli) {
        // The empty-query message is surfaced verbatim; everything else
        // gets the "Error: " prefix the web client uses.
        match &e {
            CtslError::Input(InputError::EmptyQuery) => eprintln!("Please enter a query"),
            other => eprintln!("Error: {other}"),
        }
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let body = read_input(cli.input.as_deref())?;
    let set = ResultSet::from_json(&body)?;
    let output = render_and_export(&set)?;

    if cli.raw {
        println!("{}", output.json_text);
    } else if cli.html {
        print!("{}", render_html(&output.report));
    } else {
        print!("{}", render_text(&output.report));
    }

    write_exports(cli, &output)?;
    Ok(())
}

/// Reads the response body from the given file, or stdin for "-"/None.
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p.to_str() != Some("-") => std::fs::read_to_string(p).map_err(|e| {
            CtslError::Input(InputError::Io {
                path: p.to_path_buf(),
                source: e,
            })
        }),
        _ => {
            let mut body = String::new();
            std::io::stdin().read_to_string(&mut body).map_err(|e| {
                CtslError::Input(InputError::Io {
                    path: PathBuf::from("<stdin>"),
                    source: e,
                })
            })?;
            Ok(body)
        }
    }
}

/// Writes the requested export files with timestamped names.
fn write_exports(cli: &Cli, output: &PipelineOutput) -> Result<()> {
    let now = chrono::Utc::now();

    if cli.csv {
        let path = cli.out_dir.join(export_filename("csv", now));
        write_file(&path, &output.csv_text)?;
        tracing::info!(path = %path.display(), "CSV export written");
    }

    if cli.json {
        let path = cli.out_dir.join(export_filename("json", now));
        write_file(&path, &output.json_text)?;
        tracing::info!(path = %path.display(), "JSON export written");
    }

    Ok(())
}

fn write_file(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text).map_err(|e| CtslError::Io {
        path: path.to_path_buf(),
        operation: "write",
        source: e,
    })
}
