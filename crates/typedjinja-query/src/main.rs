//! typedjinja-query — answer one editor query about a template's variables.
//!
//! ```text
//! typedjinja-query complete  page.pyi user
//! typedjinja-query signature page.pyi user.greet
//! typedjinja-query hover     page.pyi user
//! ```
//!
//! Prints a single JSON value on stdout.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use typedjinja_query::{run_query, JediEngine, Mode};

#[derive(Parser)]
#[command(
    name = "typedjinja-query",
    about = "Completion, signature and hover queries over a typedjinja .pyi stub"
)]
struct Cli {
    /// Query kind
    #[arg(value_enum)]
    mode: Mode,

    /// Generated .pyi stub for the template
    stub: PathBuf,

    /// Expression under the cursor (variable name for hover)
    expr: String,

    /// Cursor line in the template (informational)
    #[arg(default_value_t = 0)]
    line: usize,

    /// Cursor column in the template (informational)
    #[arg(default_value_t = 0)]
    column: usize,

    /// Python interpreter with jedi installed
    #[arg(long, env = "TYPEDJINJA_PYTHON", default_value = "python3")]
    python: String,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("TYPEDJINJA_ERROR: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    tracing::debug!(
        mode = ?cli.mode,
        expr = %cli.expr,
        line = cli.line,
        column = cli.column,
        "query"
    );

    let stub = fs::read_to_string(&cli.stub)
        .with_context(|| format!("failed to read stub {}", cli.stub.display()))?;

    let engine = JediEngine::new(&cli.python, &cli.stub);
    let value = run_query(cli.mode, &stub, &cli.expr, &engine)
        .context("failed to encode query result")?;

    println!("{}", serde_json::to_string(&value)?);
    Ok(())
}

/// Log to stderr; stdout carries the JSON answer.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
