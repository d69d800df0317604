//! typedjinja-stub — generate `.pyi` stubs from `{# @types #}` blocks in Jinja templates.
//!
//! Supports two modes:
//!
//! - **stdin mode**: `typedjinja-stub < page.html.jinja`
//! - **file mode**: `typedjinja-stub -o stubs templates/*.jinja`

mod render;

use anyhow::{Context, Result};
use clap::Parser;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "typedjinja-stub",
    about = "Generate .pyi stubs from typedjinja annotations in Jinja templates"
)]
struct Cli {
    /// Template files, directories or glob patterns. If omitted, reads from stdin.
    files: Vec<String>,

    /// Output directory (default: next to each template)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: pyi (default), json
    #[arg(short = 'f', long, default_value = "pyi")]
    format: String,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.files.is_empty() {
        return stdin_mode(&cli);
    }

    file_mode(&cli)
}

/// stdin mode: read one template from stdin, write the rendering to stdout.
fn stdin_mode(cli: &Cli) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let renderer = render::create_renderer(&cli.format)?;
    let output = renderer.render(&input).context("<stdin>")?;
    print!("{}", output);
    Ok(())
}

/// file mode: render every template, keep going past failures.
fn file_mode(cli: &Cli) -> Result<()> {
    let renderer = render::create_renderer(&cli.format)?;
    let ext = renderer.file_extension();

    if let Some(dir) = &cli.output {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
    }

    let templates = expand_globs(&cli.files)?;
    let mut failed = 0usize;
    // output path -> template that produced it
    let mut written: HashMap<PathBuf, &Path> = HashMap::new();

    for template in &templates {
        let name = derive_output_name(template);
        let out_dir = match &cli.output {
            Some(dir) => dir.as_path(),
            None => template.parent().unwrap_or(Path::new(".")),
        };
        let out_path = out_dir.join(format!("{}.{}", name, ext));

        if let Some(other) = written.get(&out_path) {
            eprintln!(
                "error: {}: output {} already written by {}",
                template.display(),
                out_path.display(),
                other.display()
            );
            failed += 1;
            continue;
        }

        match renderer.write(template, &out_path) {
            Ok(()) => {
                tracing::info!(
                    template = %template.display(),
                    output = %out_path.display(),
                    "generated"
                );
                written.insert(out_path, template.as_path());
            }
            Err(e) => {
                eprintln!("error: {}: {:#}", template.display(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} templates failed", failed, templates.len());
    }
    Ok(())
}

/// File extensions recognized as templates when scanning a directory.
const SUPPORTED_EXTENSIONS: &[&str] = &["jinja", "jinja2", "j2", "html", "txt"];

/// Expand glob patterns into a list of real file paths.
/// Also handles bare directory paths by scanning for supported file types.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        // Directories are scanned non-recursively
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() {
                    if let Some(ext) = p.extension().and_then(|e| e.to_str()) {
                        if SUPPORTED_EXTENSIONS.contains(&ext) {
                            files.push(p);
                        }
                    }
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            eprintln!("warning: no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

/// Derive the output file name (without extension) from a template path.
/// "templates/page.html.jinja" → "page.html", "base.j2" → "base"
fn derive_output_name(template: &Path) -> String {
    template
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| template.to_string_lossy().into_owned())
}

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
