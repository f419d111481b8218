//! cty-conditions-doc: generate a condition/reason reference from `+cty`
//! tags in Go sources and inject it into an HTML page.
//!
//! ```text
//! cty-conditions-doc --path ./api --inject-into site/index.html
//! cty-conditions-doc --path ./api --print > conditions.html
//! ```

mod aggregate;
mod discover;
mod error;
mod inject;
mod model;
mod parser;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use render::template::Templates;
use render::Render;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "CTY_DOC_LOG";

#[derive(Parser)]
#[command(
    name = "cty-conditions-doc",
    about = "Generate condition and reason documentation from +cty tags"
)]
struct Cli {
    /// Root directory to scan recursively
    #[arg(long, default_value = ".")]
    path: PathBuf,

    /// Title of the generated section
    #[arg(long, default_value = "Conditions Reference")]
    title: String,

    /// HTML document to inject the section into (modified in place)
    #[arg(long, default_value = "index.html")]
    inject_into: PathBuf,

    /// CSS selector of the container; the fragment is appended to the last match
    #[arg(long, default_value = inject::DEFAULT_SELECTOR)]
    selector: String,

    /// Directory with section.html, resource.html, condition.html and
    /// reason.html overriding the built-in templates
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Glob of paths (relative to --path) to skip. Can be given multiple times.
    #[arg(long)]
    exclude: Vec<String>,

    /// Print the rendered fragment to stdout instead of injecting it
    #[arg(long)]
    print: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let fragment = generate(&cli)?;

    if cli.print {
        print!("{fragment}");
        return Ok(());
    }

    let target = &cli.inject_into;
    let document = fs::read_to_string(target)
        .with_context(|| format!("failed to read {}", target.display()))?;
    let updated = inject::inject(&document, &fragment, &cli.selector)
        .with_context(|| format!("failed to inject into {}", target.display()))?;
    fs::write(target, updated).with_context(|| format!("failed to write {}", target.display()))?;

    tracing::info!(target = %target.display(), "documentation injected");
    Ok(())
}

/// Scan, aggregate and render. Nothing is written here.
fn generate(cli: &Cli) -> Result<String> {
    let templates = match &cli.templates {
        Some(dir) => Templates::load(dir)?,
        None => Templates::default(),
    };
    let excludes = discover::parse_excludes(&cli.exclude)?;

    let sources = discover::collect_sources(&cli.path, &excludes)?;
    let mut results = Vec::new();
    for path in &sources {
        results.extend(parser::scan_file(path)?);
    }
    tracing::info!(files = sources.len(), tags = results.len(), "scan complete");

    let resources = aggregate::aggregate(&results);
    Ok(render::build_section(&templates, &cli.title, &resources).render())
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
