mod aggregate;
mod color;
mod data;
mod hierarchy;
mod layout;
mod pack;
mod util;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use layout::{LayoutConfig, compute_layout};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Package records JSON: a bare array or an npm-API edge list.
    input: PathBuf,
    #[arg(long, default_value_t = 960.0)]
    width: f64,
    #[arg(long, default_value_t = 500.0)]
    height: f64,
    /// Gap between sibling circles.
    #[arg(long, default_value_t = 3.0)]
    padding: f64,
    /// Radius floor for zero-weight circles.
    #[arg(long, default_value_t = 5.0)]
    min_radius: f64,
    /// Keywords stripped before grouping.
    #[arg(long = "exclude", value_delimiter = ',', default_values_t = [
        "gatsby".to_string(),
        "gatsby-plugin".to_string(),
    ])]
    excluded: Vec<String>,
    #[arg(long)]
    pretty: bool,
    /// Write the layout here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let records = data::parse_records(&raw)
        .with_context(|| format!("failed to parse {}", args.input.display()))?;

    let config = LayoutConfig {
        width: args.width,
        height: args.height,
        padding: args.padding,
        min_radius: args.min_radius,
        excluded: args.excluded.into_iter().collect(),
    };
    let layout = compute_layout(&records, &config);

    let json = if args.pretty {
        serde_json::to_string_pretty(&layout)
    } else {
        serde_json::to_string(&layout)
    }
    .context("failed to serialize layout")?;

    match &args.output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{json}"),
    }

    let total_downloads = layout
        .keywords
        .iter()
        .fold(0.0, |acc, group| acc + group.stats.total_downloads);
    eprintln!(
        "{} keywords, {} packages, {} downloads",
        layout.keywords.len(),
        layout.leaves().count(),
        util::format_count(total_downloads),
    );

    Ok(())
}
