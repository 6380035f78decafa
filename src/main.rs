//! Türmatrix Updater - CLI for normalizing ArchiCAD door-schedule exports.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use tuermatrix::summary::DoorTypeSummary;
use tuermatrix::{export, pipeline, sheet, summary};

#[derive(Parser)]
#[command(name = "tuermatrix")]
#[command(about = "Normalize an ArchiCAD Türmatrix door-schedule export for re-import", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the exported Türmatrix workbook (.xlsx)
    input: PathBuf,

    /// Where to write the re-import workbook
    #[arg(short, long, default_value = "Updated_Türmatrix.xlsx")]
    output: PathBuf,

    /// Worksheet holding the door schedule
    #[arg(long, default_value = "Türmatrix")]
    sheet: String,

    /// Skip the door-type distribution printout
    #[arg(long)]
    no_summary: bool,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let cli = Cli::parse();
    let sheet = sheet::open_schedule(&cli.input, &cli.sheet)
        .with_context(|| format!("read {}", cli.input.display()))?;
    let (raw_header, mut table) = sheet.import()?;
    info!(rows = table.height(), columns = table.width(), "schedule loaded");

    pipeline::run(&mut table)?;

    if !cli.no_summary {
        print_summary(&summary::door_type_counts(&table));
    }

    pipeline::align::realign(&mut table, &raw_header)?;
    export::write_workbook(&cli.output, &cli.sheet, &table)
        .with_context(|| format!("write {}", cli.output.display()))?;
    info!(output = %cli.output.display(), "re-import workbook written");
    Ok(())
}

/// Terminal rendition of the door-type bar chart: one bar per category,
/// annotated with its count.
fn print_summary(summary: &DoorTypeSummary) {
    if summary.counts.is_empty() {
        return;
    }
    let widest = summary
        .counts
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let peak = summary
        .counts
        .iter()
        .map(|(_, count)| *count)
        .max()
        .unwrap_or(1);

    println!("Verteilung der Türtypen");
    for (label, count) in &summary.counts {
        let bar = "█".repeat((count * 40).div_ceil(peak));
        println!("  {label:<widest$}  {bar} {count}");
    }
}
