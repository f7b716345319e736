mod error;
mod output;
mod parser;
mod settings;
mod utils;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use tracing::info;

use output::Format;
use parser::Record;
use settings::Settings;

const CHUNK_SIZE: usize = 500;

#[derive(Parser)]
#[command(name = "stat2csv", about = "Convert `stat` command output into a CSV table")]
struct Cli {
    /// Text file holding the output of `stat`
    input: PathBuf,
    /// Output file (default: stat_output.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Split each path into FilePath (directory) and FileName
    #[arg(short = 'd', long, overrides_with = "no_directory")]
    directory: bool,
    /// Keep the whole path in FilePath, even if STAT2CSV_SPLIT_PATH is set
    #[arg(long, overrides_with = "directory")]
    no_directory: bool,
    /// UTC offset for records whose access time has none, e.g. +0900 (default: +0000)
    #[arg(short = 'U', long = "utc", allow_hyphen_values = true)]
    utc: Option<String>,
    /// Show a progress bar while parsing
    #[arg(short, long, overrides_with = "no_progress")]
    progress: bool,
    /// Hide the progress bar, even if STAT2CSV_PROGRESS is set
    #[arg(long, overrides_with = "progress")]
    no_progress: bool,
    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<Format>,
}

impl Cli {
    /// Explicit flags win over environment settings.
    fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(output) = &self.output {
            settings.output = output.clone();
        }
        if let Some(utc) = &self.utc {
            settings.utc_offset = utc.clone();
        }
        if let Some(format) = self.format {
            settings.format = format;
        }
        if let Some(split) = switch(self.directory, self.no_directory) {
            settings.split_path = split;
        }
        if let Some(progress) = switch(self.progress, self.no_progress) {
            settings.progress = progress;
        }
        settings
    }
}

/// `--x` / `--no-x` pair; `None` when neither was given.
fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = cli.apply(Settings::load());

    let text = output::read_input(&cli.input)?;
    let blocks: Vec<&str> = parser::segment(&text).collect();
    info!(
        bytes = text.len(),
        blocks = blocks.len(),
        "Parsing {}",
        cli.input.display()
    );

    let records = parse_blocks(&blocks, &settings)?;
    output::save(&settings.output, &records, settings.format)?;
    println!(
        "Saved {} records -> {}",
        records.len(),
        settings.output.display()
    );

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("Done in {}", format_elapsed(elapsed));
    }
    Ok(())
}

/// Parse blocks in parallel chunks; the result keeps document order.
fn parse_blocks(blocks: &[&str], settings: &Settings) -> anyhow::Result<Vec<Record>> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pb = if settings.progress {
        ProgressBar::new(blocks.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Parsing... [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let mut records = Vec::with_capacity(blocks.len());
    for chunk in blocks.chunks(CHUNK_SIZE) {
        let parsed: Vec<Record> = chunk
            .par_iter()
            .map(|block| parser::parse_block(block, settings.split_path, &settings.utc_offset))
            .collect();
        records.extend(parsed);
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    Ok(records)
}

fn format_elapsed(d: std::time::Duration) -> String {
    let total = d.as_secs();
    let (h, m, s) = (total / 3600, total / 60 % 60, total % 60);
    match (h, m) {
        (0, 0) => format!("{:.1}s", d.as_secs_f64()),
        (0, _) => format!("{m}m {s}s"),
        _ => format!("{h}h {m}m {s}s"),
    }
}
