use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

mod core;
mod dataset;
mod formatters;

use crate::dataset::{DatasetBuilder, DatasetWriter, DetectorRunner, HashingEncoder};
use crate::formatters::{DotFormatter, GraphJsonFormatter};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "solgraph",
    version = "0.1.0",
    author = "solgraph developers",
    about = "Smart contract symbol graph extractor - builds labeled graph datasets"
)]
struct Cli {
    /// Input directory (or single .sol file) to process
    #[arg(short, long, value_name = "PATH")]
    input: PathBuf,

    /// Output dataset file path
    #[arg(short, long, value_name = "FILE", default_value = "dataset.json")]
    output: PathBuf,

    /// Directory for per-contract graph artifacts
    #[arg(short, long, value_name = "DIR")]
    render_dir: Option<PathBuf>,

    /// Artifact format: dot, json
    #[arg(short = 'f', long, value_name = "FORMAT", value_enum, default_value_t = RenderFormat::Dot)]
    format: RenderFormat,

    /// External detector command used for vulnerability labeling
    #[arg(long, value_name = "CMD", default_value = "slither")]
    detector: String,

    /// Skip vulnerability labeling entirely
    #[arg(long)]
    skip_analysis: bool,

    /// Length of the encoded token sequences
    #[arg(long, value_name = "LEN", default_value_t = 512)]
    sequence_length: usize,

    /// Pretty-print the dataset JSON
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum RenderFormat {
    Dot,
    Json,
}

impl RenderFormat {
    fn as_str(self) -> &'static str {
        match self {
            RenderFormat::Dot => "dot",
            RenderFormat::Json => "json",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        input,
        output,
        render_dir,
        format,
        detector,
        skip_analysis,
        sequence_length,
        pretty,
    } = cli;

    let start_time = Instant::now();

    println!("SOLGRAPH - Smart Contract Graph Extraction");
    println!("Input: {}", input.display());
    println!("Dataset: {}", output.display());

    let encoder = HashingEncoder::new(sequence_length);
    let runner = (!skip_analysis).then(|| DetectorRunner::new(detector));
    match runner.as_ref() {
        Some(runner) => println!("Analysis: {}", runner.program()),
        None => println!("Analysis: skipped"),
    }

    let mut builder = DatasetBuilder::new(&encoder);
    if let Some(runner) = runner.as_ref() {
        builder = builder.with_detector(runner);
    }

    let build_start = Instant::now();
    let records = builder.build(&input)?;
    println!(
        "Extraction completed in {:.2}s",
        build_start.elapsed().as_secs_f64()
    );

    DatasetWriter::new()
        .with_pretty(pretty)
        .format_to_file(&records, &output)?;
    println!("Dataset written to {}", output.display());

    if let Some(render_dir) = render_dir {
        fs::create_dir_all(&render_dir)?;

        let dot_formatter = DotFormatter::new();
        let json_formatter = GraphJsonFormatter::new().with_pretty(pretty);

        for record in &records {
            let contract_name = record
                .file_name
                .strip_suffix(".sol")
                .unwrap_or(&record.file_name);
            let artifact = render_dir.join(format!("{}.{}", contract_name, format.as_str()));

            match format {
                RenderFormat::Dot => {
                    dot_formatter.format_to_file(&record.graph, contract_name, &artifact)?;
                }
                RenderFormat::Json => {
                    json_formatter.format_to_file(&record.graph, contract_name, &artifact)?;
                }
            }
        }
        println!(
            "Rendered {} {} artifacts to {}",
            records.len(),
            format.as_str(),
            render_dir.display()
        );
    }

    let total_time = start_time.elapsed();
    println!("Total execution time: {:.2}s", total_time.as_secs_f64());

    Ok(())
}
