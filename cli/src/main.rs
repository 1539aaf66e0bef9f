use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use imgopt::cli::Cli;
use imgopt::io::{load_source, write_file};
use imgopt::report::Report;
use imgopt_core::processor::{ImageProcessor, RasterProcessor};
use imgopt_core::transform::TransformSpec;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Init logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let request = cli.to_request().context("Invalid arguments")?;
    let codec = cli.codec(&request);
    let spec = TransformSpec::build(&request, codec);
    log::info!(
        "Encoding {} at {}x{} (crop={}, blur={}, gray={})",
        codec.as_str(),
        spec.width,
        spec.height,
        spec.crop,
        spec.blur_sigma,
        request.grayscale
    );

    let data = load_source(&cli.source, cli.timeout.map(Duration::from_secs))
        .await
        .with_context(|| format!("Failed to load {}", cli.source))?;
    log::info!("Loaded {} bytes from {}", data.len(), cli.source);

    let original_size = data.len();
    let output = tokio::task::spawn_blocking(move || RasterProcessor.process(&data, &spec))
        .await
        .context("Processing worker failed")?
        .context("Failed to transform image")?;

    write_file(&cli.output, &output)?;
    log::debug!("Wrote {} bytes to {}", output.len(), cli.output.display());

    let report = Report {
        output: cli.output.clone(),
        codec,
        original_size: original_size as u64,
        output_size: output.len() as u64,
    };
    println!("{}", report.summary());

    Ok(())
}
