use anyhow::Context;
use clap::Parser;
use slipstream_visualiser::template::render_page;
use std::path::PathBuf;

/// Generate a pretty HTML report from Slipstream scenario run summary JSON.
#[derive(Parser)]
#[command(name = "slipstream-visualiser", version, about, long_about = None)]
struct Cli {
    /// The path to the input JSON
    input_file: PathBuf,

    /// The path to the HTML file you want to create
    output_file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let input = std::fs::read(&cli.input_file)
        .with_context(|| format!("Couldn't read JSON from `{}`", cli.input_file.display()))?;
    let value = serde_json::from_slice::<serde_json::Value>(&input)
        .with_context(|| format!("Couldn't parse JSON from `{}`", cli.input_file.display()))?;

    let report = slipstream_visualiser::visualise_value(value)?;
    log::debug!("Generated report: {}", report.title);

    let page = render_page(&report);
    std::fs::write(&cli.output_file, page)
        .with_context(|| format!("Couldn't save HTML page to `{}`", cli.output_file.display()))?;

    Ok(())
}
