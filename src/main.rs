mod chart;
mod error;
mod fetch;
mod filter;
mod normalize;
mod parser;
mod pipeline;
mod settings;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing::info;

#[derive(Parser)]
#[command(name = "sold_trend", about = "Price trend of sold marketplace listings")]
struct Cli {
    /// Settings file layered over the built-in defaults (TOML, JSON, YAML...)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Parse a saved results page instead of fetching the search URL
    #[arg(long)]
    html: Option<PathBuf>,
    /// Write the chart to this HTML file
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// Don't open the chart in a browser
    #[arg(long)]
    no_show: bool,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let t0 = Instant::now();
    let cli = Cli::parse();

    let settings = settings::load(cli.config.as_deref()).context("loading settings")?;
    info!(
        url = %settings.search_url,
        required = ?settings.required_substrings,
        missing = ?settings.missing,
        "Starting sold listing trend"
    );

    let markup = match &cli.html {
        Some(path) => fetch::read_page(path),
        None => fetch::fetch_page(&settings.search_url),
    }
    .context("loading results page")?;

    let table = pipeline::run(&markup, &settings).context("processing results page")?;

    println!("{}", table);
    if table.is_empty() {
        println!("No matching sold listings, nothing to plot.");
        return Ok(());
    }

    let plot = chart::build(&table, &settings);
    chart::render(&plot, cli.out.as_deref(), !cli.no_show).context("writing chart")?;

    info!("Done in {:.1}s", t0.elapsed().as_secs_f64());
    Ok(())
}
