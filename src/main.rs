use std::process::ExitCode;

use clap::Parser;

use quote_cli::cli::Cli;
use quote_cli::config::ApiConfig;
use quote_cli::fetch::{HistoryWindow, Instrument, Listing, Quote};
use quote_cli::pipeline::{QuotePipeline, Resolution};
use quote_cli::utils::time::format_iso;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = ApiConfig::builtin();
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    let pipeline = match QuotePipeline::new(config) {
        Ok(pipeline) => pipeline,
        Err(err) => {
            eprintln!("Failed to initialise HTTP client: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let window = HistoryWindow { months: cli.months };
    match pipeline
        .resolve(&cli.isin, cli.exchange.as_deref(), window)
        .await
    {
        Resolution::Found {
            instrument,
            listing,
            quotes,
        } => {
            render_quotes(&instrument, &listing, &quotes);
            ExitCode::SUCCESS
        }
        // Causes were already logged at the pipeline boundary; the user gets
        // one uniform message either way.
        Resolution::NotFound { .. } | Resolution::Failed { .. } => {
            println!("No quotes found for {}.", cli.isin);
            ExitCode::FAILURE
        }
    }
}

fn render_quotes(instrument: &Instrument, listing: &Listing, quotes: &[Quote]) {
    println!(
        "{} ({}) @ {} [notation {}]",
        instrument.isin, instrument.kind, listing.code_exchange, listing.id_notation
    );
    println!(
        "{:<12} {:>10} {:>10} {:>10}",
        "Date", "Close", "Low", "High"
    );
    for quote in quotes {
        println!(
            "{:<12} {:>10.2} {:>10.2} {:>10.2}",
            format_iso(quote.date),
            quote.close,
            quote.low,
            quote.high
        );
    }
}
