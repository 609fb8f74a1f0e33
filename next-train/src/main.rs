use std::process::ExitCode;

use clap::Parser;
use serde_json::json;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use next_train::config::AppConfig;
use next_train::domain::LineConfig;
use next_train::engine::{Engine, EngineConfig};
use next_train::feed::{FeedClient, FeedSource, MockFeed};
use next_train::stops::StopSnapshot;

/// Next trains between two stops on one line, printed as JSON.
#[derive(Parser)]
#[command(name = "next-train", version)]
struct Cli {
    /// Line key: orange, red, blue, green-e or green
    #[arg(value_parser = parse_line)]
    line: LineConfig,
    /// Stop the rider boards at
    boarding: String,
    /// Stop the rider travels to
    destination: String,
    /// Change branches at the line's hub station
    #[arg(long)]
    hop: bool,
}

fn parse_line(key: &str) -> Result<LineConfig, String> {
    LineConfig::by_key(key).ok_or_else(|| format!("unknown line {key:?}"))
}

async fn run<F: FeedSource>(
    feed: &F,
    stops: &StopSnapshot,
    config: &EngineConfig,
    cli: &Cli,
) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let engine = Engine::new(feed, stops, config);
    let advisory = engine.advisories(&cli.boarding, &cli.destination);

    if cli.hop {
        let journey = engine
            .next_hop_trains(&cli.line, &cli.boarding, &cli.destination)
            .await?;
        let plan = journey.plan();
        Ok(json!({ "advisory": advisory, "journey": journey, "plan": plan }))
    } else {
        let schedule = engine
            .next_trains(&cli.line, &cli.boarding, &cli.destination)
            .await?;
        Ok(json!({ "advisory": advisory, "schedule": schedule }))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let stops = match StopSnapshot::load(&config.stops_path).await {
        Ok(stops) => stops,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match &config.mock_feed_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "Using mock feed");
            match MockFeed::from_dir(dir) {
                Ok(feed) => run(&feed, &stops, &config.engine, &cli).await,
                Err(e) => Err(e.into()),
            }
        }
        None => match FeedClient::new(config.feed.clone()) {
            Ok(feed) => run(&feed, &stops, &config.engine, &cli).await,
            Err(e) => Err(e.into()),
        },
    };

    match result.and_then(|value| Ok(serde_json::to_string_pretty(&value)?)) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
