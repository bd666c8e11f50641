use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::Parser;
use dotenvy::dotenv;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use common::{DateSelection, RequestState, logger};
use predictor::{HttpPredictionSource, PredictionClient, PredictorConfig};

use crate::cli::{Cli, Command, HELP};
use crate::render::render;

mod cli;
mod render;

type Client = PredictionClient<HttpPredictionSource>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    logger::setup_logger();

    let cli = Cli::parse();
    debug!("Command line input recorded: {cli:?}");

    let mut config = PredictorConfig::from_env().context("Invalid prediction service configuration")?;
    if let Some(endpoint) = &cli.endpoint {
        config = config.with_base_url(endpoint)?;
    }
    if let Some(secs) = cli.timeout_secs {
        config.timeout = Duration::from_secs(secs);
    }

    let date = cli.date.clone().map(DateSelection::new).unwrap_or_default();
    let client = Arc::new(
        PredictionClient::from_config(&config, date).context("Failed to build the prediction client")?,
    );

    if cli.once {
        return run_once(&client, cli.json).await;
    }
    run_console(client).await
}

async fn run_once(client: &Client, json: bool) -> anyhow::Result<()> {
    let state = client.request_prediction().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&client.snapshot())?);
    } else {
        print!("{}", render(&client.snapshot()));
    }

    if let RequestState::Failed(reason) = state {
        bail!("prediction failed: {reason}");
    }
    Ok(())
}

async fn run_console(client: Arc<Client>) -> anyhow::Result<()> {
    let mut snapshot_rx = client.subscribe();
    let renderer = tokio::spawn(async move {
        loop {
            let frame = render(&snapshot_rx.borrow_and_update());
            println!("{frame}");
            if snapshot_rx.changed().await.is_err() {
                break;
            }
        }
    });

    println!("{HELP}\n");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("Failed to read from stdin")?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            break;
        };

        match Command::parse(&line) {
            Command::Predict => spawn_request(&client),
            Command::PredictDate(date) => {
                client.set_date(date);
                spawn_request(&client);
            }
            Command::Reset => client.reset_result(),
            Command::Cancel => client.cancel_pending(),
            Command::Help => println!("{HELP}\n"),
            Command::Quit => break,
        }
    }

    renderer.abort();
    info!("Console closed.");
    Ok(())
}

fn spawn_request(client: &Arc<Client>) {
    let client = client.clone();
    tokio::spawn(async move {
        client.request_prediction().await;
    });
}
