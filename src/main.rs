use anyhow::Result;
use fertilizer_advisor::{
    api::{HttpPredictionClient, PredictionApi},
    config::{self, LogFormat},
    controller::{self, FormController},
    session,
};
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::info;

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Determine log level: environment variable overrides config
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.logs.level.clone());

    if let Err(e) = validate_log_level(&log_level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    // Logs go to stderr; stdout carries the form.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&log_level))?;
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match config.logs.format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.pretty().init(),
    }

    info!("Starting fertilizer advisor against {}", config.api.base_url);

    let api: Arc<dyn PredictionApi> = Arc::new(HttpPredictionClient::new(config.api.clone())?);

    // Option lists load in the background; the form is usable immediately.
    let loader_api = Arc::clone(&api);
    tokio::spawn(async move {
        controller::load_options(loader_api.as_ref()).await;
    });

    let mut controller = FormController::new(&config.form, api)?;
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    session::run(&mut controller, stdin, &mut stdout).await?;

    Ok(())
}
