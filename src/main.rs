use clap::Parser;
use imdb_scrape::utils::logger;
use imdb_scrape::{
    CliConfig, ImdbClient, ImdbError, LocalStorage, RunSettings, SnapshotEngine, StdoutStorage,
};

fn report_failure(context: &str, e: &ImdbError) -> ! {
    tracing::error!("❌ {}: {}", context, e);
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}: {}", context, e);
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

async fn run(settings: RunSettings) -> Result<String, ImdbError> {
    let client = ImdbClient::builder(settings.imdb).build().await?;

    match settings.output.path.clone() {
        Some(path) => {
            let engine = SnapshotEngine::new(client, LocalStorage::new(path), settings.output);
            engine.run().await
        }
        None => {
            let engine = SnapshotEngine::new(client, StdoutStorage, settings.output);
            engine.run().await
        }
    }
}

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();
    let verbose = config.verbose;
    let log_json = config.log_json;

    let settings = match config.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            logger::init_cli_logger(verbose);
            report_failure("Configuration validation failed", &e);
        }
    };

    if settings.json_logs || log_json {
        logger::init_json_logger(settings.verbose);
    } else {
        logger::init_cli_logger(settings.verbose);
    }

    tracing::info!("Starting imdb-scrape");
    tracing::debug!("Run settings: {:?}", settings);

    match run(settings).await {
        Ok(location) => {
            tracing::info!("✅ imdb snapshot completed: {}", location);
        }
        Err(e) => report_failure("imdb snapshot failed", &e),
    }
}
