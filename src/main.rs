#![allow(clippy::uninlined_format_args)]

use std::process::ExitCode;
use tracing::{error, info};

use bgg_top_games::application::Pipeline;
use bgg_top_games::infrastructure::config::ConfigManager;
use bgg_top_games::infrastructure::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config_manager = ConfigManager::new();
    let config = match config_manager.load_config().await {
        Ok(config) => config,
        Err(e) => {
            // Logging settings come from the file we failed to read
            if logging::init_fallback_logging() {
                error!("❌ Failed to load configuration: {:#}", e);
            } else {
                eprintln!("Failed to load configuration: {:#}", e);
            }
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init_logging_with_config(&config.logging) {
        eprintln!("Failed to initialize logging: {:#}", e);
        return ExitCode::FAILURE;
    }
    logging::log_system_info();

    match config_manager.locate() {
        Some(path) => info!("⚙️ Configuration loaded from {:?}", path),
        None => info!("⚙️ No configuration file found, using defaults"),
    }

    let pipeline = match Pipeline::with_defaults(&config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            error!("❌ Failed to set up the scraper: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match pipeline.run().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("❌ Run aborted ({}): {}", e.kind(), e);
            ExitCode::FAILURE
        }
    }
}
