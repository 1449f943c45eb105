use anyhow::Context;
use clap::Parser;
use participant_form::utils::logger;
use participant_form::{CliConfig, FormService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    if config.logging.json {
        logger::init_json_logger(config.logging.verbose);
    } else {
        logger::init_cli_logger(config.logging.verbose);
    }

    tracing::info!("Starting participant-form");
    tracing::debug!("Resolved config: {:?}", config);

    let bind = config.server.bind;
    let service = match FormService::from_config(config) {
        Ok(service) => service,
        Err(e) => {
            tracing::error!("❌ Startup failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    service
        .run()
        .await
        .with_context(|| format!("server on {} exited with an error", bind))?;

    Ok(())
}
