//! services/api/src/bin/cli.rs

use api_lib::{
    bootstrap::{build_assistant, init_tracing, LogTarget},
    cli::{Cli, Console, TerminalApp},
    config::Config,
    error::ApiError,
};
use clap::Parser;
use std::io;
use tracing::{info, Level};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(model) = cli.model {
        config.generation_model = model;
    }
    if let Some(database_url) = cli.database_url {
        config.database_url = database_url;
    }
    if cli.no_history {
        config.history_enabled = false;
    }

    let level = if cli.verbose { config.log_level } else { Level::WARN };
    init_tracing(level, LogTarget::Stderr);

    let assistant = build_assistant(&config).await?;
    info!(model = assistant.model(), "Starting terminal session");

    let app = TerminalApp::new(assistant, cli.output_dir, config.history_limit);
    let mut console = Console::new(io::stdin().lock(), io::stdout());
    app.run(&mut console).await?;
    Ok(())
}
