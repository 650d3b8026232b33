use anyhow::Result;
use clap::Parser;

use tempo_core::{Config, ViewKind};
use tempo_ipma::IpmaClient;
use tempo_ui::views;
use tempo_ui::ForecastController;

/// Daily weather forecasts for Portuguese locations.
#[derive(Debug, Parser)]
#[command(name = "tempo", version, about)]
struct Cli {
    /// View to run; defaults to the configured one
    #[arg(long, value_enum)]
    view: Option<ViewKind>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize core
    tempo_core::init()?;

    let cli = Cli::parse();

    let (config, _validation) = match Config::load_validated() {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            eprintln!("{}", e.user_message());
            std::process::exit(1);
        }
    };

    let client = IpmaClient::new(config.ipma.base_url.clone());
    let mut controller = ForecastController::new(client).await;

    let view = cli.view.unwrap_or(config.ui.default_view);
    tracing::info!("Tempo application started with the {} view", view);

    match view {
        ViewKind::Main => views::main_view::run(&mut controller).await?,
        ViewKind::Minimal => views::minimal_view::run(&mut controller).await?,
    }

    Ok(())
}
