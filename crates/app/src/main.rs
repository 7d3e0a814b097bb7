mod config;
mod study_loop;

use services::{AppServices, Clock, StudyApp};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{Command, Invocation};

const DEFAULT_LOG_FILTER: &str = "studynotes=info,services=info,storage=warn";

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let Invocation { config, command } =
        config::parse(std::env::args().skip(1), |key| std::env::var(key).ok()).map_err(|e| {
            eprintln!("{e}");
            config::print_usage();
            e
        })?;

    if command == Command::Help {
        config::print_usage();
        return Ok(());
    }

    // Only the subscription tier is persisted; open and migrate the store up front.
    config::prepare_sqlite_file(&config.db_url)?;
    let services = AppServices::new_sqlite(&config.db_url, config.checkout_delay).await?;
    info!(db = %config.db_url, tier = %services.subscription().get(), "services ready");

    match command {
        Command::Study => {
            let mut app = StudyApp::with_starter_content(Clock::default_clock());
            app.select_folder(config.folder);
            study_loop::run(app, services.subscription().get()).await?;
        }
        Command::Tier(None) => println!("{}", services.subscription().get()),
        Command::Tier(Some(tier)) => {
            services.subscription().set(tier).await?;
            println!("{tier}");
        }
        Command::Upgrade(details) => {
            let checkout = services.checkout();
            let plan = checkout.plan();
            println!("Processing {} ({}/month)...", plan.name, plan.price_label());
            let receipt = checkout.checkout(&details).await?;
            println!(
                "Upgraded to {} using card ending {}.",
                receipt.tier, receipt.card_last_four
            );
        }
        Command::Help => config::print_usage(),
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
