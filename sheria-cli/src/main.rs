mod cli;
mod commands;
mod config;
mod render;

use anyhow::Result;
use clap::Parser;
use sheria_client::{domain::TransactionType, Credentials};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    cli::{Cli, Commands},
    commands::App,
    config::Settings,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::from_filename(".env.local").ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sheria=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let settings = config::read_config()?;

    match cli.command {
        Commands::Hours {
            start,
            end,
            rate,
            billable,
        } => commands::hours(&settings.display.currency, start, end, rate, billable),
        Commands::Login { username } => commands::login(&settings, &username).await,
        Commands::Logout => {
            config::clear_session()?;
            println!("Logged out.");
            Ok(())
        }
        Commands::ConfigPath => {
            let path = config::ensure_config_file()?;
            println!("{}", path.display());
            Ok(())
        }
        // the public website forms never send credentials
        Commands::Book(args) => {
            let app = App::new(settings, Credentials::Guest);
            commands::book(&app, args).await
        }
        Commands::Contact(args) => {
            let app = App::new(settings, Credentials::Guest);
            commands::contact(&app, args).await
        }
        Commands::Balance { client } => commands::balance(&connect(settings)?, &client).await,
        Commands::Statement { client, from, to } => {
            commands::statement(&connect(settings)?, &client, from, to).await
        }
        Commands::Deposit(args) => {
            commands::trust_transaction(&connect(settings)?, TransactionType::Deposit, args).await
        }
        Commands::Withdraw(args) => {
            commands::trust_transaction(&connect(settings)?, TransactionType::Withdrawal, args)
                .await
        }
        Commands::Invoice { time_entries } => {
            commands::invoice(&connect(settings)?, time_entries).await
        }
        Commands::Remind { hearing } => commands::remind(&connect(settings)?, hearing).await,
        Commands::Stats {
            hearings,
            activities,
        } => commands::stats(&connect(settings)?, hearings, activities).await,
        Commands::Hearings { limit } => commands::hearings(&connect(settings)?, limit).await,
        Commands::Activities { limit } => commands::activities(&connect(settings)?, limit).await,
        Commands::Services => commands::services(&connect(settings)?).await,
        Commands::Requests { client } => {
            commands::requests(&connect(settings)?, client.as_deref()).await
        }
        Commands::Portal { client } => {
            commands::portal(&connect(settings)?, client.as_deref()).await
        }
        Commands::RequestService { service } => {
            commands::request_service(&connect(settings)?, &service).await
        }
    }
}

/// Authenticates with the configured API key, else the saved session.
fn connect(settings: Settings) -> Result<App> {
    let credentials = settings.credentials(config::load_session()?);
    if credentials.is_guest() {
        tracing::warn!("no API key or saved session, calling as guest");
    }
    Ok(App::new(settings, credentials))
}
