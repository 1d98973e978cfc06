use clap::Parser;
use serenity::prelude::*;
use songbird::SerenityInit;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;
mod database;
mod error;
mod event_handler;
mod utils;

use crate::config::{Config, Mode};
use crate::error::StartupError;

const LOG_FILE: &str = "discord.log";
const WEB_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Parser)]
#[command(version, about = "Cthulhu, a Discord bot of questionable sanity")]
struct Cli {
    /// Where configuration comes from
    #[arg(value_enum, ignore_case = true, default_value_t = Mode::Dev)]
    mode: Mode,

    /// Config file read in dev mode
    #[arg(long, default_value = "config.json")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = match init_tracing(Path::new(LOG_FILE)) {
        Ok(guard) => guard,
        Err(reason) => {
            eprintln!("could not open {}: {}", LOG_FILE, reason);
            return ExitCode::FAILURE;
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(reason) => {
            error!(reason = %reason, "Cthulhu could not rise");
            ExitCode::FAILURE
        }
    }
}

// The log starts empty on every run.
fn open_log(path: &Path) -> io::Result<File> {
    File::create(path)
}

fn init_tracing(log_path: &Path) -> io::Result<WorkerGuard> {
    let (file_writer, guard) = tracing_appender::non_blocking(open_log(log_path)?);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .init();

    Ok(guard)
}

async fn run(cli: Cli) -> Result<(), StartupError> {
    let config = Arc::new(Config::load(cli.mode, &cli.config)?);
    info!(mode = ?cli.mode, prefix = %config.prefix, "loaded configuration");

    // initialize database
    let database = Arc::new(database::Database::new(&config.database_url).await?);

    let web = reqwest::Client::builder().timeout(WEB_TIMEOUT).build()?;

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_VOICE_STATES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    // build the Discord client, and pass in our event handler
    let mut client = Client::builder(&config.token, intents)
        .event_handler(event_handler::Handler {
            commands: commands::commands_vecs(),
            data: commands::Data {
                database,
                config: config.clone(),
                web,
            },
        })
        .register_songbird()
        .await?;

    client.start().await?;
    Ok(())
}
