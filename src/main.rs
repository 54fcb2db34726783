use anyhow::{Context, Result};
use clap::Parser;

use mihrab::cli::args::{Cli, Commands};
use mihrab::cli::handlers;
use mihrab::config::AppConfig;
use mihrab::sensors::{ConfigLocation, NullOrientation};
use mihrab::store::SqliteStore;
use mihrab::{session, tui};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Loading config")?;
    config.validate().context("Validating config")?;

    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let store = SqliteStore::open(&db_path)
        .with_context(|| format!("Opening document store at {:?}", db_path))?;

    let identity = session::sign_in(&store, config.app.token.as_deref())
        .context("Signing in")?;

    match cli.command {
        Some(Commands::Times) => {
            handlers::handle_times(&store, &config, &identity)?;
        }
        Some(Commands::Mark { prayer }) => {
            handlers::handle_mark(&store, &config, &identity, &prayer)?;
        }
        Some(Commands::Moon { action }) => {
            handlers::handle_moon(&store, &config, &identity, &action)?;
        }
        Some(Commands::Dhikr) => {
            handlers::handle_dhikr()?;
        }
        Some(Commands::Surah { action }) => {
            handlers::handle_surah(&action)?;
        }
        Some(Commands::Qibla { lat, lon }) => {
            handlers::handle_qibla(&config, lat, lon)?;
        }

        // No subcommand → launch the dashboard
        None => {
            let location = ConfigLocation::new(
                config.location.latitude,
                config.location.longitude,
            );
            tui::app::run(&store, config, identity, &location, &NullOrientation)?;
        }
    }

    Ok(())
}
