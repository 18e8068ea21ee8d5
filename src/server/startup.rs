//! Process startup: logging, the GitHub client and the database connection.

use std::path::PathBuf;

use sea_orm::DatabaseConnection;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::server::{config::Config, error::Error};

const NOISY_TARGETS: [&str; 4] = ["sqlx", "sea_orm_migration", "hyper", "reqwest"];

/// Install the global tracing subscriber at the configured level
pub fn init_tracing(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(level))
        .try_init();
}

/// Filter for `level`, with chatty dependencies capped at warn unless debugging
pub fn log_filter(level: Level) -> EnvFilter {
    let mut directives = level.as_str().to_ascii_lowercase();

    if level < Level::DEBUG {
        for target in NOISY_TARGETS {
            directives.push_str(&format!(",{}=warn", target));
        }
    }

    EnvFilter::new(directives)
}

/// Build the GitHub client with the configured token, if any
pub fn build_github_client(config: &Config) -> Result<github_api::Client, Error> {
    let mut builder = github_api::Client::builder();
    if let Some(token) = &config.github_pat {
        builder = builder.token(token);
    }

    Ok(builder.build()?)
}

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let database_url = prepare_database_url(&config.database_url)?;

    let mut opt = ConnectOptions::new(&database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    tracing::info!("Database ready");

    Ok(db)
}

/// File backing a SQLite URL, `None` for other backends and in-memory databases
pub fn sqlite_file_path(database_url: &str) -> Option<PathBuf> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();

    if path.is_empty() || path == ":memory:" {
        return None;
    }

    Some(PathBuf::from(path))
}

/// Create the directory of a SQLite database file and make sure the file may be created
///
/// A SQLite URL without a `mode` parameter gets `mode=rwc` appended. Other URLs are
/// returned unchanged.
pub fn prepare_database_url(database_url: &str) -> Result<String, Error> {
    let Some(path) = sqlite_file_path(database_url) else {
        return Ok(database_url.to_string());
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let url = match database_url.split_once('?') {
        Some((_, query)) if query.split('&').any(|param| param.starts_with("mode=")) => {
            database_url.to_string()
        }
        Some(_) => format!("{}&mode=rwc", database_url),
        None => format!("{}?mode=rwc", database_url),
    };

    Ok(url)
}
