use std::{fs::OpenOptions, sync::Mutex};

use migration::{Migrator, MigratorTrait};

use crate::{config::AppConfig, error::Result};

mod app;
mod config;
mod error;
mod ui;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    init_tracing(&config)?;

    let db = sea_orm::Database::connect(config.database.url()?).await?;
    // Creates missing tables only; existing data is left alone.
    Migrator::up(&db, None).await?;

    let store = engine::Store::builder().database(db).build()?;
    let advisor = advisor::Advisor::new(config.chat.advisor_config()?)?;
    tracing::info!(
        backend = ?config.database.backend,
        model = advisor.model(),
        endpoint = %advisor.endpoint(),
        "starting dashboard"
    );

    let mut app = app::App::new(store, advisor, config.kind).await?;
    let result = app.run().await;
    app.into_store().close().await?;
    result
}

/// Log to a file, the terminal belongs to the dashboard.
fn init_tracing(config: &AppConfig) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log.file)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "inflow_tui={level},engine={level},advisor={level},migration={level}",
            level = config.log.level
        ))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
