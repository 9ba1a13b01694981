//! Cron entry point: marks employees without an attendance record today as
//! absent. Intended to run after the cutoff, e.g. `5 16 * * 1-5`.

use anyhow::Result;
use chrono::Utc;
use dotenvy::dotenv;
use tracing::info;

use absensi::config::Config;
use absensi::core::sweeper::run_absence_sweep;
use absensi::db::init_db;
use absensi::store::MySqlStore;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenv().ok();

    // Cron output goes to stdout, not the rolling server log.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    let config = Config::from_env();
    let pool = init_db(&config.database_url).await;
    let store = MySqlStore::new(pool);

    let inserted = run_absence_sweep(
        &store,
        &store,
        &store,
        Utc::now(),
        config.org_timezone,
        config.sweep_cutoff,
    )
    .await?;

    info!(inserted, "Absence sweep finished");
    Ok(())
}
