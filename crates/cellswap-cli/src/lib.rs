//! Orchestration for the `cellswap` binary: turn parsed flags into a
//! [`cellswap_db::Config`], open a pool, walk the database, render the
//! report. Kept separate from `bin/cellswap.rs` so the binary itself stays
//! a thin `#[tokio::main]` shell, the same split `sqlx-cli` uses between
//! its `bin/sqlx.rs` and `lib.rs`.

use anyhow::{Context, Result};
use sqlx::mysql::MySqlPoolOptions;

mod logging;
mod opt;
mod render;

pub use opt::Cli;

pub async fn run(cli: Cli) -> Result<()> {
    logging::init(cli.verbose);

    let config = cli.into_config().context("invalid configuration")?;

    let mut pool_options = MySqlPoolOptions::new().max_connections(5);
    if let Some(timeout) = config.statement_timeout {
        pool_options = pool_options.acquire_timeout(timeout);
    }

    let pool = pool_options
        .connect(&config.connection_url())
        .await
        .context("failed to connect to database")?;

    let report = cellswap_db::walk(&pool, &config)
        .await
        .context("failed to enumerate tables")?;

    render::print_report(&report);

    // Per-table and per-row failures are already rendered above and do not
    // fail the run; only a connection/enumeration failure, surfaced as
    // `Err` from `walk` itself via the `?` above, does that.
    Ok(())
}
