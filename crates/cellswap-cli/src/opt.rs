//! Command-line surface. A single-purpose binary: no subcommands, unlike
//! a multi-command tool like `sqlx-cli`'s `Opt` — every flag here feeds
//! directly into one run.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "cellswap",
    about = "Content-aware search-and-replace across every row of every table in a MySQL/MariaDB database"
)]
pub struct Cli {
    /// Database host.
    #[arg(long, default_value = "localhost")]
    pub host: String,

    /// Database port.
    #[arg(long, default_value_t = 3306)]
    pub port: u16,

    /// Database (schema) name.
    #[arg(long)]
    pub db: String,

    /// Database user.
    #[arg(long)]
    pub user: String,

    /// Database password. May also be supplied via `DB_PASS` so it need
    /// not appear in shell history.
    #[arg(long, env = "DB_PASS", default_value = "")]
    pub pass: String,

    /// Byte string to search for.
    #[arg(long)]
    pub search: String,

    /// Byte string to replace matches with.
    #[arg(long)]
    pub replace: String,

    /// Report what would change without writing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Bound on fixed-point rewrite iterations per cell.
    #[arg(long, default_value_t = cellswap_core::DEFAULT_MAX_PASSES)]
    pub max_passes: usize,

    /// Restrict the scan to these tables (repeatable). Mutually exclusive
    /// with `--skip-table`.
    #[arg(long = "only-table")]
    pub only_table: Vec<String>,

    /// Exclude these tables from the scan (repeatable). Mutually exclusive
    /// with `--only-table`.
    #[arg(long = "skip-table")]
    pub skip_table: Vec<String>,

    /// Raise verbosity; repeatable (-v, -vv, ...).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Override the driver's pool-acquire timeout, in seconds. Leaving this
    /// unset keeps `sqlx`'s own default rather than introducing a second,
    /// redundant notion of timeout on top of it.
    #[arg(long)]
    pub statement_timeout: Option<u64>,
}

impl Cli {
    pub fn into_config(self) -> Result<cellswap_db::Config, cellswap_db::ConfigError> {
        cellswap_db::Config::build(
            self.host,
            self.port,
            self.db,
            self.user,
            self.pass,
            self.search.into_bytes(),
            self.replace.into_bytes(),
            self.dry_run,
            self.max_passes,
            self.only_table,
            self.skip_table,
            self.statement_timeout.map(std::time::Duration::from_secs),
        )
    }
}
