use clap::Parser;
use std::path::PathBuf;

/// Command line flags. Anything left unset falls back to the config file, then to defaults.
#[derive(Debug, Parser)]
#[command(name = "hotrange")]
#[command(about = "Find the hottest ranges of a CockroachDB cluster", long_about = None)]
#[command(version)]
#[command(after_help = "Examples:
  # Live cluster, top 10 ranges resolved to their tables
  hotrange --host crdb-1.internal

  # Offline analysis of a saved /_status/raft document
  hotrange --snapshot-file ranges.json --skip-resolve --numtop 20

Env:
  HOTRANGE_PASSWORD   password for the SQL user
  RUST_LOG            log filter (overrides --verbose)")]
pub(crate) struct Args {
    #[arg(short = 'c', long, help = "Path to a YAML config file")]
    pub(crate) config_file: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        help = "Read the status snapshot from a file instead of the admin endpoint"
    )]
    pub(crate) snapshot_file: Option<PathBuf>,

    #[arg(short = 'l', long, help = "Cluster host, used for the admin UI and SQL")]
    pub(crate) host: Option<String>,

    #[arg(short = 'r', long = "adminport", help = "Admin UI port (default 26258)")]
    pub(crate) admin_port: Option<u16>,

    #[arg(short = 'p', long = "dbport", help = "SQL port (default 26257)")]
    pub(crate) db_port: Option<u16>,

    #[arg(short = 'd', long = "db", help = "Database name (default defaultdb)")]
    pub(crate) database: Option<String>,

    #[arg(short = 'u', long, help = "Database user (default root)")]
    pub(crate) user: Option<String>,

    #[arg(short = 'n', long = "numtop", help = "Number of top ranges to display (default 10)")]
    pub(crate) top_n: Option<usize>,

    #[arg(
        long,
        value_parser = ["fail", "mark"],
        help = "When a range has no schema object: fail the run, or mark the row (default fail)"
    )]
    pub(crate) on_missing: Option<String>,

    #[arg(long, help = "Catalog lookups allowed in flight (default 1)")]
    pub(crate) max_parallel: Option<usize>,

    #[arg(long, default_value_t = false, help = "Do not connect to the catalog")]
    pub(crate) skip_resolve: bool,

    #[arg(long, value_parser = ["table", "json"], help = "Output format (default table)")]
    pub(crate) output: Option<String>,

    #[arg(short = 'v', long, default_value_t = false, help = "Verbose logging")]
    pub(crate) verbose: bool,

    #[arg(short = 'z', long = "logdir", help = "Also write logs under this directory")]
    pub(crate) log_dir: Option<PathBuf>,
}
