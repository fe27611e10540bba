use anyhow::{anyhow, Context, Result};
use hotrange_catalog::PostgresOptions;
use hotrange_core::{MissingObjectPolicy, OutputFormat, PipelineOptions, DEFAULT_TOP_N};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::args::Args;
use crate::snapshot_source::{HttpSnapshot, SnapshotSource};

/// configuration settings loaded from the config file
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct LoadConfiguration {
    /// Cluster host, shared by the admin endpoint and the SQL endpoint
    pub(crate) host: String,
    /// Where the range status snapshot comes from
    pub(crate) snapshot: SnapshotConfig,
    /// SQL catalog connection
    pub(crate) catalog: CatalogConfig,
    /// Ranking and resolution settings
    pub(crate) report: ReportConfig,
    pub(crate) logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct SnapshotConfig {
    /// When set, the snapshot is read from this file and no HTTP call is made
    pub(crate) file: Option<PathBuf>,
    pub(crate) scheme: String,
    pub(crate) admin_port: u16,
    pub(crate) path: String,
    pub(crate) timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct CatalogConfig {
    /// Overrides the cluster host for SQL connections
    pub(crate) host: Option<String>,
    pub(crate) port: u16,
    pub(crate) database: String,
    pub(crate) user: String,
    pub(crate) password: Option<String>,
    pub(crate) connect_timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct ReportConfig {
    pub(crate) top_n: usize,
    pub(crate) on_missing: MissingObjectPolicy,
    pub(crate) max_parallel: usize,
    pub(crate) skip_resolve: bool,
    pub(crate) output: OutputFormat,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct LoggingConfig {
    pub(crate) verbose: bool,
    pub(crate) log_dir: Option<PathBuf>,
}

impl Default for LoadConfiguration {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            snapshot: SnapshotConfig::default(),
            catalog: CatalogConfig::default(),
            report: ReportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            file: None,
            scheme: "http".to_string(),
            admin_port: 26258,
            path: "/_status/raft".to_string(),
            timeout_ms: 30_000,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let defaults = PostgresOptions::default();
        Self {
            host: None,
            port: defaults.port,
            database: defaults.database,
            user: defaults.user,
            password: None,
            connect_timeout_ms: defaults.connect_timeout_ms,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            on_missing: MissingObjectPolicy::Fail,
            max_parallel: 1,
            skip_resolve: false,
            output: OutputFormat::Table,
        }
    }
}

impl LoadConfiguration {
    pub(crate) fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {:?}", path))
    }

    /// Command line values win over the file.
    pub(crate) fn apply_args(&mut self, args: &Args) -> Result<()> {
        if let Some(host) = &args.host {
            self.host = host.clone();
        }
        if let Some(file) = &args.snapshot_file {
            self.snapshot.file = Some(file.clone());
        }
        if let Some(port) = args.admin_port {
            self.snapshot.admin_port = port;
        }
        if let Some(port) = args.db_port {
            self.catalog.port = port;
        }
        if let Some(database) = &args.database {
            self.catalog.database = database.clone();
        }
        if let Some(user) = &args.user {
            self.catalog.user = user.clone();
        }
        if let Ok(password) = std::env::var("HOTRANGE_PASSWORD") {
            self.catalog.password = Some(password);
        }
        if let Some(top_n) = args.top_n {
            self.report.top_n = top_n;
        }
        if let Some(policy) = &args.on_missing {
            self.report.on_missing = policy.parse().map_err(|e: String| anyhow!(e))?;
        }
        if let Some(max_parallel) = args.max_parallel {
            self.report.max_parallel = max_parallel;
        }
        if args.skip_resolve {
            self.report.skip_resolve = true;
        }
        if let Some(output) = &args.output {
            self.report.output = output.parse().map_err(|e: String| anyhow!(e))?;
        }
        if args.verbose {
            self.logging.verbose = true;
        }
        if let Some(log_dir) = &args.log_dir {
            self.logging.log_dir = Some(log_dir.clone());
        }
        Ok(())
    }
}

/// Validated settings for one run
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ServiceConfiguration {
    pub(crate) snapshot_source: SnapshotSource,
    pub(crate) catalog: PostgresOptions,
    pub(crate) pipeline: PipelineOptions,
    pub(crate) skip_resolve: bool,
    pub(crate) output: OutputFormat,
    pub(crate) verbose: bool,
    pub(crate) log_dir: Option<PathBuf>,
}

impl TryFrom<LoadConfiguration> for ServiceConfiguration {
    type Error = anyhow::Error;

    fn try_from(config: LoadConfiguration) -> Result<Self> {
        if config.host.is_empty() {
            return Err(anyhow!("host must not be empty"));
        }
        if config.report.top_n == 0 {
            return Err(anyhow!("top_n must be at least 1"));
        }
        if config.report.max_parallel == 0 {
            return Err(anyhow!("max_parallel must be at least 1"));
        }

        let snapshot_source = match config.snapshot.file {
            Some(path) => SnapshotSource::File(path),
            None => {
                if !matches!(config.snapshot.scheme.as_str(), "http" | "https") {
                    return Err(anyhow!(
                        "unsupported snapshot scheme: {}",
                        config.snapshot.scheme
                    ));
                }
                if !config.snapshot.path.starts_with('/') {
                    return Err(anyhow!(
                        "snapshot path must start with '/': {}",
                        config.snapshot.path
                    ));
                }
                SnapshotSource::Http(HttpSnapshot {
                    scheme: config.snapshot.scheme,
                    host: config.host.clone(),
                    port: config.snapshot.admin_port,
                    path: config.snapshot.path,
                    timeout_ms: config.snapshot.timeout_ms,
                })
            }
        };

        let catalog = PostgresOptions {
            host: config.catalog.host.unwrap_or(config.host),
            port: config.catalog.port,
            database: config.catalog.database,
            user: config.catalog.user,
            password: config.catalog.password,
            connect_timeout_ms: config.catalog.connect_timeout_ms,
        };

        Ok(ServiceConfiguration {
            snapshot_source,
            catalog,
            pipeline: PipelineOptions {
                top_n: config.report.top_n,
                on_missing: config.report.on_missing,
                max_parallel: config.report.max_parallel,
            },
            skip_resolve: config.report.skip_resolve,
            output: config.report.output,
            verbose: config.logging.verbose,
            log_dir: config.logging.log_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults() {
        let config: ServiceConfiguration = LoadConfiguration::default().try_into().unwrap();

        assert_eq!(
            config.snapshot_source,
            SnapshotSource::Http(HttpSnapshot {
                scheme: "http".to_string(),
                host: "127.0.0.1".to_string(),
                port: 26258,
                path: "/_status/raft".to_string(),
                timeout_ms: 30_000,
            })
        );
        assert_eq!(config.catalog.port, 26257);
        assert_eq!(config.catalog.database, "defaultdb");
        assert_eq!(config.catalog.user, "root");
        assert_eq!(config.pipeline.top_n, 10);
        assert_eq!(config.pipeline.on_missing, MissingObjectPolicy::Fail);
        assert_eq!(config.output, OutputFormat::Table);
        assert!(!config.skip_resolve);
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
host: crdb-1.internal
snapshot:
  admin_port: 8080
  scheme: https
catalog:
  host: crdb-sql.internal
  database: movr
  user: analyst
report:
  top_n: 25
  on_missing: mark
  max_parallel: 4
  output: json
logging:
  verbose: true
"#;
        let load: LoadConfiguration = serde_yaml::from_str(yaml).unwrap();
        let config: ServiceConfiguration = load.try_into().unwrap();

        match &config.snapshot_source {
            SnapshotSource::Http(http) => {
                assert_eq!(http.url(), "https://crdb-1.internal:8080/_status/raft");
            }
            other => panic!("unexpected source {other:?}"),
        }
        assert_eq!(config.catalog.host, "crdb-sql.internal");
        assert_eq!(config.catalog.database, "movr");
        assert_eq!(config.catalog.user, "analyst");
        assert_eq!(config.pipeline.top_n, 25);
        assert_eq!(config.pipeline.on_missing, MissingObjectPolicy::Mark);
        assert_eq!(config.pipeline.max_parallel, 4);
        assert_eq!(config.output, OutputFormat::Json);
        assert!(config.verbose);
    }

    #[test]
    fn test_args_override_file() {
        let yaml = r#"
host: from-file
report:
  top_n: 25
"#;
        let mut load: LoadConfiguration = serde_yaml::from_str(yaml).unwrap();
        let args = Args::parse_from([
            "hotrange",
            "--host",
            "from-args",
            "--numtop",
            "3",
            "--snapshot-file",
            "ranges.json",
            "--skip-resolve",
        ]);

        load.apply_args(&args).unwrap();
        let config: ServiceConfiguration = load.try_into().unwrap();

        assert_eq!(config.catalog.host, "from-args");
        assert_eq!(config.pipeline.top_n, 3);
        assert_eq!(
            config.snapshot_source,
            SnapshotSource::File(PathBuf::from("ranges.json"))
        );
        assert!(config.skip_resolve);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let mut load = LoadConfiguration::default();
        load.report.top_n = 0;
        assert!(ServiceConfiguration::try_from(load).is_err());

        let mut load = LoadConfiguration::default();
        load.report.max_parallel = 0;
        assert!(ServiceConfiguration::try_from(load).is_err());

        let mut load = LoadConfiguration::default();
        load.snapshot.scheme = "ftp".to_string();
        assert!(ServiceConfiguration::try_from(load).is_err());
    }

    #[test]
    fn test_unknown_policy_in_yaml() {
        let res: Result<LoadConfiguration, _> = serde_yaml::from_str("report:\n  on_missing: skip\n");
        assert!(res.is_err());
    }
}
