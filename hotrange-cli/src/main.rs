mod args;
mod logging;
mod service_configuration;
mod snapshot_source;

use anyhow::{Context, Result};
use clap::Parser;
use hotrange_catalog::{CatalogStorage, PostgresCatalog};
use hotrange_core::{HotRangePipeline, HotRangeReport};
use tracing::{debug, info};

use crate::{
    args::Args,
    service_configuration::{LoadConfiguration, ServiceConfiguration},
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // defaults, then the YAML file, then command line flags
    let mut load_config = match &args.config_file {
        Some(path) => LoadConfiguration::from_file(path)?,
        None => LoadConfiguration::default(),
    };
    load_config.apply_args(&args)?;
    let config: ServiceConfiguration = load_config.try_into()?;

    if let Some(path) = logging::init_logging(config.verbose, config.log_dir.as_deref())? {
        info!(path = %path.display(), "writing logs to file");
    }
    info!(version = env!("CARGO_PKG_VERSION"), "starting hotrange");
    debug!(?config, "effective configuration");

    let report = hot_ranges(&config).await?;

    let text = report.render(config.output)?;
    println!("{}", text.trim_end());

    Ok(())
}

async fn hot_ranges(config: &ServiceConfiguration) -> Result<HotRangeReport> {
    let raw = config.snapshot_source.fetch().await?;

    let pipeline = HotRangePipeline::new(config.pipeline.clone());
    // a malformed snapshot aborts before any catalog connection is opened
    let ranked = pipeline.rank(&raw)?;

    if config.skip_resolve {
        info!("schema resolution disabled, skipping catalog lookups");
        return Ok(HotRangePipeline::skip_resolution(ranked));
    }

    let catalog = PostgresCatalog::connect(&config.catalog)
        .await
        .with_context(|| format!("Failed to connect to catalog {}", config.catalog.endpoint()))?;
    info!(endpoint = catalog.endpoint(), "connected to the schema catalog");
    let storage = CatalogStorage::Postgres(catalog);

    let report = pipeline.resolve(ranked, &storage).await?;
    Ok(report)
}
