use tracing::{debug, info};

use crate::catalog::CatalogStore;
use crate::metrics::extract_metrics;
use crate::rankings::{rank_ranges, RankedRange};
use crate::report::HotRangeReport;
use crate::resolver::{MissingObjectPolicy, ResolvedRange, SchemaResolver};
use crate::snapshot::parse_snapshot;
use crate::{Result, DEFAULT_TOP_N};

/// Parameters of one hot range run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOptions {
    /// How many of the hottest ranges to report.
    pub top_n: usize,
    pub on_missing: MissingObjectPolicy,
    /// Catalog lookups allowed in flight at once.
    pub max_parallel: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            on_missing: MissingObjectPolicy::Fail,
            max_parallel: 1,
        }
    }
}

/// parse → extract → rank → resolve → report
#[derive(Debug, Clone, Default)]
pub struct HotRangePipeline {
    options: PipelineOptions,
}

impl HotRangePipeline {
    pub fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    /// Parse the raw snapshot and return the top N ranges, hottest first.
    pub fn rank(&self, raw: &[u8]) -> Result<Vec<RankedRange>> {
        let snapshot = parse_snapshot(raw)?;
        debug!(ranges = snapshot.len(), "parsed range snapshot");

        let ranked = rank_ranges(extract_metrics(&snapshot), self.options.top_n);
        info!(
            ranges = snapshot.len(),
            reported = ranked.len(),
            top_n = self.options.top_n,
            "ranked ranges by queries per second"
        );

        Ok(ranked)
    }

    /// Full run: rank the snapshot, then resolve each ranked range against the catalog.
    pub async fn run<C: CatalogStore>(&self, raw: &[u8], catalog: &C) -> Result<HotRangeReport> {
        let ranked = self.rank(raw)?;
        self.resolve(ranked, catalog).await
    }

    /// Resolve already ranked ranges, one catalog lookup each.
    pub async fn resolve<C: CatalogStore>(
        &self,
        ranked: Vec<RankedRange>,
        catalog: &C,
    ) -> Result<HotRangeReport> {
        let rows = SchemaResolver::new(catalog, self.options.on_missing)
            .with_max_parallel(self.options.max_parallel)
            .resolve(ranked)
            .await?;

        Ok(HotRangeReport::new(rows))
    }

    /// Rank without touching the catalog; every row is marked as skipped.
    pub fn run_without_catalog(&self, raw: &[u8]) -> Result<HotRangeReport> {
        let ranked = self.rank(raw)?;
        Ok(Self::skip_resolution(ranked))
    }

    pub fn skip_resolution(ranked: Vec<RankedRange>) -> HotRangeReport {
        HotRangeReport::new(ranked.into_iter().map(ResolvedRange::skipped).collect())
    }
}
