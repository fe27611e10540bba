//! # hotrange core
//!
//! Finds the ranges of a CockroachDB cluster that serve the most queries and
//! maps them back to the schema objects they store.
//!
//! ## Pipeline
//!
//! 1. **Parse**: decode a `/_status/raft` document into a [`RangeSnapshot`]
//! 2. **Extract**: derive load, leaseholder and replica nodes per range
//! 3. **Rank**: order ranges by queries-per-second, keep the top N
//! 4. **Resolve**: look up (database, table, index) for each ranked range
//! 5. **Format**: render the resolved rows as a table or JSON
//!
//! Steps 1-3 and 5 are pure. Step 4 is the only one that talks to the
//! outside world, through a [`CatalogStore`].

mod errors;
pub use errors::{HotRangeError, Result};

pub mod snapshot;
pub use snapshot::{parse_snapshot, NodeId, NodeReport, RangeRecord, RangeSnapshot};

pub mod metrics;
pub use metrics::{extract_metrics, RangeMetrics};

pub mod rankings;
pub use rankings::{rank_ranges, RankedRange};

pub mod catalog;
pub use catalog::{CatalogStore, MemoryCatalog, SchemaObjectRef};

pub mod resolver;
pub use resolver::{MissingObjectPolicy, ObjectResolution, ResolvedRange, SchemaResolver};

pub mod report;
pub use report::{HotRangeReport, OutputFormat};

mod pipeline;
pub use pipeline::{HotRangePipeline, PipelineOptions};

/// Number of ranges reported when the caller does not ask for a specific count.
pub const DEFAULT_TOP_N: usize = 10;
