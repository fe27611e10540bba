use futures::{stream, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::catalog::{CatalogStore, SchemaObjectRef};
use crate::rankings::RankedRange;
use crate::{HotRangeError, Result};

/// What to do when the catalog has no row for a ranked range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingObjectPolicy {
    /// Abort the whole run with [`HotRangeError::NotFound`].
    #[default]
    Fail,
    /// Keep going and mark the row as unresolved.
    Mark,
}

impl FromStr for MissingObjectPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "fail" => Ok(Self::Fail),
            "mark" => Ok(Self::Mark),
            other => Err(format!("unknown missing-object policy: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "object", rename_all = "snake_case")]
pub enum ObjectResolution {
    Resolved(SchemaObjectRef),
    /// The catalog returned no row for the range.
    Unresolved,
    /// Resolution was turned off for this run.
    Skipped,
}

impl std::fmt::Display for ObjectResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectResolution::Resolved(object) => write!(f, "{}", object),
            ObjectResolution::Unresolved => write!(f, "<unresolved>"),
            ObjectResolution::Skipped => write!(f, "<skipped>"),
        }
    }
}

/// A ranked range together with the schema object it backs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedRange {
    #[serde(flatten)]
    pub range: RankedRange,
    pub schema_object: ObjectResolution,
}

impl ResolvedRange {
    pub fn skipped(range: RankedRange) -> Self {
        Self {
            range,
            schema_object: ObjectResolution::Skipped,
        }
    }
}

/// Resolves ranked ranges against a catalog, one lookup per range.
pub struct SchemaResolver<'a, C: CatalogStore> {
    catalog: &'a C,
    policy: MissingObjectPolicy,
    max_parallel: usize,
}

impl<'a, C: CatalogStore> SchemaResolver<'a, C> {
    pub fn new(catalog: &'a C, policy: MissingObjectPolicy) -> Self {
        Self {
            catalog,
            policy,
            max_parallel: 1,
        }
    }

    /// Allow up to `max_parallel` lookups in flight. Output stays in rank order.
    pub fn with_max_parallel(mut self, max_parallel: usize) -> Self {
        self.max_parallel = max_parallel.max(1);
        self
    }

    /// Resolve every range in rank order.
    ///
    /// With a single lookup in flight the first failure stops any further
    /// lookups. With more, lookups already in flight are allowed to finish
    /// but the error reported is still the first one in rank order.
    pub async fn resolve(&self, ranked: Vec<RankedRange>) -> Result<Vec<ResolvedRange>> {
        if self.max_parallel == 1 {
            let mut resolved = Vec::with_capacity(ranked.len());
            for range in ranked {
                resolved.push(self.resolve_one(range).await?);
            }
            return Ok(resolved);
        }

        stream::iter(ranked)
            .map(|range| self.resolve_one(range))
            .buffered(self.max_parallel)
            .try_collect()
            .await
    }

    async fn resolve_one(&self, range: RankedRange) -> Result<ResolvedRange> {
        let schema_object = match self.catalog.lookup_range(&range.range_id).await? {
            Some(object) => {
                debug!(range_id = %range.range_id, object = %object, "resolved range");
                ObjectResolution::Resolved(object)
            }
            None => match self.policy {
                MissingObjectPolicy::Fail => {
                    return Err(HotRangeError::NotFound {
                        range_id: range.range_id,
                    })
                }
                MissingObjectPolicy::Mark => {
                    warn!(range_id = %range.range_id, "no schema object found for range");
                    ObjectResolution::Unresolved
                }
            },
        };

        Ok(ResolvedRange {
            range,
            schema_object,
        })
    }
}
