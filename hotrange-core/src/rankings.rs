use serde::Serialize;

use crate::metrics::RangeMetrics;
use crate::snapshot::NodeId;

/// A range that made it into the top N, with its 1-based position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedRange {
    pub rank: usize,
    pub range_id: String,
    pub queries_per_second: f64,
    pub leaseholder_node_id: Option<NodeId>,
    pub qps_source_node_id: Option<NodeId>,
    pub node_ids: Vec<NodeId>,
}

/// Hottest-first ranking.
///
/// ## Algorithm
/// Sorts by queries-per-second, descending. The sort is stable, so ranges
/// with equal load keep their snapshot order; `-0.0` and `0.0` compare equal.
/// The result is truncated to
/// `min(top_n, ranges.len())` and ranks are assigned from 1.
pub fn rank_ranges(mut ranges: Vec<RangeMetrics>, top_n: usize) -> Vec<RankedRange> {
    ranges.sort_by(|a, b| load_key(b).total_cmp(&load_key(a)));
    ranges.truncate(top_n);

    ranges
        .into_iter()
        .enumerate()
        .map(|(idx, m)| RankedRange {
            rank: idx + 1,
            range_id: m.range_id,
            queries_per_second: m.queries_per_second,
            leaseholder_node_id: m.leaseholder_node_id,
            qps_source_node_id: m.qps_source_node_id,
            node_ids: m.node_ids,
        })
        .collect()
}

fn load_key(metrics: &RangeMetrics) -> f64 {
    metrics.queries_per_second + 0.0
}
