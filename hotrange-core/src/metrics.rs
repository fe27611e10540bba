use serde::Serialize;
use tracing::warn;

use crate::snapshot::{NodeId, RangeRecord, RangeSnapshot};

/// Per-range values derived from the replica reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeMetrics {
    pub range_id: String,
    pub queries_per_second: f64,
    /// Lease holder named by the first replica report, not cross-checked.
    pub leaseholder_node_id: Option<NodeId>,
    /// Replica whose own lease record named itself, and whose load was used.
    pub qps_source_node_id: Option<NodeId>,
    pub node_ids: Vec<NodeId>,
}

impl RangeMetrics {
    /// True when the reported leaseholder is not the replica the load came from.
    pub fn leaseholder_disagrees(&self) -> bool {
        self.qps_source_node_id.is_some() && self.qps_source_node_id != self.leaseholder_node_id
    }
}

/// Extract metrics for every range, preserving snapshot order.
pub fn extract_metrics(snapshot: &RangeSnapshot) -> Vec<RangeMetrics> {
    snapshot.ranges.iter().map(range_metrics).collect()
}

pub fn range_metrics(record: &RangeRecord) -> RangeMetrics {
    let (qps_source_node_id, queries_per_second) = match self_reported_load(record) {
        Some((node_id, qps)) => (Some(node_id), qps),
        None => (None, 0.0),
    };

    let metrics = RangeMetrics {
        range_id: record.range_id.clone(),
        queries_per_second,
        leaseholder_node_id: leaseholder(record),
        qps_source_node_id,
        node_ids: nodes(record),
    };

    if metrics.leaseholder_disagrees() {
        warn!(
            range_id = %metrics.range_id,
            leaseholder = ?metrics.leaseholder_node_id,
            qps_source = ?metrics.qps_source_node_id,
            "first replica reports a different leaseholder than the replica the load was taken from"
        );
    }

    metrics
}

/// Load of the first replica whose lease record names itself as leaseholder.
///
/// Reports missing any of node id, lease holder or load are skipped.
pub fn self_reported_load(record: &RangeRecord) -> Option<(NodeId, f64)> {
    record.node_reports.iter().find_map(|report| {
        match (
            report.node_id,
            report.leaseholder_node_id,
            report.queries_per_second,
        ) {
            (Some(node_id), Some(leaseholder), Some(qps)) if node_id == leaseholder => {
                Some((node_id, qps))
            }
            _ => None,
        }
    })
}

/// Leaseholder as recorded by the first replica report.
pub fn leaseholder(record: &RangeRecord) -> Option<NodeId> {
    record
        .node_reports
        .first()
        .and_then(|report| report.leaseholder_node_id)
}

/// Every reporting node id, in report order, duplicates kept.
pub fn nodes(record: &RangeRecord) -> Vec<NodeId> {
    record
        .node_reports
        .iter()
        .filter_map(|report| report.node_id)
        .collect()
}
