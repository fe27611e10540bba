//! Typed view of a `/_status/raft` document.
//!
//! Only the top-level shape is checked eagerly. Each replica report keeps
//! whatever it could find, and the missing pieces are dealt with during
//! extraction so that one broken replica never hides the rest of the cluster.

use serde_json::{Map, Value};

use crate::{HotRangeError, Result};

pub type NodeId = u64;

const LEASE_HOLDER_POINTER: &str = "/range/state/state/lease/replica/nodeId";
const QPS_POINTER: &str = "/range/stats/queriesPerSecond";

/// The full decoded status document, ranges kept in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeSnapshot {
    pub ranges: Vec<RangeRecord>,
}

impl RangeSnapshot {
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// One range and the status reported by each of its replicas.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeRecord {
    pub range_id: String,
    pub node_reports: Vec<NodeReport>,
}

/// One replica's view of a range.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeReport {
    pub node_id: Option<NodeId>,
    /// The node that this replica's lease record names as leaseholder.
    pub leaseholder_node_id: Option<NodeId>,
    pub queries_per_second: Option<f64>,
}

impl NodeReport {
    pub fn new(node_id: NodeId, leaseholder_node_id: NodeId, queries_per_second: f64) -> Self {
        Self {
            node_id: Some(node_id),
            leaseholder_node_id: Some(leaseholder_node_id),
            queries_per_second: Some(queries_per_second),
        }
    }

    fn from_value(value: &Value) -> Self {
        Self {
            node_id: value.get("nodeId").and_then(as_node_id),
            leaseholder_node_id: value.pointer(LEASE_HOLDER_POINTER).and_then(as_node_id),
            queries_per_second: value.pointer(QPS_POINTER).and_then(as_load),
        }
    }
}

/// Decode raw status bytes into a [`RangeSnapshot`].
///
/// Fails with [`HotRangeError::MalformedInput`] when the document is not an
/// object, has no `ranges` object, or when a range entry is not an object.
pub fn parse_snapshot(raw: &[u8]) -> Result<RangeSnapshot> {
    let document: Value = serde_json::from_slice(raw)
        .map_err(|e| HotRangeError::MalformedInput(format!("not a JSON document: {}", e)))?;

    let root = document.as_object().ok_or_else(|| {
        HotRangeError::MalformedInput("top-level value is not an object".to_string())
    })?;

    let ranges = match root.get("ranges") {
        Some(Value::Object(ranges)) => ranges,
        Some(_) => {
            return Err(HotRangeError::MalformedInput(
                "`ranges` is not an object".to_string(),
            ))
        }
        None => {
            return Err(HotRangeError::MalformedInput(
                "missing `ranges` field".to_string(),
            ))
        }
    };

    let ranges = ranges
        .iter()
        .map(|(key, value)| parse_range(key, value))
        .collect::<Result<Vec<_>>>()?;

    Ok(RangeSnapshot { ranges })
}

fn parse_range(key: &str, value: &Value) -> Result<RangeRecord> {
    let range: &Map<String, Value> = value.as_object().ok_or_else(|| {
        HotRangeError::MalformedInput(format!("range {} is not an object", key))
    })?;

    let range_id = match range.get("rangeId") {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => key.to_string(),
    };

    let node_reports = match range.get("nodes") {
        Some(Value::Array(nodes)) => nodes.iter().map(NodeReport::from_value).collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(_) => {
            return Err(HotRangeError::MalformedInput(format!(
                "range {}: `nodes` is not an array",
                key
            )))
        }
    };

    Ok(RangeRecord {
        range_id,
        node_reports,
    })
}

// int64 fields may come back quoted from the status endpoint
fn as_node_id(value: &Value) -> Option<NodeId> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

// a load that is not a finite, non-negative number is treated as absent
fn as_load(value: &Value) -> Option<f64> {
    let qps: f64 = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    if qps.is_finite() && qps >= 0.0 {
        Some(qps + 0.0)
    } else {
        None
    }
}
