use prettytable::{format, Cell, Row, Table};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::resolver::ResolvedRange;
use crate::snapshot::NodeId;
use crate::Result;

pub const REPORT_COLUMNS: [&str; 6] = [
    "RANK",
    "RANGE ID",
    "QPS",
    "NODES",
    "LEASEHOLDER",
    "SCHEMA OBJECT",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}

/// The ranked and resolved rows of one run, hottest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HotRangeReport {
    pub rows: Vec<ResolvedRange>,
}

impl HotRangeReport {
    pub fn new(rows: Vec<ResolvedRange>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Table => Ok(self.render_table()),
            OutputFormat::Json => self.render_json(),
        }
    }

    /// One header line followed by one line per row, columns aligned.
    pub fn render_table(&self) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_CLEAN);
        table.add_row(Row::new(REPORT_COLUMNS.iter().map(|c| Cell::new(c)).collect()));

        for row in &self.rows {
            let range = &row.range;
            table.add_row(Row::new(vec![
                Cell::new(&range.rank.to_string()),
                Cell::new(&range.range_id),
                Cell::new(&format!("{:.6}", range.queries_per_second)),
                Cell::new(&format_nodes(&range.node_ids)),
                Cell::new(&format_node(range.leaseholder_node_id)),
                Cell::new(&row.schema_object.to_string()),
            ]));
        }

        table.to_string()
    }

    pub fn render_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.rows)?)
    }
}

fn format_nodes(nodes: &[NodeId]) -> String {
    format!("{:?}", nodes)
}

fn format_node(node: Option<NodeId>) -> String {
    node.map(|id| id.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
