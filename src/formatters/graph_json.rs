use anyhow::Result;
use serde_json::json;
use std::fs;
use std::path::Path;

use crate::core::ContractGraph;

/// Standalone JSON artifact for one contract graph: a `meta` block with
/// counts plus the node and edge lists in insertion order.
pub struct GraphJsonFormatter {
    pretty: bool,
}

impl GraphJsonFormatter {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn format_graph(&self, graph: &ContractGraph, name: &str) -> Result<String> {
        let doc = graph.to_doc();
        let output = json!({
            "name": name,
            "meta": {
                "nodes": graph.symbol_count(),
                "edges": graph.dependency_count()
            },
            "nodes": doc.nodes,
            "edges": doc.edges
        });

        let content = if self.pretty {
            serde_json::to_string_pretty(&output)?
        } else {
            serde_json::to_string(&output)?
        };
        Ok(content)
    }

    pub fn format_to_file(
        &self,
        graph: &ContractGraph,
        name: &str,
        output_path: &Path,
    ) -> Result<()> {
        let content = self.format_graph(graph, name)?;
        fs::write(output_path, content)?;
        Ok(())
    }
}

impl Default for GraphJsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}
