use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::{ContractGraph, DependencyInferencer, Symbol, SymbolClassifier};

/// Two-pass extraction pipeline for one contract: classify every line into
/// symbols, then infer dependency edges over the same immutable source.
/// Extraction within a file is strictly sequential; callers parallelize
/// across files.
pub struct ContractExtractor {
    classifier: SymbolClassifier,
    inferencer: DependencyInferencer,
}

impl ContractExtractor {
    pub fn new() -> Self {
        Self {
            classifier: SymbolClassifier::new(),
            inferencer: DependencyInferencer::new(),
        }
    }

    /// Extracts the symbol graph from in-memory source. Never fails: source
    /// with no recognizable declarations yields an empty graph.
    pub fn extract_source(&self, source: &str) -> ContractGraph {
        let mut graph = ContractGraph::new();

        for (index, line) in source.lines().enumerate() {
            if let Some((kind, name)) = self.classifier.classify_line(line) {
                graph.add_symbol(Symbol::new(name, kind, index + 1));
            }
        }

        self.inferencer.infer(&mut graph, source);
        graph
    }

    /// Reads and extracts one contract file. An unreadable file is the only
    /// error this stage can report; every other irregularity just yields
    /// fewer symbols or edges.
    #[allow(dead_code)]
    pub fn extract_file(&self, path: &Path) -> Result<ContractGraph> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read contract file: {}", path.display()))?;
        Ok(self.extract_source(&source))
    }
}
