use crate::core::{ContractGraph, SymbolKind};

/// Infers function-to-state dependencies by scanning source lines for
/// occurrences of known symbol names.
///
/// The scan covers the whole file, not just the body of the function under
/// consideration: a function is linked to every variable, mapping, and
/// modifier whose name appears anywhere in the source. That
/// over-approximation is the documented contract of the extractor, not an
/// accident to be narrowed.
pub struct DependencyInferencer;

impl DependencyInferencer {
    pub fn new() -> Self {
        Self
    }

    /// Adds inferred edges to `graph` in deterministic order: functions in
    /// classification order, lines top to bottom, targets in classification
    /// order. Substring containment on the trimmed line is the only test; no
    /// word boundaries, no scoping. Repeated mentions collapse to one edge.
    pub fn infer(&self, graph: &mut ContractGraph, source: &str) {
        let functions: Vec<String> = graph
            .symbols()
            .filter(|symbol| symbol.kind == SymbolKind::Function)
            .map(|symbol| symbol.name.clone())
            .collect();
        let targets: Vec<String> = graph
            .symbols()
            .filter(|symbol| symbol.kind.is_dependency_target())
            .map(|symbol| symbol.name.clone())
            .collect();

        for function in &functions {
            for raw_line in source.lines() {
                let line = raw_line.trim();
                for target in &targets {
                    if line.contains(target.as_str()) {
                        graph.add_dependency(function, target);
                    }
                }
            }
        }
    }
}
