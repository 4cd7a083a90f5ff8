use anyhow::Result;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::core::{ContractGraph, SymbolKind};

/// Visual style for one symbol kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeStyle {
    pub color: String,
    pub shape: String,
}

impl NodeStyle {
    pub fn new(color: &str, shape: &str) -> Self {
        Self {
            color: color.to_string(),
            shape: shape.to_string(),
        }
    }
}

/// Kind-to-style mapping with a fallback for kinds the map does not cover.
/// A kind missing from the map renders with the fallback; it never fails the
/// render.
#[derive(Debug, Clone)]
pub struct StyleMap {
    styles: HashMap<SymbolKind, NodeStyle>,
    fallback: NodeStyle,
}

impl StyleMap {
    /// Empty map: every kind renders with `fallback`.
    pub fn with_fallback(fallback: NodeStyle) -> Self {
        Self {
            styles: HashMap::new(),
            fallback,
        }
    }

    pub fn insert(&mut self, kind: SymbolKind, style: NodeStyle) {
        self.styles.insert(kind, style);
    }

    pub fn style_for(&self, kind: SymbolKind) -> &NodeStyle {
        self.styles.get(&kind).unwrap_or(&self.fallback)
    }
}

impl Default for StyleMap {
    fn default() -> Self {
        let mut map = Self::with_fallback(NodeStyle::new("gray", "ellipse"));
        map.insert(SymbolKind::Function, NodeStyle::new("lightblue", "ellipse"));
        map.insert(SymbolKind::Variable, NodeStyle::new("lightgreen", "circle"));
        map.insert(SymbolKind::Mapping, NodeStyle::new("orange", "box"));
        map.insert(SymbolKind::Modifier, NodeStyle::new("red", "diamond"));
        map.insert(SymbolKind::Structure, NodeStyle::new("purple", "hexagon"));
        map
    }
}

/// Graphviz renderer for contract graphs. Consumes a finished graph and a
/// style mapping; never mutates the graph.
pub struct DotFormatter {
    styles: StyleMap,
}

impl DotFormatter {
    pub fn new() -> Self {
        Self {
            styles: StyleMap::default(),
        }
    }

    #[allow(dead_code)]
    pub fn with_styles(mut self, styles: StyleMap) -> Self {
        self.styles = styles;
        self
    }

    pub fn format_graph(&self, graph: &ContractGraph, name: &str) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "digraph \"{}\" {{", escape_dot_string(name));
        let _ = writeln!(output, "    graph [rankdir=LR, fontname=\"Arial\"];");
        let _ = writeln!(output, "    node [style=filled, fontname=\"Arial\"];");
        let _ = writeln!(output, "    edge [fontname=\"Arial\"];");
        let _ = writeln!(output);

        // Node ids follow insertion order, so output is reproducible
        let mut ids: HashMap<&str, usize> = HashMap::new();
        for (index, symbol) in graph.symbols().enumerate() {
            ids.insert(symbol.name.as_str(), index);
            let style = self.styles.style_for(symbol.kind);
            let label = format!("{}: {}", symbol.kind.label(), symbol.name);
            let _ = writeln!(
                output,
                "    n{} [label=\"{}\", shape=\"{}\", fillcolor=\"{}\", tooltip=\"line {}\"];",
                index,
                escape_dot_string(&label),
                style.shape,
                style.color,
                symbol.line
            );
        }
        let _ = writeln!(output);

        for dependency in graph.dependencies() {
            if let (Some(&source), Some(&target)) = (
                ids.get(dependency.source.as_str()),
                ids.get(dependency.target.as_str()),
            ) {
                let _ = writeln!(output, "    n{} -> n{};", source, target);
            }
        }

        output.push_str("}\n");
        output
    }

    pub fn format_to_file(
        &self,
        graph: &ContractGraph,
        name: &str,
        output_path: &Path,
    ) -> Result<()> {
        let content = self.format_graph(graph, name);
        fs::write(output_path, content)?;
        Ok(())
    }
}

impl Default for DotFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Escapes a string for use inside a quoted DOT attribute value.
pub fn escape_dot_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "")
        .replace('\t', "\\t")
}
