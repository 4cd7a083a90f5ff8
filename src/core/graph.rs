use petgraph::{graph::EdgeIndex, graph::NodeIndex, Directed, Graph};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Copy)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Function,
    Variable,
    Mapping,
    Modifier,
    Structure,
}

impl SymbolKind {
    /// Capitalized form used in rendered labels ("Function: transfer").
    pub fn label(self) -> &'static str {
        match self {
            SymbolKind::Function => "Function",
            SymbolKind::Variable => "Variable",
            SymbolKind::Mapping => "Mapping",
            SymbolKind::Modifier => "Modifier",
            SymbolKind::Structure => "Structure",
        }
    }

    /// Kinds a function may depend on. Structures take part in no edges.
    pub fn is_dependency_target(self) -> bool {
        matches!(
            self,
            SymbolKind::Variable | SymbolKind::Mapping | SymbolKind::Modifier
        )
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolKind::Function => write!(f, "function"),
            SymbolKind::Variable => write!(f, "variable"),
            SymbolKind::Mapping => write!(f, "mapping"),
            SymbolKind::Modifier => write!(f, "modifier"),
            SymbolKind::Structure => write!(f, "structure"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    /// 1-based line of the first classification match.
    pub line: usize,
}

impl Symbol {
    pub fn new(name: String, kind: SymbolKind, line: usize) -> Self {
        Self { name, kind, line }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Dependency {
    pub source: String,
    pub target: String,
}

impl Dependency {
    pub fn new(source: String, target: String) -> Self {
        Self { source, target }
    }
}

/// Flat serialized form of a [`ContractGraph`]. Nodes and edges keep
/// insertion order, so a round trip reproduces the graph byte for byte.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraphDoc {
    pub nodes: Vec<Symbol>,
    pub edges: Vec<Dependency>,
}

/// Symbol graph of a single contract file. Symbol names are node identity;
/// edges run from functions to the variables, mappings, and modifiers they
/// reference.
#[derive(Clone)]
pub struct ContractGraph {
    graph: Graph<Symbol, Dependency, Directed>,
    name_index: HashMap<String, NodeIndex>,
    edge_pairs: HashSet<(NodeIndex, NodeIndex)>,
}

impl ContractGraph {
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            name_index: HashMap::new(),
            edge_pairs: HashSet::new(),
        }
    }

    /// Adds a symbol under its name. A second symbol with the same name is
    /// dropped; the first keeps its kind and line.
    pub fn add_symbol(&mut self, symbol: Symbol) -> bool {
        if self.name_index.contains_key(&symbol.name) {
            return false;
        }
        let name = symbol.name.clone();
        let index = self.graph.add_node(symbol);
        self.name_index.insert(name, index);
        true
    }

    /// Adds a dependency edge by endpoint names. The edge is rejected unless
    /// both endpoints exist, the source is a function, and the target is a
    /// variable, mapping, or modifier. Duplicate pairs are kept once.
    pub fn add_dependency(&mut self, source: &str, target: &str) -> bool {
        let (source_idx, target_idx) =
            match (self.name_index.get(source), self.name_index.get(target)) {
                (Some(&source_idx), Some(&target_idx)) => (source_idx, target_idx),
                _ => return false,
            };

        if self.graph[source_idx].kind != SymbolKind::Function {
            return false;
        }
        if !self.graph[target_idx].kind.is_dependency_target() {
            return false;
        }
        if !self.edge_pairs.insert((source_idx, target_idx)) {
            return false;
        }

        self.graph.add_edge(
            source_idx,
            target_idx,
            Dependency::new(source.to_string(), target.to_string()),
        );
        true
    }

    #[allow(dead_code)]
    pub fn symbol(&self, name: &str) -> Option<&Symbol> {
        self.name_index.get(name).map(|&idx| &self.graph[idx])
    }

    #[allow(dead_code)]
    pub fn contains_symbol(&self, name: &str) -> bool {
        self.name_index.contains_key(name)
    }

    #[allow(dead_code)]
    pub fn contains_dependency(&self, source: &str, target: &str) -> bool {
        match (self.name_index.get(source), self.name_index.get(target)) {
            (Some(&source_idx), Some(&target_idx)) => {
                self.edge_pairs.contains(&(source_idx, target_idx))
            }
            _ => false,
        }
    }

    /// Symbols in classification (insertion) order.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> + '_ {
        self.graph.node_indices().map(|idx| &self.graph[idx])
    }

    /// Dependencies in inference (insertion) order.
    pub fn dependencies(&self) -> impl Iterator<Item = &Dependency> + '_ {
        self.graph.edge_indices().map(|idx: EdgeIndex| &self.graph[idx])
    }

    pub fn symbol_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn dependency_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn to_doc(&self) -> GraphDoc {
        GraphDoc {
            nodes: self.symbols().cloned().collect(),
            edges: self.dependencies().cloned().collect(),
        }
    }

    /// Replays a document through the normal insertion path so name identity,
    /// edge legality, and dedup hold on load as well.
    pub fn from_doc(doc: GraphDoc) -> Self {
        let mut graph = Self::new();
        for symbol in doc.nodes {
            graph.add_symbol(symbol);
        }
        for edge in doc.edges {
            graph.add_dependency(&edge.source, &edge.target);
        }
        graph
    }
}

impl Default for ContractGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ContractGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractGraph")
            .field("symbols", &self.graph.node_count())
            .field("dependencies", &self.graph.edge_count())
            .finish()
    }
}

impl Serialize for ContractGraph {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_doc().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ContractGraph {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        GraphDoc::deserialize(deserializer).map(ContractGraph::from_doc)
    }
}
