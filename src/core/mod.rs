pub mod cache;
pub mod classifier;
pub mod extractor;
pub mod graph;
pub mod inference;
pub mod scanner;

pub use cache::{ExtractedEntry, ExtractionCache};
pub use classifier::SymbolClassifier;
pub use extractor::ContractExtractor;
pub use graph::{ContractGraph, Dependency, GraphDoc, Symbol, SymbolKind};
pub use inference::DependencyInferencer;
pub use scanner::ContractScanner;
