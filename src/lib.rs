//! # SOLGRAPH
//!
//! Smart contract symbol graph extraction for vulnerability dataset
//! construction.
//!
//! SOLGRAPH scans Solidity sources, classifies declarations line by line
//! into typed symbols (functions, variables, mappings, modifiers,
//! structures), infers function-to-state dependency edges, and assembles one
//! dataset record per contract: token sequence, optional detector analysis,
//! and the symbol graph.
//!
//! ## Pipeline
//!
//! - **Extraction**: ordered pattern rules, first match wins per line;
//!   whole-file substring scan for dependency edges
//! - **Dataset**: fixed-length token encoding, external detector labeling,
//!   JSON records that round-trip the graph losslessly
//! - **Rendering**: per-contract Graphviz DOT or JSON graph artifacts

pub mod core;
pub mod dataset;
pub mod formatters;
