pub mod dot;
pub mod graph_json;

pub use dot::{escape_dot_string, DotFormatter, NodeStyle, StyleMap};
pub use graph_json::GraphJsonFormatter;
