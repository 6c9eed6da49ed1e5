//! fanout - Declaration usage analyzer with Graphviz output
//!
//! Given a TypeScript file, this crate finds which files of a source tree
//! import each of its declarations by name, and renders the fan-out as a
//! directed graph (`<name>.dot`, plus `<name>.png` when Graphviz is
//! installed).

pub mod analysis;
pub mod config;
pub mod discovery;
pub mod export;
pub mod graph;
pub mod parser;
pub mod render;

pub use analysis::{analyze_usage, run, AnalysisError, AnalysisReport, UsageIndex};
pub use config::{AnalysisOptions, DeclarationScope, RenderOptions};
