//! Graph module for declaration usage modeling.
//!
//! This module provides the [`UsageGraph`] struct, built from a finished
//! [`UsageIndex`](crate::analysis::UsageIndex), and the deterministic
//! [`edge_color`] function used to color its edges.
//!
//! # Example
//!
//! ```rust
//! use fanout::analysis::UsageIndex;
//! use fanout::graph::UsageGraph;
//!
//! let mut index = UsageIndex::new();
//! index.record("UserCreated", "mailer.ts");
//! index.record("UserCreated", "audit.ts");
//!
//! let graph = UsageGraph::from_index(&index);
//! assert_eq!(graph.consumers_of("UserCreated"), vec!["mailer.ts", "audit.ts"]);
//! ```

mod color;
mod usage_graph;

pub use color::edge_color;
pub use usage_graph::{EdgeView, UsageEdge, UsageGraph, UsageNode, DECLARATION_COLOR};
