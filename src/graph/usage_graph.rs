//! Usage graph implementation using petgraph.
//!
//! Models a finished [`UsageIndex`] as a directed graph with two node
//! classes: declarations of the target file and the modules that import
//! them. Edges point from a module to the declaration it imports.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

use super::color::edge_color;
use crate::analysis::UsageIndex;

/// Fill color of declaration nodes.
pub const DECLARATION_COLOR: &str = "orange";

/// A node in the usage graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsageNode {
    /// A declaration of the target file
    Declaration { name: String },
    /// A consumer module, identified by file name
    Module { name: String },
}

impl UsageNode {
    /// The node's identifier.
    pub fn name(&self) -> &str {
        match self {
            Self::Declaration { name } | Self::Module { name } => name,
        }
    }

    pub fn is_declaration(&self) -> bool {
        matches!(self, Self::Declaration { .. })
    }
}

/// An edge from a consumer module to a declaration it imports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageEdge {
    /// `#rrggbb` color derived from the module identifier
    pub color: String,
}

/// A resolved edge, by node names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeView<'a> {
    pub module: &'a str,
    pub declaration: &'a str,
    pub color: &'a str,
}

/// A directed graph of declaration usages.
///
/// Declaration and module identifiers live in separate namespaces, so a
/// module named like a declaration still gets its own node. Each module
/// appears once no matter how many declarations it imports; repeated
/// usages of the same pair produce repeated edges.
///
/// # Example
///
/// ```rust
/// use fanout::analysis::UsageIndex;
/// use fanout::graph::UsageGraph;
///
/// let mut index = UsageIndex::new();
/// index.record("Foo", "a.ts");
/// index.record("Bar", "a.ts");
///
/// let graph = UsageGraph::from_index(&index);
/// assert_eq!(graph.declaration_count(), 2);
/// assert_eq!(graph.module_count(), 1);
/// assert_eq!(graph.edge_count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct UsageGraph {
    graph: DiGraph<UsageNode, UsageEdge>,
    declarations: HashMap<String, NodeIndex>,
    modules: HashMap<String, NodeIndex>,
}

impl UsageGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the graph for a completed usage index: one node per key, one
    /// node per distinct consumer, one edge per recorded usage.
    pub fn from_index(index: &UsageIndex) -> Self {
        let mut graph = Self::new();
        for (declaration, consumers) in index.iter() {
            let target = graph.add_declaration(declaration);
            for module in consumers {
                let source = graph.add_module(module);
                graph.graph.add_edge(
                    source,
                    target,
                    UsageEdge {
                        color: edge_color(module),
                    },
                );
            }
        }
        graph
    }

    /// Adds a declaration node, returning the existing one if present.
    pub fn add_declaration(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.declarations.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(UsageNode::Declaration {
            name: name.to_string(),
        });
        self.declarations.insert(name.to_string(), idx);
        idx
    }

    /// Adds a module node, returning the existing one if present.
    pub fn add_module(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.modules.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(UsageNode::Module {
            name: name.to_string(),
        });
        self.modules.insert(name.to_string(), idx);
        idx
    }

    pub fn declaration_count(&self) -> usize {
        self.declarations.len()
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn has_declaration(&self, name: &str) -> bool {
        self.declarations.contains_key(name)
    }

    pub fn has_module(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// Declaration names in insertion order.
    pub fn declaration_names(&self) -> Vec<&str> {
        self.nodes_where(UsageNode::is_declaration)
    }

    /// Module names in insertion order.
    pub fn module_names(&self) -> Vec<&str> {
        self.nodes_where(|node| !node.is_declaration())
    }

    fn nodes_where(&self, keep: impl Fn(&UsageNode) -> bool) -> Vec<&str> {
        self.graph
            .node_indices()
            .filter_map(|idx| self.graph.node_weight(idx))
            .filter(|&node| keep(node))
            .map(UsageNode::name)
            .collect()
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> Vec<EdgeView<'_>> {
        self.graph
            .edge_references()
            .map(|edge| EdgeView {
                module: self.graph[edge.source()].name(),
                declaration: self.graph[edge.target()].name(),
                color: &edge.weight().color,
            })
            .collect()
    }

    /// Modules with an edge into `declaration`, one entry per edge, in
    /// insertion order.
    pub fn consumers_of(&self, declaration: &str) -> Vec<&str> {
        let Some(&idx) = self.declarations.get(declaration) else {
            return Vec::new();
        };
        let mut consumers: Vec<_> = self
            .graph
            .edges_directed(idx, Direction::Incoming)
            .map(|edge| (edge.id(), self.graph[edge.source()].name()))
            .collect();
        // petgraph walks adjacency lists newest first
        consumers.sort_by_key(|(id, _)| *id);
        consumers.into_iter().map(|(_, name)| name).collect()
    }
}
