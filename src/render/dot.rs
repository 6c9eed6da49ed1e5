//! Graphviz DOT serialization of a usage graph.
//!
//! The layout mirrors how the graph is read: declarations sit in an
//! `events` cluster, consumer modules in a nested `modules` cluster, and
//! every usage is an edge colored after its module.

use std::io::{self, Write};

use crate::graph::{UsageGraph, DECLARATION_COLOR};

/// Name of the root digraph.
const GRAPH_NAME: &str = "G";

/// Writes a [`UsageGraph`] as DOT text.
pub struct DotWriter;

impl DotWriter {
    /// Serialize the graph to the given writer.
    pub fn write<W: Write>(&self, graph: &UsageGraph, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "digraph {} {{", quote(GRAPH_NAME))?;
        writeln!(writer, "  compound=true;")?;
        writeln!(writer, "  splines=polyline;")?;

        writeln!(writer, "  subgraph {} {{", quote("cluster_0"))?;
        writeln!(writer, "    label={};", quote("events"))?;

        writeln!(writer, "    subgraph {} {{", quote("cluster"))?;
        writeln!(writer, "      label={};", quote("modules"))?;
        for module in graph.module_names() {
            writeln!(writer, "      {} [shape=box];", quote(module))?;
        }
        writeln!(writer, "    }}")?;

        for declaration in graph.declaration_names() {
            writeln!(
                writer,
                "    {} [shape=box, style=filled, color={}];",
                quote(declaration),
                DECLARATION_COLOR
            )?;
        }
        writeln!(writer, "  }}")?;

        for edge in graph.edges() {
            writeln!(
                writer,
                "  {} -> {} [color={}];",
                quote(edge.module),
                quote(edge.declaration),
                quote(edge.color)
            )?;
        }

        writeln!(writer, "}}")
    }
}

/// Serialize the graph to a DOT string.
pub fn to_dot(graph: &UsageGraph) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail
    let _ = DotWriter.write(graph, &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Quote a DOT identifier, escaping embedded quotes.
fn quote(id: &str) -> String {
    format!("\"{}\"", id.replace('"', "\\\""))
}
