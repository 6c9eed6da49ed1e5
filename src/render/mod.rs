//! Rendering of usage graphs.
//!
//! [`DotWriter`] serializes a [`UsageGraph`](crate::graph::UsageGraph) into
//! Graphviz DOT text; [`render_artifacts`] writes that text to
//! `<base>.dot` and hands it to the `dot` executable to produce
//! `<base>.png` in the background.

mod backend;
mod dot;

pub use backend::{render_artifacts, spawn_renderer, Artifacts, RenderError, RenderResult};
pub use dot::{to_dot, DotWriter};
