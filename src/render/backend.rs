//! Writing graph artifacts and invoking Graphviz.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::{debug, info};

use super::dot::to_dot;
use crate::config::{artifact_path, RenderOptions};
use crate::graph::UsageGraph;

/// Errors that can occur while writing artifacts.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Files produced by a render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    /// The DOT description, always written
    pub dot: PathBuf,
    /// The image Graphviz was asked to produce, if it could be launched.
    /// The file appears once the background process finishes.
    pub image: Option<PathBuf>,
}

/// Writes `<base>.dot` and starts Graphviz on it to produce `<base>.png`.
///
/// The Graphviz process runs in the background and is never waited on. A
/// missing executable only means no image; the DOT file is still written.
pub fn render_artifacts(
    graph: &UsageGraph,
    output_base: &Path,
    options: &RenderOptions,
) -> RenderResult<Artifacts> {
    let dot_path = artifact_path(output_base, "dot");
    fs::write(&dot_path, to_dot(graph)).map_err(|source| RenderError::Write {
        path: dot_path.display().to_string(),
        source,
    })?;
    info!(path = %dot_path.display(), "wrote graph description");

    let image = if options.skip_image {
        None
    } else {
        let png_path = artifact_path(output_base, "png");
        spawn_renderer(&options.program, &dot_path, &png_path).then_some(png_path)
    };

    Ok(Artifacts {
        dot: dot_path,
        image,
    })
}

/// Launches `<program> -Grankdir=LR -Tpng <dot> -o <png>` without waiting.
/// Returns whether the process could be started.
pub fn spawn_renderer(program: &str, dot_path: &Path, png_path: &Path) -> bool {
    let spawned = Command::new(program)
        .arg("-Grankdir=LR")
        .arg("-Tpng")
        .arg(dot_path)
        .arg("-o")
        .arg(png_path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();

    match spawned {
        Ok(child) => {
            debug!(program, pid = child.id(), "started graph renderer");
            true
        }
        Err(e) => {
            debug!(program, error = %e, "graph renderer unavailable, skipping image");
            false
        }
    }
}
