//! End-to-end usage analysis.
//!
//! [`scan`] extracts the target's declarations, walks the tree and fills a
//! [`UsageIndex`]; [`run`] additionally builds the graph and writes the
//! artifacts. Nothing is written until the whole tree has been scanned, so
//! a fatal error leaves no partial output behind.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::declarations::DeclarationExtractor;
use super::index::UsageIndex;
use super::resolver::ImportResolver;
use crate::config::AnalysisOptions;
use crate::discovery::DiscoveryError;
use crate::export::{export_to_file, ExportData};
use crate::graph::UsageGraph;
use crate::parser::{Declaration, ParseError, SourceParser};
use crate::render::{render_artifacts, Artifacts, RenderError};

/// Errors that abort an analysis run.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error("Failed to initialize source parser")]
    Setup(#[source] ParseError),

    #[error("Failed to read declarations from target file")]
    Target(#[source] ParseError),

    #[error("Failed to process candidate file")]
    Candidate(#[source] ParseError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Failed to write report {path}: {source}")]
    Report {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Result type for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// A candidate file left out of the index because it could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of scanning a tree for usages.
#[derive(Debug, Clone, Default)]
pub struct UsageScan {
    /// Declarations searched for, in target file order
    pub declarations: Vec<Declaration>,
    /// Usages found
    pub index: UsageIndex,
    /// Candidate files visited, excluded and skipped ones included
    pub files_scanned: usize,
    /// Visited files that matched the exclusion list
    pub files_excluded: usize,
    /// Files that failed to parse (only populated outside strict mode)
    pub skipped: Vec<SkippedFile>,
}

impl UsageScan {
    /// Declarations no scanned file imports.
    pub fn unused_declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations
            .iter()
            .filter(|d| !self.index.contains(&d.name))
    }
}

/// Everything a completed run produced.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub scan: UsageScan,
    pub graph: UsageGraph,
    pub artifacts: Artifacts,
    /// Path of the usage report, when one was requested
    pub report: Option<PathBuf>,
}

/// Scans the tree described by `options` and returns the usage index.
///
/// Discovery errors, target parse errors and candidate files that cannot
/// be read are fatal. A candidate that fails to parse is skipped with a
/// warning, or aborts the scan when `options.strict` is set.
pub fn scan(options: &AnalysisOptions) -> AnalysisResult<UsageScan> {
    let mut parser = SourceParser::new().map_err(AnalysisError::Setup)?;

    let declarations = DeclarationExtractor::new(options.scope)
        .extract(&mut parser, &options.target)
        .map_err(AnalysisError::Target)?;
    info!(
        file = %options.target.display(),
        declarations = declarations.len(),
        "searching for usages"
    );

    let resolver = ImportResolver::new(&declarations, &options.exclusions);
    let mut index = UsageIndex::new();
    let mut files_scanned = 0;
    let mut files_excluded = 0;
    let mut skipped = Vec::new();

    for path in options.discovery().walk()? {
        let path = path?;
        files_scanned += 1;
        debug!(file = %path.display(), "resolving imports");

        match resolver.resolve_file(&mut parser, &path, &mut index) {
            Ok(resolution) => {
                if resolution.excluded {
                    files_excluded += 1;
                }
            }
            Err(e @ ParseError::Io { .. }) => return Err(AnalysisError::Candidate(e)),
            Err(e) if options.strict => return Err(AnalysisError::Candidate(e)),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "skipping file that failed to parse");
                skipped.push(SkippedFile {
                    path,
                    reason: e.to_string(),
                });
            }
        }
    }

    info!(
        files = files_scanned,
        excluded = files_excluded,
        skipped = skipped.len(),
        used = index.len(),
        usages = index.total_usages(),
        "scan complete"
    );

    Ok(UsageScan {
        declarations,
        index,
        files_scanned,
        files_excluded,
        skipped,
    })
}

/// Runs a full analysis: scan, write the optional report, then build the
/// graph and write its artifacts.
///
/// The report goes first so a failure to write it leaves no graph behind.
pub fn run(options: &AnalysisOptions) -> AnalysisResult<AnalysisReport> {
    let scan = scan(options)?;

    let report = match options.report {
        Some(format) => {
            let path = options.artifact_path(format.extension());
            let data = ExportData::new(&options.target, &scan);
            export_to_file(format, &data, &path).map_err(|source| AnalysisError::Report {
                path: path.display().to_string(),
                source,
            })?;
            info!(path = %path.display(), format = %format, "wrote usage report");
            Some(path)
        }
        None => None,
    };

    let graph = UsageGraph::from_index(&scan.index);
    let artifacts = render_artifacts(&graph, &options.output_base, &options.render)?;

    Ok(AnalysisReport {
        scan,
        graph,
        artifacts,
        report,
    })
}

/// Finds which files under `root` import each declaration of `target` and
/// writes `<output_base>.dot` (and, in the background, `<output_base>.png`).
///
/// Files whose path ends with one of `exclusions` contribute no usages.
pub fn analyze_usage<S: AsRef<str>>(
    target: &Path,
    root: &Path,
    exclusions: &[S],
    output_base: &Path,
) -> AnalysisResult<AnalysisReport> {
    let options = AnalysisOptions::new(target, root, output_base)
        .with_exclusions(exclusions.iter().map(|s| s.as_ref().to_string()));
    run(&options)
}
