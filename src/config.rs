//! Options for an analysis run.
//!
//! [`AnalysisOptions`] carries everything a run needs: the target file, the
//! tree to scan, exclusions, output naming and rendering settings. The CLI
//! maps its flags onto these; library callers use the `with_*` builders.

use std::path::{Path, PathBuf};

use crate::analysis::ExclusionList;
use crate::discovery::{FileDiscovery, DEFAULT_EXTENSION};
use crate::export::ExportFormat;

/// Which declarations of the target file are searched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeclarationScope {
    /// Only declarations the target file exports
    #[default]
    Exported,
    /// Every top-level declaration, exported or not
    All,
}

/// How the graph image is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Graphviz executable invoked on the `.dot` file
    pub program: String,
    /// Write only the `.dot` file
    pub skip_image: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            program: "dot".to_string(),
            skip_image: false,
        }
    }
}

/// Settings for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// File whose declarations are searched for
    pub target: PathBuf,
    /// Directory tree scanned for consumers
    pub root: PathBuf,
    /// Path suffixes of files that never contribute usages
    pub exclusions: ExclusionList,
    /// Base name of the generated artifacts (`<base>.dot`, `<base>.png`)
    pub output_base: PathBuf,
    /// Extensions of candidate files, without leading dots
    pub extensions: Vec<String>,
    /// Directory names pruned from the scan
    pub skip_dirs: Vec<String>,
    /// Which target declarations are searched for
    pub scope: DeclarationScope,
    /// Abort on the first candidate that fails to parse
    pub strict: bool,
    /// Graph image settings
    pub render: RenderOptions,
    /// Optional usage report written next to the graph
    pub report: Option<ExportFormat>,
}

impl AnalysisOptions {
    /// Creates options with default extensions, no exclusions and image
    /// rendering enabled.
    pub fn new(
        target: impl Into<PathBuf>,
        root: impl Into<PathBuf>,
        output_base: impl Into<PathBuf>,
    ) -> Self {
        Self {
            target: target.into(),
            root: root.into(),
            exclusions: ExclusionList::default(),
            output_base: output_base.into(),
            extensions: vec![DEFAULT_EXTENSION.to_string()],
            skip_dirs: Vec::new(),
            scope: DeclarationScope::default(),
            strict: false,
            render: RenderOptions::default(),
            report: None,
        }
    }

    pub fn with_exclusions<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclusions = ExclusionList::new(suffixes);
        self
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let extensions: Vec<String> = extensions.into_iter().map(Into::into).collect();
        if !extensions.is_empty() {
            self.extensions = extensions;
        }
        self
    }

    pub fn with_skip_dirs<I, S>(mut self, skip_dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_dirs = skip_dirs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_scope(mut self, scope: DeclarationScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_render(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }

    pub fn with_report(mut self, report: Option<ExportFormat>) -> Self {
        self.report = report;
        self
    }

    /// The file discovery described by these options.
    pub fn discovery(&self) -> FileDiscovery {
        FileDiscovery::new(&self.root)
            .with_extensions(&self.extensions)
            .with_skip_dirs(self.skip_dirs.iter().cloned())
    }

    /// Path of an artifact: the output base with `extension` appended.
    pub fn artifact_path(&self, extension: &str) -> PathBuf {
        artifact_path(&self.output_base, extension)
    }
}

/// Appends `.extension` to `base` without replacing an existing extension,
/// so `out.v2` becomes `out.v2.dot`.
pub fn artifact_path(base: &Path, extension: &str) -> PathBuf {
    let mut path = base.as_os_str().to_owned();
    path.push(".");
    path.push(extension);
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = AnalysisOptions::new("events.ts", ".", "events");

        assert_eq!(options.extensions, vec!["ts"]);
        assert_eq!(options.scope, DeclarationScope::Exported);
        assert!(!options.strict);
        assert_eq!(options.render.program, "dot");
        assert!(options.exclusions.is_empty());
    }

    #[test]
    fn test_artifact_path_appends_extension() {
        assert_eq!(
            artifact_path(Path::new("out/events"), "dot"),
            PathBuf::from("out/events.dot")
        );
        assert_eq!(
            artifact_path(Path::new("events.v2"), "png"),
            PathBuf::from("events.v2.png")
        );
    }

    #[test]
    fn test_empty_extensions_keep_default() {
        let options =
            AnalysisOptions::new("events.ts", ".", "events").with_extensions(Vec::<String>::new());

        assert_eq!(options.extensions, vec!["ts"]);
    }

    #[test]
    fn test_builders() {
        let options = AnalysisOptions::new("events.ts", "src", "graph")
            .with_exclusions(["module3.ts"])
            .with_skip_dirs(["node_modules"])
            .with_scope(DeclarationScope::All)
            .with_strict(true)
            .with_report(Some(ExportFormat::Json));

        assert!(options.exclusions.is_excluded(Path::new("src/module3.ts")));
        assert_eq!(options.skip_dirs, vec!["node_modules"]);
        assert_eq!(options.scope, DeclarationScope::All);
        assert!(options.strict);
        assert_eq!(options.artifact_path("json"), PathBuf::from("graph.json"));
    }
}
