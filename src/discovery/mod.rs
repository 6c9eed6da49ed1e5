//! Recursive discovery of candidate source files.
//!
//! [`FileDiscovery`] describes a directory tree and which files in it are
//! eligible; [`FileDiscovery::walk`] hands out a fresh, lazy [`Files`]
//! iterator every time it is called. Traversal is depth-first with entries
//! sorted by file name, so a fixed snapshot of the filesystem always yields
//! the same sequence.
//!
//! # Example
//!
//! ```ignore
//! use fanout::discovery::FileDiscovery;
//!
//! let discovery = FileDiscovery::new("./src").with_skip_dirs(["node_modules"]);
//! for path in discovery.walk()? {
//!     println!("{}", path?.display());
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::trace;
use walkdir::WalkDir;

/// Extension searched for when none is configured.
pub const DEFAULT_EXTENSION: &str = "ts";

/// Errors that can occur while enumerating files.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Root directory not found: {0}")]
    RootNotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Failed to read directory {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to walk directory tree: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Result type for discovery operations.
pub type DiscoveryResult<T> = Result<T, DiscoveryError>;

/// Describes which files under a root directory are candidates.
#[derive(Debug, Clone)]
pub struct FileDiscovery {
    root: PathBuf,
    /// Extensions without the leading dot
    extensions: Vec<String>,
    /// Directory names that are never descended into
    skip_dirs: Vec<String>,
}

impl FileDiscovery {
    /// Creates a discovery over `root` matching `.ts` files.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: vec![DEFAULT_EXTENSION.to_string()],
            skip_dirs: Vec::new(),
        }
    }

    /// Replaces the eligible extensions. A leading dot is optional.
    /// An empty list keeps the current extensions.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions: Vec<String> = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_string())
            .filter(|e| !e.is_empty())
            .collect();
        if !extensions.is_empty() {
            self.extensions = extensions;
        }
        self
    }

    /// Sets directory names to prune from the walk (e.g. `node_modules`).
    pub fn with_skip_dirs<I, S>(mut self, skip_dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_dirs = skip_dirs.into_iter().map(Into::into).collect();
        self
    }

    /// The directory being searched.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The eligible extensions, without leading dots.
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Returns true if a file name ends with one of the eligible extensions.
    pub fn is_eligible(&self, file_name: &str) -> bool {
        self.extensions.iter().any(|ext| {
            file_name
                .strip_suffix(ext.as_str())
                .is_some_and(|stem| stem.ends_with('.'))
        })
    }

    /// Starts a new traversal of the tree.
    ///
    /// Fails up front if the root is missing, not a directory or not
    /// readable. Errors hit deeper in the tree are yielded as `Err` items.
    pub fn walk(&self) -> DiscoveryResult<Files> {
        let display = self.root.display().to_string();

        let metadata = fs::metadata(&self.root).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => DiscoveryError::RootNotFound(display.clone()),
            _ => DiscoveryError::Io {
                path: display.clone(),
                source,
            },
        })?;
        if !metadata.is_dir() {
            return Err(DiscoveryError::NotADirectory(display));
        }
        fs::read_dir(&self.root).map_err(|source| DiscoveryError::Io {
            path: display,
            source,
        })?;

        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        Ok(Files {
            walker,
            discovery: self.clone(),
        })
    }
}

/// Lazy iterator over eligible files, produced by [`FileDiscovery::walk`].
pub struct Files {
    walker: walkdir::IntoIter,
    discovery: FileDiscovery,
}

impl Iterator for Files {
    type Item = DiscoveryResult<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(e.into())),
            };

            let name = entry.file_name().to_string_lossy().into_owned();

            if entry.file_type().is_dir() {
                if self.discovery.skip_dirs.contains(&name) {
                    trace!(dir = %entry.path().display(), "skipping directory");
                    self.walker.skip_current_dir();
                }
                continue;
            }

            if self.discovery.is_eligible(&name) {
                return Some(Ok(entry.into_path()));
            }
        }
    }
}
