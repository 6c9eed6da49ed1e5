//! Declaration usage analysis.
//!
//! This module finds, for every declaration of a target file, the modules
//! of a source tree that import it by name.
//!
//! # Pipeline
//!
//! 1. [`DeclarationExtractor`] reads the target's top-level declarations
//! 2. [`FileDiscovery`](crate::discovery::FileDiscovery) walks the tree
//! 3. [`ImportResolver`] matches each candidate's named imports and fills a
//!    [`UsageIndex`], skipping files on the [`ExclusionList`]
//! 4. [`run`] turns the index into a graph and writes the artifacts
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use fanout::analysis::analyze_usage;
//!
//! let report = analyze_usage(
//!     Path::new("src/events.ts"),
//!     Path::new("src"),
//!     &["generated.ts"],
//!     Path::new("events"),
//! )?;
//!
//! for (declaration, modules) in report.scan.index.iter() {
//!     println!("{}: {}", declaration, modules.join(", "));
//! }
//! ```

pub mod declarations;
pub mod index;
pub mod pipeline;
pub mod resolver;

pub use declarations::DeclarationExtractor;
pub use index::UsageIndex;
pub use pipeline::{
    analyze_usage, run, scan, AnalysisError, AnalysisReport, AnalysisResult, SkippedFile,
    UsageScan,
};
pub use resolver::{module_identifier, ExclusionList, FileResolution, ImportResolver};
