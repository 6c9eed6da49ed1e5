//! Export functionality for usage analysis results.
//!
//! This module provides exporters that write a finished scan as a usage
//! report in JSON, CSV or Markdown, next to the graph artifacts.

pub mod csv;
pub mod json;
pub mod markdown;

use crate::analysis::{SkippedFile, UsageScan};
use crate::parser::Declaration;
use indexmap::IndexMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// JSON format - machine-readable, full data
    Json,
    /// CSV format - one row per declaration and consumer
    Csv,
    /// Markdown format - human-readable report
    Markdown,
}

impl ExportFormat {
    /// File extension used for reports in this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Markdown => "md",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            _ => Err(format!(
                "Unknown report format: '{}'. Valid formats: json, csv, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// One target declaration and the modules importing it.
#[derive(Debug, Clone)]
pub struct DeclarationUsage {
    pub declaration: Declaration,
    /// One entry per recorded usage, duplicates kept
    pub consumers: Vec<String>,
}

impl DeclarationUsage {
    pub fn is_used(&self) -> bool {
        !self.consumers.is_empty()
    }

    /// Distinct consumers with their usage counts, in first-seen order.
    pub fn consumer_counts(&self) -> Vec<(&str, usize)> {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for module in &self.consumers {
            *counts.entry(module.as_str()).or_insert(0) += 1;
        }
        counts.into_iter().collect()
    }
}

/// Data container for export operations.
///
/// Holds the results of one scan, with declarations in target file order
/// whether or not anything imports them.
#[derive(Debug, Clone)]
pub struct ExportData {
    /// Target file the declarations come from
    pub target: String,
    pub usages: Vec<DeclarationUsage>,
    pub files_scanned: usize,
    pub files_excluded: usize,
    pub skipped: Vec<SkippedFile>,
}

impl ExportData {
    /// Create export data from a finished scan.
    pub fn new(target: &Path, scan: &UsageScan) -> Self {
        let usages = scan
            .declarations
            .iter()
            .map(|declaration| DeclarationUsage {
                declaration: declaration.clone(),
                consumers: scan
                    .index
                    .consumers(&declaration.name)
                    .map(<[String]>::to_vec)
                    .unwrap_or_default(),
            })
            .collect();

        Self {
            target: target.display().to_string(),
            usages,
            files_scanned: scan.files_scanned,
            files_excluded: scan.files_excluded,
            skipped: scan.skipped.clone(),
        }
    }

    /// Number of declarations imported at least once
    pub fn used_count(&self) -> usize {
        self.usages.iter().filter(|u| u.is_used()).count()
    }

    /// Declarations nothing imports
    pub fn unused(&self) -> impl Iterator<Item = &Declaration> {
        self.usages
            .iter()
            .filter(|u| !u.is_used())
            .map(|u| &u.declaration)
    }

    /// Total recorded usages
    pub fn total_usages(&self) -> usize {
        self.usages.iter().map(|u| u.consumers.len()).sum()
    }

    /// Number of distinct consumer modules
    pub fn module_count(&self) -> usize {
        self.usages
            .iter()
            .flat_map(|u| u.consumers.iter())
            .collect::<indexmap::IndexSet<_>>()
            .len()
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the data to the given writer.
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()>;
}

/// Export data in the specified format.
pub fn export<W: Write>(
    format: ExportFormat,
    data: &ExportData,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ExportFormat::Json => json::JsonExporter.export(data, writer),
        ExportFormat::Csv => csv::CsvExporter.export(data, writer),
        ExportFormat::Markdown => markdown::MarkdownExporter.export(data, writer),
    }
}

/// Export data to a string.
pub fn export_to_string(format: ExportFormat, data: &ExportData) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, data, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Export data to a file, replacing any existing content.
pub fn export_to_file(format: ExportFormat, data: &ExportData, path: &Path) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    export(format, data, &mut writer)?;
    writer.flush()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::analysis::UsageIndex;
    use crate::parser::DeclarationKind;
    use std::path::PathBuf;

    /// `Foo` used by a.ts twice and b.ts once, `Bar` unused, one skipped file.
    pub(crate) fn create_test_data() -> ExportData {
        let mut index = UsageIndex::new();
        index.record("Foo", "a.ts");
        index.record("Foo", "b.ts");
        index.record("Foo", "a.ts");

        let scan = UsageScan {
            declarations: vec![
                Declaration::new("Foo", DeclarationKind::Variable, true, 1),
                Declaration::new("Bar", DeclarationKind::Function, true, 2),
            ],
            index,
            files_scanned: 4,
            files_excluded: 1,
            skipped: vec![SkippedFile {
                path: PathBuf::from("src/broken.ts"),
                reason: "Syntax error".to_string(),
            }],
        };

        ExportData::new(Path::new("src/events.ts"), &scan)
    }

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!(
            "markdown".parse::<ExportFormat>().unwrap(),
            ExportFormat::Markdown
        );
        assert_eq!("md".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert!("dot".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_export_format_display_and_extension() {
        assert_eq!(format!("{}", ExportFormat::Json), "json");
        assert_eq!(format!("{}", ExportFormat::Markdown), "markdown");
        assert_eq!(ExportFormat::Markdown.extension(), "md");
        assert_eq!(ExportFormat::Csv.extension(), "csv");
    }

    #[test]
    fn test_export_data_keeps_target_order_and_unused() {
        let data = create_test_data();

        let names: Vec<_> = data.usages.iter().map(|u| u.declaration.name.as_str()).collect();
        assert_eq!(names, vec!["Foo", "Bar"]);
        assert_eq!(data.used_count(), 1);
        assert_eq!(data.unused().map(|d| d.name.as_str()).collect::<Vec<_>>(), vec!["Bar"]);
        assert_eq!(data.total_usages(), 3);
        assert_eq!(data.module_count(), 2);
    }

    #[test]
    fn test_consumer_counts() {
        let data = create_test_data();

        assert_eq!(data.usages[0].consumer_counts(), vec![("a.ts", 2), ("b.ts", 1)]);
        assert!(data.usages[1].consumer_counts().is_empty());
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("events.csv");

        export_to_file(ExportFormat::Csv, &create_test_data(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("declaration,module,count\n"));
    }
}
