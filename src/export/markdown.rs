//! Markdown export implementation.
//!
//! Exports usage analysis results in Markdown format for documentation and
//! code review.

use super::{ExportData, Exporter};
use std::io::{self, Write};

/// Markdown exporter implementation.
pub struct MarkdownExporter;

impl Exporter for MarkdownExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "# Declaration Usage Report")?;
        writeln!(writer)?;
        writeln!(writer, "**Target:** `{}`", data.target)?;
        writeln!(writer)?;

        // Summary section
        let used = data.used_count();
        writeln!(writer, "## Summary")?;
        writeln!(writer)?;
        writeln!(writer, "| Metric | Count |")?;
        writeln!(writer, "|--------|-------|")?;
        writeln!(writer, "| Declarations | {} |", data.usages.len())?;
        writeln!(writer, "| Used | {} |", used)?;
        writeln!(writer, "| Unused | {} |", data.usages.len() - used)?;
        writeln!(writer, "| Consumer Modules | {} |", data.module_count())?;
        writeln!(writer, "| Total Usages | {} |", data.total_usages())?;
        writeln!(writer, "| Files Scanned | {} |", data.files_scanned)?;
        if data.files_excluded > 0 {
            writeln!(writer, "| Files Excluded | {} |", data.files_excluded)?;
        }
        if !data.skipped.is_empty() {
            writeln!(writer, "| Files Skipped | {} |", data.skipped.len())?;
        }
        writeln!(writer)?;

        // Used declarations
        if used > 0 {
            writeln!(writer, "## Usages")?;
            writeln!(writer)?;

            for usage in data.usages.iter().filter(|u| u.is_used()) {
                let counts = usage.consumer_counts();
                writeln!(
                    writer,
                    "### `{}` ({}, {} {})",
                    usage.declaration.name,
                    usage.declaration.kind,
                    counts.len(),
                    if counts.len() == 1 { "module" } else { "modules" }
                )?;
                writeln!(writer)?;
                writeln!(writer, "| Module | Imports |")?;
                writeln!(writer, "|--------|---------|")?;
                for (module, count) in counts {
                    writeln!(writer, "| {} | {} |", module, count)?;
                }
                writeln!(writer)?;
            }
        }

        // Unused declarations
        let unused: Vec<_> = data.unused().collect();
        if !unused.is_empty() {
            writeln!(writer, "## Unused Declarations ({})", unused.len())?;
            writeln!(writer)?;
            for declaration in unused {
                writeln!(
                    writer,
                    "- `{}` ({}, line {})",
                    declaration.name, declaration.kind, declaration.line
                )?;
            }
            writeln!(writer)?;
        }

        if !data.skipped.is_empty() {
            writeln!(writer, "## Skipped Files ({})", data.skipped.len())?;
            writeln!(writer)?;
            for skipped in &data.skipped {
                writeln!(writer, "- `{}`: {}", skipped.path.display(), skipped.reason)?;
            }
            writeln!(writer)?;
        }

        Ok(())
    }
}
