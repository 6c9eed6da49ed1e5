//! CSV export implementation.
//!
//! Writes one row per declaration and consumer module, with the number of
//! import statements that module uses the declaration in.

use super::{ExportData, Exporter};
use std::io::{self, Write};

/// CSV exporter implementation.
pub struct CsvExporter;

impl CsvExporter {
    /// Escape a field value for CSV format.
    ///
    /// Wraps the value in quotes if it contains commas, quotes, or newlines.
    fn escape_field(value: &str) -> String {
        if value.contains(',') || value.contains('"') || value.contains('\n') {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }
}

impl Exporter for CsvExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "declaration,module,count")?;

        for usage in &data.usages {
            let declaration = Self::escape_field(&usage.declaration.name);
            for (module, count) in usage.consumer_counts() {
                writeln!(
                    writer,
                    "{},{},{}",
                    declaration,
                    Self::escape_field(module),
                    count
                )?;
            }
        }

        Ok(())
    }
}
