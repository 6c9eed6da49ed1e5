//! JSON export implementation.
//!
//! Exports usage analysis results in JSON format for machine-readable output.

use super::{ExportData, Exporter};
use crate::parser::DeclarationKind;
use serde::Serialize;
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter;

/// Serializable declaration with its consumers.
#[derive(Serialize)]
struct JsonDeclaration<'a> {
    name: &'a str,
    kind: DeclarationKind,
    exported: bool,
    line: usize,
    consumers: &'a [String],
}

/// Serializable skipped file.
#[derive(Serialize)]
struct JsonSkipped {
    path: String,
    reason: String,
}

/// Summary statistics for JSON output.
#[derive(Serialize)]
struct JsonSummary {
    declarations: usize,
    used_declarations: usize,
    unused_declarations: usize,
    consumer_modules: usize,
    total_usages: usize,
    files_scanned: usize,
    files_excluded: usize,
    files_skipped: usize,
}

/// Root JSON export structure.
#[derive(Serialize)]
struct JsonExport<'a> {
    target: &'a str,
    summary: JsonSummary,
    declarations: Vec<JsonDeclaration<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    skipped: Vec<JsonSkipped>,
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        let declarations: Vec<JsonDeclaration> = data
            .usages
            .iter()
            .map(|u| JsonDeclaration {
                name: &u.declaration.name,
                kind: u.declaration.kind,
                exported: u.declaration.exported,
                line: u.declaration.line,
                consumers: &u.consumers,
            })
            .collect();

        let skipped: Vec<JsonSkipped> = data
            .skipped
            .iter()
            .map(|s| JsonSkipped {
                path: s.path.display().to_string(),
                reason: s.reason.clone(),
            })
            .collect();

        let used = data.used_count();
        let export = JsonExport {
            target: &data.target,
            summary: JsonSummary {
                declarations: data.usages.len(),
                used_declarations: used,
                unused_declarations: data.usages.len() - used,
                consumer_modules: data.module_count(),
                total_usages: data.total_usages(),
                files_scanned: data.files_scanned,
                files_excluded: data.files_excluded,
                files_skipped: data.skipped.len(),
            },
            declarations,
            skipped,
        };

        let json = serde_json::to_string_pretty(&export)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::UsageScan;
    use crate::export::tests::create_test_data;
    use std::path::Path;

    fn export_value(data: &ExportData) -> serde_json::Value {
        let mut output = Vec::new();
        JsonExporter.export(data, &mut output).unwrap();
        serde_json::from_str(&String::from_utf8(output).unwrap()).unwrap()
    }

    #[test]
    fn test_json_export_summary() {
        let parsed = export_value(&create_test_data());

        assert_eq!(parsed["target"], "src/events.ts");
        assert_eq!(parsed["summary"]["declarations"], 2);
        assert_eq!(parsed["summary"]["used_declarations"], 1);
        assert_eq!(parsed["summary"]["unused_declarations"], 1);
        assert_eq!(parsed["summary"]["consumer_modules"], 2);
        assert_eq!(parsed["summary"]["total_usages"], 3);
        assert_eq!(parsed["summary"]["files_scanned"], 4);
        assert_eq!(parsed["summary"]["files_skipped"], 1);
    }

    #[test]
    fn test_json_export_declarations() {
        let parsed = export_value(&create_test_data());

        let declarations = parsed["declarations"].as_array().unwrap();
        assert_eq!(declarations.len(), 2);

        assert_eq!(declarations[0]["name"], "Foo");
        assert_eq!(declarations[0]["kind"], "variable");
        assert_eq!(
            declarations[0]["consumers"],
            serde_json::json!(["a.ts", "b.ts", "a.ts"])
        );

        // Unused declarations are listed with no consumers
        assert_eq!(declarations[1]["name"], "Bar");
        assert_eq!(declarations[1]["consumers"], serde_json::json!([]));
    }

    #[test]
    fn test_json_export_skipped_files() {
        let parsed = export_value(&create_test_data());

        assert_eq!(parsed["skipped"][0]["path"], "src/broken.ts");
        assert_eq!(parsed["skipped"][0]["reason"], "Syntax error");
    }

    #[test]
    fn test_json_export_omits_empty_skipped() {
        let data = ExportData::new(Path::new("events.ts"), &UsageScan::default());
        let parsed = export_value(&data);

        assert!(parsed.get("skipped").is_none());
        assert_eq!(parsed["summary"]["declarations"], 0);
    }
}
