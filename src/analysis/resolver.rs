//! Matching of candidate files' imports against the target declarations.
//!
//! A candidate uses a declaration when one of its named imports brings in
//! exactly that name. The imported name counts, not the local alias, so
//! `import { Foo as Bar }` is a usage of `Foo`. Default and namespace
//! imports never match, whatever their local binding is called.

use std::path::Path;

use tracing::debug;

use super::index::UsageIndex;
use crate::parser::{Declaration, ParseResult, ParsedFile, SourceParser};

/// Path suffixes of files whose usages are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionList {
    suffixes: Vec<String>,
}

impl ExclusionList {
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            suffixes: suffixes
                .into_iter()
                .map(Into::into)
                .filter(|s: &String| !s.is_empty())
                .collect(),
        }
    }

    /// Returns true if the absolute form of the path, as a string, ends
    /// with any suffix. Relative paths are resolved against the working
    /// directory without touching the filesystem.
    pub fn is_excluded(&self, path: &Path) -> bool {
        if self.suffixes.is_empty() {
            return false;
        }
        let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        let absolute = absolute.to_string_lossy();
        self.suffixes
            .iter()
            .any(|suffix| absolute.ends_with(suffix.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }
}

/// What resolving one candidate file found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResolution {
    /// Module identifier of the candidate (its file name)
    pub module: String,
    /// Usages recorded into the index
    pub recorded: usize,
    /// Usages found but dropped because the file is excluded
    pub suppressed: usize,
    /// Whether the file matched the exclusion list
    pub excluded: bool,
}

/// Returns the module identifier of a path: its file name with extension.
pub fn module_identifier(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Resolves candidate files against a fixed set of declarations.
#[derive(Debug, Clone, Copy)]
pub struct ImportResolver<'a> {
    declarations: &'a [Declaration],
    exclusions: &'a ExclusionList,
}

impl<'a> ImportResolver<'a> {
    pub fn new(declarations: &'a [Declaration], exclusions: &'a ExclusionList) -> Self {
        Self {
            declarations,
            exclusions,
        }
    }

    /// Parses a candidate file and records its usages into `index`.
    pub fn resolve_file(
        &self,
        parser: &mut SourceParser,
        path: &Path,
        index: &mut UsageIndex,
    ) -> ParseResult<FileResolution> {
        let parsed = parser.parse_file(path)?;
        Ok(self.resolve(&parsed, index))
    }

    /// Records the usages of an already parsed candidate into `index`.
    ///
    /// Each import statement naming a declaration adds one usage, so a file
    /// importing the same name in two statements is recorded twice.
    /// Excluded files are still inspected but record nothing.
    pub fn resolve(&self, parsed: &ParsedFile, index: &mut UsageIndex) -> FileResolution {
        let module = module_identifier(&parsed.file_path);
        let excluded = self.exclusions.is_excluded(&parsed.file_path);
        let mut recorded = 0;
        let mut suppressed = 0;

        for declaration in self.declarations {
            for import in &parsed.imports {
                if !import.imports_name(&declaration.name) {
                    continue;
                }
                if excluded {
                    suppressed += 1;
                    continue;
                }
                index.record(&declaration.name, &module);
                recorded += 1;
            }
        }

        if suppressed > 0 {
            debug!(
                file = %parsed.file_path.display(),
                suppressed,
                "ignoring usages in excluded file"
            );
        } else if recorded > 0 {
            debug!(file = %parsed.file_path.display(), recorded, "recorded usages");
        }

        FileResolution {
            module,
            recorded,
            suppressed,
            excluded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{DeclarationKind, ImportKind, ImportRecord, NamedSpecifier};
    use std::path::PathBuf;

    fn declarations(names: &[&str]) -> Vec<Declaration> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Declaration::new(*name, DeclarationKind::Variable, true, i + 1))
            .collect()
    }

    fn named(specifiers: Vec<NamedSpecifier>) -> ImportRecord {
        ImportRecord {
            source: "./events".to_string(),
            kind: ImportKind::Named {
                default_alias: None,
                specifiers,
            },
            line: 1,
        }
    }

    fn file(path: &str, imports: Vec<ImportRecord>) -> ParsedFile {
        ParsedFile {
            file_path: PathBuf::from(path),
            declarations: Vec::new(),
            imports,
        }
    }

    // ===== Matching Tests =====

    #[test]
    fn test_scenario_two_consumers() {
        let decls = declarations(&["Foo", "Bar"]);
        let exclusions = ExclusionList::default();
        let resolver = ImportResolver::new(&decls, &exclusions);
        let mut index = UsageIndex::new();

        resolver.resolve(
            &file("src/a.ts", vec![named(vec![NamedSpecifier::new("Foo")])]),
            &mut index,
        );
        resolver.resolve(
            &file(
                "src/b.ts",
                vec![named(vec![
                    NamedSpecifier::new("Bar"),
                    NamedSpecifier::new("Foo"),
                ])],
            ),
            &mut index,
        );

        assert_eq!(
            index.consumers("Foo").unwrap(),
            &["a.ts".to_string(), "b.ts".to_string()]
        );
        assert_eq!(index.consumers("Bar").unwrap(), &["b.ts".to_string()]);
    }

    #[test]
    fn test_renamed_import_matches_original_name() {
        let decls = declarations(&["Foo", "Bar"]);
        let exclusions = ExclusionList::default();
        let resolver = ImportResolver::new(&decls, &exclusions);
        let mut index = UsageIndex::new();

        // Local alias `Bar` must not count as a usage of declaration `Bar`
        let resolution = resolver.resolve(
            &file(
                "a.ts",
                vec![named(vec![NamedSpecifier::aliased("Foo", "Bar")])],
            ),
            &mut index,
        );

        assert_eq!(resolution.recorded, 1);
        assert!(index.contains("Foo"));
        assert!(!index.contains("Bar"));
    }

    #[test]
    fn test_default_and_namespace_never_match() {
        let decls = declarations(&["Foo"]);
        let exclusions = ExclusionList::default();
        let resolver = ImportResolver::new(&decls, &exclusions);
        let mut index = UsageIndex::new();

        let imports = vec![
            ImportRecord {
                source: "./events".to_string(),
                kind: ImportKind::Default {
                    alias: "Foo".to_string(),
                },
                line: 1,
            },
            ImportRecord {
                source: "./events".to_string(),
                kind: ImportKind::Namespace {
                    alias: "Foo".to_string(),
                },
                line: 2,
            },
            ImportRecord {
                source: "./events".to_string(),
                kind: ImportKind::SideEffect,
                line: 3,
            },
        ];
        let resolution = resolver.resolve(&file("a.ts", imports), &mut index);

        assert_eq!(resolution.recorded, 0);
        assert!(index.is_empty());
    }

    #[test]
    fn test_same_declaration_in_two_statements_is_recorded_twice() {
        let decls = declarations(&["Foo"]);
        let exclusions = ExclusionList::default();
        let resolver = ImportResolver::new(&decls, &exclusions);
        let mut index = UsageIndex::new();

        resolver.resolve(
            &file(
                "a.ts",
                vec![
                    named(vec![NamedSpecifier::new("Foo")]),
                    named(vec![NamedSpecifier::new("Foo")]),
                ],
            ),
            &mut index,
        );

        assert_eq!(
            index.consumers("Foo").unwrap(),
            &["a.ts".to_string(), "a.ts".to_string()]
        );
    }

    #[test]
    fn test_file_without_imports_is_a_no_op() {
        let decls = declarations(&["Foo"]);
        let exclusions = ExclusionList::default();
        let resolver = ImportResolver::new(&decls, &exclusions);
        let mut index = UsageIndex::new();

        let resolution = resolver.resolve(&file("a.ts", Vec::new()), &mut index);

        assert_eq!(resolution.module, "a.ts");
        assert_eq!(resolution.recorded, 0);
        assert!(index.is_empty());
    }

    // ===== Exclusion Tests =====

    #[test]
    fn test_excluded_file_records_nothing() {
        let decls = declarations(&["Foo"]);
        let exclusions = ExclusionList::new(["c.ts"]);
        let resolver = ImportResolver::new(&decls, &exclusions);
        let mut index = UsageIndex::new();

        let resolution = resolver.resolve(
            &file("src/c.ts", vec![named(vec![NamedSpecifier::new("Foo")])]),
            &mut index,
        );

        assert!(resolution.excluded);
        assert_eq!(resolution.suppressed, 1);
        assert_eq!(resolution.recorded, 0);
        assert!(index.is_empty());
    }

    #[test]
    fn test_exclusion_is_a_path_suffix() {
        let exclusions = ExclusionList::new(["module3.ts", "generated/api.ts"]);

        assert!(exclusions.is_excluded(Path::new("/repo/src/module3.ts")));
        assert!(exclusions.is_excluded(Path::new("/repo/generated/api.ts")));
        // suffix match, not a file name match
        assert!(exclusions.is_excluded(Path::new("/repo/src/submodule3.ts")));
        assert!(!exclusions.is_excluded(Path::new("/repo/src/module3.tsx")));
        assert!(!exclusions.is_excluded(Path::new("/repo/other/api.ts")));
    }

    #[test]
    fn test_relative_path_is_matched_in_absolute_form() {
        let cwd = std::env::current_dir().unwrap();
        let parent = cwd.file_name().unwrap().to_string_lossy();
        let exclusions = ExclusionList::new([format!("{}/src/c.ts", parent)]);

        assert!(exclusions.is_excluded(Path::new("src/c.ts")));
        assert!(!exclusions.is_excluded(Path::new("src/d.ts")));
    }

    #[test]
    fn test_empty_suffixes_are_ignored() {
        let exclusions = ExclusionList::new(["", "x.ts"]);

        assert_eq!(exclusions.suffixes(), &["x.ts".to_string()]);
        assert!(!exclusions.is_excluded(Path::new("a.ts")));
    }

    #[test]
    fn test_module_identifier_is_file_name() {
        assert_eq!(module_identifier(Path::new("/repo/src/a.ts")), "a.ts");
        assert_eq!(module_identifier(Path::new("b.ts")), "b.ts");
    }
}
