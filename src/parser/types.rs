//! Shared types for source parsing.
//!
//! This module defines the data structures produced by the source parser:
//! the declarations a file defines and the import statements it contains.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// The syntactic kind of a top-level declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    /// `function foo() {}` or an overload signature
    Function,
    /// `class Foo {}` (abstract classes included)
    Class,
    /// `interface Foo {}`
    Interface,
    /// `type Foo = ...`
    TypeAlias,
    /// `enum Foo {}`
    Enum,
    /// A binding introduced by `const`, `let` or `var`
    Variable,
    /// `namespace Foo {}` or `module Foo {}`
    Namespace,
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function => write!(f, "function"),
            Self::Class => write!(f, "class"),
            Self::Interface => write!(f, "interface"),
            Self::TypeAlias => write!(f, "type"),
            Self::Enum => write!(f, "enum"),
            Self::Variable => write!(f, "variable"),
            Self::Namespace => write!(f, "namespace"),
        }
    }
}

/// A named top-level declaration found in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// The declared name
    pub name: String,
    /// What kind of declaration introduced the name
    pub kind: DeclarationKind,
    /// Whether the declaration is exported from its module
    pub exported: bool,
    /// Line number in the source file (1-indexed)
    pub line: usize,
}

impl Declaration {
    /// Creates a new declaration.
    pub fn new(name: impl Into<String>, kind: DeclarationKind, exported: bool, line: usize) -> Self {
        Self {
            name: name.into(),
            kind,
            exported,
            line,
        }
    }
}

/// One binding inside the braces of a named import.
///
/// `import { foo }` yields `specifier = "foo", alias = None`;
/// `import { foo as bar }` yields `specifier = "foo", alias = Some("bar")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedSpecifier {
    /// The exported name in the source module
    pub specifier: String,
    /// The local binding, when renamed
    pub alias: Option<String>,
}

impl NamedSpecifier {
    /// Creates a specifier without an alias.
    pub fn new(specifier: impl Into<String>) -> Self {
        Self {
            specifier: specifier.into(),
            alias: None,
        }
    }

    /// Creates a renamed specifier.
    pub fn aliased(specifier: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            specifier: specifier.into(),
            alias: Some(alias.into()),
        }
    }
}

/// The shape of an import statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportKind {
    /// `import { a, b as c } from 'm'`, optionally with a default binding:
    /// `import d, { a } from 'm'`
    Named {
        default_alias: Option<String>,
        specifiers: Vec<NamedSpecifier>,
    },
    /// `import d from 'm'`
    Default { alias: String },
    /// `import * as ns from 'm'`
    Namespace { alias: String },
    /// `import 'm'`
    SideEffect,
}

/// A single import statement in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRecord {
    /// The module path as written (e.g. "./events", "lodash")
    pub source: String,
    /// What the statement binds
    pub kind: ImportKind,
    /// Line number in the source file (1-indexed)
    pub line: usize,
}

impl ImportRecord {
    /// Returns the named specifiers of this import, or an empty slice for
    /// default, namespace and side-effect imports.
    pub fn named_specifiers(&self) -> &[NamedSpecifier] {
        match &self.kind {
            ImportKind::Named { specifiers, .. } => specifiers,
            _ => &[],
        }
    }

    /// Returns true if any named specifier imports `name` (aliases ignored).
    pub fn imports_name(&self, name: &str) -> bool {
        self.named_specifiers().iter().any(|s| s.specifier == name)
    }

    /// Returns true if this is a side-effect only import.
    pub fn is_side_effect_only(&self) -> bool {
        matches!(self.kind, ImportKind::SideEffect)
    }
}

/// The parse result of one source file.
#[derive(Debug, Clone, Default)]
pub struct ParsedFile {
    /// Path the file was read from
    pub file_path: PathBuf,
    /// Top-level declarations, in source order
    pub declarations: Vec<Declaration>,
    /// Import statements, in source order
    pub imports: Vec<ImportRecord>,
}

impl ParsedFile {
    /// Returns the exported declarations only.
    pub fn exported_declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter().filter(|d| d.exported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliased_keeps_imported_name() {
        let specifier = NamedSpecifier::aliased("foo", "bar");

        assert_eq!(specifier.specifier, "foo");
        assert_eq!(specifier.alias.as_deref(), Some("bar"));
        assert_eq!(NamedSpecifier::new("foo").alias, None);
    }

    #[test]
    fn test_imports_name_matches_specifier_not_alias() {
        let record = ImportRecord {
            source: "./events".to_string(),
            kind: ImportKind::Named {
                default_alias: None,
                specifiers: vec![NamedSpecifier::aliased("Foo", "Bar")],
            },
            line: 1,
        };

        assert!(record.imports_name("Foo"));
        assert!(!record.imports_name("Bar"));
    }

    #[test]
    fn test_default_and_namespace_have_no_named_specifiers() {
        let default = ImportRecord {
            source: "./events".to_string(),
            kind: ImportKind::Default {
                alias: "Foo".to_string(),
            },
            line: 1,
        };
        let namespace = ImportRecord {
            source: "./events".to_string(),
            kind: ImportKind::Namespace {
                alias: "Foo".to_string(),
            },
            line: 2,
        };

        assert!(default.named_specifiers().is_empty());
        assert!(!default.imports_name("Foo"));
        assert!(!namespace.imports_name("Foo"));
    }

    #[test]
    fn test_declaration_kind_display() {
        assert_eq!(DeclarationKind::TypeAlias.to_string(), "type");
        assert_eq!(DeclarationKind::Function.to_string(), "function");
    }
}
