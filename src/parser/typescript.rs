//! Declaration and import extraction using tree-sitter for TypeScript/JavaScript.
//!
//! This module parses source files into a [`ParsedFile`]: the top-level
//! declarations a file defines and the ES module `import` statements it
//! contains. Files with syntax errors are rejected rather than partially
//! reported.

use std::fs;
use std::path::Path;

use thiserror::Error;
use tree_sitter::{Language, Node, Parser};

use super::types::{
    Declaration, DeclarationKind, ImportKind, ImportRecord, NamedSpecifier, ParsedFile,
};

/// Errors that can occur while parsing a source file.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse file: {path}")]
    Failed { path: String },

    #[error("Syntax error in {path} at line {line}, column {column}")]
    Syntax {
        path: String,
        line: usize,
        column: usize,
    },

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Tree-sitter language initialization failed")]
    LanguageInit,
}

/// Result type for parse operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Language type for file analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLanguage {
    JavaScript,
    Jsx,
    TypeScript,
    Tsx,
}

impl SourceLanguage {
    /// Determine language from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "js" | "mjs" | "cjs" => Some(SourceLanguage::JavaScript),
            "jsx" => Some(SourceLanguage::Jsx),
            "ts" | "mts" | "cts" => Some(SourceLanguage::TypeScript),
            "tsx" => Some(SourceLanguage::Tsx),
            _ => None,
        }
    }

    /// Determine language from a file path's extension.
    pub fn from_path(path: &Path) -> ParseResult<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Self::from_extension(ext).ok_or_else(|| ParseError::UnsupportedFileType(ext.to_string()))
    }

    /// Get tree-sitter language for this source language.
    pub fn tree_sitter_language(&self) -> Language {
        match self {
            SourceLanguage::JavaScript | SourceLanguage::Jsx => {
                tree_sitter_javascript::LANGUAGE.into()
            }
            SourceLanguage::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            SourceLanguage::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

/// Parser for extracting declarations and imports from source files.
///
/// Holds one tree-sitter parser per grammar so a single instance can be
/// reused across a whole directory walk.
pub struct SourceParser {
    js_parser: Parser,
    ts_parser: Parser,
    tsx_parser: Parser,
}

impl SourceParser {
    /// Create a new SourceParser.
    pub fn new() -> ParseResult<Self> {
        Ok(Self {
            js_parser: Self::parser_for(SourceLanguage::JavaScript)?,
            ts_parser: Self::parser_for(SourceLanguage::TypeScript)?,
            tsx_parser: Self::parser_for(SourceLanguage::Tsx)?,
        })
    }

    fn parser_for(language: SourceLanguage) -> ParseResult<Parser> {
        let mut parser = Parser::new();
        parser
            .set_language(&language.tree_sitter_language())
            .map_err(|_| ParseError::LanguageInit)?;
        Ok(parser)
    }

    /// Parse a single file from disk.
    pub fn parse_file(&mut self, path: &Path) -> ParseResult<ParsedFile> {
        let language = SourceLanguage::from_path(path)?;
        let content = fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.display().to_string(),
            source,
        })?;
        self.parse_source(&content, language, path)
    }

    /// Parse source code directly. `path` is only used for reporting.
    pub fn parse_source(
        &mut self,
        source: &str,
        language: SourceLanguage,
        path: &Path,
    ) -> ParseResult<ParsedFile> {
        let parser = match language {
            SourceLanguage::JavaScript | SourceLanguage::Jsx => &mut self.js_parser,
            SourceLanguage::TypeScript => &mut self.ts_parser,
            SourceLanguage::Tsx => &mut self.tsx_parser,
        };

        let tree = parser.parse(source, None).ok_or_else(|| ParseError::Failed {
            path: path.display().to_string(),
        })?;
        let root = tree.root_node();

        if root.has_error() {
            let position = first_error(root)
                .unwrap_or(root)
                .start_position();
            return Err(ParseError::Syntax {
                path: path.display().to_string(),
                line: position.row + 1,
                column: position.column + 1,
            });
        }

        let mut parsed = ParsedFile {
            file_path: path.to_path_buf(),
            ..ParsedFile::default()
        };
        let mut local_exports = Vec::new();

        let mut cursor = root.walk();
        for child in root.children(&mut cursor) {
            match child.kind() {
                "import_statement" => {
                    if let Some(import) = self.parse_import(&child, source) {
                        parsed.imports.push(import);
                    }
                }
                "export_statement" => {
                    if let Some(declaration) = child.child_by_field_name("declaration") {
                        self.collect_declarations(
                            &declaration,
                            source,
                            true,
                            &mut parsed.declarations,
                        );
                    } else if let Some(value) = child.child_by_field_name("value") {
                        // export default function named() {} parsed as an expression
                        self.collect_default_expression(&value, source, &mut parsed.declarations);
                    } else if child.child_by_field_name("source").is_none() {
                        // `export { a, b as c }` without `from` exports local bindings
                        self.collect_export_clause(&child, source, &mut local_exports);
                    }
                }
                _ => self.collect_declarations(&child, source, false, &mut parsed.declarations),
            }
        }

        apply_local_exports(&mut parsed.declarations, local_exports);

        Ok(parsed)
    }

    /// Parse an ES6 import statement.
    fn parse_import(&self, node: &Node, source: &str) -> Option<ImportRecord> {
        let line = node.start_position().row + 1;
        let mut source_module = None;
        let mut kind = ImportKind::SideEffect;

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "string" => {
                    source_module = self.extract_string_value(&child, source);
                }
                "import_clause" => {
                    kind = self.parse_import_clause(&child, source);
                }
                "import_require_clause" => {
                    // import fs = require('fs') binds the whole module
                    if let Some(alias) = self.first_child_text(&child, "identifier", source) {
                        kind = ImportKind::Namespace { alias };
                    }
                    if let Some(string) = self.find_child(&child, "string") {
                        source_module = self.extract_string_value(&string, source);
                    }
                }
                _ => {}
            }
        }

        Some(ImportRecord {
            source: source_module?,
            kind,
            line,
        })
    }

    /// Parse the import clause (everything between 'import' and 'from').
    fn parse_import_clause(&self, node: &Node, source: &str) -> ImportKind {
        let mut default_alias = None;
        let mut namespace_alias = None;
        let mut specifiers = None;

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "identifier" => {
                    default_alias = self.node_text(&child, source).map(str::to_string);
                }
                "namespace_import" => {
                    namespace_alias = self.first_child_text(&child, "identifier", source);
                }
                "named_imports" => {
                    specifiers = Some(self.parse_named_imports(&child, source));
                }
                _ => {}
            }
        }

        if let Some(specifiers) = specifiers {
            ImportKind::Named {
                default_alias,
                specifiers,
            }
        } else if let Some(alias) = namespace_alias {
            ImportKind::Namespace { alias }
        } else if let Some(alias) = default_alias {
            ImportKind::Default { alias }
        } else {
            ImportKind::SideEffect
        }
    }

    /// Parse named imports: { foo, bar as baz, type Qux }
    fn parse_named_imports(&self, node: &Node, source: &str) -> Vec<NamedSpecifier> {
        let mut specifiers = Vec::new();
        let mut cursor = node.walk();

        for child in node.children(&mut cursor) {
            if child.kind() != "import_specifier" {
                continue;
            }

            let Some(name) = child
                .child_by_field_name("name")
                .and_then(|n| self.binding_name(&n, source))
            else {
                continue;
            };

            let alias = child
                .child_by_field_name("alias")
                .and_then(|n| self.node_text(&n, source))
                .map(str::to_string);

            specifiers.push(NamedSpecifier {
                specifier: name,
                alias,
            });
        }

        specifiers
    }

    /// Collect declarations introduced by a top-level statement.
    fn collect_declarations(
        &self,
        node: &Node,
        source: &str,
        exported: bool,
        out: &mut Vec<Declaration>,
    ) {
        let line = node.start_position().row + 1;

        let kind = match node.kind() {
            "function_declaration" | "generator_function_declaration" | "function_signature" => {
                DeclarationKind::Function
            }
            "class_declaration" | "abstract_class_declaration" => DeclarationKind::Class,
            "interface_declaration" => DeclarationKind::Interface,
            "type_alias_declaration" => DeclarationKind::TypeAlias,
            "enum_declaration" => DeclarationKind::Enum,
            "internal_module" | "module" => DeclarationKind::Namespace,
            "lexical_declaration" | "variable_declaration" => {
                let mut cursor = node.walk();
                for declarator in node.children(&mut cursor) {
                    if declarator.kind() != "variable_declarator" {
                        continue;
                    }
                    if let Some(pattern) = declarator.child_by_field_name("name") {
                        let mut names = Vec::new();
                        self.collect_binding_names(&pattern, source, &mut names);
                        out.extend(names.into_iter().map(|name| {
                            Declaration::new(name, DeclarationKind::Variable, exported, line)
                        }));
                    }
                }
                return;
            }
            // `declare ...` and bare `namespace X {}` wrap the real declaration
            "ambient_declaration" | "expression_statement" => {
                let mut cursor = node.walk();
                for inner in node.named_children(&mut cursor) {
                    self.collect_declarations(&inner, source, exported, out);
                }
                return;
            }
            _ => return,
        };

        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        // `declare module "foo"` names a module path, not a binding
        if name_node.kind() == "string" {
            return;
        }
        if let Some(name) = self.node_text(&name_node, source) {
            out.push(Declaration::new(name, kind, exported, line));
        }
    }

    fn collect_default_expression(&self, node: &Node, source: &str, out: &mut Vec<Declaration>) {
        let kind = match node.kind() {
            "function_expression" | "function" | "generator_function" => DeclarationKind::Function,
            "class" => DeclarationKind::Class,
            _ => return,
        };
        if let Some(name) = node
            .child_by_field_name("name")
            .and_then(|n| self.node_text(&n, source))
        {
            let line = node.start_position().row + 1;
            out.push(Declaration::new(name, kind, true, line));
        }
    }

    /// Collect every identifier bound by a (possibly destructuring) pattern.
    fn collect_binding_names(&self, node: &Node, source: &str, out: &mut Vec<String>) {
        match node.kind() {
            "identifier" | "shorthand_property_identifier_pattern" => {
                if let Some(name) = self.node_text(node, source) {
                    out.push(name.to_string());
                }
            }
            "pair_pattern" => {
                if let Some(value) = node.child_by_field_name("value") {
                    self.collect_binding_names(&value, source, out);
                }
            }
            "assignment_pattern" | "object_assignment_pattern" => {
                if let Some(left) = node.child_by_field_name("left") {
                    self.collect_binding_names(&left, source, out);
                }
            }
            "object_pattern" | "array_pattern" | "rest_pattern" => {
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    self.collect_binding_names(&child, source, out);
                }
            }
            _ => {}
        }
    }

    /// Collect `(local, exported)` pairs from `export { a, b as c }`.
    fn collect_export_clause(&self, node: &Node, source: &str, out: &mut Vec<(String, String)>) {
        let Some(clause) = self.find_child(node, "export_clause") else {
            return;
        };

        let mut cursor = clause.walk();
        for specifier in clause.children(&mut cursor) {
            if specifier.kind() != "export_specifier" {
                continue;
            }
            let Some(local) = specifier
                .child_by_field_name("name")
                .and_then(|n| self.binding_name(&n, source))
            else {
                continue;
            };
            let exported = specifier
                .child_by_field_name("alias")
                .and_then(|n| self.binding_name(&n, source))
                .unwrap_or_else(|| local.clone());
            out.push((local, exported));
        }
    }

    /// Text of an identifier or a quoted module export name.
    fn binding_name(&self, node: &Node, source: &str) -> Option<String> {
        if node.kind() == "string" {
            self.extract_string_value(node, source)
        } else {
            self.node_text(node, source).map(str::to_string)
        }
    }

    fn find_child<'t>(&self, node: &Node<'t>, kind: &str) -> Option<Node<'t>> {
        let mut cursor = node.walk();
        let found = node.children(&mut cursor).find(|c| c.kind() == kind);
        found
    }

    fn first_child_text(&self, node: &Node, kind: &str, source: &str) -> Option<String> {
        self.find_child(node, kind)
            .and_then(|child| self.node_text(&child, source))
            .map(str::to_string)
    }

    /// Extract the text content of a node.
    fn node_text<'a>(&self, node: &Node, source: &'a str) -> Option<&'a str> {
        source.get(node.start_byte()..node.end_byte())
    }

    /// Extract string value (removes quotes).
    fn extract_string_value(&self, node: &Node, source: &str) -> Option<String> {
        let text = self.node_text(node, source)?;
        // Drop exactly one delimiter from each end
        let inner = text.get(1..text.len().saturating_sub(1)).unwrap_or_default();
        Some(inner.to_string())
    }
}

/// Find the first ERROR or MISSING node in document order.
fn first_error<'t>(node: Node<'t>) -> Option<Node<'t>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }

    let mut cursor = node.walk();
    let children: Vec<Node<'t>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

/// Mark declarations named in a local `export { ... }` clause as exported.
/// Renamed exports (`export { a as b }`) add a declaration under the
/// exported name, since that is the name importers use.
fn apply_local_exports(declarations: &mut Vec<Declaration>, exports: Vec<(String, String)>) {
    for (local, exported) in exports {
        let Some(position) = declarations.iter().position(|d| d.name == local) else {
            continue;
        };

        if local == exported {
            for declaration in declarations.iter_mut().filter(|d| d.name == local) {
                declaration.exported = true;
            }
        } else {
            let original = &declarations[position];
            let renamed = Declaration::new(exported, original.kind, true, original.line);
            declarations.push(renamed);
        }
    }
}

/// Parse a single file and return its declarations and imports.
pub fn parse_file(path: &Path) -> ParseResult<ParsedFile> {
    let mut parser = SourceParser::new()?;
    parser.parse_file(path)
}
