//! Parser module for fanout.
//!
//! This module turns TypeScript and JavaScript source files into
//! [`ParsedFile`] values: the top-level declarations a file defines and the
//! `import` statements it contains.
//!
//! # Supported Syntax
//!
//! - Named imports, including renamed (`{ a as b }`) and type-only imports
//! - Default, namespace and side-effect imports (recorded, never matched)
//! - Exported functions, classes, interfaces, type aliases, enums,
//!   variables and namespaces, plus local `export { ... }` clauses
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use fanout::parser::SourceParser;
//!
//! let mut parser = SourceParser::new()?;
//! let parsed = parser.parse_file(Path::new("src/events.ts"))?;
//!
//! for declaration in parsed.exported_declarations() {
//!     println!("{} {}", declaration.kind, declaration.name);
//! }
//! ```

pub mod types;
pub mod typescript;

pub use types::{
    Declaration, DeclarationKind, ImportKind, ImportRecord, NamedSpecifier, ParsedFile,
};
pub use typescript::{parse_file, ParseError, ParseResult, SourceLanguage, SourceParser};
