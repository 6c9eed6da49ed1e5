//! Extraction of the target file's declarations.

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use crate::config::DeclarationScope;
use crate::parser::{Declaration, ParseResult, ParsedFile, SourceParser};

/// Selects the declarations of a target file that are searched for.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclarationExtractor {
    scope: DeclarationScope,
}

impl DeclarationExtractor {
    pub fn new(scope: DeclarationScope) -> Self {
        Self { scope }
    }

    /// Parses `target` and returns its declarations.
    pub fn extract(
        &self,
        parser: &mut SourceParser,
        target: &Path,
    ) -> ParseResult<Vec<Declaration>> {
        let parsed = parser.parse_file(target)?;
        let declarations = self.select(&parsed);
        debug!(
            file = %target.display(),
            count = declarations.len(),
            "extracted declarations"
        );
        Ok(declarations)
    }

    /// Filters a parsed file by scope. Names are unique in the result; the
    /// first declaration of a name (e.g. the first overload) wins.
    pub fn select(&self, parsed: &ParsedFile) -> Vec<Declaration> {
        let mut seen = HashSet::new();
        parsed
            .declarations
            .iter()
            .filter(|d| self.scope == DeclarationScope::All || d.exported)
            .filter(|d| seen.insert(d.name.clone()))
            .cloned()
            .collect()
    }
}
