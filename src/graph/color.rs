//! Deterministic edge colors.

use sha2::{Digest, Sha256};

/// Returns a `#rrggbb` color derived from the text's SHA-256 digest.
///
/// The same identifier always gets the same color, across runs and
/// machines, so all edges leaving one module share a color.
pub fn edge_color(identifier: &str) -> String {
    let digest = Sha256::digest(identifier.as_bytes());
    format!("#{:02x}{:02x}{:02x}", digest[0], digest[1], digest[2])
}
