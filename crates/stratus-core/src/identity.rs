//! Deterministic identity derivation for entries.
//!
//! Identity is a content hash, not a counter, so it survives process restarts
//! and reordering of declarations. Any change to the kind or to the semantic
//! name parts yields a different id, which forces a Replace instead of a
//! rename being silently lost.

use crate::entry::EntryId;

/// Derive the stable id for a resource of `kind` named by `parts`.
///
/// # Algorithm
/// - Hash format: `blake3(kind || 0x00 || part₁ || 0x00 || part₂ …)`
/// - The 0x00 framing keeps adjacent parts from colliding
///   (`("ab", ["c"])` and `("a", ["bc"])` hash differently)
/// - Output: hex string
pub fn entry_id<I, S>(kind: &str, parts: I) -> EntryId
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut hasher = blake3::Hasher::new();
    hasher.update(kind.as_bytes());
    for part in parts {
        hasher.update(&[0x00]);
        hasher.update(part.as_ref().as_bytes());
    }
    EntryId::new(hasher.finalize().to_hex().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_inputs_same_id() {
        let a = entry_id("role", ["api", "prod"]);
        let b = entry_id("role", ["api", "prod"]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_id_is_hex() {
        let id = entry_id("role", ["api"]);
        assert_eq!(id.as_str().len(), 64);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_kind_changes_id() {
        assert_ne!(entry_id("role", ["api"]), entry_id("function", ["api"]));
    }

    #[test]
    fn test_name_changes_id() {
        assert_ne!(entry_id("role", ["api"]), entry_id("role", ["worker"]));
    }

    #[test]
    fn test_part_boundaries_matter() {
        assert_ne!(entry_id("role", ["ab", "c"]), entry_id("role", ["a", "bc"]));
        assert_ne!(entry_id("ab", ["c"]), entry_id("a", ["bc"]));
    }

    #[test]
    fn test_part_order_matters() {
        assert_ne!(
            entry_id("role", ["api", "prod"]),
            entry_id("role", ["prod", "api"])
        );
    }

    #[test]
    fn test_no_parts_is_valid() {
        let empty: [&str; 0] = [];
        assert_eq!(entry_id("role", empty), entry_id("role", empty));
    }
}
