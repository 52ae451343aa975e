/// Canonical lookup key for a display name: surrounding whitespace trimmed, case folded.
///
/// Used identically for storage keys and query keys.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}
