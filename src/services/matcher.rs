use std::collections::BTreeSet;

use tracing::debug;

use crate::services::fuzzy::weighted_ratio;
use crate::services::names::normalize;

pub const DEFAULT_MATCH_THRESHOLD: u8 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Fuzzy { score: u8 },
}

/// A stored key that answered a lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMatch {
    pub key: String,
    pub kind: MatchKind,
}

/// Resolves a queried name against the set of stored normalized keys
#[derive(Debug, Clone, Copy)]
pub struct MatchResolver {
    threshold: u8,
}

impl Default for MatchResolver {
    fn default() -> Self {
        Self::new(DEFAULT_MATCH_THRESHOLD)
    }
}

impl MatchResolver {
    #[must_use]
    pub fn new(threshold: u8) -> Self {
        Self {
            threshold: threshold.min(100),
        }
    }

    /// Exact normalized match first; otherwise the best fuzzy candidate scoring
    /// at or above the threshold.
    ///
    /// Candidates are visited in lexicographic order and only a strictly higher
    /// score replaces the current best, so ties go to the lexicographically
    /// smallest key.
    #[must_use]
    pub fn resolve(&self, query: &str, candidates: &BTreeSet<String>) -> Option<NameMatch> {
        let key = normalize(query);
        if candidates.contains(&key) {
            return Some(NameMatch {
                key,
                kind: MatchKind::Exact,
            });
        }

        let mut best: Option<(&String, u8)> = None;
        for candidate in candidates {
            let score = weighted_ratio(&key, candidate);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((candidate, score));
            }
        }

        let (candidate, score) = best?;
        debug!(query = %key, %candidate, score, "best fuzzy candidate");
        (score >= self.threshold).then(|| NameMatch {
            key: candidate.clone(),
            kind: MatchKind::Fuzzy { score },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn test_exact_match_wins_over_fuzzy() {
        let resolver = MatchResolver::default();
        let found = resolver.resolve("John", &keys(&["john", "johnny"]));
        assert_eq!(
            found,
            Some(NameMatch {
                key: "john".to_string(),
                kind: MatchKind::Exact,
            })
        );
    }

    #[test]
    fn test_exact_match_ignores_case_and_spacing() {
        let resolver = MatchResolver::default();
        let found = resolver.resolve("  PRITHA ", &keys(&["pritha"]));
        assert_eq!(found.map(|m| m.kind), Some(MatchKind::Exact));
    }

    #[test]
    fn test_fuzzy_match_above_threshold() {
        let resolver = MatchResolver::default();
        let found = resolver.resolve("jon", &keys(&["john"]));
        assert_eq!(
            found,
            Some(NameMatch {
                key: "john".to_string(),
                kind: MatchKind::Fuzzy { score: 86 },
            })
        );
    }

    #[test]
    fn test_threshold_boundary() {
        let resolver = MatchResolver::default();
        // Scores exactly 80: accepted
        let at = resolver.resolve("maria", &keys(&["marie"]));
        assert_eq!(at.map(|m| m.kind), Some(MatchKind::Fuzzy { score: 80 }));
        // Scores 78: rejected
        assert_eq!(resolver.resolve("catherine", &keys(&["katharine"])), None);
    }

    #[test]
    fn test_custom_threshold() {
        let strict = MatchResolver::new(90);
        assert_eq!(strict.resolve("jon", &keys(&["john"])), None);
        let lenient = MatchResolver::new(75);
        assert!(lenient.resolve("catherine", &keys(&["katharine"])).is_some());
    }

    #[test]
    fn test_empty_candidates() {
        let resolver = MatchResolver::default();
        assert_eq!(resolver.resolve("john", &BTreeSet::new()), None);
    }

    #[test]
    fn test_picks_best_scoring_candidate() {
        let resolver = MatchResolver::default();
        let found = resolver.resolve("jon", &keys(&["jane", "john", "johnny"]));
        assert_eq!(found.map(|m| m.key), Some("john".to_string()));
    }

    #[test]
    fn test_initial_matches_name_eight_times_longer() {
        let found = MatchResolver::default().resolve("j", &keys(&["jonathan"]));
        assert_eq!(found.map(|m| m.kind), Some(MatchKind::Fuzzy { score: 90 }));
    }

    #[test]
    fn test_ties_go_to_lexicographically_first() {
        let resolver = MatchResolver::default();
        // One wrong letter against each candidate: all score 88
        let found = resolver.resolve("jonathxn", &keys(&["jonathon", "jonathen", "jonathan"]));
        assert_eq!(
            found,
            Some(NameMatch {
                key: "jonathan".to_string(),
                kind: MatchKind::Fuzzy { score: 88 },
            })
        );
    }
}
