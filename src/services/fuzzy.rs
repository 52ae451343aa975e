//! Fuzzy string similarity for person names
//!
//! Scores are on a 0-100 scale. The top-level scorer is `weighted_ratio`, which
//! blends a plain sequence ratio with token-sorted, token-set and partial
//! (substring window) variants so that reordered or partial names still score high.

use std::collections::BTreeSet;

/// Length of the longest common subsequence of two char slices.
fn lcs_length(source: &[char], target: &[char]) -> usize {
    if source.is_empty() || target.is_empty() {
        return 0;
    }

    // Two rows instead of the full matrix
    let mut previous_row: Vec<usize> = vec![0; target.len() + 1];
    let mut current_row: Vec<usize> = vec![0; target.len() + 1];

    for source_char in source {
        for (target_idx, target_char) in target.iter().enumerate() {
            let value = if source_char == target_char {
                previous_row.get(target_idx).map_or(0, |v| v + 1)
            } else {
                let above = previous_row.get(target_idx + 1).copied().unwrap_or(0);
                let left = current_row.get(target_idx).copied().unwrap_or(0);
                above.max(left)
            };
            if let Some(cell) = current_row.get_mut(target_idx + 1) {
                *cell = value;
            }
        }
        std::mem::swap(&mut previous_row, &mut current_row);
    }

    previous_row.get(target.len()).copied().unwrap_or(0)
}

/// Sequence similarity: `2 * lcs / (len_a + len_b)`, scaled to 0-100.
/// Empty input on either side scores 0.
fn ratio_chars(source: &[char], target: &[char]) -> f64 {
    let total = source.len() + target.len();
    if source.is_empty() || target.is_empty() {
        return 0.0;
    }
    200.0 * lcs_length(source, target) as f64 / total as f64
}

fn ratio_str(source: &str, target: &str) -> f64 {
    let source: Vec<char> = source.chars().collect();
    let target: Vec<char> = target.chars().collect();
    ratio_chars(&source, &target)
}

/// Best ratio of the shorter string against every same-length window of the longer one.
fn partial_ratio_str(source: &str, target: &str) -> f64 {
    let source: Vec<char> = source.chars().collect();
    let target: Vec<char> = target.chars().collect();
    let (shorter, longer) = if source.len() <= target.len() {
        (source, target)
    } else {
        (target, source)
    };
    if shorter.is_empty() {
        return 0.0;
    }
    longer
        .windows(shorter.len())
        .map(|window| ratio_chars(&shorter, window))
        .fold(0.0, f64::max)
}

/// Lowercased alphanumeric tokens; punctuation acts as a separator.
fn tokens(value: &str) -> Vec<String> {
    value
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn sorted_tokens(value: &str) -> String {
    let mut parts = tokens(value);
    parts.sort();
    parts.join(" ")
}

fn token_sort_with(source: &str, target: &str, scorer: fn(&str, &str) -> f64) -> f64 {
    scorer(&sorted_tokens(source), &sorted_tokens(target))
}

/// Compares the shared tokens against each side's shared+remaining tokens.
fn token_set_with(source: &str, target: &str, scorer: fn(&str, &str) -> f64) -> f64 {
    let source_set: BTreeSet<String> = tokens(source).into_iter().collect();
    let target_set: BTreeSet<String> = tokens(target).into_iter().collect();

    let join = |set: BTreeSet<&String>| {
        set.into_iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    };
    let shared = join(source_set.intersection(&target_set).collect());
    let only_source = join(source_set.difference(&target_set).collect());
    let only_target = join(target_set.difference(&source_set).collect());

    let combined_source = format!("{} {}", shared, only_source).trim().to_string();
    let combined_target = format!("{} {}", shared, only_target).trim().to_string();

    [
        scorer(&shared, &combined_source),
        scorer(&shared, &combined_target),
        scorer(&combined_source, &combined_target),
    ]
    .into_iter()
    .fold(0.0, f64::max)
}

/// Combined score used for name matching.
///
/// Similar-length inputs take the best of the plain, token-sort and token-set
/// ratios (token variants weighted 0.95). When one side is at least 1.5x longer,
/// partial (window) variants replace the token ones, scaled by 0.9, or by 0.6
/// once the length ratio exceeds 8.
///
/// Sub-scores stay fractional and the result is rounded once, so a score can
/// land one point off a scorer that rounds each sub-ratio before scaling.
#[must_use]
pub fn weighted_ratio(source: &str, target: &str) -> u8 {
    let processed_source = tokens(source).join(" ");
    let processed_target = tokens(target).join(" ");
    let source_len = processed_source.chars().count();
    let target_len = processed_target.chars().count();
    if source_len == 0 || target_len == 0 {
        return 0;
    }

    const TOKEN_SCALE: f64 = 0.95;
    let base = ratio_str(&processed_source, &processed_target);
    let length_ratio = source_len.max(target_len) as f64 / source_len.min(target_len) as f64;

    let best = if length_ratio < 1.5 {
        base.max(token_sort_with(source, target, ratio_str) * TOKEN_SCALE)
            .max(token_set_with(source, target, ratio_str) * TOKEN_SCALE)
    } else {
        let partial_scale = if length_ratio <= 8.0 { 0.9 } else { 0.6 };
        let partial = partial_ratio_str(&processed_source, &processed_target) * partial_scale;
        let partial_sort =
            token_sort_with(source, target, partial_ratio_str) * TOKEN_SCALE * partial_scale;
        let partial_set =
            token_set_with(source, target, partial_ratio_str) * TOKEN_SCALE * partial_scale;
        base.max(partial).max(partial_sort).max(partial_set)
    };

    to_score(best)
}

fn to_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}
