//! Word-set similarity between questions.

use std::collections::HashSet;

/// Lower-cased whitespace-separated words.
pub fn word_set(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// J(A, B) = |A ∩ B| / |A ∪ B|. Returns 0.0 if both sets are empty.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}
