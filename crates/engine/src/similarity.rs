use std::collections::BTreeSet;

use strsim::normalized_levenshtein;

/// Token-set similarity between two strings, 0.0–100.0.
///
/// Splits both inputs into word-token sets and scores the sorted
/// intersection against each side's intersection-plus-remainder
/// string, taking the best of the three pairwise comparisons. Word
/// order is irrelevant and extra words on one side are cheap, so
/// "sauce tomate" scores 100 against "tomate sauce 500g". Inputs are
/// expected to be pre-normalized.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    // An empty side can only produce degenerate comparisons against
    // empty strings, which score 1.0; treat it as no similarity.
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let only_a: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let only_b: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    let sect = intersection.join(" ");
    let combined_a = join_nonempty(&sect, &only_a.join(" "));
    let combined_b = join_nonempty(&sect, &only_b.join(" "));

    let ratios = [
        normalized_levenshtein(&sect, &combined_a),
        normalized_levenshtein(&sect, &combined_b),
        normalized_levenshtein(&combined_a, &combined_b),
    ];

    ratios.into_iter().fold(0.0f64, f64::max) * 100.0
}

fn join_nonempty(base: &str, rest: &str) -> String {
    match (base.is_empty(), rest.is_empty()) {
        (true, _) => rest.to_string(),
        (_, true) => base.to_string(),
        _ => format!("{base} {rest}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_100() {
        assert_eq!(token_set_ratio("tomato sauce", "tomato sauce"), 100.0);
    }

    #[test]
    fn order_independent() {
        assert_eq!(token_set_ratio("sauce tomato", "tomato sauce"), 100.0);
    }

    #[test]
    fn subset_scores_100() {
        // The sorted intersection equals one side entirely.
        assert_eq!(token_set_ratio("tomato sauce", "tomato sauce 500g"), 100.0);
    }

    #[test]
    fn close_misspelling_clears_default_threshold() {
        let score = token_set_ratio("tomatoe sauce", "tomato sauce");
        assert!(score >= 70.0, "got {score}");
        assert!(score < 100.0);
    }

    #[test]
    fn unrelated_strings_score_low() {
        let score = token_set_ratio("completely unrelated item", "tomato sauce");
        assert!(score < 70.0, "got {score}");
    }

    #[test]
    fn both_empty_is_zero() {
        assert_eq!(token_set_ratio("", ""), 0.0);
    }

    #[test]
    fn one_empty_side() {
        let score = token_set_ratio("", "tomato sauce");
        assert!(score < 70.0, "got {score}");
    }
}
