use unicode_normalization::UnicodeNormalization;

/// Canonicalize free text for comparison.
///
/// Newlines become spaces, runs of whitespace collapse to one space,
/// the result is trimmed and lowercased, punctuation is stripped
/// (underscore counts as a word character), and NFKD decomposition
/// followed by an ASCII filter folds accented letters to their base
/// letter ("Café" → "cafe"). Pure and deterministic; the matcher
/// compares normalized forms directly.
pub fn normalize(text: &str) -> String {
    let collapsed = text
        .replace('\n', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let lowered = collapsed.to_lowercase();
    let stripped: String = lowered
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    stripped.nfkd().filter(|c| c.is_ascii()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_whitespace_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n\t  "), "");
    }

    #[test]
    fn collapses_whitespace_and_newlines() {
        assert_eq!(normalize("Tomato\nSauce   500g"), "tomato sauce 500g");
        assert_eq!(normalize("  leading  and trailing  "), "leading and trailing");
    }

    #[test]
    fn strips_punctuation_keeps_underscore() {
        assert_eq!(normalize("Café, Rouge!"), "cafe rouge");
        assert_eq!(normalize("sku_42 (new)"), "sku_42 new");
    }

    #[test]
    fn folds_accents_to_ascii() {
        assert_eq!(normalize("Crème Brûlée"), "creme brulee");
        assert_eq!(normalize("Catégorie"), "categorie");
        // No decomposition for this ligature — dropped like the ASCII
        // encode/ignore step it mirrors.
        assert_eq!(normalize("œuf"), "uf");
    }

    #[test]
    fn idempotent() {
        for input in ["Café, Rouge!", "  a\nb  ", "Crème Brûlée 2.0", ""] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn accent_and_punctuation_insensitive_equality() {
        assert_eq!(normalize("Café, Rouge!"), normalize("cafe rouge"));
    }
}
