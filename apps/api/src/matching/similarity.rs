//! Token-level similarity signals for item names and place descriptions.

/// Location tokens at or below this many characters never count as shared.
const MIN_SHARED_LOCATION_TOKEN_CHARS: usize = 3;

/// Lower-cased, whitespace-split name tokens with duplicates removed
/// (first occurrence order kept).
pub fn name_tokens(name: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for token in name.to_lowercase().split_whitespace() {
        if !tokens.iter().any(|t| t == token) {
            tokens.push(token.to_string());
        }
    }
    tokens
}

/// Lower-cased place tokens split on whitespace and commas.
pub fn location_tokens(location: &str) -> Vec<String> {
    location
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Token-overlap ratio between two item names.
///
/// A lost-name token counts when it contains, or is contained in, some
/// found-name token. Tokens shorter than `min_token_len` characters never
/// produce a hit but still count toward the denominator
/// `max(|lost tokens|, |found tokens|)`.
///
/// Returns `None` when either name has no tokens.
pub fn name_similarity(lost: &str, found: &str, min_token_len: usize) -> Option<f64> {
    let lost_tokens = name_tokens(lost);
    let found_tokens = name_tokens(found);
    if lost_tokens.is_empty() || found_tokens.is_empty() {
        return None;
    }

    let long_enough = |t: &&String| t.chars().count() >= min_token_len;
    let hits = lost_tokens
        .iter()
        .filter(long_enough)
        .filter(|l| {
            found_tokens
                .iter()
                .filter(long_enough)
                .any(|f| f.contains(l.as_str()) || l.contains(f.as_str()))
        })
        .count();

    Some(hits as f64 / lost_tokens.len().max(found_tokens.len()) as f64)
}

/// Similarity between the place a lost item was last seen and the place a
/// found item turned up.
///
/// Identical strings (ignoring case and surrounding whitespace) score 1.0.
/// Otherwise the score is the number of lost-side tokens longer than three
/// characters that also appear on the found side, divided by the larger
/// token count. Returns `None` when either place is absent or blank.
pub fn location_similarity(lost: Option<&str>, found: Option<&str>) -> Option<f64> {
    let lost = lost.map(str::trim).filter(|s| !s.is_empty())?;
    let found = found.map(str::trim).filter(|s| !s.is_empty())?;

    if lost.to_lowercase() == found.to_lowercase() {
        return Some(1.0);
    }

    let lost_tokens = location_tokens(lost);
    let found_tokens = location_tokens(found);
    let denominator = lost_tokens.len().max(found_tokens.len());
    if denominator == 0 {
        return Some(0.0);
    }

    let shared = lost_tokens
        .iter()
        .filter(|t| t.chars().count() > MIN_SHARED_LOCATION_TOKEN_CHARS && found_tokens.contains(t))
        .count();

    Some(shared as f64 / denominator as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_name_tokens_lowercase_and_dedup() {
        assert_eq!(name_tokens("  Black  black Wallet "), vec!["black", "wallet"]);
        assert!(name_tokens("   ").is_empty());
    }

    #[test]
    fn test_location_tokens_split_on_commas() {
        assert_eq!(
            location_tokens("Main Street,Amman , Jordan"),
            vec!["main", "street", "amman", "jordan"]
        );
    }

    #[test]
    fn test_name_similarity_partial_overlap() {
        let sim = name_similarity("black wallet", "black leather wallet", 1).unwrap();
        assert!(approx(sim, 2.0 / 3.0), "got {sim}");
    }

    #[test]
    fn test_name_similarity_is_substring_containment() {
        // "phone" is contained in "iphone"; "case" contains nothing from the other side.
        let sim = name_similarity("phone case", "iPhone", 1).unwrap();
        assert!(approx(sim, 0.5), "got {sim}");
    }

    #[test]
    fn test_name_similarity_no_overlap() {
        assert_eq!(name_similarity("red bicycle", "golden retriever", 1), Some(0.0));
    }

    #[test]
    fn test_name_similarity_blank_is_not_applicable() {
        assert_eq!(name_similarity("  ", "wallet", 1), None);
    }

    #[test]
    fn test_min_token_len_blocks_short_token_hits() {
        // "a" is a substring of "bag", so it hits without a guard.
        assert_eq!(name_similarity("a", "bag", 1), Some(1.0));
        assert_eq!(name_similarity("a", "bag", 2), Some(0.0));
    }

    #[test]
    fn test_location_identical_ignoring_case() {
        assert_eq!(
            location_similarity(Some("Main Street"), Some("main street ")),
            Some(1.0)
        );
    }

    #[test]
    fn test_location_shared_long_tokens() {
        let sim = location_similarity(Some("Main Street"), Some("Main Street Park")).unwrap();
        assert!(approx(sim, 2.0 / 3.0), "got {sim}");
    }

    #[test]
    fn test_location_short_tokens_ignored() {
        // "the" and "mall"; only "mall" is long enough, and it is not shared.
        let sim = location_similarity(Some("the mall"), Some("the park")).unwrap();
        assert_eq!(sim, 0.0);
    }

    #[test]
    fn test_location_absent_is_not_applicable() {
        assert_eq!(location_similarity(None, Some("Main Street")), None);
        assert_eq!(location_similarity(Some("   "), Some("Main Street")), None);
    }
}
