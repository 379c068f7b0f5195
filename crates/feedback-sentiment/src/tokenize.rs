//! Word tokenization shared by valence lookup and override matching.

/// Tokenize text into lowercase words.
///
/// - Apostrophes inside a word are dropped (`can't` -> `cant`)
/// - Every other non-alphanumeric character ends the current token
/// - No stemming; no stop-word removal
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for c in text.chars() {
        if c.is_alphanumeric() {
            current.extend(c.to_lowercase());
        } else if is_apostrophe(c) && !current.is_empty() {
            continue;
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}

/// Count exclamation marks, used for emphasis.
pub(crate) fn exclamation_count(text: &str) -> usize {
    text.chars().filter(|&c| c == '!').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_basic() {
        assert_eq!(tokenize("Hello World"), vec!["hello", "world"]);
    }

    #[test]
    fn test_tokenize_strips_punctuation() {
        assert_eq!(
            tokenize("Broken, slow... and (awful)!"),
            vec!["broken", "slow", "and", "awful"]
        );
    }

    #[test]
    fn test_tokenize_joins_contractions() {
        assert_eq!(tokenize("I can't log in"), vec!["i", "cant", "log", "in"]);
        assert_eq!(tokenize("it\u{2019}s fine"), vec!["its", "fine"]);
    }

    #[test]
    fn test_tokenize_keeps_word_boundaries() {
        // "unbroken" must not be read as "broken"
        assert_eq!(tokenize("unbroken"), vec!["unbroken"]);
        assert_eq!(tokenize("checkout-page"), vec!["checkout", "page"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t\n").is_empty());
        assert!(tokenize("?!.,").is_empty());
    }

    #[test]
    fn test_leading_apostrophe_is_boundary() {
        assert_eq!(tokenize("'quoted'"), vec!["quoted"]);
    }

    #[test]
    fn test_exclamation_count() {
        assert_eq!(exclamation_count("Love it!!"), 2);
        assert_eq!(exclamation_count("fine."), 0);
    }
}
