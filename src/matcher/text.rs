// file: src/matcher/text.rs
// description: accent-insensitive text normalization and word tokenization
// reference: https://docs.rs/unicode-normalization

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Lowercases, strips diacritics and trims surrounding whitespace.
///
/// Text is decomposed to NFD so accented letters split into a base letter
/// plus combining marks, and the marks are dropped. `"Impressão"` and
/// `"impressao"` normalize to the same string.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Normalized words, split on anything that is not a letter or digit.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_accent_insensitive() {
        assert_eq!(normalize("café"), normalize("cafe"));
        assert_eq!(normalize("Impressão"), "impressao");
        assert_eq!(normalize("  ÁGUA  "), "agua");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for text in [
            "Erro de Impressão",
            "çÇãõÑñ",
            "  Straße  ",
            "İstanbul",
            "ﬁle",
            "",
            "Crème brûlée — 12,50 €",
        ] {
            let once = normalize(text);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", text);
        }
    }

    #[test]
    fn test_tokenize_splits_on_punctuation() {
        assert_eq!(
            tokenize("Erro de impressão: reinicie a fila!"),
            vec!["erro", "de", "impressao", "reinicie", "a", "fila"]
        );
    }

    #[test]
    fn test_tokenize_blank() {
        assert!(tokenize("   ").is_empty());
        assert!(tokenize("?!").is_empty());
    }
}
