//! Input normalisation shared by every extraction path.

use unicode_normalization::UnicodeNormalization;

use crate::extraction::lexicon;
use crate::extraction::ontology::Ontology;

/// Truncates to `max_chars` characters (never splitting a code point), decomposes with NFKD and
/// drops what is left outside ASCII. Typographic quotes and dashes are mapped first so that
/// `Node.js – React` keeps its separator.
pub fn prepare(text: &str, max_chars: usize) -> String {
    text.chars()
        .take(max_chars)
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' | '\u{2212}' => '-',
            '\u{2022}' | '\u{25CF}' | '\u{25AA}' => '*',
            '\u{00A0}' => ' ',
            other => other,
        })
        .nfkd()
        .filter(|c| c.is_ascii())
        .collect::<String>()
        .replace("\r\n", "\n")
        .replace('\r', "\n")
}

/// Token stream for statistical weighting: lowercase, punctuation to spaces, single characters,
/// numbers and stopwords dropped. Stopwords that are ontology words survive.
pub fn clean_tokens(text: &str, ontology: &Ontology) -> Vec<String> {
    let lowered: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();

    lowered
        .split_whitespace()
        .filter(|w| w.len() > 1)
        .filter(|w| !w.chars().all(|c| c.is_ascii_digit()))
        .filter(|w| !lexicon::is_stopword(w) || ontology.contains_word(w))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_folds_accents_and_dashes() {
        assert_eq!(prepare("Résumé \u{2013} café", 100), "Resume - cafe");
    }

    #[test]
    fn test_prepare_truncates_on_char_boundary() {
        let text = "é".repeat(10);
        assert_eq!(prepare(&text, 3), "eee");
    }

    #[test]
    fn test_prepare_preserves_line_structure() {
        let out = prepare("Skills\r\nPython\r\nDocker", 1000);
        assert_eq!(out.lines().count(), 3);
    }

    #[test]
    fn test_clean_tokens_drops_noise() {
        let ontology = Ontology::builtin().unwrap();
        let tokens = clean_tokens("We used Python 3, the AWS cloud & a Docker image in 2021.", &ontology);
        assert_eq!(tokens, vec!["used", "python", "aws", "cloud", "docker", "image"]);
    }
}
