//! TF-IDF over word n-grams of the cleaned token stream.
//!
//! Smoothed IDF (`ln((1 + n) / (1 + df)) + 1`) and per-document L2 normalisation. The vocabulary
//! keeps the `max_features` most frequent n-grams across the corpus, ties broken by the term
//! itself so the result never depends on hash order.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TfidfParams {
    pub max_ngram: usize,
    pub max_features: usize,
}

pub type TermWeights = BTreeMap<String, f64>;

fn ngram_counts(tokens: &[String], max_ngram: usize) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for n in 1..=max_ngram.max(1) {
        for window in tokens.windows(n) {
            *counts.entry(window.join(" ")).or_insert(0) += 1;
        }
    }
    counts
}

/// One weight map per document, in input order. Documents without tokens get an empty map.
pub fn weigh(docs: &[Vec<String>], params: TfidfParams) -> Vec<TermWeights> {
    let per_doc: Vec<HashMap<String, usize>> = docs
        .iter()
        .map(|tokens| ngram_counts(tokens, params.max_ngram))
        .collect();

    let mut corpus: HashMap<&str, (usize, usize)> = HashMap::new();
    for counts in &per_doc {
        for (term, count) in counts {
            let entry = corpus.entry(term.as_str()).or_insert((0, 0));
            entry.0 += count;
            entry.1 += 1;
        }
    }

    let mut vocabulary: Vec<(&str, usize, usize)> =
        corpus.into_iter().map(|(t, (count, df))| (t, count, df)).collect();
    vocabulary.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    vocabulary.truncate(params.max_features);

    let n = docs.len() as f64;
    per_doc
        .iter()
        .map(|counts| {
            let mut weights: TermWeights = vocabulary
                .iter()
                .filter_map(|(term, _, df)| {
                    let tf = *counts.get(*term)? as f64;
                    let idf = ((1.0 + n) / (1.0 + *df as f64)).ln() + 1.0;
                    Some((term.to_string(), tf * idf))
                })
                .collect();
            let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                for w in weights.values_mut() {
                    *w /= norm;
                }
            }
            weights
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    const PARAMS: TfidfParams = TfidfParams {
        max_ngram: 2,
        max_features: 100,
    };

    #[test]
    fn test_single_document_weights_are_l2_normalised() {
        let weights = weigh(&[tokens("python docker python kubernetes")], PARAMS);
        let norm: f64 = weights[0].values().map(|w| w * w).sum();
        assert!((norm - 1.0).abs() < 1e-9);
        assert!(weights[0]["python"] > weights[0]["docker"]);
        assert!(weights[0].contains_key("python docker"));
    }

    #[test]
    fn test_max_features_keeps_most_frequent_terms() {
        let params = TfidfParams {
            max_ngram: 1,
            max_features: 2,
        };
        let weights = weigh(&[tokens("rust rust rust go go java")], params);
        let terms: Vec<&str> = weights[0].keys().map(String::as_str).collect();
        assert_eq!(terms, vec!["go", "rust"]);
    }

    #[test]
    fn test_pair_idf_favours_distinguishing_terms() {
        let docs = [tokens("python react"), tokens("python django")];
        let weights = weigh(&docs, TfidfParams { max_ngram: 1, max_features: 100 });
        assert!(weights[0]["react"] > weights[0]["python"]);
        assert!(weights[1]["django"] > weights[1]["python"]);
        assert!(!weights[0].contains_key("django"));
    }

    #[test]
    fn test_empty_document_yields_empty_weights() {
        let weights = weigh(&[vec![]], PARAMS);
        assert_eq!(weights.len(), 1);
        assert!(weights[0].is_empty());
    }
}
