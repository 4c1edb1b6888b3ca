//! Candidate Validator: pure predicates that reject non-technical, generic or malformed
//! candidates. Nothing here mutates the ontology.

use std::sync::LazyLock;

use regex::Regex;

use crate::extraction::candidates::Candidate;
use crate::extraction::lexicon::{self, ACTION_STARTERS, JUNK_PATTERNS, SECTION_TITLES, SOURCE_SITES, TIME_WORDS};
use crate::extraction::ontology::{normalize_phrase, Ontology};
use crate::extraction::settings::ValidationRules;
use crate::extraction::tagger::{EntityLabel, PosTag, Tagger};

static LONG_DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{3,}").expect("digits regex"));

const CONTACT_MARKERS: &[&str] = &["@", ".com", "http", "www", "email", "phone"];

const VERB_SUFFIXES: &[&str] = &["ing", "ed", "en"];

pub struct Validator<'a> {
    ontology: &'a Ontology,
    tagger: &'a dyn Tagger,
    rules: &'a ValidationRules,
}

impl<'a> Validator<'a> {
    pub fn new(ontology: &'a Ontology, tagger: &'a dyn Tagger, rules: &'a ValidationRules) -> Self {
        Self {
            ontology,
            tagger,
            rules,
        }
    }

    fn stopword_ratio(&self, words: &[&str]) -> f64 {
        if words.is_empty() {
            return 0.0;
        }
        let stops = words
            .iter()
            .filter(|w| lexicon::is_stopword(w) && !self.ontology.contains_word(w))
            .count();
        stops as f64 / words.len() as f64
    }

    /// Verb detection: tagger verbs, action verbs, or a verb-like suffix on a word longer than
    /// four characters. Ontology words are never verbs (`learning`, `spring`).
    pub fn contains_verb(&self, phrase: &str) -> bool {
        let lower = normalize_phrase(phrase);
        let is_verb_word = |w: &str| {
            !self.ontology.contains_word(w)
                && (lexicon::is_action_verb(w) || (w.len() > 4 && VERB_SUFFIXES.iter().any(|s| w.ends_with(s))))
        };
        if lower.split(' ').any(is_verb_word) {
            return true;
        }
        self.tagger
            .pos_tags(&lower)
            .map(|tags| {
                tags.iter()
                    .any(|t| t.tag == PosTag::Verb && !self.ontology.contains_word(&t.text.to_lowercase()))
            })
            .unwrap_or(false)
    }

    /// Generic, junky or sentence-fragment phrases. Ontology terms are never junk.
    pub fn is_junk_phrase(&self, phrase: &str) -> bool {
        let lower = normalize_phrase(phrase);
        if lower.is_empty() {
            return true;
        }
        if self.ontology.is_known(&lower) {
            return false;
        }
        let words: Vec<&str> = lower.split(' ').collect();

        (words.len() == 1 && lexicon::is_generic_noun(&lower))
            || lexicon::is_generic_reject(&lower)
            || words.iter().any(|w| JUNK_PATTERNS.contains(w))
            || words.len() > self.rules.max_normalized_tokens
            || self.stopword_ratio(&words) > self.rules.junk_stopword_ratio
            || (words.len() >= 2 && lexicon::mentions_job_title(&lower))
            || lexicon::is_soft_skill(&lower)
            || self.contains_verb(&lower)
            || (words.len() >= 2 && words.iter().any(|w| lexicon::is_fragment_indicator(w)))
            || lexicon::is_leading_adjective(words[0])
    }

    /// Shape check: short, verb-free, mostly content words, no dates, not a bare section title.
    pub fn validate_phrase_structure(&self, phrase: &str) -> bool {
        let lower = normalize_phrase(phrase);
        let words: Vec<&str> = lower.split(' ').filter(|w| !w.is_empty()).collect();
        if words.is_empty() || words.len() > self.rules.max_normalized_tokens {
            return false;
        }
        if self.contains_verb(&lower) {
            return false;
        }
        let raw_stop_ratio =
            words.iter().filter(|w| lexicon::is_stopword(w)).count() as f64 / words.len() as f64;
        if raw_stop_ratio > self.rules.structural_stopword_ratio {
            return false;
        }
        if ACTION_STARTERS.contains(&words[0]) {
            return false;
        }
        if words.iter().any(|w| TIME_WORDS.contains(w)) {
            return false;
        }
        !SECTION_TITLES.contains(&lower.as_str())
    }

    /// Final membership test used by the ranker and the classifier.
    pub fn is_valid_technical_skill(&self, phrase: &str) -> bool {
        if !self.validate_phrase_structure(phrase) || self.is_junk_phrase(phrase) {
            return false;
        }
        let lower = normalize_phrase(phrase);
        let known = self.ontology.is_known(&lower);
        if !known && lower.split(' ').any(lexicon::is_non_tech_word) {
            return false;
        }
        self.ontology
            .category_of(&lower, self.rules.min_substring_match_len)
            .is_some()
    }

    /// Entity types that never name a technology, unless the phrase is an ontology term.
    fn names_non_technical_entity(&self, phrase: &str) -> bool {
        if self.ontology.is_known(phrase) {
            return false;
        }
        self.tagger
            .named_entities(phrase)
            .map(|ents| {
                ents.iter().any(|e| {
                    matches!(
                        e.label,
                        EntityLabel::Person | EntityLabel::Gpe | EntityLabel::Loc | EntityLabel::Date
                    )
                })
            })
            .unwrap_or(false)
    }

    /// Full filter chain applied to a pooled candidate before ranking.
    pub fn passes_filters(&self, candidate: &Candidate) -> bool {
        let phrase = candidate.normalized_phrase.as_str();
        let words: Vec<&str> = phrase.split(' ').collect();

        if candidate.accumulated_score <= 0.0 || candidate.section_priority < 0.0 {
            return false;
        }
        if !self.ontology.is_canonical(&self.ontology.canonicalize(phrase)) {
            return false;
        }
        if lexicon::is_soft_skill(phrase)
            || lexicon::is_hr_noise(phrase)
            || (words.len() == 1 && lexicon::is_generic_noun(phrase))
            || lexicon::is_generic_reject(phrase)
            || words.len() > self.rules.max_normalized_tokens
        {
            return false;
        }
        if self.is_junk_phrase(phrase) || self.contains_verb(phrase) {
            return false;
        }
        if LONG_DIGITS_RE.is_match(phrase)
            || CONTACT_MARKERS.iter().any(|m| phrase.contains(m))
            || SOURCE_SITES.iter().any(|s| phrase.contains(s))
        {
            return false;
        }
        !self.names_non_technical_entity(&candidate.raw_phrase)
    }
}
