//! Candidate Generator: collects evidence for every phrase that might be a technical skill.
//!
//! Three passes feed one pool keyed by canonical form: an ontology scan, phrase mining and
//! statistical weighting. A context pass then rewards candidates mentioned near technical
//! action verbs.

use std::collections::HashMap;

use crate::extraction::lexicon;
use crate::extraction::ontology::{joins_word, normalize_phrase, Ontology, SurfaceHit};
use crate::extraction::sections::{priority_for, SectionMap};
use crate::extraction::settings::{ExtractionConfig, ProfileConfig};
use crate::extraction::tagger::Tagger;
use crate::extraction::tfidf::TermWeights;

#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Surface form as first seen in the text.
    pub raw_phrase: String,
    /// Canonical form; the pool key.
    pub normalized_phrase: String,
    pub accumulated_score: f64,
    pub frequency: u32,
    pub statistical_weight: f64,
    pub section_priority: f64,
    pub context_bonus: bool,
    pub first_seen: usize,
}

impl Candidate {
    pub fn token_count(&self) -> usize {
        self.normalized_phrase.split_whitespace().count()
    }
}

/// Request-scoped accumulator. Iteration order is first-seen order.
#[derive(Debug, Default)]
pub struct CandidatePool {
    candidates: Vec<Candidate>,
    index: HashMap<String, usize>,
}

impl CandidatePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one occurrence contributing `priority` to the candidate's score.
    pub fn record(&mut self, key: &str, raw: &str, priority: f64) {
        match self.index.get(key) {
            Some(&idx) => {
                let c = &mut self.candidates[idx];
                c.accumulated_score += priority;
                c.frequency += 1;
                c.section_priority = c.section_priority.max(priority);
            }
            None => {
                let first_seen = self.candidates.len();
                self.index.insert(key.to_string(), first_seen);
                self.candidates.push(Candidate {
                    raw_phrase: raw.to_string(),
                    normalized_phrase: key.to_string(),
                    accumulated_score: priority,
                    frequency: 1,
                    statistical_weight: 0.0,
                    section_priority: priority,
                    context_bonus: false,
                    first_seen,
                });
            }
        }
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&Candidate> {
        self.index.get(key).map(|&i| &self.candidates[i])
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Candidate> {
        match self.index.get(key) {
            Some(&i) => self.candidates.get_mut(i),
            None => None,
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }

    pub fn into_vec(self) -> Vec<Candidate> {
        self.candidates
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Term matching
// ────────────────────────────────────────────────────────────────────────────

/// Splits a line into runs of lowercase words broken at punctuation, sentence ends and
/// stopwords. Stopwords that are ontology words (`on` in `ruby on rails`) do not break runs.
fn word_runs(line: &str, ontology: &Ontology) -> Vec<Vec<String>> {
    let mut runs = Vec::new();
    let mut run: Vec<String> = Vec::new();
    let lower = line.to_lowercase();

    for segment in lower.split(|c: char| ",;:()[]{}|/!?\"'*&".contains(c)) {
        for raw in segment.split_whitespace() {
            let ends_sentence = raw.ends_with('.');
            let word = raw.trim_matches(|c: char| !joins_word(c));
            let breaks = word.is_empty()
                || word.chars().all(|c| c.is_ascii_digit())
                || (lexicon::is_stopword(word) && !ontology.contains_word(word));
            if breaks {
                if !run.is_empty() {
                    runs.push(std::mem::take(&mut run));
                }
            } else {
                run.push(word.to_string());
            }
            if ends_sentence && !run.is_empty() {
                runs.push(std::mem::take(&mut run));
            }
        }
        if !run.is_empty() {
            runs.push(std::mem::take(&mut run));
        }
    }
    runs
}

/// Lowercase whitespace tokens with surrounding punctuation removed.
fn context_tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| !joins_word(c)).to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// True when `phrase` is not itself a surface hit but sits inside a longer one.
fn shadowed_by_longer_surface(phrase: &str, hits: &[SurfaceHit<'_>]) -> bool {
    if hits.iter().any(|h| h.surface.text == phrase) {
        return false;
    }
    let words: Vec<&str> = phrase.split(' ').collect();
    hits.iter().any(|h| {
        let surface: Vec<String> = h.surface.text.split(' ').map(str::to_string).collect();
        surface.len() > words.len() && contains_sequence(&surface, &words)
    })
}

fn contains_sequence(window: &[String], phrase: &[&str]) -> bool {
    !phrase.is_empty()
        && window.len() >= phrase.len()
        && window
            .windows(phrase.len())
            .any(|w| w.iter().zip(phrase).all(|(a, b)| a == b))
}

// ────────────────────────────────────────────────────────────────────────────
// Generator
// ────────────────────────────────────────────────────────────────────────────

pub struct CandidateGenerator<'a> {
    ontology: &'a Ontology,
    tagger: &'a dyn Tagger,
    config: &'a ExtractionConfig,
}

impl<'a> CandidateGenerator<'a> {
    pub fn new(ontology: &'a Ontology, tagger: &'a dyn Tagger, config: &'a ExtractionConfig) -> Self {
        Self {
            ontology,
            tagger,
            config,
        }
    }

    /// Runs every pass over the sanitized text. `weights` is `None` when the document had
    /// nothing to weigh.
    pub fn generate(
        &self,
        text: &str,
        sections: &SectionMap,
        weights: Option<&TermWeights>,
        profile: &ProfileConfig,
    ) -> CandidatePool {
        let mut pool = CandidatePool::new();
        self.scan_ontology(text, sections, &mut pool);
        self.mine_phrases(text, sections, &mut pool);
        if let Some(weights) = weights {
            self.apply_weights(weights, profile, &mut pool);
        }
        self.apply_context(text, &mut pool);
        pool
    }

    /// Whole-term search for every surface, longest match first on overlaps.
    pub fn scan_ontology(&self, text: &str, sections: &SectionMap, pool: &mut CandidatePool) {
        for (line_no, line) in text.split('\n').enumerate() {
            let lower = line.to_lowercase();
            let priority = sections.priority_at(line_no);
            for hit in self.ontology.find_surfaces(&lower, sections.is_skills_line(line_no)) {
                pool.record(&hit.surface.canonical, &lower[hit.start..hit.end], priority);
            }
        }
    }

    /// Noun chunks from the tagger, or stopword-delimited word windows, kept when a word
    /// matches the ontology. A phrase lying inside a longer surface found on the same line
    /// (`react` in `react native`) is left to the scan.
    pub fn mine_phrases(&self, text: &str, sections: &SectionMap, pool: &mut CandidatePool) {
        let max_tokens = self.config.validation.max_phrase_tokens;

        for (line_no, line) in text.split('\n').enumerate() {
            let skills_line = sections.is_skills_line(line_no);
            let hits = self.ontology.find_surfaces(&line.to_lowercase(), skills_line);
            let phrases: Vec<String> = match self.tagger.noun_chunks(line) {
                Some(chunks) => chunks,
                None => word_runs(line, self.ontology)
                    .iter()
                    .flat_map(|run| {
                        (1..=max_tokens.min(run.len())).flat_map(move |n| run.windows(n).map(|w| w.join(" ")))
                    })
                    .collect(),
            };

            let line_priority = sections.priority_at(line_no);
            for phrase in phrases {
                let normalized = normalize_phrase(&phrase);
                let token_count = normalized.split(' ').count();
                if normalized.is_empty() || token_count > max_tokens {
                    continue;
                }
                let anchored = normalized.split(' ').any(|w| {
                    self.ontology.matches_word(w) && (skills_line || !self.ontology.is_ambiguous(w))
                });
                if !anchored || shadowed_by_longer_surface(&normalized, &hits) {
                    continue;
                }
                let priority = priority_for(&normalized).unwrap_or(line_priority);
                let key = self.ontology.canonicalize(&normalized);
                pool.record(&key, &normalized, priority);
            }
        }
    }

    /// Boosts existing candidates whose canonical form carries TF-IDF weight. Several terms
    /// can resolve to one candidate (`postgres`, `postgresql`); it takes their maximum weight
    /// and one band bonus.
    pub fn apply_weights(&self, weights: &TermWeights, profile: &ProfileConfig, pool: &mut CandidatePool) {
        let mut by_key: HashMap<String, f64> = HashMap::new();
        for (term, &weight) in weights {
            let key = self.ontology.canonicalize(term);
            let best = by_key.entry(key).or_insert(weight);
            *best = best.max(weight);
        }
        for (key, weight) in by_key {
            if let Some(candidate) = pool.get_mut(&key) {
                candidate.statistical_weight = candidate.statistical_weight.max(weight);
                candidate.accumulated_score += profile.band_bonus(weight);
            }
        }
    }

    /// Adds the context bonus once to every candidate seen within the window of an action verb.
    pub fn apply_context(&self, text: &str, pool: &mut CandidatePool) {
        let tokens = context_tokens(text);
        let window = self.config.context.window;
        let verb_windows: Vec<&[String]> = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| lexicon::is_action_verb(t))
            .map(|(i, _)| &tokens[i.saturating_sub(window)..(i + window + 1).min(tokens.len())])
            .collect();
        if verb_windows.is_empty() {
            return;
        }

        let keys: Vec<String> = pool.iter().map(|c| c.normalized_phrase.clone()).collect();
        for key in keys {
            let Some(candidate) = pool.get_mut(&key) else {
                continue;
            };
            let canonical: Vec<&str> = candidate.normalized_phrase.split(' ').collect();
            let raw: Vec<&str> = candidate.raw_phrase.split(' ').collect();
            let near = verb_windows
                .iter()
                .any(|w| contains_sequence(w, &canonical) || contains_sequence(w, &raw));
            if near && !candidate.context_bonus {
                candidate.context_bonus = true;
                candidate.accumulated_score += self.config.context.bonus;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::sections::{priority, DocumentKind};
    use crate::extraction::tagger::{LexiconTagger, PatternOnlyTagger};

    fn ontology() -> Ontology {
        Ontology::builtin().unwrap()
    }

    #[test]
    fn test_word_runs_break_at_stopwords_and_punctuation() {
        let o = ontology();
        let runs = word_runs("Experienced with React, Node.js and Ruby on Rails.", &o);
        assert_eq!(
            runs,
            vec![
                vec!["experienced".to_string()],
                vec!["react".to_string()],
                vec!["node.js".to_string()],
                vec!["ruby".to_string(), "on".to_string(), "rails".to_string()],
            ]
        );
    }

    #[test]
    fn test_pool_accumulates_in_first_seen_order() {
        let mut pool = CandidatePool::new();
        pool.record("python", "python", 1.0);
        pool.record("docker", "docker", -1.0);
        pool.record("python", "py", 5.0);
        let all: Vec<&Candidate> = pool.iter().collect();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].normalized_phrase, "python");
        assert_eq!(all[0].frequency, 2);
        assert_eq!(all[0].accumulated_score, 6.0);
        assert_eq!(all[0].section_priority, 5.0);
        assert_eq!(all[0].raw_phrase, "python");
        assert_eq!(all[1].first_seen, 1);
    }

    #[test]
    fn test_scan_merges_aliases_into_one_candidate() {
        let o = ontology();
        let config = ExtractionConfig::default();
        let gen = CandidateGenerator::new(&o, &PatternOnlyTagger, &config);
        let text = "I use ReactJS and React.js";
        let sections = SectionMap::detect(text, DocumentKind::Resume);
        let mut pool = CandidatePool::new();
        gen.scan_ontology(text, &sections, &mut pool);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.get("react").map(|c| c.frequency), Some(2));
    }

    #[test]
    fn test_scan_prefers_longest_overlapping_term() {
        let o = ontology();
        let config = ExtractionConfig::default();
        let gen = CandidateGenerator::new(&o, &PatternOnlyTagger, &config);
        let text = "Mobile apps in React Native";
        let sections = SectionMap::detect(text, DocumentKind::Resume);
        let mut pool = CandidatePool::new();
        gen.scan_ontology(text, &sections, &mut pool);
        assert!(pool.get("react native").is_some());
        assert!(pool.get("react").is_none());
    }

    #[test]
    fn test_ambiguous_surfaces_only_count_in_skills_sections() {
        let o = ontology();
        let config = ExtractionConfig::default();
        let gen = CandidateGenerator::new(&o, &PatternOnlyTagger, &config);

        let prose = "Ready to go the extra mile and take a rest";
        let sections = SectionMap::detect(prose, DocumentKind::Resume);
        let mut pool = CandidatePool::new();
        gen.scan_ontology(prose, &sections, &mut pool);
        assert!(pool.is_empty());

        let skills = "SKILLS\nGo, R, REST";
        let sections = SectionMap::detect(skills, DocumentKind::Resume);
        let mut pool = CandidatePool::new();
        gen.scan_ontology(skills, &sections, &mut pool);
        assert!(pool.get("go").is_some());
        assert!(pool.get("r").is_some());
        assert_eq!(pool.get("rest api").map(|c| c.section_priority), Some(priority::BOOSTED));
    }

    #[test]
    fn test_mining_keeps_phrases_anchored_on_ontology_words() {
        let o = ontology();
        let config = ExtractionConfig::default();
        for tagger in [&LexiconTagger as &dyn Tagger, &PatternOnlyTagger] {
            let gen = CandidateGenerator::new(&o, tagger, &config);
            let text = "Maintained Kafka clusters for the billing team";
            let sections = SectionMap::detect(text, DocumentKind::Resume);
            let mut pool = CandidatePool::new();
            gen.mine_phrases(text, &sections, &mut pool);
            assert!(pool.iter().any(|c| c.normalized_phrase.contains("kafka")), "{}", tagger.name());
            assert!(pool.get("billing team").is_none());
        }
    }

    #[test]
    fn test_mining_leaves_sub_phrases_of_longer_terms_to_the_scan() {
        let o = ontology();
        let config = ExtractionConfig::default();
        for tagger in [&LexiconTagger as &dyn Tagger, &PatternOnlyTagger] {
            let gen = CandidateGenerator::new(&o, tagger, &config);
            for (text, shadowed) in [
                ("Built mobile apps in React Native", "react"),
                ("Web apps with Ruby on Rails", "ruby"),
            ] {
                let sections = SectionMap::detect(text, DocumentKind::Resume);
                let pool = gen.generate(text, &sections, None, &config.resume);
                assert!(pool.get(shadowed).is_none(), "{} mined '{shadowed}'", tagger.name());
            }
        }
    }

    #[test]
    fn test_mining_keeps_standalone_mentions_next_to_longer_terms() {
        let o = ontology();
        let config = ExtractionConfig::default();
        let gen = CandidateGenerator::new(&o, &PatternOnlyTagger, &config);
        let text = "React Native and React";
        let sections = SectionMap::detect(text, DocumentKind::Resume);
        let mut pool = CandidatePool::new();
        gen.mine_phrases(text, &sections, &mut pool);
        assert!(pool.get("react").is_some());
    }

    #[test]
    fn test_weights_apply_one_bonus_per_candidate() {
        let o = ontology();
        let config = ExtractionConfig::default();
        let gen = CandidateGenerator::new(&o, &PatternOnlyTagger, &config);
        let mut pool = CandidatePool::new();
        pool.record("postgresql", "postgres", 1.0);

        let mut weights = TermWeights::new();
        weights.insert("postgres".to_string(), 0.2);
        weights.insert("postgresql".to_string(), 0.3);
        gen.apply_weights(&weights, &config.resume, &mut pool);

        let c = pool.get("postgresql").unwrap();
        assert_eq!(c.statistical_weight, 0.3);
        assert_eq!(c.accumulated_score, 1.0 + config.resume.band_bonus(0.3));
    }

    #[test]
    fn test_weights_only_boost_existing_candidates() {
        let o = ontology();
        let config = ExtractionConfig::default();
        let gen = CandidateGenerator::new(&o, &PatternOnlyTagger, &config);
        let mut pool = CandidatePool::new();
        pool.record("postgresql", "postgres", 1.0);

        let mut weights = TermWeights::new();
        weights.insert("postgres".to_string(), 0.2);
        weights.insert("teamwork".to_string(), 0.9);
        gen.apply_weights(&weights, &config.resume, &mut pool);

        assert_eq!(pool.len(), 1);
        let c = pool.get("postgresql").unwrap();
        assert_eq!(c.statistical_weight, 0.2);
        assert_eq!(c.accumulated_score, 6.0);
    }

    #[test]
    fn test_context_bonus_near_action_verbs() {
        let o = ontology();
        let config = ExtractionConfig::default();
        let gen = CandidateGenerator::new(&o, &PatternOnlyTagger, &config);
        let mut pool = CandidatePool::new();
        pool.record("docker", "docker", 1.0);
        pool.record("rust", "rust", 1.0);
        let filler = "word ".repeat(20);
        let text = format!("Deployed services with Docker. {filler} Rust");
        gen.apply_context(&text, &mut pool);

        let docker = pool.get("docker").unwrap();
        assert!(docker.context_bonus);
        assert_eq!(docker.accumulated_score, 4.0);
        assert!(!pool.get("rust").unwrap().context_bonus);
    }
}
