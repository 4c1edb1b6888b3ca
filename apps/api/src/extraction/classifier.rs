//! Canonicalizer & Classifier: turns ranked names into the five disjoint output lists.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::extraction::lexicon;
use crate::extraction::ontology::{normalize_phrase, Ontology, SkillBucket};
use crate::extraction::ranker::SENTINEL;
use crate::extraction::settings::{OutputLimits, ValidationRules};
use crate::extraction::validator::Validator;
use crate::models::skills::{ClassifiedSkills, RankedSkill};

static COMPOUND_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+(?:and|or|&)\s+|\s*[,/]\s*").expect("compound regex"));

pub struct Classifier<'a> {
    ontology: &'a Ontology,
    validator: &'a Validator<'a>,
    rules: &'a ValidationRules,
    limits: &'a OutputLimits,
}

impl<'a> Classifier<'a> {
    pub fn new(
        ontology: &'a Ontology,
        validator: &'a Validator<'a>,
        rules: &'a ValidationRules,
        limits: &'a OutputLimits,
    ) -> Self {
        Self {
            ontology,
            validator,
            rules,
            limits,
        }
    }

    /// Splits `a and b`, `a/b`, `a, b`; a multi-word phrase made of two or more known
    /// technology words becomes those words. Order is preserved, duplicates dropped.
    pub fn split_compounds(&self, phrases: &[String]) -> Vec<String> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        let mut push = |p: String| {
            if !p.is_empty() && seen.insert(p.clone()) {
                out.push(p);
            }
        };

        for phrase in phrases {
            let phrase = normalize_phrase(phrase);
            if phrase.is_empty() || phrase == SENTINEL {
                continue;
            }
            if !self.ontology.is_known(&phrase) && COMPOUND_SPLIT_RE.is_match(&phrase) {
                for part in COMPOUND_SPLIT_RE.split(&phrase) {
                    push(normalize_phrase(part));
                }
                continue;
            }
            let words: Vec<&str> = phrase.split(' ').collect();
            if words.len() >= 2 && !self.ontology.is_known(&phrase) {
                let technical: Vec<&str> = words
                    .iter()
                    .copied()
                    .filter(|w| w.len() > 1 && self.ontology.is_known(w))
                    .collect();
                if technical.len() >= 2 {
                    for word in technical {
                        push(word.to_string());
                    }
                    continue;
                }
            }
            push(phrase);
        }
        out
    }

    /// Bucket for a canonical name: its lookup category's bucket, moved to the highest
    /// precedence bucket among all of the name's categories.
    fn bucket_for(&self, canonical: &str) -> Option<SkillBucket> {
        let looked_up = self
            .ontology
            .category_of(canonical, self.rules.min_substring_match_len)?
            .bucket();
        let corrected = match self.ontology.primary_bucket(canonical) {
            Some(primary) if primary.precedence() > looked_up.precedence() => primary,
            _ => looked_up,
        };
        Some(corrected)
    }

    pub fn classify(&self, ranked: &[RankedSkill]) -> ClassifiedSkills {
        let names: Vec<String> = ranked.iter().map(|r| r.name.clone()).collect();
        let mut classified = ClassifiedSkills::default();
        let mut placed = HashSet::new();

        for phrase in self.split_compounds(&names) {
            let single_char = phrase.chars().count() <= 1;
            if single_char && !self.ontology.is_canonical(&phrase) {
                continue;
            }
            if !self.validator.is_valid_technical_skill(&phrase) || self.validator.is_junk_phrase(&phrase) {
                continue;
            }
            let canonical = self.ontology.canonicalize(&phrase);
            if !self.ontology.is_canonical(&canonical) {
                continue;
            }
            if lexicon::is_generic_reject(&canonical) || lexicon::is_output_junk(&canonical) {
                continue;
            }
            let Some(bucket) = self.bucket_for(&canonical) else {
                continue;
            };
            if placed.insert(canonical.clone()) {
                classified.bucket_mut(bucket).push(canonical);
            }
        }

        classified.technical_skills.truncate(self.limits.technical_skills);
        for bucket in [
            SkillBucket::ProgrammingLanguages,
            SkillBucket::Frameworks,
            SkillBucket::Tools,
            SkillBucket::Databases,
        ] {
            classified.bucket_mut(bucket).truncate(self.limits.per_bucket);
        }

        if classified.is_empty() {
            let fallback: Vec<String> = names
                .iter()
                .filter(|n| n.as_str() != SENTINEL && !lexicon::is_output_junk(n))
                .take(self.limits.fallback)
                .cloned()
                .collect();
            classified.technical_skills = if fallback.is_empty() {
                vec![SENTINEL.to_string()]
            } else {
                fallback
            };
        }
        classified
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::tagger::PatternOnlyTagger;

    fn ranked(names: &[&str]) -> Vec<RankedSkill> {
        names
            .iter()
            .map(|n| RankedSkill {
                name: n.to_string(),
                score: 1.0,
            })
            .collect()
    }

    fn with_classifier<F: Fn(&Classifier<'_>)>(f: F) {
        let ontology = Ontology::builtin().unwrap();
        let rules = ValidationRules::default();
        let limits = OutputLimits::default();
        let validator = Validator::new(&ontology, &PatternOnlyTagger, &rules);
        f(&Classifier::new(&ontology, &validator, &rules, &limits));
    }

    #[test]
    fn test_split_compounds() {
        with_classifier(|c| {
            let out = c.split_compounds(&[
                "python and django".to_string(),
                "ci/cd".to_string(),
                "docker kubernetes".to_string(),
                "react native".to_string(),
                "python".to_string(),
            ]);
            assert_eq!(out, vec!["python", "django", "ci", "cd", "docker", "kubernetes", "react native"]);
        });
    }

    #[test]
    fn test_classifies_into_buckets() {
        with_classifier(|c| {
            let out = c.classify(&ranked(&["react", "node.js", "mongodb", "python", "docker", "graphql"]));
            assert_eq!(out.frameworks, vec!["react"]);
            assert_eq!(out.programming_languages, vec!["python"]);
            assert_eq!(out.databases, vec!["mongodb"]);
            assert_eq!(out.tools, vec!["docker"]);
            assert_eq!(out.technical_skills, vec!["node.js", "graphql"]);
            assert!(out.is_partitioned());
        });
    }

    #[test]
    fn test_cross_category_names_land_in_highest_precedence_bucket() {
        with_classifier(|c| {
            let out = c.classify(&ranked(&["firebase", "aws"]));
            assert_eq!(out.databases, vec!["firebase"]);
            assert_eq!(out.tools, vec!["aws"]);
        });
    }

    #[test]
    fn test_bucket_caps() {
        with_classifier(|c| {
            let languages = [
                "python", "java", "javascript", "typescript", "c++", "c#", "go", "rust", "ruby", "php",
                "swift", "kotlin",
            ];
            let out = c.classify(&ranked(&languages));
            assert_eq!(out.programming_languages.len(), 10);
            assert_eq!(out.programming_languages[0], "python");
        });
    }

    #[test]
    fn test_empty_and_sentinel_input_yield_general() {
        with_classifier(|c| {
            assert_eq!(c.classify(&[]).technical_skills, vec![SENTINEL]);
            assert_eq!(c.classify(&ranked(&[SENTINEL])).technical_skills, vec![SENTINEL]);
        });
    }
}
