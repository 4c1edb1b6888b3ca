//! Ontology Store: canonical technology names, their categories and the alias table.
//!
//! Built once at startup and shared read-only across requests. Construction validates the
//! alias table so that `canonicalize` is a total, idempotent function; any violation is an
//! `EngineError` and aborts startup.

use std::collections::{HashMap, HashSet};

use aho_corasick::{AhoCorasick, Input, MatchKind};
use serde::{Deserialize, Serialize};

use crate::errors::EngineError;
use crate::extraction::ontology_data::{AMBIGUOUS_SURFACES, BUILTIN_TERMS};

// ────────────────────────────────────────────────────────────────────────────
// Taxonomy
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Language,
    Framework,
    Library,
    Database,
    CloudTool,
    DevTool,
    BuildTool,
    VcsTool,
    TestTool,
    Concept,
}

impl Category {
    /// Output list a term of this category is reported under.
    pub fn bucket(self) -> SkillBucket {
        match self {
            Category::Language => SkillBucket::ProgrammingLanguages,
            Category::Framework => SkillBucket::Frameworks,
            Category::Database => SkillBucket::Databases,
            Category::CloudTool
            | Category::DevTool
            | Category::BuildTool
            | Category::VcsTool
            | Category::TestTool => SkillBucket::Tools,
            Category::Library | Category::Concept => SkillBucket::TechnicalSkills,
        }
    }
}

/// The five output lists of a classified document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillBucket {
    TechnicalSkills,
    ProgrammingLanguages,
    Frameworks,
    Tools,
    Databases,
}

impl SkillBucket {
    pub const ALL: [SkillBucket; 5] = [
        SkillBucket::TechnicalSkills,
        SkillBucket::ProgrammingLanguages,
        SkillBucket::Frameworks,
        SkillBucket::Tools,
        SkillBucket::Databases,
    ];

    /// database > framework > language > tool > generic technical skill
    pub fn precedence(self) -> u8 {
        match self {
            SkillBucket::Databases => 4,
            SkillBucket::Frameworks => 3,
            SkillBucket::ProgrammingLanguages => 2,
            SkillBucket::Tools => 1,
            SkillBucket::TechnicalSkills => 0,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Store
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OntologyEntry {
    pub canonical: String,
    pub category: Category,
}

/// A searchable surface form (canonical name or alias).
#[derive(Debug, Clone)]
pub struct Surface {
    pub text: String,
    pub canonical: String,
    pub ambiguous: bool,
}

/// One term as declared in an ontology file.
#[derive(Debug, Clone, Deserialize)]
pub struct TermSpec {
    pub canonical: String,
    pub category: Category,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// JSON layout accepted by `Ontology::from_json`.
#[derive(Debug, Clone, Deserialize)]
pub struct OntologyFile {
    pub terms: Vec<TermSpec>,
    #[serde(default)]
    pub ambiguous: Vec<String>,
}

#[derive(Debug)]
pub struct Ontology {
    entries: Vec<OntologyEntry>,
    categories: HashMap<String, Vec<Category>>,
    aliases: HashMap<String, String>,
    surfaces: Vec<Surface>,
    surface_index: HashMap<String, usize>,
    words: HashSet<String>,
    anchor_words: Vec<String>,
    /// One automaton over every surface; pattern ids index `surfaces`.
    matcher: AhoCorasick,
}

/// A surface found in a line: byte range plus the matched surface.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceHit<'a> {
    pub start: usize,
    pub end: usize,
    pub surface: &'a Surface,
}

/// Characters that continue a technology token (`c++`, `c#`, `snake_case`).
pub(crate) fn joins_word(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '+' | '#')
}

/// Whole-term check for `haystack[start..end]`. `+`, `#` and a `.` followed by an
/// alphanumeric count as word characters, so `js` never matches inside `node.js` and `c`
/// never inside `c++`.
fn on_term_boundary(haystack: &str, start: usize, end: usize) -> bool {
    let term = &haystack[start..end];
    let before = haystack[..start].chars().next_back();
    let mut after = haystack[end..].chars();
    let next = after.next();
    let next_next = after.next();

    let left_ok = match before {
        None => true,
        Some('.') => !term.starts_with(|c: char| c.is_alphanumeric()),
        Some(c) => !joins_word(c),
    };
    let right_ok = match next {
        None => true,
        Some('.') => !next_next.map(char::is_alphanumeric).unwrap_or(false),
        Some(c) => !joins_word(c),
    };
    left_ok && right_ok
}

/// Lowercases, trims and collapses internal whitespace.
pub fn normalize_phrase(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

impl Ontology {
    /// The compiled-in technology table.
    pub fn builtin() -> Result<Self, EngineError> {
        let specs: Vec<TermSpec> = BUILTIN_TERMS
            .iter()
            .flat_map(|(category, rows)| {
                rows.iter().map(move |(canonical, aliases)| TermSpec {
                    canonical: canonical.to_string(),
                    category: *category,
                    aliases: aliases.iter().map(|a| a.to_string()).collect(),
                })
            })
            .collect();
        let ambiguous: Vec<String> = AMBIGUOUS_SURFACES.iter().map(|s| s.to_string()).collect();
        Self::from_specs(specs, &ambiguous)
    }

    /// Loads a replacement table from JSON (see `OntologyFile`).
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let file: OntologyFile = serde_json::from_str(json)?;
        Self::from_specs(file.terms, &file.ambiguous)
    }

    pub fn from_specs(specs: Vec<TermSpec>, ambiguous: &[String]) -> Result<Self, EngineError> {
        if specs.is_empty() {
            return Err(EngineError::EmptyOntology);
        }

        // Pass 1: canonical names and their categories.
        let mut entries = Vec::new();
        let mut categories: HashMap<String, Vec<Category>> = HashMap::new();
        for spec in &specs {
            check_surface(&spec.canonical, &spec.canonical)?;
            let cats = categories.entry(spec.canonical.clone()).or_default();
            if !cats.contains(&spec.category) {
                cats.push(spec.category);
                entries.push(OntologyEntry {
                    canonical: spec.canonical.clone(),
                    category: spec.category,
                });
            }
        }

        // Pass 2: aliases. Every alias must target a canonical and must not shadow one.
        let mut aliases: HashMap<String, String> = HashMap::new();
        for spec in &specs {
            for alias in &spec.aliases {
                check_surface(alias, &spec.canonical)?;
                if *alias == spec.canonical {
                    continue;
                }
                if categories.contains_key(alias) {
                    return Err(EngineError::AliasShadowsCanonical {
                        alias: alias.clone(),
                        canonical: spec.canonical.clone(),
                    });
                }
                match aliases.get(alias) {
                    Some(existing) if *existing != spec.canonical => {
                        return Err(EngineError::ConflictingAlias {
                            surface: alias.clone(),
                            first: existing.clone(),
                            second: spec.canonical.clone(),
                        });
                    }
                    Some(_) => {}
                    None => {
                        aliases.insert(alias.clone(), spec.canonical.clone());
                    }
                }
            }
        }

        // Searchable surfaces in declaration order, canonical first.
        let mut surfaces = Vec::new();
        let mut surface_index = HashMap::new();
        for spec in &specs {
            let forms = std::iter::once(&spec.canonical).chain(spec.aliases.iter());
            for form in forms {
                if surface_index.contains_key(form) {
                    continue;
                }
                surface_index.insert(form.clone(), surfaces.len());
                surfaces.push(Surface {
                    text: form.clone(),
                    canonical: spec.canonical.clone(),
                    ambiguous: false,
                });
            }
        }
        for surface in ambiguous {
            let idx = surface_index
                .get(surface)
                .copied()
                .ok_or_else(|| EngineError::UnknownAmbiguousSurface(surface.clone()))?;
            surfaces[idx].ambiguous = true;
        }

        let mut words = HashSet::new();
        for surface in &surfaces {
            let parts: Vec<&str> = surface.text.split(' ').collect();
            for part in &parts {
                let numeric = part.chars().all(|c| c.is_ascii_digit());
                if numeric || (part.len() < 2 && parts.len() > 1) {
                    continue;
                }
                words.insert(part.to_string());
            }
        }
        let mut anchor_words: Vec<String> = words.iter().filter(|w| w.len() >= 3).cloned().collect();
        anchor_words.sort();

        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(surfaces.iter().map(|s| s.text.as_str()))
            .map_err(|e| EngineError::Matcher(e.to_string()))?;

        Ok(Self {
            entries,
            categories,
            aliases,
            surfaces,
            surface_index,
            words,
            anchor_words,
            matcher,
        })
    }

    pub fn entries(&self) -> &[OntologyEntry] {
        &self.entries
    }

    /// Non-overlapping whole-term surface matches in `haystack`, leftmost-longest first.
    /// A match that fails the term boundary, or an ambiguous surface when
    /// `include_ambiguous` is false, is dropped and the search resumes one character later
    /// so a shorter surface at the next position can still match.
    pub fn find_surfaces(&self, haystack: &str, include_ambiguous: bool) -> Vec<SurfaceHit<'_>> {
        let mut hits = Vec::new();
        let mut pos = 0;
        while pos < haystack.len() {
            let Some(m) = self.matcher.find(Input::new(haystack).span(pos..haystack.len())) else {
                break;
            };
            let surface = &self.surfaces[m.pattern().as_usize()];
            if on_term_boundary(haystack, m.start(), m.end()) && (include_ambiguous || !surface.ambiguous) {
                hits.push(SurfaceHit {
                    start: m.start(),
                    end: m.end(),
                    surface,
                });
                pos = m.end();
            } else {
                let step = haystack[m.start()..].chars().next().map(char::len_utf8).unwrap_or(1);
                pos = m.start() + step;
            }
        }
        hits
    }

    pub fn alias_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(a, c)| (a.as_str(), c.as_str()))
    }

    /// Maps any phrase to its canonical name; phrases outside the alias table map to their
    /// normalized form. Idempotent.
    pub fn canonicalize(&self, phrase: &str) -> String {
        let normalized = normalize_phrase(phrase);
        match self.aliases.get(&normalized) {
            Some(canonical) => canonical.clone(),
            None => normalized,
        }
    }

    pub fn is_canonical(&self, name: &str) -> bool {
        self.categories.contains_key(name)
    }

    /// True when the phrase is a listed surface or resolves to a canonical name.
    pub fn is_known(&self, phrase: &str) -> bool {
        let normalized = normalize_phrase(phrase);
        self.surface_index.contains_key(&normalized) || self.is_canonical(&self.canonicalize(&normalized))
    }

    pub fn is_ambiguous(&self, surface: &str) -> bool {
        self.surface_index
            .get(surface)
            .map(|&idx| self.surfaces[idx].ambiguous)
            .unwrap_or(false)
    }

    /// Every category a canonical name is listed under, in declaration order.
    pub fn categories_of(&self, canonical: &str) -> &[Category] {
        self.categories
            .get(canonical)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The bucket a canonical name finally belongs to: highest precedence across its categories.
    pub fn primary_bucket(&self, canonical: &str) -> Option<SkillBucket> {
        self.categories_of(canonical)
            .iter()
            .map(|c| c.bucket())
            .max_by_key(|b| b.precedence())
    }

    /// True when the token is a word of some ontology surface.
    pub fn contains_word(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    /// Exact word match, or a prefix relation of at least three characters with one.
    pub fn matches_word(&self, token: &str) -> bool {
        if self.words.contains(token) {
            return true;
        }
        if token.len() < 3 {
            return false;
        }
        self.anchor_words
            .iter()
            .any(|w| w.starts_with(token) || token.starts_with(w.as_str()))
    }

    /// Category lookup: exact canonical match, then substring match against canonical
    /// names, then a majority vote across the phrase's words.
    pub fn category_of(&self, phrase: &str, min_substring_len: usize) -> Option<Category> {
        let canonical = self.canonicalize(phrase);
        if let Some(category) = self.primary_category(&canonical) {
            return Some(category);
        }
        if canonical.is_empty() {
            return None;
        }

        let padded = format!(" {canonical} ");
        for entry in &self.entries {
            let term = entry.canonical.as_str();
            if term.len() < min_substring_len {
                continue;
            }
            let term_in_phrase = padded.contains(&format!(" {term} "));
            let phrase_in_term = canonical.len() >= min_substring_len && term.contains(canonical.as_str());
            if term_in_phrase || phrase_in_term {
                return Some(entry.category);
            }
        }

        let words: Vec<&str> = canonical.split(' ').collect();
        if words.len() < 2 {
            return None;
        }
        let mut votes: Vec<(Category, usize)> = Vec::new();
        for word in words {
            if let Some(category) = self.primary_category(&self.canonicalize(word)) {
                match votes.iter_mut().find(|(c, _)| *c == category) {
                    Some((_, n)) => *n += 1,
                    None => votes.push((category, 1)),
                }
            }
        }
        votes
            .into_iter()
            .max_by(|(ca, na), (cb, nb)| {
                na.cmp(nb)
                    .then_with(|| ca.bucket().precedence().cmp(&cb.bucket().precedence()))
            })
            .map(|(category, _)| category)
    }

    /// The category whose bucket wins the precedence order.
    pub fn primary_category(&self, canonical: &str) -> Option<Category> {
        self.categories_of(canonical)
            .iter()
            .copied()
            .max_by_key(|c| c.bucket().precedence())
    }
}

fn check_surface(surface: &str, canonical: &str) -> Result<(), EngineError> {
    if surface.trim().is_empty() {
        return Err(EngineError::EmptySurface(canonical.to_string()));
    }
    if normalize_phrase(surface) != surface {
        return Err(EngineError::NotNormalized(surface.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ontology() -> Ontology {
        Ontology::builtin().expect("builtin ontology must validate")
    }

    fn spec(canonical: &str, category: Category, aliases: &[&str]) -> TermSpec {
        TermSpec {
            canonical: canonical.to_string(),
            category,
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn test_builtin_ontology_is_valid() {
        let o = ontology();
        assert!(o.entries().len() > 100);
        assert!(o.is_canonical("react"));
        assert!(o.is_canonical("postgresql"));
    }

    #[test]
    fn test_canonicalize_resolves_aliases() {
        let o = ontology();
        assert_eq!(o.canonicalize("ReactJS"), "react");
        assert_eq!(o.canonicalize("react.js"), "react");
        assert_eq!(o.canonicalize("  React   JS "), "react");
        assert_eq!(o.canonicalize("k8s"), "kubernetes");
        assert_eq!(o.canonicalize("Postgres"), "postgresql");
    }

    #[test]
    fn test_canonicalize_passes_through_unknown_phrases() {
        let o = ontology();
        assert_eq!(o.canonicalize("Quantum  Basket"), "quantum basket");
    }

    #[test]
    fn test_canonicalize_is_a_fixed_point_for_every_surface() {
        let o = ontology();
        for (alias, canonical) in o.alias_pairs() {
            let once = o.canonicalize(alias);
            assert_eq!(once, canonical);
            assert_eq!(o.canonicalize(&once), once, "alias '{alias}' is not idempotent");
        }
        for entry in o.entries() {
            assert_eq!(o.canonicalize(&entry.canonical), entry.canonical);
        }
    }

    #[test]
    fn test_firebase_is_listed_twice_but_buckets_as_database() {
        let o = ontology();
        let cats = o.categories_of("firebase");
        assert!(cats.contains(&Category::Database));
        assert!(cats.contains(&Category::CloudTool));
        assert_eq!(o.primary_bucket("firebase"), Some(SkillBucket::Databases));
    }

    #[test]
    fn test_category_buckets() {
        assert_eq!(Category::CloudTool.bucket(), SkillBucket::Tools);
        assert_eq!(Category::Library.bucket(), SkillBucket::TechnicalSkills);
        assert_eq!(Category::Language.bucket(), SkillBucket::ProgrammingLanguages);
    }

    #[test]
    fn test_category_of_exact_substring_and_vote() {
        let o = ontology();
        assert_eq!(o.category_of("django", 3), Some(Category::Framework));
        assert_eq!(o.category_of("python scripts", 3), Some(Category::Language));
        assert_eq!(o.category_of("postgre", 3), Some(Category::Database));
        assert_eq!(o.category_of("quantum basket", 3), None);
    }

    #[test]
    fn test_short_terms_do_not_substring_match() {
        let o = ontology();
        // "r" and "go" are too short to match inside other words
        assert_eq!(o.category_of("forgotten", 3), None);
    }

    #[test]
    fn test_ambiguous_surfaces_are_flagged() {
        let o = ontology();
        assert!(o.is_ambiguous("go"));
        assert!(o.is_ambiguous("rest"));
        assert!(!o.is_ambiguous("golang"));
        assert!(!o.is_ambiguous("python"));
    }

    #[test]
    fn test_matches_word_exact_and_partial() {
        let o = ontology();
        assert!(o.matches_word("python"));
        assert!(o.matches_word("kubernetes"));
        assert!(o.matches_word("postgre"));
        assert!(!o.matches_word("teamwork"));
        assert!(o.matches_word("djangorest"));
    }

    fn found(o: &Ontology, haystack: &str) -> Vec<(usize, usize, String)> {
        o.find_surfaces(haystack, true)
            .into_iter()
            .map(|h| (h.start, h.end, h.surface.text.clone()))
            .collect()
    }

    #[test]
    fn test_find_surfaces_respects_technology_boundaries() {
        let o = ontology();
        assert_eq!(found(&o, "node.js and express"), vec![
            (0, 7, "node.js".to_string()),
            (12, 19, "express".to_string()),
        ]);
        assert_eq!(found(&o, "i like react."), vec![(7, 12, "react".to_string())]);
        assert_eq!(found(&o, "c++ and c#"), vec![
            (0, 3, "c++".to_string()),
            (8, 10, "c#".to_string()),
        ]);
        assert_eq!(found(&o, "asp.net core"), vec![(0, 7, "asp.net".to_string())]);
        assert_eq!(found(&o, "built on .net"), vec![(9, 13, ".net".to_string())]);
        assert_eq!(found(&o, "golang"), vec![(0, 6, "golang".to_string())]);
        assert!(found(&o, "gopher mongoose").iter().all(|(_, _, t)| t != "go"));
    }

    #[test]
    fn test_find_surfaces_prefers_longest_and_skips_ambiguous_on_request() {
        let o = ontology();
        let texts = |h: &str| -> Vec<String> { found(&o, h).into_iter().map(|(_, _, t)| t).collect() };
        let mobile = texts("mobile apps in react native");
        assert!(mobile.contains(&"react native".to_string()));
        assert!(!mobile.contains(&"react".to_string()));
        let web = texts("web apps with ruby on rails");
        assert!(web.contains(&"ruby on rails".to_string()));
        assert!(!web.contains(&"ruby".to_string()));

        let prose = o.find_surfaces("ready to go and rest", false);
        assert!(prose.iter().all(|h| !h.surface.ambiguous));
        assert!(o.find_surfaces("ready to go and rest", true).iter().any(|h| h.surface.text == "go"));
    }

    #[test]
    fn test_find_surfaces_matches_ascii_case_insensitively() {
        let o = ontology();
        let hits = o.find_surfaces("PostgreSQL and Docker", true);
        let canonicals: Vec<&str> = hits.iter().map(|h| h.surface.canonical.as_str()).collect();
        assert_eq!(canonicals, vec!["postgresql", "docker"]);
    }

    #[test]
    fn test_conflicting_alias_is_rejected() {
        let specs = vec![
            spec("javascript", Category::Language, &["js"]),
            spec("node.js", Category::Concept, &["js"]),
        ];
        let err = Ontology::from_specs(specs, &[]).unwrap_err();
        assert!(matches!(err, EngineError::ConflictingAlias { .. }));
    }

    #[test]
    fn test_alias_shadowing_a_canonical_is_rejected() {
        let specs = vec![
            spec("react", Category::Framework, &[]),
            spec("preact", Category::Framework, &["react"]),
        ];
        let err = Ontology::from_specs(specs, &[]).unwrap_err();
        assert!(matches!(err, EngineError::AliasShadowsCanonical { .. }));
    }

    #[test]
    fn test_unnormalized_surface_is_rejected() {
        let specs = vec![spec("React", Category::Framework, &[])];
        let err = Ontology::from_specs(specs, &[]).unwrap_err();
        assert!(matches!(err, EngineError::NotNormalized(_)));
    }

    #[test]
    fn test_empty_table_and_unknown_ambiguous_are_rejected() {
        assert!(matches!(
            Ontology::from_specs(vec![], &[]).unwrap_err(),
            EngineError::EmptyOntology
        ));
        let specs = vec![spec("rust", Category::Language, &[])];
        let err = Ontology::from_specs(specs, &["go".to_string()]).unwrap_err();
        assert!(matches!(err, EngineError::UnknownAmbiguousSurface(_)));
    }

    #[test]
    fn test_from_json_round_trip() {
        let json = r#"{
            "terms": [
                {"canonical": "rust", "category": "language", "aliases": ["rust lang"]},
                {"canonical": "tokio", "category": "library"}
            ],
            "ambiguous": []
        }"#;
        let o = Ontology::from_json(json).unwrap();
        assert_eq!(o.canonicalize("Rust Lang"), "rust");
        assert_eq!(o.categories_of("tokio"), &[Category::Library]);
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        let err = Ontology::from_json("{not json").unwrap_err();
        assert!(matches!(err, EngineError::InvalidOntologyFile(_)));
    }
}
