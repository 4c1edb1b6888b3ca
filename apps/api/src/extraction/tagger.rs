//! Linguistic tagging capability.
//!
//! The engine never depends on a particular NLP backend: it asks a `Tagger` for part-of-speech
//! tags, named entities and noun chunks, and falls back to pattern-only paths whenever the
//! tagger answers `None`. The backend is picked once at startup.

use std::str::FromStr;
use std::sync::Arc;

// ────────────────────────────────────────────────────────────────────────────
// Capability
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosTag {
    Noun,
    ProperNoun,
    Verb,
    Adjective,
    Adverb,
    Determiner,
    Preposition,
    Conjunction,
    Pronoun,
    Numeral,
    Punctuation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    pub text: String,
    /// Byte offsets into the tagged text.
    pub start: usize,
    pub end: usize,
    pub tag: PosTag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityLabel {
    Person,
    Gpe,
    Loc,
    Org,
    Date,
    Cardinal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySpan {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub label: EntityLabel,
}

/// Optional linguistic analysis. Every method may decline with `None`.
pub trait Tagger: Send + Sync {
    fn name(&self) -> &'static str;
    fn pos_tags(&self, text: &str) -> Option<Vec<TaggedToken>>;
    fn named_entities(&self, text: &str) -> Option<Vec<EntitySpan>>;
    fn noun_chunks(&self, text: &str) -> Option<Vec<String>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaggerBackend {
    Lexicon,
    Pattern,
}

impl TaggerBackend {
    pub fn build(self) -> Arc<dyn Tagger> {
        match self {
            TaggerBackend::Lexicon => Arc::new(LexiconTagger),
            TaggerBackend::Pattern => Arc::new(PatternOnlyTagger),
        }
    }
}

impl FromStr for TaggerBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lexicon" => Ok(TaggerBackend::Lexicon),
            "pattern" | "none" => Ok(TaggerBackend::Pattern),
            other => Err(format!("unknown tagger backend '{other}' (expected 'lexicon' or 'pattern')")),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pattern-only
// ────────────────────────────────────────────────────────────────────────────

/// Offers nothing; the engine runs on patterns and the ontology alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternOnlyTagger;

impl Tagger for PatternOnlyTagger {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn pos_tags(&self, _text: &str) -> Option<Vec<TaggedToken>> {
        None
    }

    fn named_entities(&self, _text: &str) -> Option<Vec<EntitySpan>> {
        None
    }

    fn noun_chunks(&self, _text: &str) -> Option<Vec<String>> {
        None
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Lexicon tagger
// ────────────────────────────────────────────────────────────────────────────

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "each", "every", "some", "any", "all",
    "no", "several", "many",
];
const PREPOSITIONS: &[&str] = &[
    "in", "on", "at", "of", "for", "with", "by", "from", "to", "into", "over", "under", "about",
    "across", "through", "during", "between", "via", "within", "without", "as", "per",
];
const CONJUNCTIONS: &[&str] = &["and", "or", "but", "nor", "yet", "so", "while", "plus"];
const PRONOUNS: &[&str] = &[
    "i", "me", "my", "we", "us", "our", "you", "your", "he", "him", "his", "she", "her", "it",
    "its", "they", "them", "their", "who", "which",
];
const BASE_VERBS: &[&str] = &[
    "is", "are", "was", "were", "be", "been", "have", "has", "had", "do", "does", "did", "will",
    "would", "can", "could", "should", "must", "may", "might", "build", "develop", "use",
    "design", "create", "implement", "manage", "lead", "write", "maintain", "deploy", "ensure",
    "collaborate", "participate", "apply", "join", "improve", "optimize", "own", "drive",
    "deliver", "mentor", "integrate", "architect", "wrote", "led", "built", "made", "ran",
];
const ADJECTIVES: &[&str] = &[
    "strong", "excellent", "good", "great", "new", "modern", "senior", "junior", "scalable",
    "robust", "fast", "high", "low", "large", "small", "best", "better", "clean", "solid",
    "deep", "hands-on", "proficient", "familiar", "remote", "hybrid", "full", "various",
    "multiple", "responsive", "reusable", "efficient",
];
const ADJECTIVE_SUFFIXES: &[&str] = &["ive", "ful", "ous", "able", "ible"];

const FIRST_NAMES: &[&str] = &[
    "john", "jane", "james", "mary", "michael", "sarah", "david", "emily", "robert", "jessica",
    "william", "ashley", "daniel", "olivia", "matthew", "emma", "christopher", "sophia",
    "andrew", "anna", "joseph", "laura", "thomas", "maria", "alex", "priya", "rahul", "amit",
    "neha", "arjun", "ananya", "rohan", "sneha", "vikram", "pooja", "wei", "li", "chen",
    "mohammed", "ahmed", "fatima", "carlos", "sofia", "lucas", "ethan", "noah", "liam", "ava",
];
const PLACES: &[&str] = &[
    "new york", "san francisco", "los angeles", "seattle", "austin", "boston", "chicago",
    "denver", "atlanta", "miami", "dallas", "houston", "london", "berlin", "paris", "toronto",
    "vancouver", "sydney", "singapore", "dubai", "tokyo", "bangalore", "bengaluru", "mumbai",
    "delhi", "new delhi", "hyderabad", "chennai", "pune", "kolkata", "india", "usa",
    "united states", "canada", "germany", "france", "uk", "united kingdom", "australia",
    "california", "texas", "washington", "florida", "massachusetts", "illinois",
];
const REGIONS: &[&str] = &[
    "bay area", "silicon valley", "europe", "asia", "north america", "middle east", "east coast",
    "west coast", "latin america",
];
const STATE_CODES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY",
];
const ORG_SUFFIXES: &[&str] = &[
    "inc", "corp", "corporation", "llc", "ltd", "technologies", "solutions", "systems", "labs",
    "software", "university", "college", "institute", "bank", "group", "consulting",
];
const KNOWN_COMPANIES: &[&str] = &[
    "google", "microsoft", "amazon", "meta", "facebook", "netflix", "apple", "ibm", "oracle",
    "infosys", "accenture", "deloitte", "tcs", "wipro", "cognizant", "capgemini", "uber",
    "airbnb", "stripe", "salesforce", "adobe", "intel", "nvidia", "github", "gitlab",
];
const MONTHS: &[&str] = &[
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep",
    "sept", "oct", "nov", "dec",
];

/// Rule- and gazetteer-based tagger. Deterministic and dependency-free.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconTagger;

/// A raw token with byte offsets.
#[derive(Debug, Clone, Copy)]
struct Span<'a> {
    text: &'a str,
    start: usize,
    end: usize,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '+' || c == '#' || c == '_'
}

/// Splits into word tokens (keeping `node.js`, `c++` and `front-end` intact when a `.` or `-`
/// sits between alphanumerics) and single-character punctuation tokens.
fn tokenize(text: &str) -> Vec<Span<'_>> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut spans = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let (start, c) = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }
        if !is_word_char(c) {
            let end = start + c.len_utf8();
            spans.push(Span { text: &text[start..end], start, end });
            i += 1;
            continue;
        }
        let mut j = i;
        while j < chars.len() {
            let ch = chars[j].1;
            if is_word_char(ch) {
                j += 1;
                continue;
            }
            let joiner = ch == '.' || ch == '-';
            let next_alnum = chars.get(j + 1).map(|(_, n)| n.is_alphanumeric()).unwrap_or(false);
            let prev_alnum = j > i && chars[j - 1].1.is_alphanumeric();
            if joiner && next_alnum && prev_alnum {
                j += 1;
                continue;
            }
            break;
        }
        let end = chars.get(j).map(|(b, _)| *b).unwrap_or(text.len());
        spans.push(Span { text: &text[start..end], start, end });
        i = j;
    }
    spans
}

fn is_capitalized(word: &str) -> bool {
    word.chars().next().map(|c| c.is_uppercase()).unwrap_or(false)
}

fn is_numeric(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',')
        && word.chars().any(|c| c.is_ascii_digit())
}

fn tag_word(word: &str) -> PosTag {
    if !word.chars().any(is_word_char) {
        return PosTag::Punctuation;
    }
    if is_numeric(word) {
        return PosTag::Numeral;
    }
    let lower = word.to_lowercase();
    let w = lower.as_str();
    if DETERMINERS.contains(&w) {
        PosTag::Determiner
    } else if PREPOSITIONS.contains(&w) {
        PosTag::Preposition
    } else if CONJUNCTIONS.contains(&w) {
        PosTag::Conjunction
    } else if PRONOUNS.contains(&w) {
        PosTag::Pronoun
    } else if BASE_VERBS.contains(&w) || crate::extraction::lexicon::is_action_verb(w) {
        PosTag::Verb
    } else if ADJECTIVES.contains(&w) {
        PosTag::Adjective
    } else if w.len() > 4 && w.ends_with("ly") {
        PosTag::Adverb
    } else if w.len() > 4 && (w.ends_with("ing") || w.ends_with("ed")) {
        PosTag::Verb
    } else if w.len() > 5 && ADJECTIVE_SUFFIXES.iter().any(|s| w.ends_with(s)) {
        PosTag::Adjective
    } else if is_capitalized(word) {
        PosTag::ProperNoun
    } else {
        PosTag::Noun
    }
}

/// Longest gazetteer entry starting at token `i`, as a token count.
fn gazetteer_len(gazetteer: &[&str], tokens: &[Span<'_>], i: usize) -> usize {
    for n in (1..=3).rev() {
        if i + n > tokens.len() {
            continue;
        }
        let joined = tokens[i..i + n]
            .iter()
            .map(|t| t.text.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");
        if gazetteer.contains(&joined.as_str()) {
            return n;
        }
    }
    0
}

impl LexiconTagger {
    fn entity(text: &str, tokens: &[Span<'_>], from: usize, to: usize, label: EntityLabel) -> EntitySpan {
        let start = tokens[from].start;
        let end = tokens[to - 1].end;
        EntitySpan {
            text: text[start..end].to_string(),
            start,
            end,
            label,
        }
    }
}

impl Tagger for LexiconTagger {
    fn name(&self) -> &'static str {
        "lexicon"
    }

    fn pos_tags(&self, text: &str) -> Option<Vec<TaggedToken>> {
        Some(
            tokenize(text)
                .into_iter()
                .map(|s| TaggedToken {
                    text: s.text.to_string(),
                    start: s.start,
                    end: s.end,
                    tag: tag_word(s.text),
                })
                .collect(),
        )
    }

    fn named_entities(&self, text: &str) -> Option<Vec<EntitySpan>> {
        let tokens = tokenize(text);
        let mut entities = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            let tok = tokens[i].text;
            let lower = tok.to_lowercase();

            let places = gazetteer_len(PLACES, &tokens, i);
            if places > 0 {
                entities.push(Self::entity(text, &tokens, i, i + places, EntityLabel::Gpe));
                i += places;
                continue;
            }
            let regions = gazetteer_len(REGIONS, &tokens, i);
            if regions > 0 {
                entities.push(Self::entity(text, &tokens, i, i + regions, EntityLabel::Loc));
                i += regions;
                continue;
            }

            if tok.len() == 2 && STATE_CODES.contains(&tok) && i > 0 && tokens[i - 1].text == "," {
                entities.push(Self::entity(text, &tokens, i, i + 1, EntityLabel::Gpe));
                i += 1;
                continue;
            }

            if is_capitalized(tok) && FIRST_NAMES.contains(&lower.as_str()) {
                let mut j = i + 1;
                while j < tokens.len()
                    && j < i + 3
                    && is_capitalized(tokens[j].text)
                    && tokens[j].text.chars().all(char::is_alphabetic)
                    && gazetteer_len(PLACES, &tokens, j) == 0
                {
                    j += 1;
                }
                if j > i + 1 {
                    entities.push(Self::entity(text, &tokens, i, j, EntityLabel::Person));
                    i = j;
                    continue;
                }
            }

            if is_capitalized(tok) && tok.chars().all(char::is_alphanumeric) {
                // Capitalised run ending in an organisation suffix.
                let mut j = i;
                while j < tokens.len() && j < i + 4 && is_capitalized(tokens[j].text) {
                    j += 1;
                }
                let suffix_at = (i..j).find(|&k| {
                    k > i && ORG_SUFFIXES.contains(&tokens[k].text.trim_end_matches('.').to_lowercase().as_str())
                });
                if let Some(k) = suffix_at {
                    entities.push(Self::entity(text, &tokens, i, k + 1, EntityLabel::Org));
                    i = k + 1;
                    continue;
                }
                if KNOWN_COMPANIES.contains(&lower.as_str()) {
                    entities.push(Self::entity(text, &tokens, i, i + 1, EntityLabel::Org));
                    i += 1;
                    continue;
                }
            }

            if MONTHS.contains(&lower.as_str()) && is_capitalized(tok) {
                let mut j = i + 1;
                if j < tokens.len() && tokens[j].text.len() == 4 && is_numeric(tokens[j].text) {
                    j += 1;
                }
                entities.push(Self::entity(text, &tokens, i, j, EntityLabel::Date));
                i = j;
                continue;
            }

            if is_numeric(tok) {
                let label = match tok.parse::<u32>() {
                    Ok(year) if tok.len() == 4 && (1950..2040).contains(&year) => EntityLabel::Date,
                    _ => EntityLabel::Cardinal,
                };
                entities.push(Self::entity(text, &tokens, i, i + 1, label));
            }
            i += 1;
        }
        Some(entities)
    }

    fn noun_chunks(&self, text: &str) -> Option<Vec<String>> {
        let tagged = self.pos_tags(text)?;
        let mut chunks = Vec::new();
        let mut run: Vec<&TaggedToken> = Vec::new();

        let mut flush = |run: &mut Vec<&TaggedToken>| {
            // A chunk needs a nominal head; trailing modifiers are dropped.
            while run
                .last()
                .map(|t| !matches!(t.tag, PosTag::Noun | PosTag::ProperNoun))
                .unwrap_or(false)
            {
                run.pop();
            }
            if !run.is_empty() {
                let keep = run.len().saturating_sub(4);
                let words: Vec<&str> = run[keep..].iter().map(|t| t.text.as_str()).collect();
                chunks.push(words.join(" "));
            }
            run.clear();
        };

        for token in &tagged {
            match token.tag {
                PosTag::Noun | PosTag::ProperNoun | PosTag::Adjective | PosTag::Numeral => run.push(token),
                _ => flush(&mut run),
            }
        }
        flush(&mut run);
        Some(chunks)
    }
}
