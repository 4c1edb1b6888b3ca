//! Text Sanitizer: strips contact details, dates, junk words and non-technical named entities
//! before candidate generation, and job-posting boilerplate before job-description extraction.
//!
//! Both passes are line-preserving: the output has exactly as many lines as the input, so the
//! section map computed over the original text still indexes the sanitized one.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::extraction::lexicon::{self, JUNK_PATTERNS, SOURCE_SITES};
use crate::extraction::ontology::Ontology;
use crate::extraction::tagger::{EntityLabel, Tagger};

// ────────────────────────────────────────────────────────────────────────────
// Patterns
// ────────────────────────────────────────────────────────────────────────────

pub(crate) static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("email regex")
});

pub(crate) static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?1[-.\s]?)?\(?\b\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}\b").expect("phone regex")
});

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:https?://|www\.)\S+").expect("url regex"));

static PROFILE_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:github|linkedin|twitter)\.com/\S+").expect("profile path regex")
});

static STREET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b\d+\s+[A-Za-z]+\s+(?:street|st|avenue|ave|road|rd|boulevard|blvd|lane|ln|drive|dr|court|ct)\b\.?",
    )
    .expect("street regex")
});

static STATE_ZIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{2}\s+\d{5}(?:-\d{4})?\b").expect("state zip regex"));

static ZIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{5}(?:-\d{4})?\b").expect("zip regex"));

static JUNK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b(?:{})\b", JUNK_PATTERNS.join("|"))).expect("junk regex")
});

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d+\b").expect("number regex"));

static SPACES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").expect("spaces regex"));

/// Job-posting template blocks. Paragraph patterns run to the next blank line.
static BOILERPLATE_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    let paragraph = r"[^\n]*(?:\n[^\n]+)*";
    let line = r"[^\n]*";
    let patterns = [
        format!(r"(?i)\b(?:arc\.dev|toptal|roadmap\.sh|upwork){paragraph}"),
        format!(r"(?i)\b(?:job title|location|position type|employment type|salary range|compensation):{line}"),
        format!(r"(?i)\babout us\b{paragraph}"),
        format!(r"(?i)\bwhy join{paragraph}"),
        format!(r"(?i)\b(?:we offer|benefits include|competitive salary|compensation package|flexible work){paragraph}"),
        format!(r"(?i)\b(?:equal opportunity employer|eeo statement|diversity statement){paragraph}"),
        format!(r"(?i)\b(?:to apply|how to apply|application process|submit your|send resume){paragraph}"),
        format!(r"(?i)\b(?:key components to customize|tech stack update|experience level adjust|company culture add){paragraph}"),
        r"\[[^\]\n]*\]".to_string(),
        r"\{[^}\n]*\}".to_string(),
        r"(?i)\b(?:insert|add|update|adjust|customize)\b[^\n]*?\b(?:here|below)\b".to_string(),
        r"(?i)\b(?:company name|brief description)\b".to_string(),
        r"(?i)\bcity\b[^\n]*?\bstate\b".to_string(),
    ];
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("boilerplate regex"))
        .collect()
});

static SOURCE_SITE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives: Vec<String> = SOURCE_SITES.iter().map(|s| regex::escape(s)).collect();
    Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives.join("|"))).expect("source site regex")
});

/// Replacement that keeps only the newlines of the match.
fn keep_newlines(caps: &Captures<'_>) -> String {
    let removed = &caps[0];
    let newlines = removed.matches('\n').count();
    if newlines == 0 {
        " ".to_string()
    } else {
        "\n".repeat(newlines)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sanitizer
// ────────────────────────────────────────────────────────────────────────────

/// Removes contact details, junk words, non-technical entities and standalone numbers.
/// Ontology surfaces are never removed.
pub fn sanitize(text: &str, ontology: &Ontology, tagger: &dyn Tagger) -> String {
    text.split('\n')
        .map(|line| sanitize_line(line, ontology, tagger))
        .collect::<Vec<_>>()
        .join("\n")
}

fn sanitize_line(line: &str, ontology: &Ontology, tagger: &dyn Tagger) -> String {
    let mut out = line.to_string();
    for re in [
        &*EMAIL_RE,
        &*URL_RE,
        &*PROFILE_PATH_RE,
        &*PHONE_RE,
        &*STREET_RE,
        &*STATE_ZIP_RE,
        &*ZIP_RE,
        &*JUNK_RE,
    ] {
        out = re.replace_all(&out, " ").into_owned();
    }

    if let Some(entities) = tagger.named_entities(&out) {
        let mut blanked = out.clone().into_bytes();
        for entity in entities {
            if !should_drop_entity(&entity.text, entity.label, ontology) {
                continue;
            }
            for b in &mut blanked[entity.start..entity.end] {
                *b = b' ';
            }
        }
        // Only ASCII spaces are written, over whole spans taken from char boundaries.
        out = String::from_utf8(blanked).unwrap_or(out);
    }

    out = NUMBER_RE.replace_all(&out, " ").into_owned();
    SPACES_RE.replace_all(out.trim(), " ").into_owned()
}

fn should_drop_entity(text: &str, label: EntityLabel, ontology: &Ontology) -> bool {
    let lower = text.to_lowercase();
    if ontology.is_known(&lower) {
        return false;
    }
    match label {
        EntityLabel::Person | EntityLabel::Date => true,
        EntityLabel::Gpe | EntityLabel::Loc => true,
        EntityLabel::Org => !lower.split_whitespace().any(lexicon::is_tech_org) && !lexicon::is_tech_org(&lower),
        EntityLabel::Cardinal => false,
    }
}

/// Removes recruiting boilerplate and template placeholders from a job description.
pub fn strip_jd_boilerplate(text: &str) -> String {
    let mut out = text.to_string();
    for re in BOILERPLATE_RES.iter() {
        out = re.replace_all(&out, keep_newlines).into_owned();
    }
    SOURCE_SITE_RE.replace_all(&out, " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::tagger::{LexiconTagger, PatternOnlyTagger};

    fn ontology() -> Ontology {
        Ontology::builtin().unwrap()
    }

    #[test]
    fn test_removes_contact_details() {
        let o = ontology();
        let text = "jane.doe@example.com | (555) 123-4567 | https://janedoe.dev | github.com/janedoe";
        let out = sanitize(text, &o, &PatternOnlyTagger);
        assert!(!out.contains('@'));
        assert!(!out.contains("555"));
        assert!(!out.contains("janedoe"));
    }

    #[test]
    fn test_removes_addresses_and_postcodes() {
        let o = ontology();
        let out = sanitize("221 Baker Street, Springfield IL 62704", &o, &PatternOnlyTagger);
        assert!(!out.contains("221"));
        assert!(!out.contains("62704"));
        assert!(!out.to_lowercase().contains("street"));
    }

    #[test]
    fn test_removes_junk_words_and_numbers_but_keeps_single_letters() {
        let o = ontology();
        let out = sanitize("Intern, June 2021 - Present: built tools in R and C", &o, &PatternOnlyTagger);
        assert!(!out.to_lowercase().contains("intern"));
        assert!(!out.contains("June"));
        assert!(!out.contains("2021"));
        assert!(!out.contains("Present"));
        assert!(out.contains(" R "));
        assert!(out.ends_with(" C"));
    }

    #[test]
    fn test_entities_are_dropped_unless_technical() {
        let o = ontology();
        let out = sanitize(
            "John Smith, San Francisco. Worked at Acme Solutions and Google with Kubernetes",
            &o,
            &LexiconTagger,
        );
        assert!(!out.contains("John"));
        assert!(!out.contains("Francisco"));
        assert!(!out.contains("Acme"));
        assert!(out.contains("Google"));
        assert!(out.contains("Kubernetes"));
    }

    #[test]
    fn test_sanitize_is_line_preserving() {
        let o = ontology();
        let text = "Jane Doe\njane@x.io\n\nSKILLS\nPython, Docker\n12345";
        for tagger in [&LexiconTagger as &dyn Tagger, &PatternOnlyTagger] {
            let out = sanitize(text, &o, tagger);
            assert_eq!(out.split('\n').count(), text.split('\n').count());
            assert_eq!(out.split('\n').nth(4), Some("Python, Docker"));
        }
    }

    #[test]
    fn test_strip_jd_boilerplate_keeps_requirements() {
        let text = "Job Title: Backend Engineer\nLocation: Remote\n\nRequirements\nPython and PostgreSQL\n\nAbout us\nWe are a fast growing startup.\nWe love Rust.\n\nBenefits\n[Insert perks]";
        let out = strip_jd_boilerplate(text);
        assert_eq!(out.split('\n').count(), text.split('\n').count());
        assert!(out.contains("Python and PostgreSQL"));
        assert!(!out.contains("Backend Engineer"));
        assert!(!out.contains("startup"));
        assert!(!out.contains("Rust"));
        assert!(!out.contains("Insert"));
    }

    #[test]
    fn test_strip_jd_boilerplate_removes_source_sites() {
        let out = strip_jd_boilerplate("Posted via LinkedIn and Indeed: Django developer");
        assert!(!out.contains("LinkedIn"));
        assert!(!out.contains("Indeed"));
        assert!(out.contains("Django"));
    }
}
