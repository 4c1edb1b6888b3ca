//! Profile extras: contact details, experience estimates, job role, education and soft skills.
//!
//! Résumé fields scoped to a section (education, experience, projects) read the lines under
//! that section's heading in the `SectionMap`. Entity-based fields fall back to line rules
//! when the tagger declines.

use std::sync::LazyLock;

use regex::Regex;

use crate::extraction::lexicon::{self, SOFT_SKILLS};
use crate::extraction::ontology::Ontology;
use crate::extraction::sanitizer::{EMAIL_RE, PHONE_RE};
use crate::extraction::sections::{SectionKind, SectionMap};
use crate::extraction::tagger::{EntityLabel, EntitySpan, Tagger};
use crate::models::skills::{EducationEntry, ExperienceEntry};

static YEARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,2})\s*\+?\s*(?:years?|yrs?)\b").expect("years regex"));

static DATE_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b((?:19|20)\d{2})\s*(?:-|to)\s*((?:19|20)\d{2}|present|current|now)\b").expect("date range regex")
});

static ROLE_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*(?:job title|position|role|title)\s*[:\-]\s*([^\n]{3,60})").expect("role regex")
});

static EDUCATION_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)education.*?(?:\n\s*(?:experience|projects|skills|certifications|work)|\z)")
        .expect("education block regex")
});

static DEGREE_RES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (
            r"\b(?:bachelor(?:'?s)?|b\.?a|b\.?s|b\.?sc|b\.?e|b\.?tech)\.?\s+(?:of\s+|in\s+)?(?:engineering|science|technology|arts|computer\s+science)",
            "Bachelor of Engineering",
        ),
        (
            r"\b(?:master(?:'?s)?|m\.?a|m\.?s|m\.?sc|m\.?e|m\.?tech)\.?\s+(?:of\s+|in\s+)?(?:engineering|science|technology|arts|computer\s+science)",
            "Master of Engineering",
        ),
        (r"\b(?:phd|ph\.d|doctorate)\b", "PhD"),
        (r"\b(?:mba|m\.b\.a)\b", "MBA"),
        (r"\bdiploma\b", "Diploma"),
    ]
    .into_iter()
    .map(|(p, name)| (Regex::new(&format!("(?i){p}")).expect("degree regex"), name))
    .collect()
});

static SIMPLE_DEGREE_RES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"\bb\.?\s*tech\b", "Bachelor of Technology"),
        (r"\bb\.\s*e\.?\b", "Bachelor of Engineering"),
        (r"\bb\.?\s*sc?\.?\s+(?:computer|engineering)", "Bachelor of Science"),
        (r"\bm\.?\s*tech\b", "Master of Technology"),
        (r"\bm\.\s*e\.?\b", "Master of Engineering"),
        (r"\bm\.?\s*sc?\.?\s+(?:computer|engineering)", "Master of Science"),
    ]
    .into_iter()
    .map(|(p, name)| (Regex::new(&format!("(?i){p}")).expect("degree regex"), name))
    .collect()
});

static LOCATION_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*(?:location|address|city|place)\s*[:|\-]\s*([^\n]+)").expect("location regex")
});

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:19|20)\d{2}\s*(?:-|to)\s*(?:(?:19|20)\d{2}|present|current|now)\b|\b\d{1,2}\s*\+?\s*(?:years?|yrs?|months?|mos?)\b",
    )
    .expect("duration regex")
});

static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("year regex"));

static THREE_DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{3}").expect("digits regex"));

static TEN_DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{10}").expect("digits regex"));

static FIELD_RES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"(?i)\bcse\b", "Computer Science and Engineering"),
        (r"(?i)\bcomputer science\b", "Computer Science"),
        (r"(?i:\binformation technology\b)|\bIT\b", "Information Technology"),
        (r"(?i)\bece\b", "Electronics and Communication Engineering"),
        (r"(?i)\beee\b", "Electrical and Electronics Engineering"),
        (r"(?i)\bsoftware engineering\b", "Software Engineering"),
        (r"(?i)\bdata science\b", "Data Science"),
        (r"(?i)\bmechanical engineering\b", "Mechanical Engineering"),
        (r"(?i)\bcivil engineering\b", "Civil Engineering"),
        (r"(?i)\belectrical engineering\b", "Electrical Engineering"),
        (r"(?i)\bbusiness administration\b", "Business Administration"),
        (r"(?i)\bmathematics\b", "Mathematics"),
        (r"(?i)\bphysics\b", "Physics"),
        (r"(?i)\bchemistry\b", "Chemistry"),
    ]
    .into_iter()
    .map(|(p, name)| (Regex::new(p).expect("field regex"), name))
    .collect()
});

static ENTRY_DEGREE_RES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"\b(?:bachelor|b\.?s\.?|b\.?a\.?|b\.?e\.?|b\.?tech|btech|bsc)\b", "Bachelor"),
        (r"\b(?:master|m\.?s\.?|m\.?a\.?|m\.?e\.?|m\.?tech|mtech|msc)\b", "Master"),
        (r"\b(?:phd|ph\.d|doctorate)\b", "PhD"),
        (r"\bdiploma\b", "Diploma"),
        (r"\b(?:mba|m\.b\.a)\b", "MBA"),
    ]
    .into_iter()
    .map(|(p, name)| (Regex::new(&format!("(?i){p}")).expect("degree regex"), name))
    .collect()
});

const ROLE_INDICATORS: &[&str] = &["engineer", "developer", "analyst", "manager", "designer", "architect", "scientist"];

const EXPERIENCE_ROLE_INDICATORS: &[&str] = &[
    "engineer", "developer", "analyst", "scientist", "manager", "architect", "designer",
    "administrator", "lead", "specialist", "consultant", "coordinator", "associate", "intern",
    "trainee", "programmer",
];

const EDUCATION_WORDS: &[&str] = &["university", "college", "institute", "school", "academy"];

const FIELD_WORDS: &[&str] = &[
    "computer science", "information technology", "engineering", "business", "science", "arts",
    "cse", "ece", "eee", "mechanical", "civil", "electrical",
];

const CERTIFICATION_WORDS: &[&str] = &[
    "certified", "certification", "certificate", "credential", "comptia", "cisco",
];

/// Words that end a free-text location ("Pune, India | Backend Developer").
const LOCATION_STOP_WORDS: &[&str] = &[
    "passionate", "developer", "engineer", "designer", "analyst", "architect", "software",
    "frontend", "backend", "experience", "skilled", "summary", "profile", "resume", "cv",
];

const NAME_NOISE: &[&str] = &["summary", "profile", "passionate", "enthusiastic", "resume", "curriculum"];

const MAX_FIELDS: usize = 3;
const MAX_INSTITUTIONS: usize = 3;
const MAX_EDUCATION_ENTRIES: usize = 3;
const MAX_LIST_ITEMS: usize = 5;

pub fn extract_email(text: &str) -> String {
    EMAIL_RE
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// First phone number, reduced to its last ten digits.
pub fn extract_phone(text: &str) -> String {
    let Some(found) = PHONE_RE.find(text) else {
        return String::new();
    };
    let digits: String = found.as_str().chars().filter(char::is_ascii_digit).collect();
    if digits.len() >= 10 {
        digits[digits.len() - 10..].to_string()
    } else {
        found.as_str().to_string()
    }
}

/// Largest explicit "N years", else the summed length of year ranges (open ranges end at
/// `current_year`). Empty when nothing is found.
pub fn estimate_experience_years(text: &str, current_year: i32) -> String {
    let explicit = YEARS_RE
        .captures_iter(text)
        .filter_map(|c| c[1].parse::<u32>().ok())
        .max();
    if let Some(years) = explicit {
        return years.to_string();
    }

    let total: i32 = DATE_RANGE_RE
        .captures_iter(text)
        .filter_map(|c| {
            let start = c[1].parse::<i32>().ok()?;
            let end = c[2].parse::<i32>().unwrap_or(current_year);
            Some((end - start).max(0))
        })
        .sum();
    if total > 0 {
        total.to_string()
    } else {
        String::new()
    }
}

/// First "N years" requirement in a job description.
pub fn required_experience_years(text: &str) -> String {
    YEARS_RE
        .captures(text)
        .map(|c| c[1].to_string())
        .unwrap_or_default()
}

/// Degree names found in the education block (or the first 3000 characters), at most three.
pub fn extract_education_degrees(text: &str) -> Vec<String> {
    let search = match EDUCATION_BLOCK_RE.find(text) {
        Some(m) => m.as_str().to_string(),
        None => text.chars().take(3000).collect(),
    };

    let mut degrees: Vec<String> = Vec::new();
    for (re, name) in DEGREE_RES.iter() {
        if re.is_match(&search) && !degrees.iter().any(|d| d == name) {
            degrees.push(name.to_string());
        }
    }
    if degrees.is_empty() {
        if let Some((_, name)) = SIMPLE_DEGREE_RES.iter().find(|(re, _)| re.is_match(&search)) {
            degrees.push(name.to_string());
        }
    }
    degrees.truncate(3);
    degrees
}

/// Explicit "Role:" line, else the first short title-like line among the first ten.
pub fn extract_job_role(text: &str) -> String {
    if let Some(c) = ROLE_LINE_RE.captures(text) {
        return c[1].trim().chars().take(100).collect();
    }
    text.lines()
        .take(10)
        .map(str::trim)
        .find(|line| {
            let words = line.split_whitespace().count();
            let lower = line.to_lowercase();
            (2..=6).contains(&words) && line.len() < 60 && ROLE_INDICATORS.iter().any(|r| lower.contains(r))
        })
        .map(|line| line.chars().take(100).collect())
        .unwrap_or_default()
}

/// Soft skills mentioned anywhere, in lexicon order.
pub fn extract_soft_skills(text: &str, limit: usize) -> Vec<String> {
    let lower = format!(
        " {} ",
        text.to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { ' ' })
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    );
    SOFT_SKILLS
        .iter()
        .filter(|s| lower.contains(&format!(" {s} ")))
        .take(limit)
        .map(|s| s.to_string())
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Résumé sections
// ────────────────────────────────────────────────────────────────────────────

/// Lines under the first heading of `kind`, up to the next heading.
fn section_block<'t>(text: &'t str, sections: &SectionMap, kind: SectionKind) -> Option<Vec<&'t str>> {
    let headings = sections.headings();
    let at = headings.iter().position(|(_, k)| *k == kind)?;
    let lines: Vec<&str> = text.split('\n').collect();
    let start = (headings[at].0 + 1).min(lines.len());
    let end = headings
        .get(at + 1)
        .map(|(i, _)| *i)
        .unwrap_or(lines.len())
        .clamp(start, lines.len());
    Some(lines[start..end].to_vec())
}

/// The section's lines, or the lines of the first 3000 characters when it has no heading.
fn block_or_leading<'t>(text: &'t str, sections: &SectionMap, kind: SectionKind) -> Vec<&'t str> {
    section_block(text, sections, kind).unwrap_or_else(|| leading(text, 3000).split('\n').collect())
}

/// Prefix of at most `max_chars` characters.
fn leading(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn has_link(line: &str) -> bool {
    let lower = line.to_lowercase();
    line.contains('@') || lower.contains("http") || lower.contains("www")
}

fn push_unique(list: &mut Vec<String>, item: &str, cap: usize) {
    if list.len() < cap && !item.is_empty() && !list.iter().any(|x| x == item) {
        list.push(item.to_string());
    }
}

fn entities(tagger: &dyn Tagger, text: &str, labels: &[EntityLabel]) -> Vec<EntitySpan> {
    tagger
        .named_entities(text)
        .unwrap_or_default()
        .into_iter()
        .filter(|e| labels.contains(&e.label))
        .collect()
}

/// First PERSON near the top of the document, else the first short line that is not contact
/// data, a heading or a job title.
pub fn extract_candidate_name(text: &str, sections: &SectionMap, tagger: &dyn Tagger) -> String {
    let header = leading(text, 500);
    let from_entities = entities(tagger, header, &[EntityLabel::Person]).into_iter().find(|e| {
        let lower = e.text.to_lowercase();
        let words = e.text.split_whitespace().count();
        e.start < 300
            && (2..=5).contains(&words)
            && !lexicon::mentions_job_title(&lower)
            && !NAME_NOISE.iter().any(|w| lower.contains(w))
    });
    if let Some(person) = from_entities {
        return person.text;
    }

    header
        .split('\n')
        .enumerate()
        .take(3)
        .map(|(i, line)| (i, line.trim()))
        .find(|(i, line)| {
            let lower = line.to_lowercase();
            (2..=5).contains(&line.split_whitespace().count())
                && line.len() < 50
                && !sections.is_heading(*i)
                && !has_link(line)
                && !THREE_DIGITS_RE.is_match(line)
                && !ROLE_INDICATORS.iter().any(|r| lower.contains(r))
        })
        .map(|(_, line)| line.to_string())
        .unwrap_or_default()
}

/// An explicit "Location:" line in the contact block, else up to three place entities from
/// the first 300 characters.
pub fn extract_location(text: &str, tagger: &dyn Tagger, ontology: &Ontology) -> String {
    let contact = leading(text, 800);

    if let Some(c) = LOCATION_LINE_RE.captures(contact) {
        let raw: String = c[1].chars().filter(|ch| !"()[]{}".contains(*ch)).collect();
        let person_words: Vec<String> = entities(tagger, &raw, &[EntityLabel::Person])
            .iter()
            .flat_map(|e| e.text.split_whitespace().map(str::to_lowercase).collect::<Vec<_>>())
            .collect();

        let mut words = Vec::new();
        for word in raw.split_whitespace() {
            let clean = word.trim_matches(|ch: char| ch == ',' || ch == '|').to_lowercase();
            if LOCATION_STOP_WORDS.contains(&clean.as_str()) || has_link(word) || clean.contains(".com") {
                break;
            }
            if word == "|" {
                break;
            }
            if person_words.contains(&clean) {
                continue;
            }
            words.push(word);
            if words.len() >= 6 {
                break;
            }
        }
        let location = words.join(" ").trim_end_matches([',', '|']).trim().to_string();
        if (5..=80).contains(&location.len()) {
            return location;
        }
    }

    let mut places = Vec::new();
    for place in entities(tagger, contact, &[EntityLabel::Gpe, EntityLabel::Loc]) {
        if place.start < 300 && place.text.split_whitespace().count() <= 3 && !ontology.is_known(&place.text) {
            push_unique(&mut places, &place.text, 3);
        }
    }
    places.join(", ")
}

/// Fields of study named in the education section, at most three.
pub fn extract_education_fields(text: &str, sections: &SectionMap) -> Vec<String> {
    let block = block_or_leading(text, sections, SectionKind::Education).join("\n");
    let mut fields = Vec::new();
    for (re, name) in FIELD_RES.iter() {
        if re.is_match(&block) {
            push_unique(&mut fields, name, MAX_FIELDS);
        }
    }
    fields
}

/// Schools in the education section: ORG entities naming a school, else lines that do.
pub fn extract_education_institutions(
    text: &str,
    sections: &SectionMap,
    tagger: &dyn Tagger,
    ontology: &Ontology,
) -> Vec<String> {
    let block = block_or_leading(text, sections, SectionKind::Education);
    let mut institutions = Vec::new();

    for line in &block {
        for org in entities(tagger, line, &[EntityLabel::Org]) {
            let lower = org.text.to_lowercase();
            if EDUCATION_WORDS.iter().any(|w| lower.contains(w)) && !ontology.is_known(&lower) {
                push_unique(&mut institutions, &org.text, MAX_INSTITUTIONS);
            }
        }
    }
    if institutions.is_empty() {
        for line in &block {
            let clean = line.trim();
            let lower = clean.to_lowercase();
            if EDUCATION_WORDS.iter().any(|w| lower.contains(w))
                && (10..=100).contains(&clean.len())
                && !has_link(clean)
                && !TEN_DIGITS_RE.is_match(clean)
            {
                push_unique(&mut institutions, clean, MAX_INSTITUTIONS);
            }
        }
    }
    institutions
}

/// Short title lines in the experience section.
pub fn extract_experience_roles(text: &str, sections: &SectionMap) -> Vec<String> {
    let mut roles = Vec::new();
    for line in block_or_leading(text, sections, SectionKind::Experience) {
        let clean = line.trim();
        let lower = clean.to_lowercase();
        let words = lower.split_whitespace().count();
        if clean.starts_with(['*', '-'])
            || EDUCATION_WORDS.iter().any(|w| lower.contains(w))
            || has_link(clean)
            || lower.contains("education")
            || lower.contains("degree")
        {
            continue;
        }
        if (2..=8).contains(&words)
            && clean.len() < 80
            && EXPERIENCE_ROLE_INDICATORS.iter().any(|r| lower.contains(r))
        {
            push_unique(&mut roles, clean, MAX_LIST_ITEMS);
        }
    }
    roles
}

fn is_company(org: &str, ontology: &Ontology) -> bool {
    let lower = org.to_lowercase();
    !EDUCATION_WORDS.iter().any(|w| lower.contains(w))
        && !lexicon::is_tech_org(&lower)
        && !ontology.is_known(&lower)
        && !lower.split_whitespace().any(|w| ontology.is_canonical(w))
        && org.split_whitespace().count() <= 5
}

/// ORG entities in the experience section that are neither schools nor technologies. Empty
/// when the tagger has no entity recognition.
pub fn extract_experience_companies(
    text: &str,
    sections: &SectionMap,
    tagger: &dyn Tagger,
    ontology: &Ontology,
) -> Vec<String> {
    let mut companies = Vec::new();
    for line in block_or_leading(text, sections, SectionKind::Experience) {
        for org in entities(tagger, line, &[EntityLabel::Org]) {
            if is_company(&org.text, ontology) {
                push_unique(&mut companies, org.text.trim(), MAX_LIST_ITEMS);
            }
        }
    }
    companies
}

/// Year ranges and "N years"/"N months" spans, in text order.
pub fn extract_experience_date_ranges(text: &str) -> Vec<String> {
    let mut ranges = Vec::new();
    for m in DURATION_RE.find_iter(text) {
        let span = m.as_str().to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ");
        push_unique(&mut ranges, &span, MAX_LIST_ITEMS);
    }
    ranges
}

/// Title lines in the projects section. Bullet lines are details, not titles; a title stops
/// at its first "using", "with" or separator.
pub fn extract_project_titles(text: &str, sections: &SectionMap) -> Vec<String> {
    let Some(block) = section_block(text, sections, SectionKind::Projects) else {
        return Vec::new();
    };
    let mut titles = Vec::new();
    for line in block {
        let clean = line.trim();
        if clean.starts_with(['*', '-']) || has_link(clean) {
            continue;
        }
        if !(2..=12).contains(&clean.split_whitespace().count()) {
            continue;
        }
        let lower = clean.to_lowercase();
        let cut = [" using ", " with ", " | ", " - ", ":"]
            .iter()
            .filter_map(|sep| lower.find(sep))
            .min()
            .unwrap_or(clean.len());
        push_unique(&mut titles, clean.get(..cut).unwrap_or(clean).trim(), MAX_LIST_ITEMS);
    }
    titles
}

/// Lines naming a certification anywhere, plus every entry of a certifications section.
pub fn extract_certifications(text: &str, sections: &SectionMap) -> Vec<String> {
    let mut certifications = Vec::new();
    for (i, line) in text.split('\n').enumerate() {
        let clean = line.trim().trim_start_matches(['*', '-']).trim();
        let lower = clean.to_lowercase();
        let words = clean.split_whitespace().count();
        let in_section = !sections.is_heading(i) && sections.section_at(i) == Some(SectionKind::Certifications);
        let named = CERTIFICATION_WORDS.iter().any(|w| lower.contains(w)) && (3..=12).contains(&words);
        if (named || (in_section && (1..=12).contains(&words))) && !has_link(clean) {
            push_unique(&mut certifications, clean, MAX_LIST_ITEMS);
        }
    }
    certifications
}

/// Degree, field, institution and year grouped per entry. An entry closes once it has both a
/// degree and an institution.
pub fn extract_education_entries(text: &str, sections: &SectionMap) -> Vec<EducationEntry> {
    let Some(block) = section_block(text, sections, SectionKind::Education) else {
        return Vec::new();
    };
    let mut entries = Vec::new();
    let mut current = EducationEntry::default();

    for line in block {
        let clean = line.trim();
        if clean.len() < 5 {
            continue;
        }
        let lower = clean.to_lowercase();
        let degree = ENTRY_DEGREE_RES.iter().find(|(re, _)| re.is_match(&lower)).map(|(_, d)| *d);
        let field = FIELD_WORDS.iter().find(|f| lower.contains(*f)).map(|f| title_case(f));
        let institution = EDUCATION_WORDS.iter().any(|w| lower.contains(w)).then_some(clean);
        let year = YEAR_RE.find_iter(clean).last().map(|m| m.as_str());

        fill(&mut current.degree, degree);
        fill(&mut current.field, field.as_deref());
        fill(&mut current.institution, institution);
        fill(&mut current.year, year);

        if !current.degree.is_empty() && !current.institution.is_empty() {
            entries.push(std::mem::take(&mut current));
        }
    }
    if !current.degree.is_empty() || !current.institution.is_empty() {
        entries.push(current);
    }
    entries.truncate(MAX_EDUCATION_ENTRIES);
    entries
}

fn fill(slot: &mut String, value: Option<&str>) {
    if let Some(value) = value {
        if slot.is_empty() {
            *slot = value.to_string();
        }
    }
}

fn title_case(phrase: &str) -> String {
    phrase
        .split(' ')
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Positions in the experience section. A role line opens an entry; a blank line or the next
/// role closes it. Bullets under a role become responsibilities and the ontology names in them
/// become its skills.
pub fn extract_experience_entries(
    text: &str,
    sections: &SectionMap,
    tagger: &dyn Tagger,
    ontology: &Ontology,
) -> Vec<ExperienceEntry> {
    let Some(block) = section_block(text, sections, SectionKind::Experience) else {
        return Vec::new();
    };
    let mut entries = Vec::new();
    let mut current = ExperienceEntry::default();

    let company_in = |line: &str| -> Option<String> {
        entities(tagger, line, &[EntityLabel::Org])
            .into_iter()
            .find(|org| is_company(&org.text, ontology))
            .map(|org| org.text)
    };

    for line in block {
        let clean = line.trim();
        if clean.len() < 3 {
            if !current.role.is_empty() {
                entries.push(std::mem::take(&mut current));
            }
            continue;
        }
        let lower = clean.to_lowercase();
        let is_bullet = clean.starts_with(['*', '-']);
        let is_role = !is_bullet
            && clean.split_whitespace().count() <= 8
            && EXPERIENCE_ROLE_INDICATORS.iter().any(|r| lower.contains(r));
        let range = DATE_RANGE_RE.find(clean);

        if is_role {
            if !current.role.is_empty() {
                entries.push(std::mem::take(&mut current));
            }
            let role = match range {
                Some(m) => format!("{}{}", &clean[..m.start()], &clean[m.end()..]),
                None => clean.to_string(),
            };
            current.role = role.trim().trim_end_matches([',', '|', '-']).trim().to_string();
            current.duration = range.map(|m| m.as_str().to_string()).unwrap_or_default();
            current.company = company_in(clean).unwrap_or_default();
        } else if current.role.is_empty() {
            continue;
        } else if is_bullet {
            let responsibility = clean.trim_start_matches(['*', '-']).trim().to_string();
            for hit in ontology.find_surfaces(&responsibility.to_lowercase(), false) {
                push_unique(&mut current.skills, &hit.surface.canonical, usize::MAX);
            }
            current.responsibilities.push(responsibility);
        } else if let (Some(m), true) = (range, current.duration.is_empty()) {
            current.duration = m.as_str().to_string();
        } else if current.company.is_empty() {
            current.company = company_in(clean).unwrap_or_default();
        }
    }
    if !current.role.is_empty() {
        entries.push(current);
    }
    entries.truncate(MAX_LIST_ITEMS);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::sections::DocumentKind;
    use crate::extraction::tagger::{LexiconTagger, PatternOnlyTagger};

    const PROFILE: &str = "Jane Doe\nLocation: Pune, India\njane@example.com | 555-123-4567\n\nEDUCATION\nBachelor of Technology in Computer Science\nStanford University, 2019\n\nEXPERIENCE\nBackend Engineer, Infosys 2019 - 2023\n- Built APIs with Python and Redis\n- Mentored interns\n\nData Analyst 2017 - 2019\n- Reports in Tableau\n\nPROJECTS\nInventory Tracker using Django\n- Barcode scanning\n\nCERTIFICATIONS\nAWS Certified Solutions Architect\n";

    fn sections() -> SectionMap {
        SectionMap::detect(PROFILE, DocumentKind::Resume)
    }

    #[test]
    fn test_contact_details() {
        let text = "Jane Doe\njane.doe@example.com | +1 (555) 123-4567";
        assert_eq!(extract_email(text), "jane.doe@example.com");
        assert_eq!(extract_phone(text), "5551234567");
        assert_eq!(extract_email("no contact"), "");
        assert_eq!(extract_phone("no contact"), "");
    }

    #[test]
    fn test_experience_estimate_prefers_explicit_years() {
        assert_eq!(estimate_experience_years("5+ years of Python, 3 yrs Go", 2026), "5");
        assert_eq!(estimate_experience_years("Acme 2018 - 2020\nGlobex 2021 - Present", 2026), "7");
        assert_eq!(estimate_experience_years("fresh graduate", 2026), "");
    }

    #[test]
    fn test_required_experience_years() {
        assert_eq!(required_experience_years("Minimum 3 years with Kafka; 5+ years overall"), "3");
        assert_eq!(required_experience_years("No requirement"), "");
    }

    #[test]
    fn test_education_degrees() {
        let text = "EDUCATION\nBachelor of Science in Computer Science, 2018\nMBA, 2022\nEXPERIENCE\nDiploma mill";
        assert_eq!(extract_education_degrees(text), vec!["Bachelor of Engineering", "MBA"]);
        assert_eq!(extract_education_degrees("Education\nB.Tech, 2019"), vec!["Bachelor of Technology"]);
        assert!(extract_education_degrees("Rust developer").is_empty());
    }

    #[test]
    fn test_job_role() {
        assert_eq!(extract_job_role("Role: Senior Data Engineer\nWe are hiring"), "Senior Data Engineer");
        assert_eq!(
            extract_job_role("Acme Corp\nStaff Backend Developer\nAbout the role"),
            "Staff Backend Developer"
        );
        assert_eq!(extract_job_role("We build things."), "");
    }

    #[test]
    fn test_soft_skills_are_whole_phrase_matches() {
        let text = "Strong communication and problem-solving; a true team player.";
        assert_eq!(
            extract_soft_skills(text, 10),
            vec!["communication", "problem solving", "team player"]
        );
        assert_eq!(extract_soft_skills(text, 1), vec!["communication"]);
    }

    #[test]
    fn test_candidate_name_and_location_with_either_tagger() {
        let o = Ontology::builtin().unwrap();
        for tagger in [&LexiconTagger as &dyn Tagger, &PatternOnlyTagger] {
            assert_eq!(extract_candidate_name(PROFILE, &sections(), tagger), "Jane Doe", "{}", tagger.name());
            assert_eq!(extract_location(PROFILE, tagger, &o), "Pune, India");
        }

        let header = "John Smith\nSan Francisco, CA\njohn@example.com";
        let map = SectionMap::detect(header, DocumentKind::Resume);
        assert_eq!(extract_candidate_name(header, &map, &LexiconTagger), "John Smith");
        assert_eq!(extract_location(header, &LexiconTagger, &o), "San Francisco, CA");
        assert_eq!(extract_location(header, &PatternOnlyTagger, &o), "");
    }

    #[test]
    fn test_name_skips_headings_and_titles() {
        let text = "TECHNICAL SKILLS\nSenior Backend Engineer\n555 123 4567 Main St";
        let map = SectionMap::detect(text, DocumentKind::Resume);
        assert_eq!(extract_candidate_name(text, &map, &PatternOnlyTagger), "");
    }

    #[test]
    fn test_education_fields_and_institutions() {
        let o = Ontology::builtin().unwrap();
        assert_eq!(extract_education_fields(PROFILE, &sections()), vec!["Computer Science"]);
        assert_eq!(
            extract_education_institutions(PROFILE, &sections(), &LexiconTagger, &o),
            vec!["Stanford University"]
        );
        assert_eq!(
            extract_education_institutions(PROFILE, &sections(), &PatternOnlyTagger, &o),
            vec!["Stanford University, 2019"]
        );
        // "it" as a pronoun is not a field
        let prose = "EDUCATION\nB.Sc, it was fun";
        let map = SectionMap::detect(prose, DocumentKind::Resume);
        assert!(extract_education_fields(prose, &map).is_empty());
    }

    #[test]
    fn test_experience_roles_companies_and_ranges() {
        let o = Ontology::builtin().unwrap();
        assert_eq!(
            extract_experience_roles(PROFILE, &sections()),
            vec!["Backend Engineer, Infosys 2019 - 2023", "Data Analyst 2017 - 2019"]
        );
        assert_eq!(extract_experience_companies(PROFILE, &sections(), &LexiconTagger, &o), vec!["Infosys"]);
        assert!(extract_experience_companies(PROFILE, &sections(), &PatternOnlyTagger, &o).is_empty());
        assert_eq!(extract_experience_date_ranges(PROFILE), vec!["2019 - 2023", "2017 - 2019"]);
        assert_eq!(
            extract_experience_date_ranges("3+ years of Go, 6 months of Rust"),
            vec!["3+ years", "6 months"]
        );
    }

    #[test]
    fn test_project_titles_and_certifications() {
        assert_eq!(extract_project_titles(PROFILE, &sections()), vec!["Inventory Tracker"]);
        assert_eq!(
            extract_certifications(PROFILE, &sections()),
            vec!["AWS Certified Solutions Architect"]
        );
        let none = SectionMap::detect("Rust developer", DocumentKind::Resume);
        assert!(extract_project_titles("Rust developer", &none).is_empty());
    }

    #[test]
    fn test_education_entries_group_degree_and_school() {
        let entries = extract_education_entries(PROFILE, &sections());
        assert_eq!(
            entries,
            vec![EducationEntry {
                degree: "Bachelor".to_string(),
                field: "Computer Science".to_string(),
                institution: "Stanford University, 2019".to_string(),
                year: "2019".to_string(),
            }]
        );
    }

    #[test]
    fn test_experience_entries_split_on_blank_lines() {
        let o = Ontology::builtin().unwrap();
        let entries = extract_experience_entries(PROFILE, &sections(), &LexiconTagger, &o);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].role, "Backend Engineer, Infosys");
        assert_eq!(entries[0].duration, "2019 - 2023");
        assert_eq!(entries[0].company, "Infosys");
        assert_eq!(entries[0].responsibilities, vec!["Built APIs with Python and Redis", "Mentored interns"]);
        assert!(entries[0].skills.contains(&"python".to_string()));
        assert!(entries[0].skills.contains(&"redis".to_string()));
        assert_eq!(entries[1].role, "Data Analyst");
        assert_eq!(entries[1].skills, vec!["tableau"]);

        let pattern_only = extract_experience_entries(PROFILE, &sections(), &PatternOnlyTagger, &o);
        assert_eq!(pattern_only[0].company, "");
    }
}
