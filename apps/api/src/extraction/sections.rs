//! Section Mapper: finds headings, assigns every line a section and a priority weight.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Resume,
    Job,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Summary,
    About,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Achievements,
    Responsibilities,
    Requirements,
    NiceToHave,
    Benefits,
}

/// Fixed priority weights.
pub mod priority {
    pub const REJECT: f64 = -1.0;
    pub const LOW: f64 = 0.3;
    pub const NEUTRAL: f64 = 1.0;
    pub const HIGH: f64 = 2.0;
    pub const BOOSTED: f64 = 5.0;
}

const JOB_HEADINGS: &[(SectionKind, &[&str])] = &[
    (SectionKind::NiceToHave, &["nice to have", "preferred", "bonus", "good to have"]),
    (
        SectionKind::Requirements,
        &["requirements", "qualifications", "must have", "what you bring", "who you are"],
    ),
    (
        SectionKind::Responsibilities,
        &["responsibilities", "duties", "what you will do", "what you'll do", "the role"],
    ),
    (SectionKind::Benefits, &["benefits", "perks", "what we offer"]),
];

const COMMON_HEADINGS: &[(SectionKind, &[&str])] = &[
    (
        SectionKind::Skills,
        &[
            "skills", "skill", "competencies", "expertise", "technologies", "tech stack", "toolkit",
            "tools", "programming languages",
        ],
    ),
    (SectionKind::Summary, &["summary", "profile", "objective"]),
    (SectionKind::About, &["about"]),
    (SectionKind::Experience, &["experience", "employment", "work history"]),
    (SectionKind::Education, &["education", "academic", "academics", "qualification"]),
    (SectionKind::Projects, &["projects", "project"]),
    (
        SectionKind::Certifications,
        &["certifications", "certification", "certificates", "credentials"],
    ),
    (SectionKind::Achievements, &["achievements", "accomplishments", "awards"]),
];

// Section names looked up inside arbitrary fragments.
const PRIORITY_NAMES: &[&str] = &[
    "skills", "technical skills", "tools", "technologies", "tech stack", "frameworks",
    "programming languages", "languages", "technical competencies",
];
const STRICT_REJECT_NAMES: &[&str] = &[
    "summary", "objective", "profile", "responsibilities", "achievements", "accomplishments",
];
const LOW_PRIORITY_NAMES: &[&str] = &[
    "personal", "about", "references", "education", "additional information", "hobbies",
    "interests", "duties",
];

/// Weight of the first section name found as a substring of the fragment, if any.
pub fn priority_for(fragment: &str) -> Option<f64> {
    let lower = fragment.to_lowercase();
    if PRIORITY_NAMES.iter().any(|n| lower.contains(n)) {
        Some(priority::HIGH)
    } else if STRICT_REJECT_NAMES.iter().any(|n| lower.contains(n)) {
        Some(priority::REJECT)
    } else if LOW_PRIORITY_NAMES.iter().any(|n| lower.contains(n)) {
        Some(priority::LOW)
    } else {
        None
    }
}

/// Sparse map from heading line index to section kind.
#[derive(Debug, Clone)]
pub struct SectionMap {
    kind: DocumentKind,
    headings: Vec<(usize, SectionKind)>,
}

impl SectionMap {
    pub fn detect(text: &str, kind: DocumentKind) -> Self {
        let headings = text
            .split('\n')
            .enumerate()
            .filter_map(|(i, line)| heading_kind(line, kind).map(|k| (i, k)))
            .collect();
        Self { kind, headings }
    }

    pub fn headings(&self) -> &[(usize, SectionKind)] {
        &self.headings
    }

    pub fn is_heading(&self, line: usize) -> bool {
        self.headings.iter().any(|(i, _)| *i == line)
    }

    pub fn has_skills_section(&self) -> bool {
        self.headings.iter().any(|(_, k)| *k == SectionKind::Skills)
    }

    /// Section of the nearest heading at or above `line`.
    pub fn section_at(&self, line: usize) -> Option<SectionKind> {
        self.headings
            .iter()
            .take_while(|(i, _)| *i <= line)
            .last()
            .map(|(_, k)| *k)
    }

    /// Lines where ambiguous ontology surfaces count.
    pub fn is_skills_line(&self, line: usize) -> bool {
        matches!(
            self.section_at(line),
            Some(SectionKind::Skills | SectionKind::Requirements | SectionKind::NiceToHave)
        )
    }

    pub fn priority_at(&self, line: usize) -> f64 {
        let Some(section) = self.section_at(line) else {
            return priority::NEUTRAL;
        };
        match (self.kind, section) {
            (DocumentKind::Resume, SectionKind::Skills) => priority::BOOSTED,
            (DocumentKind::Resume, SectionKind::Summary | SectionKind::About | SectionKind::Achievements) => {
                priority::REJECT
            }
            (DocumentKind::Resume, SectionKind::Education) => priority::LOW,
            (DocumentKind::Job, SectionKind::Skills | SectionKind::Requirements) => priority::HIGH,
            (DocumentKind::Job, SectionKind::About) => priority::LOW,
            (DocumentKind::Job, SectionKind::Benefits) => priority::REJECT,
            _ => priority::NEUTRAL,
        }
    }

    /// Text scoped to the first marker occurrence. When the marker sits on a heading the
    /// excerpt runs to the next heading; otherwise it runs to the next line that starts with an
    /// uppercase letter.
    pub fn excerpt(&self, text: &str, markers: &[&str]) -> Option<String> {
        let lines: Vec<&str> = text.split('\n').collect();
        let lowered: Vec<String> = lines.iter().map(|l| l.to_lowercase()).collect();
        let (first, column) = lowered.iter().enumerate().find_map(|(i, line)| {
            markers
                .iter()
                .filter_map(|m| line.find(m))
                .min()
                .map(|col| (i, col))
        })?;

        let end = if self.is_heading(first) {
            self.headings
                .iter()
                .map(|(i, _)| *i)
                .find(|i| *i > first)
                .unwrap_or(lines.len())
        } else {
            (first + 1..lines.len())
                .find(|&i| {
                    lines[i]
                        .trim_start()
                        .chars()
                        .next()
                        .map(char::is_uppercase)
                        .unwrap_or(false)
                })
                .unwrap_or(lines.len())
        };

        let mut out = lines[first].get(column..).unwrap_or(lines[first]).to_string();
        for line in &lines[first + 1..end] {
            out.push('\n');
            out.push_str(line);
        }
        Some(out)
    }
}

fn heading_kind(line: &str, kind: DocumentKind) -> Option<SectionKind> {
    let trimmed = line.trim().trim_end_matches(':').trim();
    let len = trimmed.chars().count();
    if !(3..40).contains(&len) || trimmed.split_whitespace().count() > 4 {
        return None;
    }
    let has_letters = trimmed.chars().any(char::is_alphabetic);
    let all_caps = has_letters && !trimmed.chars().any(char::is_lowercase);
    let title_like = trimmed.chars().next().map(char::is_uppercase).unwrap_or(false) && !trimmed.contains(':');
    if !all_caps && !title_like {
        return None;
    }

    let words: String = trimmed
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '\'' { c } else { ' ' })
        .collect();
    let padded = format!(" {} ", words.split_whitespace().collect::<Vec<_>>().join(" "));

    let job_specific: &[(SectionKind, &[&str])] = match kind {
        DocumentKind::Job => JOB_HEADINGS,
        DocumentKind::Resume => &[],
    };
    job_specific
        .iter()
        .chain(COMMON_HEADINGS.iter())
        .find(|(_, names)| names.iter().any(|n| padded.contains(&format!(" {n} "))))
        .map(|(k, _)| *k)
}
