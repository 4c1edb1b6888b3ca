//! Closed word lists used by the sanitizer, the validator and the taggers.
//!
//! All lists are lowercase. Lookups go through the `LazyLock` sets below.

use std::collections::HashSet;
use std::sync::LazyLock;

const BASE_STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for", "from",
    "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself", "him",
    "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just", "me",
    "more", "most", "my", "myself", "no", "nor", "not", "of", "off", "on", "once", "only", "or",
    "other", "our", "ours", "ourselves", "out", "over", "own", "same", "she", "should", "so",
    "some", "such", "than", "that", "the", "their", "theirs", "them", "themselves", "then",
    "there", "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
    "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom", "why",
    "will", "with", "you", "your", "yours", "yourself", "yourselves",
];

const DOMAIN_STOPWORDS: &[&str] = &[
    "candidate", "role", "responsibility", "responsibilities", "required", "must", "would",
    "include", "includes", "including", "looking", "seeking", "ideal", "position", "work",
    "team", "environment", "company", "organization", "business", "strong", "excellent", "good",
    "great", "ability", "experience", "years", "year", "level", "senior", "junior", "prefer",
    "preferred", "bonus", "nice", "working", "join", "offer", "summary", "culture", "benefits",
    "salary", "competitive", "package", "grew", "growth", "opportunity", "opportunities",
    "hiring", "hire", "apply", "application",
];

const GENERIC_NOUNS: &[&str] = &[
    "intelligence", "design", "performance", "structure", "model", "data", "analysis", "system",
    "application", "interactive", "responsive", "content", "interface", "execution", "behavior",
    "insights", "visualization", "quality", "solution", "platform", "information",
    "development", "management", "experience", "knowledge", "proficiency", "familiarity",
    "understanding", "ability", "capability", "efficiency", "scalability", "maintainability",
    "accessibility", "compatibility", "security", "reliability", "availability",
];

const GENERIC_REJECTS: &[&str] = &[
    "dashboard", "dashboards", "project", "projects", "developer", "engineer", "report",
    "reports", "modern", "professional", "collaborative", "fast", "clean", "maintainable",
    "large", "small", "big", "new", "old", "best", "good", "great", "better", "high", "low",
    "efficient", "effective", "solutions", "systems", "applications", "software", "service",
    "services", "product", "products", "business", "enterprise", "company", "organization",
    "team", "user", "users", "client", "clients", "customer", "customers", "manager",
    "additional", "various", "across", "processes", "process", "collection", "amazon", "prime",
    "matrix", "issues", "issue", "devices", "device", "browser", "enhance", "wireframes",
    "mockups", "pixel", "code", "build", "web", "frontend", "backend", "full", "stack",
    "datasets", "predictable", "friendly", "enthusiasts", "task", "ensure", "standards",
    "upwork", "responsible", "ids", "st", "exploratory", "power", "strong", "reusable",
    "scalable", "robust", "dynamic", "static", "flexible", "agile", "optimization",
];

const FRAGMENT_INDICATORS: &[&str] = &[
    "content", "information", "various", "across", "processes", "issues", "quality", "multiple",
    "support", "focus", "datasets", "collection", "predictable",
];

const LEADING_ADJECTIVES: &[&str] = &[
    "additional", "various", "multiple", "high", "low", "best", "better", "clean",
    "maintainable", "interactive", "responsive", "friendly",
];

const NON_TECH_WORDS: &[&str] = &[
    "user", "friendly", "interface", "content", "fire", "enthusiasts", "insights", "execution",
    "task", "wireframes", "mockups", "ensure", "standards", "accessibility", "upwork", "high",
    "performance", "interactive", "reusable", "quality",
];

const ACTION_VERBS: &[&str] = &[
    "built", "developed", "implemented", "designed", "created", "architected", "engineered",
    "used", "utilized", "worked", "applied", "employed", "leveraged", "integrated", "deployed",
    "configured", "setup", "established", "installed", "optimized", "improved", "enhanced",
    "refactored", "migrated", "upgraded", "trained", "analyzed", "tested", "debugged",
    "troubleshot", "maintained", "automated", "scripted", "programmed", "coded", "wrote",
    "managed", "led", "coordinated", "delivered", "launched", "shipped", "collaborated",
    "contributed", "participated",
];

/// Phrase openers that mark a sentence fragment rather than a skill name.
pub const ACTION_STARTERS: &[&str] = &[
    "built", "developed", "created", "designed", "performed", "implemented", "managed", "led",
    "worked", "used", "analyzed", "prepared", "write", "conduct",
];

pub const TIME_WORDS: &[&str] = &[
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december", "present", "current", "year", "month",
];

pub const SECTION_TITLES: &[&str] = &[
    "summary", "experience", "education", "skills", "projects", "certifications", "objective",
    "profile",
];

/// Matched as whole words by the sanitizer and as substrings by the junk check.
pub const JUNK_PATTERNS: &[&str] = &[
    "intern", "internship", "bachelor", "master", "degree", "university", "college", "january",
    "february", "march", "april", "may", "june", "july", "august", "september", "october",
    "november", "december", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "oct",
    "nov", "dec", "present", "current",
];

const JOB_TITLE_INDICATORS: &[&str] = &[
    "engineer", "developer", "analyst", "manager", "architect", "specialist", "designer",
    "scientist", "administrator", "lead", "director", "consultant", "coordinator", "associate",
    "intern", "trainee", "junior", "senior", "staff", "principal",
];

pub const SOFT_SKILLS: &[&str] = &[
    "communication", "leadership", "teamwork", "problem solving", "critical thinking",
    "time management", "adaptability", "creativity", "work ethic", "attention to detail",
    "collaboration", "interpersonal", "organizational", "analytical", "motivated",
    "self starter", "team player", "fast learner", "detail oriented", "results driven",
];

/// Recruiting and job-board names stripped from job descriptions.
pub const SOURCE_SITES: &[&str] = &[
    "arc.dev", "arc dev", "toptal", "roadmap", "linkedin", "indeed", "glassdoor", "monster",
    "dice", "stackoverflow", "github jobs", "remote ok", "weworkremotely", "flexjobs",
    "angel list", "angellist",
];

/// Organisations kept by the sanitizer even when tagged as ORG.
pub const TECH_ORGS: &[&str] = &[
    "github", "gitlab", "aws", "azure", "google cloud", "gcp", "microsoft", "oracle", "ibm",
    "docker", "kubernetes", "amazon", "meta", "facebook", "apple", "netflix", "google",
];

const HR_NOISE: &[&str] = &[
    "candidate", "candidates", "team", "teams", "environment", "company", "organization",
    "business", "position", "positions", "role", "roles", "work", "working", "worker",
    "workers", "year", "years", "experience", "experiences", "strong", "excellent", "good",
    "great", "ability", "abilities", "along", "building", "active", "looking", "seeking",
    "ideal", "required", "must", "will", "would", "should", "responsibility",
    "responsibilities", "include", "includes", "including", "join", "joining", "prefer",
    "preferred", "preference", "bonus", "nice", "level", "senior", "junior", "mid", "offer",
    "offers", "summary", "culture", "cultural", "benefit", "benefits", "salary",
    "compensation", "competitive", "package", "grew", "growth", "grow", "opportunity",
    "opportunities", "hiring", "hire", "apply", "application", "qualified", "qualification",
    "qualifications", "code", "build", "skill", "skills", "knowledge", "familiar",
    "familiarity", "tool", "tools", "tech", "technology", "technologies", "framework",
    "frameworks", "use", "using", "used", "develop", "developing", "developed", "collaborate",
    "collaboration", "participate", "participation", "saas", "fast", "growing", "dedicated",
    "mission", "creating", "intuitive", "financial", "believe", "quality", "centric",
    "fostering", "innovative", "talented", "creative", "translating", "engaging", "keen", "eye",
    "passion", "command", "hybrid", "remote", "full", "time", "part", "contract", "brief",
    "description",
];

/// Classified names dropped from every output list.
const OUTPUT_JUNK: &[&str] = &[
    "general", "dev", "development", "programming", "coding", "scripting", "software", "web",
    "application", "system", "technology", "technical", "digital", "online", "virtual",
    "remote", "hybrid", "work", "job", "role", "team", "company", "business", "project",
    "artificial", "intelligence", "chrome", "edge", "firefox", "safari", "studio", "visual",
    "code", "devtools", "tools", "platforms", "notebook",
];

fn set(words: &[&'static str]) -> HashSet<&'static str> {
    words.iter().copied().collect()
}

static STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    BASE_STOPWORDS
        .iter()
        .chain(DOMAIN_STOPWORDS.iter())
        .copied()
        .collect()
});
static GENERIC_NOUN_SET: LazyLock<HashSet<&'static str>> = LazyLock::new(|| set(GENERIC_NOUNS));
static GENERIC_REJECT_SET: LazyLock<HashSet<&'static str>> = LazyLock::new(|| set(GENERIC_REJECTS));
static ACTION_VERB_SET: LazyLock<HashSet<&'static str>> = LazyLock::new(|| set(ACTION_VERBS));
static SOFT_SKILL_SET: LazyLock<HashSet<&'static str>> = LazyLock::new(|| set(SOFT_SKILLS));
static HR_NOISE_SET: LazyLock<HashSet<&'static str>> = LazyLock::new(|| set(HR_NOISE));
static OUTPUT_JUNK_SET: LazyLock<HashSet<&'static str>> = LazyLock::new(|| set(OUTPUT_JUNK));
static NON_TECH_SET: LazyLock<HashSet<&'static str>> = LazyLock::new(|| set(NON_TECH_WORDS));

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(word)
}

pub fn is_generic_noun(word: &str) -> bool {
    GENERIC_NOUN_SET.contains(word)
}

pub fn is_generic_reject(phrase: &str) -> bool {
    GENERIC_REJECT_SET.contains(phrase)
}

pub fn is_action_verb(word: &str) -> bool {
    ACTION_VERB_SET.contains(word)
}

pub fn is_soft_skill(phrase: &str) -> bool {
    SOFT_SKILL_SET.contains(phrase)
}

pub fn is_hr_noise(word: &str) -> bool {
    HR_NOISE_SET.contains(word)
}

pub fn is_output_junk(name: &str) -> bool {
    OUTPUT_JUNK_SET.contains(name)
}

pub fn is_non_tech_word(word: &str) -> bool {
    NON_TECH_SET.contains(word)
}

pub fn is_fragment_indicator(word: &str) -> bool {
    FRAGMENT_INDICATORS.contains(&word)
}

pub fn is_leading_adjective(word: &str) -> bool {
    LEADING_ADJECTIVES.contains(&word)
}

/// True when any job-title word occurs inside the phrase.
pub fn mentions_job_title(phrase: &str) -> bool {
    JOB_TITLE_INDICATORS.iter().any(|t| phrase.contains(t))
}

pub fn is_tech_org(name: &str) -> bool {
    TECH_ORGS.contains(&name)
}
