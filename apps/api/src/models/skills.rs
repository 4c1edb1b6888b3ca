use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::extraction::ontology::SkillBucket;

/// A ranked canonical skill name with its composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSkill {
    pub name: String,
    pub score: f64,
}

/// Five disjoint, ordered lists of canonical names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedSkills {
    pub technical_skills: Vec<String>,
    pub programming_languages: Vec<String>,
    pub frameworks: Vec<String>,
    pub tools: Vec<String>,
    pub databases: Vec<String>,
}

impl ClassifiedSkills {
    pub fn bucket(&self, bucket: SkillBucket) -> &Vec<String> {
        match bucket {
            SkillBucket::TechnicalSkills => &self.technical_skills,
            SkillBucket::ProgrammingLanguages => &self.programming_languages,
            SkillBucket::Frameworks => &self.frameworks,
            SkillBucket::Tools => &self.tools,
            SkillBucket::Databases => &self.databases,
        }
    }

    pub fn bucket_mut(&mut self, bucket: SkillBucket) -> &mut Vec<String> {
        match bucket {
            SkillBucket::TechnicalSkills => &mut self.technical_skills,
            SkillBucket::ProgrammingLanguages => &mut self.programming_languages,
            SkillBucket::Frameworks => &mut self.frameworks,
            SkillBucket::Tools => &mut self.tools,
            SkillBucket::Databases => &mut self.databases,
        }
    }

    pub fn total(&self) -> usize {
        SkillBucket::ALL.iter().map(|b| self.bucket(*b).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Names from the given buckets, concatenated in the order given.
    pub fn flatten(&self, order: &[SkillBucket]) -> Vec<String> {
        order.iter().flat_map(|b| self.bucket(*b).iter().cloned()).collect()
    }

    /// True when no name appears twice within or across lists.
    pub fn is_partitioned(&self) -> bool {
        let mut seen = HashSet::new();
        SkillBucket::ALL
            .iter()
            .flat_map(|b| self.bucket(*b).iter())
            .all(|name| seen.insert(name.as_str()))
    }
}

/// One degree as listed in an education section; fields missing from the text stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub field: String,
    pub institution: String,
    pub year: String,
}

/// One position as listed in an experience section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub role: String,
    pub company: String,
    pub duration: String,
    pub responsibilities: Vec<String>,
    /// Canonical names mentioned in the responsibilities.
    pub skills: Vec<String>,
}

/// Structured résumé extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeSkills {
    #[serde(flatten)]
    pub classified: ClassifiedSkills,
    pub ranked_skills: Vec<RankedSkill>,
    pub project_technologies: Vec<String>,
    pub soft_skills: Vec<String>,
    pub candidate_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub education_degrees: Vec<String>,
    pub education_fields: Vec<String>,
    pub education_institutions: Vec<String>,
    pub experience_roles: Vec<String>,
    pub experience_companies: Vec<String>,
    pub experience_date_ranges: Vec<String>,
    pub experience_years_estimated: String,
    pub project_titles: Vec<String>,
    pub certifications: Vec<String>,
    pub education_entries: Vec<EducationEntry>,
    pub experience_entries: Vec<ExperienceEntry>,
}

/// Structured job-description extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSkills {
    #[serde(flatten)]
    pub classified: ClassifiedSkills,
    pub ranked_keywords: Vec<RankedSkill>,
    pub nice_to_have_skills: Vec<String>,
    pub responsibility_tech_terms: Vec<String>,
    pub job_role: String,
    pub required_experience_years: String,
    pub required_education: Vec<String>,
}

/// Résumé and job description extracted with shared statistical weighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairSkills {
    pub resume: ResumeSkills,
    pub job: JobSkills,
}
