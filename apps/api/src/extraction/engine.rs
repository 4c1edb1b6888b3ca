//! `SkillEngine`: the one extraction pipeline behind every entry point.
//!
//! Preprocess → sanitize → section map → candidates → validate/rank → classify. The engine
//! holds only immutable shared state, so one instance serves every request.

use std::sync::Arc;

use chrono::{Datelike, Utc};
use tracing::debug;

use crate::errors::EngineError;
use crate::extraction::candidates::CandidateGenerator;
use crate::extraction::classifier::Classifier;
use crate::extraction::ontology::{Ontology, SkillBucket};
use crate::extraction::preprocess::{clean_tokens, prepare};
use crate::extraction::profile;
use crate::extraction::ranker::{self, SENTINEL};
use crate::extraction::sanitizer::{sanitize, strip_jd_boilerplate};
use crate::extraction::sections::{DocumentKind, SectionMap};
use crate::extraction::settings::{ExtractionConfig, ProfileConfig};
use crate::extraction::tagger::Tagger;
use crate::extraction::tfidf::{self, TermWeights};
use crate::extraction::validator::Validator;
use crate::models::skills::{ClassifiedSkills, JobSkills, PairSkills, RankedSkill, ResumeSkills};

const PROJECT_MARKERS: &[&str] = &["projects", "project experience", "personal projects"];
const NICE_TO_HAVE_MARKERS: &[&str] = &["nice to have", "preferred", "bonus", "good to have"];
const RESPONSIBILITY_MARKERS: &[&str] = &["responsibilities", "what you'll do", "what you will do", "your role"];

const JOB_SUBSET_BUCKETS: [SkillBucket; 4] = [
    SkillBucket::TechnicalSkills,
    SkillBucket::Frameworks,
    SkillBucket::Tools,
    SkillBucket::ProgrammingLanguages,
];

/// A document after preprocessing, sanitizing and section mapping.
struct PreparedDocument {
    /// Folded and truncated, before any stripping. Profile extras read this.
    prepared: String,
    sanitized: String,
    sections: SectionMap,
    tokens: Vec<String>,
}

pub struct SkillEngine {
    ontology: Arc<Ontology>,
    tagger: Arc<dyn Tagger>,
    config: ExtractionConfig,
}

impl SkillEngine {
    pub fn new(ontology: Arc<Ontology>, tagger: Arc<dyn Tagger>, config: ExtractionConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            ontology,
            tagger,
            config,
        })
    }

    pub fn ontology(&self) -> &Ontology {
        &self.ontology
    }

    pub fn tagger_name(&self) -> &'static str {
        self.tagger.name()
    }

    fn profile(&self, kind: DocumentKind) -> &ProfileConfig {
        match kind {
            DocumentKind::Resume => &self.config.resume,
            DocumentKind::Job => &self.config.job,
        }
    }

    fn prepare_document(&self, text: &str, kind: DocumentKind) -> PreparedDocument {
        let prepared = prepare(text, self.config.max_document_chars);
        let stripped = match kind {
            DocumentKind::Resume => prepared.clone(),
            DocumentKind::Job => strip_jd_boilerplate(&prepared),
        };
        let sanitized = sanitize(&stripped, &self.ontology, self.tagger.as_ref());
        // Stripping and sanitizing keep the line structure, so these line indices hold for `sanitized`.
        let sections = SectionMap::detect(&prepared, kind);
        debug!(
            headings = sections.headings().len(),
            skills_section = sections.has_skills_section(),
            kind = ?kind,
            "Mapped sections"
        );
        let tokens = clean_tokens(&sanitized, &self.ontology);
        PreparedDocument {
            prepared,
            sanitized,
            sections,
            tokens,
        }
    }

    fn single_weights(&self, doc: &PreparedDocument, kind: DocumentKind) -> Option<TermWeights> {
        if doc.tokens.is_empty() {
            return None;
        }
        tfidf::weigh(std::slice::from_ref(&doc.tokens), self.profile(kind).tfidf)
            .into_iter()
            .next()
    }

    fn rank_document(&self, doc: &PreparedDocument, weights: Option<&TermWeights>, kind: DocumentKind) -> Vec<RankedSkill> {
        let profile = self.profile(kind);
        let generator = CandidateGenerator::new(&self.ontology, self.tagger.as_ref(), &self.config);
        let pool = generator.generate(&doc.sanitized, &doc.sections, weights, profile);
        debug!(candidates = pool.len(), kind = ?kind, "Generated candidates");

        let validator = Validator::new(&self.ontology, self.tagger.as_ref(), &self.config.validation);
        ranker::rank(pool, &validator, &self.config.ranking, profile.max_results)
    }

    fn extract(&self, text: &str, kind: DocumentKind) -> Vec<RankedSkill> {
        let doc = self.prepare_document(text, kind);
        let weights = self.single_weights(&doc, kind);
        self.rank_document(&doc, weights.as_ref(), kind)
    }

    /// Ranked canonical skills of a résumé.
    pub fn extract_skills(&self, text: &str) -> Vec<RankedSkill> {
        self.extract(text, DocumentKind::Resume)
    }

    /// Ranked canonical keywords of a job description.
    pub fn extract_keywords(&self, text: &str) -> Vec<RankedSkill> {
        self.extract(text, DocumentKind::Job)
    }

    pub fn classify(&self, ranked: &[RankedSkill]) -> ClassifiedSkills {
        let validator = Validator::new(&self.ontology, self.tagger.as_ref(), &self.config.validation);
        let classified =
            Classifier::new(&self.ontology, &validator, &self.config.validation, &self.config.limits).classify(ranked);
        debug_assert!(classified.is_partitioned(), "classified lists overlap: {classified:?}");
        classified
    }

    /// Classified names from re-running the pipeline over a section excerpt.
    fn excerpt_skills(
        &self,
        doc: &PreparedDocument,
        markers: &[&str],
        kind: DocumentKind,
        buckets: &[SkillBucket],
        limit: usize,
    ) -> Vec<String> {
        let Some(excerpt) = doc.sections.excerpt(&doc.prepared, markers) else {
            return Vec::new();
        };
        let ranked = match kind {
            DocumentKind::Resume => self.extract_skills(&excerpt),
            DocumentKind::Job => self.extract_keywords(&excerpt),
        };
        if ranker::is_sentinel(&ranked) {
            return Vec::new();
        }
        self.classify(&ranked)
            .flatten(buckets)
            .into_iter()
            .filter(|name| name != SENTINEL)
            .take(limit)
            .collect()
    }

    fn build_resume(&self, doc: &PreparedDocument, ranked: Vec<RankedSkill>) -> ResumeSkills {
        let limits = &self.config.limits;
        let classified = self.classify(&ranked);
        let project_technologies =
            self.excerpt_skills(doc, PROJECT_MARKERS, DocumentKind::Resume, &SkillBucket::ALL, limits.project_technologies);
        let (text, sections) = (doc.prepared.as_str(), &doc.sections);
        let (tagger, ontology) = (self.tagger.as_ref(), self.ontology.as_ref());

        ResumeSkills {
            classified,
            ranked_skills: ranked,
            project_technologies,
            soft_skills: profile::extract_soft_skills(text, limits.soft_skills),
            candidate_name: profile::extract_candidate_name(text, sections, tagger),
            email: profile::extract_email(text),
            phone: profile::extract_phone(text),
            location: profile::extract_location(text, tagger, ontology),
            education_degrees: profile::extract_education_degrees(text),
            education_fields: profile::extract_education_fields(text, sections),
            education_institutions: profile::extract_education_institutions(text, sections, tagger, ontology),
            experience_roles: profile::extract_experience_roles(text, sections),
            experience_companies: profile::extract_experience_companies(text, sections, tagger, ontology),
            experience_date_ranges: profile::extract_experience_date_ranges(text),
            experience_years_estimated: profile::estimate_experience_years(text, Utc::now().year()),
            project_titles: profile::extract_project_titles(text, sections),
            certifications: profile::extract_certifications(text, sections),
            education_entries: profile::extract_education_entries(text, sections),
            experience_entries: profile::extract_experience_entries(text, sections, tagger, ontology),
        }
    }

    fn build_job(&self, doc: &PreparedDocument, ranked: Vec<RankedSkill>) -> JobSkills {
        let limit = self.config.limits.job_subsets;
        let classified = self.classify(&ranked);

        JobSkills {
            classified,
            ranked_keywords: ranked,
            nice_to_have_skills: self.excerpt_skills(doc, NICE_TO_HAVE_MARKERS, DocumentKind::Job, &JOB_SUBSET_BUCKETS, limit),
            responsibility_tech_terms: self.excerpt_skills(
                doc,
                RESPONSIBILITY_MARKERS,
                DocumentKind::Job,
                &JOB_SUBSET_BUCKETS,
                limit,
            ),
            job_role: profile::extract_job_role(&doc.prepared),
            required_experience_years: profile::required_experience_years(&doc.prepared),
            required_education: profile::extract_education_degrees(&doc.prepared),
        }
    }

    pub fn parse_resume(&self, text: &str) -> ResumeSkills {
        let doc = self.prepare_document(text, DocumentKind::Resume);
        let weights = self.single_weights(&doc, DocumentKind::Resume);
        let ranked = self.rank_document(&doc, weights.as_ref(), DocumentKind::Resume);
        debug!(ranked = ranked.len(), "Parsed resume");
        self.build_resume(&doc, ranked)
    }

    pub fn parse_job_description(&self, text: &str) -> JobSkills {
        let doc = self.prepare_document(text, DocumentKind::Job);
        let weights = self.single_weights(&doc, DocumentKind::Job);
        let ranked = self.rank_document(&doc, weights.as_ref(), DocumentKind::Job);
        debug!(ranked = ranked.len(), "Parsed job description");
        self.build_job(&doc, ranked)
    }

    /// Both documents weighed against the shared two-document corpus. Each side keeps its own
    /// n-gram and vocabulary settings.
    pub fn analyze_pair(&self, resume_text: &str, job_text: &str) -> PairSkills {
        let resume = self.prepare_document(resume_text, DocumentKind::Resume);
        let job = self.prepare_document(job_text, DocumentKind::Job);
        let corpus = [resume.tokens.clone(), job.tokens.clone()];

        let resume_weights = tfidf::weigh(&corpus, self.config.resume.tfidf).into_iter().next();
        let job_weights = tfidf::weigh(&corpus, self.config.job.tfidf).into_iter().nth(1);

        let resume_ranked = self.rank_document(&resume, resume_weights.as_ref(), DocumentKind::Resume);
        let job_ranked = self.rank_document(&job, job_weights.as_ref(), DocumentKind::Job);
        debug!(
            resume_ranked = resume_ranked.len(),
            job_ranked = job_ranked.len(),
            "Analyzed resume/job pair"
        );

        PairSkills {
            resume: self.build_resume(&resume, resume_ranked),
            job: self.build_job(&job, job_ranked),
        }
    }
}
