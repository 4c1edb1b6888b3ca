//! Tunable extraction constants.
//!
//! Defaults are the tuned values; a JSON file (see `EXTRACTION_CONFIG_PATH`) may override any
//! subset of them. `validate` runs once at startup.

use serde::{Deserialize, Serialize};

use crate::errors::EngineError;
use crate::extraction::tfidf::TfidfParams;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub max_document_chars: usize,
    pub validation: ValidationRules,
    pub context: ContextRules,
    pub ranking: RankingWeights,
    pub resume: ProfileConfig,
    pub job: ProfileConfig,
    pub limits: OutputLimits,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRules {
    /// Longest mined phrase, in tokens.
    pub max_phrase_tokens: usize,
    /// Longest candidate after normalisation, in tokens.
    pub max_normalized_tokens: usize,
    pub junk_stopword_ratio: f64,
    pub structural_stopword_ratio: f64,
    /// Shortest canonical name allowed to match as a substring during category lookup.
    pub min_substring_match_len: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextRules {
    /// Tokens on either side of an action verb.
    pub window: usize,
    pub bonus: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingWeights {
    pub statistical: f64,
    pub context: f64,
    pub per_token: f64,
}

/// A TF-IDF weight threshold and the score it adds. Bands are checked highest first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightBand {
    pub above: f64,
    pub bonus: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub max_results: usize,
    pub tfidf: TfidfParams,
    pub bands: Vec<WeightBand>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputLimits {
    pub technical_skills: usize,
    pub per_bucket: usize,
    pub fallback: usize,
    pub project_technologies: usize,
    pub soft_skills: usize,
    pub job_subsets: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_document_chars: 100_000,
            validation: ValidationRules::default(),
            context: ContextRules::default(),
            ranking: RankingWeights::default(),
            resume: ProfileConfig::resume(),
            job: ProfileConfig::job(),
            limits: OutputLimits::default(),
        }
    }
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            max_phrase_tokens: 4,
            max_normalized_tokens: 3,
            junk_stopword_ratio: 0.5,
            structural_stopword_ratio: 0.4,
            min_substring_match_len: 3,
        }
    }
}

impl Default for ContextRules {
    fn default() -> Self {
        Self {
            window: 10,
            bonus: 3.0,
        }
    }
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            statistical: 10.0,
            context: 2.0,
            per_token: 0.5,
        }
    }
}

impl Default for OutputLimits {
    fn default() -> Self {
        Self {
            technical_skills: 15,
            per_bucket: 10,
            fallback: 15,
            project_technologies: 15,
            soft_skills: 10,
            job_subsets: 10,
        }
    }
}

impl ProfileConfig {
    pub fn resume() -> Self {
        Self {
            max_results: 50,
            tfidf: TfidfParams {
                max_ngram: 4,
                max_features: 100,
            },
            bands: vec![
                WeightBand { above: 0.15, bonus: 5.0 },
                WeightBand { above: 0.08, bonus: 3.0 },
                WeightBand { above: 0.04, bonus: 1.0 },
            ],
        }
    }

    pub fn job() -> Self {
        Self {
            max_results: 25,
            tfidf: TfidfParams {
                max_ngram: 5,
                max_features: 80,
            },
            bands: vec![
                WeightBand { above: 0.10, bonus: 8.0 },
                WeightBand { above: 0.05, bonus: 5.0 },
                WeightBand { above: 0.02, bonus: 2.0 },
            ],
        }
    }

    /// Bonus of the highest band the weight exceeds.
    pub fn band_bonus(&self, weight: f64) -> f64 {
        self.bands
            .iter()
            .find(|b| weight > b.above)
            .map(|b| b.bonus)
            .unwrap_or(0.0)
    }
}

impl ExtractionConfig {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: Self = serde_json::from_str(json).map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        let invalid = |msg: &str| Err(EngineError::InvalidConfig(msg.to_string()));

        if self.max_document_chars == 0 {
            return invalid("max_document_chars must be positive");
        }
        let v = &self.validation;
        if v.max_phrase_tokens == 0 || v.max_normalized_tokens == 0 {
            return invalid("token limits must be positive");
        }
        if v.max_normalized_tokens > v.max_phrase_tokens {
            return invalid("max_normalized_tokens cannot exceed max_phrase_tokens");
        }
        for ratio in [v.junk_stopword_ratio, v.structural_stopword_ratio] {
            if !(0.0..=1.0).contains(&ratio) {
                return invalid("stopword ratios must lie in [0, 1]");
            }
        }
        for (name, profile) in [("resume", &self.resume), ("job", &self.job)] {
            if profile.max_results == 0 {
                return Err(EngineError::InvalidConfig(format!("{name}.max_results must be positive")));
            }
            if profile.tfidf.max_ngram == 0 || profile.tfidf.max_features == 0 {
                return Err(EngineError::InvalidConfig(format!("{name}.tfidf limits must be positive")));
            }
            if profile.bands.windows(2).any(|w| w[0].above <= w[1].above) {
                return Err(EngineError::InvalidConfig(format!(
                    "{name}.bands must be ordered by descending threshold"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ExtractionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_band_bonus_picks_highest_exceeded_band() {
        let resume = ProfileConfig::resume();
        assert_eq!(resume.band_bonus(0.2), 5.0);
        assert_eq!(resume.band_bonus(0.1), 3.0);
        assert_eq!(resume.band_bonus(0.05), 1.0);
        assert_eq!(resume.band_bonus(0.04), 0.0);
        assert_eq!(ProfileConfig::job().band_bonus(0.11), 8.0);
    }

    #[test]
    fn test_partial_json_override_keeps_other_defaults() {
        let config = ExtractionConfig::from_json(r#"{"max_document_chars": 5000, "context": {"window": 4}}"#).unwrap();
        assert_eq!(config.max_document_chars, 5000);
        assert_eq!(config.context.window, 4);
        assert_eq!(config.context.bonus, 3.0);
        assert_eq!(config.resume.max_results, 50);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let err = ExtractionConfig::from_json(r#"{"max_document_chars": 0}"#).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));

        let mut config = ExtractionConfig::default();
        config.job.bands.reverse();
        assert!(config.validate().is_err());
    }
}
