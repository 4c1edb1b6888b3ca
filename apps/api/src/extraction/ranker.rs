//! Ranker: composite scoring, stable ordering, truncation and the final membership pass.

use crate::extraction::candidates::{Candidate, CandidatePool};
use crate::extraction::settings::RankingWeights;
use crate::extraction::validator::Validator;
use crate::models::skills::RankedSkill;

/// Returned alone when nothing survives.
pub const SENTINEL: &str = "general";

pub fn composite_score(candidate: &Candidate, weights: &RankingWeights) -> f64 {
    let context = if candidate.context_bonus { weights.context } else { 0.0 };
    candidate.accumulated_score
        + f64::from(candidate.frequency)
        + weights.statistical * candidate.statistical_weight
        + context
        + weights.per_token * candidate.token_count() as f64
        + candidate.section_priority
}

/// Filters, scores and orders the pool (ties keep first-seen order), then keeps candidates
/// passing the final membership test until `max_results` are collected.
pub fn rank(
    pool: CandidatePool,
    validator: &Validator<'_>,
    weights: &RankingWeights,
    max_results: usize,
) -> Vec<RankedSkill> {
    if pool.is_empty() {
        return sentinel();
    }
    let mut scored: Vec<RankedSkill> = pool
        .into_vec()
        .into_iter()
        .filter(|c| validator.passes_filters(c))
        .map(|c| RankedSkill {
            score: composite_score(&c, weights),
            name: c.normalized_phrase,
        })
        .collect();
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));

    let ranked: Vec<RankedSkill> = scored
        .into_iter()
        .filter(|s| validator.is_valid_technical_skill(&s.name))
        .take(max_results)
        .collect();

    if ranked.is_empty() {
        tracing::debug!("No candidate survived ranking; returning sentinel");
        return sentinel();
    }
    ranked
}

fn sentinel() -> Vec<RankedSkill> {
    vec![RankedSkill {
        name: SENTINEL.to_string(),
        score: 0.0,
    }]
}

pub fn is_sentinel(ranked: &[RankedSkill]) -> bool {
    ranked.len() == 1 && ranked[0].name == SENTINEL
}
