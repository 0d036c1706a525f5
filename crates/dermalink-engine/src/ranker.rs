//! Tiered role-based ranker.
//!
//! The three output slots are not top-3-by-score; each has its own
//! selection rule (clinical fit, trending preference, stretch goal) layered
//! over the shared fit-score pipeline. Ordering is fully deterministic:
//! fit scores carry an identifier-derived tie-break term, and any remaining
//! ties resolve by stable catalog order.

use serde::{Deserialize, Serialize};
use tracing::debug;

use dermalink_core::models::profile::PatientProfile;
use dermalink_core::models::protocol::ProtocolRecord;
use dermalink_core::models::recommendation::{RankRole, RankedRecommendation};
use dermalink_core::models::trends::TrendingKeywords;

use crate::error::EngineError;
use crate::filter;
use crate::rationale;
use crate::rules;

/// Product-tuned ranking constants.
///
/// The gaps and the rank-1 floor have no documented clinical basis; they are
/// kept as configuration rather than inferred meaning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RankerConfig {
    /// Minimum score gap between rank 1 and rank 2.
    pub gap1: u8,
    /// Minimum score gap between rank 2 and rank 3.
    pub gap2: u8,
    /// Confidence floor applied to the rank-1 score.
    pub rank1_floor: u8,
    pub score_min: u8,
    pub score_max: u8,
    /// Base added before the rule deltas.
    pub base_score: i32,
}

impl Default for RankerConfig {
    fn default() -> Self {
        RankerConfig {
            gap1: 3,
            gap2: 2,
            rank1_floor: 88,
            score_min: 60,
            score_max: 99,
            base_score: 55,
        }
    }
}

/// Mark each catalog record's trending flag from the injected keyword list.
pub fn annotate_trending(
    catalog: &[ProtocolRecord],
    trending: &TrendingKeywords,
) -> Vec<ProtocolRecord> {
    catalog
        .iter()
        .cloned()
        .map(|mut record| {
            record.trending = trending.keywords.iter().any(|k| record.mentions(k));
            record
        })
        .collect()
}

struct Candidate {
    eligible: bool,
    stretch: bool,
    trending: bool,
    fit: i32,
}

/// Rank a catalog for a profile.
///
/// Returns up to three recommendations with distinct protocol ids; exactly
/// three whenever the catalog holds at least three protocols. The only
/// error is an entirely empty catalog.
pub fn rank(
    profile: &PatientProfile,
    catalog: &[ProtocolRecord],
    trending: &TrendingKeywords,
    config: &RankerConfig,
) -> Result<Vec<RankedRecommendation>, EngineError> {
    if catalog.is_empty() {
        return Err(EngineError::CatalogUnavailable);
    }

    let annotated = annotate_trending(catalog, trending);
    let outcome = filter::apply(profile, &annotated);

    let candidates: Vec<Candidate> = annotated
        .iter()
        .map(|record| Candidate {
            eligible: filter::is_eligible(profile, record),
            stretch: filter::is_stretch(profile, record),
            trending: record.trending,
            fit: rules::raw_fit_score(profile, record, config.base_score),
        })
        .collect();

    let mut used: Vec<usize> = Vec::new();

    // Rank 1 — ClinicalFit. Under widening the pool contains ineligible
    // records too, so eligibility stays the primary sort criterion.
    let pick1 = select(
        &candidates,
        outcome.pool.iter().copied(),
        &used,
        |c| (c.eligible, c.fit),
    );

    let Some(idx1) = pick1 else {
        return Err(EngineError::CatalogUnavailable);
    };
    used.push(idx1);

    // Rank 2 — TrendingMatch: prefer trending candidates, falling back to
    // the next-best clinical fit. Eligibility still outranks trending.
    let pick2 = select(
        &candidates,
        outcome.pool.iter().copied(),
        &used,
        |c| (c.eligible, c.trending, c.fit),
    );

    // Rank 3 — StretchGoal: exactly one step above the declared ceiling,
    // drawn from the whole catalog (it is outside eligibility by design).
    // Fallbacks keep the slot distinct rather than role-faithful.
    let pick3_pool = 0..candidates.len();
    let mut used3 = used.clone();
    if let Some(idx2) = pick2 {
        used3.push(idx2);
    }
    let pick3 = select(&candidates, pick3_pool.clone(), &used3, |c| {
        (c.stretch, c.fit)
    })
    .filter(|&idx| candidates[idx].stretch)
    .or_else(|| select(&candidates, pick3_pool.clone(), &used3, |c| (c.eligible, c.fit)));

    debug!(?pick1, ?pick2, ?pick3, widened = outcome.widened, "rank slots selected");

    let mut recommendations = Vec::with_capacity(3);

    let score1 = clamp(candidates[idx1].fit, config).max(config.rank1_floor);
    recommendations.push(build(profile, &annotated[idx1], 1, score1));

    if let Some(idx2) = pick2 {
        let score2 = clamp(candidates[idx2].fit, config)
            .min(score1 - config.gap1)
            .max(config.score_min + config.gap2);
        recommendations.push(build(profile, &annotated[idx2], 2, score2));

        if let Some(idx3) = pick3 {
            let score3 = clamp(candidates[idx3].fit, config).min(score2 - config.gap2);
            recommendations.push(build(profile, &annotated[idx3], 3, score3));
        }
    }

    Ok(recommendations)
}

/// Pick the unused index with the greatest key. Only a strictly greater key
/// replaces the current best, so equal keys resolve to the earliest catalog
/// position — the stable-order guarantee.
fn select<I, K>(
    candidates: &[Candidate],
    indices: I,
    used: &[usize],
    key: impl Fn(&Candidate) -> K,
) -> Option<usize>
where
    I: IntoIterator<Item = usize>,
    K: Ord,
{
    let mut best: Option<(K, usize)> = None;
    for idx in indices {
        if used.contains(&idx) {
            continue;
        }
        let k = key(&candidates[idx]);
        let replace = match &best {
            Some((best_key, _)) => k > *best_key,
            None => true,
        };
        if replace {
            best = Some((k, idx));
        }
    }
    best.map(|(_, idx)| idx)
}

fn clamp(fit: i32, config: &RankerConfig) -> u8 {
    fit.clamp(i32::from(config.score_min), i32::from(config.score_max)) as u8
}

fn build(
    profile: &PatientProfile,
    record: &ProtocolRecord,
    rank: u8,
    score: u8,
) -> RankedRecommendation {
    let role = RankRole::for_rank(rank);
    RankedRecommendation {
        protocol_id: record.id.clone(),
        protocol_name: record.name.clone(),
        rank,
        role,
        score,
        rationale: rationale::deterministic_rationale(profile, record, role),
        devices: record.devices.clone(),
        boosters: record.boosters.clone(),
        pain_level: record.pain_level,
        downtime_level: record.downtime_level,
        sessions_total: record.sessions_total,
    }
}
