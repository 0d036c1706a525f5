//! Profile Normalizer.
//!
//! Turns a raw, possibly partially-filled survey payload into a canonical
//! [`PatientProfile`]. The wizard is expected to enforce its own rules; this
//! code does not trust it. Missing answers get defaults rather than
//! rejections — this is a pre-consultation tool, and a degraded profile
//! beats a hard validation failure.

use tracing::warn;
use uuid::Uuid;

use dermalink_core::models::language::Language;
use dermalink_core::models::profile::PatientProfile;
use dermalink_core::models::survey::{RawSurveyPayload, RetuneOverrides};
use dermalink_core::models::tolerance::ToleranceLevel;

/// Default pain tolerance when the answer is missing or unrecognized.
pub const DEFAULT_PAIN_TOLERANCE: ToleranceLevel = ToleranceLevel::Medium;
/// Default downtime tolerance when the answer is missing or unrecognized.
pub const DEFAULT_DOWNTIME_TOLERANCE: ToleranceLevel = ToleranceLevel::Low;
/// Generic goal substituted when the survey carries none.
pub const DEFAULT_GOAL: &str = "Skin Improvement";

/// Sentinel answer for "none of these" in multi-select questions.
const NONE_SENTINEL: &str = "none";

// Survey phrasing per language for the tolerance questions. Matching is a
// case-insensitive containment check against the coalesced answer.
const PAIN_LOW: &[&str] = &["prefer minimal pain", "통증은 최대한 피하고 싶음", "痛みはなるべく避けたい", "low"];
const PAIN_MEDIUM: &[&str] = &["moderate is okay", "약간은 괜찮음", "多少なら大丈夫", "medium", "mid", "moderate"];
const PAIN_HIGH: &[&str] = &["high tolerance", "효과가 좋다면 상관없음", "high"];

const DOWNTIME_NONE: &[&str] = &["daily life immediately", "당일~다음날 일상 가능", "none"];
const DOWNTIME_SHORT: &[&str] = &["short (3–4 days)", "3–4일 정도", "short", "low"];
const DOWNTIME_LONG: &[&str] = &["1 week+", "1주 이상도 괜찮음", "long", "high"];

/// Produce a canonical profile from a raw survey payload.
///
/// `requested_language` (e.g. a `?lang=` query parameter) outranks the
/// language stored with the survey.
pub fn normalize_survey(
    payload: &RawSurveyPayload,
    requested_language: Option<Language>,
) -> PatientProfile {
    let language = requested_language
        .or(payload.language)
        .unwrap_or_default();

    let pain_tolerance = payload
        .pain_tolerance
        .coalesce(language)
        .and_then(|answer| parse_tolerance(answer, PAIN_LOW, PAIN_MEDIUM, PAIN_HIGH))
        .unwrap_or(DEFAULT_PAIN_TOLERANCE);

    let downtime_tolerance = payload
        .downtime_tolerance
        .coalesce(language)
        .and_then(|answer| {
            parse_tolerance(answer, DOWNTIME_NONE, DOWNTIME_SHORT, DOWNTIME_LONG).map(
                |level| match level {
                    // The downtime question's three buckets sit lower on the
                    // shared scale than the pain question's.
                    ToleranceLevel::Low => ToleranceLevel::None,
                    ToleranceLevel::Medium => ToleranceLevel::Low,
                    other => other,
                },
            )
        })
        .unwrap_or(DEFAULT_DOWNTIME_TOLERANCE);

    let primary_goal = match payload.primary_goal.as_deref() {
        Some(goal) if !goal.trim().is_empty() => goal.trim().to_string(),
        _ => {
            warn!("survey missing primary goal, defaulting to '{DEFAULT_GOAL}'");
            DEFAULT_GOAL.to_string()
        }
    };

    PatientProfile {
        id: payload.patient_id.unwrap_or_else(Uuid::new_v4),
        age_band: payload.age_band.clone(),
        gender: payload.gender.clone(),
        country: payload.country.clone(),
        primary_goal,
        secondary_goal: payload
            .secondary_goal
            .clone()
            .filter(|g| !g.trim().is_empty()),
        risks: dedup_multi_select(&payload.risks),
        areas: dedup_multi_select(&payload.areas),
        skin_type: payload.skin_type.clone(),
        acne_status: payload.acne_status.clone(),
        pigment_pattern: dedup_multi_select(&payload.pigment_type),
        pore_type: payload.pore_type.clone(),
        priority_area: payload.priority_area.clone(),
        pain_tolerance,
        downtime_tolerance,
        budget: payload.budget.unwrap_or_default(),
        treatment_history: dedup_multi_select(&payload.treatment_history),
        language,
    }
}

/// Apply re-tune overrides, producing a NEW profile value. The stored
/// profile of any prior report is never mutated.
pub fn apply_overrides(profile: &PatientProfile, overrides: &RetuneOverrides) -> PatientProfile {
    let mut tuned = profile.clone();
    if let Some(pain) = overrides.pain_tolerance {
        tuned.pain_tolerance = pain;
    }
    if let Some(downtime) = overrides.downtime_tolerance {
        tuned.downtime_tolerance = downtime;
    }
    tuned
}

/// Deduplicate a multi-select answer, preserving first-seen order, and
/// re-enforce "none" exclusivity: if the sentinel appears alongside real
/// values, the sentinel wins and the rest are dropped.
fn dedup_multi_select(values: &[String]) -> Vec<String> {
    if values
        .iter()
        .any(|v| v.trim().eq_ignore_ascii_case(NONE_SENTINEL))
    {
        return vec![NONE_SENTINEL.to_string()];
    }

    let mut seen = Vec::new();
    for value in values {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !seen.iter().any(|s: &String| s.eq_ignore_ascii_case(trimmed)) {
            seen.push(trimmed.to_string());
        }
    }
    seen
}

fn parse_tolerance(
    answer: &str,
    low: &[&str],
    medium: &[&str],
    high: &[&str],
) -> Option<ToleranceLevel> {
    let normalized = answer.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }
    // Most-specific bucket first: "low" is a substring of nothing here, but
    // the localized phrases overlap in punctuation, so order is deliberate.
    if low.iter().any(|p| normalized.contains(p)) {
        Some(ToleranceLevel::Low)
    } else if high.iter().any(|p| normalized.contains(p)) {
        Some(ToleranceLevel::High)
    } else if medium.iter().any(|p| normalized.contains(p)) {
        Some(ToleranceLevel::Medium)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use dermalink_core::models::language::Localized;
    use dermalink_core::models::profile::BudgetTier;

    use super::*;

    fn localized(lang: Language, value: &str) -> Localized<String> {
        [(lang, value.to_string())].into_iter().collect()
    }

    #[test]
    fn empty_payload_gets_all_defaults() {
        let profile = normalize_survey(&RawSurveyPayload::default(), None);

        assert_eq!(profile.primary_goal, "Skin Improvement");
        assert_eq!(profile.pain_tolerance, ToleranceLevel::Medium);
        assert_eq!(profile.downtime_tolerance, ToleranceLevel::Low);
        assert_eq!(profile.budget, BudgetTier::Standard);
        assert_eq!(profile.language, Language::En);
        assert!(profile.risks.is_empty());
    }

    #[test]
    fn tolerance_phrases_parse_per_language() {
        let payload = RawSurveyPayload {
            pain_tolerance: localized(Language::Ko, "통증은 최대한 피하고 싶음"),
            downtime_tolerance: localized(Language::Ko, "당일~다음날 일상 가능"),
            language: Some(Language::Ko),
            ..Default::default()
        };

        let profile = normalize_survey(&payload, None);
        assert_eq!(profile.pain_tolerance, ToleranceLevel::Low);
        assert_eq!(profile.downtime_tolerance, ToleranceLevel::None);
    }

    #[test]
    fn downtime_buckets_map_below_pain_buckets() {
        let payload = RawSurveyPayload {
            downtime_tolerance: localized(Language::En, "Short (3–4 days)"),
            ..Default::default()
        };
        assert_eq!(
            normalize_survey(&payload, None).downtime_tolerance,
            ToleranceLevel::Low
        );

        let payload = RawSurveyPayload {
            downtime_tolerance: localized(Language::En, "Long (1 week+)"),
            ..Default::default()
        };
        assert_eq!(
            normalize_survey(&payload, None).downtime_tolerance,
            ToleranceLevel::High
        );
    }

    #[test]
    fn unrecognized_tolerance_phrase_falls_back_to_default() {
        let payload = RawSurveyPayload {
            pain_tolerance: localized(Language::En, "whatever you think is best"),
            ..Default::default()
        };
        assert_eq!(
            normalize_survey(&payload, None).pain_tolerance,
            ToleranceLevel::Medium
        );
    }

    #[test]
    fn requested_language_outranks_stored_language() {
        let mut pain = Localized::new();
        pain.insert(Language::En, "High tolerance".to_string());
        pain.insert(Language::Jp, "痛みはなるべく避けたい".to_string());

        let payload = RawSurveyPayload {
            pain_tolerance: pain,
            language: Some(Language::En),
            ..Default::default()
        };

        let profile = normalize_survey(&payload, Some(Language::Jp));
        assert_eq!(profile.language, Language::Jp);
        assert_eq!(profile.pain_tolerance, ToleranceLevel::Low);
    }

    #[test]
    fn multi_selects_are_deduplicated_in_order() {
        let payload = RawSurveyPayload {
            risks: vec![
                "melasma".to_string(),
                "acne".to_string(),
                "Melasma".to_string(),
                " acne ".to_string(),
            ],
            ..Default::default()
        };

        let profile = normalize_survey(&payload, None);
        assert_eq!(profile.risks, vec!["melasma", "acne"]);
    }

    #[test]
    fn none_sentinel_wins_over_co_selected_values() {
        let payload = RawSurveyPayload {
            risks: vec!["melasma".to_string(), "None".to_string(), "acne".to_string()],
            ..Default::default()
        };

        let profile = normalize_survey(&payload, None);
        assert_eq!(profile.risks, vec!["none"]);
    }

    #[test]
    fn overrides_produce_a_new_profile_value() {
        let profile = normalize_survey(&RawSurveyPayload::default(), None);
        let overrides = RetuneOverrides {
            pain_tolerance: Some(ToleranceLevel::High),
            downtime_tolerance: None,
        };

        let tuned = apply_overrides(&profile, &overrides);
        assert_eq!(tuned.id, profile.id);
        assert_eq!(tuned.pain_tolerance, ToleranceLevel::High);
        assert_eq!(tuned.downtime_tolerance, profile.downtime_tolerance);
        // The original is untouched.
        assert_eq!(profile.pain_tolerance, ToleranceLevel::Medium);
        assert_ne!(tuned.fingerprint(), profile.fingerprint());
    }
}
