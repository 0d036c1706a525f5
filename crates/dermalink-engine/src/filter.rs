//! Eligibility filter and widening.

use tracing::info;

use dermalink_core::models::profile::PatientProfile;
use dermalink_core::models::protocol::ProtocolRecord;

/// Minimum surviving candidates before the filter is discarded entirely.
pub const MIN_CANDIDATES: usize = 3;

/// Hard ceiling check: a protocol is eligible iff both its pain and
/// downtime levels sit at or below the patient's declared tolerances.
pub fn is_eligible(profile: &PatientProfile, record: &ProtocolRecord) -> bool {
    record.pain_level <= profile.pain_tolerance
        && record.downtime_level <= profile.downtime_tolerance
}

/// Stretch check: exactly one ordinal step above the patient's ceiling on
/// pain or downtime — the deliberately-aspirational pool for rank 3.
pub fn is_stretch(profile: &PatientProfile, record: &ProtocolRecord) -> bool {
    profile.pain_tolerance.step_above() == Some(record.pain_level)
        || profile.downtime_tolerance.step_above() == Some(record.downtime_level)
}

/// Result of applying the eligibility filter to a catalog.
#[derive(Debug)]
pub struct FilterOutcome {
    /// Indices into the catalog slice that survived (or the whole catalog
    /// when widened).
    pub pool: Vec<usize>,
    /// True when the filter was discarded because too few candidates
    /// survived: guaranteeing three outputs takes priority over strict
    /// constraint enforcement.
    pub widened: bool,
}

/// Apply the pain/downtime ceilings, widening to the full catalog when
/// fewer than [`MIN_CANDIDATES`] survive.
pub fn apply(profile: &PatientProfile, catalog: &[ProtocolRecord]) -> FilterOutcome {
    let eligible: Vec<usize> = catalog
        .iter()
        .enumerate()
        .filter(|(_, record)| is_eligible(profile, record))
        .map(|(idx, _)| idx)
        .collect();

    if eligible.len() >= MIN_CANDIDATES {
        FilterOutcome {
            pool: eligible,
            widened: false,
        }
    } else {
        info!(
            surviving = eligible.len(),
            catalog = catalog.len(),
            "eligibility filter too strict, widening to full catalog"
        );
        FilterOutcome {
            pool: (0..catalog.len()).collect(),
            widened: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use dermalink_core::models::language::Language;
    use dermalink_core::models::profile::{BudgetTier, PatientProfile};
    use dermalink_core::models::tolerance::ToleranceLevel;
    use uuid::Uuid;

    use super::*;

    fn profile(pain: ToleranceLevel, downtime: ToleranceLevel) -> PatientProfile {
        PatientProfile {
            id: Uuid::new_v4(),
            age_band: None,
            gender: None,
            country: None,
            primary_goal: "lifting".to_string(),
            secondary_goal: None,
            risks: Vec::new(),
            areas: Vec::new(),
            skin_type: None,
            acne_status: None,
            pigment_pattern: Vec::new(),
            pore_type: None,
            priority_area: None,
            pain_tolerance: pain,
            downtime_tolerance: downtime,
            budget: BudgetTier::Standard,
            treatment_history: Vec::new(),
            language: Language::En,
        }
    }

    fn record(id: &str, pain: ToleranceLevel, downtime: ToleranceLevel) -> ProtocolRecord {
        ProtocolRecord {
            id: id.to_string(),
            name: id.to_string(),
            pain_level: pain,
            downtime_level: downtime,
            target_layers: Vec::new(),
            devices: Vec::new(),
            boosters: Vec::new(),
            sessions_total: 3,
            session_interval_weeks: None,
            notes: None,
            linked_goals: Vec::new(),
            trending: false,
        }
    }

    #[test]
    fn eligibility_requires_both_ceilings() {
        let p = profile(ToleranceLevel::Medium, ToleranceLevel::Low);

        assert!(is_eligible(&p, &record("a", ToleranceLevel::Medium, ToleranceLevel::Low)));
        assert!(is_eligible(&p, &record("b", ToleranceLevel::None, ToleranceLevel::None)));
        // Pain over the ceiling.
        assert!(!is_eligible(&p, &record("c", ToleranceLevel::High, ToleranceLevel::Low)));
        // Downtime over the ceiling.
        assert!(!is_eligible(&p, &record("d", ToleranceLevel::Low, ToleranceLevel::Medium)));
    }

    #[test]
    fn stretch_is_exactly_one_step_above() {
        let p = profile(ToleranceLevel::Low, ToleranceLevel::None);

        assert!(is_stretch(&p, &record("a", ToleranceLevel::Medium, ToleranceLevel::None)));
        assert!(is_stretch(&p, &record("b", ToleranceLevel::Low, ToleranceLevel::VeryLow)));
        // Two steps above is not a stretch candidate.
        assert!(!is_stretch(&p, &record("c", ToleranceLevel::High, ToleranceLevel::None)));
        // Fully inside the ceiling is not a stretch either.
        assert!(!is_stretch(&p, &record("d", ToleranceLevel::Low, ToleranceLevel::None)));
    }

    #[test]
    fn filter_keeps_survivors_when_enough() {
        let p = profile(ToleranceLevel::Medium, ToleranceLevel::Medium);
        let catalog = vec![
            record("a", ToleranceLevel::Low, ToleranceLevel::Low),
            record("b", ToleranceLevel::Medium, ToleranceLevel::None),
            record("c", ToleranceLevel::None, ToleranceLevel::Medium),
            record("d", ToleranceLevel::VeryHigh, ToleranceLevel::VeryHigh),
        ];

        let outcome = apply(&p, &catalog);
        assert!(!outcome.widened);
        assert_eq!(outcome.pool, vec![0, 1, 2]);
    }

    #[test]
    fn filter_widens_below_three_survivors() {
        let p = profile(ToleranceLevel::Low, ToleranceLevel::None);
        let catalog = vec![
            record("a", ToleranceLevel::Low, ToleranceLevel::None),
            record("b", ToleranceLevel::VeryHigh, ToleranceLevel::High),
            record("c", ToleranceLevel::High, ToleranceLevel::Medium),
            record("d", ToleranceLevel::Low, ToleranceLevel::None),
        ];

        let outcome = apply(&p, &catalog);
        assert!(outcome.widened);
        assert_eq!(outcome.pool, vec![0, 1, 2, 3]);
    }
}
