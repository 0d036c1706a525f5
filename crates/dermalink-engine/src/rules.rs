//! Clinical-fit scoring rules.
//!
//! The fit score is not one ad hoc arithmetic blob: it is an ordered
//! pipeline of named pure rules, each `(profile, candidate) → delta`,
//! applied in a fixed order and unit-tested independently. The audit trail
//! of a score is the list of rule names and their deltas.

use dermalink_core::fingerprint;
use dermalink_core::models::profile::PatientProfile;
use dermalink_core::models::protocol::ProtocolRecord;
use dermalink_core::models::tolerance::ToleranceLevel;

/// A named pure scoring rule.
pub struct ScoringRule {
    pub name: &'static str,
    pub apply: fn(&PatientProfile, &ProtocolRecord) -> i32,
}

/// The fixed rule pipeline, applied in order.
pub const SCORING_RULES: [ScoringRule; 4] = [
    ScoringRule {
        name: "goal_alignment",
        apply: goal_alignment,
    },
    ScoringRule {
        name: "pain_preference",
        apply: pain_preference,
    },
    ScoringRule {
        name: "downtime_preference",
        apply: downtime_preference,
    },
    ScoringRule {
        name: "identifier_tiebreak",
        apply: identifier_tiebreak,
    },
];

/// Raw (pre-clamp) fit score: the configured base plus every rule's delta.
pub fn raw_fit_score(profile: &PatientProfile, record: &ProtocolRecord, base: i32) -> i32 {
    SCORING_RULES
        .iter()
        .fold(base, |score, rule| score + (rule.apply)(profile, record))
}

/// +40 when the knowledge store explicitly links the protocol to the
/// patient's primary goal, else +20 for a partial name/keyword match.
fn goal_alignment(profile: &PatientProfile, record: &ProtocolRecord) -> i32 {
    let goal = profile.primary_goal.trim().to_lowercase();
    if goal.is_empty() {
        return 0;
    }

    let linked = record
        .linked_goals
        .iter()
        .any(|g| g.trim().to_lowercase() == goal);
    if linked {
        return 40;
    }

    let name = record.name.to_lowercase();
    if name.contains(&goal) || goal.contains(&name) || record.mentions(&goal) {
        return 20;
    }

    0
}

/// +10 when the protocol's pain level exactly matches the declared
/// tolerance, −10 when it opposes it (two or more ordinal steps away).
/// One step apart is neutral.
fn pain_preference(profile: &PatientProfile, record: &ProtocolRecord) -> i32 {
    preference_delta(profile.pain_tolerance, record.pain_level)
}

/// Downtime analogue of [`pain_preference`].
fn downtime_preference(profile: &PatientProfile, record: &ProtocolRecord) -> i32 {
    preference_delta(profile.downtime_tolerance, record.downtime_level)
}

fn preference_delta(declared: ToleranceLevel, actual: ToleranceLevel) -> i32 {
    match declared.distance(actual) {
        0 => 10,
        1 => 0,
        _ => -10,
    }
}

/// Small deterministic term derived from the protocol's own identifier.
/// Stabilizes ordering among otherwise-equal candidates without depending
/// on catalog position alone; reproducible across processes and releases.
fn identifier_tiebreak(_profile: &PatientProfile, record: &ProtocolRecord) -> i32 {
    (fingerprint::fnv1a64(record.id.as_bytes()) % 3) as i32
}
