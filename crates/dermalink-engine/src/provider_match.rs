//! Provider compatibility scoring.
//!
//! Scores provider-authored offerings against the patient profile and the
//! chosen protocol. Sub-scores are all-or-nothing; the total tops out at
//! 100 and every satisfied sub-criterion contributes one human-readable
//! match detail.

use dermalink_core::models::profile::PatientProfile;
use dermalink_core::models::provider::ProviderSolution;

/// How many offerings a match request returns.
pub const SHORTLIST_SIZE: usize = 3;

/// Fixed device vocabulary checked against the chosen protocol's name.
/// First match wins; no double counting.
pub const DEVICE_VOCABULARY: [&str; 12] = [
    "ulthera", "shurink", "inmode", "forma", "titan", "potenza", "rejuran", "juvelook", "ldm",
    "pico", "thermage", "exosome",
];

const FOCUS_POINTS: u8 = 40;
const DEVICE_POINTS: u8 = 30;
const PAIN_POINTS: u8 = 15;
const DOWNTIME_POINTS: u8 = 10;
/// Flat participation bonus standing in for unmodeled factors (location,
/// availability). A placeholder, not a real signal.
const PARTICIPATION_POINTS: u8 = 5;

/// A scored offering, holding a reference into the roster.
#[derive(Debug)]
pub struct ScoredSolution<'a> {
    pub solution: &'a ProviderSolution,
    pub score: u8,
    pub details: Vec<String>,
}

/// Score one offering against the profile and the chosen protocol name.
pub fn score_solution(
    profile: &PatientProfile,
    chosen_protocol: &str,
    solution: &ProviderSolution,
) -> (u8, Vec<String>) {
    let mut score = 0u8;
    let mut details = Vec::new();

    // A. Focus-category overlap with the primary goal, with synonym
    // bridging for vocabularies that name the same concern differently.
    let goal = profile.primary_goal.to_lowercase();
    let focus = solution.focus_category.trim().to_lowercase();
    if !focus.is_empty() {
        if goal.contains(&focus) || focus.contains(&goal) {
            score += FOCUS_POINTS;
            details.push(format!("Addresses your goal of {focus}"));
        } else if focus == "texture" && (goal.contains("pore") || goal.contains("scar")) {
            score += FOCUS_POINTS;
            details.push("Addresses your concern for texture and pores".to_string());
        } else if focus == "lifting" && (goal.contains("sagging") || goal.contains("elasticity")) {
            score += FOCUS_POINTS;
            details.push("Specializes in lifting".to_string());
        }
    }

    // B. Device overlap between the fixed vocabulary and the chosen
    // protocol. First hit wins.
    let protocol = chosen_protocol.to_lowercase();
    let offering_kit = solution
        .devices
        .iter()
        .chain(solution.boosters.iter())
        .map(|d| d.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");
    for key in DEVICE_VOCABULARY {
        if protocol.contains(key) && offering_kit.contains(key) {
            score += DEVICE_POINTS;
            details.push(format!("Uses {key} as recommended"));
            break;
        }
    }

    // C. Constraint compatibility — all-or-nothing, never partial, never
    // negative.
    if profile.pain_tolerance >= solution.pain_level {
        score += PAIN_POINTS;
        details.push("Within your pain tolerance".to_string());
    }
    if profile.downtime_tolerance >= solution.downtime_level {
        score += DOWNTIME_POINTS;
        details.push("Fits your downtime preference".to_string());
    }

    // D. Participation bonus.
    score += PARTICIPATION_POINTS;
    details.push("Verified partner clinic".to_string());

    (score, details)
}

/// Score the whole roster and return the top offerings, ties broken by
/// stable roster order.
pub fn shortlist<'a>(
    profile: &PatientProfile,
    chosen_protocol: &str,
    roster: &'a [ProviderSolution],
) -> Vec<ScoredSolution<'a>> {
    let mut scored: Vec<ScoredSolution<'a>> = roster
        .iter()
        .map(|solution| {
            let (score, details) = score_solution(profile, chosen_protocol, solution);
            ScoredSolution {
                solution,
                score,
                details,
            }
        })
        .collect();

    // Stable sort: equal scores keep roster order.
    scored.sort_by_key(|s| std::cmp::Reverse(s.score));
    scored.truncate(SHORTLIST_SIZE);
    scored
}
