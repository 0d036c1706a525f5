//! Ranking prompt construction.
//!
//! The model never sees the raw catalog — only the filtered,
//! trending-annotated candidate list, rendered as a structured block, with
//! the three role rules stated as hard constraints.

use dermalink_core::models::profile::PatientProfile;
use dermalink_core::models::protocol::ProtocolRecord;

/// Render the candidate list as a structured block for the system prompt.
/// Empty input renders an empty string.
pub fn build_candidate_block(candidates: &[ProtocolRecord]) -> String {
    if candidates.is_empty() {
        return String::new();
    }

    let mut block = String::from("<candidate_protocols>\n");

    for record in candidates {
        block.push_str(&format!(
            "<protocol name=\"{}\" pain=\"{}\" downtime=\"{}\" sessions=\"{}\" trending=\"{}\">\n",
            record.name,
            record.pain_level.label(),
            record.downtime_level.label(),
            record.sessions_total,
            record.trending,
        ));
        if !record.devices.is_empty() {
            block.push_str(&format!("devices: {}\n", record.devices.join(", ")));
        }
        if !record.boosters.is_empty() {
            block.push_str(&format!("boosters: {}\n", record.boosters.join(", ")));
        }
        if let Some(notes) = &record.notes {
            block.push_str(notes);
            if !notes.ends_with('\n') {
                block.push('\n');
            }
        }
        block.push_str("</protocol>\n");
    }

    block.push_str("</candidate_protocols>");
    block
}

/// Render the patient profile as a structured block.
pub fn build_profile_block(profile: &PatientProfile) -> String {
    let mut block = String::from("<patient_profile>\n");
    block.push_str(&format!("primary_goal: {}\n", profile.primary_goal));
    if let Some(secondary) = &profile.secondary_goal {
        block.push_str(&format!("secondary_goal: {secondary}\n"));
    }
    if !profile.risks.is_empty() {
        block.push_str(&format!("risk_factors: {}\n", profile.risks.join(", ")));
    }
    if !profile.areas.is_empty() {
        block.push_str(&format!("treatment_areas: {}\n", profile.areas.join(", ")));
    }
    if let Some(skin) = &profile.skin_type {
        block.push_str(&format!("skin_type: {skin}\n"));
    }
    block.push_str(&format!(
        "pain_tolerance: {}\n",
        profile.pain_tolerance.label()
    ));
    block.push_str(&format!(
        "downtime_tolerance: {}\n",
        profile.downtime_tolerance.label()
    ));
    if !profile.treatment_history.is_empty() {
        block.push_str(&format!(
            "treatment_history: {}\n",
            profile.treatment_history.join(", ")
        ));
    }
    block.push_str("</patient_profile>");
    block
}

/// Full system prompt for the ranking invocation.
pub fn ranking_system_prompt(profile: &PatientProfile, candidates: &[ProtocolRecord]) -> String {
    format!(
        "You are a clinical intelligence engine for aesthetic dermatology. \
Rank treatment protocols for the patient below.\n\n\
{profile_block}\n\n\
{candidate_block}\n\n\
HARD CONSTRAINTS:\n\
1. rank1 is the strongest clinical fit for the patient's primary goal within their \
declared pain and downtime tolerances.\n\
2. rank2 prefers a protocol marked trending=\"true\"; if none qualifies, use the \
next-best clinical fit.\n\
3. rank3 is an aspirational option whose pain or downtime sits exactly one step above \
the patient's declared tolerance.\n\
4. Every protocol you reference MUST be copied verbatim from the candidate list above. \
Never invent, rename, or combine protocols.\n\
5. All three ranks must reference distinct protocols.\n\n\
Return ONLY a JSON object with keys \"rank1\", \"rank2\", \"rank3\". Each value must \
have: \"protocol\" (exact candidate name), \"score\" (integer 60-99, strictly \
descending across ranks), \"reason\" (a clinical explanation referencing specific \
patient data), \"pain\" and \"downtime\" (echo of the protocol's levels).",
        profile_block = build_profile_block(profile),
        candidate_block = build_candidate_block(candidates),
    )
}
