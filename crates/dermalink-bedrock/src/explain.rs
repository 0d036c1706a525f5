//! "Why not this device" explanations.
//!
//! Patients ask why a device they saw advertised is not their top
//! recommendation. The explanation is constrained to a named device from
//! the inventory and returns structured reasoning rather than free prose.

use aws_sdk_bedrockruntime::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use dermalink_core::models::profile::PatientProfile;

use crate::client::invoke_converse;
use crate::error::BedrockError;
use crate::prompt::build_profile_block;

/// Structured explanation of a device's suitability for a patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceExplanation {
    pub device_name: String,
    pub characteristics: String,
    pub pain_downtime: String,
    pub reasoning_steps: Vec<String>,
    pub suitability_score: u8,
    pub precautions: String,
    pub conclusion: String,
}

/// Ask the model why `device_name` is not the top recommendation for this
/// patient. Soft-failure semantics: callers surface "unavailable", never an
/// internal error.
pub async fn explain_device(
    client: &Client,
    model_id: &str,
    profile: &PatientProfile,
    device_name: &str,
    device_notes: Option<&str>,
) -> Result<DeviceExplanation, BedrockError> {
    let system_prompt = explain_system_prompt(profile, device_name, device_notes);

    let response_text = invoke_converse(
        client,
        model_id,
        &system_prompt,
        &format!("Why is {device_name} not the top recommendation for me?"),
    )
    .await?;

    let explanation = parse_explanation(&response_text)?;

    info!(
        device_name,
        suitability = explanation.suitability_score,
        "device explanation generated"
    );

    Ok(explanation)
}

pub fn explain_system_prompt(
    profile: &PatientProfile,
    device_name: &str,
    device_notes: Option<&str>,
) -> String {
    format!(
        "You are a clinical intelligence engine for aesthetic dermatology. Explain why a \
specific device is not recommended for this patient, or what precautions apply.\n\n\
{profile_block}\n\n\
<target_device>\nname: {device_name}\nnotes: {notes}\n</target_device>\n\n\
Return ONLY a JSON object with keys: \"deviceName\", \"characteristics\", \
\"painDowntime\", \"reasoningSteps\" (array of strings), \"suitabilityScore\" \
(integer 0-100), \"precautions\", \"conclusion\". Reference specific patient data in \
every reasoning step.",
        profile_block = build_profile_block(profile),
        notes = device_notes.unwrap_or("N/A"),
    )
}

pub fn parse_explanation(text: &str) -> Result<DeviceExplanation, BedrockError> {
    let start = text
        .find('{')
        .ok_or_else(|| BedrockError::ResponseParse("no JSON object in response".to_string()))?;
    let end = text
        .rfind('}')
        .ok_or_else(|| BedrockError::ResponseParse("unterminated JSON object".to_string()))?;
    if end < start {
        return Err(BedrockError::ResponseParse(
            "unterminated JSON object".to_string(),
        ));
    }

    serde_json::from_str(&text[start..=end]).map_err(|e| {
        BedrockError::SchemaViolation(format!("failed to parse DeviceExplanation: {e}"))
    })
}
