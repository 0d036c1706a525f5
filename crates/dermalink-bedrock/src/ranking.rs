//! Reasoning-assisted ranking invocation, parsing, and the hallucination
//! guard.

use aws_sdk_bedrockruntime::Client;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use dermalink_core::models::profile::PatientProfile;
use dermalink_core::models::protocol::ProtocolRecord;

use crate::client::invoke_converse;
use crate::error::BedrockError;
use crate::prompt;

/// One rank slot as returned by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasonedRank {
    pub protocol: String,
    pub score: u8,
    pub reason: String,
    #[serde(default)]
    pub pain: Option<String>,
    #[serde(default)]
    pub downtime: Option<String>,
}

/// The model's full structured response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasonedRanking {
    pub rank1: ReasonedRank,
    pub rank2: ReasonedRank,
    pub rank3: ReasonedRank,
}

impl ReasonedRanking {
    pub fn ranks(&self) -> [&ReasonedRank; 3] {
        [&self.rank1, &self.rank2, &self.rank3]
    }
}

/// Invoke the reasoning model over the supplied candidate list and validate
/// its response. Any failure here is soft for the caller: the deterministic
/// ranker takes over.
pub async fn rank_candidates(
    client: &Client,
    model_id: &str,
    profile: &PatientProfile,
    candidates: &[ProtocolRecord],
) -> Result<ReasonedRanking, BedrockError> {
    let request_id = Uuid::new_v4();
    info!(request_id = %request_id, model_id, candidates = candidates.len(), "starting reasoned ranking");

    let system_prompt = prompt::ranking_system_prompt(profile, candidates);
    let response_text = invoke_converse(
        client,
        model_id,
        &system_prompt,
        "Analyze this patient and rank the candidate protocols.",
    )
    .await?;

    let ranking = parse_ranking(&response_text)?;
    validate_ranking(&ranking, candidates)?;

    info!(request_id = %request_id, "reasoned ranking accepted");

    Ok(ranking)
}

/// Extract and deserialize the JSON object from the model's reply. Models
/// sometimes wrap JSON in prose; everything outside the outermost braces is
/// ignored.
pub fn parse_ranking(text: &str) -> Result<ReasonedRanking, BedrockError> {
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
        BedrockError::SchemaViolation(format!("failed to parse ReasonedRanking: {e}"))
    })
}

/// The hallucination guard: every protocol the model referenced must appear
/// in the candidate list it was given, and the three slots must be
/// distinct. Rejection is absolute — a fabricated treatment never reaches a
/// patient.
pub fn validate_ranking(
    ranking: &ReasonedRanking,
    candidates: &[ProtocolRecord],
) -> Result<(), BedrockError> {
    let known: Vec<String> = candidates
        .iter()
        .map(|c| c.name.trim().to_lowercase())
        .collect();

    let mut seen = Vec::new();
    for rank in ranking.ranks() {
        let name = rank.protocol.trim().to_lowercase();
        if !known.contains(&name) {
            return Err(BedrockError::UnknownProtocol {
                name: rank.protocol.clone(),
            });
        }
        if seen.contains(&name) {
            return Err(BedrockError::SchemaViolation(format!(
                "duplicate protocol across ranks: {}",
                rank.protocol
            )));
        }
        seen.push(name);
    }

    Ok(())
}

/// Resolve a reasoned rank back to its catalog record, case-insensitively.
/// Call only after [`validate_ranking`] has accepted the response.
pub fn resolve_candidate<'a>(
    rank: &ReasonedRank,
    candidates: &'a [ProtocolRecord],
) -> Option<&'a ProtocolRecord> {
    let name = rank.protocol.trim().to_lowercase();
    candidates
        .iter()
        .find(|c| c.name.trim().to_lowercase() == name)
}
