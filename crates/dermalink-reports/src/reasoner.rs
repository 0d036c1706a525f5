//! The reasoning seam.
//!
//! The report service talks to the reasoning collaborator through
//! [`RankingReasoner`], so tests can drive the fallback logic with mocks
//! and the lambda can run with reasoning disabled entirely.

use std::future::Future;

use aws_sdk_bedrockruntime::Client;

use dermalink_bedrock::error::BedrockError;
use dermalink_bedrock::explain::DeviceExplanation;
use dermalink_bedrock::ranking::ReasonedRanking;
use dermalink_core::models::profile::PatientProfile;
use dermalink_core::models::protocol::ProtocolRecord;

/// Consumer-side trait for the optional reasoning service.
pub trait RankingReasoner: Send + Sync {
    /// False means "skip straight to the deterministic path".
    fn enabled(&self) -> bool;

    fn rank(
        &self,
        profile: &PatientProfile,
        candidates: &[ProtocolRecord],
    ) -> impl Future<Output = Result<ReasonedRanking, BedrockError>> + Send;
}

/// Production reasoner: a Bedrock runtime client plus a configured model id,
/// or nothing at all when no model is configured.
#[derive(Clone)]
pub struct Reasoning {
    inner: Option<(Client, String)>,
}

impl Reasoning {
    pub fn bedrock(client: Client, model_id: impl Into<String>) -> Self {
        Reasoning {
            inner: Some((client, model_id.into())),
        }
    }

    pub fn disabled() -> Self {
        Reasoning { inner: None }
    }

    /// Device "why not" explanation. Unlike ranking there is no
    /// deterministic equivalent, so a disabled reasoner is an error the
    /// caller reports as "unavailable".
    pub async fn explain(
        &self,
        profile: &PatientProfile,
        device_name: &str,
        device_notes: Option<&str>,
    ) -> Result<DeviceExplanation, BedrockError> {
        let Some((client, model_id)) = &self.inner else {
            return Err(BedrockError::Config(
                "reasoning service not configured".to_string(),
            ));
        };
        dermalink_bedrock::explain::explain_device(client, model_id, profile, device_name, device_notes)
            .await
    }
}

impl RankingReasoner for Reasoning {
    fn enabled(&self) -> bool {
        self.inner.is_some()
    }

    async fn rank(
        &self,
        profile: &PatientProfile,
        candidates: &[ProtocolRecord],
    ) -> Result<ReasonedRanking, BedrockError> {
        let Some((client, model_id)) = &self.inner else {
            return Err(BedrockError::Config(
                "reasoning service not configured".to_string(),
            ));
        };
        dermalink_bedrock::ranking::rank_candidates(client, model_id, profile, candidates).await
    }
}
