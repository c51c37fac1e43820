//! AI insight narration — pluggable, trait-based engine over aggregated
//! analytics data.
//!
//! Default: `LlmInsightEngine` (Claude via `LlmClient`). Tests use a stub so
//! handlers stay exercisable without a provider.
//!
//! `AppState` holds an `Arc<dyn InsightEngine>`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::analytics::prompts::{INSIGHTS_PROMPT, INSIGHTS_SYSTEM};
use crate::llm_client::LlmClient;

/// Narrative insight sections generated from analytics data.
/// All sections default to empty so degraded responses stay well-formed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AiInsights {
    pub key_insights: Vec<String>,
    pub recommendations: Vec<String>,
    pub trends: Vec<String>,
    pub alerts: Vec<String>,
    pub opportunities: Vec<String>,
}

/// The insight engine trait. Implement this to swap backends without
/// touching the endpoint or handler code.
#[async_trait]
pub trait InsightEngine: Send + Sync {
    /// Produces narrative insight for the given analytics payload.
    /// Never fails: provider errors degrade to empty sections.
    async fn generate(&self, analytics_data: &Value) -> AiInsights;
}

/// Default engine backed by the shared LLM client.
pub struct LlmInsightEngine {
    llm: LlmClient,
}

impl LlmInsightEngine {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl InsightEngine for LlmInsightEngine {
    async fn generate(&self, analytics_data: &Value) -> AiInsights {
        let data = serde_json::to_string_pretty(analytics_data).unwrap_or_default();
        let prompt = INSIGHTS_PROMPT.replace("{analytics_data}", &data);

        match self.llm.call_json::<AiInsights>(&prompt, INSIGHTS_SYSTEM).await {
            Ok(insights) => insights,
            Err(e) => {
                warn!("Insight generation failed, returning empty sections: {e}");
                AiInsights::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insights_deserialize_partial_payload() {
        // A model that omits sections still yields a complete struct.
        let insights: AiInsights =
            serde_json::from_str(r#"{"key_insights": ["headcount is growing"]}"#).unwrap();
        assert_eq!(insights.key_insights.len(), 1);
        assert!(insights.alerts.is_empty());
    }

    #[test]
    fn test_default_is_all_empty() {
        let insights = AiInsights::default();
        assert!(insights.key_insights.is_empty());
        assert!(insights.recommendations.is_empty());
        assert!(insights.trends.is_empty());
        assert!(insights.alerts.is_empty());
        assert!(insights.opportunities.is_empty());
    }
}
