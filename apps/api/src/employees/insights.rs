//! LLM enrichment for the employee domain: performance insight narration and
//! retention briefings. Provider failures degrade to defaults so write paths
//! never fail on an LLM outage.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use crate::analytics::risk::RiskAssessment;
use crate::employees::prompts::{
    PERFORMANCE_INSIGHTS_PROMPT, PERFORMANCE_INSIGHTS_SYSTEM, RETENTION_PROMPT, RETENTION_SYSTEM,
};
use crate::llm_client::LlmClient;
use crate::models::employee::{EmployeeRow, PerformanceEvaluationRow};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceInsights {
    pub performance_trend: String,
    pub predicted_score: f64,
    pub strengths: Vec<String>,
    pub development_areas: Vec<String>,
    pub recommendations: Vec<String>,
    pub training_suggestions: Vec<String>,
    pub risk_factors: Vec<String>,
}

impl Default for PerformanceInsights {
    fn default() -> Self {
        Self {
            performance_trend: "stable".to_string(),
            predicted_score: 75.0,
            strengths: Vec::new(),
            development_areas: Vec::new(),
            recommendations: Vec::new(),
            training_suggestions: Vec::new(),
            risk_factors: Vec::new(),
        }
    }
}

/// Narrates an employee's evaluation history. Returns neutral defaults if the
/// provider call fails.
pub async fn analyze_performance(
    llm: &LlmClient,
    employee: &EmployeeRow,
    history: &[PerformanceEvaluationRow],
) -> PerformanceInsights {
    let employee_data = serde_json::to_string_pretty(employee).unwrap_or_default();
    let history_data = serde_json::to_string_pretty(history).unwrap_or_default();
    let prompt = PERFORMANCE_INSIGHTS_PROMPT
        .replace("{employee_data}", &employee_data)
        .replace("{performance_history}", &history_data);

    match llm
        .call_json::<PerformanceInsights>(&prompt, PERFORMANCE_INSIGHTS_SYSTEM)
        .await
    {
        Ok(insights) => insights,
        Err(e) => {
            warn!(
                "Performance insight generation failed for employee {}: {e}",
                employee.id
            );
            PerformanceInsights::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetentionAdvice {
    pub narrative: String,
    pub retention_strategies: Vec<String>,
    pub timeline: String,
}

impl Default for RetentionAdvice {
    fn default() -> Self {
        Self {
            narrative: String::new(),
            retention_strategies: Vec::new(),
            timeline: "6-12 mois".to_string(),
        }
    }
}

/// Writes a retention briefing around a deterministic risk assessment.
/// Returns `None` when the provider is unavailable so callers can serve the
/// assessment alone.
pub async fn retention_advice(
    llm: &LlmClient,
    employee: &EmployeeRow,
    assessment: &RiskAssessment,
) -> Option<RetentionAdvice> {
    let employee_data = json!({
        "name": employee.full_name(),
        "position": employee.position,
        "department": employee.department,
        "hire_date": employee.hire_date,
        "performance_score": employee.performance_score,
    });
    let prompt = RETENTION_PROMPT
        .replace(
            "{employee_data}",
            &serde_json::to_string_pretty(&employee_data).unwrap_or_default(),
        )
        .replace(
            "{assessment}",
            &serde_json::to_string_pretty(assessment).unwrap_or_default(),
        );

    match llm
        .call_json::<RetentionAdvice>(&prompt, RETENTION_SYSTEM)
        .await
    {
        Ok(advice) => Some(advice),
        Err(e) => {
            warn!(
                "Retention briefing failed for employee {}: {e}",
                employee.id
            );
            None
        }
    }
}
