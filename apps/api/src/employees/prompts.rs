// Employee-domain LLM prompt templates.

pub const PERFORMANCE_INSIGHTS_SYSTEM: &str = "\
You are an expert HR performance analyst. \
You receive an employee record and their evaluation history and produce precise, \
actionable analysis. \
You MUST respond with valid JSON only — no markdown fences, no explanations.";

pub const PERFORMANCE_INSIGHTS_PROMPT: &str = r#"Analyze this employee's performance data.

EMPLOYEE:
{employee_data}

EVALUATION HISTORY (most recent first):
{performance_history}

OUTPUT SCHEMA (return exactly this structure):
{
  "performance_trend": "improving" | "stable" | "declining",
  "predicted_score": number (0-100, predicted next evaluation score),
  "strengths": ["identified strengths"],
  "development_areas": ["areas to develop"],
  "recommendations": ["specific recommendations"],
  "training_suggestions": ["suggested trainings"],
  "risk_factors": ["risk factors such as turnover"]
}

RULES:
1. Base the trend on the actual evaluation scores supplied.
2. Return ONLY the JSON object — nothing else, no code fences."#;

pub const RETENTION_SYSTEM: &str = "\
You are an HR analytics expert specialized in employee retention. \
You MUST respond with valid JSON only — no markdown fences, no explanations.";

pub const RETENTION_PROMPT: &str = r#"An internal rule-based model assessed this employee's turnover risk.
Write a short retention briefing for their manager.

EMPLOYEE:
{employee_data}

RISK ASSESSMENT:
{assessment}

OUTPUT SCHEMA (return exactly this structure):
{
  "narrative": "2-3 sentence summary of the situation",
  "retention_strategies": ["suggested retention actions"],
  "timeline": "estimated horizon, e.g. '6-12 months'"
}

RULES:
1. Stay consistent with the supplied risk factors; do not invent new ones.
2. Return ONLY the JSON object — nothing else, no code fences."#;
