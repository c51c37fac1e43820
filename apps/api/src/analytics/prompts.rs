// Analytics LLM prompt templates.
// All prompts for the analytics module are defined here.

pub const INSIGHTS_SYSTEM: &str = "\
You are an expert HR analytics advisor. \
You receive aggregated HR metrics as JSON and produce precise, actionable insight. \
You MUST respond with valid JSON only — no markdown fences, no explanations.";

pub const INSIGHTS_PROMPT: &str = r#"Analyze the following HR analytics data and generate actionable insights.

ANALYTICS DATA:
{analytics_data}

OUTPUT SCHEMA (return exactly this structure):
{
  "key_insights": ["3-5 principal findings"],
  "recommendations": ["recommended actions"],
  "trends": ["identified trends"],
  "alerts": ["important alerts"],
  "opportunities": ["improvement opportunities"]
}

RULES:
1. Ground every statement in the supplied numbers; never invent metrics.
2. Keep each item to a single sentence.
3. Return ONLY the JSON object — nothing else, no code fences."#;
