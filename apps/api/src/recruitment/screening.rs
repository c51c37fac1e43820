//! LLM-backed candidate screening: résumé analysis, interview question
//! generation, and job-description drafting. Each helper degrades to an
//! explicit fallback so recruitment flows keep working during provider
//! outages, with a warning in the logs.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use crate::llm_client::LlmClient;
use crate::recruitment::prompts::{
    INTERVIEW_QUESTIONS_PROMPT, INTERVIEW_QUESTIONS_SYSTEM, JOB_DESCRIPTION_PROMPT,
    JOB_DESCRIPTION_SYSTEM, RESUME_SCREENING_PROMPT, RESUME_SCREENING_SYSTEM,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeScreening {
    pub skills: Vec<String>,
    /// None when the model omitted the field; Some(0) is a real answer and
    /// overrides whatever the caller supplied.
    pub experience_years: Option<i32>,
    pub education: String,
    pub summary: String,
    pub score: f64,
    pub job_match_score: f64,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
}

/// Screens a résumé, optionally against a job description for a match score.
pub async fn screen_resume(
    llm: &LlmClient,
    resume_text: &str,
    job_description: Option<&str>,
) -> ResumeScreening {
    let jd_block = match job_description {
        Some(jd) => format!("JOB DESCRIPTION:\n{jd}"),
        None => String::new(),
    };
    let prompt = RESUME_SCREENING_PROMPT
        .replace("{resume_text}", resume_text)
        .replace("{job_description_block}", &jd_block);

    match llm
        .call_json::<ResumeScreening>(&prompt, RESUME_SCREENING_SYSTEM)
        .await
    {
        Ok(mut screening) => {
            // Clamp model output into the documented 0-100 range.
            screening.score = screening.score.clamp(0.0, 100.0);
            screening.job_match_score = screening.job_match_score.clamp(0.0, 100.0);
            screening
        }
        Err(e) => {
            warn!("Résumé screening failed, returning neutral screening: {e}");
            ResumeScreening {
                summary: "Analyse non disponible".to_string(),
                ..Default::default()
            }
        }
    }
}

/// Candidate context handed to the question generator.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateProfile {
    pub name: String,
    pub skills: serde_json::Value,
    pub experience_years: i32,
    pub summary: Option<String>,
}

/// Generates personalized interview questions; falls back to a standard set.
pub async fn generate_interview_questions(
    llm: &LlmClient,
    job_title: &str,
    profile: &CandidateProfile,
) -> Vec<String> {
    let prompt = INTERVIEW_QUESTIONS_PROMPT
        .replace("{job_title}", job_title)
        .replace(
            "{candidate_profile}",
            &serde_json::to_string_pretty(profile).unwrap_or_default(),
        );

    match llm
        .call_json::<Vec<String>>(&prompt, INTERVIEW_QUESTIONS_SYSTEM)
        .await
    {
        Ok(questions) if !questions.is_empty() => questions,
        Ok(_) | Err(_) => {
            warn!("Interview question generation failed, using fallback set");
            fallback_questions()
        }
    }
}

fn fallback_questions() -> Vec<String> {
    [
        "Pouvez-vous vous présenter en quelques minutes?",
        "Pourquoi ce poste vous intéresse-t-il?",
        "Quelles sont vos principales forces?",
        "Décrivez un défi professionnel que vous avez surmonté.",
        "Où vous voyez-vous dans 5 ans?",
    ]
    .iter()
    .map(|q| q.to_string())
    .collect()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JobDescriptionDraft {
    pub description: String,
    pub responsibilities: Vec<String>,
    pub qualifications: Vec<String>,
    pub preferred_skills: Vec<String>,
    pub keywords: Vec<String>,
}

/// Drafts an optimized job description. The fallback keeps the caller's
/// requirements so a posting can still be created.
pub async fn draft_job_description(
    llm: &LlmClient,
    job_title: &str,
    department: &str,
    requirements: &str,
) -> JobDescriptionDraft {
    let prompt = JOB_DESCRIPTION_PROMPT
        .replace("{job_title}", job_title)
        .replace("{department}", department)
        .replace("{requirements}", requirements);

    match llm
        .call_json::<JobDescriptionDraft>(&prompt, JOB_DESCRIPTION_SYSTEM)
        .await
    {
        Ok(draft) => draft,
        Err(e) => {
            warn!("Job description drafting failed, using plain fallback: {e}");
            JobDescriptionDraft {
                description: format!("Poste de {job_title} au sein du département {department}"),
                qualifications: vec![requirements.to_string()],
                ..Default::default()
            }
        }
    }
}

/// Compact text rendering of a stored candidate for match analysis, mirroring
/// what the screening prompt expects as a résumé.
pub fn candidate_resume_text(
    skills: &serde_json::Value,
    experience_years: i32,
    summary: Option<&str>,
) -> String {
    format!(
        "Compétences: {}\nExpérience: {} ans\nRésumé: {}",
        json!(skills),
        experience_years,
        summary.unwrap_or("")
    )
}

/// Compact text rendering of a job posting for match analysis.
pub fn posting_description_text(title: &str, description: &str, requirements: &str) -> String {
    format!("{title}\n{description}\n{requirements}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screening_deserialize_partial_payload() {
        let s: ResumeScreening =
            serde_json::from_str(r#"{"skills": ["Rust"], "score": 80}"#).unwrap();
        assert_eq!(s.skills, vec!["Rust"]);
        assert_eq!(s.score, 80.0);
        assert_eq!(s.job_match_score, 0.0);
        assert_eq!(s.experience_years, None);
    }

    #[test]
    fn test_screening_keeps_explicit_zero_experience() {
        let s: ResumeScreening = serde_json::from_str(r#"{"experience_years": 0}"#).unwrap();
        assert_eq!(s.experience_years, Some(0));
        assert_eq!(s.experience_years.unwrap_or(7), 0);
    }

    #[test]
    fn test_fallback_questions_non_empty() {
        assert_eq!(fallback_questions().len(), 5);
    }

    #[test]
    fn test_candidate_resume_text_includes_fields() {
        let text = candidate_resume_text(&json!(["SQL", "Python"]), 4, Some("Data analyst"));
        assert!(text.contains("SQL"));
        assert!(text.contains("4 ans"));
        assert!(text.contains("Data analyst"));
    }
}
