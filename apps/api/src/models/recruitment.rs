use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobPostingRow {
    pub id: Uuid,
    pub title: String,
    pub department: String,
    pub description: String,
    pub requirements: String,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub location: Option<String>,
    pub employment_type: String,
    pub status: String,
    pub posted_date: NaiveDate,
    pub closing_date: Option<NaiveDate>,
    pub created_by: Option<Uuid>,
    pub ai_keywords: Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub cover_letter: Option<String>,
    pub skills: Value,
    pub experience_years: i32,
    pub education: Option<Value>,
    pub ai_score: f64,
    pub ai_summary: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CandidateRow {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub job_posting_id: Uuid,
    pub application_date: NaiveDate,
    pub status: String,
    pub ai_match_score: f64,
    pub ai_analysis: Option<Value>,
    pub recruiter_notes: Option<String>,
    pub interview_feedback: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
