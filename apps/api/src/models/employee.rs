use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmployeeRow {
    pub id: Uuid,
    pub employee_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: String,
    pub department: String,
    /// Nullable: legacy imports sometimes lack a hire date. The risk
    /// estimator treats a missing hire date as a neutral fallback.
    pub hire_date: Option<NaiveDate>,
    pub salary: Option<f64>,
    pub manager_id: Option<Uuid>,
    pub status: String,
    pub skills: Value,
    pub performance_score: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EmployeeRow {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PerformanceEvaluationRow {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub evaluator_id: Uuid,
    pub evaluation_date: NaiveDate,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub overall_score: f64,
    pub goals_achievement: Option<f64>,
    pub technical_skills: Option<f64>,
    pub soft_skills: Option<f64>,
    pub comments: Option<String>,
    pub ai_insights: Option<Value>,
    pub created_at: DateTime<Utc>,
}
