//! Axum route handlers for the Analytics API.

use axum::extract::{Query, State};
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::PgPool;

use crate::analytics::insights::AiInsights;
use crate::analytics::queries::{
    active_employees_with_recent_evaluations, employee_analytics, performance_analytics,
    recruitment_analytics, EmployeeAnalytics, PerformanceAnalytics, RecruitmentAnalytics,
};
use crate::analytics::risk::{
    estimate_turnover_risk, summarize_risk_predictions, EmployeeSnapshot, EvaluationSnapshot,
    RiskPrediction, TurnoverRiskReport,
};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub total_employees: i64,
    pub active_jobs: i64,
    pub avg_performance: f64,
    pub high_risk_employees: usize,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub employees: EmployeeAnalytics,
    pub recruitment: RecruitmentAnalytics,
    pub performance: PerformanceAnalytics,
    pub turnover_risks: TurnoverRiskReport,
    pub summary: DashboardSummary,
}

/// GET /api/v1/analytics/dashboard
///
/// All analytics blocks plus a condensed summary for the dashboard header.
pub async fn handle_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, AppError> {
    let employees = employee_analytics(&state.db).await?;
    let recruitment = recruitment_analytics(&state.db).await?;
    let performance = performance_analytics(&state.db).await?;
    let turnover_risks = build_turnover_report(&state.db).await?;

    let summary = DashboardSummary {
        total_employees: employees.total_employees,
        active_jobs: recruitment.total_active_jobs,
        avg_performance: performance.avg_performance,
        high_risk_employees: turnover_risks.high_risk_employees,
    };

    Ok(Json(DashboardResponse {
        employees,
        recruitment,
        performance,
        turnover_risks,
        summary,
    }))
}

/// GET /api/v1/analytics/employees
pub async fn handle_employee_analytics(
    State(state): State<AppState>,
) -> Result<Json<EmployeeAnalytics>, AppError> {
    Ok(Json(employee_analytics(&state.db).await?))
}

/// GET /api/v1/analytics/recruitment
pub async fn handle_recruitment_analytics(
    State(state): State<AppState>,
) -> Result<Json<RecruitmentAnalytics>, AppError> {
    Ok(Json(recruitment_analytics(&state.db).await?))
}

/// GET /api/v1/analytics/performance
pub async fn handle_performance_analytics(
    State(state): State<AppState>,
) -> Result<Json<PerformanceAnalytics>, AppError> {
    Ok(Json(performance_analytics(&state.db).await?))
}

/// GET /api/v1/analytics/turnover-risks
///
/// Runs the deterministic risk estimator over every active employee and
/// returns the ranked at-risk report.
pub async fn handle_turnover_risks(
    State(state): State<AppState>,
) -> Result<Json<TurnoverRiskReport>, AppError> {
    Ok(Json(build_turnover_report(&state.db).await?))
}

/// POST /api/v1/analytics/insights
///
/// Generates narrative insight for caller-supplied analytics data.
pub async fn handle_insights(
    State(state): State<AppState>,
    Json(analytics_data): Json<Value>,
) -> Result<Json<AiInsights>, AppError> {
    if analytics_data.is_null() {
        return Err(AppError::Validation(
            "analytics data cannot be null".to_string(),
        ));
    }
    let insights = state.insight_engine.generate(&analytics_data).await;
    Ok(Json(insights))
}

#[derive(Debug, Deserialize)]
pub struct MonthlyReportQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct ExecutiveSummary {
    pub total_employees: i64,
    pub new_hires: usize,
    pub avg_performance: f64,
    pub recruitment_success_rate: f64,
    pub employees_at_risk: usize,
}

#[derive(Debug, Serialize)]
pub struct MonthlyReportResponse {
    pub report_date: NaiveDate,
    pub data: Value,
    pub ai_insights: AiInsights,
    pub executive_summary: ExecutiveSummary,
}

/// GET /api/v1/analytics/reports/monthly
///
/// Full report: every analytics block, AI narrative, and executive summary.
pub async fn handle_monthly_report(
    State(state): State<AppState>,
    Query(params): Query<MonthlyReportQuery>,
) -> Result<Json<MonthlyReportResponse>, AppError> {
    let employees = employee_analytics(&state.db).await?;
    let recruitment = recruitment_analytics(&state.db).await?;
    let performance = performance_analytics(&state.db).await?;
    let turnover_risks = build_turnover_report(&state.db).await?;

    let executive_summary = ExecutiveSummary {
        total_employees: employees.total_employees,
        new_hires: employees.hiring_trend.len(),
        avg_performance: performance.avg_performance,
        recruitment_success_rate: recruitment.conversion_rates.overall_success_rate,
        employees_at_risk: turnover_risks.total_at_risk,
    };

    let data = json!({
        "employees": employees,
        "recruitment": recruitment,
        "performance": performance,
        "turnover_risks": turnover_risks,
    });
    let ai_insights = state.insight_engine.generate(&data).await;

    Ok(Json(MonthlyReportResponse {
        report_date: params.date.unwrap_or_else(|| Utc::now().date_naive()),
        data,
        ai_insights,
        executive_summary,
    }))
}

/// Fetches estimator inputs for every active employee and folds the
/// per-employee assessments into the ranked report.
async fn build_turnover_report(pool: &PgPool) -> Result<TurnoverRiskReport, AppError> {
    let today = Utc::now().date_naive();
    let inputs = active_employees_with_recent_evaluations(pool).await?;

    let predictions: Vec<RiskPrediction> = inputs
        .into_iter()
        .map(|(employee, evaluations)| {
            let snapshot = EmployeeSnapshot {
                performance_score: employee.performance_score,
                hire_date: employee.hire_date,
            };
            let evals: Vec<EvaluationSnapshot> = evaluations
                .iter()
                .map(|e| EvaluationSnapshot {
                    overall_score: e.overall_score,
                    evaluation_date: e.evaluation_date,
                })
                .collect();
            RiskPrediction {
                employee_id: employee.id,
                name: employee.full_name(),
                department: employee.department.clone(),
                assessment: estimate_turnover_risk(&snapshot, &evals, today),
            }
        })
        .collect();

    Ok(summarize_risk_predictions(predictions))
}
