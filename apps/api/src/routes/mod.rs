pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::analytics::handlers as analytics;
use crate::chatbot::handlers as chatbot;
use crate::employees::handlers as employees;
use crate::recruitment::handlers as recruitment;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Employee API
        .route(
            "/api/v1/employees",
            get(employees::handle_list_employees).post(employees::handle_create_employee),
        )
        .route(
            "/api/v1/employees/:id",
            get(employees::handle_get_employee).put(employees::handle_update_employee),
        )
        .route(
            "/api/v1/employees/:id/evaluations",
            post(employees::handle_create_evaluation),
        )
        .route(
            "/api/v1/employees/:id/turnover-risk",
            get(employees::handle_turnover_risk),
        )
        .route("/api/v1/departments", get(employees::handle_list_departments))
        // Recruitment API
        .route(
            "/api/v1/job-postings",
            get(recruitment::handle_list_job_postings).post(recruitment::handle_create_job_posting),
        )
        .route(
            "/api/v1/job-postings/:id",
            get(recruitment::handle_get_job_posting),
        )
        .route(
            "/api/v1/candidates",
            get(recruitment::handle_list_candidates).post(recruitment::handle_create_candidate),
        )
        .route(
            "/api/v1/candidates/:id/analyze",
            post(recruitment::handle_analyze_candidate),
        )
        .route(
            "/api/v1/applications",
            post(recruitment::handle_create_application),
        )
        .route(
            "/api/v1/applications/:id/status",
            put(recruitment::handle_update_application_status),
        )
        .route(
            "/api/v1/applications/:id/interview-questions",
            get(recruitment::handle_interview_questions),
        )
        // Analytics API
        .route("/api/v1/analytics/dashboard", get(analytics::handle_dashboard))
        .route(
            "/api/v1/analytics/employees",
            get(analytics::handle_employee_analytics),
        )
        .route(
            "/api/v1/analytics/recruitment",
            get(analytics::handle_recruitment_analytics),
        )
        .route(
            "/api/v1/analytics/performance",
            get(analytics::handle_performance_analytics),
        )
        .route(
            "/api/v1/analytics/turnover-risks",
            get(analytics::handle_turnover_risks),
        )
        .route("/api/v1/analytics/insights", post(analytics::handle_insights))
        .route(
            "/api/v1/analytics/reports/monthly",
            get(analytics::handle_monthly_report),
        )
        // HR assistant
        .route("/api/v1/chatbot/message", post(chatbot::handle_message))
        .route(
            "/api/v1/chatbot/quick-actions",
            get(chatbot::handle_quick_actions),
        )
        .route("/api/v1/chatbot/faq", get(chatbot::handle_faq))
        .route("/api/v1/chatbot/feedback", post(chatbot::handle_feedback))
        .with_state(state)
}
