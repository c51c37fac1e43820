//! Axum route handlers for the Employee API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::analytics::queries::recent_evaluations;
use crate::analytics::risk::{
    estimate_turnover_risk, EmployeeSnapshot, EvaluationSnapshot, RiskAssessment,
};
use crate::employees::insights::{analyze_performance, retention_advice, RetentionAdvice};
use crate::errors::AppError;
use crate::models::employee::{EmployeeRow, PerformanceEvaluationRow};
use crate::state::AppState;

const DEFAULT_PER_PAGE: i64 = 20;

#[derive(Debug, Deserialize)]
pub struct ListEmployeesQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub department: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EmployeeListResponse {
    pub employees: Vec<EmployeeRow>,
    pub total: i64,
    pub pages: i64,
    pub current_page: i64,
}

/// GET /api/v1/employees
///
/// Paginated list with optional department filter; defaults to active staff.
pub async fn handle_list_employees(
    State(state): State<AppState>,
    Query(params): Query<ListEmployeesQuery>,
) -> Result<Json<EmployeeListResponse>, AppError> {
    let page = params.page.unwrap_or(1).max(1);
    let per_page = params.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, 100);
    let status = params.status.unwrap_or_else(|| "active".to_string());

    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM employees
         WHERE status = $1 AND ($2::text IS NULL OR department = $2)",
    )
    .bind(&status)
    .bind(&params.department)
    .fetch_one(&state.db)
    .await?;

    let employees: Vec<EmployeeRow> = sqlx::query_as(
        "SELECT * FROM employees
         WHERE status = $1 AND ($2::text IS NULL OR department = $2)
         ORDER BY last_name, first_name
         LIMIT $3 OFFSET $4",
    )
    .bind(&status)
    .bind(&params.department)
    .bind(per_page)
    .bind((page - 1) * per_page)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(EmployeeListResponse {
        employees,
        total,
        pages: (total + per_page - 1) / per_page,
        current_page: page,
    }))
}

#[derive(Debug, Deserialize)]
pub struct CreateEmployeeRequest {
    pub employee_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: String,
    pub department: String,
    pub hire_date: NaiveDate,
    pub salary: Option<f64>,
    pub manager_id: Option<Uuid>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub status: Option<String>,
}

/// POST /api/v1/employees
pub async fn handle_create_employee(
    State(state): State<AppState>,
    Json(req): Json<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<EmployeeRow>), AppError> {
    if req.employee_number.trim().is_empty() {
        return Err(AppError::Validation(
            "employee_number cannot be empty".to_string(),
        ));
    }

    let number_taken: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM employees WHERE employee_number = $1)")
            .bind(&req.employee_number)
            .fetch_one(&state.db)
            .await?;
    if number_taken {
        return Err(AppError::Validation(
            "employee_number already exists".to_string(),
        ));
    }
    let email_taken: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM employees WHERE email = $1)")
            .bind(&req.email)
            .fetch_one(&state.db)
            .await?;
    if email_taken {
        return Err(AppError::Validation("email already in use".to_string()));
    }

    let employee: EmployeeRow = sqlx::query_as(
        r#"
        INSERT INTO employees
            (id, employee_number, first_name, last_name, email, phone, position,
             department, hire_date, salary, manager_id, status, skills,
             performance_score, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, 0.0, NOW(), NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&req.employee_number)
    .bind(&req.first_name)
    .bind(&req.last_name)
    .bind(&req.email)
    .bind(&req.phone)
    .bind(&req.position)
    .bind(&req.department)
    .bind(req.hire_date)
    .bind(req.salary)
    .bind(req.manager_id)
    .bind(req.status.as_deref().unwrap_or("active"))
    .bind(json!(req.skills))
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(employee)))
}

#[derive(Debug, Deserialize)]
pub struct EmployeeDetailQuery {
    #[serde(default)]
    pub include_ai_insights: bool,
}

#[derive(Debug, Serialize)]
pub struct EmployeeDetailResponse {
    #[serde(flatten)]
    pub employee: EmployeeRow,
    pub evaluations: Vec<PerformanceEvaluationRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_insights: Option<crate::employees::insights::PerformanceInsights>,
}

/// GET /api/v1/employees/:id
///
/// Detail plus the five most recent evaluations; `include_ai_insights=true`
/// adds an LLM performance narrative.
pub async fn handle_get_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<EmployeeDetailQuery>,
) -> Result<Json<EmployeeDetailResponse>, AppError> {
    let employee = fetch_employee(&state, id).await?;
    let evaluations = recent_evaluations(&state.db, id, 5).await?;

    let ai_insights = if params.include_ai_insights {
        Some(analyze_performance(&state.llm, &employee, &evaluations).await)
    } else {
        None
    };

    Ok(Json(EmployeeDetailResponse {
        employee,
        evaluations,
        ai_insights,
    }))
}

#[derive(Debug, Deserialize)]
pub struct UpdateEmployeeRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub salary: Option<f64>,
    pub manager_id: Option<Uuid>,
    pub status: Option<String>,
    pub skills: Option<Vec<String>>,
}

/// PUT /api/v1/employees/:id
///
/// Partial update: absent fields keep their current values.
pub async fn handle_update_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateEmployeeRequest>,
) -> Result<Json<EmployeeRow>, AppError> {
    // Ensure the row exists so a bad id surfaces as 404, not a silent no-op.
    fetch_employee(&state, id).await?;

    let employee: EmployeeRow = sqlx::query_as(
        r#"
        UPDATE employees SET
            first_name = COALESCE($2, first_name),
            last_name = COALESCE($3, last_name),
            email = COALESCE($4, email),
            phone = COALESCE($5, phone),
            position = COALESCE($6, position),
            department = COALESCE($7, department),
            hire_date = COALESCE($8, hire_date),
            salary = COALESCE($9, salary),
            manager_id = COALESCE($10, manager_id),
            status = COALESCE($11, status),
            skills = COALESCE($12, skills),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&req.first_name)
    .bind(&req.last_name)
    .bind(&req.email)
    .bind(&req.phone)
    .bind(&req.position)
    .bind(&req.department)
    .bind(req.hire_date)
    .bind(req.salary)
    .bind(req.manager_id)
    .bind(&req.status)
    .bind(req.skills.as_ref().map(|s| json!(s)))
    .fetch_one(&state.db)
    .await?;

    Ok(Json(employee))
}

#[derive(Debug, Deserialize)]
pub struct CreateEvaluationRequest {
    pub evaluator_id: Uuid,
    pub evaluation_date: NaiveDate,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub overall_score: f64,
    pub goals_achievement: Option<f64>,
    pub technical_skills: Option<f64>,
    pub soft_skills: Option<f64>,
    pub comments: Option<String>,
}

/// POST /api/v1/employees/:id/evaluations
///
/// Records an evaluation, attaches an LLM insight narrative, and promotes the
/// new overall score to the employee record.
pub async fn handle_create_evaluation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateEvaluationRequest>,
) -> Result<(StatusCode, Json<PerformanceEvaluationRow>), AppError> {
    let employee = fetch_employee(&state, id).await?;

    if !(0.0..=10.0).contains(&req.overall_score) {
        return Err(AppError::Validation(
            "overall_score must be between 0 and 10".to_string(),
        ));
    }

    let history = recent_evaluations(&state.db, id, 5).await?;
    let insights = analyze_performance(&state.llm, &employee, &history).await;

    let evaluation: PerformanceEvaluationRow = sqlx::query_as(
        r#"
        INSERT INTO performance_evaluations
            (id, employee_id, evaluator_id, evaluation_date, period_start, period_end,
             overall_score, goals_achievement, technical_skills, soft_skills,
             comments, ai_insights, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(id)
    .bind(req.evaluator_id)
    .bind(req.evaluation_date)
    .bind(req.period_start)
    .bind(req.period_end)
    .bind(req.overall_score)
    .bind(req.goals_achievement)
    .bind(req.technical_skills)
    .bind(req.soft_skills)
    .bind(&req.comments)
    .bind(json!(insights))
    .fetch_one(&state.db)
    .await?;

    sqlx::query("UPDATE employees SET performance_score = $2, updated_at = NOW() WHERE id = $1")
        .bind(id)
        .bind(req.overall_score)
        .execute(&state.db)
        .await?;

    Ok((StatusCode::CREATED, Json(evaluation)))
}

#[derive(Debug, Serialize)]
pub struct TurnoverRiskResponse {
    pub employee_id: Uuid,
    pub name: String,
    pub department: String,
    #[serde(flatten)]
    pub assessment: RiskAssessment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retention_advice: Option<RetentionAdvice>,
}

/// GET /api/v1/employees/:id/turnover-risk
///
/// Deterministic risk assessment over the three latest evaluations, enriched
/// with an LLM retention briefing when the provider is reachable.
pub async fn handle_turnover_risk(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TurnoverRiskResponse>, AppError> {
    let employee = fetch_employee(&state, id).await?;
    let evaluations = recent_evaluations(&state.db, id, 3).await?;

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
    let assessment = estimate_turnover_risk(&snapshot, &evals, Utc::now().date_naive());

    let retention_advice = retention_advice(&state.llm, &employee, &assessment).await;

    Ok(Json(TurnoverRiskResponse {
        employee_id: employee.id,
        name: employee.full_name(),
        department: employee.department.clone(),
        assessment,
        retention_advice,
    }))
}

/// GET /api/v1/departments
pub async fn handle_list_departments(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, AppError> {
    let departments: Vec<String> =
        sqlx::query_scalar("SELECT DISTINCT department FROM employees ORDER BY department")
            .fetch_all(&state.db)
            .await?;
    Ok(Json(departments))
}

async fn fetch_employee(state: &AppState, id: Uuid) -> Result<EmployeeRow, AppError> {
    sqlx::query_as::<_, EmployeeRow>("SELECT * FROM employees WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Employee {id} not found")))
}
