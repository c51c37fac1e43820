//! Axum route handlers for the Recruitment API: job postings, candidates,
//! and applications.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::recruitment::{ApplicationRow, CandidateRow, JobPostingRow};
use crate::recruitment::screening::{
    candidate_resume_text, draft_job_description, generate_interview_questions,
    posting_description_text, screen_resume, CandidateProfile, ResumeScreening,
};
use crate::state::AppState;

const DEFAULT_PER_PAGE: i64 = 20;

/// Match score at or above which a candidate is recommended outright.
const RECOMMEND_THRESHOLD: f64 = 70.0;

// ────────────────────────────────────────────────────────────────────────────
// Job postings
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListJobPostingsQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<String>,
    pub department: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct JobPostingListResponse {
    pub job_postings: Vec<JobPostingRow>,
    pub total: i64,
    pub pages: i64,
    pub current_page: i64,
}

/// GET /api/v1/job-postings
pub async fn handle_list_job_postings(
    State(state): State<AppState>,
    Query(params): Query<ListJobPostingsQuery>,
) -> Result<Json<JobPostingListResponse>, AppError> {
    let page = params.page.unwrap_or(1).max(1);
    let per_page = params.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, 100);
    let status = params.status.unwrap_or_else(|| "active".to_string());

    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM job_postings
         WHERE status = $1 AND ($2::text IS NULL OR department = $2)",
    )
    .bind(&status)
    .bind(&params.department)
    .fetch_one(&state.db)
    .await?;

    let job_postings: Vec<JobPostingRow> = sqlx::query_as(
        "SELECT * FROM job_postings
         WHERE status = $1 AND ($2::text IS NULL OR department = $2)
         ORDER BY posted_date DESC
         LIMIT $3 OFFSET $4",
    )
    .bind(&status)
    .bind(&params.department)
    .bind(per_page)
    .bind((page - 1) * per_page)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(JobPostingListResponse {
        job_postings,
        total,
        pages: (total + per_page - 1) / per_page,
        current_page: page,
    }))
}

#[derive(Debug, Deserialize)]
pub struct CreateJobPostingRequest {
    pub title: String,
    pub department: String,
    pub description: String,
    pub requirements: String,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub location: Option<String>,
    pub employment_type: Option<String>,
    pub posted_date: NaiveDate,
    pub closing_date: Option<NaiveDate>,
    pub created_by: Option<Uuid>,
    pub status: Option<String>,
    /// When set, the description is rewritten by the LLM and matching
    /// keywords are extracted.
    #[serde(default)]
    pub use_ai_optimization: bool,
}

/// POST /api/v1/job-postings
pub async fn handle_create_job_posting(
    State(state): State<AppState>,
    Json(req): Json<CreateJobPostingRequest>,
) -> Result<(StatusCode, Json<JobPostingRow>), AppError> {
    if req.title.trim().is_empty() || req.description.trim().is_empty() {
        return Err(AppError::Validation(
            "title and description cannot be empty".to_string(),
        ));
    }

    let (description, ai_keywords) = if req.use_ai_optimization {
        let draft =
            draft_job_description(&state.llm, &req.title, &req.department, &req.requirements)
                .await;
        let description = if draft.description.is_empty() {
            req.description.clone()
        } else {
            draft.description
        };
        (description, json!(draft.keywords))
    } else {
        (req.description.clone(), json!([]))
    };

    let posting: JobPostingRow = sqlx::query_as(
        r#"
        INSERT INTO job_postings
            (id, title, department, description, requirements, salary_min, salary_max,
             location, employment_type, status, posted_date, closing_date, created_by,
             ai_keywords, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&req.title)
    .bind(&req.department)
    .bind(&description)
    .bind(&req.requirements)
    .bind(req.salary_min)
    .bind(req.salary_max)
    .bind(&req.location)
    .bind(req.employment_type.as_deref().unwrap_or("full-time"))
    .bind(req.status.as_deref().unwrap_or("active"))
    .bind(req.posted_date)
    .bind(req.closing_date)
    .bind(req.created_by)
    .bind(ai_keywords)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(posting)))
}

#[derive(Debug, Deserialize)]
pub struct JobPostingDetailQuery {
    #[serde(default)]
    pub include_applications: bool,
}

#[derive(Debug, Serialize)]
pub struct JobPostingDetailResponse {
    #[serde(flatten)]
    pub job_posting: JobPostingRow,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applications: Option<Vec<ApplicationRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_count: Option<usize>,
}

/// GET /api/v1/job-postings/:id
pub async fn handle_get_job_posting(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<JobPostingDetailQuery>,
) -> Result<Json<JobPostingDetailResponse>, AppError> {
    let job_posting = fetch_job_posting(&state, id).await?;

    let (applications, application_count) = if params.include_applications {
        let apps: Vec<ApplicationRow> = sqlx::query_as(
            "SELECT * FROM applications WHERE job_posting_id = $1 ORDER BY application_date DESC",
        )
        .bind(id)
        .fetch_all(&state.db)
        .await?;
        let count = apps.len();
        (Some(apps), Some(count))
    } else {
        (None, None)
    };

    Ok(Json(JobPostingDetailResponse {
        job_posting,
        applications,
        application_count,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Candidates
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListCandidatesQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub min_score: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct CandidateListResponse {
    pub candidates: Vec<CandidateRow>,
    pub total: i64,
    pub pages: i64,
    pub current_page: i64,
}

/// GET /api/v1/candidates
///
/// Ordered by AI score, best first, with an optional floor.
pub async fn handle_list_candidates(
    State(state): State<AppState>,
    Query(params): Query<ListCandidatesQuery>,
) -> Result<Json<CandidateListResponse>, AppError> {
    let page = params.page.unwrap_or(1).max(1);
    let per_page = params.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, 100);
    let min_score = params.min_score.unwrap_or(0.0);

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM candidates WHERE ai_score >= $1")
        .bind(min_score)
        .fetch_one(&state.db)
        .await?;

    let candidates: Vec<CandidateRow> = sqlx::query_as(
        "SELECT * FROM candidates WHERE ai_score >= $1
         ORDER BY ai_score DESC LIMIT $2 OFFSET $3",
    )
    .bind(min_score)
    .bind(per_page)
    .bind((page - 1) * per_page)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(CandidateListResponse {
        candidates,
        total,
        pages: (total + per_page - 1) / per_page,
        current_page: page,
    }))
}

#[derive(Debug, Deserialize)]
pub struct CreateCandidateRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub cover_letter: Option<String>,
    #[serde(default)]
    pub experience_years: i32,
    /// Raw résumé text; when present it is screened by the LLM and the
    /// extracted fields stored on the candidate.
    pub resume_text: Option<String>,
}

/// POST /api/v1/candidates
pub async fn handle_create_candidate(
    State(state): State<AppState>,
    Json(req): Json<CreateCandidateRequest>,
) -> Result<(StatusCode, Json<CandidateRow>), AppError> {
    if req.email.trim().is_empty() {
        return Err(AppError::Validation("email cannot be empty".to_string()));
    }
    let email_taken: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM candidates WHERE email = $1)")
            .bind(&req.email)
            .fetch_one(&state.db)
            .await?;
    if email_taken {
        return Err(AppError::Validation("email already in use".to_string()));
    }

    let screening = match &req.resume_text {
        Some(resume_text) => Some(screen_resume(&state.llm, resume_text, None).await),
        None => None,
    };
    let screening = screening.unwrap_or_default();
    // The screening value wins whenever the model reported one, zero included.
    let experience_years = screening.experience_years.unwrap_or(req.experience_years);
    let education = if screening.education.is_empty() {
        None
    } else {
        Some(json!(screening.education))
    };
    let ai_summary = if screening.summary.is_empty() {
        None
    } else {
        Some(screening.summary.clone())
    };

    let candidate: CandidateRow = sqlx::query_as(
        r#"
        INSERT INTO candidates
            (id, first_name, last_name, email, phone, linkedin_url, cover_letter,
             skills, experience_years, education, ai_score, ai_summary, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&req.first_name)
    .bind(&req.last_name)
    .bind(&req.email)
    .bind(&req.phone)
    .bind(&req.linkedin_url)
    .bind(&req.cover_letter)
    .bind(json!(screening.skills))
    .bind(experience_years)
    .bind(education)
    .bind(screening.score)
    .bind(ai_summary)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(candidate)))
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeCandidateRequest {
    pub job_posting_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeCandidateResponse {
    pub candidate_id: Uuid,
    pub job_posting_id: Uuid,
    pub match_score: f64,
    pub analysis: ResumeScreening,
    pub recommendation: String,
}

/// POST /api/v1/candidates/:id/analyze
///
/// Scores a stored candidate against a specific posting.
pub async fn handle_analyze_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AnalyzeCandidateRequest>,
) -> Result<Json<AnalyzeCandidateResponse>, AppError> {
    let candidate = fetch_candidate(&state, id).await?;
    let posting = fetch_job_posting(&state, req.job_posting_id).await?;

    let resume_text = candidate_resume_text(
        &candidate.skills,
        candidate.experience_years,
        candidate.ai_summary.as_deref(),
    );
    let job_description =
        posting_description_text(&posting.title, &posting.description, &posting.requirements);

    let analysis = screen_resume(&state.llm, &resume_text, Some(&job_description)).await;
    let match_score = analysis.job_match_score;
    let recommendation = if match_score >= RECOMMEND_THRESHOLD {
        "Recommandé"
    } else {
        "À examiner"
    };

    Ok(Json(AnalyzeCandidateResponse {
        candidate_id: id,
        job_posting_id: req.job_posting_id,
        match_score,
        analysis,
        recommendation: recommendation.to_string(),
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Applications
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateApplicationRequest {
    pub candidate_id: Uuid,
    pub job_posting_id: Uuid,
    pub application_date: NaiveDate,
    pub status: Option<String>,
}

/// POST /api/v1/applications
///
/// Creates an application and runs the candidate-vs-posting match analysis.
pub async fn handle_create_application(
    State(state): State<AppState>,
    Json(req): Json<CreateApplicationRequest>,
) -> Result<(StatusCode, Json<ApplicationRow>), AppError> {
    let candidate = fetch_candidate(&state, req.candidate_id).await?;
    let posting = fetch_job_posting(&state, req.job_posting_id).await?;

    let duplicate: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM applications WHERE candidate_id = $1 AND job_posting_id = $2)",
    )
    .bind(req.candidate_id)
    .bind(req.job_posting_id)
    .fetch_one(&state.db)
    .await?;
    if duplicate {
        return Err(AppError::Validation(
            "an application for this posting already exists".to_string(),
        ));
    }

    let resume_text = candidate_resume_text(
        &candidate.skills,
        candidate.experience_years,
        candidate.ai_summary.as_deref(),
    );
    let job_description =
        posting_description_text(&posting.title, &posting.description, &posting.requirements);
    let analysis = screen_resume(&state.llm, &resume_text, Some(&job_description)).await;

    let application: ApplicationRow = sqlx::query_as(
        r#"
        INSERT INTO applications
            (id, candidate_id, job_posting_id, application_date, status,
             ai_match_score, ai_analysis, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, NOW(), NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(req.candidate_id)
    .bind(req.job_posting_id)
    .bind(req.application_date)
    .bind(req.status.as_deref().unwrap_or("submitted"))
    .bind(analysis.job_match_score)
    .bind(json!(analysis))
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(application)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateApplicationStatusRequest {
    pub status: String,
    pub recruiter_notes: Option<String>,
    pub interview_feedback: Option<String>,
}

const APPLICATION_STATUSES: &[&str] = &["submitted", "screening", "interview", "rejected", "hired"];

/// PUT /api/v1/applications/:id/status
pub async fn handle_update_application_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateApplicationStatusRequest>,
) -> Result<Json<ApplicationRow>, AppError> {
    if !APPLICATION_STATUSES.contains(&req.status.as_str()) {
        return Err(AppError::Validation(format!(
            "unknown application status '{}'",
            req.status
        )));
    }

    let application: Option<ApplicationRow> = sqlx::query_as(
        r#"
        UPDATE applications SET
            status = $2,
            recruiter_notes = COALESCE($3, recruiter_notes),
            interview_feedback = COALESCE($4, interview_feedback),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&req.status)
    .bind(&req.recruiter_notes)
    .bind(&req.interview_feedback)
    .fetch_optional(&state.db)
    .await?;

    let application =
        application.ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;
    Ok(Json(application))
}

#[derive(Debug, Serialize)]
pub struct InterviewQuestionsResponse {
    pub application_id: Uuid,
    pub questions: Vec<String>,
    pub candidate_name: String,
    pub job_title: String,
}

/// GET /api/v1/applications/:id/interview-questions
pub async fn handle_interview_questions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InterviewQuestionsResponse>, AppError> {
    let application: ApplicationRow =
        sqlx::query_as("SELECT * FROM applications WHERE id = $1")
            .bind(id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;

    let candidate = fetch_candidate(&state, application.candidate_id).await?;
    let posting = fetch_job_posting(&state, application.job_posting_id).await?;

    let profile = CandidateProfile {
        name: candidate.full_name(),
        skills: candidate.skills.clone(),
        experience_years: candidate.experience_years,
        summary: candidate.ai_summary.clone(),
    };
    let questions = generate_interview_questions(&state.llm, &posting.title, &profile).await;

    Ok(Json(InterviewQuestionsResponse {
        application_id: id,
        questions,
        candidate_name: candidate.full_name(),
        job_title: posting.title,
    }))
}

async fn fetch_job_posting(state: &AppState, id: Uuid) -> Result<JobPostingRow, AppError> {
    sqlx::query_as::<_, JobPostingRow>("SELECT * FROM job_postings WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job posting {id} not found")))
}

async fn fetch_candidate(state: &AppState, id: Uuid) -> Result<CandidateRow, AppError> {
    sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))
}
