//! Axum route handlers for the HR assistant.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::warn;

use crate::chatbot::intent::{detect_intent, suggestions_for, Intent};
use crate::chatbot::prompts::{ASSISTANT_PROMPT, ASSISTANT_SYSTEM};
use crate::errors::AppError;
use crate::state::AppState;

const FALLBACK_REPLY: &str =
    "Je suis désolé, je ne peux pas traiter votre demande pour le moment. Veuillez réessayer plus tard.";

#[derive(Debug, Deserialize)]
pub struct ChatMessageRequest {
    pub message: String,
    #[serde(default)]
    pub context: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct ChatMessageResponse {
    pub response: String,
    pub intent: Intent,
    pub suggestions: Vec<String>,
    pub context: Map<String, Value>,
}

/// POST /api/v1/chatbot/message
///
/// Detects the intent, enriches the caller's context with live HR counts
/// when the question touches staffing or recruitment, and asks the LLM for a
/// reply. Provider failures degrade to a polite fallback string.
pub async fn handle_message(
    State(state): State<AppState>,
    Json(req): Json<ChatMessageRequest>,
) -> Result<Json<ChatMessageResponse>, AppError> {
    if req.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    let intent = detect_intent(&req.message);
    let context = enrich_context(&state, &req.message, req.context).await;

    let prompt = ASSISTANT_PROMPT.replace("{message}", &req.message).replace(
        "{context}",
        &serde_json::to_string_pretty(&context).unwrap_or_default(),
    );
    let response = match state.llm.call_text(&prompt, ASSISTANT_SYSTEM).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!("Assistant reply failed, using fallback: {e}");
            FALLBACK_REPLY.to_string()
        }
    };

    Ok(Json(ChatMessageResponse {
        response,
        intent,
        suggestions: suggestions_for(intent),
        context,
    }))
}

/// Adds live HR data to the conversation context when the message mentions
/// staffing, recruitment, or leave topics. Query failures are logged and
/// skipped; the assistant still answers from whatever context it has.
async fn enrich_context(
    state: &AppState,
    message: &str,
    mut context: Map<String, Value>,
) -> Map<String, Value> {
    let message = message.to_lowercase();

    let mentions = |keywords: &[&str]| keywords.iter().any(|k| message.contains(k));

    if mentions(&["employé", "employee", "équipe", "team", "collègue"]) {
        match staffing_context(state).await {
            Ok((total, departments)) => {
                context.insert("total_employees".to_string(), json!(total));
                context.insert("departments".to_string(), json!(departments));
            }
            Err(e) => warn!("Failed to enrich staffing context: {e}"),
        }
    }

    if mentions(&["recrutement", "recruitment", "poste", "job", "candidat"]) {
        match recruitment_context(state).await {
            Ok((active_jobs, departments)) => {
                context.insert("active_job_postings".to_string(), json!(active_jobs));
                context.insert("hiring_departments".to_string(), json!(departments));
            }
            Err(e) => warn!("Failed to enrich recruitment context: {e}"),
        }
    }

    if mentions(&["congé", "vacation", "politique", "policy", "règlement"]) {
        context.insert(
            "hr_policies".to_string(),
            json!({
                "annual_leave": "25 jours par an",
                "sick_leave": "10 jours par an",
                "maternity_leave": "16 semaines",
                "remote_work": "Jusqu'à 2 jours par semaine",
            }),
        );
    }

    context
}

async fn staffing_context(state: &AppState) -> Result<(i64, Vec<String>), sqlx::Error> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees WHERE status = 'active'")
        .fetch_one(&state.db)
        .await?;
    let departments: Vec<String> =
        sqlx::query_scalar("SELECT DISTINCT department FROM employees ORDER BY department")
            .fetch_all(&state.db)
            .await?;
    Ok((total, departments))
}

async fn recruitment_context(state: &AppState) -> Result<(i64, Vec<String>), sqlx::Error> {
    let active_jobs: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM job_postings WHERE status = 'active'")
            .fetch_one(&state.db)
            .await?;
    let departments: Vec<String> = sqlx::query_scalar(
        "SELECT DISTINCT department FROM job_postings WHERE status = 'active' ORDER BY department",
    )
    .fetch_all(&state.db)
    .await?;
    Ok((active_jobs, departments))
}

/// GET /api/v1/chatbot/quick-actions
pub async fn handle_quick_actions() -> Json<Value> {
    Json(json!({
        "quick_actions": [
            {
                "id": "search_employee",
                "title": "Rechercher un employé",
                "description": "Trouver les coordonnées d'un collègue",
                "icon": "person_search"
            },
            {
                "id": "job_postings",
                "title": "Postes ouverts",
                "description": "Voir les opportunités de carrière",
                "icon": "work"
            },
            {
                "id": "leave_request",
                "title": "Demande de congé",
                "description": "Soumettre une demande d'absence",
                "icon": "event_available"
            },
            {
                "id": "hr_policies",
                "title": "Politiques RH",
                "description": "Consulter les règlements internes",
                "icon": "policy"
            },
            {
                "id": "training",
                "title": "Formations",
                "description": "Découvrir les opportunités de formation",
                "icon": "school"
            },
            {
                "id": "org_chart",
                "title": "Organigramme",
                "description": "Visualiser la structure organisationnelle",
                "icon": "account_tree"
            }
        ]
    }))
}

/// GET /api/v1/chatbot/faq
pub async fn handle_faq() -> Json<Value> {
    Json(json!({
        "faq": [
            {
                "question": "Comment demander un congé?",
                "answer": "Vous pouvez soumettre une demande de congé via le portail RH ou en contactant votre manager directement.",
                "category": "congés"
            },
            {
                "question": "Où trouver mes fiches de paie?",
                "answer": "Vos fiches de paie sont disponibles dans votre espace personnel du portail RH, section \"Paie\".",
                "category": "paie"
            },
            {
                "question": "Comment mettre à jour mes informations personnelles?",
                "answer": "Rendez-vous dans votre profil employé pour modifier vos informations de contact et bancaires.",
                "category": "profil"
            },
            {
                "question": "Quelles formations sont disponibles?",
                "answer": "Consultez le catalogue de formations dans la section \"Développement\" du portail RH.",
                "category": "formation"
            },
            {
                "question": "Comment contacter le service RH?",
                "answer": "Vous pouvez nous contacter par email à rh@entreprise.com ou par téléphone au 01 23 45 67 89.",
                "category": "contact"
            }
        ]
    }))
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub message_id: String,
    pub rating: i32,
    pub feedback: String,
}

/// POST /api/v1/chatbot/feedback
pub async fn handle_feedback(
    Json(req): Json<FeedbackRequest>,
) -> Result<Json<Value>, AppError> {
    if req.message_id.trim().is_empty() {
        return Err(AppError::Validation(
            "message_id cannot be empty".to_string(),
        ));
    }
    if !(1..=5).contains(&req.rating) {
        return Err(AppError::Validation(
            "rating must be between 1 and 5".to_string(),
        ));
    }
    if req.feedback.trim().is_empty() {
        return Err(AppError::Validation("feedback cannot be empty".to_string()));
    }

    // TODO: persist feedback once the assistant gains a feedback table.
    Ok(Json(json!({
        "message": "Merci pour votre feedback!",
        "status": "success"
    })))
}
