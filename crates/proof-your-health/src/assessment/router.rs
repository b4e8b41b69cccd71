use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{AnswerSheet, AssessmentId, QuestionId, UserId};
use super::repository::{AssessmentRepository, RepositoryError};
use super::service::{AssessmentService, AssessmentServiceError};
use super::views::{AssessmentResultView, AssessmentStatusView, CatalogView, HistoryEntryView};

#[derive(Debug, Deserialize)]
pub struct StartRequest {
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub question_id: u16,
    pub selected_option: String,
}

#[derive(Debug, Deserialize)]
pub struct EvaluationRequest {
    pub answers: Vec<AnswerRequest>,
}

/// Router builder exposing the questionnaire over HTTP.
pub fn assessment_router<R>(service: Arc<AssessmentService<R>>) -> Router
where
    R: AssessmentRepository + 'static,
{
    Router::new()
        .route("/api/v1/catalog", get(catalog_handler::<R>))
        .route("/api/v1/evaluations", post(evaluate_handler::<R>))
        .route("/api/v1/assessments", post(start_handler::<R>))
        .route(
            "/api/v1/assessments/:assessment_id",
            get(status_handler::<R>).delete(discard_handler::<R>),
        )
        .route(
            "/api/v1/assessments/:assessment_id/answers",
            put(answer_handler::<R>),
        )
        .route(
            "/api/v1/assessments/:assessment_id/finalize",
            post(finalize_handler::<R>),
        )
        .route(
            "/api/v1/assessments/:assessment_id/result",
            get(result_handler::<R>),
        )
        .route(
            "/api/v1/users/:user_id/assessments",
            get(history_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn catalog_handler<R>(State(service): State<Arc<AssessmentService<R>>>) -> Response
where
    R: AssessmentRepository + 'static,
{
    let view = CatalogView::from_catalog(service.engine().catalog());
    (StatusCode::OK, axum::Json(view)).into_response()
}

pub(crate) async fn evaluate_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    axum::Json(request): axum::Json<EvaluationRequest>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    let engine = service.engine();
    let mut sheet = AnswerSheet::new();
    for answer in request.answers {
        let question_id = QuestionId(answer.question_id);
        if engine.catalog().question(question_id).is_none() {
            return service_error_response(AssessmentServiceError::UnknownQuestion(question_id));
        }
        sheet.select(question_id, answer.selected_option);
    }

    let evaluation = engine.evaluate(&sheet);
    (StatusCode::OK, axum::Json(evaluation)).into_response()
}

pub(crate) async fn start_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    axum::Json(request): axum::Json<StartRequest>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.start(&UserId(request.user_id)) {
        Ok(record) => {
            let view = AssessmentStatusView::from_record(&record, service.engine().catalog());
            (StatusCode::CREATED, axum::Json(view)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.get(&AssessmentId(assessment_id)) {
        Ok(record) => {
            let view = AssessmentStatusView::from_record(&record, service.engine().catalog());
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn discard_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.discard(&AssessmentId(assessment_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn answer_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(assessment_id): Path<String>,
    axum::Json(request): axum::Json<AnswerRequest>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    let id = AssessmentId(assessment_id);
    match service.answer(&id, QuestionId(request.question_id), request.selected_option) {
        Ok(record) => {
            let view = AssessmentStatusView::from_record(&record, service.engine().catalog());
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn finalize_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.finalize(&AssessmentId(assessment_id)) {
        Ok(assessment) => {
            let view = AssessmentResultView::build(&assessment, service.engine());
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn result_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    let id = AssessmentId(assessment_id);
    match service.get(&id) {
        Ok(record) => match record.assessment {
            Some(assessment) => {
                let view = AssessmentResultView::build(&assessment, service.engine());
                (StatusCode::OK, axum::Json(view)).into_response()
            }
            None => {
                let payload = json!({
                    "error": format!("assessment {} is not completed", id),
                    "status": record.status.label(),
                });
                (StatusCode::CONFLICT, axum::Json(payload)).into_response()
            }
        },
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn history_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.history(&UserId(user_id)) {
        Ok(records) => {
            let entries: Vec<HistoryEntryView> = records
                .iter()
                .filter_map(|record| record.assessment.as_ref())
                .map(|assessment| HistoryEntryView::build(assessment, service.engine()))
                .collect();
            (StatusCode::OK, axum::Json(entries)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

fn service_error_response(error: AssessmentServiceError) -> Response {
    let (status, payload) = match &error {
        AssessmentServiceError::Repository(RepositoryError::NotFound) => {
            (StatusCode::NOT_FOUND, json!({ "error": error.to_string() }))
        }
        AssessmentServiceError::AlreadyCompleted(_)
        | AssessmentServiceError::Repository(RepositoryError::Conflict) => {
            (StatusCode::CONFLICT, json!({ "error": error.to_string() }))
        }
        AssessmentServiceError::Incomplete { missing } => {
            let missing: Vec<u16> = missing.iter().map(|question| question.0).collect();
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": error.to_string(), "missing": missing }),
            )
        }
        AssessmentServiceError::UnknownQuestion(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({ "error": error.to_string() }),
        ),
        AssessmentServiceError::Repository(RepositoryError::Unavailable(_)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": error.to_string() }),
        ),
    };

    (status, axum::Json(payload)).into_response()
}
