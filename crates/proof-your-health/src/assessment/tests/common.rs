use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use axum::Router;
use serde_json::Value;

use crate::assessment::catalog::{QuestionCatalog, MAX_POINTS_PER_QUESTION};
use crate::assessment::domain::{AnswerSheet, AssessmentId, UserId};
use crate::assessment::repository::{AssessmentRecord, AssessmentRepository, RepositoryError};
use crate::assessment::scoring::{RecommendationConfig, ScoringEngine};
use crate::assessment::{assessment_router, AssessmentService};

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::standard()
}

/// Every question answered with the option at `rank` (0 = best).
pub(super) fn uniform_sheet(catalog: &QuestionCatalog, rank: usize) -> AnswerSheet {
    catalog
        .questions()
        .iter()
        .map(|question| (question.id, question.options[rank].clone()))
        .collect()
}

/// Answers only `category_name`, choosing options so the category totals exactly `score`.
pub(super) fn category_sheet(
    catalog: &QuestionCatalog,
    category_name: &str,
    score: i32,
) -> AnswerSheet {
    let category = catalog
        .category_by_name(category_name)
        .expect("category exists");
    let mut remaining = score;

    catalog
        .questions_in(category.id)
        .map(|question| {
            let points = remaining.clamp(0, i32::from(MAX_POINTS_PER_QUESTION));
            remaining -= points;
            let rank = (i32::from(MAX_POINTS_PER_QUESTION) - points) as usize;
            (question.id, question.options[rank].clone())
        })
        .collect()
}

pub(super) fn user(name: &str) -> UserId {
    UserId(name.to_string())
}

pub(super) fn build_service() -> (AssessmentService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = AssessmentService::new(
        repository.clone(),
        Arc::new(QuestionCatalog::standard()),
        RecommendationConfig::standard(),
    );
    (service, repository)
}

pub(super) fn router_with_service<R>(service: AssessmentService<R>) -> Router
where
    R: AssessmentRepository + 'static,
{
    assessment_router(Arc::new(service))
}

/// Answers every question of `assessment_id` with the option at `rank`.
pub(super) fn answer_all(
    service: &AssessmentService<MemoryRepository>,
    assessment_id: &AssessmentId,
    rank: usize,
) {
    let questions = service.engine().catalog().questions().to_vec();
    for question in questions {
        service
            .answer(assessment_id, question.id, question.options[rank].clone())
            .expect("answer recorded");
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<AssessmentId, AssessmentRecord>>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }
}

impl AssessmentRepository for MemoryRepository {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: AssessmentRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard.get_mut(&record.id) {
            Some(stored) => {
                *stored = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn delete(&self, id: &AssessmentId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }

    fn for_user(&self, user_id: &UserId) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| &record.user_id == user_id)
            .cloned()
            .collect())
    }
}

pub(super) struct ConflictRepository;

impl AssessmentRepository for ConflictRepository {
    fn insert(&self, _record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: AssessmentRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        Ok(None)
    }

    fn delete(&self, _id: &AssessmentId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn for_user(&self, _user_id: &UserId) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl AssessmentRepository for UnavailableRepository {
    fn insert(&self, _record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: AssessmentRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _id: &AssessmentId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn for_user(&self, _user_id: &UserId) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn service_with<R>(repository: R) -> AssessmentService<R>
where
    R: AssessmentRepository + 'static,
{
    AssessmentService::new(
        Arc::new(repository),
        Arc::new(QuestionCatalog::standard()),
        RecommendationConfig::standard(),
    )
}

pub(super) fn assert_conflict_response(response: Response) {
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
