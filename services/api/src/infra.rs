use chrono::{DateTime, Local, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use proof_your_health::assessment::{
    AssessmentId, AssessmentRecord, AssessmentRepository, RecommendationConfig, RepositoryError,
    UserId,
};
use proof_your_health::config::ScoringConfig;
use proof_your_health::error::AppError;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAssessmentRepository {
    records: Arc<Mutex<HashMap<AssessmentId, AssessmentRecord>>>,
}

impl AssessmentRepository for InMemoryAssessmentRepository {
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
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn delete(&self, id: &AssessmentId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
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

/// Built-in tables unless `APP_RECOMMENDATIONS_PATH` points at a JSON override.
pub(crate) fn load_recommendations(config: &ScoringConfig) -> Result<RecommendationConfig, AppError> {
    match &config.recommendations_path {
        Some(path) => {
            let loaded = RecommendationConfig::from_path(path)?;
            info!(path = %path.display(), "loaded recommendation tables");
            Ok(loaded)
        }
        None => Ok(RecommendationConfig::standard()),
    }
}

pub(crate) fn format_local(date: DateTime<Utc>) -> String {
    date.with_timezone(&Local)
        .format("%d.%m.%Y %H:%M")
        .to_string()
}
