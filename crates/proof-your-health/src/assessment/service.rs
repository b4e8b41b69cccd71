use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tracing::{debug, info};

use super::catalog::QuestionCatalog;
use super::domain::{
    AnswerSheet, Assessment, AssessmentId, AssessmentStatus, QuestionId, UserId,
};
use super::repository::{AssessmentRecord, AssessmentRepository, RepositoryError};
use super::scoring::{RecommendationConfig, ScoringEngine};

/// Service driving a user through start, answering, finalizing and history.
///
/// Every read-modify-write of a record runs under that record's lock, and `start` runs under
/// the user's lock, so concurrent handlers never overwrite each other's changes.
pub struct AssessmentService<R> {
    repository: Arc<R>,
    engine: Arc<ScoringEngine>,
    record_locks: KeyedLocks<AssessmentId>,
    user_locks: KeyedLocks<UserId>,
}

/// One mutex per key, created on first use.
struct KeyedLocks<K> {
    slots: Mutex<HashMap<K, Arc<Mutex<()>>>>,
}

impl<K: Eq + Hash + Clone> KeyedLocks<K> {
    fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }

    fn slot(&self, key: &K) -> Arc<Mutex<()>> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(key.clone()).or_default())
    }

    fn forget(&self, key: &K) {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.remove(key);
    }
}

fn hold(slot: &Mutex<()>) -> MutexGuard<'_, ()> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

static ASSESSMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_assessment_id() -> AssessmentId {
    let id = ASSESSMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AssessmentId(format!("asmt-{id:06}"))
}

impl<R> AssessmentService<R>
where
    R: AssessmentRepository + 'static,
{
    pub fn new(
        repository: Arc<R>,
        catalog: Arc<QuestionCatalog>,
        config: RecommendationConfig,
    ) -> Self {
        Self::with_engine(repository, Arc::new(ScoringEngine::new(catalog, config)))
    }

    pub fn with_engine(repository: Arc<R>, engine: Arc<ScoringEngine>) -> Self {
        Self {
            repository,
            engine,
            record_locks: KeyedLocks::new(),
            user_locks: KeyedLocks::new(),
        }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Start a new run. The user's latest run is discarded when it never completed.
    pub fn start(&self, user_id: &UserId) -> Result<AssessmentRecord, AssessmentServiceError> {
        let user_slot = self.user_locks.slot(user_id);
        let _user_guard = hold(&user_slot);

        let existing = self.repository.for_user(user_id)?;
        let latest = existing
            .iter()
            .max_by(|left, right| left.recency_key().cmp(&right.recency_key()));

        if let Some(candidate) = latest.filter(|record| !record.status.is_completed()) {
            let slot = self.record_locks.slot(&candidate.id);
            let _guard = hold(&slot);
            // A finalize may have completed the run since the listing above.
            if let Some(abandoned) = self
                .repository
                .fetch(&candidate.id)?
                .filter(|record| !record.status.is_completed())
            {
                self.repository.delete(&abandoned.id)?;
                self.record_locks.forget(&abandoned.id);
                debug!(
                    assessment_id = %abandoned.id,
                    answered = abandoned.answers.len(),
                    "discarded unfinished assessment"
                );
            }
        }

        let record = AssessmentRecord {
            id: next_assessment_id(),
            user_id: user_id.clone(),
            started_at: Utc::now(),
            status: AssessmentStatus::Started,
            answers: AnswerSheet::new(),
            assessment: None,
        };

        let stored = self.repository.insert(record)?;
        info!(assessment_id = %stored.id, user_id = %user_id, "assessment started");
        Ok(stored)
    }

    /// Record or replace the selection for one question.
    pub fn answer(
        &self,
        assessment_id: &AssessmentId,
        question_id: QuestionId,
        selected_option: impl Into<String>,
    ) -> Result<AssessmentRecord, AssessmentServiceError> {
        if self.engine.catalog().question(question_id).is_none() {
            return Err(AssessmentServiceError::UnknownQuestion(question_id));
        }

        let slot = self.record_locks.slot(assessment_id);
        let _guard = hold(&slot);
        let mut record = self.fetch_record(assessment_id)?;
        if record.status.is_completed() {
            return Err(AssessmentServiceError::AlreadyCompleted(assessment_id.clone()));
        }
        record.answers.select(question_id, selected_option);
        record.status = AssessmentStatus::InProgress;
        self.repository.update(record.clone())?;
        Ok(record)
    }

    /// Score a fully answered run and persist the result.
    pub fn finalize(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<Assessment, AssessmentServiceError> {
        let slot = self.record_locks.slot(assessment_id);
        let _guard = hold(&slot);
        let mut record = self.fetch_record(assessment_id)?;
        if record.status.is_completed() {
            return Err(AssessmentServiceError::AlreadyCompleted(assessment_id.clone()));
        }

        let missing = self.engine.missing_questions(&record.answers);
        if !missing.is_empty() {
            return Err(AssessmentServiceError::Incomplete { missing });
        }

        let assessment =
            self.engine
                .finalize(record.id.clone(), record.started_at, &record.answers);

        record.status = AssessmentStatus::Completed;
        record.assessment = Some(assessment.clone());
        self.repository.update(record)?;

        info!(
            assessment_id = %assessment.id,
            overall_score = assessment.overall_score,
            "assessment completed"
        );
        Ok(assessment)
    }

    /// Drop an unfinished run, e.g. when the user cancels.
    pub fn discard(&self, assessment_id: &AssessmentId) -> Result<(), AssessmentServiceError> {
        let slot = self.record_locks.slot(assessment_id);
        let _guard = hold(&slot);
        let record = self.fetch_record(assessment_id)?;
        if record.status.is_completed() {
            return Err(AssessmentServiceError::AlreadyCompleted(assessment_id.clone()));
        }
        self.repository.delete(assessment_id)?;
        self.record_locks.forget(assessment_id);
        Ok(())
    }

    pub fn get(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<AssessmentRecord, AssessmentServiceError> {
        self.fetch_record(assessment_id)
    }

    /// Completed runs of a user, newest first.
    pub fn history(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<AssessmentRecord>, AssessmentServiceError> {
        let mut records: Vec<AssessmentRecord> = self
            .repository
            .for_user(user_id)?
            .into_iter()
            .filter(|record| record.status.is_completed())
            .collect();
        records.sort_by(|left, right| right.recency_key().cmp(&left.recency_key()));
        Ok(records)
    }

    fn fetch_record(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<AssessmentRecord, AssessmentServiceError> {
        let record = self
            .repository
            .fetch(assessment_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error("assessment {0} is already completed")]
    AlreadyCompleted(AssessmentId),
    #[error("question {0} is not part of the catalog")]
    UnknownQuestion(QuestionId),
    #[error("assessment is incomplete: {} question(s) unanswered", .missing.len())]
    Incomplete { missing: Vec<QuestionId> },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
