use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{AnswerSheet, Assessment, AssessmentId, AssessmentStatus, UserId};

/// Repository record for one run: the answers so far and, once completed, the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub id: AssessmentId,
    pub user_id: UserId,
    pub started_at: DateTime<Utc>,
    pub status: AssessmentStatus,
    pub answers: AnswerSheet,
    pub assessment: Option<Assessment>,
}

impl AssessmentRecord {
    pub fn overall_score(&self) -> Option<i32> {
        self.assessment
            .as_ref()
            .map(|assessment| assessment.overall_score)
    }

    /// Ordering key for "most recent" decisions; ids break timestamp ties.
    pub(crate) fn recency_key(&self) -> (DateTime<Utc>, &str) {
        (self.started_at, self.id.0.as_str())
    }
}

/// Storage abstraction so the service can be exercised in isolation. Implementations
/// serialize writes to a single record.
pub trait AssessmentRepository: Send + Sync {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError>;
    fn update(&self, record: AssessmentRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError>;
    /// Removes the record together with its answers and results.
    fn delete(&self, id: &AssessmentId) -> Result<(), RepositoryError>;
    fn for_user(&self, user_id: &UserId) -> Result<Vec<AssessmentRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
