//! Proof Your Health questionnaire: catalog, scoring, assessment lifecycle and HTTP surface.
//!
//! The catalog is read-only and shared behind an `Arc`. Scoring is pure; the service layer
//! owns the `Started -> InProgress -> Completed` lifecycle and persistence through the
//! [`AssessmentRepository`] seam.

pub mod catalog;
pub mod domain;
pub mod import;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod views;

#[cfg(test)]
mod tests;

pub use catalog::{
    CatalogError, CatalogIssue, Category, Question, QuestionCatalog, MAX_POINTS_PER_QUESTION,
    OPTIONS_PER_QUESTION,
};
pub use domain::{
    score_percentage, Answer, AnswerSheet, Assessment, AssessmentId, AssessmentStatus,
    CategoryId, CategoryResult, QuestionId, Rating, UserId,
};
pub use import::{AnswerImportError, AnswerSheetImporter};
pub use repository::{AssessmentRecord, AssessmentRepository, RepositoryError};
pub use router::assessment_router;
pub use scoring::{
    points_for, CategoryResolution, CategoryRubric, Evaluation, OverallBand, OverallResolution,
    RecommendationConfig, RecommendationConfigError, RecommendationResolver, ScoreBand,
    ScoringEngine,
};
pub use service::{AssessmentService, AssessmentServiceError};
pub use views::{
    AnswerDetailView, AssessmentResultView, AssessmentStatusView, CatalogCategoryView,
    CatalogQuestionView, CatalogView, CategoryResultView, HistoryEntryView, NextQuestionView,
};
