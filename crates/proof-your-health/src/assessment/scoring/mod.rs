mod config;
mod policy;
mod rules;

pub use config::{
    CategoryRubric, OverallBand, RecommendationConfig, RecommendationConfigError, ScoreBand,
};
pub use policy::{CategoryResolution, OverallResolution, RecommendationResolver};
pub use rules::points_for;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::{Question, QuestionCatalog};
use super::domain::{Answer, AnswerSheet, Assessment, AssessmentId, CategoryResult, QuestionId};

/// Stateless aggregator turning an answer sheet into scores and recommendations.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    catalog: Arc<QuestionCatalog>,
    resolver: RecommendationResolver,
}

impl ScoringEngine {
    pub fn new(catalog: Arc<QuestionCatalog>, config: RecommendationConfig) -> Self {
        Self {
            catalog,
            resolver: RecommendationResolver::new(config),
        }
    }

    /// Seed catalog with the built-in German tables.
    pub fn standard() -> Self {
        Self::new(
            Arc::new(QuestionCatalog::standard()),
            RecommendationConfig::standard(),
        )
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    pub fn shared_catalog(&self) -> Arc<QuestionCatalog> {
        Arc::clone(&self.catalog)
    }

    pub fn score(&self, question: &Question, selected_option: Option<&str>) -> u8 {
        points_for(question, selected_option)
    }

    pub fn resolve_category(&self, category_name: &str, score: i32) -> CategoryResolution {
        self.resolver.resolve_category(category_name, score)
    }

    pub fn resolve_overall(&self, score: i32) -> OverallResolution {
        self.resolver.resolve_overall(score)
    }

    /// Questions without a selection, in catalog order.
    pub fn missing_questions(&self, answers: &AnswerSheet) -> Vec<QuestionId> {
        self.catalog
            .questions()
            .iter()
            .filter(|question| answers.selection(question.id).is_none())
            .map(|question| question.id)
            .collect()
    }

    /// Scores the sheet. Partial sheets are accepted; unanswered questions score 0.
    pub fn evaluate(&self, answers: &AnswerSheet) -> Evaluation {
        let (scored, tallies) = rules::tally(&self.catalog, answers);

        let category_results: Vec<CategoryResult> = tallies
            .into_iter()
            .map(|tally| {
                let resolution = if tally.question_count == 0 {
                    self.resolver.unavailable()
                } else {
                    self.resolver.resolve_category(&tally.name, tally.score)
                };

                CategoryResult {
                    category_name: tally.name,
                    score: tally.score,
                    max_score: tally.max_score,
                    rating: resolution.rating,
                    recommendation: resolution.recommendation,
                }
            })
            .collect();

        let overall_score = category_results.iter().map(|result| result.score).sum();
        let overall = self.resolver.resolve_overall(overall_score);

        Evaluation {
            overall_score,
            max_score: self.catalog.max_score(),
            overall_tier: overall.tier,
            overall_recommendation: overall.recommendation,
            category_results,
            answers: scored,
        }
    }

    /// Builds the finished assessment for `id`. Pure: identical sheets give identical results.
    pub fn finalize(
        &self,
        id: AssessmentId,
        date: DateTime<Utc>,
        answers: &AnswerSheet,
    ) -> Assessment {
        let evaluation = self.evaluate(answers);

        Assessment {
            id,
            date,
            overall_score: evaluation.overall_score,
            overall_recommendation: evaluation.overall_recommendation,
            category_results: evaluation.category_results,
            answers: evaluation.answers,
        }
    }
}

/// Date- and id-free scoring output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub overall_score: i32,
    pub max_score: i32,
    pub overall_tier: u8,
    pub overall_recommendation: String,
    pub category_results: Vec<CategoryResult>,
    pub answers: Vec<Answer>,
}
