use chrono::{DateTime, Utc};
use serde::Serialize;

use super::catalog::{Question, QuestionCatalog};
use super::domain::{score_percentage, Assessment, AssessmentStatus, Rating};
use super::repository::AssessmentRecord;
use super::scoring::ScoringEngine;

#[derive(Debug, Clone, Serialize)]
pub struct NextQuestionView {
    pub question_id: u16,
    pub order: u16,
    pub category_name: String,
    pub text: String,
    pub options: Vec<String>,
}

impl NextQuestionView {
    fn from_question(question: &Question, catalog: &QuestionCatalog) -> Self {
        Self {
            question_id: question.id.0,
            order: question.order,
            category_name: category_name(catalog, question),
            text: question.text.clone(),
            options: question.options.to_vec(),
        }
    }
}

/// Progress snapshot of a run, as returned by the status endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentStatusView {
    pub assessment_id: String,
    pub user_id: String,
    pub status: AssessmentStatus,
    pub status_label: &'static str,
    pub started_at: DateTime<Utc>,
    pub answered: usize,
    pub total: usize,
    pub progress_pct: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_question: Option<NextQuestionView>,
    pub overall_score: Option<i32>,
}

impl AssessmentStatusView {
    pub fn from_record(record: &AssessmentRecord, catalog: &QuestionCatalog) -> Self {
        let answered = catalog
            .questions()
            .iter()
            .filter(|question| record.answers.selection(question.id).is_some())
            .count();
        let total = catalog.len();

        let next_question = if record.status.is_completed() {
            None
        } else {
            catalog
                .questions()
                .iter()
                .find(|question| record.answers.selection(question.id).is_none())
                .map(|question| NextQuestionView::from_question(question, catalog))
        };

        Self {
            assessment_id: record.id.0.clone(),
            user_id: record.user_id.0.clone(),
            status: record.status,
            status_label: record.status.label(),
            started_at: record.started_at,
            answered,
            total,
            progress_pct: score_percentage(answered as i32, total as i32),
            next_question,
            overall_score: record.overall_score(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryResultView {
    pub category_name: String,
    pub score: i32,
    pub max_score: i32,
    pub rating: Option<Rating>,
    pub rating_label: Option<&'static str>,
    pub tier: Option<u8>,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerDetailView {
    pub order: u16,
    pub question: String,
    pub selected_option: Option<String>,
    pub points: u8,
}

/// Result screen of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentResultView {
    pub assessment_id: String,
    pub date: DateTime<Utc>,
    pub overall_score: i32,
    pub max_score: i32,
    pub percentage: u8,
    pub tier: u8,
    pub overall_recommendation: String,
    pub categories: Vec<CategoryResultView>,
    pub answers: Vec<AnswerDetailView>,
}

impl AssessmentResultView {
    pub fn build(assessment: &Assessment, engine: &ScoringEngine) -> Self {
        let catalog = engine.catalog();
        let max_score = catalog.max_score();

        let categories = assessment
            .category_results
            .iter()
            .map(|result| CategoryResultView {
                category_name: result.category_name.clone(),
                score: result.score,
                max_score: result.max_score,
                rating: result.rating,
                rating_label: result.rating.map(Rating::label),
                tier: result.rating.map(Rating::tier),
                recommendation: result.recommendation.clone(),
            })
            .collect();

        let mut answers: Vec<AnswerDetailView> = assessment
            .answers
            .iter()
            .filter_map(|answer| {
                let question = catalog.question(answer.question_id)?;
                Some(AnswerDetailView {
                    order: question.order,
                    question: question.text.clone(),
                    selected_option: answer.selected_option.clone(),
                    points: answer.points,
                })
            })
            .collect();
        answers.sort_by_key(|detail| detail.order);

        Self {
            assessment_id: assessment.id.0.clone(),
            date: assessment.date,
            overall_score: assessment.overall_score,
            max_score,
            percentage: score_percentage(assessment.overall_score, max_score),
            tier: engine.resolve_overall(assessment.overall_score).tier,
            overall_recommendation: assessment.overall_recommendation.clone(),
            categories,
            answers,
        }
    }
}

/// One row of a user's history list.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntryView {
    pub assessment_id: String,
    pub date: DateTime<Utc>,
    pub overall_score: i32,
    pub percentage: u8,
    pub tier: u8,
}

impl HistoryEntryView {
    pub fn build(assessment: &Assessment, engine: &ScoringEngine) -> Self {
        Self {
            assessment_id: assessment.id.0.clone(),
            date: assessment.date,
            overall_score: assessment.overall_score,
            percentage: score_percentage(assessment.overall_score, engine.catalog().max_score()),
            tier: engine.resolve_overall(assessment.overall_score).tier,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogQuestionView {
    pub question_id: u16,
    pub order: u16,
    pub text: String,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogCategoryView {
    pub category_id: u8,
    pub name: String,
    pub max_score: i32,
    pub questions: Vec<CatalogQuestionView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogView {
    pub total_questions: usize,
    pub max_score: i32,
    pub categories: Vec<CatalogCategoryView>,
}

impl CatalogView {
    pub fn from_catalog(catalog: &QuestionCatalog) -> Self {
        let categories = catalog
            .categories()
            .iter()
            .map(|category| CatalogCategoryView {
                category_id: category.id.0,
                name: category.name.clone(),
                max_score: catalog.category_max_score(category.id),
                questions: catalog
                    .questions_in(category.id)
                    .map(|question| CatalogQuestionView {
                        question_id: question.id.0,
                        order: question.order,
                        text: question.text.clone(),
                        options: question.options.to_vec(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            total_questions: catalog.len(),
            max_score: catalog.max_score(),
            categories,
        }
    }
}

fn category_name(catalog: &QuestionCatalog, question: &Question) -> String {
    catalog
        .category(question.category_id)
        .map(|category| category.name.clone())
        .unwrap_or_default()
}
