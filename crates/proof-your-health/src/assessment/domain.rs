use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a catalog question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub u16);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// Identifier of a catalog category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub u8);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Identifier wrapper for assessment runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssessmentId(pub String);

impl fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque user reference supplied by the caller; credentials live elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Qualitative rating attached to a category score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    Optimal,
    Gut,
    #[serde(rename = "Verbesserungswürdig")]
    Verbesserungswuerdig,
    Risiko,
    Kritisch,
}

impl Rating {
    pub const fn label(self) -> &'static str {
        match self {
            Rating::Optimal => "Optimal",
            Rating::Gut => "Gut",
            Rating::Verbesserungswuerdig => "Verbesserungswürdig",
            Rating::Risiko => "Risiko",
            Rating::Kritisch => "Kritisch",
        }
    }

    /// Display tier from 1 (best) to 5 (worst).
    pub const fn tier(self) -> u8 {
        match self {
            Rating::Optimal => 1,
            Rating::Gut => 2,
            Rating::Verbesserungswuerdig => 3,
            Rating::Risiko => 4,
            Rating::Kritisch => 5,
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Selections of one in-progress run, keyed by question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSheet {
    selections: BTreeMap<QuestionId, String>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a selection, returning the one it replaced.
    pub fn select(&mut self, question: QuestionId, option: impl Into<String>) -> Option<String> {
        self.selections.insert(question, option.into())
    }

    pub fn clear(&mut self, question: QuestionId) -> Option<String> {
        self.selections.remove(&question)
    }

    pub fn selection(&self, question: QuestionId) -> Option<&str> {
        self.selections.get(&question).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, &str)> + '_ {
        self.selections
            .iter()
            .map(|(question, option)| (*question, option.as_str()))
    }
}

impl<S: Into<String>> FromIterator<(QuestionId, S)> for AnswerSheet {
    fn from_iter<I: IntoIterator<Item = (QuestionId, S)>>(iter: I) -> Self {
        Self {
            selections: iter
                .into_iter()
                .map(|(question, option)| (question, option.into()))
                .collect(),
        }
    }
}

/// Scored answer to a single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: QuestionId,
    pub selected_option: Option<String>,
    pub points: u8,
}

/// Per-category outcome of a finished run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResult {
    pub category_name: String,
    pub score: i32,
    pub max_score: i32,
    pub rating: Option<Rating>,
    pub recommendation: String,
}

/// A finalized run: scores and recommendations derived from a full answer set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: AssessmentId,
    pub date: DateTime<Utc>,
    pub overall_score: i32,
    pub overall_recommendation: String,
    pub category_results: Vec<CategoryResult>,
    pub answers: Vec<Answer>,
}

impl Assessment {
    pub fn category(&self, name: &str) -> Option<&CategoryResult> {
        self.category_results
            .iter()
            .find(|result| result.category_name == name)
    }
}

/// Lifecycle of a run. Replaces guessing abandonment from a zero score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    Started,
    InProgress,
    Completed,
}

impl AssessmentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            AssessmentStatus::Started => "started",
            AssessmentStatus::InProgress => "in_progress",
            AssessmentStatus::Completed => "completed",
        }
    }

    pub const fn is_completed(self) -> bool {
        matches!(self, AssessmentStatus::Completed)
    }
}

/// `round(score / max * 100)`, clamped to 0..=100.
pub fn score_percentage(score: i32, max_score: i32) -> u8 {
    if max_score <= 0 {
        return 0;
    }
    let ratio = f64::from(score.max(0)) / f64::from(max_score);
    (ratio * 100.0).round().min(100.0) as u8
}
