use std::sync::Arc;

use chrono::{TimeZone, Utc};

use super::common::*;

use crate::assessment::catalog::{Category, Question, QuestionCatalog};
use crate::assessment::domain::{AnswerSheet, AssessmentId, CategoryId, QuestionId, Rating};
use crate::assessment::scoring::{points_for, RecommendationConfig, ScoringEngine};

#[test]
fn points_follow_option_rank() {
    let catalog = QuestionCatalog::standard();

    for question in catalog.questions() {
        let points: Vec<u8> = question
            .options
            .iter()
            .map(|option| points_for(question, Some(option)))
            .collect();

        assert_eq!(points, vec![3, 2, 1, 0], "question {}", question.order);
        assert_eq!(points_for(question, None), 0, "question {}", question.order);
        assert_eq!(
            points_for(question, Some("Nie gehört")),
            0,
            "question {}",
            question.order
        );
        assert_eq!(
            points_for(question, Some("")),
            0,
            "question {}",
            question.order
        );
    }
}

#[test]
fn all_best_answers_reach_the_maximum() {
    let engine = engine();
    let sheet = uniform_sheet(engine.catalog(), 0);

    let evaluation = engine.evaluate(&sheet);

    assert_eq!(evaluation.overall_score, 150);
    assert_eq!(evaluation.max_score, 150);
    assert_eq!(evaluation.overall_tier, 1);
    assert_eq!(evaluation.category_results.len(), 4);
    assert!(evaluation
        .category_results
        .iter()
        .all(|result| result.rating == Some(Rating::Optimal)));
    assert_eq!(
        evaluation
            .category_results
            .iter()
            .map(|result| result.score)
            .collect::<Vec<_>>(),
        vec![45, 45, 30, 30]
    );
}

#[test]
fn all_worst_answers_score_zero() {
    let engine = engine();
    let sheet = uniform_sheet(engine.catalog(), 3);

    let evaluation = engine.evaluate(&sheet);

    assert_eq!(evaluation.overall_score, 0);
    assert!(evaluation
        .category_results
        .iter()
        .all(|result| result.rating == Some(Rating::Kritisch)));
    assert_eq!(
        evaluation.overall_recommendation,
        "Es sind wesentliche Änderungen erforderlich, um deine Gesundheit zu verbessern."
    );
}

#[test]
fn overall_equals_sum_of_categories_and_answers() {
    let engine = engine();
    let sheet: AnswerSheet = engine
        .catalog()
        .questions()
        .iter()
        .filter(|question| question.order % 7 != 0)
        .map(|question| {
            let rank = usize::from(question.order) % 4;
            (question.id, question.options[rank].clone())
        })
        .collect();

    let evaluation = engine.evaluate(&sheet);

    let category_sum: i32 = evaluation
        .category_results
        .iter()
        .map(|result| result.score)
        .sum();
    let answer_sum: i32 = evaluation
        .answers
        .iter()
        .map(|answer| i32::from(answer.points))
        .sum();
    assert_eq!(evaluation.overall_score, category_sum);
    assert_eq!(evaluation.overall_score, answer_sum);
    assert_eq!(evaluation.answers.len(), 50);
    assert!(evaluation
        .answers
        .iter()
        .filter(|answer| answer.question_id.0 % 7 == 0)
        .all(|answer| answer.selected_option.is_none() && answer.points == 0));
}

#[test]
fn finalize_is_idempotent_for_identical_sheets() {
    let engine = engine();
    let sheet = uniform_sheet(engine.catalog(), 1);
    let date = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).single().expect("date");

    let first = engine.finalize(AssessmentId("asmt-a".to_string()), date, &sheet);
    let second = engine.finalize(AssessmentId("asmt-a".to_string()), date, &sheet);

    assert_eq!(first, second);
    assert_eq!(first.overall_score, 100);
    assert_eq!(first.date, date);
}

#[test]
fn missing_questions_are_listed_in_catalog_order() {
    let engine = engine();
    let mut sheet = uniform_sheet(engine.catalog(), 0);
    sheet.clear(QuestionId(12));
    sheet.clear(QuestionId(3));

    assert_eq!(
        engine.missing_questions(&sheet),
        vec![QuestionId(3), QuestionId(12)]
    );
    assert!(engine
        .missing_questions(&uniform_sheet(engine.catalog(), 2))
        .is_empty());
}

#[test]
fn empty_category_degrades_to_unavailable_text() {
    let categories = vec![
        Category {
            id: CategoryId(1),
            name: "Lebensstil und Aktivität".to_string(),
        },
        Category {
            id: CategoryId(2),
            name: "Schlaf".to_string(),
        },
    ];
    let questions = vec![Question {
        id: QuestionId(1),
        text: "Wie oft treibst du Sport?".to_string(),
        options: [
            "Täglich".to_string(),
            "Mehrmals pro Woche".to_string(),
            "Selten".to_string(),
            "Nie".to_string(),
        ],
        order: 1,
        category_id: CategoryId(1),
    }];
    let catalog = QuestionCatalog::try_new(categories, questions).expect("valid catalog");
    let engine = ScoringEngine::new(Arc::new(catalog), RecommendationConfig::standard());
    let sheet: AnswerSheet = [(QuestionId(1), "Täglich")].into_iter().collect();

    let evaluation = engine.evaluate(&sheet);

    let sleep = &evaluation.category_results[1];
    assert_eq!(sleep.score, 0);
    assert_eq!(sleep.max_score, 0);
    assert_eq!(sleep.rating, None);
    assert_eq!(
        sleep.recommendation,
        "Bewertung für diese Kategorie nicht verfügbar."
    );
    assert_eq!(evaluation.overall_score, 3);
}

#[test]
fn custom_recommendation_tables_are_honoured() {
    let mut config = RecommendationConfig::standard();
    config.overall[0].recommendation = "Weiter so!".to_string();
    let engine = ScoringEngine::new(Arc::new(QuestionCatalog::standard()), config);

    let evaluation = engine.evaluate(&uniform_sheet(engine.catalog(), 0));

    assert_eq!(evaluation.overall_recommendation, "Weiter so!");
}
