use super::common::*;

use crate::assessment::catalog::{EATING_HABITS, LIFESTYLE, MICRONUTRIENTS, RISK_FACTORS};
use crate::assessment::domain::Rating;
use crate::assessment::scoring::RecommendationResolver;

fn rating_for(category: &str, score: i32) -> Option<Rating> {
    RecommendationResolver::default()
        .resolve_category(category, score)
        .rating
}

#[test]
fn forty_five_point_scale_boundaries() {
    let cases = [
        (45, Rating::Optimal),
        (36, Rating::Optimal),
        (35, Rating::Gut),
        (27, Rating::Gut),
        (26, Rating::Verbesserungswuerdig),
        (18, Rating::Verbesserungswuerdig),
        (17, Rating::Risiko),
        (10, Rating::Risiko),
        (9, Rating::Kritisch),
        (0, Rating::Kritisch),
    ];

    for category in [EATING_HABITS, MICRONUTRIENTS] {
        for (score, expected) in cases {
            assert_eq!(
                rating_for(category, score),
                Some(expected),
                "{category} at {score}"
            );
        }
    }
}

#[test]
fn thirty_point_scale_boundaries() {
    let cases = [
        (30, Rating::Optimal),
        (24, Rating::Optimal),
        (23, Rating::Gut),
        (18, Rating::Gut),
        (17, Rating::Verbesserungswuerdig),
        (12, Rating::Verbesserungswuerdig),
        (11, Rating::Risiko),
        (6, Rating::Risiko),
        (5, Rating::Kritisch),
        (0, Rating::Kritisch),
    ];

    for category in [RISK_FACTORS, LIFESTYLE] {
        for (score, expected) in cases {
            assert_eq!(
                rating_for(category, score),
                Some(expected),
                "{category} at {score}"
            );
        }
    }
}

#[test]
fn category_texts_follow_the_band() {
    let resolver = RecommendationResolver::default();

    assert_eq!(
        resolver.resolve_category(EATING_HABITS, 36).recommendation,
        "Ihre allgemeinen Ernährungsgewohnheiten sind hervorragend."
    );
    assert_eq!(
        resolver.resolve_category(MICRONUTRIENTS, 9).recommendation,
        "Sie sind stark gefährdet, an Mangelerscheinungen zu leiden."
    );
    assert_eq!(
        resolver.resolve_category(RISK_FACTORS, 23).recommendation,
        "Einige Präventionsstrategien könnten verstärkt werden."
    );
    assert_eq!(
        resolver.resolve_category(LIFESTYLE, 5).recommendation,
        "Ihr Lebensstil gefährdet Ihre Gesundheit ernsthaft."
    );
}

#[test]
fn scores_outside_every_band_fall_to_the_last_band() {
    assert_eq!(rating_for(EATING_HABITS, 46), Some(Rating::Kritisch));
    assert_eq!(rating_for(LIFESTYLE, 31), Some(Rating::Kritisch));
    assert_eq!(rating_for(RISK_FACTORS, -1), Some(Rating::Kritisch));
}

#[test]
fn unknown_category_resolves_to_unavailable_text() {
    let resolution = RecommendationResolver::default().resolve_category("Schlaf", 20);

    assert_eq!(resolution.rating, None);
    assert_eq!(
        resolution.recommendation,
        "Bewertung für diese Kategorie nicht verfügbar."
    );
}

#[test]
fn overall_texts_per_band() {
    let resolver = RecommendationResolver::default();

    let top = resolver.resolve_overall(150);
    assert_eq!(top.tier, 1);
    assert_eq!(
        top.recommendation,
        "Deine Ernährung und dein Lebensstil sind hervorragend ausbalanciert."
    );

    let upper = resolver.resolve_overall(119);
    assert_eq!(upper.tier, 2);
    assert_eq!(
        upper.recommendation,
        "Deine Gesundheit ist gut, es gibt jedoch Raum für Verbesserungen."
    );

    assert_eq!(resolver.resolve_overall(89).tier, 3);
    assert_eq!(resolver.resolve_overall(30).tier, 4);

    for score in [29, 0] {
        let low = resolver.resolve_overall(score);
        assert_eq!(low.tier, 5);
        assert_eq!(
            low.recommendation,
            "Es sind wesentliche Änderungen erforderlich, um deine Gesundheit zu verbessern."
        );
    }
}

#[test]
fn engine_ratings_match_crafted_category_scores() {
    let engine = engine();
    let catalog = engine.catalog();

    for (category, score, expected) in [
        (EATING_HABITS, 36, Rating::Optimal),
        (EATING_HABITS, 35, Rating::Gut),
        (MICRONUTRIENTS, 26, Rating::Verbesserungswuerdig),
        (MICRONUTRIENTS, 9, Rating::Kritisch),
        (RISK_FACTORS, 24, Rating::Optimal),
        (LIFESTYLE, 23, Rating::Gut),
        (LIFESTYLE, 5, Rating::Kritisch),
    ] {
        let sheet = category_sheet(catalog, category, score);
        let evaluation = engine.evaluate(&sheet);
        let result = evaluation
            .category_results
            .iter()
            .find(|result| result.category_name == category)
            .expect("category result present");

        assert_eq!(result.score, score);
        assert_eq!(result.rating, Some(expected), "{category} at {score}");
    }
}
