use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::super::catalog::{EATING_HABITS, LIFESTYLE, MICRONUTRIENTS, RISK_FACTORS};
use super::super::domain::Rating;

/// Closed score interval mapped to a rating and a category-specific text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBand {
    pub min: i32,
    pub max: i32,
    pub rating: Rating,
    pub recommendation: String,
}

impl ScoreBand {
    pub fn contains(&self, score: i32) -> bool {
        (self.min..=self.max).contains(&score)
    }
}

/// Bands of one category, evaluated top-down. The last band is the fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRubric {
    pub category_name: String,
    pub bands: Vec<ScoreBand>,
}

/// Band of the overall score. `tier` runs from 1 (best) to 5.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallBand {
    pub min: i32,
    pub max: i32,
    pub tier: u8,
    pub recommendation: String,
}

impl OverallBand {
    pub fn contains(&self, score: i32) -> bool {
        (self.min..=self.max).contains(&score)
    }
}

/// Recommendation tables keyed by category name and band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationConfig {
    pub categories: Vec<CategoryRubric>,
    pub overall: Vec<OverallBand>,
    /// Text used when a category has no rubric or no questions.
    pub unavailable: String,
}

impl RecommendationConfig {
    /// The built-in German tables.
    pub fn standard() -> Self {
        let categories = [
            (EATING_HABITS, &SCALE_45, EATING_HABITS_TEXTS),
            (MICRONUTRIENTS, &SCALE_45, MICRONUTRIENT_TEXTS),
            (RISK_FACTORS, &SCALE_30, RISK_FACTOR_TEXTS),
            (LIFESTYLE, &SCALE_30, LIFESTYLE_TEXTS),
        ]
        .into_iter()
        .map(|(name, scale, texts)| CategoryRubric {
            category_name: name.to_string(),
            bands: scale
                .iter()
                .zip(texts)
                .map(|(&(min, max, rating), text)| ScoreBand {
                    min,
                    max,
                    rating,
                    recommendation: text.to_string(),
                })
                .collect(),
        })
        .collect();

        let overall = OVERALL_BANDS
            .iter()
            .enumerate()
            .map(|(index, &(min, max, text))| OverallBand {
                min,
                max,
                tier: index as u8 + 1,
                recommendation: text.to_string(),
            })
            .collect();

        Self {
            categories,
            overall,
            unavailable: UNAVAILABLE_TEXT.to_string(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, RecommendationConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RecommendationConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn rubric(&self, category_name: &str) -> Option<&CategoryRubric> {
        self.categories
            .iter()
            .find(|rubric| rubric.category_name == category_name)
    }

    fn validate(&self) -> Result<(), RecommendationConfigError> {
        if let Some(rubric) = self.categories.iter().find(|rubric| rubric.bands.is_empty()) {
            return Err(RecommendationConfigError::EmptyRubric(
                rubric.category_name.clone(),
            ));
        }
        if self.overall.is_empty() {
            return Err(RecommendationConfigError::EmptyRubric("overall".to_string()));
        }
        Ok(())
    }
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug)]
pub enum RecommendationConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
    EmptyRubric(String),
}

impl fmt::Display for RecommendationConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecommendationConfigError::Io(err) => {
                write!(f, "failed to read recommendation table: {}", err)
            }
            RecommendationConfigError::Json(err) => {
                write!(f, "invalid recommendation table: {}", err)
            }
            RecommendationConfigError::EmptyRubric(name) => {
                write!(f, "rubric '{}' defines no bands", name)
            }
        }
    }
}

impl std::error::Error for RecommendationConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecommendationConfigError::Io(err) => Some(err),
            RecommendationConfigError::Json(err) => Some(err),
            RecommendationConfigError::EmptyRubric(_) => None,
        }
    }
}

impl From<std::io::Error> for RecommendationConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for RecommendationConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

const UNAVAILABLE_TEXT: &str = "Bewertung für diese Kategorie nicht verfügbar.";

// 15 questions x 3 points
const SCALE_45: [(i32, i32, Rating); 5] = [
    (36, 45, Rating::Optimal),
    (27, 35, Rating::Gut),
    (18, 26, Rating::Verbesserungswuerdig),
    (10, 17, Rating::Risiko),
    (0, 9, Rating::Kritisch),
];

// 10 questions x 3 points
const SCALE_30: [(i32, i32, Rating); 5] = [
    (24, 30, Rating::Optimal),
    (18, 23, Rating::Gut),
    (12, 17, Rating::Verbesserungswuerdig),
    (6, 11, Rating::Risiko),
    (0, 5, Rating::Kritisch),
];

const EATING_HABITS_TEXTS: [&str; 5] = [
    "Ihre allgemeinen Ernährungsgewohnheiten sind hervorragend.",
    "Ihre Ernährungsgewohnheiten sind insgesamt gut.",
    "Ihre Ernährungsgewohnheiten weisen einige Mängel auf.",
    "Ihre Ernährungsgewohnheiten setzen Sie einem erhöhten Risiko aus.",
    "Ihre Ernährungsgewohnheiten sind ungesund und erfordern dringend Änderungen.",
];

const MICRONUTRIENT_TEXTS: [&str; 5] = [
    "Sie nehmen eine ausgezeichnete Menge an Mikronährstoffen zu sich.",
    "Ihre Mikronährstoffaufnahme ist gut, aber es gibt Lücken.",
    "Es gibt deutliche Lücken in Ihrer Mikronährstoffaufnahme.",
    "Ihre derzeitige Mikronährstoffaufnahme ist unzureichend.",
    "Sie sind stark gefährdet, an Mangelerscheinungen zu leiden.",
];

const RISK_FACTOR_TEXTS: [&str; 5] = [
    "Sie haben einen gesunden Lebensstil und ein geringes Risiko.",
    "Einige Präventionsstrategien könnten verstärkt werden.",
    "Ihr Lebensstil birgt einige Risiken.",
    "Sie haben ein erhöhtes Risiko und sollten Maßnahmen ergreifen.",
    "Ihr aktueller Lebensstil ist sehr riskant.",
];

const LIFESTYLE_TEXTS: [&str; 5] = [
    "Sie führen einen sehr aktiven Lebensstil.",
    "Ihr Lebensstil ist gut, aber es gibt Raum für Verbesserungen.",
    "Ihr Lebensstil hat Schwachstellen.",
    "Ihr Lebensstil birgt erhebliche Risiken.",
    "Ihr Lebensstil gefährdet Ihre Gesundheit ernsthaft.",
];

const OVERALL_BANDS: [(i32, i32, &str); 5] = [
    (
        120,
        150,
        "Deine Ernährung und dein Lebensstil sind hervorragend ausbalanciert.",
    ),
    (
        90,
        119,
        "Deine Gesundheit ist gut, es gibt jedoch Raum für Verbesserungen.",
    ),
    (
        60,
        89,
        "Deine Ernährung und dein Lebensstil sind überwiegend in Ordnung.",
    ),
    (
        30,
        59,
        "Dein aktueller Lebensstil könnte dein Risiko erhöhen.",
    ),
    (
        0,
        29,
        "Es sind wesentliche Änderungen erforderlich, um deine Gesundheit zu verbessern.",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_tables_hold_twenty_category_texts() {
        let config = RecommendationConfig::standard();
        let texts: std::collections::HashSet<&str> = config
            .categories
            .iter()
            .flat_map(|rubric| rubric.bands.iter())
            .map(|band| band.recommendation.as_str())
            .collect();

        assert_eq!(config.categories.len(), 4);
        assert_eq!(texts.len(), 20);
        assert_eq!(config.overall.len(), 5);
        assert_eq!(config.overall[0].tier, 1);
        assert_eq!(config.overall[4].tier, 5);
    }

    #[test]
    fn json_round_trip_preserves_tables() {
        let config = RecommendationConfig::standard();
        let raw = serde_json::to_string(&config).expect("serializes");

        let loaded = RecommendationConfig::from_json(&raw).expect("loads");

        assert_eq!(loaded, config);
    }

    #[test]
    fn from_json_rejects_rubric_without_bands() {
        let raw = r#"{
            "categories": [{ "category_name": "Lebensstil und Aktivität", "bands": [] }],
            "overall": [{ "min": 0, "max": 150, "tier": 1, "recommendation": "ok" }],
            "unavailable": "n/a"
        }"#;

        match RecommendationConfig::from_json(raw) {
            Err(RecommendationConfigError::EmptyRubric(name)) => {
                assert_eq!(name, "Lebensstil und Aktivität");
            }
            other => panic!("expected empty rubric error, got {other:?}"),
        }
    }

    #[test]
    fn from_path_reports_missing_file() {
        let result = RecommendationConfig::from_path("/nonexistent/recommendations.json");
        assert!(matches!(result, Err(RecommendationConfigError::Io(_))));
    }
}
