use serde::Serialize;

use super::super::domain::Rating;
use super::config::RecommendationConfig;

/// Rating and text resolved for one category score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryResolution {
    pub rating: Option<Rating>,
    pub recommendation: String,
}

/// Overall text and display tier resolved for the overall score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverallResolution {
    pub tier: u8,
    pub recommendation: String,
}

/// Maps scores to ratings and texts using the configured bands.
#[derive(Debug, Clone, Default)]
pub struct RecommendationResolver {
    config: RecommendationConfig,
}

impl RecommendationResolver {
    pub fn new(config: RecommendationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RecommendationConfig {
        &self.config
    }

    /// First band containing `score` wins; scores outside every band take the last one.
    /// Unknown categories resolve to the unavailable text without a rating.
    pub fn resolve_category(&self, category_name: &str, score: i32) -> CategoryResolution {
        let band = self
            .config
            .rubric(category_name)
            .and_then(|rubric| {
                rubric
                    .bands
                    .iter()
                    .find(|band| band.contains(score))
                    .or_else(|| rubric.bands.last())
            });

        match band {
            Some(band) => CategoryResolution {
                rating: Some(band.rating),
                recommendation: band.recommendation.clone(),
            },
            None => self.unavailable(),
        }
    }

    pub fn resolve_overall(&self, score: i32) -> OverallResolution {
        let band = self
            .config
            .overall
            .iter()
            .find(|band| band.contains(score))
            .or_else(|| self.config.overall.last());

        match band {
            Some(band) => OverallResolution {
                tier: band.tier,
                recommendation: band.recommendation.clone(),
            },
            None => OverallResolution {
                tier: 5,
                recommendation: self.config.unavailable.clone(),
            },
        }
    }

    pub(crate) fn unavailable(&self) -> CategoryResolution {
        CategoryResolution {
            rating: None,
            recommendation: self.config.unavailable.clone(),
        }
    }
}
