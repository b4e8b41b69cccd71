use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::domain::{CategoryId, QuestionId};

/// Number of answer options every question offers.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// Points awarded for the best-ranked option.
pub const MAX_POINTS_PER_QUESTION: u8 = 3;

/// Life-domain grouping of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// A single survey question. `options` are ordered best first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub options: [String; OPTIONS_PER_QUESTION],
    pub order: u16,
    pub category_id: CategoryId,
}

impl Question {
    /// Rank of `option` among the four choices, first occurrence wins.
    pub fn rank_of(&self, option: &str) -> Option<usize> {
        self.options.iter().position(|candidate| candidate == option)
    }
}

/// Read-only question catalog. Relationships are resolved through id lookups.
#[derive(Debug, Clone)]
pub struct QuestionCatalog {
    categories: Vec<Category>,
    questions: Vec<Question>,
    question_index: HashMap<QuestionId, usize>,
}

impl QuestionCatalog {
    /// The seeded 50-question catalog.
    pub fn standard() -> Self {
        let categories = STANDARD_CATEGORIES
            .iter()
            .enumerate()
            .map(|(index, name)| Category {
                id: CategoryId(index as u8 + 1),
                name: (*name).to_string(),
            })
            .collect();

        let questions = STANDARD_QUESTIONS
            .iter()
            .enumerate()
            .map(|(index, seed)| {
                let order = index as u16 + 1;
                Question {
                    id: QuestionId(order),
                    text: seed.text.to_string(),
                    options: seed.options.map(str::to_string),
                    order,
                    category_id: CategoryId(seed.category + 1),
                }
            })
            .collect();

        Self::index(categories, questions)
    }

    /// Builds a catalog from arbitrary data. Only duplicate question ids are rejected here;
    /// semantic problems are reported by [`QuestionCatalog::issues`].
    pub fn try_new(
        categories: Vec<Category>,
        questions: Vec<Question>,
    ) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for question in &questions {
            if !seen.insert(question.id) {
                return Err(CatalogError::DuplicateQuestion(question.id));
            }
        }

        let mut seen = HashSet::new();
        for category in &categories {
            if !seen.insert(category.id) {
                return Err(CatalogError::DuplicateCategory(category.id));
            }
        }

        Ok(Self::index(categories, questions))
    }

    fn index(categories: Vec<Category>, mut questions: Vec<Question>) -> Self {
        questions.sort_by_key(|question| (question.order, question.id));
        let question_index = questions
            .iter()
            .enumerate()
            .map(|(position, question)| (question.id, position))
            .collect();

        Self {
            categories,
            questions,
            question_index,
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Questions in display/scoring order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.question_index
            .get(&id)
            .and_then(|position| self.questions.get(*position))
    }

    pub fn question_by_order(&self, order: u16) -> Option<&Question> {
        self.questions.iter().find(|question| question.order == order)
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn category_by_name(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.name == name)
    }

    pub fn questions_in(&self, category: CategoryId) -> impl Iterator<Item = &Question> + '_ {
        self.questions
            .iter()
            .filter(move |question| question.category_id == category)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Highest reachable overall score.
    pub fn max_score(&self) -> i32 {
        self.questions.len() as i32 * i32::from(MAX_POINTS_PER_QUESTION)
    }

    pub fn category_max_score(&self, category: CategoryId) -> i32 {
        self.questions_in(category).count() as i32 * i32::from(MAX_POINTS_PER_QUESTION)
    }

    /// Structural problems that make scoring degrade to fallback texts.
    pub fn issues(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();

        for category in &self.categories {
            if self.questions_in(category.id).next().is_none() {
                issues.push(CatalogIssue::EmptyCategory {
                    category: category.name.clone(),
                });
            }
        }

        let total = self.questions.len() as u16;
        let mut orders = HashSet::new();
        for question in &self.questions {
            if self.category(question.category_id).is_none() {
                issues.push(CatalogIssue::UnknownCategory {
                    question: question.id,
                    category: question.category_id,
                });
            }
            if question.order == 0 || question.order > total || !orders.insert(question.order) {
                issues.push(CatalogIssue::OrderOutOfSequence {
                    question: question.id,
                    order: question.order,
                });
            }
            let distinct: HashSet<&String> = question.options.iter().collect();
            if distinct.len() < OPTIONS_PER_QUESTION {
                issues.push(CatalogIssue::DuplicateOption {
                    question: question.id,
                });
            }
        }

        issues
    }
}

impl Default for QuestionCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Catalog construction failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("question {0} appears more than once")]
    DuplicateQuestion(QuestionId),
    #[error("category {0} appears more than once")]
    DuplicateCategory(CategoryId),
}

/// Problem found while inspecting a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogIssue {
    EmptyCategory {
        category: String,
    },
    UnknownCategory {
        question: QuestionId,
        category: CategoryId,
    },
    OrderOutOfSequence {
        question: QuestionId,
        order: u16,
    },
    DuplicateOption {
        question: QuestionId,
    },
}

struct QuestionSeed {
    text: &'static str,
    options: [&'static str; OPTIONS_PER_QUESTION],
    category: u8,
}

const fn seed(
    text: &'static str,
    options: [&'static str; OPTIONS_PER_QUESTION],
    category: u8,
) -> QuestionSeed {
    QuestionSeed {
        text,
        options,
        category,
    }
}

pub(crate) const EATING_HABITS: &str = "Ernährungsgewohnheiten";
pub(crate) const MICRONUTRIENTS: &str = "Mikronährstoffaufnahme";
pub(crate) const RISK_FACTORS: &str = "Risikofaktoren und Prävention";
pub(crate) const LIFESTYLE: &str = "Lebensstil und Aktivität";

const STANDARD_CATEGORIES: [&str; 4] = [EATING_HABITS, MICRONUTRIENTS, RISK_FACTORS, LIFESTYLE];

const STANDARD_QUESTIONS: [QuestionSeed; 50] = [
    seed(
        "Wie oft konsumierst du pro Woche Obst?",
        ["Täglich", "4-6 Mal pro Woche", "2-3 Mal pro Woche", "Seltener"],
        0,
    ),
    seed(
        "Wie oft isst du Gemüse pro Tag?",
        ["Mehr als 3 Portionen", "2-3 Portionen", "1 Portion", "Seltener"],
        0,
    ),
    seed(
        "Wie häufig konsumierst du Vollkornprodukte?",
        ["Bei jeder Mahlzeit", "Einmal täglich", "Mehrmals pro Woche", "Selten"],
        0,
    ),
    seed(
        "Welche Art von Fetten konsumierst du hauptsächlich?",
        [
            "Ungesättigte Fette",
            "Mischung aus gesättigten und ungesättigten Fetten",
            "Gesättigte Fette",
            "Transfette",
        ],
        0,
    ),
    seed(
        "Wie oft isst du verarbeitete Lebensmittel (z.B. Fast Food, Fertiggerichte)?",
        ["Selten", "1-2 Mal pro Woche", "3-4 Mal pro Woche", "Täglich"],
        0,
    ),
    seed(
        "Wie häufig konsumierst du zuckerhaltige Getränke?",
        ["Nie", "Einmal pro Woche", "Mehrmals pro Woche", "Täglich"],
        0,
    ),
    seed(
        "Wie oft konsumierst du Milchprodukte oder kalziumreiche Lebensmittel?",
        ["Täglich", "4-6 Mal pro Woche", "2-3 Mal pro Woche", "Selten"],
        0,
    ),
    seed(
        "Wie häufig konsumierst du rotes Fleisch?",
        ["Selten", "1-2 Mal pro Woche", "3-4 Mal pro Woche", "Täglich"],
        0,
    ),
    seed(
        "Wie oft konsumierst du Fisch oder andere Omega-3-reiche Lebensmittel?",
        ["Mehrmals pro Woche", "Einmal pro Woche", "Seltener", "Nie"],
        0,
    ),
    seed(
        "Wie oft nimmst du Hülsenfrüchte (z.B. Bohnen, Linsen) in deine Ernährung auf?",
        ["Täglich", "Mehrmals pro Woche", "Einmal pro Woche", "Selten/Nie"],
        0,
    ),
    seed(
        "Wie oft isst du Frühstück?",
        ["Täglich", "Mehrmals pro Woche", "Selten", "Nie"],
        0,
    ),
    seed(
        "Wie oft konsumierst du Snacks zwischen den Mahlzeiten?",
        ["Nie", "Einmal pro Tag", "Mehrmals pro Tag", "Ständig"],
        0,
    ),
    seed(
        "Wie häufig konsumierst du alkoholische Getränke?",
        ["Nie", "Einmal pro Woche", "Mehrmals pro Woche", "Täglich"],
        0,
    ),
    seed(
        "Wie oft konsumierst du fettreiche Milchprodukte (z.B. Käse, Butter)?",
        ["Selten/Nie", "1-2 Mal pro Woche", "Mehrmals pro Woche", "Täglich"],
        0,
    ),
    seed(
        "Wie oft isst du frisches Obst als Dessert?",
        ["Täglich", "Mehrmals pro Woche", "Einmal pro Woche", "Nie"],
        0,
    ),
    seed(
        "Wie oft konsumierst du Vitamin-D-reiche Lebensmittel (z.B. fetter Fisch, angereicherte Produkte)?",
        ["Täglich", "Mehrmals pro Woche", "Einmal pro Woche", "Seltener"],
        1,
    ),
    seed(
        "Wie häufig nimmst du eisenreiche Lebensmittel zu dir (z.B. rotes Fleisch, Spinat)?",
        ["Täglich", "Mehrmals pro Woche", "Einmal pro Woche", "Selten"],
        1,
    ),
    seed(
        "Wie oft isst du Lebensmittel, die reich an Vitamin C sind (z.B. Zitrusfrüchte, Paprika)?",
        ["Täglich", "Mehrmals pro Woche", "Einmal pro Woche", "Seltener"],
        1,
    ),
    seed(
        "Wie häufig konsumierst du Nüsse und Samen?",
        ["Täglich", "Mehrmals pro Woche", "Einmal pro Woche", "Selten"],
        1,
    ),
    seed(
        "Wie oft konsumierst du kaliumreiche Lebensmittel (z.B. Bananen, Kartoffeln)?",
        ["Täglich", "Mehrmals pro Woche", "Einmal pro Woche", "Seltener"],
        1,
    ),
    seed(
        "Wie häufig nimmst du Magnesium über die Ernährung auf (z.B. durch Nüsse, Vollkornprodukte)?",
        ["Täglich", "Mehrmals pro Woche", "Einmal pro Woche", "Seltener"],
        1,
    ),
    seed(
        "Wie oft konsumierst du zinkreiche Lebensmittel (z.B. Fleisch, Hülsenfrüchte)?",
        ["Täglich", "Mehrmals pro Woche", "Einmal pro Woche", "Selten"],
        1,
    ),
    seed(
        "Wie oft nimmst du Ballaststoffe zu dir (z.B. durch Obst, Gemüse, Vollkornprodukte)?",
        [
            "Mehr als 30g täglich",
            "20-30g täglich",
            "10-20g täglich",
            "Weniger als 10g täglich",
        ],
        1,
    ),
    seed(
        "Wie oft konsumierst du Produkte, die reich an B-Vitaminen sind (z.B. Vollkorn, Fleisch)?",
        ["Täglich", "Mehrmals pro Woche", "Einmal pro Woche", "Seltener"],
        1,
    ),
    seed(
        "Wie häufig nimmst du Calcium-Supplements oder angereicherte Lebensmittel?",
        ["Täglich", "Mehrmals pro Woche", "Einmal pro Woche", "Seltener"],
        1,
    ),
    seed(
        "Wie oft konsumierst du Omega-3-Supplements oder angereicherte Lebensmittel?",
        ["Täglich", "Mehrmals pro Woche", "Einmal pro Woche", "Seltener/Nie"],
        1,
    ),
    seed(
        "Wie oft isst du eisenhaltige pflanzliche Lebensmittel (z.B. Hülsenfrüchte, grünes Blattgemüse)?",
        ["Täglich", "Mehrmals pro Woche", "Einmal pro Woche", "Seltener"],
        1,
    ),
    seed(
        "Wie häufig konsumierst du Lebensmittel, die reich an Antioxidantien sind (z.B. Beeren, Nüsse)?",
        ["Täglich", "Mehrmals pro Woche", "Einmal pro Woche", "Seltener"],
        1,
    ),
    seed(
        "Wie oft nimmst du Vitamin B12-Supplements oder angereicherte Lebensmittel?",
        ["Täglich", "Mehrmals pro Woche", "Einmal pro Woche", "Seltener/Nie"],
        1,
    ),
    seed(
        "Wie oft konsumierst du jodreiche Lebensmittel (z.B. Meeresfrüchte, jodiertes Salz)?",
        ["Täglich", "Mehrmals pro Woche", "Einmal pro Woche", "Seltener/Nie"],
        1,
    ),
    seed(
        "Leidest du unter Bluthochdruck?",
        [
            "Nein",
            "Ja, unter Kontrolle durch Ernährung",
            "Ja, unter Kontrolle durch Medikamente",
            "Ja, unkontrolliert",
        ],
        2,
    ),
    seed(
        "Leidest du unter Hypercholesterinämie?",
        [
            "Nein",
            "Ja, unter Kontrolle durch Ernährung",
            "Ja, unter Kontrolle durch Medikamente",
            "Ja, unkontrolliert",
        ],
        2,
    ),
    seed(
        "Wie oft konsumierst du Lebensmittel mit hohem Salzgehalt?",
        ["Selten", "1-2 Mal pro Woche", "3-4 Mal pro Woche", "Täglich"],
        2,
    ),
    seed(
        "Hast du eine familiäre Vorgeschichte von Herz-Kreislauf-Erkrankungen?",
        [
            "Nein",
            "Ja, aber ich achte sehr auf meine Ernährung",
            "Ja, ich mache mir Sorgen, aber tue nicht viel dagegen",
            "Ja, und ich nehme keine speziellen Maßnahmen",
        ],
        2,
    ),
    seed(
        "Wie oft konsumierst du zuckerreiche Lebensmittel?",
        ["Selten", "1-2 Mal pro Woche", "Mehrmals pro Woche", "Täglich"],
        2,
    ),
    seed(
        "Wie oft konsumierst du frittierte Lebensmittel?",
        ["Nie", "Einmal pro Woche", "Mehrmals pro Woche", "Täglich"],
        2,
    ),
    seed(
        "Wie hoch ist dein BMI (Body Mass Index)?",
        [
            "Normalgewicht",
            "Leichtes Übergewicht",
            "Übergewicht",
            "Starkes Übergewicht",
        ],
        2,
    ),
    seed(
        "Wie oft hast du gesundheitliche Check-ups oder Bluttests, um Nährstoffmängel zu überprüfen?",
        ["Regelmäßig", "Gelegentlich", "Selten", "Nie"],
        2,
    ),
    seed(
        "Wie oft rauchst oder trinkst du Alkohol?",
        ["Nie", "Gelegentlich", "Mehrmals pro Woche", "Täglich"],
        2,
    ),
    seed(
        "Wie häufig hast du Verdauungsbeschwerden (z.B. Sodbrennen, Blähungen)?",
        ["Nie", "Selten", "Regelmäßig", "Häufig"],
        2,
    ),
    seed(
        "Wie oft treibst du körperliche Aktivität (mindestens 30 Minuten pro Tag)?",
        ["Täglich", "4-6 Mal pro Woche", "2-3 Mal pro Woche", "Seltener"],
        3,
    ),
    seed(
        "Wie viele Stunden schläfst du durchschnittlich pro Nacht?",
        [
            "Mehr als 8 Stunden",
            "7-8 Stunden",
            "5-6 Stunden",
            "Weniger als 5 Stunden",
        ],
        3,
    ),
    seed(
        "Wie häufig nimmst du Entspannungs- oder Stressbewältigungsmaßnahmen in Anspruch (z.B. Yoga, Meditation)?",
        ["Täglich", "Mehrmals pro Woche", "Einmal pro Woche", "Selten/Nie"],
        3,
    ),
    seed(
        "Wie oft isst du in Ruhe ohne Ablenkungen (z.B. Fernsehen, Handy)?",
        ["Immer", "Oft", "Manchmal", "Selten/Nie"],
        3,
    ),
    seed(
        "Wie oft kochst du frische Mahlzeiten selbst?",
        ["Täglich", "Mehrmals pro Woche", "Einmal pro Woche", "Selten/Nie"],
        3,
    ),
    seed(
        "Wie oft greifst du auf Fast Food oder Lieferdienste zurück?",
        ["Nie", "Einmal pro Woche", "Mehrmals pro Woche", "Täglich"],
        3,
    ),
    seed(
        "Wie oft trinkst du Wasser pro Tag (mindestens 1,5 Liter)?",
        [
            "Mehr als 2 Liter täglich",
            "1,5-2 Liter täglich",
            "1-1,5 Liter täglich",
            "Weniger als 1 Liter täglich",
        ],
        3,
    ),
    seed(
        "Wie häufig konsumierst du koffeinhaltige Getränke (z.B. Kaffee, Cola)?",
        [
            "Nie",
            "1-2 Tassen täglich",
            "3-4 Tassen täglich",
            "Mehr als 4 Tassen täglich",
        ],
        3,
    ),
    seed(
        "Wie oft konsumierst du stark verarbeitete Snacks (z.B. Chips, Kekse)?",
        ["Nie", "Einmal pro Woche", "Mehrmals pro Woche", "Täglich"],
        3,
    ),
    seed(
        "Wie oft isst du Lebensmittel, die reich an Antioxidantien sind (z.B. Beeren, Nüsse)?",
        ["Täglich", "Mehrmals pro Woche", "Einmal pro Woche", "Seltener"],
        3,
    ),
];
