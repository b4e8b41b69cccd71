use super::super::catalog::{Question, QuestionCatalog, MAX_POINTS_PER_QUESTION};
use super::super::domain::{Answer, AnswerSheet};

/// Points for a selection: rank 0 scores 3 down to rank 3 scoring 0. Absent or
/// unmatched selections score 0.
pub fn points_for(question: &Question, selected_option: Option<&str>) -> u8 {
    selected_option
        .and_then(|option| question.rank_of(option))
        .map(|rank| MAX_POINTS_PER_QUESTION.saturating_sub(rank as u8))
        .unwrap_or(0)
}

pub(crate) struct CategoryTally {
    pub name: String,
    pub score: i32,
    pub max_score: i32,
    pub question_count: usize,
}

/// Scores every catalog question against the sheet and sums per category.
pub(crate) fn tally(
    catalog: &QuestionCatalog,
    answers: &AnswerSheet,
) -> (Vec<Answer>, Vec<CategoryTally>) {
    let scored: Vec<Answer> = catalog
        .questions()
        .iter()
        .map(|question| {
            let selected = answers.selection(question.id);
            Answer {
                question_id: question.id,
                selected_option: selected.map(str::to_string),
                points: points_for(question, selected),
            }
        })
        .collect();

    let tallies = catalog
        .categories()
        .iter()
        .map(|category| {
            let mut score = 0;
            let mut question_count = 0;
            for (question, answer) in catalog.questions().iter().zip(&scored) {
                if question.category_id == category.id {
                    score += i32::from(answer.points);
                    question_count += 1;
                }
            }

            CategoryTally {
                name: category.name.clone(),
                score,
                max_score: question_count as i32 * i32::from(MAX_POINTS_PER_QUESTION),
                question_count,
            }
        })
        .collect();

    (scored, tallies)
}
