use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::catalog::QuestionCatalog;
use super::domain::AnswerSheet;

/// Failure while reading an `Order,Answer` CSV sheet.
#[derive(Debug)]
pub enum AnswerImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    UnknownQuestion(u16),
}

impl std::fmt::Display for AnswerImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerImportError::Io(err) => write!(f, "failed to read answer sheet: {}", err),
            AnswerImportError::Csv(err) => write!(f, "invalid answer CSV data: {}", err),
            AnswerImportError::UnknownQuestion(order) => {
                write!(f, "no catalog question with order {}", order)
            }
        }
    }
}

impl std::error::Error for AnswerImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnswerImportError::Io(err) => Some(err),
            AnswerImportError::Csv(err) => Some(err),
            AnswerImportError::UnknownQuestion(_) => None,
        }
    }
}

impl From<std::io::Error> for AnswerImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for AnswerImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Builds an [`AnswerSheet`] from a CSV export keyed by question order.
pub struct AnswerSheetImporter;

impl AnswerSheetImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        catalog: &QuestionCatalog,
    ) -> Result<AnswerSheet, AnswerImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, catalog)
    }

    /// Blank answers are skipped; a repeated order keeps the last row.
    pub fn from_reader<R: Read>(
        reader: R,
        catalog: &QuestionCatalog,
    ) -> Result<AnswerSheet, AnswerImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut sheet = AnswerSheet::new();

        for row in csv_reader.deserialize::<AnswerRow>() {
            let row = row?;
            let question = catalog
                .question_by_order(row.order)
                .ok_or(AnswerImportError::UnknownQuestion(row.order))?;
            if let Some(answer) = row.answer {
                sheet.select(question.id, answer);
            }
        }

        Ok(sheet)
    }
}

#[derive(Debug, Deserialize)]
struct AnswerRow {
    #[serde(rename = "Order")]
    order: u16,
    #[serde(rename = "Answer", default, deserialize_with = "empty_string_as_none")]
    answer: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::domain::QuestionId;

    #[test]
    fn imports_answers_by_order_and_skips_blanks() {
        let catalog = QuestionCatalog::standard();
        let csv = "Order,Answer\n1, Täglich \n2,\n3,Nie\n";

        let sheet = AnswerSheetImporter::from_reader(csv.as_bytes(), &catalog).expect("imports");

        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.selection(QuestionId(1)), Some("Täglich"));
        assert_eq!(sheet.selection(QuestionId(2)), None);
        assert_eq!(sheet.selection(QuestionId(3)), Some("Nie"));
    }

    #[test]
    fn rejects_orders_outside_the_catalog() {
        let catalog = QuestionCatalog::standard();
        let csv = "Order,Answer\n51,Täglich\n";

        let error = AnswerSheetImporter::from_reader(csv.as_bytes(), &catalog)
            .expect_err("order 51 is unknown");

        assert!(matches!(error, AnswerImportError::UnknownQuestion(51)));
    }

    #[test]
    fn reports_malformed_rows() {
        let catalog = QuestionCatalog::standard();
        let csv = "Order,Answer\nfirst,Täglich\n";

        let error = AnswerSheetImporter::from_reader(csv.as_bytes(), &catalog)
            .expect_err("order must be numeric");

        assert!(matches!(error, AnswerImportError::Csv(_)));
    }
}
