use crate::infra::{format_local, load_recommendations, InMemoryAssessmentRepository};
use clap::{Args, ValueEnum};
use proof_your_health::assessment::{
    score_percentage, AnswerSheetImporter, AssessmentResultView, AssessmentService, CatalogView,
    Evaluation, HistoryEntryView, Question, QuestionCatalog, RecommendationConfig, ScoringEngine,
    UserId,
};
use proof_your_health::config::AppConfig;
use proof_your_health::error::AppError;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// Only list questions of categories whose name contains this text
    #[arg(long)]
    pub(crate) category: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// CSV file with `Order,Answer` columns
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Print the evaluation as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum DemoProfile {
    /// Best option for every question
    Best,
    /// Worst option for every question
    Worst,
    /// Rotate through the options by question order
    #[default]
    Mixed,
}

impl DemoProfile {
    fn option_for(self, question: &Question) -> String {
        let rank = match self {
            DemoProfile::Best => 0,
            DemoProfile::Worst => question.options.len() - 1,
            DemoProfile::Mixed => usize::from(question.order) % question.options.len(),
        };
        question.options[rank].clone()
    }
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Answer profile used for the scripted run
    #[arg(long, value_enum, default_value_t = DemoProfile::Mixed)]
    pub(crate) profile: DemoProfile,
    /// User reference the run is recorded under
    #[arg(long, default_value = "demo-user")]
    pub(crate) user: String,
}

#[derive(Debug, Serialize)]
struct ScoreReport<'a> {
    #[serde(flatten)]
    evaluation: &'a Evaluation,
    percentage: u8,
    unanswered: usize,
}

pub(crate) fn run_catalog(args: CatalogArgs) -> Result<(), AppError> {
    let catalog = QuestionCatalog::standard();
    let view = CatalogView::from_catalog(&catalog);
    let filter = args.category.map(|value| value.to_lowercase());

    println!(
        "Proof Your Health catalog: {} questions, max score {}",
        view.total_questions, view.max_score
    );
    for category in &view.categories {
        if let Some(filter) = &filter {
            if !category.name.to_lowercase().contains(filter.as_str()) {
                continue;
            }
        }
        println!(
            "\n{} ({} questions, max {})",
            category.name,
            category.questions.len(),
            category.max_score
        );
        for question in &category.questions {
            println!("  {:>2}. {}", question.order, question.text);
            for (rank, option) in question.options.iter().enumerate() {
                println!("      [{}] {}", 3 - rank, option);
            }
        }
    }

    Ok(())
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let engine = ScoringEngine::new(Arc::new(QuestionCatalog::standard()), recommendations()?);
    let sheet = AnswerSheetImporter::from_path(&args.answers, engine.catalog())?;
    let unanswered = engine.missing_questions(&sheet).len();
    let evaluation = engine.evaluate(&sheet);
    let percentage = score_percentage(evaluation.overall_score, evaluation.max_score);

    if args.json {
        let report = ScoreReport {
            evaluation: &evaluation,
            percentage,
            unanswered,
        };
        let rendered = serde_json::to_string_pretty(&report).map_err(std::io::Error::from)?;
        println!("{rendered}");
        return Ok(());
    }

    println!(
        "Score: {}/{} ({}%)",
        evaluation.overall_score, evaluation.max_score, percentage
    );
    println!("{}", evaluation.overall_recommendation);
    if unanswered > 0 {
        println!("Note: {unanswered} question(s) unanswered and scored with 0 points");
    }
    for result in &evaluation.category_results {
        println!(
            "- {}: {}/{} {}",
            result.category_name,
            result.score,
            result.max_score,
            result
                .rating
                .map(|rating| format!("[{}]", rating.label()))
                .unwrap_or_default()
        );
        println!("  {}", result.recommendation);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { profile, user } = args;
    let service = AssessmentService::new(
        Arc::new(InMemoryAssessmentRepository::default()),
        Arc::new(QuestionCatalog::standard()),
        recommendations()?,
    );
    let user = UserId(user);

    println!("Proof Your Health demo ({profile:?} profile)");
    let record = match service.start(&user) {
        Ok(record) => record,
        Err(err) => {
            println!("  Start failed: {}", err);
            return Ok(());
        }
    };
    println!("- Started assessment {} for {}", record.id, user);

    let questions = service.engine().catalog().questions().to_vec();
    for question in &questions {
        if let Err(err) = service.answer(&record.id, question.id, profile.option_for(question)) {
            println!("  Answer to question {} rejected: {}", question.order, err);
            return Ok(());
        }
    }
    println!("- Answered {} questions", questions.len());

    let assessment = match service.finalize(&record.id) {
        Ok(assessment) => assessment,
        Err(err) => {
            println!("  Finalize failed: {}", err);
            return Ok(());
        }
    };

    let view = AssessmentResultView::build(&assessment, service.engine());
    render_result(&view);

    let history = match service.history(&user) {
        Ok(history) => history,
        Err(err) => {
            println!("  History unavailable: {}", err);
            return Ok(());
        }
    };
    println!("\nHistory for {}", user);
    for entry in history
        .iter()
        .filter_map(|record| record.assessment.as_ref())
        .map(|assessment| HistoryEntryView::build(assessment, service.engine()))
    {
        println!(
            "  - {} | {} | {} points ({}%) | tier {}",
            entry.assessment_id,
            format_local(entry.date),
            entry.overall_score,
            entry.percentage,
            entry.tier
        );
    }

    Ok(())
}

fn recommendations() -> Result<RecommendationConfig, AppError> {
    let config = AppConfig::load()?;
    load_recommendations(&config.scoring)
}

fn render_result(view: &AssessmentResultView) {
    println!(
        "\nResult {} from {}",
        view.assessment_id,
        format_local(view.date)
    );
    println!(
        "  Overall: {}/{} ({}%) tier {}",
        view.overall_score, view.max_score, view.percentage, view.tier
    );
    println!("  {}", view.overall_recommendation);
    println!("  Categories:");
    for category in &view.categories {
        println!(
            "    - {}: {}/{} {}",
            category.category_name,
            category.score,
            category.max_score,
            category.rating_label.unwrap_or("-")
        );
        println!("      {}", category.recommendation);
    }
    println!("  Answers:");
    for answer in &view.answers {
        println!(
            "    {:>2}. {} -> {} ({} pts)",
            answer.order,
            answer.question,
            answer.selected_option.as_deref().unwrap_or("-"),
            answer.points
        );
    }
}
