use std::sync::Arc;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use jobflow::config::AppConfig;
use jobflow::error::AppError;
use jobflow::telemetry;
use jobflow::workflows::application::{
    default_screening_questions, ApplicationWizard, CandidateField, CandidateSession,
    CompletedApplication, JobId, JsonDraftStore, Notice, NoticeSeverity, NotificationSink,
    ResumeExtraction, SessionLookup, SubmissionError, SubmissionService, WizardError,
    WizardSignal,
};

#[derive(Parser, Debug)]
#[command(
    name = "jobflow",
    about = "Walk the job-application wizard from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a scripted end-to-end pass through the wizard
    Demo(DemoArgs),
    /// Print the screening question catalog
    Questions,
}

#[derive(Args, Debug)]
struct DemoArgs {
    /// Job identifier the demo application targets
    #[arg(long, default_value = "senior-frontend-developer")]
    job: String,
    /// Evaluation date used for the derived age (defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("'{value}' is not a valid YYYY-MM-DD date"))
}

struct ConsoleNotices;

impl NotificationSink for ConsoleNotices {
    fn notify(&self, notice: Notice) {
        let tag = match notice.severity {
            NoticeSeverity::Success => "ok",
            NoticeSeverity::Error => "error",
        };
        println!("[{tag}] {}: {}", notice.title, notice.detail);
    }
}

struct ConsoleSubmission;

impl SubmissionService for ConsoleSubmission {
    fn submit(&self, application: &CompletedApplication) -> Result<(), SubmissionError> {
        info!(
            job = %application.job_id,
            token = %application.submission_token.0,
            answers = application.answers.len(),
            "submission accepted"
        );
        Ok(())
    }
}

struct DemoSessions;

impl SessionLookup for DemoSessions {
    fn current_session(&self) -> Option<CandidateSession> {
        Some(CandidateSession {
            candidate_id: "demo-candidate".to_string(),
            email: "john.doe@example.com".to_string(),
        })
    }
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Command::Demo(args) => run_demo(&config, args),
        Command::Questions => {
            for (index, question) in default_screening_questions().iter().enumerate() {
                let marker = if question.required { "*" } else { " " };
                println!("{}{marker} {}", index + 1, question.prompt);
                for option in &question.options {
                    println!("     - {option}");
                }
            }
            Ok(())
        }
    }
}

fn run_demo(config: &AppConfig, args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let job_id = JobId(args.job);

    let drafts = Arc::new(JsonDraftStore::new(config.drafts.dir.clone()));
    let notices = Arc::new(ConsoleNotices);
    let submission = Arc::new(ConsoleSubmission);

    let mut wizard = ApplicationWizard::begin(
        job_id,
        today,
        default_screening_questions(),
        &DemoSessions,
        submission,
        drafts,
        notices,
    )?;

    wizard.begin_resume_upload("resume.pdf")?;
    wizard.complete_resume_extraction(ResumeExtraction::default())?;

    let form = wizard.candidate();
    for (field, value) in [
        (CandidateField::FirstName, "John"),
        (CandidateField::LastName, "Doe"),
        (CandidateField::Email, "john.doe@example.com"),
        (CandidateField::Phone, "+919876543210"),
        (CandidateField::DateOfBirth, "1990-03-02"),
        (CandidateField::Gender, "male"),
        (CandidateField::MaritalStatus, "single"),
        (CandidateField::TotalExperience, "5"),
        (CandidateField::HighestQualification, "masters"),
        (CandidateField::CurrentJobTitle, "Software Engineer"),
        (CandidateField::ProfessionalDegree, "B.Tech"),
        (CandidateField::FunctionalArea, "Engineering"),
        (CandidateField::Street, "123 Main Street"),
        (CandidateField::Country, "India"),
        (CandidateField::State, "Karnataka"),
        (CandidateField::City, "Bangalore"),
        (CandidateField::PostalCode, "560001"),
    ] {
        form.edit(field, value);
    }
    form.add_skill("React");
    form.add_skill("Go");

    wizard.advance_from_candidate()?;
    wizard.save_draft()?;

    let questions = wizard.assessment();
    questions.answer_single("q1", "Yes").map_err(WizardError::from)?;
    questions
        .toggle_option("q2", "Excel", true)
        .map_err(WizardError::from)?;
    questions
        .answer_text("q3", "Barbell strategy balancing treasuries against growth equities.")
        .map_err(WizardError::from)?;
    questions.answer_single("q4", "Yes").map_err(WizardError::from)?;

    wizard.advance_from_assessment()?;

    let preview = wizard.preview()?;
    for section in &preview.summary.sections {
        if section.rows.is_empty() {
            continue;
        }
        println!("\n== {} ==", section.title);
        for row in &section.rows {
            println!("  {}: {}", row.label, row.value);
        }
    }
    println!();

    match wizard.submit()? {
        WizardSignal::Submitted => info!("wizard lifecycle complete"),
        other => info!(?other, "unexpected signal"),
    }

    Ok(())
}
