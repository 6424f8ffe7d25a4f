use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use jobflow::workflows::application::{
    default_screening_questions, ApplicationWizard, CandidateField, CandidateSession,
    CompletedApplication, DraftError, DraftStore, JobId, JsonDraftStore, Notice, NoticeSeverity,
    NotificationSink, ResumeExtraction, SessionLookup, Step, SubmissionError, SubmissionService,
    WizardDraft, WizardError, WizardSignal,
};

mod common {
    use super::*;
    use std::collections::HashMap;

    pub struct StaticSessions;

    impl SessionLookup for StaticSessions {
        fn current_session(&self) -> Option<CandidateSession> {
            Some(CandidateSession {
                candidate_id: "cand-42".to_string(),
                email: "priya.sharma@example.com".to_string(),
            })
        }
    }

    pub struct NoSession;

    impl SessionLookup for NoSession {
        fn current_session(&self) -> Option<CandidateSession> {
            None
        }
    }

    #[derive(Default)]
    pub struct MemoryDraftStore {
        drafts: Mutex<HashMap<JobId, WizardDraft>>,
        pub fail_saves: Mutex<bool>,
    }

    impl DraftStore for MemoryDraftStore {
        fn save(&self, job_id: &JobId, draft: &WizardDraft) -> Result<(), DraftError> {
            if *self.fail_saves.lock().expect("fail flag lock") {
                return Err(DraftError::Unavailable("store offline".to_string()));
            }
            self.drafts
                .lock()
                .expect("draft store lock")
                .insert(job_id.clone(), draft.clone());
            Ok(())
        }

        fn load(&self, job_id: &JobId) -> Result<Option<WizardDraft>, DraftError> {
            Ok(self.drafts.lock().expect("draft store lock").get(job_id).cloned())
        }
    }

    #[derive(Default)]
    pub struct RecordingSubmission {
        pub received: Mutex<Vec<CompletedApplication>>,
        pub reject_next: Mutex<bool>,
    }

    impl SubmissionService for RecordingSubmission {
        fn submit(&self, application: &CompletedApplication) -> Result<(), SubmissionError> {
            let mut reject = self.reject_next.lock().expect("reject flag lock");
            if *reject {
                *reject = false;
                return Err(SubmissionError::Unavailable("gateway timeout".to_string()));
            }
            self.received
                .lock()
                .expect("submission lock")
                .push(application.clone());
            Ok(())
        }
    }

    #[derive(Default)]
    pub struct CollectingNotices {
        pub notices: Mutex<Vec<Notice>>,
    }

    impl NotificationSink for CollectingNotices {
        fn notify(&self, notice: Notice) {
            self.notices.lock().expect("notice lock").push(notice);
        }
    }

    impl CollectingNotices {
        pub fn titles(&self) -> Vec<String> {
            self.notices
                .lock()
                .expect("notice lock")
                .iter()
                .map(|notice| notice.title.clone())
                .collect()
        }
    }

    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid evaluation date")
    }

    pub fn job() -> JobId {
        JobId("senior-investment-manager".to_string())
    }

    pub type TestWizard =
        ApplicationWizard<RecordingSubmission, MemoryDraftStore, CollectingNotices>;

    pub struct Harness {
        pub submission: Arc<RecordingSubmission>,
        pub drafts: Arc<MemoryDraftStore>,
        pub notices: Arc<CollectingNotices>,
    }

    impl Harness {
        pub fn new() -> Self {
            Self {
                submission: Arc::new(RecordingSubmission::default()),
                drafts: Arc::new(MemoryDraftStore::default()),
                notices: Arc::new(CollectingNotices::default()),
            }
        }

        pub fn wizard(&self) -> TestWizard {
            ApplicationWizard::begin(
                job(),
                today(),
                default_screening_questions(),
                &StaticSessions,
                Arc::clone(&self.submission),
                Arc::clone(&self.drafts),
                Arc::clone(&self.notices),
            )
            .expect("wizard starts with an active session")
        }
    }

    pub fn fill_candidate_step(wizard: &mut TestWizard) {
        let form = wizard.candidate();
        for (field, value) in [
            (CandidateField::FirstName, "Priya"),
            (CandidateField::LastName, "Sharma"),
            (CandidateField::Email, "priya.sharma@example.com"),
            (CandidateField::Phone, "+919876543210"),
            (CandidateField::DateOfBirth, "1990-03-02"),
            (CandidateField::Gender, "female"),
            (CandidateField::MaritalStatus, "single"),
            (CandidateField::TotalExperience, "8"),
            (CandidateField::HighestQualification, "masters"),
            (CandidateField::CurrentJobTitle, "Portfolio Manager"),
            (CandidateField::ProfessionalDegree, "MBA Finance"),
            (CandidateField::FunctionalArea, "Investment Management"),
            (CandidateField::Street, "12 MG Road"),
            (CandidateField::Country, "India"),
            (CandidateField::State, "Karnataka"),
            (CandidateField::City, "Bangalore"),
            (CandidateField::PostalCode, "560001"),
        ] {
            form.edit(field, value);
        }
        form.add_skill("Go");
    }

    pub fn answer_required_questions(wizard: &mut TestWizard) {
        let assessment = wizard.assessment();
        assessment.answer_single("q1", "Yes").expect("declared option");
        assessment.toggle_option("q2", "Excel", true).expect("declared option");
        assessment
            .answer_text("q3", "Barbell strategy for a concentrated founder position.")
            .expect("open question");
        assessment.answer_single("q4", "Yes").expect("declared option");
    }
}

use common::*;

#[test]
fn begin_requires_an_authenticated_session() {
    let harness = Harness::new();
    let result = ApplicationWizard::begin(
        job(),
        today(),
        default_screening_questions(),
        &NoSession,
        Arc::clone(&harness.submission),
        Arc::clone(&harness.drafts),
        Arc::clone(&harness.notices),
    );
    assert!(matches!(result, Err(WizardError::SessionRequired)));
}

#[test]
fn full_application_reaches_the_submission_service() {
    let harness = Harness::new();
    let mut wizard = harness.wizard();
    assert_eq!(wizard.current_step(), Step::CandidateDetails);

    wizard.begin_resume_upload("priya-sharma.pdf").expect("pdf accepted");
    wizard
        .complete_resume_extraction(ResumeExtraction::default())
        .expect("empty extraction is a silent no-op");

    fill_candidate_step(&mut wizard);
    let signal = wizard.advance_from_candidate().expect("details valid");
    assert_eq!(signal, WizardSignal::StepChanged(Step::Assessment));

    answer_required_questions(&mut wizard);
    let signal = wizard.advance_from_assessment().expect("all required answered");
    assert_eq!(signal, WizardSignal::StepChanged(Step::Preview));

    let preview = wizard.preview().expect("merged state available");
    assert!(!preview.summary.sections.is_empty());

    let signal = wizard.submit().expect("submission accepted");
    assert_eq!(signal, WizardSignal::Submitted);
    assert!(wizard.is_complete());

    let received = harness.submission.received.lock().expect("submission lock");
    assert_eq!(received.len(), 1);
    let application = &received[0];
    assert_eq!(application.job_id, job());
    assert_eq!(
        application.candidate.field(CandidateField::FirstName),
        Some("Priya")
    );
    assert_eq!(application.answers.len(), 4);
    assert_eq!(&application.submission_token, wizard.submission_token());

    assert_eq!(
        harness.notices.titles(),
        ["Application Submitted!"],
        "field-level validation never raised a toast"
    );
}

#[test]
fn invalid_candidate_details_block_the_advance_without_a_toast() {
    let harness = Harness::new();
    let mut wizard = harness.wizard();
    let err = wizard.advance_from_candidate().expect_err("empty form rejected");
    assert!(matches!(err, WizardError::Candidate(_)));
    assert_eq!(wizard.current_step(), Step::CandidateDetails);
    assert!(harness.notices.titles().is_empty());
}

#[test]
fn missing_required_answers_raise_a_counting_toast() {
    let harness = Harness::new();
    let mut wizard = harness.wizard();
    wizard.begin_resume_upload("resume.pdf").expect("pdf accepted");
    wizard
        .complete_resume_extraction(ResumeExtraction::default())
        .expect("extraction completes");
    fill_candidate_step(&mut wizard);
    wizard.advance_from_candidate().expect("details valid");

    wizard
        .assessment()
        .answer_single("q1", "Yes")
        .expect("declared option");
    let err = wizard.advance_from_assessment().expect_err("three remaining");
    assert!(matches!(err, WizardError::Assessment(_)));
    assert_eq!(wizard.current_step(), Step::Assessment);

    let notices = harness.notices.notices.lock().expect("notice lock");
    let toast = notices.last().expect("toast raised");
    assert_eq!(toast.severity, NoticeSeverity::Error);
    assert!(toast.detail.contains("(3 remaining)"));
}

#[test]
fn back_from_the_first_step_requests_exit_and_keeps_data() {
    let harness = Harness::new();
    let mut wizard = harness.wizard();
    wizard.candidate().edit(CandidateField::FirstName, "Priya");

    let signal = wizard.back().expect("navigation allowed");
    assert_eq!(signal, WizardSignal::ExitRequested);
    assert_eq!(wizard.current_step(), Step::CandidateDetails);
    assert_eq!(
        wizard.candidate_view().value(CandidateField::FirstName),
        Some("Priya")
    );
}

#[test]
fn edit_jump_from_preview_revalidates_on_the_next_advance() {
    let harness = Harness::new();
    let mut wizard = harness.wizard();
    wizard.begin_resume_upload("resume.pdf").expect("pdf accepted");
    wizard
        .complete_resume_extraction(ResumeExtraction::default())
        .expect("extraction completes");
    fill_candidate_step(&mut wizard);
    wizard.advance_from_candidate().expect("details valid");
    answer_required_questions(&mut wizard);
    wizard.advance_from_assessment().expect("answers valid");

    // Edits are only reachable from the preview.
    let signal = wizard.edit(Step::CandidateDetails).expect("jump allowed");
    assert_eq!(signal, WizardSignal::StepChanged(Step::CandidateDetails));
    assert!(matches!(
        wizard.edit(Step::Assessment),
        Err(WizardError::WrongStep { .. })
    ));

    // Breaking a field on the revisited step blocks the re-advance.
    wizard.candidate().edit(CandidateField::Email, "broken");
    assert!(wizard.advance_from_candidate().is_err());
    wizard
        .candidate()
        .edit(CandidateField::Email, "priya.sharma@example.com");
    wizard.advance_from_candidate().expect("corrected");

    // Assessment answers survived the detour.
    let signal = wizard.advance_from_assessment().expect("answers retained");
    assert_eq!(signal, WizardSignal::StepChanged(Step::Preview));
    wizard.submit().expect("submission accepted");
}

#[test]
fn saved_draft_resumes_step_and_both_data_slices() {
    let harness = Harness::new();
    let mut wizard = harness.wizard();
    wizard.begin_resume_upload("resume.pdf").expect("pdf accepted");
    wizard
        .complete_resume_extraction(ResumeExtraction::default())
        .expect("extraction completes");
    fill_candidate_step(&mut wizard);
    wizard.advance_from_candidate().expect("details valid");
    wizard
        .assessment()
        .answer_single("q1", "Yes")
        .expect("declared option");
    wizard.save_draft().expect("draft saved");
    drop(wizard);

    let resumed = harness.wizard();
    assert_eq!(resumed.current_step(), Step::Assessment);
    assert_eq!(
        resumed.candidate_view().value(CandidateField::FirstName),
        Some("Priya")
    );
    assert_eq!(resumed.assessment_view().answered_count(), 1);
    assert!(harness
        .notices
        .titles()
        .contains(&"Progress Saved".to_string()));
}

#[test]
fn draft_save_failure_raises_a_toast_but_keeps_the_wizard_alive() {
    let harness = Harness::new();
    let mut wizard = harness.wizard();
    *harness.drafts.fail_saves.lock().expect("fail flag lock") = true;

    let err = wizard.save_draft().expect_err("store offline");
    assert!(matches!(err, WizardError::Draft(_)));
    assert!(harness.notices.titles().contains(&"Save Failed".to_string()));

    // The in-memory wizard is unaffected.
    wizard.candidate().edit(CandidateField::FirstName, "Priya");
    assert_eq!(
        wizard.candidate_view().value(CandidateField::FirstName),
        Some("Priya")
    );
}

#[test]
fn failed_submission_retains_state_and_the_token_for_retry() {
    let harness = Harness::new();
    let mut wizard = harness.wizard();
    wizard.begin_resume_upload("resume.pdf").expect("pdf accepted");
    wizard
        .complete_resume_extraction(ResumeExtraction::default())
        .expect("extraction completes");
    fill_candidate_step(&mut wizard);
    wizard.advance_from_candidate().expect("details valid");
    answer_required_questions(&mut wizard);
    wizard.advance_from_assessment().expect("answers valid");

    let token = wizard.submission_token().clone();
    *harness.submission.reject_next.lock().expect("reject flag lock") = true;
    let err = wizard.submit().expect_err("gateway down");
    assert!(matches!(err, WizardError::Submission(_)));
    assert!(!wizard.is_complete());
    assert_eq!(wizard.current_step(), Step::Preview);

    wizard.submit().expect("retry succeeds");
    let received = harness.submission.received.lock().expect("submission lock");
    assert_eq!(received[0].submission_token, token, "retry reuses the same token");
    assert_eq!(
        harness.notices.titles(),
        ["Submission Failed", "Application Submitted!"]
    );
}

#[test]
fn a_completed_wizard_rejects_further_operations() {
    let harness = Harness::new();
    let mut wizard = harness.wizard();
    wizard.begin_resume_upload("resume.pdf").expect("pdf accepted");
    wizard
        .complete_resume_extraction(ResumeExtraction::default())
        .expect("extraction completes");
    fill_candidate_step(&mut wizard);
    wizard.advance_from_candidate().expect("details valid");
    answer_required_questions(&mut wizard);
    wizard.advance_from_assessment().expect("answers valid");
    wizard.submit().expect("submission accepted");

    assert!(matches!(wizard.submit(), Err(WizardError::AlreadySubmitted)));
    assert!(matches!(wizard.back(), Err(WizardError::AlreadySubmitted)));
    assert!(matches!(
        wizard.edit(Step::CandidateDetails),
        Err(WizardError::AlreadySubmitted)
    ));
    let received = harness.submission.received.lock().expect("submission lock");
    assert_eq!(received.len(), 1);
}

#[test]
fn resume_upload_gates_on_extension_and_single_flight() {
    let harness = Harness::new();
    let mut wizard = harness.wizard();

    let err = wizard
        .begin_resume_upload("resume.txt")
        .expect_err("txt rejected");
    assert!(matches!(err, WizardError::Attachment(_)));
    assert!(harness
        .notices
        .titles()
        .contains(&"Invalid file format".to_string()));
    assert!(!wizard.extraction_pending());

    wizard.begin_resume_upload("resume.pdf").expect("pdf accepted");
    assert!(wizard.extraction_pending());
    assert!(matches!(
        wizard.begin_resume_upload("other.pdf"),
        Err(WizardError::ExtractionInFlight)
    ));
    assert!(matches!(
        wizard.complete_resume_extraction(ResumeExtraction::default()),
        Ok(())
    ));
    assert!(!wizard.extraction_pending());
    assert!(matches!(
        wizard.complete_resume_extraction(ResumeExtraction::default()),
        Err(WizardError::NoExtractionInFlight)
    ));
}

#[test]
fn successful_extraction_autofills_and_announces_itself() {
    let harness = Harness::new();
    let mut wizard = harness.wizard();
    wizard.candidate().edit(CandidateField::FirstName, "Priya");
    wizard.begin_resume_upload("resume.pdf").expect("pdf accepted");

    let mut extraction = ResumeExtraction::default();
    extraction
        .fields
        .insert(CandidateField::FirstName, "Wrong".to_string());
    extraction
        .fields
        .insert(CandidateField::LastName, "Sharma".to_string());
    extraction.skills.push("Python".to_string());
    wizard
        .complete_resume_extraction(extraction)
        .expect("extraction completes");

    assert_eq!(
        wizard.candidate_view().value(CandidateField::FirstName),
        Some("Priya"),
        "touched field kept the candidate's value"
    );
    assert_eq!(
        wizard.candidate_view().value(CandidateField::LastName),
        Some("Sharma")
    );
    assert_eq!(wizard.candidate_view().skills(), ["Python"]);
    assert!(harness
        .notices
        .titles()
        .contains(&"Resume Parsed Successfully".to_string()));
}

#[test]
fn json_draft_store_round_trips_through_the_filesystem() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = JsonDraftStore::new(dir.path().join("drafts"));
    let job = JobId("Senior Manager #7".to_string());

    assert!(store.load(&job).expect("missing draft is not an error").is_none());

    let harness = Harness::new();
    let mut wizard = harness.wizard();
    wizard.begin_resume_upload("resume.pdf").expect("pdf accepted");
    wizard
        .complete_resume_extraction(ResumeExtraction::default())
        .expect("extraction completes");
    fill_candidate_step(&mut wizard);
    wizard.advance_from_candidate().expect("details valid");

    let draft = WizardDraft::snapshot(wizard.state());
    store.save(&job, &draft).expect("draft written");
    let loaded = store.load(&job).expect("draft read").expect("draft present");
    assert_eq!(loaded, draft);

    // Odd characters in the job id flatten into a portable file name.
    let file = dir
        .path()
        .join("drafts")
        .join("application-Senior-Manager--7.json");
    assert!(file.exists());

    // Last write wins.
    let mut overwritten = draft.clone();
    overwritten.step = Step::Preview;
    store.save(&job, &overwritten).expect("draft overwritten");
    assert_eq!(
        store.load(&job).expect("draft read").expect("draft present").step,
        Step::Preview
    );
}
