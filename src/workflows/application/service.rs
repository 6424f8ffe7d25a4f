//! The application wizard controller: composes the sequencer and the two
//! collectors behind injected collaborators for sessions, drafts,
//! notifications, and final submission.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use super::assessment::{AnswerError, AssessmentCollector, AssessmentValidationError};
use super::candidate::{
    AttachmentError, CandidateDetailsCollector, CandidateValidationError,
};
use super::domain::{
    CandidateSession, CompletedApplication, JobId, Question, ResumeExtraction, Step,
    SubmissionToken, WizardState,
};
use super::draft::{DraftError, DraftStore, WizardDraft};
use super::preview::{ApplicationPreview, ApplicationSummary};
use super::sequencer::{SequencerEvent, StepOutput, StepSequencer};

/// Session lookup capability, evaluated once when the wizard starts rather
/// than re-checked ad hoc per page.
pub trait SessionLookup: Send + Sync {
    fn current_session(&self) -> Option<CandidateSession>;
}

/// Outbound submission boundary. Implementations may use the token to
/// deduplicate candidate-initiated retries.
pub trait SubmissionService: Send + Sync {
    fn submit(&self, application: &CompletedApplication) -> Result<(), SubmissionError>;
}

/// Error raised by the submission collaborator. The wizard state is retained
/// unchanged so the candidate can retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("submission rejected: {0}")]
    Rejected(String),
    #[error("submission service unavailable: {0}")]
    Unavailable(String),
}

/// Display sink for user-facing messages; the wizard never reads anything
/// back from it.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notice: Notice);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeSeverity {
    Success,
    Error,
}

/// A user-facing toast payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: NoticeSeverity,
    pub title: String,
    pub detail: String,
}

impl Notice {
    pub fn success(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Success,
            title: title.into(),
            detail: detail.into(),
        }
    }

    pub fn error(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Error,
            title: title.into(),
            detail: detail.into(),
        }
    }
}

/// Host-observable outcome of a wizard operation. `StepChanged` is the signal
/// a view layer uses to reset its scroll position; `ExitRequested` and
/// `Submitted` hand control to the navigation collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardSignal {
    StepChanged(Step),
    ExitRequested,
    Submitted,
}

/// Error raised by the wizard controller. None of these are fatal to the
/// wizard: worst case is data entered but not yet submitted.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("an authenticated candidate session is required")]
    SessionRequired,
    #[error("operation requires the {} step, wizard is on {}", .expected.title(), .found.title())]
    WrongStep { expected: Step, found: Step },
    #[error("resume parsing is already in progress")]
    ExtractionInFlight,
    #[error("no resume parsing is in progress")]
    NoExtractionInFlight,
    #[error("the application has already been submitted")]
    AlreadySubmitted,
    #[error("candidate details have not been completed")]
    CandidateDetailsMissing,
    #[error(transparent)]
    Candidate(#[from] CandidateValidationError),
    #[error(transparent)]
    Assessment(#[from] AssessmentValidationError),
    #[error(transparent)]
    Answer(#[from] AnswerError),
    #[error(transparent)]
    Attachment(#[from] AttachmentError),
    #[error(transparent)]
    Draft(#[from] DraftError),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

/// One candidate's application attempt for one job posting. Owns its state
/// exclusively; nothing is shared across wizard instances.
pub struct ApplicationWizard<S, D, N> {
    job_id: JobId,
    session: CandidateSession,
    token: SubmissionToken,
    catalog: Vec<Question>,
    sequencer: StepSequencer,
    candidate: CandidateDetailsCollector,
    assessment: AssessmentCollector,
    submission: Arc<S>,
    drafts: Arc<D>,
    notices: Arc<N>,
    today: NaiveDate,
    extraction_pending: bool,
    completed: bool,
}

impl<S, D, N> ApplicationWizard<S, D, N>
where
    S: SubmissionService,
    D: DraftStore,
    N: NotificationSink,
{
    /// Start (or implicitly resume) an application for one job. The session
    /// guard is evaluated exactly once, here; a saved draft for the job, when
    /// present, restores the step and both data slices.
    pub fn begin(
        job_id: JobId,
        today: NaiveDate,
        catalog: Vec<Question>,
        sessions: &dyn SessionLookup,
        submission: Arc<S>,
        drafts: Arc<D>,
        notices: Arc<N>,
    ) -> Result<Self, WizardError> {
        let session = sessions
            .current_session()
            .ok_or(WizardError::SessionRequired)?;

        let draft = drafts.load(&job_id)?;
        let state = draft.map_or_else(WizardState::new, WizardDraft::into_state);

        let candidate = match &state.candidate_data {
            Some(submitted) => CandidateDetailsCollector::from_submission(submitted, today),
            None => CandidateDetailsCollector::new(today),
        };
        let assessment =
            AssessmentCollector::with_answers(catalog.clone(), state.assessment_data.clone());

        info!(job = %job_id, step = state.current_step.number(), "application wizard started");

        Ok(Self {
            job_id,
            session,
            token: SubmissionToken::generate(),
            catalog,
            sequencer: StepSequencer::from_state(state),
            candidate,
            assessment,
            submission,
            drafts,
            notices,
            today,
            extraction_pending: false,
            completed: false,
        })
    }

    pub fn job_id(&self) -> &JobId {
        &self.job_id
    }

    pub fn session(&self) -> &CandidateSession {
        &self.session
    }

    pub fn submission_token(&self) -> &SubmissionToken {
        &self.token
    }

    pub fn current_step(&self) -> Step {
        self.sequencer.current_step()
    }

    pub fn state(&self) -> &WizardState {
        self.sequencer.state()
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// The candidate details form, for the host to drive field edits.
    pub fn candidate(&mut self) -> &mut CandidateDetailsCollector {
        &mut self.candidate
    }

    pub fn candidate_view(&self) -> &CandidateDetailsCollector {
        &self.candidate
    }

    /// The questionnaire, for the host to drive answers.
    pub fn assessment(&mut self) -> &mut AssessmentCollector {
        &mut self.assessment
    }

    pub fn assessment_view(&self) -> &AssessmentCollector {
        &self.assessment
    }

    /// Whether the resume upload control should be disabled.
    pub fn extraction_pending(&self) -> bool {
        self.extraction_pending
    }

    fn ensure_active(&self) -> Result<(), WizardError> {
        if self.completed {
            return Err(WizardError::AlreadySubmitted);
        }
        Ok(())
    }

    fn ensure_step(&self, expected: Step) -> Result<(), WizardError> {
        let found = self.sequencer.current_step();
        if found != expected {
            return Err(WizardError::WrongStep { expected, found });
        }
        Ok(())
    }

    /// Validate and complete the candidate details step. Field-level issues
    /// are returned for inline display; they do not raise a toast.
    pub fn advance_from_candidate(&mut self) -> Result<WizardSignal, WizardError> {
        self.ensure_active()?;
        self.ensure_step(Step::CandidateDetails)?;
        let submitted = self.candidate.submit()?;
        let event = self.sequencer.advance(StepOutput::Candidate(submitted));
        info!(job = %self.job_id, "candidate details completed");
        Ok(signal_for(event))
    }

    /// Validate and complete the assessment step. Missing required answers
    /// raise a toast naming how many remain, and block the advance.
    pub fn advance_from_assessment(&mut self) -> Result<WizardSignal, WizardError> {
        self.ensure_active()?;
        self.ensure_step(Step::Assessment)?;
        let answers = match self.assessment.submit() {
            Ok(answers) => answers,
            Err(err) => {
                self.notices.notify(Notice::error(
                    "Required Questions",
                    format!(
                        "Please answer all required questions ({} remaining)",
                        err.missing
                    ),
                ));
                return Err(err.into());
            }
        };
        let event = self.sequencer.advance(StepOutput::Assessment(answers));
        info!(job = %self.job_id, "assessment completed");
        Ok(signal_for(event))
    }

    /// Step back one step; from the first step this requests an exit and
    /// leaves all collected data in place.
    pub fn back(&mut self) -> Result<WizardSignal, WizardError> {
        self.ensure_active()?;
        Ok(signal_for(self.sequencer.retreat()))
    }

    /// Jump from the preview to an earlier step for correction. No
    /// validation runs until that step advances again.
    pub fn edit(&mut self, step: Step) -> Result<WizardSignal, WizardError> {
        self.ensure_active()?;
        self.ensure_step(Step::Preview)?;
        Ok(signal_for(self.sequencer.jump_to(step)))
    }

    /// Build the read-only preview of everything collected so far.
    pub fn preview(&self) -> Result<ApplicationPreview, WizardError> {
        self.ensure_step(Step::Preview)?;
        let candidate = self
            .state()
            .candidate_data
            .as_ref()
            .ok_or(WizardError::CandidateDetailsMissing)?;
        let summary =
            ApplicationSummary::new(candidate, &self.state().assessment_data, &self.catalog);
        Ok(ApplicationPreview::new(summary))
    }

    /// Explicit "Save & Continue Later": snapshot the wizard state under the
    /// job id, overwriting any earlier draft. Failures surface as a toast and
    /// an error, but the in-memory wizard continues regardless.
    pub fn save_draft(&self) -> Result<(), WizardError> {
        let mut state = self.sequencer.state().clone();
        // Capture in-progress answers too, not only merged step outputs, so
        // a save from the middle of step two loses nothing.
        state.assessment_data = self.assessment.answers().clone();
        let draft = WizardDraft::snapshot(&state);
        match self.drafts.save(&self.job_id, &draft) {
            Ok(()) => {
                self.notices.notify(Notice::success(
                    "Progress Saved",
                    "Your application has been saved. You can continue later.",
                ));
                info!(job = %self.job_id, step = draft.step.number(), "draft saved");
                Ok(())
            }
            Err(err) => {
                self.notices.notify(Notice::error(
                    "Save Failed",
                    "Your progress could not be saved. You can keep going and try again.",
                ));
                warn!(job = %self.job_id, error = %err, "draft save failed");
                Err(err.into())
            }
        }
    }

    /// Accept a resume file and mark extraction as in flight. A second upload
    /// while parsing is rejected, mirroring the disabled upload control.
    pub fn begin_resume_upload(&mut self, file_name: &str) -> Result<(), WizardError> {
        self.ensure_active()?;
        self.ensure_step(Step::CandidateDetails)?;
        if self.extraction_pending {
            return Err(WizardError::ExtractionInFlight);
        }
        if let Err(err) = self.candidate.attach_resume(file_name) {
            self.notices.notify(Notice::error(
                "Invalid file format",
                "Please upload a PDF or DOC/DOCX file",
            ));
            return Err(err.into());
        }
        self.extraction_pending = true;
        Ok(())
    }

    /// Deliver the extraction result. Suggestions fill only untouched fields;
    /// an empty result means no autofill occurred and raises no error dialog.
    pub fn complete_resume_extraction(
        &mut self,
        extraction: ResumeExtraction,
    ) -> Result<(), WizardError> {
        if !self.extraction_pending {
            return Err(WizardError::NoExtractionInFlight);
        }
        self.extraction_pending = false;
        if extraction.is_empty() {
            info!(job = %self.job_id, "resume extraction yielded no data");
            return Ok(());
        }
        self.candidate.apply_extraction(&extraction);
        self.notices.notify(Notice::success(
            "Resume Parsed Successfully",
            "Your details have been auto-filled. Please review and update as needed.",
        ));
        Ok(())
    }

    /// Final submission from the preview step. On success the wizard's
    /// lifecycle ends; on failure everything is retained for a
    /// candidate-initiated retry with the same token.
    pub fn submit(&mut self) -> Result<WizardSignal, WizardError> {
        self.ensure_active()?;
        self.ensure_step(Step::Preview)?;
        let candidate = self
            .state()
            .candidate_data
            .clone()
            .ok_or(WizardError::CandidateDetailsMissing)?;

        let application = CompletedApplication {
            job_id: self.job_id.clone(),
            submission_token: self.token.clone(),
            candidate,
            answers: self.state().assessment_data.clone(),
        };

        match self.submission.submit(&application) {
            Ok(()) => {
                self.completed = true;
                self.notices.notify(Notice::success(
                    "Application Submitted!",
                    "Your application has been successfully submitted.",
                ));
                info!(job = %self.job_id, "application submitted");
                Ok(WizardSignal::Submitted)
            }
            Err(err) => {
                self.notices.notify(Notice::error(
                    "Submission Failed",
                    "Your application could not be submitted. Please try again.",
                ));
                warn!(job = %self.job_id, error = %err, "submission failed");
                Err(err.into())
            }
        }
    }
}

fn signal_for(event: SequencerEvent) -> WizardSignal {
    match event {
        SequencerEvent::Advanced(step)
        | SequencerEvent::SteppedBack(step)
        | SequencerEvent::Jumped(step) => WizardSignal::StepChanged(step),
        SequencerEvent::AtFinalStep => WizardSignal::StepChanged(Step::LAST),
        SequencerEvent::ExitRequested => WizardSignal::ExitRequested,
    }
}
