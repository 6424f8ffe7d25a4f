//! The job-application wizard: a three-step guided flow (candidate details,
//! screening questions, preview/submit) with draft persistence and injected
//! collaborators for sessions, submission, and notifications.
//!
//! The wizard is a pure consumer/producer at its boundaries: persistence,
//! authentication, resume extraction, and navigation are supplied by the
//! host through the traits re-exported here.

pub mod assessment;
pub mod candidate;
pub mod catalog;
pub mod domain;
pub mod draft;
pub mod preview;
pub mod sequencer;
pub mod service;
pub mod validation;

pub use assessment::{AnswerError, AssessmentCollector, AssessmentValidationError};
pub use candidate::{AttachmentError, CandidateDetailsCollector, CandidateValidationError};
pub use catalog::default_screening_questions;
pub use domain::{
    AnswerMap, AnswerValue, AttachmentSet, CandidateField, CandidateSession, CandidateSubmission,
    CompletedApplication, EducationEntry, EducationField, EntryId, ExperienceEntry,
    ExperienceField, ExtractedEducation, ExtractedExperience, FieldValues, JobId, Question,
    QuestionKind, ResumeExtraction, Step, SubmissionToken, WizardState,
};
pub use draft::{DraftError, DraftStore, JsonDraftStore, WizardDraft};
pub use preview::{ApplicationPreview, ApplicationSummary, SectionId, SummaryRow, SummarySection};
pub use sequencer::{SequencerEvent, StepOutput, StepSequencer};
pub use service::{
    ApplicationWizard, Notice, NoticeSeverity, NotificationSink, SessionLookup, SubmissionError,
    SubmissionService, WizardError, WizardSignal,
};
pub use validation::{IssueTarget, ValidationIssue};
