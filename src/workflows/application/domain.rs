use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of the job posting an application targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobId(pub String);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Client-generated token carried on every submit attempt so the submission
/// service can deduplicate candidate-initiated retries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionToken(pub Uuid);

impl SubmissionToken {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Authenticated candidate identity resolved once when the wizard starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSession {
    pub candidate_id: String,
    pub email: String,
}

/// The three wizard steps, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Step {
    CandidateDetails,
    Assessment,
    Preview,
}

impl Step {
    pub const FIRST: Step = Step::CandidateDetails;
    pub const LAST: Step = Step::Preview;

    pub const fn number(self) -> u8 {
        match self {
            Step::CandidateDetails => 1,
            Step::Assessment => 2,
            Step::Preview => 3,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Step::CandidateDetails => "Candidate Details",
            Step::Assessment => "Screening Questions",
            Step::Preview => "Preview & Submit",
        }
    }

    pub const fn next(self) -> Option<Step> {
        match self {
            Step::CandidateDetails => Some(Step::Assessment),
            Step::Assessment => Some(Step::Preview),
            Step::Preview => None,
        }
    }

    pub const fn previous(self) -> Option<Step> {
        match self {
            Step::CandidateDetails => None,
            Step::Assessment => Some(Step::CandidateDetails),
            Step::Preview => Some(Step::Assessment),
        }
    }
}

/// Scalar form fields collected in the candidate details step. Collections
/// (skills, experience, education) and attachments are modeled separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CandidateField {
    // Personal
    FirstName,
    MiddleName,
    LastName,
    Email,
    AlternateEmail,
    Phone,
    AlternatePhone,
    DateOfBirth,
    Gender,
    MaritalStatus,
    // Professional
    TotalExperience,
    HighestQualification,
    CurrentEmployer,
    CurrentJobTitle,
    EmploymentStartDate,
    EmploymentEndDate,
    ProfessionalDegree,
    ProfessionalCertificate,
    FunctionalArea,
    CurrentSalary,
    ExpectedSalary,
    Currency,
    NoticePeriod,
    // Address
    Street,
    Country,
    State,
    City,
    PostalCode,
}

impl CandidateField {
    pub const fn label(self) -> &'static str {
        match self {
            CandidateField::FirstName => "First name",
            CandidateField::MiddleName => "Middle name",
            CandidateField::LastName => "Last name",
            CandidateField::Email => "Email",
            CandidateField::AlternateEmail => "Alternate email",
            CandidateField::Phone => "Phone",
            CandidateField::AlternatePhone => "Alternate phone",
            CandidateField::DateOfBirth => "Date of birth",
            CandidateField::Gender => "Gender",
            CandidateField::MaritalStatus => "Marital status",
            CandidateField::TotalExperience => "Total experience",
            CandidateField::HighestQualification => "Highest qualification",
            CandidateField::CurrentEmployer => "Current employer",
            CandidateField::CurrentJobTitle => "Current job title",
            CandidateField::EmploymentStartDate => "Employment start date",
            CandidateField::EmploymentEndDate => "Employment end date",
            CandidateField::ProfessionalDegree => "Professional degree",
            CandidateField::ProfessionalCertificate => "Professional certificate",
            CandidateField::FunctionalArea => "Functional area",
            CandidateField::CurrentSalary => "Current salary",
            CandidateField::ExpectedSalary => "Expected salary",
            CandidateField::Currency => "Currency",
            CandidateField::NoticePeriod => "Notice period",
            CandidateField::Street => "Street address",
            CandidateField::Country => "Country",
            CandidateField::State => "State",
            CandidateField::City => "City",
            CandidateField::PostalCode => "Postal code",
        }
    }
}

/// Map of scalar field values as entered by the candidate.
pub type FieldValues = BTreeMap<CandidateField, String>;

/// Locally unique identifier for an experience or education entry. Distinct
/// from any server-assigned id; stable across removals of other entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryId(pub u64);

/// One prior employment entry in the candidate's work history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub id: EntryId,
    pub company: String,
    pub designation: String,
    pub responsibilities: String,
    pub from_date: String,
    pub to_date: String,
}

impl ExperienceEntry {
    pub fn blank(id: EntryId) -> Self {
        Self {
            id,
            company: String::new(),
            designation: String::new(),
            responsibilities: String::new(),
            from_date: String::new(),
            to_date: String::new(),
        }
    }
}

/// Editable fields of an [`ExperienceEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceField {
    Company,
    Designation,
    Responsibilities,
    FromDate,
    ToDate,
}

/// One education entry in the candidate's academic history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub id: EntryId,
    pub school: String,
    pub degree: String,
    pub specialization: String,
    pub start_date: String,
    pub end_date: String,
}

impl EducationEntry {
    pub fn blank(id: EntryId) -> Self {
        Self {
            id,
            school: String::new(),
            degree: String::new(),
            specialization: String::new(),
            start_date: String::new(),
            end_date: String::new(),
        }
    }
}

/// Editable fields of an [`EducationEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EducationField {
    School,
    Degree,
    Specialization,
    StartDate,
    EndDate,
}

/// File names of the documents attached to the application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentSet {
    pub resume: Option<String>,
    pub cover_letter: Option<String>,
    pub certificates: Vec<String>,
}

/// The three supported screening question shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionKind {
    SingleChoice,
    MultiChoice,
    OpenText,
}

impl QuestionKind {
    pub const fn label(self) -> &'static str {
        match self {
            QuestionKind::SingleChoice => "single choice",
            QuestionKind::MultiChoice => "multiple choice",
            QuestionKind::OpenText => "open ended",
        }
    }
}

/// One entry of the externally supplied screening catalog. The wizard never
/// mutates the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub kind: QuestionKind,
    pub prompt: String,
    pub options: Vec<String>,
    pub required: bool,
}

/// A candidate's answer to one screening question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerValue {
    Choice(String),
    Selections(Vec<String>),
    Text(String),
}

impl AnswerValue {
    /// Whether the answer counts as unanswered for progress and required-field
    /// purposes: empty selection lists and blank text both do.
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Choice(value) | AnswerValue::Text(value) => value.trim().is_empty(),
            AnswerValue::Selections(values) => values.is_empty(),
        }
    }
}

/// Answers keyed by question id. Skipped questions have no key.
pub type AnswerMap = BTreeMap<String, AnswerValue>;

/// Validated output of the candidate details step, merged into the wizard
/// state on advance and surviving back/jump navigation unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSubmission {
    pub fields: FieldValues,
    pub currently_working: bool,
    pub age: Option<u8>,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub attachments: AttachmentSet,
}

impl CandidateSubmission {
    pub fn field(&self, field: CandidateField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn full_name(&self) -> String {
        let mut parts = Vec::new();
        for field in [
            CandidateField::FirstName,
            CandidateField::MiddleName,
            CandidateField::LastName,
        ] {
            if let Some(value) = self.field(field) {
                if !value.trim().is_empty() {
                    parts.push(value.trim());
                }
            }
        }
        parts.join(" ")
    }
}

/// The wizard's only entity with a real lifecycle: created empty at step one,
/// mutated by step completion and edit jumps, discarded on submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    pub current_step: Step,
    pub candidate_data: Option<CandidateSubmission>,
    pub assessment_data: AnswerMap,
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            current_step: Step::FIRST,
            candidate_data: None,
            assessment_data: AnswerMap::new(),
        }
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

/// Fully merged application handed to the submission collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedApplication {
    pub job_id: JobId,
    pub submission_token: SubmissionToken,
    pub candidate: CandidateSubmission,
    pub answers: AnswerMap,
}

/// Partial profile produced by the external resume extraction service.
/// A default (empty) value is the documented failure mode: no autofill occurs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeExtraction {
    pub fields: FieldValues,
    pub skills: Vec<String>,
    pub experience: Vec<ExtractedExperience>,
    pub education: Vec<ExtractedEducation>,
}

impl ResumeExtraction {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
            && self.skills.is_empty()
            && self.experience.is_empty()
            && self.education.is_empty()
    }
}

/// Work-history suggestion from resume extraction; receives a local entry id
/// when merged into the collector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedExperience {
    pub company: String,
    pub designation: String,
    pub responsibilities: String,
    pub from_date: String,
    pub to_date: String,
}

/// Education suggestion from resume extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedEducation {
    pub school: String,
    pub degree: String,
    pub specialization: String,
    pub start_date: String,
    pub end_date: String,
}
