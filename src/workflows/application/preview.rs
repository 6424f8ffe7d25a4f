//! Read-only aggregation of the merged wizard state for the preview step:
//! sectioned rows, per-section collapse state, and the step each section's
//! Edit affordance jumps back to.

use std::collections::BTreeSet;

use super::domain::{
    AnswerMap, AnswerValue, CandidateField, CandidateSubmission, Question, Step,
};

const NOT_PROVIDED: &str = "Not provided";

/// Sections of the preview, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SectionId {
    Personal,
    Professional,
    Address,
    Skills,
    Experience,
    Education,
    Attachments,
    Assessment,
}

impl SectionId {
    pub const ALL: [SectionId; 8] = [
        SectionId::Personal,
        SectionId::Professional,
        SectionId::Address,
        SectionId::Skills,
        SectionId::Experience,
        SectionId::Education,
        SectionId::Attachments,
        SectionId::Assessment,
    ];

    pub const fn title(self) -> &'static str {
        match self {
            SectionId::Personal => "Personal Details",
            SectionId::Professional => "Professional Details",
            SectionId::Address => "Address",
            SectionId::Skills => "Skills",
            SectionId::Experience => "Work History",
            SectionId::Education => "Education",
            SectionId::Attachments => "Attachments",
            SectionId::Assessment => "Assessment Answers",
        }
    }

    /// The step the section's Edit affordance jumps back to.
    pub const fn owning_step(self) -> Step {
        match self {
            SectionId::Assessment => Step::Assessment,
            _ => Step::CandidateDetails,
        }
    }
}

/// One label/value line of a preview section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub label: String,
    pub value: String,
}

impl SummaryRow {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A titled group of rows with its owning step for edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarySection {
    pub id: SectionId,
    pub title: &'static str,
    pub rows: Vec<SummaryRow>,
}

/// The full read-only summary of a candidate's application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationSummary {
    pub sections: Vec<SummarySection>,
}

impl ApplicationSummary {
    /// Assemble the sectioned summary from the merged step outputs. Questions
    /// render in catalog order; skipped optional questions are omitted.
    pub fn new(
        candidate: &CandidateSubmission,
        answers: &AnswerMap,
        catalog: &[Question],
    ) -> Self {
        let sections = vec![
            personal_section(candidate),
            professional_section(candidate),
            address_section(candidate),
            skills_section(candidate),
            experience_section(candidate),
            education_section(candidate),
            attachments_section(candidate),
            assessment_section(answers, catalog),
        ];
        Self { sections }
    }

    pub fn section(&self, id: SectionId) -> Option<&SummarySection> {
        self.sections.iter().find(|section| section.id == id)
    }
}

/// Preview-step state: the summary plus which sections are expanded. All
/// sections start open.
#[derive(Debug, Clone)]
pub struct ApplicationPreview {
    pub summary: ApplicationSummary,
    open_sections: BTreeSet<SectionId>,
}

impl ApplicationPreview {
    pub fn new(summary: ApplicationSummary) -> Self {
        Self {
            summary,
            open_sections: SectionId::ALL.into_iter().collect(),
        }
    }

    pub fn is_open(&self, section: SectionId) -> bool {
        self.open_sections.contains(&section)
    }

    /// Collapse or expand one section independently of the others.
    pub fn toggle_section(&mut self, section: SectionId) {
        if !self.open_sections.remove(&section) {
            self.open_sections.insert(section);
        }
    }
}

fn field_or_fallback(candidate: &CandidateSubmission, field: CandidateField) -> String {
    candidate
        .field(field)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(NOT_PROVIDED)
        .to_string()
}

fn push_if_present(
    rows: &mut Vec<SummaryRow>,
    candidate: &CandidateSubmission,
    field: CandidateField,
    label: &str,
) {
    if let Some(value) = candidate.field(field).map(str::trim).filter(|v| !v.is_empty()) {
        rows.push(SummaryRow::new(label, value));
    }
}

fn personal_section(candidate: &CandidateSubmission) -> SummarySection {
    let mut rows = vec![
        SummaryRow::new("Full Name", candidate.full_name()),
        SummaryRow::new("Email", field_or_fallback(candidate, CandidateField::Email)),
    ];
    push_if_present(&mut rows, candidate, CandidateField::AlternateEmail, "Alternate Email");
    rows.push(SummaryRow::new(
        "Phone",
        field_or_fallback(candidate, CandidateField::Phone),
    ));
    push_if_present(&mut rows, candidate, CandidateField::AlternatePhone, "Alternate Phone");
    rows.push(SummaryRow::new(
        "Date of Birth",
        field_or_fallback(candidate, CandidateField::DateOfBirth),
    ));
    if let Some(age) = candidate.age {
        rows.push(SummaryRow::new("Age", age.to_string()));
    }
    rows.push(SummaryRow::new(
        "Gender",
        field_or_fallback(candidate, CandidateField::Gender),
    ));
    rows.push(SummaryRow::new(
        "Marital Status",
        field_or_fallback(candidate, CandidateField::MaritalStatus),
    ));
    SummarySection {
        id: SectionId::Personal,
        title: SectionId::Personal.title(),
        rows,
    }
}

fn professional_section(candidate: &CandidateSubmission) -> SummarySection {
    let mut rows = Vec::new();
    if let Some(experience) = candidate
        .field(CandidateField::TotalExperience)
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        rows.push(SummaryRow::new(
            "Total Experience",
            format!("{experience} years"),
        ));
    }
    rows.push(SummaryRow::new(
        "Highest Qualification",
        field_or_fallback(candidate, CandidateField::HighestQualification),
    ));
    push_if_present(&mut rows, candidate, CandidateField::CurrentEmployer, "Current Employer");
    rows.push(SummaryRow::new(
        "Current Job Title",
        field_or_fallback(candidate, CandidateField::CurrentJobTitle),
    ));
    rows.push(SummaryRow::new(
        "Currently Working",
        if candidate.currently_working { "Yes" } else { "No" },
    ));
    push_if_present(&mut rows, candidate, CandidateField::EmploymentStartDate, "Employment Start");
    if !candidate.currently_working {
        push_if_present(&mut rows, candidate, CandidateField::EmploymentEndDate, "Employment End");
    }
    rows.push(SummaryRow::new(
        "Professional Degree",
        field_or_fallback(candidate, CandidateField::ProfessionalDegree),
    ));
    push_if_present(
        &mut rows,
        candidate,
        CandidateField::ProfessionalCertificate,
        "Professional Certificate",
    );
    rows.push(SummaryRow::new(
        "Functional Area",
        field_or_fallback(candidate, CandidateField::FunctionalArea),
    ));
    for (field, label) in [
        (CandidateField::CurrentSalary, "Current Salary"),
        (CandidateField::ExpectedSalary, "Expected Salary"),
    ] {
        if let Some(amount) = candidate.field(field).map(str::trim).filter(|v| !v.is_empty()) {
            let currency = candidate
                .field(CandidateField::Currency)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or("INR");
            rows.push(SummaryRow::new(label, format!("{currency} {amount}")));
        }
    }
    push_if_present(&mut rows, candidate, CandidateField::NoticePeriod, "Notice Period");
    SummarySection {
        id: SectionId::Professional,
        title: SectionId::Professional.title(),
        rows,
    }
}

fn address_section(candidate: &CandidateSubmission) -> SummarySection {
    let rows = [
        (CandidateField::Street, "Street"),
        (CandidateField::City, "City"),
        (CandidateField::State, "State"),
        (CandidateField::Country, "Country"),
        (CandidateField::PostalCode, "Postal Code"),
    ]
    .into_iter()
    .map(|(field, label)| SummaryRow::new(label, field_or_fallback(candidate, field)))
    .collect();
    SummarySection {
        id: SectionId::Address,
        title: SectionId::Address.title(),
        rows,
    }
}

fn skills_section(candidate: &CandidateSubmission) -> SummarySection {
    let rows = if candidate.skills.is_empty() {
        Vec::new()
    } else {
        vec![SummaryRow::new("Skills", candidate.skills.join(", "))]
    };
    SummarySection {
        id: SectionId::Skills,
        title: SectionId::Skills.title(),
        rows,
    }
}

fn experience_section(candidate: &CandidateSubmission) -> SummarySection {
    let rows = candidate
        .experience
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let company = if entry.company.trim().is_empty() {
                format!("Experience {}", index + 1)
            } else {
                entry.company.clone()
            };
            let period = match (entry.from_date.trim(), entry.to_date.trim()) {
                ("", "") => String::new(),
                (from, "") => format!(" ({from} – present)"),
                (from, to) => format!(" ({from} – {to})"),
            };
            SummaryRow::new(company, format!("{}{period}", entry.designation))
        })
        .collect();
    SummarySection {
        id: SectionId::Experience,
        title: SectionId::Experience.title(),
        rows,
    }
}

fn education_section(candidate: &CandidateSubmission) -> SummarySection {
    let rows = candidate
        .education
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let school = if entry.school.trim().is_empty() {
                format!("Education {}", index + 1)
            } else {
                entry.school.clone()
            };
            let mut value = entry.degree.clone();
            if !entry.specialization.trim().is_empty() {
                value = format!("{value}, {}", entry.specialization);
            }
            SummaryRow::new(school, value)
        })
        .collect();
    SummarySection {
        id: SectionId::Education,
        title: SectionId::Education.title(),
        rows,
    }
}

fn attachments_section(candidate: &CandidateSubmission) -> SummarySection {
    let mut rows = vec![SummaryRow::new(
        "Resume",
        candidate
            .attachments
            .resume
            .clone()
            .unwrap_or_else(|| NOT_PROVIDED.to_string()),
    )];
    if let Some(cover_letter) = &candidate.attachments.cover_letter {
        rows.push(SummaryRow::new("Cover Letter", cover_letter.clone()));
    }
    if !candidate.attachments.certificates.is_empty() {
        rows.push(SummaryRow::new(
            "Certificates",
            candidate.attachments.certificates.join(", "),
        ));
    }
    SummarySection {
        id: SectionId::Attachments,
        title: SectionId::Attachments.title(),
        rows,
    }
}

fn assessment_section(answers: &AnswerMap, catalog: &[Question]) -> SummarySection {
    let rows = catalog
        .iter()
        .filter_map(|question| {
            let answer = answers.get(&question.id)?;
            let value = match answer {
                AnswerValue::Choice(choice) => choice.clone(),
                AnswerValue::Selections(selections) => selections.join(", "),
                AnswerValue::Text(text) => text.clone(),
            };
            Some(SummaryRow::new(question.prompt.clone(), value))
        })
        .collect();
    SummarySection {
        id: SectionId::Assessment,
        title: SectionId::Assessment.title(),
        rows,
    }
}
