//! Candidate details collection: scalar fields with touched tracking and a
//! derived age, the skills/experience/education collections, attachment
//! intake, and the autofill merge applied after resume extraction.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::domain::{
    AttachmentSet, CandidateField, CandidateSubmission, EducationEntry, EducationField, EntryId,
    ExperienceEntry, ExperienceField, FieldValues, ResumeExtraction,
};
use super::validation::{
    age_on, has_allowed_extension, validate_fields, IssueTarget, ValidationIssue,
    CERTIFICATE_EXTENSIONS, DOCUMENT_EXTENSIONS,
};

/// Raised when the step cannot advance because required fields are missing or
/// malformed. Never fatal: the candidate corrects and retries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("candidate details incomplete: {} field(s) need attention", .issues.len())]
pub struct CandidateValidationError {
    pub issues: Vec<ValidationIssue>,
}

/// Raised when an uploaded file carries a disallowed extension. The rejected
/// file leaves the collector unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{file_name}' is not a supported format (allowed: {})", .allowed.join(", "))]
pub struct AttachmentError {
    pub file_name: String,
    pub allowed: Vec<&'static str>,
}

/// Collections the candidate can edit directly; tracked so autofill only
/// seeds a collection the candidate has not yet shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Collection {
    Skills,
    Experience,
    Education,
}

/// Form state for the candidate details step.
#[derive(Debug, Clone)]
pub struct CandidateDetailsCollector {
    today: NaiveDate,
    values: FieldValues,
    currently_working: bool,
    age: Option<u8>,
    touched: BTreeSet<CandidateField>,
    touched_collections: BTreeSet<Collection>,
    skills: Vec<String>,
    experience: Vec<ExperienceEntry>,
    education: Vec<EducationEntry>,
    attachments: AttachmentSet,
    next_entry_id: u64,
}

impl CandidateDetailsCollector {
    /// Fresh form. `today` anchors the derived age so callers stay
    /// deterministic under test.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            values: FieldValues::new(),
            currently_working: false,
            age: None,
            touched: BTreeSet::new(),
            touched_collections: BTreeSet::new(),
            skills: Vec::new(),
            experience: Vec::new(),
            education: Vec::new(),
            attachments: AttachmentSet::default(),
            next_entry_id: 1,
        }
    }

    /// Repopulate the form from a previously submitted payload, as happens
    /// when the candidate steps back or resumes a saved draft. Prefilled
    /// fields count as touched: they are the candidate's own data.
    pub fn from_submission(submission: &CandidateSubmission, today: NaiveDate) -> Self {
        let mut collector = Self::new(today);
        collector.values = submission.fields.clone();
        collector.currently_working = submission.currently_working;
        collector.age = submission.age;
        collector.touched = submission.fields.keys().copied().collect();
        collector.skills = submission.skills.clone();
        collector.experience = submission.experience.clone();
        collector.education = submission.education.clone();
        collector.attachments = submission.attachments.clone();
        if !collector.skills.is_empty() {
            collector.touched_collections.insert(Collection::Skills);
        }
        if !collector.experience.is_empty() {
            collector.touched_collections.insert(Collection::Experience);
        }
        if !collector.education.is_empty() {
            collector.touched_collections.insert(Collection::Education);
        }
        collector.next_entry_id = collector
            .experience
            .iter()
            .map(|entry| entry.id.0)
            .chain(collector.education.iter().map(|entry| entry.id.0))
            .max()
            .map_or(1, |max| max + 1);
        collector
    }

    pub fn value(&self, field: CandidateField) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub fn age(&self) -> Option<u8> {
        self.age
    }

    pub fn currently_working(&self) -> bool {
        self.currently_working
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn experience(&self) -> &[ExperienceEntry] {
        &self.experience
    }

    pub fn education(&self) -> &[EducationEntry] {
        &self.education
    }

    pub fn attachments(&self) -> &AttachmentSet {
        &self.attachments
    }

    /// Record a candidate edit to one scalar field, marking it touched so a
    /// later autofill never overwrites it. Editing the date of birth
    /// recomputes the derived age; edits to the employment end date are
    /// ignored while the currently-working flag is set.
    pub fn edit(&mut self, field: CandidateField, value: &str) {
        if field == CandidateField::EmploymentEndDate && self.currently_working {
            return;
        }
        self.values.insert(field, value.to_string());
        self.touched.insert(field);
        if field == CandidateField::DateOfBirth {
            self.recompute_age();
        }
    }

    /// Toggle the currently-working flag. Enabling it clears the employment
    /// end date, which becomes not-applicable rather than required.
    pub fn set_currently_working(&mut self, working: bool) {
        self.currently_working = working;
        if working {
            self.values.remove(&CandidateField::EmploymentEndDate);
        }
    }

    fn recompute_age(&mut self) {
        self.age = self
            .values
            .get(&CandidateField::DateOfBirth)
            .and_then(|value| NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok())
            .map(|date_of_birth| age_on(date_of_birth, self.today));
    }

    /// Append a trimmed skill, rejecting blanks and case-sensitive
    /// duplicates. Returns whether the skill was added.
    pub fn add_skill(&mut self, raw: &str) -> bool {
        self.touched_collections.insert(Collection::Skills);
        let skill = raw.trim();
        if skill.is_empty() || self.skills.iter().any(|existing| existing == skill) {
            return false;
        }
        self.skills.push(skill.to_string());
        true
    }

    /// Remove every occurrence of a skill.
    pub fn remove_skill(&mut self, skill: &str) {
        self.touched_collections.insert(Collection::Skills);
        self.skills.retain(|existing| existing != skill);
    }

    /// Append a blank work-history entry with a fresh local id.
    pub fn add_experience_entry(&mut self) -> EntryId {
        self.touched_collections.insert(Collection::Experience);
        let id = self.allocate_entry_id();
        self.experience.push(ExperienceEntry::blank(id));
        id
    }

    /// Remove one work-history entry by id; unknown ids are a no-op.
    pub fn remove_experience_entry(&mut self, id: EntryId) {
        self.touched_collections.insert(Collection::Experience);
        self.experience.retain(|entry| entry.id != id);
    }

    /// Patch a single field of one work-history entry; unknown ids are a
    /// no-op.
    pub fn update_experience_field(&mut self, id: EntryId, field: ExperienceField, value: &str) {
        self.touched_collections.insert(Collection::Experience);
        if let Some(entry) = self.experience.iter_mut().find(|entry| entry.id == id) {
            let slot = match field {
                ExperienceField::Company => &mut entry.company,
                ExperienceField::Designation => &mut entry.designation,
                ExperienceField::Responsibilities => &mut entry.responsibilities,
                ExperienceField::FromDate => &mut entry.from_date,
                ExperienceField::ToDate => &mut entry.to_date,
            };
            *slot = value.to_string();
        }
    }

    /// Append a blank education entry with a fresh local id.
    pub fn add_education_entry(&mut self) -> EntryId {
        self.touched_collections.insert(Collection::Education);
        let id = self.allocate_entry_id();
        self.education.push(EducationEntry::blank(id));
        id
    }

    /// Remove one education entry by id; unknown ids are a no-op.
    pub fn remove_education_entry(&mut self, id: EntryId) {
        self.touched_collections.insert(Collection::Education);
        self.education.retain(|entry| entry.id != id);
    }

    /// Patch a single field of one education entry; unknown ids are a no-op.
    pub fn update_education_field(&mut self, id: EntryId, field: EducationField, value: &str) {
        self.touched_collections.insert(Collection::Education);
        if let Some(entry) = self.education.iter_mut().find(|entry| entry.id == id) {
            let slot = match field {
                EducationField::School => &mut entry.school,
                EducationField::Degree => &mut entry.degree,
                EducationField::Specialization => &mut entry.specialization,
                EducationField::StartDate => &mut entry.start_date,
                EducationField::EndDate => &mut entry.end_date,
            };
            *slot = value.to_string();
        }
    }

    fn allocate_entry_id(&mut self) -> EntryId {
        let id = EntryId(self.next_entry_id);
        self.next_entry_id += 1;
        id
    }

    /// Accept a resume file (pdf/doc/docx). Replaces any previous resume.
    pub fn attach_resume(&mut self, file_name: &str) -> Result<(), AttachmentError> {
        Self::check_extension(file_name, DOCUMENT_EXTENSIONS)?;
        self.attachments.resume = Some(file_name.to_string());
        Ok(())
    }

    /// Accept an optional cover letter (pdf/doc/docx).
    pub fn attach_cover_letter(&mut self, file_name: &str) -> Result<(), AttachmentError> {
        Self::check_extension(file_name, DOCUMENT_EXTENSIONS)?;
        self.attachments.cover_letter = Some(file_name.to_string());
        Ok(())
    }

    /// Append one certificate (pdf/doc/docx/jpg/jpeg/png) to the running
    /// list.
    pub fn add_certificate(&mut self, file_name: &str) -> Result<(), AttachmentError> {
        Self::check_extension(file_name, CERTIFICATE_EXTENSIONS)?;
        self.attachments.certificates.push(file_name.to_string());
        Ok(())
    }

    /// Remove a certificate by position; out-of-range indexes are a no-op.
    pub fn remove_certificate(&mut self, index: usize) {
        if index < self.attachments.certificates.len() {
            self.attachments.certificates.remove(index);
        }
    }

    fn check_extension(
        file_name: &str,
        allowed: &'static [&'static str],
    ) -> Result<(), AttachmentError> {
        if has_allowed_extension(file_name, allowed) {
            Ok(())
        } else {
            Err(AttachmentError {
                file_name: file_name.to_string(),
                allowed: allowed.to_vec(),
            })
        }
    }

    /// Merge an extraction result as suggestions: scalar values land only in
    /// untouched fields, and collections are seeded only while the candidate
    /// has not edited them. Nothing here marks a field touched, so the
    /// candidate can still overwrite every suggestion. An empty extraction is
    /// a no-op.
    pub fn apply_extraction(&mut self, extraction: &ResumeExtraction) {
        for (&field, value) in &extraction.fields {
            if self.touched.contains(&field) {
                continue;
            }
            if field == CandidateField::EmploymentEndDate && self.currently_working {
                continue;
            }
            self.values.insert(field, value.clone());
            if field == CandidateField::DateOfBirth {
                self.recompute_age();
            }
        }

        if !self.touched_collections.contains(&Collection::Skills) {
            for skill in &extraction.skills {
                let skill = skill.trim();
                if !skill.is_empty() && !self.skills.iter().any(|existing| existing == skill) {
                    self.skills.push(skill.to_string());
                }
            }
        }

        if !self.touched_collections.contains(&Collection::Experience) {
            for suggestion in &extraction.experience {
                let id = self.allocate_entry_id();
                self.experience.push(ExperienceEntry {
                    id,
                    company: suggestion.company.clone(),
                    designation: suggestion.designation.clone(),
                    responsibilities: suggestion.responsibilities.clone(),
                    from_date: suggestion.from_date.clone(),
                    to_date: suggestion.to_date.clone(),
                });
            }
        }

        if !self.touched_collections.contains(&Collection::Education) {
            for suggestion in &extraction.education {
                let id = self.allocate_entry_id();
                self.education.push(EducationEntry {
                    id,
                    school: suggestion.school.clone(),
                    degree: suggestion.degree.clone(),
                    specialization: suggestion.specialization.clone(),
                    start_date: suggestion.start_date.clone(),
                    end_date: suggestion.end_date.clone(),
                });
            }
        }
    }

    /// Run the full required-field validation and emit the step payload. On
    /// failure the field-level issues are returned and the form is left
    /// untouched for correction.
    pub fn submit(&self) -> Result<CandidateSubmission, CandidateValidationError> {
        let mut issues = validate_fields(&self.values);
        if self.attachments.resume.is_none() {
            issues.push(ValidationIssue {
                target: IssueTarget::Resume,
                message: "A resume is required".to_string(),
            });
        }
        if !issues.is_empty() {
            return Err(CandidateValidationError { issues });
        }

        let mut fields = self.values.clone();
        if self.currently_working {
            fields.remove(&CandidateField::EmploymentEndDate);
        }

        Ok(CandidateSubmission {
            fields,
            currently_working: self.currently_working,
            age: self.age,
            skills: self.skills.clone(),
            experience: self.experience.clone(),
            education: self.education.clone(),
            attachments: self.attachments.clone(),
        })
    }
}
