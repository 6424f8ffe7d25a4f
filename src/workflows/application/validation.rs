//! Field-level rules for the candidate details schema: the required set,
//! format checks, and the civil-calendar age derivation.

use chrono::{Datelike, NaiveDate};

use super::domain::CandidateField;

/// Fields that must hold a non-empty, format-valid value before the candidate
/// details step may advance.
pub const REQUIRED_FIELDS: &[CandidateField] = &[
    CandidateField::FirstName,
    CandidateField::LastName,
    CandidateField::Email,
    CandidateField::Phone,
    CandidateField::DateOfBirth,
    CandidateField::Gender,
    CandidateField::MaritalStatus,
    CandidateField::TotalExperience,
    CandidateField::HighestQualification,
    CandidateField::CurrentJobTitle,
    CandidateField::ProfessionalDegree,
    CandidateField::FunctionalArea,
    CandidateField::Street,
    CandidateField::Country,
    CandidateField::State,
    CandidateField::City,
    CandidateField::PostalCode,
];

/// Fields that must parse as non-negative numbers when present.
const NUMERIC_FIELDS: &[CandidateField] = &[
    CandidateField::TotalExperience,
    CandidateField::CurrentSalary,
    CandidateField::ExpectedSalary,
];

/// Accepted resume and cover letter extensions, lower case.
pub const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

/// Accepted certificate extensions, lower case.
pub const CERTIFICATE_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "jpg", "jpeg", "png"];

/// One field-level problem found during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub target: IssueTarget,
    pub message: String,
}

/// What a [`ValidationIssue`] points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueTarget {
    Field(CandidateField),
    Resume,
}

/// Standard email grammar: one `@`, non-empty local part, dotted domain with
/// no empty labels, no whitespace.
pub fn is_valid_email(value: &str) -> bool {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}

/// Phone numbers accept an optional leading `+` followed by at least ten
/// digits.
pub fn is_valid_phone(value: &str) -> bool {
    let digits = value.trim().strip_prefix('+').unwrap_or(value.trim());
    digits.len() >= 10 && digits.chars().all(|c| c.is_ascii_digit())
}

/// Non-negative decimal check for experience and salary fields.
pub fn is_non_negative_number(value: &str) -> bool {
    matches!(value.trim().parse::<f64>(), Ok(parsed) if parsed >= 0.0 && parsed.is_finite())
}

/// Whole civil-calendar years between `date_of_birth` and `today`, decremented
/// by one when today's month/day precedes the birth month/day.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> u8 {
    let mut years = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        years -= 1;
    }
    years.clamp(0, u8::MAX as i32) as u8
}

/// File extension check, case-insensitive, against an allow list.
pub fn has_allowed_extension(file_name: &str, allowed: &[&str]) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(stem, extension)| {
            !stem.is_empty() && allowed.contains(&extension.to_ascii_lowercase().as_str())
        })
        .unwrap_or(false)
}

/// Validate the scalar field map against the required/format schema. The
/// employment end date carries no rule here: the collector clears it while
/// the currently-working flag is set.
pub fn validate_fields(
    values: &std::collections::BTreeMap<CandidateField, String>,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let present = |field: CandidateField| -> Option<&str> {
        values
            .get(&field)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    };

    for &field in REQUIRED_FIELDS {
        if present(field).is_none() {
            issues.push(ValidationIssue {
                target: IssueTarget::Field(field),
                message: format!("{} is required", field.label()),
            });
        }
    }

    for field in [CandidateField::Email, CandidateField::AlternateEmail] {
        if let Some(value) = present(field) {
            if !is_valid_email(value) {
                issues.push(ValidationIssue {
                    target: IssueTarget::Field(field),
                    message: format!("{} must be a valid email address", field.label()),
                });
            }
        }
    }

    for field in [CandidateField::Phone, CandidateField::AlternatePhone] {
        if let Some(value) = present(field) {
            if !is_valid_phone(value) {
                issues.push(ValidationIssue {
                    target: IssueTarget::Field(field),
                    message: format!("{} must contain at least 10 digits", field.label()),
                });
            }
        }
    }

    for &field in NUMERIC_FIELDS {
        if let Some(value) = present(field) {
            if !is_non_negative_number(value) {
                issues.push(ValidationIssue {
                    target: IssueTarget::Field(field),
                    message: format!("{} must be a non-negative number", field.label()),
                });
            }
        }
    }

    if let Some(value) = present(CandidateField::DateOfBirth) {
        if NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").is_err() {
            issues.push(ValidationIssue {
                target: IssueTarget::Field(CandidateField::DateOfBirth),
                message: "Date of birth must be a valid date (YYYY-MM-DD)".to_string(),
            });
        }
    }

    issues
}
