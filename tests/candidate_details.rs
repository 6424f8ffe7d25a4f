use chrono::NaiveDate;
use jobflow::workflows::application::{
    CandidateDetailsCollector, CandidateField, EducationField, EntryId, ExperienceField,
    ExtractedExperience, IssueTarget, ResumeExtraction,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid evaluation date")
}

fn filled_collector() -> CandidateDetailsCollector {
    let mut form = CandidateDetailsCollector::new(today());
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
    form.attach_resume("priya-sharma.pdf")
        .expect("pdf resume accepted");
    form
}

#[test]
fn submit_succeeds_once_required_fields_and_resume_are_present() {
    let form = filled_collector();
    let submission = form.submit().expect("complete form passes validation");
    assert_eq!(submission.field(CandidateField::FirstName), Some("Priya"));
    assert_eq!(submission.age, Some(33), "age derived the day before the birthday");
    assert_eq!(
        submission.attachments.resume.as_deref(),
        Some("priya-sharma.pdf")
    );
}

#[test]
fn submit_reports_every_missing_required_field_at_once() {
    let form = CandidateDetailsCollector::new(today());
    let err = form.submit().expect_err("empty form is rejected");
    assert!(
        err.issues.len() > 15,
        "all required fields plus the resume should be flagged, got {}",
        err.issues.len()
    );
    assert!(err
        .issues
        .iter()
        .any(|issue| issue.target == IssueTarget::Resume));
}

#[test]
fn submit_flags_malformed_email_and_phone() {
    let mut form = filled_collector();
    form.edit(CandidateField::Email, "not-an-email");
    form.edit(CandidateField::Phone, "12345");
    let err = form.submit().expect_err("malformed contact fields rejected");
    let flagged: Vec<_> = err
        .issues
        .iter()
        .filter_map(|issue| match issue.target {
            IssueTarget::Field(field) => Some(field),
            IssueTarget::Resume => None,
        })
        .collect();
    assert!(flagged.contains(&CandidateField::Email));
    assert!(flagged.contains(&CandidateField::Phone));
}

#[test]
fn editing_date_of_birth_recomputes_age() {
    let mut form = CandidateDetailsCollector::new(today());
    form.edit(CandidateField::DateOfBirth, "1990-03-02");
    assert_eq!(form.age(), Some(33));
    form.edit(CandidateField::DateOfBirth, "1990-02-28");
    assert_eq!(form.age(), Some(34), "birthday already passed this year");
    form.edit(CandidateField::DateOfBirth, "not a date");
    assert_eq!(form.age(), None);
}

#[test]
fn currently_working_clears_and_locks_the_end_date() {
    let mut form = filled_collector();
    form.edit(CandidateField::EmploymentEndDate, "2023-12-31");
    form.set_currently_working(true);
    assert_eq!(form.value(CandidateField::EmploymentEndDate), None);

    form.edit(CandidateField::EmploymentEndDate, "2024-01-31");
    assert_eq!(
        form.value(CandidateField::EmploymentEndDate),
        None,
        "end date edits are ignored while currently working"
    );

    let submission = form.submit().expect("form still valid");
    assert!(submission.currently_working);
    assert_eq!(submission.field(CandidateField::EmploymentEndDate), None);
}

#[test]
fn skills_are_trimmed_and_deduplicated() {
    let mut form = CandidateDetailsCollector::new(today());
    assert!(form.add_skill("  React  "));
    assert!(!form.add_skill("React"), "exact duplicate rejected");
    assert!(form.add_skill("react"), "comparison is case sensitive");
    assert!(!form.add_skill("   "), "blank skill rejected");
    assert_eq!(form.skills(), ["React", "react"]);

    form.remove_skill("React");
    assert_eq!(form.skills(), ["react"]);
}

#[test]
fn experience_entries_get_stable_ids_across_removals() {
    let mut form = CandidateDetailsCollector::new(today());
    let first = form.add_experience_entry();
    let second = form.add_experience_entry();
    form.update_experience_field(first, ExperienceField::Company, "Acme Capital");
    form.update_experience_field(second, ExperienceField::Company, "Globex");

    form.remove_experience_entry(first);
    let third = form.add_experience_entry();
    assert_ne!(second, third, "ids are never reused");
    assert_eq!(form.experience().len(), 2);
    assert_eq!(form.experience()[0].company, "Globex");

    // Unknown ids are ignored outright.
    form.update_experience_field(EntryId(999), ExperienceField::Company, "Ghost");
    form.remove_experience_entry(EntryId(999));
    assert_eq!(form.experience().len(), 2);
}

#[test]
fn education_entries_are_editable_by_field() {
    let mut form = CandidateDetailsCollector::new(today());
    let id = form.add_education_entry();
    form.update_education_field(id, EducationField::School, "IIM Bangalore");
    form.update_education_field(id, EducationField::Degree, "MBA");
    form.update_education_field(id, EducationField::Specialization, "Finance");
    assert_eq!(form.education()[0].school, "IIM Bangalore");
    assert_eq!(form.education()[0].specialization, "Finance");
}

#[test]
fn attachments_enforce_extension_allowlists() {
    let mut form = CandidateDetailsCollector::new(today());
    assert!(form.attach_resume("resume.PDF").is_ok(), "extension is case insensitive");
    assert!(form.attach_resume("resume.docx").is_ok());
    let err = form.attach_resume("resume.txt").expect_err("txt resume rejected");
    assert!(err.allowed.contains(&"pdf"));
    assert_eq!(
        form.attachments().resume.as_deref(),
        Some("resume.docx"),
        "rejected upload leaves the previous resume in place"
    );

    assert!(form.add_certificate("cert.jpg").is_ok());
    assert!(form.add_certificate("cert.png").is_ok());
    assert!(form.add_certificate("cert.exe").is_err());
    assert_eq!(form.attachments().certificates.len(), 2);

    form.remove_certificate(5);
    assert_eq!(form.attachments().certificates.len(), 2, "out of range is a no-op");
    form.remove_certificate(0);
    assert_eq!(form.attachments().certificates, ["cert.png"]);
}

#[test]
fn extraction_fills_only_untouched_fields() {
    let mut form = CandidateDetailsCollector::new(today());
    form.edit(CandidateField::FirstName, "Priya");

    let mut extraction = ResumeExtraction::default();
    extraction
        .fields
        .insert(CandidateField::FirstName, "Wrong".to_string());
    extraction
        .fields
        .insert(CandidateField::LastName, "Sharma".to_string());
    extraction
        .fields
        .insert(CandidateField::DateOfBirth, "1990-03-02".to_string());
    form.apply_extraction(&extraction);

    assert_eq!(form.value(CandidateField::FirstName), Some("Priya"));
    assert_eq!(form.value(CandidateField::LastName), Some("Sharma"));
    assert_eq!(form.age(), Some(33), "autofilled birth date still derives the age");

    // Autofill does not mark fields touched: the candidate can be overwritten
    // by a later extraction only until they edit the field themselves.
    let mut second = ResumeExtraction::default();
    second
        .fields
        .insert(CandidateField::LastName, "Verma".to_string());
    form.apply_extraction(&second);
    assert_eq!(form.value(CandidateField::LastName), Some("Verma"));
}

#[test]
fn extraction_seeds_collections_only_while_untouched() {
    let mut form = CandidateDetailsCollector::new(today());
    form.add_skill("React");

    let extraction = ResumeExtraction {
        skills: vec!["Python".to_string()],
        experience: vec![ExtractedExperience {
            company: "Acme Capital".to_string(),
            designation: "Analyst".to_string(),
            ..ExtractedExperience::default()
        }],
        ..ResumeExtraction::default()
    };
    form.apply_extraction(&extraction);

    assert_eq!(
        form.skills(),
        ["React"],
        "candidate-shaped skills list is left alone"
    );
    assert_eq!(
        form.experience().len(),
        1,
        "untouched experience list is seeded from the resume"
    );
    assert_eq!(form.experience()[0].company, "Acme Capital");
    assert_ne!(form.experience()[0].id, EntryId(0), "merged entries get local ids");
}

#[test]
fn resuming_from_a_submission_protects_prior_answers_from_autofill() {
    let submission = filled_collector().submit().expect("valid form");
    let mut form = CandidateDetailsCollector::from_submission(&submission, today());

    let mut extraction = ResumeExtraction::default();
    extraction
        .fields
        .insert(CandidateField::FirstName, "Other".to_string());
    form.apply_extraction(&extraction);
    assert_eq!(
        form.value(CandidateField::FirstName),
        Some("Priya"),
        "prefilled fields count as touched"
    );

    let resubmitted = form.submit().expect("round trip stays valid");
    assert_eq!(resubmitted, submission);
}
