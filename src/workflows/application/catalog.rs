//! Ready-made screening catalog used by the demo binary and tests. Real
//! deployments supply their own ordered question list per job posting.

use super::domain::{Question, QuestionKind};

pub fn default_screening_questions() -> Vec<Question> {
    vec![
        Question {
            id: "q1".to_string(),
            kind: QuestionKind::SingleChoice,
            prompt: "Do you have at least 3 years of experience in investment management?"
                .to_string(),
            options: vec!["Yes".to_string(), "No".to_string()],
            required: true,
        },
        Question {
            id: "q2".to_string(),
            kind: QuestionKind::MultiChoice,
            prompt: "Which investment analysis tools or software are you proficient in?"
                .to_string(),
            options: vec![
                "Bloomberg Terminal".to_string(),
                "FactSet".to_string(),
                "Excel".to_string(),
                "Python/R for Analysis".to_string(),
                "Morningstar Direct".to_string(),
            ],
            required: true,
        },
        Question {
            id: "q3".to_string(),
            kind: QuestionKind::OpenText,
            prompt: "Describe a specific investment strategy you developed for a high-net-worth client."
                .to_string(),
            options: Vec::new(),
            required: true,
        },
        Question {
            id: "q4".to_string(),
            kind: QuestionKind::SingleChoice,
            prompt: "Are you willing to relocate if required?".to_string(),
            options: vec![
                "Yes".to_string(),
                "No".to_string(),
                "Depends on location".to_string(),
            ],
            required: true,
        },
        Question {
            id: "q5".to_string(),
            kind: QuestionKind::OpenText,
            prompt: "What is your expected joining date if you receive an offer?".to_string(),
            options: Vec::new(),
            required: false,
        },
    ]
}
