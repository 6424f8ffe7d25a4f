//! Screening questionnaire collection over the externally supplied question
//! catalog: per-kind answer recording, completion progress, and the
//! required-answer gate on advance.

use super::domain::{AnswerMap, AnswerValue, Question, QuestionKind};

/// Raised when an answer does not fit the catalog: unknown question, wrong
/// question kind for the operation, or an option the question never declared.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnswerError {
    #[error("unknown question '{0}'")]
    UnknownQuestion(String),
    #[error("question '{id}' is {} and cannot take this answer", .expected.label())]
    KindMismatch { id: String, expected: QuestionKind },
    #[error("'{option}' is not an option of question '{id}'")]
    UnknownOption { id: String, option: String },
}

/// Raised when required questions are still unanswered on submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("please answer all required questions ({missing} remaining)")]
pub struct AssessmentValidationError {
    pub missing: usize,
}

/// Questionnaire state for the assessment step. The catalog itself is never
/// mutated.
#[derive(Debug, Clone)]
pub struct AssessmentCollector {
    questions: Vec<Question>,
    answers: AnswerMap,
}

impl AssessmentCollector {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            answers: AnswerMap::new(),
        }
    }

    /// Rebuild the questionnaire with previously collected answers, as when
    /// the candidate steps back from preview or resumes a draft.
    pub fn with_answers(questions: Vec<Question>, answers: AnswerMap) -> Self {
        Self { questions, answers }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn answer(&self, question_id: &str) -> Option<&AnswerValue> {
        self.answers.get(question_id)
    }

    fn question(&self, id: &str) -> Result<&Question, AnswerError> {
        self.questions
            .iter()
            .find(|question| question.id == id)
            .ok_or_else(|| AnswerError::UnknownQuestion(id.to_string()))
    }

    /// Record the single selected option of a single-choice question.
    pub fn answer_single(&mut self, question_id: &str, option: &str) -> Result<(), AnswerError> {
        let question = self.question(question_id)?;
        if question.kind != QuestionKind::SingleChoice {
            return Err(AnswerError::KindMismatch {
                id: question_id.to_string(),
                expected: question.kind,
            });
        }
        if !question.options.iter().any(|declared| declared == option) {
            return Err(AnswerError::UnknownOption {
                id: question_id.to_string(),
                option: option.to_string(),
            });
        }
        self.answers
            .insert(question_id.to_string(), AnswerValue::Choice(option.to_string()));
        Ok(())
    }

    /// Toggle one option of a multi-choice question: on appends if absent,
    /// off removes. Order of selection is preserved.
    pub fn toggle_option(
        &mut self,
        question_id: &str,
        option: &str,
        selected: bool,
    ) -> Result<(), AnswerError> {
        let question = self.question(question_id)?;
        if question.kind != QuestionKind::MultiChoice {
            return Err(AnswerError::KindMismatch {
                id: question_id.to_string(),
                expected: question.kind,
            });
        }
        if !question.options.iter().any(|declared| declared == option) {
            return Err(AnswerError::UnknownOption {
                id: question_id.to_string(),
                option: option.to_string(),
            });
        }

        let mut selections = match self.answers.remove(question_id) {
            Some(AnswerValue::Selections(list)) => list,
            _ => Vec::new(),
        };
        if selected {
            if !selections.iter().any(|existing| existing == option) {
                selections.push(option.to_string());
            }
        } else {
            selections.retain(|existing| existing != option);
        }
        self.answers
            .insert(question_id.to_string(), AnswerValue::Selections(selections));
        Ok(())
    }

    /// Record free text for an open-ended question. Blank text is stored but
    /// counts as unanswered.
    pub fn answer_text(&mut self, question_id: &str, text: &str) -> Result<(), AnswerError> {
        let question = self.question(question_id)?;
        if question.kind != QuestionKind::OpenText {
            return Err(AnswerError::KindMismatch {
                id: question_id.to_string(),
                expected: question.kind,
            });
        }
        self.answers
            .insert(question_id.to_string(), AnswerValue::Text(text.to_string()));
        Ok(())
    }

    /// Number of questions with a non-empty answer.
    pub fn answered_count(&self) -> usize {
        self.answers.values().filter(|answer| !answer.is_empty()).count()
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Exact completion fraction in percent. Rounding is a display concern;
    /// see [`Self::progress_display`].
    pub fn progress_percent(&self) -> f64 {
        if self.questions.is_empty() {
            return 0.0;
        }
        self.answered_count() as f64 / self.questions.len() as f64 * 100.0
    }

    /// Rounded percentage for display.
    pub fn progress_display(&self) -> u8 {
        self.progress_percent().round() as u8
    }

    /// Required questions whose answer is missing or empty.
    pub fn missing_required(&self) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|question| question.required)
            .filter(|question| {
                self.answers
                    .get(&question.id)
                    .map_or(true, AnswerValue::is_empty)
            })
            .collect()
    }

    /// Emit the collected answers, rejecting while any required question is
    /// unanswered. Skipped optional questions stay absent from the map.
    pub fn submit(&self) -> Result<AnswerMap, AssessmentValidationError> {
        let missing = self.missing_required().len();
        if missing > 0 {
            return Err(AssessmentValidationError { missing });
        }
        Ok(self.answers.clone())
    }
}
