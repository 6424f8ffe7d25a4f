//! Linear step sequencing over the wizard state: forward on validated step
//! output, backward one step at a time, and unconditional edit jumps from the
//! preview step.

use super::domain::{AnswerMap, CandidateSubmission, Step, WizardState};

/// Validated output of a completed step, merged into the matching slice of
/// the wizard state on advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutput {
    Candidate(CandidateSubmission),
    Assessment(AnswerMap),
}

/// Observable result of a sequencer transition. Hosts use `Advanced`,
/// `SteppedBack`, and `Jumped` to reset the viewport; `ExitRequested` hands
/// control to the navigation collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerEvent {
    Advanced(Step),
    AtFinalStep,
    SteppedBack(Step),
    ExitRequested,
    Jumped(Step),
}

/// Owns the current step and the accumulated step outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSequencer {
    state: WizardState,
}

impl StepSequencer {
    pub fn new() -> Self {
        Self {
            state: WizardState::new(),
        }
    }

    /// Rebuild a sequencer from a previously saved state.
    pub fn from_state(state: WizardState) -> Self {
        Self { state }
    }

    pub fn current_step(&self) -> Step {
        self.state.current_step
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn into_state(self) -> WizardState {
        self.state
    }

    /// Merge a completed step's output and move forward. Past the last step
    /// the merge still applies but the step does not change; submission is a
    /// distinct operation, not an advance.
    pub fn advance(&mut self, output: StepOutput) -> SequencerEvent {
        match output {
            StepOutput::Candidate(submission) => {
                self.state.candidate_data = Some(submission);
            }
            StepOutput::Assessment(answers) => {
                self.state.assessment_data = answers;
            }
        }

        match self.state.current_step.next() {
            Some(next) => {
                self.state.current_step = next;
                SequencerEvent::Advanced(next)
            }
            None => SequencerEvent::AtFinalStep,
        }
    }

    /// Step back without touching any collected data. From the first step the
    /// sequencer signals exit exactly once per call and stays where it is.
    pub fn retreat(&mut self) -> SequencerEvent {
        match self.state.current_step.previous() {
            Some(previous) => {
                self.state.current_step = previous;
                SequencerEvent::SteppedBack(previous)
            }
            None => SequencerEvent::ExitRequested,
        }
    }

    /// Unconditionally set the current step. No validation runs on a jump;
    /// the next forward advance from the target step revalidates.
    pub fn jump_to(&mut self, step: Step) -> SequencerEvent {
        self.state.current_step = step;
        SequencerEvent::Jumped(step)
    }
}

impl Default for StepSequencer {
    fn default() -> Self {
        Self::new()
    }
}
