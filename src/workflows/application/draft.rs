//! Local draft persistence for "save and continue later": a snapshot of the
//! wizard state keyed by job id, with last-write-wins overwrite semantics.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::domain::{AnswerMap, CandidateSubmission, JobId, Step, WizardState};

/// Durable snapshot of an in-progress application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardDraft {
    pub step: Step,
    pub candidate_data: Option<CandidateSubmission>,
    pub assessment_data: AnswerMap,
}

impl WizardDraft {
    pub fn snapshot(state: &WizardState) -> Self {
        Self {
            step: state.current_step,
            candidate_data: state.candidate_data.clone(),
            assessment_data: state.assessment_data.clone(),
        }
    }

    pub fn into_state(self) -> WizardState {
        WizardState {
            current_step: self.step,
            candidate_data: self.candidate_data,
            assessment_data: self.assessment_data,
        }
    }
}

/// Storage abstraction for drafts so the wizard can be exercised in
/// isolation. A later save for the same job id fully overwrites an earlier
/// one; there is no conflict resolution.
pub trait DraftStore: Send + Sync {
    fn save(&self, job_id: &JobId, draft: &WizardDraft) -> Result<(), DraftError>;
    fn load(&self, job_id: &JobId) -> Result<Option<WizardDraft>, DraftError>;
}

/// Error enumeration for draft store failures. All recoverable: the wizard
/// keeps its in-memory state regardless.
#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("draft store unavailable: {0}")]
    Unavailable(String),
    #[error("draft could not be encoded or decoded: {0}")]
    Codec(#[from] serde_json::Error),
    #[error("draft storage failed: {0}")]
    Io(#[from] std::io::Error),
}

/// File-backed store writing one pretty-printed JSON document per job under a
/// configured directory.
#[derive(Debug, Clone)]
pub struct JsonDraftStore {
    dir: PathBuf,
}

impl JsonDraftStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, job_id: &JobId) -> PathBuf {
        // Job ids are slugs in practice; anything else is flattened so the
        // file name stays portable.
        let slug: String = job_id
            .0
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '-' })
            .collect();
        self.dir.join(format!("application-{slug}.json"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DraftStore for JsonDraftStore {
    fn save(&self, job_id: &JobId, draft: &WizardDraft) -> Result<(), DraftError> {
        fs::create_dir_all(&self.dir)?;
        let encoded = serde_json::to_vec_pretty(draft)?;
        fs::write(self.path_for(job_id), encoded)?;
        Ok(())
    }

    fn load(&self, job_id: &JobId) -> Result<Option<WizardDraft>, DraftError> {
        let bytes = match fs::read(self.path_for(job_id)) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }
}
