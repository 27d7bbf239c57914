//! Upload tab: file selection, validation and the single in-flight upload.

pub mod validation;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};
use uuid::Uuid;

use crate::api::ResumeApi;
use crate::error_channel::ErrorChannel;
use crate::errors::{ClientError, FailureKind, Operation};
use crate::models::ResumeDetail;

use validation::{validate, AcceptedFile, CandidateFile, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    /// Held only while `select` runs the validator under the state lock, so
    /// readers never observe it.
    Validating,
    Accepted,
    Uploading,
    Succeeded,
    Failed(FailureKind),
}

struct UploadState {
    phase: UploadPhase,
    staged: Option<AcceptedFile>,
    validation_error: Option<ValidationError>,
    /// The most recent upload result, shown under the picker.
    displayed: Option<Arc<ResumeDetail>>,
}

pub struct UploadController {
    api: Arc<dyn ResumeApi>,
    errors: ErrorChannel,
    state: Mutex<UploadState>,
}

impl UploadController {
    pub fn new(api: Arc<dyn ResumeApi>, errors: ErrorChannel) -> Self {
        Self {
            api,
            errors,
            state: Mutex::new(UploadState {
                phase: UploadPhase::Idle,
                staged: None,
                validation_error: None,
                displayed: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, UploadState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn phase(&self) -> UploadPhase {
        self.lock().phase
    }

    pub fn staged_file(&self) -> Option<AcceptedFile> {
        self.lock().staged.clone()
    }

    /// Inline error shown next to the file picker. Never routed to the banner.
    pub fn validation_error(&self) -> Option<ValidationError> {
        self.lock().validation_error.clone()
    }

    pub fn displayed(&self) -> Option<Arc<ResumeDetail>> {
        self.lock().displayed.clone()
    }

    /// Runs the file gate. A rejection keeps any previously accepted file
    /// staged; acceptance stages the new file and clears any earlier rejection.
    pub fn select(&self, candidate: CandidateFile) -> Result<(), ClientError> {
        let mut state = self.lock();
        if state.phase == UploadPhase::Uploading {
            return Err(ClientError::UploadInProgress);
        }

        state.phase = UploadPhase::Validating;
        debug!(
            file_name = candidate.name(),
            media_type = candidate.media_type(),
            size = candidate.size(),
            "Validating selected file"
        );

        match validate(candidate) {
            Ok(accepted) => {
                state.phase = UploadPhase::Accepted;
                state.staged = Some(accepted);
                state.validation_error = None;
            }
            Err(rejection) => {
                debug!(%rejection, "Selected file rejected");
                state.phase = if state.staged.is_some() {
                    UploadPhase::Accepted
                } else {
                    UploadPhase::Idle
                };
                state.validation_error = Some(rejection);
            }
        }
        Ok(())
    }

    /// Uploads the staged file. Fails without a network call when nothing is
    /// staged or another upload is in flight. On failure the staged file is
    /// kept so the user can retry without reselecting it.
    pub async fn submit(&self) -> Result<Arc<ResumeDetail>, ClientError> {
        let file = {
            let mut state = self.lock();
            if state.phase == UploadPhase::Uploading {
                return Err(ClientError::UploadInProgress);
            }
            let Some(file) = state.staged.clone() else {
                drop(state);
                self.errors
                    .report(Operation::Upload, &ClientError::NoFileStaged, None);
                return Err(ClientError::NoFileStaged);
            };
            state.phase = UploadPhase::Uploading;
            file
        };

        let request_id = Uuid::new_v4();
        info!(%request_id, file_name = file.name(), size = file.size(), "Uploading resume");

        let result = self.api.upload_resume(request_id, &file).await;

        let mut state = self.lock();
        match result {
            Ok(detail) => {
                let detail = Arc::new(detail);
                state.phase = UploadPhase::Succeeded;
                state.displayed = Some(Arc::clone(&detail));
                drop(state);
                self.errors.clear();
                info!(%request_id, resume_id = detail.id, "Upload succeeded");
                Ok(detail)
            }
            Err(err) => {
                state.phase = UploadPhase::Failed(err.kind());
                drop(state);
                self.errors.report(Operation::Upload, &err, Some(request_id));
                Err(err)
            }
        }
    }
}
