use std::sync::Arc;

use tracing::debug;

use crate::api::{HttpResumeApi, ResumeApi};
use crate::config::Config;
use crate::error_channel::ErrorChannel;
use crate::errors::ClientError;
use crate::history::{DetailFetcher, ResumeListStore};
use crate::upload::UploadController;

/// Composition root. All components share one backend handle and one
/// error banner.
pub struct Dashboard {
    pub errors: ErrorChannel,
    pub history: ResumeListStore,
    pub upload: UploadController,
    pub detail: DetailFetcher,
}

impl Dashboard {
    pub fn new(api: Arc<dyn ResumeApi>) -> Self {
        let errors = ErrorChannel::new();
        Self {
            history: ResumeListStore::new(Arc::clone(&api), errors.clone()),
            upload: UploadController::new(Arc::clone(&api), errors.clone()),
            detail: DetailFetcher::new(api, errors.clone()),
            errors,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        let api = HttpResumeApi::new(config)?;
        Ok(Self::new(Arc::new(api)))
    }

    /// Initial list fetch. A failure is already on the banner, so it is not
    /// returned.
    pub async fn mount(&self) {
        if let Err(err) = self.history.refresh().await {
            debug!(error = %err, "Initial resume list fetch failed");
        }
    }
}
