use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};
use uuid::Uuid;

use crate::api::ResumeApi;
use crate::error_channel::ErrorChannel;
use crate::errors::{ClientError, Operation};
use crate::history::Settled;
use crate::models::{ResumeDetail, ResumeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatus {
    Idle,
    Loading,
}

#[derive(Default)]
struct DetailState {
    /// Row id → ticket of the request currently loading it.
    in_flight: HashMap<ResumeId, u64>,
    latest: u64,
    selected: Option<Arc<ResumeDetail>>,
    visible: bool,
}

/// Fetches full records for history rows and owns the detail view.
pub struct DetailFetcher {
    api: Arc<dyn ResumeApi>,
    errors: ErrorChannel,
    state: Mutex<DetailState>,
}

impl DetailFetcher {
    pub fn new(api: Arc<dyn ResumeApi>, errors: ErrorChannel) -> Self {
        Self {
            api,
            errors,
            state: Mutex::new(DetailState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DetailState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn row_status(&self, id: ResumeId) -> RowStatus {
        if self.lock().in_flight.contains_key(&id) {
            RowStatus::Loading
        } else {
            RowStatus::Idle
        }
    }

    pub fn selected(&self) -> Option<Arc<ResumeDetail>> {
        self.lock().selected.clone()
    }

    pub fn is_visible(&self) -> bool {
        self.lock().visible
    }

    /// Hides the detail view; the selected record is kept.
    pub fn close(&self) {
        self.lock().visible = false;
    }

    pub async fn fetch_detail(
        &self,
        id: ResumeId,
    ) -> Result<Settled<Arc<ResumeDetail>>, ClientError> {
        let request_id = Uuid::new_v4();
        let ticket = {
            let mut state = self.lock();
            state.latest += 1;
            let ticket = state.latest;
            state.in_flight.insert(id, ticket);
            ticket
        };
        debug!(%request_id, resume_id = id, ticket, "Fetching resume detail");

        let result = self.api.get_resume(request_id, id).await;

        let mut state = self.lock();
        // A repeated click on the same row owns the mark until it resolves.
        if state.in_flight.get(&id) == Some(&ticket) {
            state.in_flight.remove(&id);
        }

        if ticket != state.latest {
            debug!(
                %request_id,
                resume_id = id,
                ticket,
                latest = state.latest,
                ok = result.is_ok(),
                "Discarding superseded detail response"
            );
            return Ok(Settled::Superseded);
        }

        match result {
            Ok(detail) => {
                let detail = Arc::new(detail);
                state.selected = Some(Arc::clone(&detail));
                state.visible = true;
                drop(state);
                self.errors.clear();
                info!(%request_id, resume_id = id, "Resume detail selected");
                Ok(Settled::Applied(detail))
            }
            Err(err) => {
                drop(state);
                self.errors
                    .report(Operation::FetchDetail, &err, Some(request_id));
                Err(err)
            }
        }
    }
}
