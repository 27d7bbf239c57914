use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};
use uuid::Uuid;

use crate::api::ResumeApi;
use crate::error_channel::ErrorChannel;
use crate::errors::{ClientError, Operation};
use crate::history::Settled;
use crate::models::ResumeSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStatus {
    Idle,
    Fetching,
}

struct ListState {
    resumes: Arc<[ResumeSummary]>,
    status: ListStatus,
    /// Ticket of the most recently issued refresh.
    latest: u64,
}

/// Owns the history collection. The collection is replaced wholesale by the
/// latest refresh; responses to superseded refreshes are dropped.
pub struct ResumeListStore {
    api: Arc<dyn ResumeApi>,
    errors: ErrorChannel,
    state: Mutex<ListState>,
}

impl ResumeListStore {
    pub fn new(api: Arc<dyn ResumeApi>, errors: ErrorChannel) -> Self {
        Self {
            api,
            errors,
            state: Mutex::new(ListState {
                resumes: Arc::from(Vec::new()),
                status: ListStatus::Idle,
                latest: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ListState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn resumes(&self) -> Arc<[ResumeSummary]> {
        Arc::clone(&self.lock().resumes)
    }

    pub fn status(&self) -> ListStatus {
        self.lock().status
    }

    /// Fetches the full collection. Returns `Superseded` when a newer refresh
    /// was issued while this one was in flight; its result is then discarded.
    pub async fn refresh(&self) -> Result<Settled<usize>, ClientError> {
        let request_id = Uuid::new_v4();
        let ticket = {
            let mut state = self.lock();
            state.latest += 1;
            state.status = ListStatus::Fetching;
            state.latest
        };
        debug!(%request_id, ticket, "Refreshing resume list");

        let result = self.api.list_resumes(request_id).await;

        let mut state = self.lock();
        if ticket != state.latest {
            debug!(
                %request_id,
                ticket,
                latest = state.latest,
                ok = result.is_ok(),
                "Discarding superseded list response"
            );
            return Ok(Settled::Superseded);
        }
        state.status = ListStatus::Idle;

        match result {
            Ok(resumes) => {
                let count = resumes.len();
                state.resumes = Arc::from(resumes);
                drop(state);
                self.errors.clear();
                info!(%request_id, count, "Resume list replaced");
                Ok(Settled::Applied(count))
            }
            Err(err) => {
                drop(state);
                self.errors
                    .report(Operation::ListResumes, &err, Some(request_id));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::scripted::ScriptedApi;
    use crate::errors::FailureKind;
    use crate::testing::summary;

    fn store() -> (Arc<ScriptedApi>, ErrorChannel, ResumeListStore) {
        let api = Arc::new(ScriptedApi::default());
        let errors = ErrorChannel::new();
        let store = ResumeListStore::new(api.clone(), errors.clone());
        (api, errors, store)
    }

    fn server_down() -> ClientError {
        ClientError::Server {
            status: 503,
            detail: "unavailable".to_string(),
        }
    }

    #[tokio::test]
    async fn test_refresh_replaces_collection() {
        let (api, errors, store) = store();
        api.push_list(Ok(vec![summary(1, "a.pdf"), summary(2, "b.pdf")]));
        api.push_list(Ok(vec![summary(3, "c.pdf")]));

        assert_eq!(store.refresh().await.unwrap(), Settled::Applied(2));
        assert_eq!(store.refresh().await.unwrap(), Settled::Applied(1));

        let ids: Vec<_> = store.resumes().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3]);
        assert_eq!(store.status(), ListStatus::Idle);
        assert!(errors.current().is_none());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_collection() {
        let (api, errors, store) = store();
        api.push_list(Ok(vec![summary(1, "a.pdf")]));
        api.push_list(Err(server_down()));

        store.refresh().await.unwrap();
        assert!(store.refresh().await.is_err());

        assert_eq!(store.resumes().len(), 1);
        assert_eq!(store.status(), ListStatus::Idle);
        let notice = errors.current().unwrap();
        assert_eq!(notice.message, "Failed to fetch resumes. Please try again.");
        assert_eq!(notice.kind, FailureKind::Server { status: 503 });
    }

    #[tokio::test]
    async fn test_success_clears_previous_error() {
        let (api, errors, store) = store();
        api.push_list(Err(server_down()));
        api.push_list(Ok(vec![summary(1, "a.pdf")]));

        let _ = store.refresh().await;
        assert!(errors.current().is_some());
        store.refresh().await.unwrap();
        assert!(errors.current().is_none());
    }

    #[tokio::test]
    async fn test_older_refresh_resolving_last_is_discarded() {
        let (api, errors, store) = store();
        let first = api.push_list_gated(Ok(vec![summary(1, "stale.pdf")]));
        let second = api.push_list_gated(Ok(vec![summary(2, "fresh.pdf")]));

        let driver = async {
            tokio::task::yield_now().await;
            assert_eq!(store.status(), ListStatus::Fetching);

            second.open();
            while store.status() == ListStatus::Fetching {
                tokio::task::yield_now().await;
            }
            first.open();
        };

        let (older, newer, ()) = tokio::join!(store.refresh(), store.refresh(), driver);

        assert_eq!(older.unwrap(), Settled::Superseded);
        assert_eq!(newer.unwrap(), Settled::Applied(1));
        assert_eq!(store.resumes()[0].file_name, "fresh.pdf");
        assert!(errors.current().is_none());
    }

    #[tokio::test]
    async fn test_stale_response_does_not_end_fetching() {
        let (api, errors, store) = store();
        let first = api.push_list_gated(Err(server_down()));
        let second = api.push_list_gated(Ok(vec![summary(2, "fresh.pdf")]));

        let driver = async {
            tokio::task::yield_now().await;
            first.open();
            for _ in 0..5 {
                tokio::task::yield_now().await;
            }
            // The superseded failure neither reports nor ends the fetch.
            assert_eq!(store.status(), ListStatus::Fetching);
            assert!(errors.current().is_none());
            second.open();
        };

        let (older, newer, ()) = tokio::join!(store.refresh(), store.refresh(), driver);

        assert_eq!(older.unwrap(), Settled::Superseded);
        assert_eq!(newer.unwrap(), Settled::Applied(1));
        assert_eq!(store.status(), ListStatus::Idle);
    }
}
