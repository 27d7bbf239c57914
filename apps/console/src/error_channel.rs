//! The single banner shared by every network-bound component. Holds only the
//! most recent notice; the view observes it through a `watch` receiver.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::{ClientError, FailureKind, Operation};

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorNotice {
    pub operation: Operation,
    pub kind: FailureKind,
    pub message: String,
    pub request_id: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct ErrorChannel {
    tx: Arc<watch::Sender<Option<ErrorNotice>>>,
}

impl Default for ErrorChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorChannel {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Overwrites the current notice with the collapsed message for `operation`.
    pub fn report(&self, operation: Operation, err: &ClientError, request_id: Option<Uuid>) {
        let notice = ErrorNotice {
            operation,
            kind: err.kind(),
            message: operation.message_for(err),
            request_id,
        };
        warn!(
            ?operation,
            kind = ?notice.kind,
            request_id = ?request_id,
            "{}: {err}",
            notice.message
        );
        self.tx.send_replace(Some(notice));
    }

    /// Cleared by the next applied success.
    pub fn clear(&self) {
        self.tx.send_if_modified(|current| current.take().is_some());
    }

    pub fn dismiss(&self) {
        if self.tx.send_if_modified(|current| current.take().is_some()) {
            debug!("Error banner dismissed");
        }
    }

    pub fn current(&self) -> Option<ErrorNotice> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<ErrorNotice>> {
        self.tx.subscribe()
    }
}
