//! In-memory `ResumeApi` for orchestration tests. Each scripted response can be
//! held behind a gate so a test decides the order in which calls resolve.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;
use uuid::Uuid;

use super::ResumeApi;
use crate::errors::ClientError;
use crate::models::{ResumeDetail, ResumeId, ResumeSummary};
use crate::upload::validation::AcceptedFile;

struct Scripted<T> {
    gate: Option<oneshot::Receiver<()>>,
    result: Result<T, ClientError>,
}

/// Releases one gated response.
pub(crate) struct Gate(oneshot::Sender<()>);

impl Gate {
    pub(crate) fn open(self) {
        let _ = self.0.send(());
    }
}

#[derive(Default)]
pub(crate) struct ScriptedApi {
    lists: Mutex<VecDeque<Scripted<Vec<ResumeSummary>>>>,
    uploads: Mutex<VecDeque<Scripted<ResumeDetail>>>,
    details: Mutex<HashMap<ResumeId, VecDeque<Scripted<ResumeDetail>>>>,
    list_calls: AtomicUsize,
    upload_calls: AtomicUsize,
    detail_calls: AtomicUsize,
}

fn gated<T>(result: Result<T, ClientError>) -> (Scripted<T>, Gate) {
    let (tx, rx) = oneshot::channel();
    (
        Scripted {
            gate: Some(rx),
            result,
        },
        Gate(tx),
    )
}

fn ready<T>(result: Result<T, ClientError>) -> Scripted<T> {
    Scripted { gate: None, result }
}

async fn resolve<T>(next: Option<Scripted<T>>) -> Result<T, ClientError> {
    let Some(Scripted { gate, result }) = next else {
        return Err(ClientError::Server {
            status: 500,
            detail: "no scripted response".to_string(),
        });
    };
    if let Some(gate) = gate {
        let _ = gate.await;
    }
    result
}

impl ScriptedApi {
    pub(crate) fn push_list(&self, result: Result<Vec<ResumeSummary>, ClientError>) {
        self.lists.lock().unwrap().push_back(ready(result));
    }

    pub(crate) fn push_list_gated(&self, result: Result<Vec<ResumeSummary>, ClientError>) -> Gate {
        let (scripted, gate) = gated(result);
        self.lists.lock().unwrap().push_back(scripted);
        gate
    }

    pub(crate) fn push_upload(&self, result: Result<ResumeDetail, ClientError>) {
        self.uploads.lock().unwrap().push_back(ready(result));
    }

    pub(crate) fn push_upload_gated(&self, result: Result<ResumeDetail, ClientError>) -> Gate {
        let (scripted, gate) = gated(result);
        self.uploads.lock().unwrap().push_back(scripted);
        gate
    }

    pub(crate) fn push_detail(&self, id: ResumeId, result: Result<ResumeDetail, ClientError>) {
        self.details
            .lock()
            .unwrap()
            .entry(id)
            .or_default()
            .push_back(ready(result));
    }

    pub(crate) fn push_detail_gated(
        &self,
        id: ResumeId,
        result: Result<ResumeDetail, ClientError>,
    ) -> Gate {
        let (scripted, gate) = gated(result);
        self.details
            .lock()
            .unwrap()
            .entry(id)
            .or_default()
            .push_back(scripted);
        gate
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResumeApi for ScriptedApi {
    async fn list_resumes(&self, _request_id: Uuid) -> Result<Vec<ResumeSummary>, ClientError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.lists.lock().unwrap().pop_front();
        resolve(next).await
    }

    async fn upload_resume(
        &self,
        _request_id: Uuid,
        _file: &AcceptedFile,
    ) -> Result<ResumeDetail, ClientError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.uploads.lock().unwrap().pop_front();
        resolve(next).await
    }

    async fn get_resume(
        &self,
        _request_id: Uuid,
        id: ResumeId,
    ) -> Result<ResumeDetail, ClientError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .details
            .lock()
            .unwrap()
            .get_mut(&id)
            .and_then(VecDeque::pop_front);
        match next {
            Some(next) => resolve(Some(next)).await,
            None => Err(ClientError::Server {
                status: 404,
                detail: "Resume not found".to_string(),
            }),
        }
    }
}
