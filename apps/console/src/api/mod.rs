//! Resume API: the single point of entry for every call to the analysis backend.
//!
//! Components depend on the `ResumeApi` trait, never on reqwest directly, so
//! orchestration can be exercised against a scripted backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::Config;
use crate::errors::ClientError;
use crate::models::{ResumeDetail, ResumeId, ResumeSummary};
use crate::upload::validation::AcceptedFile;

#[cfg(test)]
pub(crate) mod scripted;

const RESUMES_PATH: &str = "/api/v1/resumes/";
const UPLOAD_PATH: &str = "/api/v1/resumes/upload";
const UPLOAD_FIELD: &str = "file";

/// The three backend calls the client consumes.
#[async_trait]
pub trait ResumeApi: Send + Sync {
    async fn list_resumes(&self, request_id: Uuid) -> Result<Vec<ResumeSummary>, ClientError>;

    async fn upload_resume(
        &self,
        request_id: Uuid,
        file: &AcceptedFile,
    ) -> Result<ResumeDetail, ClientError>;

    async fn get_resume(&self, request_id: Uuid, id: ResumeId)
        -> Result<ResumeDetail, ClientError>;
}

/// FastAPI error body: `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// reqwest-backed implementation. Every request carries its own timeout:
/// uploads use `upload_timeout`, list and detail fetches use `fetch_timeout`.
#[derive(Clone)]
pub struct HttpResumeApi {
    client: Client,
    base_url: String,
    upload_timeout: Duration,
    fetch_timeout: Duration,
    list_limit: u32,
}

impl HttpResumeApi {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let client = Client::builder()
            .build()
            .map_err(ClientError::Transport)?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            upload_timeout: config.upload_timeout,
            fetch_timeout: config.fetch_timeout,
            list_limit: config.list_limit,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_json<T: DeserializeOwned>(
        response: Response,
        timeout: Duration,
    ) -> Result<T, ClientError> {
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::from_reqwest(e, timeout))?;

        if !status.is_success() {
            // Try to parse error detail
            let detail = serde_json::from_slice::<ErrorBody>(&body)
                .map(|e| match e.detail {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                })
                .unwrap_or_else(|_| String::from_utf8_lossy(&body).into_owned());
            return Err(ClientError::Server {
                status: status.as_u16(),
                detail,
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl ResumeApi for HttpResumeApi {
    async fn list_resumes(&self, request_id: Uuid) -> Result<Vec<ResumeSummary>, ClientError> {
        debug!(%request_id, limit = self.list_limit, "GET {RESUMES_PATH}");

        let response = self
            .client
            .get(self.url(RESUMES_PATH))
            .query(&[("skip", 0u32), ("limit", self.list_limit)])
            .timeout(self.fetch_timeout)
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(e, self.fetch_timeout))?;

        let resumes: Vec<ResumeSummary> = Self::read_json(response, self.fetch_timeout).await?;
        debug!(%request_id, count = resumes.len(), "Resume list received");
        Ok(resumes)
    }

    async fn upload_resume(
        &self,
        request_id: Uuid,
        file: &AcceptedFile,
    ) -> Result<ResumeDetail, ClientError> {
        let contents = file.contents().await?;
        let length = contents.len() as u64;

        let part = multipart::Part::stream_with_length(contents, length)
            .file_name(file.name().to_string())
            .mime_str(file.media_type())
            .map_err(ClientError::Transport)?;
        let form = multipart::Form::new().part(UPLOAD_FIELD, part);

        info!(
            %request_id,
            file_name = file.name(),
            size = length,
            "POST {UPLOAD_PATH}"
        );

        let response = self
            .client
            .post(self.url(UPLOAD_PATH))
            .multipart(form)
            .timeout(self.upload_timeout)
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(e, self.upload_timeout))?;

        let detail: ResumeDetail = Self::read_json(response, self.upload_timeout).await?;
        info!(%request_id, resume_id = detail.id, "Upload analysed");
        Ok(detail)
    }

    async fn get_resume(
        &self,
        request_id: Uuid,
        id: ResumeId,
    ) -> Result<ResumeDetail, ClientError> {
        debug!(%request_id, resume_id = id, "GET {RESUMES_PATH}{id}");

        let response = self
            .client
            .get(self.url(&format!("{RESUMES_PATH}{id}")))
            .timeout(self.fetch_timeout)
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(e, self.fetch_timeout))?;

        Self::read_json(response, self.fetch_timeout).await
    }
}
