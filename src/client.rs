use crate::config::BackendConfig;
use crate::fallback::FallbackCatalog;
use crate::prediction::Prediction;
use reqwest::{multipart, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::instrument;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("backend unreachable: {0}")]
    Network(#[source] reqwest::Error),
    #[error("request timed out: {0}")]
    Timeout(#[source] reqwest::Error),
    #[error("backend returned status {0}")]
    NonSuccessStatus(StatusCode),
    #[error("malformed response body: {0}")]
    MalformedBody(#[source] reqwest::Error),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(err)
        } else if err.is_decode() {
            ClientError::MalformedBody(err)
        } else if let Some(status) = err.status() {
            ClientError::NonSuccessStatus(status)
        } else {
            ClientError::Network(err)
        }
    }
}

/// Whether a value came from the backend or from the canned catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Live,
    Fallback,
}

/// A value plus its provenance, so callers can tell a real scan from a
/// degraded-mode substitute without this client ever raising an error.
#[derive(Debug, Clone)]
pub struct Sourced<T> {
    pub value: T,
    pub source: DataSource,
}

impl<T> Sourced<T> {
    fn live(value: T) -> Self {
        Self {
            value,
            source: DataSource::Live,
        }
    }

    fn fallback(value: T) -> Self {
        Self {
            value,
            source: DataSource::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == DataSource::Fallback
    }
}

/// Client for the remote inference backend.
///
/// Every operation is a single attempt bounded by its timeout. On any
/// transport failure the operation substitutes a record from the fallback
/// catalog instead of surfacing the error, so the caller always receives a
/// usable value. No state is shared between calls; operations may be issued
/// concurrently.
pub struct PredictionClient {
    http: reqwest::Client,
    base_url: String,
    request_timeout: Duration,
    upload_timeout: Duration,
    catalog: FallbackCatalog,
}

impl PredictionClient {
    pub fn new(backend_config: &BackendConfig) -> Result<Self, ClientError> {
        Self::with_catalog(backend_config, FallbackCatalog::default())
    }

    pub fn with_catalog(
        backend_config: &BackendConfig,
        catalog: FallbackCatalog,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(ClientError::Network)?;

        Ok(Self {
            http,
            base_url: backend_config.get_base_url(),
            request_timeout: backend_config.get_request_timeout(),
            upload_timeout: backend_config.get_upload_timeout(),
            catalog,
        })
    }

    /// Fetch the most recent scan, or the canned healthy scan if the
    /// backend is unreachable.
    #[instrument(skip(self))]
    pub async fn last_inference(&self) -> Sourced<Prediction> {
        match self.fetch_last_inference().await {
            Ok(prediction) => Sourced::live(prediction),
            Err(err) => {
                tracing::warn!("Backend not available, using canned last inference: {}", err);
                Sourced::fallback(self.catalog.last_inference())
            }
        }
    }

    /// Fetch the scan history, most recent first, as delivered by the
    /// backend. No client-side re-sorting is applied.
    #[instrument(skip(self))]
    pub async fn history(&self) -> Sourced<Vec<Prediction>> {
        match self.fetch_history().await {
            Ok(history) => Sourced::live(history),
            Err(err) => {
                tracing::warn!("Backend not available, using canned history: {}", err);
                Sourced::fallback(self.catalog.history())
            }
        }
    }

    /// Submit an image for classification. The payload is forwarded as-is;
    /// format validation is the backend's responsibility.
    #[instrument(skip(self, image_data))]
    pub async fn upload_image(&self, filename: &str, image_data: Vec<u8>) -> Sourced<Prediction> {
        match self.send_upload(filename, image_data).await {
            Ok(prediction) => Sourced::live(prediction),
            Err(err) => {
                tracing::warn!("Backend not available, using canned upload result: {}", err);
                Sourced::fallback(self.catalog.upload(filename))
            }
        }
    }

    /// Request deletion of all history records. Best-effort: a failure is
    /// logged and reported as `Fallback`, never raised, since the caller
    /// updates its own view optimistically either way.
    #[instrument(skip(self))]
    pub async fn clear_history(&self) -> Sourced<()> {
        match self.send_clear_history().await {
            Ok(()) => Sourced::live(()),
            Err(err) => {
                tracing::warn!("Backend not available, clear history skipped: {}", err);
                Sourced::fallback(())
            }
        }
    }

    async fn fetch_last_inference(&self) -> Result<Prediction, ClientError> {
        let response = self
            .http
            .get(format!("{}/last_inference", self.base_url))
            .timeout(self.request_timeout)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    async fn fetch_history(&self) -> Result<Vec<Prediction>, ClientError> {
        let response = self
            .http
            .get(format!("{}/history", self.base_url))
            .timeout(self.request_timeout)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    async fn send_upload(
        &self,
        filename: &str,
        image_data: Vec<u8>,
    ) -> Result<Prediction, ClientError> {
        let part = multipart::Part::bytes(image_data).file_name(filename.to_string());
        let form = multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(format!("{}/upload", self.base_url))
            .multipart(form)
            .timeout(self.upload_timeout)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    async fn send_clear_history(&self) -> Result<(), ClientError> {
        self.http
            .post(format!("{}/clear_history", self.base_url))
            .json(&serde_json::json!({}))
            .timeout(self.request_timeout)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
