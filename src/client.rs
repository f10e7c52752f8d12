use crate::error::{Result, SurveyError};
use crate::models::{EvaluationId, EvaluationSummary, FeedbackPayload, ModelOutput};
use serde::Deserialize;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

/// Outcome of a feedback submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStatus {
    Accepted,
    /// Carries the server's response body or the transport error
    Rejected(String),
}

/// `GET /evaluation/{id}` answers with a list, or a bare object for single-model runs
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<ModelOutput>),
    One(ModelOutput),
}

impl From<OneOrMany> for Vec<ModelOutput> {
    fn from(body: OneOrMany) -> Self {
        match body {
            OneOrMany::Many(outputs) => outputs,
            OneOrMany::One(output) => vec![output],
        }
    }
}

/// Client for the remote evaluation API
pub struct EvaluationClient {
    http: reqwest::Client,
    base_url: String,
}

impl EvaluationClient {
    /// Create a client against `base_url` (no trailing slash)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List evaluations that are currently open for review
    pub async fn list_active_evaluations(&self) -> Result<Vec<EvaluationSummary>> {
        let url = format!("{}/evaluations", self.base_url);
        debug!(%url, "listing active evaluations");

        let request = self.http.get(&url).query(&[("active", "true")]);
        let evaluations: Vec<EvaluationSummary> = self.fetch_json(&url, request).await?;

        debug!(count = evaluations.len(), "received evaluations");
        Ok(evaluations)
    }

    /// Fetch the model outputs of one evaluation, always as a list
    pub async fn get_evaluation(&self, id: &EvaluationId) -> Result<Vec<ModelOutput>> {
        let url = format!("{}/evaluation/{}", self.base_url, id);
        debug!(%url, "fetching evaluation");

        let body: OneOrMany = self.fetch_json(&url, self.http.get(&url)).await?;
        let outputs: Vec<ModelOutput> = body.into();

        debug!(count = outputs.len(), "received model outputs");
        Ok(outputs)
    }

    /// Submit completed feedback; only `200 OK` counts as accepted
    pub async fn submit_feedback(&self, payload: &FeedbackPayload<'_>) -> SubmitStatus {
        let url = format!("{}/submit_feedback", self.base_url);
        debug!(%url, responses = payload.responses.len(), "submitting feedback");

        let response = match self.http.post(&url).json(payload).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "feedback submission failed");
                return SubmitStatus::Rejected(format!("Error while submitting: {}", e));
            }
        };

        let status = response.status();
        if status == StatusCode::OK {
            info!(evaluation_id = %payload.evaluation_id, "feedback accepted");
            return SubmitStatus::Accepted;
        }

        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "feedback rejected");
        SubmitStatus::Rejected(format!("Failed to submit: {}", body))
    }

    /// Send a request and decode a JSON body, classifying each failure
    async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T> {
        let network = |source| SurveyError::Network {
            url: url.to_string(),
            source,
        };

        let response = request.send().await.map_err(network)?;
        let status = response.status();
        let body = response.text().await.map_err(network)?;

        if !status.is_success() {
            return Err(SurveyError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|source| SurveyError::Parse {
            url: url.to_string(),
            source,
        })
    }
}
