//! Thin HTTP client for the Replicate predictions API.
//!
//! - `infer` creates a prediction with `Prefer: wait` and returns its
//!   `output` once it has succeeded.
//! - Predictions still `starting`/`processing` after the wait window are
//!   polled through `urls.get` until they finish or the poll deadline passes.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tokio::time::Instant;

use crate::error::{AppError, AppResult};

/// The hosted inference service, seen as `infer(model_id, inputs) -> output`.
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    async fn infer(&self, model_id: &str, inputs: Value) -> AppResult<Value>;
}

#[derive(Clone)]
pub struct ReplicateClient {
    client: Client,
    base_url: String,
    api_token: String,
    poll_interval: Duration,
    poll_timeout: Duration,
}

impl ReplicateClient {
    pub fn new(base_url: String, api_token: String) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        ReplicateClient {
            client: Client::new(),
            base_url: base,
            api_token,
            poll_interval: Duration::from_secs(1),
            poll_timeout: Duration::from_secs(300),
        }
    }

    pub fn with_polling(mut self, interval: Duration, timeout: Duration) -> Self {
        self.poll_interval = interval;
        self.poll_timeout = timeout;
        self
    }

    /// Endpoint and body for creating a prediction. `owner/name` runs the
    /// model's latest version, `owner/name:version` pins one.
    fn prediction_request(&self, model_id: &str, inputs: Value) -> (String, Value) {
        match model_id.split_once(':') {
            Some((_, version)) => (
                format!("{}/predictions", self.base_url),
                json!({ "version": version, "input": inputs }),
            ),
            None => (
                format!("{}/models/{}/predictions", self.base_url, model_id),
                json!({ "input": inputs }),
            ),
        }
    }

    async fn create_prediction(&self, model_id: &str, inputs: Value) -> AppResult<Value> {
        let (url, body) = self.prediction_request(model_id, inputs);
        tracing::info!("Creating prediction for {} at {}", model_id, url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .header("Prefer", "wait")
            .json(&body)
            .send()
            .await
            .map_err(AppError::HttpClient)?;
        read_prediction(response, "create prediction").await
    }

    async fn get_prediction(&self, url: &str) -> AppResult<Value> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(AppError::HttpClient)?;
        read_prediction(response, "poll prediction").await
    }

    async fn wait_for_prediction(&self, mut prediction: Value) -> AppResult<Value> {
        let started = Instant::now();
        loop {
            match prediction_status(&prediction).as_str() {
                "succeeded" => return Ok(prediction),
                "failed" | "canceled" => {
                    let reason = prediction
                        .get("error")
                        .filter(|e| !e.is_null())
                        .map(|e| e.as_str().map(str::to_string).unwrap_or_else(|| e.to_string()))
                        .unwrap_or_else(|| "no error reported".to_string());
                    return Err(AppError::Provider(format!(
                        "prediction {}: {}",
                        prediction_status(&prediction),
                        reason
                    )));
                }
                "starting" | "processing" => {}
                other => {
                    return Err(AppError::Provider(format!(
                        "unexpected prediction status '{}'",
                        other
                    )))
                }
            }

            if started.elapsed() >= self.poll_timeout {
                return Err(AppError::Provider(format!(
                    "prediction did not finish within {:?}",
                    self.poll_timeout
                )));
            }
            let poll_url = prediction
                .get("urls")
                .and_then(|u| u.get("get"))
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| AppError::Provider("prediction missing poll URL".to_string()))?
                .to_string();
            tokio::time::sleep(self.poll_interval).await;
            tracing::debug!("Polling prediction at {}", poll_url);
            prediction = self.get_prediction(&poll_url).await?;
        }
    }
}

#[async_trait]
impl InferenceProvider for ReplicateClient {
    async fn infer(&self, model_id: &str, inputs: Value) -> AppResult<Value> {
        let prediction = self.create_prediction(model_id, inputs).await?;
        let prediction = self.wait_for_prediction(prediction).await?;
        if let Some(id) = prediction.get("id").and_then(Value::as_str) {
            tracing::info!("Prediction {} succeeded", id);
        }
        Ok(prediction.get("output").cloned().unwrap_or(Value::Null))
    }
}

async fn read_prediction(response: reqwest::Response, action: &str) -> AppResult<Value> {
    let status = response.status();
    if status.is_success() {
        response.json().await.map_err(AppError::HttpClient)
    } else {
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error body".to_string());
        let error_message = format!("Failed to {}. Status: {}, Body: {}", action, status, error_body);
        tracing::error!("{}", error_message);
        Err(AppError::Provider(error_message))
    }
}

fn prediction_status(prediction: &Value) -> String {
    prediction
        .get("status")
        .and_then(Value::as_str)
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default()
}
