use async_trait::async_trait;
use reqwest::Client;
use std::time::Instant;

use crate::core::completion::{ChatCompletion, ChatCompletions, ChatRequest};
use crate::core::error::ClassifyError;
use crate::infra::config::LlmConfig;
use crate::infra::http::headers::{add_standard_headers, generate_request_id};
use crate::infra::runtime::limits::{make_http_client, make_http_client_with};

/// Longest upstream error body kept in an error message.
const ERROR_BODY_LIMIT: usize = 512;

#[derive(Clone)]
pub struct OpenAiClient {
    base: String,
    api_key: String,
    http: Client,
}

impl OpenAiClient {
    pub fn new(base: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            api_key: api_key.into(),
            http: make_http_client(),
        }
    }

    pub fn from_config(cfg: &LlmConfig) -> anyhow::Result<Self> {
        Ok(Self {
            base: cfg.base_url.clone(),
            api_key: cfg.api_key.clone().unwrap_or_default(),
            http: make_http_client_with(cfg)?,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChatCompletions for OpenAiClient {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletion, ClassifyError> {
        let url = self.endpoint();
        let req_id = generate_request_id();
        tracing::debug!(endpoint = %url, model = %request.model, request_id = %req_id, "chat completion request");

        let start = Instant::now();
        let res = self.send(&url, request, req_id).await;
        match &res {
            Ok(_) => {
                let elapsed_ms = start.elapsed().as_millis() as f64;
                crate::infra::logging::log_metric("classify", "remote_latency_ms", elapsed_ms);
            }
            Err(e) => {
                tracing::warn!(error = %e, "chat completion failed");
                crate::infra::logging::log_metric("classify", "remote_error_total", 1.0);
            }
        }
        res
    }
}

impl OpenAiClient {
    async fn send(
        &self,
        url: &str,
        request: &ChatRequest,
        req_id: String,
    ) -> Result<ChatCompletion, ClassifyError> {
        let (builder, _rid) = add_standard_headers(self.http.post(url), Some(req_id));
        let resp = builder
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let mut body = resp.text().await.unwrap_or_default();
            if body.len() > ERROR_BODY_LIMIT {
                let mut cut = ERROR_BODY_LIMIT;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            return Err(ClassifyError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }
        let bytes = resp.bytes().await?;
        serde_json::from_slice::<ChatCompletion>(&bytes)
            .map_err(|e| ClassifyError::UpstreamBody(e.to_string()))
    }
}
