use anyhow::{Context, Result};
use futures_util::{Stream, StreamExt};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::future::Future;
use std::time::Duration;
use tokio::runtime::Runtime;

use super::TranslationBackend;
use super::prompt::build_system_prompt;
use super::sse_parser::sse_to_text_stream;
use crate::error::BackendError;

#[derive(Debug, Clone)]
pub struct TranslationRequest {
    pub source_text: String,
    pub source_language: String,
    pub target_language: String,
    pub model: String,
}

// Use Cow to avoid cloning strings that are only borrowed for serialization
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Cow<'a, str>,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}

/// Drops embedding-only models, which cannot translate.
pub fn filter_translation_models(ids: impl IntoIterator<Item = String>) -> Vec<String> {
    ids.into_iter()
        .filter(|id| !id.to_lowercase().contains("embed"))
        .collect()
}

/// Client for OpenAI-compatible chat completion endpoints.
///
/// The HTTP layer is async; each call is driven to completion on a private
/// current-thread runtime under `timeout`, which is what makes the
/// [`TranslationBackend`] impl synchronous.
pub struct TranslationClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    timeout: Duration,
    runtime: Runtime,
}

impl TranslationClient {
    pub fn new(endpoint: String, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to start the HTTP runtime")?;

        Ok(Self {
            client: Client::new(),
            endpoint,
            api_key,
            timeout,
            runtime,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.endpoint.trim_end_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(api_key) => request.header("Authorization", format!("Bearer {api_key}")),
            None => request,
        }
    }

    async fn send(
        &self,
        url: &str,
        request: RequestBuilder,
    ) -> Result<reqwest::Response, BackendError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| BackendError::Connect {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status,
                body: body.trim().to_string(),
            });
        }

        Ok(response)
    }

    pub async fn translate_stream(
        &self,
        request: &TranslationRequest,
    ) -> Result<impl Stream<Item = Result<String, BackendError>> + Send, BackendError> {
        let url = self.url("/v1/chat/completions");

        let system_prompt =
            build_system_prompt(&request.source_language, &request.target_language);

        let chat_request = ChatCompletionRequest {
            model: &request.model,
            messages: vec![
                Message {
                    role: "system",
                    content: Cow::Owned(system_prompt),
                },
                Message {
                    role: "user",
                    content: Cow::Borrowed(&request.source_text),
                },
            ],
            stream: true,
        };

        let response = self
            .send(&url, self.client.post(&url).json(&chat_request))
            .await?;

        Ok(sse_to_text_stream(response.bytes_stream()))
    }

    async fn collect_translation(
        &self,
        request: &TranslationRequest,
    ) -> Result<String, BackendError> {
        let stream = self.translate_stream(request).await?;
        let mut stream = std::pin::pin!(stream);
        let mut translated = String::new();

        while let Some(chunk) = stream.next().await {
            translated.push_str(&chunk?);
        }

        let translated = translated.trim();
        if translated.is_empty() {
            return Err(BackendError::Decode(
                "backend returned an empty translation".to_string(),
            ));
        }
        Ok(translated.to_string())
    }

    async fn fetch_models(&self) -> Result<Vec<String>, BackendError> {
        let url = self.url("/v1/models");
        let response = self.send(&url, self.client.get(&url)).await?;

        let list: ModelList = response
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;

        Ok(filter_translation_models(list.data.into_iter().map(|m| m.id)))
    }

    fn block_on<T>(
        &self,
        future: impl Future<Output = Result<T, BackendError>>,
    ) -> Result<T, BackendError> {
        self.runtime.block_on(async {
            tokio::time::timeout(self.timeout, future)
                .await
                .map_err(|_| BackendError::Timeout(self.timeout))?
        })
    }
}

impl TranslationBackend for TranslationClient {
    fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
        model: &str,
    ) -> Result<String, BackendError> {
        let request = TranslationRequest {
            source_text: text.to_string(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
            model: model.to_string(),
        };
        tracing::debug!(model, chars = text.len(), "requesting translation");
        self.block_on(self.collect_translation(&request))
    }

    fn list_models(&self) -> Result<Vec<String>, BackendError> {
        self.block_on(self.fetch_models())
    }
}
