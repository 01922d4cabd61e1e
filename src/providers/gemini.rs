use crate::{
    config::ProviderConfig,
    error::AppError,
    logging::redact_url,
    models::gemini::{GenerateContentRequest, GenerateContentResponse},
    providers::BenchmarkProvider,
};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Gemini `generateContent` client
pub struct GeminiProvider {
    client: Client,
    config: ProviderConfig,
}

impl GeminiProvider {
    pub fn new(config: ProviderConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: ProviderConfig) -> Self {
        Self { client, config }
    }
}

/// Call Gemini Generate Content API
/// Note: Model name is part of the URL path
pub async fn generate_content(
    client: &Client,
    config: &ProviderConfig,
    request: &GenerateContentRequest,
) -> Result<GenerateContentResponse, AppError> {
    // Gemini API format: /v1beta/models/{model}:generateContent
    let url = format!(
        "{}/models/{}:generateContent",
        config.base_url.trim_end_matches('/'),
        config.model
    );

    let mut builder = client
        .post(&url)
        .header("Content-Type", "application/json");

    if let Some(timeout) = config.timeout_seconds {
        builder = builder.timeout(Duration::from_secs(timeout));
    }

    // An absent key is sent as empty and rejected upstream
    let api_key = config.api_key.as_deref().unwrap_or_default();
    let http_request = builder
        .query(&[("key", api_key)])
        .json(request)
        .build()?;

    debug!(url = %redact_url(http_request.url()), "Sending generateContent request");

    let response = client.execute(http_request).await?;

    // Check for HTTP errors
    if !response.status().is_success() {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(AppError::UpstreamError {
            status,
            message: error_text,
        });
    }

    Ok(response.json().await?)
}

#[async_trait]
impl BenchmarkProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate_json(
        &self,
        prompt: &str,
        schema: serde_json::Value,
    ) -> Result<Option<String>, AppError> {
        let request = GenerateContentRequest::structured(prompt, schema);
        let response = generate_content(&self.client, &self.config, &request).await?;

        if let Some(usage) = &response.usage_metadata {
            debug!(
                model = %self.config.model,
                prompt_tokens = usage.prompt_token_count,
                output_tokens = usage.candidates_token_count,
                "generateContent completed"
            );
        }

        Ok(response.text())
    }
}
