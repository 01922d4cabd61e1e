pub mod gemini;

pub use gemini::GeminiProvider;

use crate::error::AppError;
use async_trait::async_trait;

/// Upstream generative model that answers a prompt with JSON text.
///
/// Implementations make exactly one attempt per call. Retry, fallback and
/// validation all live above this seam.
#[async_trait]
pub trait BenchmarkProvider: Send + Sync + 'static {
    /// Provider name used in logs (e.g. "gemini")
    fn name(&self) -> &str;

    /// Send `prompt` with a structured-output `schema`.
    ///
    /// Returns `Ok(None)` when the provider answered but produced no text.
    async fn generate_json(
        &self,
        prompt: &str,
        schema: serde_json::Value,
    ) -> Result<Option<String>, AppError>;
}
