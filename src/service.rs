use crate::{
    error::AppError,
    models::{PricingBenchmark, RawBenchmark},
    prompt,
    providers::BenchmarkProvider,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Anything the coordinator can pull a benchmark from
#[async_trait]
pub trait BenchmarkSource: Send + Sync + 'static {
    async fn load(&self, service: &str, zip: &str) -> Result<PricingBenchmark, AppError>;
}

/// One request per fetch, no retries. Any failure on the way is logged and
/// replaced by [`PricingBenchmark::fallback`].
pub struct BenchmarkService {
    provider: Arc<dyn BenchmarkProvider>,
}

impl BenchmarkService {
    pub fn new(provider: Arc<dyn BenchmarkProvider>) -> Self {
        Self { provider }
    }

    /// Fetch a benchmark, substituting the fallback record on any failure
    #[instrument(skip(self), fields(provider = self.provider.name()))]
    pub async fn fetch(&self, service: &str, zip: &str) -> PricingBenchmark {
        match self.try_fetch(service, zip).await {
            Ok(benchmark) => {
                info!(location = %benchmark.location_name, "Benchmark received");
                benchmark
            }
            Err(e) => {
                warn!(error = %e, kind = e.kind(), "Error fetching benchmark, using fallback data");
                PricingBenchmark::fallback(service, zip)
            }
        }
    }

    /// Single attempt without fallback
    pub async fn try_fetch(&self, service: &str, zip: &str) -> Result<PricingBenchmark, AppError> {
        let prompt = prompt::build_prompt(service, zip);
        let text = self
            .provider
            .generate_json(&prompt, prompt::response_schema())
            .await?
            .filter(|t| !t.trim().is_empty())
            .ok_or(AppError::EmptyResponse)?;

        RawBenchmark::parse(&text)?.validate()
    }
}

#[async_trait]
impl BenchmarkSource for BenchmarkService {
    async fn load(&self, service: &str, zip: &str) -> Result<PricingBenchmark, AppError> {
        Ok(self.fetch(service, zip).await)
    }
}
