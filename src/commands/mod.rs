//! Command implementations for the CLI
//!
//! - session: interactive Landing / Loading / Dashboard loop
//! - benchmark: fetch and print a single benchmark
//! - test: validate configuration

pub mod benchmark;
pub mod session;
pub mod test;

use anyhow::Result;
use pricepoint::{
    app::Coordinator,
    config::{self, Config},
    init_tracing,
    logging::describe_api_key,
    providers::GeminiProvider,
    service::BenchmarkService,
    tier::Confirmer,
};
use std::{path::Path, sync::Arc};
use tracing::info;

/// Load configuration and start logging
pub fn bootstrap(path: &Path) -> Result<Config> {
    let cfg = config::load_config(path)?;
    init_tracing(&cfg.logging);
    info!(
        config = %path.display(),
        model = %cfg.provider.model,
        api_key = %describe_api_key(cfg.provider.api_key.as_deref()),
        "Configuration loaded"
    );
    Ok(cfg)
}

/// Wire the Gemini provider, fetch service and coordinator together
pub fn build_coordinator(cfg: &Config, confirmer: Box<dyn Confirmer>) -> Coordinator {
    let provider = Arc::new(GeminiProvider::new(cfg.provider.clone()));
    let service = Arc::new(BenchmarkService::new(provider));
    Coordinator::new(service, confirmer, cfg.calculator.clone())
}
