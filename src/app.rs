use crate::{
    calculator::{CalculatorField, MarginBreakdown},
    config::CalculatorConfig,
    error::AppError,
    models::PricingBenchmark,
    render::{self, DashboardView},
    service::BenchmarkSource,
    tier::{Confirmer, UserTier, UPGRADE_PROMPT},
    view::{DashboardState, View, ViewState},
};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub view: View,
    pub tier: UserTier,
}

/// Single owner of the application state. Every mutation goes through a
/// named transition, and each view change is published on a watch channel.
pub struct Coordinator {
    state: AppState,
    source: Arc<dyn BenchmarkSource>,
    confirmer: Box<dyn Confirmer>,
    calculator_defaults: CalculatorConfig,
    views: watch::Sender<ViewState>,
}

impl Coordinator {
    pub fn new(
        source: Arc<dyn BenchmarkSource>,
        confirmer: Box<dyn Confirmer>,
        calculator_defaults: CalculatorConfig,
    ) -> Self {
        let (views, _) = watch::channel(ViewState::Landing);
        Self {
            state: AppState::default(),
            source,
            confirmer,
            calculator_defaults,
            views,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view_state(&self) -> ViewState {
        self.state.view.state()
    }

    pub fn tier(&self) -> UserTier {
        self.state.tier
    }

    pub fn dashboard(&self) -> Option<&DashboardState> {
        self.state.view.dashboard()
    }

    pub fn benchmark(&self) -> Option<&PricingBenchmark> {
        self.dashboard().map(|d| &d.benchmark)
    }

    /// Receiver notified on every view change
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.views.subscribe()
    }

    /// Landing -> Loading, then Dashboard or back to Landing once the fetch settles.
    ///
    /// The switch to Loading is published before the fetch starts. Fetch
    /// errors and panics are logged and not returned; the only error is
    /// calling this outside Landing.
    pub async fn search(&mut self, service: &str, zip: &str) -> Result<ViewState, AppError> {
        self.state.view.submit()?;
        self.publish();
        info!(service, zip, "Fetching benchmark");

        let source = Arc::clone(&self.source);
        let (service, zip) = (service.to_string(), zip.to_string());
        let task = tokio::spawn(async move { source.load(&service, &zip).await });

        let outcome = match task.await {
            Ok(result) => result,
            Err(e) => Err(AppError::InternalError(format!("fetch task failed: {}", e))),
        };

        match outcome {
            Ok(benchmark) => {
                self.state
                    .view
                    .fetch_succeeded(benchmark, &self.calculator_defaults)?;
            }
            Err(e) => {
                // No user-facing error state; the Landing screen simply comes back
                error!(error = %e, kind = e.kind(), "Benchmark fetch failed");
                self.state.view.fetch_failed()?;
            }
        }

        self.publish();
        Ok(self.view_state())
    }

    /// Return to Landing and drop the stored benchmark. Tier is untouched.
    pub fn reset(&mut self) {
        self.state.view.reset();
        self.publish();
        info!("View reset to landing");
    }

    /// Ask for confirmation and switch to Pro if accepted. Never downgrades.
    pub fn upgrade(&mut self) -> UserTier {
        if self.state.tier.is_pro() {
            return self.state.tier;
        }

        if self.confirmer.confirm(UPGRADE_PROMPT) {
            self.state.tier = UserTier::Pro;
            info!("User upgraded to Pro");
        } else {
            info!("Upgrade declined");
        }
        self.state.tier
    }

    /// Edit one calculator input on the Dashboard and return the new breakdown
    pub fn update_calculator(
        &mut self,
        field: CalculatorField,
        value: f64,
    ) -> Result<MarginBreakdown, AppError> {
        let from = self.view_state();
        let dashboard = self
            .state
            .view
            .dashboard_mut()
            .ok_or(AppError::InvalidTransition {
                from,
                event: "edit the calculator",
            })?;
        dashboard.calculator.set(field, value);
        Ok(dashboard.calculator.breakdown())
    }

    /// Presentation model of the Dashboard for the current tier
    pub fn render(&self) -> Option<DashboardView> {
        self.dashboard()
            .map(|dashboard| render::dashboard(dashboard, self.state.tier))
    }

    fn publish(&self) {
        self.views.send_replace(self.view_state());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::coerce_number;
    use crate::tier::{AlwaysConfirm, AlwaysDecline};
    use async_trait::async_trait;

    struct FixedSource;

    #[async_trait]
    impl BenchmarkSource for FixedSource {
        async fn load(&self, service: &str, zip: &str) -> Result<PricingBenchmark, AppError> {
            Ok(PricingBenchmark::fallback(service, zip))
        }
    }

    struct FailingSource;

    #[async_trait]
    impl BenchmarkSource for FailingSource {
        async fn load(&self, _service: &str, _zip: &str) -> Result<PricingBenchmark, AppError> {
            Err(AppError::InternalError("unexpected rejection".to_string()))
        }
    }

    struct PanickingSource;

    #[async_trait]
    impl BenchmarkSource for PanickingSource {
        async fn load(&self, _service: &str, _zip: &str) -> Result<PricingBenchmark, AppError> {
            panic!("source exploded");
        }
    }

    fn coordinator(source: Arc<dyn BenchmarkSource>, confirmer: Box<dyn Confirmer>) -> Coordinator {
        Coordinator::new(source, confirmer, CalculatorConfig::default())
    }

    #[tokio::test]
    async fn test_search_reaches_dashboard() {
        let mut app = coordinator(Arc::new(FixedSource), Box::new(AlwaysDecline));
        let state = app.search("Landscaping", "90210").await.unwrap();

        assert_eq!(state, ViewState::Dashboard);
        assert_eq!(app.benchmark().unwrap().service_type, "Landscaping");
        assert_eq!(app.dashboard().unwrap().calculator.price, 45.0);
    }

    #[tokio::test]
    async fn test_failed_fetch_returns_to_landing() {
        let mut app = coordinator(Arc::new(FailingSource), Box::new(AlwaysDecline));
        let state = app.search("Landscaping", "90210").await.unwrap();

        assert_eq!(state, ViewState::Landing);
        assert!(app.benchmark().is_none());
    }

    #[tokio::test]
    async fn test_panicking_fetch_returns_to_landing() {
        let mut app = coordinator(Arc::new(PanickingSource), Box::new(AlwaysDecline));
        let state = app.search("Landscaping", "90210").await.unwrap();

        assert_eq!(state, ViewState::Landing);
        assert_eq!(*app.subscribe().borrow(), ViewState::Landing);
    }

    #[tokio::test]
    async fn test_search_outside_landing_is_rejected() {
        let mut app = coordinator(Arc::new(FixedSource), Box::new(AlwaysDecline));
        app.search("Handyman", "10001").await.unwrap();

        let err = app.search("Handyman", "10002").await.unwrap_err();
        assert_eq!(err.kind(), "invalid_transition");
        assert_eq!(app.benchmark().unwrap().zip_code, "10001");
    }

    #[tokio::test]
    async fn test_reset_keeps_tier() {
        let mut app = coordinator(Arc::new(FixedSource), Box::new(AlwaysConfirm));
        app.search("Handyman", "10001").await.unwrap();
        assert_eq!(app.upgrade(), UserTier::Pro);

        for _ in 0..3 {
            app.reset();
            assert_eq!(app.view_state(), ViewState::Landing);
            assert!(app.benchmark().is_none());
            assert_eq!(app.tier(), UserTier::Pro);
        }
    }

    #[test]
    fn test_upgrade_declined_stays_free() {
        let mut app = coordinator(Arc::new(FixedSource), Box::new(AlwaysDecline));
        assert_eq!(app.upgrade(), UserTier::Free);
        assert_eq!(app.tier(), UserTier::Free);
    }

    #[tokio::test]
    async fn test_calculator_edits_and_reseed() {
        let mut app = coordinator(Arc::new(FixedSource), Box::new(AlwaysDecline));
        assert!(app.update_calculator(CalculatorField::Price, 10.0).is_err());

        app.search("Handyman", "10001").await.unwrap();
        let breakdown = app.update_calculator(CalculatorField::Price, 100.0).unwrap();
        assert!((breakdown.margin_percent - 60.0).abs() < 1e-9);
        assert_eq!(app.dashboard().unwrap().calculator.price, 100.0);

        app.reset();
        app.search("Handyman", "10001").await.unwrap();
        assert_eq!(app.dashboard().unwrap().calculator.price, 45.0);
    }

    #[tokio::test]
    async fn test_non_finite_calculator_text_renders_as_zero() {
        let mut app = coordinator(Arc::new(FixedSource), Box::new(AlwaysConfirm));
        app.upgrade();
        app.search("Handyman", "10001").await.unwrap();

        app.update_calculator(CalculatorField::Price, coerce_number("nan"))
            .unwrap();
        app.update_calculator(CalculatorField::LaborCost, coerce_number("inf"))
            .unwrap();
        assert_eq!(app.dashboard().unwrap().calculator.price, 0.0);
        assert_eq!(app.dashboard().unwrap().calculator.labor_cost, 0.0);

        let text = app.render().unwrap().to_string();
        assert!(!text.contains("NaN"));
        assert!(!text.contains("inf"));
        assert!(text.contains("Your Price (USD): 0.00"));
    }

    #[tokio::test]
    async fn test_render_only_on_dashboard() {
        let mut app = coordinator(Arc::new(FixedSource), Box::new(AlwaysDecline));
        assert!(app.render().is_none());
        app.search("Handyman", "10001").await.unwrap();
        assert!(app.render().is_some());
    }
}
