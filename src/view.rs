use crate::calculator::CalculatorInputs;
use crate::config::CalculatorConfig;
use crate::error::AppError;
use crate::models::PricingBenchmark;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Landing,
    Loading,
    Dashboard,
}

/// Data owned by the Dashboard screen
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub benchmark: PricingBenchmark,
    pub calculator: CalculatorInputs,
}

/// Landing -> Loading -> Dashboard, cyclic. The Dashboard variant owns its
/// benchmark, so a Dashboard without data cannot be constructed.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum View {
    #[default]
    Landing,
    Loading,
    Dashboard(Box<DashboardState>),
}

impl View {
    pub fn state(&self) -> ViewState {
        match self {
            View::Landing => ViewState::Landing,
            View::Loading => ViewState::Loading,
            View::Dashboard(_) => ViewState::Dashboard,
        }
    }

    pub fn dashboard(&self) -> Option<&DashboardState> {
        match self {
            View::Dashboard(dashboard) => Some(dashboard.as_ref()),
            _ => None,
        }
    }

    pub fn dashboard_mut(&mut self) -> Option<&mut DashboardState> {
        match self {
            View::Dashboard(dashboard) => Some(dashboard.as_mut()),
            _ => None,
        }
    }

    /// Landing -> Loading. Input validity is the caller's job.
    pub fn submit(&mut self) -> Result<(), AppError> {
        self.expect(ViewState::Landing, "submit")?;
        *self = View::Loading;
        Ok(())
    }

    /// Loading -> Dashboard, seeding the calculator from the new benchmark
    pub fn fetch_succeeded(
        &mut self,
        benchmark: PricingBenchmark,
        defaults: &CalculatorConfig,
    ) -> Result<(), AppError> {
        self.expect(ViewState::Loading, "complete a fetch")?;
        let calculator = CalculatorInputs::seeded(&benchmark, defaults);
        *self = View::Dashboard(Box::new(DashboardState {
            benchmark,
            calculator,
        }));
        Ok(())
    }

    /// Loading -> Landing
    pub fn fetch_failed(&mut self) -> Result<(), AppError> {
        self.expect(ViewState::Loading, "fail a fetch")?;
        *self = View::Landing;
        Ok(())
    }

    /// Back to Landing from anywhere, dropping any stored benchmark
    pub fn reset(&mut self) {
        *self = View::Landing;
    }

    fn expect(&self, required: ViewState, event: &'static str) -> Result<(), AppError> {
        let from = self.state();
        if from == required {
            Ok(())
        } else {
            Err(AppError::InvalidTransition { from, event })
        }
    }
}
