use crate::config::CalculatorConfig;
use crate::models::PricingBenchmark;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculatorInputs {
    pub price: f64,
    pub labor_cost: f64,
    pub supplies_cost: f64,
    /// Percent of price, e.g. 15.0 for 15%
    pub overhead_percent: f64,
}

impl CalculatorInputs {
    /// Starting inputs for a freshly loaded benchmark: price is the median
    pub fn seeded(benchmark: &PricingBenchmark, defaults: &CalculatorConfig) -> Self {
        Self {
            price: benchmark.median,
            labor_cost: defaults.labor_cost,
            supplies_cost: defaults.supplies_cost,
            overhead_percent: defaults.overhead_percent,
        }
    }

    pub fn set(&mut self, field: CalculatorField, value: f64) {
        match field {
            CalculatorField::Price => self.price = value,
            CalculatorField::LaborCost => self.labor_cost = value,
            CalculatorField::SuppliesCost => self.supplies_cost = value,
            CalculatorField::OverheadPercent => self.overhead_percent = value,
        }
    }

    pub fn breakdown(&self) -> MarginBreakdown {
        MarginBreakdown::compute(self)
    }
}

/// Editable calculator input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculatorField {
    Price,
    LaborCost,
    SuppliesCost,
    OverheadPercent,
}

impl FromStr for CalculatorField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "price" => Ok(Self::Price),
            "labor" | "labor_cost" => Ok(Self::LaborCost),
            "supplies" | "supplies_cost" => Ok(Self::SuppliesCost),
            "overhead" | "overhead_percent" => Ok(Self::OverheadPercent),
            other => Err(format!("unknown calculator field '{}'", other)),
        }
    }
}

/// Numeric coercion for form input: blank, unparsable or non-finite text becomes 0
pub fn coerce_number(input: &str) -> f64 {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Derived values for one set of inputs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarginBreakdown {
    pub overhead_cost: f64,
    pub total_cost: f64,
    pub profit: f64,
    /// Unclamped; may be negative, above 100, or non-finite when price is 0
    pub margin_percent: f64,
}

impl MarginBreakdown {
    pub fn compute(inputs: &CalculatorInputs) -> Self {
        let overhead_cost = inputs.price * (inputs.overhead_percent / 100.0);
        let total_cost = inputs.labor_cost + inputs.supplies_cost + overhead_cost;
        let profit = inputs.price - total_cost;
        let margin_percent = (profit / inputs.price) * 100.0;

        Self {
            overhead_cost,
            total_cost,
            profit,
            margin_percent,
        }
    }

    /// Margin as shown to users; non-finite margins read as 0
    pub fn display_margin_percent(&self) -> f64 {
        if self.margin_percent.is_finite() {
            self.margin_percent
        } else {
            0.0
        }
    }

    /// Width of the margin bar in percent, always within 0..=100
    pub fn bar_width(&self) -> f64 {
        self.display_margin_percent().clamp(0.0, 100.0)
    }

    /// Formatted margin, e.g. "60.0%"
    pub fn margin_label(&self) -> String {
        format!("{:.1}%", self.display_margin_percent())
    }

    pub fn band(&self) -> MarginBand {
        let margin = self.display_margin_percent();
        if margin > 20.0 {
            MarginBand::Healthy
        } else if margin > 0.0 {
            MarginBand::Thin
        } else {
            MarginBand::Losing
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarginBand {
    /// Above 20%
    Healthy,
    /// Between 0% and 20%
    Thin,
    /// Zero or negative
    Losing,
}
