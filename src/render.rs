use crate::{
    calculator::{CalculatorInputs, MarginBand, MarginBreakdown},
    models::PriceTier,
    tier::{gate_price, Gated, UserTier},
    view::DashboardState,
};
use std::fmt;

const BAR_SLOTS: usize = 20;
const LOCKED_PRICE: &str = "$•••";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub tier: UserTier,
    pub service_type: String,
    pub zip_code: String,
    pub location_name: String,
    pub competitor_count: Option<u64>,
    pub unit: String,
    pub currency: Option<String>,
    pub distribution: Vec<TierRow>,
    pub insights: Vec<String>,
    pub calculator: Gated<CalculatorPanel>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TierRow {
    pub tier: PriceTier,
    pub price: Gated<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculatorPanel {
    pub inputs: CalculatorInputs,
    pub breakdown: MarginBreakdown,
}

/// Build the Dashboard presentation for `tier`
pub fn dashboard(state: &DashboardState, tier: UserTier) -> DashboardView {
    let benchmark = &state.benchmark;

    let distribution = PriceTier::ALL
        .into_iter()
        .map(|price_tier| TierRow {
            tier: price_tier,
            price: gate_price(tier, price_tier, benchmark.price(price_tier)),
        })
        .collect();

    // The whole calculator is premium
    let calculator = Gated::new(
        tier,
        true,
        CalculatorPanel {
            inputs: state.calculator,
            breakdown: state.calculator.breakdown(),
        },
    );

    DashboardView {
        tier,
        service_type: benchmark.service_type.clone(),
        zip_code: benchmark.zip_code.clone(),
        location_name: benchmark.location_name.clone(),
        competitor_count: benchmark.competitor_count_estimate,
        unit: benchmark.unit.clone(),
        currency: benchmark.currency.clone(),
        distribution,
        insights: benchmark.insights.clone(),
        calculator,
    }
}

/// "$45", "$75.5": whole numbers without decimals
pub fn format_price(value: f64) -> String {
    format!("${}", value)
}

fn format_money(value: f64) -> String {
    if value < 0.0 {
        format!("-${:.2}", -value)
    } else {
        format!("${:.2}", value)
    }
}

fn margin_bar(breakdown: &MarginBreakdown) -> String {
    let filled = ((breakdown.bar_width() / 100.0) * BAR_SLOTS as f64).round() as usize;
    format!(
        "[{}{}]",
        "█".repeat(filled),
        "·".repeat(BAR_SLOTS - filled)
    )
}

impl DashboardView {
    fn price_of(&self, tier: PriceTier) -> String {
        self.distribution
            .iter()
            .find(|row| row.tier == tier)
            .and_then(|row| row.price.visible().copied())
            .map(format_price)
            .unwrap_or_else(|| LOCKED_PRICE.to_string())
    }

    fn currency_suffix(&self) -> String {
        match &self.currency {
            Some(code) => format!(" ({})", code),
            None => String::new(),
        }
    }

    fn fmt_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} • {}", self.zip_code, self.location_name)?;
        write!(f, "{} Rates", self.service_type)?;
        if let Some(count) = self.competitor_count {
            write!(f, "    {}+ Local Pros Analyzed", count)?;
        }
        writeln!(f)
    }

    fn fmt_distribution(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Local Price Distribution (unit: {})", self.unit)?;
        for row in &self.distribution {
            match row.price {
                Gated::Visible(price) => writeln!(
                    f,
                    "  {:<7} {:<12} {} /{}",
                    row.tier.label(),
                    row.tier.description(),
                    format_price(price),
                    self.unit
                )?,
                Gated::Locked => writeln!(
                    f,
                    "  {:<7} {:<12} {} Upgrade to see",
                    row.tier.label(),
                    row.tier.description(),
                    LOCKED_PRICE
                )?,
            }
        }
        writeln!(f)?;
        writeln!(
            f,
            "  Low End: {}   Market Median: {}   Top Earners: {}",
            self.price_of(PriceTier::Low),
            self.price_of(PriceTier::Median),
            self.price_of(PriceTier::High)
        )?;
        if !self.tier.is_pro() {
            writeln!(f, "  -> Unlock top earner data (type `upgrade`)")?;
        }
        Ok(())
    }

    fn fmt_insights(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Market Insights")?;
        for insight in &self.insights {
            writeln!(f, "  • {}", insight)?;
        }
        Ok(())
    }

    fn fmt_calculator(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Margin Calculator (profit per {})", self.unit)?;
        let panel = match &self.calculator {
            Gated::Visible(panel) => panel,
            Gated::Locked => {
                writeln!(f, "  [locked] Stop losing money.")?;
                writeln!(
                    f,
                    "  Unlock the calculator to see exactly how much profit you keep from every job."
                )?;
                return writeln!(f, "  -> Unlock Calculator (type `upgrade`)");
            }
        };

        let currency = self.currency_suffix();
        let inputs = &panel.inputs;
        let breakdown = &panel.breakdown;
        writeln!(f, "  Your Price{}: {:.2}", currency, inputs.price)?;
        writeln!(f, "  Labor Cost{}: {:.2}", currency, inputs.labor_cost)?;
        writeln!(f, "  Supplies{}: {:.2}", currency, inputs.supplies_cost)?;
        writeln!(f, "  Overhead (%): {}", inputs.overhead_percent)?;
        writeln!(f)?;
        writeln!(f, "  Revenue      {}", format_money(inputs.price))?;
        writeln!(f, "  Total Costs  -{}", format_money(breakdown.total_cost))?;
        writeln!(f, "  Net Profit   {}", format_money(breakdown.profit))?;
        let band = match breakdown.band() {
            MarginBand::Healthy => "healthy",
            MarginBand::Thin => "thin",
            MarginBand::Losing => "losing money",
        };
        writeln!(
            f,
            "  Margin {} {} ({})",
            margin_bar(breakdown),
            breakdown.margin_label(),
            band
        )
    }

    fn fmt_footer(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tier.is_pro() {
            writeln!(f, "Pro Access Active")?;
            writeln!(
                f,
                "  You have full visibility into {} pricing. Use the calculator to ensure you maintain a 30%+ profit margin.",
                self.zip_code
            )?;
        } else {
            writeln!(f, "Don't leave money on the table.")?;
            writeln!(
                f,
                "  Service pros who price correctly earn $12k more per year on average. Unlock full benchmarks now."
            )?;
            writeln!(f, "  -> Unlock Full Report (type `upgrade`)")?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "Note: Prices are estimated based on aggregated public data and local economic factors. Always verify with specific job requirements."
        )
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_header(f)?;
        writeln!(f)?;
        self.fmt_distribution(f)?;
        writeln!(f)?;
        self.fmt_insights(f)?;
        writeln!(f)?;
        self.fmt_calculator(f)?;
        writeln!(f)?;
        self.fmt_footer(f)
    }
}
