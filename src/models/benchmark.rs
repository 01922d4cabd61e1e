use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// Synthesized market pricing record for one (service, ZIP) pair
///
/// Tier values are passed through as the provider returned them. Nothing
/// here enforces `low <= median <= high <= elite`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingBenchmark {
    pub service_type: String,
    pub zip_code: String,
    /// City/state inferred from the ZIP
    pub location_name: String,
    /// Currency code; left absent when the provider omits it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Billing unit, e.g. "hour", "visit", "sq ft"
    pub unit: String,
    pub low: f64,
    pub median: f64,
    pub high: f64,
    /// Top 5-10% of the market
    pub elite: f64,
    pub insights: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competitor_count_estimate: Option<u64>,
}

impl PricingBenchmark {
    /// Fixed record substituted whenever the provider call fails
    pub fn fallback(service: &str, zip: &str) -> Self {
        Self {
            service_type: service.to_string(),
            zip_code: zip.to_string(),
            location_name: "Local Market Area".to_string(),
            currency: Some("USD".to_string()),
            unit: "hour".to_string(),
            low: 25.0,
            median: 45.0,
            high: 75.0,
            elite: 120.0,
            insights: vec![
                "High demand in this area for eco-friendly options.".to_string(),
                "Competitors are bundling services to increase ticket size.".to_string(),
                "Speed of response is the #1 factor for winning bids here.".to_string(),
            ],
            competitor_count_estimate: Some(42),
        }
    }

    /// Price of a single tier
    pub fn price(&self, tier: PriceTier) -> f64 {
        match tier {
            PriceTier::Low => self.low,
            PriceTier::Median => self.median,
            PriceTier::High => self.high,
            PriceTier::Elite => self.elite,
        }
    }
}

/// The four market tiers of a benchmark, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceTier {
    Low,
    Median,
    High,
    Elite,
}

impl PriceTier {
    pub const ALL: [PriceTier; 4] = [
        PriceTier::Low,
        PriceTier::Median,
        PriceTier::High,
        PriceTier::Elite,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PriceTier::Low => "Low",
            PriceTier::Median => "Median",
            PriceTier::High => "High",
            PriceTier::Elite => "Elite",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PriceTier::Low => "Bottom 15%",
            PriceTier::Median => "Market Avg",
            PriceTier::High => "Top Earners",
            PriceTier::Elite => "Luxury",
        }
    }

    /// High and Elite are only shown to Pro users
    pub fn is_premium(self) -> bool {
        matches!(self, PriceTier::High | PriceTier::Elite)
    }
}

/// Provider payload before validation
///
/// Every field is optional so that a missing required field surfaces as
/// [`AppError::MissingField`] instead of a generic parse error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBenchmark {
    pub service_type: Option<String>,
    pub zip_code: Option<String>,
    pub location_name: Option<String>,
    pub currency: Option<String>,
    pub unit: Option<String>,
    pub low: Option<f64>,
    pub median: Option<f64>,
    pub high: Option<f64>,
    pub elite: Option<f64>,
    pub insights: Option<Vec<String>>,
    pub competitor_count_estimate: Option<f64>,
}

impl RawBenchmark {
    /// Parse response text into an unvalidated payload
    pub fn parse(text: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Check the required subset and convert into the typed record
    pub fn validate(self) -> Result<PricingBenchmark, AppError> {
        Ok(PricingBenchmark {
            service_type: required(self.service_type, "serviceType")?,
            zip_code: required(self.zip_code, "zipCode")?,
            location_name: required(self.location_name, "locationName")?,
            currency: self.currency,
            unit: required(self.unit, "unit")?,
            low: required(self.low, "low")?,
            median: required(self.median, "median")?,
            high: required(self.high, "high")?,
            elite: required(self.elite, "elite")?,
            insights: required(self.insights, "insights")?,
            competitor_count_estimate: self
                .competitor_count_estimate
                .filter(|n| n.is_finite() && *n >= 0.0)
                .map(|n| n.round() as u64),
        })
    }
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, AppError> {
    value.ok_or(AppError::MissingField(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_PAYLOAD: &str = r#"{
        "serviceType": "Handyman",
        "zipCode": "10001",
        "locationName": "New York, NY",
        "currency": "USD",
        "unit": "per hour",
        "low": 40,
        "median": 75.5,
        "high": 110,
        "elite": 180,
        "insights": ["a", "b", "c"],
        "competitorCountEstimate": 312
    }"#;

    #[test]
    fn test_validate_full_payload() {
        let benchmark = RawBenchmark::parse(FULL_PAYLOAD).unwrap().validate().unwrap();
        assert_eq!(benchmark.location_name, "New York, NY");
        assert_eq!(benchmark.currency.as_deref(), Some("USD"));
        assert_eq!(benchmark.median, 75.5);
        assert_eq!(benchmark.insights.len(), 3);
        assert_eq!(benchmark.competitor_count_estimate, Some(312));
    }

    #[test]
    fn test_optional_fields_may_be_absent() {
        let payload = r#"{
            "serviceType": "Handyman", "zipCode": "10001", "locationName": "New York, NY",
            "unit": "per visit", "low": 1, "median": 2, "high": 3, "elite": 4, "insights": []
        }"#;
        let benchmark = RawBenchmark::parse(payload).unwrap().validate().unwrap();
        assert_eq!(benchmark.currency, None);
        assert_eq!(benchmark.competitor_count_estimate, None);
        assert!(benchmark.insights.is_empty());
    }

    #[test]
    fn test_missing_required_field() {
        let payload = r#"{
            "serviceType": "Handyman", "zipCode": "10001", "locationName": "New York, NY",
            "unit": "per hour", "low": 1, "high": 3, "elite": 4, "insights": []
        }"#;
        let err = RawBenchmark::parse(payload).unwrap().validate().unwrap_err();
        assert!(matches!(err, AppError::MissingField("median")));
    }

    #[test]
    fn test_wrong_type_is_parse_error() {
        let err = RawBenchmark::parse(r#"{"low": "cheap"}"#).unwrap_err();
        assert!(matches!(err, AppError::InvalidPayload(_)));
    }

    #[test]
    fn test_negative_competitor_count_is_dropped() {
        let payload = r#"{
            "serviceType": "Handyman", "zipCode": "10001", "locationName": "New York, NY",
            "unit": "hour", "low": 1, "median": 2, "high": 3, "elite": 4, "insights": [],
            "competitorCountEstimate": -3
        }"#;
        let benchmark = RawBenchmark::parse(payload).unwrap().validate().unwrap();
        assert_eq!(benchmark.competitor_count_estimate, None);
    }

    #[test]
    fn test_out_of_order_tiers_are_kept() {
        let payload = r#"{
            "serviceType": "Handyman", "zipCode": "10001", "locationName": "New York, NY",
            "unit": "hour", "low": 90, "median": 60, "high": 30, "elite": 10, "insights": ["x"]
        }"#;
        let benchmark = RawBenchmark::parse(payload).unwrap().validate().unwrap();
        assert_eq!(
            PriceTier::ALL.map(|t| benchmark.price(t)),
            [90.0, 60.0, 30.0, 10.0]
        );
    }

    #[test]
    fn test_fallback_record() {
        let fallback = PricingBenchmark::fallback("Landscaping", "90210");
        assert_eq!(fallback.service_type, "Landscaping");
        assert_eq!(fallback.zip_code, "90210");
        assert_eq!(fallback.location_name, "Local Market Area");
        assert_eq!(fallback.unit, "hour");
        assert_eq!((fallback.low, fallback.median, fallback.high, fallback.elite), (25.0, 45.0, 75.0, 120.0));
        assert_eq!(fallback.competitor_count_estimate, Some(42));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(PricingBenchmark::fallback("Handyman", "10001")).unwrap();
        assert_eq!(json["serviceType"], "Handyman");
        assert_eq!(json["competitorCountEstimate"], 42);
        assert_eq!(json["locationName"], "Local Market Area");
    }

    #[test]
    fn test_premium_tiers() {
        let premium: Vec<_> = PriceTier::ALL.into_iter().filter(|t| t.is_premium()).collect();
        assert_eq!(premium, vec![PriceTier::High, PriceTier::Elite]);
    }
}
