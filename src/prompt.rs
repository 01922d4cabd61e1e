use serde_json::{json, Value};

/// Fields the provider must always return
pub const REQUIRED_FIELDS: [&str; 9] = [
    "serviceType",
    "zipCode",
    "locationName",
    "low",
    "median",
    "high",
    "elite",
    "unit",
    "insights",
];

/// Build the analyst instruction for one (service, ZIP) pair.
///
/// Both values are embedded verbatim; callers validate them beforehand.
pub fn build_prompt(service: &str, zip: &str) -> String {
    format!(
        r#"Act as a professional pricing analyst and market researcher for local service businesses.
Provide estimated market pricing data for the service: "{service}" in the US ZIP code: "{zip}".

Determine the location name (City, State) from the ZIP.
Estimate pricing based on current economic conditions and typical local rates for this specific area (wealthy areas should have higher rates).

Return estimates for:
- Low (Bottom 15% of market, usually unlicensed or new)
- Median (Market average)
- High (Established professionals)
- Elite (Top 5-10%, luxury/specialized)

Also provide 3 short, punchy strategic insights about pricing in this specific market/industry.

The unit should be the most standard billing unit for this service (e.g., "per hour", "per visit", "per sq ft"). If unsure, default to "per hour".
"#
    )
}

/// Response schema in Gemini's OpenAPI subset
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "serviceType": { "type": "STRING" },
            "zipCode": { "type": "STRING" },
            "locationName": { "type": "STRING" },
            "currency": { "type": "STRING" },
            "unit": { "type": "STRING" },
            "low": { "type": "NUMBER" },
            "median": { "type": "NUMBER" },
            "high": { "type": "NUMBER" },
            "elite": { "type": "NUMBER" },
            "insights": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            },
            "competitorCountEstimate": { "type": "NUMBER" }
        },
        "required": REQUIRED_FIELDS,
    })
}
