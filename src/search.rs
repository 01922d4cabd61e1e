pub const PRESET_SERVICES: [&str; 6] = [
    "House Cleaning",
    "Landscaping",
    "Handyman",
    "Pressure Washing",
    "Window Cleaning",
    "Mobile Detailing",
];

pub const ZIP_LENGTH: usize = 5;

/// Keep digits only, at most five of them
pub fn sanitize_zip(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_digit)
        .take(ZIP_LENGTH)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchForm {
    service: String,
    zip: String,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self {
            service: PRESET_SERVICES[0].to_string(),
            zip: String::new(),
        }
    }
}

impl SearchForm {
    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn zip(&self) -> &str {
        &self.zip
    }

    /// Accepts a preset number (1-based) or free text
    pub fn set_service(&mut self, input: &str) {
        let input = input.trim();
        self.service = match input.parse::<usize>() {
            Ok(n) if (1..=PRESET_SERVICES.len()).contains(&n) => PRESET_SERVICES[n - 1].to_string(),
            _ => input.to_string(),
        };
    }

    pub fn set_zip(&mut self, input: &str) {
        self.zip = sanitize_zip(input);
    }

    /// Submission guard: service set and a full ZIP
    pub fn can_submit(&self) -> bool {
        !self.service.is_empty() && self.zip.len() >= ZIP_LENGTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_zip() {
        assert_eq!(sanitize_zip("90210"), "90210");
        assert_eq!(sanitize_zip("9a0-2 10"), "90210");
        assert_eq!(sanitize_zip("123456789"), "12345");
        assert_eq!(sanitize_zip("abc"), "");
    }

    #[test]
    fn test_default_form() {
        let form = SearchForm::default();
        assert_eq!(form.service(), "House Cleaning");
        assert!(!form.can_submit());
    }

    #[test]
    fn test_submit_guard() {
        let mut form = SearchForm::default();
        form.set_zip("9021");
        assert!(!form.can_submit());
        form.set_zip("90210");
        assert!(form.can_submit());
        form.set_service("   ");
        assert!(!form.can_submit());
    }

    #[test]
    fn test_set_service_by_preset_number() {
        let mut form = SearchForm::default();
        form.set_service("2");
        assert_eq!(form.service(), "Landscaping");
        form.set_service("7");
        assert_eq!(form.service(), "7");
        form.set_service(" Pool Cleaning ");
        assert_eq!(form.service(), "Pool Cleaning");
    }
}
