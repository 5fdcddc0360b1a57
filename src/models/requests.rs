//! Request DTOs for the log service API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

fn default_from_power_on() -> bool {
    true
}

/// Request body for the series operation (POST /series)
#[derive(Debug, Clone, Deserialize)]
pub struct SeriesRequest {
    /// Log file name within the configured log directory
    pub file: String,
    /// Fields to plot
    pub fields: Vec<String>,
    /// Min-max normalize each field ("Normalized" vs "Raw" in the UI)
    #[serde(default)]
    pub normalized: bool,
    /// Trim rows before the power supply first reports forward power
    #[serde(default = "default_from_power_on")]
    pub from_power_on: bool,
}

impl SeriesRequest {
    /// Validates the request, returning an error message if invalid.
    pub fn validate(&self) -> Option<String> {
        if self.file.is_empty() {
            return Some("File name cannot be empty".to_string());
        }
        if self.fields.is_empty() {
            return Some("At least one field must be selected".to_string());
        }
        validate_file_name(&self.file)
    }
}

/// Rejects file names that could escape the log directory.
pub fn validate_file_name(name: &str) -> Option<String> {
    if name.contains('/') || name.contains('\\') || name.contains("..") {
        return Some("File name must not contain path separators".to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> SeriesRequest {
        SeriesRequest {
            file: "run_log.csv".to_string(),
            fields: vec!["Temperature".to_string()],
            normalized: false,
            from_power_on: true,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate().is_none());
    }

    #[test]
    fn test_empty_file_rejected() {
        let mut req = valid_request();
        req.file = String::new();
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_empty_fields_rejected() {
        let mut req = valid_request();
        req.fields.clear();
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_path_traversal_rejected() {
        for name in ["../etc/passwd", "a/b_log.csv", "a\\b_log.csv"] {
            let mut req = valid_request();
            req.file = name.to_string();
            assert!(req.validate().is_some(), "{name} should be rejected");
        }
    }

    #[test]
    fn test_defaults_match_dashboard() {
        let req: SeriesRequest =
            serde_json::from_str(r#"{"file":"run_log.csv","fields":["Temperature"]}"#).unwrap();
        assert!(!req.normalized);
        assert!(req.from_power_on);
    }
}
