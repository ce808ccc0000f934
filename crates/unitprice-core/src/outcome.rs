use serde::{Deserialize, Serialize};

use crate::product::ExtractedProductData;

/// Message used when a successful parse would otherwise carry no data.
pub const NO_PRODUCT_DATA_MESSAGE: &str = "Could not find product information on this page";

/// The uniform result of one product-URL parse, handed to the UI layer.
///
/// Invariants, upheld by the constructors:
/// - `success == true` ⇒ `data` has at least one field and `error` is `None`.
/// - `success == false` ⇒ `data` is empty, `warnings` is empty, and `error` is `Some`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseOutcome {
    pub success: bool,
    pub data: ExtractedProductData,
    pub warnings: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ParseOutcome {
    /// A successful parse. Empty `data` is downgraded to the "could not find"
    /// failure so callers cannot build an outcome that breaks the invariant.
    #[must_use]
    pub fn succeeded(data: ExtractedProductData, warnings: Vec<String>) -> Self {
        if data.is_empty() {
            return Self::failed(NO_PRODUCT_DATA_MESSAGE);
        }
        Self {
            success: true,
            data,
            warnings,
            error: None,
        }
    }

    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: ExtractedProductData::default(),
            warnings: Vec::new(),
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn succeeded_keeps_data_and_warnings() {
        let data = ExtractedProductData {
            roll_count: Some(6),
            ..Default::default()
        };
        let outcome = ParseOutcome::succeeded(data.clone(), vec!["Could not find: price".into()]);
        assert!(outcome.success);
        assert_eq!(outcome.data, data);
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.error.is_none());
    }

    #[test]
    fn succeeded_with_empty_data_becomes_failure() {
        let outcome = ParseOutcome::succeeded(ExtractedProductData::default(), vec![]);
        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some(NO_PRODUCT_DATA_MESSAGE));
    }

    #[test]
    fn failed_has_empty_data_and_error() {
        let outcome = ParseOutcome::failed("Please enter a valid URL");
        assert!(!outcome.success);
        assert!(outcome.data.is_empty());
        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.error.as_deref(), Some("Please enter a valid URL"));
    }

    #[test]
    fn failure_serializes_with_error_field() {
        let json = serde_json::to_value(ParseOutcome::failed("nope")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": false, "data": {}, "warnings": [], "error": "nope"})
        );
    }
}
