//! History note request body

use serde::Serialize;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct HistoryRecord {
    #[validate(length(min = 1, message = "note details cannot be blank"))]
    pub details: String,
}

/// `{"HistoryRecords":[{"Details": "..."}]}`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HistoryRequest {
    pub history_records: Vec<HistoryRecord>,
}

impl HistoryRequest {
    pub fn single(details: impl Into<String>) -> Self {
        Self {
            history_records: vec![HistoryRecord {
                details: details.into(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_shape() {
        let body = serde_json::to_string(&HistoryRequest::single("Called customer")).unwrap();
        assert_eq!(body, r#"{"HistoryRecords":[{"Details":"Called customer"}]}"#);
    }
}
