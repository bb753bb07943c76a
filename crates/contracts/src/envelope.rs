//! Response envelope of the exported JSON documents.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    #[error("response is marked unsuccessful")]
    Rejected,
    #[error("response payload is missing")]
    MissingData,
}

/// Every dataset ships as `{ "success": bool, "data": [...] }`. Anything
/// else is a hard load failure, never silently treated as empty.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<Vec<T>>,
}

impl<T> ApiEnvelope<T> {
    pub fn into_data(self) -> Result<Vec<T>, EnvelopeError> {
        if !self.success {
            return Err(EnvelopeError::Rejected);
        }
        self.data.ok_or(EnvelopeError::MissingData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwraps_successful_envelope() {
        let envelope: ApiEnvelope<String> =
            serde_json::from_str(r#"{"success": true, "data": ["a", "b"]}"#).unwrap();
        assert_eq!(envelope.into_data().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn rejects_unsuccessful_envelope() {
        let envelope: ApiEnvelope<String> =
            serde_json::from_str(r#"{"success": false, "data": []}"#).unwrap();
        assert_eq!(envelope.into_data().unwrap_err(), EnvelopeError::Rejected);
    }

    #[test]
    fn rejects_missing_payload() {
        let envelope: ApiEnvelope<String> = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert_eq!(envelope.into_data().unwrap_err(), EnvelopeError::MissingData);
    }
}
