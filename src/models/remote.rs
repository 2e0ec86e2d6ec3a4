//! Payloads exchanged with the device's file endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Directory Listing
// =============================================================================

/// Response of `GET /dir`. Order is as supplied by the device.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DirectoryListing {
    /// Regular file names
    #[serde(default)]
    pub files: Vec<String>,
    /// Subdirectory names
    #[serde(default)]
    pub dirs: Vec<String>,
}

// =============================================================================
// Status Objects
// =============================================================================

/// Generic status object returned by mutating endpoints.
///
/// `error` is either a message string or a bare `true`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct StatusReply {
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub saved: Option<bool>,
    /// Bytes written by `/savefileb`
    #[serde(default)]
    pub bytes: Option<u64>,
}

impl StatusReply {
    /// The device-reported error message, if the reply signals failure.
    pub fn error_message(&self) -> Option<String> {
        match self.error.as_ref()? {
            Value::Null | Value::Bool(false) => None,
            Value::String(msg) if msg.is_empty() => None,
            Value::String(msg) => Some(msg.clone()),
            Value::Bool(true) => Some("request failed".to_string()),
            other => Some(other.to_string()),
        }
    }
}

/// Response of `GET /info`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct DeviceInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub hostname: String,
}
