//! Dispatch results.

use serde::{Deserialize, Serialize};

use crate::executor::HttpCallSpec;
use crate::transport::HttpMethod;

/// Key under which debug metadata appears in the output JSON.
pub const DEBUG_KEY: &str = "_debug";

/// Description of the outgoing request, for troubleshooting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDebug {
    /// HTTP method.
    pub method: HttpMethod,
    /// Request path, identifiers embedded.
    pub path: String,
    /// Request body, when one was sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

impl RequestDebug {
    /// Captures the metadata of a call before it is executed.
    #[must_use]
    pub fn from_call(call: &HttpCallSpec) -> Self {
        Self {
            method: call.method,
            path: call.path.clone(),
            body: call.body.clone(),
        }
    }

    fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        map.insert("method".to_string(), serde_json::json!(self.method.as_str()));
        map.insert("path".to_string(), serde_json::json!(self.path));
        if let Some(ref body) = self.body {
            map.insert("body".to_string(), body.clone());
        }
        serde_json::Value::Object(map)
    }
}

/// A successful dispatch: the untouched API response plus optional metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchResponse {
    /// The API response as returned by the service.
    pub data: serde_json::Value,
    /// Request metadata, present when debugging is enabled.
    pub debug: Option<RequestDebug>,
}

impl DispatchResponse {
    /// Wraps an API response without metadata.
    #[must_use]
    pub const fn new(data: serde_json::Value) -> Self {
        Self { data, debug: None }
    }

    /// The neutral result for an unmatched (resource, operation) pair.
    #[must_use]
    pub fn no_operation() -> Self {
        Self::new(serde_json::json!({
            "success": false,
            "message": "No operation executed",
        }))
    }

    /// Renders the output JSON.
    ///
    /// Without metadata this is the API response itself. With metadata an
    /// object response gains a `_debug` key. Any other response, or an object
    /// that already has its own `_debug` key, is nested under `data` next to
    /// `_debug`.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let Some(ref debug) = self.debug else {
            return self.data.clone();
        };

        match &self.data {
            serde_json::Value::Object(map) if !map.contains_key(DEBUG_KEY) => {
                let mut out = map.clone();
                out.insert(DEBUG_KEY.to_string(), debug.to_json());
                serde_json::Value::Object(out)
            }
            other => {
                let mut out = serde_json::Map::new();
                out.insert("data".to_string(), other.clone());
                out.insert(DEBUG_KEY.to_string(), debug.to_json());
                serde_json::Value::Object(out)
            }
        }
    }
}
