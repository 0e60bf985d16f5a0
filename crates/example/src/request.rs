//! Request descriptions assembled by the example data sources.

use serde::Serialize;
use serde_json::{Map, Value};

/// HTTP method of an [`ApiRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// Read a resource.
    Get,
    /// Create a resource.
    Post,
    /// Update part of a resource.
    Patch,
}

/// A request a data source would send to its upstream API.
///
/// The example tools only describe the call; nothing is sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// Query string parameters.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub query: Map<String, Value>,
    /// JSON body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Creates a request without query or body.
    pub fn new(method: Method, base_url: &str, path: &str) -> Self {
        Self {
            method,
            url: format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/')),
            query: Map::new(),
            body: None,
        }
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn with_query(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.query.insert(name.to_string(), value.into());
        self
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn url_joins_without_double_slash() {
        let request = ApiRequest::new(Method::Get, "https://desk.example.com/", "/tickets/7");
        assert_eq!(request.url, "https://desk.example.com/tickets/7");
    }

    #[test]
    fn serializes_only_present_parts() {
        let request = ApiRequest::new(Method::Post, "https://desk.example.com", "tickets")
            .with_body(json!({ "subject": "Printer" }));
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "method": "POST",
                "url": "https://desk.example.com/tickets",
                "body": { "subject": "Printer" }
            })
        );
    }
}
