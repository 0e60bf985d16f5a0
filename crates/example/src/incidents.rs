//! On-call incident data source.

use crate::request::{ApiRequest, Method};
use serde_json::json;
use toolbelt_tools::toolset;

/// Client for an incident response API.
#[derive(Debug, Clone)]
pub struct IncidentApi {
    base_url: String,
    service_id: String,
}

impl IncidentApi {
    /// Creates a client scoped to one service.
    pub fn new(base_url: impl Into<String>, service_id: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            service_id: service_id.into(),
        }
    }
}

#[toolset(app_name = "oncall", category = "communication")]
impl IncidentApi {
    /// List incidents of the service.
    #[tool(tool_name = "list_incidents", category = "analytics", tags = ["read"])]
    pub fn list_incidents(
        &self,
        #[default(["triggered", "acknowledged"])] statuses: Vec<String>,
        #[default(null)] since: Option<String>,
    ) -> ApiRequest {
        let mut request = ApiRequest::new(Method::Get, &self.base_url, "incidents")
            .with_query("service_ids[]", self.service_id.as_str())
            .with_query("statuses[]", statuses);
        if let Some(since) = since {
            request = request.with_query("since", since);
        }
        request
    }

    /// Page the on-call responder.
    #[tool(
        tool_name = "page_responder",
        essential = true,
        description = "Trigger an incident that pages whoever is on call.",
        tags = ["write"]
    )]
    pub fn page_responder(&self, title: &str, #[default("high")] urgency: String) -> ApiRequest {
        ApiRequest::new(Method::Post, &self.base_url, "incidents").with_body(json!({
            "incident": {
                "title": title,
                "urgency": urgency,
                "service": { "id": self.service_id },
            }
        }))
    }

    /// Acknowledge an incident.
    #[tool(tool_name = "acknowledge", tags = ["write"])]
    pub fn acknowledge(&self, incident_id: &str) -> ApiRequest {
        ApiRequest::new(Method::Patch, &self.base_url, &format!("incidents/{incident_id}"))
            .with_body(json!({ "incident": { "status": "acknowledged" } }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolbelt_tools::{ToolCategory, ToolRegistry};

    #[test]
    fn list_incidents_adds_optional_filter() {
        let api = IncidentApi::new("https://oncall.example.com", "PX1");
        let request = api.list_incidents(vec!["triggered".into()], Some("2026-01-01".into()));
        assert_eq!(request.query["since"], "2026-01-01");
        assert_eq!(request.query["service_ids[]"], "PX1");
    }

    #[test]
    fn explicit_description_overrides_doc() {
        let registry = ToolRegistry::new();
        registry.install_toolset::<IncidentApi>().unwrap();

        let page = registry.get("oncall", "page_responder").unwrap();
        assert_eq!(
            page.tool.description,
            "Trigger an incident that pages whoever is on call."
        );
        assert_eq!(page.metadata.category, ToolCategory::Communication);
        assert_eq!(
            page.tool.parameter("urgency").unwrap().default,
            Some(serde_json::json!("high"))
        );

        let list = registry.get("oncall", "list_incidents").unwrap();
        assert_eq!(list.metadata.category, ToolCategory::Analytics);
    }
}
