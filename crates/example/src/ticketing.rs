//! Service desk data source.

use crate::request::{ApiRequest, Method};
use serde_json::{Value, json};
use std::collections::HashMap;
use toolbelt_tools::toolset;

/// Client for a service desk REST API.
#[derive(Debug, Clone)]
pub struct TicketingApi {
    base_url: String,
}

impl TicketingApi {
    /// Creates a client for the API at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[toolset(app_name = "helpdesk", category = "ticketing", tags = ["helpdesk"])]
impl TicketingApi {
    /// Fetch a ticket with its status, assignee and latest comments.
    #[tool(tool_name = "get_ticket", essential = true, tags = ["read"])]
    pub fn get_ticket(&self, ticket_id: u64) -> ApiRequest {
        ApiRequest::new(Method::Get, &self.base_url, &format!("tickets/{ticket_id}"))
    }

    /// Search tickets by free text.
    #[tool(
        tool_name = "search_tickets",
        returns = "Matching tickets, newest first.",
        tags = ["read"]
    )]
    pub fn search_tickets(
        &self,
        query: &str,
        #[default(["open", "pending"])] statuses: Vec<String>,
        #[default(25)] limit: u32,
    ) -> ApiRequest {
        ApiRequest::new(Method::Get, &self.base_url, "tickets/search")
            .with_query("q", query)
            .with_query("status", statuses.join(","))
            .with_query("per_page", limit)
    }

    /// Open a new ticket.
    #[tool(tool_name = "create_ticket", tags = ["write"])]
    pub fn create_ticket(
        &self,
        subject: &str,
        body: &str,
        #[default(null)] priority: Option<String>,
        #[default({})] custom_fields: HashMap<String, Value>,
    ) -> ApiRequest {
        ApiRequest::new(Method::Post, &self.base_url, "tickets").with_body(json!({
            "subject": subject,
            "comment": { "body": body },
            "priority": priority.unwrap_or_else(|| "normal".to_string()),
            "custom_fields": custom_fields,
        }))
    }

    /// Add a comment to a ticket.
    #[tool(tool_name = "add_comment", tags = ["write"])]
    pub fn add_comment(
        &self,
        ticket_id: u64,
        body: &str,
        #[default(false)] internal: bool,
    ) -> ApiRequest {
        ApiRequest::new(Method::Patch, &self.base_url, &format!("tickets/{ticket_id}"))
            .with_body(json!({ "comment": { "body": body, "public": !internal } }))
    }
}
