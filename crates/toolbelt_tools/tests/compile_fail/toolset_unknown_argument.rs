use toolbelt_tools::toolset;

struct Tickets;

#[toolset(app_name = "helpdesk", tool_name = "tickets")]
impl Tickets {
    /// Fetch a ticket.
    #[tool(tool_name = "get_ticket")]
    fn get_ticket(&self, ticket_id: u64) -> u64 {
        ticket_id
    }
}

fn main() {
    let _ = Tickets;
}
