use toolbelt_tools::tool;

/// Describe the receiver.
#[tool(app_name = "myapp", tool_name = "describe")]
fn describe(&self, query: String) -> String {
    query
}

fn main() {}
