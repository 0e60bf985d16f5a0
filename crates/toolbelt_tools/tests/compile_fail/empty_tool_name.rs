use toolbelt_tools::tool;

/// Look up a key.
#[tool(app_name = "myapp", tool_name = "  ")]
fn lookup(key: &str) -> usize {
    key.len()
}

fn main() {}
