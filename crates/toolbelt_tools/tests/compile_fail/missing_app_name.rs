use toolbelt_tools::tool;

/// Look up a key.
#[tool(tool_name = "lookup")]
fn lookup(key: &str) -> usize {
    key.len()
}

fn main() {}
