use toolbelt_tools::tool;

/// Render any value.
#[tool(app_name = "myapp", tool_name = "show")]
fn show<T: ToString>(value: T) -> String {
    value.to_string()
}

fn main() {}
