use toolbelt_tools::tool;

/// Read a raw length.
#[tool(app_name = "myapp", tool_name = "raw_len")]
unsafe fn raw_len(bytes: Vec<u8>) -> usize {
    bytes.len()
}

fn main() {}
