use toolbelt_tools::toolset;

struct Cache<T>(Vec<T>);

#[toolset(app_name = "cache")]
impl<T> Cache<T> {
    /// Count the entries.
    #[tool(tool_name = "count")]
    fn count(&self) -> usize {
        self.0.len()
    }
}

fn main() {
    let _ = Cache(vec![1u8]).0;
}
