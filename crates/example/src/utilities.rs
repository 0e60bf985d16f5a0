//! Standalone helper tools that need no upstream service.

use toolbelt_tools::{ToolDeclaration, tool};

/// Declarations of the helpers in this module.
pub static DECLARATIONS: [&ToolDeclaration; 2] = [&FORMAT_DURATION_TOOL, &SLUGIFY_TOOL];

/// Format a duration in seconds as `1h 2m 3s`.
#[tool(
    app_name = "toolbelt",
    tool_name = "format_duration",
    essential = true,
    requires_auth = false
)]
pub fn format_duration(seconds: u64) -> String {
    let (hours, rest) = (seconds / 3600, seconds % 3600);
    let (minutes, seconds) = (rest / 60, rest % 60);
    match (hours, minutes) {
        (0, 0) => format!("{seconds}s"),
        (0, _) => format!("{minutes}m {seconds}s"),
        _ => format!("{hours}h {minutes}m {seconds}s"),
    }
}

/// Turn a title into a URL slug.
#[tool(
    app_name = "toolbelt",
    tool_name = "slugify",
    requires_auth = false,
    category = "document",
    tags = ["text"]
)]
pub fn slugify(text: &str, #[default("-")] separator: String) -> String {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(&separator)
}
