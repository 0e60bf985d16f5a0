//! Declare functions as agent tools and keep them in a queryable catalog.
//!
//! ```ignore
//! use toolbelt::prelude::*;
//!
//! #[tool(app_name = "myapp", tool_name = "process_data")]
//! /// Repeat the input text.
//! fn process_data(input_text: String, #[default(1)] count: usize) -> String {
//!     input_text.repeat(count)
//! }
//!
//! let registry = ToolRegistry::new();
//! registry.install_declared()?;
//! assert!(registry.contains("myapp", "process_data"));
//! ```

pub use toolbelt_tools;

#[cfg(feature = "tracing")]
pub use toolbelt_tracing;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use toolbelt_tools::{
        ParameterType, Tool, ToolCategory, ToolError, ToolExample, ToolFilter, ToolMetadata,
        ToolParameter, ToolRegistry, Toolset, tool, toolset,
    };

    #[cfg(feature = "tracing")]
    pub use toolbelt_tracing::{TracingConfig, TracingFormat};
}
