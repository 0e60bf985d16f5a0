//! Tool declaration and cataloging for agent integrations.
//!
//! Functions are declared as tools with the `#[tool]` attribute (or the
//! [`tool()`] builder at runtime). A declaration records the function's
//! signature; the parameters are introspected from it and the tool is stored
//! in a [`ToolRegistry`] together with its [`ToolMetadata`]. The function
//! itself is left unchanged.
//!
//! # Quick Start
//!
//! ```ignore
//! use toolbelt_tools::{tool, ToolCategory, ToolRegistry};
//!
//! /// Repeat the input text.
//! #[tool(app_name = "myapp", tool_name = "process_data", category = "document")]
//! fn process_data(input_text: String, #[default(1)] count: usize) -> String {
//!     input_text.repeat(count)
//! }
//!
//! let registry = ToolRegistry::new();
//! registry.install_declared()?;
//!
//! let tool = PROCESS_DATA_TOOL.tool().unwrap();
//! assert_eq!(tool.parameters[1].default, Some(serde_json::json!(1)));
//! assert_eq!(process_data("abc".into(), 3), "abcabcabc");
//! ```
//!
//! # Architecture
//!
//! - [`TypeHint`] / [`classify`]: map a type annotation to a [`ParameterType`]
//! - [`Signature`] / [`introspect`]: derive [`ToolParameter`]s from a callable
//! - [`synthesize`]: build [`Tool`] and [`ToolMetadata`] from a declaration
//! - [`tool()`] / [`ToolSpec`] / [`ToolDeclaration`]: the declaration factory
//! - [`Toolset`]: methods of one type declared together (via `#[toolset]`)
//! - [`ToolRegistry`]: the catalog, keyed by `(app_name, tool_name)`

// Self-reference so `#[tool]`/`#[toolset]` output can use `toolbelt_tools::`
// paths inside this crate.
extern crate self as toolbelt_tools;

pub mod config;
pub mod decorator;
pub mod error;
pub mod param;
pub mod registry;
pub mod signature;
pub mod synthesize;
pub mod tool;
pub mod toolset;

// Re-export core types at crate root.
pub use config::{DuplicatePolicy, RegistryConfig};
pub use decorator::{Decorated, ToolDeclaration, ToolSpec, declared_tools, tool};
pub use error::ToolError;
pub use param::{ParameterType, ToolParameter, TypeHint, TypeHintError, classify};
pub use registry::{CatalogEntry, CatalogSnapshot, RegisteredTool, ToolFilter, ToolRegistry};
pub use signature::{Annotation, DeclaredParam, HintMap, Signature, introspect};
pub use synthesize::synthesize;
pub use tool::{FunctionRef, Tool, ToolCategory, ToolExample, ToolKey, ToolMetadata};
pub use toolset::Toolset;

// Re-export proc macros.
pub use tool_macros::{tool, toolset};

#[doc(hidden)]
pub mod __private {
    pub use crate::decorator::DeclaredTool;
    pub use inventory;
    pub use serde_json;
}
