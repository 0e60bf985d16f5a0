//! Example tool catalog built with Toolbelt.
//!
//! Two API clients declare their endpoints as tools with `#[toolset]`, and a
//! few helpers are declared with `#[tool]`. [`build_catalog`] installs every
//! declaration linked into the binary; the `catalog` binary prints the
//! resulting catalog or the tool set an agent session would load.
//!
//! # Architecture
//!
//! ```text
//! #[tool] / #[toolset] ──▶ inventory ──▶ install_declared ──▶ ToolRegistry
//!                                                              │
//!                          ToolFilter (--app, --category) ──▶ active_set
//! ```

pub mod incidents;
pub mod request;
pub mod ticketing;
pub mod utilities;

pub use incidents::IncidentApi;
pub use request::{ApiRequest, Method};
pub use ticketing::TicketingApi;

use thiserror::Error;
use toolbelt_tools::{
    RegisteredTool, RegistryConfig, ToolCategory, ToolError, ToolFilter, ToolRegistry, Toolset,
};

/// Errors of the `catalog` binary.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Building the catalog failed.
    #[error(transparent)]
    Tool(#[from] ToolError),
    /// Writing the output failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Number of tools declared by the data sources and helpers of this crate.
#[must_use]
pub fn declared_tool_count() -> usize {
    TicketingApi::declarations().len()
        + IncidentApi::declarations().len()
        + utilities::DECLARATIONS.len()
}

/// Creates a registry holding every declared tool.
///
/// # Errors
///
/// Returns the first declaration that fails to install.
pub fn build_catalog(config: RegistryConfig) -> Result<ToolRegistry, ToolError> {
    let registry = ToolRegistry::with_config(config);
    let installed = registry.install_declared()?;

    let expected = declared_tool_count();
    if installed < expected {
        tracing::warn!(installed, expected, "Some declared tools were not collected");
    }
    tracing::debug!(installed, tools = registry.len(), "Catalog built");
    Ok(registry)
}

/// Builds the session filter from command-line selections.
#[must_use]
pub fn session_filter(app: Option<&str>, categories: &[ToolCategory]) -> ToolFilter {
    let filter = categories
        .iter()
        .fold(ToolFilter::new(), |filter, category| filter.with_category(*category));
    match app {
        Some(app) => filter.for_app(app),
        None => filter,
    }
}

/// Renders entries as prompt lines, flagging essential and unauthenticated
/// tools.
#[must_use]
pub fn render_entries(entries: &[RegisteredTool]) -> String {
    entries
        .iter()
        .map(|entry| {
            let mut line = entry.tool.to_prompt_line();
            if entry.metadata.is_essential {
                line.push_str(" [essential]");
            }
            if !entry.metadata.requires_auth {
                line.push_str(" [no auth]");
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}
