//! The [`Toolset`] trait for grouped tool declarations.

use crate::decorator::ToolDeclaration;

/// A type whose methods are declared as tools.
///
/// Implemented by `#[toolset]` on an `impl` block. Every `#[tool]` method in
/// the block contributes one declaration; install them together with
/// [`ToolRegistry::install_toolset`](crate::ToolRegistry::install_toolset).
pub trait Toolset {
    /// Declarations of the type's tool methods, in source order.
    fn declarations() -> Vec<&'static ToolDeclaration>;
}
