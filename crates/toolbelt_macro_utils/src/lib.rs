//! Path resolution for code generated by Toolbelt's procedural macros.
//!
//! Generated declarations name items of `toolbelt_tools`. The consuming crate
//! may depend on it directly (possibly under a renamed key), reach it only
//! through the `toolbelt` umbrella crate, or be `toolbelt_tools` itself.
//! [`tools_path`] picks the spelling that resolves in each case.

use proc_macro_crate::{FoundCrate, crate_name};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

const TOOLS_CRATE: &str = "toolbelt_tools";
const UMBRELLA_CRATE: &str = "toolbelt";

/// How the crate being compiled reaches `toolbelt_tools`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolsAccess {
    /// Listed in the manifest under this name. `toolbelt_tools` itself
    /// resolves here too, through its `extern crate self` alias.
    Direct(String),
    /// Only reachable as a module of the umbrella crate, listed under this
    /// name.
    Umbrella(String),
    /// Neither crate is listed. Generated code still names `toolbelt_tools`
    /// so the compiler error points at the missing dependency.
    Missing,
}

impl ToolsAccess {
    /// Inspects the manifest of the crate currently being compiled.
    #[must_use]
    pub fn detect() -> Self {
        match crate_name(TOOLS_CRATE) {
            Ok(FoundCrate::Itself) => Self::Direct(TOOLS_CRATE.to_string()),
            Ok(FoundCrate::Name(name)) => Self::Direct(name),
            Err(_) => match crate_name(UMBRELLA_CRATE) {
                Ok(FoundCrate::Name(name)) => Self::Umbrella(name),
                Ok(FoundCrate::Itself) => Self::Umbrella(UMBRELLA_CRATE.to_string()),
                Err(_) => Self::Missing,
            },
        }
    }

    /// Absolute path to `toolbelt_tools` for this access mode.
    #[must_use]
    pub fn to_path(&self) -> TokenStream {
        match self {
            Self::Direct(name) => {
                let krate = format_ident!("{}", name);
                quote!(::#krate)
            }
            Self::Umbrella(name) => {
                let umbrella = format_ident!("{}", name);
                let tools = format_ident!("{}", TOOLS_CRATE);
                quote!(::#umbrella::#tools)
            }
            Self::Missing => {
                let tools = format_ident!("{}", TOOLS_CRATE);
                quote!(::#tools)
            }
        }
    }
}

/// Returns the path generated code should use for `toolbelt_tools`.
#[must_use]
pub fn tools_path() -> TokenStream {
    ToolsAccess::detect().to_path()
}
