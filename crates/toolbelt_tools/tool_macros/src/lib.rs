//! Procedural macros for the Toolbelt tool framework.
//!
//! Provides `#[tool]` for standalone functions and `#[toolset]` for the
//! methods of one type.

mod common;
mod tool_fn;
mod toolset;

use common::{ArgScope, ToolArgs};
use proc_macro::TokenStream;

/// Declares a function as a tool.
///
/// The function is left unchanged. The macro records its signature and
/// generates a `<NAME>_TOOL` static `ToolDeclaration`, which
/// `ToolRegistry::install_declared` picks up at startup.
///
/// # Arguments
///
/// - `app_name = ".."`, `tool_name = ".."`: required, non-empty
/// - `description = ".."`: defaults to the doc comment
/// - `returns = ".."`, `tags = ["..", ..]`
/// - `category = ".."`: a `ToolCategory` name, defaults to `utility`
/// - `essential = bool` (default `false`), `requires_auth = bool` (default `true`)
/// - `parameters = path`, `examples = path`: functions returning the
///   explicit `Vec<ToolParameter>` / `Vec<ToolExample>`
///
/// # Parameter Attributes
///
/// - `#[default(value)]`: JSON literal; makes the parameter optional
///
/// Parameter types are described at compile time. Types without a schema
/// shape (`impl Trait`, `dyn Trait`, function pointers) are declared as
/// strings.
///
/// # Example
///
/// ```
/// use toolbelt_tools::{tool, ToolRegistry};
///
/// /// Repeat the input text.
/// #[tool(app_name = "myapp", tool_name = "process_data", tags = ["text"])]
/// fn process_data(input_text: &str, #[default(1)] count: usize) -> String {
///     input_text.repeat(count)
/// }
///
/// let registry = ToolRegistry::new();
/// registry.install(&PROCESS_DATA_TOOL).unwrap();
///
/// assert_eq!(process_data("ab", 2), "abab");
/// let tool = PROCESS_DATA_TOOL.tool().unwrap();
/// assert_eq!(tool.description, "Repeat the input text.");
/// assert!(!tool.parameters[1].required);
/// ```
#[proc_macro_attribute]
pub fn tool(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut args = ToolArgs::default();
    let parser = syn::meta::parser(|meta| args.parse_meta(&meta, ArgScope::Tool));
    syn::parse_macro_input!(attr with parser);
    let input = syn::parse_macro_input!(item as syn::ItemFn);
    tool_fn::generate_tool_fn(&args, input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Declares the `#[tool]` methods of an inherent impl block as tools.
///
/// Accepts the shared arguments `app_name`, `category`, `essential`,
/// `requires_auth` and `tags`; each method's `#[tool(..)]` overrides them
/// (tags are appended). The type implements `Toolset`.
///
/// # Example
///
/// ```
/// use toolbelt_tools::{toolset, ToolRegistry};
///
/// struct Tickets;
///
/// #[toolset(app_name = "helpdesk", category = "ticketing")]
/// impl Tickets {
///     /// Fetch a ticket by id.
///     #[tool(tool_name = "get_ticket", essential = true)]
///     fn get_ticket(&self, ticket_id: u64) -> String {
///         format!("ticket {ticket_id}")
///     }
///
///     /// Close a ticket.
///     #[tool(tool_name = "close_ticket")]
///     fn close_ticket(&self, ticket_id: u64, #[default(null)] reason: Option<String>) -> bool {
///         reason.is_some() || ticket_id > 0
///     }
/// }
///
/// let registry = ToolRegistry::new();
/// assert_eq!(registry.install_toolset::<Tickets>().unwrap(), 2);
/// assert_eq!(registry.essential().len(), 1);
/// assert_eq!(Tickets.get_ticket(7), "ticket 7");
/// ```
#[proc_macro_attribute]
pub fn toolset(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut args = ToolArgs::default();
    let parser = syn::meta::parser(|meta| args.parse_meta(&meta, ArgScope::Toolset));
    syn::parse_macro_input!(attr with parser);
    let input = syn::parse_macro_input!(item as syn::ItemImpl);
    toolset::generate_toolset(&args, input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
