//! Code generation for `#[tool]` on standalone functions.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ItemFn;
use syn::ext::IdentExt;
use toolbelt_macro_utils::tools_path;

use crate::common::{
    ToolArgs, extract_doc_comments, parse_params, signature_tokens, strip_param_attrs,
    to_screaming_snake_case, validate_standalone_tool, validate_tool_signature,
};

/// Generates the declaration of a standalone `#[tool]` function.
///
/// The function is emitted unchanged apart from its parameter attributes,
/// followed by:
/// - a `<NAME>_TOOL` static holding the `ToolDeclaration`
/// - an `inventory` submission so `install_declared` finds it
pub(crate) fn generate_tool_fn(args: &ToolArgs, mut input: ItemFn) -> syn::Result<TokenStream> {
    validate_tool_signature(&input.sig)?;
    validate_standalone_tool(&input.sig)?;

    let tt = tools_path();

    let fn_name = input.sig.ident.unraw().to_string();
    let static_name = format_ident!("{}_TOOL", to_screaming_snake_case(&fn_name));
    let static_doc = format!("Tool declaration of [`{fn_name}`].");

    let params = parse_params(&input.sig)?;
    let doc = extract_doc_comments(&input.attrs);
    let spec = args.spec_tokens(&tt, input.sig.ident.span())?;
    let signature = signature_tokens(&tt, &fn_name, doc.as_deref(), false, &params);

    strip_param_attrs(&mut input.sig);
    let vis = &input.vis;

    Ok(quote! {
        #input

        #[doc = #static_doc]
        #vis static #static_name: #tt::ToolDeclaration = #tt::ToolDeclaration::new(
            #tt::FunctionRef::from_static(#fn_name, ::core::module_path!()),
            || #spec,
            || #signature,
        );

        #tt::__private::inventory::submit! {
            #tt::__private::DeclaredTool(&#static_name)
        }
    })
}
