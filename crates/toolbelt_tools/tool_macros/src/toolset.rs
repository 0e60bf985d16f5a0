//! Code generation for `#[toolset]` on impl blocks.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{FnArg, ImplItem, ItemImpl, Type};
use toolbelt_macro_utils::tools_path;

use crate::common::{
    ToolArgs, extract_doc_comments, parse_params, signature_tokens, strip_param_attrs,
    to_screaming_snake_case, validate_tool_signature,
};

/// Generates declarations and a `Toolset` impl for an impl block with
/// `#[tool]` methods.
///
/// Each method gets a `<TYPE>_<METHOD>_TOOL` static next to the impl block,
/// submitted to `inventory` like a standalone tool.
pub(crate) fn generate_toolset(shared: &ToolArgs, mut input: ItemImpl) -> syn::Result<TokenStream> {
    if let Some((_, path, _)) = &input.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[toolset] must be applied to an inherent impl block",
        ));
    }
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "#[toolset] does not support generic impl blocks",
        ));
    }

    let tt = tools_path();
    let self_ty = &input.self_ty;
    let type_name = type_name_str(self_ty)?;

    let mut declarations = Vec::new();
    let mut statics = Vec::new();

    for item in &mut input.items {
        let ImplItem::Fn(method) = item else {
            continue;
        };
        let Some(index) = method.attrs.iter().position(|attr| attr.path().is_ident("tool")) else {
            continue;
        };
        let attr = method.attrs.remove(index);

        validate_tool_signature(&method.sig)?;
        let args = ToolArgs::from_attribute(&attr)?.inherit(shared);

        let method_name = method.sig.ident.unraw().to_string();
        let function_name = format!("{type_name}::{method_name}");
        let static_name = format_ident!(
            "{}_{}_TOOL",
            to_screaming_snake_case(&type_name),
            to_screaming_snake_case(&method_name)
        );
        let static_doc = format!("Tool declaration of [`{type_name}::{method_name}`].");

        let has_receiver = matches!(method.sig.inputs.first(), Some(FnArg::Receiver(_)));
        let params = parse_params(&method.sig)?;
        let doc = extract_doc_comments(&method.attrs);
        let spec = args.spec_tokens(&tt, method.sig.ident.span())?;
        let signature =
            signature_tokens(&tt, &function_name, doc.as_deref(), has_receiver, &params);

        strip_param_attrs(&mut method.sig);
        let vis = &method.vis;

        statics.push(quote! {
            #[doc = #static_doc]
            #vis static #static_name: #tt::ToolDeclaration = #tt::ToolDeclaration::new(
                #tt::FunctionRef::from_static(#function_name, ::core::module_path!()),
                || #spec,
                || #signature,
            );

            #tt::__private::inventory::submit! {
                #tt::__private::DeclaredTool(&#static_name)
            }
        });
        declarations.push(static_name);
    }

    Ok(quote! {
        #input

        #(#statics)*

        impl #tt::Toolset for #self_ty {
            fn declarations() -> ::std::vec::Vec<&'static #tt::ToolDeclaration> {
                ::std::vec![#(&#declarations),*]
            }
        }
    })
}

fn type_name_str(ty: &Type) -> syn::Result<String> {
    if let Type::Path(type_path) = ty
        && let Some(segment) = type_path.path.segments.last()
    {
        return Ok(segment.ident.unraw().to_string());
    }
    Err(syn::Error::new_spanned(
        ty,
        "#[toolset] impl target must be a path type",
    ))
}
