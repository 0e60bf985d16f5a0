//! Shared utilities for tool macro code generation.

use proc_macro2::{Span, TokenStream};
use quote::{ToTokens, quote};
use syn::meta::ParseNestedMeta;
use syn::punctuated::Punctuated;
use syn::ext::IdentExt;
use syn::{
    Attribute, Expr, ExprLit, FnArg, GenericArgument, Lit, LitBool, LitStr, Meta, Pat, PatType,
    PathArguments, Signature, Token, Type, TypePath,
};

/// Category names accepted by `category = ".."`, matching `ToolCategory`.
const CATEGORIES: [&str; 11] = [
    "utility",
    "search",
    "communication",
    "calendar",
    "document",
    "ticketing",
    "storage",
    "database",
    "code",
    "analytics",
    "security",
];

/// Where a set of arguments was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ArgScope {
    /// `#[tool(..)]` on a function or method.
    Tool,
    /// `#[toolset(..)]` on an impl block; only shared settings are allowed.
    Toolset,
}

/// Arguments of `#[tool(..)]` or `#[toolset(..)]`.
#[derive(Debug, Clone, Default)]
pub(crate) struct ToolArgs {
    pub app_name: Option<LitStr>,
    pub tool_name: Option<LitStr>,
    pub description: Option<LitStr>,
    pub returns: Option<LitStr>,
    pub tags: Vec<LitStr>,
    pub category: Option<LitStr>,
    pub essential: Option<LitBool>,
    pub requires_auth: Option<LitBool>,
    pub parameters: Option<syn::Path>,
    pub examples: Option<syn::Path>,
}

impl ToolArgs {
    /// Parses one `key = value` entry.
    pub(crate) fn parse_meta(
        &mut self,
        meta: &ParseNestedMeta<'_>,
        scope: ArgScope,
    ) -> syn::Result<()> {
        let Some(key) = meta.path.get_ident().map(ToString::to_string) else {
            return Err(meta.error("expected an argument name"));
        };

        let shared = matches!(
            key.as_str(),
            "app_name" | "tags" | "category" | "essential" | "requires_auth"
        );
        if scope == ArgScope::Toolset && !shared {
            return Err(meta.error(format!(
                "`{key}` is not a #[toolset] argument; set it on the method's #[tool]"
            )));
        }

        match key.as_str() {
            "app_name" => self.app_name = Some(meta.value()?.parse()?),
            "tool_name" => self.tool_name = Some(meta.value()?.parse()?),
            "description" => self.description = Some(meta.value()?.parse()?),
            "returns" => self.returns = Some(meta.value()?.parse()?),
            "category" => {
                let category: LitStr = meta.value()?.parse()?;
                category_variant(&category)?;
                self.category = Some(category);
            }
            "essential" => self.essential = Some(meta.value()?.parse()?),
            "requires_auth" => self.requires_auth = Some(meta.value()?.parse()?),
            "parameters" => self.parameters = Some(meta.value()?.parse()?),
            "examples" => self.examples = Some(meta.value()?.parse()?),
            "tags" => {
                let value = meta.value()?;
                let content;
                syn::bracketed!(content in value);
                let tags = Punctuated::<LitStr, Token![,]>::parse_terminated(&content)?;
                self.tags.extend(tags);
            }
            _ => {
                return Err(meta.error(format!(
                    "unknown argument `{key}`; expected one of app_name, tool_name, description, \
                     returns, tags, category, essential, requires_auth, parameters, examples"
                )));
            }
        }
        Ok(())
    }

    /// Parses the arguments of a method-level `#[tool]` attribute.
    pub(crate) fn from_attribute(attr: &Attribute) -> syn::Result<Self> {
        let mut args = Self::default();
        match &attr.meta {
            Meta::Path(_) => {}
            Meta::List(list) => {
                list.parse_args_with(syn::meta::parser(|meta| {
                    args.parse_meta(&meta, ArgScope::Tool)
                }))?;
            }
            Meta::NameValue(name_value) => {
                return Err(syn::Error::new_spanned(
                    name_value,
                    "expected #[tool(app_name = \"..\", tool_name = \"..\")]",
                ));
            }
        }
        Ok(args)
    }

    /// Returns `self` with unset values taken from `defaults`.
    ///
    /// Tags are concatenated, shared tags first.
    pub(crate) fn inherit(self, defaults: &ToolArgs) -> Self {
        let mut tags = defaults.tags.clone();
        tags.extend(self.tags);
        Self {
            app_name: self.app_name.or_else(|| defaults.app_name.clone()),
            category: self.category.or_else(|| defaults.category.clone()),
            essential: self.essential.or_else(|| defaults.essential.clone()),
            requires_auth: self.requires_auth.or_else(|| defaults.requires_auth.clone()),
            tags,
            ..self
        }
    }

    /// Generates the `ToolSpec` builder expression.
    ///
    /// `span` locates errors for missing names, normally the function name.
    pub(crate) fn spec_tokens(&self, tt: &TokenStream, span: Span) -> syn::Result<TokenStream> {
        let app_name = required_name(self.app_name.as_ref(), "app_name", span)?;
        let tool_name = required_name(self.tool_name.as_ref(), "tool_name", span)?;

        let mut builders = Vec::new();
        if let Some(description) = &self.description {
            builders.push(quote! { .with_description(#description) });
        }
        if let Some(returns) = &self.returns {
            builders.push(quote! { .with_returns(#returns) });
        }
        if !self.tags.is_empty() {
            let tags = &self.tags;
            builders.push(quote! { .with_tags([#(#tags),*]) });
        }
        if let Some(category) = &self.category {
            let variant = category_variant(category)?;
            builders.push(quote! { .with_category(#tt::ToolCategory::#variant) });
        }
        if let Some(essential) = &self.essential {
            builders.push(quote! { .with_essential(#essential) });
        }
        if let Some(requires_auth) = &self.requires_auth {
            builders.push(quote! { .with_requires_auth(#requires_auth) });
        }
        if let Some(parameters) = &self.parameters {
            builders.push(quote! { .with_parameters(#parameters()) });
        }
        if let Some(examples) = &self.examples {
            builders.push(quote! { .with_examples(#examples()) });
        }

        Ok(quote! {
            #tt::tool(#app_name, #tool_name) #(#builders)*
        })
    }
}

fn required_name<'a>(value: Option<&'a LitStr>, key: &str, span: Span) -> syn::Result<&'a LitStr> {
    match value {
        None => Err(syn::Error::new(span, format!("#[tool] requires `{key} = \"..\"`"))),
        Some(lit) if lit.value().trim().is_empty() => {
            Err(syn::Error::new_spanned(lit, format!("`{key}` must not be empty")))
        }
        Some(lit) => Ok(lit),
    }
}

/// Maps a category literal to its `ToolCategory` variant identifier.
fn category_variant(category: &LitStr) -> syn::Result<syn::Ident> {
    let value = category.value().trim().to_ascii_lowercase();
    if CATEGORIES.contains(&value.as_str()) {
        Ok(syn::Ident::new(&to_pascal_case(&value), category.span()))
    } else {
        Err(syn::Error::new_spanned(
            category,
            format!(
                "unknown category `{}`; expected one of {}",
                category.value(),
                CATEGORIES.join(", ")
            ),
        ))
    }
}

/// Validates that a function signature can be declared as a tool.
///
/// Rejects generic, unsafe, and extern functions.
pub(crate) fn validate_tool_signature(sig: &Signature) -> syn::Result<()> {
    if let Some(unsafety) = &sig.unsafety {
        return Err(syn::Error::new_spanned(
            unsafety,
            "#[tool] cannot be applied to unsafe functions",
        ));
    }

    if let Some(abi) = &sig.abi {
        return Err(syn::Error::new_spanned(
            abi,
            "#[tool] cannot be applied to extern functions",
        ));
    }

    if !sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &sig.generics,
            "#[tool] does not support generic parameters",
        ));
    }

    Ok(())
}

/// Validates that a standalone `#[tool]` function has no receiver (`&self`).
pub(crate) fn validate_standalone_tool(sig: &Signature) -> syn::Result<()> {
    if let Some(FnArg::Receiver(receiver)) = sig.inputs.first() {
        return Err(syn::Error::new_spanned(
            receiver,
            "#[tool] standalone functions cannot have a `self` receiver; \
             use #[toolset] on the impl block instead",
        ));
    }
    Ok(())
}

/// Parsed information about a single function parameter.
#[derive(Debug, Clone)]
pub(crate) struct ParamInfo {
    /// Parameter name.
    pub name: String,
    /// Parameter type.
    pub ty: Type,
    /// Default value from `#[default(..)]`, as JSON literal tokens.
    pub default_expr: Option<TokenStream>,
}

/// Extracts doc comment text from attributes.
pub(crate) fn extract_doc_comments(attrs: &[Attribute]) -> Option<String> {
    let mut docs = Vec::new();

    for attr in attrs {
        if attr.path().is_ident("doc")
            && let Meta::NameValue(meta) = &attr.meta
            && let Expr::Lit(ExprLit {
                lit: Lit::Str(lit_str),
                ..
            }) = &meta.value
        {
            docs.push(lit_str.value().trim().to_string());
        }
    }

    if docs.is_empty() {
        None
    } else {
        Some(docs.join("\n"))
    }
}

/// Parses a typed function parameter into a [`ParamInfo`].
pub(crate) fn parse_param(pat_type: &PatType) -> syn::Result<ParamInfo> {
    let Pat::Ident(pat_ident) = &*pat_type.pat else {
        return Err(syn::Error::new_spanned(
            &pat_type.pat,
            "#[tool] parameters must be plain identifiers",
        ));
    };

    Ok(ParamInfo {
        name: syn::ext::IdentExt::unraw(&pat_ident.ident).to_string(),
        ty: (*pat_type.ty).clone(),
        default_expr: extract_default_expr(&pat_type.attrs)?,
    })
}

/// Parses every typed parameter of `sig`, skipping the receiver.
pub(crate) fn parse_params(sig: &Signature) -> syn::Result<Vec<ParamInfo>> {
    sig.inputs
        .iter()
        .filter_map(|arg| match arg {
            FnArg::Typed(pat_type) => Some(parse_param(pat_type)),
            FnArg::Receiver(_) => None,
        })
        .collect()
}

/// Extracts the default value from `#[default(expr)]`.
fn extract_default_expr(attrs: &[Attribute]) -> syn::Result<Option<TokenStream>> {
    let Some(attr) = attrs.iter().find(|attr| attr.path().is_ident("default")) else {
        return Ok(None);
    };
    let tokens = attr.parse_args::<TokenStream>()?;
    if tokens.is_empty() {
        return Err(syn::Error::new_spanned(
            attr,
            "#[default(..)] requires a value, e.g. #[default(10)] or #[default(null)]",
        ));
    }
    Ok(Some(tokens))
}

/// Removes `#[default]` and doc attributes from every parameter of `sig`.
pub(crate) fn strip_param_attrs(sig: &mut Signature) {
    for input in &mut sig.inputs {
        if let FnArg::Typed(pat_type) = input {
            pat_type
                .attrs
                .retain(|attr| !attr.path().is_ident("default") && !attr.path().is_ident("doc"));
        }
    }
}

/// Generates the `Signature` builder expression for a function.
///
/// `function_name` is the recorded name (`Type::method` for toolset methods).
pub(crate) fn signature_tokens(
    tt: &TokenStream,
    function_name: &str,
    doc: Option<&str>,
    has_receiver: bool,
    params: &[ParamInfo],
) -> TokenStream {
    let doc = doc.map(|doc| quote! { .with_doc(#doc) });
    let receiver = has_receiver.then(|| quote! { .with_receiver() });
    let params = params.iter().map(|param| {
        let name = &param.name;
        let hint = hint_tokens(tt, &param.ty);
        match &param.default_expr {
            Some(default) => quote! {
                .param_with_default(
                    #name,
                    #hint,
                    #tt::__private::serde_json::json!(#default),
                )
            },
            None => quote! { .param(#name, #hint) },
        }
    });

    quote! {
        #tt::Signature::new(#tt::FunctionRef::from_static(#function_name, ::core::module_path!()))
            #doc
            #receiver
            #(#params)*
    }
}

/// Generates the `TypeHint` expression describing `ty`.
///
/// Shapes that carry no schema meaning become `TypeHint::Opaque` with the
/// annotation text, so every type the compiler accepts can be declared.
pub(crate) fn hint_tokens(tt: &TokenStream, ty: &Type) -> TokenStream {
    let hint = quote!(#tt::TypeHint);
    let boxed = |inner: &Type| {
        let inner = hint_tokens(tt, inner);
        quote!(::std::boxed::Box::new(#inner))
    };

    match ty {
        Type::Group(group) => hint_tokens(tt, &group.elem),
        Type::Paren(paren) => hint_tokens(tt, &paren.elem),
        Type::Reference(reference) => {
            let inner = boxed(&reference.elem);
            quote!(#hint::Reference(#inner))
        }
        Type::Slice(slice) => {
            let inner = boxed(&slice.elem);
            quote!(#hint::Slice(#inner))
        }
        Type::Array(array) => {
            let inner = boxed(&array.elem);
            quote!(#hint::Array(#inner))
        }
        Type::Tuple(tuple) => {
            let items = tuple.elems.iter().map(|elem| hint_tokens(tt, elem));
            quote!(#hint::Tuple(::std::vec![#(#items),*]))
        }
        Type::Path(TypePath { qself: None, path }) if !path.segments.is_empty() => {
            let segment = &path.segments[path.segments.len() - 1];
            let name = segment.ident.unraw().to_string();
            let args = match &segment.arguments {
                PathArguments::AngleBracketed(angle) => angle
                    .args
                    .iter()
                    .filter_map(|arg| match arg {
                        GenericArgument::Type(ty) => Some(hint_tokens(tt, ty)),
                        GenericArgument::AssocType(binding) => Some(hint_tokens(tt, &binding.ty)),
                        _ => None,
                    })
                    .collect(),
                _ => Vec::new(),
            };
            quote!(#hint::generic(#name, ::std::vec![#(#args),*]))
        }
        other => {
            let text = other.to_token_stream().to_string();
            quote!(#hint::opaque(#text))
        }
    }
}

/// Converts a `snake_case` string to `PascalCase`.
pub(crate) fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().to_string() + &chars.as_str().to_lowercase(),
            }
        })
        .collect()
}

/// Converts a `PascalCase` or `snake_case` name to `SCREAMING_SNAKE_CASE`.
pub(crate) fn to_screaming_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut prev_lower = false;
    for c in s.chars() {
        if c.is_uppercase() && prev_lower {
            out.push('_');
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        out.extend(c.to_uppercase());
    }
    out
}
