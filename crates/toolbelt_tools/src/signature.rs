//! Callable signatures and parameter introspection.
//!
//! A [`Signature`] records what the `#[tool]` macro (or a caller using the
//! builder API) knows about a function: its name, doc text and declared
//! parameters with their annotations and defaults.
//! [`Signature::resolve_hints`] turns the annotations into [`TypeHint`]s and
//! [`introspect`] derives the tool's [`ToolParameter`] list from both.

use crate::error::ToolError;
use crate::param::{ParameterType, ToolParameter, TypeHint, TypeHintError, classify};
use crate::tool::FunctionRef;
use indexmap::IndexMap;
use serde_json::Value;

/// Parameter names that bind the receiver and carry no schema meaning.
const RECEIVER_NAMES: [&str; 2] = ["self", "cls"];

/// Resolved type hints keyed by parameter name.
pub type HintMap = IndexMap<String, TypeHint>;

/// Type annotation of a declared parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// Source text, parsed by [`Signature::resolve_hints`].
    Source(String),
    /// Already resolved. The `#[tool]` macro declares parameters this way.
    Resolved(TypeHint),
}

impl Annotation {
    fn resolve(&self) -> Result<TypeHint, TypeHintError> {
        match self {
            Self::Source(text) => TypeHint::parse(text),
            Self::Resolved(hint) => Ok(hint.clone()),
        }
    }
}

impl From<&str> for Annotation {
    fn from(text: &str) -> Self {
        Self::Source(text.to_string())
    }
}

impl From<String> for Annotation {
    fn from(text: String) -> Self {
        Self::Source(text)
    }
}

impl From<TypeHint> for Annotation {
    fn from(hint: TypeHint) -> Self {
        Self::Resolved(hint)
    }
}

/// One parameter as declared in the source signature.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclaredParam {
    /// Parameter name.
    pub name: String,
    /// Type annotation, if the parameter is annotated.
    pub annotation: Option<Annotation>,
    /// Declared default value.
    pub default: Option<Value>,
}

impl DeclaredParam {
    /// A parameter without a default.
    pub fn new(name: impl Into<String>, annotation: impl Into<Annotation>) -> Self {
        Self {
            name: name.into(),
            annotation: Some(annotation.into()),
            default: None,
        }
    }

    /// A parameter with a default value.
    pub fn with_default(
        name: impl Into<String>,
        annotation: impl Into<Annotation>,
        default: Value,
    ) -> Self {
        Self {
            name: name.into(),
            annotation: Some(annotation.into()),
            default: Some(default),
        }
    }

    /// A parameter without an annotation.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotation: None,
            default: None,
        }
    }
}

/// Description of a callable that can be declared as a tool.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    /// The function this signature belongs to.
    pub function: FunctionRef,
    /// Documentation text of the function.
    pub doc: Option<String>,
    /// Declared parameters in source order, receivers included.
    pub params: Vec<DeclaredParam>,
}

impl Signature {
    /// Creates an empty signature for `function`.
    #[must_use]
    pub fn new(function: FunctionRef) -> Self {
        Self {
            function,
            doc: None,
            params: Vec::new(),
        }
    }

    /// Sets the documentation text.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Declares the receiver (`self`) as the first parameter.
    #[must_use]
    pub fn with_receiver(mut self) -> Self {
        self.params.insert(0, DeclaredParam::untyped("self"));
        self
    }

    /// Declares a parameter without a default.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, annotation: impl Into<Annotation>) -> Self {
        self.params.push(DeclaredParam::new(name, annotation));
        self
    }

    /// Declares a parameter with a default value.
    #[must_use]
    pub fn param_with_default(
        mut self,
        name: impl Into<String>,
        annotation: impl Into<Annotation>,
        default: impl Into<Value>,
    ) -> Self {
        self.params
            .push(DeclaredParam::with_default(name, annotation, default.into()));
        self
    }

    /// Appends an already built parameter.
    #[must_use]
    pub fn with_param(mut self, param: DeclaredParam) -> Self {
        self.params.push(param);
        self
    }

    /// Resolves every annotation into a [`TypeHint`].
    ///
    /// Unannotated parameters are absent from the returned map.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::TypeResolutionError`] for the first source
    /// annotation that is not a Rust type.
    pub fn resolve_hints(&self) -> Result<HintMap, ToolError> {
        let mut hints = HintMap::new();
        for param in &self.params {
            let Some(annotation) = &param.annotation else {
                continue;
            };
            let hint = annotation.resolve().map_err(|err| {
                ToolError::type_resolution_error(
                    &*self.function.name,
                    &param.name,
                    err.reason(),
                )
            })?;
            hints.insert(param.name.clone(), hint);
        }
        Ok(hints)
    }
}

/// Derives the tool parameters of `signature`.
///
/// Receivers (`self`, `cls`) are skipped and the remaining order is kept.
/// Parameters without a resolved hint are classified as
/// [`ParameterType::String`].
#[must_use]
pub fn introspect(signature: &Signature, hints: &HintMap) -> Vec<ToolParameter> {
    signature
        .params
        .iter()
        .filter(|param| !RECEIVER_NAMES.contains(&param.name.as_str()))
        .map(|param| {
            let param_type = hints
                .get(&param.name)
                .map_or(ParameterType::String, classify);
            match &param.default {
                Some(default) => ToolParameter::optional(&param.name, param_type, default.clone()),
                None => ToolParameter::required(&param.name, param_type),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn signature() -> Signature {
        Signature::new(FunctionRef::from_static("update_ticket", "helpdesk"))
            .with_receiver()
            .param("ticket_id", "u64")
            .param("fields", "HashMap<String, serde_json::Value>")
            .param_with_default("notify", "bool", true)
            .param_with_default("tags", "Vec<String>", json!(["triaged"]))
    }

    #[test]
    fn introspect_skips_receiver_and_keeps_order() {
        let signature = signature();
        let hints = signature.resolve_hints().unwrap();
        let params = introspect(&signature, &hints);

        let names: Vec<_> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["ticket_id", "fields", "notify", "tags"]);

        let types: Vec<_> = params.iter().map(|p| p.param_type).collect();
        assert_eq!(
            types,
            vec![
                ParameterType::Integer,
                ParameterType::Object,
                ParameterType::Boolean,
                ParameterType::Array
            ]
        );
    }

    #[test]
    fn defaults_decide_required() {
        let signature = signature();
        let params = introspect(&signature, &signature.resolve_hints().unwrap());

        assert!(params[0].required);
        assert_eq!(params[0].default, None);
        assert!(!params[2].required);
        assert_eq!(params[2].default, Some(json!(true)));
        assert_eq!(params[3].default, Some(json!(["triaged"])));
    }

    #[test]
    fn cls_is_skipped_too() {
        let signature = Signature::new(FunctionRef::from_static("build", "factory"))
            .with_param(DeclaredParam::untyped("cls"))
            .param("name", "String");
        let params = introspect(&signature, &signature.resolve_hints().unwrap());
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "name");
    }

    #[test]
    fn missing_hint_falls_back_to_string() {
        let signature = Signature::new(FunctionRef::from_static("echo", "util"))
            .with_param(DeclaredParam::untyped("payload"));
        let params = introspect(&signature, &HintMap::new());
        assert_eq!(params[0].param_type, ParameterType::String);
        assert_eq!(params[0].description, "Parameter payload");
    }

    #[test]
    fn malformed_annotation_is_reported_with_context() {
        let signature = Signature::new(FunctionRef::from_static("render", "templates"))
            .param("title", "String")
            .param("writer", "Vec<u8");

        let err = signature.resolve_hints().expect_err("malformed type must not resolve");
        match err {
            ToolError::TypeResolutionError {
                function,
                parameter,
                ..
            } => {
                assert_eq!(function, "render");
                assert_eq!(parameter, "writer");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn opaque_and_resolved_annotations_introspect() {
        let signature = Signature::new(FunctionRef::from_static("render", "templates"))
            .param("writer", "impl std::io::Write")
            .param("sink", "&mut dyn std::fmt::Write")
            .param("sizes", TypeHint::generic("Vec", vec![TypeHint::named("u32")]))
            .param_with_default("label", TypeHint::opaque("impl Into<String>"), "");

        let hints = signature.resolve_hints().unwrap();
        assert_eq!(hints.len(), 4);
        let types: Vec<_> = introspect(&signature, &hints)
            .iter()
            .map(|p| p.param_type)
            .collect();
        assert_eq!(
            types,
            vec![
                ParameterType::String,
                ParameterType::String,
                ParameterType::Array,
                ParameterType::String
            ]
        );
    }
}
