//! Parameter schemas and type classification.
//!
//! - [`ParameterType`]: the closed set of semantic parameter kinds
//! - [`ToolParameter`]: one formal argument of a tool
//! - [`TypeHint`]: a structural description of a Rust type annotation
//! - [`classify`]: maps a [`TypeHint`] to a [`ParameterType`]

use core::fmt;
use core::str::FromStr;
use quote::ToTokens;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use syn::ext::IdentExt;
use syn::{GenericArgument, PathArguments, Type, TypePath};

/// Semantic kind of a tool parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    /// Free text. Also the fallback for anything unrecognized.
    #[default]
    String,
    /// Whole number.
    Integer,
    /// Floating-point number.
    Number,
    /// `true` / `false`.
    Boolean,
    /// Homogeneous sequence.
    Array,
    /// Key/value mapping.
    Object,
}

impl ParameterType {
    /// Returns the lowercase name used in catalogs and prompts.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Schema of a single tool parameter.
///
/// A parameter is either required with no default, or optional with a
/// concrete default value. The [`required`](Self::required) and
/// [`optional`](Self::optional) constructors uphold this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Parameter name, unique within a tool.
    pub name: String,
    /// Semantic type of the parameter.
    #[serde(rename = "type")]
    pub param_type: ParameterType,
    /// Human-readable description.
    pub description: String,
    /// Whether callers must supply this parameter.
    pub required: bool,
    /// Default value, present only for optional parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl ToolParameter {
    /// Creates a required parameter with a placeholder description.
    pub fn required(name: impl Into<String>, param_type: ParameterType) -> Self {
        let name = name.into();
        Self {
            description: placeholder_description(&name),
            name,
            param_type,
            required: true,
            default: None,
        }
    }

    /// Creates an optional parameter carrying `default`.
    pub fn optional(name: impl Into<String>, param_type: ParameterType, default: Value) -> Self {
        let name = name.into();
        Self {
            description: placeholder_description(&name),
            name,
            param_type,
            required: false,
            default: Some(default),
        }
    }

    /// Replaces the placeholder description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

fn placeholder_description(name: &str) -> String {
    format!("Parameter {name}")
}

// ─────────────────────────────────────────────────────────────────────
// Type hints
// ─────────────────────────────────────────────────────────────────────

/// Structural description of a Rust type annotation.
///
/// Only the shape matters for classification: path types keep their last
/// segment and generic type arguments, lifetimes and array lengths are
/// dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeHint {
    /// A path type such as `bool`, `String` or `std::collections::HashMap<K, V>`.
    Path {
        /// Last path segment (`HashMap`).
        name: String,
        /// Generic type arguments, in order.
        args: Vec<TypeHint>,
    },
    /// `&T`, `&mut T` or `&'a T`.
    Reference(Box<TypeHint>),
    /// `[T]`
    Slice(Box<TypeHint>),
    /// `[T; N]`
    Array(Box<TypeHint>),
    /// `()` or `(A, B, ..)`
    Tuple(Vec<TypeHint>),
    /// A type whose shape says nothing about its values: `impl Trait`,
    /// `dyn Trait`, `_`, `!`, pointers, function pointers, qualified paths
    /// and macros. Holds the annotation text.
    Opaque(String),
}

impl TypeHint {
    /// Creates a path hint without generic arguments.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Path {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Creates a path hint with generic arguments.
    pub fn generic(name: impl Into<String>, args: Vec<TypeHint>) -> Self {
        Self::Path {
            name: name.into(),
            args,
        }
    }

    /// Creates an opaque hint from its annotation text.
    pub fn opaque(text: impl Into<String>) -> Self {
        Self::Opaque(text.into())
    }

    /// Parses annotation source text such as `Vec < String >`.
    ///
    /// Any type Rust accepts parses; shapes without schema meaning become
    /// [`TypeHint::Opaque`].
    ///
    /// # Errors
    ///
    /// Returns [`TypeHintError`] when the text is not a Rust type.
    pub fn parse(source: &str) -> Result<Self, TypeHintError> {
        syn::parse_str::<Type>(source)
            .map(|ty| Self::from_syn(&ty))
            .map_err(|err| TypeHintError::new(err.to_string()))
    }

    /// Describes a parsed [`syn::Type`].
    #[must_use]
    pub fn from_syn(ty: &Type) -> Self {
        match ty {
            Type::Group(group) => Self::from_syn(&group.elem),
            Type::Paren(paren) => Self::from_syn(&paren.elem),
            Type::Reference(reference) => {
                Self::Reference(Box::new(Self::from_syn(&reference.elem)))
            }
            Type::Slice(slice) => Self::Slice(Box::new(Self::from_syn(&slice.elem))),
            Type::Array(array) => Self::Array(Box::new(Self::from_syn(&array.elem))),
            Type::Tuple(tuple) => Self::Tuple(tuple.elems.iter().map(Self::from_syn).collect()),
            Type::Path(TypePath { qself: None, path }) => match path.segments.last() {
                Some(segment) => Self::Path {
                    name: segment.ident.unraw().to_string(),
                    args: type_arguments(&segment.arguments),
                },
                None => Self::Opaque(ty.to_token_stream().to_string()),
            },
            other => Self::Opaque(other.to_token_stream().to_string()),
        }
    }
}

fn type_arguments(arguments: &PathArguments) -> Vec<TypeHint> {
    let PathArguments::AngleBracketed(angle) = arguments else {
        return Vec::new();
    };
    angle
        .args
        .iter()
        .filter_map(|arg| match arg {
            GenericArgument::Type(ty) => Some(TypeHint::from_syn(ty)),
            GenericArgument::AssocType(binding) => Some(TypeHint::from_syn(&binding.ty)),
            _ => None,
        })
        .collect()
}

impl FromStr for TypeHint {
    type Err = TypeHintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TypeHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path { name, args } => {
                f.write_str(name)?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    write_list(f, args)?;
                    f.write_str(">")?;
                }
                Ok(())
            }
            Self::Reference(inner) => write!(f, "&{inner}"),
            Self::Slice(inner) => write!(f, "[{inner}]"),
            Self::Array(inner) => write!(f, "[{inner}; _]"),
            Self::Tuple(items) => {
                f.write_str("(")?;
                write_list(f, items)?;
                f.write_str(")")
            }
            Self::Opaque(text) => f.write_str(text),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[TypeHint]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Error returned when annotation text is not a Rust type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct TypeHintError {
    reason: String,
}

impl TypeHintError {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Human-readable reason for the failure.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

// ─────────────────────────────────────────────────────────────────────
// Classification
// ─────────────────────────────────────────────────────────────────────

const INTEGER_TYPES: &[&str] = &[
    "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize",
];

const LIST_TYPES: &[&str] = &[
    "Vec",
    "VecDeque",
    "LinkedList",
    "HashSet",
    "BTreeSet",
    "IndexSet",
];

const MAP_TYPES: &[&str] = &["HashMap", "BTreeMap", "IndexMap", "Map"];

/// Classifies a type hint into a [`ParameterType`].
///
/// `bool` is checked before the integer primitives. References and
/// `Option<T>` are looked through. Anything unrecognized, opaque types
/// included, is [`ParameterType::String`]; classification never fails.
#[must_use]
pub fn classify(hint: &TypeHint) -> ParameterType {
    match hint {
        TypeHint::Reference(inner) => classify(inner),
        TypeHint::Slice(_) | TypeHint::Array(_) => ParameterType::Array,
        TypeHint::Tuple(_) | TypeHint::Opaque(_) => ParameterType::String,
        TypeHint::Path { name, args } => classify_path(name, args),
    }
}

fn classify_path(name: &str, args: &[TypeHint]) -> ParameterType {
    match (name, args) {
        ("bool", []) => ParameterType::Boolean,
        (name, []) if INTEGER_TYPES.contains(&name) => ParameterType::Integer,
        ("f32" | "f64", []) => ParameterType::Number,
        ("Option", [inner]) => classify(inner),
        (name, [_]) if LIST_TYPES.contains(&name) => ParameterType::Array,
        (name, [_, _] | [_, _, _]) if MAP_TYPES.contains(&name) => ParameterType::Object,
        _ => ParameterType::String,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_str(source: &str) -> ParameterType {
        classify(&TypeHint::parse(source).expect("annotation should parse"))
    }

    #[test]
    fn primitives_are_classified() {
        assert_eq!(classify_str("bool"), ParameterType::Boolean);
        assert_eq!(classify_str("i64"), ParameterType::Integer);
        assert_eq!(classify_str("usize"), ParameterType::Integer);
        assert_eq!(classify_str("u8"), ParameterType::Integer);
        assert_eq!(classify_str("f64"), ParameterType::Number);
        assert_eq!(classify_str("f32"), ParameterType::Number);
        assert_eq!(classify_str("String"), ParameterType::String);
        assert_eq!(classify_str("&str"), ParameterType::String);
    }

    #[test]
    fn containers_are_classified_by_shape() {
        assert_eq!(classify_str("Vec<String>"), ParameterType::Array);
        assert_eq!(classify_str("Vec < Vec < u8 > >"), ParameterType::Array);
        assert_eq!(classify_str("&[i32]"), ParameterType::Array);
        assert_eq!(classify_str("[f64; 3]"), ParameterType::Array);
        assert_eq!(
            classify_str("std::collections::HashMap<String, i64>"),
            ParameterType::Object
        );
        assert_eq!(
            classify_str("BTreeMap<String, Vec<String>>"),
            ParameterType::Object
        );
        assert_eq!(
            classify_str("serde_json::Map<String, serde_json::Value>"),
            ParameterType::Object
        );
    }

    #[test]
    fn unparameterized_and_unknown_types_fall_back_to_string() {
        assert_eq!(classify_str("Vec"), ParameterType::String);
        assert_eq!(classify_str("HashMap"), ParameterType::String);
        assert_eq!(classify_str("serde_json::Value"), ParameterType::String);
        assert_eq!(classify_str("MyCustomType"), ParameterType::String);
        assert_eq!(classify_str("(i32, i32)"), ParameterType::String);
        assert_eq!(classify_str("T"), ParameterType::String);
    }

    #[test]
    fn references_and_options_are_transparent() {
        assert_eq!(classify_str("&'a bool"), ParameterType::Boolean);
        assert_eq!(classify_str("&mut Vec<u8>"), ParameterType::Array);
        assert_eq!(classify_str("Option<i32>"), ParameterType::Integer);
        assert_eq!(classify_str("Option<HashMap<String, String>>"), ParameterType::Object);
    }

    #[test]
    fn parse_keeps_structure() {
        let hint = TypeHint::parse("::std::borrow::Cow<'static, str>").unwrap();
        assert_eq!(
            hint,
            TypeHint::generic("Cow", vec![TypeHint::named("str")])
        );
        assert_eq!(hint.to_string(), "Cow<str>");

        let hint = TypeHint::parse("Vec::<(String, u32)>").unwrap();
        assert_eq!(hint.to_string(), "Vec<(String, u32)>");
    }

    #[test]
    fn parse_rejects_text_that_is_not_a_type() {
        for source in ["", "Vec<String", "HashMap<String,>>", "String String", "[u8"] {
            assert!(
                TypeHint::parse(source).is_err(),
                "expected `{source}` to be rejected"
            );
        }
    }

    #[test]
    fn opaque_annotations_fall_back_to_string() {
        for source in [
            "impl Into<String>",
            "dyn std::fmt::Write",
            "_",
            "!",
            "*const u8",
            "fn(u8) -> u8",
            "<T as Iterator>::Item",
        ] {
            let hint = TypeHint::parse(source).expect("valid Rust type");
            assert!(matches!(hint, TypeHint::Opaque(_)), "`{source}` parsed as {hint:?}");
            assert_eq!(classify(&hint), ParameterType::String);
        }

        assert_eq!(classify_str("Box<dyn std::error::Error>"), ParameterType::String);
        assert_eq!(classify_str("&mut dyn std::io::Write"), ParameterType::String);
        assert_eq!(classify_str("Vec<Box<dyn Fn(u8)>>"), ParameterType::Array);
    }

    #[test]
    fn array_lengths_and_spacing_are_ignored() {
        assert_eq!(classify_str("[u8; { 2 * 4 }]"), ParameterType::Array);
        assert_eq!(classify_str("&'a mut[u8; 4]"), ParameterType::Array);
        assert_eq!(
            TypeHint::parse("Option < Vec < r#type > >").unwrap(),
            TypeHint::generic(
                "Option",
                vec![TypeHint::generic("Vec", vec![TypeHint::named("type")])]
            )
        );
    }

    #[test]
    fn parameter_constructors_uphold_default_invariant() {
        let required = ToolParameter::required("query", ParameterType::String);
        assert!(required.required);
        assert_eq!(required.default, None);
        assert_eq!(required.description, "Parameter query");

        let optional = ToolParameter::optional("limit", ParameterType::Integer, 10.into());
        assert!(!optional.required);
        assert_eq!(optional.default, Some(Value::from(10)));
    }

    #[test]
    fn parameter_serializes_type_field() {
        let param = ToolParameter::optional("limit", ParameterType::Integer, 10.into());
        let json = serde_json::to_value(&param).unwrap();
        assert_eq!(json["type"], "integer");
        assert_eq!(json["default"], 10);

        let required = serde_json::to_value(ToolParameter::required("q", ParameterType::String))
            .unwrap();
        assert!(required.get("default").is_none());
    }
}
