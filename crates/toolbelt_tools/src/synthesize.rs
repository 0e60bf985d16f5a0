//! Builds [`Tool`] and [`ToolMetadata`] records from a declaration.

use crate::decorator::ToolSpec;
use crate::error::ToolError;
use crate::signature::{Signature, introspect};
use crate::tool::{Tool, ToolMetadata};

/// Synthesizes the two catalog records for `spec` applied to `signature`.
///
/// Explicit parameters on the spec replace introspection entirely; hints are
/// only resolved when they are needed. The description falls back to the
/// trimmed doc text, then to an empty string.
///
/// # Errors
///
/// Returns [`ToolError::TypeResolutionError`] if parameters are introspected
/// and an annotation cannot be resolved.
pub fn synthesize(
    spec: &ToolSpec,
    signature: &Signature,
) -> Result<(Tool, ToolMetadata), ToolError> {
    let parameters = match &spec.parameters {
        Some(explicit) => explicit.clone(),
        None => {
            let hints = signature.resolve_hints()?;
            introspect(signature, &hints)
        }
    };

    let description = spec
        .description
        .clone()
        .or_else(|| signature.doc.as_deref().map(|doc| doc.trim().to_string()))
        .unwrap_or_default();
    let tags = spec.tags.clone().unwrap_or_default();

    let tool = Tool {
        app_name: spec.app_name.clone(),
        tool_name: spec.tool_name.clone(),
        description: description.clone(),
        function: signature.function.clone(),
        parameters,
        returns: spec.returns.clone(),
        examples: spec.examples.clone().unwrap_or_default(),
        tags: tags.clone(),
    };

    let metadata = ToolMetadata {
        app_name: spec.app_name.clone(),
        tool_name: spec.tool_name.clone(),
        description,
        category: spec.category,
        is_essential: spec.is_essential,
        requires_auth: spec.requires_auth,
        tags,
    };

    Ok((tool, metadata))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decorator::tool;
    use crate::param::{ParameterType, ToolParameter};
    use crate::tool::{FunctionRef, ToolCategory, ToolExample};

    fn signature() -> Signature {
        Signature::new(FunctionRef::from_static("process_data", "demo"))
            .with_doc("\n  Repeat the input text.  \n")
            .param("input_text", "String")
            .param_with_default("count", "usize", 1)
    }

    #[test]
    fn defaults_come_from_signature() {
        let (tool, metadata) = synthesize(&tool("myapp", "process_data"), &signature()).unwrap();

        assert_eq!(tool.description, "Repeat the input text.");
        assert_eq!(metadata.description, tool.description);
        assert_eq!(tool.parameters.len(), 2);
        assert!(tool.examples.is_empty());
        assert!(tool.tags.is_empty());
        assert_eq!(tool.returns, None);

        assert_eq!(metadata.category, ToolCategory::Utility);
        assert!(!metadata.is_essential);
        assert!(metadata.requires_auth);
    }

    #[test]
    fn explicit_parameters_replace_introspection() {
        let explicit = vec![ToolParameter::required("payload", ParameterType::Object)];
        let spec = tool("myapp", "process_data").with_parameters(explicit.clone());
        let (tool, _) = synthesize(&spec, &signature()).unwrap();
        assert_eq!(tool.parameters, explicit);
    }

    #[test]
    fn explicit_parameters_skip_hint_resolution() {
        let broken = Signature::new(FunctionRef::from_static("render", "demo"))
            .param("writer", "Box<dyn Write");
        let spec = tool("myapp", "render")
            .with_parameters(vec![ToolParameter::required("writer", ParameterType::String)]);
        assert!(synthesize(&spec, &broken).is_ok());
        assert!(synthesize(&tool("myapp", "render"), &broken).is_err());
    }

    #[test]
    fn missing_description_is_empty() {
        let bare = Signature::new(FunctionRef::from_static("noop", "demo"));
        let (tool, metadata) = synthesize(&tool("myapp", "noop"), &bare).unwrap();
        assert_eq!(tool.description, "");
        assert_eq!(metadata.description, "");
    }

    #[test]
    fn spec_fields_flow_into_both_records() {
        let spec = tool("myapp", "process_data")
            .with_description("Explicit description.")
            .with_returns("The repeated text.")
            .with_examples(vec![ToolExample::new().with_input("input_text", "ab")])
            .with_tags(["text", "demo"])
            .with_category(ToolCategory::Document)
            .with_essential(true)
            .with_requires_auth(false);
        let (tool, metadata) = synthesize(&spec, &signature()).unwrap();

        assert_eq!(tool.description, "Explicit description.");
        assert_eq!(tool.returns.as_deref(), Some("The repeated text."));
        assert_eq!(tool.examples.len(), 1);
        assert_eq!(tool.tags, vec!["text", "demo"]);
        assert_eq!(metadata.tags, tool.tags);
        assert_eq!(metadata.category, ToolCategory::Document);
        assert!(metadata.is_essential);
        assert!(!metadata.requires_auth);
    }
}
