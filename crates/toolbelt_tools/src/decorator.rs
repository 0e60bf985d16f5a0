//! The `tool(app_name, tool_name, ...)` declaration factory.
//!
//! [`tool`] returns a [`ToolSpec`] carrying the declaration arguments. The
//! spec is applied to a [`Signature`] to register the tool; the function itself
//! is never wrapped in behavior, so calling it is unchanged.
//!
//! The `#[tool]` attribute macro generates a [`ToolDeclaration`] static for
//! each annotated function. Declarations are collected at link time and
//! installed with [`ToolRegistry::install_declared`].

use crate::error::ToolError;
use crate::param::ToolParameter;
use crate::registry::ToolRegistry;
use crate::signature::Signature;
use crate::synthesize::synthesize;
use crate::tool::{FunctionRef, Tool, ToolCategory, ToolExample, ToolKey};
use core::fmt;
use core::ops::Deref;
use std::sync::{Arc, OnceLock};

/// Starts a tool declaration for `app_name.tool_name`.
///
/// The remaining arguments are set with the `with_*` builders. Empty names
/// are accepted here and rejected when the spec is applied.
///
/// ```
/// use toolbelt_tools::{tool, Signature, FunctionRef, ToolCategory, ToolRegistry};
///
/// fn process_data(input_text: &str, count: usize) -> String {
///     input_text.repeat(count)
/// }
///
/// let registry = ToolRegistry::new();
/// let signature = Signature::new(FunctionRef::from_static("process_data", module_path!()))
///     .param("input_text", "&str")
///     .param_with_default("count", "usize", 1);
///
/// let process_data = tool("myapp", "process_data")
///     .with_category(ToolCategory::Document)
///     .decorate(&registry, &signature, process_data)
///     .unwrap();
///
/// assert_eq!(process_data("abc", 3), "abcabcabc");
/// assert!(registry.contains("myapp", "process_data"));
/// ```
pub fn tool(app_name: impl Into<String>, tool_name: impl Into<String>) -> ToolSpec {
    ToolSpec {
        app_name: app_name.into(),
        tool_name: tool_name.into(),
        description: None,
        parameters: None,
        returns: None,
        examples: None,
        tags: None,
        category: ToolCategory::default(),
        is_essential: false,
        requires_auth: true,
    }
}

/// Declaration arguments of a tool.
///
/// Created by [`tool`]. `None` fields are derived from the signature or left
/// empty when the spec is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSpec {
    pub(crate) app_name: String,
    pub(crate) tool_name: String,
    pub(crate) description: Option<String>,
    pub(crate) parameters: Option<Vec<ToolParameter>>,
    pub(crate) returns: Option<String>,
    pub(crate) examples: Option<Vec<ToolExample>>,
    pub(crate) tags: Option<Vec<String>>,
    pub(crate) category: ToolCategory,
    pub(crate) is_essential: bool,
    pub(crate) requires_auth: bool,
}

impl ToolSpec {
    /// Sets the description, overriding the function's doc text.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the parameters, skipping signature introspection.
    #[must_use]
    pub fn with_parameters(mut self, parameters: Vec<ToolParameter>) -> Self {
        self.parameters = Some(parameters);
        self
    }

    /// Describes the output of the tool.
    #[must_use]
    pub fn with_returns(mut self, returns: impl Into<String>) -> Self {
        self.returns = Some(returns.into());
        self
    }

    /// Sets the illustrative invocations.
    #[must_use]
    pub fn with_examples(mut self, examples: Vec<ToolExample>) -> Self {
        self.examples = Some(examples);
        self
    }

    /// Sets the tags shared by the tool and its metadata.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the category. Defaults to [`ToolCategory::Utility`].
    #[must_use]
    pub fn with_category(mut self, category: ToolCategory) -> Self {
        self.category = category;
        self
    }

    /// Marks the tool as essential. Defaults to `false`.
    #[must_use]
    pub fn with_essential(mut self, is_essential: bool) -> Self {
        self.is_essential = is_essential;
        self
    }

    /// Sets whether the tool needs credentials. Defaults to `true`.
    #[must_use]
    pub fn with_requires_auth(mut self, requires_auth: bool) -> Self {
        self.requires_auth = requires_auth;
        self
    }

    /// Application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Tool name.
    #[must_use]
    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    /// Catalog key this spec registers under.
    #[must_use]
    pub fn key(&self) -> ToolKey {
        ToolKey::new(&self.app_name, &self.tool_name)
    }

    /// Checks that both names are non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::ConfigurationError`] when either name is empty or
    /// whitespace.
    pub fn validate(&self) -> Result<(), ToolError> {
        if self.app_name.trim().is_empty() {
            return Err(ToolError::configuration_error(format!(
                "app_name is required for tool '{}'",
                self.tool_name
            )));
        }
        if self.tool_name.trim().is_empty() {
            return Err(ToolError::configuration_error(format!(
                "tool_name is required for app '{}'",
                self.app_name
            )));
        }
        Ok(())
    }

    /// Validates the spec, synthesizes both records and registers them.
    ///
    /// Nothing is registered when an error is returned.
    ///
    /// # Errors
    ///
    /// Returns a [`ToolError::ConfigurationError`] for invalid names, a
    /// [`ToolError::TypeResolutionError`] for annotation text that is not a
    /// type, or a [`ToolError::DuplicateTool`] if the registry rejects
    /// re-registration.
    pub fn apply(
        &self,
        registry: &ToolRegistry,
        signature: &Signature,
    ) -> Result<Arc<Tool>, ToolError> {
        self.validate()?;
        let (tool, metadata) = synthesize(self, signature)?;
        let entry = registry.register(tool, metadata)?;
        Ok(entry.tool)
    }

    /// Applies the spec and returns `function` unchanged behind a
    /// [`Decorated`] handle.
    ///
    /// # Errors
    ///
    /// See [`ToolSpec::apply`].
    pub fn decorate<F>(
        &self,
        registry: &ToolRegistry,
        signature: &Signature,
        function: F,
    ) -> Result<Decorated<F>, ToolError> {
        let tool = self.apply(registry, signature)?;
        Ok(Decorated { function, tool })
    }
}

/// A function registered as a tool.
///
/// Dereferences to the function, so `decorated(args)` calls it directly with
/// the same arguments and result.
#[derive(Clone)]
pub struct Decorated<F> {
    function: F,
    tool: Arc<Tool>,
}

impl<F> Decorated<F> {
    /// The tool definition registered for the function.
    #[must_use]
    pub fn tool(&self) -> &Arc<Tool> {
        &self.tool
    }

    /// Returns the undecorated function.
    pub fn into_inner(self) -> F {
        self.function
    }
}

impl<F> Deref for Decorated<F> {
    type Target = F;

    fn deref(&self) -> &F {
        &self.function
    }
}

impl<F> fmt::Debug for Decorated<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decorated")
            .field("tool", &self.tool.key())
            .finish_non_exhaustive()
    }
}

/// Static declaration generated by `#[tool]` and `#[toolset]`.
///
/// Holds the spec and signature as constructors so the item can live in a
/// `static`. After installation the registered [`Tool`] is attached and can
/// be read back with [`ToolDeclaration::tool`].
#[derive(Debug)]
pub struct ToolDeclaration {
    function: FunctionRef,
    spec: fn() -> ToolSpec,
    signature: fn() -> Signature,
    attached: OnceLock<Arc<Tool>>,
}

impl ToolDeclaration {
    #[doc(hidden)]
    pub const fn new(
        function: FunctionRef,
        spec: fn() -> ToolSpec,
        signature: fn() -> Signature,
    ) -> Self {
        Self {
            function,
            spec,
            signature,
            attached: OnceLock::new(),
        }
    }

    /// The declared function.
    #[must_use]
    pub fn function(&self) -> &FunctionRef {
        &self.function
    }

    /// Builds the declaration arguments.
    #[must_use]
    pub fn spec(&self) -> ToolSpec {
        (self.spec)()
    }

    /// Builds the function signature.
    #[must_use]
    pub fn signature(&self) -> Signature {
        (self.signature)()
    }

    /// Catalog key of the declaration.
    #[must_use]
    pub fn key(&self) -> ToolKey {
        self.spec().key()
    }

    /// The tool attached by the first successful installation.
    #[must_use]
    pub fn tool(&self) -> Option<&Arc<Tool>> {
        self.attached.get()
    }

    /// Registers the declaration into `registry` and attaches the tool.
    ///
    /// # Errors
    ///
    /// See [`ToolSpec::apply`].
    pub fn install(&self, registry: &ToolRegistry) -> Result<Arc<Tool>, ToolError> {
        let tool = self.spec().apply(registry, &self.signature())?;
        self.attached.get_or_init(|| Arc::clone(&tool));
        Ok(tool)
    }
}

/// Link-time record of a [`ToolDeclaration`].
#[doc(hidden)]
#[derive(Debug, Clone, Copy)]
pub struct DeclaredTool(pub &'static ToolDeclaration);

inventory::collect!(DeclaredTool);

/// Iterates every declaration generated in the final binary.
///
/// Order is unspecified.
pub fn declared_tools() -> impl Iterator<Item = &'static ToolDeclaration> {
    inventory::iter::<DeclaredTool>.into_iter().map(|declared| declared.0)
}
