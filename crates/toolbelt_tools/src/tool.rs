//! Tool definitions and catalog records.
//!
//! A registered tool is described twice: [`Tool`] carries the full
//! definition (parameters, examples, function reference) and
//! [`ToolMetadata`] is the lightweight record used to filter the catalog
//! without loading parameter schemas. Both share one [`ToolKey`].

use crate::error::ToolError;
use crate::param::ToolParameter;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;

/// Catalog identity of a tool: `(app_name, tool_name)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ToolKey {
    /// Application the tool belongs to.
    pub app_name: String,
    /// Tool name, unique within the application.
    pub tool_name: String,
}

impl ToolKey {
    /// Creates a key from its two parts.
    pub fn new(app_name: impl Into<String>, tool_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            tool_name: tool_name.into(),
        }
    }
}

impl fmt::Display for ToolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.app_name, self.tool_name)
    }
}

/// Group a tool belongs to, used for selective loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolCategory {
    /// General-purpose helpers.
    #[default]
    Utility,
    /// Search and retrieval.
    Search,
    /// Mail, chat and messaging.
    Communication,
    /// Calendars and scheduling.
    Calendar,
    /// Documents and knowledge bases.
    Document,
    /// Ticketing and service desks.
    Ticketing,
    /// File and object storage.
    Storage,
    /// Databases and data warehouses.
    Database,
    /// Source control and code hosting.
    Code,
    /// Reporting and analytics.
    Analytics,
    /// Identity, access and security tooling.
    Security,
}

impl ToolCategory {
    /// Every category, in declaration order.
    pub const ALL: [ToolCategory; 11] = [
        Self::Utility,
        Self::Search,
        Self::Communication,
        Self::Calendar,
        Self::Document,
        Self::Ticketing,
        Self::Storage,
        Self::Database,
        Self::Code,
        Self::Analytics,
        Self::Security,
    ];

    /// Returns the `snake_case` name of the category.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Utility => "utility",
            Self::Search => "search",
            Self::Communication => "communication",
            Self::Calendar => "calendar",
            Self::Document => "document",
            Self::Ticketing => "ticketing",
            Self::Storage => "storage",
            Self::Database => "database",
            Self::Code => "code",
            Self::Analytics => "analytics",
            Self::Security => "security",
        }
    }
}

impl fmt::Display for ToolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolCategory {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ToolError::configuration_error(format!("unknown tool category '{s}'")))
    }
}

/// Reference to the function backing a tool.
///
/// The tool does not own or wrap the function; it only records where it is
/// declared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionRef {
    /// Function name, `Type::method` for toolset methods.
    pub name: Cow<'static, str>,
    /// Module path the function is declared in.
    pub module_path: Cow<'static, str>,
}

impl FunctionRef {
    /// Creates a reference from static strings; usable in `static` items.
    #[must_use]
    pub const fn from_static(name: &'static str, module_path: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            module_path: Cow::Borrowed(module_path),
        }
    }

    /// Creates a reference from owned strings.
    pub fn new(name: impl Into<String>, module_path: impl Into<String>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            module_path: Cow::Owned(module_path.into()),
        }
    }

    /// Returns the fully qualified path, e.g. `my_crate::tools::search`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        if self.module_path.is_empty() {
            self.name.to_string()
        } else {
            format!("{}::{}", self.module_path, self.name)
        }
    }
}

/// Illustrative invocation of a tool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolExample {
    /// Argument values keyed by parameter name.
    pub inputs: Map<String, Value>,
    /// Expected result of the invocation, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<Value>,
    /// Short explanation of what the example shows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ToolExample {
    /// Creates an example with no inputs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an input argument.
    #[must_use]
    pub fn with_input(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.inputs.insert(name.into(), value.into());
        self
    }

    /// Sets the expected output.
    #[must_use]
    pub fn with_expected_output(mut self, output: impl Into<Value>) -> Self {
        self.expected_output = Some(output.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Full definition of a registered tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    /// Application the tool belongs to.
    pub app_name: String,
    /// Tool name, unique within the application.
    pub tool_name: String,
    /// What the tool does. May be empty.
    pub description: String,
    /// The function backing the tool.
    pub function: FunctionRef,
    /// Parameters in source order.
    pub parameters: Vec<ToolParameter>,
    /// Description of the output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<String>,
    /// Illustrative invocations.
    #[serde(default)]
    pub examples: Vec<ToolExample>,
    /// Free-text labels.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Tool {
    /// Returns the catalog key of this tool.
    #[must_use]
    pub fn key(&self) -> ToolKey {
        ToolKey::new(&self.app_name, &self.tool_name)
    }

    /// Returns a parameter by name.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&ToolParameter> {
        self.parameters.iter().find(|param| param.name == name)
    }

    /// Returns the names of the required parameters, in order.
    #[must_use]
    pub fn required_parameters(&self) -> Vec<&str> {
        self.parameters
            .iter()
            .filter(|param| param.required)
            .map(|param| param.name.as_str())
            .collect()
    }

    /// Renders a one-line signature for prompts.
    ///
    /// Format: `- app.tool(param: type, optional?: type): description`
    #[must_use]
    pub fn to_prompt_line(&self) -> String {
        let params: Vec<String> = self
            .parameters
            .iter()
            .map(|param| {
                let optional = if param.required { "" } else { "?" };
                format!("{}{}: {}", param.name, optional, param.param_type)
            })
            .collect();

        format!(
            "- {}({}): {}",
            self.key(),
            params.join(", "),
            self.description
        )
    }
}

/// Lightweight catalog record used for filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolMetadata {
    /// Application the tool belongs to.
    pub app_name: String,
    /// Tool name, unique within the application.
    pub tool_name: String,
    /// What the tool does. May be empty.
    pub description: String,
    /// Group used for selective loading.
    pub category: ToolCategory,
    /// Essential tools are loaded regardless of on-demand selection.
    pub is_essential: bool,
    /// Whether the tool needs caller credentials.
    pub requires_auth: bool,
    /// Free-text labels, identical to the tool's.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ToolMetadata {
    /// Returns the catalog key of this record.
    #[must_use]
    pub fn key(&self) -> ToolKey {
        ToolKey::new(&self.app_name, &self.tool_name)
    }

    /// Returns whether the record carries `tag`.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::param::ParameterType;

    fn search_tool() -> Tool {
        Tool {
            app_name: "wiki".to_string(),
            tool_name: "search".to_string(),
            description: "Search pages.".to_string(),
            function: FunctionRef::from_static("search", "wiki::tools"),
            parameters: vec![
                ToolParameter::required("query", ParameterType::String),
                ToolParameter::optional("limit", ParameterType::Integer, 10.into()),
            ],
            returns: None,
            examples: Vec::new(),
            tags: Vec::new(),
        }
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("ticketing".parse::<ToolCategory>().unwrap(), ToolCategory::Ticketing);
        assert_eq!(" Utility ".parse::<ToolCategory>().unwrap(), ToolCategory::Utility);
        assert!("gardening".parse::<ToolCategory>().is_err());
        for category in ToolCategory::ALL {
            assert_eq!(category.as_str().parse::<ToolCategory>().unwrap(), category);
        }
    }

    #[test]
    fn category_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(ToolCategory::Communication).unwrap(),
            "communication"
        );
        assert_eq!(ToolCategory::default(), ToolCategory::Utility);
    }

    #[test]
    fn prompt_line_marks_optional_parameters() {
        assert_eq!(
            search_tool().to_prompt_line(),
            "- wiki.search(query: string, limit?: integer): Search pages."
        );
    }

    #[test]
    fn function_ref_qualified_name() {
        let function = FunctionRef::from_static("search", "wiki::tools");
        assert_eq!(function.qualified_name(), "wiki::tools::search");
        assert_eq!(FunctionRef::new("search", "").qualified_name(), "search");
    }

    #[test]
    fn tool_lookups() {
        let tool = search_tool();
        assert_eq!(tool.key(), ToolKey::new("wiki", "search"));
        assert_eq!(tool.required_parameters(), vec!["query"]);
        assert!(tool.parameter("limit").is_some());
        assert!(tool.parameter("offset").is_none());
    }

    #[test]
    fn example_builder_keeps_input_order() {
        let example = ToolExample::new()
            .with_input("query", "rust")
            .with_input("limit", 3)
            .with_expected_output(serde_json::json!(["Rust (language)"]));
        let names: Vec<_> = example.inputs.keys().cloned().collect();
        assert_eq!(names, vec!["query", "limit"]);
        assert!(example.expected_output.is_some());
    }
}
