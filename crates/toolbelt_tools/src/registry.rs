//! The tool catalog.
//!
//! [`ToolRegistry`] stores one [`RegisteredTool`] per [`ToolKey`], in
//! registration order, and answers filtered queries over the metadata.
//! Registration and queries take `&self`; the registry is shared across
//! threads behind an `Arc` or a `static`.
//!
//! # Usage
//!
//! ```ignore
//! use toolbelt_tools::{ToolFilter, ToolRegistry, ToolCategory};
//!
//! let registry = ToolRegistry::new();
//! registry.install_declared()?;
//!
//! // Essential tools plus everything in the ticketing category.
//! let active = registry.active_set(&ToolFilter::new().with_category(ToolCategory::Ticketing));
//! ```

use crate::config::{DuplicatePolicy, RegistryConfig};
use crate::decorator::{ToolDeclaration, declared_tools};
use crate::error::ToolError;
use crate::tool::{Tool, ToolCategory, ToolKey, ToolMetadata};
use crate::toolset::Toolset;
use indexmap::IndexMap;
use indexmap::map::Entry;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A catalog entry: the full tool and its metadata record.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredTool {
    /// Full definition.
    pub tool: Arc<Tool>,
    /// Filtering record.
    pub metadata: Arc<ToolMetadata>,
}

impl RegisteredTool {
    /// Catalog key of the entry.
    #[must_use]
    pub fn key(&self) -> ToolKey {
        self.tool.key()
    }
}

/// Criteria for selecting tools from the catalog.
///
/// Every set criterion must hold. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolFilter {
    /// Only tools of this application.
    pub app_name: Option<String>,
    /// Only tools in one of these categories. Empty means any.
    pub categories: Vec<ToolCategory>,
    /// Only tools whose essential flag equals this.
    pub essential: Option<bool>,
    /// Only tools whose auth requirement equals this.
    pub requires_auth: Option<bool>,
    /// Only tools carrying at least one of these tags. Empty means any.
    pub tags: Vec<String>,
}

impl ToolFilter {
    /// Creates a filter that matches every tool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to one application.
    #[must_use]
    pub fn for_app(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Adds an accepted category.
    #[must_use]
    pub fn with_category(mut self, category: ToolCategory) -> Self {
        self.categories.push(category);
        self
    }

    /// Restricts on the essential flag.
    #[must_use]
    pub fn with_essential(mut self, essential: bool) -> Self {
        self.essential = Some(essential);
        self
    }

    /// Restricts on the auth requirement.
    #[must_use]
    pub fn with_requires_auth(mut self, requires_auth: bool) -> Self {
        self.requires_auth = Some(requires_auth);
        self
    }

    /// Adds an accepted tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Returns whether `metadata` satisfies every criterion.
    #[must_use]
    pub fn matches(&self, metadata: &ToolMetadata) -> bool {
        if let Some(app_name) = &self.app_name
            && *app_name != metadata.app_name
        {
            return false;
        }
        if !self.categories.is_empty() && !self.categories.contains(&metadata.category) {
            return false;
        }
        if self.essential.is_some_and(|essential| essential != metadata.is_essential) {
            return false;
        }
        if self
            .requires_auth
            .is_some_and(|requires_auth| requires_auth != metadata.requires_auth)
        {
            return false;
        }
        self.tags.is_empty() || self.tags.iter().any(|tag| metadata.has_tag(tag))
    }
}

/// One catalog entry in a [`CatalogSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Full definition.
    pub tool: Tool,
    /// Filtering record.
    pub metadata: ToolMetadata,
}

/// Serializable copy of the catalog at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    /// Entries in registration order.
    pub tools: Vec<CatalogEntry>,
}

impl CatalogSnapshot {
    /// Renders the snapshot as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::SerializationError`] if a value cannot be
    /// serialized.
    pub fn to_json(&self) -> Result<String, ToolError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Catalog of registered tools keyed by `(app_name, tool_name)`.
///
/// A key holds exactly one entry; its tool and metadata always share that
/// key. Readers never observe a half-written entry.
#[derive(Default)]
pub struct ToolRegistry {
    config: RegistryConfig,
    entries: RwLock<IndexMap<ToolKey, RegisteredTool>>,
}

impl core::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("config", &self.config)
            .field("tools", &self.keys())
            .finish()
    }
}

impl ToolRegistry {
    /// Creates an empty registry with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Creates an empty registry with `config`.
    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            entries: RwLock::new(IndexMap::new()),
        }
    }

    /// The registry configuration.
    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Stores `tool` and `metadata` under their shared key.
    ///
    /// A re-registered key is replaced in place with a warning, or rejected
    /// under [`DuplicatePolicy::Reject`].
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::ConfigurationError`] if the two records disagree
    /// on the key, or [`ToolError::DuplicateTool`] when a duplicate is
    /// rejected.
    pub fn register(
        &self,
        tool: Tool,
        metadata: ToolMetadata,
    ) -> Result<RegisteredTool, ToolError> {
        let key = tool.key();
        if metadata.key() != key {
            return Err(ToolError::configuration_error(format!(
                "tool '{key}' registered with metadata for '{}'",
                metadata.key()
            )));
        }

        let entry = RegisteredTool {
            tool: Arc::new(tool),
            metadata: Arc::new(metadata),
        };

        match self.entries.write().entry(key.clone()) {
            Entry::Occupied(mut occupied) => match self.config.duplicate_policy {
                DuplicatePolicy::Reject => return Err(ToolError::DuplicateTool(key)),
                DuplicatePolicy::Overwrite => {
                    tracing::warn!(
                        app = %key.app_name,
                        tool = %key.tool_name,
                        previous = %occupied.get().tool.function.qualified_name(),
                        function = %entry.tool.function.qualified_name(),
                        "Tool re-registered, replacing previous entry"
                    );
                    occupied.insert(entry.clone());
                }
            },
            Entry::Vacant(vacant) => {
                vacant.insert(entry.clone());
            }
        }

        tracing::debug!(
            app = %key.app_name,
            tool = %key.tool_name,
            category = %entry.metadata.category,
            essential = entry.metadata.is_essential,
            "Registered tool"
        );
        Ok(entry)
    }

    /// Installs one generated declaration.
    ///
    /// # Errors
    ///
    /// See [`ToolSpec::apply`](crate::ToolSpec::apply).
    pub fn install(&self, declaration: &ToolDeclaration) -> Result<Arc<Tool>, ToolError> {
        declaration.install(self)
    }

    /// Installs every `#[tool]` and `#[toolset]` declaration linked into the
    /// binary and returns how many were installed.
    ///
    /// Declarations are installed in key order, so which of two same-key
    /// declarations wins does not depend on link order.
    ///
    /// # Errors
    ///
    /// Stops at the first declaration that fails to install.
    pub fn install_declared(&self) -> Result<usize, ToolError> {
        let mut declarations: Vec<_> = declared_tools()
            .map(|declaration| (declaration.key(), declaration))
            .collect();
        declarations.sort_by(|(a_key, a), (b_key, b)| {
            a_key
                .cmp(b_key)
                .then_with(|| a.function().qualified_name().cmp(&b.function().qualified_name()))
        });

        for (_, declaration) in &declarations {
            declaration.install(self)?;
        }

        tracing::info!(
            declared = declarations.len(),
            registered = self.len(),
            "Installed declared tools"
        );
        Ok(declarations.len())
    }

    /// Installs the declarations of toolset `T` and returns how many were
    /// installed.
    ///
    /// # Errors
    ///
    /// Stops at the first declaration that fails to install.
    pub fn install_toolset<T: Toolset>(&self) -> Result<usize, ToolError> {
        let declarations = T::declarations();
        for declaration in &declarations {
            declaration.install(self)?;
        }
        Ok(declarations.len())
    }

    /// Returns the entry for `app_name.tool_name`.
    #[must_use]
    pub fn get(&self, app_name: &str, tool_name: &str) -> Option<RegisteredTool> {
        self.entries
            .read()
            .get(&ToolKey::new(app_name, tool_name))
            .cloned()
    }

    /// Returns the tool for `app_name.tool_name`.
    #[must_use]
    pub fn tool(&self, app_name: &str, tool_name: &str) -> Option<Arc<Tool>> {
        self.get(app_name, tool_name).map(|entry| entry.tool)
    }

    /// Returns whether `app_name.tool_name` is registered.
    #[must_use]
    pub fn contains(&self, app_name: &str, tool_name: &str) -> bool {
        self.entries
            .read()
            .contains_key(&ToolKey::new(app_name, tool_name))
    }

    /// Number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns whether no tool is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Registered keys in registration order.
    #[must_use]
    pub fn keys(&self) -> Vec<ToolKey> {
        self.entries.read().keys().cloned().collect()
    }

    /// Every entry in registration order.
    #[must_use]
    pub fn entries(&self) -> Vec<RegisteredTool> {
        self.entries.read().values().cloned().collect()
    }

    /// Every tool definition in registration order.
    #[must_use]
    pub fn tools(&self) -> Vec<Arc<Tool>> {
        self.entries
            .read()
            .values()
            .map(|entry| Arc::clone(&entry.tool))
            .collect()
    }

    /// Every metadata record in registration order.
    #[must_use]
    pub fn metadata(&self) -> Vec<Arc<ToolMetadata>> {
        self.entries
            .read()
            .values()
            .map(|entry| Arc::clone(&entry.metadata))
            .collect()
    }

    /// Entries matching `filter`, in registration order.
    #[must_use]
    pub fn select(&self, filter: &ToolFilter) -> Vec<RegisteredTool> {
        self.entries
            .read()
            .values()
            .filter(|entry| filter.matches(&entry.metadata))
            .cloned()
            .collect()
    }

    /// Metadata of the tools in `category`.
    #[must_use]
    pub fn by_category(&self, category: ToolCategory) -> Vec<Arc<ToolMetadata>> {
        self.select_metadata(&ToolFilter::new().with_category(category))
    }

    /// Metadata of the essential tools.
    #[must_use]
    pub fn essential(&self) -> Vec<Arc<ToolMetadata>> {
        self.select_metadata(&ToolFilter::new().with_essential(true))
    }

    /// Metadata of the tools whose auth requirement equals `requires_auth`.
    #[must_use]
    pub fn by_auth(&self, requires_auth: bool) -> Vec<Arc<ToolMetadata>> {
        self.select_metadata(&ToolFilter::new().with_requires_auth(requires_auth))
    }

    /// Entries registered under `app_name`.
    #[must_use]
    pub fn for_app(&self, app_name: &str) -> Vec<RegisteredTool> {
        self.select(&ToolFilter::new().for_app(app_name))
    }

    /// The tools to load for a session: every essential tool plus the
    /// entries matching `filter`, each once, in registration order.
    #[must_use]
    pub fn active_set(&self, filter: &ToolFilter) -> Vec<RegisteredTool> {
        self.entries
            .read()
            .values()
            .filter(|entry| entry.metadata.is_essential || filter.matches(&entry.metadata))
            .cloned()
            .collect()
    }

    /// Copies the catalog into a serializable snapshot.
    #[must_use]
    pub fn snapshot(&self) -> CatalogSnapshot {
        let tools = self
            .entries
            .read()
            .values()
            .map(|entry| CatalogEntry {
                tool: Tool::clone(&entry.tool),
                metadata: ToolMetadata::clone(&entry.metadata),
            })
            .collect();
        CatalogSnapshot { tools }
    }

    fn select_metadata(&self, filter: &ToolFilter) -> Vec<Arc<ToolMetadata>> {
        self.entries
            .read()
            .values()
            .filter(|entry| filter.matches(&entry.metadata))
            .map(|entry| Arc::clone(&entry.metadata))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decorator::tool;
    use crate::signature::Signature;
    use crate::tool::FunctionRef;

    fn signature(name: &'static str) -> Signature {
        Signature::new(FunctionRef::from_static(name, "helpdesk::tools"))
            .param("ticket_id", "u64")
    }

    fn populated() -> ToolRegistry {
        let registry = ToolRegistry::new();
        tool("helpdesk", "get_ticket")
            .with_category(ToolCategory::Ticketing)
            .with_essential(true)
            .with_tags(["read"])
            .apply(&registry, &signature("get_ticket"))
            .unwrap();
        tool("helpdesk", "close_ticket")
            .with_category(ToolCategory::Ticketing)
            .with_tags(["write"])
            .apply(&registry, &signature("close_ticket"))
            .unwrap();
        tool("wiki", "search")
            .with_category(ToolCategory::Search)
            .with_requires_auth(false)
            .with_tags(["read"])
            .apply(&registry, &signature("search"))
            .unwrap();
        registry
    }

    fn names(entries: &[RegisteredTool]) -> Vec<String> {
        entries.iter().map(|entry| entry.key().to_string()).collect()
    }

    #[test]
    fn lookups() {
        let registry = populated();
        assert_eq!(registry.len(), 3);
        assert!(registry.contains("helpdesk", "get_ticket"));
        assert!(!registry.contains("helpdesk", "search"));
        assert!(registry.get("wiki", "missing").is_none());

        let entry = registry.get("wiki", "search").unwrap();
        assert_eq!(entry.tool.key(), entry.metadata.key());
        assert_eq!(
            registry.keys(),
            vec![
                ToolKey::new("helpdesk", "get_ticket"),
                ToolKey::new("helpdesk", "close_ticket"),
                ToolKey::new("wiki", "search"),
            ]
        );
    }

    #[test]
    fn metadata_queries() {
        let registry = populated();

        let ticketing = registry.by_category(ToolCategory::Ticketing);
        assert_eq!(ticketing.len(), 2);
        assert!(registry.by_category(ToolCategory::Calendar).is_empty());

        let essential = registry.essential();
        assert_eq!(essential.len(), 1);
        assert_eq!(essential[0].tool_name, "get_ticket");

        assert_eq!(registry.by_auth(false).len(), 1);
        assert_eq!(registry.by_auth(true).len(), 2);
        assert_eq!(registry.for_app("helpdesk").len(), 2);
    }

    #[test]
    fn filter_combines_criteria() {
        let registry = populated();

        let read_only = ToolFilter::new().with_tag("read");
        assert_eq!(
            names(&registry.select(&read_only)),
            vec!["helpdesk.get_ticket", "wiki.search"]
        );

        let filter = ToolFilter::new()
            .for_app("helpdesk")
            .with_tag("read")
            .with_tag("write")
            .with_essential(false);
        assert_eq!(names(&registry.select(&filter)), vec!["helpdesk.close_ticket"]);

        assert_eq!(registry.select(&ToolFilter::new()).len(), 3);
    }

    #[test]
    fn active_set_includes_essentials_once() {
        let registry = populated();

        let search = ToolFilter::new().with_category(ToolCategory::Search);
        assert_eq!(
            names(&registry.active_set(&search)),
            vec!["helpdesk.get_ticket", "wiki.search"]
        );

        let ticketing = ToolFilter::new().with_category(ToolCategory::Ticketing);
        assert_eq!(
            names(&registry.active_set(&ticketing)),
            vec!["helpdesk.get_ticket", "helpdesk.close_ticket"]
        );
    }

    #[test]
    fn duplicate_overwrites_in_place() {
        let registry = populated();
        tool("helpdesk", "get_ticket")
            .with_description("Replacement.")
            .with_category(ToolCategory::Database)
            .apply(&registry, &signature("get_ticket_v2"))
            .unwrap();

        assert_eq!(registry.len(), 3);
        let entry = registry.get("helpdesk", "get_ticket").unwrap();
        assert_eq!(entry.tool.description, "Replacement.");
        assert_eq!(entry.tool.function.name, "get_ticket_v2");
        assert_eq!(entry.metadata.category, ToolCategory::Database);
        assert_eq!(registry.keys()[0], ToolKey::new("helpdesk", "get_ticket"));
        assert!(registry.essential().is_empty());
    }

    #[test]
    fn duplicate_rejected_by_policy() {
        let registry = ToolRegistry::with_config(
            RegistryConfig::new().with_duplicate_policy(DuplicatePolicy::Reject),
        );
        let spec = tool("helpdesk", "get_ticket");
        spec.apply(&registry, &signature("get_ticket")).unwrap();

        let err = spec.apply(&registry, &signature("get_ticket")).unwrap_err();
        assert!(matches!(&err, ToolError::DuplicateTool(key) if key.tool_name == "get_ticket"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn mismatched_records_are_rejected() {
        let registry = ToolRegistry::new();
        let (tool, mut metadata) =
            crate::synthesize::synthesize(&tool("helpdesk", "get_ticket"), &signature("get_ticket"))
                .unwrap();
        metadata.tool_name = "other".to_string();

        assert!(matches!(
            registry.register(tool, metadata),
            Err(ToolError::ConfigurationError(_))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn snapshot_serializes_catalog() {
        let registry = populated();
        let snapshot = registry.snapshot();
        assert_eq!(snapshot.tools.len(), 3);

        let value: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(value["tools"][0]["tool"]["tool_name"], "get_ticket");
        assert_eq!(value["tools"][0]["metadata"]["category"], "ticketing");
        assert_eq!(value["tools"][0]["tool"]["parameters"][0]["type"], "integer");
    }

    #[test]
    fn concurrent_registration_keeps_one_entry_per_key() {
        let registry = ToolRegistry::new();
        std::thread::scope(|scope| {
            for worker in 0..8 {
                let registry = &registry;
                scope.spawn(move || {
                    for n in 0..16 {
                        let name = format!("tool_{}", n % 4);
                        tool(format!("app_{}", worker % 2), name)
                            .apply(registry, &signature("concurrent"))
                            .unwrap();
                        let _ = registry.select(&ToolFilter::new().with_essential(false));
                    }
                });
            }
        });

        assert_eq!(registry.len(), 8);
        for entry in registry.entries() {
            assert_eq!(entry.tool.key(), entry.metadata.key());
        }
    }
}
