//! Registry configuration.

use serde::{Deserialize, Serialize};

/// What the registry does when a key is registered a second time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Replace the existing entry and log a warning. Last writer wins.
    #[default]
    Overwrite,
    /// Keep the existing entry and return [`ToolError::DuplicateTool`].
    ///
    /// [`ToolError::DuplicateTool`]: crate::ToolError::DuplicateTool
    Reject,
}

/// Configuration of a [`ToolRegistry`](crate::ToolRegistry).
///
/// Deserializable from any serde source; missing fields take their defaults.
///
/// ```
/// use toolbelt_tools::{DuplicatePolicy, RegistryConfig};
///
/// let config: RegistryConfig = serde_json::from_str(r#"{"duplicate_policy": "reject"}"#).unwrap();
/// assert_eq!(config.duplicate_policy, DuplicatePolicy::Reject);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Handling of re-registered keys.
    pub duplicate_policy: DuplicatePolicy,
}

impl RegistryConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the duplicate registration policy.
    #[must_use]
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: RegistryConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RegistryConfig::default());
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Overwrite);
    }

    #[test]
    fn builder_sets_policy() {
        let config = RegistryConfig::new().with_duplicate_policy(DuplicatePolicy::Reject);
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Reject);
        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            serde_json::json!({ "duplicate_policy": "reject" })
        );
    }
}
