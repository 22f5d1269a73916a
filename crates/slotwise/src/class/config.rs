//! Configuration for class conflict resolution.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::document::{ConfigError, ConfigErrorKind};

/// Default separator between modifiers and the utility (`hover:bg-red-500`).
pub const DEFAULT_SEPARATOR: &str = ":";

/// Settings for the [`ClassMerger`](crate::ClassMerger).
///
/// Custom groups let projects teach the deduplicator about utilities the
/// built-in table does not know (plugin classes, design-system shorthands).
/// A member matches a token base that equals it or starts with it followed
/// by `-`; the longest matching member wins, and custom groups are checked
/// before the built-in ones.
///
/// # Example
///
/// ```rust
/// use slotwise::MergeConfig;
///
/// let config = MergeConfig::from_yaml(r#"
/// classGroups:
///   elevation: [elevation]
/// conflictingGroups:
///   elevation: [shadow]
/// "#).unwrap();
///
/// assert!(config.enabled);
/// assert_eq!(config.separator, ":");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct MergeConfig {
    /// When false, conflicting classes are kept as written.
    pub enabled: bool,
    /// Separator between modifiers and the utility.
    pub separator: String,
    /// Custom conflict groups: group name to member bases or prefixes.
    pub class_groups: IndexMap<String, Vec<String>>,
    /// Extra supersession edges: a group to the groups it overrides.
    pub conflicting_groups: IndexMap<String, Vec<String>>,
}

impl MergeConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Turns conflict resolution on or off.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the modifier separator.
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Adds (or extends) a custom conflict group.
    pub fn class_group<I, S>(mut self, group: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.class_groups
            .entry(group.into())
            .or_default()
            .extend(members.into_iter().map(Into::into));
        self
    }

    /// Declares that a later token of `group` removes earlier tokens of `overrides`.
    pub fn conflict<I, S>(mut self, group: impl Into<String>, overrides: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conflicting_groups
            .entry(group.into())
            .or_default()
            .extend(overrides.into_iter().map(Into::into));
        self
    }

    /// Parses a configuration from YAML.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text).map_err(ConfigError::syntax)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a configuration from JSON.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(ConfigError::syntax)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the separator and every group member are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.separator.is_empty() || self.separator.chars().any(char::is_whitespace) {
            return Err(ConfigError::shape(
                "separator",
                "a non-empty separator without whitespace",
            ));
        }
        for (group, members) in &self.class_groups {
            if group.is_empty() || group == "none" {
                return Err(ConfigError::new(
                    "classGroups",
                    ConfigErrorKind::ReservedName {
                        name: group.clone(),
                    },
                ));
            }
            for member in members {
                if member.is_empty() || member.chars().any(char::is_whitespace) {
                    return Err(ConfigError::new(
                        format!("classGroups.{}", group),
                        ConfigErrorKind::InvalidName {
                            name: member.clone(),
                        },
                    ));
                }
            }
        }
        Ok(())
    }
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            separator: DEFAULT_SEPARATOR.to_string(),
            class_groups: IndexMap::new(),
            conflicting_groups: IndexMap::new(),
        }
    }
}
