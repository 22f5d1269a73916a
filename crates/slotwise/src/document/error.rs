//! Configuration errors.

/// Error returned when a style document or merge configuration is malformed.
///
/// Errors carry the key path of the offending entry (`variants.size.md`) and,
/// when raised while merging an [`ExtensionChain`](crate::ExtensionChain),
/// the index of the layer it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    layer: Option<usize>,
    path: String,
    kind: ConfigErrorKind,
}

/// What went wrong in a [`ConfigError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigErrorKind {
    /// The document text could not be parsed as JSON or YAML.
    Syntax { message: String },
    /// A value has the wrong shape for its position.
    InvalidShape { expected: &'static str },
    /// A top-level or rule key is not recognized.
    UnknownKey { key: String },
    /// A slot or variant name collides with a reserved name.
    ReservedName { name: String },
    /// A slot or variant name is empty or contains whitespace.
    InvalidName { name: String },
    /// A compound rule has no `class` entry.
    MissingClass,
    /// A compound rule has both `class` and `className`.
    AmbiguousClass,
    /// A replace marker appears inside a compound rule.
    ReplaceInCompound,
    /// A default variant value is neither a string nor a boolean.
    InvalidDefault,
}

impl ConfigError {
    pub(crate) fn new(path: impl Into<String>, kind: ConfigErrorKind) -> Self {
        Self {
            layer: None,
            path: path.into(),
            kind,
        }
    }

    pub(crate) fn shape(path: impl Into<String>, expected: &'static str) -> Self {
        Self::new(path, ConfigErrorKind::InvalidShape { expected })
    }

    pub(crate) fn syntax(message: impl ToString) -> Self {
        Self::new(
            String::new(),
            ConfigErrorKind::Syntax {
                message: message.to_string(),
            },
        )
    }

    /// Tags the error with the chain layer it was raised for.
    pub(crate) fn in_layer(mut self, layer: usize) -> Self {
        self.layer = Some(layer);
        self
    }

    /// Index of the offending layer, if raised while merging a chain.
    pub fn layer(&self) -> Option<usize> {
        self.layer
    }

    /// Dotted key path of the offending entry (empty for document-level errors).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The kind of error.
    pub fn kind(&self) -> &ConfigErrorKind {
        &self.kind
    }
}

impl std::fmt::Display for ConfigErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigErrorKind::Syntax { message } => write!(f, "invalid document: {}", message),
            ConfigErrorKind::InvalidShape { expected } => write!(f, "expected {}", expected),
            ConfigErrorKind::UnknownKey { key } => write!(f, "unknown key '{}'", key),
            ConfigErrorKind::ReservedName { name } => {
                write!(f, "'{}' is a reserved name", name)
            }
            ConfigErrorKind::InvalidName { name } => {
                write!(
                    f,
                    "invalid name '{}': names must be non-empty and contain no whitespace",
                    name
                )
            }
            ConfigErrorKind::MissingClass => {
                write!(f, "compound rule has no 'class' entry")
            }
            ConfigErrorKind::AmbiguousClass => {
                write!(f, "compound rule has both 'class' and 'className'")
            }
            ConfigErrorKind::ReplaceInCompound => {
                write!(f, "replace marker is not allowed inside compound rules")
            }
            ConfigErrorKind::InvalidDefault => {
                write!(f, "default variant must be a string or a boolean")
            }
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(layer) = self.layer {
            write!(f, "layer {}: ", layer)?;
        }
        if !self.path.is_empty() {
            write!(f, "{}: ", self.path)?;
        }
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for ConfigError {}

/// Joins a key onto a dotted path.
pub(crate) fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_layer_and_path() {
        let err = ConfigError::shape("variants.size.md", "a class string, list or slot map")
            .in_layer(1);
        assert_eq!(
            err.to_string(),
            "layer 1: variants.size.md: expected a class string, list or slot map"
        );
        assert_eq!(err.layer(), Some(1));
        assert_eq!(err.path(), "variants.size.md");
    }

    #[test]
    fn test_display_without_layer() {
        let err = ConfigError::new(
            "slots.$replace",
            ConfigErrorKind::ReservedName {
                name: "$replace".to_string(),
            },
        );
        let msg = err.to_string();
        assert!(msg.starts_with("slots.$replace: "));
        assert!(msg.contains("reserved"));
    }

    #[test]
    fn test_syntax_error_has_no_path() {
        let err = ConfigError::syntax("unexpected end of input");
        assert_eq!(err.to_string(), "invalid document: unexpected end of input");
        assert!(err.path().is_empty());
    }

    #[test]
    fn test_join_paths() {
        assert_eq!(join("", "slots"), "slots");
        assert_eq!(join("slots", "base"), "slots.base");
    }
}
