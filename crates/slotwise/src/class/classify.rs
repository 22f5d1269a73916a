//! Token classification.
//!
//! A token such as `md:hover:!-mt-2` is split into its modifier context
//! (`hover`, `md`), an important flag and a base (`mt-2`). The base decides
//! the [`ConflictGroup`]; the context and the flag scope it, so `hover:bg-x`
//! only ever conflicts with another `hover:bg-*`.

use std::borrow::Cow;

/// The visual property a token controls.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConflictGroup {
    /// Unclassified token; never deduplicated against others.
    None,
    /// A named group such as `bg-color`, `px` or `font-size`.
    Named(Cow<'static, str>),
}

impl ConflictGroup {
    /// Returns true for the `none` group.
    pub fn is_none(&self) -> bool {
        matches!(self, ConflictGroup::None)
    }

    /// The group name, or `"none"`.
    pub fn as_str(&self) -> &str {
        match self {
            ConflictGroup::None => "none",
            ConflictGroup::Named(name) => name,
        }
    }
}

impl std::fmt::Display for ConflictGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The classification of a single token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenClass {
    /// Modifiers in normalized order.
    pub modifiers: Vec<String>,
    /// Whether the token carries the `!` important marker.
    pub important: bool,
    /// The conflict group of the base.
    pub group: ConflictGroup,
}

impl TokenClass {
    /// The modifier context joined with `:`, empty for bare tokens.
    pub fn context(&self) -> String {
        self.modifiers.join(":")
    }

    /// Key under which this token conflicts with others, `None` for group "none".
    pub fn conflict_key(&self) -> Option<ConflictKey> {
        match &self.group {
            ConflictGroup::None => None,
            ConflictGroup::Named(name) => Some(ConflictKey {
                context: self.context(),
                important: self.important,
                group: name.clone(),
            }),
        }
    }
}

/// Tokens sharing a conflict key are deduplicated: only the last survives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConflictKey {
    pub context: String,
    pub important: bool,
    pub group: Cow<'static, str>,
}

impl ConflictKey {
    /// The same context and importance, another group.
    pub(crate) fn with_group(&self, group: Cow<'static, str>) -> Self {
        Self {
            context: self.context.clone(),
            important: self.important,
            group,
        }
    }
}

/// A token split into modifiers and base, before group lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedToken<'a> {
    pub modifiers: Vec<&'a str>,
    pub important: bool,
    pub base: &'a str,
}

/// Splits `token` on `separator`, ignoring separators inside `[...]` and `(...)`.
pub(crate) fn parse_token<'a>(token: &'a str, separator: &str) -> ParsedToken<'a> {
    let mut modifiers = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut index = 0;
    let bytes = token.as_bytes();

    while index < bytes.len() {
        match bytes[index] {
            b'[' | b'(' => depth += 1,
            b']' | b')' => depth = depth.saturating_sub(1),
            _ if depth == 0
                && !separator.is_empty()
                && token.is_char_boundary(index)
                && token[index..].starts_with(separator) =>
            {
                modifiers.push(&token[start..index]);
                index += separator.len();
                start = index;
                continue;
            }
            _ => {}
        }
        index += 1;
    }

    let mut base = &token[start..];
    let mut important = false;
    if let Some(stripped) = base.strip_prefix('!') {
        base = stripped;
        important = true;
    } else if let Some(stripped) = base.strip_suffix('!') {
        base = stripped;
        important = true;
    }

    ParsedToken {
        modifiers,
        important,
        base,
    }
}

/// Sorts modifiers so their written order does not matter, except that
/// arbitrary variants (`[&>*]`) stay in place and fence off the runs around
/// them.
pub(crate) fn normalize_modifiers(modifiers: &[&str]) -> Vec<String> {
    let mut normalized = Vec::with_capacity(modifiers.len());
    let mut run: Vec<&str> = Vec::new();

    for &modifier in modifiers {
        if modifier.starts_with('[') {
            run.sort_unstable();
            normalized.extend(run.drain(..).map(str::to_string));
            normalized.push(modifier.to_string());
        } else {
            run.push(modifier);
        }
    }
    run.sort_unstable();
    normalized.extend(run.into_iter().map(str::to_string));
    normalized
}

/// Strips a negative sign from a base (`-mt-2` is grouped like `mt-2`).
pub(crate) fn strip_negative(base: &str) -> &str {
    match base.strip_prefix('-') {
        Some(rest) if !rest.is_empty() && !rest.starts_with('-') => rest,
        _ => base,
    }
}

/// Returns the property name of an arbitrary property (`[mask-type:alpha]`).
pub(crate) fn arbitrary_property(base: &str) -> Option<&str> {
    let inner = base.strip_prefix('[')?.strip_suffix(']')?;
    let (property, value) = inner.split_once(':')?;
    let valid = !property.is_empty()
        && !value.is_empty()
        && property
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    valid.then_some(property)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bare_token() {
        let parsed = parse_token("bg-red-500", ":");
        assert!(parsed.modifiers.is_empty());
        assert!(!parsed.important);
        assert_eq!(parsed.base, "bg-red-500");
    }

    #[test]
    fn parse_stacked_modifiers() {
        let parsed = parse_token("md:hover:bg-red-500", ":");
        assert_eq!(parsed.modifiers, vec!["md", "hover"]);
        assert_eq!(parsed.base, "bg-red-500");
    }

    #[test]
    fn parse_ignores_separator_inside_brackets() {
        let parsed = parse_token("[&:nth-child(3)]:bg-[url(a:b)]", ":");
        assert_eq!(parsed.modifiers, vec!["[&:nth-child(3)]"]);
        assert_eq!(parsed.base, "bg-[url(a:b)]");
    }

    #[test]
    fn parse_important_marker() {
        assert!(parse_token("!p-2", ":").important);
        assert!(parse_token("hover:p-2!", ":").important);
        assert_eq!(parse_token("hover:!p-2", ":").base, "p-2");
    }

    #[test]
    fn parse_custom_separator() {
        let parsed = parse_token("hover__p-2", "__");
        assert_eq!(parsed.modifiers, vec!["hover"]);
        assert_eq!(parsed.base, "p-2");
    }

    #[test]
    fn modifiers_are_sorted_between_arbitrary_variants() {
        assert_eq!(normalize_modifiers(&["hover", "focus"]), vec!["focus", "hover"]);
        assert_eq!(
            normalize_modifiers(&["hover", "[&>*]", "md", "dark"]),
            vec!["hover", "[&>*]", "dark", "md"]
        );
    }

    #[test]
    fn negative_sign_is_stripped() {
        assert_eq!(strip_negative("-mt-2"), "mt-2");
        assert_eq!(strip_negative("mt-2"), "mt-2");
        assert_eq!(strip_negative("-"), "-");
    }

    #[test]
    fn arbitrary_property_name() {
        assert_eq!(arbitrary_property("[mask-type:luminance]"), Some("mask-type"));
        assert_eq!(arbitrary_property("[&>*]"), None);
        assert_eq!(arbitrary_property("bg-[#fff]"), None);
    }

    #[test]
    fn conflict_key_is_none_for_unclassified() {
        let class = TokenClass {
            modifiers: vec![],
            important: false,
            group: ConflictGroup::None,
        };
        assert!(class.conflict_key().is_none());
        assert_eq!(class.group.to_string(), "none");
    }
}
