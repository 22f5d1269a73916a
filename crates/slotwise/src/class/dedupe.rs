//! Class list deduplication.
//!
//! [`ClassMerger`] removes tokens superseded by later tokens controlling the
//! same visual property. Tokens are compared by their [`ConflictKey`]: the
//! modifier context, the important flag and the conflict group. For every
//! key only the last-declared token survives; unclassified tokens are always
//! kept, and exact duplicates collapse to their last occurrence. Survivors
//! keep their relative order.

use once_cell::sync::Lazy;
use std::borrow::Cow;
use std::collections::HashSet;

use super::classify::{
    arbitrary_property, normalize_modifiers, parse_token, strip_negative, ConflictGroup,
    ConflictKey, TokenClass,
};
use super::config::MergeConfig;
use super::groups::{builtin_group, superseded_by};

static DEFAULT_MERGER: Lazy<ClassMerger> = Lazy::new(ClassMerger::new);

/// Classifies and deduplicates utility class tokens.
///
/// # Example
///
/// ```rust
/// use slotwise::ClassMerger;
///
/// let merger = ClassMerger::new();
/// assert_eq!(merger.merge("bg-red-500 px-2 bg-blue-500"), "px-2 bg-blue-500");
/// assert_eq!(merger.merge("hover:bg-red-500 bg-blue-500"), "hover:bg-red-500 bg-blue-500");
/// ```
#[derive(Debug, Clone)]
pub struct ClassMerger {
    config: MergeConfig,
    // (member, group), longest member first
    custom: Vec<(String, Cow<'static, str>)>,
}

impl ClassMerger {
    /// Creates a merger with the default configuration.
    pub fn new() -> Self {
        Self::with_config(MergeConfig::default())
    }

    /// Creates a merger with a custom configuration.
    pub fn with_config(config: MergeConfig) -> Self {
        let mut custom: Vec<(String, Cow<'static, str>)> = config
            .class_groups
            .iter()
            .flat_map(|(group, members)| {
                members
                    .iter()
                    .map(move |member| (member.clone(), Cow::Owned(group.clone())))
            })
            .collect();
        custom.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self { config, custom }
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Classifies a single token.
    pub fn classify(&self, token: &str) -> TokenClass {
        let parsed = parse_token(token, &self.config.separator);
        TokenClass {
            modifiers: normalize_modifiers(&parsed.modifiers),
            important: parsed.important,
            group: self.group_of(parsed.base),
        }
    }

    fn group_of(&self, base: &str) -> ConflictGroup {
        if let Some(property) = arbitrary_property(base) {
            return ConflictGroup::Named(Cow::Owned(format!("[{}]", property)));
        }
        let base = strip_negative(base);
        let custom = self
            .custom
            .iter()
            .find(|(member, _)| member_matches(base, member));
        if let Some((_, group)) = custom {
            return ConflictGroup::Named(group.clone());
        }
        match builtin_group(base) {
            Some(group) => ConflictGroup::Named(Cow::Borrowed(group)),
            None => ConflictGroup::None,
        }
    }

    fn superseded(&self, group: &str) -> Vec<Cow<'static, str>> {
        let mut groups: Vec<Cow<'static, str>> = superseded_by(group)
            .iter()
            .map(|g| Cow::Borrowed(*g))
            .collect();
        if let Some(extra) = self.config.conflicting_groups.get(group) {
            groups.extend(extra.iter().map(|g| Cow::Owned(g.clone())));
        }
        groups
    }

    /// Deduplicates an ordered token list.
    ///
    /// Empty tokens are dropped. When the configuration is disabled the
    /// tokens are returned as written.
    pub fn dedupe<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<String> {
        if !self.config.enabled {
            return tokens
                .iter()
                .map(|t| -> &str { t.as_ref() })
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect();
        }

        let mut seen: HashSet<&str> = HashSet::new();
        let mut taken: HashSet<ConflictKey> = HashSet::new();
        let mut kept: Vec<&str> = Vec::with_capacity(tokens.len());

        // Walk backwards so the first token seen for a key is the last declared.
        for token in tokens.iter().rev() {
            let token: &str = token.as_ref();
            if token.is_empty() || !seen.insert(token) {
                continue;
            }
            if let Some(key) = self.classify(token).conflict_key() {
                if taken.contains(&key) {
                    continue;
                }
                for group in self.superseded(&key.group) {
                    taken.insert(key.with_group(group));
                }
                taken.insert(key);
            }
            kept.push(token);
        }

        kept.reverse();
        kept.into_iter().map(String::from).collect()
    }

    /// Deduplicates a whitespace-separated class string.
    pub fn merge(&self, classes: &str) -> String {
        let tokens: Vec<&str> = classes.split_whitespace().collect();
        self.dedupe(&tokens).join(" ")
    }
}

impl Default for ClassMerger {
    fn default() -> Self {
        Self::new()
    }
}

fn member_matches(base: &str, member: &str) -> bool {
    base == member
        || base
            .strip_prefix(member)
            .is_some_and(|rest| rest.starts_with('-'))
}

/// The merger used by the free functions.
pub(crate) fn default_merger() -> &'static ClassMerger {
    &DEFAULT_MERGER
}

/// Classifies a token with the default configuration.
pub fn classify(token: &str) -> TokenClass {
    DEFAULT_MERGER.classify(token)
}

/// Deduplicates tokens with the default configuration.
pub fn dedupe<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    DEFAULT_MERGER.dedupe(tokens)
}

/// Deduplicates a class string with the default configuration.
pub fn merge_classes(classes: &str) -> String {
    DEFAULT_MERGER.merge(classes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_background_wins() {
        let tokens = ["bg-red-500", "px-2", "bg-blue-500"];
        assert_eq!(dedupe(&tokens), vec!["px-2", "bg-blue-500"]);
    }

    #[test]
    fn test_modifier_contexts_do_not_conflict() {
        assert_eq!(
            merge_classes("hover:bg-red-500 bg-blue-500"),
            "hover:bg-red-500 bg-blue-500"
        );
        assert_eq!(
            merge_classes("hover:bg-red-500 hover:bg-blue-500"),
            "hover:bg-blue-500"
        );
    }

    #[test]
    fn test_modifier_order_is_normalized() {
        assert_eq!(
            merge_classes("hover:focus:p-2 focus:hover:p-4"),
            "focus:hover:p-4"
        );
    }

    #[test]
    fn test_unclassified_tokens_are_kept() {
        assert_eq!(merge_classes("card bg-red-500 card-body bg-white"), "card card-body bg-white");
    }

    #[test]
    fn test_exact_duplicates_collapse_to_last() {
        assert_eq!(merge_classes("card flex card"), "flex card");
        assert_eq!(merge_classes("p-2 m-1 p-2"), "m-1 p-2");
    }

    #[test]
    fn test_shorthand_supersedes_axis() {
        assert_eq!(merge_classes("px-2 py-1 p-4"), "p-4");
        assert_eq!(merge_classes("p-4 px-2"), "p-4 px-2");
        assert_eq!(merge_classes("pl-1 px-3"), "px-3");
    }

    #[test]
    fn test_value_shape_disambiguation() {
        assert_eq!(merge_classes("text-sm text-red-500 text-lg"), "text-red-500 text-lg");
        assert_eq!(
            merge_classes("border-2 border-red-500 border-4"),
            "border-red-500 border-4"
        );
    }

    #[test]
    fn test_font_size_with_line_height() {
        assert_eq!(
            merge_classes("text-red-500 text-sm/6"),
            "text-red-500 text-sm/6"
        );
        assert_eq!(merge_classes("text-lg text-sm/6"), "text-sm/6");
        assert_eq!(merge_classes("leading-7 text-2xl/8"), "text-2xl/8");
    }

    #[test]
    fn test_important_does_not_conflict_with_plain() {
        assert_eq!(merge_classes("!p-2 p-4"), "!p-2 p-4");
        assert_eq!(merge_classes("!p-2 !p-4"), "!p-4");
    }

    #[test]
    fn test_negative_values_share_group() {
        assert_eq!(merge_classes("-mt-2 mt-4"), "mt-4");
    }

    #[test]
    fn test_arbitrary_properties() {
        assert_eq!(
            merge_classes("[mask-type:luminance] [mask-type:alpha]"),
            "[mask-type:alpha]"
        );
    }

    #[test]
    fn test_display_keywords_conflict() {
        assert_eq!(merge_classes("flex hidden"), "hidden");
        assert_eq!(merge_classes("md:flex hidden"), "md:flex hidden");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(merge_classes(""), "");
        assert_eq!(merge_classes("   "), "");
        assert!(dedupe::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_disabled_config_keeps_everything() {
        let merger = ClassMerger::with_config(MergeConfig::new().enabled(false));
        assert_eq!(merger.merge("p-2 p-4 p-2"), "p-2 p-4 p-2");
    }

    #[test]
    fn test_custom_groups() {
        let merger = ClassMerger::with_config(
            MergeConfig::new()
                .class_group("elevation", ["elevation"])
                .conflict("elevation", ["shadow"]),
        );
        assert_eq!(merger.merge("elevation-1 elevation-3"), "elevation-3");
        assert_eq!(merger.merge("shadow-lg elevation-2"), "elevation-2");
        assert_eq!(merger.merge("elevation-2 shadow-lg"), "elevation-2 shadow-lg");
        assert_eq!(merger.classify("elevation").group.as_str(), "elevation");
    }

    #[test]
    fn test_custom_separator() {
        let merger = ClassMerger::with_config(MergeConfig::new().separator("__"));
        assert_eq!(merger.merge("hover__p-2 hover__p-4 p-1"), "hover__p-4 p-1");
    }

    #[test]
    fn test_classify_reports_context() {
        let class = classify("md:hover:!-mt-2");
        assert_eq!(class.modifiers, vec!["hover", "md"]);
        assert!(class.important);
        assert_eq!(class.group.as_str(), "mt");
        assert_eq!(class.context(), "hover:md");
    }
}
