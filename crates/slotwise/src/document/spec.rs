//! Class specifications.

use indexmap::IndexMap;

/// Key of the replace marker in document text: `{ "$replace": "..." }`.
pub const REPLACE_MARKER: &str = "$replace";

/// Slot targeted by bare class strings in variants and compound rules.
pub const BASE_SLOT: &str = "base";

/// A fragment of classes, possibly spread over several slots.
///
/// Every spec reduces to an ordered map of slot name to token list. A bare
/// string or list targets the *default slot* of the position it appears in:
/// the slot's own name under `slots`, and [`BASE_SLOT`] inside variants and
/// compound rules.
///
/// # Example
///
/// ```rust
/// use slotwise::ClassSpec;
///
/// let spec = ClassSpec::slots([("base", "px-2 py-1"), ("icon", "size-4")]);
/// let reduced = spec.reduce("base");
///
/// assert_eq!(reduced["base"].tokens, vec!["px-2", "py-1"]);
/// assert_eq!(reduced["icon"].tokens, vec!["size-4"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassSpec {
    /// Tokens for the default slot.
    Tokens(Vec<String>),
    /// Specs applied in order.
    List(Vec<ClassSpec>),
    /// Specs keyed by the slot they target.
    Slots(IndexMap<String, ClassSpec>),
    /// Discards what earlier layers accumulated for the targeted slots.
    Replace(Box<ClassSpec>),
}

/// The tokens a spec contributes to one slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotFragment {
    pub tokens: Vec<String>,
    /// Set when the fragment came from a replace marker.
    pub replace: bool,
}

impl ClassSpec {
    /// Splits a whitespace-separated class string into tokens.
    pub fn new(classes: &str) -> Self {
        ClassSpec::Tokens(classes.split_whitespace().map(str::to_string).collect())
    }

    /// An empty spec.
    pub fn empty() -> Self {
        ClassSpec::Tokens(Vec::new())
    }

    /// Wraps a spec in the replace marker.
    pub fn replace(spec: impl Into<ClassSpec>) -> Self {
        ClassSpec::Replace(Box::new(spec.into()))
    }

    /// Builds a spec targeting several slots.
    pub fn slots<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ClassSpec>,
    {
        ClassSpec::Slots(
            entries
                .into_iter()
                .map(|(slot, spec)| (slot.into(), spec.into()))
                .collect(),
        )
    }

    /// Returns true if the spec contributes no tokens.
    pub fn is_empty(&self) -> bool {
        match self {
            ClassSpec::Tokens(tokens) => tokens.is_empty(),
            ClassSpec::List(items) => items.iter().all(ClassSpec::is_empty),
            ClassSpec::Slots(slots) => slots.values().all(ClassSpec::is_empty),
            ClassSpec::Replace(inner) => inner.is_empty(),
        }
    }

    /// Returns true if a replace marker appears anywhere in the spec.
    pub fn contains_replace(&self) -> bool {
        match self {
            ClassSpec::Tokens(_) => false,
            ClassSpec::List(items) => items.iter().any(ClassSpec::contains_replace),
            ClassSpec::Slots(slots) => slots.values().any(ClassSpec::contains_replace),
            ClassSpec::Replace(_) => true,
        }
    }

    /// Returns true if the spec names any slot explicitly.
    pub fn targets_slots(&self) -> bool {
        match self {
            ClassSpec::Tokens(_) => false,
            ClassSpec::List(items) => items.iter().any(ClassSpec::targets_slots),
            ClassSpec::Slots(_) => true,
            ClassSpec::Replace(inner) => inner.targets_slots(),
        }
    }

    /// Reduces the spec to per-slot fragments, in first-reference order.
    pub fn reduce(&self, default_slot: &str) -> IndexMap<String, SlotFragment> {
        let mut out = IndexMap::new();
        self.reduce_into(default_slot, &mut out);
        out
    }

    fn reduce_into(&self, slot: &str, out: &mut IndexMap<String, SlotFragment>) {
        match self {
            ClassSpec::Tokens(tokens) => {
                out.entry(slot.to_string())
                    .or_default()
                    .tokens
                    .extend(tokens.iter().cloned());
            }
            ClassSpec::List(items) => {
                for item in items {
                    item.reduce_into(slot, out);
                }
            }
            ClassSpec::Slots(slots) => {
                for (name, spec) in slots {
                    spec.reduce_into(name, out);
                }
            }
            ClassSpec::Replace(inner) => {
                for (name, mut fragment) in inner.reduce(slot) {
                    fragment.replace = true;
                    out.insert(name, fragment);
                }
            }
        }
    }

    /// Appends another spec after this one.
    pub(crate) fn append(self, next: ClassSpec) -> ClassSpec {
        match self {
            ClassSpec::List(mut items) => {
                items.push(next);
                ClassSpec::List(items)
            }
            other => ClassSpec::List(vec![other, next]),
        }
    }
}

impl Default for ClassSpec {
    fn default() -> Self {
        ClassSpec::empty()
    }
}

impl From<&str> for ClassSpec {
    fn from(classes: &str) -> Self {
        ClassSpec::new(classes)
    }
}

impl From<String> for ClassSpec {
    fn from(classes: String) -> Self {
        ClassSpec::new(&classes)
    }
}

impl From<&String> for ClassSpec {
    fn from(classes: &String) -> Self {
        ClassSpec::new(classes)
    }
}

impl<T: Into<ClassSpec>> From<Vec<T>> for ClassSpec {
    fn from(items: Vec<T>) -> Self {
        ClassSpec::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ClassSpec>, const N: usize> From<[T; N]> for ClassSpec {
    fn from(items: [T; N]) -> Self {
        ClassSpec::List(items.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_targets_default_slot() {
        let reduced = ClassSpec::from("a  b\tc").reduce("base");
        assert_eq!(reduced.len(), 1);
        assert_eq!(reduced["base"].tokens, vec!["a", "b", "c"]);
        assert!(!reduced["base"].replace);
    }

    #[test]
    fn test_list_concatenates_in_order() {
        let spec = ClassSpec::from(vec![
            ClassSpec::from("a"),
            ClassSpec::slots([("icon", "b")]),
            ClassSpec::from("c"),
        ]);
        let reduced = spec.reduce("base");
        assert_eq!(reduced["base"].tokens, vec!["a", "c"]);
        assert_eq!(reduced["icon"].tokens, vec!["b"]);
        let order: Vec<&str> = reduced.keys().map(String::as_str).collect();
        assert_eq!(order, vec!["base", "icon"]);
    }

    #[test]
    fn test_replace_marks_fragments() {
        let spec = ClassSpec::from(vec![
            ClassSpec::from("a"),
            ClassSpec::replace(ClassSpec::from(["b", "c"])),
        ]);
        let reduced = spec.reduce("root");
        assert_eq!(reduced["root"].tokens, vec!["b", "c"]);
        assert!(reduced["root"].replace);
    }

    #[test]
    fn test_replace_only_touches_its_slots() {
        let spec = ClassSpec::slots([
            ("base", ClassSpec::from("a")),
            ("icon", ClassSpec::replace("b")),
        ]);
        let reduced = spec.reduce("base");
        assert!(!reduced["base"].replace);
        assert!(reduced["icon"].replace);
    }

    #[test]
    fn test_empty_and_markers() {
        assert!(ClassSpec::empty().is_empty());
        assert!(ClassSpec::from("  ").is_empty());
        assert!(!ClassSpec::from("a").is_empty());
        assert!(ClassSpec::replace("a").contains_replace());
        assert!(!ClassSpec::from("a").contains_replace());
        assert!(ClassSpec::slots([("icon", "a")]).targets_slots());
        assert!(!ClassSpec::from(["a", "b"]).targets_slots());
    }

    #[test]
    fn test_empty_string_still_declares_slot() {
        let reduced = ClassSpec::from("").reduce("icon");
        assert!(reduced.contains_key("icon"));
        assert!(reduced["icon"].tokens.is_empty());
    }
}
