//! Slot rendering.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::class::{default_merger, ClassMerger, MergeConfig};
use crate::document::{ClassSpec, ConfigError, SlotFragment, VariantValue, BASE_SLOT};
use crate::merge::{ExtensionChain, MergedDocument};
use crate::variant::{MatchedSlots, Selection, VariantMatcher};

/// The final class string of every slot.
///
/// Serializes as an ordered map of slot name to class string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolvedStyle {
    slots: IndexMap<String, String>,
}

impl ResolvedStyle {
    /// The classes of a slot, `None` if the slot does not exist.
    pub fn get(&self, slot: &str) -> Option<&str> {
        self.slots.get(slot).map(String::as_str)
    }

    /// The classes of a slot, empty if the slot does not exist.
    pub fn slot(&self, slot: &str) -> &str {
        self.get(slot).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.slots.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn into_inner(self) -> IndexMap<String, String> {
        self.slots
    }
}

/// Per-call options for [`Slots::render`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotProps {
    /// Extra classes, appended to the rendered slot.
    pub class: Option<ClassSpec>,
    /// Variant values layered over the selection of the [`Slots`] handle.
    pub variants: Selection,
}

impl SlotProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(mut self, class: impl Into<ClassSpec>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn variant(mut self, variant: &str, value: impl Into<VariantValue>) -> Self {
        self.variants.insert(variant, value);
        self
    }
}

/// Resolves selections against a merged document.
///
/// # Example
///
/// ```rust
/// use slotwise::{CompoundRule, ExtensionChain, Selection, StyleDocument, StyleResolver};
///
/// let doc = StyleDocument::new()
///     .slot("base", "a b")
///     .variant("size", "md", "c d")
///     .compound(CompoundRule::new("e").when("size", "md").when("color", "red"))
///     .default_variant("size", "md");
///
/// let resolver = StyleResolver::from_chain(&ExtensionChain::new().with(doc)).unwrap();
///
/// let red = resolver.resolve(&Selection::new().set("color", "red"));
/// assert_eq!(red.slot("base"), "a b c d e");
///
/// let blue = resolver.resolve(&Selection::new().set("color", "blue"));
/// assert_eq!(blue.slot("base"), "a b c d");
/// ```
#[derive(Debug, Clone)]
pub struct StyleResolver {
    document: Arc<MergedDocument>,
    merger: ClassMerger,
}

impl StyleResolver {
    /// Creates a resolver with the default merge configuration.
    pub fn new(document: impl Into<Arc<MergedDocument>>) -> Self {
        Self {
            document: document.into(),
            merger: ClassMerger::new(),
        }
    }

    /// Merges a chain and creates a resolver for it.
    pub fn from_chain(chain: &ExtensionChain) -> Result<Self, ConfigError> {
        Ok(Self::new(chain.merge()?))
    }

    /// Uses a custom class merger.
    pub fn with_merger(mut self, merger: ClassMerger) -> Self {
        self.merger = merger;
        self
    }

    /// Uses a custom merge configuration.
    pub fn with_config(self, config: MergeConfig) -> Self {
        self.with_merger(ClassMerger::with_config(config))
    }

    pub fn document(&self) -> &MergedDocument {
        &self.document
    }

    pub fn merger(&self) -> &ClassMerger {
        &self.merger
    }

    /// Resolves every slot.
    pub fn resolve(&self, selection: &Selection) -> ResolvedStyle {
        self.render(selection, None)
    }

    /// Resolves every slot, appending `overrides` last.
    ///
    /// A bare class string targets the `base` slot; a slot map targets
    /// slots by name, including slots the document does not know. A
    /// replace marker drops everything else the slot would have received.
    pub fn render(&self, selection: &Selection, overrides: Option<&ClassSpec>) -> ResolvedStyle {
        render_with(&self.document, &self.merger, selection, overrides)
    }

    /// Resolves a single slot. `class` targets that slot.
    pub fn render_slot(
        &self,
        slot: &str,
        selection: &Selection,
        class: Option<&ClassSpec>,
    ) -> String {
        let matched = VariantMatcher::new(&self.document).matches(selection);
        self.compose_slot(&matched, slot, class)
    }

    /// Returns a handle rendering slots one at a time.
    pub fn slots(&self, selection: &Selection) -> Slots<'_> {
        Slots {
            resolver: self,
            selection: selection.clone(),
            matched: VariantMatcher::new(&self.document).matches(selection),
        }
    }

    fn compose_slot(
        &self,
        matched: &MatchedSlots<'_>,
        slot: &str,
        class: Option<&ClassSpec>,
    ) -> String {
        let extra = class.map(|spec| spec.reduce(slot));
        let fragment = extra.as_ref().and_then(|reduced| reduced.get(slot));
        compose(&self.merger, matched, slot, fragment)
    }
}

/// A per-slot renderer for one selection.
///
/// # Example
///
/// ```rust
/// use slotwise::{ClassSpec, Selection, SlotProps, StyleDocument, StyleResolver};
///
/// let doc = StyleDocument::new()
///     .slot("base", "flex")
///     .slot("icon", "size-4")
///     .variant("size", "sm", ClassSpec::slots([("icon", "size-3")]));
///
/// let resolver = StyleResolver::new(doc.compile().unwrap());
/// let slots = resolver.slots(&Selection::new());
///
/// assert_eq!(slots.get("icon"), "size-4");
/// assert_eq!(slots.render("icon", &SlotProps::new().variant("size", "sm")), "size-3");
/// assert_eq!(slots.render("icon", &SlotProps::new().class("size-6")), "size-6");
/// ```
#[derive(Debug, Clone)]
pub struct Slots<'r> {
    resolver: &'r StyleResolver,
    selection: Selection,
    matched: MatchedSlots<'r>,
}

impl<'r> Slots<'r> {
    /// Renders a slot with per-call options.
    pub fn render(&self, slot: &str, props: &SlotProps) -> String {
        if props.variants.is_empty() {
            return self
                .resolver
                .compose_slot(&self.matched, slot, props.class.as_ref());
        }
        let selection = self.selection.overlay(&props.variants);
        self.resolver
            .render_slot(slot, &selection, props.class.as_ref())
    }

    /// Renders a slot as selected.
    pub fn get(&self, slot: &str) -> String {
        self.resolver.compose_slot(&self.matched, slot, None)
    }

    /// Slot names of the document.
    pub fn names(&self) -> impl Iterator<Item = &'r str> {
        self.resolver.document.slot_names()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }
}

/// Resolves every slot of `document` with the default merge configuration.
pub fn render(
    document: &MergedDocument,
    selection: &Selection,
    overrides: Option<&ClassSpec>,
) -> ResolvedStyle {
    render_with(document, default_merger(), selection, overrides)
}

fn render_with(
    document: &MergedDocument,
    merger: &ClassMerger,
    selection: &Selection,
    overrides: Option<&ClassSpec>,
) -> ResolvedStyle {
    let matched = VariantMatcher::new(document).matches(selection);
    let extras = overrides
        .map(|spec| spec.reduce(BASE_SLOT))
        .unwrap_or_default();

    let mut slots = IndexMap::with_capacity(matched.len());
    for (slot, _) in matched.iter() {
        let classes = compose(merger, &matched, slot, extras.get(slot));
        slots.insert(slot.to_string(), classes);
    }
    for (slot, fragment) in &extras {
        if !slots.contains_key(slot) {
            let classes = compose(merger, &matched, slot, Some(fragment));
            slots.insert(slot.clone(), classes);
        }
    }
    ResolvedStyle { slots }
}

fn compose(
    merger: &ClassMerger,
    matched: &MatchedSlots<'_>,
    slot: &str,
    extra: Option<&SlotFragment>,
) -> String {
    let mut tokens: Vec<&str> = match extra {
        Some(fragment) if fragment.replace => Vec::new(),
        _ => matched.tokens(slot).collect(),
    };
    if let Some(fragment) = extra {
        tokens.extend(fragment.tokens.iter().map(String::as_str));
    }
    merger.dedupe(&tokens).join(" ")
}
