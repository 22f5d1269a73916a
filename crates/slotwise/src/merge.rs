//! Layer merging.
//!
//! An [`ExtensionChain`] lists style documents from least to most specific:
//! built-in defaults, a theme extension, application overrides and so on.
//! Merging folds them into one [`MergedDocument`]:
//!
//! - slot and variant-value token lists append in chain order;
//! - a fragment wrapped in the replace marker discards what was accumulated
//!   for the slot it targets before adding its own tokens;
//! - compound rules and compound-slot rules concatenate in chain order;
//! - default variant values are overwritten key by key.
//!
//! Slots referenced only from variants or compound rules are added to the
//! slot set. Slot and variant order is the order of first appearance across
//! the chain.

use indexmap::IndexMap;
use std::sync::Arc;

use crate::document::{
    ClassSpec, ConfigError, Conditions, SlotFragment, StyleDocument, VariantValue, BASE_SLOT,
};

/// An ordered list of style documents, least specific first.
///
/// # Example
///
/// ```rust
/// use slotwise::{ExtensionChain, StyleDocument};
///
/// let defaults = StyleDocument::new().slot("base", "rounded px-4");
/// let theme = StyleDocument::new().slot("base", "rounded-full");
///
/// let merged = ExtensionChain::new().with(defaults).with(theme).merge().unwrap();
/// assert_eq!(merged.slot("base").unwrap(), ["rounded", "px-4", "rounded-full"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExtensionChain {
    layers: Vec<Arc<StyleDocument>>,
}

impl ExtensionChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a layer on top of the chain.
    pub fn with(mut self, layer: impl Into<Arc<StyleDocument>>) -> Self {
        self.push(layer);
        self
    }

    /// Adds a layer on top of the chain.
    pub fn push(&mut self, layer: impl Into<Arc<StyleDocument>>) {
        self.layers.push(layer.into());
    }

    /// Makes this chain extend `parent`: the parent's layers are placed
    /// beneath this chain's own layers.
    pub fn extend(mut self, parent: &ExtensionChain) -> Self {
        let own = std::mem::take(&mut self.layers);
        self.layers = parent.layers.iter().cloned().chain(own).collect();
        self
    }

    /// Reads every layer from a parsed value.
    ///
    /// Errors carry the index of the offending layer.
    pub fn from_values<'v, I>(values: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = &'v serde_json::Value>,
    {
        let layers = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                StyleDocument::from_value(value)
                    .map(Arc::new)
                    .map_err(|err| err.in_layer(index))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { layers })
    }

    /// The layers, least specific first.
    pub fn layers(&self) -> &[Arc<StyleDocument>] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Merges the chain into its effective document.
    pub fn merge(&self) -> Result<MergedDocument, ConfigError> {
        merge(self.layers.iter().map(Arc::as_ref))
    }
}

impl FromIterator<StyleDocument> for ExtensionChain {
    fn from_iter<I: IntoIterator<Item = StyleDocument>>(iter: I) -> Self {
        Self {
            layers: iter.into_iter().map(Arc::new).collect(),
        }
    }
}

/// The classes a variant value contributes, per slot.
pub type SlotTokens = IndexMap<String, Vec<String>>;

/// A variant of a merged document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedVariant {
    values: IndexMap<String, SlotTokens>,
    boolean: bool,
}

impl MergedVariant {
    /// The variant's values in declaration order.
    pub fn values(&self) -> &IndexMap<String, SlotTokens> {
        &self.values
    }

    /// The classes of one value.
    pub fn get(&self, value: &str) -> Option<&SlotTokens> {
        self.values.get(value)
    }

    /// True when the variant's only values are `"true"` and/or `"false"`.
    pub fn is_boolean(&self) -> bool {
        self.boolean
    }
}

/// A compound rule with its classes reduced per slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedRule {
    conditions: Conditions,
    classes: SlotTokens,
}

impl MergedRule {
    pub fn conditions(&self) -> &Conditions {
        &self.conditions
    }

    /// The classes the rule adds, per slot.
    pub fn classes(&self) -> &SlotTokens {
        &self.classes
    }
}

/// The effective document of an [`ExtensionChain`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedDocument {
    slots: SlotTokens,
    variants: IndexMap<String, MergedVariant>,
    compound_variants: Vec<MergedRule>,
    compound_slots: Vec<MergedRule>,
    default_variants: IndexMap<String, VariantValue>,
}

impl MergedDocument {
    /// Base classes of every slot, in first-reference order.
    pub fn slots(&self) -> &SlotTokens {
        &self.slots
    }

    /// Base classes of one slot.
    pub fn slot(&self, name: &str) -> Option<&[String]> {
        self.slots.get(name).map(Vec::as_slice)
    }

    /// Slot names in first-reference order.
    pub fn slot_names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    pub fn variants(&self) -> &IndexMap<String, MergedVariant> {
        &self.variants
    }

    pub fn variant(&self, name: &str) -> Option<&MergedVariant> {
        self.variants.get(name)
    }

    pub fn compound_variants(&self) -> &[MergedRule] {
        &self.compound_variants
    }

    pub fn compound_slots(&self) -> &[MergedRule] {
        &self.compound_slots
    }

    pub fn default_variants(&self) -> &IndexMap<String, VariantValue> {
        &self.default_variants
    }

    fn declare_slot(&mut self, slot: &str) {
        if !self.slots.contains_key(slot) {
            self.slots.insert(slot.to_string(), Vec::new());
        }
    }

    fn apply_slot(&mut self, slot: String, fragment: SlotFragment) {
        apply(self.slots.entry(slot).or_default(), fragment);
    }

    fn apply_variant(&mut self, variant: &str, value: &str, spec: &ClassSpec) {
        for (slot, fragment) in spec.reduce(BASE_SLOT) {
            self.declare_slot(&slot);
            let tokens = self
                .variants
                .entry(variant.to_string())
                .or_default()
                .values
                .entry(value.to_string())
                .or_default()
                .entry(slot)
                .or_default();
            apply(tokens, fragment);
        }
    }

    fn layer(&mut self, doc: &StyleDocument) {
        for (slot, spec) in &doc.slots {
            for (name, fragment) in spec.reduce(slot) {
                self.apply_slot(name, fragment);
            }
        }

        for (variant, values) in &doc.variants {
            let entry = self.variants.entry(variant.clone()).or_default();
            for value in values.keys() {
                entry.values.entry(value.clone()).or_default();
            }
            for (value, spec) in values {
                self.apply_variant(variant, value, spec);
            }
        }

        for rule in &doc.compound_variants {
            let classes = tokens_by_slot(rule.class.reduce(BASE_SLOT));
            for slot in classes.keys() {
                self.declare_slot(slot);
            }
            self.compound_variants.push(MergedRule {
                conditions: rule.conditions.clone(),
                classes,
            });
        }

        for rule in &doc.compound_slots {
            let tokens: Vec<String> = rule
                .class
                .reduce(BASE_SLOT)
                .into_values()
                .flat_map(|fragment| fragment.tokens)
                .collect();
            let mut classes = SlotTokens::new();
            for slot in &rule.slots {
                self.declare_slot(slot);
                classes
                    .entry(slot.clone())
                    .or_default()
                    .extend(tokens.iter().cloned());
            }
            self.compound_slots.push(MergedRule {
                conditions: rule.conditions.clone(),
                classes,
            });
        }

        for (variant, value) in &doc.default_variants {
            self.default_variants.insert(variant.clone(), value.clone());
        }
    }

    fn finish(&mut self) {
        for variant in self.variants.values_mut() {
            variant.boolean = !variant.values.is_empty()
                && variant
                    .values
                    .keys()
                    .all(|key| key == "true" || key == "false");
        }
    }
}

fn apply(tokens: &mut Vec<String>, fragment: SlotFragment) {
    if fragment.replace {
        tokens.clear();
    }
    tokens.extend(fragment.tokens);
}

fn tokens_by_slot(reduced: IndexMap<String, SlotFragment>) -> SlotTokens {
    reduced
        .into_iter()
        .map(|(slot, fragment)| (slot, fragment.tokens))
        .collect()
}

/// Merges layers, least specific first, into their effective document.
///
/// Every layer is validated; errors carry the index of the offending layer.
pub fn merge<'d, I>(layers: I) -> Result<MergedDocument, ConfigError>
where
    I: IntoIterator<Item = &'d StyleDocument>,
{
    let mut merged = MergedDocument::default();
    for (index, doc) in layers.into_iter().enumerate() {
        doc.validate().map_err(|err| err.in_layer(index))?;
        merged.layer(doc);
    }
    merged.finish();
    Ok(merged)
}

impl StyleDocument {
    /// Merges this document on its own.
    pub fn compile(&self) -> Result<MergedDocument, ConfigError> {
        merge([self])
    }
}
