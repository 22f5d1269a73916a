//! Variant selection and matching.
//!
//! A [`Selection`] names the variant values a caller asks for. The
//! [`VariantMatcher`] fills the gaps from the document's defaults and
//! collects, per slot, the fragments that apply, in stage order: base
//! classes, variant values, compound rules, compound-slot rules.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::document::VariantValue;
use crate::merge::MergedDocument;

/// Requested variant values. An unset variant is the same as an absent one.
///
/// Selections are ordered maps so they can key caches.
///
/// # Example
///
/// ```rust
/// use slotwise::Selection;
///
/// let selection = Selection::new().set("size", "lg").set("disabled", true);
/// assert_eq!(selection.get("size").unwrap().as_key(), "lg");
/// assert_eq!(selection.get("disabled").unwrap().as_key(), "true");
/// ```
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Selection {
    values: BTreeMap<String, VariantValue>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a variant value.
    pub fn set(mut self, variant: &str, value: impl Into<VariantValue>) -> Self {
        self.insert(variant, value);
        self
    }

    /// Sets a variant value, returning the previous one.
    pub fn insert(
        &mut self,
        variant: &str,
        value: impl Into<VariantValue>,
    ) -> Option<VariantValue> {
        self.values.insert(variant.to_string(), value.into())
    }

    /// Unsets a variant, returning its value.
    pub fn unset(&mut self, variant: &str) -> Option<VariantValue> {
        self.values.remove(variant)
    }

    pub fn get(&self, variant: &str) -> Option<&VariantValue> {
        self.values.get(variant)
    }

    /// Returns a selection with `other`'s values layered over this one.
    pub fn overlay(&self, other: &Selection) -> Selection {
        let mut values = self.values.clone();
        values.extend(other.values.iter().map(|(k, v)| (k.clone(), v.clone())));
        Selection { values }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &VariantValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Selection
where
    K: Into<String>,
    V: Into<VariantValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// The stage a fragment was contributed by. Stages apply in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    Base,
    Variant,
    Compound,
    CompoundSlot,
    /// Classes supplied by the caller at render time.
    Extra,
}

/// Tokens contributed to a slot by one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment<'a> {
    pub stage: Stage,
    pub tokens: &'a [String],
}

/// Matched fragments per slot, in the document's slot order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchedSlots<'a> {
    slots: IndexMap<&'a str, Vec<Fragment<'a>>>,
}

impl<'a> MatchedSlots<'a> {
    /// Fragments of one slot, in stage order.
    pub fn get(&self, slot: &str) -> Option<&[Fragment<'a>]> {
        self.slots.get(slot).map(Vec::as_slice)
    }

    /// All tokens of one slot, in stage order.
    pub fn tokens(&self, slot: &str) -> impl Iterator<Item = &'a str> + '_ {
        self.get(slot)
            .unwrap_or_default()
            .iter()
            .flat_map(|fragment| fragment.tokens.iter().map(String::as_str))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &[Fragment<'a>])> {
        self.slots.iter().map(|(slot, fragments)| (*slot, fragments.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn push(&mut self, slot: &'a str, stage: Stage, tokens: &'a [String]) {
        self.slots
            .entry(slot)
            .or_default()
            .push(Fragment { stage, tokens });
    }
}

/// Matches selections against a merged document.
#[derive(Debug, Clone, Copy)]
pub struct VariantMatcher<'a> {
    document: &'a MergedDocument,
}

impl<'a> VariantMatcher<'a> {
    pub fn new(document: &'a MergedDocument) -> Self {
        Self { document }
    }

    /// The value a variant takes under `selection`, after defaults.
    ///
    /// Boolean variants normalize falsy and absent values to `"false"`.
    pub fn effective_value<'s>(&self, selection: &'s Selection, variant: &str) -> Option<&'s str>
    where
        'a: 's,
    {
        let value = selection
            .get(variant)
            .or_else(|| self.document.default_variants().get(variant));
        let boolean = self
            .document
            .variant(variant)
            .is_some_and(|v| v.is_boolean());

        match value {
            Some(value) if boolean && value.is_falsy() => Some("false"),
            Some(value) => Some(value.as_key()),
            None if boolean => Some("false"),
            None => None,
        }
    }

    /// Collects the fragments that apply under `selection`.
    pub fn matches(&self, selection: &Selection) -> MatchedSlots<'a> {
        let document = self.document;
        let mut matched = MatchedSlots::default();

        for (slot, tokens) in document.slots() {
            matched.push(slot, Stage::Base, tokens);
        }

        for (name, variant) in document.variants() {
            let Some(value) = self.effective_value(selection, name) else {
                continue;
            };
            if let Some(slots) = variant.get(value) {
                for (slot, tokens) in slots {
                    matched.push(slot, Stage::Variant, tokens);
                }
            }
        }

        let stages = [
            (Stage::Compound, document.compound_variants()),
            (Stage::CompoundSlot, document.compound_slots()),
        ];
        for (stage, rules) in stages {
            for rule in rules {
                if rule
                    .conditions()
                    .holds(|variant| self.effective_value(selection, variant))
                {
                    for (slot, tokens) in rule.classes() {
                        matched.push(slot, stage, tokens);
                    }
                }
            }
        }

        matched
    }
}
