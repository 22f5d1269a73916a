//! Style documents.

use indexmap::IndexMap;

use super::error::{join, ConfigError, ConfigErrorKind};
use super::spec::{ClassSpec, REPLACE_MARKER};
use super::value::VariantValue;

/// Variant conditions of a compound rule.
///
/// Each entry maps a variant name to its accepted values. The conditions
/// hold when every variant currently has one of its accepted values; an
/// empty set of conditions always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conditions(IndexMap<String, Vec<String>>);

impl Conditions {
    /// Creates an empty condition set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an accepted value for a variant.
    pub fn accept(&mut self, variant: impl Into<String>, value: impl Into<VariantValue>) {
        let value = value.into();
        let accepted = self.0.entry(variant.into()).or_default();
        if !accepted.iter().any(|v| v == value.as_key()) {
            accepted.push(value.as_key().to_string());
        }
    }

    /// Declares a variant with no accepted values yet.
    pub(crate) fn declare(&mut self, variant: impl Into<String>) {
        self.0.entry(variant.into()).or_default();
    }

    /// Iterates over `(variant, accepted values)` in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Accepted values for a variant.
    pub fn get(&self, variant: &str) -> Option<&[String]> {
        self.0.get(variant).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Evaluates the conditions against the current value of each variant.
    pub(crate) fn holds<'v>(&self, mut value_of: impl FnMut(&str) -> Option<&'v str>) -> bool {
        self.0.iter().all(|(variant, accepted)| {
            value_of(variant).is_some_and(|value| accepted.iter().any(|a| a == value))
        })
    }
}

/// A class fragment applied when several variant values coincide.
///
/// # Example
///
/// ```rust
/// use slotwise::CompoundRule;
///
/// let rule = CompoundRule::new("ring-2")
///     .when("color", "primary")
///     .when_any("variant", ["solid", "soft"]);
///
/// assert_eq!(rule.conditions().get("variant").unwrap(), ["solid", "soft"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompoundRule {
    pub(crate) conditions: Conditions,
    pub(crate) class: ClassSpec,
}

impl CompoundRule {
    /// Creates a rule with no conditions.
    pub fn new(class: impl Into<ClassSpec>) -> Self {
        Self {
            conditions: Conditions::new(),
            class: class.into(),
        }
    }

    /// Requires `variant` to hold `value` (or any other value accepted so far).
    pub fn when(mut self, variant: &str, value: impl Into<VariantValue>) -> Self {
        self.conditions.accept(variant, value);
        self
    }

    /// Requires `variant` to hold one of `values`.
    pub fn when_any<I, V>(mut self, variant: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<VariantValue>,
    {
        self.conditions.declare(variant);
        for value in values {
            self.conditions.accept(variant, value);
        }
        self
    }

    pub fn conditions(&self) -> &Conditions {
        &self.conditions
    }

    pub fn class(&self) -> &ClassSpec {
        &self.class
    }
}

/// A class string applied to several slots when its conditions hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompoundSlotRule {
    pub(crate) slots: Vec<String>,
    pub(crate) conditions: Conditions,
    pub(crate) class: ClassSpec,
}

impl CompoundSlotRule {
    /// Creates a rule applying `class` to every slot in `slots`.
    pub fn new<I, S>(slots: I, class: impl Into<ClassSpec>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            slots: slots.into_iter().map(Into::into).collect(),
            conditions: Conditions::new(),
            class: class.into(),
        }
    }

    /// Requires `variant` to hold `value`.
    pub fn when(mut self, variant: &str, value: impl Into<VariantValue>) -> Self {
        self.conditions.accept(variant, value);
        self
    }

    /// Requires `variant` to hold one of `values`.
    pub fn when_any<I, V>(mut self, variant: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<VariantValue>,
    {
        self.conditions.declare(variant);
        for value in values {
            self.conditions.accept(variant, value);
        }
        self
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    pub fn conditions(&self) -> &Conditions {
        &self.conditions
    }

    pub fn class(&self) -> &ClassSpec {
        &self.class
    }
}

/// The declarative style description of one component, for one layer.
///
/// Documents are plain data: slot base classes, variant tables, compound
/// rules and default variant values. They are combined into an effective
/// document by an [`ExtensionChain`](crate::ExtensionChain).
///
/// # Example
///
/// ```rust
/// use slotwise::{CompoundRule, StyleDocument};
///
/// let button = StyleDocument::new()
///     .slot("base", "inline-flex items-center")
///     .slot("icon", "shrink-0")
///     .variant("size", "sm", "px-2 text-xs")
///     .variant("size", "md", "px-3 text-sm")
///     .variant("disabled", true, "opacity-50")
///     .compound(CompoundRule::new("font-bold").when("size", "md").when("disabled", false))
///     .default_variant("size", "md");
///
/// assert_eq!(button.slots().len(), 2);
/// assert!(button.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDocument {
    pub(crate) slots: IndexMap<String, ClassSpec>,
    pub(crate) variants: IndexMap<String, IndexMap<String, ClassSpec>>,
    pub(crate) compound_variants: Vec<CompoundRule>,
    pub(crate) compound_slots: Vec<CompoundSlotRule>,
    pub(crate) default_variants: IndexMap<String, VariantValue>,
}

impl StyleDocument {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds classes to a slot. Repeated calls append.
    pub fn slot(mut self, name: &str, spec: impl Into<ClassSpec>) -> Self {
        self.add_slot(name, spec.into());
        self
    }

    /// Adds classes to the variant value `value` of `variant`. Repeated calls append.
    pub fn variant(
        mut self,
        variant: &str,
        value: impl Into<VariantValue>,
        spec: impl Into<ClassSpec>,
    ) -> Self {
        self.add_variant(variant, value.into().as_key(), spec.into());
        self
    }

    /// Appends a compound rule.
    pub fn compound(mut self, rule: CompoundRule) -> Self {
        self.compound_variants.push(rule);
        self
    }

    /// Appends a compound-slot rule.
    pub fn compound_slot(mut self, rule: CompoundSlotRule) -> Self {
        self.compound_slots.push(rule);
        self
    }

    /// Sets the default value of a variant.
    pub fn default_variant(mut self, variant: &str, value: impl Into<VariantValue>) -> Self {
        self.default_variants.insert(variant.to_string(), value.into());
        self
    }

    pub(crate) fn add_slot(&mut self, name: &str, spec: ClassSpec) {
        match self.slots.get_mut(name) {
            Some(existing) => {
                let current = std::mem::take(existing);
                *existing = current.append(spec);
            }
            None => {
                self.slots.insert(name.to_string(), spec);
            }
        }
    }

    pub(crate) fn add_variant(&mut self, variant: &str, value: &str, spec: ClassSpec) {
        let values = self.variants.entry(variant.to_string()).or_default();
        match values.get_mut(value) {
            Some(existing) => {
                let current = std::mem::take(existing);
                *existing = current.append(spec);
            }
            None => {
                values.insert(value.to_string(), spec);
            }
        }
    }

    /// Slot entries in declaration order.
    pub fn slots(&self) -> &IndexMap<String, ClassSpec> {
        &self.slots
    }

    /// Variant tables in declaration order.
    pub fn variants(&self) -> &IndexMap<String, IndexMap<String, ClassSpec>> {
        &self.variants
    }

    pub fn compound_variants(&self) -> &[CompoundRule] {
        &self.compound_variants
    }

    pub fn compound_slots(&self) -> &[CompoundSlotRule] {
        &self.compound_slots
    }

    pub fn default_variants(&self) -> &IndexMap<String, VariantValue> {
        &self.default_variants
    }

    /// Returns true if the document declares nothing.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
            && self.variants.is_empty()
            && self.compound_variants.is_empty()
            && self.compound_slots.is_empty()
            && self.default_variants.is_empty()
    }

    /// Checks names and spec shapes.
    ///
    /// This is called automatically when a chain is merged, but can be called
    /// explicitly for early error detection.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, spec) in &self.slots {
            let path = join("slots", name);
            check_name(&path, name)?;
            check_spec(&path, spec, true)?;
        }

        for (variant, values) in &self.variants {
            let path = join("variants", variant);
            check_variant_name(&path, variant)?;
            for (value, spec) in values {
                check_spec(&join(&path, value), spec, true)?;
            }
        }

        for (index, rule) in self.compound_variants.iter().enumerate() {
            let path = format!("compoundVariants[{}]", index);
            check_conditions(&path, &rule.conditions)?;
            check_spec(&join(&path, "class"), &rule.class, false)?;
        }

        for (index, rule) in self.compound_slots.iter().enumerate() {
            let path = format!("compoundSlots[{}]", index);
            for slot in &rule.slots {
                check_name(&join(&path, "slots"), slot)?;
            }
            check_conditions(&path, &rule.conditions)?;
            let class_path = join(&path, "class");
            check_spec(&class_path, &rule.class, false)?;
            if rule.class.targets_slots() {
                return Err(ConfigError::shape(class_path, "a class string or list"));
            }
        }

        for variant in self.default_variants.keys() {
            check_variant_name(&join("defaultVariants", variant), variant)?;
        }

        Ok(())
    }
}

fn check_name(path: &str, name: &str) -> Result<(), ConfigError> {
    if name.starts_with('$') {
        return Err(ConfigError::new(
            path,
            ConfigErrorKind::ReservedName {
                name: name.to_string(),
            },
        ));
    }
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(ConfigError::new(
            path,
            ConfigErrorKind::InvalidName {
                name: name.to_string(),
            },
        ));
    }
    Ok(())
}

fn check_variant_name(path: &str, name: &str) -> Result<(), ConfigError> {
    if matches!(name, "class" | "className") {
        return Err(ConfigError::new(
            path,
            ConfigErrorKind::ReservedName {
                name: name.to_string(),
            },
        ));
    }
    check_name(path, name)
}

fn check_conditions(path: &str, conditions: &Conditions) -> Result<(), ConfigError> {
    for (variant, _) in conditions.iter() {
        check_variant_name(&join(path, variant), variant)?;
    }
    Ok(())
}

fn check_spec(path: &str, spec: &ClassSpec, allow_replace: bool) -> Result<(), ConfigError> {
    match spec {
        ClassSpec::Tokens(_) => Ok(()),
        ClassSpec::List(items) => items.iter().enumerate().try_for_each(|(i, item)| {
            check_spec(&format!("{}[{}]", path, i), item, allow_replace)
        }),
        ClassSpec::Slots(slots) => slots.iter().try_for_each(|(slot, inner)| {
            let slot_path = join(path, slot);
            check_name(&slot_path, slot)?;
            check_spec(&slot_path, inner, allow_replace)
        }),
        ClassSpec::Replace(inner) => {
            if !allow_replace {
                return Err(ConfigError::new(path, ConfigErrorKind::ReplaceInCompound));
            }
            check_spec(&join(path, REPLACE_MARKER), inner, allow_replace)
        }
    }
}
