//! Reading style documents from JSON and YAML.
//!
//! Documents follow this shape (every key optional):
//!
//! ```yaml
//! base: inline-flex items-center      # shorthand for slots.base
//! slots:
//!   icon: shrink-0
//! variants:
//!   size:
//!     sm: px-2 text-xs
//!     md: { base: px-3 text-sm, icon: size-4 }
//!   disabled:
//!     true: opacity-50
//! compoundVariants:
//!   - size: md
//!     disabled: [false]
//!     class: font-bold
//! compoundSlots:
//!   - slots: [base, icon]
//!     size: sm
//!     class: gap-1
//! defaultVariants:
//!   size: md
//! ```
//!
//! YAML keys that are booleans or numbers (`true:` above) are read as their
//! string form.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::error::{join, ConfigError, ConfigErrorKind};
use super::spec::{ClassSpec, BASE_SLOT, REPLACE_MARKER};
use super::style::{CompoundRule, CompoundSlotRule, Conditions, StyleDocument};
use super::value::VariantValue;

const CLASS_SHAPE: &str = "a class string, list or slot map";
const SLOT_CLASS_SHAPE: &str = "a class string, list or replace marker";

impl StyleDocument {
    /// Reads a document from JSON text.
    ///
    /// # Example
    ///
    /// ```rust
    /// use slotwise::StyleDocument;
    ///
    /// let doc = StyleDocument::from_json(r#"{
    ///     "slots": { "base": "rounded px-4" },
    ///     "variants": { "size": { "sm": "px-2" } }
    /// }"#).unwrap();
    ///
    /// assert_eq!(doc.variants()["size"].len(), 1);
    /// ```
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(text).map_err(ConfigError::syntax)?;
        let doc = Self::from_value(&value)?;
        log_loaded("json", &doc);
        Ok(doc)
    }

    /// Reads a document from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let yaml: serde_yaml::Value = serde_yaml::from_str(text).map_err(ConfigError::syntax)?;
        let value = yaml_to_json(yaml, "")?;
        let doc = Self::from_value(&value)?;
        log_loaded("yaml", &doc);
        Ok(doc)
    }

    /// Reads a document from an already parsed value.
    ///
    /// `null` reads as an empty document. The result is validated.
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        let mut doc = StyleDocument::new();
        let root = match value {
            Value::Null => return Ok(doc),
            Value::Object(root) => root,
            _ => return Err(ConfigError::shape("", "a style document object")),
        };

        for (key, entry) in root {
            match key.as_str() {
                "base" => {
                    let spec = parse_class(entry, "base", false)?;
                    doc.add_slot(BASE_SLOT, spec);
                }
                "slots" => parse_slots(&mut doc, entry)?,
                "variants" => parse_variants(&mut doc, entry)?,
                "compoundVariants" => {
                    for (index, rule) in array(entry, "compoundVariants")?.iter().enumerate() {
                        let path = format!("compoundVariants[{}]", index);
                        doc.compound_variants.push(parse_compound(rule, &path)?);
                    }
                }
                "compoundSlots" => {
                    for (index, rule) in array(entry, "compoundSlots")?.iter().enumerate() {
                        let path = format!("compoundSlots[{}]", index);
                        doc.compound_slots.push(parse_compound_slot(rule, &path)?);
                    }
                }
                "defaultVariants" => parse_defaults(&mut doc, entry)?,
                other => {
                    return Err(ConfigError::new(
                        "",
                        ConfigErrorKind::UnknownKey {
                            key: other.to_string(),
                        },
                    ))
                }
            }
        }

        doc.validate()?;
        Ok(doc)
    }
}

fn log_loaded(format: &str, doc: &StyleDocument) {
    tracing::debug!(
        format,
        slots = doc.slots.len(),
        variants = doc.variants.len(),
        compound_variants = doc.compound_variants.len(),
        compound_slots = doc.compound_slots.len(),
        "loaded style document"
    );
}

fn object<'v>(
    value: &'v Value,
    path: &str,
    expected: &'static str,
) -> Result<&'v Map<String, Value>, ConfigError> {
    value
        .as_object()
        .ok_or_else(|| ConfigError::shape(path, expected))
}

fn array<'v>(value: &'v Value, path: &str) -> Result<&'v Vec<Value>, ConfigError> {
    value
        .as_array()
        .ok_or_else(|| ConfigError::shape(path, "a list of rules"))
}

fn parse_slots(doc: &mut StyleDocument, value: &Value) -> Result<(), ConfigError> {
    if value.is_null() {
        return Ok(());
    }
    for (slot, spec) in object(value, "slots", "a map of slots")? {
        let path = join("slots", slot);
        let spec = parse_class(spec, &path, true)?;
        doc.add_slot(slot, spec);
    }
    Ok(())
}

fn parse_variants(doc: &mut StyleDocument, value: &Value) -> Result<(), ConfigError> {
    if value.is_null() {
        return Ok(());
    }
    for (variant, values) in object(value, "variants", "a map of variants")? {
        let path = join("variants", variant);
        let values = object(values, &path, "a map of variant values")?;
        // A variant with no values still counts as declared.
        doc.variants.entry(variant.clone()).or_default();
        for (key, spec) in values {
            let spec = parse_class(spec, &join(&path, key), true)?;
            doc.add_variant(variant, key, spec);
        }
    }
    Ok(())
}

fn parse_defaults(doc: &mut StyleDocument, value: &Value) -> Result<(), ConfigError> {
    if value.is_null() {
        return Ok(());
    }
    for (variant, default) in object(value, "defaultVariants", "a map of default values")? {
        let value = match default {
            Value::Null => continue,
            Value::Bool(b) => VariantValue::Bool(*b),
            Value::String(s) => VariantValue::Str(s.clone()),
            Value::Number(n) => VariantValue::Str(n.to_string()),
            _ => {
                return Err(ConfigError::new(
                    join("defaultVariants", variant),
                    ConfigErrorKind::InvalidDefault,
                ))
            }
        };
        doc.default_variants.insert(variant.clone(), value);
    }
    Ok(())
}

/// Reads a class spec. Slot maps are only accepted where `allow_slots` is set;
/// elsewhere an object must be a replace marker.
fn parse_class(value: &Value, path: &str, allow_slots: bool) -> Result<ClassSpec, ConfigError> {
    match value {
        Value::Null => Ok(ClassSpec::empty()),
        Value::String(classes) => Ok(ClassSpec::new(classes)),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| parse_class(item, &format!("{}[{}]", path, i), allow_slots))
            .collect::<Result<Vec<_>, _>>()
            .map(ClassSpec::List),
        Value::Object(map) => {
            if let Some(inner) = map.get(REPLACE_MARKER) {
                if map.len() != 1 {
                    return Err(ConfigError::shape(
                        path,
                        "a replace marker with no other keys",
                    ));
                }
                let inner = parse_class(inner, &join(path, REPLACE_MARKER), allow_slots)?;
                return Ok(ClassSpec::Replace(Box::new(inner)));
            }
            if !allow_slots {
                return Err(ConfigError::shape(path, SLOT_CLASS_SHAPE));
            }
            map.iter()
                .map(|(slot, spec)| {
                    parse_class(spec, &join(path, slot), false).map(|spec| (slot.clone(), spec))
                })
                .collect::<Result<IndexMap<_, _>, _>>()
                .map(ClassSpec::Slots)
        }
        _ => Err(ConfigError::shape(
            path,
            if allow_slots { CLASS_SHAPE } else { SLOT_CLASS_SHAPE },
        )),
    }
}

/// Splits a rule object into its class spec and its conditions.
fn parse_rule<'v>(
    value: &'v Value,
    path: &str,
    skip: &[&str],
) -> Result<(&'v Value, Conditions, &'v Map<String, Value>), ConfigError> {
    let rule = object(value, path, "a rule object")?;
    let class = match (rule.get("class"), rule.get("className")) {
        (Some(_), Some(_)) => return Err(ConfigError::new(path, ConfigErrorKind::AmbiguousClass)),
        (Some(class), None) | (None, Some(class)) => class,
        (None, None) => return Err(ConfigError::new(path, ConfigErrorKind::MissingClass)),
    };

    let mut conditions = Conditions::new();
    for (variant, accepted) in rule {
        if matches!(variant.as_str(), "class" | "className") || skip.contains(&variant.as_str()) {
            continue;
        }
        let condition_path = join(path, variant);
        match accepted {
            Value::Array(values) => {
                conditions.declare(variant.as_str());
                for (i, value) in values.iter().enumerate() {
                    let value = condition_value(value).ok_or_else(|| {
                        ConfigError::shape(format!("{}[{}]", condition_path, i), "a variant value")
                    })?;
                    conditions.accept(variant.as_str(), value);
                }
            }
            other => {
                let value = condition_value(other).ok_or_else(|| {
                    ConfigError::shape(condition_path, "a variant value or list of values")
                })?;
                conditions.accept(variant.as_str(), value);
            }
        }
    }
    Ok((class, conditions, rule))
}

fn condition_value(value: &Value) -> Option<VariantValue> {
    match value {
        Value::Bool(b) => Some(VariantValue::Bool(*b)),
        Value::String(s) => Some(VariantValue::Str(s.clone())),
        Value::Number(n) => Some(VariantValue::Str(n.to_string())),
        _ => None,
    }
}

fn parse_compound(value: &Value, path: &str) -> Result<CompoundRule, ConfigError> {
    let (class, conditions, _) = parse_rule(value, path, &[])?;
    let class = parse_class(class, &join(path, "class"), true)?;
    Ok(CompoundRule { conditions, class })
}

fn parse_compound_slot(value: &Value, path: &str) -> Result<CompoundSlotRule, ConfigError> {
    let (class, conditions, rule) = parse_rule(value, path, &["slots"])?;
    let slots_path = join(path, "slots");
    let slots = rule
        .get("slots")
        .and_then(Value::as_array)
        .ok_or_else(|| ConfigError::shape(&slots_path, "a list of slot names"))?
        .iter()
        .map(|slot| {
            slot.as_str()
                .map(str::to_string)
                .ok_or_else(|| ConfigError::shape(&slots_path, "a list of slot names"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let class = parse_class(class, &join(path, "class"), false)?;
    Ok(CompoundSlotRule {
        slots,
        conditions,
        class,
    })
}

/// Converts YAML into JSON, stringifying scalar keys.
fn yaml_to_json(value: serde_yaml::Value, path: &str) -> Result<Value, ConfigError> {
    use serde_yaml::Value as Yaml;

    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                // NaN and infinities have no JSON form
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or_else(|| Value::String(n.to_string()))
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| yaml_to_json(item, &format!("{}[{}]", path, i)))
                .collect::<Result<Vec<_>, ConfigError>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut map = Map::new();
            for (key, item) in mapping {
                let key = match key {
                    Yaml::String(s) => s,
                    Yaml::Bool(b) => b.to_string(),
                    Yaml::Number(n) => n.to_string(),
                    _ => return Err(ConfigError::shape(path, "string keys")),
                };
                let item = yaml_to_json(item, &join(path, &key))?;
                map.insert(key, item);
            }
            Value::Object(map)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value, path)?,
    })
}
