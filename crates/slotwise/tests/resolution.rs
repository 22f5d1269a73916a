//! End-to-end resolution tests.
//!
//! The fixtures model a button component: library defaults in
//! `tests/fixtures/button.yaml` and an application theme extending them in
//! `tests/fixtures/theme.yaml`.

use proptest::prelude::*;
use serde_json::json;
use slotwise::{
    merge_classes, ClassSpec, ConfigErrorKind, ExtensionChain, MergeConfig, ResolveCache,
    ResolvedStyle, Selection, SlotProps, StyleDocument, StyleResolver,
};

const BUTTON: &str = include_str!("fixtures/button.yaml");
const THEME: &str = include_str!("fixtures/theme.yaml");

fn button_chain() -> ExtensionChain {
    ExtensionChain::new()
        .with(StyleDocument::from_yaml(BUTTON).expect("button fixture should parse"))
        .with(StyleDocument::from_yaml(THEME).expect("theme fixture should parse"))
}

fn themed_button() -> StyleResolver {
    StyleResolver::from_chain(&button_chain()).expect("button chain should merge")
}

#[test]
fn test_scenario_a_from_json() {
    let doc = StyleDocument::from_value(&json!({
        "slots": { "base": "a b" },
        "variants": { "size": { "md": { "base": "c d" } } },
        "compoundVariants": [{ "size": "md", "color": "red", "class": { "base": "e" } }],
        "defaultVariants": { "size": "md" }
    }))
    .unwrap();
    let resolver = StyleResolver::new(doc.compile().unwrap());

    let red = resolver.resolve(&Selection::new().set("color", "red"));
    assert_eq!(red.slot("base"), "a b c d e");

    let blue = resolver.resolve(&Selection::new().set("color", "blue"));
    assert_eq!(blue.slot("base"), "a b c d");
}

#[test]
fn test_slot_map_under_slots_resolves() {
    let doc = StyleDocument::from_yaml(concat!(
        "slots:\n",
        "  base:\n",
        "    base: inline-flex px-2\n",
        "    icon: size-4\n",
        "variants:\n",
        "  size:\n",
        "    lg: { base: px-6, icon: size-6 }\n",
    ))
    .unwrap();
    let resolver = StyleResolver::new(doc.compile().unwrap());

    let style = resolver.resolve(&Selection::new());
    assert_eq!(style.slot("base"), "inline-flex px-2");
    assert_eq!(style.slot("icon"), "size-4");

    let style = resolver.resolve(&Selection::new().set("size", "lg"));
    assert_eq!(style.slot("base"), "inline-flex px-6");
    assert_eq!(style.slot("icon"), "size-6");
}

#[test]
fn test_scenario_b_dedupe() {
    assert_eq!(
        slotwise::dedupe(&["bg-red-500", "px-2", "bg-blue-500"]),
        vec!["px-2", "bg-blue-500"]
    );
}

#[test]
fn test_themed_button_defaults() {
    let style = themed_button().resolve(&Selection::new());

    assert_eq!(
        style.slot("base"),
        "inline-flex items-center justify-center gap-2 font-medium transition-colors \
         rounded-full text-white bg-blue-600 h-7 px-2 text-xs cursor-pointer"
    );
    assert_eq!(style.slot("icon"), "shrink-0 size-3");
    assert_eq!(style.slot("label"), "tracking-wide");

    let slots: Vec<&str> = style.iter().map(|(slot, _)| slot).collect();
    assert_eq!(slots, vec!["base", "icon", "label"]);
}

#[test]
fn test_themed_button_outline_danger() {
    let selection = Selection::new()
        .set("variant", "outline")
        .set("color", "danger")
        .set("size", "lg")
        .set("disabled", true);
    let style = themed_button().resolve(&selection);

    assert_eq!(
        style.slot("base"),
        "inline-flex items-center justify-center gap-2 font-medium transition-colors \
         rounded-full border bg-red-600 h-12 px-6 text-base opacity-50 pointer-events-none \
         border-red-600 text-red-600"
    );
    assert_eq!(style.slot("icon"), "shrink-0 size-5 drop-shadow-sm");
    assert_eq!(style.slot("label"), "tracking-wide drop-shadow-sm");
}

#[test]
fn test_themed_button_ghost_neutral() {
    let selection = Selection::new()
        .set("variant", "ghost")
        .set("color", "neutral");
    let style = themed_button().resolve(&selection);

    assert_eq!(
        style.slot("base"),
        "inline-flex items-center justify-center gap-2 font-medium transition-colors \
         rounded-full bg-gray-600 h-7 px-2 text-xs cursor-pointer text-gray-700 hover:bg-gray-100"
    );
}

#[test]
fn test_boolean_default_matches_false_entry() {
    let resolver = themed_button();
    let absent = resolver.resolve(&Selection::new());
    let falsy = resolver.resolve(&Selection::new().set("disabled", "false"));
    let empty = resolver.resolve(&Selection::new().set("disabled", ""));

    assert!(absent.slot("base").ends_with("cursor-pointer"));
    assert_eq!(absent, falsy);
    assert_eq!(absent, empty);
}

#[test]
fn test_defaults_without_theme() {
    let chain = ExtensionChain::new().with(StyleDocument::from_yaml(BUTTON).unwrap());
    let style = StyleResolver::from_chain(&chain)
        .unwrap()
        .resolve(&Selection::new());

    assert_eq!(
        style.slot("base"),
        "inline-flex items-center justify-center gap-2 rounded-md font-medium transition-colors \
         text-white bg-blue-600 h-10 px-4 text-sm cursor-pointer"
    );
    assert_eq!(style.slot("label"), "truncate");
}

#[test]
fn test_instance_override_layer() {
    let instance = StyleDocument::new()
        .slot("base", "px-8")
        .variant("size", "sm", ClassSpec::slots([("icon", "size-2")]));
    let chain = button_chain().with(instance);
    let style = StyleResolver::from_chain(&chain)
        .unwrap()
        .resolve(&Selection::new());

    // The instance layer's base classes precede variants, so the size
    // variant's padding still wins.
    assert!(style.slot("base").contains("px-2"));
    assert!(!style.slot("base").contains("px-8"));
    assert_eq!(style.slot("icon"), "shrink-0 size-2");
}

#[test]
fn test_render_time_overrides() {
    let resolver = themed_button();
    let overrides = ClassSpec::from(vec![
        ClassSpec::from("px-8 bg-black"),
        ClassSpec::slots([("badge", "ml-auto")]),
    ]);
    let style = resolver.render(&Selection::new(), Some(&overrides));

    assert!(style.slot("base").ends_with("cursor-pointer px-8 bg-black"));
    assert!(!style.slot("base").contains("bg-blue-600"));
    assert_eq!(style.get("badge"), Some("ml-auto"));
}

#[test]
fn test_slots_handle_with_props() {
    let resolver = themed_button();
    let slots = resolver.slots(&Selection::new().set("size", "lg"));

    assert_eq!(slots.get("icon"), "shrink-0 size-5 drop-shadow-sm");
    assert_eq!(
        slots.render("icon", &SlotProps::new().variant("size", "sm")),
        "shrink-0 size-3"
    );
    assert_eq!(
        slots.render("label", &SlotProps::new().class("tracking-tight")),
        "drop-shadow-sm tracking-tight"
    );
}

#[test]
fn test_layer_errors_name_the_layer() {
    let layers = [
        json!({ "slots": { "base": "flex" } }),
        json!({ "compoundVariants": [{ "size": "sm", "class": { "$replace": "p-1" } }] }),
    ];
    let err = ExtensionChain::from_values(&layers).unwrap_err();
    assert_eq!(err.layer(), Some(1));
    assert_eq!(err.kind(), &ConfigErrorKind::ReplaceInCompound);
    assert_eq!(
        err.to_string(),
        "layer 1: compoundVariants[0].class: replace marker is not allowed inside compound rules"
    );
}

#[test]
fn test_cache_shares_results_per_selection() {
    let resolver = themed_button();
    let cache = ResolveCache::new();
    let sm = Selection::new().set("size", "sm");

    let first = cache.get_or_resolve("button", &resolver, &sm);
    let second = cache.get_or_resolve("button", &resolver, &sm);
    let lg = cache.get_or_resolve("button", &resolver, &Selection::new().set("size", "lg"));

    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert_ne!(first, lg);
    assert_eq!(*first, resolver.resolve(&sm));
}

#[test]
fn test_merge_classes_conflict_contexts() {
    assert_eq!(
        merge_classes("p-2 hover:p-2 md:p-2 p-4 md:hover:p-1 hover:md:p-3"),
        "hover:p-2 md:p-2 p-4 hover:md:p-3"
    );
}

const SIZES: &[&str] = &["sm", "md", "lg", "xl"];
const COLORS: &[&str] = &["primary", "neutral", "danger", "unknown"];
const VARIANTS: &[&str] = &["solid", "outline", "ghost"];

fn selection() -> impl Strategy<Value = Selection> {
    (
        prop::option::of(prop::sample::select(SIZES)),
        prop::option::of(prop::sample::select(COLORS)),
        prop::option::of(prop::sample::select(VARIANTS)),
        prop::option::of(any::<bool>()),
    )
        .prop_map(|(size, color, variant, disabled)| {
            let mut selection = Selection::new();
            if let Some(size) = size {
                selection.insert("size", size);
            }
            if let Some(color) = color {
                selection.insert("color", color);
            }
            if let Some(variant) = variant {
                selection.insert("variant", variant);
            }
            if let Some(disabled) = disabled {
                selection.insert("disabled", disabled);
            }
            selection
        })
}

const LAYER_SLOTS: &[&str] = &["base", "icon", "label"];
const LAYER_VALUES: &[&str] = &["sm", "md"];

fn layer() -> impl Strategy<Value = StyleDocument> {
    let slots = prop::collection::vec(
        (prop::sample::select(LAYER_SLOTS), "[a-c]{1,2}"),
        0..4,
    );
    let variants = prop::collection::vec(
        (
            prop::sample::select(LAYER_VALUES),
            prop::sample::select(LAYER_SLOTS),
            "[d-f]{1,2}",
        ),
        0..4,
    );
    (slots, variants).prop_map(|(slots, variants)| {
        let mut doc = StyleDocument::new();
        for (slot, class) in slots {
            doc = doc.slot(slot, class.as_str());
        }
        for (value, slot, class) in variants {
            doc = doc.variant("size", value, ClassSpec::slots([(slot, class.as_str())]));
        }
        doc
    })
}

/// Resolves without deduplication so every contributed token is visible.
fn resolve_raw(chain: &ExtensionChain, selection: &Selection) -> ResolvedStyle {
    StyleResolver::from_chain(chain)
        .unwrap()
        .with_config(MergeConfig::new().enabled(false))
        .resolve(selection)
}

fn sorted_tokens(style: &ResolvedStyle, slot: &str) -> Vec<String> {
    let mut tokens: Vec<String> = style
        .get(slot)
        .unwrap_or_default()
        .split_whitespace()
        .map(str::to_string)
        .collect();
    tokens.sort();
    tokens
}

proptest! {
    #[test]
    fn extension_without_replace_only_adds(
        lower in layer(),
        upper in layer(),
        size in prop::option::of(prop::sample::select(LAYER_VALUES)),
    ) {
        let mut selection = Selection::new();
        if let Some(size) = size {
            selection.insert("size", size);
        }

        let alone = resolve_raw(&ExtensionChain::new().with(lower.clone()), &selection);
        let top = resolve_raw(&ExtensionChain::new().with(upper.clone()), &selection);
        let both = resolve_raw(&ExtensionChain::new().with(lower).with(upper), &selection);

        for slot in LAYER_SLOTS {
            let mut expected = sorted_tokens(&alone, slot);
            expected.extend(sorted_tokens(&top, slot));
            expected.sort();
            prop_assert_eq!(sorted_tokens(&both, slot), expected);
        }
    }

    #[test]
    fn resolution_is_deterministic(selection in selection()) {
        let a = themed_button().resolve(&selection);
        let b = themed_button().resolve(&selection);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn resolved_slots_are_already_deduplicated(selection in selection()) {
        let style = themed_button().resolve(&selection);
        for (_, classes) in style.iter() {
            prop_assert_eq!(merge_classes(classes), classes);
        }
    }

    #[test]
    fn every_declared_slot_renders(selection in selection()) {
        let resolver = themed_button();
        let style = resolver.resolve(&selection);
        for slot in resolver.document().slot_names() {
            prop_assert!(style.get(slot).is_some());
        }
    }
}
