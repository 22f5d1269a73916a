//! Cascading slot and variant resolution for utility-class component styles.
//!
//! `slotwise` computes the utility classes of every named part ("slot") of a
//! component from layered style documents and a variant selection:
//!
//! 1. [`StyleDocument`]s declare base classes per slot, variant tables,
//!    compound rules and default variant values. They are built in code or
//!    read from JSON or YAML.
//! 2. An [`ExtensionChain`] orders documents from least to most specific
//!    (library defaults, theme, application overrides) and merges them into
//!    a [`MergedDocument`]. Lists append; the `$replace` marker replaces.
//! 3. A [`StyleResolver`] matches a [`Selection`] against the merged
//!    document and renders each slot, deduplicating conflicting utilities
//!    with a [`ClassMerger`] so the last `bg-*`, `px-*`, `text-<size>`, ...
//!    wins.
//!
//! # Example
//!
//! ```rust
//! use slotwise::{ExtensionChain, Selection, StyleDocument, StyleResolver};
//!
//! let defaults = StyleDocument::from_yaml(r#"
//! slots:
//!   base: inline-flex items-center rounded px-4 bg-gray-100
//!   icon: size-4
//! variants:
//!   color:
//!     primary: bg-blue-600 text-white
//!   size:
//!     sm: { base: px-2 text-xs, icon: size-3 }
//! compoundVariants:
//!   - color: primary
//!     size: sm
//!     class: font-semibold
//! "#).unwrap();
//!
//! let theme = StyleDocument::new().slot("base", "rounded-full");
//!
//! let chain = ExtensionChain::new().with(defaults).with(theme);
//! let resolver = StyleResolver::from_chain(&chain).unwrap();
//!
//! let style = resolver.resolve(&Selection::new().set("color", "primary").set("size", "sm"));
//! assert_eq!(
//!     style.slot("base"),
//!     "inline-flex items-center rounded-full bg-blue-600 text-white px-2 text-xs font-semibold"
//! );
//! assert_eq!(style.slot("icon"), "size-3");
//! ```
//!
//! Class deduplication is also available on its own:
//!
//! ```rust
//! assert_eq!(slotwise::merge_classes("bg-red-500 px-2 bg-blue-500"), "px-2 bg-blue-500");
//! ```

pub mod class;
pub mod document;
pub mod merge;
pub mod render;
pub mod variant;

pub use class::{
    classify, dedupe, merge_classes, ClassMerger, ConflictGroup, ConflictKey, MergeConfig,
    TokenClass, DEFAULT_SEPARATOR,
};
pub use document::{
    ClassSpec, CompoundRule, CompoundSlotRule, Conditions, ConfigError, ConfigErrorKind,
    SlotFragment, StyleDocument, VariantValue, BASE_SLOT, REPLACE_MARKER,
};
pub use merge::{merge, ExtensionChain, MergedDocument, MergedRule, MergedVariant, SlotTokens};
pub use render::{render, ResolveCache, ResolvedStyle, SlotProps, Slots, StyleResolver};
pub use variant::{Fragment, MatchedSlots, Selection, Stage, VariantMatcher};
