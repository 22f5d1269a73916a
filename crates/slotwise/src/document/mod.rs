//! Style documents and the class specs they are made of.
//!
//! A [`StyleDocument`] describes one layer of a component's styling. Build it
//! in code with the fluent builder or read it from JSON or YAML:
//!
//! ```rust
//! use slotwise::StyleDocument;
//!
//! let doc = StyleDocument::from_yaml(r#"
//! slots:
//!   base: rounded font-medium
//!   icon: shrink-0
//! variants:
//!   size:
//!     sm: { base: px-2 text-xs, icon: size-3 }
//!     md: { base: px-3 text-sm, icon: size-4 }
//! defaultVariants:
//!   size: md
//! "#).unwrap();
//!
//! assert_eq!(doc.slots().len(), 2);
//! ```

mod error;
mod parse;
mod spec;
mod style;
mod value;

pub use error::{ConfigError, ConfigErrorKind};
pub use spec::{ClassSpec, SlotFragment, BASE_SLOT, REPLACE_MARKER};
pub use style::{CompoundRule, CompoundSlotRule, Conditions, StyleDocument};
pub use value::VariantValue;
