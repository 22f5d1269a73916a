//! Utility class classification and deduplication.
//!
//! This module provides:
//!
//! - [`ClassMerger`]: Classifies tokens and removes superseded ones
//! - [`MergeConfig`]: Separator, custom groups and the on/off switch
//! - [`TokenClass`] / [`ConflictGroup`] / [`ConflictKey`]: Classification results
//!
//! The free functions [`classify`], [`dedupe`] and [`merge_classes`] use the
//! default configuration.

mod classify;
mod config;
mod dedupe;
mod groups;

pub use classify::{ConflictGroup, ConflictKey, TokenClass};
pub use config::{MergeConfig, DEFAULT_SEPARATOR};
pub use dedupe::{classify, dedupe, merge_classes, ClassMerger};
pub(crate) use dedupe::default_merger;
