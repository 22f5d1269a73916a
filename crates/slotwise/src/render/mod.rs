//! Rendering merged documents into class strings.
//!
//! This module provides:
//!
//! - [`StyleResolver`]: Resolves selections against a merged document
//! - [`ResolvedStyle`]: The class string of every slot
//! - [`Slots`] / [`SlotProps`]: Per-slot rendering with ad hoc overrides
//! - [`ResolveCache`]: Concurrent memoization keyed by chain and selection
//!
//! Each slot receives its base classes, then matching variant values,
//! compound rules, compound-slot rules and finally caller overrides. The
//! concatenated list is deduplicated so the last class of each conflict
//! group wins.

mod cache;
mod resolver;

pub use cache::ResolveCache;
pub use resolver::{render, ResolvedStyle, SlotProps, Slots, StyleResolver};
