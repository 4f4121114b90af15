//! Binary relations: sets of (left, right) pairs that can be looked up from either side.
//!
//! Three relations are provided, one per cardinality:
//! - [`OneToOne`]: each left item is paired with at most one right item and vice versa.
//! - [`OneToMany`]: each left item may have many right items, but each right item has at most
//!   one left item.
//! - [`ManyToMany`]: no limits on either side.
//!
//! Every relation is made of two hash indexes that mirror each other, so lookups, inserts and
//! removals are cheap from both sides. Where an item can be paired with many others, those
//! others are kept in a sorted bucket.

#![deny(unused_imports, missing_debug_implementations, unreachable_pub)]
#![cfg_attr(doc, deny(missing_docs, rustdoc::broken_intra_doc_links))]
#![warn(rust_2018_idioms)]

/// Ordered set operations over sorted vectors
pub mod sorted_vec;

/// The hash indexes behind each relation
pub mod index;

/// The one-to-one relation
pub mod one_to_one;
pub use crate::one_to_one::OneToOne;

/// The one-to-many relation
pub mod one_to_many;
pub use crate::one_to_many::OneToMany;

/// The many-to-many relation
pub mod many_to_many;
pub use crate::many_to_many::ManyToMany;

/// Enums similar to Option used with pairs of items
pub mod optionals;
pub use crate::optionals::{Evicted, OptionalPair};

#[cfg(feature = "serde")]
mod serde;
