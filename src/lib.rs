//! Read-only views over sequential data that carry two guarantees in their
//! types: whether the view is provably immutable, and whether it is provably
//! non-empty.
//!
//! ```
//! use collection_views::vectors;
//!
//! let words = vectors::from_vec(vec!["foo", "bar", "baz"]);
//! assert_eq!(words.slice(1, 3).to_vec(), vec!["bar", "baz"]);
//! assert_eq!(words.drop(2).to_vec(), vec!["baz"]);
//!
//! let loud = words.fmap(|w| w.to_uppercase());
//! assert_eq!(loud.to_string(), "Vector(FOO, BAR, BAZ)");
//!
//! let first = words.to_non_empty_or_throw().unwrap().head();
//! assert_eq!(first, "foo");
//! ```

pub mod core;
pub mod error;
pub mod types;
pub mod vectors;

pub use crate::core::capability::{
    Emptiness, Immutable, MaybeEmpty, Mutability, NonEmpty, Unvouched,
};
pub use crate::error::{Result, ViewError};
pub use crate::types::set::{
    ImmutableNonEmptySet, ImmutableSet, NonEmptySet, Set, SetIter, SetView,
};
pub use crate::types::vector::{
    ImmutableNonEmptyVector, ImmutableVector, Iter, NonEmptyVector, Vector, View,
};
