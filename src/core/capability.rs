//! Capability tags carried by view handles.
//!
//! A view is tagged along two independent axes: whether it is provably
//! immutable, and whether it is provably non-empty. The tags are zero-sized
//! and only ever appear as phantom type parameters, so generic code can bound
//! on exactly the capabilities it needs instead of picking one of four
//! concrete types.

mod sealed {
    pub trait Sealed {}
}

/// Mutability axis. Implemented by [`Unvouched`] and [`Immutable`].
pub trait Mutability: sealed::Sealed + 'static {
    const IMMUTABLE: bool;
}

/// Emptiness axis. Implemented by [`MaybeEmpty`] and [`NonEmpty`].
pub trait Emptiness: sealed::Sealed + 'static {
    const NON_EMPTY: bool;
}

/// No guarantee that other holders cannot mutate the backing storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unvouched {}

/// The view holds the only path to its backing storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Immutable {}

/// The view may have zero elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaybeEmpty {}

/// The view has at least one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NonEmpty {}

impl sealed::Sealed for Unvouched {}
impl sealed::Sealed for Immutable {}
impl sealed::Sealed for MaybeEmpty {}
impl sealed::Sealed for NonEmpty {}

impl Mutability for Unvouched {
    const IMMUTABLE: bool = false;
}

impl Mutability for Immutable {
    const IMMUTABLE: bool = true;
}

impl Emptiness for MaybeEmpty {
    const NON_EMPTY: bool = false;
}

impl Emptiness for NonEmpty {
    const NON_EMPTY: bool = true;
}
