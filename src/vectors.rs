//! Constructors and range operations for vector views.
//!
//! Every function here picks the cheapest representation that still keeps
//! the guarantees its return type promises: the canonical empty view, the
//! input itself, an O(1) slice, or a defensive copy.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use crate::core::capability::{Emptiness, Immutable, MaybeEmpty, Mutability, NonEmpty};
use crate::core::mapper_chain::MapperChain;
use crate::core::repr::Repr;
use crate::error::{Result, ViewError};
use crate::types::vector::{ImmutableNonEmptyVector, ImmutableVector, NonEmptyVector, Vector, View};

/// The canonical empty view.
pub fn empty<A: Clone + 'static>() -> ImmutableVector<A> {
    View::from_repr(Repr::Empty)
}

/// Views `storage` without copying it.
///
/// The caller keeps its handle and may keep writing through it, so the
/// result carries no immutability guarantee. The size is fixed here; if the
/// storage later shrinks, the missing positions read as absent.
pub fn wrap<A, S>(storage: Rc<RefCell<S>>) -> Vector<A>
where
    A: Clone + 'static,
    S: AsRef<[A]> + 'static,
{
    View::from_repr(Repr::wrap(storage, false))
}

/// Views `storage` as immutable without copying it.
///
/// Nothing checks this: the caller attests that it has dropped every other
/// handle to `storage`, or at least will never write through one while the
/// view is alive. Prefer [`from_vec`] when the storage can be moved in.
pub fn wrap_and_vouch_for<A, S>(storage: Rc<RefCell<S>>) -> ImmutableVector<A>
where
    A: Clone + 'static,
    S: AsRef<[A]> + 'static,
{
    View::from_repr(Repr::wrap(storage, true))
}

/// Takes ownership of `items`; ownership is the proof that nobody else can
/// mutate them.
pub fn from_vec<A: Clone + 'static>(items: Vec<A>) -> ImmutableVector<A> {
    View::from_repr(Repr::owned(items))
}

/// A non-empty immutable view holding `first` followed by `rest`.
pub fn of<A, I>(first: A, rest: I) -> ImmutableNonEmptyVector<A>
where
    A: Clone + 'static,
    I: IntoIterator<Item = A>,
{
    let tail = Repr::owned(rest.into_iter().collect());
    View::from_repr(Repr::cons(first, tail))
}

/// Copies every element of `source` into private storage.
pub fn copy_from<A, I>(source: I) -> ImmutableVector<A>
where
    A: Clone + 'static,
    I: IntoIterator<Item = A>,
{
    let items: Vec<A> = source.into_iter().collect();
    trace!(len = items.len(), "copied iterable into immutable storage");
    from_vec(items)
}

/// Copies at most `max_count` elements of `source`. Pulls exactly
/// `min(available, max_count)` elements, so infinite sources are fine.
pub fn copy_from_max<A, I>(max_count: usize, source: I) -> ImmutableVector<A>
where
    A: Clone + 'static,
    I: IntoIterator<Item = A>,
{
    if max_count == 0 {
        return empty();
    }
    copy_from(source.into_iter().take(max_count))
}

pub fn copy_from_slice<A: Clone + 'static>(source: &[A]) -> ImmutableVector<A> {
    copy_from_slice_max(source.len(), source)
}

pub fn copy_from_slice_max<A: Clone + 'static>(max_count: usize, source: &[A]) -> ImmutableVector<A> {
    let count = max_count.min(source.len());
    trace!(len = count, "copied slice into immutable storage");
    from_vec(source[..count].to_vec())
}

/// At most `max_count` elements of `source`, always immutable. Zero-copy
/// when `source` is already immutable; otherwise only the prefix is copied.
pub fn copy_from_view_max<A, M, E>(max_count: usize, source: &View<A, M, E>) -> ImmutableVector<A>
where
    A: Clone + 'static,
    M: Mutability,
    E: Emptiness,
{
    ensure_immutable(&take(max_count, source))
}

/// Copies the elements of `source` at positions `[start, end_exclusive)`.
///
/// The source is never pulled past `end_exclusive`, and not at all when the
/// window is empty.
pub fn copy_slice_from<A, I>(start: usize, end_exclusive: usize, source: I) -> ImmutableVector<A>
where
    A: Clone + 'static,
    I: IntoIterator<Item = A>,
{
    let requested = end_exclusive.saturating_sub(start);
    if requested == 0 {
        return empty();
    }
    copy_from(source.into_iter().skip(start).take(requested))
}

/// Windowing like [`slice`], always immutable. Zero-copy when `source` is
/// already immutable; otherwise only the window is copied.
pub fn copy_slice_from_view<A, M, E>(
    start: usize,
    end_exclusive: usize,
    source: &View<A, M, E>,
) -> ImmutableVector<A>
where
    A: Clone + 'static,
    M: Mutability,
    E: Emptiness,
{
    ensure_immutable(&slice(start, end_exclusive, source))
}

/// `source` by identity if it is already immutable, else a one-time copy.
/// Non-emptiness carries over.
pub fn ensure_immutable<A, M, E>(source: &View<A, M, E>) -> View<A, Immutable, E>
where
    A: Clone + 'static,
    M: Mutability,
    E: Emptiness,
{
    if source.repr.is_immutable() {
        return source.retag();
    }
    trace!(len = source.size(), "defensive copy of mutable view");
    View::from_repr(source.repr.materialize())
}

pub fn take<A, M, E>(count: usize, source: &View<A, M, E>) -> View<A, M, MaybeEmpty>
where
    A: Clone + 'static,
    M: Mutability,
    E: Emptiness,
{
    slice(0, count, source)
}

pub fn drop<A, M, E>(count: usize, source: &View<A, M, E>) -> View<A, M, MaybeEmpty>
where
    A: Clone + 'static,
    M: Mutability,
    E: Emptiness,
{
    View::from_repr(source.repr.drop_front(count))
}

/// An O(1) window over `source`. Returns the canonical empty view for an
/// empty window and `source` itself when the window starts at zero and
/// covers everything.
pub fn slice<A, M, E>(
    start: usize,
    end_exclusive: usize,
    source: &View<A, M, E>,
) -> View<A, M, MaybeEmpty>
where
    A: Clone + 'static,
    M: Mutability,
    E: Emptiness,
{
    View::from_repr(source.repr.slice(start, end_exclusive))
}

/// A lazily mapped view over `source`.
///
/// Mapping a mapped view fuses `f` into its existing chain instead of
/// stacking another layer, so any number of maps costs one level of
/// indirection.
pub fn map<A, B, M, E, F>(f: F, source: &View<A, M, E>) -> View<B, M, E>
where
    A: Clone + 'static,
    B: Clone + 'static,
    M: Mutability,
    E: Emptiness,
    F: Fn(A) -> B + 'static,
{
    let chain = match &source.repr {
        Repr::Empty => return View::from_repr(Repr::Empty),
        Repr::Mapped(chain) => chain.then(f),
        other => MapperChain::new(other.clone(), f),
    };
    trace!(depth = chain.depth(), "built mapper chain");
    View::from_repr(Repr::mapped(chain))
}

pub fn map_non_empty<A, B, M, F>(f: F, source: &View<A, M, NonEmpty>) -> View<B, M, NonEmpty>
where
    A: Clone + 'static,
    B: Clone + 'static,
    M: Mutability,
    F: Fn(A) -> B + 'static,
{
    map(f, source)
}

/// Refines `source` to non-empty without copying. `None` iff it is empty.
pub fn try_non_empty<A, M, E>(source: &View<A, M, E>) -> Option<View<A, M, NonEmpty>>
where
    A: Clone + 'static,
    M: Mutability,
    E: Emptiness,
{
    if source.is_empty() {
        None
    } else {
        Some(source.retag())
    }
}

pub fn non_empty_or_throw<A, M, E>(source: &View<A, M, E>) -> Result<View<A, M, NonEmpty>>
where
    A: Clone + 'static,
    M: Mutability,
    E: Emptiness,
{
    try_non_empty(source).ok_or(ViewError::EmptyInput)
}

pub fn try_non_empty_wrap<A, S>(storage: Rc<RefCell<S>>) -> Option<NonEmptyVector<A>>
where
    A: Clone + 'static,
    S: AsRef<[A]> + 'static,
{
    try_non_empty(&wrap(storage))
}

pub fn non_empty_wrap_or_throw<A, S>(storage: Rc<RefCell<S>>) -> Result<NonEmptyVector<A>>
where
    A: Clone + 'static,
    S: AsRef<[A]> + 'static,
{
    try_non_empty_wrap(storage).ok_or(ViewError::EmptyInput)
}

pub fn try_non_empty_copy_from<A, I>(source: I) -> Option<ImmutableNonEmptyVector<A>>
where
    A: Clone + 'static,
    I: IntoIterator<Item = A>,
{
    try_non_empty(&copy_from(source))
}

pub fn try_non_empty_copy_from_max<A, I>(
    max_count: usize,
    source: I,
) -> Option<ImmutableNonEmptyVector<A>>
where
    A: Clone + 'static,
    I: IntoIterator<Item = A>,
{
    try_non_empty(&copy_from_max(max_count, source))
}

pub fn non_empty_copy_from_or_throw<A, I>(source: I) -> Result<ImmutableNonEmptyVector<A>>
where
    A: Clone + 'static,
    I: IntoIterator<Item = A>,
{
    try_non_empty_copy_from(source).ok_or(ViewError::EmptyInput)
}

pub fn non_empty_copy_from_max_or_throw<A, I>(
    max_count: usize,
    source: I,
) -> Result<ImmutableNonEmptyVector<A>>
where
    A: Clone + 'static,
    I: IntoIterator<Item = A>,
{
    try_non_empty_copy_from_max(max_count, source).ok_or(ViewError::EmptyInput)
}

pub fn try_non_empty_copy_from_slice<A: Clone + 'static>(
    source: &[A],
) -> Option<ImmutableNonEmptyVector<A>> {
    try_non_empty(&copy_from_slice(source))
}

pub fn non_empty_copy_from_slice_or_throw<A: Clone + 'static>(
    source: &[A],
) -> Result<ImmutableNonEmptyVector<A>> {
    try_non_empty_copy_from_slice(source).ok_or(ViewError::EmptyInput)
}
