use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::core::capability::{Emptiness, Immutable, MaybeEmpty, Mutability, NonEmpty, Unvouched};
use crate::core::repr::Repr;
use crate::error::{Result, ViewError};
use crate::vectors;

/// A read-only, ordered, fixed-size view over a sequence of elements.
///
/// `M` records whether the view is provably immutable and `E` whether it is
/// provably non-empty. Cloning a view is O(1) and shares storage. Elements
/// are handed out by value, since a mapped view computes them on demand.
pub struct View<A, M = Unvouched, E = MaybeEmpty> {
    pub(crate) repr: Repr<A>,
    capabilities: PhantomData<fn() -> (M, E)>,
}

/// A view with no guarantees beyond being read-only.
pub type Vector<A> = View<A, Unvouched, MaybeEmpty>;

/// A view whose backing storage nobody else can mutate.
pub type ImmutableVector<A> = View<A, Immutable, MaybeEmpty>;

/// A view with at least one element.
pub type NonEmptyVector<A> = View<A, Unvouched, NonEmpty>;

pub type ImmutableNonEmptyVector<A> = View<A, Immutable, NonEmpty>;

impl<A, M, E> Clone for View<A, M, E> {
    fn clone(&self) -> Self {
        Self {
            repr: self.repr.clone(),
            capabilities: PhantomData,
        }
    }
}

impl<A: Clone + 'static, M: Mutability, E: Emptiness> View<A, M, E> {
    /// Tags `repr` with this view's capabilities. Callers establish them.
    pub(crate) fn from_repr(repr: Repr<A>) -> Self {
        debug_assert!(!M::IMMUTABLE || repr.is_immutable());
        debug_assert!(!E::NON_EMPTY || repr.len() > 0);
        Self {
            repr,
            capabilities: PhantomData,
        }
    }

    pub(crate) fn retag<M2: Mutability, E2: Emptiness>(&self) -> View<A, M2, E2> {
        View::from_repr(self.repr.clone())
    }

    pub fn size(&self) -> usize {
        self.repr.len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Returns the element at `index`, or `None` when `index >= size()`.
    ///
    /// An element that is itself `None` comes back as `Some(None)`.
    pub fn get(&self, index: usize) -> Option<A> {
        self.repr.at(index)
    }

    /// Like [`get`](Self::get), for callers that have already checked the
    /// index. An out-of-range index is reported as an error.
    pub fn unsafe_get(&self, index: usize) -> Result<A> {
        self.get(index).ok_or(ViewError::IndexOutOfRange {
            index,
            size: self.size(),
        })
    }

    pub fn first(&self) -> Option<A> {
        self.get(0)
    }

    /// Iterates from the first element. Each call starts over.
    pub fn iter(&self) -> Iter<A> {
        Iter {
            repr: self.repr.clone(),
            front: 0,
            back: self.size(),
        }
    }

    pub fn to_vec(&self) -> Vec<A> {
        self.iter().collect()
    }

    /// Everything after the first element. Empty on an empty view.
    pub fn tail(&self) -> View<A, M, MaybeEmpty> {
        self.drop(1)
    }

    /// At most the first `count` elements; `self` by identity when that
    /// covers the whole view.
    pub fn take(&self, count: usize) -> View<A, M, MaybeEmpty> {
        vectors::take(count, self)
    }

    /// Everything but the first `count` elements; `self` by identity when
    /// `count` is zero.
    pub fn drop(&self, count: usize) -> View<A, M, MaybeEmpty> {
        vectors::drop(count, self)
    }

    /// Elements in `[start, end_exclusive)`, clamped to the view.
    pub fn slice(&self, start: usize, end_exclusive: usize) -> View<A, M, MaybeEmpty> {
        vectors::slice(start, end_exclusive, self)
    }

    /// Lazily applies `f` to every element. Both capabilities carry over.
    pub fn fmap<B, F>(&self, f: F) -> View<B, M, E>
    where
        B: Clone + 'static,
        F: Fn(A) -> B + 'static,
    {
        vectors::map(f, self)
    }

    /// Returns this view when its storage is already private, otherwise a
    /// one-time copy.
    pub fn to_immutable(&self) -> View<A, Immutable, E> {
        vectors::ensure_immutable(self)
    }

    /// `None` iff the view is empty. Never copies.
    pub fn to_non_empty(&self) -> Option<View<A, M, NonEmpty>> {
        vectors::try_non_empty(self)
    }

    pub fn to_non_empty_or_throw(&self) -> Result<View<A, M, NonEmpty>> {
        vectors::non_empty_or_throw(self)
    }

    /// Forgets both capabilities.
    pub fn into_vector(self) -> Vector<A> {
        self.retag()
    }

    /// True when both handles share one representation. All empty views
    /// share the canonical empty representation.
    pub fn ptr_eq<M2, E2>(this: &Self, other: &View<A, M2, E2>) -> bool {
        this.repr.ptr_eq(&other.repr)
    }
}

impl<A: Clone + 'static, E: Emptiness> View<A, Immutable, E> {
    /// Forgets the immutability guarantee without touching storage.
    pub fn into_unvouched(self) -> View<A, Unvouched, E> {
        self.retag()
    }
}

impl<A: Clone + 'static, E: Emptiness> From<View<A, Immutable, E>> for View<A, Unvouched, E> {
    fn from(view: View<A, Immutable, E>) -> Self {
        view.into_unvouched()
    }
}

/// Iterator over a view's elements, by value.
pub struct Iter<A> {
    repr: Repr<A>,
    front: usize,
    back: usize,
}

impl<A: Clone + 'static> Iterator for Iter<A> {
    type Item = A;

    fn next(&mut self) -> Option<A> {
        if self.front >= self.back {
            return None;
        }
        let item = self.repr.at(self.front);
        self.front += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<A: Clone + 'static> DoubleEndedIterator for Iter<A> {
    fn next_back(&mut self) -> Option<A> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.repr.at(self.back)
    }
}

impl<A: Clone + 'static> ExactSizeIterator for Iter<A> {}

impl<A: Clone + 'static> FusedIterator for Iter<A> {}

impl<A: Clone + 'static, M: Mutability, E: Emptiness> IntoIterator for View<A, M, E> {
    type Item = A;
    type IntoIter = Iter<A>;

    fn into_iter(self) -> Iter<A> {
        self.iter()
    }
}

impl<A: Clone + 'static, M: Mutability, E: Emptiness> IntoIterator for &View<A, M, E> {
    type Item = A;
    type IntoIter = Iter<A>;

    fn into_iter(self) -> Iter<A> {
        self.iter()
    }
}

impl<A: Clone + 'static> FromIterator<A> for ImmutableVector<A> {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        vectors::copy_from(iter)
    }
}

impl<A: Clone + 'static> From<Vec<A>> for ImmutableVector<A> {
    fn from(items: Vec<A>) -> Self {
        vectors::from_vec(items)
    }
}

impl<A, M1, E1, M2, E2> PartialEq<View<A, M2, E2>> for View<A, M1, E1>
where
    A: Clone + PartialEq + 'static,
    M1: Mutability,
    E1: Emptiness,
    M2: Mutability,
    E2: Emptiness,
{
    fn eq(&self, other: &View<A, M2, E2>) -> bool {
        self.size() == other.size() && self.iter().eq(other.iter())
    }
}

impl<A: Clone + Eq + 'static, M: Mutability, E: Emptiness> Eq for View<A, M, E> {}

impl<A: Clone + Hash + 'static, M: Mutability, E: Emptiness> Hash for View<A, M, E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.size());
        for item in self.iter() {
            item.hash(state);
        }
    }
}

fn render<A, I, F>(f: &mut fmt::Formatter<'_>, items: I, mut item: F) -> fmt::Result
where
    I: IntoIterator<Item = A>,
    F: FnMut(&mut fmt::Formatter<'_>, &A) -> fmt::Result,
{
    f.write_str("Vector(")?;
    for (position, value) in items.into_iter().enumerate() {
        if position > 0 {
            f.write_str(", ")?;
        }
        item(f, &value)?;
    }
    f.write_str(")")
}

impl<A, M, E> fmt::Display for View<A, M, E>
where
    A: Clone + fmt::Display + 'static,
    M: Mutability,
    E: Emptiness,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, self.iter(), |f, value| write!(f, "{value}"))
    }
}

impl<A, M, E> fmt::Debug for View<A, M, E>
where
    A: Clone + fmt::Debug + 'static,
    M: Mutability,
    E: Emptiness,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, self.iter(), |f, value| write!(f, "{value:?}"))
    }
}
