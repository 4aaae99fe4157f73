use crate::core::capability::{Emptiness, Immutable, MaybeEmpty, Mutability, NonEmpty};
use crate::types::vector::{ImmutableNonEmptyVector, View};
use crate::vectors;

/// Views that guarantee at least one element.
/// Makes the empty case unrepresentable, so `head` needs no `Option`.
impl<A: Clone + 'static, M: Mutability> View<A, M, NonEmpty> {
    /// The first element (guaranteed to exist).
    ///
    /// # Panics
    ///
    /// Only if wrapped caller storage was shrunk below the view's size,
    /// which breaks the caller's side of the wrap contract.
    pub fn head(&self) -> A {
        match self.get(0) {
            Some(head) => head,
            None => panic!("non-empty view lost its first element"),
        }
    }

    /// The last element (guaranteed to exist).
    ///
    /// # Panics
    ///
    /// Under the same condition as [`head`](Self::head).
    pub fn last(&self) -> A {
        match self.get(self.size() - 1) {
            Some(last) => last,
            None => panic!("non-empty view lost its last element"),
        }
    }

    /// Forgets the non-emptiness guarantee without touching storage.
    pub fn into_maybe_empty(self) -> View<A, M, MaybeEmpty> {
        self.retag()
    }
}

impl<A: Clone + 'static> ImmutableNonEmptyVector<A> {
    /// `first` followed by `rest`.
    pub fn of<I: IntoIterator<Item = A>>(first: A, rest: I) -> Self {
        vectors::of(first, rest)
    }

    /// A view of exactly one element.
    pub fn singleton(value: A) -> Self {
        vectors::of(value, None)
    }
}

impl<A: Clone + 'static> From<A> for ImmutableNonEmptyVector<A> {
    fn from(value: A) -> Self {
        Self::singleton(value)
    }
}

impl<A: Clone + 'static, M: Mutability> From<View<A, M, NonEmpty>> for View<A, M, MaybeEmpty> {
    fn from(view: View<A, M, NonEmpty>) -> Self {
        view.into_maybe_empty()
    }
}

impl<A: Clone + 'static, E: Emptiness> View<A, Immutable, E> {
    /// Upcast keeping only the immutability guarantee.
    pub fn into_immutable_vector(self) -> View<A, Immutable, MaybeEmpty> {
        self.retag()
    }
}
