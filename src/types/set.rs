//! Unordered counterpart of [`View`](crate::View), carrying the same
//! capability tags.

use std::cell::RefCell;
use std::collections::hash_set;
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::rc::Rc;
use std::vec;

use tracing::trace;

use crate::core::capability::{Emptiness, Immutable, MaybeEmpty, Mutability, NonEmpty, Unvouched};
use crate::error::{Result, ViewError};

enum SetRepr<A> {
    Empty,
    Wrapped(Rc<RefCell<HashSet<A>>>),
    Owned(Rc<HashSet<A>>),
}

impl<A> Clone for SetRepr<A> {
    fn clone(&self) -> Self {
        match self {
            SetRepr::Empty => SetRepr::Empty,
            SetRepr::Wrapped(set) => SetRepr::Wrapped(Rc::clone(set)),
            SetRepr::Owned(set) => SetRepr::Owned(Rc::clone(set)),
        }
    }
}

/// A read-only view over a set of distinct elements.
pub struct SetView<A, M = Unvouched, E = MaybeEmpty> {
    repr: SetRepr<A>,
    capabilities: PhantomData<fn() -> (M, E)>,
}

pub type Set<A> = SetView<A, Unvouched, MaybeEmpty>;
pub type ImmutableSet<A> = SetView<A, Immutable, MaybeEmpty>;
pub type NonEmptySet<A> = SetView<A, Unvouched, NonEmpty>;
pub type ImmutableNonEmptySet<A> = SetView<A, Immutable, NonEmpty>;

impl<A, M, E> Clone for SetView<A, M, E> {
    fn clone(&self) -> Self {
        Self {
            repr: self.repr.clone(),
            capabilities: PhantomData,
        }
    }
}

impl<A: Clone + Eq + Hash + 'static> Set<A> {
    /// Views `storage` without copying. Unlike vector views the size is read
    /// live, so the caller must not empty a set it has refined to non-empty.
    pub fn wrap(storage: Rc<RefCell<HashSet<A>>>) -> Self {
        if storage.borrow().is_empty() {
            return Self::from_repr(SetRepr::Empty);
        }
        Self::from_repr(SetRepr::Wrapped(storage))
    }
}

impl<A: Clone + Eq + Hash + 'static> ImmutableSet<A> {
    pub fn empty() -> Self {
        Self::from_repr(SetRepr::Empty)
    }

    /// Copies the distinct elements of `source` into private storage.
    pub fn copy_from<I: IntoIterator<Item = A>>(source: I) -> Self {
        let set: HashSet<A> = source.into_iter().collect();
        trace!(len = set.len(), "copied iterable into immutable set");
        Self::from_hash_set(set)
    }

    pub fn from_hash_set(set: HashSet<A>) -> Self {
        if set.is_empty() {
            Self::from_repr(SetRepr::Empty)
        } else {
            Self::from_repr(SetRepr::Owned(Rc::new(set)))
        }
    }
}

impl<A: Clone + Eq + Hash + 'static, M: Mutability, E: Emptiness> SetView<A, M, E> {
    fn from_repr(repr: SetRepr<A>) -> Self {
        Self {
            repr,
            capabilities: PhantomData,
        }
    }

    fn retag<M2: Mutability, E2: Emptiness>(&self) -> SetView<A, M2, E2> {
        SetView::from_repr(self.repr.clone())
    }

    fn is_immutable(&self) -> bool {
        !matches!(self.repr, SetRepr::Wrapped(_))
    }

    pub fn size(&self) -> usize {
        match &self.repr {
            SetRepr::Empty => 0,
            SetRepr::Wrapped(set) => set.borrow().len(),
            SetRepr::Owned(set) => set.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn contains(&self, value: &A) -> bool {
        match &self.repr {
            SetRepr::Empty => false,
            SetRepr::Wrapped(set) => set.borrow().contains(value),
            SetRepr::Owned(set) => set.contains(value),
        }
    }

    /// Iterates in unspecified order. Wrapped storage is snapshotted first.
    pub fn iter(&self) -> SetIter<'_, A> {
        match &self.repr {
            SetRepr::Empty => SetIter::Empty,
            SetRepr::Wrapped(set) => {
                let snapshot: Vec<A> = set.borrow().iter().cloned().collect();
                SetIter::Snapshot(snapshot.into_iter())
            }
            SetRepr::Owned(set) => SetIter::Borrowed(set.iter()),
        }
    }

    /// Returns this set when its storage is already private, otherwise a
    /// one-time copy.
    pub fn to_immutable(&self) -> SetView<A, Immutable, E> {
        if self.is_immutable() {
            return self.retag();
        }
        trace!(len = self.size(), "defensive copy of mutable set");
        SetView::from_repr(SetRepr::Owned(Rc::new(self.iter().collect())))
    }

    pub fn to_non_empty(&self) -> Option<SetView<A, M, NonEmpty>> {
        if self.is_empty() {
            None
        } else {
            Some(self.retag())
        }
    }

    pub fn to_non_empty_or_throw(&self) -> Result<SetView<A, M, NonEmpty>> {
        self.to_non_empty().ok_or(ViewError::EmptyInput)
    }

    pub fn into_set(self) -> Set<A> {
        self.retag()
    }

    pub fn ptr_eq<M2, E2>(this: &Self, other: &SetView<A, M2, E2>) -> bool {
        match (&this.repr, &other.repr) {
            (SetRepr::Empty, SetRepr::Empty) => true,
            (SetRepr::Wrapped(a), SetRepr::Wrapped(b)) => Rc::ptr_eq(a, b),
            (SetRepr::Owned(a), SetRepr::Owned(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

pub enum SetIter<'a, A> {
    Empty,
    Borrowed(hash_set::Iter<'a, A>),
    Snapshot(vec::IntoIter<A>),
}

impl<A: Clone> Iterator for SetIter<'_, A> {
    type Item = A;

    fn next(&mut self) -> Option<A> {
        match self {
            SetIter::Empty => None,
            SetIter::Borrowed(iter) => iter.next().cloned(),
            SetIter::Snapshot(iter) => iter.next(),
        }
    }
}

impl<A, M1, E1, M2, E2> PartialEq<SetView<A, M2, E2>> for SetView<A, M1, E1>
where
    A: Clone + Eq + Hash + 'static,
    M1: Mutability,
    E1: Emptiness,
    M2: Mutability,
    E2: Emptiness,
{
    fn eq(&self, other: &SetView<A, M2, E2>) -> bool {
        self.size() == other.size() && self.iter().all(|value| other.contains(&value))
    }
}

impl<A: Clone + Eq + Hash + 'static, M: Mutability, E: Emptiness> Eq for SetView<A, M, E> {}

fn render<A, I, F>(f: &mut fmt::Formatter<'_>, items: I, mut item: F) -> fmt::Result
where
    I: IntoIterator<Item = A>,
    F: FnMut(&mut fmt::Formatter<'_>, &A) -> fmt::Result,
{
    f.write_str("Set(")?;
    for (position, value) in items.into_iter().enumerate() {
        if position > 0 {
            f.write_str(", ")?;
        }
        item(f, &value)?;
    }
    f.write_str(")")
}

impl<A, M, E> fmt::Display for SetView<A, M, E>
where
    A: Clone + Eq + Hash + fmt::Display + 'static,
    M: Mutability,
    E: Emptiness,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, self.iter(), |f, value| write!(f, "{value}"))
    }
}

impl<A, M, E> fmt::Debug for SetView<A, M, E>
where
    A: Clone + Eq + Hash + fmt::Debug + 'static,
    M: Mutability,
    E: Emptiness,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, self.iter(), |f, value| write!(f, "{value:?}"))
    }
}
