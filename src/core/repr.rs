//! Concrete storage behind a view handle.
//!
//! Every view handle owns exactly one [`Repr`]. Cloning a `Repr` only bumps
//! reference counts, so handing the same representation back from an
//! operation preserves identity.

use std::cell::RefCell;
use std::cmp::min;
use std::rc::Rc;

use super::mapper_chain::MapperChain;

/// Random access into storage the view does not own outright.
pub(crate) trait Backing<A> {
    fn at(&self, index: usize) -> Option<A>;
}

impl<A: Clone, S: AsRef<[A]>> Backing<A> for RefCell<S> {
    fn at(&self, index: usize) -> Option<A> {
        self.borrow().as_ref().get(index).cloned()
    }
}

pub(crate) enum Repr<A> {
    /// Zero-sized, so every empty view is the same value.
    Empty,
    /// Caller storage shared through an `Rc<RefCell<_>>` handle.
    Wrapped {
        storage: Rc<dyn Backing<A>>,
        len: usize,
        vouched: bool,
    },
    /// Private storage nobody else can reach.
    Owned(Rc<[A]>),
    Slice(Rc<Slice<A>>),
    Cons(Rc<Cons<A>>),
    /// Element type is erased inside the chain; `A` is its output type.
    Mapped(Rc<MapperChain>),
}

/// `offset + len <= source.len()` always holds.
pub(crate) struct Slice<A> {
    source: Repr<A>,
    offset: usize,
    len: usize,
}

pub(crate) struct Cons<A> {
    head: A,
    tail: Repr<A>,
}

impl<A> Clone for Repr<A> {
    fn clone(&self) -> Self {
        match self {
            Repr::Empty => Repr::Empty,
            Repr::Wrapped {
                storage,
                len,
                vouched,
            } => Repr::Wrapped {
                storage: Rc::clone(storage),
                len: *len,
                vouched: *vouched,
            },
            Repr::Owned(items) => Repr::Owned(Rc::clone(items)),
            Repr::Slice(slice) => Repr::Slice(Rc::clone(slice)),
            Repr::Cons(cons) => Repr::Cons(Rc::clone(cons)),
            Repr::Mapped(chain) => Repr::Mapped(Rc::clone(chain)),
        }
    }
}

impl<A: Clone + 'static> Repr<A> {
    pub(crate) fn wrap<S>(storage: Rc<RefCell<S>>, vouched: bool) -> Self
    where
        S: AsRef<[A]> + 'static,
    {
        let len = storage.borrow().as_ref().len();
        if len == 0 {
            return Repr::Empty;
        }
        Repr::Wrapped {
            storage,
            len,
            vouched,
        }
    }

    pub(crate) fn owned(items: Vec<A>) -> Self {
        if items.is_empty() {
            Repr::Empty
        } else {
            Repr::Owned(Rc::from(items))
        }
    }

    pub(crate) fn cons(head: A, tail: Repr<A>) -> Self {
        Repr::Cons(Rc::new(Cons { head, tail }))
    }

    pub(crate) fn mapped(chain: MapperChain) -> Self {
        Repr::Mapped(Rc::new(chain))
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Repr::Empty => 0,
            Repr::Wrapped { len, .. } => *len,
            Repr::Owned(items) => items.len(),
            Repr::Slice(slice) => slice.len,
            Repr::Cons(cons) => 1 + cons.tail.len(),
            Repr::Mapped(chain) => chain.len(),
        }
    }

    pub(crate) fn at(&self, index: usize) -> Option<A> {
        match self {
            Repr::Empty => None,
            Repr::Wrapped { storage, len, .. } => {
                if index < *len {
                    storage.at(index)
                } else {
                    None
                }
            }
            Repr::Owned(items) => items.get(index).cloned(),
            Repr::Slice(slice) => {
                if index < slice.len {
                    slice.source.at(slice.offset + index)
                } else {
                    None
                }
            }
            Repr::Cons(cons) => match index {
                0 => Some(cons.head.clone()),
                _ => cons.tail.at(index - 1),
            },
            Repr::Mapped(chain) => chain.at(index),
        }
    }

    /// True when no holder outside this representation can mutate the
    /// elements it reads.
    pub(crate) fn is_immutable(&self) -> bool {
        match self {
            Repr::Empty | Repr::Owned(_) => true,
            Repr::Wrapped { vouched, .. } => *vouched,
            Repr::Slice(slice) => slice.source.is_immutable(),
            Repr::Cons(cons) => cons.tail.is_immutable(),
            Repr::Mapped(chain) => chain.is_immutable(),
        }
    }

    pub(crate) fn ptr_eq(&self, other: &Repr<A>) -> bool {
        match (self, other) {
            (Repr::Empty, Repr::Empty) => true,
            (
                Repr::Wrapped {
                    storage: a, len: n, ..
                },
                Repr::Wrapped {
                    storage: b, len: m, ..
                },
            ) => Rc::ptr_eq(a, b) && n == m,
            (Repr::Owned(a), Repr::Owned(b)) => Rc::ptr_eq(a, b),
            (Repr::Slice(a), Repr::Slice(b)) => Rc::ptr_eq(a, b),
            (Repr::Cons(a), Repr::Cons(b)) => Rc::ptr_eq(a, b),
            (Repr::Mapped(a), Repr::Mapped(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub(crate) fn drop_front(&self, count: usize) -> Repr<A> {
        if count == 0 {
            return self.clone();
        }
        let len = self.len();
        if count >= len {
            return Repr::Empty;
        }
        match self {
            Repr::Cons(cons) => cons.tail.drop_front(count - 1),
            _ => self.window(count, len - count),
        }
    }

    pub(crate) fn slice(&self, start: usize, end_exclusive: usize) -> Repr<A> {
        let requested = end_exclusive.saturating_sub(start);
        if requested == 0 {
            return Repr::Empty;
        }
        let len = self.len();
        if start == 0 && requested >= len {
            return self.clone();
        }
        if start >= len {
            return Repr::Empty;
        }
        self.window(start, min(len - start, requested))
    }

    /// Slices of slices point straight at the innermost source, and a
    /// window over a mapped view windows the chain's source instead.
    pub(crate) fn window(&self, offset: usize, len: usize) -> Repr<A> {
        let slice = match self {
            Repr::Mapped(chain) => return Repr::mapped(chain.windowed(offset, len)),
            Repr::Slice(outer) => Slice {
                source: outer.source.clone(),
                offset: outer.offset + offset,
                len,
            },
            _ => Slice {
                source: self.clone(),
                offset,
                len,
            },
        };
        Repr::Slice(Rc::new(slice))
    }

    /// Copies every element into fresh private storage.
    pub(crate) fn materialize(&self) -> Repr<A> {
        Repr::owned((0..self.len()).filter_map(|index| self.at(index)).collect())
    }
}
