//! Fused element transforms for mapped views.
//!
//! A mapped view never wraps another mapped view. Mapping over one extends
//! its chain instead, and windowing one windows the chain's source, so the
//! indirection between a mapped view and its source stays at one level
//! however `fmap`, `drop` and `slice` are interleaved. The steps run in a
//! loop rather than as nested closures, which keeps element evaluation off
//! the call stack.

use std::any::Any;
use std::cell::OnceCell;
use std::rc::Rc;

use super::repr::Repr;

type Step = Rc<dyn Fn(Box<dyn Any>) -> Box<dyn Any>>;

/// A source whose element type has been erased.
pub(crate) trait ErasedSource {
    fn len(&self) -> usize;
    fn at_erased(&self, index: usize) -> Option<Box<dyn Any>>;
    fn is_immutable(&self) -> bool;
    /// `offset + len` must not exceed `self.len()`.
    fn window(&self, offset: usize, len: usize) -> Rc<dyn ErasedSource>;
}

impl<S: Clone + 'static> ErasedSource for Repr<S> {
    fn len(&self) -> usize {
        Repr::len(self)
    }

    fn at_erased(&self, index: usize) -> Option<Box<dyn Any>> {
        self.at(index).map(|value| Box::new(value) as Box<dyn Any>)
    }

    fn is_immutable(&self) -> bool {
        Repr::is_immutable(self)
    }

    fn window(&self, offset: usize, len: usize) -> Rc<dyn ErasedSource> {
        Rc::new(Repr::window(self, offset, len))
    }
}

/// One link of a persistent step list, newest step first. Chains extended
/// from a common ancestor share its links.
struct StepNode {
    step: Step,
    prev: Option<Rc<StepNode>>,
}

impl Drop for StepNode {
    // Unlinks iteratively; a recursive drop of a long list would overflow.
    fn drop(&mut self) {
        let mut prev = self.prev.take();
        while let Some(node) = prev {
            match Rc::try_unwrap(node) {
                Ok(mut node) => prev = node.prev.take(),
                Err(_) => break,
            }
        }
    }
}

pub(crate) struct MapperChain {
    source: Rc<dyn ErasedSource>,
    newest: Rc<StepNode>,
    depth: usize,
    /// Oldest transform first, built on the first read.
    flattened: OnceCell<Rc<[Step]>>,
}

impl MapperChain {
    pub(crate) fn new<S, B, F>(source: Repr<S>, f: F) -> Self
    where
        S: Clone + 'static,
        B: 'static,
        F: Fn(S) -> B + 'static,
    {
        Self {
            source: Rc::new(source),
            newest: Rc::new(StepNode {
                step: erase(f),
                prev: None,
            }),
            depth: 1,
            flattened: OnceCell::new(),
        }
    }

    /// Returns a chain over the same source that applies `f` after every
    /// existing step. Costs one allocation whatever the current depth.
    pub(crate) fn then<B, C, F>(&self, f: F) -> Self
    where
        B: 'static,
        C: 'static,
        F: Fn(B) -> C + 'static,
    {
        Self {
            source: Rc::clone(&self.source),
            newest: Rc::new(StepNode {
                step: erase(f),
                prev: Some(Rc::clone(&self.newest)),
            }),
            depth: self.depth + 1,
            flattened: OnceCell::new(),
        }
    }

    /// The same steps over a window of the source.
    pub(crate) fn windowed(&self, offset: usize, len: usize) -> Self {
        Self {
            source: self.source.window(offset, len),
            newest: Rc::clone(&self.newest),
            depth: self.depth,
            flattened: self.flattened.clone(),
        }
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn len(&self) -> usize {
        self.source.len()
    }

    pub(crate) fn is_immutable(&self) -> bool {
        self.source.is_immutable()
    }

    /// `B` must be the output type of the last step.
    pub(crate) fn at<B: 'static>(&self, index: usize) -> Option<B> {
        let mut value = self.source.at_erased(index)?;
        for step in self.steps().iter() {
            value = step(value);
        }
        Some(unbox(value))
    }

    fn steps(&self) -> &Rc<[Step]> {
        self.flattened.get_or_init(|| {
            let mut steps = Vec::with_capacity(self.depth);
            let mut node = Some(&self.newest);
            while let Some(current) = node {
                steps.push(Rc::clone(&current.step));
                node = current.prev.as_ref();
            }
            steps.reverse();
            Rc::from(steps)
        })
    }
}

fn erase<B, C, F>(f: F) -> Step
where
    B: 'static,
    C: 'static,
    F: Fn(B) -> C + 'static,
{
    Rc::new(move |value: Box<dyn Any>| -> Box<dyn Any> { Box::new(f(unbox::<B>(value))) })
}

fn unbox<T: 'static>(value: Box<dyn Any>) -> T {
    match value.downcast::<T>() {
        Ok(value) => *value,
        Err(_) => unreachable!("mapper chain step received a value of the wrong type"),
    }
}
