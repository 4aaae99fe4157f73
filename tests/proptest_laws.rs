//! Property-based tests for view laws.
//!
//! Tests the following properties:
//! - get/unsafe_get agreement inside and outside the bounds
//! - functor identity and composition
//! - take/drop/slice agree with slicing a plain `Vec`
//! - copies are unaffected by later writes to the source

use std::cell::RefCell;
use std::rc::Rc;

use collection_views::{vectors, Vector, View};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_items(max_len: usize) -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-1000i64..1000i64, 0..=max_len)
}

/// The same contents behind each representation a caller can end up with.
fn representations(items: &[i64]) -> Vec<Vector<i64>> {
    let mut padded = vec![0];
    padded.extend_from_slice(items);
    padded.push(0);
    vec![
        vectors::wrap(Rc::new(RefCell::new(items.to_vec()))),
        vectors::from_vec(items.to_vec()).into(),
        vectors::from_vec(padded.clone()).slice(1, items.len() + 1).into(),
        vectors::from_vec(padded).fmap(|n| n).slice(1, items.len() + 1).into(),
        vectors::from_vec(items.iter().map(|n| n - 1).collect()).fmap(|n| n + 1).into(),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn every_representation_holds_the_same_elements(items in arb_items(8)) {
        for view in representations(&items) {
            prop_assert_eq!(view.size(), items.len());
            prop_assert_eq!(view.to_vec(), items.clone());
        }
    }

    #[test]
    fn get_agrees_with_unsafe_get(items in arb_items(8), index in 0usize..12) {
        for view in representations(&items) {
            match view.unsafe_get(index) {
                Ok(value) => prop_assert_eq!(view.get(index), Some(value)),
                Err(_) => {
                    prop_assert!(index >= items.len());
                    prop_assert_eq!(view.get(index), None);
                }
            }
        }
    }

    #[test]
    fn fmap_identity(items in arb_items(8)) {
        for view in representations(&items) {
            prop_assert_eq!(view.fmap(|n| n), view.clone());
        }
    }

    #[test]
    fn fmap_composition(items in arb_items(8), a in -50i64..50, b in -50i64..50) {
        let f = move |n: i64| n * a;
        let g = move |n: i64| n + b;
        for view in representations(&items) {
            prop_assert_eq!(view.fmap(f).fmap(g), view.fmap(move |n| g(f(n))));
        }
    }

    #[test]
    fn take_matches_vec(items in arb_items(8), count in 0usize..12) {
        let expected: Vec<i64> = items.iter().copied().take(count).collect();
        for view in representations(&items) {
            prop_assert_eq!(view.take(count).to_vec(), expected.clone());
        }
    }

    #[test]
    fn drop_matches_vec(items in arb_items(8), count in 0usize..12) {
        let expected: Vec<i64> = items.iter().copied().skip(count).collect();
        for view in representations(&items) {
            let dropped = view.drop(count);
            prop_assert_eq!(dropped.to_vec(), expected.clone());
            if count == 0 {
                prop_assert!(View::ptr_eq(&dropped, &view));
            }
        }
    }

    #[test]
    fn slice_matches_vec(items in arb_items(8), start in 0usize..12, end in 0usize..12) {
        let expected: Vec<i64> = items.iter().copied().skip(start).take(end.saturating_sub(start)).collect();
        for view in representations(&items) {
            let sliced = view.slice(start, end);
            prop_assert_eq!(sliced.to_vec(), expected.clone());
            prop_assert_eq!(sliced.slice(0, end).to_vec(), expected.clone());
        }
    }

    #[test]
    fn nested_slices_compose(items in arb_items(10), a in 0usize..12, b in 0usize..12) {
        let view = vectors::from_vec(items.clone());
        let expected: Vec<i64> = items.iter().copied().skip(a).skip(b).collect();
        prop_assert_eq!(view.drop(a).drop(b).to_vec(), expected);
    }

    #[test]
    fn copies_ignore_later_writes(items in prop::collection::vec(-1000i64..1000i64, 1..8)) {
        let storage = Rc::new(RefCell::new(items.clone()));
        let copied = vectors::wrap(Rc::clone(&storage)).to_immutable();
        for value in storage.borrow_mut().iter_mut() {
            *value += 1;
        }
        prop_assert_eq!(copied.to_vec(), items);
    }
}
