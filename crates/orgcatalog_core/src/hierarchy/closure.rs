//! Bounded category closure.
//!
//! # Invariants
//! - The result always contains the root id, known or not.
//! - Only [`CLOSURE_DEPTH`] levels below the root are walked; deeper
//!   descendants are excluded.

use crate::model::business::{Business, BusinessId};
use std::collections::{BTreeMap, BTreeSet};
use std::convert::Infallible;

/// Number of levels below the root included in a closure.
pub const CLOSURE_DEPTH: usize = 2;

/// Source of direct-child lookups for a set of parent categories.
pub trait ChildFetcher {
    type Error;

    /// Returns ids of all categories whose `parent_id` is in `parent_ids`.
    fn children_of(&self, parent_ids: &[BusinessId]) -> Result<Vec<BusinessId>, Self::Error>;
}

impl<F: ChildFetcher + ?Sized> ChildFetcher for &F {
    type Error = F::Error;

    fn children_of(&self, parent_ids: &[BusinessId]) -> Result<Vec<BusinessId>, Self::Error> {
        (**self).children_of(parent_ids)
    }
}

/// In-memory `parent_id -> children` index over a category snapshot.
#[derive(Debug, Clone, Default)]
pub struct ParentIndex {
    children: BTreeMap<BusinessId, Vec<BusinessId>>,
}

impl ParentIndex {
    pub fn from_businesses<'a, I>(businesses: I) -> Self
    where
        I: IntoIterator<Item = &'a Business>,
    {
        let mut children: BTreeMap<BusinessId, Vec<BusinessId>> = BTreeMap::new();
        for business in businesses {
            if let Some(parent_id) = business.parent_id {
                children.entry(parent_id).or_default().push(business.id);
            }
        }
        Self { children }
    }
}

impl ChildFetcher for ParentIndex {
    type Error = Infallible;

    fn children_of(&self, parent_ids: &[BusinessId]) -> Result<Vec<BusinessId>, Self::Error> {
        Ok(parent_ids
            .iter()
            .filter_map(|parent_id| self.children.get(parent_id))
            .flatten()
            .copied()
            .collect())
    }
}

/// Returns `root_id` plus its children and grandchildren.
///
/// Existence of `root_id` is not checked; an unknown root yields `{root_id}`.
/// Only fetcher errors are propagated.
pub fn category_subtree_ids<F: ChildFetcher>(
    root_id: BusinessId,
    fetcher: &F,
) -> Result<BTreeSet<BusinessId>, F::Error> {
    let mut all_ids = BTreeSet::from([root_id]);
    let mut frontier = vec![root_id];

    for _ in 0..CLOSURE_DEPTH {
        let level: BTreeSet<BusinessId> = fetcher.children_of(&frontier)?.into_iter().collect();
        if level.is_empty() {
            break;
        }
        all_ids.extend(level.iter().copied());
        frontier = level.into_iter().collect();
    }

    Ok(all_ids)
}

#[cfg(test)]
mod tests {
    use super::{category_subtree_ids, ChildFetcher, ParentIndex};
    use crate::model::business::{Business, BusinessId};
    use std::cell::RefCell;
    use std::collections::BTreeSet;

    fn business(id: BusinessId, parent_id: Option<BusinessId>) -> Business {
        Business {
            id,
            name: format!("category {id}"),
            parent_id,
        }
    }

    fn chain() -> Vec<Business> {
        vec![
            business(1, None),
            business(2, Some(1)),
            business(3, Some(2)),
            business(4, Some(3)),
        ]
    }

    #[test]
    fn closure_of_leaf_contains_only_root() {
        let index = ParentIndex::from_businesses(&chain());
        let ids = category_subtree_ids(4, &index).expect("closure walk should succeed");
        assert_eq!(ids, BTreeSet::from([4]));
    }

    #[test]
    fn closure_of_unknown_root_contains_only_root() {
        let index = ParentIndex::from_businesses(&chain());
        let ids = category_subtree_ids(999, &index).expect("closure walk should succeed");
        assert_eq!(ids, BTreeSet::from([999]));
    }

    #[test]
    fn closure_stops_two_levels_below_root() {
        let index = ParentIndex::from_businesses(&chain());
        let ids = category_subtree_ids(1, &index).expect("closure walk should succeed");
        assert_eq!(ids, BTreeSet::from([1, 2, 3]));
        assert!(!ids.contains(&4));
    }

    #[test]
    fn closure_collects_all_siblings_per_level() {
        let tree = vec![
            business(10, None),
            business(11, Some(10)),
            business(12, Some(10)),
            business(13, Some(11)),
            business(14, Some(12)),
            business(15, Some(12)),
            business(16, Some(15)),
            business(20, None),
            business(21, Some(20)),
        ];
        let index = ParentIndex::from_businesses(&tree);

        assert_eq!(
            category_subtree_ids(10, &index).expect("closure walk should succeed"),
            BTreeSet::from([10, 11, 12, 13, 14, 15])
        );
        assert_eq!(
            category_subtree_ids(12, &index).expect("closure walk should succeed"),
            BTreeSet::from([12, 14, 15, 16])
        );
    }

    struct CountingFetcher {
        index: ParentIndex,
        calls: RefCell<Vec<Vec<BusinessId>>>,
    }

    impl ChildFetcher for CountingFetcher {
        type Error = String;

        fn children_of(&self, parent_ids: &[BusinessId]) -> Result<Vec<BusinessId>, String> {
            self.calls.borrow_mut().push(parent_ids.to_vec());
            Ok(self.index.children_of(parent_ids).unwrap_or_default())
        }
    }

    #[test]
    fn childless_root_skips_grandchild_lookup() {
        let fetcher = CountingFetcher {
            index: ParentIndex::from_businesses(&chain()),
            calls: RefCell::new(Vec::new()),
        };
        category_subtree_ids(4, &fetcher).expect("closure walk should succeed");
        assert_eq!(fetcher.calls.borrow().as_slice(), &[vec![4]]);
    }

    #[test]
    fn grandchild_lookup_uses_child_ids() {
        let fetcher = CountingFetcher {
            index: ParentIndex::from_businesses(&chain()),
            calls: RefCell::new(Vec::new()),
        };
        category_subtree_ids(1, &fetcher).expect("closure walk should succeed");
        assert_eq!(fetcher.calls.borrow().as_slice(), &[vec![1], vec![2]]);
    }

    struct FailingFetcher;

    impl ChildFetcher for FailingFetcher {
        type Error = &'static str;

        fn children_of(&self, _parent_ids: &[BusinessId]) -> Result<Vec<BusinessId>, Self::Error> {
            Err("store unavailable")
        }
    }

    #[test]
    fn fetcher_errors_are_propagated() {
        assert_eq!(category_subtree_ids(1, &FailingFetcher), Err("store unavailable"));
    }
}
