//! Execution policies shared by ranking, matching and removal.
//!
//! Each algorithm is written once against [`ExecutionPolicy`]; the policy
//! decides whether the fan-out over a word list runs on the calling thread
//! or on the rayon pool.

use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::concurrent_map::ConcurrentMap;
use crate::DocId;

/// Callback that receives one `(document, score delta)` contribution.
pub type ScoreSink<'s> = dyn FnMut(DocId, f64) + 's;

pub trait ExecutionPolicy: Copy + Send + Sync {
    /// Run `score` for every item and sum the contributions per document.
    fn accumulate<T, F>(self, items: &[T], score: F) -> BTreeMap<DocId, f64>
    where
        T: Sync,
        F: Fn(&T, &mut ScoreSink<'_>) + Sync;

    fn any<T, F>(self, items: &[T], predicate: F) -> bool
    where
        T: Sync,
        F: Fn(&T) -> bool + Sync;

    /// Keep the items matching `predicate`, preserving their order.
    fn filter<T, F>(self, items: &[T], predicate: F) -> Vec<T>
    where
        T: Copy + Send + Sync,
        F: Fn(&T) -> bool + Sync;

    fn for_each_mut<T, F>(self, items: &mut [T], f: F)
    where
        T: Send,
        F: Fn(&mut T) + Sync + Send;

    /// Stable sort.
    fn sort_by<T, F>(self, items: &mut [T], compare: F)
    where
        T: Send,
        F: Fn(&T, &T) -> Ordering + Sync;
}

/// Everything runs on the calling thread; scores go into a plain map.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequential;

/// Fan-out on the rayon pool; scores go into a [`ConcurrentMap`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Parallel;

impl ExecutionPolicy for Sequential {
    fn accumulate<T, F>(self, items: &[T], score: F) -> BTreeMap<DocId, f64>
    where
        T: Sync,
        F: Fn(&T, &mut ScoreSink<'_>) + Sync,
    {
        let mut relevance = BTreeMap::new();
        for item in items {
            score(item, &mut |id: DocId, delta: f64| *relevance.entry(id).or_insert(0.0) += delta);
        }
        relevance
    }

    fn any<T, F>(self, items: &[T], predicate: F) -> bool
    where
        T: Sync,
        F: Fn(&T) -> bool + Sync,
    {
        items.iter().any(predicate)
    }

    fn filter<T, F>(self, items: &[T], predicate: F) -> Vec<T>
    where
        T: Copy + Send + Sync,
        F: Fn(&T) -> bool + Sync,
    {
        items.iter().copied().filter(|item| predicate(item)).collect()
    }

    fn for_each_mut<T, F>(self, items: &mut [T], f: F)
    where
        T: Send,
        F: Fn(&mut T) + Sync + Send,
    {
        items.iter_mut().for_each(f)
    }

    fn sort_by<T, F>(self, items: &mut [T], compare: F)
    where
        T: Send,
        F: Fn(&T, &T) -> Ordering + Sync,
    {
        items.sort_by(compare)
    }
}

impl ExecutionPolicy for Parallel {
    fn accumulate<T, F>(self, items: &[T], score: F) -> BTreeMap<DocId, f64>
    where
        T: Sync,
        F: Fn(&T, &mut ScoreSink<'_>) + Sync,
    {
        let relevance = ConcurrentMap::<DocId, f64>::default();
        items.par_iter().for_each(|item| {
            score(item, &mut |id: DocId, delta: f64| *relevance.access(id) += delta);
        });
        relevance.build_ordinary_map()
    }

    fn any<T, F>(self, items: &[T], predicate: F) -> bool
    where
        T: Sync,
        F: Fn(&T) -> bool + Sync,
    {
        items.par_iter().any(|item| predicate(item))
    }

    fn filter<T, F>(self, items: &[T], predicate: F) -> Vec<T>
    where
        T: Copy + Send + Sync,
        F: Fn(&T) -> bool + Sync,
    {
        items.par_iter().copied().filter(|item| predicate(item)).collect()
    }

    fn for_each_mut<T, F>(self, items: &mut [T], f: F)
    where
        T: Send,
        F: Fn(&mut T) + Sync + Send,
    {
        items.par_iter_mut().for_each(f)
    }

    fn sort_by<T, F>(self, items: &mut [T], compare: F)
    where
        T: Send,
        F: Fn(&T, &T) -> Ordering + Sync,
    {
        items.par_sort_by(compare)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores<E: ExecutionPolicy>(policy: E) -> BTreeMap<DocId, f64> {
        let words = [("a", vec![(1, 0.5), (2, 0.25)]), ("b", vec![(1, 0.125)]), ("c", vec![(3, 1.0)])];
        policy.accumulate(&words, |(_, postings), sink| {
            for &(id, tf) in postings {
                sink(id, tf);
            }
        })
    }

    #[test]
    fn policies_accumulate_the_same_scores() {
        let seq = scores(Sequential);
        let par = scores(Parallel);
        assert_eq!(seq.keys().collect::<Vec<_>>(), par.keys().collect::<Vec<_>>());
        for (id, score) in &seq {
            assert!((score - par[id]).abs() < 1e-12);
        }
        assert_eq!(seq[&1], 0.625);
    }

    #[test]
    fn filter_keeps_order() {
        let items = [5, 1, 4, 2, 3];
        assert_eq!(Sequential.filter(&items, |x| x % 2 == 1), vec![5, 1, 3]);
        assert_eq!(Parallel.filter(&items, |x| x % 2 == 1), vec![5, 1, 3]);
        assert!(Parallel.any(&items, |&x| x == 4));
        assert!(!Sequential.any(&items, |&x| x == 9));
    }

    #[test]
    fn sorts_are_stable() {
        let mut seq = vec![(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')];
        let mut par = seq.clone();
        Sequential.sort_by(&mut seq, |l, r| l.0.cmp(&r.0));
        Parallel.sort_by(&mut par, |l, r| l.0.cmp(&r.0));
        assert_eq!(seq, vec![(0, 'b'), (0, 'd'), (1, 'a'), (1, 'c')]);
        assert_eq!(seq, par);
    }
}
