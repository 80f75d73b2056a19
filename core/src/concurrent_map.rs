//! Sharded map for accumulating values from many threads at once.
//!
//! Keys are spread over a fixed number of shards, each behind its own
//! mutex, so writers touching different shards never contend. A write
//! holds exactly one shard lock for a single read-modify-write.

use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};
use std::collections::BTreeMap;

use crate::error::{Result, SearchError};

pub const DEFAULT_SHARD_COUNT: usize = 8;

/// Integer keys that pick their shard as `key mod shard_count`.
pub trait ShardKey: Copy + Ord {
    fn shard_index(self, shard_count: usize) -> usize;
}

macro_rules! impl_shard_key {
    ($($t:ty),*) => {
        $(impl ShardKey for $t {
            #[inline]
            fn shard_index(self, shard_count: usize) -> usize {
                (self as i128).rem_euclid(shard_count as i128) as usize
            }
        })*
    };
}

impl_shard_key!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

pub struct ConcurrentMap<K, V> {
    shards: Vec<Mutex<BTreeMap<K, V>>>,
}

impl<K: ShardKey, V: Default> ConcurrentMap<K, V> {
    pub fn new(shard_count: usize) -> Result<Self> {
        if shard_count == 0 {
            return Err(SearchError::invalid_argument("concurrent map needs at least one shard"));
        }
        let shards = (0..shard_count).map(|_| Mutex::new(BTreeMap::new())).collect();
        Ok(Self { shards })
    }

    pub fn shard_count(&self) -> usize { self.shards.len() }

    /// Lock the shard owning `key` and return its slot, inserting `V::default()`
    /// when absent. The shard stays locked until the handle is dropped.
    pub fn access(&self, key: K) -> MappedMutexGuard<'_, V> {
        let shard = &self.shards[key.shard_index(self.shards.len())];
        MutexGuard::map(shard.lock(), |map| map.entry(key).or_default())
    }

    /// Merge every shard into one ordered map.
    ///
    /// All shard locks are taken in ascending shard order and held until the
    /// merge completes, so the result is a consistent snapshot.
    pub fn build_ordinary_map(&self) -> BTreeMap<K, V>
    where
        V: Clone,
    {
        let guards: Vec<_> = self.shards.iter().map(|shard| shard.lock()).collect();
        let mut merged = BTreeMap::new();
        for guard in &guards {
            merged.extend(guard.iter().map(|(k, v)| (*k, v.clone())));
        }
        merged
    }

    /// Consume the map and merge its shards without cloning.
    pub fn into_ordinary_map(self) -> BTreeMap<K, V> {
        let mut merged = BTreeMap::new();
        for shard in self.shards {
            merged.append(&mut shard.into_inner());
        }
        merged
    }
}

impl<K: ShardKey, V: Default> Default for ConcurrentMap<K, V> {
    fn default() -> Self {
        Self { shards: (0..DEFAULT_SHARD_COUNT).map(|_| Mutex::new(BTreeMap::new())).collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;

    #[test]
    fn zero_shards_is_rejected() {
        assert!(ConcurrentMap::<i32, f64>::new(0).is_err());
    }

    #[test]
    fn negative_keys_pick_valid_shards() {
        assert_eq!((-1i32).shard_index(8), 7);
        assert_eq!(9u64.shard_index(8), 1);
    }

    #[test]
    fn access_inserts_default() {
        let map = ConcurrentMap::<i32, f64>::new(3).unwrap();
        assert_eq!(map.shard_count(), 3);
        *map.access(4) += 1.5;
        *map.access(4) += 1.0;
        assert_eq!(*map.access(7), 0.0);
        let merged = map.build_ordinary_map();
        assert_eq!(merged.into_iter().collect::<Vec<_>>(), vec![(4, 2.5), (7, 0.0)]);
    }

    #[test]
    fn parallel_increments_are_not_lost() {
        let map = ConcurrentMap::<u32, u64>::default();
        assert_eq!(map.shard_count(), DEFAULT_SHARD_COUNT);
        (0..10_000u32).into_par_iter().for_each(|i| {
            *map.access(i % 100) += 1;
        });
        let merged = map.into_ordinary_map();
        assert_eq!(merged.len(), 100);
        assert!(merged.values().all(|&count| count == 100));
        assert_eq!(merged.keys().copied().collect::<Vec<_>>(), (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn merge_while_writers_run() {
        let map = ConcurrentMap::<i64, i64>::new(4).unwrap();
        std::thread::scope(|s| {
            s.spawn(|| {
                for i in 0..1_000 {
                    *map.access(i) += 1;
                }
            });
            s.spawn(|| {
                for _ in 0..50 {
                    let snapshot = map.build_ordinary_map();
                    assert!(snapshot.values().all(|&v| v == 1));
                }
            });
        });
        assert_eq!(map.build_ordinary_map().len(), 1_000);
    }
}
