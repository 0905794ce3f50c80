//! Chained hash table keyed by board coordinates.
//!
//! Coordinates are mapped to a single integer with a signed variant of the
//! Cantor pairing function: each axis is folded onto the naturals
//! (`v >= 0 -> 2v`, `v < 0 -> -2v - 1`) and the two results are paired with
//! `(a + b)(a + b + 1) / 2 + b`. The pairing is computed in `u128`, so it is
//! injective over the whole `i32 x i32` plane.
//!
//! Collisions are resolved by chaining. The bucket count doubles once the
//! load factor passes [`MAX_LOAD_FACTOR`], which keeps insert, lookup, and
//! removal amortized O(1) no matter how far a game sprawls.

use crate::board::Coord;
use crate::constants::{INITIAL_CAPACITY, MAX_LOAD_FACTOR};

/// Fold a signed axis value onto the non-negative integers.
#[inline]
fn fold(v: i32) -> u64 {
    let v = v as i64;
    if v >= 0 { (2 * v) as u64 } else { (-2 * v - 1) as u64 }
}

/// Signed Cantor pairing of a coordinate.
///
/// Equal coordinates always produce equal values and distinct coordinates
/// never collide.
#[inline]
pub fn cantor_pair(coord: Coord) -> u128 {
    let a = fold(coord.x) as u128;
    let b = fold(coord.y) as u128;
    (a + b) * (a + b + 1) / 2 + b
}

/// A hash table from [`Coord`] to `V` with separate chaining.
#[derive(Clone, Debug)]
pub struct CoordTable<V> {
    buckets: Vec<Vec<(Coord, V)>>,
    len: usize,
}

impl<V> Default for CoordTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> CoordTable<V> {
    /// Create an empty table with the default bucket count.
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Create an empty table with `capacity` buckets (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, Vec::new);
        Self { buckets, len: 0 }
    }

    #[inline]
    fn index(&self, coord: Coord) -> usize {
        (cantor_pair(coord) % self.buckets.len() as u128) as usize
    }

    /// Number of stored entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current number of buckets.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Insert or overwrite the value at `coord`, returning the previous value.
    pub fn insert(&mut self, coord: Coord, value: V) -> Option<V> {
        let idx = self.index(coord);
        if let Some(slot) = self.buckets[idx].iter_mut().find(|(k, _)| *k == coord) {
            return Some(std::mem::replace(&mut slot.1, value));
        }

        self.buckets[idx].push((coord, value));
        self.len += 1;
        if self.len as f64 > self.buckets.len() as f64 * MAX_LOAD_FACTOR {
            self.grow();
        }
        None
    }

    pub fn get(&self, coord: Coord) -> Option<&V> {
        self.buckets[self.index(coord)]
            .iter()
            .find(|(k, _)| *k == coord)
            .map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut V> {
        let idx = self.index(coord);
        self.buckets[idx]
            .iter_mut()
            .find(|(k, _)| *k == coord)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, coord: Coord) -> bool {
        self.get(coord).is_some()
    }

    /// Remove the entry at `coord`.
    ///
    /// The remaining entries of the bucket keep their relative order, so
    /// iteration order is unaffected for every other key.
    pub fn remove(&mut self, coord: Coord) -> Option<V> {
        let idx = self.index(coord);
        let bucket = &mut self.buckets[idx];
        let pos = bucket.iter().position(|(k, _)| *k == coord)?;
        self.len -= 1;
        Some(bucket.remove(pos).1)
    }

    /// Drop every entry, keeping the current bucket count.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }

    /// Iterate over all entries in bucket order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &V)> + '_ {
        self.buckets
            .iter()
            .flat_map(|bucket| bucket.iter().map(|(k, v)| (*k, v)))
    }

    /// All stored keys, in iteration order.
    pub fn keys(&self) -> Vec<Coord> {
        self.iter().map(|(k, _)| k).collect()
    }

    /// Double the bucket count and redistribute the entries.
    fn grow(&mut self) {
        let new_capacity = self.buckets.len() * 2;
        let old = std::mem::take(&mut self.buckets);
        self.buckets.resize_with(new_capacity, Vec::new);
        for (coord, value) in old.into_iter().flatten() {
            let idx = self.index(coord);
            self.buckets[idx].push((coord, value));
        }
        log::trace!("coordinate table grew to {new_capacity} buckets");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_interleaves_signs() {
        assert_eq!(fold(0), 0);
        assert_eq!(fold(-1), 1);
        assert_eq!(fold(1), 2);
        assert_eq!(fold(-2), 3);
        assert_eq!(fold(i32::MAX), 2 * i32::MAX as u64);
        assert_eq!(fold(i32::MIN), u32::MAX as u64);
    }

    #[test]
    fn test_cantor_pair_known_values() {
        assert_eq!(cantor_pair(Coord::new(0, 0)), 0);
        // a = 0, b = 2 -> 3 * 2 = 6 / 2 = 3, + 2
        assert_eq!(cantor_pair(Coord::new(0, 1)), 5);
        // a = 1, b = 0 -> 1
        assert_eq!(cantor_pair(Coord::new(-1, 0)), 1);
    }

    #[test]
    fn test_cantor_pair_is_injective_on_grid() {
        let mut seen = std::collections::HashSet::new();
        for x in -30..=30 {
            for y in -30..=30 {
                assert!(seen.insert(cantor_pair(Coord::new(x, y))), "collision at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_cantor_pair_extremes_do_not_collide() {
        let corners = [
            Coord::new(i32::MIN, i32::MIN),
            Coord::new(i32::MIN, i32::MAX),
            Coord::new(i32::MAX, i32::MIN),
            Coord::new(i32::MAX, i32::MAX),
        ];
        for (i, a) in corners.iter().enumerate() {
            for b in &corners[i + 1..] {
                assert_ne!(cantor_pair(*a), cantor_pair(*b));
            }
        }
    }

    #[test]
    fn test_insert_get_remove() {
        let mut t = CoordTable::with_capacity(16);
        let p1 = Coord::new(5, 10);
        let p2 = Coord::new(-3, 7);
        let p3 = Coord::new(100, -50);

        assert_eq!(t.insert(p1, 1), None);
        assert_eq!(t.insert(p2, 2), None);
        assert_eq!(t.insert(p3, 3), None);
        assert_eq!(t.len(), 3);
        assert_eq!(t.get(p1), Some(&1));
        assert_eq!(t.get(p2), Some(&2));
        assert_eq!(t.get(p3), Some(&3));
        assert!(!t.contains_key(Coord::new(999, 999)));

        assert_eq!(t.remove(p2), Some(2));
        assert!(!t.contains_key(p2));
        assert_eq!(t.len(), 2);
        assert_eq!(t.remove(p2), None);
    }

    #[test]
    fn test_insert_overwrites() {
        let mut t = CoordTable::with_capacity(4);
        let p = Coord::new(1, 1);
        t.insert(p, 'a');
        assert_eq!(t.insert(p, 'b'), Some('a'));
        assert_eq!(t.len(), 1);
        *t.get_mut(p).unwrap() = 'c';
        assert_eq!(t.get(p), Some(&'c'));
    }

    #[test]
    fn test_growth_keeps_entries() {
        let mut t = CoordTable::with_capacity(2);
        for x in -20..20 {
            t.insert(Coord::new(x, -x), x);
        }
        assert_eq!(t.len(), 40);
        assert!(t.capacity() >= 40);
        for x in -20..20 {
            assert_eq!(t.get(Coord::new(x, -x)), Some(&x));
        }
    }

    #[test]
    fn test_remove_preserves_order_of_others() {
        // a single chain, built by hand so growth cannot split it
        let keys = [Coord::new(0, 0), Coord::new(1, 0), Coord::new(2, 0)];
        let mut t = CoordTable { buckets: vec![Vec::new()], len: 0 };
        for (i, k) in keys.iter().enumerate() {
            t.buckets[0].push((*k, i));
            t.len += 1;
        }
        assert_eq!(t.remove(keys[1]), Some(1));
        assert_eq!(t.keys(), vec![keys[0], keys[2]]);
        assert_eq!(t.get(keys[2]), Some(&2));
    }

    #[test]
    fn test_clear() {
        let mut t = CoordTable::new();
        t.insert(Coord::new(3, 4), ());
        t.clear();
        assert!(t.is_empty());
        assert_eq!(t.iter().count(), 0);
        assert_eq!(t.capacity(), INITIAL_CAPACITY);
    }
}
