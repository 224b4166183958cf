use core::cmp::{min, Reverse};

use crate::algo::mcf::path::Path;

/// Policy deciding which of two paths to a node is better, and in which order
/// the Dijkstra frontier is processed.
pub trait Annotation {
    /// Key ordering the frontier; the first key is processed first.
    ///
    /// Keys must be unique per path even when the metrics collide, which is
    /// why every key ends in the path's creation sequence number.
    type Key: Ord + Copy;

    fn key(path: &Path) -> Self::Key;

    /// Whether extending `base` by a link with spare capacity `capacity` and
    /// length `distance` beats the path currently known as `current`.
    fn is_better(current: &Path, base: &Path, capacity: i64, distance: u64) -> bool;
}

/// Shortest paths first, among those with spare capacity.
#[derive(Clone, Copy, Debug, Default)]
pub struct DistanceAnnotation;

impl Annotation for DistanceAnnotation {
    type Key = (u64, u64);

    fn key(path: &Path) -> Self::Key {
        (path.distance, path.seq)
    }

    fn is_better(current: &Path, base: &Path, capacity: i64, distance: u64) -> bool {
        if capacity > 0 && base.capacity > 0 {
            // a path with capacity always beats one without
            current.capacity <= 0 || base.distance.saturating_add(distance) < current.distance
        } else {
            false
        }
    }
}

/// Widest paths first; ties go to the shorter one.
#[derive(Clone, Copy, Debug, Default)]
pub struct CapacityAnnotation;

impl Annotation for CapacityAnnotation {
    type Key = (Reverse<i64>, Reverse<u64>);

    fn key(path: &Path) -> Self::Key {
        (Reverse(path.capacity), Reverse(path.seq))
    }

    fn is_better(current: &Path, base: &Path, capacity: i64, distance: u64) -> bool {
        let min_cap = min(base.capacity, capacity);
        if min_cap == current.capacity {
            base.distance.saturating_add(distance) < current.distance
        } else {
            min_cap > current.capacity
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeSet;
    use alloc::vec::Vec;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn path(seq: u64, capacity: i64, distance: u64) -> Path {
        let mut path = Path::new(0, seq, false);
        path.capacity = capacity;
        path.distance = distance;
        path
    }

    #[test]
    fn distance_prefers_shorter_paths_with_capacity() {
        let base = path(0, 10, 5);
        let current = path(1, 3, 20);
        assert!(DistanceAnnotation::is_better(&current, &base, 4, 10));
        assert!(!DistanceAnnotation::is_better(&current, &base, 4, 15));
        assert!(!DistanceAnnotation::is_better(&current, &base, 0, 1));
        assert!(!DistanceAnnotation::is_better(&current, &path(2, 0, 0), 4, 1));
    }

    #[test]
    fn distance_prefers_any_capacity_over_none() {
        let base = path(0, 10, 50);
        let exhausted = path(1, 0, 1);
        assert!(DistanceAnnotation::is_better(&exhausted, &base, 1, 100));

        let unreachable = Path::new(1, 1, false);
        assert!(DistanceAnnotation::is_better(&unreachable, &base, 1, 100));
    }

    #[test]
    fn capacity_prefers_wider_then_shorter() {
        let base = path(0, 8, 5);
        let current = path(1, 5, 20);
        assert!(CapacityAnnotation::is_better(&current, &base, 6, 100));
        assert!(!CapacityAnnotation::is_better(&current, &base, 4, 1));
        assert!(CapacityAnnotation::is_better(&current, &base, 5, 14));
        assert!(!CapacityAnnotation::is_better(&current, &base, 5, 15));
    }

    #[test]
    fn unreachable_base_never_improves_unreachable_node() {
        let base = Path::new(0, 0, false);
        let current = Path::new(1, 1, false);
        assert!(!CapacityAnnotation::is_better(&current, &base, 10, 1));
        assert!(!DistanceAnnotation::is_better(&current, &base, 10, 1));
    }

    #[test]
    fn frontier_order() {
        let near = path(1, 2, 3);
        let far = path(0, 9, 7);
        assert!(DistanceAnnotation::key(&near) < DistanceAnnotation::key(&far));
        assert!(CapacityAnnotation::key(&far) < CapacityAnnotation::key(&near));
    }

    fn colliding_paths(rng: &mut StdRng, count: u64) -> Vec<Path> {
        (0..count)
            .map(|seq| path(seq, rng.gen_range(-1..3), rng.gen_range(0..3)))
            .collect()
    }

    fn assert_distinct<A: Annotation>(paths: &[Path]) {
        let mut set = BTreeSet::new();
        for p in paths {
            assert!(set.insert(A::key(p)));
        }
        assert_eq!(set.len(), paths.len());

        // re-inserting after an update must not swallow another entry
        for p in paths.iter().step_by(2) {
            assert!(set.remove(&A::key(p)));
            let mut updated = *p;
            updated.capacity += 1;
            updated.distance += 1;
            assert!(set.insert(A::key(&updated)));
        }
        assert_eq!(set.len(), paths.len());

        let keys: Vec<_> = set.iter().copied().collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn colliding_metrics_stay_distinct() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..32 {
            let paths = colliding_paths(&mut rng, 64);
            assert_distinct::<DistanceAnnotation>(&paths);
            assert_distinct::<CapacityAnnotation>(&paths);
        }
    }
}
