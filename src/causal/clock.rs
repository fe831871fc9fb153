use std::collections::HashMap;
use std::fmt;

/// Per-node logical counters capturing causal history. A node id that has no
/// entry reads as zero, and counters never decrease.
///
/// Two clocks are comparable iff one dominates the other component-wise;
/// otherwise the events they stamp are concurrent. Equal clocks count as
/// concurrent, not ordered.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VectorClock {
    counters: HashMap<String, u64>,
}

impl VectorClock {
    pub fn new() -> Self {
        VectorClock {
            counters: HashMap::new(),
        }
    }

    pub fn from_counters(counters: HashMap<String, u64>) -> Self {
        VectorClock { counters }
    }

    pub fn increment(&mut self, node_id: &str) {
        *self.counters.entry(node_id.to_string()).or_insert(0) += 1;
    }

    /// Component-wise max of both clocks. Commutative and idempotent.
    pub fn merge(&mut self, other: &VectorClock) {
        for (node_id, theirs) in &other.counters {
            let mine = self.counters.entry(node_id.clone()).or_insert(0);
            if *theirs > *mine {
                *mine = *theirs;
            }
        }
    }

    pub fn get(&self, node_id: &str) -> u64 {
        self.counters.get(node_id).copied().unwrap_or(0)
    }

    /// True iff every local counter is <= the other's and at least one is
    /// strictly less. Keys present only in `other` count as implicit zeros
    /// here, so a non-zero entry there alone makes this clock older.
    pub fn happened_before(&self, other: &VectorClock) -> bool {
        let mut any_less = false;

        for (node_id, mine) in &self.counters {
            let theirs = other.get(node_id);
            if *mine > theirs {
                return false;
            }
            if *mine < theirs {
                any_less = true;
            }
        }

        for (node_id, theirs) in &other.counters {
            if !self.counters.contains_key(node_id) && *theirs > 0 {
                any_less = true;
            }
        }

        any_less
    }

    pub fn happened_after(&self, other: &VectorClock) -> bool {
        other.happened_before(self)
    }

    pub fn concurrent_with(&self, other: &VectorClock) -> bool {
        !self.happened_before(other) && !self.happened_after(other)
    }

    pub fn counters(&self) -> &HashMap<String, u64> {
        &self.counters
    }
}

impl fmt::Display for VectorClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Sorted so log lines are stable across runs.
        let mut entries: Vec<_> = self.counters.iter().collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));

        write!(f, "{{")?;
        for (i, (node_id, counter)) in entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}:{}", node_id, counter)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock(entries: &[(&str, u64)]) -> VectorClock {
        let mut c = VectorClock::new();
        for (node_id, counter) in entries {
            for _ in 0..*counter {
                c.increment(node_id);
            }
        }
        c
    }

    #[test]
    fn increment_counts_from_zero() {
        let mut c = VectorClock::new();
        assert_eq!(c.get("a"), 0);

        c.increment("a");
        c.increment("a");
        assert_eq!(c.get("a"), 2);
        assert_eq!(c.get("b"), 0);
    }

    #[test]
    fn strictly_dominated_clock_happened_before() {
        let older = clock(&[("a", 1), ("b", 1)]);
        let newer = clock(&[("a", 2), ("b", 1)]);

        assert!(older.happened_before(&newer));
        assert!(newer.happened_after(&older));
        assert!(!newer.happened_before(&older));
    }

    #[test]
    fn missing_key_counts_as_zero() {
        let older = clock(&[("a", 1)]);
        let newer = clock(&[("a", 1), ("b", 1)]);

        assert!(older.happened_before(&newer));
        assert!(!newer.happened_before(&older));
    }

    #[test]
    fn equal_clocks_are_concurrent_not_ordered() {
        let a = clock(&[("a", 1), ("b", 2)]);
        let b = clock(&[("a", 1), ("b", 2)]);

        assert!(!a.happened_before(&b));
        assert!(!a.happened_after(&b));
        assert!(a.concurrent_with(&b));
        assert_eq!(a, b);
    }

    #[test]
    fn divergent_clocks_are_concurrent() {
        let a = clock(&[("a", 2), ("b", 1)]);
        let b = clock(&[("a", 1), ("b", 2)]);

        assert!(a.concurrent_with(&b));
        assert!(b.concurrent_with(&a));
    }

    #[test]
    fn exactly_one_relation_holds() {
        let cases = vec![
            (clock(&[("a", 1)]), clock(&[("a", 2)])),
            (clock(&[("a", 2)]), clock(&[("a", 1)])),
            (clock(&[("a", 1)]), clock(&[("b", 1)])),
            (clock(&[("a", 1)]), clock(&[("a", 1)])),
            (VectorClock::new(), clock(&[("a", 1)])),
        ];

        for (a, b) in cases {
            let relations = [
                a.happened_before(&b) as u8,
                b.happened_before(&a) as u8,
                (a.concurrent_with(&b) && a != b) as u8,
                (a == b) as u8,
            ];
            assert_eq!(
                relations.iter().sum::<u8>(),
                1,
                "expected exactly one relation for {} vs {}",
                a,
                b
            );
        }
    }

    #[test]
    fn merge_takes_component_wise_max() {
        let mut a = clock(&[("a", 3), ("b", 1)]);
        let b = clock(&[("b", 4), ("c", 2)]);

        a.merge(&b);
        assert_eq!(a.get("a"), 3);
        assert_eq!(a.get("b"), 4);
        assert_eq!(a.get("c"), 2);
    }

    #[test]
    fn merge_is_idempotent() {
        let a = clock(&[("a", 3), ("b", 1)]);
        let b = clock(&[("b", 4), ("c", 2)]);

        let mut once = a.clone();
        once.merge(&b);

        let mut twice = a.clone();
        twice.merge(&b);
        twice.merge(&b);

        assert_eq!(once, twice);
    }

    #[test]
    fn merge_is_commutative() {
        let a = clock(&[("a", 3), ("b", 1)]);
        let b = clock(&[("b", 4), ("c", 2)]);

        let mut ab = a.clone();
        ab.merge(&b);

        let mut ba = b.clone();
        ba.merge(&a);

        assert_eq!(ab, ba);
    }

    #[test]
    fn copies_share_no_state() {
        let mut a = clock(&[("a", 1)]);
        let copy = a.clone();

        a.increment("a");
        assert_eq!(a.get("a"), 2);
        assert_eq!(copy.get("a"), 1);
    }
}
