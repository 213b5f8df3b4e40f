//! Bounded best-K selection over scored candidates.
//!
//! The selector keeps at most `capacity` candidates in a min-heap keyed by
//! similarity, so the weakest retained candidate is always at the top and can
//! be compared against a newcomer in constant time.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use poirec_core::ScoredCandidate;

/// Whether a selector still has free slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorState {
    /// Fewer than `capacity` candidates are retained.
    Accumulating,
    /// Exactly `capacity` candidates are retained; newcomers must beat the
    /// weakest to enter.
    Full,
}

/// Heap entry ordered by similarity, then by arrival.
///
/// Among equal similarities the earlier arrival ranks higher, so the most
/// recent of the weakest entries is evicted first.
#[derive(Debug)]
struct Ranked {
    sequence: u64,
    scored: ScoredCandidate,
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.scored
            .similarity
            .total_cmp(&other.scored.similarity)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

/// Retain the `capacity` most similar candidates seen so far.
///
/// Similarities are ordered with [`f64::total_cmp`].
///
/// # Examples
/// ```
/// use poirec_core::{Candidate, ScoredCandidate};
/// use poirec_scorer::TopKSelector;
///
/// let mut selector = TopKSelector::new(2);
/// for (id, similarity) in [("a", 0.5), ("b", 0.9), ("c", 0.3), ("d", 0.95)] {
///     selector.insert(ScoredCandidate::new(Candidate::new(id, vec![1.0]), similarity));
/// }
/// let ids: Vec<String> = selector.drain().into_iter().map(|s| s.id).collect();
/// assert_eq!(ids, ["d", "b"]);
/// ```
#[derive(Debug)]
pub struct TopKSelector {
    capacity: usize,
    heap: BinaryHeap<Reverse<Ranked>>,
    arrivals: u64,
}

impl TopKSelector {
    /// Create an empty selector retaining up to `capacity` candidates.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            heap: BinaryHeap::with_capacity(capacity.saturating_add(1)),
            arrivals: 0,
        }
    }

    /// Maximum number of retained candidates.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of retained candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Report whether no candidate is retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SelectorState {
        if self.heap.len() < self.capacity {
            SelectorState::Accumulating
        } else {
            SelectorState::Full
        }
    }

    /// Similarity of the weakest retained candidate.
    #[must_use]
    pub fn min_similarity(&self) -> Option<f64> {
        self.heap
            .peek()
            .map(|Reverse(ranked)| ranked.scored.similarity)
    }

    /// Report whether a candidate scoring `similarity` would be retained.
    ///
    /// A full selector only admits candidates strictly better than its
    /// weakest entry.
    #[must_use]
    pub fn admits(&self, similarity: f64) -> bool {
        match self.state() {
            SelectorState::Accumulating => true,
            SelectorState::Full => self
                .min_similarity()
                .is_some_and(|weakest| weakest.total_cmp(&similarity) == Ordering::Less),
        }
    }

    /// Offer a scored candidate.
    ///
    /// When the selector overflows, the weakest candidate is evicted. The
    /// newcomer itself is dropped if it does not beat the current weakest.
    pub fn insert(&mut self, scored: ScoredCandidate) {
        if self.capacity == 0 {
            return;
        }
        let sequence = self.arrivals;
        self.arrivals = self.arrivals.wrapping_add(1);
        self.heap.push(Reverse(Ranked { sequence, scored }));
        if self.heap.len() > self.capacity {
            self.heap.pop();
        }
    }

    /// Remove and return every retained candidate, most similar first.
    ///
    /// The selector is empty afterwards and can be reused.
    pub fn drain(&mut self) -> Vec<ScoredCandidate> {
        // `into_sorted_vec` is ascending in `Reverse`, i.e. best first.
        std::mem::take(&mut self.heap)
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(ranked)| ranked.scored)
            .collect()
    }
}
