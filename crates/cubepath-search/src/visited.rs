//! Dense visited bitset keyed by cell rank.

/// A fixed-capacity bitset over cell ranks `0..capacity`.
///
/// Out-of-range ranks are never members; inserting one is a no-op that
/// returns `false`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisitedSet {
    words: Vec<u64>,
    capacity: usize,
    count: usize,
}

impl VisitedSet {
    /// An empty set able to hold ranks `0..capacity`.
    pub fn new(capacity: usize) -> Self {
        Self {
            words: vec![0; capacity.div_ceil(64)],
            capacity,
            count: 0,
        }
    }

    /// A set pre-populated with `ranks`.
    pub fn from_ranks(capacity: usize, ranks: &[usize]) -> Self {
        let mut set = Self::new(capacity);
        for &r in ranks {
            set.insert(r);
        }
        set
    }

    /// Mark `rank` visited. Returns `true` if it was not already.
    pub fn insert(&mut self, rank: usize) -> bool {
        if rank >= self.capacity {
            return false;
        }
        let (word, bit) = (rank / 64, 1u64 << (rank % 64));
        if self.words[word] & bit != 0 {
            return false;
        }
        self.words[word] |= bit;
        self.count += 1;
        true
    }

    /// Unmark `rank`. Returns `true` if it was set.
    pub fn remove(&mut self, rank: usize) -> bool {
        if rank >= self.capacity {
            return false;
        }
        let (word, bit) = (rank / 64, 1u64 << (rank % 64));
        if self.words[word] & bit == 0 {
            return false;
        }
        self.words[word] &= !bit;
        self.count -= 1;
        true
    }

    /// Whether `rank` is visited.
    pub fn contains(&self, rank: usize) -> bool {
        rank < self.capacity && self.words[rank / 64] & (1u64 << (rank % 64)) != 0
    }

    /// Number of visited ranks.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Number of ranks not yet visited.
    pub fn remaining(&self) -> usize {
        self.capacity - self.count
    }

    /// Size of the rank universe.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether every rank is visited.
    pub fn is_full(&self) -> bool {
        self.count == self.capacity
    }

    /// Unmark everything.
    pub fn clear(&mut self) {
        self.words.fill(0);
        self.count = 0;
    }

    /// Ranks not yet visited, ascending.
    pub fn unvisited(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.capacity).filter(move |&r| !self.contains(r))
    }
}
