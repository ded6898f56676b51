//! Result accumulation: first-N and reservoir sampling.

use rand::Rng;

/// Fixed-capacity uniform sample over a stream of unknown length.
///
/// After `n` offers, each offered item is held with probability
/// `capacity / n` (or 1 while `n <= capacity`). The random source is passed
/// to every [`offer`](Self::offer) call, so a seeded generator gives a
/// reproducible sample.
#[derive(Debug, Clone)]
pub struct Reservoir<T> {
    capacity: usize,
    seen: u64,
    items: Vec<T>,
}

impl<T> Reservoir<T> {
    /// Creates an empty reservoir.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            seen: 0,
            items: Vec::with_capacity(capacity.min(4096)),
        }
    }

    /// Offers the next stream item.
    pub fn offer<R: Rng + ?Sized>(&mut self, item: T, rng: &mut R) {
        self.seen += 1;
        if self.items.len() < self.capacity {
            self.items.push(item);
            return;
        }
        if self.capacity == 0 {
            return;
        }
        let slot = rng.gen_range(0..self.seen);
        if slot < self.capacity as u64 {
            self.items[slot as usize] = item;
        }
    }

    /// Number of items offered so far.
    #[must_use]
    pub fn seen(&self) -> u64 {
        self.seen
    }

    /// Current sample, in reservoir slot order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the reservoir, returning the sample in slot order.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

/// Keeps the first `limit` items of a stream and counts the rest.
#[derive(Debug, Clone)]
pub struct FirstN<T> {
    limit: usize,
    seen: u64,
    items: Vec<T>,
}

impl<T> FirstN<T> {
    /// Creates an empty collector.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            seen: 0,
            items: Vec::new(),
        }
    }

    /// Offers the next stream item.
    pub fn offer(&mut self, item: T) {
        self.seen += 1;
        if self.items.len() < self.limit {
            self.items.push(item);
        }
    }

    /// Number of items offered so far.
    #[must_use]
    pub fn seen(&self) -> u64 {
        self.seen
    }

    /// Consumes the collector, returning the kept items in arrival order.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}
