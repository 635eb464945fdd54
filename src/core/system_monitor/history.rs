use std::collections::VecDeque;

/// Bounded FIFO of scalar readings (for sparklines).
///
/// Capacity is fixed at construction; pushing into a full buffer evicts the
/// oldest value first.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryBuffer {
    capacity: usize,
    values: VecDeque<f64>,
}

impl HistoryBuffer {
    /// A zero capacity is raised to one; validated configs never ask for it.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            values: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, value: f64) {
        if self.values.len() >= self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn latest(&self) -> Option<f64> {
        self.values.back().copied()
    }

    /// Values oldest first
    pub fn values(&self) -> Vec<f64> {
        self.values.iter().copied().collect()
    }

    /// A new buffer of `capacity` holding the most recent values of this one.
    pub fn resized(&self, capacity: usize) -> Self {
        let mut resized = Self::with_capacity(capacity);
        let skip = self.values.len().saturating_sub(resized.capacity);
        for &value in self.values.iter().skip(skip) {
            resized.push(value);
        }
        resized
    }
}
