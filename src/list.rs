use std::collections::VecDeque;

/// An ordered, duplicate-permitting sequence of strings.
///
/// Index `0` is the head, which is where `push_left` inserts. Negative
/// indices count back from the tail, so `-1` is the last element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct List {
    values: VecDeque<String>,
}

impl List {
    pub fn new() -> List {
        List {
            values: VecDeque::new(),
        }
    }

    /// Insert each value at the head, one at a time.
    ///
    /// Pushing `[a, b]` leaves the list as `b, a, <previous contents>`.
    pub fn push_left(&mut self, values: Vec<String>) {
        for value in values {
            self.values.push_front(value);
        }
    }

    /// Append each value at the tail, in argument order
    pub fn push_right(&mut self, values: Vec<String>) {
        self.values.extend(values);
    }

    /// Remove and return up to `count` elements from the head.
    ///
    /// A short (or empty) list simply yields everything it has.
    pub fn pop_left(&mut self, count: usize) -> Vec<String> {
        let count = count.min(self.values.len());
        self.values.drain(..count).collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The inclusive slice `start..=stop`, after clamping.
    pub fn range(&self, start: i64, stop: i64) -> Vec<String> {
        match self.resolve_bounds(start, stop) {
            Some((start, stop)) => self.values.range(start..=stop).cloned().collect(),
            None => Vec::new(),
        }
    }

    /// Keep only the inclusive slice `start..=stop`, after clamping.
    ///
    /// Bounds that select nothing empty the list.
    pub fn trim(&mut self, start: i64, stop: i64) {
        match self.resolve_bounds(start, stop) {
            Some((start, stop)) => {
                self.values.truncate(stop + 1);
                self.values.drain(..start);
            }
            None => self.values.clear(),
        }
    }

    /// The element at `index`, or `None` when it falls outside the list
    pub fn index(&self, index: i64) -> Option<&String> {
        let len = self.values.len() as i64;

        let index = if index < 0 { len + index } else { index };
        if index < 0 || index >= len {
            return None;
        }

        self.values.get(index as usize)
    }

    /// A copy of every element, head first
    pub fn values(&self) -> Vec<String> {
        self.values.iter().cloned().collect()
    }

    /// Resolve `start`/`stop` into absolute, in-bounds indices.
    ///
    /// - a negative `start` counts from the tail and floors at `0`
    /// - a `start` at or past the end selects nothing
    /// - a `stop` past the end clamps to the last index
    /// - a negative `stop` resolves to `len + stop`
    /// - a `stop` that lands before `start` selects nothing
    fn resolve_bounds(&self, start: i64, stop: i64) -> Option<(usize, usize)> {
        let len = self.values.len() as i64;
        if len == 0 {
            return None;
        }

        let start = if start < 0 { (len + start).max(0) } else { start };
        if start >= len {
            return None;
        }

        let stop = if stop > len - 1 { len - 1 } else { stop };
        let stop = if stop < 0 { len + stop } else { stop };
        if stop < start {
            return None;
        }

        Some((start as usize, stop as usize))
    }
}

impl From<Vec<String>> for List {
    fn from(values: Vec<String>) -> List {
        List {
            values: values.into(),
        }
    }
}
