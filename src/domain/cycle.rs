//! Wraparound index over a fixed-length sequence

/// Position inside a sequence whose length is fixed at construction.
///
/// All movement wraps modulo the length. A zero-length cycle is inert:
/// every transition leaves the index at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CyclicIndex {
    index: usize,
    len: usize,
}

impl CyclicIndex {
    /// Create a cycle positioned at the first element
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Step forward: `(i + 1) mod N`
    pub fn next(&mut self) -> usize {
        self.shift(1)
    }

    /// Step backward: `(i - 1 + N) mod N`
    pub fn previous(&mut self) -> usize {
        self.shift(-1)
    }

    /// Jump to `target`, wrapping values outside `[0, N)`
    pub fn go_to(&mut self, target: isize) -> usize {
        if self.len == 0 {
            return self.index;
        }
        // Slice lengths never exceed isize::MAX.
        let len = self.len as isize;
        self.index = target.rem_euclid(len) as usize;
        self.index
    }

    fn shift(&mut self, delta: isize) -> usize {
        if self.len == 0 {
            return self.index;
        }
        self.go_to(self.index as isize + delta)
    }
}
