//! Terminal main-memory level.

/// Main memory: carries only a fixed overhead, no tag state.
#[derive(Debug, Clone, Copy)]
pub struct Ram {
    overhead: u64,
}

impl Ram {
    #[must_use]
    pub const fn new(overhead: u64) -> Self {
        Self { overhead }
    }

    #[must_use]
    pub const fn read(&self, _addr: u64) -> u64 {
        self.overhead
    }

    #[must_use]
    pub const fn write(&self, _addr: u64) -> u64 {
        self.overhead
    }
}
