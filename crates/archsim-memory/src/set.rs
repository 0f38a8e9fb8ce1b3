//! The group of lines an address may occupy.

use std::collections::VecDeque;

use crate::line::Line;

/// An ordered sequence of at most `ways` lines, front = oldest.
///
/// Invariants: no two lines share a tag; `len() <= ways`; a line is
/// present iff some member's tag matches the query.
#[derive(Debug, Clone)]
pub struct Set {
    ways: usize,
    lines: VecDeque<Line>,
}

impl Set {
    #[must_use]
    pub fn new(ways: usize) -> Self {
        Self {
            ways,
            lines: VecDeque::with_capacity(ways),
        }
    }

    #[must_use]
    pub fn is_present(&self, tag: u64) -> bool {
        self.lines.iter().any(|line| line.tag() == tag)
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.lines.len() == self.ways
    }

    /// Installs a new line for `tag`, evicting the oldest resident line
    /// first if the set is full.
    ///
    /// Callers must have already verified `tag` is not present — this is
    /// a precondition, not something `install` checks.
    pub fn install(&mut self, tag: u64) -> Option<Line> {
        debug_assert!(
            !self.is_present(tag),
            "reinstalling an already-present tag"
        );

        let evicted = if self.is_full() {
            self.lines.pop_front()
        } else {
            None
        };

        self.lines.push_back(Line::new(tag));
        evicted
    }

    /// Marks the resident line for `tag` dirty.
    ///
    /// The tag must already be present — calling this for an absent tag
    /// is a caller bug.
    pub fn mark_dirty(&mut self, tag: u64) {
        let line = self.lines.iter_mut().find(|line| line.tag() == tag);
        debug_assert!(line.is_some(), "mark_dirty on absent tag");
        if let Some(line) = line {
            line.mark_dirty();
        }
    }
}
