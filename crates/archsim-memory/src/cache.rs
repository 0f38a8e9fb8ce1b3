//! Set-associative, write-back, write-allocate cache level.

use std::io::{self, Write};

use log::debug;

use crate::error::ConfigError;
use crate::geometry::Geometry;
use crate::report::write_ratio_line;
use crate::set::Set;
use crate::MemoryLevel;

/// Per-access cycle cost used when a label isn't one of the well-known
/// ones and no explicit overhead was given.
const DEFAULT_OVERHEAD: u64 = 1;

fn default_overhead_for_label(label: &str) -> u64 {
    match label {
        "L1" => 1,
        "L2" => 2,
        "RAM" => 8,
        _ => DEFAULT_OVERHEAD,
    }
}

/// A single set-associative cache level, owning the level below it.
#[derive(Debug)]
pub struct Cache {
    label: String,
    next: Box<MemoryLevel>,
    geometry: Geometry,
    sets: Vec<Set>,
    ways: u64,
    line_len: u64,
    size: u64,
    overhead: u64,
    reads: u64,
    writes: u64,
    read_hits: u64,
    write_hits: u64,
}

impl Cache {
    /// Builds a cache level labelled `label`, backed by `next`.
    ///
    /// `overhead` defaults by label (`L1` -> 1, `L2` -> 2, `RAM` -> 8,
    /// anything else -> 1) when `None`. Geometry must be valid:
    /// `size`, `ways`, `line_len` are positive powers of two and
    /// `size / (ways * line_len)` (the set count) is too.
    pub fn new(
        label: impl Into<String>,
        next: MemoryLevel,
        size: u64,
        ways: u64,
        line_len: u64,
        overhead: Option<u64>,
    ) -> Result<Self, ConfigError> {
        let label = label.into();
        let geometry = Geometry::new(size, ways, line_len)?;
        let overhead = overhead.unwrap_or_else(|| default_overhead_for_label(&label));
        let sets = (0..geometry.set_count())
            .map(|_| Set::new(ways as usize))
            .collect();

        debug!(
            "cache {label}: size={size} ways={ways} line_len={line_len} sets={} overhead={overhead}",
            geometry.set_count()
        );

        Ok(Self {
            label,
            next: Box::new(next),
            geometry,
            sets,
            ways,
            line_len,
            size,
            overhead,
            reads: 0,
            writes: 0,
            read_hits: 0,
            write_hits: 0,
        })
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Services a read, returning the total cycle cost including any
    /// cascaded cost from the level below.
    pub fn read(&mut self, addr: u64) -> u64 {
        self.reads += 1;
        let (tag, index) = self.geometry.decode(addr);
        let set = &mut self.sets[index as usize];

        if set.is_present(tag) {
            self.read_hits += 1;
            return self.overhead;
        }

        let mut cost = self.overhead;
        if let Some(victim) = set.install(tag) {
            if victim.is_dirty() {
                let victim_addr = self.geometry.synth_addr(victim.tag(), index);
                cost += self.next.write(victim_addr);
            }
        }
        cost += self.next.read(addr);
        cost
    }

    /// Services a write, returning the total cycle cost. Write-back,
    /// write-allocate: both hit and miss-fill mark the line dirty, and
    /// nothing is pushed downward except on eviction of a dirty victim.
    pub fn write(&mut self, addr: u64) -> u64 {
        self.writes += 1;
        let (tag, index) = self.geometry.decode(addr);
        let set = &mut self.sets[index as usize];

        if set.is_present(tag) {
            self.write_hits += 1;
            set.mark_dirty(tag);
            return self.overhead;
        }

        let mut cost = self.overhead;
        if let Some(victim) = set.install(tag) {
            if victim.is_dirty() {
                let victim_addr = self.geometry.synth_addr(victim.tag(), index);
                cost += self.next.write(victim_addr);
            }
        }
        cost += self.next.read(addr);
        set.mark_dirty(tag);
        cost
    }

    pub fn report(&self, sink: &mut dyn Write) -> io::Result<()> {
        writeln!(sink, "=====")?;
        writeln!(sink, "{}:", self.label)?;
        write_ratio_line(sink, "read hits/reads", self.read_hits, self.reads)?;
        write_ratio_line(sink, "write hits/writes", self.write_hits, self.writes)?;
        self.next.report(sink)
    }

    #[must_use]
    pub const fn ways(&self) -> u64 {
        self.ways
    }

    #[must_use]
    pub const fn line_len(&self) -> u64 {
        self.line_len
    }

    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ram::Ram;

    fn ram_level(overhead: u64) -> MemoryLevel {
        MemoryLevel::Ram(Ram::new(overhead))
    }

    /// S1 — single-level direct-mapped hit.
    #[test]
    fn s1_direct_mapped_hit_sequence() {
        let mut cache = Cache::new("L1", ram_level(8), 1024, 1, 16, Some(1)).unwrap();

        let c1 = cache.read(0x0000);
        let c2 = cache.read(0x0004);
        let c3 = cache.read(0x0008);

        assert_eq!(cache.reads, 3);
        assert_eq!(cache.read_hits, 2);
        assert_eq!(cache.write_hits, 0);
        assert_eq!(c1 + c2 + c3, 1 + (1 + 8) + 1);
    }

    /// S2 — FIFO eviction: A, B, C to the same set, then A misses again
    /// and evicts B.
    #[test]
    fn s2_fifo_eviction() {
        let mut cache = Cache::new("L1", ram_level(8), 32, 2, 16, Some(1)).unwrap();

        cache.read(0 * 32); // tag A
        cache.read(1 * 32); // tag B
        cache.read(2 * 32); // tag C, evicts A

        let reads_before = cache.reads;
        let hits_before = cache.read_hits;
        cache.read(0 * 32); // A again: miss, evicts B
        assert_eq!(cache.reads, reads_before + 1);
        assert_eq!(cache.read_hits, hits_before);
    }

    /// S3 — dirty write-back: writing X then evicting it pushes a write
    /// to the next level; read-only eviction does not.
    #[test]
    fn s3_dirty_writeback_on_eviction() {
        let mut cache = Cache::new("L1", ram_level(8), 16, 1, 16, Some(1)).unwrap();

        cache.write(0); // miss-fill X, marks dirty
        let cost = cache.write(16); // evicts X; X is dirty -> next.write + next.read
        assert_eq!(cost, 1 + 8 + 8);
    }

    #[test]
    fn s3_clean_eviction_issues_no_writeback() {
        let mut cache = Cache::new("L1", ram_level(8), 16, 1, 16, Some(1)).unwrap();

        cache.read(0); // miss-fill X, clean
        let cost = cache.read(16); // evicts clean X -> only next.read
        assert_eq!(cost, 1 + 8);
    }

    #[test]
    fn rejects_bad_geometry() {
        assert!(Cache::new("L1", ram_level(8), 1000, 3, 16, None).is_err());
    }

    #[test]
    fn report_prints_exact_hit_counts() {
        let mut cache = Cache::new("L1", ram_level(8), 1024, 1, 16, Some(1)).unwrap();
        cache.read(0);
        cache.read(0);

        let mut out = Vec::new();
        cache.report(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("L1:"));
        assert!(text.contains("read hits/reads: 1 / 2 = 0.5"));
    }
}
