//! The CPU cycle-accounting engine.

use std::collections::HashSet;
use std::io::{self, Write};

use archsim_memory::MemoryLevel;
use archsim_predictor::Predictor;
use log::warn;

use crate::register::RegisterId;

/// Drives the cache hierarchy and predictor set while modeling a bounded
/// form of memory-level parallelism: non-dependent instructions overlap
/// with outstanding memory latency, dependent instructions stall.
#[derive(Debug)]
pub struct Cpu {
    cycles: u64,
    instrs: u64,
    spare_cycles: u64,
    recent_wregs: HashSet<RegisterId>,
    front_memory: MemoryLevel,
    predictors: Vec<Predictor>,
    finalized: bool,
}

impl Cpu {
    /// Builds an accountant over `front_memory` (the top of the cache
    /// hierarchy) and `predictors` (registration order defines both
    /// report order and which predictor drives the branch penalty — by
    /// convention, the first one).
    #[must_use]
    pub fn new(front_memory: MemoryLevel, predictors: Vec<Predictor>) -> Self {
        Self {
            cycles: 0,
            instrs: 0,
            spare_cycles: 0,
            recent_wregs: HashSet::new(),
            front_memory,
            predictors,
            finalized: false,
        }
    }

    #[must_use]
    pub const fn cycles(&self) -> u64 {
        self.cycles
    }

    #[must_use]
    pub const fn instrs(&self) -> u64 {
        self.instrs
    }

    /// `consume(n, parallel_safe)`: parallel-safe instructions slip into
    /// outstanding latency and add nothing to `cycles` while any remains;
    /// dependent instructions flush outstanding latency into `cycles`
    /// before paying their own cost. This asymmetry means a
    /// parallel-safe instruction fully absorbed by spare latency
    /// contributes nothing to `cycles` at all — intentional, not an
    /// oversight.
    fn consume(&mut self, n: u64, parallel_safe: bool) {
        if n == 0 {
            return;
        }

        if parallel_safe {
            self.spare_cycles = self.spare_cycles.saturating_sub(n);
        } else {
            self.cycles += self.spare_cycles;
            self.spare_cycles = 0;
            self.cycles += n;
        }
    }

    /// A memory operation drains any prior outstanding latency (charging
    /// one cycle for itself), then exposes its remaining latency as
    /// spare cycles for subsequent parallel-safe work.
    fn process_memop(&mut self, op_cycles: u64) {
        self.consume(1, false);
        self.spare_cycles = op_cycles.saturating_sub(1);
    }

    /// A memory-reading instruction: walks the cache hierarchy, then
    /// records its write-register set as the dependency snapshot for
    /// subsequent instructions.
    pub fn on_mem_read(&mut self, _ip: u64, addr: u64, write_regs: &[RegisterId]) {
        self.instrs += 1;
        let cost = self.front_memory.read(addr);
        self.process_memop(cost);
        self.recent_wregs.clear();
        self.recent_wregs.extend(write_regs.iter().copied());
    }

    /// A memory-writing instruction: one cycle of work, no register
    /// bookkeeping (a write never creates a dependency for later reads).
    pub fn on_mem_write(&mut self, _ip: u64, addr: u64) {
        self.instrs += 1;
        let _ = self.front_memory.write(addr);
        self.process_memop(1);
    }

    /// A conditional branch with a fallthrough path: every predictor
    /// analyzes the outcome, but only the first (by registration order)
    /// drives the CPU's own penalty. Branches are parallel-safe.
    pub fn on_cond_branch(&mut self, ip: u64, target: u64, taken: bool) {
        self.instrs += 1;
        let mut driving_hit = None;
        for predictor in &mut self.predictors {
            let hit = predictor.analyze(ip, target, taken);
            if driving_hit.is_none() {
                driving_hit = Some(hit);
            }
        }
        let hit = driving_hit.unwrap_or(true);
        self.consume(if hit { 1 } else { 5 }, true);
    }

    /// Any other instruction: depends on the most recent memory read's
    /// write-register set iff its own register operands intersect it.
    pub fn on_other(&mut self, read_regs: &[RegisterId], write_regs: &[RegisterId]) {
        self.instrs += 1;
        let depends = read_regs
            .iter()
            .chain(write_regs)
            .any(|r| self.recent_wregs.contains(r));
        self.consume(1, !depends);
    }

    /// Flushes any outstanding spare latency into `cycles` so every
    /// instruction has contributed at least one cycle by the time the
    /// trace ends. Idempotent: a second call is a logged no-op.
    pub fn finalize(&mut self) {
        if self.finalized {
            warn!("finalize called again; ignoring");
            return;
        }
        self.cycles += self.spare_cycles;
        self.spare_cycles = 0;
        self.finalized = true;
    }

    /// Writes the full report: the CPU's own cycles/instructions line,
    /// then the cache hierarchy top-down, then each predictor in
    /// registration order.
    pub fn report(&self, sink: &mut dyn Write) -> io::Result<()> {
        let quotient = self.cycles as f64 / self.instrs as f64;
        writeln!(
            sink,
            "\tcycles/instructions: {} / {} = {quotient}",
            self.cycles, self.instrs
        )?;
        self.front_memory.report(sink)?;
        for predictor in &self.predictors {
            predictor.report(sink)?;
        }
        Ok(())
    }
}
