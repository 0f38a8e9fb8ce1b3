//! The event shapes the external harness is expected to deliver,
//! in execution order.

use archsim_cpu::RegisterId;
use serde::{Deserialize, Serialize};

/// One delivered event. An instruction with more than one memory operand
/// produces one `MemRead`/`MemWrite` per operand, in program order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceEvent {
    MemRead {
        ip: u64,
        addr: u64,
        #[serde(default)]
        write_regs: Vec<RegisterIdRepr>,
    },
    MemWrite {
        ip: u64,
        addr: u64,
    },
    CondBranch {
        ip: u64,
        target: u64,
        taken: bool,
    },
    Other {
        #[serde(default)]
        read_regs: Vec<RegisterIdRepr>,
        #[serde(default)]
        write_regs: Vec<RegisterIdRepr>,
    },
    Finalize,
}

/// `RegisterId` is a newtype over `u32` with no `serde` impl of its own
/// (it belongs to `archsim-cpu`, which has no reason to depend on
/// `serde`) — this wrapper is the wire representation used only at the
/// trace boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegisterIdRepr(pub u32);

impl From<RegisterIdRepr> for RegisterId {
    fn from(value: RegisterIdRepr) -> Self {
        Self(value.0)
    }
}

impl From<RegisterId> for RegisterIdRepr {
    fn from(value: RegisterId) -> Self {
        Self(value.0)
    }
}

pub fn to_register_ids(regs: &[RegisterIdRepr]) -> Vec<RegisterId> {
    regs.iter().map(|r| RegisterId::from(*r)).collect()
}
