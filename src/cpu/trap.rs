use thiserror::Error;

use super::decode::DecodeError;

/// Synchronous exceptions. Raised while decoding or dispatching an
/// instruction; delivered to the guest through the machine trap CSRs,
/// never to the host.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trap {
    #[error("illegal instruction 0x{0:08x}")]
    IllegalInstruction(u32),
    #[error("breakpoint")]
    Breakpoint,
    #[error("environment call from M-mode")]
    MachineEcall,
}

impl Trap {
    /// Cause code written to `mcause`.
    pub fn cause(&self) -> u32 {
        match self {
            Trap::IllegalInstruction(_) => 2,
            Trap::Breakpoint => 3,
            Trap::MachineEcall => 11,
        }
    }

    /// Value written to `mtval`: the raw word for an illegal
    /// instruction, the faulting pc otherwise.
    pub fn value(&self, insn_pc: u32) -> u32 {
        match self {
            Trap::IllegalInstruction(inst) => *inst,
            Trap::Breakpoint | Trap::MachineEcall => insn_pc,
        }
    }
}

impl From<DecodeError> for Trap {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::UnknownOpcode(inst) | DecodeError::UnknownFunct(inst) => {
                Trap::IllegalInstruction(inst)
            }
        }
    }
}
