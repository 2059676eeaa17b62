pub mod decode;
mod exec;
pub mod trap;

use tracing::trace;

use crate::csr::{self, CsrFile};
use crate::mem::Memory;
use trap::Trap;

/// CSRRS write-back semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CsrrsSemantics {
    /// `csr |= rs1`, the architectural behavior.
    #[default]
    SetBits,
    /// `csr &= rs1`. Some cores wire CSRRS through an AND gate; select
    /// this to reproduce their traces bit for bit.
    AndMask,
}

/// A single RV32I hart: 32 general registers, the pc, the CSR file,
/// and exclusive ownership of its memory.
///
/// `step` performs one fetch-decode-dispatch attempt, including trap
/// delivery; `run` loops until the guest writes the halt CSR. The
/// register, CSR, and pc accessors exist so harnesses can stage and
/// inspect state between steps.
pub struct Cpu<M> {
    mem: M,
    regs: [u32; 32],
    pc: u32,
    reset_pc: u32,
    pub csrs: CsrFile,
    pub csrrs_semantics: CsrrsSemantics,
}

impl<M: Memory> Cpu<M> {
    pub fn new(mem: M, reset_pc: u32) -> Self {
        Self {
            mem,
            regs: [0; 32],
            pc: reset_pc,
            reset_pc,
            csrs: CsrFile::new(),
            csrrs_semantics: CsrrsSemantics::default(),
        }
    }

    /// Returns all architectural state to its power-on values; the pc
    /// goes back to the reset address.
    pub fn reset(&mut self) {
        self.regs = [0; 32];
        self.pc = self.reset_pc;
        self.csrs.reset();
    }

    pub fn pc(&self) -> u32 {
        self.pc
    }

    pub fn set_pc(&mut self, pc: u32) {
        self.pc = pc;
    }

    /// Reads `x{idx}`; x0 is hardwired to zero. Panics on an index
    /// outside 0..32.
    pub fn reg(&self, idx: u8) -> u32 {
        if idx == 0 {
            0
        } else {
            self.regs[idx as usize]
        }
    }

    /// Writes `x{idx}`; writes to x0 are discarded. Panics on an index
    /// outside 0..32.
    pub fn set_reg(&mut self, idx: u8, v: u32) {
        if idx != 0 {
            self.regs[idx as usize] = v;
        }
    }

    pub fn csr(&self, addr: u16) -> u32 {
        self.csrs.read(addr)
    }

    pub fn set_csr(&mut self, addr: u16, v: u32) {
        self.csrs.write(addr, v);
    }

    pub fn halted(&self) -> bool {
        self.csrs.halted()
    }

    pub fn mem(&self) -> &M {
        &self.mem
    }

    pub fn mem_mut(&mut self) -> &mut M {
        &mut self.mem
    }

    fn fetch(&mut self) -> u32 {
        let inst = self.mem.read_u32(self.pc);
        self.pc = self.pc.wrapping_add(4);
        inst
    }

    /// One fetch-decode-dispatch attempt. Does nothing once halted.
    ///
    /// The pc is advanced past the instruction before dispatch, so
    /// during dispatch it designates the next instruction; the address
    /// of the instruction itself is threaded through as `insn_pc`.
    pub fn step(&mut self) {
        if self.csrs.halted() {
            return;
        }
        let insn_pc = self.pc;
        let inst = self.fetch();
        let result = decode::decode(inst)
            .map_err(Trap::from)
            .and_then(|instr| self.dispatch(instr, inst, insn_pc));
        match result {
            Ok(()) => {
                self.csrs.cycles += 1;
                self.csrs.ticks += 1;
                self.csrs.retired += 1;
            }
            Err(t) => self.take_trap(t, insn_pc),
        }
    }

    /// Steps until the guest writes the halt CSR; returns the halt
    /// value.
    pub fn run(&mut self) -> u32 {
        while !self.csrs.halted() {
            self.step();
        }
        trace!("guest halted with value {}", self.csrs.halt_value());
        self.csrs.halt_value()
    }

    /// Delivers a trap: records the trap value, faulting pc, and cause,
    /// then redirects to the trap vector. The attempt counts toward
    /// cycle and time but not instret.
    fn take_trap(&mut self, t: Trap, insn_pc: u32) {
        trace!("trap: {t} at pc {insn_pc:#010x}");
        self.csrs.write(csr::MTVAL, t.value(insn_pc));
        self.csrs.write(csr::MEPC, insn_pc);
        self.csrs.write(csr::MCAUSE, t.cause());
        self.pc = self.csrs.read(csr::MTVEC);
        self.csrs.cycles += 1;
        self.csrs.ticks += 1;
    }
}
