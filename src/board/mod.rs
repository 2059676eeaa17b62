use std::io::{Read, Write};

use tracing::debug;

use crate::cpu::Cpu;
use crate::mem::{MmioSerial, Mmu, Ram};

/// Load address of the program image; also the reset pc.
pub const RESET_ADDR: u32 = 0x100;

/// Byte-wide serial port window.
pub const SERIAL_ADDR: u32 = 0xFFFF_FFFE;

/// The standard machine: the program image mounted as RAM at the reset
/// address, the serial port at the top of the address space, and a CPU
/// starting at the image's first byte.
pub struct Board {
    cpu: Cpu<Mmu>,
}

impl Board {
    /// The RAM region spans exactly the image; nothing extra is
    /// reserved for the guest's bss or stack.
    pub fn new(
        image: Vec<u8>,
        input: Option<Box<dyn Read>>,
        output: Option<Box<dyn Write>>,
    ) -> Self {
        let size = image.len() as u32;
        debug!("mapping {size} byte image at {RESET_ADDR:#x}");
        let mut mmu = Mmu::new();
        mmu.map(RESET_ADDR, size, Box::new(Ram::from_image(image)));
        mmu.map(SERIAL_ADDR, 1, Box::new(MmioSerial::new(input, output)));
        Self {
            cpu: Cpu::new(mmu, RESET_ADDR),
        }
    }

    pub fn cpu(&self) -> &Cpu<Mmu> {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu<Mmu> {
        &mut self.cpu
    }

    pub fn step(&mut self) {
        self.cpu.step();
    }

    /// Runs to the guest's halt write; returns the halt value.
    pub fn run(&mut self) -> u32 {
        self.cpu.run()
    }
}
