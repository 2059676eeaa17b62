use std::io::{Read, Write};

use super::Memory;

/// Byte-wide serial endpoint.
///
/// Loads of any width return the next byte from the input stream,
/// zero-extended; stores of any width pass their low 8 bits to the
/// output stream. The offset within the mapped window is ignored. A
/// missing stream reads as zero or swallows the store, and I/O errors
/// are never propagated to the guest.
#[derive(Default)]
pub struct MmioSerial {
    input: Option<Box<dyn Read>>,
    output: Option<Box<dyn Write>>,
}

impl MmioSerial {
    pub fn new(input: Option<Box<dyn Read>>, output: Option<Box<dyn Write>>) -> Self {
        Self { input, output }
    }
}

impl Memory for MmioSerial {
    fn read_u8(&mut self, _addr: u32) -> u8 {
        let Some(input) = &mut self.input else {
            return 0;
        };
        let mut b = [0u8; 1];
        // A short or failed read leaves the buffer zeroed.
        let _ = input.read(&mut b);
        b[0]
    }

    fn read_u16(&mut self, addr: u32) -> u16 {
        self.read_u8(addr) as u16
    }

    fn read_u32(&mut self, addr: u32) -> u32 {
        self.read_u8(addr) as u32
    }

    fn write_u8(&mut self, _addr: u32, v: u8) {
        if let Some(output) = &mut self.output {
            let _ = output.write_all(&[v]);
        }
    }

    fn write_u16(&mut self, addr: u32, v: u16) {
        self.write_u8(addr, v as u8);
    }

    fn write_u32(&mut self, addr: u32, v: u32) {
        self.write_u8(addr, v as u8);
    }
}
