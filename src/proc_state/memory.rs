/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::fmt;

use crate::error::{Error, Result};

/// Size of the 8080 address space.
pub const MEMORY_SIZE: usize = 0x10000;

/// The full 64 KiB address space of the processor.
///
/// Every address is a `u16`, so no access can fall outside the array. Words are stored
/// little-endian and an access at `0xffff` wraps around to `0x0000` for its high byte.
pub struct Memory {
    bytes: Box<[u8; MEMORY_SIZE]>,
}

impl Memory {
    /// Zero-filled memory.
    pub fn new() -> Memory {
        Memory { bytes: Box::new([0; MEMORY_SIZE]) }
    }

    pub fn read_byte(&self, addr: u16) -> u8 {
        self.bytes[addr as usize]
    }

    pub fn write_byte(&mut self, addr: u16, value: u8) {
        self.bytes[addr as usize] = value;
    }

    pub fn read_word(&self, addr: u16) -> u16 {
        let low = self.read_byte(addr) as u16;
        let high = self.read_byte(addr.wrapping_add(1)) as u16;
        (high << 8) | low
    }

    pub fn write_word(&mut self, addr: u16, value: u16) {
        self.write_byte(addr, value as u8);
        self.write_byte(addr.wrapping_add(1), (value >> 8) as u8);
    }

    /// Copies `image` into memory starting at `offset`.
    ///
    /// Fails without writing anything if the image would run past `0xffff`.
    pub fn load(&mut self, offset: u16, image: &[u8]) -> Result<()> {
        let start = offset as usize;
        let end = start + image.len();
        if end > MEMORY_SIZE {
            return Err(Error::AddressOutOfRange { offset, len: image.len() });
        }
        self.bytes[start..end].copy_from_slice(image);
        Ok(())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..]
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes[..]
    }
}

impl Default for Memory {
    fn default() -> Memory {
        Memory::new()
    }
}

impl fmt::Debug for Memory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Memory({} bytes)", self.bytes.len())
    }
}
