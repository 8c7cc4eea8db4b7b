use std::fmt;

use thiserror::Error;

/// LS-8 address space: 256 one-byte cells shared by code and the stack.
pub const MEMORY_SIZE: usize = 256;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MemoryError {
    #[error("address 0x{0:02X} out of bounds, must be [0x00, 0x{MEMORY_SIZE:02X})")]
    OutOfBounds(usize),
}

pub type Result<T> = std::result::Result<T, MemoryError>;

pub struct Memory {
    cells: [u8; MEMORY_SIZE],
}

impl fmt::Debug for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memory")
            .field("size", &MEMORY_SIZE)
            .finish()
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    pub fn new() -> Self {
        Memory {
            cells: [0; MEMORY_SIZE],
        }
    }

    pub fn read(&self, address: usize) -> Result<u8> {
        self.cells
            .get(address)
            .copied()
            .ok_or(MemoryError::OutOfBounds(address))
    }

    pub fn write(&mut self, address: usize, value: u8) -> Result<()> {
        match self.cells.get_mut(address) {
            Some(cell) => {
                *cell = value;
                Ok(())
            }
            None => Err(MemoryError::OutOfBounds(address)),
        }
    }

    /// Copies a program image to address 0. An image larger than the address
    /// space would write past the last cell, so it is rejected outright.
    pub fn load_image(&mut self, image: &[u8]) -> Result<()> {
        if image.len() > MEMORY_SIZE {
            return Err(MemoryError::OutOfBounds(image.len() - 1));
        }
        self.cells[..image.len()].copy_from_slice(image);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_write_in_bounds() {
        let mut mem = Memory::new();
        for addr in 0..MEMORY_SIZE {
            assert_eq!(mem.read(addr), Ok(0));
        }
        mem.write(0, 0xAB).unwrap();
        mem.write(MEMORY_SIZE - 1, 0xCD).unwrap();
        assert_eq!(mem.read(0), Ok(0xAB));
        assert_eq!(mem.read(MEMORY_SIZE - 1), Ok(0xCD));
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut mem = Memory::new();
        assert_eq!(mem.read(MEMORY_SIZE), Err(MemoryError::OutOfBounds(256)));
        assert_eq!(
            mem.write(MEMORY_SIZE, 0xFF),
            Err(MemoryError::OutOfBounds(256))
        );
        assert_eq!(mem.read(usize::MAX), Err(MemoryError::OutOfBounds(usize::MAX)));
    }

    #[test]
    fn test_load_image() {
        let mut mem = Memory::new();
        mem.load_image(&[0x82, 0x00, 0x08, 0x01]).unwrap();
        assert_eq!(mem.read(0), Ok(0x82));
        assert_eq!(mem.read(3), Ok(0x01));
        assert_eq!(mem.read(4), Ok(0));
    }

    #[test]
    fn test_load_oversized_image() {
        let mut mem = Memory::new();
        let image = [0u8; MEMORY_SIZE + 1];
        assert_eq!(
            mem.load_image(&image),
            Err(MemoryError::OutOfBounds(MEMORY_SIZE))
        );
    }
}
