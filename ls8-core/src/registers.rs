use thiserror::Error;

pub const NUM_REGISTERS: usize = 8;

/// R7 doubles as the stack pointer - do not use as a general-purpose register.
pub const SP: usize = 7;

/// Initial stack pointer, one past the top of the empty descending stack.
pub const STACK_INIT: u8 = 0xF4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegisterError {
    #[error("register index {0} out of bounds, must be [0, {NUM_REGISTERS})")]
    InvalidRegister(u8),
}

pub type Result<T> = std::result::Result<T, RegisterError>;

#[derive(Debug)]
pub struct RegisterFile {
    regs: [u8; NUM_REGISTERS],
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterFile {
    pub fn new() -> Self {
        let mut regs = [0; NUM_REGISTERS];
        regs[SP] = STACK_INIT;
        RegisterFile { regs }
    }

    pub fn read(&self, index: u8) -> Result<u8> {
        self.regs
            .get(index as usize)
            .copied()
            .ok_or(RegisterError::InvalidRegister(index))
    }

    pub fn write(&mut self, index: u8, value: u8) -> Result<()> {
        match self.regs.get_mut(index as usize) {
            Some(reg) => {
                *reg = value;
                Ok(())
            }
            None => Err(RegisterError::InvalidRegister(index)),
        }
    }

    pub fn sp(&self) -> u8 {
        self.regs[SP]
    }

    pub fn set_sp(&mut self, value: u8) {
        self.regs[SP] = value;
    }
}
