use std::fmt;
use std::io::{self, Write};

use thiserror::Error;

use crate::alu::{self, AluOp};
use crate::isa::{DecodeError, Instruction};
use crate::memory::{Memory, MemoryError};
use crate::registers::{RegisterError, RegisterFile, STACK_INIT};

#[derive(Debug, Error)]
pub enum CpuError {
    #[error("memory fault at 0x{pc:02X}: {source}")]
    MemoryFault {
        pc: usize,
        #[source]
        source: MemoryError,
    },
    #[error("register fault at 0x{pc:02X}: {source}")]
    RegisterFault {
        pc: usize,
        #[source]
        source: RegisterError,
    },
    #[error(transparent)]
    Load(#[from] MemoryError),
    #[error("stack overflow: PUSH at 0x{pc:02X} would move SP below 0x00")]
    StackOverflow { pc: usize },
    #[error("stack underflow: POP at 0x{pc:02X} with SP at 0x{sp:02X}")]
    StackUnderflow { pc: usize, sp: u8 },
    #[error("cannot run machine in {0:?} state")]
    InvalidState(RunState),
    #[error("failed to write PRN output")]
    Output(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, CpuError>;

/// Lifecycle of one machine instance. `Halted` is terminal: the only way
/// out is an explicit `load`, which resets memory, registers and PC.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Loaded,
    Running,
    Halted,
}

pub struct Cpu {
    memory: Memory,
    regs: RegisterFile,
    pc: usize,
    state: RunState,
    output: Box<dyn Write + Send>,
}

impl fmt::Debug for Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cpu")
            .field("pc", &self.pc)
            .field("state", &self.state)
            .field("regs", &self.regs)
            .finish()
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// A machine whose PRN output goes to stdout.
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()))
    }

    pub fn with_output(output: Box<dyn Write + Send>) -> Self {
        Cpu {
            memory: Memory::new(),
            regs: RegisterFile::new(),
            pc: 0,
            state: RunState::Idle,
            output,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.regs
    }

    /// Places a program image at address 0 and resets all execution state.
    /// Valid from any state, which is also how a halted machine is revived.
    pub fn load(&mut self, image: &[u8]) -> Result<()> {
        let mut memory = Memory::new();
        memory.load_image(image)?;
        self.memory = memory;
        self.regs = RegisterFile::new();
        self.pc = 0;
        self.state = RunState::Loaded;
        Ok(())
    }

    /// Runs the fetch-decode-execute loop until HLT or a fatal fault. Either
    /// way the machine ends up `Halted`; faults are surfaced to the caller
    /// with the address that triggered them.
    pub fn run(&mut self) -> Result<()> {
        if self.state != RunState::Loaded {
            return Err(CpuError::InvalidState(self.state));
        }
        self.state = RunState::Running;
        tracing::info!("starting execution at 0x{:02X}", self.pc);
        while self.state == RunState::Running {
            if let Err(err) = self.step() {
                self.state = RunState::Halted;
                return Err(err);
            }
        }
        tracing::info!("halted at 0x{:02X}", self.pc);
        Ok(())
    }

    fn step(&mut self) -> Result<()> {
        let opcode = self.mem_read(self.pc)?;
        // Operand bytes are fetched eagerly whether or not the instruction
        // uses them; lookahead past the end of memory reads as zero.
        let a = self.peek(self.pc + 1);
        let b = self.peek(self.pc + 2);
        match Instruction::decode([opcode, a, b]) {
            Ok(ins) => self.execute(ins),
            Err(DecodeError::UnknownOpcode(byte)) => {
                tracing::warn!("unknown opcode 0x{:02X} at 0x{:02X}, skipping", byte, self.pc);
                self.pc += 1;
                Ok(())
            }
        }
    }

    fn peek(&self, address: usize) -> u8 {
        self.memory.read(address).unwrap_or(0)
    }

    // Runtime faults report the address of the instruction that raised them;
    // these wrappers tag the current PC on.

    fn mem_read(&self, address: usize) -> Result<u8> {
        self.memory.read(address).map_err(|source| CpuError::MemoryFault {
            pc: self.pc,
            source,
        })
    }

    fn mem_write(&mut self, address: usize, value: u8) -> Result<()> {
        self.memory
            .write(address, value)
            .map_err(|source| CpuError::MemoryFault {
                pc: self.pc,
                source,
            })
    }

    fn reg_read(&self, index: u8) -> Result<u8> {
        self.regs.read(index).map_err(|source| CpuError::RegisterFault {
            pc: self.pc,
            source,
        })
    }

    fn reg_write(&mut self, index: u8, value: u8) -> Result<()> {
        self.regs
            .write(index, value)
            .map_err(|source| CpuError::RegisterFault {
                pc: self.pc,
                source,
            })
    }

    fn execute(&mut self, ins: Instruction) -> Result<()> {
        tracing::trace!("0x{:02X}: {}", self.pc, ins);
        match ins {
            Instruction::Hlt => {
                self.state = RunState::Halted;
                return Ok(());
            }
            Instruction::Ldi { register, value } => {
                self.reg_write(register, value)?;
            }
            Instruction::Prn { register } => {
                let value = self.reg_read(register)?;
                writeln!(self.output, "{}", value)?;
            }
            Instruction::Mul { a, b } => {
                let product = alu::apply(AluOp::Mul, self.reg_read(a)?, self.reg_read(b)?);
                self.reg_write(a, product)?;
            }
            Instruction::Push { register } => {
                let value = self.reg_read(register)?;
                self.push(value)?;
            }
            Instruction::Pop { register } => {
                let value = self.pop()?;
                self.reg_write(register, value)?;
            }
        }
        self.pc += ins.len_bytes();
        Ok(())
    }

    fn push(&mut self, value: u8) -> Result<()> {
        let sp = self.regs.sp();
        if sp == 0 {
            return Err(CpuError::StackOverflow { pc: self.pc });
        }
        let sp = sp - 1;
        self.mem_write(sp as usize, value)?;
        self.regs.set_sp(sp);
        Ok(())
    }

    fn pop(&mut self) -> Result<u8> {
        let sp = self.regs.sp();
        // SP at or above its initial value means the stack is empty.
        if sp >= STACK_INIT {
            return Err(CpuError::StackUnderflow { pc: self.pc, sp });
        }
        let value = self.mem_read(sp as usize)?;
        self.regs.set_sp(sp + 1);
        Ok(value)
    }
}
