pub mod alu;
pub mod cpu;
pub mod isa;
pub mod loader;
pub mod memory;
pub mod registers;

pub use crate::cpu::{Cpu, CpuError, RunState};
pub use crate::isa::Instruction;
pub use crate::loader::LoaderError;
pub use crate::memory::{Memory, MemoryError, MEMORY_SIZE};
pub use crate::registers::{RegisterError, RegisterFile, NUM_REGISTERS, STACK_INIT};
