use std::fmt;

use thiserror::Error;

pub const HLT: u8 = 0b0000_0001;
pub const LDI: u8 = 0b1000_0010;
pub const PRN: u8 = 0b0100_0111;
pub const MUL: u8 = 0b1010_0010;
pub const PUSH: u8 = 0b0100_0101;
pub const POP: u8 = 0b0100_0110;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unknown opcode 0x{0:02X}")]
    UnknownOpcode(u8),
}

pub type Result<T> = std::result::Result<T, DecodeError>;

/// One decoded LS-8 instruction with exactly the operands its encoding
/// defines. The CPU fetches the opcode byte plus two lookahead bytes and
/// hands all three here; `len_bytes` tells it how far to advance PC
/// afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    Hlt,
    Ldi { register: u8, value: u8 },
    Prn { register: u8 },
    Mul { a: u8, b: u8 },
    Push { register: u8 },
    Pop { register: u8 },
}

impl Instruction {
    pub fn decode(bytes: [u8; 3]) -> Result<Self> {
        let [opcode, a, b] = bytes;
        let ins = match opcode {
            HLT => Instruction::Hlt,
            LDI => Instruction::Ldi {
                register: a,
                value: b,
            },
            PRN => Instruction::Prn { register: a },
            MUL => Instruction::Mul { a, b },
            PUSH => Instruction::Push { register: a },
            POP => Instruction::Pop { register: a },
            _ => return Err(DecodeError::UnknownOpcode(opcode)),
        };
        Ok(ins)
    }

    /// Instruction length including the opcode byte; each handler advances
    /// PC by exactly this much.
    pub const fn len_bytes(&self) -> usize {
        match self {
            Instruction::Hlt => 1,
            Instruction::Prn { .. } | Instruction::Push { .. } | Instruction::Pop { .. } => 2,
            Instruction::Ldi { .. } | Instruction::Mul { .. } => 3,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Hlt => write!(f, "HLT"),
            Instruction::Ldi { register, value } => {
                write!(f, "LDI R{}, 0x{:02X}", register, value)
            }
            Instruction::Prn { register } => write!(f, "PRN R{}", register),
            Instruction::Mul { a, b } => write!(f, "MUL R{}, R{}", a, b),
            Instruction::Push { register } => write!(f, "PUSH R{}", register),
            Instruction::Pop { register } => write!(f, "POP R{}", register),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_all_opcodes() {
        for opcode in 0x00u8..=0xFF {
            let result = Instruction::decode([opcode, 0x01, 0x02]);
            match opcode {
                HLT => assert_eq!(result, Ok(Instruction::Hlt)),
                LDI => assert_eq!(
                    result,
                    Ok(Instruction::Ldi {
                        register: 0x01,
                        value: 0x02
                    })
                ),
                PRN => assert_eq!(result, Ok(Instruction::Prn { register: 0x01 })),
                MUL => assert_eq!(result, Ok(Instruction::Mul { a: 0x01, b: 0x02 })),
                PUSH => assert_eq!(result, Ok(Instruction::Push { register: 0x01 })),
                POP => assert_eq!(result, Ok(Instruction::Pop { register: 0x01 })),
                _ => assert_eq!(result, Err(DecodeError::UnknownOpcode(opcode))),
            }
        }
    }

    #[test]
    fn test_len_bytes() {
        assert_eq!(Instruction::Hlt.len_bytes(), 1);
        assert_eq!(Instruction::Prn { register: 0 }.len_bytes(), 2);
        assert_eq!(Instruction::Push { register: 0 }.len_bytes(), 2);
        assert_eq!(Instruction::Pop { register: 0 }.len_bytes(), 2);
        assert_eq!(
            Instruction::Ldi {
                register: 0,
                value: 0
            }
            .len_bytes(),
            3
        );
        assert_eq!(Instruction::Mul { a: 0, b: 0 }.len_bytes(), 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(Instruction::Hlt.to_string(), "HLT");
        assert_eq!(
            Instruction::Ldi {
                register: 0,
                value: 8
            }
            .to_string(),
            "LDI R0, 0x08"
        );
        assert_eq!(Instruction::Mul { a: 0, b: 1 }.to_string(), "MUL R0, R1");
    }
}
