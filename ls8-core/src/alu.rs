/// Register-to-register ALU operations. The set is closed, so a handler can
/// only ever dispatch an operation that exists; ADD has no opcode binding in
/// the LS-8 subset implemented here but is part of the ALU's vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Mul,
}

/// All arithmetic is 8-bit unsigned and wraps modulo 256.
pub fn apply(op: AluOp, a: u8, b: u8) -> u8 {
    match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Mul => a.wrapping_mul(b),
    }
}
