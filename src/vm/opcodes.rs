use crate::config::*;

pub const BIPUSH: &str = "BIPUSH";
pub const DUP: &str = "DUP";
pub const GOTO: &str = "GOTO";
pub const HALT: &str = "HALT";
pub const IADD: &str = "IADD";
pub const IAND: &str = "IAND";
pub const IFEQ: &str = "IFEQ";
pub const IFLT: &str = "IFLT";
pub const IF_ICMPEQ: &str = "IF_ICMPEQ";
pub const IINC: &str = "IINC";
pub const ILOAD: &str = "ILOAD";
pub const IN: &str = "IN";
pub const ISTORE: &str = "ISTORE";
pub const ISUB: &str = "ISUB";
pub const NOP: &str = "NOP";
pub const OUT: &str = "OUT";
pub const POP: &str = "POP";
pub const SWAP: &str = "SWAP";
pub const DEBUG: &str = "DEBUG";

/// One decoded source line. Operands stay as raw tokens; whether they are
/// present and well formed is checked when the instruction executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction<'a> {
    Bipush(Option<&'a str>),
    Dup,
    Goto(Option<&'a str>),
    Halt,
    Iadd,
    Iand,
    Ifeq(Option<&'a str>),
    Iflt(Option<&'a str>),
    IfIcmpeq(Option<&'a str>),
    Iinc(Option<&'a str>, Option<&'a str>),
    Iload(Option<&'a str>),
    In,
    Istore(Option<&'a str>),
    Isub,
    Nop,
    Out,
    Pop,
    Swap,
    Debug,

    Label(&'a str),
    Blank,
    Unknown(&'a str),
}

impl<'a> Instruction<'a> {
    pub fn decode(line: &'a str) -> Instruction<'a> {
        if let Some(name) = line.trim().strip_suffix(LABEL_SUFFIX) {
            return Instruction::Label(name);
        }

        let mut tokens = line.split_whitespace().peekable();
        if tokens.peek().map_or(false, |token| token.eq_ignore_ascii_case(WIDE_PREFIX)) {
            tokens.next();
        }

        let mnemonic = match tokens.next() {
            Some(mnemonic) => mnemonic,
            None => return Instruction::Blank,
        };

        let first = tokens.next();
        let second = tokens.next();

        match mnemonic.to_ascii_uppercase().as_str() {
            BIPUSH => Instruction::Bipush(first),
            DUP => Instruction::Dup,
            GOTO => Instruction::Goto(first),
            HALT => Instruction::Halt,
            IADD => Instruction::Iadd,
            IAND => Instruction::Iand,
            IFEQ => Instruction::Ifeq(first),
            IFLT => Instruction::Iflt(first),
            IF_ICMPEQ => Instruction::IfIcmpeq(first),
            IINC => Instruction::Iinc(first, second),
            ILOAD => Instruction::Iload(first),
            IN => Instruction::In,
            ISTORE => Instruction::Istore(first),
            ISUB => Instruction::Isub,
            NOP => Instruction::Nop,
            OUT => Instruction::Out,
            POP => Instruction::Pop,
            SWAP => Instruction::Swap,
            DEBUG => Instruction::Debug,
            _ => Instruction::Unknown(mnemonic),
        }
    }

    /// Conditional branches leave the cursor where it is when they fail,
    /// so the same line runs again.
    pub fn stalls_on_fault(&self) -> bool {
        match *self {
            Instruction::Ifeq(_) | Instruction::Iflt(_) | Instruction::IfIcmpeq(_) => true,
            _ => false,
        }
    }
}
