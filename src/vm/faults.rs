use std::num::ParseIntError;
use thiserror::Error;

/// Reasons an instruction is rejected. None of them stop the program; they
/// are reported against the offending line and execution carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("{mnemonic} needs at least {} in the stack", elements(.needed))]
    StackUnderflow {
        mnemonic: &'static str,
        needed: usize,
    },

    #[error("{mnemonic} needs {operand} separated by a space")]
    MissingOperand {
        mnemonic: &'static str,
        operand: &'static str,
    },

    #[error("cannot parse {token:?} as a number between 0 and 65535: {source}")]
    InvalidConstant {
        token: String,
        source: ParseIntError,
    },

    #[error("label doesn't exist: {0}")]
    UndefinedLabel(String),

    #[error("variable doesn't exist: {0}")]
    UndefinedVariable(String),
}

fn elements(count: &usize) -> String {
    match *count {
        1 => "one element".to_string(),
        2 => "two elements".to_string(),
        n => format!("{} elements", n),
    }
}

impl Fault {
    pub fn underflow(mnemonic: &'static str, needed: usize) -> Fault {
        Fault::StackUnderflow { mnemonic, needed }
    }

    pub fn missing(mnemonic: &'static str, operand: &'static str) -> Fault {
        Fault::MissingOperand { mnemonic, operand }
    }
}
