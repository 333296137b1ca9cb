use std::io::{self, ErrorKind, Read, Write};
use std::str;

use crate::common::*;
use crate::config::*;

use super::faults::Fault;
use super::opcodes::*;
use super::state::{Flow, State};

/// Executes one decoded line against borrowed VM parts.
pub struct Dispatcher<'a, R: 'a, W: 'a> {
    pub labels: &'a Labels,
    pub state: &'a mut State,
    pub input: &'a mut R,
    pub output: &'a mut W,
}

impl<'a, R: Read, W: Write> Dispatcher<'a, R, W> {
    /// Runs `instruction` found at 0-based `line`, reports any fault and
    /// moves the cursor. Only console I/O failures are returned as errors.
    pub fn dispatch(&mut self, line: usize, instruction: &Instruction) -> io::Result<Flow> {
        let outcome = match *instruction {
            Instruction::Bipush(token) => self.bipush(token),
            Instruction::Dup => self.dup(),
            Instruction::Goto(label) => self.goto(label),
            Instruction::Halt => Ok(Flow::Halt),
            Instruction::Iadd => self.binary(IADD, |top, second| top.wrapping_add(second)),
            // IAND has always computed OR; programs depend on it
            Instruction::Iand => self.binary(IAND, |top, second| top | second),
            Instruction::Ifeq(label) => self.branch_if(IFEQ, label, |value| value == 0),
            Instruction::Iflt(label) => self.branch_if(IFLT, label, |value| value < 0),
            Instruction::IfIcmpeq(label) => self.branch_if_equal(label),
            Instruction::Iinc(name, constant) => self.iinc(name, constant),
            Instruction::Iload(name) => self.iload(name),
            Instruction::In => {
                let value = self.read_char()?;
                self.state.push(value);
                Ok(Flow::Next)
            }
            Instruction::Istore(name) => self.istore(name),
            Instruction::Isub => self.binary(ISUB, |top, second| top.wrapping_sub(second)),
            Instruction::Nop | Instruction::Label(_) | Instruction::Blank => Ok(Flow::Next),
            Instruction::Out => {
                match self.state.require(OUT, 1) {
                    Ok(()) => {
                        let value = self.state.pop();
                        writeln!(self.output, "{} {}", OUTPUT_PREFIX, value)?;
                        Ok(Flow::Next)
                    }
                    Err(fault) => Err(fault),
                }
            }
            Instruction::Pop => {
                self.state.require(POP, 1).map(|_| {
                    self.state.pop();
                    Flow::Next
                })
            }
            Instruction::Swap => {
                self.state.require(SWAP, 2).map(|_| {
                    let len = self.state.stack.len();
                    self.state.stack.swap(len - 1, len - 2);
                    Flow::Next
                })
            }
            Instruction::Debug => {
                self.dump()?;
                Ok(Flow::Next)
            }
            Instruction::Unknown(mnemonic) => {
                debug!("unknown instruction {:?} on line {}", mnemonic, line + 1);
                writeln!(self.output, "{} {}: unknown instruction", WARNING_PREFIX, line + 1)?;
                Ok(Flow::Stay)
            }
        };

        let flow = match outcome {
            Ok(flow) => flow,
            Err(fault) => {
                debug!("line {}: {:?}", line + 1, fault);
                writeln!(self.output, "{} {}: {}", ERROR_PREFIX, line + 1, fault)?;
                if instruction.stalls_on_fault() {
                    Flow::Stay
                } else {
                    Flow::Next
                }
            }
        };

        self.state.apply(flow);
        Ok(flow)
    }

    fn bipush(&mut self, token: Option<&str>) -> Result<Flow, Fault> {
        let token = token.ok_or_else(|| Fault::missing(BIPUSH, "a number"))?;
        let value = parse_constant(token)?;
        self.state.push(value as Word);
        Ok(Flow::Next)
    }

    fn dup(&mut self) -> Result<Flow, Fault> {
        self.state.require(DUP, 1)?;
        let value = self.state.pop();
        self.state.push(value);
        self.state.push(value);
        Ok(Flow::Next)
    }

    fn goto(&mut self, label: Option<&str>) -> Result<Flow, Fault> {
        let target = self.target(GOTO, label)?;
        Ok(Flow::Jump(target))
    }

    /// Pops two words and pushes `op(top, second)`.
    fn binary<F>(&mut self, mnemonic: &'static str, op: F) -> Result<Flow, Fault>
        where F: Fn(Word, Word) -> Word
    {
        self.state.require(mnemonic, 2)?;
        let top = self.state.pop();
        let second = self.state.pop();
        self.state.push(op(top, second));
        Ok(Flow::Next)
    }

    fn branch_if<F>(&mut self,
                    mnemonic: &'static str,
                    label: Option<&str>,
                    condition: F)
                    -> Result<Flow, Fault>
        where F: Fn(Word) -> bool
    {
        self.state.require(mnemonic, 1)?;
        let top = self.state.top().unwrap_or_default();

        if condition(top) {
            let target = self.target(mnemonic, label)?;
            self.state.pop();
            Ok(Flow::Jump(target))
        } else {
            self.state.pop();
            Ok(Flow::Next)
        }
    }

    /// IF_ICMPEQ never steps past itself: it either jumps or leaves the
    /// cursor on the same line.
    fn branch_if_equal(&mut self, label: Option<&str>) -> Result<Flow, Fault> {
        self.state.require(IF_ICMPEQ, 2)?;
        let equal = self.state.top() == self.state.second();

        let flow = if equal {
            Flow::Jump(self.target(IF_ICMPEQ, label)?)
        } else {
            Flow::Stay
        };

        self.state.pop();
        self.state.pop();
        Ok(flow)
    }

    /// Overwrites rather than increments, and takes its constant from the
    /// variable operand: `IINC 7 1` sets variable `7` to 7. The second
    /// operand only has to be present.
    fn iinc(&mut self, name: Option<&str>, constant: Option<&str>) -> Result<Flow, Fault> {
        let (name, _) = match (name, constant) {
            (Some(name), Some(constant)) => (name, constant),
            _ => return Err(Fault::missing(IINC, "a variable name and a constant")),
        };

        let value = parse_constant(name)?;
        self.state.store(name, value as Word);
        Ok(Flow::Next)
    }

    fn iload(&mut self, name: Option<&str>) -> Result<Flow, Fault> {
        let name = name.ok_or_else(|| Fault::missing(ILOAD, "a variable name"))?;
        let value = self.state.load(name)?;
        self.state.push(value);
        Ok(Flow::Next)
    }

    /// Only stores into variables that already exist.
    fn istore(&mut self, name: Option<&str>) -> Result<Flow, Fault> {
        self.state.require(ISTORE, 1)?;
        let name = name.ok_or_else(|| Fault::missing(ISTORE, "a variable name"))?;
        if !self.state.has_variable(name) {
            return Err(Fault::UndefinedVariable(name.to_string()));
        }

        let value = self.state.pop();
        self.state.store(name, value);
        Ok(Flow::Next)
    }

    fn target(&self, mnemonic: &'static str, label: Option<&str>) -> Result<usize, Fault> {
        let label = label.ok_or_else(|| Fault::missing(mnemonic, "a label"))?;
        self.labels
            .get(label)
            .cloned()
            .ok_or_else(|| Fault::UndefinedLabel(label.to_string()))
    }

    /// Reads one UTF-8 character and returns its code point truncated to a
    /// word. End of input reads as 0.
    fn read_char(&mut self) -> io::Result<Word> {
        let mut buffer = [0u8; 4];
        match self.input.read_exact(&mut buffer[..1]) {
            Ok(()) => (),
            Err(ref e) if e.kind() == ErrorKind::UnexpectedEof => return Ok(0),
            Err(e) => return Err(e),
        }

        let width = utf8_width(buffer[0]);
        if width > 1 {
            match self.input.read_exact(&mut buffer[1..width]) {
                Ok(()) => (),
                Err(ref e) if e.kind() == ErrorKind::UnexpectedEof => {
                    return Ok(code_point(char::REPLACEMENT_CHARACTER))
                }
                Err(e) => return Err(e),
            }
        }

        let c = str::from_utf8(&buffer[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER);

        trace!("read {:?}", c);
        Ok(code_point(c))
    }

    fn dump(&mut self) -> io::Result<()> {
        if !self.state.stack.is_empty() {
            writeln!(self.output, "Stack:")?;
            for (index, value) in self.state.stack.iter().enumerate() {
                writeln!(self.output, "{}: {}", index, value)?;
            }
        }

        if !self.state.variables.is_empty() {
            writeln!(self.output, "Variables:")?;
            for (name, value) in &self.state.variables {
                writeln!(self.output, "{}: {}", name, value)?;
            }
        }

        Ok(())
    }
}

fn parse_constant(token: &str) -> Result<Constant, Fault> {
    token.parse::<Constant>()
        .map_err(|source| {
            Fault::InvalidConstant {
                token: token.to_string(),
                source,
            }
        })
}

fn utf8_width(first: u8) -> usize {
    match first {
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        _ => 1,
    }
}

fn code_point(c: char) -> Word {
    c as u32 as u16 as Word
}
