use crate::common::*;
use crate::config::*;

use super::faults::Fault;

/// Where the cursor goes after an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Next,
    Stay,
    Jump(usize),
    Halt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub stack: Stack,
    pub variables: Variables,
    pub cursor: Cursor,
}

impl Default for State {
    fn default() -> Self {
        State {
            stack: Stack::new(),
            variables: Variables::new(),
            cursor: START_CURSOR,
        }
    }
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the line to execute next, or `None` once the cursor has
    /// left the program.
    pub fn line_index(&self, program_len: usize) -> Option<usize> {
        if self.cursor < 0 {
            return None;
        }

        let index = self.cursor as usize;
        if index < program_len {
            Some(index)
        } else {
            None
        }
    }

    pub fn is_halted(&self) -> bool {
        self.cursor == HALTED_CURSOR
    }

    pub fn apply(&mut self, flow: Flow) {
        match flow {
            Flow::Next => self.cursor += 1,
            Flow::Stay => (),
            Flow::Jump(target) => self.cursor = target as Cursor,
            Flow::Halt => self.cursor = HALTED_CURSOR,
        }
    }

    pub fn require(&self, mnemonic: &'static str, needed: usize) -> Result<(), Fault> {
        if self.stack.len() >= needed {
            Ok(())
        } else {
            Err(Fault::underflow(mnemonic, needed))
        }
    }

    pub fn push(&mut self, value: Word) {
        self.stack.push(value);
    }

    /// Callers check the depth with `require` first.
    pub fn pop(&mut self) -> Word {
        self.stack.pop().unwrap_or_default()
    }

    pub fn top(&self) -> Option<Word> {
        self.stack.last().cloned()
    }

    pub fn second(&self) -> Option<Word> {
        let len = self.stack.len();
        if len > 1 {
            Some(self.stack[len - 2])
        } else {
            None
        }
    }

    pub fn load(&self, name: &str) -> Result<Word, Fault> {
        self.variables
            .get(name)
            .cloned()
            .ok_or_else(|| Fault::UndefinedVariable(name.to_string()))
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn store(&mut self, name: &str, value: Word) {
        self.variables.insert(name.to_string(), value);
    }
}
