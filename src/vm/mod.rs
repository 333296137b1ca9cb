use crate::common::*;
use std::fmt;
use std::io::{self, Read, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub mod dispatch;
pub mod faults;
pub mod labels;
pub mod opcodes;
pub mod program;
pub mod state;


use self::dispatch::Dispatcher;
use self::opcodes::Instruction;
use self::program::Program;
use self::state::{Flow, State};

pub struct VM<R: Read, W: Write> {
    input: R,
    output: W,

    program: Program,
    labels: Labels,
    state: State,

    termination_scheduled: Arc<AtomicBool>,
}

impl<R: Read, W: Write> VM<R, W> {
    pub fn new(input: R, output: W, program: Program) -> Self {
        let labels = labels::resolve(&program);
        info!("loaded {} lines, {} labels", program.len(), labels.len());

        VM {
            input,
            output,
            program,
            labels,
            state: State::new(),
            termination_scheduled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn from_source(input: R, output: W, source: &str) -> Self {
        Self::new(input, output, Program::from_source(source))
    }

    /// Runs until HALT, the end of the program, or termination through
    /// the handle from `termination_handle`.
    pub fn run(&mut self) -> io::Result<()> {
        while self.is_running() {
            self.step()?;
        }

        info!("execution finished {:?}", self);
        self.output.flush()
    }

    /// Like `run`, but gives up after `max_steps` instructions. Returns the
    /// number of instructions executed.
    pub fn run_for(&mut self, max_steps: usize) -> io::Result<usize> {
        let mut steps = 0;
        while steps < max_steps && self.is_running() {
            self.step()?;
            steps += 1;
        }

        debug!("executed {} steps {:?}", steps, self);
        self.output.flush()?;
        Ok(steps)
    }

    /// Executes the instruction under the cursor. Does nothing once the
    /// program has terminated.
    pub fn step(&mut self) -> io::Result<()> {
        let index = match self.state.line_index(self.program.len()) {
            Some(index) => index,
            None => return Ok(()),
        };

        let instruction = Instruction::decode(&self.program[index]);
        debug!("execute line={} {:?} {:?}", index + 1, instruction, self.state);

        let mut dispatcher = Dispatcher {
            labels: &self.labels,
            state: &mut self.state,
            input: &mut self.input,
            output: &mut self.output,
        };

        let flow = dispatcher.dispatch(index, &instruction)?;
        if flow == Flow::Halt {
            info!("halted on line {}", index + 1);
        }

        Ok(())
    }

    pub fn is_running(&self) -> bool {
        !self.termination_scheduled.load(Ordering::Relaxed) &&
        self.state.line_index(self.program.len()).is_some()
    }

    /// Setting the returned flag stops `run` before the next instruction.
    pub fn termination_handle(&self) -> Arc<AtomicBool> {
        self.termination_scheduled.clone()
    }

    pub fn stack(&self) -> StackSlice {
        &self.state.stack
    }

    pub fn variables(&self) -> &Variables {
        &self.state.variables
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn cursor(&self) -> Cursor {
        self.state.cursor
    }

    pub fn is_halted(&self) -> bool {
        self.state.is_halted()
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn get_output_ref(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: Read, W: Write> fmt::Debug for VM<R, W> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "cursor={} lines={} stack={:?} variables={:?}",
               self.state.cursor,
               self.program.len(),
               self.state.stack,
               self.state.variables)
    }
}
