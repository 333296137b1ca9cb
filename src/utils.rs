use crate::common::*;
use crate::vm::VM;
use std::io::BufReader;

/// Joins source lines into program text, one instruction per line.
#[macro_export]
macro_rules! source {
    ($($line:expr),* $(,)*) => {
        [$($line),*].join("\n")
    };
}

pub type TestVM<'a> = VM<BufReader<DataSlice<'a>>, Data>;

pub fn output_to_string(output: DataSlice) -> String {
    String::from_utf8_lossy(output).into_owned()
}

/// Runs `source` to completion against in-memory input and output.
pub fn test_run<'a>(input: DataSlice<'a>, source: &str) -> (String, TestVM<'a>) {
    let _ = env_logger::try_init();

    let mut vm = VM::from_source(BufReader::new(input), Data::new(), source);
    vm.run().expect("in-memory console I/O");

    let output = output_to_string(vm.get_output_ref());
    (output, vm)
}

/// Runs at most `max_steps` instructions of `source`, for programs that
/// never terminate.
pub fn test_run_for<'a>(input: DataSlice<'a>,
                        source: &str,
                        max_steps: usize)
                        -> (String, TestVM<'a>) {
    let _ = env_logger::try_init();

    let mut vm = VM::from_source(BufReader::new(input), Data::new(), source);
    vm.run_for(max_steps).expect("in-memory console I/O");

    let output = output_to_string(vm.get_output_ref());
    (output, vm)
}
