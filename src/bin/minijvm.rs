#[macro_use]
extern crate log;
extern crate env_logger;

#[macro_use]
extern crate clap;

use clap::{App, ArgMatches};
use minijvm::vm::VM;
use minijvm::vm::program::Program;
use std::env;
use std::io::{self, stdin, stdout, BufRead, Result};
use std::sync::atomic::Ordering;

fn main() {
    let matches = App::new("minijvm")
        .version(crate_version!())
        .about("Interpreter for a small JVM-style stack assembly language")
        .args_from_usage("[FILE] 'Program source'
                          -d, --debug 'Enable debug messages'
                          -n, --no-wait 'Exit without waiting for a key press'
                          -s, --max-steps=[N] 'Stop after N instructions'")
        .get_matches();

    let wait = !matches.is_present("no-wait");

    match do_checked_main(&matches) {
        Ok(true) => println!("Program execution terminated."),
        Ok(false) => (),
        Err(e) => println!("Error: {}", e),
    }

    if wait {
        println!("Press enter to exit");
        wait_for_key();
    }
}

/// Returns `false` when there was nothing to run.
fn do_checked_main(matches: &ArgMatches) -> Result<bool> {
    if matches.is_present("debug") {
        env::set_var("RUST_LOG", "minijvm=debug");
    }
    let _ = env_logger::try_init();

    let filename = match matches.value_of("FILE") {
        Some(filename) => filename,
        None => {
            println!("No file specified! Pass a program file as the first argument.");
            return Ok(false);
        }
    };

    let max_steps = match matches.value_of("max-steps") {
        Some(value) => {
            let steps = value.parse::<usize>()
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
            Some(steps)
        }
        None => None,
    };

    let program = match Program::from_file(filename) {
        Ok(program) => program,
        Err(e) => {
            println!("Error while reading file: {}", e);
            return Ok(false);
        }
    };

    let mut vm = VM::new(stdin(), stdout(), program);

    let termination_scheduled = vm.termination_handle();
    let handler = ctrlc::set_handler(move || {
        info!("Terminating...");
        termination_scheduled.store(true, Ordering::Relaxed);
    });
    if let Err(e) = handler {
        warn!("cannot install Ctrl-C handler: {}", e);
    }

    match max_steps {
        Some(max_steps) => {
            let steps = vm.run_for(max_steps)?;
            if vm.is_running() {
                println!("Stopped after {} instructions.", steps);
            }
        }
        None => vm.run()?,
    }

    Ok(true)
}

fn wait_for_key() {
    let mut line = String::new();
    let _ = stdin().lock().read_line(&mut line);
}
