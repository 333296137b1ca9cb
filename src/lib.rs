#[macro_use]
extern crate log;
extern crate env_logger;

#[cfg(test)]
#[macro_use]
extern crate more_asserts;

#[macro_use]
pub mod utils;

pub mod common;
pub mod config;

pub mod vm;
