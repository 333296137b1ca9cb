use crate::common::*;

pub const WIDE_PREFIX: &str = "WIDE";
pub const LABEL_SUFFIX: char = ':';

pub const START_CURSOR: Cursor = 0;
pub const HALTED_CURSOR: Cursor = -1;

// BIPUSH and IINC take unsigned 16-bit constants
pub type Constant = u16;

pub const ERROR_PREFIX: &str = "Error on line";
pub const WARNING_PREFIX: &str = "Warning on line";
pub const OUTPUT_PREFIX: &str = "OUT:";
