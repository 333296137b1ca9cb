use crate::common::*;
use crate::config::*;

use super::program::Program;

/// Maps every `name:` line to its index. A redeclared name keeps the
/// index of its last declaration.
pub fn resolve(program: &Program) -> Labels {
    let mut labels = Labels::new();

    for (index, line) in program.lines().iter().enumerate() {
        let line = line.trim();
        if let Some(name) = line.strip_suffix(LABEL_SUFFIX) {
            trace!("label {:?} at line {}", name, index + 1);
            labels.insert(name.to_string(), index);
        }
    }

    labels
}
