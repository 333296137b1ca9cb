use std::fs;
use std::io;
use std::ops::Index;
use std::path::Path;

/// Source lines of a program, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    lines: Vec<String>,
}

impl Program {
    /// Splits `source` on newlines after normalizing CRLF endings.
    ///
    /// A trailing newline produces a trailing empty line, which executes
    /// as a no-op.
    pub fn from_source(source: &str) -> Program {
        let lines = source.replace("\r\n", "\n")
            .split('\n')
            .map(String::from)
            .collect();

        Program { lines }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Program> {
        let source = fs::read_to_string(path)?;
        Ok(Self::from_source(&source))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }
}

impl Index<usize> for Program {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.lines[index]
    }
}

impl<'a> From<&'a [&'a str]> for Program {
    fn from(lines: &'a [&'a str]) -> Program {
        Program { lines: lines.iter().map(|line| line.to_string()).collect() }
    }
}
