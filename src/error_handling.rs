use std::path::PathBuf;
use std::fmt::{Debug, Display};

pub trait ErrorType: Display + PartialEq {}

// Where a grammar rule came from. A line of 0 means the whole file, and an
// empty file means the grammar was built in code.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize
}

impl Location {
    pub fn at(file: impl Into<PathBuf>, line: usize) -> Self {
        Location { file: file.into(), line }
    }

    pub fn whole_file(file: impl Into<PathBuf>) -> Self {
        Location::at(file, 0)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let file = if self.file.as_os_str().is_empty() {
            "<grammar>".to_string()
        } else {
            self.file.display().to_string()
        };

        if self.line == 0 {
            write!(f, "{}", file)
        } else {
            write!(f, "{}:{}", file, self.line)
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Error<T: ErrorType> {
    pub location: Location,
    pub error: T
}

impl<T: ErrorType> Error<T> {
    pub fn new(location: Location, error: T) -> Self {
        Error { location, error }
    }
}

impl<T: ErrorType> Display for Error<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\x1b[31;49;1m[{}]\x1b[39;49;1m  {}\x1b[0m", self.location, self.error)
    }
}

impl<T: ErrorType + Debug> std::error::Error for Error<T> {}

pub type Errors<T> = Vec<Error<T>>;
