//! Error types for program construction and execution
//!
//! Nothing here is recoverable from inside a running program: the
//! instruction set has no way to observe a failure, so every runtime error
//! ends the run and is reported together with the step and block it
//! happened at.

use crate::opcode_tables::Opcode;
use crate::segmenter::BlockId;
use std::fmt;

/// Problems found while turning pixels into a program
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    /// Grid or image with no codels at all
    EmptyGrid,
    /// A row whose length differs from the first row
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// Pixel buffer length does not match the declared dimensions
    PixelCountMismatch { expected: usize, found: usize },
    /// Codel size of zero, or larger than the image itself
    InvalidCodelSize {
        codel_size: u32,
        width: usize,
        height: usize,
    },
}

impl fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstructionError::EmptyGrid => write!(f, "program grid is empty"),
            ConstructionError::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {row} has {found} codels, expected {expected} (grid is not rectangular)"
            ),
            ConstructionError::PixelCountMismatch { expected, found } => {
                write!(f, "pixel buffer holds {found} pixels, expected {expected}")
            }
            ConstructionError::InvalidCodelSize {
                codel_size,
                width,
                height,
            } => write!(
                f,
                "codel size {codel_size} is not usable for a {width}x{height} image"
            ),
        }
    }
}

impl std::error::Error for ConstructionError {}

/// Failures raised by a single instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Instruction needed more stack values than were present
    StackUnderflow {
        opcode: Opcode,
        needed: usize,
        available: usize,
    },
    /// `divide` or `mod` with a zero divisor
    DivisionByZero { opcode: Opcode },
    /// Result does not fit in the stack's integer type
    ArithmeticOverflow { opcode: Opcode },
    /// `in_number` / `in_char` with nothing left to read
    InputExhausted { opcode: Opcode },
    /// `in_number` found text that is not a decimal integer
    InvalidNumber { text: String },
    /// `out_char` with a value that is not a Unicode scalar
    InvalidCharacter { value: i64 },
    /// The underlying reader or writer failed
    Io(String),
    /// An opcode reached a handler that does not implement it
    Unhandled { opcode: Opcode },
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::StackUnderflow {
                opcode,
                needed,
                available,
            } => write!(
                f,
                "stack underflow in {opcode}: needs {needed} value(s), stack holds {available}"
            ),
            RuntimeError::DivisionByZero { opcode } => write!(f, "{opcode} by zero"),
            RuntimeError::ArithmeticOverflow { opcode } => {
                write!(f, "integer overflow in {opcode}")
            }
            RuntimeError::InputExhausted { opcode } => {
                write!(f, "{opcode}: no more input available")
            }
            RuntimeError::InvalidNumber { text } => {
                write!(f, "in_number: '{text}' is not a decimal integer")
            }
            RuntimeError::InvalidCharacter { value } => {
                write!(f, "out_char: {value} is not a valid character")
            }
            RuntimeError::Io(msg) => write!(f, "I/O error: {msg}"),
            RuntimeError::Unhandled { opcode } => {
                write!(f, "no handler for {opcode} in this instruction group")
            }
        }
    }
}

impl std::error::Error for RuntimeError {}

impl From<std::io::Error> for RuntimeError {
    fn from(e: std::io::Error) -> Self {
        RuntimeError::Io(e.to_string())
    }
}

/// Top-level error type for the library and binaries
#[derive(Debug)]
pub enum CodelError {
    Construction(ConstructionError),
    /// Image file could not be opened or decoded
    Image { path: String, message: String },
    /// Configuration file could not be read or parsed
    Config(String),
    Io(std::io::Error),
    /// An instruction failed; the run is over
    Runtime {
        step: u64,
        block: BlockId,
        source: RuntimeError,
    },
}

impl fmt::Display for CodelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodelError::Construction(e) => write!(f, "cannot build program: {e}"),
            CodelError::Image { path, message } => {
                write!(f, "cannot load image '{path}': {message}")
            }
            CodelError::Config(msg) => write!(f, "invalid configuration: {msg}"),
            CodelError::Io(e) => write!(f, "I/O error: {e}"),
            CodelError::Runtime {
                step,
                block,
                source,
            } => write!(f, "execution failed at step {step} in block {block}: {source}"),
        }
    }
}

impl std::error::Error for CodelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CodelError::Construction(e) => Some(e),
            CodelError::Io(e) => Some(e),
            CodelError::Runtime { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConstructionError> for CodelError {
    fn from(e: ConstructionError) -> Self {
        CodelError::Construction(e)
    }
}

impl From<std::io::Error> for CodelError {
    fn from(e: std::io::Error) -> Self {
        CodelError::Io(e)
    }
}
