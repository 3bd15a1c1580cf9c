#[macro_use]
extern crate lazy_static;

pub mod adjacency;
pub mod color;
pub mod config;
pub mod disassembler;
pub mod error;
pub mod grid;
pub mod image_loader;
pub mod input;
pub mod interpreter;
pub mod opcode_tables;
pub mod opcodes_io;
pub mod opcodes_math;
pub mod opcodes_stack;
pub mod program;
pub mod segmenter;
pub mod vm;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::CodelError;
pub use interpreter::{ExitStatus, Interpreter};
pub use program::{build_program, Program};

use std::io::{BufRead, Write};

/// Run a program to completion on the given input and output streams
pub fn run<R: BufRead, W: Write>(
    program: &Program,
    input: R,
    output: W,
) -> Result<ExitStatus, CodelError> {
    Interpreter::new(program, input, output).run()
}
