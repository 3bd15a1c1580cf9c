// Test helpers for driving single instructions without building real images
use crate::color::{Color, Hue, Lightness};
use crate::error::RuntimeError;
use crate::grid::Grid;
use crate::interpreter::Interpreter;
use crate::opcode_tables::Opcode;
use crate::program::{build_program, Program};
use std::io::Cursor;

pub type TestInterpreter<'p> = Interpreter<'p, Cursor<Vec<u8>>, Vec<u8>>;

/// 2x2 red block next to a blue column; the start block has four codels
pub fn test_program() -> Program {
    let red = Color::new(Hue::Red, Lightness::Normal);
    let blue = Color::new(Hue::Blue, Lightness::Normal);
    let grid = Grid::from_rows(vec![vec![red, red, blue], vec![red, red, blue]])
        .expect("test grid is rectangular");
    build_program(&grid)
}

pub fn interpreter<'p>(program: &'p Program, input: &str) -> TestInterpreter<'p> {
    Interpreter::new(program, Cursor::new(input.as_bytes().to_vec()), Vec::new())
}

/// Run one instruction on a given stack; the error case carries the stack
/// as it was left
pub fn run_op(
    program: &Program,
    stack: &[i64],
    opcode: Opcode,
) -> Result<Vec<i64>, (RuntimeError, Vec<i64>)> {
    let mut interp = interpreter(program, "");
    interp.vm.stack = stack.to_vec();
    match interp.execute_instruction(opcode) {
        Ok(()) => Ok(interp.vm.stack),
        Err(e) => Err((e, interp.vm.stack)),
    }
}
