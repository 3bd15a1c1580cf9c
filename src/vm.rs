use crate::adjacency::{Chooser, Direction};
use crate::error::RuntimeError;
use crate::opcode_tables::Opcode;
use crate::segmenter::BlockId;
use log::{debug, trace};

/// Consecutive blocked moves after which the program halts: every
/// (direction, chooser) combination has been tried once
pub const MAX_BLOCKED_ATTEMPTS: u8 = 8;

/// What the next blocked move changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StallPhase {
    ToggleChooser,
    RotateDirection,
}

/// Mutable run state of the interpreter
#[derive(Debug, Clone)]
pub struct VM {
    /// Block the interpreter is currently in
    pub current: BlockId,
    /// Data stack, top at the end
    pub stack: Vec<i64>,
    /// Direction pointer
    pub dp: Direction,
    /// Codel chooser
    pub cc: Chooser,
    /// Consecutive blocked moves
    pub blocked_attempts: u8,
    pub stall_phase: StallPhase,
}

impl VM {
    /// Fresh state at the start block, heading right with the chooser left
    pub fn new(start: BlockId) -> Self {
        VM {
            current: start,
            stack: Vec::new(),
            dp: Direction::Right,
            cc: Chooser::Left,
            blocked_attempts: 0,
            stall_phase: StallPhase::ToggleChooser,
        }
    }

    pub fn push(&mut self, value: i64) {
        trace!("push {} (depth {})", value, self.stack.len() + 1);
        self.stack.push(value);
    }

    /// Fail unless at least `needed` values are on the stack
    pub fn require(&self, opcode: Opcode, needed: usize) -> Result<(), RuntimeError> {
        if self.stack.len() < needed {
            debug!(
                "stack underflow: {} needs {}, depth {}",
                opcode,
                needed,
                self.stack.len()
            );
            return Err(RuntimeError::StackUnderflow {
                opcode,
                needed,
                available: self.stack.len(),
            });
        }
        Ok(())
    }

    pub fn pop(&mut self, opcode: Opcode) -> Result<i64, RuntimeError> {
        self.require(opcode, 1)?;
        Ok(self.stack.pop().unwrap_or_default())
    }

    /// Pop two values, returning them in push order `(a, b)` with `b` the old top
    pub fn pop_pair(&mut self, opcode: Opcode) -> Result<(i64, i64), RuntimeError> {
        self.require(opcode, 2)?;
        let b = self.stack.pop().unwrap_or_default();
        let a = self.stack.pop().unwrap_or_default();
        Ok((a, b))
    }

    pub fn peek(&self) -> Option<i64> {
        self.stack.last().copied()
    }

    /// Rotate the top `depth` values so that the top value is buried `rolls`
    /// times; negative `rolls` brings values up instead
    ///
    /// Returns `false` (and leaves the stack alone) for a negative depth or a
    /// depth larger than the stack.
    pub fn roll(&mut self, depth: i64, rolls: i64) -> bool {
        if depth < 0 || depth as usize > self.stack.len() {
            return false;
        }
        let depth = depth as usize;
        if depth == 0 {
            return true;
        }
        let shift = rolls.rem_euclid(depth as i64) as usize;
        let base = self.stack.len() - depth;
        self.stack[base..].rotate_right(shift);
        true
    }

    /// Apply the recovery step for a blocked move
    ///
    /// Strictly alternates between toggling the chooser and rotating the
    /// direction pointer clockwise, starting with the chooser. Returns true
    /// once the program has run out of ways to move.
    pub fn record_blocked(&mut self) -> bool {
        match self.stall_phase {
            StallPhase::ToggleChooser => {
                self.cc = self.cc.toggled();
                self.stall_phase = StallPhase::RotateDirection;
            }
            StallPhase::RotateDirection => {
                self.dp = self.dp.clockwise();
                self.stall_phase = StallPhase::ToggleChooser;
            }
        }
        self.blocked_attempts += 1;
        trace!(
            "blocked ({}/{}), now dp={} cc={}",
            self.blocked_attempts,
            MAX_BLOCKED_ATTEMPTS,
            self.dp,
            self.cc
        );
        self.blocked_attempts >= MAX_BLOCKED_ATTEMPTS
    }

    pub fn is_stalled_out(&self) -> bool {
        self.blocked_attempts >= MAX_BLOCKED_ATTEMPTS
    }

    /// Forget previous blocked moves after a successful one
    pub fn reset_stall(&mut self) {
        self.blocked_attempts = 0;
        self.stall_phase = StallPhase::ToggleChooser;
    }
}
