/// Stack manipulation and control-register instructions
///
/// This module handles push, pop, duplicate and roll, plus the two
/// instructions that steer execution: pointer (rotates the direction
/// pointer) and switch (flips the codel chooser).
use crate::error::RuntimeError;
use crate::interpreter::Interpreter;
use crate::opcode_tables::Opcode;
use log::{debug, warn};
use std::io::{BufRead, Write};

impl<'p, R: BufRead, W: Write> Interpreter<'p, R, W> {
    /// Handle stack and control opcodes
    pub fn execute_stack_op(&mut self, opcode: Opcode) -> Result<(), RuntimeError> {
        match opcode {
            Opcode::Push => {
                let size = self.program().block(self.vm.current).size();
                debug!("push {}", size);
                self.vm.push(size as i64);
                Ok(())
            }

            Opcode::Pop => {
                let value = self.vm.pop(opcode)?;
                debug!("pop {}", value);
                Ok(())
            }

            Opcode::Duplicate => {
                let value = self.vm.pop(opcode)?;
                debug!("duplicate {}", value);
                self.vm.push(value);
                self.vm.push(value);
                Ok(())
            }

            // Roll count on top, depth beneath it
            Opcode::Roll => {
                let (depth, rolls) = self.vm.pop_pair(opcode)?;
                debug!("roll depth={} rolls={}", depth, rolls);
                if !self.vm.roll(depth, rolls) {
                    warn!(
                        "roll ignored: depth {} with {} values below it",
                        depth,
                        self.vm.stack.len()
                    );
                    self.vm.push(depth);
                    self.vm.push(rolls);
                }
                Ok(())
            }

            Opcode::Pointer => {
                let turns = self.vm.pop(opcode)?;
                self.vm.dp = self.vm.dp.rotate(turns);
                debug!("pointer {} -> dp={}", turns, self.vm.dp);
                Ok(())
            }

            Opcode::Switch => {
                let flips = self.vm.pop(opcode)?;
                if flips.rem_euclid(2) == 1 {
                    self.vm.cc = self.vm.cc.toggled();
                }
                debug!("switch {} -> cc={}", flips, self.vm.cc);
                Ok(())
            }

            _ => Err(RuntimeError::Unhandled { opcode }),
        }
    }

    /// Check if an opcode is a stack or control-register operation
    pub fn is_stack_opcode(opcode: Opcode) -> bool {
        matches!(
            opcode,
            Opcode::Push
                | Opcode::Pop
                | Opcode::Duplicate
                | Opcode::Roll
                | Opcode::Pointer
                | Opcode::Switch
        )
    }
}
