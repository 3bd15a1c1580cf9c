/// Input/output instructions
///
/// Numbers are read as decimal tokens and written as decimal text without
/// separators; characters are read and written as single Unicode scalars.
/// Output is flushed after every write so interactive programs show their
/// prompts before blocking on input.
use crate::error::RuntimeError;
use crate::interpreter::Interpreter;
use crate::opcode_tables::Opcode;
use log::debug;
use std::io::{BufRead, Write};

impl<'p, R: BufRead, W: Write> Interpreter<'p, R, W> {
    /// Handle I/O opcodes
    pub fn execute_io_op(&mut self, opcode: Opcode) -> Result<(), RuntimeError> {
        match opcode {
            Opcode::InNumber => {
                let value = self.input.read_number()?;
                debug!("in_number {}", value);
                self.vm.push(value);
                Ok(())
            }

            Opcode::InChar => {
                let c = self.input.read_char()?;
                debug!("in_char {:?}", c);
                self.vm.push(c as i64);
                Ok(())
            }

            Opcode::OutNumber => {
                let value = self.vm.pop(opcode)?;
                debug!("out_number {}", value);
                write!(self.output, "{value}")?;
                self.output.flush()?;
                Ok(())
            }

            Opcode::OutChar => {
                self.vm.require(opcode, 1)?;
                let value = self.vm.peek().unwrap_or_default();
                let c = u32::try_from(value)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or(RuntimeError::InvalidCharacter { value })?;
                self.vm.pop(opcode)?;
                debug!("out_char {:?}", c);
                write!(self.output, "{c}")?;
                self.output.flush()?;
                Ok(())
            }

            _ => Err(RuntimeError::Unhandled { opcode }),
        }
    }

    /// Check if an opcode reads input or writes output
    pub fn is_io_opcode(opcode: Opcode) -> bool {
        matches!(
            opcode,
            Opcode::InNumber | Opcode::InChar | Opcode::OutNumber | Opcode::OutChar
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::error::RuntimeError;
    use crate::opcode_tables::Opcode;
    use crate::test_utils::{interpreter, test_program};
    use test_log::test;

    #[test]
    fn test_out_number_and_char() {
        let program = test_program();
        let mut interp = interpreter(&program, "");
        interp.vm.stack = vec![10, 72, -15];
        interp.execute_instruction(Opcode::OutNumber).unwrap();
        interp.execute_instruction(Opcode::OutChar).unwrap();
        interp.execute_instruction(Opcode::OutChar).unwrap();
        assert!(interp.vm.stack.is_empty());
        assert_eq!(interp.output(), b"-15H\n");
    }

    #[test]
    fn test_out_char_rejects_invalid_values() {
        let program = test_program();
        let mut interp = interpreter(&program, "");
        interp.vm.stack = vec![-1];
        assert_eq!(
            interp.execute_instruction(Opcode::OutChar),
            Err(RuntimeError::InvalidCharacter { value: -1 })
        );
        assert_eq!(interp.vm.stack, vec![-1]);

        interp.vm.stack = vec![0xD800];
        assert!(interp.execute_instruction(Opcode::OutChar).is_err());
    }

    #[test]
    fn test_in_number_and_char() {
        let program = test_program();
        let mut interp = interpreter(&program, "123\nA");
        interp.execute_instruction(Opcode::InNumber).unwrap();
        // newline left over from the number line
        interp.execute_instruction(Opcode::InChar).unwrap();
        interp.execute_instruction(Opcode::InChar).unwrap();
        assert_eq!(interp.vm.stack, vec![123, 10, 65]);
    }

    #[test]
    fn test_input_exhaustion_is_fatal() {
        let program = test_program();
        let mut interp = interpreter(&program, "");
        assert_eq!(
            interp.execute_instruction(Opcode::InNumber),
            Err(RuntimeError::InputExhausted {
                opcode: Opcode::InNumber
            })
        );
        assert_eq!(
            interp.execute_instruction(Opcode::InChar),
            Err(RuntimeError::InputExhausted {
                opcode: Opcode::InChar
            })
        );
        assert!(interp.vm.stack.is_empty());
    }
}
