/// Arithmetic and logic instructions
///
/// All binary operations pop `b` (the old top) and then `a`, and push
/// `a OP b`, so a program pushes its operands in reading order.
/// Division truncates toward zero; `mod` takes the sign of the divisor.
use crate::error::RuntimeError;
use crate::interpreter::Interpreter;
use crate::opcode_tables::Opcode;
use log::debug;
use std::io::{BufRead, Write};

impl<'p, R: BufRead, W: Write> Interpreter<'p, R, W> {
    /// Handle arithmetic and comparison opcodes
    pub fn execute_math_op(&mut self, opcode: Opcode) -> Result<(), RuntimeError> {
        match opcode {
            Opcode::Not => {
                let a = self.vm.pop(opcode)?;
                debug!("not {}", a);
                self.vm.push(if a == 0 { 1 } else { 0 });
                Ok(())
            }

            Opcode::Divide | Opcode::Mod => {
                self.vm.require(opcode, 2)?;
                if self.vm.peek() == Some(0) {
                    return Err(RuntimeError::DivisionByZero { opcode });
                }
                let (a, b) = self.vm.pop_pair(opcode)?;
                debug!("{} {} {}", opcode, a, b);
                let result = if opcode == Opcode::Divide {
                    a.checked_div(b)
                } else {
                    // |r| < |b|, so moving r to the divisor's side cannot overflow
                    let r = a.wrapping_rem(b);
                    Some(if r != 0 && (r < 0) != (b < 0) { r + b } else { r })
                };
                match result {
                    Some(value) => {
                        self.vm.push(value);
                        Ok(())
                    }
                    None => {
                        self.vm.push(a);
                        self.vm.push(b);
                        Err(RuntimeError::ArithmeticOverflow { opcode })
                    }
                }
            }

            Opcode::Add | Opcode::Subtract | Opcode::Multiply | Opcode::Greater => {
                let (a, b) = self.vm.pop_pair(opcode)?;
                debug!("{} {} {}", opcode, a, b);
                let result = match opcode {
                    Opcode::Add => a.checked_add(b),
                    Opcode::Subtract => a.checked_sub(b),
                    Opcode::Multiply => a.checked_mul(b),
                    _ => Some(if a > b { 1 } else { 0 }),
                };
                match result {
                    Some(value) => {
                        self.vm.push(value);
                        Ok(())
                    }
                    None => {
                        // Put the operands back so the failure leaves no trace
                        self.vm.push(a);
                        self.vm.push(b);
                        Err(RuntimeError::ArithmeticOverflow { opcode })
                    }
                }
            }

            _ => Err(RuntimeError::Unhandled { opcode }),
        }
    }

    /// Check if an opcode is an arithmetic or comparison operation
    pub fn is_math_opcode(opcode: Opcode) -> bool {
        matches!(
            opcode,
            Opcode::Add
                | Opcode::Subtract
                | Opcode::Multiply
                | Opcode::Divide
                | Opcode::Mod
                | Opcode::Not
                | Opcode::Greater
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::error::RuntimeError;
    use crate::opcode_tables::Opcode;
    use crate::test_utils::{run_op, test_program};
    use test_log::test;

    #[test]
    fn test_subtract_operand_order() {
        let program = test_program();
        assert_eq!(run_op(&program, &[3, 4], Opcode::Subtract), Ok(vec![-1]));
    }

    #[test]
    fn test_add_and_multiply() {
        let program = test_program();
        assert_eq!(run_op(&program, &[1, 3, 4], Opcode::Add), Ok(vec![1, 7]));
        assert_eq!(run_op(&program, &[-3, 4], Opcode::Multiply), Ok(vec![-12]));
    }

    #[test]
    fn test_divide_truncates_toward_zero() {
        let program = test_program();
        assert_eq!(run_op(&program, &[7, 2], Opcode::Divide), Ok(vec![3]));
        assert_eq!(run_op(&program, &[-7, 2], Opcode::Divide), Ok(vec![-3]));
        assert_eq!(run_op(&program, &[7, -2], Opcode::Divide), Ok(vec![-3]));
    }

    #[test]
    fn test_mod_takes_sign_of_divisor() {
        let program = test_program();
        assert_eq!(run_op(&program, &[7, 3], Opcode::Mod), Ok(vec![1]));
        assert_eq!(run_op(&program, &[-7, 3], Opcode::Mod), Ok(vec![2]));
        assert_eq!(run_op(&program, &[5, i64::MAX], Opcode::Mod), Ok(vec![5]));
        assert_eq!(run_op(&program, &[-5, i64::MAX], Opcode::Mod), Ok(vec![i64::MAX - 5]));
        assert_eq!(run_op(&program, &[i64::MIN, -1], Opcode::Mod), Ok(vec![0]));
        assert_eq!(run_op(&program, &[i64::MIN, i64::MAX], Opcode::Mod), Ok(vec![i64::MAX - 1]));
        assert_eq!(run_op(&program, &[7, -3], Opcode::Mod), Ok(vec![-2]));
        assert_eq!(run_op(&program, &[-6, 3], Opcode::Mod), Ok(vec![0]));
    }

    #[test]
    fn test_division_by_zero_is_fatal() {
        let program = test_program();
        assert_eq!(
            run_op(&program, &[7, 0], Opcode::Mod),
            Err((
                RuntimeError::DivisionByZero {
                    opcode: Opcode::Mod
                },
                vec![7, 0]
            ))
        );
        assert!(matches!(
            run_op(&program, &[7, 0], Opcode::Divide),
            Err((RuntimeError::DivisionByZero { .. }, _))
        ));
    }

    #[test]
    fn test_not_and_greater() {
        let program = test_program();
        assert_eq!(run_op(&program, &[0], Opcode::Not), Ok(vec![1]));
        assert_eq!(run_op(&program, &[-4], Opcode::Not), Ok(vec![0]));
        assert_eq!(run_op(&program, &[5, 2], Opcode::Greater), Ok(vec![1]));
        assert_eq!(run_op(&program, &[2, 5], Opcode::Greater), Ok(vec![0]));
        assert_eq!(run_op(&program, &[5, 5], Opcode::Greater), Ok(vec![0]));
    }

    #[test]
    fn test_overflow_and_underflow() {
        let program = test_program();
        assert_eq!(
            run_op(&program, &[i64::MAX, 1], Opcode::Add),
            Err((
                RuntimeError::ArithmeticOverflow {
                    opcode: Opcode::Add
                },
                vec![i64::MAX, 1]
            ))
        );
        assert!(matches!(
            run_op(&program, &[i64::MIN, -1], Opcode::Divide),
            Err((RuntimeError::ArithmeticOverflow { .. }, _))
        ));
        assert!(matches!(
            run_op(&program, &[1], Opcode::Greater),
            Err((RuntimeError::StackUnderflow { needed: 2, .. }, _))
        ));
    }
}
