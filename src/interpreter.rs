use crate::error::{CodelError, RuntimeError};
use crate::input::ProgramInput;
use crate::opcode_tables::{opcode_for, Opcode};
use crate::program::Program;
use crate::segmenter::BlockId;
use crate::vm::VM;
use log::{debug, info, trace};
use std::io::{BufRead, Write};

/// Result of a single step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionResult {
    /// Entered a new block and executed the transition's instruction
    Moved {
        from: BlockId,
        to: BlockId,
        opcode: Opcode,
    },
    /// Exit was blocked; direction pointer or chooser changed
    Blocked { attempts: u8 },
    /// Every exit is blocked, the program is over
    Terminated,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// The program ran out of exits
    Terminated { steps: u64 },
    /// The configured step limit was hit first
    StepLimitReached { steps: u64 },
}

/// The execution engine
///
/// Borrows an immutable [`Program`], so several interpreters can share one.
pub struct Interpreter<'p, R, W> {
    program: &'p Program,
    /// Run state
    pub vm: VM,
    pub(crate) input: ProgramInput<R>,
    pub(crate) output: W,
    step_count: u64,
    terminated: bool,
}

impl<'p, R: BufRead, W: Write> Interpreter<'p, R, W> {
    pub fn new(program: &'p Program, input: R, output: W) -> Self {
        Interpreter {
            program,
            vm: VM::new(program.start()),
            input: ProgramInput::new(input),
            output,
            step_count: 0,
            terminated: false,
        }
    }

    pub fn program(&self) -> &'p Program {
        self.program
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Try to move once in the current direction
    pub fn step(&mut self) -> Result<ExecutionResult, CodelError> {
        if self.terminated {
            return Ok(ExecutionResult::Terminated);
        }
        self.step_count += 1;

        let from = self.vm.current;
        let to = self.program.exit(from, self.vm.dp, self.vm.cc);

        if to.is_boundary() {
            let dp = self.vm.dp;
            let cc = self.vm.cc;
            if self.vm.record_blocked() {
                self.terminated = true;
                debug!(
                    "step {}: no way out of block {} after {} attempts",
                    self.step_count, from, self.vm.blocked_attempts
                );
                return Ok(ExecutionResult::Terminated);
            }
            trace!(
                "step {}: blocked leaving {} dp={} cc={}",
                self.step_count,
                from,
                dp,
                cc
            );
            return Ok(ExecutionResult::Blocked {
                attempts: self.vm.blocked_attempts,
            });
        }

        let from_color = self.program.block(from).color;
        let to_color = self.program.block(to).color;
        let opcode = opcode_for(from_color, to_color);
        trace!(
            "step {}: {} ({}) -> {} ({}) {} stack={:?}",
            self.step_count,
            from,
            from_color,
            to,
            to_color,
            opcode,
            self.vm.stack
        );

        self.execute_instruction(opcode)
            .map_err(|source| CodelError::Runtime {
                step: self.step_count,
                block: from,
                source,
            })?;

        self.vm.current = to;
        self.vm.reset_stall();
        Ok(ExecutionResult::Moved { from, to, opcode })
    }

    /// Run until the program terminates
    pub fn run(&mut self) -> Result<ExitStatus, CodelError> {
        self.run_with_limit(None)
    }

    /// Run until termination or until `max_steps` steps have been taken
    pub fn run_with_limit(&mut self, max_steps: Option<u64>) -> Result<ExitStatus, CodelError> {
        info!(
            "starting program at block {} ({} blocks)",
            self.vm.current,
            self.program.block_count()
        );

        loop {
            if let Some(limit) = max_steps {
                if self.step_count >= limit {
                    info!("reached step limit of {}", limit);
                    self.output.flush()?;
                    return Ok(ExitStatus::StepLimitReached {
                        steps: self.step_count,
                    });
                }
            }

            if let ExecutionResult::Terminated = self.step()? {
                info!("program terminated after {} steps", self.step_count);
                self.output.flush()?;
                return Ok(ExitStatus::Terminated {
                    steps: self.step_count,
                });
            }
        }
    }

    /// Execute one instruction against the current state
    ///
    /// `push` uses the size of the block being left, so this runs before
    /// the current block changes.
    pub fn execute_instruction(&mut self, opcode: Opcode) -> Result<(), RuntimeError> {
        self.vm.require(opcode, opcode.pops())?;

        if Self::is_math_opcode(opcode) {
            return self.execute_math_op(opcode);
        }
        if Self::is_stack_opcode(opcode) {
            return self.execute_stack_op(opcode);
        }
        if Self::is_io_opcode(opcode) {
            return self.execute_io_op(opcode);
        }
        // noop
        Ok(())
    }
}
