//! Input handling for `in_number` and `in_char`
//!
//! Input is consumed line by line from any `BufRead`, but handed out one
//! character or one number at a time. Whatever a number read leaves on the
//! line stays available for the next read. End of input is reported as an
//! error because a program has no way to represent it on the stack.

use crate::error::RuntimeError;
use crate::opcode_tables::Opcode;
use log::debug;
use std::collections::VecDeque;
use std::io::BufRead;

pub struct ProgramInput<R> {
    reader: R,
    pending: VecDeque<char>,
    exhausted: bool,
}

impl<R: BufRead> ProgramInput<R> {
    pub fn new(reader: R) -> Self {
        ProgramInput {
            reader,
            pending: VecDeque::new(),
            exhausted: false,
        }
    }

    /// Make sure at least one character is buffered; false at end of input
    fn fill(&mut self) -> Result<bool, RuntimeError> {
        while self.pending.is_empty() {
            if self.exhausted {
                return Ok(false);
            }
            let mut line = String::new();
            let bytes_read = self.reader.read_line(&mut line)?;
            if bytes_read == 0 {
                debug!("program input: end of input");
                self.exhausted = true;
                return Ok(false);
            }
            self.pending.extend(line.chars());
        }
        Ok(true)
    }

    fn peek_char(&mut self) -> Result<Option<char>, RuntimeError> {
        Ok(if self.fill()? {
            self.pending.front().copied()
        } else {
            None
        })
    }

    /// Next raw character, whitespace included
    pub fn read_char(&mut self) -> Result<char, RuntimeError> {
        if !self.fill()? {
            return Err(RuntimeError::InputExhausted {
                opcode: Opcode::InChar,
            });
        }
        let c = self.pending.pop_front().unwrap_or_default();
        debug!("program input: char {:?}", c);
        Ok(c)
    }

    /// Next decimal integer, skipping leading whitespace
    pub fn read_number(&mut self) -> Result<i64, RuntimeError> {
        while let Some(c) = self.peek_char()? {
            if !c.is_whitespace() {
                break;
            }
            self.pending.pop_front();
        }

        let mut text = String::new();
        if let Some(sign @ ('-' | '+')) = self.peek_char()? {
            text.push(sign);
            self.pending.pop_front();
        }
        // Digits never span lines, so the current buffer is enough
        while let Some(&c) = self.pending.front() {
            if !c.is_ascii_digit() {
                break;
            }
            text.push(c);
            self.pending.pop_front();
        }

        if text.is_empty() && self.exhausted {
            return Err(RuntimeError::InputExhausted {
                opcode: Opcode::InNumber,
            });
        }
        let value = text
            .parse::<i64>()
            .map_err(|_| RuntimeError::InvalidNumber { text: text.clone() })?;
        debug!("program input: number {}", value);
        Ok(value)
    }
}
