//! Mock register-addressed device for testing

use crate::platform::{
    error::{I2cError, PlatformError},
    traits::RegisterInterface,
    Result,
};
use std::collections::VecDeque;
use std::vec::Vec;

/// Register access recorded by [`MockRegisters`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterAccess {
    /// Single register write
    Write { reg: u8, value: u8 },
    /// Burst read
    Read { reg: u8, len: usize },
}

/// Mock register-addressed device
///
/// Records every access and answers burst reads from a queue of scripted
/// responses. An empty queue reads back zeros.
#[derive(Debug, Default)]
pub struct MockRegisters {
    log: Vec<RegisterAccess>,
    responses: VecDeque<Vec<u8>>,
    failing_reads: usize,
    failing_writes: usize,
}

impl MockRegisters {
    /// Create a new mock device
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the bytes returned by the next unanswered read
    pub fn queue_read(&mut self, data: &[u8]) {
        self.responses.push_back(data.to_vec());
    }

    /// Make the next `count` reads fail with a NACK
    pub fn fail_reads(&mut self, count: usize) {
        self.failing_reads = count;
    }

    /// Make the next `count` writes fail with a NACK
    pub fn fail_writes(&mut self, count: usize) {
        self.failing_writes = count;
    }

    /// All accesses so far
    pub fn log(&self) -> &[RegisterAccess] {
        &self.log
    }

    /// Only the writes, as `(reg, value)` pairs
    pub fn writes(&self) -> Vec<(u8, u8)> {
        self.log
            .iter()
            .filter_map(|access| match access {
                RegisterAccess::Write { reg, value } => Some((*reg, *value)),
                RegisterAccess::Read { .. } => None,
            })
            .collect()
    }

    /// Only the reads, as `(reg, len)` pairs
    pub fn reads(&self) -> Vec<(u8, usize)> {
        self.log
            .iter()
            .filter_map(|access| match access {
                RegisterAccess::Read { reg, len } => Some((*reg, *len)),
                RegisterAccess::Write { .. } => None,
            })
            .collect()
    }

    /// Scripted responses not consumed yet
    pub fn pending_responses(&self) -> usize {
        self.responses.len()
    }

    /// Forget the access log
    pub fn clear_log(&mut self) {
        self.log.clear();
    }
}

impl RegisterInterface for MockRegisters {
    fn write_register(&mut self, reg: u8, value: u8) -> Result<()> {
        self.log.push(RegisterAccess::Write { reg, value });
        if self.failing_writes > 0 {
            self.failing_writes -= 1;
            return Err(PlatformError::I2c(I2cError::Nack));
        }
        Ok(())
    }

    fn read_registers(&mut self, reg: u8, buffer: &mut [u8]) -> Result<()> {
        self.log.push(RegisterAccess::Read {
            reg,
            len: buffer.len(),
        });
        if self.failing_reads > 0 {
            self.failing_reads -= 1;
            return Err(PlatformError::I2c(I2cError::Nack));
        }

        buffer.fill(0);
        if let Some(data) = self.responses.pop_front() {
            let n = core::cmp::min(buffer.len(), data.len());
            buffer[..n].copy_from_slice(&data[..n]);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_consume_scripted_responses() {
        let mut regs = MockRegisters::new();
        regs.queue_read(&[0x01, 0x02]);

        let mut first = [0xFFu8; 3];
        regs.read_registers(0x49, &mut first).unwrap();
        assert_eq!(first, [0x01, 0x02, 0x00]);

        let mut second = [0xFFu8; 1];
        regs.read_registers(0x49, &mut second).unwrap();
        assert_eq!(second, [0x00]);

        assert_eq!(regs.reads(), vec![(0x49, 3), (0x49, 1)]);
    }

    #[test]
    fn failing_reads_keep_responses_queued() {
        let mut regs = MockRegisters::new();
        regs.queue_read(&[0x48]);
        regs.fail_reads(1);

        assert!(regs.read_register(0x00).is_err());
        assert_eq!(regs.pending_responses(), 1);
        assert_eq!(regs.read_register(0x00).unwrap(), 0x48);
    }

    #[test]
    fn writes_are_logged_even_when_failing() {
        let mut regs = MockRegisters::new();
        regs.fail_writes(1);

        assert!(regs.write_register(0x25, 0x0C).is_err());
        assert!(regs.write_register(0x26, 0x0A).is_ok());
        assert_eq!(regs.writes(), vec![(0x25, 0x0C), (0x26, 0x0A)]);
    }
}
