extern crate std;

use core::cell::RefCell;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, ErrorType, Operation, SevenBitAddress};
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

/// Everything the fake bus and fake delay observed, in order
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BusEvent {
    Write { addr: u8, bytes: Vec<u8> },
    Read { addr: u8, len: usize },
    /// nanoseconds
    Delay(u64),
}

pub type EventLog = Rc<RefCell<Vec<BusEvent>>>;

pub fn new_event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// `(register, value)` pairs of every single-register write, in order
pub fn register_writes(events: &EventLog) -> Vec<(u8, u8)> {
    events
        .borrow()
        .iter()
        .filter_map(|ev| match ev {
            BusEvent::Write { bytes, .. } if bytes.len() == 2 => {
                Some((bytes[0], bytes[1]))
            }
            _ => None,
        })
        .collect()
}

/// Total delay observed after the first write to `register`
/// and before the next bus transfer
pub fn delay_after_write_ns(events: &EventLog, register: u8) -> Option<u64> {
    let log = events.borrow();
    let start = log.iter().position(|ev| match ev {
        BusEvent::Write { bytes, .. } => bytes.first() == Some(&register),
        _ => false,
    })?;
    let waited = log[start + 1..]
        .iter()
        .take_while(|ev| matches!(ev, BusEvent::Delay(_)))
        .map(|ev| match ev {
            BusEvent::Delay(ns) => *ns,
            _ => 0,
        })
        .sum();
    Some(waited)
}

pub struct FakeDelay {
    events: EventLog,
}

impl FakeDelay {
    pub fn new(events: EventLog) -> Self {
        Self { events }
    }

    fn record(&mut self, ns: u64) {
        self.events.borrow_mut().push(BusEvent::Delay(ns));
    }
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.record(ns as u64);
    }

    fn delay_us(&mut self, us: u32) {
        self.record(us as u64 * 1_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.record(ms as u64 * 1_000_000);
    }
}

#[cfg(feature = "async")]
impl embedded_hal_async::delay::DelayNs for FakeDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.record(ns as u64);
    }

    async fn delay_us(&mut self, us: u32) {
        self.record(us as u64 * 1_000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.record(ms as u64 * 1_000_000);
    }
}

/// Bus that records every transfer and answers reads from a queue
pub struct FakeI2cPort {
    pub available_reads: VecDeque<Vec<u8>>,
    /// Any transfer that writes this register pointer is NACKed
    pub failing_register: Option<u8>,
    events: EventLog,
}

impl FakeI2cPort {
    pub fn new(events: EventLog) -> Self {
        FakeI2cPort {
            available_reads: VecDeque::with_capacity(4),
            failing_register: None,
            events,
        }
    }

    /// Enqueue bytes to be returned by a later read
    pub fn add_available_read(&mut self, bytes: &[u8]) {
        self.available_reads.push_back(bytes.to_vec());
    }

    fn run(
        &mut self,
        addr: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), FakeI2cError> {
        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => {
                    if self.failing_register.is_some()
                        && bytes.first().copied() == self.failing_register
                    {
                        return Err(FakeI2cError);
                    }
                    self.events.borrow_mut().push(BusEvent::Write {
                        addr,
                        bytes: bytes.to_vec(),
                    });
                }
                Operation::Read(buffer) => {
                    let buffer: &mut [u8] = &mut **buffer;
                    self.events.borrow_mut().push(BusEvent::Read {
                        addr,
                        len: buffer.len(),
                    });
                    // nothing queued reads back as zeros
                    let next =
                        self.available_reads.pop_front().unwrap_or_default();
                    let n = next.len().min(buffer.len());
                    buffer[..n].copy_from_slice(&next[..n]);
                    buffer[n..].fill(0);
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct FakeI2cError;

impl embedded_hal::i2c::Error for FakeI2cError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

impl ErrorType for FakeI2cPort {
    type Error = FakeI2cError;
}

impl embedded_hal::i2c::I2c for FakeI2cPort {
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.run(address, operations)
    }
}

#[cfg(feature = "async")]
impl embedded_hal_async::i2c::I2c for FakeI2cPort {
    async fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.run(address, operations)
    }
}
