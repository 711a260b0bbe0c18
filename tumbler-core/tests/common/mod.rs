//! Host-side doubles with a shared virtual clock
//!
//! Every double appends to one [`Trace`], stamped with the virtual time
//! at which the operation happened. Delays advance the clock instead of
//! sleeping.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use embedded_hal_async::delay::DelayNs;
use embedded_io_async::{ErrorKind, ErrorType, Write};
use tumbler_core::Transmit;
use tumbler_hal::{Level, SerialPort, SignalPin, UartConfig};
use tumbler_protocol::Frame;

/// Something observable on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Output,
    Level(Level),
    Float,
    Delay(u64),
    Acquire(UartConfig),
    Write(Vec<u8>),
    Flush,
    Close,
    Frame(Vec<u8>),
}

/// Time-stamped operation log shared by all doubles
#[derive(Clone, Default)]
pub struct Trace {
    now_ns: Rc<Cell<u64>>,
    ops: Rc<RefCell<Vec<(u64, Op)>>>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ns(&self) -> u64 {
        self.now_ns.get()
    }

    pub fn record(&self, op: Op) {
        self.ops.borrow_mut().push((self.now_ns.get(), op));
    }

    pub fn ops(&self) -> Vec<Op> {
        self.ops.borrow().iter().map(|(_, op)| op.clone()).collect()
    }

    pub fn stamped(&self) -> Vec<(u64, Op)> {
        self.ops.borrow().clone()
    }

    pub fn advance(&self, ns: u64) {
        self.now_ns.set(self.now_ns.get() + ns);
    }
}

pub struct MockDelay {
    pub trace: Trace,
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.trace.record(Op::Delay(ns as u64));
        self.trace.advance(ns as u64);
    }

    async fn delay_us(&mut self, us: u32) {
        let ns = us as u64 * 1_000;
        self.trace.record(Op::Delay(ns));
        self.trace.advance(ns);
    }

    async fn delay_ms(&mut self, ms: u32) {
        let ns = ms as u64 * 1_000_000;
        self.trace.record(Op::Delay(ns));
        self.trace.advance(ns);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinFault;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialFault;

impl embedded_io_async::Error for SerialFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// One wire, used as a GPIO for the wake pulse and as a UART for the burst
pub struct MockLine {
    pub trace: Trace,
    pub fail_output: bool,
    pub fail_acquire: bool,
    pub fail_write: bool,
}

impl SignalPin for MockLine {
    type Error = PinFault;

    fn configure_output(&mut self) -> Result<(), Self::Error> {
        if self.fail_output {
            return Err(PinFault);
        }
        self.trace.record(Op::Output);
        Ok(())
    }

    fn set_level(&mut self, level: Level) {
        self.trace.record(Op::Level(level));
    }

    fn release(&mut self) {
        self.trace.record(Op::Float);
    }
}

impl SerialPort for MockLine {
    type Error = SerialFault;
    type Channel<'a>
        = MockChannel
    where
        Self: 'a;

    fn acquire(&mut self, config: &UartConfig) -> Result<Self::Channel<'_>, Self::Error> {
        if self.fail_acquire {
            return Err(SerialFault);
        }
        self.trace.record(Op::Acquire(*config));
        Ok(MockChannel {
            trace: self.trace.clone(),
            fail_write: self.fail_write,
        })
    }

    fn close(&mut self) {
        self.trace.record(Op::Close);
    }
}

pub struct MockChannel {
    trace: Trace,
    fail_write: bool,
}

impl ErrorType for MockChannel {
    type Error = SerialFault;
}

impl Write for MockChannel {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if self.fail_write {
            return Err(SerialFault);
        }
        self.trace.record(Op::Write(buf.to_vec()));
        Ok(buf.len())
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        self.trace.record(Op::Flush);
        Ok(())
    }
}

/// Transport that records frames and can fail on a chosen call
pub struct RecordingTransport {
    pub trace: Trace,
    pub fail_on: Option<usize>,
    pub calls: usize,
}

impl RecordingTransport {
    pub fn new(trace: Trace) -> Self {
        Self {
            trace,
            fail_on: None,
            calls: 0,
        }
    }

    pub fn frames(&self) -> Vec<(u64, Vec<u8>)> {
        self.trace
            .stamped()
            .into_iter()
            .filter_map(|(at, op)| match op {
                Op::Frame(bytes) => Some((at, bytes)),
                _ => None,
            })
            .collect()
    }
}

impl Transmit for RecordingTransport {
    type Error = SerialFault;

    async fn transmit(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        let call = self.calls;
        self.calls += 1;
        if self.fail_on == Some(call) {
            return Err(SerialFault);
        }
        self.trace.record(Op::Frame(frame.as_bytes().to_vec()));
        Ok(())
    }
}

pub fn transport_parts(trace: &Trace) -> (MockLine, MockDelay) {
    (
        MockLine {
            trace: trace.clone(),
            fail_output: false,
            fail_acquire: false,
            fail_write: false,
        },
        MockDelay {
            trace: trace.clone(),
        },
    )
}
