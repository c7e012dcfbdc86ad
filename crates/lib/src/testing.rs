//! scripted bus and delay doubles sharing one event log.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;

use crate::bus::{EndTransmission, TwoWire};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Begin,
    SetClock(u32),
    /// A completed (or attempted) transmission.
    Write(u8, Vec<u8>),
    Request(u8, usize),
    /// Nanoseconds waited.
    Delay(u64),
}

#[derive(Default)]
struct Inner {
    events: Vec<Event>,
    responses: VecDeque<Vec<u8>>,
    accept_at_most: Option<usize>,
    nacks: usize,
    over_report: usize,
    pending: Option<(u8, Vec<u8>)>,
    rx: VecDeque<u8>,
}

#[derive(Clone, Default)]
pub struct FakeBus {
    inner: Rc<RefCell<Inner>>,
}

impl FakeBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// A delay that logs into this bus's event log.
    pub fn delay(&self) -> FakeDelay {
        FakeDelay {
            inner: Rc::clone(&self.inner),
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.inner.borrow().events.clone()
    }

    /// Queues the bytes the next `request_from` returns (truncated to what was asked).
    pub fn respond(&self, bytes: &[u8]) {
        self.inner.borrow_mut().responses.push_back(bytes.to_vec());
    }

    /// Every `write` from now on accepts at most `n` bytes.
    pub fn accept_at_most(&self, n: usize) {
        self.inner.borrow_mut().accept_at_most = Some(n);
    }

    /// Every `request_from` claims `extra` more bytes than it actually delivers.
    pub fn over_report(&self, extra: usize) {
        self.inner.borrow_mut().over_report = extra;
    }

    pub fn nack_next_transmission(&self) {
        self.inner.borrow_mut().nacks += 1;
    }

    /// Total nanoseconds waited before the first `Request` in the log.
    pub fn waited_before_read(&self) -> u64 {
        self.inner
            .borrow()
            .events
            .iter()
            .take_while(|e| !matches!(e, Event::Request(..)))
            .map(|e| match e {
                Event::Delay(ns) => *ns,
                _ => 0,
            })
            .sum()
    }
}

impl TwoWire for FakeBus {
    fn begin(&mut self) {
        self.inner.borrow_mut().events.push(Event::Begin);
    }

    fn set_clock(&mut self, hz: u32) {
        self.inner.borrow_mut().events.push(Event::SetClock(hz));
    }

    fn begin_transmission(&mut self, address: u8) {
        self.inner.borrow_mut().pending = Some((address, Vec::new()));
    }

    fn write(&mut self, bytes: &[u8]) -> usize {
        let mut inner = self.inner.borrow_mut();
        let n = inner.accept_at_most.map_or(bytes.len(), |max| bytes.len().min(max));
        if let Some((_, queued)) = inner.pending.as_mut() {
            queued.extend_from_slice(&bytes[..n]);
        }
        n
    }

    fn end_transmission(&mut self) -> Result<(), EndTransmission> {
        let mut inner = self.inner.borrow_mut();
        let (address, bytes) = inner.pending.take().unwrap_or_default();
        inner.events.push(Event::Write(address, bytes));

        if inner.nacks > 0 {
            inner.nacks -= 1;
            return Err(EndTransmission::AddressNack);
        }
        Ok(())
    }

    fn request_from(&mut self, address: u8, count: usize) -> usize {
        let mut inner = self.inner.borrow_mut();
        inner.events.push(Event::Request(address, count));

        let response = inner.responses.pop_front().unwrap_or_default();
        let n = response.len().min(count);
        inner.rx = response.into_iter().take(n).collect();
        n + inner.over_report
    }

    fn read(&mut self) -> Option<u8> {
        self.inner.borrow_mut().rx.pop_front()
    }
}

pub struct FakeDelay {
    inner: Rc<RefCell<Inner>>,
}

impl FakeDelay {
    fn log(&mut self, ns: u64) {
        self.inner.borrow_mut().events.push(Event::Delay(ns));
    }
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log(u64::from(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.log(u64::from(us) * 1_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log(u64::from(ms) * 1_000_000);
    }
}

/// Encodes `words` the way the sensor sends them, each followed by its checksum.
pub fn frame<const N: usize>(words: [u16; N]) -> Vec<u8> {
    words
        .iter()
        .flat_map(|w| {
            let [msb, lsb] = w.to_be_bytes();
            [msb, lsb, crate::checksum(&[msb, lsb])]
        })
        .collect()
}
