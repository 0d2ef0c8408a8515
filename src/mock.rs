//! Simulated MAC for tests

use crate::{rx::RxStatus, Builder, Controller, MibCounters, NoiseImmunity, Register, RegisterPort};
use crate::regs::cr;
use core::cell::{Cell, RefCell};
use embedded_hal::blocking::delay::DelayUs;
use std::collections::BTreeMap;
use std::vec::Vec;

/// Register file with just enough `Cr` and `RxDp` behaviour to exercise the receive path.
pub struct MockPort {
    registers: RefCell<BTreeMap<Register, u32>>,
    reads: RefCell<BTreeMap<Register, usize>>,
    writes: RefCell<Vec<(Register, u32)>>,
    // Reads of `Cr` that still show RXE after a disable request; `None` never stops
    stop_after: Option<usize>,
    stop_countdown: Cell<Option<usize>>,
    drop_rx_dp_writes: bool,
}

impl MockPort {
    pub fn new() -> Self {
        MockPort {
            registers: RefCell::new(BTreeMap::new()),
            reads: RefCell::new(BTreeMap::new()),
            writes: RefCell::new(Vec::new()),
            stop_after: Some(0),
            stop_countdown: Cell::new(None),
            drop_rx_dp_writes: false,
        }
    }

    /// RXE stays set for `polls` reads of `Cr` after a disable request.
    pub fn stops_after(mut self, polls: usize) -> Self {
        self.stop_after = Some(polls);
        self
    }

    /// The DMA engine ignores disable requests.
    pub fn never_stops(mut self) -> Self {
        self.stop_after = None;
        self
    }

    /// Writes to `RxDp` don't take effect.
    pub fn drops_rx_dp_writes(mut self) -> Self {
        self.drop_rx_dp_writes = true;
        self
    }

    /// Presets a register without recording a write.
    pub fn preset(&self, register: Register, value: u32) {
        self.registers.borrow_mut().insert(register, value);
    }

    /// Current register value, without counting a read.
    pub fn peek(&self, register: Register) -> u32 {
        self.registers.borrow().get(&register).copied().unwrap_or(0)
    }

    pub fn reads(&self, register: Register) -> usize {
        self.reads.borrow().get(&register).copied().unwrap_or(0)
    }

    /// Every write in order.
    pub fn writes(&self) -> Vec<(Register, u32)> {
        self.writes.borrow().clone()
    }

    pub fn clear_log(&self) {
        self.reads.borrow_mut().clear();
        self.writes.borrow_mut().clear();
    }
}

impl RegisterPort for MockPort {
    fn read(&self, register: Register) -> u32 {
        *self.reads.borrow_mut().entry(register).or_insert(0) += 1;

        if register == Register::Cr {
            if let Some(remaining) = self.stop_countdown.get() {
                if remaining == 0 {
                    self.stop_countdown.set(None);
                    let rxe_cleared = self.peek(Register::Cr) & !cr::RXE;
                    self.preset(Register::Cr, rxe_cleared);
                } else {
                    self.stop_countdown.set(Some(remaining - 1));
                }
            }
        }

        self.peek(register)
    }

    fn write(&self, register: Register, value: u32) {
        self.writes.borrow_mut().push((register, value));

        match register {
            Register::Cr => {
                // Command bits are write-one; only RXE is reflected on read.
                let mut state = self.peek(Register::Cr);
                if value & cr::RXE != 0 {
                    state |= cr::RXE;
                    self.stop_countdown.set(None);
                }
                if value & cr::RXD != 0 {
                    self.stop_countdown.set(self.stop_after);
                }
                self.preset(Register::Cr, state);
            }
            Register::RxDp if self.drop_rx_dp_writes => {}
            _ => self.preset(register, value),
        }
    }
}

#[derive(Default)]
pub struct MockNoiseImmunity {
    pub resets: Vec<bool>,
    pub reports: Vec<RxStatus>,
}

impl NoiseImmunity for MockNoiseImmunity {
    fn reset(&mut self, restart: bool) {
        self.resets.push(restart);
    }

    fn report_phy_error(&mut self, status: &RxStatus) {
        self.reports.push(status.clone());
    }
}

#[derive(Default)]
pub struct MockMib {
    pub enabled: bool,
    pub enables: usize,
    pub disables: usize,
}

impl MibCounters for MockMib {
    fn enable(&mut self) {
        self.enabled = true;
        self.enables += 1;
    }

    fn disable(&mut self) {
        self.enabled = false;
        self.disables += 1;
    }
}

/// Delay that only keeps count.
#[derive(Default)]
pub struct MockDelay {
    elapsed_us: u64,
    calls: usize,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed_us(&self) -> u64 {
        self.elapsed_us
    }

    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl DelayUs<u32> for MockDelay {
    fn delay_us(&mut self, us: u32) {
        self.elapsed_us += us as u64;
        self.calls += 1;
    }
}

pub type MockController = Controller<MockPort, MockNoiseImmunity, MockMib, MockDelay>;

pub fn controller(builder: Builder, port: MockPort) -> MockController {
    builder.freeze(
        port,
        MockNoiseImmunity::default(),
        MockMib::default(),
        MockDelay::new(),
    )
}
