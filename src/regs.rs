//! MAC register map and register access
//!
//! The receive path touches eight registers. Access is abstracted behind [`RegisterPort`] so the
//! same logic runs against the memory mapped register window ([`MmioPort`]) or a simulated
//! register file.

use embedded_hal::blocking::delay::DelayUs;
use fugit::MicrosDurationU32;

/// Registers used by the receive path, valued by their byte offset in the register window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Command register (receive enable/disable)
    Cr = 0x0008,
    /// Receive DMA descriptor pointer
    RxDp = 0x000C,
    /// Receive DMA configuration
    RxCfg = 0x0028,
    /// Base receive filter
    RxFilter = 0x803C,
    /// Multicast filter, slots 0 through 31
    McastFil0 = 0x8040,
    /// Multicast filter, slots 32 through 63
    McastFil1 = 0x8044,
    /// PCU diagnostic switches
    DiagSw = 0x8048,
    /// PHY error frame filter
    PhyErr = 0x810C,
}

impl Register {
    /// Byte offset of the register from the start of the register window.
    pub const fn offset(self) -> usize {
        self as usize
    }
}

/// `Cr` bits
pub mod cr {
    /// Receive DMA enabled; reads back set while the engine is running
    pub const RXE: u32 = 0x0000_0004;
    /// Receive DMA disable request
    pub const RXD: u32 = 0x0000_0020;
}

/// `RxCfg` bits
pub mod rxcfg {
    /// DMA zero length frames (needed to receive PHY error frames)
    pub const ZLFDMA: u32 = 0x0000_0010;
}

/// `DiagSw` bits
pub mod diag_sw {
    /// Pause frame reception at the PCU
    pub const RX_DIS: u32 = 0x0000_0020;
}

/// `PhyErr` bits
pub mod phy_err {
    /// Pass radar PHY errors
    pub const RADAR: u32 = 0x0000_0020;
    /// Pass OFDM timing PHY errors
    pub const OFDM_TIMING: u32 = 0x0002_0000;
    /// Pass CCK timing PHY errors
    pub const CCK_TIMING: u32 = 0x0200_0000;
}

/// Read and write access to the MAC's 32-bit registers.
///
/// Callers serialize all access; implementations do no locking of their own.
pub trait RegisterPort {
    /// Reads a register.
    fn read(&self, register: Register) -> u32;

    /// Writes a register.
    fn write(&self, register: Register, value: u32);

    /// Read-modify-write of a register.
    fn modify<F: FnOnce(u32) -> u32>(&self, register: Register, f: F) {
        let value = self.read(register);
        self.write(register, f(value));
    }
}

impl<P: RegisterPort + ?Sized> RegisterPort for &P {
    fn read(&self, register: Register) -> u32 {
        (**self).read(register)
    }

    fn write(&self, register: Register, value: u32) {
        (**self).write(register, value)
    }
}

/// Register port over a memory mapped register window.
pub struct MmioPort {
    base: *mut u8,
}

impl MmioPort {
    /// Creates a port for the register window starting at `base`.
    ///
    /// # Safety
    ///
    /// `base` must point to the start of the MAC's mapped register window (or memory standing in
    /// for it) that is valid for volatile 32-bit reads and writes at every [`Register`] offset,
    /// and must stay valid for the lifetime of the port.
    pub const unsafe fn new(base: *mut u8) -> Self {
        MmioPort { base }
    }

    /// Start of the register window.
    pub fn base(&self) -> *mut u8 {
        self.base
    }

    fn address(&self, register: Register) -> *mut u32 {
        // NOTE: every register offset is 4 byte aligned, `new` requires `base` to be as well.
        unsafe { self.base.add(register.offset()) as *mut u32 }
    }
}

impl RegisterPort for MmioPort {
    fn read(&self, register: Register) -> u32 {
        unsafe { core::ptr::read_volatile(self.address(register)) }
    }

    fn write(&self, register: Register, value: u32) {
        unsafe { core::ptr::write_volatile(self.address(register), value) }
    }
}

/// Polling interval used by [`wait`].
pub const TIME_QUANTUM: MicrosDurationU32 = MicrosDurationU32::from_ticks(10);

/// Waits for `register & mask` to equal `value`.
///
/// The register is sampled, then the delay sleeps one [`TIME_QUANTUM`], for at most
/// `timeout / TIME_QUANTUM` samples. Returns `false` if the value never matched.
pub fn wait<P, D>(
    port: &P,
    delay: &mut D,
    register: Register,
    mask: u32,
    value: u32,
    timeout: MicrosDurationU32,
) -> bool
where
    P: RegisterPort + ?Sized,
    D: DelayUs<u32>,
{
    let quantum = TIME_QUANTUM.ticks();
    for _ in 0..timeout.ticks() / quantum {
        if port.read(register) & mask == value {
            return true;
        }
        delay.delay_us(quantum);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockDelay, MockPort};
    use fugit::ExtU32;

    #[test]
    fn register_offsets() {
        assert_eq!(Register::Cr.offset(), 0x0008);
        assert_eq!(Register::RxDp.offset(), 0x000C);
        assert_eq!(Register::DiagSw.offset(), 0x8048);
        assert_eq!(Register::PhyErr.offset(), 0x810C);
    }

    #[test]
    fn mmio_port_addresses_words_by_byte_offset() {
        let mut window = vec![0u32; Register::PhyErr.offset() / 4 + 1];
        let port = unsafe { MmioPort::new(window.as_mut_ptr() as *mut u8) };

        port.write(Register::RxDp, 0x1234_5678);
        port.modify(Register::PhyErr, |v| v | phy_err::RADAR);

        assert_eq!(port.read(Register::RxDp), 0x1234_5678);
        assert_eq!(window[Register::RxDp.offset() / 4], 0x1234_5678);
        assert_eq!(window[Register::PhyErr.offset() / 4], phy_err::RADAR);
        assert_eq!(window[Register::Cr.offset() / 4], 0);
    }

    #[test]
    fn wait_returns_immediately_when_already_matching() {
        let port = MockPort::new();
        let mut delay = MockDelay::new();

        assert!(wait(&port, &mut delay, Register::Cr, cr::RXE, 0, 1_000u32.micros()));
        assert_eq!(delay.elapsed_us(), 0);
    }

    #[test]
    fn wait_sleeps_whole_budget_on_mismatch() {
        let port = MockPort::new();
        port.write(Register::RxCfg, rxcfg::ZLFDMA);
        let mut delay = MockDelay::new();

        assert!(!wait(&port, &mut delay, Register::RxCfg, rxcfg::ZLFDMA, 0, 250u32.micros()));
        assert_eq!(delay.elapsed_us(), 250);
        assert_eq!(delay.calls(), 25);
    }

    #[test]
    fn wait_shorter_than_quantum_never_samples() {
        let port = MockPort::new();
        let mut delay = MockDelay::new();

        assert!(!wait(&port, &mut delay, Register::Cr, cr::RXE, 0, 5u32.micros()));
        assert_eq!(port.reads(Register::Cr), 0);
    }
}
