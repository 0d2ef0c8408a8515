//! HAL for the receive path of the Atheros AR5212 wireless MAC
//!
//! This crate drives the receive DMA engine, the protocol control unit (PCU) receive gate and
//! the receive filters, and decodes completed receive descriptors into [`rx::RxStatus`]
//! records.
//!
//! All hardware access goes through the [`RegisterPort`] capability. On a real system this is
//! an [`MmioPort`] over the mapped register window; tests substitute a simulated register file.
//!
//! # Usage
//!
//! ```ignore
//! let port = unsafe { MmioPort::new(bar0) };
//! let mut mac = Builder::new()
//!     .self_linked_rx(true)
//!     .freeze(port, ani, mib, delay);
//!
//! mac.setup_rx_desc(&mut ring[0], BUFFER_SIZE, true);
//! mac.set_rx_dp(ring_base);
//! mac.enable_receive();
//! mac.start_pcu_receive();
//!
//! match mac.proc_rx_desc(&ring[0], ring_base, &ring[1], tsf) {
//!     Ok(status) => deliver(status),
//!     Err(nb::Error::WouldBlock) => {}
//!     Err(nb::Error::Other(never)) => void::unreachable(never),
//! }
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

pub mod ani;
mod builder;
mod controller;
pub mod regs;
pub mod rx;

#[cfg(test)]
mod mock;

pub use ani::{MibCounters, NoiseImmunity};
pub use builder::Builder;
pub use controller::Controller;
pub use regs::{MmioPort, Register, RegisterPort};
