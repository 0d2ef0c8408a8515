use super::RxError;
use crate::{
    regs::{cr, wait},
    Controller, MibCounters, NoiseImmunity, Register, RegisterPort,
};
use embedded_hal::blocking::delay::DelayUs;
use fugit::MicrosDurationU32;

/// How long [`Controller::stop_dma_receive`] waits for the engine to go idle.
pub const RX_STOP_DMA_TIMEOUT: MicrosDurationU32 = MicrosDurationU32::from_ticks(10_000);

impl<P, A, M, D> Controller<P, A, M, D>
where
    P: RegisterPort,
    A: NoiseImmunity,
    M: MibCounters,
    D: DelayUs<u32>,
{
    /// Physical address of the descriptor the DMA engine will use next.
    pub fn get_rx_dp(&self) -> u32 {
        self.port.read(Register::RxDp)
    }

    /// Points the DMA engine at a descriptor.
    ///
    /// # Panics
    ///
    /// If the register doesn't read back what was written; the MAC is not responding.
    pub fn set_rx_dp(&mut self, address: u32) {
        self.port.write(Register::RxDp, address);

        let readback = self.port.read(Register::RxDp);
        if readback != address {
            #[cfg(feature = "defmt")]
            defmt::error!("RXDP write of {=u32:#x} read back as {=u32:#x}", address, readback);
            panic!("RXDP write of {:#010x} read back as {:#010x}", address, readback);
        }
    }

    /// Starts the receive DMA engine.
    pub fn enable_receive(&mut self) {
        #[cfg(feature = "defmt")]
        defmt::trace!("Controller::enable_receive()");

        self.port.write(Register::Cr, cr::RXE);
    }

    /// Asks the receive DMA engine to stop and waits up to [`RX_STOP_DMA_TIMEOUT`] for it to go
    /// idle.
    pub fn stop_dma_receive(&mut self) -> Result<(), RxError> {
        #[cfg(feature = "defmt")]
        defmt::trace!("Controller::stop_dma_receive()");

        self.port.write(Register::Cr, cr::RXD);
        if wait(
            &self.port,
            &mut self.delay,
            Register::Cr,
            cr::RXE,
            0,
            RX_STOP_DMA_TIMEOUT,
        ) {
            Ok(())
        } else {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "rx dma failed to stop in {}: CR={=u32:#x} DIAG_SW={=u32:#x}",
                RX_STOP_DMA_TIMEOUT,
                self.port.read(Register::Cr),
                self.port.read(Register::DiagSw)
            );
            Err(RxError::DmaStopTimeout)
        }
    }

    /// Receive abort; this MAC has none, so the request always succeeds without effect.
    pub fn set_rx_abort(&mut self, _abort: bool) -> bool {
        true
    }
}
