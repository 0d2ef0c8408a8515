use crate::{regs::diag_sw, Controller, MibCounters, NoiseImmunity, Register, RegisterPort};
use embedded_hal::blocking::delay::DelayUs;

impl<P, A, M, D> Controller<P, A, M, D>
where
    P: RegisterPort,
    A: NoiseImmunity,
    M: MibCounters,
    D: DelayUs<u32>,
{
    /// Lets the PCU accept frames again, restarting the MIB counters and noise immunity.
    pub fn start_pcu_receive(&mut self) {
        #[cfg(feature = "defmt")]
        defmt::trace!("Controller::start_pcu_receive()");

        self.port.modify(Register::DiagSw, |v| v & !diag_sw::RX_DIS);
        self.mib.enable();
        self.ani.reset(true);
    }

    /// Pauses frame acceptance at the PCU and freezes the MIB counters.
    ///
    /// The DMA engine is left running.
    pub fn stop_pcu_receive(&mut self) {
        #[cfg(feature = "defmt")]
        defmt::trace!("Controller::stop_pcu_receive()");

        self.port.modify(Register::DiagSw, |v| v | diag_sw::RX_DIS);
        self.mib.disable();
    }
}
