use crate::{Builder, MibCounters, NoiseImmunity, RegisterPort};
use embedded_hal::blocking::delay::DelayUs;

/// Receive path of the MAC.
///
/// Owns the register port and the collaborators the receive path drives. The operations are
/// grouped by hardware block in the [`rx`](crate::rx) module: DMA control, the PCU receive gate,
/// receive filters and descriptor processing.
///
/// Every method assumes the caller serializes access to the register space.
pub struct Controller<P, A, M, D> {
    pub(crate) port: P,
    pub(crate) ani: A,
    pub(crate) mib: M,
    pub(crate) delay: D,
    pub(crate) self_linked_rx: bool,
    pub(crate) hw_phy_counters: bool,
}

impl<P, A, M, D> Controller<P, A, M, D>
where
    P: RegisterPort,
    A: NoiseImmunity,
    M: MibCounters,
    D: DelayUs<u32>,
{
    pub(crate) fn new(port: P, ani: A, mib: M, delay: D, builder: Builder) -> Self {
        Controller {
            port,
            ani,
            mib,
            delay,
            self_linked_rx: builder.has_self_linked_rx(),
            hw_phy_counters: builder.has_hw_phy_counters(),
        }
    }

    /// Releases the register port and collaborators.
    pub fn free(self) -> (P, A, M, D) {
        (self.port, self.ani, self.mib, self.delay)
    }

    /// The register port the controller drives.
    pub fn port(&self) -> &P {
        &self.port
    }
}
