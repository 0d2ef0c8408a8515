use crate::{Controller, MibCounters, NoiseImmunity, RegisterPort};
use embedded_hal::blocking::delay::DelayUs;

/// Configures and creates a [`Controller`].
pub struct Builder {
    self_linked_rx: bool,
    hw_phy_counters: bool,
}

impl Builder {
    /// Starts from the defaults: the tail safety check follows the `self-linked-rx` feature and
    /// the hardware is assumed to have no PHY error counters.
    pub fn new() -> Self {
        Builder {
            self_linked_rx: cfg!(feature = "self-linked-rx"),
            hw_phy_counters: false,
        }
    }

    /// The receive ring ends in a descriptor linked to itself.
    ///
    /// The hardware may complete that tail descriptor and then pick it up again, so
    /// [`Controller::proc_rx_desc`] additionally requires the DMA engine to have moved on before
    /// handing it out.
    pub fn self_linked_rx(mut self, enabled: bool) -> Self {
        self.self_linked_rx = enabled;
        self
    }

    pub fn has_self_linked_rx(&self) -> bool {
        self.self_linked_rx
    }

    /// The MAC counts PHY errors in hardware, so they don't need reporting to noise immunity
    /// frame by frame.
    pub fn hw_phy_counters(mut self, present: bool) -> Self {
        self.hw_phy_counters = present;
        self
    }

    pub fn has_hw_phy_counters(&self) -> bool {
        self.hw_phy_counters
    }

    /// Creates the controller, taking ownership of its collaborators.
    pub fn freeze<P, A, M, D>(self, port: P, ani: A, mib: M, delay: D) -> Controller<P, A, M, D>
    where
        P: RegisterPort,
        A: NoiseImmunity,
        M: MibCounters,
        D: DelayUs<u32>,
    {
        Controller::new(port, ani, mib, delay, self)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let builder = Builder::new();
        assert_eq!(builder.has_self_linked_rx(), cfg!(feature = "self-linked-rx"));
        assert!(!builder.has_hw_phy_counters());
    }

    #[test]
    fn setters_override_defaults() {
        let builder = Builder::default().self_linked_rx(true).hw_phy_counters(true);
        assert!(builder.has_self_linked_rx());
        assert!(builder.has_hw_phy_counters());

        let builder = builder.self_linked_rx(false);
        assert!(!builder.has_self_linked_rx());
    }
}
