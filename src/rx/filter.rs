use super::RxError;
use crate::{
    regs::{phy_err, rxcfg},
    Controller, MibCounters, NoiseImmunity, Register, RegisterPort,
};
use embedded_hal::blocking::delay::DelayUs;
use paste::paste;

bitflags::bitflags! {
    /// Frames the receive path passes up.
    ///
    /// The low byte maps directly onto the MAC's receive filter register; the PHY error flags
    /// are spread over the PHY error filter.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RxFilter: u32 {
        /// Unicast frames addressed to us
        const UCAST    = 0x0000_0001;
        /// Multicast frames passing the multicast filter
        const MCAST    = 0x0000_0002;
        /// Broadcast frames
        const BCAST    = 0x0000_0004;
        /// Control frames
        const CONTROL  = 0x0000_0008;
        /// Beacons
        const BEACON   = 0x0000_0010;
        /// Everything (promiscuous)
        const PROM     = 0x0000_0020;
        /// XR polls
        const XRPOLL   = 0x0000_0040;
        /// Probe requests
        const PROBEREQ = 0x0000_0080;
        /// OFDM and CCK timing PHY errors
        const PHYERR   = 0x0000_0100;
        /// Radar PHY errors
        const PHYRADAR = 0x0000_0200;
    }
}

const BASE_FILTER_MASK: u32 = 0x0000_00ff;

// Register and bit holding multicast filter slot `index`.
fn multicast_slot(index: u32) -> Result<(Register, u32), RxError> {
    match index {
        0..=31 => Ok((Register::McastFil0, 1 << index)),
        32..=63 => Ok((Register::McastFil1, 1 << (index - 32))),
        _ => Err(RxError::InvalidMulticastIndex(index)),
    }
}

macro_rules! define_multicast_index_function {
    (
        $(#[$attr:meta])*
        $action:ident, $update:expr
    ) => {
        paste! {
            $(#[$attr])*
            pub fn [<$action _multicast_filter_index>](&mut self, index: u32) -> Result<(), RxError> {
                let (register, bit) = multicast_slot(index)?;
                let update: fn(u32, u32) -> u32 = $update;
                self.port.modify(register, |value| update(value, bit));
                Ok(())
            }
        }
    };
}

impl<P, A, M, D> Controller<P, A, M, D>
where
    P: RegisterPort,
    A: NoiseImmunity,
    M: MibCounters,
    D: DelayUs<u32>,
{
    /// Current receive filter, including the PHY error flags.
    pub fn get_rx_filter(&self) -> RxFilter {
        let mut filter = RxFilter::from_bits_retain(self.port.read(Register::RxFilter));

        let phy_bits = self.port.read(Register::PhyErr);
        if phy_bits & phy_err::RADAR != 0 {
            filter |= RxFilter::PHYRADAR;
        }
        if phy_bits & (phy_err::OFDM_TIMING | phy_err::CCK_TIMING) != 0 {
            filter |= RxFilter::PHYERR;
        }
        filter
    }

    /// Programs the receive filter.
    ///
    /// Writes the base filter, then the PHY error filter, then turns zero length frame DMA on
    /// exactly when some PHY error frames are passed.
    pub fn set_rx_filter(&mut self, filter: RxFilter) {
        #[cfg(feature = "defmt")]
        defmt::trace!("Controller::set_rx_filter({=u32:#x})", filter.bits());

        self.port.write(Register::RxFilter, filter.bits() & BASE_FILTER_MASK);

        let mut phy_bits = 0;
        if filter.contains(RxFilter::PHYRADAR) {
            phy_bits |= phy_err::RADAR;
        }
        if filter.contains(RxFilter::PHYERR) {
            phy_bits |= phy_err::OFDM_TIMING | phy_err::CCK_TIMING;
        }
        self.port.write(Register::PhyErr, phy_bits);

        if phy_bits != 0 {
            self.port.modify(Register::RxCfg, |v| v | rxcfg::ZLFDMA);
        } else {
            self.port.modify(Register::RxCfg, |v| v & !rxcfg::ZLFDMA);
        }
    }

    /// Overwrites the whole multicast filter; `lower` holds slots 0..32, `upper` 32..64.
    pub fn set_multicast_filter(&mut self, lower: u32, upper: u32) {
        self.port.write(Register::McastFil0, lower);
        self.port.write(Register::McastFil1, upper);
    }

    define_multicast_index_function!(
        /// Accepts multicast frames hashing to slot `index` (`0..64`).
        set, |value, bit| value | bit
    );

    define_multicast_index_function!(
        /// Stops accepting multicast frames hashing to slot `index` (`0..64`).
        clear, |value, bit| value & !bit
    );
}
