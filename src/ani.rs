//! Collaborators the receive path drives but does not implement
//!
//! Adaptive noise immunity (ANI) retunes receiver sensitivity from PHY error rates, and the MIB
//! counters are the MAC's hardware statistics block. Both live elsewhere in the driver; the
//! receive path only tells them when reception starts and stops, and which PHY errors it saw.

use crate::rx::RxStatus;

/// Adaptive noise immunity hooks used by the receive path.
pub trait NoiseImmunity {
    /// Resets the noise immunity history.
    ///
    /// `restart` is `true` when reception is (re)starting from scratch rather than being
    /// periodically re-evaluated.
    fn reset(&mut self, restart: bool);

    /// Accounts for a frame that failed with a PHY error.
    ///
    /// Only called when the hardware has no PHY error counters of its own and the error is not
    /// a radar report.
    fn report_phy_error(&mut self, status: &RxStatus);
}

/// Hardware MIB statistics counters.
pub trait MibCounters {
    /// Lets the counters run.
    fn enable(&mut self);

    /// Freezes the counters.
    fn disable(&mut self);
}
