use super::{PhyErrorCode, RxDescriptor, RxFrameError, RxStatus};
use crate::{Controller, MibCounters, NoiseImmunity, Register, RegisterPort};
use embedded_hal::blocking::delay::DelayUs;
use void::Void;

impl<P, A, M, D> Controller<P, A, M, D>
where
    P: RegisterPort,
    A: NoiseImmunity,
    M: MibCounters,
    D: DelayUs<u32>,
{
    /// Arms a descriptor to receive into a `size` byte buffer.
    ///
    /// Clears the control words and both status words, so nothing from a previous frame
    /// survives. The link and buffer addresses are left as the ring set them up.
    ///
    /// # Panics
    ///
    /// If `size` exceeds [`MAX_BUFFER_LENGTH`](super::MAX_BUFFER_LENGTH).
    pub fn setup_rx_desc(&self, descriptor: &mut RxDescriptor, size: u32, interrupt: bool) {
        descriptor.modify(|w| {
            let w = w.clear_control().set_buffer_length(size).clear_status();
            if interrupt {
                w.set_interrupt_request()
            } else {
                w
            }
        });
    }

    /// Decodes a descriptor the hardware has completed.
    ///
    /// `address` is the descriptor's physical address and `next` the descriptor after it in the
    /// ring. Returns `WouldBlock` while the hardware still owns the descriptor. With a
    /// self-linked ring the tail descriptor is also held back until the DMA engine has moved
    /// past it. The caller must make sure the descriptor memory it passes is not a stale cached
    /// copy.
    ///
    /// A frame that failed reports exactly one error: CRC, then PHY, then decrypt, then
    /// Michael. The hardware raises Michael errors alongside CRC errors that are not real, so
    /// these are dropped.
    ///
    /// `_tsf` is unused; this MAC reports the raw 15 bit receive timestamp.
    pub fn proc_rx_desc(
        &mut self,
        descriptor: &RxDescriptor,
        address: u32,
        next: &RxDescriptor,
        _tsf: u64,
    ) -> nb::Result<RxStatus, Void> {
        if !descriptor.is_done() {
            return Err(nb::Error::WouldBlock);
        }

        // The hardware may have completed the tail once and picked it up again.
        if self.self_linked_rx && !next.is_done() && self.port.read(Register::RxDp) == address {
            return Err(nb::Error::WouldBlock);
        }

        let r = descriptor.read();
        let mut status = RxStatus {
            data_len: r.data_length(),
            timestamp: r.timestamp(),
            rssi: r.signal_strength() as i8,
            key_index: r.key_index(),
            rate: r.rate(),
            antenna: r.antenna(),
            more: r.has_more(),
            error: None,
        };

        if !r.is_frame_ok() {
            if r.has_crc_error() {
                status.error = Some(RxFrameError::Crc);
            } else if r.has_phy_error() {
                let code = PhyErrorCode(r.phy_error_code());
                status.error = Some(RxFrameError::Phy(code));

                if !self.hw_phy_counters && !code.is_radar() {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("phy error {=u8} reported to ani", code.0);

                    self.ani.report_phy_error(&status);
                }
            } else if r.has_decrypt_crc_error() {
                status.error = Some(RxFrameError::Decrypt);
            } else if r.has_michael_error() {
                status.error = Some(RxFrameError::Mic);
            }
        }

        Ok(status)
    }
}
