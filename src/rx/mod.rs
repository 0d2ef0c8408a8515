//! Receive path: DMA control, PCU gate, receive filters and descriptor processing

mod descriptor;
pub use descriptor::{RxDescriptor, RxDescriptorReader, RxDescriptorWriter, MAX_BUFFER_LENGTH};

mod dma;
pub use dma::RX_STOP_DMA_TIMEOUT;

mod filter;
pub use filter::RxFilter;

mod pcu;

mod receiver;

mod status;
pub use status::{PhyErrorCode, RxFrameError, RxStatus, RXKEYIX_INVALID};

/// Failures of receive path operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RxError {
    /// The receive DMA engine was still running when the stop timeout expired.
    DmaStopTimeout,
    /// Multicast filter slot outside `0..64`.
    InvalidMulticastIndex(u32),
}
