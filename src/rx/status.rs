/// Flattened value of [`RxStatus::key_index`] when no key was used.
pub const RXKEYIX_INVALID: u8 = 0xff;

/// PHY error subcode reported with [`RxFrameError::Phy`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhyErrorCode(pub u8);

impl PhyErrorCode {
    pub const UNDERRUN: Self = PhyErrorCode(0);
    pub const TIMING: Self = PhyErrorCode(1);
    pub const PARITY: Self = PhyErrorCode(2);
    pub const RATE: Self = PhyErrorCode(3);
    pub const LENGTH: Self = PhyErrorCode(4);
    /// Radar pulse detected
    pub const RADAR: Self = PhyErrorCode(5);
    pub const SERVICE: Self = PhyErrorCode(6);
    pub const TOR: Self = PhyErrorCode(7);
    pub const OFDM_TIMING: Self = PhyErrorCode(17);
    pub const OFDM_SIGNAL_PARITY: Self = PhyErrorCode(18);
    pub const OFDM_RATE_ILLEGAL: Self = PhyErrorCode(19);
    pub const OFDM_LENGTH_ILLEGAL: Self = PhyErrorCode(20);
    pub const OFDM_POWER_DROP: Self = PhyErrorCode(21);
    pub const OFDM_SERVICE: Self = PhyErrorCode(22);
    pub const OFDM_RESTART: Self = PhyErrorCode(23);
    pub const CCK_TIMING: Self = PhyErrorCode(25);
    pub const CCK_HEADER_CRC: Self = PhyErrorCode(26);
    pub const CCK_RATE_ILLEGAL: Self = PhyErrorCode(27);
    pub const CCK_SERVICE: Self = PhyErrorCode(30);
    pub const CCK_RESTART: Self = PhyErrorCode(31);

    pub fn is_radar(&self) -> bool {
        *self == Self::RADAR
    }
}

/// Why a frame was not received correctly.
///
/// At most one is reported per frame even when the hardware flags several.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RxFrameError {
    /// Frame check sequence mismatch
    Crc,
    /// Error in the PHY, with its subcode
    Phy(PhyErrorCode),
    /// Decryption failed (ICV mismatch)
    Decrypt,
    /// TKIP Michael MIC failure
    Mic,
}

/// Status of a completed receive descriptor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RxStatus {
    /// Bytes DMA'd into the buffer
    pub data_len: u16,
    /// Low 15 bits of the TSF when the frame arrived
    pub timestamp: u16,
    /// Received signal strength
    pub rssi: i8,
    /// Key cache slot used for decryption
    pub key_index: Option<u8>,
    /// Hardware rate code; the driver maps it through its rate table
    pub rate: u8,
    pub antenna: u8,
    /// Frame continues in the next descriptor
    pub more: bool,
    /// `None` when the frame was received correctly
    pub error: Option<RxFrameError>,
}

impl RxStatus {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// PHY error subcode, when the frame failed in the PHY.
    pub fn phy_error(&self) -> Option<PhyErrorCode> {
        match self.error {
            Some(RxFrameError::Phy(code)) => Some(code),
            _ => None,
        }
    }

    /// Key index with [`RXKEYIX_INVALID`] standing in for no key.
    pub fn raw_key_index(&self) -> u8 {
        self.key_index.unwrap_or(RXKEYIX_INVALID)
    }
}
