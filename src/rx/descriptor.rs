/// Largest buffer length the descriptor's length field can hold.
pub const MAX_BUFFER_LENGTH: u32 = 0x0000_0FFF;

const WORDS: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Word {
    Link = 0,
    Data = 1,
    Ctl0 = 2,
    Ctl1 = 3,
    Status0 = 4,
    Status1 = 5,
}

/// A bit field within one descriptor word.
#[derive(Clone, Copy, Debug)]
struct Field {
    word: Word,
    shift: u32,
    width: u32,
}

impl Field {
    const fn new(word: Word, shift: u32, width: u32) -> Self {
        Field { word, shift, width }
    }

    const fn mask(self) -> u32 {
        (((1u64 << self.width) - 1) as u32) << self.shift
    }

    fn get(self, words: &[u32; WORDS]) -> u32 {
        (words[self.word as usize] & self.mask()) >> self.shift
    }

    fn is_set(self, words: &[u32; WORDS]) -> bool {
        self.get(words) != 0
    }

    fn set(self, words: &mut [u32; WORDS], value: u32) {
        let word = &mut words[self.word as usize];
        *word = (*word & !self.mask()) | ((value << self.shift) & self.mask());
    }
}

// Control words
const BUFFER_LENGTH: Field = Field::new(Word::Ctl1, 0, 12);
const RX_INTERRUPT_REQUEST: Field = Field::new(Word::Ctl1, 13, 1);

// Status word 0
const DATA_LENGTH: Field = Field::new(Word::Status0, 0, 12);
const MORE: Field = Field::new(Word::Status0, 12, 1);
const RATE: Field = Field::new(Word::Status0, 15, 5);
const SIGNAL_STRENGTH: Field = Field::new(Word::Status0, 20, 8);
const ANTENNA: Field = Field::new(Word::Status0, 28, 4);

// Status word 1. NOTE: the PHY error code shares bits with the key index fields; which one is
// meaningful depends on the PHY error bit.
const DONE: Field = Field::new(Word::Status1, 0, 1);
const FRAME_RECEIVE_OK: Field = Field::new(Word::Status1, 1, 1);
const CRC_ERROR: Field = Field::new(Word::Status1, 2, 1);
const DECRYPT_CRC_ERROR: Field = Field::new(Word::Status1, 3, 1);
const PHY_ERROR: Field = Field::new(Word::Status1, 4, 1);
const MICHAEL_ERROR: Field = Field::new(Word::Status1, 5, 1);
const KEY_INDEX_VALID: Field = Field::new(Word::Status1, 8, 1);
const PHY_ERROR_CODE: Field = Field::new(Word::Status1, 8, 8);
const KEY_INDEX: Field = Field::new(Word::Status1, 9, 7);
const TIMESTAMP: Field = Field::new(Word::Status1, 16, 15);

/// Receive descriptor, shared between software and the MAC's DMA engine.
///
/// Layout: link, data, two control words and two status words. Software owns link, data and
/// the control words; the hardware writes the status words and sets the done bit last.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct RxDescriptor {
    // NOTE: Only read or write these using volatile operations
    words: [u32; WORDS],
}

impl RxDescriptor {
    pub const fn new() -> Self {
        RxDescriptor { words: [0; WORDS] }
    }

    /// Snapshot of the whole descriptor.
    pub fn read(&self) -> RxDescriptorReader {
        RxDescriptorReader(self.load_all())
    }

    /// Whether the hardware has finished with this descriptor.
    pub fn is_done(&self) -> bool {
        let mut words = [0; WORDS];
        words[Word::Status1 as usize] = self.load(Word::Status1);
        DONE.is_set(&words)
    }

    pub fn modify<F: FnOnce(RxDescriptorWriter) -> RxDescriptorWriter>(&mut self, f: F) {
        let result = f(RxDescriptorWriter(self.load_all()));
        self.store_all(result.0);
    }

    /// Writes the descriptor starting from all zeroes.
    pub fn write<F: FnOnce(RxDescriptorWriter) -> RxDescriptorWriter>(&mut self, f: F) {
        let result = f(RxDescriptorWriter([0; WORDS]));
        self.store_all(result.0);
    }

    /// Overwrites the status words the way the DMA engine does on completion.
    #[cfg(test)]
    pub(crate) fn complete(&mut self, status0: u32, status1: u32) {
        self.store(Word::Status0, status0);
        self.store(Word::Status1, status1);
    }

    fn load(&self, word: Word) -> u32 {
        unsafe { core::ptr::read_volatile(&self.words[word as usize]) }
    }

    #[cfg(test)]
    fn store(&mut self, word: Word, value: u32) {
        unsafe { core::ptr::write_volatile(&mut self.words[word as usize], value) }
    }

    fn load_all(&self) -> [u32; WORDS] {
        let mut words = [0; WORDS];
        for (index, word) in words.iter_mut().enumerate() {
            *word = unsafe { core::ptr::read_volatile(&self.words[index]) };
        }
        words
    }

    fn store_all(&mut self, words: [u32; WORDS]) {
        // Status last, so a completed status is never paired with stale control words.
        for (index, word) in words.iter().enumerate() {
            unsafe { core::ptr::write_volatile(&mut self.words[index], *word) };
        }
    }
}

impl Default for RxDescriptor {
    fn default() -> Self {
        Self::new()
    }
}

pub struct RxDescriptorReader([u32; WORDS]);
impl RxDescriptorReader {
    /// Physical address of the next descriptor in the ring.
    pub fn link(&self) -> u32 {
        self.0[Word::Link as usize]
    }

    /// Physical address of the receive buffer.
    pub fn data(&self) -> u32 {
        self.0[Word::Data as usize]
    }

    pub fn buffer_length(&self) -> u32 {
        BUFFER_LENGTH.get(&self.0)
    }

    pub fn is_interrupt_requested(&self) -> bool {
        RX_INTERRUPT_REQUEST.is_set(&self.0)
    }

    pub fn data_length(&self) -> u16 {
        DATA_LENGTH.get(&self.0) as u16
    }

    pub fn has_more(&self) -> bool {
        MORE.is_set(&self.0)
    }

    pub fn rate(&self) -> u8 {
        RATE.get(&self.0) as u8
    }

    pub fn signal_strength(&self) -> u8 {
        SIGNAL_STRENGTH.get(&self.0) as u8
    }

    pub fn antenna(&self) -> u8 {
        ANTENNA.get(&self.0) as u8
    }

    pub fn is_done(&self) -> bool {
        DONE.is_set(&self.0)
    }

    pub fn is_frame_ok(&self) -> bool {
        FRAME_RECEIVE_OK.is_set(&self.0)
    }

    pub fn has_crc_error(&self) -> bool {
        CRC_ERROR.is_set(&self.0)
    }

    pub fn has_decrypt_crc_error(&self) -> bool {
        DECRYPT_CRC_ERROR.is_set(&self.0)
    }

    pub fn has_phy_error(&self) -> bool {
        PHY_ERROR.is_set(&self.0)
    }

    pub fn has_michael_error(&self) -> bool {
        MICHAEL_ERROR.is_set(&self.0)
    }

    /// Key cache index used to decrypt the frame, if the hardware found one.
    pub fn key_index(&self) -> Option<u8> {
        if KEY_INDEX_VALID.is_set(&self.0) {
            Some(KEY_INDEX.get(&self.0) as u8)
        } else {
            None
        }
    }

    /// Only meaningful when [`has_phy_error`](Self::has_phy_error) is set.
    pub fn phy_error_code(&self) -> u8 {
        PHY_ERROR_CODE.get(&self.0) as u8
    }

    /// Low 15 bits of the TSF at reception.
    pub fn timestamp(&self) -> u16 {
        TIMESTAMP.get(&self.0) as u16
    }
}

/// Updates the software owned part of a descriptor.
pub struct RxDescriptorWriter([u32; WORDS]);
impl RxDescriptorWriter {
    pub fn set_link(mut self, address: u32) -> Self {
        self.0[Word::Link as usize] = address;
        self
    }

    pub fn set_data(mut self, address: u32) -> Self {
        self.0[Word::Data as usize] = address;
        self
    }

    pub fn clear_control(mut self) -> Self {
        self.0[Word::Ctl0 as usize] = 0;
        self.0[Word::Ctl1 as usize] = 0;
        self
    }

    pub fn set_buffer_length(mut self, length: u32) -> Self {
        if length & !MAX_BUFFER_LENGTH != 0 {
            panic!("Receive buffer length {:#x} does not fit the descriptor", length);
        }
        BUFFER_LENGTH.set(&mut self.0, length);
        self
    }

    pub fn set_interrupt_request(mut self) -> Self {
        RX_INTERRUPT_REQUEST.set(&mut self.0, 1);
        self
    }

    pub fn clear_interrupt_request(mut self) -> Self {
        RX_INTERRUPT_REQUEST.set(&mut self.0, 0);
        self
    }

    /// Zeroes both status words, including the done bit.
    pub fn clear_status(mut self) -> Self {
        self.0[Word::Status0 as usize] = 0;
        self.0[Word::Status1 as usize] = 0;
        self
    }
}
