/// Poll/final bit of the control octet (bit 4).
pub(crate) const POLL_FINAL_BIT: u8 = 0b0001_0000;

/// Send and receive sequence numbers count modulo 8.
pub(crate) const SEQUENCE_MODULUS: u8 = 8;

/// How [`ControlField::to_byte`] renders the control octet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlStyle {
    /// Order-dependent legacy rendering: an in-range send sequence number
    /// replaces the whole octet, discarding the receive sequence and
    /// poll/final bits written before it. Kept for wire compatibility
    /// with encoders that behave this way.
    #[default]
    Overwrite,
    /// Standard I-frame layout: N(R) in bits 5-7, P/F in bit 4, N(S) in
    /// bits 1-3, bit 0 clear.
    Combined,
}

/// Inputs for the control octet of the numbered information frame shape.
///
/// Sequence numbers of 8 or above are tolerated and ignored, never
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlField {
    pub receive_seq: u8,
    pub send_seq: u8,
    pub poll_final: bool,
}

impl ControlField {
    pub fn new(receive_seq: u8, send_seq: u8, poll_final: bool) -> Self {
        ControlField {
            receive_seq,
            send_seq,
            poll_final,
        }
    }

    pub fn to_byte(&self, style: ControlStyle) -> u8 {
        match style {
            ControlStyle::Overwrite => self.to_byte_overwrite(),
            ControlStyle::Combined => self.to_byte_combined(),
        }
    }

    fn to_byte_overwrite(&self) -> u8 {
        let mut byte = 0u8;
        if self.receive_seq < SEQUENCE_MODULUS {
            byte = self.receive_seq << 5;
        }
        if self.poll_final {
            byte |= POLL_FINAL_BIT;
        } else {
            byte &= !POLL_FINAL_BIT;
        }
        // An in-range N(S) replaces everything written above.
        if self.send_seq < SEQUENCE_MODULUS {
            byte = self.send_seq << 1;
        }
        byte
    }

    fn to_byte_combined(&self) -> u8 {
        let mut byte = 0u8;
        if self.receive_seq < SEQUENCE_MODULUS {
            byte |= self.receive_seq << 5;
        }
        if self.poll_final {
            byte |= POLL_FINAL_BIT;
        }
        if self.send_seq < SEQUENCE_MODULUS {
            byte |= self.send_seq << 1;
        }
        byte
    }
}
