use bitvec::prelude::*;

use crate::address::AddressField;
use crate::fcs;

/*
 * Flag | Address | Control | PID | Info | FCS | Flag
 * 0x7E |   14B   |   1B    | 1B  |  nB  | 2B  | 0x7E
 */

/// HDLC frame delimiter.
pub const FLAG: u8 = 0x7E;

/// PID octet for "no layer 3 protocol", the value APRS traffic uses.
pub const PID_NONE: u8 = 0xF0;

/// One assembled AX.25 frame.
///
/// The frame check sequence is computed over address, control, PID and
/// info when the frame is constructed; serialization only lays the octets
/// out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    address: AddressField,
    control: u8,
    pid: u8,
    info: Vec<u8>,
    fcs: FrameCheckSequence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrameCheckSequence(u16);

impl FrameCheckSequence {
    fn octets(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

impl Frame {
    /// Assembles a frame and computes its check sequence. Payload size is
    /// not validated; link-layer MTU enforcement belongs to the caller.
    pub fn new(address: AddressField, control: u8, pid: u8, info: Vec<u8>) -> Self {
        let mut body = Vec::with_capacity(16 + info.len());
        body.extend_from_slice(address.as_octets());
        body.push(control);
        body.push(pid);
        body.extend_from_slice(&info);
        let fcs = FrameCheckSequence(fcs::checksum(&body));

        Frame {
            address,
            control,
            pid,
            info,
            fcs,
        }
    }

    pub fn address(&self) -> &AddressField {
        &self.address
    }

    pub fn control(&self) -> u8 {
        self.control
    }

    pub fn pid(&self) -> u8 {
        self.pid
    }

    pub fn info(&self) -> &[u8] {
        &self.info
    }

    pub fn fcs(&self) -> u16 {
        self.fcs.0
    }

    /// Everything between the flags: address, control, PID, info, FCS.
    fn content(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(18 + self.info.len());
        bytes.extend_from_slice(self.address.as_octets());
        bytes.push(self.control);
        bytes.push(self.pid);
        bytes.extend_from_slice(&self.info);
        bytes.extend_from_slice(&self.fcs.octets());
        bytes
    }

    /// Serializes the frame. The leading flag is optional because frames
    /// sent back to back may share a delimiter with the previous frame's
    /// trailing flag; the trailing flag is always emitted.
    pub fn to_bytes(&self, with_leading_flag: bool) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(20 + self.info.len());
        if with_leading_flag {
            bytes.push(FLAG);
        }
        bytes.extend(self.content());
        bytes.push(FLAG);
        bytes
    }

    /// Serializes the frame as the on-air bit sequence: the content bits
    /// are stuffed between two unstuffed flags. Bits are ordered least
    /// significant first within each octet, the order HDLC transmits.
    pub fn to_bits(&self) -> BitVec<u8, Lsb0> {
        let content = BitVec::<u8, Lsb0>::from_slice(&self.content());
        let stuffed = bit_stuff(&content);

        let flag = BitVec::<u8, Lsb0>::from_slice(&[FLAG]);
        let mut bits = BitVec::with_capacity(stuffed.len() + 16);
        bits.extend_from_bitslice(&flag);
        bits.extend_from_bitslice(&stuffed);
        bits.extend_from_bitslice(&flag);
        bits
    }
}

/// HDLC bit stuffing: after five consecutive ones, insert a zero.
fn bit_stuff(bits: &BitSlice<u8, Lsb0>) -> BitVec<u8, Lsb0> {
    let mut stuffed = BitVec::with_capacity(bits.len() + bits.len() / 5);
    let mut ones = 0;

    for bit in bits.iter().by_vals() {
        stuffed.push(bit);
        if bit {
            ones += 1;
            if ones == 5 {
                stuffed.push(false);
                ones = 0;
            }
        } else {
            ones = 0;
        }
    }
    stuffed
}
