//! AX.25 link-layer frame encoding.
//!
//! Builds HDLC-framed AX.25 packets for amateur packet radio: station
//! identifiers packed into the 7-octet wire form, a numbered-information
//! control octet, the protocol identifier, and a CRC-16/X-25 frame check
//! sequence between flag delimiters.
//!
//! ```text
//! Flag | Dest Addr | Src Addr | Control | PID  | Info | FCS | Flag
//! 0x7E |    7B     |    7B    |   1B    | 0xF0 |  nB  | 2B  | 0x7E
//! ```
//!
//! Encoding one frame:
//!
//! ```
//! use ax25::{AddressField, ControlField, ControlStyle, Frame, PID_NONE};
//!
//! let address = AddressField::encode("N7LEM", "NJ7P", true, false)?;
//! let control = ControlField::new(0, 0, false).to_byte(ControlStyle::Combined);
//! let frame = Frame::new(address, control, PID_NONE, b"hello".to_vec());
//! assert_eq!(frame.to_bytes(true)[0], 0x7E);
//! # Ok::<(), ax25::InvalidAddress>(())
//! ```
//!
//! Sequence numbers for numbered frames belong to a [`LinkSession`], one
//! per logical link.

mod address;
mod control;
mod fcs;
mod frame;
mod session;

pub use address::{AddressField, InvalidAddress, StationId};
pub use control::{ControlField, ControlStyle};
pub use fcs::{checksum, fcs};
pub use frame::{FLAG, Frame, PID_NONE};
pub use session::LinkSession;
