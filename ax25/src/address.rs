use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Reserved bits of an SSID octet (bits 5 and 6), always set on transmit.
pub(crate) const RESERVED_BITS: u8 = 0b0110_0000;
/// Command/response bit (bit 7) of the destination and source SSID octets.
/// Exactly one of the two is set in every frame.
pub(crate) const COMMAND_BIT: u8 = 0b1000_0000;
/// Address-extension bit (bit 0). Clear on an octet means more address
/// octets follow; set marks the last octet of the address field.
pub(crate) const EXTENSION_BIT: u8 = 0b0000_0001;

const CALLSIGN_MIN: usize = 2;
const CALLSIGN_MAX: usize = 6;

/// Raised when a station identifier fails the callsign/SSID grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("the ax.25 address `{0}` is invalid")]
pub struct InvalidAddress(pub String);

/// A station identifier: a callsign of 2 to 6 uppercase alphanumeric
/// characters plus a secondary station ID in `0..=15`.
///
/// Parsed from the text forms `CALL` and `CALL-SSID`; a missing suffix
/// means SSID 0. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationId {
    callsign: String,
    ssid: u8,
}

impl StationId {
    pub fn callsign(&self) -> &str {
        &self.callsign
    }

    pub fn ssid(&self) -> u8 {
        self.ssid
    }

    /// Packs the station into the 7-octet sub-address wire form: six
    /// space-padded callsign characters shifted left one bit, then the SSID
    /// octet (SSID in bits 1-4, reserved bits set). The C and extension
    /// bits are left clear for [`AddressField`] to place.
    fn to_octets(&self) -> [u8; 7] {
        let mut octets = [b' ' << 1; 7];
        for (slot, ch) in octets.iter_mut().zip(self.callsign.bytes()) {
            *slot = ch << 1;
        }
        octets[6] = (self.ssid << 1) | RESERVED_BITS;
        octets
    }

    /// Inverse of the wire packing: shifts the callsign characters back
    /// right, trims the space padding and reads the SSID out of bits 1-4.
    /// The C and extension bits are ignored.
    pub fn from_octets(octets: &[u8; 7]) -> Result<Self, InvalidAddress> {
        let callsign: String = octets[..6].iter().map(|&b| (b >> 1) as char).collect();
        let callsign = callsign.trim_end();
        let ssid = (octets[6] >> 1) & 0x0F;
        match ssid {
            0 => callsign.parse(),
            ssid => format!("{callsign}-{ssid}").parse(),
        }
    }
}

impl FromStr for StationId {
    type Err = InvalidAddress;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidAddress(s.to_string());
        let (callsign, suffix) = match s.split_once('-') {
            Some((callsign, suffix)) => (callsign, Some(suffix)),
            None => (s, None),
        };
        if callsign.len() < CALLSIGN_MIN || callsign.len() > CALLSIGN_MAX {
            return Err(invalid());
        }
        if !callsign
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            return Err(invalid());
        }
        let ssid = match suffix {
            None => 0,
            Some(suffix) => parse_ssid(suffix).ok_or_else(invalid)?,
        };
        Ok(StationId {
            callsign: callsign.to_string(),
            ssid,
        })
    }
}

/// SSID suffix grammar: a single digit, or `10` through `15`. Leading
/// zeros and longer strings are rejected.
fn parse_ssid(suffix: &str) -> Option<u8> {
    match suffix.as_bytes() {
        [d] if d.is_ascii_digit() => Some(d - b'0'),
        [b'1', d @ b'0'..=b'5'] => Some(10 + (d - b'0')),
        _ => None,
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ssid {
            0 => write!(f, "{}", self.callsign),
            ssid => write!(f, "{}-{}", self.callsign, ssid),
        }
    }
}

/// The packed 14-octet AX.25 address field: destination sub-address in
/// octets 0-6, source sub-address in octets 7-13.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressField([u8; 14]);

impl AddressField {
    /// Parses both station identifiers and packs them into the address
    /// field. Fails with [`InvalidAddress`] if either identifier does not
    /// match the grammar.
    pub fn encode(
        source: &str,
        destination: &str,
        is_command: bool,
        more_addresses_follow: bool,
    ) -> Result<Self, InvalidAddress> {
        let destination: StationId = destination.parse()?;
        let source: StationId = source.parse()?;
        Ok(Self::from_stations(
            &source,
            &destination,
            is_command,
            more_addresses_follow,
        ))
    }

    /// Packs two already-parsed stations. Cannot fail.
    ///
    /// `is_command` places the C bit on the destination SSID octet and a
    /// response places it on the source SSID octet. `more_addresses_follow`
    /// leaves the extension bit clear so a digipeater path can continue the
    /// address field after octet 13.
    pub fn from_stations(
        source: &StationId,
        destination: &StationId,
        is_command: bool,
        more_addresses_follow: bool,
    ) -> Self {
        let mut octets = [0u8; 14];
        octets[..7].copy_from_slice(&destination.to_octets());
        octets[7..].copy_from_slice(&source.to_octets());

        if is_command {
            octets[6] |= COMMAND_BIT;
        } else {
            octets[13] |= COMMAND_BIT;
        }

        if !more_addresses_follow {
            octets[13] |= EXTENSION_BIT;
        }

        AddressField(octets)
    }

    pub fn as_octets(&self) -> &[u8; 14] {
        &self.0
    }

    pub fn destination(&self) -> Result<StationId, InvalidAddress> {
        let mut sub = [0u8; 7];
        sub.copy_from_slice(&self.0[..7]);
        StationId::from_octets(&sub)
    }

    pub fn source(&self) -> Result<StationId, InvalidAddress> {
        let mut sub = [0u8; 7];
        sub.copy_from_slice(&self.0[7..]);
        StationId::from_octets(&sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(s: &str) -> StationId {
        s.parse().unwrap()
    }

    #[test]
    fn parse_without_suffix_defaults_to_ssid_zero() {
        let id = station("N7LEM");
        assert_eq!(id.callsign(), "N7LEM");
        assert_eq!(id.ssid(), 0);
    }

    #[test]
    fn parse_with_suffix() {
        assert_eq!(station("VK7NTK-1").ssid(), 1);
        assert_eq!(station("ID-15").ssid(), 15);
        assert_eq!(station("N7LEM-0").ssid(), 0);
        assert_eq!(station("AB1CDE-9").callsign(), "AB1CDE");
    }

    #[test]
    fn parse_rejects_bad_callsigns() {
        assert!("A".parse::<StationId>().is_err());
        assert!("TOOLONG7".parse::<StationId>().is_err());
        assert!("vk7ntk-5".parse::<StationId>().is_err());
        assert!("VK7N K".parse::<StationId>().is_err());
        assert!("-1".parse::<StationId>().is_err());
        assert!("".parse::<StationId>().is_err());
    }

    #[test]
    fn parse_rejects_bad_ssids() {
        assert!("VK7NTK-16".parse::<StationId>().is_err());
        assert!("VK7NTK-".parse::<StationId>().is_err());
        assert!("VK7NTK-04".parse::<StationId>().is_err());
        assert!("VK7NTK--1".parse::<StationId>().is_err());
        assert!("VK7NTK-1-2".parse::<StationId>().is_err());
    }

    #[test]
    fn display_round_trips_the_text_form() {
        assert_eq!(station("N7LEM").to_string(), "N7LEM");
        assert_eq!(station("N7LEM-4").to_string(), "N7LEM-4");
    }

    #[test]
    fn command_frame_address_vector() {
        let field = AddressField::encode("N7LEM", "NJ7P", true, false).unwrap();
        assert_eq!(
            field.as_octets(),
            &[
                0x9c, 0x94, 0x6e, 0xa0, 0x40, 0x40, 0xe0, //
                0x9c, 0x6e, 0x98, 0x8a, 0x9a, 0x40, 0x61,
            ]
        );
    }

    #[test]
    fn response_frame_moves_the_c_bit() {
        let field = AddressField::encode("N7LEM", "NJ7P", false, false).unwrap();
        assert_eq!(
            field.as_octets(),
            &[
                0x9c, 0x94, 0x6e, 0xa0, 0x40, 0x40, 0x60, //
                0x9c, 0x6e, 0x98, 0x8a, 0x9a, 0x40, 0xe1,
            ]
        );
    }

    #[test]
    fn source_ssid_lands_in_the_last_octet() {
        let field = AddressField::encode("N7LEM-4", "NJ7P", true, false).unwrap();
        let base = AddressField::encode("N7LEM", "NJ7P", true, false).unwrap();
        assert_eq!(field.as_octets()[13], 0x69);
        assert_eq!(field.as_octets()[..13], base.as_octets()[..13]);
    }

    #[test]
    fn destination_ssid_fifteen() {
        let field = AddressField::encode("N7LEM", "NJ7P-15", false, false).unwrap();
        assert_eq!(field.as_octets()[6], 0x7e);
        assert_eq!(field.as_octets()[13], 0xe1);
    }

    #[test]
    fn extension_bit_clear_when_a_path_follows() {
        let last = AddressField::encode("N7LEM", "NJ7P", true, false).unwrap();
        let more = AddressField::encode("N7LEM", "NJ7P", true, true).unwrap();
        assert_eq!(last.as_octets()[13] & EXTENSION_BIT, EXTENSION_BIT);
        assert_eq!(more.as_octets()[13] & EXTENSION_BIT, 0);
    }

    #[test]
    fn exactly_one_c_bit_is_set() {
        for is_command in [true, false] {
            let field = AddressField::encode("N7LEM", "NJ7P", is_command, false).unwrap();
            let dst = field.as_octets()[6] & COMMAND_BIT;
            let src = field.as_octets()[13] & COMMAND_BIT;
            assert_ne!(dst, src);
        }
    }

    #[test]
    fn reserved_bits_always_set() {
        let field = AddressField::encode("N7LEM-4", "NJ7P-15", false, true).unwrap();
        assert_eq!(field.as_octets()[6] & RESERVED_BITS, RESERVED_BITS);
        assert_eq!(field.as_octets()[13] & RESERVED_BITS, RESERVED_BITS);
    }

    #[test]
    fn packed_addresses_decode_back() {
        let field = AddressField::encode("N7LEM-4", "NJ7P", true, false).unwrap();
        assert_eq!(field.destination().unwrap(), station("NJ7P"));
        assert_eq!(field.source().unwrap(), station("N7LEM-4"));
    }
}
