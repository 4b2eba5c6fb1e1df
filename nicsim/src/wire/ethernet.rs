//! MAC addresses and the textual link layer frame.
use core::{fmt, str::FromStr};

use super::field::{self, FIELD, GROUP};

/// A six-octet Ethernet II address.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default)]
pub struct Address(pub [u8; 6]);

impl Address {
    /// Read a colon separated address from packet text.
    ///
    /// Groups that are missing or can not be parsed are zero.
    pub fn parse_lenient(text: &str) -> Address {
        Address(field::lenient_octets(text, GROUP, 16))
    }

    /// Return an Ethernet address as a sequence of octets, in big-endian.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Error emitted when parsing a MAC address from configuration fails.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseAddressError {
    kind: ParseAddressErrorKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ParseAddressErrorKind {
    ComponentError,
    SeparatorError,
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let bytes = self.0;
        write!(f, "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
               bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5])
    }
}

impl fmt::Display for ParseAddressError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self.kind {
            ParseAddressErrorKind::ComponentError => "invalid ethernet component",
            ParseAddressErrorKind::SeparatorError => "unexpected number of ethernet address components (should be 6)",
        })
    }
}

impl std::error::Error for ParseAddressError {}

impl FromStr for Address {
    type Err = ParseAddressError;

    fn from_str(src: &str) -> core::result::Result<Self, ParseAddressError> {
        let mut parsed = [0; 6];
        let mut components = src.trim().split(GROUP);
        for c in parsed.iter_mut() {
            let part = components
                .next()
                .ok_or(ParseAddressError {
                    kind: ParseAddressErrorKind::SeparatorError,
                })?;
            *c = u8::from_str_radix(part, 16)
                .map_err(|_| ParseAddressError {
                    kind: ParseAddressErrorKind::ComponentError,
                })?;
        }

        if components.next().is_some() {
            Err(ParseAddressError {
                kind: ParseAddressErrorKind::SeparatorError,
            })
        } else {
            Ok(Address(parsed))
        }
    }
}

/// A high-level representation of a link layer frame.
///
/// The frame text is `src_addr|dst_addr|<payload>|checksum` where the payload is the complete text
/// of a network packet, including its own field separators. The checksum is the last field and is
/// written in hexadecimal.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Repr {
    /// The sending station.
    pub src_addr: Address,
    /// The receiving station.
    pub dst_addr: Address,
    /// The encapsulated network packet.
    pub payload: String,
    /// Sum over addresses and payload, as stored in the frame.
    pub checksum: u32,
}

impl Repr {
    /// Parse frame text, degrading every malformed field to zero.
    ///
    /// With fewer than four fields there is no payload. The checksum is taken from the last field
    /// once there are at least three.
    pub fn parse(text: &str) -> Repr {
        let fields: Vec<&str> = text.split(FIELD).collect();
        let payload = if fields.len() >= 4 {
            fields[2..fields.len() - 1].join(&FIELD.to_string())
        } else {
            String::new()
        };
        let checksum = if fields.len() >= 3 {
            field::lenient_hex_u32(fields[fields.len() - 1])
        } else {
            0
        };

        Repr {
            src_addr: Address::parse_lenient(field::nth(&fields, 0)),
            dst_addr: Address::parse_lenient(field::nth(&fields, 1)),
            payload,
            checksum,
        }
    }

    /// Sum all address octets and the bytes of the payload text.
    ///
    /// The sum wraps around, arbitrarily long payloads have a checksum as well.
    pub fn compute_checksum(&self) -> u32 {
        field::byte_sum(self.src_addr.as_bytes().iter()
            .chain(self.dst_addr.as_bytes())
            .chain(self.payload.as_bytes()))
    }

    /// Validate the stored checksum.
    pub fn verify_checksum(&self) -> bool {
        self.checksum == self.compute_checksum()
    }

    /// Recompute and store the checksum.
    pub fn fill_checksum(&mut self) {
        self.checksum = self.compute_checksum();
    }
}

impl fmt::Display for Repr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{sep}{}{sep}{}{sep}{:x}",
            self.src_addr, self.dst_addr, self.payload, self.checksum,
            sep = FIELD)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const SRC: Address = Address([0x11, 0x12, 0x13, 0x14, 0x15, 0x16]);
    const DST: Address = Address([0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);

    #[test]
    fn test_address_from_str() {
        assert_eq!("01:02:03:04:05:06".parse(), Ok(DST));
        assert_eq!(DST.to_string(), "01:02:03:04:05:06");
        assert!("01:02:03:04:05".parse::<Address>().is_err());
        assert!("01:02:03:04:05:06:07".parse::<Address>().is_err());
        assert!("01:02:03:04:05:xx".parse::<Address>().is_err());
    }

    #[test]
    fn test_parse() {
        let repr = Repr::parse("11:12:13:14:15:16|01:02:03:04:05:06|10.0.0.2|93.0.0.5|5|ff");
        assert_eq!(repr.src_addr, SRC);
        assert_eq!(repr.dst_addr, DST);
        assert_eq!(repr.payload, "10.0.0.2|93.0.0.5|5");
        assert_eq!(repr.checksum, 0xff);
    }

    #[test]
    fn test_checksum_round_trip() {
        let mut repr = Repr {
            src_addr: SRC,
            dst_addr: DST,
            payload: "1.2.3.4|5.6.7.8".into(),
            checksum: 0,
        };
        repr.fill_checksum();
        let octets: u32 = SRC.0.iter().chain(DST.0.iter()).map(|&b| u32::from(b)).sum();
        let text: u32 = "1.2.3.4|5.6.7.8".bytes().map(u32::from).sum();
        assert_eq!(repr.checksum, octets + text);

        let parsed = Repr::parse(&repr.to_string());
        assert_eq!(parsed, repr);
        assert!(parsed.verify_checksum());
    }

    #[test]
    fn test_checksum_wraps() {
        // 126 * 34_100_000 exceeds u32::MAX by 1_632_704.
        let repr = Repr {
            src_addr: Address::default(),
            dst_addr: Address::default(),
            payload: "~".repeat(34_100_000),
            checksum: 0,
        };
        assert_eq!(repr.compute_checksum(), 1_632_704);
    }

    #[test]
    fn test_parse_short() {
        let repr = Repr::parse("11:12:13:14:15:16|01:02");
        assert_eq!(repr.dst_addr, Address([1, 2, 0, 0, 0, 0]));
        assert_eq!(repr.payload, "");
        assert_eq!(repr.checksum, 0);
    }
}
