//! Addresses, subnets and the textual network layer packet.
use core::fmt;
use core::str::FromStr;
use byteorder::{ByteOrder, NetworkEndian};

use super::field::{self, Bytes, FIELD, OCTET};

/// Number of bytes in the fixed data block of a network packet.
pub const DATA_LEN: usize = 32;

/// A four-octet IPv4 address.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default)]
pub struct Address(pub [u8; 4]);

impl Address {
    /// Construct an IPv4 address from parts.
    pub const fn new(a0: u8, a1: u8, a2: u8, a3: u8) -> Address {
        Address([a0, a1, a2, a3])
    }

    /// Read a dotted decimal address from packet text.
    ///
    /// Octets that are missing or can not be parsed are zero.
    pub fn parse_lenient(text: &str) -> Address {
        Address(field::lenient_octets(text, OCTET, 10))
    }

    /// Return an IPv4 address as a sequence of octets, in big-endian.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Encode the address into a `u32` in network endian byte order.
    pub fn to_network_integer(self) -> u32 {
        NetworkEndian::read_u32(&self.0)
    }

    /// Decode a network endian `u32` into an address.
    pub fn from_network_integer(num: u32) -> Self {
        let mut bytes = [0; 4];
        NetworkEndian::write_u32(&mut bytes, num);
        Address(bytes)
    }

    /// Mask the address to some prefix length.
    ///
    /// Preserves only address bits that are relevant for the prefix length. Whole octets covered
    /// by the prefix are kept, of the octet at the prefix boundary only the top `prefix % 8` bits
    /// remain.
    ///
    /// ```rust
    /// # use nicsim::wire::Ipv4Address as Address;
    /// let base = Address([192, 168, 178, 32]);
    /// assert_eq!(base.mask(24), Address([192, 168, 178, 0]));
    /// assert_eq!(base.mask(20), Address([192, 168, 176, 0]));
    /// ```
    ///
    /// # Panics
    /// This function panics if `prefix` is greater than 32.
    pub fn mask(&self, prefix: u8) -> Address {
        assert!(prefix <= 32);
        let masked_off = (!0u32)
            .checked_shr(prefix.into())
            .unwrap_or(0);
        let as_int = self.to_network_integer() & !masked_off;
        Address::from_network_integer(as_int)
    }
}

impl From<::std::net::Ipv4Addr> for Address {
    fn from(x: ::std::net::Ipv4Addr) -> Address {
        Address(x.octets())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let bytes = self.0;
        write!(f, "{}.{}.{}.{}", bytes[0], bytes[1], bytes[2], bytes[3])
    }
}

/// An IPv4 CIDR host: an address and a variable-length subnet masking prefix length.
///
/// This is how the interface is configured, its own address together with the prefix length of
/// the local network segment.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default)]
pub struct Cidr {
    address:    Address,
    prefix_len: u8,
}

/// An IPv4 CIDR block.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default)]
pub struct Subnet {
    address: Address,
    prefix: u8,
}

impl Cidr {
    /// Create an IPv4 CIDR block from the given address and prefix length.
    ///
    /// # Panics
    /// This function panics if the prefix length is larger than 32.
    pub fn new(address: Address, prefix_len: u8) -> Cidr {
        assert!(prefix_len <= 32);
        Cidr { address, prefix_len }
    }

    /// Return the address of this IPv4 CIDR block.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Return the prefix length of this IPv4 CIDR block.
    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// The subnet containing this address.
    pub fn subnet(self) -> Subnet {
        Subnet::from_cidr(self)
    }

    /// Query whether an address is in the same subnet as the host.
    pub fn contains(&self, address: Address) -> bool {
        self.subnet().contains(address)
    }
}

impl Subnet {
    /// Get the subnet block of a CIDR address.
    pub fn from_cidr(cidr: Cidr) -> Self {
        let address = cidr.address().mask(cidr.prefix_len());

        Subnet {
            address,
            prefix: cidr.prefix_len(),
        }
    }

    /// Query whether a host is contained in the block described by `self`.
    pub fn contains(&self, address: Address) -> bool {
        // Own address is already masked.
        self.address == address.mask(self.prefix)
    }
}

/// Error emitted when parsing an IPv4 CIDR specifier fails.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseCidrError {
    kind: ParseCidrErrorKind,
}

/// The general kind of failure during parsing of an IPv4 CIDR.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ParseCidrErrorKind {
    /// The subnet prefix was missing entirely.
    NoSubnet,

    /// The IPv4 address part is invalid.
    AddrParseError,

    /// The subnet prefix is invalid.
    InvalidPrefix,
}

impl fmt::Display for Cidr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix_len)
    }
}

impl fmt::Display for ParseCidrError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self.kind {
            ParseCidrErrorKind::NoSubnet => "missing subnet prefix separator",
            ParseCidrErrorKind::AddrParseError => "invalid address",
            ParseCidrErrorKind::InvalidPrefix => "invalid cidr prefix",
        })
    }
}

impl std::error::Error for ParseCidrError {}

impl FromStr for Cidr {
    type Err = ParseCidrError;

    fn from_str(src: &str) -> core::result::Result<Self, ParseCidrError> {
        let subnet = src.find('/')
            .ok_or(ParseCidrError {
                kind: ParseCidrErrorKind::NoSubnet,
            })?;
        let address: std::net::Ipv4Addr = src[..subnet]
            .trim()
            .parse()
            .map_err(|_| ParseCidrError {
                kind: ParseCidrErrorKind::AddrParseError,
            })?;
        let prefix_len = src[subnet+1..]
            .trim()
            .parse()
            .map_err(|_| ParseCidrError {
                kind: ParseCidrErrorKind::InvalidPrefix,
            })
            .and_then(|prefix| if prefix <= 32 {
                Ok(prefix)
            } else {
                Err(ParseCidrError {
                    kind: ParseCidrErrorKind::InvalidPrefix,
                })
            })?;
        Ok(Cidr { address: address.into(), prefix_len })
    }
}

/// A high-level representation of a network layer packet.
///
/// The canonical field order is
/// `src_addr|dst_addr|ttl|checksum|src_port|dst_port|address|data`. The ports, the address and
/// the data block are exactly what a transport packet addressed to this host is built from.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Repr {
    /// The sending host.
    pub src_addr: Address,
    /// The receiving host.
    pub dst_addr: Address,
    /// Remaining hops, a packet with zero hops is dead.
    pub ttl: u32,
    /// Sum over all other fields, as stored in the packet.
    pub checksum: u32,
    /// The port of the sending application.
    pub src_port: u16,
    /// The port of the receiving application.
    pub dst_port: u16,
    /// Offset into the memory window of the receiving port.
    pub address: u32,
    /// The carried data.
    pub data: [u8; DATA_LEN],
}

impl Repr {
    /// Parse packet text, degrading every malformed field to zero.
    ///
    /// Data blocks shorter than [`DATA_LEN`] are zero padded and longer ones are truncated.
    ///
    /// [`DATA_LEN`]: constant.DATA_LEN.html
    pub fn parse(text: &str) -> Repr {
        let fields: Vec<&str> = text.split(FIELD).collect();
        Repr {
            src_addr: Address::parse_lenient(field::nth(&fields, 0)),
            dst_addr: Address::parse_lenient(field::nth(&fields, 1)),
            ttl: field::lenient(field::nth(&fields, 2)),
            checksum: field::lenient(field::nth(&fields, 3)),
            src_port: field::lenient(field::nth(&fields, 4)),
            dst_port: field::lenient(field::nth(&fields, 5)),
            address: field::lenient(field::nth(&fields, 6)),
            data: field::lenient_bytes(field::nth(&fields, 7)),
        }
    }

    /// Sum the bytes of all fields except the checksum itself.
    ///
    /// Multi-byte numbers contribute each of their big-endian bytes.
    pub fn compute_checksum(&self) -> u32 {
        let mut ttl = [0; 4];
        let mut src_port = [0; 2];
        let mut dst_port = [0; 2];
        let mut address = [0; 4];
        NetworkEndian::write_u32(&mut ttl, self.ttl);
        NetworkEndian::write_u16(&mut src_port, self.src_port);
        NetworkEndian::write_u16(&mut dst_port, self.dst_port);
        NetworkEndian::write_u32(&mut address, self.address);

        field::byte_sum(self.src_addr.as_bytes().iter()
            .chain(self.dst_addr.as_bytes())
            .chain(&ttl)
            .chain(&src_port)
            .chain(&dst_port)
            .chain(&address)
            .chain(&self.data))
    }

    /// Validate the stored checksum.
    pub fn verify_checksum(&self) -> bool {
        self.checksum == self.compute_checksum()
    }

    /// Recompute and store the checksum.
    pub fn fill_checksum(&mut self) {
        self.checksum = self.compute_checksum();
    }

    /// The text of the transport packet carried for the destination host.
    pub fn transport_text(&self) -> String {
        format!("{}{sep}{}{sep}{}{sep}{}",
            self.src_port, self.dst_port, self.address, Bytes(&self.data),
            sep = FIELD)
    }
}

impl fmt::Display for Repr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{sep}{}{sep}{}{sep}{}{sep}{}",
            self.src_addr, self.dst_addr, self.ttl, self.checksum, self.transport_text(),
            sep = FIELD)
    }
}
