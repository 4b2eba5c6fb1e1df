/*! Textual packet representations.

# An overview over packet representations

Every packet travels as one line of text in which fields are separated by `|`. The `wire` module
deals only with this *representation*, never with routing decisions. For each layer it provides a
`Repr` which can be parsed from and emitted into such a line, together with the checksum that
covers its fields.

 * [`ethernet`]: `src_mac|dst_mac|<network packet>|checksum`, MAC addresses as colon separated hex
   octets and the checksum in hexadecimal.
 * [`ipv4`]: `src_ip|dst_ip|ttl|checksum|src_port|dst_port|address|data`, addresses in dotted
   decimal, all numbers in decimal and the data block as 32 space separated hex bytes.
 * [`transport`]: `src_port|dst_port|address|payload` with the payload as space separated hex
   bytes.

Parsing of packet text is lenient. A numeric field that can not be interpreted takes the value
zero and missing fields are treated as empty, see [`field`]. The resulting representation is well
defined in all cases and it is up to validation to reject it. Strict parsing is only offered where
the input is trusted to be correct, such as addresses in the interface configuration.

[`ethernet`]: ethernet/index.html
[`ipv4`]: ipv4/index.html
[`transport`]: transport/index.html
[`field`]: field/index.html
*/

pub mod field;
pub mod ethernet;
pub mod ipv4;
pub mod transport;
mod error;

pub use self::error::{
    Error,
    Result};

pub use self::ethernet::{
    Address as EthernetAddress,
    Repr as EthernetRepr};

pub use self::ipv4::{
    Address as Ipv4Address,
    Cidr as Ipv4Cidr,
    Repr as Ipv4Repr};

pub use self::transport::Repr as TransportRepr;

/// Describes how to handle checksums.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Checksum {
    /// Checksum must be computed and checked.
    Manual,

    /// The checksum is still filled in on emission but never checked.
    ///
    /// Only meant for debugging hand written packet streams.
    Ignored,
}

impl Checksum {
    /// Check if a checksum should be verified by the library.
    pub fn manual(self) -> bool {
        match self {
            Checksum::Manual => true,
            Checksum::Ignored => false,
        }
    }
}

impl Default for Checksum {
    fn default() -> Self {
        Checksum::Manual
    }
}
