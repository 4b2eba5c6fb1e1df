//! The textual transport layer packet.
use core::fmt;

use super::field::{self, FIELD};
use super::Result;

/// A high-level representation of a transport packet.
///
/// The packet text is `src_port|dst_port|address|payload`. The payload stays in its textual form
/// until it is decoded, so that a malformed payload can still be reproduced verbatim.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Repr {
    /// The port of the sending application.
    pub src_port: u16,
    /// The port of the receiving application.
    pub dst_port: u16,
    /// Offset into the memory window of the receiving port.
    pub address: u32,
    /// Space separated hex bytes.
    pub payload: String,
}

impl Repr {
    /// Parse packet text, degrading malformed numbers to zero.
    ///
    /// Everything after the third separator is payload.
    pub fn parse(text: &str) -> Repr {
        let fields: Vec<&str> = text.splitn(4, FIELD).collect();
        Repr {
            src_port: field::lenient(field::nth(&fields, 0)),
            dst_port: field::lenient(field::nth(&fields, 1)),
            address: field::lenient(field::nth(&fields, 2)),
            payload: field::nth(&fields, 3).to_owned(),
        }
    }

    /// Decode the payload into bytes.
    pub fn payload_bytes(&self) -> Result<Vec<u8>> {
        field::decode_bytes(&self.payload)
    }
}

impl fmt::Display for Repr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{sep}{}{sep}{}{sep}{}",
            self.src_port, self.dst_port, self.address, self.payload,
            sep = FIELD)
    }
}
