//! The transport layer, delivering payloads into the memory of open ports.
use crate::nic::{Interface, MEMORY_LEN};
use crate::wire::TransportRepr;
use super::{Error, Outcome, Result};


/// A transport packet addressed to one of the open ports of this host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Packet {
    repr: TransportRepr,
}

impl Packet {
    /// Parse the packet text.
    pub fn parse(text: &str) -> Self {
        Packet { repr: TransportRepr::parse(text) }
    }

    /// Wrap an already parsed representation.
    pub fn new(repr: TransportRepr) -> Self {
        Packet { repr }
    }

    /// The parsed fields.
    pub fn repr(&self) -> &TransportRepr {
        &self.repr
    }

    /// Check that an open port accepts the packet.
    ///
    /// The port pair must match an open port, the address must lie inside its memory window and
    /// the payload must decode. A payload reaching over the end of the window is not an error,
    /// it is cut off when processed.
    pub fn check(&self, nic: &Interface) -> Result<()> {
        let repr = &self.repr;
        if nic.ports().find(repr.src_port, repr.dst_port).is_none() {
            return Err(Error::NoOpenPort);
        }

        if repr.address as usize >= MEMORY_LEN {
            return Err(Error::OutOfBounds);
        }

        repr.payload_bytes()?;
        Ok(())
    }

    /// Check whether the packet would be accepted.
    pub fn validate(&self, nic: &Interface) -> bool {
        self.check(nic).is_ok()
    }

    /// Store the payload into the memory of the matching port.
    ///
    /// Validates again, so that a packet is never partially written.
    pub fn process(&mut self, nic: &mut Interface) -> Result<Outcome> {
        self.check(nic)?;
        let repr = &self.repr;
        let payload = repr.payload_bytes()?;
        let port = nic.ports_mut()
            .find_mut(repr.src_port, repr.dst_port)
            .ok_or(Error::NoOpenPort)?;
        let written = port.write(repr.address as usize, &payload)?;
        net_trace!("port {}:{} stored {} of {} bytes at {}",
            repr.src_port, repr.dst_port, written, payload.len(), repr.address);
        Ok(Outcome::Local)
    }

    /// Reproduce the packet text.
    pub fn serialize(&self) -> String {
        self.repr.to_string()
    }
}
