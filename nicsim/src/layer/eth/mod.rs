//! The link layer, accepting frames for this station.
//!
//! Frames only ever enter the pipeline. The network packet inside an accepted frame is validated
//! and routed like any other network packet, the frame itself is never queued.
use crate::nic::Interface;
use crate::wire::EthernetRepr;
use super::{ip, Error, Outcome, Result};


/// A link layer frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Packet {
    repr: EthernetRepr,
}

impl Packet {
    /// Parse the frame text.
    pub fn parse(text: &str) -> Self {
        Packet { repr: EthernetRepr::parse(text) }
    }

    /// Wrap an already parsed representation.
    pub fn new(repr: EthernetRepr) -> Self {
        Packet { repr }
    }

    /// The parsed fields.
    pub fn repr(&self) -> &EthernetRepr {
        &self.repr
    }

    /// Check that the frame is addressed to this station and is intact.
    ///
    /// There is no broadcast, only the exact hardware address of the interface is accepted.
    pub fn check(&self, nic: &Interface) -> Result<()> {
        if self.repr.dst_addr != nic.identity().mac {
            return Err(Error::NotForUs);
        }

        if nic.checksum().manual() && !self.repr.verify_checksum() {
            return Err(Error::WrongChecksum);
        }

        Ok(())
    }

    /// Check whether the frame is accepted.
    pub fn validate(&self, nic: &Interface) -> bool {
        self.check(nic).is_ok()
    }

    /// Strip the frame and route the network packet inside.
    pub fn process(&mut self, nic: &mut Interface) -> Result<Outcome> {
        let mut inner = ip::Packet::parse(&self.repr.payload);
        inner.check(nic)?;
        inner.process(nic)
    }

    /// Frames are not serializable, only the packets they carry are queued.
    pub fn serialize(&self) -> Result<String> {
        Err(Error::Unserializable)
    }
}
