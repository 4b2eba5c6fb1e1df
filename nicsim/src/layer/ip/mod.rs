//! The network layer, routing packets between the local segment and the outside.
//!
//! An interface sits between its local network segment and everything beyond. Routing is
//! decided purely by whether each of the two endpoints is local:
//!
//! | source  | destination      | decision                                      |
//! |---------|------------------|-----------------------------------------------|
//! | local   | local            | dropped, the interface is not involved        |
//! | any     | the interface    | delivered to the transport layer              |
//! | local   | remote           | source rewritten, forwarded to transmit queue |
//! | remote  | local            | forwarded to receive queue                    |
//! | remote  | remote           | forwarded to transmit queue                   |
//!
//! Every forwarded packet uses up one hop and gets a fresh checksum.
use crate::nic::Interface;
use crate::wire::{Ipv4Address, Ipv4Cidr, Ipv4Repr};
use super::{transport, Error, Outcome, Result};


/// Check whether an address lies within the network segment of a cidr.
///
/// The host bits of the cidr address are ignored.
pub fn is_local(addr: Ipv4Address, cidr: Ipv4Cidr) -> bool {
    cidr.contains(addr)
}

/// A network packet passing through the interface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Packet {
    repr: Ipv4Repr,
}

impl Packet {
    /// Parse the packet text.
    pub fn parse(text: &str) -> Self {
        Packet { repr: Ipv4Repr::parse(text) }
    }

    /// Wrap an already parsed representation.
    pub fn new(repr: Ipv4Repr) -> Self {
        Packet { repr }
    }

    /// The current fields, including all changes made by processing.
    pub fn repr(&self) -> &Ipv4Repr {
        &self.repr
    }

    /// Check that the packet is alive and, unless ignored, that its checksum matches.
    pub fn check(&self, nic: &Interface) -> Result<()> {
        if self.repr.ttl == 0 {
            return Err(Error::Expired);
        }

        if nic.checksum().manual() && !self.repr.verify_checksum() {
            return Err(Error::WrongChecksum);
        }

        Ok(())
    }

    /// Check whether the packet is ready to be routed.
    pub fn validate(&self, nic: &Interface) -> bool {
        self.check(nic).is_ok()
    }

    /// Make the routing decision.
    ///
    /// Packets for the interface itself are handed to the transport layer unchanged. All others
    /// lose one hop, and the source of outgoing local packets is replaced by the interface
    /// address.
    pub fn process(&mut self, nic: &mut Interface) -> Result<Outcome> {
        let identity = *nic.identity();
        let src_local = identity.is_local(self.repr.src_addr);
        let dst_local = identity.is_local(self.repr.dst_addr);

        if src_local && dst_local {
            return Err(Error::LocalLoop);
        }

        if self.repr.dst_addr == identity.ip() {
            net_trace!("{}: packet for this host, port {}:{}",
                self.repr.src_addr, self.repr.src_port, self.repr.dst_port);
            let mut inner = transport::Packet::parse(&self.repr.transport_text());
            return inner.process(nic);
        }

        self.repr.ttl = self.repr.ttl.saturating_sub(1);
        self.repr.fill_checksum();
        if self.repr.ttl == 0 {
            return Err(Error::Expired);
        }

        if src_local {
            self.repr.src_addr = identity.ip();
            self.repr.fill_checksum();
            Ok(Outcome::Transmit(self.serialize()))
        } else if dst_local {
            Ok(Outcome::Receive(self.serialize()))
        } else {
            Ok(Outcome::Transmit(self.serialize()))
        }
    }

    /// Reproduce the packet text in canonical form.
    pub fn serialize(&self) -> String {
        self.repr.to_string()
    }
}
