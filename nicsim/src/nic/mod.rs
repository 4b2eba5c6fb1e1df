//! The state of the simulated network interface.
//!
//! An [`Interface`] bundles everything the layers consult while processing a packet: the
//! hardware and protocol address of the card, the local network segment, the table of open ports
//! with their memory windows, and whether checksums are enforced. It is created once per run and
//! passed explicitly into every validation (shared) and processing (exclusive) call.
//!
//! [`Interface`]: struct.Interface.html
use crate::wire::{Checksum, EthernetAddress, Ipv4Address, Ipv4Cidr};

mod port;

pub use self::port::{
    OpenPort,
    Ports,
    MEMORY_LEN,
};

/// The addresses of the interface, fixed for a whole run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Identity {
    /// The hardware address that link frames must be sent to.
    pub mac: EthernetAddress,

    /// Own address and the prefix length of the local network segment.
    pub cidr: Ipv4Cidr,
}

/// A network interface card with its open ports.
#[derive(Clone, Debug)]
pub struct Interface {
    identity: Identity,
    ports: Ports,
    checksum: Checksum,
}

impl Identity {
    /// Assemble an identity from its addresses.
    pub fn new(mac: EthernetAddress, cidr: Ipv4Cidr) -> Self {
        Identity { mac, cidr }
    }

    /// The own IPv4 address.
    pub fn ip(&self) -> Ipv4Address {
        self.cidr.address()
    }

    /// Whether an address is inside the local network segment.
    pub fn is_local(&self, addr: Ipv4Address) -> bool {
        crate::layer::ip::is_local(addr, self.cidr)
    }
}

impl Interface {
    /// Create an interface that enforces all checksums.
    pub fn new<P>(identity: Identity, ports: P) -> Self
        where P: Into<Ports>,
    {
        Interface {
            identity,
            ports: ports.into(),
            checksum: Checksum::Manual,
        }
    }

    /// The addresses of this interface.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// The open ports with their memory windows.
    pub fn ports(&self) -> &Ports {
        &self.ports
    }

    /// Mutable access to the open ports.
    pub fn ports_mut(&mut self) -> &mut Ports {
        &mut self.ports
    }

    /// How checksums of incoming packets are treated.
    pub fn checksum(&self) -> Checksum {
        self.checksum
    }

    /// Switch checksum verification, e.g. to `Checksum::Ignored` for debugging.
    pub fn set_checksum(&mut self, checksum: Checksum) {
        self.checksum = checksum;
    }
}
