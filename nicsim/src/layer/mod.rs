//! The process logic of protocol layers.
//!
//! ## Layering
//!
//! Each protocol layer is split into two parts; the packet representation contained in `wire`
//! and the processing part in this module. Every layer offers a `Packet` with the same set of
//! operations:
//!
//! * `check` validates the packet against the [`Interface`] and names the reason for rejecting
//!   it, `validate` is its boolean shorthand.
//! * `process` performs the routing decision, mutates the packet where the decision requires it
//!   and reports where the result belongs as an [`Outcome`].
//! * `serialize` reproduces the packet text, including all mutations.
//!
//! ## Receiving
//!
//! Lower layers do not hand themselves to the queues. A link frame strips its header and
//! delegates to the network packet it carries, and a network packet addressed to this very host
//! strips its header and delegates to the transport packet built from its fields. Each delegation
//! validates the inner packet before processing it. The result of the innermost layer that made a
//! decision is the result of the whole chain.
//!
//! A packet that is rejected anywhere along this chain is *dropped*. Dropping is not exceptional,
//! it is the `Err` arm of [`Result`] carrying an [`Error`] that names the reason.
//!
//! The closed [`Packet`] enum unifies the three layers so that a driver can treat any classified
//! line of text uniformly.
//!
//! [`Interface`]: ../nic/struct.Interface.html
//! [`Outcome`]: enum.Outcome.html
//! [`Result`]: type.Result.html
//! [`Error`]: enum.Error.html
//! [`Packet`]: enum.Packet.html
use core::fmt;

use crate::nic::Interface;

mod classify;
pub mod eth;
pub mod ip;
pub mod transport;

pub use self::classify::{classify, Kind};

/// The result of processing, where `Err` means the packet was dropped.
pub type Result<T> = core::result::Result<T, Error>;

/// The reason for dropping a packet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Error {
    /// The text did not look like a packet of any layer.
    Unrecognized,

    /// A link frame was addressed to another station.
    NotForUs,

    /// The stored checksum does not match the packet content.
    WrongChecksum,

    /// The packet has no hops left.
    ///
    /// Either it arrived dead or its last hop was used up in this interface.
    Expired,

    /// Source and destination are both on the local segment, the packet does not need to pass
    /// through this interface.
    LocalLoop,

    /// No open port matches the port pair of a transport packet.
    NoOpenPort,

    /// The address of a transport packet lies outside of the port memory.
    OutOfBounds,

    /// The payload of a transport packet is not a sequence of hex bytes.
    Malformed,

    /// The packet can not be placed into a queue in its current form.
    ///
    /// Link frames are only ever queued as the network packet they carry.
    Unserializable,
}

/// Where a processed packet belongs.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The payload was already stored into the memory of an open port.
    Local,

    /// Deliver the packet into the local network segment, through the receive queue.
    Receive(String),

    /// Pass the packet on, through the transmit queue.
    Transmit(String),
}

/// A packet of any layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Packet {
    /// A link layer frame.
    Link(eth::Packet),
    /// A network layer packet.
    Network(ip::Packet),
    /// A transport layer packet.
    Transport(transport::Packet),
}

impl Packet {
    /// Classify and parse a line of text.
    ///
    /// Returns `None` if the text is not recognized as any layer.
    pub fn parse(text: &str) -> Option<Self> {
        classify(text).map(|kind| Packet::parse_as(kind, text))
    }

    /// Parse text as a packet of a known layer.
    pub fn parse_as(kind: Kind, text: &str) -> Self {
        match kind {
            Kind::Link => Packet::Link(eth::Packet::parse(text)),
            Kind::Network => Packet::Network(ip::Packet::parse(text)),
            Kind::Transport => Packet::Transport(transport::Packet::parse(text)),
        }
    }

    /// The layer of this packet.
    pub fn kind(&self) -> Kind {
        match self {
            Packet::Link(_) => Kind::Link,
            Packet::Network(_) => Kind::Network,
            Packet::Transport(_) => Kind::Transport,
        }
    }

    /// Validate the packet, naming the reason for rejecting it.
    pub fn check(&self, nic: &Interface) -> Result<()> {
        match self {
            Packet::Link(packet) => packet.check(nic),
            Packet::Network(packet) => packet.check(nic),
            Packet::Transport(packet) => packet.check(nic),
        }
    }

    /// Check whether the packet is valid and ready for processing.
    pub fn validate(&self, nic: &Interface) -> bool {
        self.check(nic).is_ok()
    }

    /// Route the packet and decide where it belongs.
    pub fn process(&mut self, nic: &mut Interface) -> Result<Outcome> {
        match self {
            Packet::Link(packet) => packet.process(nic),
            Packet::Network(packet) => packet.process(nic),
            Packet::Transport(packet) => packet.process(nic),
        }
    }

    /// Reproduce the packet text.
    ///
    /// Fails for link frames, which are never queued themselves.
    pub fn serialize(&self) -> Result<String> {
        match self {
            Packet::Link(packet) => packet.serialize(),
            Packet::Network(packet) => Ok(packet.serialize()),
            Packet::Transport(packet) => Ok(packet.serialize()),
        }
    }
}

/// Can convert from a wire error.
///
/// This indicates some layer tried to decode a part of the packet strictly but failed.
impl From<crate::wire::Error> for Error {
    fn from(err: crate::wire::Error) -> Self {
        match err {
            crate::wire::Error::Malformed => Error::Malformed,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Error::Unrecognized => "unrecognized packet",
            Error::NotForUs => "destination mac mismatch",
            Error::WrongChecksum => "checksum error",
            Error::Expired => "ttl expired",
            Error::LocalLoop => "source and destination both local",
            Error::NoOpenPort => "no open port",
            Error::OutOfBounds => "address out of bounds",
            Error::Malformed => "malformed payload",
            Error::Unserializable => "can not serialize frame",
        })
    }
}

impl std::error::Error for Error {}
