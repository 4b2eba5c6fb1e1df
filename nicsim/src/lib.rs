//! The inbound packet pipeline of a single, simulated network interface card.
//!
//! ## Table of contents
//!
//! 1. [Design](#design)
//! 2. [The wire module](wire/index.html)
//! 3. [The layers](layer/index.html)
//!    1. [Link](layer/eth/index.html)
//!    1. [Network](layer/ip/index.html)
//!    1. [Transport](layer/transport/index.html)
//! 4. [The interface state](nic/index.html)
//! 5. [Driving a simulation](sim/index.html)
//!
//! ## Design
//!
//! Packets arrive as single lines of text. Each line is classified purely by its syntax into one
//! of three layers, validated against the identity of the interface, processed, and finally placed
//! into exactly one destination: the receive queue (RQ), the transmit queue (TQ), or the memory
//! window of an open port. Processing a lower layer strips it and delegates to the layer it
//! encapsulates, so a link frame ends up in the queues as its (possibly rewritten) network packet.
//!
//! The representation of packet text lives in [`wire`], separated from the routing decisions in
//! [`layer`]. Parsing of packet text never fails: malformed numeric fields degrade to zero and the
//! packet will simply not pass validation. All state of the interface is held by a
//! [`nic::Interface`] that is threaded explicitly through every call, there is no global state.
//!
//! With the `log` feature enabled, every dropped packet is reported at debug level together with
//! the reason for dropping it.
//!
//! [`wire`]: wire/index.html
//! [`layer`]: layer/index.html
//! [`nic::Interface`]: nic/struct.Interface.html
#![warn(missing_docs)]
#![warn(unreachable_pub)]

#[macro_use] mod macros;
pub mod layer;
pub mod nic;
pub mod sim;
pub mod wire;
