//! Driving a stream of packets through an interface.
//!
//! The [`Simulator`] retires one packet completely before it looks at the next one. A line of
//! text is classified, validated, processed and its result placed into a queue, or the packet is
//! dropped at the first step that rejects it. Queues are append-only and keep the order in which
//! packets arrived.
//!
//! ```
//! use nicsim::nic::{Identity, Interface, OpenPort};
//! use nicsim::sim::{Disposition, Simulator};
//!
//! let identity = Identity::new(
//!     "00:11:22:33:44:55".parse().unwrap(),
//!     "10.0.0.1/24".parse().unwrap());
//! let nic = Interface::new(identity, vec![OpenPort::new(1000, 2000)]);
//! let mut sim = Simulator::new(nic);
//!
//! let outgoing = "10.0.0.2|93.0.0.5|5|696|1000|2000|0|41 42";
//! assert_eq!(sim.handle(outgoing), Some(Disposition::EnqueuedTq));
//! assert!(sim.tq()[0].starts_with("10.0.0.1|93.0.0.5|4|"));
//! ```
//!
//! [`Simulator`]: struct.Simulator.html
use core::fmt;
use std::io::{self, BufRead};

use crate::layer::{Error, Outcome, Packet, Result};
use crate::nic::{Interface, Ports};

/// The terminal state of a single packet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Disposition {
    /// Rejected at some step, without any side effect.
    Dropped(Error),
    /// Appended to the receive queue.
    EnqueuedRq,
    /// Appended to the transmit queue.
    EnqueuedTq,
    /// Stored into the memory of an open port.
    DepositedLocal,
}

/// Counts of terminal states over a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Stats {
    /// Packets rejected by any step.
    pub dropped: usize,
    /// Packets appended to the receive queue.
    pub enqueued_rq: usize,
    /// Packets appended to the transmit queue.
    pub enqueued_tq: usize,
    /// Packets stored into port memory.
    pub deposited_local: usize,
}

/// Owns an interface and the queues fed by it.
#[derive(Clone, Debug)]
pub struct Simulator {
    nic: Interface,
    rq: Vec<String>,
    tq: Vec<String>,
    stats: Stats,
}

impl Simulator {
    /// Start a simulation with empty queues.
    pub fn new(nic: Interface) -> Self {
        Simulator {
            nic,
            rq: Vec::new(),
            tq: Vec::new(),
            stats: Stats::default(),
        }
    }

    /// The simulated interface.
    pub fn nic(&self) -> &Interface {
        &self.nic
    }

    /// The open ports and the current contents of their memory.
    pub fn ports(&self) -> &Ports {
        self.nic.ports()
    }

    /// Packets delivered into the local segment, in order of arrival.
    pub fn rq(&self) -> &[String] {
        &self.rq
    }

    /// Packets passed on, in order of arrival.
    pub fn tq(&self) -> &[String] {
        &self.tq
    }

    /// Statistics of all packets handled so far.
    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Retire one line of packet text.
    ///
    /// Trailing whitespace, including a line terminator, is not part of the packet. Blank lines
    /// are skipped and yield `None`.
    pub fn handle(&mut self, line: &str) -> Option<Disposition> {
        let line = line.trim_end();
        if line.trim_start().is_empty() {
            return None;
        }

        let disposition = match self.retire(line) {
            Ok(disposition) => disposition,
            Err(err) => {
                net_debug!("dropped {:?}: {}", line, err);
                Disposition::Dropped(err)
            },
        };

        self.stats.record(disposition);
        Some(disposition)
    }

    /// Handle every line of a reader until it is exhausted.
    ///
    /// Only reading can fail, a malformed packet is simply dropped. Returns the statistics of the
    /// whole simulation so far.
    pub fn run<R: BufRead>(&mut self, reader: R) -> io::Result<Stats> {
        for line in reader.lines() {
            self.handle(&line?);
        }

        Ok(self.stats)
    }

    fn retire(&mut self, line: &str) -> Result<Disposition> {
        let mut packet = Packet::parse(line).ok_or(Error::Unrecognized)?;
        net_trace!("{} packet {:?}", packet.kind(), line);
        packet.check(&self.nic)?;

        match packet.process(&mut self.nic)? {
            Outcome::Local => Ok(Disposition::DepositedLocal),
            Outcome::Receive(text) => {
                net_trace!("rq <- {}", text);
                self.rq.push(text);
                Ok(Disposition::EnqueuedRq)
            },
            Outcome::Transmit(text) => {
                net_trace!("tq <- {}", text);
                self.tq.push(text);
                Ok(Disposition::EnqueuedTq)
            },
        }
    }
}

impl Stats {
    /// Number of packets handled, not counting blank lines.
    pub fn total(&self) -> usize {
        self.dropped + self.enqueued_rq + self.enqueued_tq + self.deposited_local
    }

    fn record(&mut self, disposition: Disposition) {
        match disposition {
            Disposition::Dropped(_) => self.dropped += 1,
            Disposition::EnqueuedRq => self.enqueued_rq += 1,
            Disposition::EnqueuedTq => self.enqueued_tq += 1,
            Disposition::DepositedLocal => self.deposited_local += 1,
        }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} packets: {} rq, {} tq, {} local, {} dropped",
            self.total(), self.enqueued_rq, self.enqueued_tq, self.deposited_local, self.dropped)
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use super::*;
    use crate::nic::{Identity, OpenPort};
    use crate::wire::{EthernetAddress, EthernetRepr, Ipv4Address, Ipv4Cidr, Ipv4Repr};

    const MAC_ADDR_NIC: EthernetAddress = EthernetAddress([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
    const IP_ADDR_NIC: Ipv4Address = Ipv4Address::new(10, 0, 0, 1);

    fn simulator() -> Simulator {
        let identity = Identity::new(MAC_ADDR_NIC, Ipv4Cidr::new(IP_ADDR_NIC, 24));
        Simulator::new(Interface::new(identity, vec![OpenPort::new(1000, 2000)]))
    }

    fn network(src: &str, dst: &str, ttl: u32) -> String {
        let mut repr = Ipv4Repr::parse(&format!("{}|{}|{}|0|1000|2000|0|41 42", src, dst, ttl));
        repr.fill_checksum();
        repr.to_string()
    }

    fn frame(dst_addr: EthernetAddress, payload: &str) -> String {
        let mut repr = EthernetRepr {
            src_addr: EthernetAddress([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]),
            dst_addr,
            payload: payload.into(),
            checksum: 0,
        };
        repr.fill_checksum();
        repr.to_string()
    }

    #[test]
    fn deposit_via_self_addressed() {
        let mut sim = simulator();
        let line = network("93.0.0.5", "10.0.0.1", 5);
        assert_eq!(sim.handle(&line), Some(Disposition::DepositedLocal));

        let memory = sim.ports().find(1000, 2000).unwrap().memory();
        assert_eq!(&memory[..2], &[0x41, 0x42]);
        assert!(sim.rq().is_empty());
        assert!(sim.tq().is_empty());
    }

    #[test]
    fn outgoing_rewritten() {
        let mut sim = simulator();
        let line = "10.0.0.2|93.0.0.5|5|696|1000|2000|0|41 42";
        assert_eq!(sim.handle(line), Some(Disposition::EnqueuedTq));

        let out = Ipv4Repr::parse(&sim.tq()[0]);
        assert_eq!(out.src_addr, IP_ADDR_NIC);
        assert_eq!(out.ttl, 4);
        assert!(out.verify_checksum());
    }

    #[test]
    fn expiring_dropped() {
        let mut sim = simulator();
        let line = network("93.0.0.5", "10.0.0.2", 1);
        assert_eq!(sim.handle(&line), Some(Disposition::Dropped(Error::Expired)));
        assert!(sim.rq().is_empty());
        assert!(sim.tq().is_empty());
    }

    #[test]
    fn frame_for_other_station() {
        let mut sim = simulator();
        let mut other = MAC_ADDR_NIC;
        other.0[5] ^= 0x01;
        let line = frame(other, &network("93.0.0.5", "10.0.0.2", 5));
        assert_eq!(sim.handle(&line), Some(Disposition::Dropped(Error::NotForUs)));
        assert!(sim.rq().is_empty());
        assert!(sim.tq().is_empty());
    }

    #[test]
    fn frame_unwrapped_into_rq() {
        let mut sim = simulator();
        let line = frame(MAC_ADDR_NIC, &network("93.0.0.5", "10.0.0.2", 5));
        assert_eq!(sim.handle(&line), Some(Disposition::EnqueuedRq));
        assert!(sim.rq()[0].starts_with("93.0.0.5|10.0.0.2|4|"));
    }

    #[test]
    fn oversized_frame_dropped() {
        let mut sim = simulator();
        let line = format!("aa:bb:cc:dd:ee:ff|{}|10.0.0.2|93.0.0.5|5|0|1|2|0|{}|0",
            MAC_ADDR_NIC, "~".repeat(40_000_000));
        assert_eq!(sim.handle(&line), Some(Disposition::Dropped(Error::WrongChecksum)));
        assert!(sim.tq().is_empty());
    }

    #[test]
    fn unrecognized_and_blank() {
        let mut sim = simulator();
        assert_eq!(sim.handle(""), None);
        assert_eq!(sim.handle("   \r\n"), None);
        assert_eq!(sim.handle("garbage"), Some(Disposition::Dropped(Error::Unrecognized)));
        assert_eq!(sim.stats().total(), 1);
    }

    #[test]
    fn run_keeps_order() {
        let mut sim = simulator();
        let input = format!("{}\n\n{}\r\n{}\n1000|2000|0|ff\ngarbage\n",
            network("93.0.0.5", "10.0.0.2", 5),
            network("93.0.0.5", "10.0.0.3", 7),
            network("93.0.0.5", "8.8.8.8", 3));

        let stats = sim.run(Cursor::new(input)).unwrap();
        assert_eq!(stats, Stats {
            dropped: 1,
            enqueued_rq: 2,
            enqueued_tq: 1,
            deposited_local: 1,
        });

        let ttls: Vec<u32> = sim.rq().iter().map(|text| Ipv4Repr::parse(text).ttl).collect();
        assert_eq!(ttls, vec![4, 6]);
        assert_eq!(Ipv4Repr::parse(&sim.tq()[0]).ttl, 2);
        assert_eq!(sim.ports().find(1000, 2000).unwrap().memory()[0], 0xff);
    }
}
