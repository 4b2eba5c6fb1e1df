use core::fmt;

use nicsim::nic::Ports;
use nicsim::sim::Simulator;
use nicsim::wire::field::Bytes;

/// The final state of a simulation, as printed at the end of a run.
///
/// The memory section is left out entirely while every port memory is still zeroed. The queues
/// are always listed, even when empty.
pub struct Report<'a> {
    ports: &'a Ports,
    rq: &'a [String],
    tq: &'a [String],
}

impl<'a> Report<'a> {
    /// Report on explicit port memory and queues.
    pub fn new(ports: &'a Ports, rq: &'a [String], tq: &'a [String]) -> Self {
        Report { ports, rq, tq }
    }

    /// Report on the current state of a simulation.
    pub fn from_simulator(sim: &'a Simulator) -> Self {
        Report::new(sim.ports(), sim.rq(), sim.tq())
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.ports.iter().any(|port| !port.is_zeroed()) {
            writeln!(f, "LOCAL DRAM:")?;
            for port in self.ports {
                writeln!(f, "{} {}: {}", port.src_port, port.dst_port, Bytes(&port.memory()[..]))?;
            }
            writeln!(f)?;
        }

        writeln!(f, "RQ:")?;
        for packet in self.rq {
            writeln!(f, "{}", packet)?;
        }
        writeln!(f)?;

        writeln!(f, "TQ:")?;
        for packet in self.tq {
            writeln!(f, "{}", packet)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use nicsim::nic::OpenPort;

    #[test]
    fn empty_memory_omitted() {
        let ports = Ports::from(vec![OpenPort::new(1000, 2000)]);
        let rq = vec!["a".to_owned()];
        let report = Report::new(&ports, &rq, &[]).to_string();
        assert_eq!(report, "RQ:\na\n\nTQ:\n");
    }

    #[test]
    fn memory_listed_for_all_ports() {
        let mut ports = Ports::from(vec![OpenPort::new(1000, 2000), OpenPort::new(3000, 4000)]);
        ports.find_mut(1000, 2000).unwrap().write(1, &[0xab]).unwrap();
        let report = Report::new(&ports, &[], &[]).to_string();

        let mut lines = report.lines();
        assert_eq!(lines.next(), Some("LOCAL DRAM:"));
        let first = lines.next().unwrap();
        assert!(first.starts_with("1000 2000: 00 ab 00 "));
        assert_eq!(first.split(": ").nth(1).unwrap().split(' ').count(), 64);
        assert!(lines.next().unwrap().starts_with("3000 4000: 00 00 "));
        assert_eq!(lines.next(), Some(""));
        assert_eq!(lines.next(), Some("RQ:"));
    }
}
