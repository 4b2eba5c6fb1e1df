//! Command line arguments and the parameter file.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use structopt::StructOpt;

use nicsim::nic::{Identity, Interface, OpenPort, Ports};
use nicsim::wire::{Checksum, EthernetAddress, Ipv4Cidr};

use crate::error::{ConfigError, Result};

/// Simulate the inbound packet pipeline of a network interface card.
#[derive(Clone, Debug, StructOpt)]
#[structopt(name = "nicsim")]
pub struct Config {
    /// Interface addresses and open ports.
    #[structopt(parse(from_os_str))]
    pub param_file: PathBuf,

    /// One packet per line.
    #[structopt(parse(from_os_str))]
    pub packet_file: PathBuf,

    /// Log the fate of every packet to stderr.
    #[structopt(short = "v", long = "verbose")]
    pub verbose: bool,

    /// Accept packets regardless of their checksum.
    #[structopt(long = "ignore-checksums")]
    pub ignore_checksums: bool,
}

/// The interface described by a parameter file.
///
/// The file consists of the mac address, the ip address with its prefix length, and one line
/// `LABEL:src_port,LABEL:dst_port` for every open port:
///
/// ```text
/// 00:11:22:33:44:55
/// 10.0.0.1/24
/// SRC:1000,DST:2000
/// ```
///
/// Blank lines are ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameters {
    /// The mac address and the local network of the interface.
    pub identity: Identity,
    /// Open ports in declaration order, with zeroed memory.
    pub ports: Ports,
}

impl Config {
    /// Parse the arguments of the process, exiting with usage on error.
    pub fn from_args() -> Self {
        StructOpt::from_args()
    }

    /// The checksum mode selected on the command line.
    pub fn checksum(&self) -> Checksum {
        if self.ignore_checksums {
            Checksum::Ignored
        } else {
            Checksum::Manual
        }
    }
}

impl Parameters {
    /// Read and parse a parameter file.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|source| ConfigError::Open { path: path.to_owned(), source })?;
        Parameters::parse(BufReader::new(file))
    }

    /// Parse parameters from any reader, failing on the first malformed line.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = reader.lines()
            .enumerate()
            .map(|(idx, line)| line.map(|text| (idx + 1, text)))
            .filter(|line| match line {
                Ok((_, text)) => !text.trim().is_empty(),
                Err(_) => true,
            });

        let (line, text) = lines.next().ok_or(ConfigError::Missing("mac address"))??;
        let mac: EthernetAddress = text.parse()
            .map_err(|source| ConfigError::Mac { line, source })?;

        let (line, text) = lines.next().ok_or(ConfigError::Missing("ip address"))??;
        let cidr: Ipv4Cidr = text.parse()
            .map_err(|source| ConfigError::Cidr { line, source })?;

        let mut ports = Ports::new();
        for next in lines {
            let (line, text) = next?;
            match parse_port(&text) {
                Some(port) => ports.push(port),
                None => return Err(ConfigError::Port { line, text }),
            }
        }

        Ok(Parameters {
            identity: Identity::new(mac, cidr),
            ports,
        })
    }

    /// Set up the interface described by the parameters.
    pub fn into_interface(self, checksum: Checksum) -> Interface {
        let mut nic = Interface::new(self.identity, self.ports);
        nic.set_checksum(checksum);
        nic
    }
}

/// Parse `LABEL:src_port,LABEL:dst_port`, where the labels are optional.
fn parse_port(text: &str) -> Option<OpenPort> {
    let mut parts = text.split(',');
    let src_port = port_number(parts.next()?)?;
    let dst_port = port_number(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }

    Some(OpenPort::new(src_port, dst_port))
}

fn port_number(part: &str) -> Option<u16> {
    let value = match part.find(':') {
        Some(colon) => &part[colon + 1..],
        None => part,
    };
    value.trim().parse().ok()
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use super::*;
    use nicsim::wire::Ipv4Address;

    #[test]
    fn parse_parameters() {
        let text = "00:11:22:33:44:55\n10.0.0.1/24\n\nSRC:1000,DST:2000\r\nA:3000,B:4000\n";
        let params = Parameters::parse(Cursor::new(text)).unwrap();
        assert_eq!(params.identity.mac, EthernetAddress([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]));
        assert_eq!(params.identity.ip(), Ipv4Address::new(10, 0, 0, 1));
        assert_eq!(params.identity.cidr.prefix_len(), 24);

        let ports: Vec<(u16, u16)> = params.ports.iter()
            .map(|port| (port.src_port, port.dst_port))
            .collect();
        assert_eq!(ports, vec![(1000, 2000), (3000, 4000)]);
        assert!(params.ports.iter().all(OpenPort::is_zeroed));
    }

    #[test]
    fn no_ports() {
        let params = Parameters::parse(Cursor::new("00:11:22:33:44:55\n10.0.0.1/8")).unwrap();
        assert!(params.ports.is_empty());
    }

    #[test]
    fn malformed_lines() {
        match Parameters::parse(Cursor::new("")) {
            Err(ConfigError::Missing(_)) => {},
            other => panic!("unexpected {:?}", other),
        }
        match Parameters::parse(Cursor::new("00:11:22:33:44\n10.0.0.1/24\n")) {
            Err(ConfigError::Mac { line: 1, .. }) => {},
            other => panic!("unexpected {:?}", other),
        }
        match Parameters::parse(Cursor::new("00:11:22:33:44:55\n10.0.0.1\n")) {
            Err(ConfigError::Cidr { line: 2, .. }) => {},
            other => panic!("unexpected {:?}", other),
        }
        match Parameters::parse(Cursor::new("00:11:22:33:44:55\n10.0.0.1/24\nSRC:1000\n")) {
            Err(ConfigError::Port { line: 3, .. }) => {},
            other => panic!("unexpected {:?}", other),
        }
        match Parameters::parse(Cursor::new("00:11:22:33:44:55\n10.0.0.1/24\nSRC:99999,DST:1\n")) {
            Err(ConfigError::Port { line: 3, .. }) => {},
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn checksum_mode() {
        let config = Config::from_iter_safe(&["nicsim", "params.txt", "packets.txt"]).unwrap();
        assert_eq!(config.checksum(), Checksum::Manual);
        assert!(!config.verbose);

        let config = Config::from_iter_safe(
            &["nicsim", "-v", "--ignore-checksums", "params.txt", "packets.txt"]).unwrap();
        assert_eq!(config.checksum(), Checksum::Ignored);
        assert!(config.verbose);
        assert_eq!(config.packet_file, PathBuf::from("packets.txt"));
    }
}
