use core::slice;

use crate::layer::{Error, Result};

/// Size of the memory window of every open port.
pub const MEMORY_LEN: usize = 64;

/// A declared communication channel and the memory that its payloads land in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenPort {
    /// Port of the remote sender.
    pub src_port: u16,

    /// Local port receiving the data.
    pub dst_port: u16,

    memory: [u8; MEMORY_LEN],
}

/// The table of open ports, in declaration order.
///
/// Port pairs are not required to be unique. Lookups always resolve to the first matching
/// declaration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ports {
    ports: Vec<OpenPort>,
}

impl OpenPort {
    /// Open a channel with zeroed memory.
    pub fn new(src_port: u16, dst_port: u16) -> Self {
        OpenPort {
            src_port,
            dst_port,
            memory: [0; MEMORY_LEN],
        }
    }

    /// The current content of the memory window.
    pub fn memory(&self) -> &[u8; MEMORY_LEN] {
        &self.memory
    }

    /// Check if no byte was ever written with a non-zero value.
    pub fn is_zeroed(&self) -> bool {
        self.memory.iter().all(|&b| b == 0)
    }

    /// Whether the channel is the one between the given ports.
    pub fn matches(&self, src_port: u16, dst_port: u16) -> bool {
        self.src_port == src_port && self.dst_port == dst_port
    }

    /// Store bytes starting at `offset`.
    ///
    /// Bytes that would extend past the end of the window are discarded. An offset outside of the
    /// window is rejected without writing anything. Returns the number of bytes stored.
    pub fn write(&mut self, offset: usize, bytes: &[u8]) -> Result<usize> {
        let window = self.memory
            .get_mut(offset..)
            .filter(|window| !window.is_empty())
            .ok_or(Error::OutOfBounds)?;
        let len = window.len().min(bytes.len());
        window[..len].copy_from_slice(&bytes[..len]);
        Ok(len)
    }
}

impl Ports {
    /// An empty table.
    pub fn new() -> Self {
        Ports::default()
    }

    /// Declare another open port.
    pub fn push(&mut self, port: OpenPort) {
        self.ports.push(port);
    }

    /// Find the first channel between the given ports.
    pub fn find(&self, src_port: u16, dst_port: u16) -> Option<&OpenPort> {
        self.ports.iter().find(|port| port.matches(src_port, dst_port))
    }

    /// Find the first channel between the given ports, for writing.
    pub fn find_mut(&mut self, src_port: u16, dst_port: u16) -> Option<&mut OpenPort> {
        self.ports.iter_mut().find(|port| port.matches(src_port, dst_port))
    }

    /// Iterate over all ports in declaration order.
    pub fn iter(&self) -> slice::Iter<'_, OpenPort> {
        self.ports.iter()
    }

    /// The number of declared ports.
    pub fn len(&self) -> usize {
        self.ports.len()
    }

    /// Check if no port was declared.
    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }
}

impl From<Vec<OpenPort>> for Ports {
    fn from(ports: Vec<OpenPort>) -> Self {
        Ports { ports }
    }
}

impl core::iter::FromIterator<OpenPort> for Ports {
    fn from_iter<I: IntoIterator<Item = OpenPort>>(iter: I) -> Self {
        Ports { ports: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a Ports {
    type Item = &'a OpenPort;
    type IntoIter = slice::Iter<'a, OpenPort>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
