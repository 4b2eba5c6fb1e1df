use std::io;
use std::path::PathBuf;

use nicsim::wire::ethernet::ParseAddressError;
use nicsim::wire::ipv4::ParseCidrError;
use thiserror::Error;

/// A fatal problem with the inputs of a run.
///
/// Raised before any packet is processed, except for read errors in the middle of the packet file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An input file could not be opened.
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        /// The file as given on the command line.
        path: PathBuf,
        /// Why opening failed.
        source: io::Error,
    },

    /// Reading from an opened file failed.
    #[error("read failed: {0}")]
    Read(#[from] io::Error),

    /// The parameter file ended before a required line.
    #[error("missing {0} line")]
    Missing(&'static str),

    /// The first line is not a mac address.
    #[error("line {line}: invalid mac address: {source}")]
    Mac {
        /// One-based line number.
        line: usize,
        /// The parse failure.
        source: ParseAddressError,
    },

    /// The second line is not an address with prefix length.
    #[error("line {line}: invalid ip address: {source}")]
    Cidr {
        /// One-based line number.
        line: usize,
        /// The parse failure.
        source: ParseCidrError,
    },

    /// A port line does not have the form `LABEL:src,LABEL:dst`.
    #[error("line {line}: invalid open port {text:?}")]
    Port {
        /// One-based line number.
        line: usize,
        /// The offending line.
        text: String,
    },
}

/// The result of loading inputs.
pub type Result<T> = std::result::Result<T, ConfigError>;
