//! Command line front end of the nicsim packet pipeline.
//!
//! Loads the interface parameters, streams a packet file through a [`Simulator`] and prints the
//! final state of the port memory and both queues.
//!
//! [`Simulator`]: ../nicsim/sim/struct.Simulator.html
#![warn(missing_docs)]

mod error;
mod logger;
mod report;

pub mod config;

pub use error::{ConfigError, Result};
pub use logger::init as init_logger;
pub use report::Report;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use nicsim::sim::{Simulator, Stats};

/// Feed every line of a packet file into the simulation.
pub fn simulate_file(sim: &mut Simulator, path: &Path) -> Result<Stats> {
    let file = File::open(path)
        .map_err(|source| ConfigError::Open { path: path.to_owned(), source })?;
    Ok(sim.run(BufReader::new(file))?)
}
