//! Run a packet file through a simulated network interface.
//!
//! Call example:
//!
//! * `nicsim params.txt packets.txt`
//! * `nicsim -v --ignore-checksums params.txt packets.txt`
use std::process;

use nicsim::sim::Simulator;
use nicsim_run::config::{Config, Parameters};
use nicsim_run::{ConfigError, Report};

fn main() {
    let config = Config::from_args();

    if let Err(err) = run(&config) {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

fn run(config: &Config) -> Result<(), ConfigError> {
    if nicsim_run::init_logger(config.verbose).is_err() {
        eprintln!("[!] Logger already installed");
    }

    let params = Parameters::load(&config.param_file)?;
    let mut sim = Simulator::new(params.into_interface(config.checksum()));
    let stats = nicsim_run::simulate_file(&mut sim, &config.packet_file)?;
    log::info!("{}", stats);

    print!("{}", Report::from_simulator(&sim));
    Ok(())
}
