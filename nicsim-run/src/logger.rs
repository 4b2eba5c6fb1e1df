use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Writes every enabled record to stderr, one line each.
struct Stderr;

static LOGGER: Stderr = Stderr;

impl Log for Stderr {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:>5}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Install the stderr sink.
///
/// Verbose runs report every packet, otherwise only warnings get through.
pub fn init(verbose: bool) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(if verbose { LevelFilter::Trace } else { LevelFilter::Warn });
    Ok(())
}
