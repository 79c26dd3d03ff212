//! Logger bootstrap.
//!
//! Logs go to stderr so they never interleave with the table on stdout.
//! Nothing is logged below `warn` unless `TASKLIST_LOG` asks for it.

use flexi_logger::{Logger, LoggerHandle};
use log::debug;

/// Start the logger with the given specification.
///
/// The returned handle must be kept alive for the life of the process.
pub fn init_logging(spec: &str) -> Result<LoggerHandle, String> {
    let handle = Logger::try_with_str(spec)
        .map_err(|err| format!("invalid log specification `{spec}`: {err}"))?
        .log_to_stderr()
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;
    debug!(
        "logging started spec={spec} version={}",
        env!("CARGO_PKG_VERSION")
    );
    Ok(handle)
}
