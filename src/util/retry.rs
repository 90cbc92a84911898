//! Bounded retry with fixed backoff for transient filesystem failures
//!
//! Toolchain directories can be briefly locked by another process (antivirus
//! scans, an unpacker still holding handles). Probes retry a few times with
//! a short pause before giving up; nothing else in the pipeline retries.

use std::thread;
use std::time::Duration;
use tracing::debug;

/// Runs `op` up to `attempts` times, sleeping `delay` between attempts.
/// Returns the first success, or the last error once attempts are exhausted.
pub fn with_backoff<T, E>(
    attempts: u32,
    delay: Duration,
    mut op: impl FnMut() -> Result<T, E>,
) -> Result<T, E> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        match op() {
            Ok(value) => return Ok(value),
            Err(err) if attempt < attempts => {
                debug!(attempt, "Retrying after transient failure");
                thread::sleep(delay);
                let _ = err;
            }
            Err(err) => return Err(err),
        }
    }
}
