//! Watchdog hop 2.
//!
//! Argument contract: `tsc-files-monitor <owner-pid> <temp-config-path>`.
//!
//! Polls once per second for the owner's liveness and deletes the temp
//! config once the owner is gone. Exits unconditionally after 60 seconds to
//! bound the worst-case leaked-process lifetime, even if the owner still
//! appears alive.

use std::time::{Duration, Instant};
use tsc_files_rs::process::is_running;

const POLL_INTERVAL: Duration = Duration::from_secs(1);
const HARD_TIMEOUT: Duration = Duration::from_secs(60);

fn main() {
    let mut args = std::env::args().skip(1);
    let (Some(owner_pid), Some(temp_path)) = (args.next(), args.next()) else {
        eprintln!("usage: tsc-files-monitor <owner-pid> <temp-config-path>");
        std::process::exit(2);
    };
    let Ok(owner_pid) = owner_pid.parse::<u32>() else {
        eprintln!("invalid owner pid: {owner_pid}");
        std::process::exit(2);
    };

    let deadline = Instant::now() + HARD_TIMEOUT;
    while Instant::now() < deadline {
        std::thread::sleep(POLL_INTERVAL);
        if !is_running(owner_pid) {
            // Deleting an already-missing file is a no-op, not an error.
            let _ = std::fs::remove_file(&temp_path);
            break;
        }
    }
}
