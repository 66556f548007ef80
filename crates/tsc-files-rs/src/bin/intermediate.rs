//! Watchdog hop 1.
//!
//! Argument contract: `tsc-files-intermediate <owner-pid> <temp-config-path>`.
//!
//! Re-spawns the monitor detached with the same two arguments and exits
//! immediately, so the delete obligation no longer lives in the owner's
//! process tree and survives a kill of that whole tree.

use std::process::Command;
use tsc_files_rs::process::spawn_detached;

const MONITOR_BIN: &str = "tsc-files-monitor";

fn main() {
    let mut args = std::env::args().skip(1);
    let (Some(owner_pid), Some(temp_path)) = (args.next(), args.next()) else {
        eprintln!("usage: tsc-files-intermediate <owner-pid> <temp-config-path>");
        std::process::exit(2);
    };
    if owner_pid.parse::<u32>().is_err() {
        eprintln!("invalid owner pid: {owner_pid}");
        std::process::exit(2);
    }

    let monitor = match std::env::current_exe() {
        Ok(exe) => exe.with_file_name(format!("{MONITOR_BIN}{}", std::env::consts::EXE_SUFFIX)),
        Err(_) => std::process::exit(1),
    };

    let mut command = Command::new(monitor);
    command.arg(owner_pid).arg(temp_path);
    if spawn_detached(command).is_err() {
        std::process::exit(1);
    }
}
