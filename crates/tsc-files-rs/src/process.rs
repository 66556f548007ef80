//! Process liveness probing and detached spawning.

use std::process::{Child, Command, Stdio};

/// Returns whether the process with `pid` is still alive.
///
/// The probe is a no-op signal delivery. A permission error means the
/// process exists but belongs to someone else, so it counts as alive; any
/// other failure means it is gone.
#[cfg(unix)]
pub fn is_running(pid: u32) -> bool {
    let ret = unsafe { libc::kill(pid as libc::pid_t, 0) };
    if ret == 0 {
        return true;
    }
    std::io::Error::last_os_error().raw_os_error() == Some(libc::EPERM)
}

/// Returns whether the process with `pid` is still alive.
///
/// Mirrors the unix probe: an access-denied handle means the process exists
/// but is inaccessible, so it counts as alive; any other failure means it is
/// gone.
#[cfg(windows)]
pub fn is_running(pid: u32) -> bool {
    use windows_sys::Win32::Foundation::{CloseHandle, GetLastError, ERROR_ACCESS_DENIED};
    use windows_sys::Win32::System::Threading::{
        GetExitCodeProcess, OpenProcess, PROCESS_QUERY_LIMITED_INFORMATION,
    };

    const STILL_ACTIVE: u32 = 259;

    unsafe {
        let handle = OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, 0, pid);
        if handle == 0 {
            return GetLastError() == ERROR_ACCESS_DENIED;
        }
        let mut code: u32 = 0;
        let ok = GetExitCodeProcess(handle, &mut code);
        CloseHandle(handle);
        ok != 0 && code == STILL_ACTIVE
    }
}

/// Spawns `command` fully detached: null stdio, its own session (unix) or
/// its own console-less process group (Windows), and never waited on.
pub fn spawn_detached(mut command: Command) -> std::io::Result<Child> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        unsafe {
            command.pre_exec(|| {
                if libc::setsid() == -1 {
                    return Err(std::io::Error::last_os_error());
                }
                Ok(())
            });
        }
    }

    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        use windows_sys::Win32::System::Threading::{
            CREATE_NEW_PROCESS_GROUP, DETACHED_PROCESS,
        };
        command.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
    }

    command.spawn()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_running_for_own_process() {
        assert!(is_running(std::process::id()));
    }

    #[test]
    fn test_is_running_for_exited_process() {
        let mut child = Command::new(if cfg!(windows) { "cmd" } else { "true" })
            .args(if cfg!(windows) { &["/C", "exit"][..] } else { &[][..] })
            .stdout(Stdio::null())
            .spawn()
            .unwrap();
        let pid = child.id();
        child.wait().unwrap();

        // The pid is freed once reaped; the probe must report it gone.
        assert!(!is_running(pid));
    }

    #[test]
    fn test_spawn_detached_runs_to_completion() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("marker");

        let mut command = Command::new(if cfg!(windows) { "cmd" } else { "sh" });
        if cfg!(windows) {
            command.args(["/C", &format!("type nul > {}", marker.display())]);
        } else {
            command.args(["-c", &format!("touch '{}'", marker.display())]);
        }

        spawn_detached(command).unwrap();

        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        while !marker.exists() && std::time::Instant::now() < deadline {
            std::thread::sleep(std::time::Duration::from_millis(20));
        }
        assert!(marker.exists());
    }
}
