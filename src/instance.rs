//! PID-file guard keeping a single tray instance per user.

use crate::error::{Result, SpeechError};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Our claim on the PID file; removed again on drop.
#[derive(Debug)]
pub struct InstanceGuard {
    pid_file: PathBuf,
}

impl InstanceGuard {
    /// Terminate any earlier instance recorded in `pid_file`, then record ours.
    pub fn acquire(app_name: &str, pid_file: &Path) -> Result<Self> {
        if let Some(pid) = running_instance(pid_file) {
            info!("Stopping previous {app_name} instance (PID: {pid})");
            terminate(pid)?;
        }

        fs::write(pid_file, std::process::id().to_string())?;
        info!("{app_name} started (PID: {})", std::process::id());

        Ok(Self {
            pid_file: pid_file.to_path_buf(),
        })
    }
}

impl Drop for InstanceGuard {
    fn drop(&mut self) {
        // Only remove the file if it still names us
        if read_pid(&self.pid_file) == Some(std::process::id()) {
            fs::remove_file(&self.pid_file).ok();
        }
    }
}

fn read_pid(pid_file: &Path) -> Option<u32> {
    fs::read_to_string(pid_file).ok()?.trim().parse().ok()
}

/// PID of another live instance, cleaning up stale or garbled files.
pub fn running_instance(pid_file: &Path) -> Option<u32> {
    let content = fs::read_to_string(pid_file).ok()?;

    let Ok(pid) = content.trim().parse::<u32>() else {
        warn!("Invalid PID file content: '{}', cleaning up", content.trim());
        fs::remove_file(pid_file).ok();
        return None;
    };

    if pid == std::process::id() {
        return None;
    }

    if !is_alive(pid) {
        warn!("Found stale PID file for process {pid}, cleaning up");
        fs::remove_file(pid_file).ok();
        return None;
    }

    Some(pid)
}

#[cfg(unix)]
fn is_alive(pid: u32) -> bool {
    let Ok(pid) = i32::try_from(pid) else {
        return false;
    };
    // Signal 0 only checks that the process exists
    unsafe { libc::kill(pid, 0) == 0 }
}

#[cfg(not(unix))]
fn is_alive(_pid: u32) -> bool {
    false
}

#[cfg(unix)]
pub fn terminate(pid: u32) -> Result<()> {
    let pid = i32::try_from(pid)
        .map_err(|_| SpeechError::Platform(format!("PID {pid} out of range")))?;

    unsafe {
        if libc::kill(pid, libc::SIGTERM) != 0 {
            return Err(SpeechError::Platform(format!(
                "Failed to signal process {pid}: {}",
                std::io::Error::last_os_error()
            )));
        }
    }

    std::thread::sleep(std::time::Duration::from_millis(500));

    unsafe {
        if libc::kill(pid, 0) == 0 {
            info!("Process {pid} still running, sending SIGKILL");
            libc::kill(pid, libc::SIGKILL);
        }
    }

    Ok(())
}

#[cfg(not(unix))]
pub fn terminate(pid: u32) -> Result<()> {
    Err(SpeechError::Platform(format!(
        "Stopping process {pid} is not supported on this platform"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_pid_file_means_no_instance() {
        let dir = TempDir::new().unwrap();
        assert_eq!(running_instance(&dir.path().join("none.pid")), None);
    }

    #[test]
    fn test_garbage_pid_file_is_removed() {
        let dir = TempDir::new().unwrap();
        let pid_file = dir.path().join("st.pid");
        fs::write(&pid_file, "not a pid").unwrap();

        assert_eq!(running_instance(&pid_file), None);
        assert!(!pid_file.exists());
    }

    #[test]
    fn test_own_pid_is_not_another_instance() {
        let dir = TempDir::new().unwrap();
        let pid_file = dir.path().join("st.pid");
        fs::write(&pid_file, std::process::id().to_string()).unwrap();

        assert_eq!(running_instance(&pid_file), None);
        assert!(pid_file.exists());
    }

    #[test]
    fn test_guard_writes_and_removes_pid() {
        let dir = TempDir::new().unwrap();
        let pid_file = dir.path().join("st.pid");

        {
            let _guard = InstanceGuard::acquire("speech-tray", &pid_file).unwrap();
            assert_eq!(read_pid(&pid_file), Some(std::process::id()));
        }

        assert!(!pid_file.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_stale_pid_is_cleaned_up() {
        let dir = TempDir::new().unwrap();
        let pid_file = dir.path().join("st.pid");
        // Above the default pid_max, never a live process
        fs::write(&pid_file, "4194305").unwrap();

        assert_eq!(running_instance(&pid_file), None);
        assert!(!pid_file.exists());
    }
}
