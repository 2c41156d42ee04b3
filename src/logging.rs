use crate::error::Result;
use env_logger::{Builder, Env, Target};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

// Rotate once the file passes 10 MB, keep five old files
const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024;
const MAX_ROTATED_LOGS: usize = 5;

static LOG_FILE: Mutex<Option<File>> = Mutex::new(None);

fn rotated_path(log_file_path: &Path, index: usize) -> PathBuf {
    let name = log_file_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "speech-tray.log".to_string());
    let dir = log_file_path.parent().unwrap_or_else(|| Path::new("."));
    dir.join(format!("{name}.{index}"))
}

/// Shift `name.log` -> `name.log.1` -> ... when the live file is too large.
pub(crate) fn rotate_if_needed(log_file_path: &Path, max_size: u64) -> Result<bool> {
    let too_big = fs::metadata(log_file_path)
        .map(|m| m.len() > max_size)
        .unwrap_or(false);
    if !too_big {
        return Ok(false);
    }

    let oldest = rotated_path(log_file_path, MAX_ROTATED_LOGS);
    if oldest.exists() {
        fs::remove_file(&oldest).ok();
    }
    for i in (1..MAX_ROTATED_LOGS).rev() {
        let from = rotated_path(log_file_path, i);
        if from.exists() {
            fs::rename(&from, rotated_path(log_file_path, i + 1)).ok();
        }
    }
    fs::rename(log_file_path, rotated_path(log_file_path, 1))?;

    Ok(true)
}

pub fn init_logging(log_file_path: &Path) -> Result<()> {
    rotate_if_needed(log_file_path, MAX_LOG_SIZE)?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = Some(file);
    }

    // RUST_LOG wins over the default level
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.target(Target::Stderr);
    builder.format(|buf, record| {
        let line = format!(
            "[{}] {:<5} {}: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.target(),
            record.args()
        );
        writeln!(buf, "{line}")?;

        if let Ok(mut guard) = LOG_FILE.lock() {
            if let Some(file) = guard.as_mut() {
                writeln!(file, "{line}").ok();
                file.flush().ok();
            }
        }
        Ok(())
    });
    // A second init (tests, re-entry) keeps the first logger
    builder.try_init().ok();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_small_log_is_not_rotated() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("speech-tray.log");
        fs::write(&log, "short").unwrap();

        assert!(!rotate_if_needed(&log, 1024).unwrap());
        assert!(log.exists());
        assert!(!rotated_path(&log, 1).exists());
    }

    #[test]
    fn test_large_log_is_shifted() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("speech-tray.log");
        fs::write(&log, "x".repeat(64)).unwrap();
        fs::write(rotated_path(&log, 1), "older").unwrap();

        assert!(rotate_if_needed(&log, 16).unwrap());
        assert!(!log.exists());
        assert_eq!(fs::read_to_string(rotated_path(&log, 1)).unwrap().len(), 64);
        assert_eq!(fs::read_to_string(rotated_path(&log, 2)).unwrap(), "older");
    }

    #[test]
    fn test_missing_log_is_fine() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("absent.log");
        assert!(!rotate_if_needed(&log, 16).unwrap());
    }
}
