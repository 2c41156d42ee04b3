//! Background synthesis so the UI thread never waits on the engine.

use crate::error::{Result, SpeechError};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

/// One utterance being rendered to a WAV file on its own thread.
pub struct SynthesisJob {
    out: PathBuf,
    rx: Receiver<Result<()>>,
}

impl SynthesisJob {
    /// Run `work` against `out` on a worker thread and return at once.
    pub fn spawn<F>(out: PathBuf, work: F) -> Result<Self>
    where
        F: FnOnce(&Path) -> Result<()> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let target = out.clone();

        thread::Builder::new()
            .name("speech-synth".to_string())
            .spawn(move || {
                let result = work(&target);
                if tx.send(result).is_err() {
                    // Superseded or stopped while running
                    debug!("Discarding abandoned speech {}", target.display());
                    let _ = fs::remove_file(&target);
                }
            })?;

        Ok(Self { out, rx })
    }

    /// `None` while the worker is still running.
    pub fn poll(&self) -> Option<Result<PathBuf>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result.map(|()| self.out.clone())),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(SpeechError::Synthesis(
                "Speech worker exited without a result".to_string(),
            ))),
        }
    }

    /// Give up on the job; whatever it writes is removed.
    pub fn cancel(self) {
        if let Ok(Ok(())) = self.rx.try_recv() {
            let _ = fs::remove_file(&self.out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    fn wait(job: &SynthesisJob) -> Result<PathBuf> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(result) = job.poll() {
                return result;
            }
            assert!(Instant::now() < deadline, "worker never finished");
            thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn test_spawn_returns_before_work_finishes() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("speech-1.wav");
        let (release, gate) = mpsc::channel::<()>();

        let job = SynthesisJob::spawn(out.clone(), move |path| {
            let _ = gate.recv();
            fs::write(path, b"RIFF")?;
            Ok(())
        })
        .unwrap();

        assert!(job.poll().is_none());
        assert!(!out.exists());

        release.send(()).unwrap();
        assert_eq!(wait(&job).unwrap(), out);
        assert!(out.exists());
    }

    #[test]
    fn test_engine_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        let job = SynthesisJob::spawn(dir.path().join("speech-2.wav"), |_| {
            Err(SpeechError::Synthesis("espeak exited with 1".to_string()))
        })
        .unwrap();

        assert!(matches!(wait(&job), Err(SpeechError::Synthesis(_))));
    }

    #[test]
    fn test_abandoned_output_is_removed() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("speech-3.wav");
        let (release, gate) = mpsc::channel::<()>();
        let (done_tx, done) = mpsc::channel::<()>();

        let job = SynthesisJob::spawn(out.clone(), move |path| {
            let _ = gate.recv();
            fs::write(path, b"RIFF")?;
            let _ = done_tx.send(());
            Ok(())
        })
        .unwrap();

        job.cancel();
        release.send(()).unwrap();
        done.recv_timeout(Duration::from_secs(5)).unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while out.exists() {
            assert!(Instant::now() < deadline, "abandoned output left behind");
            thread::sleep(Duration::from_millis(10));
        }
    }
}
