use super::job::SynthesisJob;
use super::synth::{clean_text, Engine};
use super::{PlaybackState, Player};
use crate::config::AppConfig;
use crate::error::{Result, SpeechError};
use arboard::Clipboard;
use log::{debug, info};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Utterance still being synthesized, and whether it should start
/// playing once ready.
struct Pending {
    job: SynthesisJob,
    autoplay: bool,
}

/// Clipboard/selection reader speaking through a command-line engine and
/// playing the result with rodio.
pub struct SpeechPlayer {
    engine: Engine,
    speech_file: PathBuf,
    lang: String,
    speed: f32,
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    sink: Option<Sink>,
    pending: Option<Pending>,
    jobs: u64,
}

impl SpeechPlayer {
    pub fn new(conf: &AppConfig, speech_file: PathBuf) -> Result<Self> {
        let engine = Engine::detect()?;

        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SpeechError::Audio(format!("Failed to open audio output: {e}")))?;

        Ok(Self {
            engine,
            speech_file,
            lang: conf.lang.clone(),
            speed: conf.voice_speed,
            _stream: stream,
            stream_handle,
            sink: None,
            pending: None,
            jobs: 0,
        })
    }

    fn speak(&mut self, text: &str) -> Result<()> {
        let text = clean_text(text);
        if text.is_empty() {
            return Err(SpeechError::NoText);
        }

        self.stop()?;
        if self.speech_file.exists() {
            fs::remove_file(&self.speech_file)?;
        }

        info!("Reading {} chars in {}", text.len(), self.lang);
        self.jobs += 1;
        let engine = self.engine.clone();
        let lang = self.lang.clone();
        let job = SynthesisJob::spawn(self.job_file(self.jobs), move |out| {
            engine.synthesize(&text, &lang, out)
        })?;

        self.pending = Some(Pending {
            job,
            autoplay: true,
        });
        Ok(())
    }

    /// Scratch WAV for one synthesis run; pico2wave insists on `.wav`.
    fn job_file(&self, id: u64) -> PathBuf {
        let stem = self
            .speech_file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "speech".to_string());
        self.speech_file.with_file_name(format!("{stem}-{id}.wav"))
    }

    fn start_playback(&mut self) -> Result<()> {
        let file = File::open(&self.speech_file)?;
        let source = Decoder::new(BufReader::new(file))
            .map_err(|e| SpeechError::Audio(format!("Failed to decode speech: {e}")))?;

        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| SpeechError::Audio(format!("Failed to create audio sink: {e}")))?;
        sink.set_speed(self.speed);
        sink.append(source);

        self.sink = Some(sink);
        Ok(())
    }

    fn active_sink(&self) -> Option<&Sink> {
        self.sink.as_ref().filter(|s| !s.empty())
    }
}

fn clipboard_text() -> Result<String> {
    let mut clipboard = Clipboard::new()?;
    match clipboard.get_text() {
        Ok(text) => Ok(text),
        Err(arboard::Error::ContentNotAvailable) => Err(SpeechError::NoText),
        Err(e) => Err(e.into()),
    }
}

#[cfg(target_os = "linux")]
fn selection_text() -> Result<String> {
    use arboard::{GetExtLinux, LinuxClipboardKind};

    let mut clipboard = Clipboard::new()?;
    match clipboard
        .get()
        .clipboard(LinuxClipboardKind::Primary)
        .text()
    {
        Ok(text) => Ok(text),
        Err(arboard::Error::ContentNotAvailable) => Err(SpeechError::NoText),
        Err(e) => Err(e.into()),
    }
}

// No primary selection outside X11/Wayland
#[cfg(not(target_os = "linux"))]
fn selection_text() -> Result<String> {
    clipboard_text()
}

/// `speech` -> `speech.wav`; explicit extensions are kept.
pub(crate) fn with_wav_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension("wav")
    }
}

impl Player for SpeechPlayer {
    fn read_clipboard(&mut self) -> Result<()> {
        let text = clipboard_text()?;
        self.speak(&text)
    }

    fn read_selected(&mut self) -> Result<()> {
        let text = selection_text()?;
        self.speak(&text)
    }

    fn play(&mut self) -> Result<()> {
        if let Some(pending) = &mut self.pending {
            pending.autoplay = true;
            return Ok(());
        }
        if let Some(sink) = self.active_sink() {
            sink.play();
            return Ok(());
        }

        // Finished or stopped: replay the last utterance
        if !self.has_content() {
            return Err(SpeechError::NothingToPlay);
        }
        debug!("Replaying {}", self.speech_file.display());
        self.start_playback()
    }

    fn pause(&mut self) -> Result<()> {
        if let Some(pending) = &mut self.pending {
            pending.autoplay = false;
            return Ok(());
        }
        if let Some(sink) = self.active_sink() {
            sink.pause();
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        if let Some(pending) = self.pending.take() {
            debug!("Cancelling speech synthesis");
            pending.job.cancel();
        }
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        Ok(())
    }

    fn save(&mut self, path: &Path) -> Result<PathBuf> {
        if !self.has_content() {
            return Err(SpeechError::NothingToPlay);
        }

        let dest = with_wav_extension(path);
        fs::copy(&self.speech_file, &dest)?;
        info!("Saved speech to {}", dest.display());
        Ok(dest)
    }

    fn state(&self) -> PlaybackState {
        if let Some(pending) = &self.pending {
            return if pending.autoplay {
                PlaybackState::Playing
            } else {
                PlaybackState::Paused
            };
        }
        match self.active_sink() {
            Some(sink) if !sink.is_paused() => PlaybackState::Playing,
            _ => PlaybackState::Paused,
        }
    }

    fn has_content(&self) -> bool {
        self.speech_file.exists()
    }

    fn set_language(&mut self, lang: &str) {
        self.lang = lang.to_string();
    }

    fn set_voice_speed(&mut self, speed: f32) {
        self.speed = speed;
        if let Some(sink) = &self.sink {
            sink.set_speed(speed);
        }
    }

    fn poll(&mut self) -> Result<()> {
        let Some(pending) = &self.pending else {
            return Ok(());
        };
        let Some(result) = pending.job.poll() else {
            return Ok(());
        };
        let autoplay = pending.autoplay;
        self.pending = None;

        let rendered = result?;
        fs::rename(&rendered, &self.speech_file)?;
        debug!("Speech ready at {}", self.speech_file.display());

        self.start_playback()?;
        if !autoplay {
            if let Some(sink) = &self.sink {
                sink.pause();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wav_extension_added() {
        assert_eq!(
            with_wav_extension(Path::new("/tmp/speech")),
            PathBuf::from("/tmp/speech.wav")
        );
    }

    #[test]
    fn test_explicit_extension_kept() {
        assert_eq!(
            with_wav_extension(Path::new("/tmp/speech.WAV")),
            PathBuf::from("/tmp/speech.WAV")
        );
    }
}
