//! Text to WAV through whichever command-line engine is installed.

use crate::error::{Result, SpeechError};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    /// SVOX Pico, the nicer voices for its six languages.
    Pico,
    EspeakNg,
    Espeak,
}

impl EngineKind {
    fn binary(self) -> &'static str {
        match self {
            EngineKind::Pico => "pico2wave",
            EngineKind::EspeakNg => "espeak-ng",
            EngineKind::Espeak => "espeak",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Engine {
    kind: EngineKind,
    binary: PathBuf,
}

impl Engine {
    /// First engine found on `PATH`, in order of preference.
    pub fn detect() -> Result<Self> {
        for kind in [EngineKind::Pico, EngineKind::EspeakNg, EngineKind::Espeak] {
            if let Ok(binary) = which::which(kind.binary()) {
                info!("Using speech engine: {}", binary.display());
                return Ok(Self { kind, binary });
            }
        }

        Err(SpeechError::Synthesis(
            "No speech engine found; install pico2wave (libttspico-utils) or espeak-ng"
                .to_string(),
        ))
    }

    /// Synthesize `text` in `lang` into the WAV file at `out`.
    pub fn synthesize(&self, text: &str, lang: &str, out: &Path) -> Result<()> {
        let args = engine_args(self.kind, text, lang, out);
        debug!("Running {} for {} chars", self.binary.display(), text.len());

        let output = Command::new(&self.binary).args(&args).output()?;
        if !output.status.success() {
            return Err(SpeechError::Synthesis(format!(
                "{} exited with {}: {}",
                self.kind.binary(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        if !out.exists() {
            return Err(SpeechError::Synthesis(format!(
                "{} produced no audio",
                self.kind.binary()
            )));
        }

        Ok(())
    }
}

pub(crate) fn engine_args(kind: EngineKind, text: &str, lang: &str, out: &Path) -> Vec<String> {
    let out = out.to_string_lossy().into_owned();
    match kind {
        EngineKind::Pico => vec![
            format!("--lang={lang}"),
            format!("--wave={out}"),
            "--".to_string(),
            text.to_string(),
        ],
        EngineKind::EspeakNg | EngineKind::Espeak => vec![
            "-v".to_string(),
            espeak_voice(lang),
            "-w".to_string(),
            out,
            "--".to_string(),
            text.to_string(),
        ],
    }
}

/// espeak voices are lower-case, and only English keeps its region.
pub(crate) fn espeak_voice(lang: &str) -> String {
    let lower = lang.to_ascii_lowercase();
    match lower.split('-').next() {
        Some("en") => lower,
        Some(primary) if !primary.is_empty() => primary.to_string(),
        _ => "en".to_string(),
    }
}

/// Collapse the whitespace of copied text into single spaces.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
