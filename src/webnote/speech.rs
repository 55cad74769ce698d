//! Text-to-speech playback.
//!
//! Speaking is best effort: [`speak_text`] logs every failure and returns
//! nothing, so a missing or broken speech engine never interrupts the
//! command that asked for it.

use crate::error::{Result, WebnoteError};
use std::process::Command;
use tracing::{debug, error, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub name: String,
    /// Language tag as the engine reports it, e.g. `en_US` or `en-gb`.
    pub lang: String,
}

pub trait SpeechEngine {
    fn voices(&self) -> Result<Vec<Voice>>;
    /// Speaks `text`. `None` uses the platform default voice.
    fn speak(&self, text: &str, voice: Option<&Voice>) -> Result<()>;
}

/// First voice whose language tag starts with `en`.
pub fn pick_english(voices: &[Voice]) -> Option<&Voice> {
    voices
        .iter()
        .find(|v| v.lang.to_lowercase().starts_with("en"))
}

pub fn speak_text(engine: &dyn SpeechEngine, text: &str) {
    let text = text.trim();
    if text.is_empty() {
        warn!("nothing to speak");
        return;
    }

    // Voice lists can come back empty while the engine is still warming up,
    // so ask a second time before giving up.
    let voices = match load_voices(engine) {
        Some(v) => v,
        None => match load_voices(engine) {
            Some(v) => v,
            None => {
                error!("speech unavailable: no voices loaded");
                return;
            }
        },
    };

    let voice = pick_english(&voices);
    match voice {
        Some(v) => debug!(voice = %v.name, lang = %v.lang, "speaking"),
        None => debug!("no English voice found, using the default voice"),
    }

    if let Err(e) = engine.speak(text, voice) {
        error!(error = %e, "speech failed");
    }
}

fn load_voices(engine: &dyn SpeechEngine) -> Option<Vec<Voice>> {
    match engine.voices() {
        Ok(v) if !v.is_empty() => Some(v),
        Ok(_) => None,
        Err(e) => {
            debug!(error = %e, "could not list voices");
            None
        }
    }
}

/// Speech through the platform's command line synthesizer:
/// - macOS: `say`
/// - elsewhere: `espeak-ng`, falling back to `espeak`
#[derive(Debug, Default)]
pub struct CommandSpeech;

impl SpeechEngine for CommandSpeech {
    fn voices(&self) -> Result<Vec<Voice>> {
        #[cfg(target_os = "macos")]
        {
            let out = run_capture("say", &["-v", "?"])?;
            Ok(parse_say_voices(&out))
        }

        #[cfg(not(target_os = "macos"))]
        {
            let out = run_capture("espeak-ng", &["--voices"])
                .or_else(|_| run_capture("espeak", &["--voices"]))?;
            Ok(parse_espeak_voices(&out))
        }
    }

    fn speak(&self, text: &str, voice: Option<&Voice>) -> Result<()> {
        #[cfg(target_os = "macos")]
        {
            let mut args = Vec::new();
            if let Some(v) = voice {
                args.push("-v");
                args.push(v.name.as_str());
            }
            args.push(text);
            run_status("say", &args)
        }

        #[cfg(not(target_os = "macos"))]
        {
            let mut args = Vec::new();
            if let Some(v) = voice {
                args.push("-v");
                args.push(v.lang.as_str());
            }
            args.push(text);
            run_status("espeak-ng", &args).or_else(|_| run_status("espeak", &args))
        }
    }
}

fn run_capture(program: &str, args: &[&str]) -> Result<String> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| WebnoteError::Speech(format!("Failed to run {}: {}", program, e)))?;
    if !output.status.success() {
        return Err(WebnoteError::Speech(format!("{} exited with error", program)));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn run_status(program: &str, args: &[&str]) -> Result<()> {
    let status = Command::new(program)
        .args(args)
        .status()
        .map_err(|e| WebnoteError::Speech(format!("Failed to run {}: {}", program, e)))?;
    if status.success() {
        Ok(())
    } else {
        Err(WebnoteError::Speech(format!("{} exited with error", program)))
    }
}

/// Parses `say -v '?'` lines such as
/// `Bad News            en_US    # The light you see...`.
pub fn parse_say_voices(output: &str) -> Vec<Voice> {
    output
        .lines()
        .filter_map(|line| {
            let head = line.split('#').next()?.trim();
            let (name, lang) = head.rsplit_once(char::is_whitespace)?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some(Voice {
                name: name.to_string(),
                lang: lang.to_string(),
            })
        })
        .collect()
}

/// Parses `espeak --voices` tables: `Pty Language Age/Gender VoiceName File ...`.
pub fn parse_espeak_voices(output: &str) -> Vec<Voice> {
    output
        .lines()
        .skip(1)
        .filter_map(|line| {
            let cols: Vec<&str> = line.split_whitespace().collect();
            if cols.len() < 4 {
                return None;
            }
            Some(Voice {
                name: cols[3].to_string(),
                lang: cols[1].to_string(),
            })
        })
        .collect()
}
