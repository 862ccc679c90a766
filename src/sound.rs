//! Optional sound cue played when the banner appears
//!
//! The cue is opened up front, paused, and started when the banner is
//! loaded. Playback runs on the audio backend's own thread and is never
//! waited on.

use crate::config::Assets;
use anyhow::{Context, Result};
use rodio::{Decoder, OutputStream, Sink};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub const VOLUME: f32 = 0.5;

pub struct SoundCue {
    _stream: OutputStream,
    sink: Sink,
}

impl SoundCue {
    /// Open and decode `path` into a paused sink
    pub fn open(path: &Path, volume: f32) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let source = Decoder::new(BufReader::new(file))
            .with_context(|| format!("Failed to decode {}", path.display()))?;

        let (stream, handle) =
            OutputStream::try_default().context("No audio output device")?;
        let sink = Sink::try_new(&handle).context("Failed to create audio sink")?;

        sink.pause();
        sink.set_volume(volume);
        sink.append(source);

        Ok(SoundCue {
            _stream: stream,
            sink,
        })
    }

    pub fn play(&self) {
        self.sink.play();
    }
}

/// Open the bundled sound cue unless muted
///
/// Returns `None` when muted (nothing is opened), when the file is missing,
/// or when no audio device or decoder is available.
pub fn load_sound(assets: &Assets, muted: bool) -> Option<SoundCue> {
    load_sound_with(assets, muted, |path| SoundCue::open(path, VOLUME))
}

fn load_sound_with<F>(assets: &Assets, muted: bool, open: F) -> Option<SoundCue>
where
    F: FnOnce(&Path) -> Result<SoundCue>,
{
    if muted {
        tracing::debug!("Sound muted");
        return None;
    }

    let path = assets.sound_path();
    if !path.exists() {
        tracing::debug!("No sound cue at {}", path.display());
        return None;
    }

    match open(&path) {
        Ok(cue) => Some(cue),
        Err(e) => {
            tracing::warn!("Playing without sound: {:#}", e);
            None
        }
    }
}
