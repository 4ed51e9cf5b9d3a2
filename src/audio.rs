//! Sound cues and playback ownership
//!
//! The engine only names cues. A host plugs in a [`SoundSink`] that actually makes
//! noise; [`AudioManager`] applies volume/mute and keeps a handle for every voice it
//! started so a view can silence everything when it leaves Active.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Run started
    Start,
    /// Legal step without a verdict (card flip, tile placed)
    Tap,
    /// Correct action (pop, rescue, match)
    Correct,
    /// Wrong action
    Miss,
    /// Level or word advanced
    LevelUp,
    /// Last seconds of a countdown
    TimeWarning,
    /// Breathing phase changed
    Chime,
    /// Run completed
    Complete,
    /// Run ended on time-out without points, or on a terminal mistake
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Waveform {
    Sine,
    Triangle,
    Square,
}

/// Procedural tone description for a cue: a pitch sweep with a decaying envelope
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    pub waveform: Waveform,
    pub start_hz: f32,
    pub end_hz: f32,
    /// Peak gain before volume scaling
    pub gain: f32,
    pub duration_ms: u32,
}

impl SoundCue {
    pub fn tone(&self) -> Tone {
        let (waveform, start_hz, end_hz, gain, duration_ms) = match self {
            // Rising sweep
            SoundCue::Start => (Waveform::Sine, 330.0, 660.0, 0.4, 250),
            // Soft tap
            SoundCue::Tap => (Waveform::Triangle, 300.0, 300.0, 0.25, 80),
            // Bright pop
            SoundCue::Correct => (Waveform::Sine, 600.0, 1200.0, 0.5, 150),
            // Low, gentle bonk (never harsh)
            SoundCue::Miss => (Waveform::Triangle, 220.0, 140.0, 0.3, 180),
            SoundCue::LevelUp => (Waveform::Square, 520.0, 1040.0, 0.2, 300),
            SoundCue::TimeWarning => (Waveform::Sine, 880.0, 880.0, 0.2, 60),
            SoundCue::Chime => (Waveform::Sine, 528.0, 528.0, 0.3, 600),
            SoundCue::Complete => (Waveform::Sine, 440.0, 880.0, 0.5, 500),
            SoundCue::GameOver => (Waveform::Triangle, 330.0, 110.0, 0.4, 600),
        };
        Tone {
            waveform,
            start_hz,
            end_hz,
            gain,
            duration_ms,
        }
    }
}

/// Handle to a voice started by a sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VoiceId(pub u64);

/// Platform audio output
pub trait SoundSink {
    /// Start playing a tone at `volume` (0.0 - 1.0). `None` if the sink could not play it.
    fn play(&mut self, cue: SoundCue, tone: Tone, volume: f32) -> Option<VoiceId>;

    fn stop(&mut self, voice: VoiceId);
}

/// Sink that only logs, for headless hosts
#[derive(Debug, Default)]
pub struct LogSink {
    next: u64,
}

impl SoundSink for LogSink {
    fn play(&mut self, cue: SoundCue, tone: Tone, volume: f32) -> Option<VoiceId> {
        self.next += 1;
        log::debug!("cue {:?} ({:.0}Hz, vol {:.2})", cue, tone.start_hz, volume);
        Some(VoiceId(self.next))
    }

    fn stop(&mut self, _voice: VoiceId) {}
}

/// Audio manager for a game view
pub struct AudioManager<S: SoundSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    /// (voice, ends_at_ms)
    voices: Vec<(VoiceId, u64)>,
}

impl<S: SoundSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            voices: Vec::new(),
        }
    }

    pub fn from_settings(sink: S, settings: &Settings) -> Self {
        let mut audio = Self::new(sink);
        audio.apply_settings(settings);
        audio
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio. Muting also stops whatever is playing.
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.silence();
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a cue at `now_ms`, forgetting voices that have already ended
    pub fn play(&mut self, cue: SoundCue, now_ms: u64) {
        self.voices.retain(|(_, ends)| *ends > now_ms);

        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let tone = cue.tone();
        if let Some(voice) = self.sink.play(cue, tone, vol * tone.gain) {
            self.voices.push((voice, now_ms + tone.duration_ms as u64));
        }
    }

    /// Stop every voice this manager started
    pub fn silence(&mut self) -> usize {
        let count = self.voices.len();
        for (voice, _) in self.voices.drain(..) {
            self.sink.stop(voice);
        }
        count
    }

    /// Voices started and not yet stopped or known to have ended
    pub fn playing(&self) -> usize {
        self.voices.len()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<S: SoundSink> Drop for AudioManager<S> {
    fn drop(&mut self) {
        self.silence();
    }
}
