//! Blow detection.
//!
//! Two independent sources can ask for the candles to go out: a loud
//! microphone (mean spectrum magnitude over a threshold) and the recognizer
//! hearing the keyword. Both collapse into one `BlowSource` signal, and both
//! are ignored unless the candles are currently lit.

use crate::api::commands::{Instructions, PresentationCommand};
use crate::api::config::BlowConfig;
use crate::core::state::SceneState;
use crate::error::{Device, InputError};

/// Which path produced a blow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlowSource {
    Audio,
    Speech,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceStatus {
    /// `start()` was requested; results may arrive any moment.
    Starting,
    Listening,
    /// Permission failure; waiting for one click to retry.
    Suspended,
    /// No recognizer, or the single retry was spent.
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioStatus {
    Pending,
    Active,
    Denied,
}

/// Arithmetic mean of one frequency-domain snapshot. Empty snapshots read as silence.
pub fn mean_magnitude(bins: &[u8]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    let sum: u32 = bins.iter().map(|&b| b as u32).sum();
    sum as f32 / bins.len() as f32
}

pub struct BlowSignalAggregator {
    config: BlowConfig,
    keyword: String,
    voice: VoiceStatus,
    audio: AudioStatus,
    retry_used: bool,
}

impl BlowSignalAggregator {
    pub fn new(config: BlowConfig) -> Self {
        let keyword = config.effective_keyword();
        Self {
            config,
            keyword,
            voice: VoiceStatus::Starting,
            audio: AudioStatus::Pending,
            retry_used: false,
        }
    }

    pub fn voice(&self) -> VoiceStatus {
        self.voice
    }

    pub fn audio(&self) -> AudioStatus {
        self.audio
    }

    /// Number of magnitude bins the analyser produces per frame.
    pub fn spectrum_bins(&self) -> usize {
        (self.config.fft_size / 2) as usize
    }

    // ---- Audio path ----

    pub fn on_audio_started(&mut self) {
        if self.audio != AudioStatus::Denied {
            self.audio = AudioStatus::Active;
            log::info!("blow: microphone analyser running");
        }
    }

    pub fn on_microphone_denied(&mut self) {
        self.audio = AudioStatus::Denied;
        log::warn!("blow: {}", InputError::PermissionDenied { device: Device::Microphone });
    }

    pub fn on_spectrum(&mut self, state: SceneState, bins: &[u8]) -> Option<BlowSource> {
        self.on_audio_level(state, mean_magnitude(bins))
    }

    pub fn on_audio_level(&mut self, state: SceneState, mean: f32) -> Option<BlowSource> {
        if state != SceneState::Lit || self.audio == AudioStatus::Denied {
            return None;
        }
        (mean > self.config.volume_threshold).then_some(BlowSource::Audio)
    }

    // ---- Speech path ----

    pub fn on_speech_started(&mut self) {
        if matches!(self.voice, VoiceStatus::Starting) {
            self.voice = VoiceStatus::Listening;
        }
    }

    /// The runtime has no recognizer: leave voice disabled and explain why.
    pub fn on_speech_unsupported(&mut self, commands: &mut Vec<PresentationCommand>) {
        self.voice = VoiceStatus::Unavailable;
        log::warn!(
            "blow: {}",
            InputError::CapabilityUnavailable { capability: "speech recognition" }
        );
        commands.push(PresentationCommand::instructions(Instructions::Unsupported));
    }

    /// Whether one result batch contains the keyword.
    pub fn transcript_matches(&self, segments: &[String]) -> bool {
        let transcript: String = segments.iter().map(|s| s.to_lowercase()).collect();
        transcript.contains(&self.keyword)
    }

    pub fn on_transcript(&mut self, state: SceneState, segments: &[String]) -> Option<BlowSource> {
        if state != SceneState::Lit {
            return None;
        }
        if !matches!(self.voice, VoiceStatus::Starting | VoiceStatus::Listening) {
            return None;
        }
        self.transcript_matches(segments).then_some(BlowSource::Speech)
    }

    /// Handle a recognizer error code.
    ///
    /// Authorization failures suspend voice input and arm a single
    /// click-to-retry. Everything else is engine lifecycle noise.
    pub fn on_recognizer_error(&mut self, code: &str, commands: &mut Vec<PresentationCommand>) {
        let err = InputError::from_recognizer_code(code);
        log::warn!("blow: speech recognition error: {}", err);
        if !err.is_permission_denied() {
            return;
        }
        if self.retry_used {
            self.voice = VoiceStatus::Unavailable;
            log::warn!("blow: recognizer refused again after retry, voice disabled");
            return;
        }
        self.voice = VoiceStatus::Suspended;
        commands.push(PresentationCommand::instructions(Instructions::MicBlocked));
    }

    /// A click anywhere. Restarts a suspended recognizer, once per session.
    pub fn on_pointer_down(&mut self, commands: &mut Vec<PresentationCommand>) {
        if self.voice != VoiceStatus::Suspended {
            return;
        }
        self.retry_used = true;
        self.voice = VoiceStatus::Starting;
        log::info!("blow: retrying speech recognizer after user gesture");
        commands.push(PresentationCommand::StartRecognizer);
        commands.push(PresentationCommand::instructions(Instructions::SayBlow));
    }
}
