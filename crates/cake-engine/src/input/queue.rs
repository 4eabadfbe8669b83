use super::hand::Landmark;

/// Everything the input adapters can report.
/// Each browser callback becomes exactly one event; the scene drains them in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// The landmark model found a hand. Carries the first hand's landmark list.
    HandLandmarks(Vec<Landmark>),
    /// The landmark model processed a frame with no hand in it.
    HandLost,
    /// Microphone stream is open and the analyser is running.
    AudioStarted,
    /// One frequency-domain snapshot (magnitude bytes, 0-255).
    AudioSpectrum(Vec<u8>),
    /// A precomputed mean magnitude, for callers that average on their side.
    AudioLevel(f32),
    /// The speech recognizer accepted `start()`.
    SpeechStarted,
    /// The runtime has no speech recognition at all.
    SpeechUnsupported,
    /// Transcript segments from one recognizer result batch (interim or final).
    Transcript(Vec<String>),
    /// Raw error code reported by the speech recognizer.
    RecognizerError(String),
    /// Camera permission was refused.
    CameraDenied,
    /// Microphone permission was refused.
    MicrophoneDenied,
    /// A click or tap anywhere on the page.
    PointerDown,
}

/// A queue of input events.
/// JS callbacks push into the queue; the scene drains it once per tick.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
