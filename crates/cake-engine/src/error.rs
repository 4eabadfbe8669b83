use thiserror::Error;

/// A capture device the scene asks the browser for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    Camera,
    Microphone,
    SpeechRecognizer,
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Device::Camera => write!(f, "camera"),
            Device::Microphone => write!(f, "microphone"),
            Device::SpeechRecognizer => write!(f, "speech recognizer"),
        }
    }
}

/// Errors raised by the input adapters and the config loader.
///
/// None of these ever reach the state machine. An adapter that fails simply
/// stops producing events.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("{device} access was refused")]
    PermissionDenied { device: Device },

    #[error("{capability} is not supported by this runtime")]
    CapabilityUnavailable { capability: &'static str },

    #[error("transient recognizer error: {code}")]
    TransientRecognizer { code: String },

    #[error("landmark list has {len} points, index-finger tip needs at least 9")]
    MalformedLandmarks { len: usize },

    #[error("invalid scene config: {0}")]
    Config(#[from] serde_json::Error),
}

impl InputError {
    /// Classify a raw speech-recognizer error code.
    ///
    /// Only the two authorization codes are treated as a permission failure.
    /// Everything else (already started, no speech, aborted, network) is noise.
    pub fn from_recognizer_code(code: &str) -> Self {
        match code {
            "not-allowed" | "service-not-allowed" => InputError::PermissionDenied {
                device: Device::SpeechRecognizer,
            },
            other => InputError::TransientRecognizer {
                code: other.to_string(),
            },
        }
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(self, InputError::PermissionDenied { .. })
    }
}
