use serde::Serialize;

use crate::systems::particles::{BurstId, Particle, ParticleId};

/// Which of the three cake visuals is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CakeVisual {
    Unlit,
    Lit,
    BlownOut,
}

/// Instruction text shown in place of the normal prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Instructions {
    /// No speech recognition in this runtime.
    Unsupported,
    /// Recognizer was refused; waiting for a click.
    MicBlocked,
    /// Recognizer restarted after the click.
    SayBlow,
}

impl Instructions {
    pub fn text(&self) -> &'static str {
        match self {
            Instructions::Unsupported => {
                "Your browser doesn't support voice recognition. Try Chrome on desktop."
            }
            Instructions::MicBlocked => {
                "Mic blocked. Click once anywhere to enable voice, then say \"blow\"."
            }
            Instructions::SayBlow => "Now say \"blow\" to blow out the candles.",
        }
    }
}

pub const CAMERA_DENIED_ALERT: &str = "Could not access webcam. Please allow camera permissions.";
pub const MICROPHONE_DENIED_ALERT: &str =
    "Could not access microphone. Please allow microphone permissions.";

/// A visual mutation for the page to apply. Produced by the core, applied by the bridge.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PresentationCommand {
    /// Swap the cake sprite source.
    SetCakeVisual { visual: CakeVisual, src: String },
    /// Show or hide the match sprite.
    SetMatchVisible { visible: bool },
    /// Position the match sprite, in pixels relative to the cake area.
    MoveMatch { x: f32, y: f32 },
    ShowInstructions { kind: Instructions, text: String },
    /// Blocking notification.
    Alert { message: String },
    /// Ask the bridge to call `start()` on the speech recognizer.
    StartRecognizer,
    CreateBurstContainer { burst: BurstId },
    SpawnParticle { particle: Particle },
    RemoveParticle { id: ParticleId },
    RemoveBurstContainer { burst: BurstId },
}

impl PresentationCommand {
    pub fn instructions(kind: Instructions) -> Self {
        PresentationCommand::ShowInstructions {
            kind,
            text: kind.text().to_string(),
        }
    }

    pub fn alert(message: &str) -> Self {
        PresentationCommand::Alert {
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_serialize_with_type_tag() {
        let json = serde_json::to_string(&PresentationCommand::SetMatchVisible { visible: false }).unwrap();
        assert_eq!(json, r#"{"type":"set_match_visible","visible":false}"#);

        let json = serde_json::to_string(&PresentationCommand::StartRecognizer).unwrap();
        assert_eq!(json, r#"{"type":"start_recognizer"}"#);
    }

    #[test]
    fn instructions_carry_text() {
        match PresentationCommand::instructions(Instructions::MicBlocked) {
            PresentationCommand::ShowInstructions { kind, text } => {
                assert_eq!(kind, Instructions::MicBlocked);
                assert_eq!(text, Instructions::MicBlocked.text());
                assert!(text.contains("Click once anywhere"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
