use glam::Vec2;
use serde::Serialize;

use crate::core::time::Millis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ParticleId(pub u64);

/// One confetti batch and the container element that holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct BurstId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParticleKind {
    /// Falls inside a burst container.
    Confetti { burst: BurstId },
    /// Appended straight to the page body.
    Sparkle,
}

/// A single glyph element with its animation parameters.
/// Motion itself is CSS-driven; the core only decides when it exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Particle {
    pub id: ParticleId,
    pub kind: ParticleKind,
    pub symbol: String,
    /// Index of `symbol` in its effect's symbol set.
    pub glyph: u32,
    /// Start position in viewport pixels.
    pub position: Vec2,
    pub size_rem: f32,
    /// Animation duration.
    pub lifetime_ms: Millis,
    /// Animation start delay.
    pub delay_ms: Millis,
    /// Horizontal sway passed through to the animation.
    pub sway_px: f32,
    pub spawned_at: Millis,
    /// When the scheduler removes it.
    pub expires_at: Millis,
}

impl Particle {
    pub fn burst(&self) -> Option<BurstId> {
        match self.kind {
            ParticleKind::Confetti { burst } => Some(burst),
            ParticleKind::Sparkle => None,
        }
    }

    /// Time left before removal, saturating at zero.
    pub fn remaining(&self, now: Millis) -> Millis {
        self.expires_at.saturating_sub(now)
    }
}
