use bytemuck::{Pod, Zeroable};

use crate::core::time::Millis;
use crate::systems::particles::{Particle, ParticleKind};

/// Per-particle data read by JS straight out of WASM memory.
/// Must match the TypeScript reader: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    /// Start X in viewport pixels.
    pub x: f32,
    /// Start Y in viewport pixels.
    pub y: f32,
    /// Font size in rem.
    pub size: f32,
    /// Time left before removal.
    pub remaining_ms: f32,
    /// Animation start delay.
    pub delay_ms: f32,
    /// Horizontal sway.
    pub sway: f32,
    /// Index into the effect's symbol set.
    pub glyph: f32,
    /// 0 = confetti, 1 = sparkle.
    pub kind: f32,
}

impl ParticleInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub const KIND_CONFETTI: f32 = 0.0;
    pub const KIND_SPARKLE: f32 = 1.0;

    pub fn from_particle(p: &Particle, now: Millis) -> Self {
        Self {
            x: p.position.x,
            y: p.position.y,
            size: p.size_rem,
            remaining_ms: p.remaining(now) as f32,
            delay_ms: p.delay_ms as f32,
            sway: p.sway_px,
            glyph: p.glyph as f32,
            kind: match p.kind {
                ParticleKind::Confetti { .. } => Self::KIND_CONFETTI,
                ParticleKind::Sparkle => Self::KIND_SPARKLE,
            },
        }
    }
}

/// Flat snapshot of every live particle, rebuilt once per tick.
pub struct ParticleBuffer {
    instances: Vec<ParticleInstance>,
}

impl ParticleBuffer {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
        }
    }

    pub fn rebuild(&mut self, live: &[Particle], now: Millis) {
        self.instances.clear();
        self.instances
            .extend(live.iter().map(|p| ParticleInstance::from_particle(p, now)));
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for reads from JS.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for ParticleBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::particles::{BurstId, ParticleId};
    use glam::Vec2;

    fn confetti(id: u64, x: f32) -> Particle {
        Particle {
            id: ParticleId(id),
            kind: ParticleKind::Confetti { burst: BurstId(0) },
            symbol: "✦".into(),
            glyph: 7,
            position: Vec2::new(x, 0.0),
            size_rem: 1.5,
            lifetime_ms: 5_000,
            delay_ms: 250,
            sway_px: -12.0,
            spawned_at: 0,
            expires_at: 6_000,
        }
    }

    #[test]
    fn stride_is_eight_floats() {
        assert_eq!(std::mem::size_of::<ParticleInstance>(), ParticleInstance::STRIDE_BYTES);
    }

    #[test]
    fn rebuild_packs_live_particles() {
        let mut buf = ParticleBuffer::new();
        buf.rebuild(&[confetti(1, 10.0), confetti(2, 20.0)], 1_000);
        assert_eq!(buf.instance_count(), 2);

        let floats: &[f32] = bytemuck::cast_slice(&buf.instances);
        assert_eq!(floats.len(), 16);
        assert_eq!(&floats[..8], &[10.0, 0.0, 1.5, 5_000.0, 250.0, -12.0, 7.0, 0.0]);
        assert_eq!(floats[8], 20.0);
    }

    #[test]
    fn rebuild_replaces_previous_snapshot() {
        let mut buf = ParticleBuffer::new();
        buf.rebuild(&[confetti(1, 10.0)], 0);
        buf.rebuild(&[], 0);
        assert_eq!(buf.instance_count(), 0);
    }
}
