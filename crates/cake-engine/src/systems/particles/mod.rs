//! Particle scheduler: confetti bursts and the ambient sparkle trail.
//!
//! Nothing here sleeps or sets real timers. Every emission and removal is a
//! `Timer` on the virtual timeline, and `advance` fires whatever has come due.
//! The browser bridge turns the resulting commands into DOM elements.

mod particle;
mod rng;
mod timers;

pub use particle::{BurstId, Particle, ParticleId, ParticleKind};
pub use rng::Rng;
pub use timers::{Timer, TimerQueue};

use glam::Vec2;

use crate::api::commands::PresentationCommand;
use crate::api::config::{ConfettiConfig, SparkleConfig};
use crate::core::time::Millis;
use crate::layout::LayoutProvider;

pub struct ParticleScheduler {
    confetti: ConfettiConfig,
    sparkle: SparkleConfig,
    rng: Rng,
    timers: TimerQueue,
    live: Vec<Particle>,
    /// Burst containers currently attached to the page.
    bursts: Vec<BurstId>,
    sparkle_running: bool,
    next_particle: u64,
    next_burst: u32,
    /// Commands produced since the last `drain_commands`.
    outbox: Vec<PresentationCommand>,
}

impl ParticleScheduler {
    pub fn new(confetti: ConfettiConfig, sparkle: SparkleConfig, seed: u64) -> Self {
        Self {
            confetti,
            sparkle,
            rng: Rng::new(seed.wrapping_add(7919)),
            timers: TimerQueue::new(),
            live: Vec::with_capacity(128),
            bursts: Vec::new(),
            sparkle_running: false,
            next_particle: 1,
            next_burst: 0,
            outbox: Vec::new(),
        }
    }

    /// Start a confetti burst at `now`.
    ///
    /// The container appears immediately; particles follow one per stagger
    /// interval. The container is torn down at the ceiling even if some
    /// particle never expired on its own.
    pub fn burst_confetti(&mut self, now: Millis) -> BurstId {
        let burst = BurstId(self.next_burst);
        self.next_burst += 1;
        self.bursts.push(burst);
        self.outbox.push(PresentationCommand::CreateBurstContainer { burst });

        for index in 0..self.confetti.count {
            let at = now + index as Millis * self.confetti.stagger_ms;
            self.timers.schedule(at, Timer::EmitConfetti { burst, index });
        }
        self.timers.schedule(
            now + self.confetti.container_ceiling_ms,
            Timer::TeardownBurst { burst },
        );
        log::debug!("particles: burst {:?} scheduled ({} particles)", burst, self.confetti.count);
        burst
    }

    /// Start the ambient sparkle trail. Returns false if there is no element to follow.
    /// Starting an already running trail does nothing.
    pub fn start_ambient(&mut self, now: Millis, layout: &dyn LayoutProvider) -> bool {
        if self.sparkle_running {
            return true;
        }
        if layout.sparkle_source().is_none() {
            log::warn!("particles: no sparkle source element, trail not started");
            return false;
        }
        self.sparkle_running = true;
        self.timers.schedule(now + self.sparkle_interval(), Timer::SparkleTick);
        true
    }

    /// Stop the trail. Sparkles already on screen still expire normally.
    pub fn stop_ambient(&mut self) {
        self.sparkle_running = false;
        self.timers.cancel(|t| matches!(t, Timer::SparkleTick));
    }

    pub fn ambient_running(&self) -> bool {
        self.sparkle_running
    }

    /// Fire every timer due at or before `now`, in time order.
    pub fn advance(&mut self, now: Millis, layout: &dyn LayoutProvider) {
        while let Some((at, timer)) = self.timers.pop_due(now) {
            match timer {
                Timer::EmitConfetti { burst, index } => self.emit_confetti(at, burst, index, layout),
                Timer::Expire { particle } => self.expire(particle),
                Timer::TeardownBurst { burst } => self.teardown(burst),
                Timer::SparkleTick => self.sparkle_tick(at, layout),
            }
        }
    }

    /// Move the produced commands into `out`.
    pub fn drain_commands(&mut self, out: &mut Vec<PresentationCommand>) {
        out.append(&mut self.outbox);
    }

    pub fn live(&self) -> &[Particle] {
        &self.live
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn active_bursts(&self) -> usize {
        self.bursts.len()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    fn sparkle_interval(&self) -> Millis {
        // A zero interval would reschedule into the same instant forever
        self.sparkle.interval_ms.max(1)
    }

    fn next_id(&mut self) -> ParticleId {
        let id = ParticleId(self.next_particle);
        self.next_particle += 1;
        id
    }

    fn emit_confetti(&mut self, at: Millis, burst: BurstId, index: u32, layout: &dyn LayoutProvider) {
        // Container already gone: the ceiling beat the stagger
        if !self.bursts.contains(&burst) {
            return;
        }
        let Some(glyph) = pick_glyph(&mut self.rng, &self.confetti.symbols) else {
            return;
        };
        let id = self.next_id();
        let cfg = &self.confetti;
        let viewport = layout.viewport();
        let x = self.rng.range_f32(viewport.left, viewport.left + viewport.width);
        let size_rem = self.rng.range_f32(cfg.size_rem.0, cfg.size_rem.1);
        let lifetime_ms = self.rng.range_u64(cfg.duration_ms.0, cfg.duration_ms.1);
        let delay_ms = self.rng.range_u64(cfg.delay_ms.0, cfg.delay_ms.1);
        let sway_px = self.rng.jitter(cfg.sway_px);
        let expires_at = at + lifetime_ms + cfg.removal_slack_ms;

        let particle = Particle {
            id,
            kind: ParticleKind::Confetti { burst },
            symbol: cfg.symbols[glyph as usize].clone(),
            glyph,
            position: Vec2::new(x, viewport.top),
            size_rem,
            lifetime_ms,
            delay_ms,
            sway_px,
            spawned_at: at,
            expires_at,
        };
        log::trace!("particles: confetti {} of burst {:?}", index, burst);
        self.spawn(particle);
    }

    fn sparkle_tick(&mut self, at: Millis, layout: &dyn LayoutProvider) {
        if !self.sparkle_running {
            return;
        }
        self.timers.schedule(at + self.sparkle_interval(), Timer::SparkleTick);

        // Element may be gone for a frame; skip the spawn but keep the trail alive
        let Some(source) = layout.sparkle_source() else {
            return;
        };
        let Some(glyph) = pick_glyph(&mut self.rng, &self.sparkle.symbols) else {
            return;
        };
        let id = self.next_id();
        let cfg = &self.sparkle;
        let anchor = source.point_at(cfg.anchor.0, cfg.anchor.1);
        let offset = Vec2::new(self.rng.jitter(cfg.jitter_px), self.rng.jitter(cfg.jitter_px));
        let size_rem = self.rng.range_f32(cfg.size_rem.0, cfg.size_rem.1);

        let particle = Particle {
            id,
            kind: ParticleKind::Sparkle,
            symbol: cfg.symbols[glyph as usize].clone(),
            glyph,
            position: anchor + offset,
            size_rem,
            lifetime_ms: cfg.lifetime_ms,
            delay_ms: 0,
            sway_px: 0.0,
            spawned_at: at,
            expires_at: at + cfg.lifetime_ms,
        };
        self.spawn(particle);
    }

    fn spawn(&mut self, particle: Particle) {
        self.timers.schedule(particle.expires_at, Timer::Expire { particle: particle.id });
        self.outbox.push(PresentationCommand::SpawnParticle {
            particle: particle.clone(),
        });
        self.live.push(particle);
    }

    fn expire(&mut self, id: ParticleId) {
        // Already swept away with its container
        let Some(idx) = self.live.iter().position(|p| p.id == id) else {
            return;
        };
        self.live.swap_remove(idx);
        self.outbox.push(PresentationCommand::RemoveParticle { id });
    }

    fn teardown(&mut self, burst: BurstId) {
        let Some(idx) = self.bursts.iter().position(|b| *b == burst) else {
            return;
        };
        self.bursts.swap_remove(idx);

        // Removing the container removes its children with it
        let before = self.live.len();
        self.live.retain(|p| p.burst() != Some(burst));
        let swept = before - self.live.len();

        self.timers.cancel(|t| matches!(t, Timer::EmitConfetti { burst: b, .. } if *b == burst));
        self.outbox.push(PresentationCommand::RemoveBurstContainer { burst });
        log::debug!("particles: burst {:?} torn down, {} particles swept", burst, swept);
    }
}

fn pick_glyph(rng: &mut Rng, symbols: &[String]) -> Option<u32> {
    if symbols.is_empty() {
        return None;
    }
    Some(rng.next_int(symbols.len() as u32))
}
