//! Scene lifecycle: unlit → lit → extinguished.
//!
//! The state machine is the only thing allowed to change what the cake and the
//! match look like. Detectors ask for a transition; the machine decides whether
//! it happens and emits the matching presentation commands.

use crate::api::commands::{CakeVisual, PresentationCommand};
use crate::api::config::CakeAssets;
use crate::core::time::Millis;
use crate::systems::particles::ParticleScheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneState {
    Unlit,
    Lit,
    Extinguished,
}

pub struct SceneStateMachine {
    state: SceneState,
    assets: CakeAssets,
}

impl SceneStateMachine {
    pub fn new(assets: CakeAssets) -> Self {
        Self {
            state: SceneState::Unlit,
            assets,
        }
    }

    pub fn state(&self) -> SceneState {
        self.state
    }

    /// Commands that put the page into the initial visual state.
    pub fn initial_commands(&self, commands: &mut Vec<PresentationCommand>) {
        commands.push(PresentationCommand::SetCakeVisual {
            visual: CakeVisual::Unlit,
            src: self.assets.unlit.clone(),
        });
        commands.push(PresentationCommand::SetMatchVisible { visible: true });
    }

    /// Light the candles. Only valid from `Unlit`; otherwise a no-op.
    /// Returns whether the transition happened.
    pub fn ignite(&mut self, commands: &mut Vec<PresentationCommand>) -> bool {
        if self.state != SceneState::Unlit {
            return false;
        }
        self.state = SceneState::Lit;
        log::info!("scene: candles lit");

        commands.push(PresentationCommand::SetCakeVisual {
            visual: CakeVisual::Lit,
            src: self.assets.lit.clone(),
        });
        commands.push(PresentationCommand::SetMatchVisible { visible: false });
        true
    }

    /// Blow the candles out and start the confetti. Only valid from `Lit`.
    pub fn blow_out(
        &mut self,
        now: Millis,
        particles: &mut ParticleScheduler,
        commands: &mut Vec<PresentationCommand>,
    ) -> bool {
        if self.state != SceneState::Lit {
            return false;
        }
        self.state = SceneState::Extinguished;
        log::info!("scene: candles blown out");

        commands.push(PresentationCommand::SetCakeVisual {
            visual: CakeVisual::BlownOut,
            src: self.assets.blown_out.clone(),
        });
        particles.burst_confetti(now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::SceneConfig;

    fn machine() -> (SceneStateMachine, ParticleScheduler) {
        let config = SceneConfig::default();
        (
            SceneStateMachine::new(config.assets.clone()),
            ParticleScheduler::new(config.confetti, config.sparkle, 1),
        )
    }

    #[test]
    fn forward_path() {
        let (mut sm, mut particles) = machine();
        let mut cmds = Vec::new();
        assert_eq!(sm.state(), SceneState::Unlit);
        assert!(sm.ignite(&mut cmds));
        assert_eq!(sm.state(), SceneState::Lit);
        assert!(sm.blow_out(0, &mut particles, &mut cmds));
        assert_eq!(sm.state(), SceneState::Extinguished);
        assert_eq!(particles.active_bursts(), 1);
    }

    #[test]
    fn blow_out_before_ignite_is_noop() {
        let (mut sm, mut particles) = machine();
        let mut cmds = Vec::new();
        assert!(!sm.blow_out(0, &mut particles, &mut cmds));
        assert_eq!(sm.state(), SceneState::Unlit);
        assert!(cmds.is_empty());
        assert_eq!(particles.active_bursts(), 0);
    }

    #[test]
    fn no_transition_out_of_extinguished() {
        let (mut sm, mut particles) = machine();
        let mut cmds = Vec::new();
        sm.ignite(&mut cmds);
        sm.blow_out(0, &mut particles, &mut cmds);
        cmds.clear();
        assert!(!sm.ignite(&mut cmds));
        assert!(!sm.blow_out(10, &mut particles, &mut cmds));
        assert_eq!(sm.state(), SceneState::Extinguished);
        assert!(cmds.is_empty());
        assert_eq!(particles.active_bursts(), 1);
    }

    #[test]
    fn any_call_sequence_is_monotonic_and_fires_effects_once() {
        // Exhaustive over all 6-call sequences of ignite/blow_out
        for mask in 0u32..64 {
            let (mut sm, mut particles) = machine();
            let mut cmds = Vec::new();
            let mut seen = vec![sm.state()];
            let mut ignitions = 0;
            let mut blowouts = 0;
            for bit in 0..6 {
                let fired = if mask & (1 << bit) != 0 {
                    let ok = sm.ignite(&mut cmds);
                    ignitions += ok as u32;
                    ok
                } else {
                    let ok = sm.blow_out(bit as u64, &mut particles, &mut cmds);
                    blowouts += ok as u32;
                    ok
                };
                if fired {
                    seen.push(sm.state());
                }
            }
            let expected = [SceneState::Unlit, SceneState::Lit, SceneState::Extinguished];
            assert_eq!(&expected[..seen.len()], &seen[..], "mask {:06b}", mask);
            assert!(ignitions <= 1);
            assert!(blowouts <= 1);
            assert!(particles.active_bursts() <= 1);

            let hides = cmds
                .iter()
                .filter(|c| matches!(c, PresentationCommand::SetMatchVisible { visible: false }))
                .count();
            assert_eq!(hides as u32, ignitions);
        }
    }

    #[test]
    fn visuals_use_configured_assets() {
        let (mut sm, mut particles) = machine();
        let mut cmds = Vec::new();
        sm.ignite(&mut cmds);
        sm.blow_out(0, &mut particles, &mut cmds);
        let srcs: Vec<&str> = cmds
            .iter()
            .filter_map(|c| match c {
                PresentationCommand::SetCakeVisual { src, .. } => Some(src.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(srcs, vec!["assets/cake_lit.gif", "assets/cake_unlit.gif"]);
    }
}
