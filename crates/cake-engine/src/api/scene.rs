//! The single consumer of all input events.
//!
//! Adapters only push into an `InputQueue`. Once per frame the scene drains
//! the queue in arrival order, routes each event through the detectors, lets
//! the state machine decide on transitions, then advances the particle
//! timers. Whatever the page must change ends up in `commands()`.

use glam::Vec2;

use crate::api::commands::{PresentationCommand, CAMERA_DENIED_ALERT, MICROPHONE_DENIED_ALERT};
use crate::api::config::SceneConfig;
use crate::core::state::{SceneState, SceneStateMachine};
use crate::core::time::Millis;
use crate::error::{Device, InputError};
use crate::input::hand::HandSample;
use crate::input::queue::{InputEvent, InputQueue};
use crate::layout::LayoutProvider;
use crate::systems::blow::{AudioStatus, BlowSignalAggregator, BlowSource};
use crate::systems::mapper::{MatchTracker, PositionMapper};
use crate::systems::particles::ParticleScheduler;
use crate::systems::proximity::ProximityDetector;

pub struct CakeScene {
    machine: SceneStateMachine,
    tracker: MatchTracker,
    proximity: ProximityDetector,
    blow: BlowSignalAggregator,
    particles: ParticleScheduler,
    vision_enabled: bool,
    now: Millis,
    commands: Vec<PresentationCommand>,
}

impl CakeScene {
    pub fn new(config: SceneConfig) -> Self {
        let seed = config.particle_seed();
        let match_size = Vec2::new(config.mapper.match_width, config.mapper.match_height);
        Self {
            machine: SceneStateMachine::new(config.assets),
            tracker: MatchTracker::new(PositionMapper::new(config.mapper)),
            proximity: ProximityDetector::new(config.proximity, match_size),
            blow: BlowSignalAggregator::new(config.blow),
            particles: ParticleScheduler::new(config.confetti, config.sparkle, seed),
            vision_enabled: true,
            now: 0,
            commands: Vec::with_capacity(64),
        }
    }

    /// Put the page in its initial state and start the ambient trail.
    pub fn start(&mut self, now: Millis, layout: &dyn LayoutProvider) {
        self.now = now;
        self.commands.clear();
        self.machine.initial_commands(&mut self.commands);
        self.particles.start_ambient(now, layout);
        self.particles.drain_commands(&mut self.commands);
    }

    /// Process one frame: drain input, then fire due particle timers.
    pub fn update(&mut self, now: Millis, input: &mut InputQueue, layout: &dyn LayoutProvider) {
        self.now = now;
        self.commands.clear();

        for event in input.drain() {
            self.handle(event, layout);
        }

        self.particles.advance(now, layout);
        self.particles.drain_commands(&mut self.commands);
    }

    /// Start the ambient trail at the current time, e.g. once its source element exists.
    pub fn start_ambient(&mut self, layout: &dyn LayoutProvider) -> bool {
        self.particles.start_ambient(self.now, layout)
    }

    pub fn stop_ambient(&mut self) {
        self.particles.stop_ambient();
    }

    /// Commands produced by the last `start` or `update`.
    pub fn commands(&self) -> &[PresentationCommand] {
        &self.commands
    }

    pub fn state(&self) -> SceneState {
        self.machine.state()
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn particles(&self) -> &ParticleScheduler {
        &self.particles
    }

    pub fn blow(&self) -> &BlowSignalAggregator {
        &self.blow
    }

    pub fn tracker(&self) -> &MatchTracker {
        &self.tracker
    }

    pub fn vision_enabled(&self) -> bool {
        self.vision_enabled
    }

    fn handle(&mut self, event: InputEvent, layout: &dyn LayoutProvider) {
        match event {
            InputEvent::HandLandmarks(landmarks) => match HandSample::from_landmarks(&landmarks) {
                Ok(sample) => self.on_hand(sample, layout),
                Err(err) => {
                    log::debug!("scene: {}", err);
                    self.tracker.on_lost();
                }
            },
            InputEvent::HandLost => self.tracker.on_lost(),
            InputEvent::AudioStarted => self.blow.on_audio_started(),
            InputEvent::AudioSpectrum(bins) => {
                let source = self.blow.on_spectrum(self.machine.state(), &bins);
                self.on_blow(source);
            }
            InputEvent::AudioLevel(mean) => {
                let source = self.blow.on_audio_level(self.machine.state(), mean);
                self.on_blow(source);
            }
            InputEvent::SpeechStarted => self.blow.on_speech_started(),
            InputEvent::SpeechUnsupported => self.blow.on_speech_unsupported(&mut self.commands),
            InputEvent::Transcript(segments) => {
                let source = self.blow.on_transcript(self.machine.state(), &segments);
                self.on_blow(source);
            }
            InputEvent::RecognizerError(code) => {
                self.blow.on_recognizer_error(&code, &mut self.commands)
            }
            InputEvent::CameraDenied => {
                if self.vision_enabled {
                    self.vision_enabled = false;
                    log::warn!("scene: {}", InputError::PermissionDenied { device: Device::Camera });
                    self.commands.push(PresentationCommand::alert(CAMERA_DENIED_ALERT));
                }
            }
            InputEvent::MicrophoneDenied => {
                if self.blow.audio() != AudioStatus::Denied {
                    self.blow.on_microphone_denied();
                    self.commands.push(PresentationCommand::alert(MICROPHONE_DENIED_ALERT));
                }
            }
            InputEvent::PointerDown => self.blow.on_pointer_down(&mut self.commands),
        }
    }

    /// Map first, then check proximity against the position just written.
    fn on_hand(&mut self, sample: HandSample, layout: &dyn LayoutProvider) {
        if !self.vision_enabled {
            return;
        }
        let Some(area) = layout.cake_area() else {
            return;
        };
        let Some(position) = self.tracker.on_hand(sample, area) else {
            return;
        };
        self.commands.push(PresentationCommand::MoveMatch {
            x: position.x,
            y: position.y,
        });

        if self.proximity.evaluate(self.machine.state(), position, layout)
            && self.machine.ignite(&mut self.commands)
        {
            self.tracker.freeze();
        }
    }

    fn on_blow(&mut self, source: Option<BlowSource>) {
        let Some(source) = source else {
            return;
        };
        if self.machine.blow_out(self.now, &mut self.particles, &mut self.commands) {
            log::info!("scene: blow detected via {:?}", source);
        }
    }
}
