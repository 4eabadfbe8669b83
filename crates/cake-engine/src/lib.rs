pub mod api;
pub mod bridge;
pub mod core;
pub mod error;
pub mod input;
pub mod layout;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::commands::{CakeVisual, Instructions, PresentationCommand};
pub use api::config::{CameraProfile, SceneConfig, SpeechConfig};
pub use api::scene::CakeScene;
pub use bridge::particle_buffer::{ParticleBuffer, ParticleInstance};
pub use core::state::{SceneState, SceneStateMachine};
pub use core::time::{FrameClock, Millis};
pub use error::{Device, InputError};
pub use input::hand::{HandSample, Landmark, INDEX_TIP};
pub use input::queue::{InputEvent, InputQueue};
pub use layout::{LayoutProvider, Rect, StaticLayout};
pub use systems::blow::{mean_magnitude, BlowSignalAggregator, BlowSource};
pub use systems::mapper::{MatchPosition, MatchTracker, PositionMapper};
pub use systems::particles::{BurstId, Particle, ParticleId, ParticleKind, ParticleScheduler};
pub use systems::proximity::{check_ignition, ProximityDetector};
