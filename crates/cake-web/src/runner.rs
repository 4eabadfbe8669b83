use cake_engine::{
    CakeScene, FrameClock, InputEvent, InputQueue, LayoutProvider, ParticleBuffer, SceneConfig,
    SceneState,
};

/// Scene runner that wires the interaction core to the page loop.
///
/// The bridge keeps one runner in a `thread_local!` and forwards every
/// browser callback into it, because wasm-bindgen cannot export generic
/// structs directly.
pub struct SceneRunner<L: LayoutProvider> {
    scene: CakeScene,
    input: InputQueue,
    clock: FrameClock,
    layout: L,
    particle_buffer: ParticleBuffer,
    /// Commands of the last frame, serialized for JS.
    commands_json: String,
    initialized: bool,
}

impl<L: LayoutProvider> SceneRunner<L> {
    pub fn new(config: SceneConfig, layout: L) -> Self {
        Self {
            scene: CakeScene::new(config),
            input: InputQueue::new(),
            clock: FrameClock::new(),
            layout,
            particle_buffer: ParticleBuffer::new(),
            commands_json: String::from("[]"),
            initialized: false,
        }
    }

    /// Start the scene. Call once, after the DOM is ready.
    pub fn init(&mut self, real_ms: f64) {
        let now = self.clock.tick(real_ms);
        self.scene.start(now, &self.layout);
        self.publish();
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// (Re)start the sparkle trail. False if the source element is still missing.
    pub fn start_ambient(&mut self) -> bool {
        self.scene.start_ambient(&self.layout)
    }

    pub fn stop_ambient(&mut self) {
        self.scene.stop_ambient();
    }

    /// Run one frame with the page's high-resolution timestamp.
    pub fn tick(&mut self, real_ms: f64) {
        if !self.initialized {
            return;
        }
        let now = self.clock.tick(real_ms);
        self.scene.update(now, &mut self.input, &self.layout);
        self.publish();
    }

    fn publish(&mut self) {
        self.particle_buffer
            .rebuild(self.scene.particles().live(), self.scene.now());
        self.commands_json = match serde_json::to_string(self.scene.commands()) {
            Ok(json) => json,
            Err(err) => {
                log::error!("cake-web: failed to serialize commands: {}", err);
                String::from("[]")
            }
        };
    }

    pub fn scene(&self) -> &CakeScene {
        &self.scene
    }

    pub fn pending_input(&self) -> usize {
        self.input.len()
    }

    pub fn commands_json(&self) -> &str {
        &self.commands_json
    }

    pub fn state_code(&self) -> u32 {
        match self.scene.state() {
            SceneState::Unlit => 0,
            SceneState::Lit => 1,
            SceneState::Extinguished => 2,
        }
    }

    // ---- Pointer accessors for direct memory reads ----

    pub fn particles_ptr(&self) -> *const f32 {
        self.particle_buffer.instances_ptr()
    }

    pub fn particle_count(&self) -> u32 {
        self.particle_buffer.instance_count()
    }
}
