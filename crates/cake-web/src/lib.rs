//! WASM exports for the cake scene.
//!
//! The page owns the camera, the landmark model, the microphone analyser and
//! the speech recognizer. Each of their callbacks calls one of the `scene_*`
//! functions below, which only queue an event. `scene_tick` runs the frame;
//! afterwards the page reads `get_commands_json()` and the particle buffer.

pub mod layout;
pub mod runner;

pub use layout::{DomLayout, Selectors};
pub use runner::SceneRunner;

use std::cell::RefCell;

use cake_engine::{CameraProfile, InputEvent, Landmark, ParticleInstance, SceneConfig};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<SceneRunner<DomLayout>>> = RefCell::new(None);
}

/// Run `f` against the runner. Callbacks that fire before `scene_init` are dropped.
fn with_runner<R>(f: impl FnOnce(&mut SceneRunner<DomLayout>) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("cake-web: scene not initialized, call scene_init() first");
                None
            }
        }
    })
}

fn push(event: InputEvent) {
    with_runner(|r| r.push_input(event));
}

#[wasm_bindgen]
pub fn scene_init(config_json: &str, now_ms: f64) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = SceneConfig::from_json(config_json)
        .map_err(|e| JsValue::from_str(&e.to_string()))?
        .with_seed_if_unset(session_seed(now_ms));
    let layout = DomLayout::new(Selectors::default())
        .ok_or_else(|| JsValue::from_str("no window/document available"))?;

    let mut runner = SceneRunner::new(config, layout);
    runner.init(now_ms);
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("cake-web: config loaded, scene initialized");
    Ok(())
}

#[wasm_bindgen]
pub fn scene_tick(now_ms: f64) {
    with_runner(|r| r.tick(now_ms));
}

/// Start the sparkle trail if `scene_init` ran before its element existed.
#[wasm_bindgen]
pub fn scene_start_ambient() -> bool {
    with_runner(|r| r.start_ambient()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn scene_stop_ambient() {
    with_runner(|r| r.stop_ambient());
}

/// Fresh particle seed per page load.
fn session_seed(now_ms: f64) -> u64 {
    let random = (js_sys::Math::random() * u32::MAX as f64) as u64;
    (random << 32) ^ now_ms.to_bits()
}

// ---- Camera / landmark model ----

/// First hand's landmarks as a flat `[x, y, z, ...]` array.
#[wasm_bindgen]
pub fn scene_hand_landmarks(coords: &[f32]) {
    push(InputEvent::HandLandmarks(Landmark::from_flat(coords)));
}

#[wasm_bindgen]
pub fn scene_hand_lost() {
    push(InputEvent::HandLost);
}

#[wasm_bindgen]
pub fn scene_camera_denied() {
    push(InputEvent::CameraDenied);
}

// ---- Microphone ----

#[wasm_bindgen]
pub fn scene_audio_started() {
    push(InputEvent::AudioStarted);
}

/// One `getByteFrequencyData` snapshot.
#[wasm_bindgen]
pub fn scene_audio_spectrum(bins: &[u8]) {
    push(InputEvent::AudioSpectrum(bins.to_vec()));
}

/// Pre-averaged loudness, for pages that run their own analyser.
#[wasm_bindgen]
pub fn scene_audio_level(level: f32) {
    push(InputEvent::AudioLevel(level));
}

#[wasm_bindgen]
pub fn scene_microphone_denied() {
    push(InputEvent::MicrophoneDenied);
}

// ---- Speech recognizer ----

#[wasm_bindgen]
pub fn scene_speech_started() {
    push(InputEvent::SpeechStarted);
}

#[wasm_bindgen]
pub fn scene_speech_unsupported() {
    push(InputEvent::SpeechUnsupported);
}

/// Transcript segments from `event.resultIndex` to the end of `event.results`.
#[wasm_bindgen]
pub fn scene_transcript(segments: js_sys::Array) {
    let segments: Vec<String> = segments.iter().filter_map(|v| v.as_string()).collect();
    push(InputEvent::Transcript(segments));
}

#[wasm_bindgen]
pub fn scene_recognizer_error(code: &str) {
    push(InputEvent::RecognizerError(code.to_string()));
}

#[wasm_bindgen]
pub fn scene_pointer_down() {
    push(InputEvent::PointerDown);
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_commands_json() -> String {
    with_runner(|r| r.commands_json().to_string()).unwrap_or_else(|| String::from("[]"))
}

#[wasm_bindgen]
pub fn get_particles_ptr() -> *const f32 {
    with_runner(|r| r.particles_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_particle_count() -> u32 {
    with_runner(|r| r.particle_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_particle_floats() -> u32 {
    ParticleInstance::FLOATS as u32
}

/// 0 = unlit, 1 = lit, 2 = extinguished.
#[wasm_bindgen]
pub fn get_scene_state() -> u32 {
    with_runner(|r| r.state_code()).unwrap_or(0)
}

// ---- Startup configuration for the page ----

/// Camera resolution and landmark-model options for this device.
#[wasm_bindgen]
pub fn get_camera_profile_json(user_agent: &str) -> String {
    serde_json::to_string(&CameraProfile::for_user_agent(user_agent))
        .unwrap_or_else(|_| String::from("{}"))
}

/// Recognizer options and analyser size from a config (or defaults for `""`).
#[wasm_bindgen]
pub fn get_capture_config_json(config_json: &str) -> Result<String, JsValue> {
    let config = SceneConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let capture = serde_json::json!({
        "speech": config.speech,
        "fft_size": config.blow.fft_size,
    });
    Ok(capture.to_string())
}
