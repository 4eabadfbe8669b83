use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Configuration for the whole scene. Loaded once from JSON by the bridge.
/// Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub mapper: MapperConfig,
    pub proximity: ProximityConfig,
    pub blow: BlowConfig,
    pub confetti: ConfettiConfig,
    pub sparkle: SparkleConfig,
    pub assets: CakeAssets,
    pub speech: SpeechConfig,
    /// Seed for the particle RNG. When absent the bridge draws one per session;
    /// headless runs fall back to `DEFAULT_SEED`.
    pub seed: Option<u64>,
}

pub const DEFAULT_SEED: u64 = 0x5EED_CA4E;

impl SceneConfig {
    /// Parse a config from a JSON string. An empty string yields the defaults.
    pub fn from_json(json: &str) -> Result<Self, InputError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }

    /// Fill in `seed` unless the config pinned one.
    pub fn with_seed_if_unset(mut self, seed: u64) -> Self {
        self.seed.get_or_insert(seed);
        self
    }

    pub fn particle_seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }
}

/// Affine map from hand sample to match position inside the cake area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Inset from every edge of the cake area, in pixels.
    pub padding: f32,
    /// Match sprite width subtracted from the horizontal span.
    pub match_width: f32,
    /// Match sprite height subtracted from the vertical span (the sprite is taller than wide).
    pub match_height: f32,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            padding: 20.0,
            match_width: 40.0,
            match_height: 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProximityConfig {
    /// Ignition radius in pixels at the reference layout scale.
    pub threshold: f32,
    /// How far below the cake sprite's top edge the candle tips sit.
    pub candle_drop: f32,
    /// Cake-area width the threshold was tuned for. `None` disables scaling.
    pub reference_area_width: Option<f32>,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            threshold: 20.0,
            candle_drop: 10.0,
            reference_area_width: Some(260.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlowConfig {
    /// Mean spectrum magnitude (0-255) above which a blow is detected.
    pub volume_threshold: f32,
    /// Lowercase keyword searched for in transcripts.
    pub keyword: String,
    /// Analyser transform size. The spectrum has `fft_size / 2` bins.
    pub fft_size: u32,
}

impl BlowConfig {
    /// Lowercased keyword. A blank keyword would match every transcript, so it
    /// falls back to the default.
    pub fn effective_keyword(&self) -> String {
        let keyword = self.keyword.trim().to_lowercase();
        if keyword.is_empty() {
            log::warn!("config: empty blow keyword, using \"{}\"", Self::default().keyword);
            return Self::default().keyword;
        }
        keyword
    }
}

impl Default for BlowConfig {
    fn default() -> Self {
        Self {
            volume_threshold: 70.0,
            keyword: "blow".to_string(),
            fft_size: 256,
        }
    }
}

/// Parameters of the celebratory confetti burst.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfettiConfig {
    pub count: u32,
    /// Gap between two consecutive emissions.
    pub stagger_ms: u64,
    pub duration_ms: (u64, u64),
    pub delay_ms: (u64, u64),
    /// Font size range in rem.
    pub size_rem: (f32, f32),
    /// Horizontal sway amplitude; each particle draws from `[-sway_px, sway_px)`.
    pub sway_px: f32,
    /// Extra time a particle stays after its animation before removal.
    pub removal_slack_ms: u64,
    /// The burst container is torn down this long after the burst starts, no matter what.
    pub container_ceiling_ms: u64,
    pub symbols: Vec<String>,
}

impl Default for ConfettiConfig {
    fn default() -> Self {
        Self {
            count: 90,
            stagger_ms: 40,
            duration_ms: (4_000, 8_000),
            delay_ms: (0, 500),
            size_rem: (0.8, 2.0),
            sway_px: 50.0,
            removal_slack_ms: 1_000,
            container_ceiling_ms: 15_000,
            symbols: ["⭒", "˚", "⋆", "⊹", "₊", "݁", "˖", "✦", "✧", "·", "°", "✶"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Parameters of the ambient sparkle trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SparkleConfig {
    pub interval_ms: u64,
    pub lifetime_ms: u64,
    /// Jitter amplitude; offsets are drawn from `[-jitter_px, jitter_px)` on both axes.
    pub jitter_px: f32,
    pub size_rem: (f32, f32),
    /// Leading edge of the decorative element, as fractions of its box.
    pub anchor: (f32, f32),
    pub symbols: Vec<String>,
}

impl Default for SparkleConfig {
    fn default() -> Self {
        Self {
            interval_ms: 120,
            lifetime_ms: 900,
            jitter_px: 5.0,
            size_rem: (0.7, 1.5),
            anchor: (0.15, 0.6),
            symbols: ["✦", "✧", "⋆", "⭒", "˚", "⊹"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Paths of the three cake visuals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CakeAssets {
    pub unlit: String,
    pub lit: String,
    pub blown_out: String,
}

impl Default for CakeAssets {
    fn default() -> Self {
        Self {
            unlit: "assets/cake_unlit.gif".to_string(),
            lit: "assets/cake_lit.gif".to_string(),
            blown_out: "assets/cake_unlit.gif".to_string(),
        }
    }
}

/// Options handed to the browser's speech recognizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub continuous: bool,
    pub interim_results: bool,
    pub lang: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            continuous: true,
            interim_results: true,
            lang: "en-US".to_string(),
        }
    }
}

/// Camera resolution and landmark-model options for a device class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraProfile {
    pub width: u32,
    pub height: u32,
    pub max_num_hands: u32,
    pub model_complexity: u32,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
}

impl CameraProfile {
    pub fn desktop() -> Self {
        Self {
            width: 300,
            height: 225,
            max_num_hands: 1,
            model_complexity: 1,
            min_detection_confidence: 0.7,
            min_tracking_confidence: 0.5,
        }
    }

    pub fn mobile() -> Self {
        Self {
            width: 240,
            height: 180,
            max_num_hands: 1,
            model_complexity: 0,
            min_detection_confidence: 0.6,
            min_tracking_confidence: 0.4,
        }
    }

    /// Pick the profile for a browser user-agent string.
    pub fn for_user_agent(user_agent: &str) -> Self {
        const MOBILE_MARKERS: [&str; 4] = ["iphone", "ipad", "ipod", "android"];
        let ua = user_agent.to_lowercase();
        if MOBILE_MARKERS.iter().any(|m| ua.contains(m)) {
            Self::mobile()
        } else {
            Self::desktop()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let config = SceneConfig::from_json("").unwrap();
        assert_eq!(config, SceneConfig::default());
        let config = SceneConfig::from_json("{}").unwrap();
        assert_eq!(config.blow.volume_threshold, 70.0);
        assert_eq!(config.confetti.count, 90);
    }

    #[test]
    fn partial_override() {
        let json = r#"{
            "blow": { "volume_threshold": 90 },
            "confetti": { "count": 10, "stagger_ms": 50 },
            "seed": 7
        }"#;
        let config = SceneConfig::from_json(json).unwrap();
        assert_eq!(config.blow.volume_threshold, 90.0);
        assert_eq!(config.blow.keyword, "blow");
        assert_eq!(config.confetti.count, 10);
        assert_eq!(config.confetti.stagger_ms, 50);
        assert_eq!(config.confetti.container_ceiling_ms, 15_000);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.particle_seed(), 7);
    }

    #[test]
    fn unset_seed_is_filled_once() {
        let config = SceneConfig::from_json("").unwrap();
        assert_eq!(config.seed, None);
        assert_eq!(config.particle_seed(), DEFAULT_SEED);

        let config = config.with_seed_if_unset(99);
        assert_eq!(config.seed, Some(99));
        let config = config.with_seed_if_unset(5);
        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn blank_keyword_falls_back_to_blow() {
        let config = SceneConfig::from_json(r#"{ "blow": { "keyword": "  " } }"#).unwrap();
        assert_eq!(config.blow.effective_keyword(), "blow");
        let config = SceneConfig::from_json(r#"{ "blow": { "keyword": "Puff" } }"#).unwrap();
        assert_eq!(config.blow.effective_keyword(), "puff");
    }

    #[test]
    fn bad_json_is_config_error() {
        match SceneConfig::from_json("{ not json") {
            Err(InputError::Config(_)) => {}
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn default_symbol_sets() {
        let config = SceneConfig::default();
        assert_eq!(config.confetti.symbols.len(), 12);
        assert_eq!(config.sparkle.symbols.len(), 6);
    }

    #[test]
    fn camera_profile_from_user_agent() {
        let ua = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)";
        assert_eq!(CameraProfile::for_user_agent(ua), CameraProfile::mobile());
        let ua = "Mozilla/5.0 (Linux; Android 14; Pixel 8)";
        assert_eq!(CameraProfile::for_user_agent(ua).width, 240);
        let ua = "Mozilla/5.0 (X11; Linux x86_64) Chrome/120.0";
        assert_eq!(CameraProfile::for_user_agent(ua), CameraProfile::desktop());
    }
}
