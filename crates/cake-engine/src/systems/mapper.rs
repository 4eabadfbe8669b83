use glam::Vec2;

use crate::api::config::MapperConfig;
use crate::input::hand::HandSample;
use crate::layout::Rect;

/// Match sprite offset in pixels, relative to the cake area's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MatchPosition {
    pub x: f32,
    pub y: f32,
}

impl MatchPosition {
    /// The same point in viewport coordinates.
    pub fn in_viewport(&self, area: Rect) -> Vec2 {
        area.origin() + Vec2::new(self.x, self.y)
    }
}

/// Affine map from a mirrored hand sample into the cake area.
///
/// `x = padding + sx * (width - 2*padding - match_width)`, same for y with the
/// match height. With `sx, sy` in [0, 1] the sprite never leaves the padded area.
pub struct PositionMapper {
    config: MapperConfig,
}

impl PositionMapper {
    pub fn new(config: MapperConfig) -> Self {
        Self { config }
    }

    pub fn map(&self, sample: HandSample, bounds: Rect) -> MatchPosition {
        let c = &self.config;
        // An area too small for the sprite pins it at the padding instead of going negative
        let span_x = (bounds.width - 2.0 * c.padding - c.match_width).max(0.0);
        let span_y = (bounds.height - 2.0 * c.padding - c.match_height).max(0.0);
        MatchPosition {
            x: c.padding + sample.x * span_x,
            y: c.padding + sample.y * span_y,
        }
    }
}

/// Latest-sample match tracking. No smoothing, no prediction.
pub struct MatchTracker {
    mapper: PositionMapper,
    position: MatchPosition,
    hand_detected: bool,
    frozen: bool,
}

impl MatchTracker {
    pub fn new(mapper: PositionMapper) -> Self {
        Self {
            mapper,
            position: MatchPosition::default(),
            hand_detected: false,
            frozen: false,
        }
    }

    /// Map a fresh sample. Returns the new position, or `None` when frozen.
    pub fn on_hand(&mut self, sample: HandSample, bounds: Rect) -> Option<MatchPosition> {
        self.hand_detected = true;
        if self.frozen {
            return None;
        }
        self.position = self.mapper.map(sample, bounds);
        Some(self.position)
    }

    /// No hand in the frame: keep the last position.
    pub fn on_lost(&mut self) {
        self.hand_detected = false;
    }

    /// Stop following the hand for the rest of the session.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn position(&self) -> MatchPosition {
        self.position
    }

    pub fn hand_detected(&self) -> bool {
        self.hand_detected
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }
}
