//! Live layout geometry.
//!
//! The core never owns layout. Everything it needs about on-screen boxes comes
//! through `LayoutProvider`, queried at the moment of use. The browser bridge
//! answers from `getBoundingClientRect`; tests answer from `StaticLayout`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Midpoint of the top edge.
    pub fn top_center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top)
    }

    /// Point at fractional offsets into the box (0,0 = top-left, 1,1 = bottom-right).
    pub fn point_at(&self, fx: f32, fy: f32) -> Vec2 {
        Vec2::new(self.left + self.width * fx, self.top + self.height * fy)
    }
}

/// Read-only view of the rendered page.
pub trait LayoutProvider {
    /// The bounded interactive rectangle the match moves inside.
    fn cake_area(&self) -> Option<Rect>;
    /// The cake sprite; its top-center anchors the candles.
    fn cake_sprite(&self) -> Option<Rect>;
    /// The match sprite as currently rendered (only its size is trusted).
    fn match_sprite(&self) -> Option<Rect>;
    /// The decorative element the ambient sparkle trail follows.
    fn sparkle_source(&self) -> Option<Rect>;
    /// Full viewport; confetti spreads across its width.
    fn viewport(&self) -> Rect;
}

/// Fixed rectangles. Used by tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct StaticLayout {
    pub cake_area: Option<Rect>,
    pub cake_sprite: Option<Rect>,
    pub match_sprite: Option<Rect>,
    pub sparkle_source: Option<Rect>,
    pub viewport: Rect,
}

impl StaticLayout {
    pub fn new(viewport: Rect) -> Self {
        Self {
            viewport,
            ..Default::default()
        }
    }

    pub fn with_cake_area(mut self, rect: Rect) -> Self {
        self.cake_area = Some(rect);
        self
    }

    pub fn with_cake_sprite(mut self, rect: Rect) -> Self {
        self.cake_sprite = Some(rect);
        self
    }

    pub fn with_match_sprite(mut self, rect: Rect) -> Self {
        self.match_sprite = Some(rect);
        self
    }

    pub fn with_sparkle_source(mut self, rect: Rect) -> Self {
        self.sparkle_source = Some(rect);
        self
    }
}

impl LayoutProvider for StaticLayout {
    fn cake_area(&self) -> Option<Rect> {
        self.cake_area
    }

    fn cake_sprite(&self) -> Option<Rect> {
        self.cake_sprite
    }

    fn match_sprite(&self) -> Option<Rect> {
        self.match_sprite
    }

    fn sparkle_source(&self) -> Option<Rect> {
        self.sparkle_source
    }

    fn viewport(&self) -> Rect {
        self.viewport
    }
}
