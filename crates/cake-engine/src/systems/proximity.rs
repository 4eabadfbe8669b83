use glam::Vec2;

use crate::api::config::ProximityConfig;
use crate::core::state::SceneState;
use crate::layout::{LayoutProvider, Rect};
use crate::systems::mapper::MatchPosition;

/// Strict proximity test: touching the threshold exactly does not count.
pub fn check_ignition(match_tip: Vec2, candle_anchor: Vec2, threshold: f32) -> bool {
    match_tip.distance(candle_anchor) < threshold
}

/// Decides when the match flame is close enough to the candles.
/// Reads live layout on every check; nothing is cached between frames.
pub struct ProximityDetector {
    config: ProximityConfig,
    /// Used when the page cannot report the match sprite's size.
    fallback_match_size: Vec2,
}

impl ProximityDetector {
    pub fn new(config: ProximityConfig, fallback_match_size: Vec2) -> Self {
        Self {
            config,
            fallback_match_size,
        }
    }

    /// Candle tips: top-center of the cake sprite, pushed down into the silhouette.
    pub fn candle_anchor(&self, cake: Rect) -> Vec2 {
        cake.top_center() + Vec2::new(0.0, self.config.candle_drop)
    }

    /// Flame end of the match: top-center of its sprite box.
    pub fn match_tip(match_rect: Rect) -> Vec2 {
        match_rect.top_center()
    }

    /// Threshold scaled to the current cake-area width.
    pub fn threshold_for(&self, area: Rect) -> f32 {
        match self.config.reference_area_width {
            Some(reference) if reference > 0.0 && area.width > 0.0 => {
                self.config.threshold * area.width / reference
            }
            _ => self.config.threshold,
        }
    }

    /// Run the ignition check for the freshly mapped match position.
    ///
    /// Skipped entirely unless the scene is still unlit, so no layout is read
    /// once the candles are burning.
    pub fn evaluate(
        &self,
        state: SceneState,
        position: MatchPosition,
        layout: &dyn LayoutProvider,
    ) -> bool {
        if state != SceneState::Unlit {
            return false;
        }
        let (Some(area), Some(cake)) = (layout.cake_area(), layout.cake_sprite()) else {
            return false;
        };
        let size = layout
            .match_sprite()
            .map(|r| r.size())
            .unwrap_or(self.fallback_match_size);
        let origin = position.in_viewport(area);
        let match_rect = Rect::new(origin.x, origin.y, size.x, size.y);

        check_ignition(
            Self::match_tip(match_rect),
            self.candle_anchor(cake),
            self.threshold_for(area),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::StaticLayout;
    use std::cell::Cell;

    fn detector() -> ProximityDetector {
        ProximityDetector::new(ProximityConfig::default(), Vec2::new(40.0, 60.0))
    }

    #[test]
    fn exactly_at_threshold_does_not_ignite() {
        let anchor = Vec2::new(100.0, 100.0);
        assert!(!check_ignition(Vec2::new(120.0, 100.0), anchor, 20.0));
        assert!(check_ignition(Vec2::new(119.999, 100.0), anchor, 20.0));
    }

    #[test]
    fn anchor_sits_below_cake_top() {
        let cake = Rect::new(100.0, 200.0, 120.0, 90.0);
        assert_eq!(detector().candle_anchor(cake), Vec2::new(160.0, 210.0));
    }

    #[test]
    fn threshold_scales_with_area_width() {
        let d = detector();
        assert_eq!(d.threshold_for(Rect::new(0.0, 0.0, 260.0, 200.0)), 20.0);
        assert_eq!(d.threshold_for(Rect::new(0.0, 0.0, 520.0, 400.0)), 40.0);

        let fixed = ProximityDetector::new(
            ProximityConfig {
                reference_area_width: None,
                ..ProximityConfig::default()
            },
            Vec2::new(40.0, 60.0),
        );
        assert_eq!(fixed.threshold_for(Rect::new(0.0, 0.0, 520.0, 400.0)), 20.0);
    }

    fn layout_with_cake(cake: Rect) -> StaticLayout {
        StaticLayout::new(Rect::new(0.0, 0.0, 800.0, 600.0))
            .with_cake_area(Rect::new(0.0, 0.0, 260.0, 200.0))
            .with_cake_sprite(cake)
            .with_match_sprite(Rect::new(0.0, 0.0, 40.0, 60.0))
    }

    #[test]
    fn evaluate_uses_match_tip_and_candle_anchor() {
        // Match at (110, 70): tip at (130, 70). Anchor = (left + 60, top + 10).
        let pos = MatchPosition { x: 110.0, y: 70.0 };
        let near = layout_with_cake(Rect::new(70.0, 65.0, 120.0, 90.0)); // anchor (130, 75), 5 px
        assert!(detector().evaluate(SceneState::Unlit, pos, &near));

        let far = layout_with_cake(Rect::new(70.0, 80.0, 120.0, 90.0)); // anchor (130, 90), 20 px
        assert!(!detector().evaluate(SceneState::Unlit, pos, &far));
    }

    #[test]
    fn missing_geometry_never_ignites() {
        let layout = StaticLayout::new(Rect::new(0.0, 0.0, 800.0, 600.0));
        assert!(!detector().evaluate(SceneState::Unlit, MatchPosition::default(), &layout));
    }

    struct CountingLayout {
        inner: StaticLayout,
        reads: Cell<u32>,
    }

    impl LayoutProvider for CountingLayout {
        fn cake_area(&self) -> Option<Rect> {
            self.reads.set(self.reads.get() + 1);
            self.inner.cake_area()
        }
        fn cake_sprite(&self) -> Option<Rect> {
            self.reads.set(self.reads.get() + 1);
            self.inner.cake_sprite()
        }
        fn match_sprite(&self) -> Option<Rect> {
            self.reads.set(self.reads.get() + 1);
            self.inner.match_sprite()
        }
        fn sparkle_source(&self) -> Option<Rect> {
            None
        }
        fn viewport(&self) -> Rect {
            self.inner.viewport()
        }
    }

    #[test]
    fn skipped_without_layout_reads_once_lit() {
        let layout = CountingLayout {
            inner: layout_with_cake(Rect::new(70.0, 65.0, 120.0, 90.0)),
            reads: Cell::new(0),
        };
        let pos = MatchPosition { x: 110.0, y: 70.0 };
        let d = detector();
        assert!(!d.evaluate(SceneState::Lit, pos, &layout));
        assert!(!d.evaluate(SceneState::Extinguished, pos, &layout));
        assert_eq!(layout.reads.get(), 0);

        assert!(d.evaluate(SceneState::Unlit, pos, &layout));
        assert_eq!(layout.reads.get(), 3);
    }
}
