use cake_engine::{LayoutProvider, Rect};
use web_sys::{Document, Window};

/// CSS selectors of the elements the core reads geometry from.
pub struct Selectors {
    pub cake_area: &'static str,
    pub cake_sprite: &'static str,
    pub match_sprite: &'static str,
    pub sparkle_source: &'static str,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            cake_area: ".cake-area",
            cake_sprite: ".cake",
            match_sprite: ".match",
            sparkle_source: ".sky-plane",
        }
    }
}

/// Live DOM geometry. Every call goes to `getBoundingClientRect`, nothing is cached.
pub struct DomLayout {
    window: Window,
    document: Document,
    selectors: Selectors,
}

impl DomLayout {
    /// `None` outside a browser main thread.
    pub fn new(selectors: Selectors) -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self {
            window,
            document,
            selectors,
        })
    }

    fn rect_of(&self, selector: &str) -> Option<Rect> {
        let element = self.document.query_selector(selector).ok()??;
        let r = element.get_bounding_client_rect();
        Some(Rect::new(
            r.left() as f32,
            r.top() as f32,
            r.width() as f32,
            r.height() as f32,
        ))
    }
}

impl LayoutProvider for DomLayout {
    fn cake_area(&self) -> Option<Rect> {
        self.rect_of(self.selectors.cake_area)
    }

    fn cake_sprite(&self) -> Option<Rect> {
        self.rect_of(self.selectors.cake_sprite)
    }

    fn match_sprite(&self) -> Option<Rect> {
        self.rect_of(self.selectors.match_sprite)
    }

    fn sparkle_source(&self) -> Option<Rect> {
        self.rect_of(self.selectors.sparkle_source)
    }

    fn viewport(&self) -> Rect {
        let width = self
            .window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let height = self
            .window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        Rect::new(0.0, 0.0, width as f32, height as f32)
    }
}
