//! Viewport - the scale/translate transform between graph and screen space.

use serde::{Deserialize, Serialize};

use crate::layout::Vec2;

/// The viewport transform mapping graph coordinates to screen coordinates.
///
/// `screen = graph * scale + translate`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Viewport {
    pub scale: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }
}

/// Tunables for viewport behavior.
#[derive(Debug, Clone)]
pub struct ViewportConfig {
    /// Viewport size in screen pixels.
    pub width: f32,
    pub height: f32,

    /// Zoom scale bounds.
    pub min_zoom: f32,
    pub max_zoom: f32,

    /// Padding around content for `zoom_to_fit`, in screen pixels.
    pub fit_padding: f32,

    /// How many pixels of content must stay inside the viewport when
    /// panning.
    pub pan_margin: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            min_zoom: 0.1,
            max_zoom: 10.0,
            fit_padding: 40.0,
            pan_margin: 60.0,
        }
    }
}

/// An axis-aligned bounding box in graph coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    /// Bounding box of a set of points, each expanded by `radius`.
    /// `None` when the set is empty.
    pub fn around_points<I>(points: I, radius: f32) -> Option<Self>
    where
        I: IntoIterator<Item = Vec2>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self {
            min_x: first.x - radius,
            min_y: first.y - radius,
            max_x: first.x + radius,
            max_y: first.y + radius,
        };
        for p in iter {
            bounds.min_x = bounds.min_x.min(p.x - radius);
            bounds.min_y = bounds.min_y.min(p.y - radius);
            bounds.max_x = bounds.max_x.max(p.x + radius);
            bounds.max_y = bounds.max_y.max(p.y + radius);
        }
        Some(bounds)
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}

/// Owns the viewport transform; the only component allowed to mutate it.
#[derive(Debug, Clone)]
pub struct ViewportController {
    config: ViewportConfig,
    viewport: Viewport,
}

impl ViewportController {
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            config,
            viewport: Viewport::default(),
        }
    }

    /// The current transform.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Rescale around a focal point (screen coordinates) so the graph
    /// point under the focal stays put on screen. Scale is clamped to
    /// the configured zoom bounds.
    pub fn zoom_by(&mut self, factor: f32, focal: (f32, f32)) {
        let new_scale = (self.viewport.scale * factor).clamp(self.config.min_zoom, self.config.max_zoom);
        let ratio = new_scale / self.viewport.scale;
        let (fx, fy) = focal;

        self.viewport.translate_x = fx - (fx - self.viewport.translate_x) * ratio;
        self.viewport.translate_y = fy - (fy - self.viewport.translate_y) * ratio;
        self.viewport.scale = new_scale;
    }

    /// Fit the given content bounds into the viewport with the configured
    /// padding. Scale is clamped; at the clamp limit the content is
    /// centered even though it cannot exactly fit.
    pub fn zoom_to_fit(&mut self, bounds: Bounds) {
        let usable_w = (self.config.width - 2.0 * self.config.fit_padding).max(1.0);
        let usable_h = (self.config.height - 2.0 * self.config.fit_padding).max(1.0);

        let scale = (usable_w / bounds.width().max(1.0))
            .min(usable_h / bounds.height().max(1.0))
            .clamp(self.config.min_zoom, self.config.max_zoom);

        let center = bounds.center();
        self.viewport.scale = scale;
        self.viewport.translate_x = self.config.width / 2.0 - center.x * scale;
        self.viewport.translate_y = self.config.height / 2.0 - center.y * scale;
    }

    /// Pan by a screen-space delta, clamped so the content box keeps at
    /// least `pan_margin` pixels inside the viewport.
    pub fn pan_by(&mut self, dx: f32, dy: f32, content: Option<Bounds>) {
        self.viewport.translate_x += dx;
        self.viewport.translate_y += dy;

        let Some(bounds) = content else { return };
        let s = self.viewport.scale;
        let m = self.config.pan_margin;

        // translate such that scale * max >= margin and
        // scale * min <= viewport size - margin.
        let lo_x = m - bounds.max_x * s;
        let hi_x = self.config.width - m - bounds.min_x * s;
        let lo_y = m - bounds.max_y * s;
        let hi_y = self.config.height - m - bounds.min_y * s;

        self.viewport.translate_x = clamp_ordered(self.viewport.translate_x, lo_x, hi_x);
        self.viewport.translate_y = clamp_ordered(self.viewport.translate_y, lo_y, hi_y);
    }

    /// Map a screen point to graph coordinates.
    pub fn screen_to_graph(&self, sx: f32, sy: f32) -> Vec2 {
        Vec2::new(
            (sx - self.viewport.translate_x) / self.viewport.scale,
            (sy - self.viewport.translate_y) / self.viewport.scale,
        )
    }

    /// Map a graph point to screen coordinates.
    pub fn graph_to_screen(&self, p: Vec2) -> (f32, f32) {
        (
            p.x * self.viewport.scale + self.viewport.translate_x,
            p.y * self.viewport.scale + self.viewport.translate_y,
        )
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }
}

/// Clamp that tolerates an inverted range (possible when content is larger
/// than the viewport); collapses to the range midpoint in that case.
fn clamp_ordered(value: f32, lo: f32, hi: f32) -> f32 {
    if lo <= hi {
        value.clamp(lo, hi)
    } else {
        (lo + hi) / 2.0
    }
}
