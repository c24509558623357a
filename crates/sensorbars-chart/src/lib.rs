//! # sensorbars-chart
//!
//! Bar chart rendering for the sensorbars dashboard widget.
//!
//! The renderer is a pure function from (configuration, state lookup,
//! surface size) to a list of vector drawing primitives; no reactivity,
//! no retained state. The host calls [`barchart::render`] whenever any of
//! its inputs change and paints the returned [`Scene`] with whatever
//! backend it has; [`svg::write_svg`] is a ready-made one.
//!
//! ## Modules
//!
//! - `scale` - value→pixel transforms and gridline tick generation
//! - `primitive` - renderer-agnostic drawing primitives and hit regions
//! - `barchart` - the grid/bars/markers/title render pipeline
//! - `svg` - serializes a scene into a standalone SVG document

pub mod barchart;
pub mod primitive;
pub mod scale;
pub mod svg;

pub use barchart::render;
pub use primitive::{
    FontWeight, HitRegion, LineShape, Primitive, RectShape, Scene, TextAnchor, TextBaseline,
    TextShape,
};
pub use scale::{BarScale, GridTick, Offset};
pub use svg::write_svg;

/// Surface size assumed when the host has not laid the widget out yet.
pub const FALLBACK_WIDTH: f64 = 300.0;
pub const FALLBACK_HEIGHT: f64 = 200.0;

/// Chart margin configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ChartMargin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn uniform(margin: f64) -> Self {
        Self::new(margin, margin, margin, margin)
    }

    /// The card's margin rule: fixed top/right/bottom, left widened by the
    /// rotated unit label's font size.
    pub const fn for_unit_label(font_size_unit: f64) -> Self {
        Self::new(40.0, 20.0, 30.0, 25.0 + font_size_unit)
    }
}

impl Default for ChartMargin {
    fn default() -> Self {
        Self::for_unit_label(20.0)
    }
}

/// Chart dimensions with margin handling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartDimensions {
    pub width: f64,
    pub height: f64,
    pub margin: ChartMargin,
}

impl ChartDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margin: ChartMargin::default(),
        }
    }

    /// Host-supplied size with the 300×200 fallback for dimensions the
    /// layout has not resolved yet.
    pub fn from_host(width: f64, height: f64) -> Self {
        Self::new(
            if width > 0.0 { width } else { FALLBACK_WIDTH },
            if height > 0.0 { height } else { FALLBACK_HEIGHT },
        )
    }

    pub fn with_margin(mut self, margin: ChartMargin) -> Self {
        self.margin = margin;
        self
    }

    /// Inner plot width (excluding margins), never negative.
    pub fn inner_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    /// Inner plot height (excluding margins), never negative.
    pub fn inner_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }

    /// ViewBox string for SVG
    pub fn viewbox(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }
}

impl Default for ChartDimensions {
    fn default() -> Self {
        Self::new(FALLBACK_WIDTH, FALLBACK_HEIGHT)
    }
}
