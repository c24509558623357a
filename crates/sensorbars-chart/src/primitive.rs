//! Renderer-agnostic drawing primitives.
//!
//! A render pass produces a fresh [`Scene`]: an ordered list of
//! primitives in full-surface coordinates plus the clickable footprint of
//! each bar. Primitives are plain data; any immediate-mode vector
//! backend (SVG, canvas, skia) can paint them.

use serde::Serialize;

// ============================================================================
// TEXT ATTRIBUTES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextBaseline {
    #[default]
    Auto,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

// ============================================================================
// SHAPES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineShape {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke: String,
    pub stroke_width: f64,
    /// SVG-style dash pattern, e.g. "3,2"; `None` for a solid line.
    pub dash: Option<String>,
}

impl LineShape {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke: impl Into<String>) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke: stroke.into(),
            stroke_width: 1.0,
            dash: None,
        }
    }

    pub fn stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = width;
        self
    }

    pub fn dash(mut self, pattern: impl Into<String>) -> Self {
        self.dash = Some(pattern.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RectShape {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: String,
}

impl RectShape {
    pub fn new(x: f64, y: f64, width: f64, height: f64, fill: impl Into<String>) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill: fill.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextShape {
    pub x: f64,
    pub y: f64,
    pub content: String,
    pub font_size: f64,
    pub fill: String,
    pub anchor: TextAnchor,
    pub baseline: TextBaseline,
    pub weight: FontWeight,
    /// Rotation in degrees about `(x, y)`, for the vertical unit label.
    pub rotate: Option<f64>,
}

impl TextShape {
    pub fn new(
        x: f64,
        y: f64,
        content: impl Into<String>,
        font_size: f64,
        fill: impl Into<String>,
    ) -> Self {
        Self {
            x,
            y,
            content: content.into(),
            font_size,
            fill: fill.into(),
            anchor: TextAnchor::default(),
            baseline: TextBaseline::default(),
            weight: FontWeight::default(),
            rotate: None,
        }
    }

    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn middle_baseline(mut self) -> Self {
        self.baseline = TextBaseline::Middle;
        self
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    pub fn rotate(mut self, degrees: f64) -> Self {
        self.rotate = Some(degrees);
        self
    }
}

// ============================================================================
// PRIMITIVE UNION
// ============================================================================

/// One vector drawing instruction, in full-surface coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Primitive {
    Line(LineShape),
    Rect(RectShape),
    Text(TextShape),
}

// ============================================================================
// SCENE
// ============================================================================

/// Clickable footprint of one bar, in full-surface coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HitRegion {
    /// Index into the configured bar sequence.
    pub bar: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl HitRegion {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Output of one render pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub primitives: Vec<Primitive>,
    pub hit_regions: Vec<HitRegion>,
}

impl Scene {
    /// Index of the bar under the given surface point, if any.
    pub fn hit(&self, x: f64, y: f64) -> Option<usize> {
        self.hit_regions
            .iter()
            .find(|region| region.contains(x, y))
            .map(|region| region.bar)
    }
}
