//! Value→pixel scale transforms and gridline tick generation.
//!
//! One parameterized engine covers all three scale modes; the renderer,
//! max markers, and axis ticks all go through it so the geometry stays
//! consistent per mode.

use sensorbars_core::{CardConfig, ScaleMode, ValueFormatter};
use serde::Serialize;

/// Vertical displacement of a value from the baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Offset {
    /// Unsigned pixel magnitude.
    pub magnitude: f64,
    /// Whether the displacement points above the baseline.
    pub upward: bool,
}

/// One gridline with its label, in inner-plot coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridTick {
    pub y: f64,
    pub value: f64,
    pub label: String,
}

/// Scale engine for one render pass.
///
/// Contract: `max > min` in linear mode, `max > 0` in the logarithmic
/// modes (values are offset by +1 before `log10`, so 0 stays in domain).
/// Violations produce degenerate geometry, never a panic.
#[derive(Debug, Clone, Copy)]
pub struct BarScale {
    mode: ScaleMode,
    min: f64,
    max: f64,
    symmetric: bool,
    height: f64,
}

impl BarScale {
    pub fn new(mode: ScaleMode, min: f64, max: f64, symmetric: bool, height: f64) -> Self {
        Self {
            mode,
            min,
            max,
            symmetric,
            height,
        }
    }

    /// Engine for the resolved card configuration and inner plot height.
    pub fn from_config(cfg: &CardConfig, height: f64) -> Self {
        Self::new(
            cfg.scale_mode(),
            cfg.grid.min,
            cfg.grid.max,
            cfg.symmetric,
            height,
        )
    }

    pub fn mode(&self) -> ScaleMode {
        self.mode
    }

    /// Pixel y of the zero line, measured from the top of the plot.
    ///
    /// Linear anchors zero by the grid range (`height * max / (max - min)`),
    /// which can leave `[0, height]` when `min > 0`; that anchoring is kept
    /// as-is. The symmetric flag centers it instead.
    pub fn baseline(&self) -> f64 {
        match self.mode {
            ScaleMode::Linear => {
                if self.symmetric {
                    self.height / 2.0
                } else {
                    self.height * (self.max / (self.max - self.min))
                }
            }
            ScaleMode::LogSymmetric => self.height / 2.0,
            ScaleMode::LogPositive => self.height,
        }
    }

    /// Displacement of `value` from the baseline.
    ///
    /// Linear clamps into `[min, max]` and takes the direction from the
    /// clamped sign, so out-of-range values collapse to the nearest bound.
    /// The logarithmic modes never clamp; values past `max` overshoot the
    /// last gridline. Positive-log geometry always points upward.
    pub fn offset(&self, value: f64) -> Offset {
        match self.mode {
            ScaleMode::Linear => {
                let clamped = value.min(self.max).max(self.min);
                Offset {
                    magnitude: clamped.abs() / (self.max - self.min) * self.height,
                    upward: clamped >= 0.0,
                }
            }
            ScaleMode::LogSymmetric => Offset {
                magnitude: self.log_fraction(value) * self.height / 2.0,
                upward: value >= 0.0,
            },
            ScaleMode::LogPositive => Offset {
                magnitude: self.log_fraction(value) * self.height,
                upward: true,
            },
        }
    }

    /// Pixel y the value maps to: baseline shifted by its offset.
    pub fn y_for(&self, value: f64) -> f64 {
        let off = self.offset(value);
        if off.upward {
            self.baseline() - off.magnitude
        } else {
            self.baseline() + off.magnitude
        }
    }

    fn log_fraction(&self, value: f64) -> f64 {
        let abs = value.abs();
        if abs > 0.0 {
            (abs + 1.0).log10() / (self.max + 1.0).log10()
        } else {
            0.0
        }
    }

    /// Ordered gridline ticks for axis rendering.
    ///
    /// `lines + 1` base ticks; the symmetric-log mode mirrors every
    /// non-zero tick below the baseline with a negated label, emitted
    /// directly after its positive counterpart.
    pub fn ticks(&self, lines: u32, fmt: &dyn ValueFormatter) -> Vec<GridTick> {
        let lines_f = lines as f64;
        match self.mode {
            ScaleMode::Linear => {
                let step = (self.max - self.min) / lines_f;
                (0..=lines)
                    .map(|i| {
                        let value = self.min + i as f64 * step;
                        GridTick {
                            y: self.height - (i as f64 / lines_f) * self.height,
                            value,
                            label: fmt.format(value),
                        }
                    })
                    .collect()
            }
            ScaleMode::LogSymmetric => {
                let log_max = (self.max + 1.0).log10();
                let center = self.height / 2.0;
                let mut ticks = Vec::with_capacity(2 * lines as usize + 1);
                for i in 0..=lines {
                    let fraction = i as f64 / lines_f;
                    let value = 10f64.powf(fraction * log_max) - 1.0;
                    let y_offset = fraction * self.height / 2.0;
                    let label = fmt.format(value);
                    ticks.push(GridTick {
                        y: center - y_offset,
                        value,
                        label: label.clone(),
                    });
                    if i > 0 {
                        ticks.push(GridTick {
                            y: center + y_offset,
                            value: -value,
                            label: format!("-{label}"),
                        });
                    }
                }
                ticks
            }
            ScaleMode::LogPositive => {
                let log_max = (self.max + 1.0).log10();
                (0..=lines)
                    .map(|i| {
                        let fraction = i as f64 / lines_f;
                        let value = 10f64.powf(fraction * log_max) - 1.0;
                        GridTick {
                            y: self.height - fraction * self.height,
                            value,
                            label: fmt.format(value),
                        }
                    })
                    .collect()
            }
        }
    }
}
