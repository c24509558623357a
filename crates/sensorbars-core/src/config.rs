//! Card configuration schema.
//!
//! Deserialized from host-supplied JSON. Every field is individually
//! defaulted, so a partially supplied `grid` object merges shallowly with
//! the grid defaults and unknown keys are ignored. Domain invariants the
//! renderer relies on are checked by [`CardConfig::validate`], which hosts
//! are expected to call once at setup.

use crate::action::TapActionConfig;
use crate::EntityId;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid card configuration: {0}")]
    Schema(#[from] serde_json::Error),

    #[error("grid.max ({max}) must be greater than grid.min ({min}) on a linear scale")]
    InvalidLinearRange { min: f64, max: f64 },

    #[error("grid.max ({max}) must be positive on a logarithmic scale")]
    NonPositiveLogMax { max: f64 },

    #[error("grid.lines must be at least 1")]
    NoGridLines,
}

// ============================================================================
// SCALE MODE
// ============================================================================

/// Resolved vertical scale of the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleMode {
    /// Values mapped proportionally into `[grid.min, grid.max]`.
    Linear,
    /// `log10(|v| + 1)` magnitude, mirrored around a centered zero line.
    LogSymmetric,
    /// `log10(|v| + 1)` magnitude, bars grow upward from the bottom only.
    LogPositive,
}

/// Which logarithmic variant applies when `logarithmic` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogMode {
    #[default]
    Symmetric,
    Positive,
}

// ============================================================================
// CARD CONFIG
// ============================================================================

/// Top-level widget configuration, immutable per render cycle.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    pub title: String,
    /// Title font size in pixels.
    pub font_size: f64,
    /// Fallback decimal count for bar value labels.
    pub decimals: u32,
    /// Decimal count for derived statistics; recognized for host configs
    /// that set it, not consumed by the bar renderer.
    pub stat_decimals: u32,
    /// Separator substituted into every formatted numeric label.
    pub decimal_separator: String,
    pub logarithmic: bool,
    pub logarithmic_mode: LogMode,
    /// Linear mode only: center the zero line instead of anchoring it by
    /// the grid range.
    pub symmetric: bool,
    pub grid: GridConfig,
    pub max_marker: MaxMarkerConfig,
    /// Render order, left to right.
    pub bars: Vec<BarConfig>,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            font_size: 18.0,
            decimals: 3,
            stat_decimals: 1,
            decimal_separator: ".".to_string(),
            logarithmic: false,
            logarithmic_mode: LogMode::default(),
            symmetric: false,
            grid: GridConfig::default(),
            max_marker: MaxMarkerConfig::default(),
            bars: Vec::new(),
        }
    }
}

impl CardConfig {
    /// Deserialize a configuration from a JSON value; missing keys take
    /// their defaults, unknown keys are ignored.
    pub fn from_json(value: serde_json::Value) -> Result<Self, ConfigError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Deserialize a configuration from JSON text.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Resolve the `logarithmic`/`logarithmic_mode` flags into a scale mode.
    pub fn scale_mode(&self) -> ScaleMode {
        if !self.logarithmic {
            ScaleMode::Linear
        } else {
            match self.logarithmic_mode {
                LogMode::Symmetric => ScaleMode::LogSymmetric,
                LogMode::Positive => ScaleMode::LogPositive,
            }
        }
    }

    /// Check the domain invariants the scale arithmetic relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.lines < 1 {
            return Err(ConfigError::NoGridLines);
        }
        match self.scale_mode() {
            ScaleMode::Linear => {
                if self.grid.max <= self.grid.min {
                    return Err(ConfigError::InvalidLinearRange {
                        min: self.grid.min,
                        max: self.grid.max,
                    });
                }
            }
            ScaleMode::LogSymmetric | ScaleMode::LogPositive => {
                if self.grid.max <= 0.0 {
                    return Err(ConfigError::NonPositiveLogMax { max: self.grid.max });
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// GRID CONFIG
// ============================================================================

/// Gridline, tick label, and axis styling.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub min: f64,
    pub max: f64,
    /// Number of grid intervals; `lines + 1` ticks are drawn.
    pub lines: u32,
    /// Decimal count for tick labels.
    pub decimal: u32,
    pub color: String,
    pub width: f64,
    pub dash: String,
    pub font_size: f64,
    pub font_size_unit: f64,
    pub font_color: String,
    pub unit: String,
    pub axis_color: String,
    pub axis_width: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            lines: 5,
            decimal: 1,
            color: crate::colors::GRID.to_string(),
            width: 1.0,
            dash: "3,2".to_string(),
            font_size: 10.0,
            font_size_unit: 20.0,
            font_color: crate::colors::GRID_LABEL.to_string(),
            unit: String::new(),
            axis_color: crate::colors::AXIS.to_string(),
            axis_width: 1.5,
        }
    }
}

// ============================================================================
// MAX MARKER CONFIG
// ============================================================================

/// Styling of the optional per-bar maximum marker.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MaxMarkerConfig {
    /// Marker rectangle height in pixels.
    pub height: f64,
    pub color: String,
    pub font_size: f64,
    /// Decimal count for the marker label, independent of the bar's.
    pub decimal: u32,
}

impl Default for MaxMarkerConfig {
    fn default() -> Self {
        Self {
            height: 2.0,
            color: crate::colors::MARKER.to_string(),
            font_size: 10.0,
            decimal: 1,
        }
    }
}

// ============================================================================
// BAR CONFIG
// ============================================================================

/// One bar of the chart.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BarConfig {
    /// Legacy single-entity form.
    pub entity: Option<EntityId>,
    /// Grouped form; values of all listed entities are summed. Takes
    /// precedence over `entity` when present.
    pub entities: Option<Vec<EntityId>>,
    /// Entity whose value positions the max marker.
    pub max_entity: Option<EntityId>,
    pub color: String,
    pub font_size: f64,
    /// Decimal count for the value label; falls back to the card-level
    /// `decimals` when unset.
    pub decimals: Option<u32>,
    /// Label drawn below the plot area.
    pub name: Option<String>,
    pub tap_action: Option<TapActionConfig>,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            entity: None,
            entities: None,
            max_entity: None,
            color: crate::colors::BAR.to_string(),
            font_size: 12.0,
            decimals: None,
            name: None,
            tap_action: None,
        }
    }
}

impl BarConfig {
    /// Entities whose values are summed into the bar value.
    pub fn keys(&self) -> &[EntityId] {
        match (&self.entities, &self.entity) {
            (Some(list), _) => list.as_slice(),
            (None, Some(single)) => std::slice::from_ref(single),
            (None, None) => &[],
        }
    }

    /// The identifier a `more-info` activation refers to.
    pub fn primary_entity(&self) -> Option<&EntityId> {
        self.entity
            .as_ref()
            .or_else(|| self.entities.as_ref().and_then(|list| list.first()))
    }

    /// Decimal count for the value label, with the card-level fallback.
    pub fn label_decimals(&self, card: &CardConfig) -> u32 {
        self.decimals.unwrap_or(card.decimals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let cfg = CardConfig::default();
        assert_eq!(cfg.font_size, 18.0);
        assert_eq!(cfg.decimals, 3);
        assert_eq!(cfg.stat_decimals, 1);
        assert!(!cfg.logarithmic);
        assert_eq!(cfg.grid.min, 0.0);
        assert_eq!(cfg.grid.max, 100.0);
        assert_eq!(cfg.grid.lines, 5);
        assert_eq!(cfg.grid.dash, "3,2");
        assert_eq!(cfg.grid.axis_width, 1.5);
        assert_eq!(cfg.max_marker.height, 2.0);
        assert_eq!(cfg.scale_mode(), ScaleMode::Linear);
    }

    #[test]
    fn test_grid_merges_shallowly() {
        let cfg = CardConfig::from_json(json!({
            "grid": { "max": 500.0, "unit": "W" }
        }))
        .unwrap();
        assert_eq!(cfg.grid.max, 500.0);
        assert_eq!(cfg.grid.unit, "W");
        // untouched grid keys keep their defaults
        assert_eq!(cfg.grid.min, 0.0);
        assert_eq!(cfg.grid.lines, 5);
        assert_eq!(cfg.grid.color, "#999");
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let cfg = CardConfig::from_json(json!({
            "title": "Power",
            "some_future_option": true,
            "grid": { "max": 10.0, "also_unknown": 1 }
        }))
        .unwrap();
        assert_eq!(cfg.title, "Power");
        assert_eq!(cfg.grid.max, 10.0);
    }

    #[test]
    fn test_scale_mode_resolution() {
        let mut cfg = CardConfig::default();
        cfg.logarithmic = true;
        assert_eq!(cfg.scale_mode(), ScaleMode::LogSymmetric);
        cfg.logarithmic_mode = LogMode::Positive;
        assert_eq!(cfg.scale_mode(), ScaleMode::LogPositive);
    }

    #[test]
    fn test_logarithmic_mode_parses() {
        let cfg = CardConfig::from_json(json!({
            "logarithmic": true,
            "logarithmic_mode": "positive"
        }))
        .unwrap();
        assert_eq!(cfg.scale_mode(), ScaleMode::LogPositive);
    }

    #[test]
    fn test_legacy_single_entity() {
        let bar: BarConfig =
            serde_json::from_value(json!({ "entity": "sensor.a" })).unwrap();
        assert_eq!(bar.keys(), &[EntityId::new("sensor.a")]);
        assert_eq!(bar.primary_entity(), Some(&EntityId::new("sensor.a")));
    }

    #[test]
    fn test_grouped_entities_take_precedence() {
        let bar: BarConfig = serde_json::from_value(json!({
            "entity": "sensor.single",
            "entities": ["sensor.a", "sensor.b"]
        }))
        .unwrap();
        assert_eq!(
            bar.keys(),
            &[EntityId::new("sensor.a"), EntityId::new("sensor.b")]
        );
        // the legacy field still names the primary entity
        assert_eq!(bar.primary_entity(), Some(&EntityId::new("sensor.single")));
    }

    #[test]
    fn test_empty_entities_list_means_no_keys() {
        let bar: BarConfig = serde_json::from_value(json!({
            "entity": "sensor.single",
            "entities": []
        }))
        .unwrap();
        assert!(bar.keys().is_empty());
    }

    #[test]
    fn test_validate_linear_range() {
        let cfg = CardConfig::from_json(json!({
            "grid": { "min": 100.0, "max": 100.0 }
        }))
        .unwrap();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidLinearRange { .. })
        ));
    }

    #[test]
    fn test_validate_log_max() {
        let cfg = CardConfig::from_json(json!({
            "logarithmic": true,
            "grid": { "min": -5.0, "max": 0.0 }
        }))
        .unwrap();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NonPositiveLogMax { .. })
        ));
    }

    #[test]
    fn test_label_decimals_fallback() {
        let card = CardConfig::default();
        let mut bar = BarConfig::default();
        assert_eq!(bar.label_decimals(&card), 3);
        bar.decimals = Some(0);
        assert_eq!(bar.label_decimals(&card), 0);
    }
}
