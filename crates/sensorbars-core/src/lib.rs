//! # sensorbars-core
//!
//! Core domain types for the sensorbars dashboard widget.
//! Implements Strategy pattern for label formatting and keeps the
//! configuration schema and activation descriptors renderer-agnostic.

pub mod action;
pub mod config;

pub use action::*;
pub use config::*;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// ENTITY IDENTIFIERS
// ============================================================================

/// Identifier of a sensor entity in the host's state machine
/// (e.g., "sensor.solar_power").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub String);

impl EntityId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extract the domain prefix (e.g., "sensor" from "sensor.solar_power").
    pub fn domain(&self) -> &str {
        self.0.split('.').next().unwrap_or(&self.0)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ============================================================================
// STATE PROVIDER
// ============================================================================

/// Read-only access to the current raw state of entities.
///
/// The widget only ever reads; the host owns the store and decides when a
/// re-render is due. States are textual; numeric interpretation happens
/// through [`parse_state`].
pub trait StateProvider {
    /// Current raw state for `id`, or `None` when the entity is unknown.
    fn state(&self, id: &EntityId) -> Option<String>;
}

impl StateProvider for HashMap<EntityId, String> {
    fn state(&self, id: &EntityId) -> Option<String> {
        self.get(id).cloned()
    }
}

impl<T: StateProvider + ?Sized> StateProvider for &T {
    fn state(&self, id: &EntityId) -> Option<String> {
        (**self).state(id)
    }
}

/// Interpret a raw state as a finite number.
///
/// Absent states, non-numeric strings, and non-finite parses all map to
/// `None`; callers decide whether that means "contributes 0" (bar sums) or
/// "omit entirely" (max markers).
pub fn parse_state(state: Option<String>) -> Option<f64> {
    let raw = state?;
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

// ============================================================================
// STRATEGY PATTERN: LABEL FORMATTERS
// ============================================================================

/// Strategy trait for formatting numeric labels.
pub trait ValueFormatter: Send + Sync {
    fn format(&self, value: f64) -> String;
}

/// Fixed-point formatter with a configurable decimal separator.
#[derive(Debug, Clone)]
pub struct DecimalFormatter {
    pub decimals: usize,
    pub separator: String,
}

impl DecimalFormatter {
    pub fn new(decimals: usize, separator: impl Into<String>) -> Self {
        Self {
            decimals,
            separator: separator.into(),
        }
    }

    /// Formatter with the given precision and the default "." separator.
    pub fn with_decimals(decimals: usize) -> Self {
        Self::new(decimals, ".")
    }
}

impl Default for DecimalFormatter {
    fn default() -> Self {
        Self::with_decimals(1)
    }
}

impl ValueFormatter for DecimalFormatter {
    fn format(&self, value: f64) -> String {
        let s = format!("{:.prec$}", value, prec = self.decimals);
        if self.separator == "." {
            s
        } else {
            s.replace('.', &self.separator)
        }
    }
}

// ============================================================================
// COLOR CONSTANTS
// ============================================================================

pub mod colors {
    pub const BAR: &str = "#999";
    pub const GRID: &str = "#999";
    pub const GRID_LABEL: &str = "#666";
    pub const AXIS: &str = "#000";
    pub const VALUE_LABEL: &str = "#000";
    pub const NAME_LABEL: &str = "#333";
    pub const MARKER: &str = "#000";
}
