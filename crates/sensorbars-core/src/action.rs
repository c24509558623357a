//! Tap-action configuration and activation descriptors.
//!
//! The widget only *produces* a descriptor when a bar is activated;
//! executing it (opening a window, mutating history, raising a detail
//! dialog) is the host's responsibility.

use crate::config::BarConfig;
use crate::EntityId;
use serde::{Deserialize, Serialize};

// ============================================================================
// TAP ACTION SCHEMA
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TapActionKind {
    #[default]
    None,
    Url,
    Navigate,
    MoreInfo,
}

/// Per-bar tap behavior as configured by the host.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TapActionConfig {
    pub action: TapActionKind,
    pub url_path: Option<String>,
    pub navigation_path: Option<String>,
}

// ============================================================================
// ACTIVATION DESCRIPTORS
// ============================================================================

/// Instruction handed to the host when a bar is activated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Action {
    /// Open an external URL.
    OpenUrl(String),
    /// Navigate the host shell to a path.
    Navigate(String),
    /// Show the detail view for an entity.
    MoreInfo(EntityId),
}

impl BarConfig {
    /// Resolve this bar's tap action into an activation descriptor.
    ///
    /// Returns `None` for an absent/`none` action, and for actions whose
    /// required payload (path, primary entity) is missing.
    pub fn resolve_action(&self) -> Option<Action> {
        let tap = self.tap_action.as_ref()?;
        match tap.action {
            TapActionKind::None => None,
            TapActionKind::Url => tap.url_path.clone().map(Action::OpenUrl),
            TapActionKind::Navigate => tap.navigation_path.clone().map(Action::Navigate),
            TapActionKind::MoreInfo => self.primary_entity().cloned().map(Action::MoreInfo),
        }
    }
}
