//! Focus session lifecycle configuration.

use serde::{Deserialize, Serialize};

/// How status transitions on a focus session are validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransitionMode {
    /// Only edges of the lifecycle graph are accepted; terminal sessions are frozen.
    #[default]
    Strict,
    /// Any status may overwrite any other (legacy behavior).
    Permissive,
}

/// Focus session configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionConfig {
    /// Transition validation mode.
    #[serde(default)]
    pub transition_mode: TransitionMode,
}
