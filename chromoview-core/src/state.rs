//! Persisted viewer state and its reducer

use crate::viewport::Transform;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SPECIES: &str = "Arabidopsis_thaliana";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerState {
    pub transform: Transform,
    pub species: String,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            transform: Transform::new(300.0, 150.0, 0.7),
            species: DEFAULT_SPECIES.to_string(),
        }
    }
}

/// Actions dispatched by the viewer, serialized as `{"type": "set-transform", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ViewerAction {
    SetTransform { transform: Transform },
}

/// Fold an action into the state. The transform is replaced as a whole.
pub fn reduce(state: ViewerState, action: ViewerAction) -> ViewerState {
    match action {
        ViewerAction::SetTransform { transform } => ViewerState { transform, ..state },
    }
}
