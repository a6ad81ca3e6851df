//! Which hazard layers the user has asked to see.

use crate::layer::LayerKind;
use serde::Serialize;
use std::{collections::BTreeSet, fmt, str::FromStr};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityMode {
    #[default]
    Glof,
    Flood,
    Both,
}

impl VisibilityMode {
    /// Layers the mode asks for, whether or not they exist yet.
    pub fn layers(&self) -> BTreeSet<LayerKind> {
        match self {
            VisibilityMode::Glof => BTreeSet::from([LayerKind::Glof]),
            VisibilityMode::Flood => BTreeSet::from([LayerKind::Flood]),
            VisibilityMode::Both => BTreeSet::from([LayerKind::Glof, LayerKind::Flood]),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VisibilityMode::Glof => "glof",
            VisibilityMode::Flood => "flood",
            VisibilityMode::Both => "both",
        }
    }
}

impl fmt::Display for VisibilityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisibilityMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "glof" => Ok(VisibilityMode::Glof),
            "flood" => Ok(VisibilityMode::Flood),
            "both" => Ok(VisibilityMode::Both),
            other => Err(format!("unknown layer mode: {}", other)),
        }
    }
}

/// Layers to add to and remove from the render surface.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct LayerDiff {
    pub add: Vec<LayerKind>,
    pub remove: Vec<LayerKind>,
}

impl LayerDiff {
    pub fn between(current: &BTreeSet<LayerKind>, desired: &BTreeSet<LayerKind>) -> Self {
        Self {
            add: desired.difference(current).copied().collect(),
            remove: current.difference(desired).copied().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty()
    }
}
