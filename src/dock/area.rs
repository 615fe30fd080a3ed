//! Dock areas, container features and creation specs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Edge of the main window a dock container attaches to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DockArea {
    Left,
    #[default]
    Right,
    Top,
    Bottom,
}

impl DockArea {
    pub fn as_str(&self) -> &'static str {
        match self {
            DockArea::Left => "left",
            DockArea::Right => "right",
            DockArea::Top => "top",
            DockArea::Bottom => "bottom",
        }
    }

    /// All dock areas for iteration
    pub const ALL: [DockArea; 4] = [
        DockArea::Left,
        DockArea::Right,
        DockArea::Top,
        DockArea::Bottom,
    ];
}

impl fmt::Display for DockArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DockArea {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(DockArea::Left),
            "right" => Ok(DockArea::Right),
            "top" => Ok(DockArea::Top),
            "bottom" => Ok(DockArea::Bottom),
            other => Err(format!("Unknown dock area: {}", other)),
        }
    }
}

/// Interaction features of a dock container
///
/// Containers are always movable between areas; closing and floating
/// can be turned off per view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockFeatures {
    pub closable: bool,
    pub floatable: bool,
    pub movable: bool,
}

impl Default for DockFeatures {
    fn default() -> Self {
        Self {
            closable: true,
            floatable: true,
            movable: true,
        }
    }
}

/// Toolkit-issued identifier for a dock container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DockHandle(pub u64);

/// Creation parameters for a dock container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockSpec {
    /// Object name and window title of the container (the view's display name)
    pub name: String,
    /// Area the container is first placed in
    pub area: DockArea,
    pub features: DockFeatures,
    /// Areas the user may move the container to
    pub allowed_areas: Vec<DockArea>,
}

impl DockSpec {
    pub fn new(name: impl Into<String>, area: DockArea) -> Self {
        Self {
            name: name.into(),
            area,
            features: DockFeatures::default(),
            allowed_areas: DockArea::ALL.to_vec(),
        }
    }

    /// Set the closable / floatable flags (builder pattern)
    pub fn with_features(mut self, closable: bool, floatable: bool) -> Self {
        self.features.closable = closable;
        self.features.floatable = floatable;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_area_is_right() {
        assert_eq!(DockArea::default(), DockArea::Right);
    }

    #[test]
    fn test_area_from_str() {
        assert_eq!("left".parse::<DockArea>(), Ok(DockArea::Left));
        assert_eq!("Bottom".parse::<DockArea>(), Ok(DockArea::Bottom));
        assert!("middle".parse::<DockArea>().is_err());
    }

    #[test]
    fn test_spec_allows_every_area_and_is_movable() {
        let spec = DockSpec::new("WaveformView", DockArea::Left).with_features(false, true);
        assert_eq!(spec.allowed_areas.len(), 4);
        assert!(spec.features.movable);
        assert!(!spec.features.closable);
        assert!(spec.features.floatable);
    }

    #[test]
    fn test_area_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&DockArea::Top).unwrap(), "\"top\"");
    }
}
