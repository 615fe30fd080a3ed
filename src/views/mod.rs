//! Standard views of the spike-sorting GUI
//!
//! Concrete views are supplied by the application. This module provides
//! the standard view kinds with their preferred dock areas, and a
//! placeholder implementation used by the command-line driver.
//!
//! ## Standard Views
//!
//! - **ClusterView** / **SimilarityView**: cluster tables (left)
//! - **WaveformView**, **FeatureView**, **CorrelogramView**: per-cluster plots (right)
//! - **TraceView** / **AmplitudeView**: time-based plots (bottom)
//! - **ProbeView**: channel layout (left)

mod placeholder;

pub use placeholder::PlaceholderView;

use crate::dock::DockArea;
use crate::view::{View, ViewKind, ViewRegistry};

pub const CLUSTER_VIEW: ViewKind = ViewKind::from_static("ClusterView");
pub const SIMILARITY_VIEW: ViewKind = ViewKind::from_static("SimilarityView");
pub const WAVEFORM_VIEW: ViewKind = ViewKind::from_static("WaveformView");
pub const FEATURE_VIEW: ViewKind = ViewKind::from_static("FeatureView");
pub const TRACE_VIEW: ViewKind = ViewKind::from_static("TraceView");
pub const CORRELOGRAM_VIEW: ViewKind = ViewKind::from_static("CorrelogramView");
pub const AMPLITUDE_VIEW: ViewKind = ViewKind::from_static("AmplitudeView");
pub const PROBE_VIEW: ViewKind = ViewKind::from_static("ProbeView");

/// All standard view kinds, in the order the driver creates them
pub const STANDARD_VIEWS: [ViewKind; 8] = [
    CLUSTER_VIEW,
    SIMILARITY_VIEW,
    WAVEFORM_VIEW,
    FEATURE_VIEW,
    TRACE_VIEW,
    CORRELOGRAM_VIEW,
    AMPLITUDE_VIEW,
    PROBE_VIEW,
];

/// Preferred dock area of a standard view kind (right for anything else)
pub fn default_area(kind: &ViewKind) -> DockArea {
    match kind.as_str() {
        "ClusterView" | "SimilarityView" | "ProbeView" => DockArea::Left,
        "TraceView" | "AmplitudeView" => DockArea::Bottom,
        _ => DockArea::Right,
    }
}

/// Registry creating placeholder views for every standard kind
pub fn default_registry() -> ViewRegistry {
    let mut registry = ViewRegistry::new();
    for kind in STANDARD_VIEWS {
        let factory_kind = kind.clone();
        registry.register(kind, move || {
            Box::new(PlaceholderView::new(factory_kind.clone())) as Box<dyn View>
        });
    }
    registry
}
