//! Dock system - containers that host one view each
//!
//! ## Architecture
//!
//! - `DockArea`: Left, Right, Top or Bottom edge of the main window
//! - `DockFeatures`: closable / floatable / movable flags of a container
//! - `DockSpec`: everything a toolkit needs to create a dock container
//! - `DockHandle`: toolkit-issued identifier for a live dock container
//!
//! The layout math itself belongs to the toolkit; the shell only decides
//! where a container starts and which features it has.

mod area;

pub use area::{DockArea, DockFeatures, DockHandle, DockSpec};
