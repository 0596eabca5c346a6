//! Consumers of the core model: chart markers, footer summary, observers.
//!
//! Nothing here feeds back into dataset validation or cursor logic.

pub mod markers;
pub mod observers;
pub mod summary;

pub use markers::{MarkerKind, MarkerPlacementConfig, TimelineMarker, build_timeline_markers};
pub use observers::{CursorContext, CursorEvent, CursorObserver, StopReason};
pub use summary::{LeadTimeLine, LeadTimeSummary, format_lead_time};
