//! Pair health as reported by the lens contract's pair view.
//!
//! Classifies each of the three segments (static config, dynamic accounting,
//! user state), reduces them to one status and maps the payload into typed
//! views. A payload that cannot be mapped means health is unknown, which
//! callers must treat as blocking.

pub mod payload;
pub mod status;
pub mod types;
pub mod view;

pub use payload::Segment;
pub use status::{
    classify_segment_status, map_pair_view_statuses, resolve_overall_status, status_label,
};
pub use types::{
    DynamicView, LensStatus, PairHealthStatuses, PairHealthViewModel, StaticView, UserView,
};
pub use view::map_pair_health_payload;
