use serde_json::Value;

use super::payload::{Segment, parse_numeric};
use super::types::{LensStatus, PairHealthStatuses};

/// Reads the wire code from a status value. Numbers, decimal or `0x` hex
/// strings and booleans (`true` is 1) all count.
fn status_from_value(value: &Value) -> LensStatus {
    let code = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric(s),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    match code {
        Some(c) if c == 1.0 => LensStatus::InvalidPair,
        Some(c) if c == 2.0 => LensStatus::Degraded,
        _ => LensStatus::Ok,
    }
}

/// Status of one segment: the first element of a positional segment or the
/// `status` field of a keyed one. Unknown shapes and codes read as `Ok`.
pub fn classify_segment_status(segment: &Value) -> LensStatus {
    Segment::from_value(segment)
        .and_then(|s| s.field("status", 0))
        .map(status_from_value)
        .unwrap_or_default()
}

/// Reduces statuses by severity: any `InvalidPair` wins, then any
/// `Degraded`, otherwise `Ok` (including for an empty slice).
pub fn resolve_overall_status(statuses: &[LensStatus]) -> LensStatus {
    if statuses.contains(&LensStatus::InvalidPair) {
        LensStatus::InvalidPair
    } else if statuses.contains(&LensStatus::Degraded) {
        LensStatus::Degraded
    } else {
        LensStatus::Ok
    }
}

impl PairHealthStatuses {
    pub fn from_segments(
        static_status: LensStatus,
        dynamic_status: LensStatus,
        user_status: LensStatus,
    ) -> Self {
        Self {
            static_status,
            dynamic_status,
            user_status,
            overall_status: resolve_overall_status(&[static_status, dynamic_status, user_status]),
        }
    }
}

/// The three raw segments of a pair view, without validating their shape.
pub(crate) fn split_segments(raw: &Value) -> Option<[&Value; 3]> {
    match raw {
        Value::Array(items) if items.len() >= 3 => Some([&items[0], &items[1], &items[2]]),
        Value::Object(map) => Some([map.get("s")?, map.get("d")?, map.get("u")?]),
        _ => None,
    }
}

/// Statuses alone, for when the full view model cannot be built.
///
/// Only the outer shape is checked; a segment that is not a sequence or
/// mapping contributes `Ok`.
pub fn map_pair_view_statuses(raw: &Value) -> Option<PairHealthStatuses> {
    let [s, d, u] = split_segments(raw)?;
    Some(PairHealthStatuses::from_segments(
        classify_segment_status(s),
        classify_segment_status(d),
        classify_segment_status(u),
    ))
}

/// Label for an optional status; `None` means health could not be read.
pub fn status_label(status: Option<LensStatus>) -> String {
    status.map_or_else(|| "UNKNOWN".to_string(), |s| s.to_string())
}
