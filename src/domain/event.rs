use serde::Serialize;

const SUCCESS_EVENTS: &[&str] = &[
    "payment.succeeded",
    "payment.completed",
    "payment.paid",
    "checkout.completed",
    "checkout.succeeded",
    "order.paid",
    "order.completed",
];

const FAILURE_EVENTS: &[&str] = &["payment.failed", "checkout.failed", "order.failed"];

const REFUND_EVENTS: &[&str] = &[
    "payment.refunded",
    "order.refunded",
    "refund.created",
    "refund.succeeded",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Success,
    Failure,
    Refund,
    Unhandled,
}

/// Maps a provider event type onto an outcome branch. Matching ignores case.
pub fn classify(event_type: Option<&str>) -> EventKind {
    let Some(raw) = event_type else {
        return EventKind::Unhandled;
    };
    let normalized = raw.trim().to_ascii_lowercase();
    let event = normalized.as_str();

    if SUCCESS_EVENTS.contains(&event) {
        EventKind::Success
    } else if FAILURE_EVENTS.contains(&event) {
        EventKind::Failure
    } else if REFUND_EVENTS.contains(&event) {
        EventKind::Refund
    } else {
        EventKind::Unhandled
    }
}
