//! Ordered field lookup over loosely structured provider payloads.
//!
//! Every field has one priority list. Nested `data.*` paths always come
//! before top-level paths; the first present, non-null value wins.

use crate::domain::payment::{PaymentDetails, DEFAULT_CURRENCY};
use crate::error::WebhookError;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::BTreeMap;

pub type Path = &'static [&'static str];

pub const PAYMENT_ID_PATHS: &[Path] = &[
    &["data", "id"],
    &["data", "payment_id"],
    &["data", "checkout_id"],
    &["payment_id"],
    &["id"],
    &["checkout_id"],
];
pub const AMOUNT_CENTS_PATHS: &[Path] = &[&["data", "amount_cents"], &["amount_cents"]];
pub const AMOUNT_PATHS: &[Path] = &[&["data", "amount"], &["amount"]];
pub const CURRENCY_PATHS: &[Path] = &[&["data", "currency"], &["currency"]];
pub const CUSTOMER_ID_PATHS: &[Path] = &[
    &["data", "customer_id"],
    &["data", "user_id"],
    &["customer_id"],
    &["user_id"],
];
pub const PRODUCT_ID_PATHS: &[Path] = &[&["data", "product_id"], &["product_id"]];
pub const SUBSCRIPTION_ID_PATHS: &[Path] = &[&["data", "subscription_id"], &["subscription_id"]];
pub const STATUS_PATHS: &[Path] = &[
    &["data", "status"],
    &["data", "state"],
    &["status"],
    &["state"],
];
pub const EVENT_TYPE_PATHS: &[Path] = &[
    &["data", "type"],
    &["data", "event"],
    &["type"],
    &["event"],
];
pub const METADATA_PATHS: &[Path] = &[&["data", "metadata"], &["metadata"]];
pub const CREATED_AT_PATHS: &[Path] = &[&["data", "created_at"], &["created_at"]];
pub const UPDATED_AT_PATHS: &[Path] = &[&["data", "updated_at"], &["updated_at"]];
pub const FAILURE_REASON_PATHS: &[Path] = &[&["data", "failure_reason"], &["failure_reason"]];
pub const REFUND_AMOUNT_PATHS: &[Path] = &[&["data", "refund_amount"], &["refund_amount"]];

/// Builds the canonical record. Fails only when no payment id is present.
pub fn extract_details(payload: &Value) -> Result<PaymentDetails, WebhookError> {
    let payment_id = extract_payment_id(payload)
        .ok_or(WebhookError::PaymentIdMissing)?;
    let (amount, amount_cents) = extract_amount(payload);

    Ok(PaymentDetails {
        payment_id,
        amount,
        amount_cents,
        currency: extract_currency(payload),
        customer_id: first_string(payload, CUSTOMER_ID_PATHS),
        product_id: first_string(payload, PRODUCT_ID_PATHS),
        subscription_id: first_string(payload, SUBSCRIPTION_ID_PATHS),
        status: first_string(payload, STATUS_PATHS),
        event_type: extract_event_type(payload),
        metadata: extract_metadata(payload),
        created_at: first_timestamp(payload, CREATED_AT_PATHS),
        updated_at: first_timestamp(payload, UPDATED_AT_PATHS),
        failure_reason: first_string(payload, FAILURE_REASON_PATHS),
        refund_amount: first_decimal(payload, REFUND_AMOUNT_PATHS)
            .map(round_to_cents),
        raw_data: payload.clone(),
    })
}

pub fn extract_payment_id(payload: &Value) -> Option<String> {
    first_string(payload, PAYMENT_ID_PATHS)
}

pub fn extract_event_type(payload: &Value) -> Option<String> {
    first_string(payload, EVENT_TYPE_PATHS)
}

pub fn extract_currency(payload: &Value) -> String {
    first_string(payload, CURRENCY_PATHS)
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string())
}

/// Returns `(amount, amount_cents)`.
///
/// An explicit cents field wins over a decimal amount. Either one fills in
/// the other.
pub fn extract_amount(payload: &Value) -> (Option<f64>, Option<i64>) {
    if let Some(cents) = first_integer(payload, AMOUNT_CENTS_PATHS) {
        return (Some(cents_to_decimal(cents)), Some(cents));
    }
    match first_decimal(payload, AMOUNT_PATHS) {
        Some(amount) => (
            Some(round_to_cents(amount)),
            Some((amount * 100.0).round() as i64),
        ),
        None => (None, None),
    }
}

pub fn extract_metadata(payload: &Value) -> BTreeMap<String, Value> {
    METADATA_PATHS
        .iter()
        .filter_map(|path| lookup(payload, path))
        .find_map(|v| v.as_object())
        .map(|obj| obj.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
        .unwrap_or_default()
}

pub fn cents_to_decimal(cents: i64) -> f64 {
    round_to_cents(cents as f64 / 100.0)
}

pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn lookup<'a>(payload: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = payload;
    for key in path {
        current = current.as_object()?.get(*key)?;
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

fn first_string(payload: &Value, paths: &[Path]) -> Option<String> {
    paths
        .iter()
        .filter_map(|path| lookup(payload, path))
        .find_map(|v| match v {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

fn first_integer(payload: &Value, paths: &[Path]) -> Option<i64> {
    paths
        .iter()
        .filter_map(|path| lookup(payload, path))
        .find_map(|v| match v {
            Value::Number(n) => n.as_i64().or(n.as_f64().map(|f| f.round() as i64)),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        })
}

fn first_decimal(payload: &Value, paths: &[Path]) -> Option<f64> {
    paths
        .iter()
        .filter_map(|path| lookup(payload, path))
        .find_map(|v| match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
        .filter(|f| f.is_finite())
}

fn first_timestamp(payload: &Value, paths: &[Path]) -> Option<DateTime<Utc>> {
    paths
        .iter()
        .filter_map(|path| lookup(payload, path))
        .find_map(|v| match v {
            Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            Value::Number(n) => n.as_i64().and_then(from_unix),
            _ => None,
        })
}

// Values past 1e12 are taken as milliseconds.
fn from_unix(raw: i64) -> Option<DateTime<Utc>> {
    if raw.abs() >= 1_000_000_000_000 {
        DateTime::<Utc>::from_timestamp_millis(raw)
    } else {
        DateTime::<Utc>::from_timestamp(raw, 0)
    }
}
