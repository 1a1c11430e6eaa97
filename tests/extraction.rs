use payments_webhook::domain::extract::{
    cents_to_decimal, extract_amount, extract_currency, extract_details, extract_event_type,
    extract_metadata, extract_payment_id,
};
use payments_webhook::error::WebhookError;
use serde_json::json;

#[test]
fn payment_id_prefers_nested_data_id() {
    let payload = json!({
        "id": "evt_top",
        "payment_id": "pay_top",
        "data": { "id": "pay_nested", "payment_id": "pay_nested_2" }
    });
    assert_eq!(extract_payment_id(&payload).as_deref(), Some("pay_nested"));
}

#[test]
fn payment_id_falls_through_priority_list() {
    let nested_checkout = json!({ "data": { "checkout_id": "co_1" }, "payment_id": "pay_top" });
    assert_eq!(extract_payment_id(&nested_checkout).as_deref(), Some("co_1"));

    let top_payment_id = json!({ "payment_id": "pay_top", "id": "evt_1" });
    assert_eq!(extract_payment_id(&top_payment_id).as_deref(), Some("pay_top"));

    let top_id = json!({ "id": "evt_1", "checkout_id": "co_2" });
    assert_eq!(extract_payment_id(&top_id).as_deref(), Some("evt_1"));

    let top_checkout = json!({ "checkout_id": "co_2" });
    assert_eq!(extract_payment_id(&top_checkout).as_deref(), Some("co_2"));
}

#[test]
fn payment_id_skips_null_and_blank_values() {
    let payload = json!({ "data": { "id": null, "payment_id": "  " }, "id": "pay_1" });
    assert_eq!(extract_payment_id(&payload).as_deref(), Some("pay_1"));
}

#[test]
fn numeric_payment_id_is_stringified() {
    let payload = json!({ "data": { "id": 12345 } });
    assert_eq!(extract_payment_id(&payload).as_deref(), Some("12345"));
}

#[test]
fn missing_payment_id_is_rejected() {
    let payload = json!({ "type": "payment.succeeded", "data": { "amount": 10 } });
    let err = extract_details(&payload).unwrap_err();
    assert!(matches!(err, WebhookError::PaymentIdMissing));
    assert_eq!(err.label(), "Invalid payment data");
}

#[test]
fn cents_convert_to_two_decimal_places() {
    let payload = json!({ "data": { "id": "p", "amount_cents": 1999 } });
    assert_eq!(extract_amount(&payload), (Some(19.99), Some(1999)));
    assert_eq!(cents_to_decimal(1), 0.01);
    assert_eq!(cents_to_decimal(100_000), 1000.0);
}

#[test]
fn cents_win_over_decimal_amount() {
    let payload = json!({ "amount": 5.0, "data": { "amount_cents": 250 } });
    assert_eq!(extract_amount(&payload), (Some(2.5), Some(250)));
}

#[test]
fn decimal_amount_fills_cents() {
    let payload = json!({ "data": { "amount": "19.999" } });
    assert_eq!(extract_amount(&payload), (Some(20.0), Some(2000)));

    let top = json!({ "amount": 7 });
    assert_eq!(extract_amount(&top), (Some(7.0), Some(700)));

    assert_eq!(extract_amount(&json!({})), (None, None));
}

#[test]
fn currency_defaults_to_usd() {
    assert_eq!(extract_currency(&json!({})), "USD");
    assert_eq!(
        extract_currency(&json!({ "currency": "EUR", "data": { "currency": "GBP" } })),
        "GBP"
    );
    assert_eq!(extract_currency(&json!({ "currency": "EUR" })), "EUR");
}

#[test]
fn event_type_prefers_nested_then_top_level() {
    assert_eq!(
        extract_event_type(&json!({ "type": "payment.failed", "event": "x" })).as_deref(),
        Some("payment.failed")
    );
    assert_eq!(
        extract_event_type(&json!({ "event": "payment.refunded" })).as_deref(),
        Some("payment.refunded")
    );
    assert_eq!(
        extract_event_type(&json!({ "type": "top", "data": { "event": "nested" } })).as_deref(),
        Some("nested")
    );
}

#[test]
fn customer_and_status_priority() {
    let payload = json!({
        "customer_id": "cus_top",
        "state": "top_state",
        "data": { "id": "p1", "user_id": "usr_nested", "state": "nested_state" }
    });
    let details = extract_details(&payload).unwrap();
    assert_eq!(details.customer_id.as_deref(), Some("usr_nested"));
    assert_eq!(details.status.as_deref(), Some("nested_state"));

    let top_only = json!({ "id": "p2", "user_id": "usr_top", "status": "paid" });
    let details = extract_details(&top_only).unwrap();
    assert_eq!(details.customer_id.as_deref(), Some("usr_top"));
    assert_eq!(details.status.as_deref(), Some("paid"));
}

#[test]
fn metadata_uses_first_object_found() {
    let payload = json!({
        "metadata": { "source": "top" },
        "data": { "metadata": "not-an-object" }
    });
    let meta = extract_metadata(&payload);
    assert_eq!(meta.get("source"), Some(&json!("top")));

    assert!(extract_metadata(&json!({ "id": "p" })).is_empty());
}

#[test]
fn timestamps_accept_rfc3339_and_unix() {
    let payload = json!({
        "data": { "id": "p", "created_at": "2024-03-01T12:00:00Z" },
        "updated_at": 1_709_294_400
    });
    let details = extract_details(&payload).unwrap();
    assert_eq!(
        details.created_at.map(|t| t.to_rfc3339()).as_deref(),
        Some("2024-03-01T12:00:00+00:00")
    );
    assert_eq!(details.updated_at.map(|t| t.timestamp()), Some(1_709_294_400));

    let garbage = json!({ "id": "p", "created_at": "yesterday" });
    assert!(extract_details(&garbage).unwrap().created_at.is_none());
}

#[test]
fn failure_and_refund_fields_are_extracted() {
    let payload = json!({
        "type": "payment.refunded",
        "data": { "id": "p", "failure_reason": "card_declined", "refund_amount": 4.5 }
    });
    let details = extract_details(&payload).unwrap();
    assert_eq!(details.failure_reason.as_deref(), Some("card_declined"));
    assert_eq!(details.refund_amount, Some(4.5));
}

#[test]
fn extraction_is_deterministic_and_keeps_raw_payload() {
    let payload = json!({
        "type": "payment.succeeded",
        "data": {
            "id": "pay_1",
            "amount_cents": 1999,
            "customer_id": "cus_1",
            "product_id": "prod_1",
            "subscription_id": "sub_1",
            "metadata": { "plan": "pro" }
        }
    });
    let first = extract_details(&payload).unwrap();
    let second = extract_details(&payload).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.raw_data, payload);
    assert_eq!(first.subscription_id.as_deref(), Some("sub_1"));
    assert_eq!(first.product_id.as_deref(), Some("prod_1"));
}
