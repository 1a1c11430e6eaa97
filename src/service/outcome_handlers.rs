use crate::collaborators::Collaborators;
use crate::domain::event::EventKind;
use crate::domain::payment::{PaymentDetails, ProcessingResult};
use anyhow::{Context, Result};

pub async fn dispatch(
    kind: EventKind,
    collaborators: &Collaborators,
    details: &PaymentDetails,
) -> Result<ProcessingResult> {
    match kind {
        EventKind::Success => handle_success(collaborators, details).await,
        EventKind::Failure => handle_failure(collaborators, details).await,
        EventKind::Refund => handle_refund(collaborators, details).await,
        EventKind::Unhandled => Ok(unhandled(details.event_type.as_deref())),
    }
}

pub async fn handle_success(
    collaborators: &Collaborators,
    details: &PaymentDetails,
) -> Result<ProcessingResult> {
    let id = details.payment_id.as_str();
    collaborators
        .store
        .upsert(id, "succeeded", details.store_attributes())
        .await
        .context("failed to record successful payment")?;

    let mut action = "payment_recorded";
    if let (Some(customer), Some(product)) = (&details.customer_id, &details.product_id) {
        collaborators
            .access
            .grant(customer, product)
            .await
            .context("failed to grant product access")?;
        action = "access_granted";
    }

    if let Some(customer) = &details.customer_id {
        collaborators
            .notifier
            .send_confirmation(customer, id)
            .await
            .context("failed to send payment confirmation")?;
    }

    tracing::info!(payment_id = id, action, "payment success processed");
    Ok(done(format!("Payment {id} processed successfully"), action))
}

pub async fn handle_failure(
    collaborators: &Collaborators,
    details: &PaymentDetails,
) -> Result<ProcessingResult> {
    let id = details.payment_id.as_str();
    let mut attributes = details.store_attributes();
    attributes["failureReason"] = serde_json::json!(details.failure_reason);

    collaborators
        .store
        .upsert(id, "failed", attributes)
        .await
        .context("failed to record failed payment")?;

    tracing::warn!(
        payment_id = id,
        reason = details.failure_reason.as_deref().unwrap_or("unknown"),
        "payment failure processed"
    );
    Ok(done(
        format!(
            "Payment {id} failure recorded: {}",
            details.failure_reason.as_deref().unwrap_or("no reason given")
        ),
        "payment_failed_recorded",
    ))
}

pub async fn handle_refund(
    collaborators: &Collaborators,
    details: &PaymentDetails,
) -> Result<ProcessingResult> {
    let id = details.payment_id.as_str();
    let mut attributes = details.store_attributes();
    attributes["refundAmount"] = serde_json::json!(details.refund_amount);

    collaborators
        .store
        .upsert(id, "refunded", attributes)
        .await
        .context("failed to record refund")?;

    let mut action = "refund_recorded";
    if let (Some(customer), Some(product)) = (&details.customer_id, &details.product_id) {
        collaborators
            .access
            .revoke(customer, product)
            .await
            .context("failed to revoke product access")?;
        action = "access_revoked";
    }

    tracing::info!(payment_id = id, action, "payment refund processed");
    Ok(done(format!("Refund for payment {id} processed"), action))
}

pub fn unhandled(event_type: Option<&str>) -> ProcessingResult {
    let event_type = event_type.unwrap_or("unknown");
    tracing::info!(event_type, "unhandled webhook event type accepted");
    ProcessingResult {
        success: true,
        message: format!("Event type '{event_type}' not processed"),
        action: "ignored".to_string(),
        timestamp: chrono::Utc::now(),
    }
}

fn done(message: String, action: &str) -> ProcessingResult {
    ProcessingResult {
        success: true,
        message,
        action: action.to_string(),
        timestamp: chrono::Utc::now(),
    }
}
