use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_CURRENCY: &str = "USD";

/// Canonical payment record derived from one webhook payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub payment_id: String,
    pub amount: Option<f64>,
    pub amount_cents: Option<i64>,
    pub currency: String,
    pub customer_id: Option<String>,
    pub product_id: Option<String>,
    pub subscription_id: Option<String>,
    pub status: Option<String>,
    pub event_type: Option<String>,
    pub metadata: BTreeMap<String, serde_json::Value>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub failure_reason: Option<String>,
    pub refund_amount: Option<f64>,
    pub raw_data: serde_json::Value,
}

impl PaymentDetails {
    /// Attributes handed to the payment store on upsert.
    pub fn store_attributes(&self) -> serde_json::Value {
        serde_json::json!({
            "amount": self.amount,
            "amountCents": self.amount_cents,
            "currency": self.currency,
            "customerId": self.customer_id,
            "productId": self.product_id,
            "subscriptionId": self.subscription_id,
            "eventType": self.event_type,
            "metadata": self.metadata,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationSummary {
    pub verified: bool,
    pub payment_id: String,
    pub status: String,
    pub verified_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummary {
    pub id: String,
    pub amount: Option<f64>,
    pub currency: String,
    pub customer_id: Option<String>,
}

impl From<&PaymentDetails> for PaymentSummary {
    fn from(details: &PaymentDetails) -> Self {
        Self {
            id: details.payment_id.clone(),
            amount: details.amount,
            currency: details.currency.clone(),
            customer_id: details.customer_id.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingResult {
    pub success: bool,
    pub message: String,
    pub action: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    pub success: bool,
    pub message: String,
    pub verification: VerificationSummary,
    pub payment: PaymentSummary,
    pub processing: ProcessingResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
