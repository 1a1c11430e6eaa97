pub mod collaborators;
pub mod config;
pub mod domain {
    pub mod event;
    pub mod extract;
    pub mod payment;
}
pub mod error;
pub mod gateways;
pub mod http {
    pub mod handlers {
        pub mod ops;
        pub mod webhooks;
    }
    pub mod middleware {
        pub mod request_log;
    }
}
pub mod service {
    pub mod outcome_handlers;
    pub mod webhook_service;
}
pub mod signature;

use crate::http::handlers::{ops, webhooks};
use crate::http::middleware::request_log::log_requests;
use axum::middleware::from_fn;
use axum::routing::{any, get};
use axum::Router;

#[derive(Clone)]
pub struct AppState {
    pub webhook_service: service::webhook_service::WebhookService,
    pub expose_error_details: bool,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(ops::health))
        .route("/verify-payment", any(webhooks::verify_payment))
        .layer(from_fn(log_requests))
        .with_state(state)
}
