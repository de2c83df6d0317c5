//! HTTP API Layer
//!
//! This crate provides the REST API for the hostel core system using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for reservations, payments, and lodging
//! - **Middleware**: Authentication, office scoping, audit logging
//! - **DTOs**: Request/Response data transfer objects with validation
//! - **Error Handling**: Consistent error responses; storage failures are
//!   collapsed to generic messages with causes logged for operators
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(pool, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use axum::{
    Router,
    routing::{get, post, put},
    middleware as axum_middleware,
};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};

use crate::config::ApiConfig;
use crate::middleware::{auth_middleware, audit_middleware};
use crate::handlers::{health, lodging, payment, reservation};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(pool: PgPool, config: ApiConfig) -> Router {
    let state = AppState { pool, config };

    // Public routes: health, the guest booking form, and the status lookup
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/reservations", post(reservation::create_reservation))
        .route("/reservations/status/:code", get(reservation::check_status));

    // Reservation routes
    let reservation_routes = Router::new()
        .route("/", get(reservation::list_reservations))
        .route("/waiting-list", get(reservation::waiting_list))
        .route("/:id", get(reservation::get_reservation))
        .route("/:id/status", put(reservation::update_status))
        .route("/:id/cancel", put(reservation::cancel_reservation))
        .route("/:id/extend", post(reservation::extend_stay))
        .route("/:id/pay-later", post(reservation::pay_later))
        .route("/:id/ledger", get(reservation::recompute_ledger))
        .route("/:id/payments", post(payment::record_payment))
        .route("/:id/payments", get(payment::payment_history))
        .route("/:id/exemptions", post(payment::exempt_guest))
        .route("/:id/exemptions", get(payment::list_exemptions))
        .route("/:id/exemptions/candidates", get(payment::exemption_candidates))
        .route("/:id/beds", post(lodging::assign_beds));

    // Lodging routes
    let lodging_routes = Router::new()
        .route("/available", get(lodging::available_beds));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/reservations", reservation_routes)
        .nest("/beds", lodging_routes)
        .layer(axum_middleware::from_fn_with_state(state.clone(), audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
