//! Payment and exemption handlers

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{ActorContext, Currency, Money};
use domain_reservation::PaymentRequest;
use infra_db::{ExemptionRepository, PaymentRepository};

use crate::dto::payment::*;
use crate::{error::ApiError, AppState};

const PAYMENT_FAILED: &str = "Payment processing failed. Please try again.";

/// Records a payment against a reservation
pub async fn record_payment(
    State(state): State<AppState>,
    Extension(ctx): Extension<ActorContext>,
    Path(id): Path<Uuid>,
    Json(request): Json<RecordPaymentRequest>,
) -> Result<Json<PaymentResponse>, ApiError> {
    request.validate()?;

    let method = request
        .method()
        .ok_or_else(|| ApiError::BadRequest("payment_method must be cash or online".into()))?;

    let domain_request = PaymentRequest {
        amount: Money::new(request.amount, Currency::PHP),
        or_number: request.or_number,
        or_date: request.or_date,
        transaction_id: request.transaction_id,
        method,
    };

    let payment = PaymentRepository::new(state.pool.clone())
        .record_payment(&ctx, id.into(), domain_request)
        .await
        .map_err(|e| ApiError::from_store(e, PAYMENT_FAILED))?;

    Ok(Json(payment.into()))
}

/// Lists a reservation's payments, newest first
pub async fn payment_history(
    State(state): State<AppState>,
    Extension(ctx): Extension<ActorContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<PaymentResponse>>, ApiError> {
    let payments = PaymentRepository::new(state.pool.clone())
        .payment_history(&ctx, id.into())
        .await?;
    Ok(Json(payments.into_iter().map(Into::into).collect()))
}

/// Waives a guest's bed cost
pub async fn exempt_guest(
    State(state): State<AppState>,
    Extension(ctx): Extension<ActorContext>,
    Path(id): Path<Uuid>,
    Json(request): Json<ExemptGuestRequest>,
) -> Result<Json<ExemptionResponse>, ApiError> {
    request.validate()?;

    let exemption = ExemptionRepository::new(state.pool.clone())
        .exempt_guest(&ctx, id.into(), request.guest_id.into(), request.reason)
        .await?;

    Ok(Json(exemption.into()))
}

/// Lists the exemptions granted on a reservation
pub async fn list_exemptions(
    State(state): State<AppState>,
    Extension(ctx): Extension<ActorContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ExemptionResponse>>, ApiError> {
    let exemptions = ExemptionRepository::new(state.pool.clone())
        .exemptions_for(&ctx, id.into())
        .await?;
    Ok(Json(exemptions.into_iter().map(Into::into).collect()))
}

/// Lists the guests still eligible for exemption
pub async fn exemption_candidates(
    State(state): State<AppState>,
    Extension(ctx): Extension<ActorContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<GuestResponse>>, ApiError> {
    let guests = ExemptionRepository::new(state.pool.clone())
        .exemption_candidates(&ctx, id.into())
        .await?;
    Ok(Json(guests.into_iter().map(Into::into).collect()))
}
