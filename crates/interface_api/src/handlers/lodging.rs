//! Bed availability and assignment handlers

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::ActorContext;
use infra_db::repositories::BedAssignment;
use infra_db::LodgingRepository;

use crate::dto::lodging::*;
use crate::dto::reservation::ReservationResponse;
use crate::{error::ApiError, AppState};

/// Lists the acting office's beds free for a date range
pub async fn available_beds(
    State(state): State<AppState>,
    Extension(ctx): Extension<ActorContext>,
    Query(query): Query<AvailableBedsQuery>,
) -> Result<Json<Vec<BedResponse>>, ApiError> {
    if query.check_out_date < query.check_in_date {
        return Err(ApiError::Validation(
            "check_out_date must not precede check_in_date".to_string(),
        ));
    }

    let beds = LodgingRepository::new(state.pool.clone())
        .available_beds(&ctx, query.check_in_date, query.check_out_date)
        .await?;
    Ok(Json(beds.into_iter().map(Into::into).collect()))
}

/// Assigns beds to a pending reservation's guests
pub async fn assign_beds(
    State(state): State<AppState>,
    Extension(ctx): Extension<ActorContext>,
    Path(id): Path<Uuid>,
    Json(request): Json<AssignBedsRequest>,
) -> Result<Json<ReservationResponse>, ApiError> {
    request.validate()?;

    let assignments: Vec<BedAssignment> = request
        .assignments
        .iter()
        .map(|a| BedAssignment {
            guest_id: a.guest_id.into(),
            bed_id: a.bed_id.into(),
        })
        .collect();

    let reservation = LodgingRepository::new(state.pool.clone())
        .assign_beds(&ctx, id.into(), &assignments)
        .await?;

    Ok(Json(reservation.into()))
}
