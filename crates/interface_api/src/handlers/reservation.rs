//! Reservation handlers

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{ActorContext, Currency, StayPeriod};
use domain_lodging::Gender;
use domain_reservation::{
    Guest, Reservation, ReservationQuery, ReservationStatus,
};
use infra_db::ReservationRepository;

use crate::dto::reservation::*;
use crate::{error::ApiError, AppState};

fn repo(state: &AppState) -> ReservationRepository {
    ReservationRepository::new(state.pool.clone())
}

fn parse_status(status: &str) -> Result<ReservationStatus, ApiError> {
    match status {
        "checked_in" => Ok(ReservationStatus::CheckedIn),
        "checked_out" => Ok(ReservationStatus::CheckedOut),
        "canceled" => Ok(ReservationStatus::Canceled),
        other => Err(ApiError::BadRequest(format!("unknown status '{other}'"))),
    }
}

fn parse_gender(gender: &str) -> Result<Gender, ApiError> {
    match gender {
        "male" => Ok(Gender::Male),
        "female" => Ok(Gender::Female),
        other => Err(ApiError::BadRequest(format!("unknown gender '{other}'"))),
    }
}

fn to_query(params: &ListReservationsQuery) -> Result<ReservationQuery, ApiError> {
    let status = params
        .status
        .as_deref()
        .map(|s| match s {
            "checked_in" => Ok(ReservationStatus::CheckedIn),
            "checked_out" => Ok(ReservationStatus::CheckedOut),
            "canceled" => Ok(ReservationStatus::Canceled),
            "pending" => Ok(ReservationStatus::Pending),
            other => Err(ApiError::BadRequest(format!("unknown status '{other}'"))),
        })
        .transpose()?;

    let settled = params
        .balance
        .as_deref()
        .map(|b| match b {
            "paid" => Ok(true),
            "has_balance" => Ok(false),
            other => Err(ApiError::BadRequest(format!("unknown balance filter '{other}'"))),
        })
        .transpose()?;

    Ok(ReservationQuery {
        search: params.search.clone(),
        status,
        settled,
        limit: params.limit,
        offset: params.offset,
    })
}

/// Creates a reservation from the public booking form
pub async fn create_reservation(
    State(state): State<AppState>,
    Json(request): Json<CreateReservationRequest>,
) -> Result<Json<ReservationResponse>, ApiError> {
    request.validate()?;

    let stay = StayPeriod::new(request.check_in_date, request.check_out_date)
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let reservation = Reservation::new(
        request.booked_by,
        request.hostel_office_id.into(),
        request.guest_office_id.into(),
        stay,
        Currency::PHP,
    );

    let guests = request
        .guests
        .iter()
        .map(|g| {
            Ok(Guest::new(
                reservation.id,
                g.display_name.clone(),
                parse_gender(&g.gender)?,
            ))
        })
        .collect::<Result<Vec<_>, ApiError>>()?;

    repo(&state).create(&reservation, &guests).await?;
    Ok(Json(reservation.into()))
}

/// Lists non-pending reservations of the acting office
pub async fn list_reservations(
    State(state): State<AppState>,
    Extension(ctx): Extension<ActorContext>,
    Query(params): Query<ListReservationsQuery>,
) -> Result<Json<Vec<ReservationResponse>>, ApiError> {
    let query = to_query(&params)?;
    let reservations = repo(&state).list(&ctx, &query).await?;
    Ok(Json(reservations.into_iter().map(Into::into).collect()))
}

/// Lists the waiting list (pending reservations)
pub async fn waiting_list(
    State(state): State<AppState>,
    Extension(ctx): Extension<ActorContext>,
    Query(params): Query<ListReservationsQuery>,
) -> Result<Json<Vec<ReservationResponse>>, ApiError> {
    let query = to_query(&params)?;
    let reservations = repo(&state).waiting_list(&ctx, &query).await?;
    Ok(Json(reservations.into_iter().map(Into::into).collect()))
}

/// Gets a reservation by ID
pub async fn get_reservation(
    State(state): State<AppState>,
    Extension(ctx): Extension<ActorContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReservationResponse>, ApiError> {
    let reservation = repo(&state).get(&ctx, id.into()).await?;
    Ok(Json(reservation.into()))
}

/// Public status lookup by confirmation code
pub async fn check_status(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ReservationResponse>, ApiError> {
    let reservation = repo(&state)
        .find_by_code(&code)
        .await?
        .ok_or_else(|| ApiError::NotFound("Reservation doesn't exist.".to_string()))?;
    Ok(Json(reservation.into()))
}

/// Checks guests in or out
pub async fn update_status(
    State(state): State<AppState>,
    Extension(ctx): Extension<ActorContext>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<ReservationResponse>, ApiError> {
    let next = parse_status(&request.status)?;
    let reservation = repo(&state).update_status(&ctx, id.into(), next).await?;
    Ok(Json(reservation.into()))
}

/// Cancels a reservation, releasing its bed holds
pub async fn cancel_reservation(
    State(state): State<AppState>,
    Extension(ctx): Extension<ActorContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReservationResponse>, ApiError> {
    let reservation = repo(&state)
        .update_status(&ctx, id.into(), ReservationStatus::Canceled)
        .await?;
    Ok(Json(reservation.into()))
}

/// Extends a stay to a later check-out date
pub async fn extend_stay(
    State(state): State<AppState>,
    Extension(ctx): Extension<ActorContext>,
    Path(id): Path<Uuid>,
    Json(request): Json<ExtendStayRequest>,
) -> Result<Json<ReservationResponse>, ApiError> {
    let reservation = repo(&state)
        .extend_stay(&ctx, id.into(), request.check_out_date)
        .await?;
    Ok(Json(reservation.into()))
}

/// Switches a reservation to pay-later
pub async fn pay_later(
    State(state): State<AppState>,
    Extension(ctx): Extension<ActorContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReservationResponse>, ApiError> {
    let repository = repo(&state);
    repository.set_pay_later(&ctx, id.into()).await?;
    let reservation = repository.get(&ctx, id.into()).await?;
    Ok(Json(reservation.into()))
}

/// Recomputes and returns a reservation's ledger
pub async fn recompute_ledger(
    State(state): State<AppState>,
    Extension(ctx): Extension<ActorContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<LedgerResponse>, ApiError> {
    let ledger = repo(&state).recompute_ledger(&ctx, id.into()).await?;
    Ok(Json(ledger.into()))
}
