//! Reservation DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain_reservation::{LedgerProjection, Reservation};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateReservationRequest {
    #[validate(length(min = 1, max = 255))]
    pub booked_by: String,
    pub hostel_office_id: Uuid,
    pub guest_office_id: Uuid,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    #[validate(length(min = 1), nested)]
    pub guests: Vec<GuestRequest>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct GuestRequest {
    #[validate(length(min = 1, max = 255))]
    pub display_name: String,
    /// "male" or "female"
    pub gender: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// "checked_in" or "checked_out"
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct ExtendStayRequest {
    pub check_out_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct ListReservationsQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    /// "paid" or "has_balance"
    pub balance: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ReservationResponse {
    pub id: Uuid,
    pub code: String,
    pub booked_by: String,
    pub hostel_office_id: Uuid,
    pub guest_office_id: Uuid,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub daily_rate: Decimal,
    pub total_billings: Decimal,
    pub remaining_balance: Decimal,
    pub currency: String,
    pub status: String,
    pub payment_type: String,
    pub created_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationResponse {
    fn from(r: Reservation) -> Self {
        Self {
            id: *r.id.as_uuid(),
            code: r.code,
            booked_by: r.booked_by,
            hostel_office_id: *r.hostel_office_id.as_uuid(),
            guest_office_id: *r.guest_office_id.as_uuid(),
            check_in_date: r.stay.check_in(),
            check_out_date: r.stay.check_out(),
            daily_rate: r.ledger.daily_rate.amount(),
            total_billings: r.ledger.total_billings.amount(),
            remaining_balance: r.ledger.remaining_balance.amount(),
            currency: r.ledger.daily_rate.currency().code().to_string(),
            status: serde_variant_name(&r.status),
            payment_type: serde_variant_name(&r.payment_type),
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LedgerResponse {
    pub daily_rate: Decimal,
    pub total_billings: Decimal,
    pub remaining_balance: Decimal,
}

impl From<LedgerProjection> for LedgerResponse {
    fn from(ledger: LedgerProjection) -> Self {
        Self {
            daily_rate: ledger.daily_rate.amount(),
            total_billings: ledger.total_billings.amount(),
            remaining_balance: ledger.remaining_balance.amount(),
        }
    }
}

/// Renders a serde snake_case enum variant as its wire string
fn serde_variant_name<T: Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(String::from))
        .unwrap_or_default()
}
