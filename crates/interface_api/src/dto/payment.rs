//! Payment and exemption DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain_reservation::{Payment, PaymentExemption, PaymentMethod};

#[derive(Debug, Deserialize, Validate)]
pub struct RecordPaymentRequest {
    pub amount: Decimal,
    #[validate(length(min = 1, max = 64))]
    pub or_number: String,
    pub or_date: NaiveDate,
    #[validate(length(min = 1, max = 64))]
    pub transaction_id: String,
    /// "cash" or "online"
    pub payment_method: String,
}

impl RecordPaymentRequest {
    /// Parses the wire payment method
    pub fn method(&self) -> Option<PaymentMethod> {
        match self.payment_method.as_str() {
            "cash" => Some(PaymentMethod::Cash),
            "online" => Some(PaymentMethod::Online),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ExemptGuestRequest {
    pub guest_id: Uuid,
    #[validate(length(min = 1))]
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub amount: Decimal,
    pub or_number: String,
    pub or_date: NaiveDate,
    pub transaction_id: String,
    pub payment_method: String,
    pub created_at: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(p: Payment) -> Self {
        Self {
            id: *p.id.as_uuid(),
            reservation_id: *p.reservation_id.as_uuid(),
            amount: p.amount.amount(),
            or_number: p.or_number,
            or_date: p.or_date,
            transaction_id: p.transaction_id,
            payment_method: match p.method {
                PaymentMethod::Cash => "cash".to_string(),
                PaymentMethod::Online => "online".to_string(),
            },
            created_at: p.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExemptionResponse {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub guest_id: Uuid,
    pub granted_by: Uuid,
    pub waived_price: Decimal,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

impl From<PaymentExemption> for ExemptionResponse {
    fn from(e: PaymentExemption) -> Self {
        Self {
            id: *e.id.as_uuid(),
            reservation_id: *e.reservation_id.as_uuid(),
            guest_id: *e.guest_id.as_uuid(),
            granted_by: *e.granted_by.as_uuid(),
            waived_price: e.waived_price.amount(),
            reason: e.reason,
            created_at: e.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GuestResponse {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub display_name: String,
    pub gender: String,
    pub is_exempted: bool,
}

impl From<domain_reservation::Guest> for GuestResponse {
    fn from(g: domain_reservation::Guest) -> Self {
        Self {
            id: *g.id.as_uuid(),
            reservation_id: *g.reservation_id.as_uuid(),
            display_name: g.display_name,
            gender: match g.gender {
                domain_lodging::Gender::Any => "any".to_string(),
                domain_lodging::Gender::Male => "male".to_string(),
                domain_lodging::Gender::Female => "female".to_string(),
            },
            is_exempted: g.is_exempted,
        }
    }
}
