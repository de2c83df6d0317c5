//! Lodging DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use infra_db::repositories::BedRow;

#[derive(Debug, Deserialize)]
pub struct AvailableBedsQuery {
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AssignBedsRequest {
    #[validate(length(min = 1), nested)]
    pub assignments: Vec<BedAssignmentRequest>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct BedAssignmentRequest {
    pub guest_id: Uuid,
    pub bed_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct BedResponse {
    pub id: Uuid,
    pub room_id: Uuid,
    pub name: String,
    pub room_name: String,
    pub price: Option<Decimal>,
    pub status: String,
}

impl From<BedRow> for BedResponse {
    fn from(row: BedRow) -> Self {
        Self {
            id: row.id,
            room_id: row.room_id,
            name: row.name,
            room_name: row.room_name,
            price: row.price,
            status: row.status,
        }
    }
}
