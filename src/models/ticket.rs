use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::member::Member;
use crate::models::payment::Payment;

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema, sqlx::FromRow)]
pub struct Ticket {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "CreatedAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "UpdatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "DeletedAt")]
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(rename = "Point")]
    pub point: i64,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "MemberID")]
    pub member_id: i64,
    #[serde(rename = "Member")]
    #[sqlx(skip)]
    pub member: Option<Member>,
    #[serde(rename = "PaymentID")]
    pub payment_id: i64,
    #[serde(rename = "Payment")]
    #[sqlx(skip)]
    pub payment: Option<Payment>,
}

/// Writable ticket fields as they arrive in a request body.
///
/// Every field is optional: on create an absent field takes its zero value,
/// on update it keeps whatever the stored record already holds.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct TicketInput {
    #[serde(rename = "Point")]
    pub point: Option<i64>,
    #[serde(rename = "Status")]
    pub status: Option<String>,
    #[serde(rename = "MemberID")]
    pub member_id: Option<i64>,
    #[serde(rename = "PaymentID")]
    pub payment_id: Option<i64>,
}

/// Column values for a row that has not been inserted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTicket {
    pub point: i64,
    pub status: String,
    pub member_id: i64,
    pub payment_id: i64,
}

impl From<TicketInput> for NewTicket {
    fn from(input: TicketInput) -> Self {
        NewTicket {
            point: input.point.unwrap_or_default(),
            status: input.status.unwrap_or_default(),
            member_id: input.member_id.unwrap_or_default(),
            payment_id: input.payment_id.unwrap_or_default(),
        }
    }
}

impl Ticket {
    /// Overlays the fields present in `input`; identity and creation time never change.
    pub fn merge(&mut self, input: TicketInput) {
        if let Some(point) = input.point {
            self.point = point;
        }
        if let Some(status) = input.status {
            self.status = status;
        }
        if let Some(member_id) = input.member_id {
            if member_id != self.member_id {
                self.member = None;
            }
            self.member_id = member_id;
        }
        if let Some(payment_id) = input.payment_id {
            if payment_id != self.payment_id {
                self.payment = None;
            }
            self.payment_id = payment_id;
        }
    }
}

// One row of a member's booking history
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema, sqlx::FromRow)]
pub struct BookingReportRow {
    pub movie: String,
    pub date: String,
    pub seats: String,
    pub theater: String,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct TicketMessageResponse {
    pub message: String,
    pub data: Ticket,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct MessageResponse {
    pub message: String,
}
