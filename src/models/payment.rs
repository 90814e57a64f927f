use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema, sqlx::FromRow)]
pub struct Payment {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "PaymentTime")]
    pub payment_time: DateTime<Utc>,
    #[serde(rename = "TotalPrice")]
    pub total_price: f64,
    #[serde(rename = "Status")]
    pub status: String,
}
