use schemars::JsonSchema;
use serde::Serialize;

// Purchaser of a ticket
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema, sqlx::FromRow)]
pub struct Member {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "FirstName")]
    pub first_name: String,
    #[serde(rename = "LastName")]
    pub last_name: String,
    #[serde(rename = "Email")]
    pub email: String,
}
