use rocket::http::Status;
use rocket::serde::json::{json, Value};
use rocket::Request;

// Failures raised by Rocket itself (unmatched routes, oversized bodies...)
// get the same `{"error": ...}` shape as handler errors.

#[catch(404)]
pub fn not_found(req: &Request) -> Value {
    json!({ "error": format!("Resource not found: {}", req.uri()) })
}

#[catch(default)]
pub fn default(status: Status, _req: &Request) -> Value {
    json!({ "error": status.reason().unwrap_or("Unknown error") })
}
