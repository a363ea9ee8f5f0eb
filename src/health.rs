//! Liveness endpoint for load balancers and orchestrators.

use rocket::serde::json::{json, Value};

#[rocket::get("/health")]
pub fn health() -> Value {
    json!({ "status": "ok" })
}
