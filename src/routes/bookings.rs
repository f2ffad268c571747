use actix_web::{web, HttpResponse};
use serde_json::{json, Map, Value};

use crate::intake::{IntakeError, IntakeServices, BOOKING_REQUEST};

/// Public booking request: notifies the studio and acknowledges the client.
#[tracing::instrument(
    name = "Public booking request handler",
    skip(body, intake),
    fields(
        client_email = ?body.get("email"),
        session_type = ?body.get("sessionType")
    )
)]
pub async fn handle_booking_request(
    body: web::Json<Map<String, Value>>,
    intake: web::Data<IntakeServices>,
) -> Result<HttpResponse, IntakeError> {
    intake.run(&BOOKING_REQUEST, body.into_inner().into()).await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Booking request sent successfully." })))
}
