use actix_web::{web, HttpResponse};
use serde_json::{json, Map, Value};

use crate::intake::{IntakeError, IntakeServices, SUBSCRIBE, UNSUBSCRIBE};

#[tracing::instrument(
    name = "Creating a new subscriber handler",
    skip(body, intake),
    fields(subscriber_email = ?body.get("email"))
)]
pub async fn handle_subscribe(
    body: web::Json<Map<String, Value>>,
    intake: web::Data<IntakeServices>,
) -> Result<HttpResponse, IntakeError> {
    intake.run(&SUBSCRIBE, body.into_inner().into()).await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Subscribed successfully." })))
}

#[tracing::instrument(
    name = "Removing a subscriber handler",
    skip(body, intake),
    fields(subscriber_email = ?body.get("email"))
)]
pub async fn handle_unsubscribe(
    body: web::Json<Map<String, Value>>,
    intake: web::Data<IntakeServices>,
) -> Result<HttpResponse, IntakeError> {
    intake.run(&UNSUBSCRIBE, body.into_inner().into()).await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Unsubscribed successfully." })))
}
