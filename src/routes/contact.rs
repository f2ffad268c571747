use actix_web::{web, HttpResponse};
use serde_json::{json, Map, Value};

use crate::intake::{IntakeError, IntakeServices, CONTACT};

#[tracing::instrument(
    name = "Contact form handler",
    skip(body, intake),
    fields(contact_email = ?body.get("email"))
)]
pub async fn handle_contact(
    body: web::Json<Map<String, Value>>,
    intake: web::Data<IntakeServices>,
) -> Result<HttpResponse, IntakeError> {
    intake.run(&CONTACT, body.into_inner().into()).await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Message sent successfully." })))
}
