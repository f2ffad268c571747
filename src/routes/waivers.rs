use actix_web::{web, HttpResponse};
use serde_json::{json, Map, Value};

use crate::intake::{IntakeError, IntakeServices, WAIVER_SIGNUP};

#[tracing::instrument(
    name = "Waiver signup handler",
    skip(body, intake),
    fields(
        signer_email = ?body.get("email"),
        class_title = ?body.get("classTitle")
    )
)]
pub async fn handle_waiver_signup(
    body: web::Json<Map<String, Value>>,
    intake: web::Data<IntakeServices>,
) -> Result<HttpResponse, IntakeError> {
    intake.run(&WAIVER_SIGNUP, body.into_inner().into()).await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Waiver signed successfully." })))
}
