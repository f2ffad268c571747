use actix_web::dev::Server;
use actix_web::{error::InternalError, web, App, HttpResponse, HttpServer};
use serde_json::json;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::io::{Error, ErrorKind};
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use crate::captcha_client::CaptchaClient;
use crate::config::{DatabaseSettings, Settings};
use crate::email_client::EmailClient;
use crate::intake::IntakeServices;
use crate::routes::{
    handle_booking_request, handle_contact, handle_subscribe, handle_unsubscribe,
    handle_waiver_signup, health_check,
};
use crate::store::{PostgresStore, SubscriptionStore};

// Waiver signatures travel as base64 images, well above actix's 32kB default.
const MAX_JSON_BODY_BYTES: usize = 2 * 1024 * 1024;

pub struct Application {
    pub port: u16,
    pub server: Server,
}

impl Application {
    /// Builds the server backed by Postgres, running pending migrations first.
    pub async fn build(config: Settings) -> Result<Self, Error> {
        let store = PostgresStore::new(get_connection_db_pool(&config.database));

        store
            .migrate()
            .await
            .map_err(|err| Error::new(ErrorKind::Other, err))?;

        Self::build_with_store(config, Arc::new(store))
    }

    /// Builds the server on top of an already constructed store.
    pub fn build_with_store(
        config: Settings,
        store: Arc<dyn SubscriptionStore>,
    ) -> Result<Self, Error> {
        let intake = build_intake_services(&config, store)?;
        let listener = TcpListener::bind(config.get_address())?;
        let port = listener.local_addr()?.port();

        tracing::info!("Server listening on {}:{}", config.application.host, port);

        let server = run(listener, intake)?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stop(self) -> Result<(), Error> {
        self.server.await
    }
}

fn build_intake_services(
    config: &Settings,
    store: Arc<dyn SubscriptionStore>,
) -> Result<IntakeServices, Error> {
    let invalid = |message: String| Error::new(ErrorKind::InvalidInput, message);

    let sender_email = config.email_client.get_sender_email().map_err(invalid)?;
    let admin_email = config.email_client.get_receiver_email().map_err(invalid)?;
    let email_client = EmailClient::new(
        config.email_client.base_url.clone(),
        sender_email,
        config.email_client.api_key.clone(),
        Some(config.email_client.get_timeout()),
    )
    .map_err(|err| Error::new(ErrorKind::Other, err))?;
    let captcha_client = CaptchaClient::new(
        config.captcha.base_url.clone(),
        config.captcha.secret_key.clone(),
        Some(config.captcha.get_timeout()),
    )
    .map_err(|err| Error::new(ErrorKind::Other, err))?;

    Ok(IntakeServices::new(
        store,
        Arc::new(captcha_client),
        Arc::new(email_client),
        admin_email,
        config.captcha.min_score,
        config.get_app_base_url(),
    ))
}

pub fn run(listener: TcpListener, intake: IntakeServices) -> Result<Server, Error> {
    let intake = web::Data::new(intake);

    let server = HttpServer::new(move || {
        // App is where your application logic lives: routing, middlewares, request handler, etc
        App::new()
            // 'wrap' method adds a middleware to the App. This specific middleware provide incoming
            // request logger
            .wrap(TracingLogger::default())
            .app_data(json_config())
            .route("/health_check", web::get().to(health_check))
            .route("/contact", web::post().to(handle_contact))
            .service(
                web::scope("/api/subscribers")
                    .route("/subscribe", web::post().to(handle_subscribe))
                    .route("/unsubscribe", web::post().to(handle_unsubscribe)),
            )
            .service(
                web::scope("/api/public-bookings")
                    .route("/request", web::post().to(handle_booking_request)),
            )
            .route("/api/waivers", web::post().to(handle_waiver_signup))
            .app_data(intake.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

/// Bodies that are not a JSON object get the same `{"error": ...}` shape as every other 400.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_JSON_BODY_BYTES)
        .error_handler(|err, _req| {
            tracing::warn!("Rejected request body: {}", err);
            let response = HttpResponse::BadRequest().json(json!({ "error": err.to_string() }));

            InternalError::from_response(err, response).into()
        })
}

pub fn get_connection_db_pool(config: &DatabaseSettings) -> Pool<Postgres> {
    PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy_with(config.get_db_options())
}
