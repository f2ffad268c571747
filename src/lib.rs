pub mod captcha_client;
pub mod config;
pub mod domain;
pub mod email_client;
pub mod intake;
pub mod routes;
pub mod startup;
pub mod store;
pub mod telemetry;

/// Writes an error followed by every error in its `source` chain.
pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
