mod bookings;
mod contact;
mod health_check;
mod subscriptions;
mod waivers;

pub use bookings::handle_booking_request;
pub use contact::handle_contact;
pub use health_check::health_check;
pub use subscriptions::{handle_subscribe, handle_unsubscribe};
pub use waivers::handle_waiver_signup;
