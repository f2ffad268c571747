pub mod email_address;
pub mod new_subscriber;
pub mod person_name;
pub mod phone_number;
pub mod subscriber;
pub mod verification;
pub mod waiver;
