mod bookings;
mod contact;
mod health_check;
mod postgres_store;
mod waivers;
