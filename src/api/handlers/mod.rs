pub mod auth;
pub mod bookings;
pub mod invoices;
pub mod payments;
pub mod rooms;
pub mod root;
