pub mod booking;
pub mod payment;
pub mod room;
pub mod user;

pub use booking::*;
pub use payment::*;
pub use room::*;
pub use user::*;
