use async_trait::async_trait;

use crate::domain::*;
use crate::error::Result;

pub mod booking_repository;
pub mod room_repository;
pub mod user_repository;

pub use booking_repository::InMemoryBookingRepository;
pub use room_repository::InMemoryRoomRepository;
pub use user_repository::InMemoryUserRepository;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, new_user: NewUser) -> Result<User>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
}

#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Room>>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Room>>;
    /// Takes one room of this type off the shelf. Fails if none are left.
    async fn decrement_available(&self, id: i64) -> Result<Room>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, new_booking: NewBooking) -> Result<Booking>;
    async fn find_for_user(&self, id: i64, user_id: i64) -> Result<Option<Booking>>;
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Booking>>;
    /// Marks the booking confirmed and attaches its payment record.
    async fn confirm(&self, id: i64, payment: Payment) -> Result<Booking>;
}
