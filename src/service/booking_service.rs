use std::sync::Arc;

use chrono::NaiveDate;

use crate::{
    domain::{Booking, NewBooking},
    error::{AppError, Result},
    repository::{BookingRepository, RoomRepository},
};

pub struct BookingService {
    room_repo: Arc<dyn RoomRepository>,
    booking_repo: Arc<dyn BookingRepository>,
}

impl BookingService {
    pub fn new(room_repo: Arc<dyn RoomRepository>, booking_repo: Arc<dyn BookingRepository>) -> Self {
        Self {
            room_repo,
            booking_repo,
        }
    }

    /// Creates a pending booking and takes one room off the shelf.
    ///
    /// Check-out is not required to fall after check-in; a zero or
    /// negative night count is stored as-is with the matching total.
    /// Abandoned pending bookings never return their room either.
    pub async fn create_booking(
        &self,
        user_id: i64,
        room_id: i64,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guests: u32,
    ) -> Result<Booking> {
        let room = self
            .room_repo
            .find_by_id(room_id)
            .await?
            .ok_or_else(|| AppError::InvalidRequest("Room not available".to_string()))?;

        if room.available < 1 {
            return Err(AppError::InvalidRequest("Room not available".to_string()));
        }

        let nights = (check_out - check_in).num_days();
        let total_amount = nights * room.price;

        let booking = self
            .booking_repo
            .create(NewBooking {
                user_id,
                room_id: room.id,
                room_name: room.name.clone(),
                check_in,
                check_out,
                guests,
                nights,
                price_per_night: room.price,
                total_amount,
            })
            .await?;

        self.room_repo.decrement_available(room.id).await?;

        tracing::info!(
            booking_id = booking.id,
            room_id = room.id,
            nights,
            total_amount,
            "created booking"
        );

        Ok(booking)
    }

    pub async fn list_bookings(&self, user_id: i64) -> Result<Vec<Booking>> {
        self.booking_repo.list_by_user(user_id).await
    }

    pub async fn get_booking(&self, user_id: i64, booking_id: i64) -> Result<Booking> {
        self.booking_repo
            .find_for_user(booking_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))
    }
}
