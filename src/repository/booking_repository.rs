use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    domain::{Booking, BookingStatus, NewBooking, Payment},
    error::{AppError, Result},
    repository::BookingRepository,
};

struct BookingState {
    bookings: Vec<Booking>,
    next_id: i64,
}

pub struct InMemoryBookingRepository {
    state: RwLock<BookingState>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(BookingState {
                bookings: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryBookingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn create(&self, new_booking: NewBooking) -> Result<Booking> {
        let mut state = self.state.write().await;

        let booking = Booking {
            id: state.next_id,
            user_id: new_booking.user_id,
            room_id: new_booking.room_id,
            room_name: new_booking.room_name,
            check_in: new_booking.check_in,
            check_out: new_booking.check_out,
            guests: new_booking.guests,
            nights: new_booking.nights,
            price_per_night: new_booking.price_per_night,
            total_amount: new_booking.total_amount,
            status: BookingStatus::Pending,
            created_at: Utc::now(),
            payment: None,
        };

        state.next_id += 1;
        state.bookings.push(booking.clone());

        Ok(booking)
    }

    async fn find_for_user(&self, id: i64, user_id: i64) -> Result<Option<Booking>> {
        let state = self.state.read().await;
        Ok(state
            .bookings
            .iter()
            .find(|b| b.id == id && b.user_id == user_id)
            .cloned())
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Booking>> {
        let state = self.state.read().await;
        // insertion order is creation order
        Ok(state
            .bookings
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn confirm(&self, id: i64, payment: Payment) -> Result<Booking> {
        let mut state = self.state.write().await;
        let booking = state
            .bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        if booking.status == BookingStatus::Confirmed {
            return Err(AppError::AlreadyPaid);
        }

        booking.status = BookingStatus::Confirmed;
        booking.payment = Some(payment);

        Ok(booking.clone())
    }
}
