use std::sync::Arc;

use chrono::Utc;

use crate::{
    domain::{Booking, BookingStatus, Payment, PaymentInstrument, PaymentStatus},
    error::{AppError, Result},
    repository::BookingRepository,
};

/// Simulated payment capture. There is no gateway behind this; a
/// structurally valid request always succeeds.
pub struct PaymentService {
    booking_repo: Arc<dyn BookingRepository>,
}

impl PaymentService {
    pub fn new(booking_repo: Arc<dyn BookingRepository>) -> Self {
        Self { booking_repo }
    }

    /// Captures payment for a pending booking and confirms it.
    ///
    /// The instrument must already be validated and masked at the HTTP
    /// boundary; this method only guards ownership and the
    /// pending-to-confirmed transition.
    pub async fn pay(
        &self,
        user_id: i64,
        booking_id: i64,
        instrument: PaymentInstrument,
    ) -> Result<(Payment, Booking)> {
        let booking = self
            .booking_repo
            .find_for_user(booking_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        if booking.status == BookingStatus::Confirmed {
            return Err(AppError::AlreadyPaid);
        }

        let now = Utc::now();
        let payment = Payment {
            id: now.timestamp_millis(),
            booking_id: booking.id,
            amount: booking.total_amount,
            status: PaymentStatus::Completed,
            transaction_date: now,
            instrument,
        };

        let booking = self.booking_repo.confirm(booking.id, payment.clone()).await?;

        tracing::info!(
            booking_id = booking.id,
            payment_id = payment.id,
            amount = payment.amount,
            "captured payment"
        );

        Ok((payment, booking))
    }
}
