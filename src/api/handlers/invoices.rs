use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Extension,
};

use crate::{
    api::{middleware::auth::CurrentUser, state::AppState},
    domain::BookingStatus,
    error::{AppError, Result},
};

/// Streams the PDF invoice for one of the caller's confirmed bookings.
pub async fn get(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(booking_id): Path<i64>,
) -> Result<Response> {
    let booking = state
        .service_context
        .booking_service
        .get_booking(current.user.id, booking_id)
        .await
        .map_err(|e| match e {
            AppError::NotFound(_) => {
                AppError::NotFound("Confirmed booking not found".to_string())
            }
            other => other,
        })?;

    if booking.status != BookingStatus::Confirmed {
        return Err(AppError::NotFound("Confirmed booking not found".to_string()));
    }

    let pdf = state.invoice_renderer.render(&booking, &current.user)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=invoice-{}.pdf", booking.id),
            ),
        ],
        pdf,
    )
        .into_response())
}
