use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    api::{middleware::auth::CurrentUser, state::AppState},
    domain::Booking,
    error::Result,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub room_id: i64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub success: bool,
    pub booking: Booking,
}

pub async fn create(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<Json<BookingResponse>> {
    let booking = state
        .service_context
        .booking_service
        .create_booking(
            current.user.id,
            req.room_id,
            req.check_in,
            req.check_out,
            req.guests,
        )
        .await?;

    Ok(Json(BookingResponse {
        success: true,
        booking,
    }))
}

pub async fn list(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<Vec<Booking>>> {
    let bookings = state
        .service_context
        .booking_service
        .list_bookings(current.user.id)
        .await?;

    Ok(Json(bookings))
}

pub async fn get(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<Booking>> {
    let booking = state
        .service_context
        .booking_service
        .get_booking(current.user.id, id)
        .await?;

    Ok(Json(booking))
}
