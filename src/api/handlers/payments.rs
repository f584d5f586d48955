use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::{
    api::{middleware::auth::CurrentUser, state::AppState},
    domain::{Booking, Payment, PaymentInstrument},
    error::{AppError, Result},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub booking_id: i64,
    /// "card" or "upi"; anything else (or nothing) is treated as card,
    /// matching the checkout form's default.
    pub payment_method: Option<String>,
    pub card_name: Option<String>,
    pub card_number: Option<String>,
    pub expiry_date: Option<String>,
    pub cvv: Option<String>,
    pub upi_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub success: bool,
    pub payment: Payment,
    pub booking: Booking,
}

pub async fn pay(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<PaymentRequest>,
) -> Result<Json<PaymentResponse>> {
    let instrument = validate_instrument(&req)?;

    let (payment, booking) = state
        .service_context
        .payment_service
        .pay(current.user.id, req.booking_id, instrument)
        .await?;

    Ok(Json(PaymentResponse {
        success: true,
        payment,
        booking,
    }))
}

/// Structural validation of method-specific details. Happens here at
/// the boundary; PaymentService assumes a well-formed instrument.
fn validate_instrument(req: &PaymentRequest) -> Result<PaymentInstrument> {
    match req.payment_method.as_deref() {
        Some("upi") => {
            let upi_id = req
                .upi_id
                .as_deref()
                .filter(|id| !id.is_empty())
                .ok_or_else(|| AppError::InvalidRequest("UPI ID is required".to_string()))?;

            if !upi_id.contains('@') || upi_id.len() < 5 {
                return Err(AppError::InvalidRequest("Invalid UPI ID".to_string()));
            }

            Ok(PaymentInstrument::upi(upi_id))
        }
        _ => {
            let card_name = require_field(&req.card_name, "Card name")?;
            let card_number = require_field(&req.card_number, "Card number")?;
            require_field(&req.expiry_date, "Expiry date")?;
            require_field(&req.cvv, "CVV")?;

            let digits = card_number.chars().filter(|c| c.is_ascii_digit()).count();
            if !(13..=19).contains(&digits) {
                return Err(AppError::InvalidRequest("Invalid card number".to_string()));
            }

            Ok(PaymentInstrument::card(card_name, card_number))
        }
    }
}

fn require_field<'a>(field: &'a Option<String>, label: &str) -> Result<&'a str> {
    field
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::InvalidRequest(format!("{} is required", label)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_request() -> PaymentRequest {
        PaymentRequest {
            booking_id: 1,
            payment_method: Some("card".to_string()),
            card_name: Some("Jane Doe".to_string()),
            card_number: Some("4111111111111234".to_string()),
            expiry_date: Some("12/27".to_string()),
            cvv: Some("123".to_string()),
            upi_id: None,
        }
    }

    #[test]
    fn accepts_complete_card_details() {
        let instrument = validate_instrument(&card_request()).unwrap();
        assert!(matches!(instrument, PaymentInstrument::Card { .. }));
    }

    #[test]
    fn missing_method_defaults_to_card() {
        let mut req = card_request();
        req.payment_method = None;
        assert!(validate_instrument(&req).is_ok());
    }

    #[test]
    fn rejects_short_card_number() {
        let mut req = card_request();
        req.card_number = Some("41111".to_string());
        assert!(validate_instrument(&req).is_err());
    }

    #[test]
    fn rejects_missing_cvv() {
        let mut req = card_request();
        req.cvv = Some(String::new());
        assert!(validate_instrument(&req).is_err());
    }

    #[test]
    fn accepts_valid_upi_id() {
        let req = PaymentRequest {
            booking_id: 1,
            payment_method: Some("upi".to_string()),
            card_name: None,
            card_number: None,
            expiry_date: None,
            cvv: None,
            upi_id: Some("jane@upi".to_string()),
        };
        let instrument = validate_instrument(&req).unwrap();
        assert_eq!(
            instrument,
            PaymentInstrument::Upi {
                masked_id: "jan***@upi".to_string()
            }
        );
    }

    #[test]
    fn rejects_upi_id_without_domain() {
        let req = PaymentRequest {
            booking_id: 1,
            payment_method: Some("upi".to_string()),
            card_name: None,
            card_number: None,
            expiry_date: None,
            cvv: None,
            upi_id: Some("janedoe".to_string()),
        };
        assert!(validate_instrument(&req).is_err());
    }
}
