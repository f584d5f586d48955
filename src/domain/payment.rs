use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Millisecond timestamp at capture time, mirroring the receipt
    /// numbers the front desk used to hand out.
    pub id: i64,
    pub booking_id: i64,
    pub amount: i64,
    pub status: PaymentStatus,
    pub transaction_date: DateTime<Utc>,
    #[serde(flatten)]
    pub instrument: PaymentInstrument,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Completed,
}

/// Method-specific payment details, stored only in masked form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum PaymentInstrument {
    #[serde(rename_all = "camelCase")]
    Card { card_name: String, last_four: String },
    #[serde(rename_all = "camelCase")]
    Upi { masked_id: String },
}

impl PaymentInstrument {
    /// Keeps the cardholder name and the last four digits of the number.
    pub fn card(card_name: &str, card_number: &str) -> Self {
        let digits: String = card_number.chars().filter(|c| c.is_ascii_digit()).collect();
        let last_four = if digits.len() >= 4 {
            digits[digits.len() - 4..].to_string()
        } else {
            "****".to_string()
        };

        Self::Card {
            card_name: card_name.to_string(),
            last_four,
        }
    }

    /// Keeps up to the first three characters and the @domain suffix,
    /// e.g. `john.doe@upi` becomes `joh***@upi`.
    pub fn upi(upi_id: &str) -> Self {
        let masked_id = match upi_id.find('@') {
            Some(at) => {
                // counted in characters, not bytes
                let prefix: String = upi_id[..at].chars().take(3).collect();
                format!("{}***{}", prefix, &upi_id[at..])
            }
            None => upi_id.to_string(),
        };

        Self::Upi { masked_id }
    }

    pub fn method_label(&self) -> &'static str {
        match self {
            Self::Card { .. } => "CARD",
            Self::Upi { .. } => "UPI",
        }
    }

    /// The masked identifier as it appears on receipts and invoices.
    pub fn masked_display(&self) -> String {
        match self {
            Self::Card { last_four, .. } => format!("**** **** **** {}", last_four),
            Self::Upi { masked_id } => masked_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_masking_keeps_last_four_digits() {
        let instrument = PaymentInstrument::card("Jane Doe", "4111 1111 1111 1234");
        assert_eq!(
            instrument,
            PaymentInstrument::Card {
                card_name: "Jane Doe".to_string(),
                last_four: "1234".to_string(),
            }
        );
        assert_eq!(instrument.masked_display(), "**** **** **** 1234");
    }

    #[test]
    fn upi_masking_keeps_prefix_and_domain() {
        assert_eq!(
            PaymentInstrument::upi("john.doe@upi"),
            PaymentInstrument::Upi {
                masked_id: "joh***@upi".to_string()
            }
        );
    }

    #[test]
    fn upi_masking_handles_multibyte_prefix() {
        assert_eq!(
            PaymentInstrument::upi("éé@upi"),
            PaymentInstrument::Upi {
                masked_id: "éé***@upi".to_string()
            }
        );
        assert_eq!(
            PaymentInstrument::upi("żółty.dom@bank"),
            PaymentInstrument::Upi {
                masked_id: "żół***@bank".to_string()
            }
        );
    }

    #[test]
    fn upi_masking_handles_short_prefix() {
        assert_eq!(
            PaymentInstrument::upi("a@bcd"),
            PaymentInstrument::Upi {
                masked_id: "a***@bcd".to_string()
            }
        );
    }

    #[test]
    fn card_serializes_with_method_tag() {
        let instrument = PaymentInstrument::card("Jane Doe", "4111111111111234");
        let value = serde_json::to_value(&instrument).unwrap();
        assert_eq!(value["method"], "card");
        assert_eq!(value["lastFour"], "1234");
    }
}
