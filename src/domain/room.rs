use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub image: String,
    /// Nightly rate in whole currency units.
    pub price: i64,
    /// Remaining rooms of this type. Decremented on booking creation;
    /// nothing ever increments it back.
    pub available: i64,
}
