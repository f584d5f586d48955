use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    domain::Room,
    error::{AppError, Result},
    repository::RoomRepository,
};

pub struct InMemoryRoomRepository {
    rooms: RwLock<Vec<Room>>,
}

impl InMemoryRoomRepository {
    pub fn new(rooms: Vec<Room>) -> Self {
        Self {
            rooms: RwLock::new(rooms),
        }
    }

    /// The fixed catalog the hotel opens with.
    pub fn with_default_catalog() -> Self {
        Self::new(vec![
            Room {
                id: 1,
                name: "Standard Room".to_string(),
                description: "Comfortable room with basic amenities".to_string(),
                image: "standard.jpg".to_string(),
                price: 2999,
                available: 10,
            },
            Room {
                id: 2,
                name: "Deluxe Room".to_string(),
                description: "Spacious room with premium amenities".to_string(),
                image: "deluxe.jpg".to_string(),
                price: 4999,
                available: 8,
            },
            Room {
                id: 3,
                name: "Suite".to_string(),
                description: "Luxurious suite with stunning views".to_string(),
                image: "suite.jpg".to_string(),
                price: 8999,
                available: 5,
            },
            Room {
                id: 4,
                name: "Presidential Suite".to_string(),
                description: "Ultimate luxury experience".to_string(),
                image: "presidential.jpg".to_string(),
                price: 14999,
                available: 2,
            },
        ])
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn list(&self) -> Result<Vec<Room>> {
        Ok(self.rooms.read().await.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Room>> {
        let rooms = self.rooms.read().await;
        Ok(rooms.iter().find(|r| r.id == id).cloned())
    }

    async fn decrement_available(&self, id: i64) -> Result<Room> {
        let mut rooms = self.rooms.write().await;
        let room = rooms
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound("Room not found".to_string()))?;

        // available never drops below zero
        if room.available < 1 {
            return Err(AppError::InvalidRequest("Room not available".to_string()));
        }

        room.available -= 1;
        Ok(room.clone())
    }
}
