pub mod account_service;
pub mod booking_service;
pub mod payment_service;

use std::sync::Arc;

use crate::auth::AuthService;
use crate::repository::*;

pub use account_service::AccountService;
pub use booking_service::BookingService;
pub use payment_service::PaymentService;

pub struct ServiceContext {
    pub user_repo: Arc<dyn UserRepository>,
    pub room_repo: Arc<dyn RoomRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub auth_service: Arc<AuthService>,
    pub account_service: Arc<AccountService>,
    pub booking_service: Arc<BookingService>,
    pub payment_service: Arc<PaymentService>,
}

impl ServiceContext {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        room_repo: Arc<dyn RoomRepository>,
        booking_repo: Arc<dyn BookingRepository>,
        auth_service: Arc<AuthService>,
    ) -> Self {
        let account_service = Arc::new(AccountService::new(user_repo.clone()));
        let booking_service =
            Arc::new(BookingService::new(room_repo.clone(), booking_repo.clone()));
        let payment_service = Arc::new(PaymentService::new(booking_repo.clone()));

        Self {
            user_repo,
            room_repo,
            booking_repo,
            auth_service,
            account_service,
            booking_service,
            payment_service,
        }
    }
}
