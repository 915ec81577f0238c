use crate::domain::eligibility;
use crate::domain::model::{Hotel, HotelWithRooms};
use crate::domain::repository::{BookingRepository, HotelRepository};
use crate::service::booking::AppError;
use std::sync::Arc;

/// Hotel browsing is gated by the same ticket rules as booking: only a user
/// with a paid, hotel-inclusive, non-remote ticket sees the hotel list.
pub struct HotelsService {
    booking_repo: Arc<dyn BookingRepository>,
    hotel_repo: Arc<dyn HotelRepository>,
}

impl HotelsService {
    pub fn new(
        booking_repo: Arc<dyn BookingRepository>,
        hotel_repo: Arc<dyn HotelRepository>,
    ) -> HotelsService {
        HotelsService {
            booking_repo,
            hotel_repo,
        }
    }

    pub async fn get_hotels(&self, user_id: i32) -> Result<Vec<Hotel>, AppError> {
        self.check_access(user_id).await?;
        Ok(self.hotel_repo.list_hotels().await?)
    }

    pub async fn get_hotel(&self, user_id: i32, hotel_id: i32) -> Result<HotelWithRooms, AppError> {
        self.check_access(user_id).await?;
        self.hotel_repo
            .find_hotel_with_rooms(hotel_id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn check_access(&self, user_id: i32) -> Result<(), AppError> {
        let snapshot = self.booking_repo.fetch_user_snapshot(user_id).await?;
        eligibility::evaluate(&snapshot).map_err(AppError::Ineligible)
    }
}
