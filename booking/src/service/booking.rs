use crate::domain::eligibility::{self, IneligibleReason};
use crate::domain::model::BookingView;
use crate::domain::repository::{BookingRepository, WriteError};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found")]
    NotFound,
    #[error("{0}")]
    Ineligible(IneligibleReason),
    #[error("user already has a booking")]
    AlreadyBooked,
    #[error("room has reached maximum capacity")]
    CapacityExceeded,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<WriteError> for AppError {
    fn from(err: WriteError) -> Self {
        match err {
            WriteError::CapacityExceeded => AppError::CapacityExceeded,
            WriteError::AlreadyBooked => AppError::AlreadyBooked,
            WriteError::NotFound => AppError::NotFound,
            WriteError::Other(err) => AppError::Internal(err),
        }
    }
}

pub struct BookingService {
    booking_repo: Arc<dyn BookingRepository>,
}

impl BookingService {
    pub fn new(booking_repo: Arc<dyn BookingRepository>) -> BookingService {
        BookingService { booking_repo }
    }

    /// Reading needs no eligibility or capacity check; a booking that exists
    /// may always be viewed by its owner.
    pub async fn get_booking(&self, user_id: i32) -> Result<BookingView, AppError> {
        self.booking_repo
            .find_booking(user_id)
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn create_booking(&self, user_id: i32, room_id: i32) -> Result<i32, AppError> {
        let room = self
            .booking_repo
            .fetch_room_snapshot(room_id)
            .await?
            .ok_or(AppError::NotFound)?;
        if !room.has_capacity() {
            return Err(AppError::CapacityExceeded);
        }

        let snapshot = self.booking_repo.fetch_user_snapshot(user_id).await?;
        if snapshot.booking.is_some() {
            return Err(AppError::AlreadyBooked);
        }
        eligibility::evaluate(&snapshot).map_err(AppError::Ineligible)?;

        // The snapshot checks above are optimistic; the insert re-verifies
        // both invariants atomically and may still fail typed.
        let booking_id = self.booking_repo.insert_booking(user_id, room_id).await?;
        Ok(booking_id)
    }

    /// Eligibility is not re-checked on a move: an existing booking proves
    /// it was checked at creation and tickets are not revocable. Only the
    /// destination room's capacity is validated.
    pub async fn move_booking(
        &self,
        user_id: i32,
        booking_id: i32,
        new_room_id: i32,
    ) -> Result<i32, AppError> {
        let room = self
            .booking_repo
            .fetch_room_snapshot(new_room_id)
            .await?
            .ok_or(AppError::NotFound)?;
        if !room.has_capacity() {
            return Err(AppError::CapacityExceeded);
        }

        let snapshot = self.booking_repo.fetch_user_snapshot(user_id).await?;
        let current = snapshot
            .booking
            .ok_or(AppError::Ineligible(IneligibleReason::NoBooking))?;
        if current.id != booking_id {
            return Err(AppError::NotFound);
        }

        let booking_id = self
            .booking_repo
            .update_booking_room(current.id, new_room_id)
            .await?;
        Ok(booking_id)
    }
}
