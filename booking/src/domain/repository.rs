use crate::domain::model::{BookingView, Hotel, HotelWithRooms, RoomSnapshot, UserSnapshot};
use async_trait::async_trait;
use thiserror::Error;

/// Failure of an atomic write at the persistence boundary. The write
/// re-verifies the capacity and unique-booking invariants under a lock, so a
/// race lost after the optimistic snapshot check still fails typed here.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("room has reached maximum capacity")]
    CapacityExceeded,
    #[error("user already has a booking")]
    AlreadyBooked,
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<sqlx::Error> for WriteError {
    fn from(err: sqlx::Error) -> Self {
        WriteError::Other(err.into())
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn fetch_user_snapshot(&self, user_id: i32) -> anyhow::Result<UserSnapshot>;

    async fn fetch_room_snapshot(&self, room_id: i32) -> anyhow::Result<Option<RoomSnapshot>>;

    /// Inserts a booking for the user, atomically failing if the room would
    /// exceed its capacity or the user already holds a booking.
    async fn insert_booking(&self, user_id: i32, room_id: i32) -> Result<i32, WriteError>;

    /// Re-points an existing booking at a new room, atomically failing if
    /// the new room would exceed its capacity.
    async fn update_booking_room(&self, booking_id: i32, new_room_id: i32)
        -> Result<i32, WriteError>;

    async fn find_booking(&self, user_id: i32) -> anyhow::Result<Option<BookingView>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HotelRepository: Send + Sync {
    async fn list_hotels(&self) -> anyhow::Result<Vec<Hotel>>;

    async fn find_hotel_with_rooms(&self, hotel_id: i32)
        -> anyhow::Result<Option<HotelWithRooms>>;
}
