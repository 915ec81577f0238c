use crate::domain::model::{
    BookingSnapshot, BookingView, EnrollmentSnapshot, Room, RoomSnapshot, TicketSnapshot,
    TicketStatus, UserSnapshot,
};
use crate::domain::repository::{self, WriteError};
use async_trait::async_trait;
use sqlx::Error::RowNotFound;
use sqlx::{Pool, Postgres, Row};

#[derive(Clone)]
pub struct PgBookingRepository {
    pub pool: Pool<Postgres>,
}

impl PgBookingRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PgBookingRepository { pool }
    }
}

#[async_trait]
impl repository::BookingRepository for PgBookingRepository {
    async fn fetch_user_snapshot(&self, user_id: i32) -> anyhow::Result<UserSnapshot> {
        let enrollment_row = sqlx::query(
            "SELECT t.status, tt.includes_hotel, tt.is_remote \
             FROM enrollments e \
             LEFT JOIN tickets t ON t.enrollment_id = e.id \
             LEFT JOIN ticket_types tt ON tt.id = t.ticket_type_id \
             WHERE e.user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        let enrollment = match enrollment_row {
            None => None,
            Some(row) => {
                let status: Option<String> = row.get("status");
                let ticket = match status {
                    None => None,
                    Some(status) => {
                        let status = TicketStatus::parse(&status)
                            .ok_or_else(|| anyhow::anyhow!("unknown ticket status: {}", status))?;
                        Some(TicketSnapshot {
                            status,
                            includes_hotel: row.get("includes_hotel"),
                            is_remote: row.get("is_remote"),
                        })
                    }
                };
                Some(EnrollmentSnapshot { ticket })
            }
        };

        let booking = sqlx::query("SELECT id, room_id FROM bookings WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .map(|row| BookingSnapshot {
                id: row.get("id"),
                room_id: row.get("room_id"),
            });

        Ok(UserSnapshot {
            enrollment,
            booking,
        })
    }

    async fn fetch_room_snapshot(&self, room_id: i32) -> anyhow::Result<Option<RoomSnapshot>> {
        let row = sqlx::query(
            "SELECT r.capacity, count(b.id) AS occupancy \
             FROM rooms r \
             LEFT JOIN bookings b ON b.room_id = r.id \
             WHERE r.id = $1 \
             GROUP BY r.id, r.capacity",
        )
        .bind(room_id)
        .fetch_one(&self.pool)
        .await;

        match row {
            Ok(row) => {
                let occupancy: i64 = row.get("occupancy");
                Ok(Some(RoomSnapshot {
                    capacity: row.get("capacity"),
                    occupancy: occupancy as i32,
                }))
            }
            Err(RowNotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn insert_booking(&self, user_id: i32, room_id: i32) -> Result<i32, WriteError> {
        let mut tx = self.pool.begin().await?;

        // Lock the room row so concurrent writes against it serialize; an
        // early return drops the transaction and rolls back.
        let room = sqlx::query("SELECT capacity FROM rooms WHERE id = $1 FOR UPDATE")
            .bind(room_id)
            .fetch_optional(&mut *tx)
            .await?;
        let capacity: i32 = match room {
            Some(row) => row.get("capacity"),
            None => return Err(WriteError::NotFound),
        };

        let existing = sqlx::query("SELECT id FROM bookings WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;
        if existing.is_some() {
            return Err(WriteError::AlreadyBooked);
        }

        let occupancy: i64 =
            sqlx::query("SELECT count(*) AS occupancy FROM bookings WHERE room_id = $1")
                .bind(room_id)
                .fetch_one(&mut *tx)
                .await?
                .get("occupancy");
        if occupancy >= capacity as i64 {
            return Err(WriteError::CapacityExceeded);
        }

        let booking_id: i32 =
            sqlx::query("INSERT INTO bookings(user_id, room_id) VALUES ($1, $2) RETURNING id")
                .bind(user_id)
                .bind(room_id)
                .fetch_one(&mut *tx)
                .await?
                .get("id");

        tx.commit().await?;

        Ok(booking_id)
    }

    async fn update_booking_room(
        &self,
        booking_id: i32,
        new_room_id: i32,
    ) -> Result<i32, WriteError> {
        let mut tx = self.pool.begin().await?;

        let room = sqlx::query("SELECT capacity FROM rooms WHERE id = $1 FOR UPDATE")
            .bind(new_room_id)
            .fetch_optional(&mut *tx)
            .await?;
        let capacity: i32 = match room {
            Some(row) => row.get("capacity"),
            None => return Err(WriteError::NotFound),
        };

        let occupancy: i64 =
            sqlx::query("SELECT count(*) AS occupancy FROM bookings WHERE room_id = $1")
                .bind(new_room_id)
                .fetch_one(&mut *tx)
                .await?
                .get("occupancy");
        if occupancy >= capacity as i64 {
            return Err(WriteError::CapacityExceeded);
        }

        // Update-in-place: the source room's occupancy is a count over
        // bookings, so it drops with the same commit.
        let updated = sqlx::query("UPDATE bookings SET room_id = $1 WHERE id = $2 RETURNING id")
            .bind(new_room_id)
            .bind(booking_id)
            .fetch_optional(&mut *tx)
            .await?;
        let booking_id: i32 = match updated {
            Some(row) => row.get("id"),
            None => return Err(WriteError::NotFound),
        };

        tx.commit().await?;

        Ok(booking_id)
    }

    async fn find_booking(&self, user_id: i32) -> anyhow::Result<Option<BookingView>> {
        let row = sqlx::query(
            "SELECT b.id AS booking_id, r.id AS room_id, r.hotel_id, r.name, r.capacity \
             FROM bookings b \
             JOIN rooms r ON r.id = b.room_id \
             WHERE b.user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await;

        match row {
            Ok(row) => Ok(Some(BookingView {
                id: row.get("booking_id"),
                room: Room {
                    id: row.get("room_id"),
                    hotel_id: row.get("hotel_id"),
                    name: row.get("name"),
                    capacity: row.get("capacity"),
                },
            })),
            Err(RowNotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
