use crate::domain::model::{Hotel, HotelWithRooms, Room};
use crate::domain::repository;
use async_trait::async_trait;
use sqlx::Error::RowNotFound;
use sqlx::{Pool, Postgres, Row};

#[derive(Clone)]
pub struct PgHotelRepository {
    pub pool: Pool<Postgres>,
}

impl PgHotelRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PgHotelRepository { pool }
    }
}

#[async_trait]
impl repository::HotelRepository for PgHotelRepository {
    async fn list_hotels(&self) -> anyhow::Result<Vec<Hotel>> {
        let rows = sqlx::query("SELECT id, name, image FROM hotels ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .iter()
            .map(|row| Hotel {
                id: row.get("id"),
                name: row.get("name"),
                image: row.get("image"),
            })
            .collect())
    }

    async fn find_hotel_with_rooms(
        &self,
        hotel_id: i32,
    ) -> anyhow::Result<Option<HotelWithRooms>> {
        let hotel = sqlx::query("SELECT id, name, image FROM hotels WHERE id = $1")
            .bind(hotel_id)
            .fetch_one(&self.pool)
            .await;

        let hotel = match hotel {
            Ok(row) => (
                row.get::<i32, _>("id"),
                row.get::<String, _>("name"),
                row.get::<String, _>("image"),
            ),
            Err(RowNotFound) => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let rooms = sqlx::query(
            "SELECT id, hotel_id, name, capacity FROM rooms WHERE hotel_id = $1 ORDER BY id",
        )
        .bind(hotel_id)
        .fetch_all(&self.pool)
        .await?
        .iter()
        .map(|row| Room {
            id: row.get("id"),
            hotel_id: row.get("hotel_id"),
            name: row.get("name"),
            capacity: row.get("capacity"),
        })
        .collect();

        Ok(Some(HotelWithRooms {
            id: hotel.0,
            name: hotel.1,
            image: hotel.2,
            rooms,
        }))
    }
}
