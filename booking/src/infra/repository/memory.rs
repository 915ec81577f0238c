use crate::domain::model::{
    BookingSnapshot, BookingView, EnrollmentSnapshot, Hotel, HotelWithRooms, Room, RoomSnapshot,
    TicketSnapshot, TicketStatus, UserSnapshot,
};
use crate::domain::repository::{BookingRepository, HotelRepository, WriteError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone)]
struct BookingRow {
    id: i32,
    user_id: i32,
    room_id: i32,
}

#[derive(Default)]
struct State {
    enrollments: HashMap<i32, EnrollmentSnapshot>,
    hotels: Vec<Hotel>,
    rooms: HashMap<i32, Room>,
    bookings: Vec<BookingRow>,
    next_booking_id: i32,
}

/// In-memory persistence gateway with the same conditional-write contract as
/// the Postgres implementation: both writes re-verify their invariants under
/// the state lock. Backs the test suites so they need no live database.
pub struct MemoryRepository {
    state: Mutex<State>,
}

impl MemoryRepository {
    pub fn new() -> MemoryRepository {
        MemoryRepository {
            state: Mutex::new(State {
                next_booking_id: 1,
                ..State::default()
            }),
        }
    }

    pub fn add_hotel(&self, id: i32, name: &str, image: &str) {
        self.state.lock().unwrap().hotels.push(Hotel {
            id,
            name: name.to_string(),
            image: image.to_string(),
        });
    }

    pub fn add_room(&self, id: i32, hotel_id: i32, name: &str, capacity: i32) {
        self.state.lock().unwrap().rooms.insert(
            id,
            Room {
                id,
                hotel_id,
                name: name.to_string(),
                capacity,
            },
        );
    }

    pub fn set_enrollment(&self, user_id: i32, enrollment: EnrollmentSnapshot) {
        self.state
            .lock()
            .unwrap()
            .enrollments
            .insert(user_id, enrollment);
    }

    /// Seeds a fully eligible attendee: enrolled, ticket paid, hotel
    /// included, on-site.
    pub fn enroll_with_paid_ticket(&self, user_id: i32) {
        self.set_enrollment(
            user_id,
            EnrollmentSnapshot {
                ticket: Some(TicketSnapshot {
                    status: TicketStatus::Paid,
                    includes_hotel: true,
                    is_remote: false,
                }),
            },
        );
    }
}

impl Default for MemoryRepository {
    fn default() -> Self {
        MemoryRepository::new()
    }
}

#[async_trait]
impl BookingRepository for MemoryRepository {
    async fn fetch_user_snapshot(&self, user_id: i32) -> anyhow::Result<UserSnapshot> {
        let state = self.state.lock().unwrap();

        Ok(UserSnapshot {
            enrollment: state.enrollments.get(&user_id).copied(),
            booking: state
                .bookings
                .iter()
                .find(|b| b.user_id == user_id)
                .map(|b| BookingSnapshot {
                    id: b.id,
                    room_id: b.room_id,
                }),
        })
    }

    async fn fetch_room_snapshot(&self, room_id: i32) -> anyhow::Result<Option<RoomSnapshot>> {
        let state = self.state.lock().unwrap();

        Ok(state.rooms.get(&room_id).map(|room| RoomSnapshot {
            capacity: room.capacity,
            occupancy: state.bookings.iter().filter(|b| b.room_id == room_id).count() as i32,
        }))
    }

    async fn insert_booking(&self, user_id: i32, room_id: i32) -> Result<i32, WriteError> {
        let mut state = self.state.lock().unwrap();

        let capacity = match state.rooms.get(&room_id) {
            Some(room) => room.capacity,
            None => return Err(WriteError::NotFound),
        };
        if state.bookings.iter().any(|b| b.user_id == user_id) {
            return Err(WriteError::AlreadyBooked);
        }
        let occupancy = state.bookings.iter().filter(|b| b.room_id == room_id).count() as i32;
        if occupancy >= capacity {
            return Err(WriteError::CapacityExceeded);
        }

        let id = state.next_booking_id;
        state.next_booking_id += 1;
        state.bookings.push(BookingRow {
            id,
            user_id,
            room_id,
        });

        Ok(id)
    }

    async fn update_booking_room(
        &self,
        booking_id: i32,
        new_room_id: i32,
    ) -> Result<i32, WriteError> {
        let mut state = self.state.lock().unwrap();

        let capacity = match state.rooms.get(&new_room_id) {
            Some(room) => room.capacity,
            None => return Err(WriteError::NotFound),
        };
        let occupancy = state
            .bookings
            .iter()
            .filter(|b| b.room_id == new_room_id)
            .count() as i32;
        if occupancy >= capacity {
            return Err(WriteError::CapacityExceeded);
        }

        match state.bookings.iter_mut().find(|b| b.id == booking_id) {
            Some(booking) => {
                booking.room_id = new_room_id;
                Ok(booking.id)
            }
            None => Err(WriteError::NotFound),
        }
    }

    async fn find_booking(&self, user_id: i32) -> anyhow::Result<Option<BookingView>> {
        let state = self.state.lock().unwrap();

        Ok(state
            .bookings
            .iter()
            .find(|b| b.user_id == user_id)
            .and_then(|b| {
                state.rooms.get(&b.room_id).map(|room| BookingView {
                    id: b.id,
                    room: room.clone(),
                })
            }))
    }
}

#[async_trait]
impl HotelRepository for MemoryRepository {
    async fn list_hotels(&self) -> anyhow::Result<Vec<Hotel>> {
        Ok(self.state.lock().unwrap().hotels.clone())
    }

    async fn find_hotel_with_rooms(
        &self,
        hotel_id: i32,
    ) -> anyhow::Result<Option<HotelWithRooms>> {
        let state = self.state.lock().unwrap();

        Ok(state
            .hotels
            .iter()
            .find(|h| h.id == hotel_id)
            .map(|hotel| HotelWithRooms {
                id: hotel.id,
                name: hotel.name.clone(),
                image: hotel.image.clone(),
                rooms: {
                    let mut rooms: Vec<Room> = state
                        .rooms
                        .values()
                        .filter(|r| r.hotel_id == hotel_id)
                        .cloned()
                        .collect();
                    rooms.sort_by_key(|r| r.id);
                    rooms
                },
            }))
    }
}
