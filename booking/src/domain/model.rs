use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    Reserved,
    Paid,
}

impl TicketStatus {
    pub fn parse(value: &str) -> Option<TicketStatus> {
        match value {
            "RESERVED" => Some(TicketStatus::Reserved),
            "PAID" => Some(TicketStatus::Paid),
            _ => None,
        }
    }
}

/// Ticket joined with its immutable ticket type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketSnapshot {
    pub status: TicketStatus,
    pub includes_hotel: bool,
    pub is_remote: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnrollmentSnapshot {
    pub ticket: Option<TicketSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingSnapshot {
    pub id: i32,
    pub room_id: i32,
}

/// Per-request read snapshot of everything booking decisions depend on.
/// Never cached across calls; the persistence layer owns the durable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserSnapshot {
    pub enrollment: Option<EnrollmentSnapshot>,
    pub booking: Option<BookingSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub capacity: i32,
    pub occupancy: i32,
}

impl RoomSnapshot {
    /// Occupancy equal to capacity means full. The final word belongs to the
    /// conditional write at the persistence boundary, not this check.
    pub fn has_capacity(&self) -> bool {
        self.occupancy < self.capacity
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: i32,
    pub hotel_id: i32,
    pub name: String,
    pub capacity: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingView {
    pub id: i32,
    pub room: Room,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: i32,
    pub name: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelWithRooms {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub rooms: Vec<Room>,
}
