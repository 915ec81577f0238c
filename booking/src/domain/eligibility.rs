use crate::domain::model::{TicketStatus, UserSnapshot};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IneligibleReason {
    #[error("missing enrollment")]
    MissingEnrollment,
    #[error("missing ticket")]
    MissingTicket,
    #[error("ticket unpaid")]
    TicketUnpaid,
    #[error("ticket excludes hotel")]
    TicketExcludesHotel,
    #[error("ticket is remote")]
    TicketRemote,
    #[error("no existing booking")]
    NoBooking,
}

/// Decides whether a user may hold a hotel booking. Short-circuits on the
/// first unmet condition so callers surface a single obstacle at a time.
pub fn evaluate(snapshot: &UserSnapshot) -> Result<(), IneligibleReason> {
    let enrollment = snapshot
        .enrollment
        .as_ref()
        .ok_or(IneligibleReason::MissingEnrollment)?;
    let ticket = enrollment
        .ticket
        .as_ref()
        .ok_or(IneligibleReason::MissingTicket)?;

    if ticket.status != TicketStatus::Paid {
        return Err(IneligibleReason::TicketUnpaid);
    }
    if !ticket.includes_hotel {
        return Err(IneligibleReason::TicketExcludesHotel);
    }
    if ticket.is_remote {
        return Err(IneligibleReason::TicketRemote);
    }

    Ok(())
}
