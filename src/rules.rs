// ===============================
// src/rules.rs
// ===============================
use thiserror::Error;
use tracing::debug;

use crate::domain::{
    AccountId, PurchaseDecision, TicketCounts, TicketType, TicketTypeRequest,
    MAX_TICKETS_PER_PURCHASE,
};

/// Every way a purchase can be refused before any collaborator is called.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidPurchase {
    #[error("accountId must be an integer > 0 (got {0})")]
    InvalidAccountId(String),
    #[error("No ticket requests provided")]
    NoRequests,
    #[error("Each request must have a type and number of tickets (got {0:?})")]
    MalformedRequest(String),
    #[error("Unknown ticket type: {0}")]
    UnknownTicketType(String),
    #[error("ticket counts must be integers >= 0 (got {0})")]
    InvalidTicketCount(String),
    #[error("At least one ticket must be purchased")]
    NoTickets,
    #[error("Cannot purchase more than 25 tickets at a time (requested {requested})")]
    TooManyTickets { requested: u64 },
    #[error("Child and Infant tickets require at least one Adult ticket")]
    UnaccompaniedMinor,
    #[error("Each infant must be accompanied by an adult (infants <= adults, got {infants} > {adults})")]
    InfantsExceedAdults { infants: u64, adults: u64 },
    #[error("calculated amount is out of range")]
    AmountOutOfRange,
    #[error("calculated seat count is out of range")]
    SeatsOutOfRange,
}

impl InvalidPurchase {
    /// Stable tag, used as a metrics label.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidAccountId(_) => "invalid_account",
            Self::NoRequests => "no_requests",
            Self::MalformedRequest(_) => "malformed_request",
            Self::UnknownTicketType(_) => "unknown_ticket_type",
            Self::InvalidTicketCount(_) => "invalid_ticket_count",
            Self::NoTickets => "no_tickets",
            Self::TooManyTickets { .. } => "too_many_tickets",
            Self::UnaccompaniedMinor => "unaccompanied_minor",
            Self::InfantsExceedAdults { .. } => "infants_exceed_adults",
            Self::AmountOutOfRange => "amount_out_of_range",
            Self::SeatsOutOfRange => "seats_out_of_range",
        }
    }
}

/// Parses a raw account id from text. Non-integers get the same error as `<= 0`.
pub fn parse_account_id(raw: &str) -> Result<i64, InvalidPurchase> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| InvalidPurchase::InvalidAccountId(raw.trim().to_string()))
}

/// Checks a purchase in order and, if it passes, prices it.
/// First failing check wins.
pub fn evaluate(account_id: i64, requests: &[TicketTypeRequest]) -> Result<PurchaseDecision, InvalidPurchase> {
    // 1) account
    let account_id = AccountId::new(account_id)?;

    // 2) shape
    if requests.is_empty() {
        return Err(InvalidPurchase::NoRequests);
    }

    // 3) aggregate
    let counts = TicketCounts::tally(requests);
    debug!(%account_id, ?counts, "tickets tallied");

    // 4) business rules
    check_counts(&counts)?;

    // 5-6) price & seats
    Ok(PurchaseDecision {
        account_id,
        total_amount: total_amount(&counts)?,
        total_seats: total_seats(&counts)?,
    })
}

pub fn check_counts(counts: &TicketCounts) -> Result<(), InvalidPurchase> {
    let total = counts.total();
    if total == 0 {
        return Err(InvalidPurchase::NoTickets);
    }
    if total > MAX_TICKETS_PER_PURCHASE {
        return Err(InvalidPurchase::TooManyTickets { requested: total });
    }
    if (counts.children > 0 || counts.infants > 0) && counts.adults == 0 {
        return Err(InvalidPurchase::UnaccompaniedMinor);
    }
    // satu pangkuan per dewasa
    if counts.infants > counts.adults {
        return Err(InvalidPurchase::InfantsExceedAdults { infants: counts.infants, adults: counts.adults });
    }
    Ok(())
}

pub fn total_amount(counts: &TicketCounts) -> Result<u64, InvalidPurchase> {
    TicketType::ALL.iter().try_fold(0u64, |acc, ty| {
        counts
            .of(*ty)
            .checked_mul(ty.unit_price())
            .and_then(|line| acc.checked_add(line))
            .ok_or(InvalidPurchase::AmountOutOfRange)
    })
}

pub fn total_seats(counts: &TicketCounts) -> Result<u64, InvalidPurchase> {
    TicketType::ALL
        .iter()
        .filter(|ty| ty.occupies_seat())
        .try_fold(0u64, |acc, ty| acc.checked_add(counts.of(*ty)))
        .ok_or(InvalidPurchase::SeatsOutOfRange)
}
