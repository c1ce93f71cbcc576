// ===============================
// src/domain.rs
// ===============================
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::rules::InvalidPurchase;

// Harga tetap per kategori (whole pounds)
pub const ADULT_PRICE: u64 = 25;
pub const CHILD_PRICE: u64 = 15;
pub const INFANT_PRICE: u64 = 0;

pub const MAX_TICKETS_PER_PURCHASE: u64 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TicketType { Adult, Child, Infant }

impl TicketType {
    pub const ALL: [TicketType; 3] = [TicketType::Adult, TicketType::Child, TicketType::Infant];

    pub fn unit_price(&self) -> u64 {
        match self { TicketType::Adult => ADULT_PRICE, TicketType::Child => CHILD_PRICE, TicketType::Infant => INFANT_PRICE }
    }

    /// Infants sit on an adult's lap.
    pub fn occupies_seat(&self) -> bool { !matches!(self, TicketType::Infant) }

    pub fn as_str(&self) -> &'static str {
        match self { TicketType::Adult => "ADULT", TicketType::Child => "CHILD", TicketType::Infant => "INFANT" }
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for TicketType {
    type Err = InvalidPurchase;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADULT" => Ok(TicketType::Adult),
            "CHILD" => Ok(TicketType::Child),
            "INFANT" => Ok(TicketType::Infant),
            _ => Err(InvalidPurchase::UnknownTicketType(s.trim().to_string())),
        }
    }
}

/// "N tickets of type T". Count is unsigned, so a negative request cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketTypeRequest {
    #[serde(rename = "type")]
    ticket_type: TicketType,
    #[serde(rename = "count", alias = "noOfTickets")]
    no_of_tickets: u32,
}

impl TicketTypeRequest {
    pub fn new(ticket_type: TicketType, no_of_tickets: u32) -> Self { Self { ticket_type, no_of_tickets } }
    pub fn ticket_type(&self) -> TicketType { self.ticket_type }
    pub fn no_of_tickets(&self) -> u32 { self.no_of_tickets }
}

/// Accepts `TYPE=COUNT` or `TYPE:COUNT`, type case-insensitive.
impl FromStr for TicketTypeRequest {
    type Err = InvalidPurchase;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (ty, count) = s
            .split_once('=')
            .or_else(|| s.split_once(':'))
            .ok_or_else(|| InvalidPurchase::MalformedRequest(s.to_string()))?;
        let ticket_type: TicketType = ty.parse()?;
        let count = count.trim();
        let no_of_tickets = count
            .parse::<u32>()
            .map_err(|_| InvalidPurchase::InvalidTicketCount(count.to_string()))?;
        Ok(Self::new(ticket_type, no_of_tickets))
    }
}

/// Strictly positive account identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AccountId(u64);

impl AccountId {
    pub fn new(raw: i64) -> Result<Self, InvalidPurchase> {
        if raw <= 0 {
            return Err(InvalidPurchase::InvalidAccountId(raw.to_string()));
        }
        Ok(Self(raw.unsigned_abs()))
    }

    pub fn get(&self) -> u64 { self.0 }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// Per-category totals for one purchase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TicketCounts { pub adults: u64, pub children: u64, pub infants: u64 }

impl TicketCounts {
    pub fn tally(requests: &[TicketTypeRequest]) -> Self {
        requests.iter().fold(Self::default(), |mut acc, req| {
            let n = u64::from(req.no_of_tickets());
            match req.ticket_type() {
                TicketType::Adult => acc.adults += n,
                TicketType::Child => acc.children += n,
                TicketType::Infant => acc.infants += n,
            }
            acc
        })
    }

    pub fn of(&self, ticket_type: TicketType) -> u64 {
        match ticket_type { TicketType::Adult => self.adults, TicketType::Child => self.children, TicketType::Infant => self.infants }
    }

    pub fn total(&self) -> u64 { self.adults + self.children + self.infants }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PurchaseDecision { pub account_id: AccountId, pub total_amount: u64, pub total_seats: u64 }
