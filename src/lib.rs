// ===============================
// src/lib.rs
// ===============================
//! Ticket purchase validation & pricing.
//!
//! [`service::TicketService::purchase_tickets`] checks one purchase (account,
//! counts, adult/child/infant rules), prices it, then calls the payment
//! service and the seat reservation service, in that order. A rejected
//! purchase never reaches either service.
pub mod app;
pub mod config;
pub mod domain;
pub mod gateway;
pub mod metrics;
pub mod mocks;
pub mod rules;
pub mod service;

pub use config::SettlementMode;
pub use domain::{AccountId, TicketType, TicketTypeRequest};
pub use gateway::{GatewayError, SeatReservationService, TicketPaymentService};
pub use rules::InvalidPurchase;
pub use service::{PurchaseError, TicketService};
