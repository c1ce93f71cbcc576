// ===============================
// src/gateway.rs (external collaborators)
// ===============================
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::AccountId;
use crate::metrics::COLLABORATOR_CALLS;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("declined: {0}")]
    Declined(String),
    #[error("unavailable: {0}")]
    Unavailable(String),
    #[error("{0} is not supported by this gateway")]
    Unsupported(&'static str),
}

/// Takes money for a purchase. Return value only signals success or failure.
pub trait TicketPaymentService {
    fn make_payment(&self, account_id: AccountId, amount: u64) -> Result<(), GatewayError>;

    /// Only called in compensating settlement, after a failed seat reservation.
    fn refund_payment(&self, _account_id: AccountId, _amount: u64) -> Result<(), GatewayError> {
        Err(GatewayError::Unsupported("refund"))
    }
}

pub trait SeatReservationService {
    fn reserve_seat(&self, account_id: AccountId, seat_count: u64) -> Result<(), GatewayError>;
}

/// Mock payment gateway: log + ACK, or decline with a fixed reason.
#[derive(Debug, Clone, Default)]
pub struct MockPaymentGateway {
    decline_reason: Option<String>,
    refund_failure: Option<String>,
}

impl MockPaymentGateway {
    pub fn new(decline_reason: Option<String>, refund_failure: Option<String>) -> Self {
        Self { decline_reason, refund_failure }
    }
}

impl TicketPaymentService for MockPaymentGateway {
    fn make_payment(&self, account_id: AccountId, amount: u64) -> Result<(), GatewayError> {
        if let Some(reason) = &self.decline_reason {
            COLLABORATOR_CALLS.with_label_values(&["payment", "failed"]).inc();
            warn!(%account_id, amount, %reason, "payment: DECLINED");
            return Err(GatewayError::Declined(reason.clone()));
        }
        COLLABORATOR_CALLS.with_label_values(&["payment", "ok"]).inc();
        info!(%account_id, amount, "payment: ACK");
        Ok(())
    }

    fn refund_payment(&self, account_id: AccountId, amount: u64) -> Result<(), GatewayError> {
        if let Some(reason) = &self.refund_failure {
            COLLABORATOR_CALLS.with_label_values(&["refund", "failed"]).inc();
            warn!(%account_id, amount, %reason, "refund: FAILED");
            return Err(GatewayError::Unavailable(reason.clone()));
        }
        COLLABORATOR_CALLS.with_label_values(&["refund", "ok"]).inc();
        info!(%account_id, amount, "refund: ACK");
        Ok(())
    }
}

/// Mock seat booking: log + ACK, or fail with a fixed reason.
#[derive(Debug, Clone, Default)]
pub struct MockSeatGateway {
    failure: Option<String>,
}

impl MockSeatGateway {
    pub fn new(failure: Option<String>) -> Self { Self { failure } }
}

impl SeatReservationService for MockSeatGateway {
    fn reserve_seat(&self, account_id: AccountId, seat_count: u64) -> Result<(), GatewayError> {
        if let Some(reason) = &self.failure {
            COLLABORATOR_CALLS.with_label_values(&["seat", "failed"]).inc();
            warn!(%account_id, seat_count, %reason, "seat: UNAVAILABLE");
            return Err(GatewayError::Unavailable(reason.clone()));
        }
        COLLABORATOR_CALLS.with_label_values(&["seat", "ok"]).inc();
        info!(%account_id, seat_count, "seat: RESERVED");
        Ok(())
    }
}
