// ===============================
// src/mocks.rs (recording collaborators for tests)
// ===============================
use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::AccountId;
use crate::gateway::{GatewayError, SeatReservationService, TicketPaymentService};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayCall {
    Payment(AccountId, u64),
    Seats(AccountId, u64),
    Refund(AccountId, u64),
}

/// Shared, ordered record of every collaborator call. Clones see the same log.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<GatewayCall>>>,
}

impl CallLog {
    pub fn record(&self, call: GatewayCall) {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).push(call);
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

/// Records attempts (failed ones too) and answers with the configured result.
#[derive(Debug, Clone)]
pub struct RecordingPaymentService {
    log: CallLog,
    failure: Option<GatewayError>,
    refund_failure: Option<GatewayError>,
}

impl RecordingPaymentService {
    pub fn new(log: CallLog) -> Self { Self { log, failure: None, refund_failure: None } }

    pub fn failing(log: CallLog, err: GatewayError) -> Self { Self { log, failure: Some(err), refund_failure: None } }

    pub fn with_refund_failure(mut self, err: GatewayError) -> Self {
        self.refund_failure = Some(err);
        self
    }
}

impl TicketPaymentService for RecordingPaymentService {
    fn make_payment(&self, account_id: AccountId, amount: u64) -> Result<(), GatewayError> {
        self.log.record(GatewayCall::Payment(account_id, amount));
        self.failure.clone().map_or(Ok(()), Err)
    }

    fn refund_payment(&self, account_id: AccountId, amount: u64) -> Result<(), GatewayError> {
        self.log.record(GatewayCall::Refund(account_id, amount));
        self.refund_failure.clone().map_or(Ok(()), Err)
    }
}

#[derive(Debug, Clone)]
pub struct RecordingSeatService {
    log: CallLog,
    failure: Option<GatewayError>,
}

impl RecordingSeatService {
    pub fn new(log: CallLog) -> Self { Self { log, failure: None } }

    pub fn failing(log: CallLog, err: GatewayError) -> Self { Self { log, failure: Some(err) } }
}

impl SeatReservationService for RecordingSeatService {
    fn reserve_seat(&self, account_id: AccountId, seat_count: u64) -> Result<(), GatewayError> {
        self.log.record(GatewayCall::Seats(account_id, seat_count));
        self.failure.clone().map_or(Ok(()), Err)
    }
}
