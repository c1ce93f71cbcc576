// ===============================
// src/service.rs
// ===============================
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::SettlementMode;
use crate::domain::{PurchaseDecision, TicketTypeRequest};
use crate::gateway::{GatewayError, SeatReservationService, TicketPaymentService};
use crate::metrics::{AMOUNT_CHARGED, PURCHASES, REJECTIONS, SEATS_RESERVED};
use crate::rules::{self, InvalidPurchase};

#[derive(Debug, Error)]
pub enum PurchaseError {
    #[error(transparent)]
    Invalid(#[from] InvalidPurchase),
    #[error(transparent)]
    Payment(GatewayError),
    #[error(transparent)]
    SeatReservation(GatewayError),
    #[error("seat reservation failed ({seat}) and the refund failed too ({refund})")]
    CompensationFailed { seat: GatewayError, refund: GatewayError },
}

impl PurchaseError {
    pub fn is_invalid(&self) -> bool { matches!(self, PurchaseError::Invalid(_)) }
}

/// Validates, prices and books one purchase per call. Holds no per-call state.
#[derive(Debug, Clone)]
pub struct TicketService<P, S> {
    payment: P,
    seats: S,
    settlement: SettlementMode,
}

impl<P, S> TicketService<P, S>
where
    P: TicketPaymentService,
    S: SeatReservationService,
{
    pub fn new(payment: P, seats: S) -> Self {
        Self { payment, seats, settlement: SettlementMode::default() }
    }

    pub fn with_settlement(mut self, settlement: SettlementMode) -> Self {
        self.settlement = settlement;
        self
    }

    pub fn settlement(&self) -> SettlementMode { self.settlement }

    /// Runs every check, then pays and reserves seats, in that order.
    /// Nothing is sent to either service if a check fails.
    pub fn purchase_tickets(&self, account_id: i64, requests: &[TicketTypeRequest]) -> Result<(), PurchaseError> {
        let decision = match rules::evaluate(account_id, requests) {
            Ok(d) => d,
            Err(e) => {
                REJECTIONS.with_label_values(&[e.code()]).inc();
                warn!(account_id, reason = %e, code = e.code(), "purchase rejected");
                return Err(e.into());
            }
        };
        let account = decision.account_id;

        // bayar dulu, baru pesan kursi
        self.payment
            .make_payment(account, decision.total_amount)
            .map_err(PurchaseError::Payment)?;
        AMOUNT_CHARGED.inc_by(decision.total_amount);

        if let Err(seat_err) = self.seats.reserve_seat(account, decision.total_seats) {
            return Err(self.settle_failed_reservation(&decision, seat_err));
        }
        SEATS_RESERVED.inc_by(decision.total_seats);
        PURCHASES.inc();

        info!(
            account_id = %account,
            amount = decision.total_amount,
            seats = decision.total_seats,
            "purchase completed"
        );
        Ok(())
    }

    fn settle_failed_reservation(&self, decision: &PurchaseDecision, seat: GatewayError) -> PurchaseError {
        match self.settlement {
            SettlementMode::FireAndForget => {
                error!(account_id = %decision.account_id, amount = decision.total_amount, %seat,
                    "seat reservation failed after payment; no compensation");
                PurchaseError::SeatReservation(seat)
            }
            SettlementMode::Compensating => {
                match self.payment.refund_payment(decision.account_id, decision.total_amount) {
                    Ok(()) => {
                        warn!(account_id = %decision.account_id, amount = decision.total_amount, %seat,
                            "seat reservation failed; payment refunded");
                        PurchaseError::SeatReservation(seat)
                    }
                    Err(refund) => {
                        error!(account_id = %decision.account_id, amount = decision.total_amount, %seat, %refund,
                            "seat reservation failed and refund failed");
                        PurchaseError::CompensationFailed { seat, refund }
                    }
                }
            }
        }
    }
}
