// ===============================
// src/app.rs (binary wiring: mock collaborators, run, exit codes)
// ===============================
use thiserror::Error;
use tracing::warn;

use crate::config::{Cli, ConfigError, Settings};
use crate::domain::AccountId;
use crate::gateway::{MockPaymentGateway, MockSeatGateway, SeatReservationService, TicketPaymentService};
use crate::metrics::REJECTIONS;
use crate::rules;
use crate::service::{PurchaseError, TicketService};

pub const EXIT_OK: u8 = 0;
pub const EXIT_COLLABORATOR: u8 = 1;
pub const EXIT_INVALID: u8 = 2;

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Input(#[from] ConfigError),
    #[error(transparent)]
    Purchase(#[from] PurchaseError),
}

impl RunError {
    /// 2 for anything refused before a collaborator call, 1 for collaborator failures.
    pub fn exit_code(&self) -> u8 {
        match self {
            RunError::Input(_) => EXIT_INVALID,
            RunError::Purchase(e) if e.is_invalid() => EXIT_INVALID,
            RunError::Purchase(_) => EXIT_COLLABORATOR,
        }
    }
}

pub fn exit_code(outcome: &Result<(), RunError>) -> u8 {
    outcome.as_ref().map_or_else(RunError::exit_code, |_| EXIT_OK)
}

/// Mock gateways configured from `MOCK_*` settings.
pub fn mock_service(settings: &Settings) -> TicketService<MockPaymentGateway, MockSeatGateway> {
    TicketService::new(
        MockPaymentGateway::new(settings.mock_payment_fail.clone(), settings.mock_refund_fail.clone()),
        MockSeatGateway::new(settings.mock_seat_fail.clone()),
    )
    .with_settlement(settings.settlement)
}

/// Account first, then the ticket list, then the purchase itself.
pub fn run<P, S>(cli: &Cli, service: &TicketService<P, S>) -> Result<(), RunError>
where
    P: TicketPaymentService,
    S: SeatReservationService,
{
    let account_id = parse_inputs_step(|| {
        let raw = rules::parse_account_id(&cli.account)?;
        AccountId::new(raw)?;
        Ok(raw)
    })?;
    let requests = parse_inputs_step(|| cli.ticket_requests())?;
    service.purchase_tickets(account_id, &requests)?;
    Ok(())
}

// input errors count as rejections too
fn parse_inputs_step<T>(step: impl FnOnce() -> Result<T, ConfigError>) -> Result<T, RunError> {
    step().map_err(|e| {
        REJECTIONS.with_label_values(&[e.code()]).inc();
        warn!(reason = %e, code = e.code(), "purchase input rejected");
        RunError::Input(e)
    })
}
