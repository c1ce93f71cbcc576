// ===============================
// src/main.rs
// ===============================
/*
=============================================================================
Project : ticket_service — ticket purchase validation & pricing in Rust
Module  : main.rs
Version : 0.1.0
Author  : Kukuh Tripamungkas Wicaksono (Kukuh TW)
License : MIT (see LICENSE)

Summary : Validates a ticket purchase (account, counts, adult/child/infant
          rules), prices it, then calls the payment and seat reservation
          services in that order. Logs with tracing and counts outcomes
          in Prometheus metrics.

Usage   :
 # satu pembelian, mock gateway
 cargo run -- --account 2 ADULT=2 CHILD=1 INFANT=1

 # seat gagal + refund, lalu lihat metrics
 MOCK_SEAT_FAIL="sold out" SETTLEMENT_MODE=compensating cargo run -- -a 3 ADULT=1 --print-metrics

(c) 2025 Kukuh TW. All rights reserved where applicable.
=============================================================================
*/
use std::process::ExitCode;

use tracing::{error, info};

use ticket_service::app;
use ticket_service::config;
use ticket_service::metrics;
use ticket_service::SettlementMode;

fn main() -> ExitCode {
    // ---- Load config ----
    let (cli, settings) = config::load();

    // ---- Logging ----
    tracing_subscriber::fmt()
        .with_env_filter(settings.log_level.as_str())
        .init();

    // ---- Metrics ----
    metrics::init();
    metrics::CONFIG_SETTLEMENT_MODE.set(i64::from(settings.settlement == SettlementMode::Compensating));

    info!(
        settlement = settings.settlement.as_str(),
        mock_payment_fail = ?settings.mock_payment_fail,
        mock_seat_fail = ?settings.mock_seat_fail,
        mock_refund_fail = ?settings.mock_refund_fail,
        "startup config"
    );

    // ---- Collaborators (mock) ----
    let service = app::mock_service(&settings);
    let outcome = app::run(&cli, &service);

    if settings.print_metrics {
        print!("{}", metrics::render());
    }

    if let Err(e) = &outcome {
        error!(%e, exit_code = e.exit_code(), "purchase failed");
        eprintln!("error: {e}");
    }
    ExitCode::from(app::exit_code(&outcome))
}
